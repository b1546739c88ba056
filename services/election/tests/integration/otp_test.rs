use chrono::{Duration, Utc};

use matdaan_domain::status::ApprovalStatus;

use matdaan_election::error::ElectionServiceError;
use matdaan_election::usecase::otp::{
    IssueOtpInput, IssueOtpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};

use crate::helpers::World;

fn issue_uc(world: &World) -> IssueOtpUseCase<
    crate::helpers::MockUserRepo,
    crate::helpers::MockVoterRepo,
    crate::helpers::MockOtpRepo,
    crate::helpers::MockAuditRepo,
> {
    IssueOtpUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
        otps: world.otp_repo(),
        audit: world.audit_repo(),
    }
}

fn verify_uc(world: &World) -> VerifyOtpUseCase<
    crate::helpers::MockUserRepo,
    crate::helpers::MockVoterRepo,
    crate::helpers::MockOtpRepo,
    crate::helpers::MockAuditRepo,
> {
    VerifyOtpUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
        otps: world.otp_repo(),
        audit: world.audit_repo(),
    }
}

#[tokio::test]
async fn should_issue_six_digit_code_valid_for_ten_minutes() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );

    let out = issue_uc(&world)
        .execute(IssueOtpInput {
            identifier: "asha@example.com".into(),
            ip_address: None,
        })
        .await
        .unwrap();

    assert_eq!(out.demo_code.len(), 6);
    assert!(out.demo_code.chars().all(|c| c.is_ascii_digit()));
    let ttl = out.expires_at - Utc::now();
    assert!(ttl > Duration::minutes(9) && ttl <= Duration::minutes(10));

    assert_eq!(world.audit_actions(voter.id), vec!["otp_issued"]);
}

#[tokio::test]
async fn should_supersede_previous_code_on_reissue() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let voter_no = voter.voter_no.clone().unwrap();

    issue_uc(&world)
        .execute(IssueOtpInput {
            identifier: voter_no.clone(),
            ip_address: None,
        })
        .await
        .unwrap();
    let second = issue_uc(&world)
        .execute(IssueOtpInput {
            identifier: voter_no.clone(),
            ip_address: None,
        })
        .await
        .unwrap();

    // The first record is dead even though it has not expired; only the
    // newest one stays active.
    {
        let otps = world.otps.lock().unwrap();
        assert_eq!(otps.len(), 2);
        assert_eq!(otps.iter().filter(|c| c.is_active()).count(), 1);
        let oldest = otps.iter().min_by_key(|c| c.created_at).unwrap();
        assert!(oldest.superseded);
    }

    let fresh = verify_uc(&world)
        .execute(VerifyOtpInput {
            identifier: voter_no,
            code: second.demo_code,
            ip_address: None,
        })
        .await;
    assert!(fresh.is_ok());
}

#[tokio::test]
async fn should_consume_code_exactly_once() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    world.add_otp(voter.id, "482913");

    let uc = verify_uc(&world);
    uc.execute(VerifyOtpInput {
        identifier: "asha@example.com".into(),
        code: "482913".into(),
        ip_address: None,
    })
    .await
    .unwrap();

    // Same correct code a second time fails: one-time use.
    let second = uc
        .execute(VerifyOtpInput {
            identifier: "asha@example.com".into(),
            code: "482913".into(),
            ip_address: None,
        })
        .await;
    assert!(matches!(second, Err(ElectionServiceError::OtpInvalid)));

    assert_eq!(
        world.audit_actions(voter.id),
        vec!["otp_verified", "otp_rejected"]
    );
}

#[tokio::test]
async fn should_not_consume_code_on_wrong_guess() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    world.add_otp(voter.id, "482913");

    let uc = verify_uc(&world);
    let wrong = uc
        .execute(VerifyOtpInput {
            identifier: "asha@example.com".into(),
            code: "000000".into(),
            ip_address: None,
        })
        .await;
    assert!(matches!(wrong, Err(ElectionServiceError::OtpInvalid)));

    // The record was not consumed; the correct code still works.
    uc.execute(VerifyOtpInput {
        identifier: "asha@example.com".into(),
        code: "482913".into(),
        ip_address: None,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn should_reject_expired_code_even_when_correct() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let record = world.add_otp(voter.id, "482913");
    {
        let mut otps = world.otps.lock().unwrap();
        let stored = otps.iter_mut().find(|c| c.id == record.id).unwrap();
        stored.expires_at = Utc::now() - Duration::seconds(1);
    }

    let result = verify_uc(&world)
        .execute(VerifyOtpInput {
            identifier: "asha@example.com".into(),
            code: "482913".into(),
            ip_address: None,
        })
        .await;
    assert!(matches!(result, Err(ElectionServiceError::OtpInvalid)));
}

#[tokio::test]
async fn should_not_issue_for_pending_voter() {
    let world = World::new();
    world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Pending,
    );

    let result = issue_uc(&world)
        .execute(IssueOtpInput {
            identifier: "asha@example.com".into(),
            ip_address: None,
        })
        .await;
    assert!(matches!(result, Err(ElectionServiceError::NotApproved)));
}

#[tokio::test]
async fn should_not_issue_for_voter_who_already_voted() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    world
        .voters
        .lock()
        .unwrap()
        .iter_mut()
        .find(|v| v.id == voter.id)
        .unwrap()
        .has_voted = true;

    let result = issue_uc(&world)
        .execute(IssueOtpInput {
            identifier: "asha@example.com".into(),
            ip_address: None,
        })
        .await;
    assert!(matches!(result, Err(ElectionServiceError::DuplicateVote)));
}

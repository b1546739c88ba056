use chrono::{Duration, Utc};
use uuid::Uuid;

use matdaan_domain::status::ApprovalStatus;

use matdaan_election::error::ElectionServiceError;
use matdaan_election::usecase::vote::{CastVoteInput, CastVoteUseCase, IdentifyVoterUseCase};

use crate::helpers::World;

type Cast = CastVoteUseCase<
    crate::helpers::MockUserRepo,
    crate::helpers::MockVoterRepo,
    crate::helpers::MockCandidateRepo,
    crate::helpers::MockOtpRepo,
    crate::helpers::MockVoteLedger,
    crate::helpers::MockAuditRepo,
>;

fn cast_uc(world: &World) -> Cast {
    CastVoteUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
        candidates: world.candidate_repo(),
        otps: world.otp_repo(),
        ledger: world.vote_ledger(),
        audit: world.audit_repo(),
    }
}

/// Insert a consumed OTP record so the voter is inside the cast window.
fn mark_verified(world: &World, voter_id: Uuid) {
    let record = world.add_otp(voter_id, "482913");
    let mut otps = world.otps.lock().unwrap();
    let stored = otps.iter_mut().find(|c| c.id == record.id).unwrap();
    stored.consumed_at = Some(Utc::now());
}

#[tokio::test]
async fn should_identify_approved_voter_by_email_and_voter_no() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );

    let uc = IdentifyVoterUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
    };

    let by_email = uc.execute("asha@example.com").await.unwrap();
    assert_eq!(by_email.name, "Asha");
    assert!(!by_email.has_voted);

    let by_no = uc.execute(voter.voter_no.as_deref().unwrap()).await.unwrap();
    assert_eq!(by_no.voter_no, voter.voter_no);
}

#[tokio::test]
async fn should_fail_identification_for_unknown_pending_or_voted() {
    let world = World::new();
    world.add_voter(
        "Pending",
        "pending@example.com",
        "111111111111",
        ApprovalStatus::Pending,
    );
    let voted = world.add_voter(
        "Voted",
        "voted@example.com",
        "222222222222",
        ApprovalStatus::Approved,
    );
    world
        .voters
        .lock()
        .unwrap()
        .iter_mut()
        .find(|v| v.id == voted.id)
        .unwrap()
        .has_voted = true;

    let uc = IdentifyVoterUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
    };

    assert!(matches!(
        uc.execute("nobody@example.com").await,
        Err(ElectionServiceError::VoterNotFound)
    ));
    assert!(matches!(
        uc.execute("pending@example.com").await,
        Err(ElectionServiceError::NotApproved)
    ));
    assert!(matches!(
        uc.execute("voted@example.com").await,
        Err(ElectionServiceError::DuplicateVote)
    ));
}

#[tokio::test]
async fn should_cast_vote_once_and_update_tally_flag_and_ledger() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);
    let bob = world.add_candidate("Bob", "Progress", ApprovalStatus::Approved);
    mark_verified(&world, voter.id);

    cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: alice.id,
            ip_address: Some("203.0.113.9".into()),
        })
        .await
        .unwrap();

    // Alice's tally increased by exactly one; the voter is marked.
    assert_eq!(world.candidate_by_id(alice.id).total_votes, 1);
    let stored = world.voter_by_id(voter.id);
    assert!(stored.has_voted);
    assert!(stored.voted_at.is_some());
    assert_eq!(world.votes.lock().unwrap().len(), 1);
    assert_eq!(world.audit_actions(voter.id), vec!["vote_cast"]);

    // A second attempt — even for a different candidate — is a duplicate:
    // no new row, no tally movement anywhere.
    let second = cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: bob.id,
            ip_address: None,
        })
        .await;
    assert!(matches!(second, Err(ElectionServiceError::DuplicateVote)));
    assert_eq!(world.votes.lock().unwrap().len(), 1);
    assert_eq!(world.candidate_by_id(bob.id).total_votes, 0);
    assert_eq!(world.candidate_by_id(alice.id).total_votes, 1);
    assert_eq!(
        world.audit_actions(voter.id),
        vec!["vote_cast", "vote_rejected"]
    );
}

#[tokio::test]
async fn should_require_recent_otp_verification() {
    let world = World::new();
    world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);

    // No verification at all.
    let result = cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: alice.id,
            ip_address: None,
        })
        .await;
    assert!(matches!(result, Err(ElectionServiceError::OtpRequired)));
    assert!(world.votes.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_stale_otp_verification() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);

    let record = world.add_otp(voter.id, "482913");
    {
        let mut otps = world.otps.lock().unwrap();
        let stored = otps.iter_mut().find(|c| c.id == record.id).unwrap();
        // Verified well outside the cast window.
        stored.consumed_at = Some(Utc::now() - Duration::seconds(600));
    }

    let result = cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: alice.id,
            ip_address: None,
        })
        .await;
    assert!(matches!(result, Err(ElectionServiceError::OtpRequired)));
}

#[tokio::test]
async fn should_reject_unknown_or_unapproved_candidate() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    let pending = world.add_candidate("Pat", "Undecided", ApprovalStatus::Pending);
    mark_verified(&world, voter.id);

    let unknown = cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: Uuid::new_v4(),
            ip_address: None,
        })
        .await;
    assert!(matches!(
        unknown,
        Err(ElectionServiceError::InvalidCandidate)
    ));

    let unapproved = cast_uc(&world)
        .execute(CastVoteInput {
            identifier: "asha@example.com".into(),
            candidate_id: pending.id,
            ip_address: None,
        })
        .await;
    assert!(matches!(
        unapproved,
        Err(ElectionServiceError::InvalidCandidate)
    ));

    assert!(world.votes.lock().unwrap().is_empty());
    assert_eq!(world.voter_by_id(voter.id).has_voted, false);
}

#[tokio::test]
async fn should_keep_tally_sum_equal_to_ledger_row_count() {
    let world = World::new();
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);
    let bob = world.add_candidate("Bob", "Progress", ApprovalStatus::Approved);

    for (i, candidate) in [alice.id, alice.id, bob.id].iter().enumerate() {
        let email = format!("voter{i}@example.com");
        let national_id = format!("{:012}", i + 1);
        let voter = world.add_voter(&format!("V{i}"), &email, &national_id, ApprovalStatus::Approved);
        mark_verified(&world, voter.id);
        cast_uc(&world)
            .execute(CastVoteInput {
                identifier: email,
                candidate_id: *candidate,
                ip_address: None,
            })
            .await
            .unwrap();
    }

    let tally_sum: i64 = world
        .candidates
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.total_votes)
        .sum();
    assert_eq!(tally_sum, world.votes.lock().unwrap().len() as i64);
    assert_eq!(world.candidate_by_id(alice.id).total_votes, 2);
    assert_eq!(world.candidate_by_id(bob.id).total_votes, 1);
}

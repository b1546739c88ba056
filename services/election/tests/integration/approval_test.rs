use uuid::Uuid;

use matdaan_domain::status::ApprovalStatus;
use matdaan_domain::voter_no::validate_voter_no;

use matdaan_election::error::ElectionServiceError;
use matdaan_election::usecase::approval::{
    ApproveCandidateUseCase, ApproveVoterUseCase, RejectCandidateUseCase, RejectVoterUseCase,
};

use crate::helpers::World;

#[tokio::test]
async fn should_approve_pending_voter_and_assign_voter_no() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Pending,
    );

    let uc = ApproveVoterUseCase {
        voters: world.voter_repo(),
    };
    let out = uc.execute(voter.id).await.unwrap();

    assert!(
        validate_voter_no(&out.voter_no),
        "voter number {} should match VOTER_<date>_<4 digits>",
        out.voter_no
    );

    let stored = world.voter_by_id(voter.id);
    assert_eq!(stored.status, ApprovalStatus::Approved);
    assert_eq!(stored.voter_no.as_deref(), Some(out.voter_no.as_str()));
}

#[tokio::test]
async fn should_assign_distinct_voter_numbers() {
    let world = World::new();
    let first = world.add_voter(
        "A",
        "a@example.com",
        "111111111111",
        ApprovalStatus::Pending,
    );
    let second = world.add_voter(
        "B",
        "b@example.com",
        "222222222222",
        ApprovalStatus::Pending,
    );

    let uc = ApproveVoterUseCase {
        voters: world.voter_repo(),
    };
    let first_no = uc.execute(first.id).await.unwrap().voter_no;
    let second_no = uc.execute(second.id).await.unwrap().voter_no;

    assert_ne!(first_no, second_no);
}

#[tokio::test]
async fn should_reject_double_approval_as_invalid_transition() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Pending,
    );

    let uc = ApproveVoterUseCase {
        voters: world.voter_repo(),
    };
    uc.execute(voter.id).await.unwrap();

    let again = uc.execute(voter.id).await;
    assert!(matches!(
        again,
        Err(ElectionServiceError::InvalidTransition)
    ));
    // Repeating the action is safe: status and voter number are unchanged.
    let stored = world.voter_by_id(voter.id);
    assert_eq!(stored.status, ApprovalStatus::Approved);
}

#[tokio::test]
async fn should_not_approve_rejected_voter() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Rejected,
    );

    let uc = ApproveVoterUseCase {
        voters: world.voter_repo(),
    };
    let result = uc.execute(voter.id).await;
    assert!(matches!(
        result,
        Err(ElectionServiceError::InvalidTransition)
    ));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_voter() {
    let world = World::new();
    let uc = ApproveVoterUseCase {
        voters: world.voter_repo(),
    };
    let result = uc.execute(Uuid::new_v4()).await;
    assert!(matches!(result, Err(ElectionServiceError::VoterNotFound)));
}

#[tokio::test]
async fn should_reject_pending_voter_with_reason() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Pending,
    );

    let uc = RejectVoterUseCase {
        voters: world.voter_repo(),
    };
    uc.execute(voter.id, "document mismatch").await.unwrap();

    let stored = world.voter_by_id(voter.id);
    assert_eq!(stored.status, ApprovalStatus::Rejected);
    assert_eq!(stored.rejection_reason.as_deref(), Some("document mismatch"));
    assert!(stored.voter_no.is_none());
}

#[tokio::test]
async fn should_approve_pending_candidate() {
    let world = World::new();
    let candidate = world.add_candidate("Alice", "Unity", ApprovalStatus::Pending);

    let uc = ApproveCandidateUseCase {
        candidates: world.candidate_repo(),
    };
    uc.execute(candidate.id).await.unwrap();

    assert_eq!(
        world.candidate_by_id(candidate.id).status,
        ApprovalStatus::Approved
    );
}

#[tokio::test]
async fn should_reject_pending_candidate_with_reason() {
    let world = World::new();
    let candidate = world.add_candidate("Alice", "Unity", ApprovalStatus::Pending);

    let uc = RejectCandidateUseCase {
        candidates: world.candidate_repo(),
    };
    uc.execute(candidate.id, "incomplete nomination").await.unwrap();

    let stored = world.candidate_by_id(candidate.id);
    assert_eq!(stored.status, ApprovalStatus::Rejected);
    assert_eq!(
        stored.rejection_reason.as_deref(),
        Some("incomplete nomination")
    );
}

#[tokio::test]
async fn should_not_transition_approved_candidate() {
    let world = World::new();
    let candidate = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);

    let approve = ApproveCandidateUseCase {
        candidates: world.candidate_repo(),
    };
    assert!(matches!(
        approve.execute(candidate.id).await,
        Err(ElectionServiceError::InvalidTransition)
    ));

    let reject = RejectCandidateUseCase {
        candidates: world.candidate_repo(),
    };
    assert!(matches!(
        reject.execute(candidate.id, "late").await,
        Err(ElectionServiceError::InvalidTransition)
    ));
}

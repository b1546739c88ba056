use chrono::Utc;

use matdaan_domain::status::ApprovalStatus;

use matdaan_election::usecase::admin::ResetElectionUseCase;
use matdaan_election::usecase::vote::{CastVoteInput, CastVoteUseCase};

use crate::helpers::World;

async fn cast(world: &World, email: &str, candidate_id: uuid::Uuid) {
    let uc = CastVoteUseCase {
        users: world.user_repo(),
        voters: world.voter_repo(),
        candidates: world.candidate_repo(),
        otps: world.otp_repo(),
        ledger: world.vote_ledger(),
        audit: world.audit_repo(),
    };
    uc.execute(CastVoteInput {
        identifier: email.to_owned(),
        candidate_id,
        ip_address: None,
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn should_reset_votes_flags_and_tallies_but_keep_identities() {
    let world = World::new();
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);
    let bob = world.add_candidate("Bob", "Progress", ApprovalStatus::Approved);

    for (i, candidate) in [alice.id, bob.id].iter().enumerate() {
        let email = format!("voter{i}@example.com");
        let voter = world.add_voter(
            &format!("V{i}"),
            &email,
            &format!("{:012}", i + 1),
            ApprovalStatus::Approved,
        );
        let record = world.add_otp(voter.id, "482913");
        world
            .otps
            .lock()
            .unwrap()
            .iter_mut()
            .find(|c| c.id == record.id)
            .unwrap()
            .consumed_at = Some(Utc::now());
        cast(&world, &email, *candidate).await;
    }
    let audit_entries_before = world.audits.lock().unwrap().len();

    let uc = ResetElectionUseCase {
        ledger: world.vote_ledger(),
    };
    let summary = uc.execute().await.unwrap();

    assert_eq!(summary.votes_deleted, 2);
    assert_eq!(summary.voters_reset, 2);
    assert_eq!(summary.candidates_reset, 2);

    // Tallies are back to zero and every voter may vote again.
    assert!(world.votes.lock().unwrap().is_empty());
    for candidate in world.candidates.lock().unwrap().iter() {
        assert_eq!(candidate.total_votes, 0);
    }
    for voter in world.voters.lock().unwrap().iter() {
        assert!(!voter.has_voted);
        assert!(voter.voted_at.is_none());
    }

    // No rows are deleted and approvals stand; the audit trail survives.
    assert_eq!(world.voters.lock().unwrap().len(), 2);
    assert_eq!(world.candidates.lock().unwrap().len(), 2);
    assert!(
        world
            .voters
            .lock()
            .unwrap()
            .iter()
            .all(|v| v.status == ApprovalStatus::Approved)
    );
    assert_eq!(world.audits.lock().unwrap().len(), audit_entries_before);
}

#[tokio::test]
async fn should_be_a_no_op_on_an_already_clean_election() {
    let world = World::new();
    world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);

    let uc = ResetElectionUseCase {
        ledger: world.vote_ledger(),
    };
    let summary = uc.execute().await.unwrap();

    assert_eq!(summary.votes_deleted, 0);
    assert_eq!(summary.voters_reset, 0);
    assert_eq!(summary.candidates_reset, 0);
}

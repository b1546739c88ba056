use matdaan_domain::pagination::PageRequest;
use matdaan_domain::status::ApprovalStatus;

use matdaan_election::domain::types::AuditEntry;
use matdaan_election::usecase::admin::{
    ListAuditLogUseCase, ListNominationsUseCase, ListPendingVotersUseCase, StatsUseCase,
};
use matdaan_election::usecase::results::ResultsUseCase;

use crate::helpers::World;

#[tokio::test]
async fn should_count_election_stats() {
    let world = World::new();
    world.add_voter("A", "a@example.com", "111111111111", ApprovalStatus::Approved);
    world.add_voter("B", "b@example.com", "222222222222", ApprovalStatus::Pending);
    world.add_voter("C", "c@example.com", "333333333333", ApprovalStatus::Rejected);
    world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);
    world.add_candidate("Pat", "Undecided", ApprovalStatus::Pending);

    let uc = StatsUseCase {
        voters: world.voter_repo(),
        candidates: world.candidate_repo(),
        ledger: world.vote_ledger(),
    };
    let stats = uc.execute().await.unwrap();

    assert_eq!(stats.total_voters, 3);
    assert_eq!(stats.approved_voters, 1);
    assert_eq!(stats.pending_voters, 1);
    assert_eq!(stats.rejected_voters, 1);
    assert_eq!(stats.total_candidates, 2);
    assert_eq!(stats.approved_candidates, 1);
    assert_eq!(stats.total_votes, 0);
}

#[tokio::test]
async fn should_list_only_pending_voters_with_account_details() {
    let world = World::new();
    world.add_voter("A", "a@example.com", "111111111111", ApprovalStatus::Approved);
    let pending = world.add_voter(
        "B",
        "b@example.com",
        "222222222222",
        ApprovalStatus::Pending,
    );

    let uc = ListPendingVotersUseCase {
        voters: world.voter_repo(),
    };
    let profiles = uc.execute(PageRequest::default()).await.unwrap();

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].voter.id, pending.id);
    assert_eq!(profiles[0].name, "B");
    assert_eq!(profiles[0].email, "b@example.com");
}

#[tokio::test]
async fn should_list_pending_and_rejected_nominations_only() {
    let world = World::new();
    world.add_candidate("Approved", "Unity", ApprovalStatus::Approved);
    world.add_candidate("Pending", "Fresh", ApprovalStatus::Pending);
    world.add_candidate("Rejected", "Late", ApprovalStatus::Rejected);

    let uc = ListNominationsUseCase {
        candidates: world.candidate_repo(),
    };
    let profiles = uc.execute(PageRequest::default()).await.unwrap();

    let mut parties: Vec<&str> = profiles.iter().map(|p| p.candidate.party_name.as_str()).collect();
    parties.sort();
    assert_eq!(parties, vec!["Fresh", "Late"]);
}

#[tokio::test]
async fn should_page_audit_log_newest_first() {
    let world = World::new();
    let voter = world.add_voter(
        "Asha",
        "asha@example.com",
        "123456789012",
        ApprovalStatus::Approved,
    );
    {
        let mut audits = world.audits.lock().unwrap();
        for action in ["login", "otp_issued", "otp_verified", "vote_cast"] {
            audits.push(AuditEntry::new(voter.id, action, None, None));
            // Distinct timestamps keep the ordering assertion meaningful.
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
    }

    let uc = ListAuditLogUseCase {
        audit: world.audit_repo(),
    };
    let first_page = uc
        .execute(PageRequest { per_page: 2, page: 1 })
        .await
        .unwrap();
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].action, "vote_cast");
    assert_eq!(first_page[1].action, "otp_verified");

    let second_page = uc
        .execute(PageRequest { per_page: 2, page: 2 })
        .await
        .unwrap();
    assert_eq!(second_page[0].action, "otp_issued");
    assert_eq!(second_page[1].action, "login");
}

#[tokio::test]
async fn should_rank_results_by_votes_descending() {
    let world = World::new();
    let alice = world.add_candidate("Alice", "Unity", ApprovalStatus::Approved);
    let bob = world.add_candidate("Bob", "Progress", ApprovalStatus::Approved);
    world.add_candidate("Pat", "Undecided", ApprovalStatus::Pending);
    {
        let mut candidates = world.candidates.lock().unwrap();
        candidates.iter_mut().find(|c| c.id == alice.id).unwrap().total_votes = 3;
        candidates.iter_mut().find(|c| c.id == bob.id).unwrap().total_votes = 5;
    }

    let uc = ResultsUseCase {
        candidates: world.candidate_repo(),
    };
    let out = uc.execute().await.unwrap();

    // Only approved candidates appear, highest tally first.
    assert_eq!(out.standings.len(), 2);
    assert_eq!(out.standings[0].name, "Bob");
    assert_eq!(out.standings[0].votes, 5);
    assert_eq!(out.standings[1].name, "Alice");
    assert_eq!(out.total_votes, 8);
}

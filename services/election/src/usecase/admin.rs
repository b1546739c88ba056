use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use matdaan_domain::pagination::PageRequest;
use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

use crate::crypto;
use crate::domain::repository::{
    AuditLogRepository, CandidateRepository, UserRepository, VoteLedger, VoterRepository,
};
use crate::domain::types::{
    AuditEntry, ElectionStats, NominationProfile, ResetSummary, User, VoterProfile,
};
use crate::error::ElectionServiceError;

// ── Stats ────────────────────────────────────────────────────────────────────

pub struct StatsUseCase<V, C, L>
where
    V: VoterRepository,
    C: CandidateRepository,
    L: VoteLedger,
{
    pub voters: V,
    pub candidates: C,
    pub ledger: L,
}

impl<V, C, L> StatsUseCase<V, C, L>
where
    V: VoterRepository,
    C: CandidateRepository,
    L: VoteLedger,
{
    pub async fn execute(&self) -> Result<ElectionStats, ElectionServiceError> {
        Ok(ElectionStats {
            total_voters: self.voters.count_all().await?,
            approved_voters: self.voters.count_by_status(ApprovalStatus::Approved).await?,
            pending_voters: self.voters.count_by_status(ApprovalStatus::Pending).await?,
            rejected_voters: self.voters.count_by_status(ApprovalStatus::Rejected).await?,
            total_candidates: self.candidates.count_all().await?,
            approved_candidates: self
                .candidates
                .count_by_status(ApprovalStatus::Approved)
                .await?,
            total_votes: self.ledger.count_all().await?,
        })
    }
}

// ── Listings ─────────────────────────────────────────────────────────────────

pub struct ListPendingVotersUseCase<V: VoterRepository> {
    pub voters: V,
}

impl<V: VoterRepository> ListPendingVotersUseCase<V> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Vec<VoterProfile>, ElectionServiceError> {
        self.voters
            .list_with_users(ApprovalStatus::Pending, page)
            .await
    }
}

/// Pending and rejected nominations — what the admin can still act on or
/// see the outcome of (approved ones live on the results board).
pub struct ListNominationsUseCase<C: CandidateRepository> {
    pub candidates: C,
}

impl<C: CandidateRepository> ListNominationsUseCase<C> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Vec<NominationProfile>, ElectionServiceError> {
        self.candidates
            .list_with_users(
                &[ApprovalStatus::Pending, ApprovalStatus::Rejected],
                page,
            )
            .await
    }
}

pub struct ListAuditLogUseCase<A: AuditLogRepository> {
    pub audit: A,
}

impl<A: AuditLogRepository> ListAuditLogUseCase<A> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Vec<AuditEntry>, ElectionServiceError> {
        self.audit.list_recent(page).await
    }
}

// ── ResetElection ────────────────────────────────────────────────────────────

pub struct ResetElectionUseCase<L: VoteLedger> {
    pub ledger: L,
}

impl<L: VoteLedger> ResetElectionUseCase<L> {
    /// Clears votes, has-voted flags, and tallies in one transaction.
    /// Identities, approval statuses, and the audit log are untouched.
    pub async fn execute(&self) -> Result<ResetSummary, ElectionServiceError> {
        self.ledger.reset().await
    }
}

// ── Admin seeding ────────────────────────────────────────────────────────────

/// Create the initial admin account when none with this email exists.
/// Returns `true` when an account was created.
pub async fn seed_admin<U: UserRepository>(
    users: &U,
    email: &str,
    name: &str,
    password: &str,
) -> Result<bool, ElectionServiceError> {
    if users.find_by_email(email).await?.is_some() {
        return Ok(false);
    }
    let password_hash = crypto::hash_password(password).context("hash admin password")?;
    let now = Utc::now();
    users
        .create(&User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            name: name.to_owned(),
            role: UserRole::Admin,
            password_hash,
            is_verified: true,
            created_at: now,
            updated_at: now,
        })
        .await?;
    Ok(true)
}

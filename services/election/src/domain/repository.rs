#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use matdaan_domain::pagination::PageRequest;
use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

use crate::domain::types::{
    AuditEntry, Candidate, CandidateStanding, NominationProfile, OtpCode, ResetSummary, User,
    Voter, VoterProfile, VoteRecord,
};
use crate::error::ElectionServiceError;

/// Repository for account records.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ElectionServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ElectionServiceError>;
    async fn find_by_email_and_role(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<User>, ElectionServiceError>;
    async fn create(&self, user: &User) -> Result<(), ElectionServiceError>;
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), ElectionServiceError>;
}

/// Repository for voter registrations.
pub trait VoterRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Voter>, ElectionServiceError>;
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Voter>, ElectionServiceError>;
    async fn find_by_voter_no(
        &self,
        voter_no: &str,
    ) -> Result<Option<Voter>, ElectionServiceError>;
    async fn national_id_exists(&self, national_id: &str) -> Result<bool, ElectionServiceError>;
    async fn voter_no_exists(&self, voter_no: &str) -> Result<bool, ElectionServiceError>;

    /// Insert the account and the pending registration atomically.
    async fn create_with_user(
        &self,
        user: &User,
        voter: &Voter,
    ) -> Result<(), ElectionServiceError>;

    /// Conditionally transition pending → approved and assign the voter
    /// number. Returns `false` when the row was not pending (no-op).
    async fn mark_approved(
        &self,
        id: Uuid,
        voter_no: &str,
    ) -> Result<bool, ElectionServiceError>;

    /// Conditionally transition pending → rejected, storing the reason.
    /// Returns `false` when the row was not pending (no-op).
    async fn mark_rejected(&self, id: Uuid, reason: &str) -> Result<bool, ElectionServiceError>;

    async fn list_with_users(
        &self,
        status: ApprovalStatus,
        page: PageRequest,
    ) -> Result<Vec<VoterProfile>, ElectionServiceError>;

    async fn count_all(&self) -> Result<u64, ElectionServiceError>;
    async fn count_by_status(&self, status: ApprovalStatus)
        -> Result<u64, ElectionServiceError>;
}

/// Repository for candidate nominations.
pub trait CandidateRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, ElectionServiceError>;

    /// The live nomination: newest row for the user.
    async fn find_latest_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Candidate>, ElectionServiceError>;

    /// Insert the account and the pending nomination atomically.
    async fn create_with_user(
        &self,
        user: &User,
        candidate: &Candidate,
    ) -> Result<(), ElectionServiceError>;

    /// Insert a fresh nomination row (resubmission after rejection).
    async fn create(&self, candidate: &Candidate) -> Result<(), ElectionServiceError>;

    /// Conditionally transition pending → approved. Returns `false` when the
    /// row was not pending (no-op).
    async fn mark_approved(&self, id: Uuid) -> Result<bool, ElectionServiceError>;

    /// Conditionally transition pending → rejected, storing the reason.
    async fn mark_rejected(&self, id: Uuid, reason: &str) -> Result<bool, ElectionServiceError>;

    async fn list_with_users(
        &self,
        statuses: &[ApprovalStatus],
        page: PageRequest,
    ) -> Result<Vec<NominationProfile>, ElectionServiceError>;

    /// Approved candidates with names and tallies, ordered by votes desc.
    async fn standings(&self) -> Result<Vec<CandidateStanding>, ElectionServiceError>;

    async fn count_all(&self) -> Result<u64, ElectionServiceError>;
    async fn count_by_status(&self, status: ApprovalStatus)
        -> Result<u64, ElectionServiceError>;
}

/// Repository for one-time codes.
pub trait OtpRepository: Send + Sync {
    /// Mark all active codes for a voter superseded. Returns the number of
    /// codes invalidated.
    async fn supersede_active(&self, voter_id: Uuid) -> Result<u64, ElectionServiceError>;

    async fn create(&self, code: &OtpCode) -> Result<(), ElectionServiceError>;

    /// The voter's single active (non-superseded, unconsumed, unexpired) code.
    async fn find_active(&self, voter_id: Uuid) -> Result<Option<OtpCode>, ElectionServiceError>;

    /// Consume a code (sets consumed_at = now). One-time use.
    async fn mark_consumed(&self, id: Uuid) -> Result<(), ElectionServiceError>;

    /// When the voter last successfully verified a code, if ever.
    async fn last_consumed_at(
        &self,
        voter_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, ElectionServiceError>;
}

/// Append-only vote ledger. Owns the only write paths that touch tallies.
pub trait VoteLedger: Send + Sync {
    /// Record a vote atomically: insert the row, flip the voter's has-voted
    /// flag (conditionally — a voter that already voted fails the whole
    /// transaction with a duplicate-vote error), increment the candidate
    /// tally in-place, and append the audit entry. All-or-nothing.
    async fn record(
        &self,
        vote: &VoteRecord,
        entry: &AuditEntry,
    ) -> Result<(), ElectionServiceError>;

    async fn count_all(&self) -> Result<u64, ElectionServiceError>;

    /// Delete all votes, clear every has-voted flag, zero every tally — in
    /// one transaction. Identities and approval statuses are untouched.
    async fn reset(&self) -> Result<ResetSummary, ElectionServiceError>;
}

/// Repository for the append-only audit log.
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditEntry) -> Result<(), ElectionServiceError>;
    async fn list_recent(
        &self,
        page: PageRequest,
    ) -> Result<Vec<AuditEntry>, ElectionServiceError>;
}

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;
use matdaan_domain::voter_no::is_voter_no;

use crate::domain::repository::{
    AuditLogRepository, CandidateRepository, OtpRepository, UserRepository, VoteLedger,
    VoterRepository,
};
use crate::domain::types::{AuditEntry, CAST_WINDOW_SECS, Voter, VoteRecord};
use crate::error::ElectionServiceError;

/// Resolve a voter by public voter number (`VOTER_…`) or account email.
/// Each step of the voting flow re-resolves from the identifier — there is
/// no server-side session carrying the voter between steps.
pub(crate) async fn resolve_voter<U, V>(
    users: &U,
    voters: &V,
    identifier: &str,
) -> Result<Voter, ElectionServiceError>
where
    U: UserRepository,
    V: VoterRepository,
{
    if is_voter_no(identifier) {
        return voters
            .find_by_voter_no(identifier)
            .await?
            .ok_or(ElectionServiceError::VoterNotFound);
    }
    let user = users
        .find_by_email_and_role(identifier, UserRole::Voter)
        .await?
        .ok_or(ElectionServiceError::VoterNotFound)?;
    voters
        .find_by_user_id(user.id)
        .await?
        .ok_or(ElectionServiceError::VoterNotFound)
}

// ── IdentifyVoter ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct VoterSummary {
    pub voter_no: Option<String>,
    pub name: String,
    pub status: ApprovalStatus,
    pub has_voted: bool,
    pub voted_at: Option<DateTime<Utc>>,
}

pub struct IdentifyVoterUseCase<U, V>
where
    U: UserRepository,
    V: VoterRepository,
{
    pub users: U,
    pub voters: V,
}

impl<U, V> IdentifyVoterUseCase<U, V>
where
    U: UserRepository,
    V: VoterRepository,
{
    pub async fn execute(&self, identifier: &str) -> Result<VoterSummary, ElectionServiceError> {
        let voter = resolve_voter(&self.users, &self.voters, identifier).await?;
        if !voter.status.is_approved() {
            return Err(ElectionServiceError::NotApproved);
        }
        if voter.has_voted {
            return Err(ElectionServiceError::DuplicateVote);
        }

        let user = self
            .users
            .find_by_id(voter.user_id)
            .await?
            .ok_or(ElectionServiceError::UserNotFound)?;

        Ok(VoterSummary {
            voter_no: voter.voter_no,
            name: user.name,
            status: voter.status,
            has_voted: voter.has_voted,
            voted_at: voter.voted_at,
        })
    }
}

// ── CastVote ─────────────────────────────────────────────────────────────────

pub struct CastVoteInput {
    pub identifier: String,
    pub candidate_id: Uuid,
    pub ip_address: Option<String>,
}

pub struct CastVoteUseCase<U, V, C, O, L, A>
where
    U: UserRepository,
    V: VoterRepository,
    C: CandidateRepository,
    O: OtpRepository,
    L: VoteLedger,
    A: AuditLogRepository,
{
    pub users: U,
    pub voters: V,
    pub candidates: C,
    pub otps: O,
    pub ledger: L,
    pub audit: A,
}

impl<U, V, C, O, L, A> CastVoteUseCase<U, V, C, O, L, A>
where
    U: UserRepository,
    V: VoterRepository,
    C: CandidateRepository,
    O: OtpRepository,
    L: VoteLedger,
    A: AuditLogRepository,
{
    pub async fn execute(&self, input: CastVoteInput) -> Result<(), ElectionServiceError> {
        let voter = resolve_voter(&self.users, &self.voters, &input.identifier).await?;

        let result = self.try_cast(&voter, &input).await;
        if let Err(ref e) = result {
            // Failed attempts are audited best-effort; the original error
            // must not be masked by an audit write failure.
            let entry = AuditEntry::new(
                voter.id,
                "vote_rejected",
                Some(e.kind().to_owned()),
                input.ip_address.clone(),
            );
            if let Err(audit_err) = self.audit.append(&entry).await {
                tracing::warn!(error = %audit_err, "failed to audit rejected vote");
            }
        }
        result
    }

    async fn try_cast(
        &self,
        voter: &Voter,
        input: &CastVoteInput,
    ) -> Result<(), ElectionServiceError> {
        if !voter.status.is_approved() {
            return Err(ElectionServiceError::NotApproved);
        }
        if voter.has_voted {
            return Err(ElectionServiceError::DuplicateVote);
        }

        let candidate = self
            .candidates
            .find_by_id(input.candidate_id)
            .await?
            .ok_or(ElectionServiceError::InvalidCandidate)?;
        if !candidate.status.is_approved() {
            return Err(ElectionServiceError::InvalidCandidate);
        }

        // The immediately preceding OTP verification must be recent.
        let verified_at = self
            .otps
            .last_consumed_at(voter.id)
            .await?
            .ok_or(ElectionServiceError::OtpRequired)?;
        if Utc::now() - verified_at > Duration::seconds(CAST_WINDOW_SECS) {
            return Err(ElectionServiceError::OtpRequired);
        }

        let now = Utc::now();
        let vote = VoteRecord {
            id: Uuid::new_v4(),
            voter_id: voter.id,
            candidate_id: candidate.id,
            voted_at: now,
        };
        let entry = AuditEntry::new(
            voter.id,
            "vote_cast",
            Some(format!("voted for candidate {}", candidate.id)),
            input.ip_address.clone(),
        );

        // Vote insert, has-voted flip, and tally increment are one
        // transaction inside the ledger; a racing duplicate surfaces as
        // DuplicateVote with nothing written.
        self.ledger.record(&vote, &entry).await
    }
}

use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use matdaan_domain::voter_no::format_voter_no;

use crate::crypto;
use crate::domain::repository::{CandidateRepository, VoterRepository};
use crate::domain::types::VOTER_NO_MAX_ATTEMPTS;
use crate::error::ElectionServiceError;

/// Generate a voter number unique across the registry, re-rolling the random
/// suffix on collision. Bounded so a full suffix space cannot loop forever.
async fn generate_unique_voter_no<V: VoterRepository>(
    voters: &V,
) -> Result<String, ElectionServiceError> {
    let today = Utc::now().date_naive();
    for _ in 0..VOTER_NO_MAX_ATTEMPTS {
        let candidate = format_voter_no(today, crypto::random_voter_no_suffix());
        if !voters.voter_no_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(ElectionServiceError::Internal(anyhow!(
        "voter number space exhausted after {VOTER_NO_MAX_ATTEMPTS} attempts"
    )))
}

// ── ApproveVoter ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApproveVoterOutput {
    pub voter_no: String,
}

pub struct ApproveVoterUseCase<V: VoterRepository> {
    pub voters: V,
}

impl<V: VoterRepository> ApproveVoterUseCase<V> {
    pub async fn execute(
        &self,
        voter_id: Uuid,
    ) -> Result<ApproveVoterOutput, ElectionServiceError> {
        let voter = self
            .voters
            .find_by_id(voter_id)
            .await?
            .ok_or(ElectionServiceError::VoterNotFound)?;
        if !voter.status.is_pending() {
            return Err(ElectionServiceError::InvalidTransition);
        }

        let voter_no = generate_unique_voter_no(&self.voters).await?;

        // Conditional on the row still being pending — a concurrent approval
        // loses here instead of double-assigning.
        if !self.voters.mark_approved(voter_id, &voter_no).await? {
            return Err(ElectionServiceError::InvalidTransition);
        }

        Ok(ApproveVoterOutput { voter_no })
    }
}

// ── RejectVoter ──────────────────────────────────────────────────────────────

pub struct RejectVoterUseCase<V: VoterRepository> {
    pub voters: V,
}

impl<V: VoterRepository> RejectVoterUseCase<V> {
    pub async fn execute(
        &self,
        voter_id: Uuid,
        reason: &str,
    ) -> Result<(), ElectionServiceError> {
        let voter = self
            .voters
            .find_by_id(voter_id)
            .await?
            .ok_or(ElectionServiceError::VoterNotFound)?;
        if !voter.status.is_pending() {
            return Err(ElectionServiceError::InvalidTransition);
        }

        if !self.voters.mark_rejected(voter_id, reason).await? {
            return Err(ElectionServiceError::InvalidTransition);
        }
        Ok(())
    }
}

// ── ApproveCandidate ─────────────────────────────────────────────────────────

pub struct ApproveCandidateUseCase<C: CandidateRepository> {
    pub candidates: C,
}

impl<C: CandidateRepository> ApproveCandidateUseCase<C> {
    pub async fn execute(&self, candidate_id: Uuid) -> Result<(), ElectionServiceError> {
        let candidate = self
            .candidates
            .find_by_id(candidate_id)
            .await?
            .ok_or(ElectionServiceError::CandidateNotFound)?;
        if !candidate.status.is_pending() {
            return Err(ElectionServiceError::InvalidTransition);
        }

        if !self.candidates.mark_approved(candidate_id).await? {
            return Err(ElectionServiceError::InvalidTransition);
        }
        Ok(())
    }
}

// ── RejectCandidate ──────────────────────────────────────────────────────────

pub struct RejectCandidateUseCase<C: CandidateRepository> {
    pub candidates: C,
}

impl<C: CandidateRepository> RejectCandidateUseCase<C> {
    pub async fn execute(
        &self,
        candidate_id: Uuid,
        reason: &str,
    ) -> Result<(), ElectionServiceError> {
        let candidate = self
            .candidates
            .find_by_id(candidate_id)
            .await?
            .ok_or(ElectionServiceError::CandidateNotFound)?;
        if !candidate.status.is_pending() {
            return Err(ElectionServiceError::InvalidTransition);
        }

        if !self.candidates.mark_rejected(candidate_id, reason).await? {
            return Err(ElectionServiceError::InvalidTransition);
        }
        Ok(())
    }
}

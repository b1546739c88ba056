use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::crypto;
use crate::domain::repository::{
    AuditLogRepository, OtpRepository, UserRepository, VoterRepository,
};
use crate::domain::types::{AuditEntry, OTP_TTL_SECS, OtpCode};
use crate::error::ElectionServiceError;
use crate::usecase::vote::resolve_voter;

// ── IssueOtp ─────────────────────────────────────────────────────────────────

pub struct IssueOtpInput {
    pub identifier: String,
    pub ip_address: Option<String>,
}

#[derive(Debug)]
pub struct IssueOtpOutput {
    /// Surfaced to the caller for demo purposes only; a production
    /// deployment delivers the code out-of-band instead.
    pub demo_code: String,
    pub expires_at: DateTime<Utc>,
}

pub struct IssueOtpUseCase<U, V, O, A>
where
    U: UserRepository,
    V: VoterRepository,
    O: OtpRepository,
    A: AuditLogRepository,
{
    pub users: U,
    pub voters: V,
    pub otps: O,
    pub audit: A,
}

impl<U, V, O, A> IssueOtpUseCase<U, V, O, A>
where
    U: UserRepository,
    V: VoterRepository,
    O: OtpRepository,
    A: AuditLogRepository,
{
    pub async fn execute(
        &self,
        input: IssueOtpInput,
    ) -> Result<IssueOtpOutput, ElectionServiceError> {
        let voter = resolve_voter(&self.users, &self.voters, &input.identifier).await?;
        if !voter.status.is_approved() {
            return Err(ElectionServiceError::NotApproved);
        }
        if voter.has_voted {
            return Err(ElectionServiceError::DuplicateVote);
        }

        // A new code always supersedes any active one.
        self.otps.supersede_active(voter.id).await?;

        let code = crypto::generate_otp_code();
        let now = Utc::now();
        let expires_at = now + Duration::seconds(OTP_TTL_SECS);
        let record = OtpCode {
            id: Uuid::new_v4(),
            voter_id: voter.id,
            code: code.clone(),
            superseded: false,
            consumed_at: None,
            expires_at,
            created_at: now,
        };
        self.otps.create(&record).await?;

        // The code itself never lands in the audit log.
        self.audit
            .append(&AuditEntry::new(
                voter.id,
                "otp_issued",
                None,
                input.ip_address,
            ))
            .await?;

        Ok(IssueOtpOutput {
            demo_code: code,
            expires_at,
        })
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub identifier: String,
    pub code: String,
    pub ip_address: Option<String>,
}

pub struct VerifyOtpUseCase<U, V, O, A>
where
    U: UserRepository,
    V: VoterRepository,
    O: OtpRepository,
    A: AuditLogRepository,
{
    pub users: U,
    pub voters: V,
    pub otps: O,
    pub audit: A,
}

impl<U, V, O, A> VerifyOtpUseCase<U, V, O, A>
where
    U: UserRepository,
    V: VoterRepository,
    O: OtpRepository,
    A: AuditLogRepository,
{
    /// Succeeds only against the voter's single active code with an exact
    /// match, consuming it. Every attempt is audited, success or failure;
    /// a failed attempt does not consume the code.
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<(), ElectionServiceError> {
        let voter = resolve_voter(&self.users, &self.voters, &input.identifier).await?;

        let active = self.otps.find_active(voter.id).await?;
        match active {
            Some(record) if record.code == input.code => {
                self.otps.mark_consumed(record.id).await?;
                self.audit
                    .append(&AuditEntry::new(
                        voter.id,
                        "otp_verified",
                        None,
                        input.ip_address,
                    ))
                    .await?;
                Ok(())
            }
            _ => {
                self.audit
                    .append(&AuditEntry::new(
                        voter.id,
                        "otp_rejected",
                        Some("invalid or expired code".to_owned()),
                        input.ip_address,
                    ))
                    .await?;
                Err(ElectionServiceError::OtpInvalid)
            }
        }
    }
}

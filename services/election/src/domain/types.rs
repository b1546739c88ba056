use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

/// OTP code length in digits.
pub const OTP_CODE_LEN: usize = 6;

/// OTP time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// How long after a successful OTP verification a vote may still be cast.
pub const CAST_WINDOW_SECS: i64 = 300;

/// Bounded retries when a freshly generated voter number collides.
pub const VOTER_NO_MAX_ATTEMPTS: u32 = 16;

/// Account record shared by admins, voters, and candidates.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub password_hash: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Voter registration, one-to-one with a voter-role [`User`].
#[derive(Debug, Clone)]
pub struct Voter {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Assigned on approval, `None` while pending or rejected.
    pub voter_no: Option<String>,
    pub national_id: String,
    pub date_of_birth: NaiveDate,
    pub guardian_name: String,
    pub phone_number: String,
    pub occupation: String,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub has_voted: bool,
    pub voted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Candidate nomination. The newest row per user is the live nomination.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: Uuid,
    pub user_id: Uuid,
    pub party_name: String,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub total_votes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time code bound to a voter.
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub voter_id: Uuid,
    pub code: String,
    pub superseded: bool,
    /// Doubles as the verification timestamp for the cast window.
    pub consumed_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// A code is accepted at most once and only before its expiry.
    pub fn is_active(&self) -> bool {
        !self.superseded && self.consumed_at.is_none() && self.expires_at > Utc::now()
    }
}

/// Immutable ledger row linking one voter to one candidate.
#[derive(Debug, Clone)]
pub struct VoteRecord {
    pub id: Uuid,
    pub voter_id: Uuid,
    pub candidate_id: Uuid,
    pub voted_at: DateTime<Utc>,
}

/// Append-only audit row for a voting-related action.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Uuid,
    pub voter_id: Uuid,
    pub action: String,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        voter_id: Uuid,
        action: &str,
        detail: impl Into<Option<String>>,
        ip_address: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            voter_id,
            action: action.to_owned(),
            detail: detail.into(),
            ip_address,
            created_at: Utc::now(),
        }
    }
}

/// Voter joined with account name/email for admin listings.
#[derive(Debug, Clone)]
pub struct VoterProfile {
    pub voter: Voter,
    pub name: String,
    pub email: String,
}

/// Nomination joined with account name/email for admin listings.
#[derive(Debug, Clone)]
pub struct NominationProfile {
    pub candidate: Candidate,
    pub name: String,
    pub email: String,
}

/// One row of the public results board.
#[derive(Debug, Clone)]
pub struct CandidateStanding {
    pub candidate_id: Uuid,
    pub name: String,
    pub party_name: String,
    pub votes: i64,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElectionStats {
    pub total_voters: u64,
    pub approved_voters: u64,
    pub pending_voters: u64,
    pub rejected_voters: u64,
    pub total_candidates: u64,
    pub approved_candidates: u64,
    pub total_votes: u64,
}

/// Rows touched by an election reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResetSummary {
    pub votes_deleted: u64,
    pub voters_reset: u64,
    pub candidates_reset: u64,
}

// ── Field validation ─────────────────────────────────────────────────────────

/// Minimal email shape check: one `@` before a later `.`.
pub fn validate_email(email: &str) -> bool {
    match (email.find('@'), email.rfind('.')) {
        (Some(at), Some(dot)) => at > 0 && at < dot && dot < email.len() - 1,
        _ => false,
    }
}

/// Password strength: ≥8 chars with upper, lower, digit, and special.
/// Returns the first failed rule as the error message.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    const SPECIAL: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";
    if password.len() < 8 {
        return Err("password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("password must contain an uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("password must contain a lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("password must contain a digit");
    }
    if !password.chars().any(|c| SPECIAL.contains(c)) {
        return Err("password must contain a special character");
    }
    Ok(())
}

/// National identity number: exactly 12 digits.
pub fn validate_national_id(national_id: &str) -> bool {
    national_id.len() == 12 && national_id.chars().all(|c| c.is_ascii_digit())
}

/// Phone number: exactly 10 digits.
pub fn validate_phone_number(phone_number: &str) -> bool {
    phone_number.len() == 10 && phone_number.chars().all(|c| c.is_ascii_digit())
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Election service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ElectionServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("voter not found")]
    VoterNotFound,
    #[error("candidate not found")]
    CandidateNotFound,
    #[error("email already registered")]
    EmailTaken,
    #[error("national id already registered")]
    NationalIdTaken,
    #[error("invalid email")]
    InvalidEmail,
    #[error("{0}")]
    InvalidPassword(&'static str),
    #[error("national id must be 12 digits")]
    InvalidNationalId,
    #[error("phone number must be 10 digits")]
    InvalidPhoneNumber,
    #[error("missing data")]
    MissingData,
    #[error("invalid email, password, or role")]
    InvalidCredentials,
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid state transition")]
    InvalidTransition,
    #[error("registration not approved")]
    NotApproved,
    #[error("invalid or expired code")]
    OtpInvalid,
    #[error("otp verification required")]
    OtpRequired,
    #[error("vote already cast")]
    DuplicateVote,
    #[error("invalid candidate")]
    InvalidCandidate,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ElectionServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::VoterNotFound => "VOTER_NOT_FOUND",
            Self::CandidateNotFound => "CANDIDATE_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NationalIdTaken => "NATIONAL_ID_TAKEN",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword(_) => "INVALID_PASSWORD",
            Self::InvalidNationalId => "INVALID_NATIONAL_ID",
            Self::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::NotApproved => "NOT_APPROVED",
            Self::OtpInvalid => "OTP_INVALID",
            Self::OtpRequired => "OTP_REQUIRED",
            Self::DuplicateVote => "DUPLICATE_VOTE",
            Self::InvalidCandidate => "INVALID_CANDIDATE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ElectionServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::VoterNotFound | Self::CandidateNotFound => {
                StatusCode::NOT_FOUND
            }
            // Idempotent-failure conflicts: repeating the request is safe and
            // returns the same error with no side effects.
            Self::EmailTaken
            | Self::NationalIdTaken
            | Self::InvalidTransition
            | Self::NotApproved
            | Self::DuplicateVote => StatusCode::CONFLICT,
            Self::InvalidEmail
            | Self::InvalidPassword(_)
            | Self::InvalidNationalId
            | Self::InvalidPhoneNumber
            | Self::MissingData
            | Self::InvalidCandidate => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::Unauthenticated
            | Self::OtpInvalid
            | Self::OtpRequired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors; the anyhow chain of
        // internal errors is logged so the root cause stays traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

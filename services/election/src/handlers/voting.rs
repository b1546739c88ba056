use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matdaan_domain::status::ApprovalStatus;

use crate::error::ElectionServiceError;
use crate::handlers::client_ip;
use crate::state::AppState;
use crate::usecase::otp::{IssueOtpInput, IssueOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};
use crate::usecase::vote::{CastVoteInput, CastVoteUseCase, IdentifyVoterUseCase};

// ── POST /vote/identify ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IdentifyRequest {
    pub identifier: String,
}

#[derive(Serialize)]
pub struct IdentifyResponse {
    pub voter_no: Option<String>,
    pub name: String,
    pub status: ApprovalStatus,
    pub has_voted: bool,
    #[serde(serialize_with = "matdaan_core::serde::opt_to_rfc3339_ms")]
    pub voted_at: Option<chrono::DateTime<chrono::Utc>>,
}

pub async fn identify_voter(
    State(state): State<AppState>,
    Json(body): Json<IdentifyRequest>,
) -> Result<Json<IdentifyResponse>, ElectionServiceError> {
    let usecase = IdentifyVoterUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
    };
    let summary = usecase.execute(body.identifier.trim()).await?;
    Ok(Json(IdentifyResponse {
        voter_no: summary.voter_no,
        name: summary.name,
        status: summary.status,
        has_voted: summary.has_voted,
        voted_at: summary.voted_at,
    }))
}

// ── POST /vote/otp ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RequestOtpRequest {
    pub identifier: String,
}

#[derive(Serialize)]
pub struct RequestOtpResponse {
    /// Demo surface only — production delivery happens out-of-band.
    pub demo_code: String,
    #[serde(serialize_with = "matdaan_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn request_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<RequestOtpRequest>,
) -> Result<(StatusCode, Json<RequestOtpResponse>), ElectionServiceError> {
    let usecase = IssueOtpUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
        otps: state.otp_repo(),
        audit: state.audit_repo(),
    };
    let out = usecase
        .execute(IssueOtpInput {
            identifier: body.identifier.trim().to_owned(),
            ip_address: client_ip(&headers),
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RequestOtpResponse {
            demo_code: out.demo_code,
            expires_at: out.expires_at,
        }),
    ))
}

// ── POST /vote/otp/verify ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyOtpRequest {
    pub identifier: String,
    pub code: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<VerifyOtpRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    let usecase = VerifyOtpUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
        otps: state.otp_repo(),
        audit: state.audit_repo(),
    };
    usecase
        .execute(VerifyOtpInput {
            identifier: body.identifier.trim().to_owned(),
            code: body.code.trim().to_owned(),
            ip_address: client_ip(&headers),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /vote ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CastVoteRequest {
    pub identifier: String,
    pub candidate_id: Uuid,
}

pub async fn cast_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CastVoteRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    let usecase = CastVoteUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
        candidates: state.candidate_repo(),
        otps: state.otp_repo(),
        ledger: state.vote_ledger(),
        audit: state.audit_repo(),
    };
    usecase
        .execute(CastVoteInput {
            identifier: body.identifier.trim().to_owned(),
            candidate_id: body.candidate_id,
            ip_address: client_ip(&headers),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matdaan_domain::pagination::PageRequest;
use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

use crate::error::ElectionServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::admin::{
    ListAuditLogUseCase, ListNominationsUseCase, ListPendingVotersUseCase, ResetElectionUseCase,
    StatsUseCase,
};
use crate::usecase::approval::{
    ApproveCandidateUseCase, ApproveVoterUseCase, RejectCandidateUseCase, RejectVoterUseCase,
};

fn require_admin(identity: &Identity) -> Result<(), ElectionServiceError> {
    match identity.role {
        UserRole::Admin => Ok(()),
        _ => Err(ElectionServiceError::Forbidden),
    }
}

// ── GET /admin/stats ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_voters: u64,
    pub approved_voters: u64,
    pub pending_voters: u64,
    pub rejected_voters: u64,
    pub total_candidates: u64,
    pub approved_candidates: u64,
    pub total_votes: u64,
}

pub async fn get_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = StatsUseCase {
        voters: state.voter_repo(),
        candidates: state.candidate_repo(),
        ledger: state.vote_ledger(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(StatsResponse {
        total_voters: stats.total_voters,
        approved_voters: stats.approved_voters,
        pending_voters: stats.pending_voters,
        rejected_voters: stats.rejected_voters,
        total_candidates: stats.total_candidates,
        approved_candidates: stats.approved_candidates,
        total_votes: stats.total_votes,
    }))
}

// ── GET /admin/voters/pending ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PendingVoterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub national_id: String,
    pub occupation: String,
    #[serde(serialize_with = "matdaan_core::serde::to_rfc3339_ms")]
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_pending_voters(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<PendingVoterResponse>>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ListPendingVotersUseCase {
        voters: state.voter_repo(),
    };
    let profiles = usecase.execute(page).await?;
    Ok(Json(
        profiles
            .into_iter()
            .map(|p| PendingVoterResponse {
                id: p.voter.id,
                name: p.name,
                email: p.email,
                phone_number: p.voter.phone_number,
                national_id: p.voter.national_id,
                occupation: p.voter.occupation,
                applied_at: p.voter.created_at,
            })
            .collect(),
    ))
}

// ── POST /admin/voters/{voter_id}/approve ────────────────────────────────────

#[derive(Serialize)]
pub struct ApproveVoterResponse {
    pub voter_no: String,
}

pub async fn approve_voter(
    identity: Identity,
    State(state): State<AppState>,
    Path(voter_id): Path<Uuid>,
) -> Result<Json<ApproveVoterResponse>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ApproveVoterUseCase {
        voters: state.voter_repo(),
    };
    let out = usecase.execute(voter_id).await?;
    Ok(Json(ApproveVoterResponse {
        voter_no: out.voter_no,
    }))
}

// ── POST /admin/voters/{voter_id}/reject ─────────────────────────────────────

#[derive(Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

pub async fn reject_voter(
    identity: Identity,
    State(state): State<AppState>,
    Path(voter_id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = RejectVoterUseCase {
        voters: state.voter_repo(),
    };
    usecase.execute(voter_id, body.reason.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/candidates ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct NominationResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub party_name: String,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    #[serde(serialize_with = "matdaan_core::serde::to_rfc3339_ms")]
    pub applied_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_nominations(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<NominationResponse>>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ListNominationsUseCase {
        candidates: state.candidate_repo(),
    };
    let profiles = usecase.execute(page).await?;
    Ok(Json(
        profiles
            .into_iter()
            .map(|p| NominationResponse {
                id: p.candidate.id,
                name: p.name,
                email: p.email,
                party_name: p.candidate.party_name,
                status: p.candidate.status,
                rejection_reason: p.candidate.rejection_reason,
                applied_at: p.candidate.created_at,
            })
            .collect(),
    ))
}

// ── POST /admin/candidates/{candidate_id}/approve ────────────────────────────

pub async fn approve_candidate(
    identity: Identity,
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<StatusCode, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ApproveCandidateUseCase {
        candidates: state.candidate_repo(),
    };
    usecase.execute(candidate_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /admin/candidates/{candidate_id}/reject ─────────────────────────────

pub async fn reject_candidate(
    identity: Identity,
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
    Json(body): Json<RejectRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = RejectCandidateUseCase {
        candidates: state.candidate_repo(),
    };
    usecase.execute(candidate_id, body.reason.trim()).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /admin/audit-logs ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AuditEntryResponse {
    pub voter_id: Uuid,
    pub action: String,
    pub detail: Option<String>,
    pub ip_address: Option<String>,
    #[serde(serialize_with = "matdaan_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_audit_logs(
    identity: Identity,
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<AuditEntryResponse>>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ListAuditLogUseCase {
        audit: state.audit_repo(),
    };
    let entries = usecase.execute(page).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|e| AuditEntryResponse {
                voter_id: e.voter_id,
                action: e.action,
                detail: e.detail,
                ip_address: e.ip_address,
                created_at: e.created_at,
            })
            .collect(),
    ))
}

// ── POST /admin/election/reset ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResetResponse {
    pub votes_deleted: u64,
    pub voters_reset: u64,
    pub candidates_reset: u64,
}

pub async fn reset_election(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ResetResponse>, ElectionServiceError> {
    require_admin(&identity)?;
    let usecase = ResetElectionUseCase {
        ledger: state.vote_ledger(),
    };
    let summary = usecase.execute().await?;
    Ok(Json(ResetResponse {
        votes_deleted: summary.votes_deleted,
        voters_reset: summary.voters_reset,
        candidates_reset: summary.candidates_reset,
    }))
}

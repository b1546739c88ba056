use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;

use matdaan_domain::role::UserRole;

use crate::error::ElectionServiceError;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::register::{
    RegisterCandidateInput, RegisterCandidateUseCase, RegisterVoterInput, RegisterVoterUseCase,
    ResubmitNominationInput, ResubmitNominationUseCase,
};

// ── POST /voters ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterVoterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub guardian_name: String,
    pub phone_number: String,
    pub national_id: String,
    pub occupation: String,
}

pub async fn register_voter(
    State(state): State<AppState>,
    Json(body): Json<RegisterVoterRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    let usecase = RegisterVoterUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
    };
    usecase
        .execute(RegisterVoterInput {
            name: body.name.trim().to_owned(),
            email: body.email.trim().to_owned(),
            password: body.password,
            date_of_birth: body.date_of_birth,
            guardian_name: body.guardian_name.trim().to_owned(),
            phone_number: body.phone_number.trim().to_owned(),
            national_id: body.national_id.trim().to_owned(),
            occupation: body.occupation.trim().to_owned(),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /candidates ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterCandidateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub party_name: String,
}

pub async fn register_candidate(
    State(state): State<AppState>,
    Json(body): Json<RegisterCandidateRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    let usecase = RegisterCandidateUseCase {
        users: state.user_repo(),
        candidates: state.candidate_repo(),
    };
    usecase
        .execute(RegisterCandidateInput {
            name: body.name.trim().to_owned(),
            email: body.email.trim().to_owned(),
            password: body.password,
            party_name: body.party_name.trim().to_owned(),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

// ── POST /candidates/nomination ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResubmitNominationRequest {
    pub party_name: String,
}

pub async fn resubmit_nomination(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ResubmitNominationRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    if identity.role != UserRole::Candidate {
        return Err(ElectionServiceError::Forbidden);
    }
    let usecase = ResubmitNominationUseCase {
        candidates: state.candidate_repo(),
    };
    usecase
        .execute(ResubmitNominationInput {
            user_id: identity.user_id,
            party_name: body.party_name.trim().to_owned(),
        })
        .await?;
    Ok(StatusCode::CREATED)
}

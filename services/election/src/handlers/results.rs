use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ElectionServiceError;
use crate::state::AppState;
use crate::usecase::results::ResultsUseCase;

// ── GET /results ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StandingResponse {
    pub candidate_id: Uuid,
    pub name: String,
    pub party_name: String,
    pub votes: i64,
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub candidates: Vec<StandingResponse>,
    pub total_votes: i64,
}

pub async fn get_results(
    State(state): State<AppState>,
) -> Result<Json<ResultsResponse>, ElectionServiceError> {
    let usecase = ResultsUseCase {
        candidates: state.candidate_repo(),
    };
    let out = usecase.execute().await?;
    Ok(Json(ResultsResponse {
        candidates: out
            .standings
            .into_iter()
            .map(|s| StandingResponse {
                candidate_id: s.candidate_id,
                name: s.name,
                party_name: s.party_name,
                votes: s.votes,
            })
            .collect(),
        total_votes: out.total_votes,
    }))
}

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use matdaan_core::health::{healthz, readyz};
use matdaan_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{
        approve_candidate, approve_voter, get_stats, list_audit_logs, list_nominations,
        list_pending_voters, reject_candidate, reject_voter, reset_election,
    },
    auth::{change_password, login, logout},
    registration::{register_candidate, register_voter, resubmit_nomination},
    results::get_results,
    voting::{cast_vote, identify_voter, request_otp, verify_otp},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/password", post(change_password))
        // Registration
        .route("/voters", post(register_voter))
        .route("/candidates", post(register_candidate))
        .route("/candidates/nomination", post(resubmit_nomination))
        // Voting flow: identify → request OTP → verify OTP → cast
        .route("/vote/identify", post(identify_voter))
        .route("/vote/otp", post(request_otp))
        .route("/vote/otp/verify", post(verify_otp))
        .route("/vote", post(cast_vote))
        // Public results
        .route("/results", get(get_results))
        // Admin
        .route("/admin/stats", get(get_stats))
        .route("/admin/voters/pending", get(list_pending_voters))
        .route("/admin/voters/{voter_id}/approve", post(approve_voter))
        .route("/admin/voters/{voter_id}/reject", post(reject_voter))
        .route("/admin/candidates", get(list_nominations))
        .route(
            "/admin/candidates/{candidate_id}/approve",
            post(approve_candidate),
        )
        .route(
            "/admin/candidates/{candidate_id}/reject",
            post(reject_candidate),
        )
        .route("/admin/audit-logs", get(list_audit_logs))
        .route("/admin/election/reset", post(reset_election))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}

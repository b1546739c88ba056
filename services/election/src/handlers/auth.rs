use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use matdaan_domain::role::UserRole;

use crate::cookie::{clear_access_token_cookie, set_access_token_cookie};
use crate::error::ElectionServiceError;
use crate::handlers::client_ip;
use crate::identity::Identity;
use crate::state::AppState;
use crate::usecase::token::{
    ChangePasswordInput, ChangePasswordUseCase, LoginInput, LoginUseCase,
};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: UserRole,
}

fn default_role() -> UserRole {
    UserRole::Voter
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub access_token_exp: u64,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub role: UserRole,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ElectionServiceError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        voters: state.voter_repo(),
        audit: state.audit_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            role: body.role,
            ip_address: client_ip(&headers),
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token.clone(), state.cookie_domain.clone());
    let body = LoginResponse {
        access_token: out.access_token,
        access_token_exp: out.access_token_exp,
        user_id: out.user.id,
        name: out.user.name,
        role: out.user.role,
    };

    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── POST /auth/logout ────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ElectionServiceError> {
    let jar = clear_access_token_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}

// ── POST /auth/password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ElectionServiceError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                old_password: body.old_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

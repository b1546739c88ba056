//! Authenticated-identity extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::CookieJar;
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use matdaan_domain::role::UserRole;

use crate::cookie::MATDAAN_ACCESS_TOKEN;
use crate::error::ElectionServiceError;
use crate::state::AppState;
use crate::usecase::token::validate_token;

/// Caller identity decoded from the access token, taken from the
/// `Authorization: Bearer` header or the access-token cookie.
///
/// Extraction only authenticates; role enforcement (403) is done by
/// handlers afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|v| v.to_owned())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(MATDAAN_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ElectionServiceError;

    // axum-core defines this as `fn -> impl Future + Send`; extract values
    // synchronously and return a 'static async block to avoid capturing the
    // request parts across the await.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts).or_else(|| cookie_token(parts));
        let secret = state.jwt_secret.clone();

        async move {
            let token = token.ok_or(ElectionServiceError::Unauthenticated)?;
            let claims = validate_token(&token, &secret)?;
            let user_id = claims
                .sub
                .parse::<Uuid>()
                .map_err(|_| ElectionServiceError::Unauthenticated)?;
            let role =
                UserRole::from_i16(claims.role).ok_or(ElectionServiceError::Unauthenticated)?;
            Ok(Self { user_id, role })
        }
    }
}

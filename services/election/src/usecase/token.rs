use anyhow::Context as _;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use matdaan_domain::role::UserRole;

use crate::cookie::ACCESS_TOKEN_EXP;
use crate::crypto;
use crate::domain::repository::{AuditLogRepository, UserRepository, VoterRepository};
use crate::domain::types::{AuditEntry, User};
use crate::error::ElectionServiceError;

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: i16,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_access_token(
    user: &User,
    secret: &str,
) -> Result<(String, u64), ElectionServiceError> {
    let exp = now_secs() + ACCESS_TOKEN_EXP;
    let claims = TokenClaims {
        sub: user.id.to_string(),
        role: user.role.as_i16(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ElectionServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a token signature and expiry, returning its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, ElectionServiceError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ElectionServiceError::Unauthenticated)?;

    Ok(data.claims)
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub ip_address: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
}

pub struct LoginUseCase<U, V, A>
where
    U: UserRepository,
    V: VoterRepository,
    A: AuditLogRepository,
{
    pub users: U,
    pub voters: V,
    pub audit: A,
    pub jwt_secret: String,
}

impl<U, V, A> LoginUseCase<U, V, A>
where
    U: UserRepository,
    V: VoterRepository,
    A: AuditLogRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ElectionServiceError> {
        // Wrong email, wrong password, and wrong role are indistinguishable
        // to the caller.
        let user = self
            .users
            .find_by_email_and_role(&input.email, input.role)
            .await?
            .ok_or(ElectionServiceError::InvalidCredentials)?;

        let password_ok = crypto::verify_password(&input.password, &user.password_hash)
            .context("verify password")?;
        if !password_ok {
            return Err(ElectionServiceError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.jwt_secret)?;

        // Voter logins are voting-related actions and land in the audit log.
        if user.role == UserRole::Voter {
            if let Some(voter) = self.voters.find_by_user_id(user.id).await? {
                self.audit
                    .append(&AuditEntry::new(
                        voter.id,
                        "login",
                        None,
                        input.ip_address.clone(),
                    ))
                    .await?;
            }
        }

        Ok(LoginOutput {
            user,
            access_token,
            access_token_exp,
        })
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        user_id: uuid::Uuid,
        input: ChangePasswordInput,
    ) -> Result<(), ElectionServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ElectionServiceError::UserNotFound)?;

        let old_ok = crypto::verify_password(&input.old_password, &user.password_hash)
            .context("verify old password")?;
        if !old_ok {
            return Err(ElectionServiceError::InvalidCredentials);
        }
        crate::domain::types::validate_password(&input.new_password)
            .map_err(ElectionServiceError::InvalidPassword)?;

        let password_hash =
            crypto::hash_password(&input.new_password).context("hash new password")?;
        self.users.update_password(user.id, &password_hash).await
    }
}

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;

use crate::crypto;
use crate::domain::repository::{CandidateRepository, UserRepository, VoterRepository};
use crate::domain::types::{
    Candidate, User, Voter, validate_email, validate_national_id, validate_password,
    validate_phone_number,
};
use crate::error::ElectionServiceError;

fn new_user(
    name: String,
    email: String,
    password: &str,
    role: UserRole,
) -> Result<User, ElectionServiceError> {
    let password_hash = crypto::hash_password(password).context("hash password")?;
    let now = Utc::now();
    Ok(User {
        id: Uuid::new_v4(),
        email,
        name,
        role,
        password_hash,
        is_verified: false,
        created_at: now,
        updated_at: now,
    })
}

fn validate_account_fields(
    name: &str,
    email: &str,
    password: &str,
) -> Result<(), ElectionServiceError> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ElectionServiceError::MissingData);
    }
    if !validate_email(email) {
        return Err(ElectionServiceError::InvalidEmail);
    }
    validate_password(password).map_err(ElectionServiceError::InvalidPassword)?;
    Ok(())
}

// ── RegisterVoter ────────────────────────────────────────────────────────────

pub struct RegisterVoterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub date_of_birth: NaiveDate,
    pub guardian_name: String,
    pub phone_number: String,
    pub national_id: String,
    pub occupation: String,
}

pub struct RegisterVoterUseCase<U, V>
where
    U: UserRepository,
    V: VoterRepository,
{
    pub users: U,
    pub voters: V,
}

impl<U, V> RegisterVoterUseCase<U, V>
where
    U: UserRepository,
    V: VoterRepository,
{
    pub async fn execute(&self, input: RegisterVoterInput) -> Result<(), ElectionServiceError> {
        validate_account_fields(&input.name, &input.email, &input.password)?;
        if input.guardian_name.is_empty() || input.occupation.is_empty() {
            return Err(ElectionServiceError::MissingData);
        }
        if !validate_national_id(&input.national_id) {
            return Err(ElectionServiceError::InvalidNationalId);
        }
        if !validate_phone_number(&input.phone_number) {
            return Err(ElectionServiceError::InvalidPhoneNumber);
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ElectionServiceError::EmailTaken);
        }
        if self.voters.national_id_exists(&input.national_id).await? {
            return Err(ElectionServiceError::NationalIdTaken);
        }

        let user = new_user(input.name, input.email, &input.password, UserRole::Voter)?;
        let now = Utc::now();
        let voter = Voter {
            id: Uuid::new_v4(),
            user_id: user.id,
            voter_no: None,
            national_id: input.national_id,
            date_of_birth: input.date_of_birth,
            guardian_name: input.guardian_name,
            phone_number: input.phone_number,
            occupation: input.occupation,
            status: ApprovalStatus::Pending,
            rejection_reason: None,
            has_voted: false,
            voted_at: None,
            created_at: now,
            updated_at: now,
        };

        self.voters.create_with_user(&user, &voter).await
    }
}

// ── RegisterCandidate ────────────────────────────────────────────────────────

pub struct RegisterCandidateInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub party_name: String,
}

pub struct RegisterCandidateUseCase<U, C>
where
    U: UserRepository,
    C: CandidateRepository,
{
    pub users: U,
    pub candidates: C,
}

impl<U, C> RegisterCandidateUseCase<U, C>
where
    U: UserRepository,
    C: CandidateRepository,
{
    pub async fn execute(
        &self,
        input: RegisterCandidateInput,
    ) -> Result<(), ElectionServiceError> {
        validate_account_fields(&input.name, &input.email, &input.password)?;
        if input.party_name.is_empty() {
            return Err(ElectionServiceError::MissingData);
        }

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ElectionServiceError::EmailTaken);
        }

        let user = new_user(
            input.name,
            input.email,
            &input.password,
            UserRole::Candidate,
        )?;
        let candidate = pending_nomination(user.id, input.party_name);

        self.candidates.create_with_user(&user, &candidate).await
    }
}

// ── ResubmitNomination ───────────────────────────────────────────────────────

pub struct ResubmitNominationInput {
    pub user_id: Uuid,
    pub party_name: String,
}

pub struct ResubmitNominationUseCase<C: CandidateRepository> {
    pub candidates: C,
}

impl<C: CandidateRepository> ResubmitNominationUseCase<C> {
    /// A rejected nomination is terminal per record; resubmitting inserts a
    /// fresh pending row. A live pending or approved nomination blocks
    /// resubmission.
    pub async fn execute(
        &self,
        input: ResubmitNominationInput,
    ) -> Result<(), ElectionServiceError> {
        if input.party_name.is_empty() {
            return Err(ElectionServiceError::MissingData);
        }

        if let Some(latest) = self
            .candidates
            .find_latest_by_user_id(input.user_id)
            .await?
        {
            if latest.status != ApprovalStatus::Rejected {
                return Err(ElectionServiceError::InvalidTransition);
            }
        }

        let candidate = pending_nomination(input.user_id, input.party_name);
        self.candidates.create(&candidate).await
    }
}

fn pending_nomination(user_id: Uuid, party_name: String) -> Candidate {
    let now = Utc::now();
    Candidate {
        id: Uuid::new_v4(),
        user_id,
        party_name,
        status: ApprovalStatus::Pending,
        rejection_reason: None,
        total_votes: 0,
        created_at: now,
        updated_at: now,
    }
}

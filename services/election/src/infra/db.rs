use anyhow::{Context as _, anyhow};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, SqlErr, TransactionError, TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use matdaan_domain::pagination::PageRequest;
use matdaan_domain::role::UserRole;
use matdaan_domain::status::ApprovalStatus;
use matdaan_election_schema::{audit_logs, candidates, otp_codes, users, voters, votes};

use crate::domain::repository::{
    AuditLogRepository, CandidateRepository, OtpRepository, UserRepository, VoteLedger,
    VoterRepository,
};
use crate::domain::types::{
    AuditEntry, Candidate, CandidateStanding, NominationProfile, OtpCode, ResetSummary, User,
    Voter, VoterProfile, VoteRecord,
};
use crate::error::ElectionServiceError;

fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => Some(msg),
        _ => None,
    }
}

fn internal(err: impl Into<anyhow::Error>, what: &'static str) -> ElectionServiceError {
    ElectionServiceError::Internal(err.into().context(what))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ElectionServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ElectionServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email_and_role(
        &self,
        email: &str,
        role: UserRole,
    ) -> Result<Option<User>, ElectionServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::Role.eq(role.as_i16()))
            .one(&self.db)
            .await
            .context("find user by email and role")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ElectionServiceError> {
        let result = user_active_model(user).insert(&self.db).await;
        match result {
            Ok(_) => Ok(()),
            Err(err) if unique_violation(&err).is_some() => {
                Err(ElectionServiceError::EmailTaken)
            }
            Err(err) => Err(internal(err, "create user")),
        }
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), ElectionServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user password")?;
        Ok(())
    }
}

fn user_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        email: Set(user.email.clone()),
        name: Set(user.name.clone()),
        role: Set(user.role.as_i16()),
        password_hash: Set(user.password_hash.clone()),
        is_verified: Set(user.is_verified),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, ElectionServiceError> {
    let role = UserRole::from_i16(model.role)
        .ok_or_else(|| anyhow!("unknown role value {} for user {}", model.role, model.id))?;
    Ok(User {
        id: model.id,
        email: model.email,
        name: model.name,
        role,
        password_hash: model.password_hash,
        is_verified: model.is_verified,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Voter repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbVoterRepository {
    pub db: DatabaseConnection,
}

impl VoterRepository for DbVoterRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Voter>, ElectionServiceError> {
        let model = voters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find voter by id")?;
        model.map(voter_from_model).transpose()
    }

    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Voter>, ElectionServiceError> {
        let model = voters::Entity::find()
            .filter(voters::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find voter by user id")?;
        model.map(voter_from_model).transpose()
    }

    async fn find_by_voter_no(
        &self,
        voter_no: &str,
    ) -> Result<Option<Voter>, ElectionServiceError> {
        let model = voters::Entity::find()
            .filter(voters::Column::VoterNo.eq(voter_no))
            .one(&self.db)
            .await
            .context("find voter by voter number")?;
        model.map(voter_from_model).transpose()
    }

    async fn national_id_exists(
        &self,
        national_id: &str,
    ) -> Result<bool, ElectionServiceError> {
        let count = voters::Entity::find()
            .filter(voters::Column::NationalId.eq(national_id))
            .count(&self.db)
            .await
            .context("count voters by national id")?;
        Ok(count > 0)
    }

    async fn voter_no_exists(&self, voter_no: &str) -> Result<bool, ElectionServiceError> {
        let count = voters::Entity::find()
            .filter(voters::Column::VoterNo.eq(voter_no))
            .count(&self.db)
            .await
            .context("count voters by voter number")?;
        Ok(count > 0)
    }

    async fn create_with_user(
        &self,
        user: &User,
        voter: &Voter,
    ) -> Result<(), ElectionServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let user = user.clone();
                let voter = voter.clone();
                Box::pin(async move {
                    user_active_model(&user).insert(txn).await?;
                    insert_voter(txn, &voter).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(err)) => {
                // Pre-checks in the use case catch the normal path; races
                // land here via the unique constraints.
                if let Some(msg) = unique_violation(&err) {
                    if msg.contains("national_id") {
                        return Err(ElectionServiceError::NationalIdTaken);
                    }
                    return Err(ElectionServiceError::EmailTaken);
                }
                Err(internal(err, "create voter with user"))
            }
            Err(TransactionError::Connection(err)) => {
                Err(internal(err, "create voter with user"))
            }
        }
    }

    async fn mark_approved(
        &self,
        id: Uuid,
        voter_no: &str,
    ) -> Result<bool, ElectionServiceError> {
        let result = voters::Entity::update_many()
            .filter(voters::Column::Id.eq(id))
            .filter(voters::Column::Status.eq(ApprovalStatus::Pending.as_i16()))
            .col_expr(
                voters::Column::Status,
                Expr::value(ApprovalStatus::Approved.as_i16()),
            )
            .col_expr(voters::Column::VoterNo, Expr::value(voter_no.to_owned()))
            .col_expr(voters::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("approve voter")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_rejected(&self, id: Uuid, reason: &str) -> Result<bool, ElectionServiceError> {
        let result = voters::Entity::update_many()
            .filter(voters::Column::Id.eq(id))
            .filter(voters::Column::Status.eq(ApprovalStatus::Pending.as_i16()))
            .col_expr(
                voters::Column::Status,
                Expr::value(ApprovalStatus::Rejected.as_i16()),
            )
            .col_expr(
                voters::Column::RejectionReason,
                Expr::value(reason.to_owned()),
            )
            .col_expr(voters::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("reject voter")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_with_users(
        &self,
        status: ApprovalStatus,
        page: PageRequest,
    ) -> Result<Vec<VoterProfile>, ElectionServiceError> {
        let rows = voters::Entity::find()
            .find_also_related(users::Entity)
            .filter(voters::Column::Status.eq(status.as_i16()))
            .order_by_asc(voters::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list voters with users")?;

        rows.into_iter()
            .map(|(voter, user)| {
                let user = user
                    .ok_or_else(|| anyhow!("voter {} has no user row", voter.id))?;
                Ok(VoterProfile {
                    voter: voter_from_model(voter)?,
                    name: user.name,
                    email: user.email,
                })
            })
            .collect()
    }

    async fn count_all(&self) -> Result<u64, ElectionServiceError> {
        let count = voters::Entity::find()
            .count(&self.db)
            .await
            .context("count voters")?;
        Ok(count)
    }

    async fn count_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<u64, ElectionServiceError> {
        let count = voters::Entity::find()
            .filter(voters::Column::Status.eq(status.as_i16()))
            .count(&self.db)
            .await
            .context("count voters by status")?;
        Ok(count)
    }
}

async fn insert_voter(txn: &DatabaseTransaction, voter: &Voter) -> Result<(), DbErr> {
    voters::ActiveModel {
        id: Set(voter.id),
        user_id: Set(voter.user_id),
        voter_no: Set(voter.voter_no.clone()),
        national_id: Set(voter.national_id.clone()),
        date_of_birth: Set(voter.date_of_birth),
        guardian_name: Set(voter.guardian_name.clone()),
        phone_number: Set(voter.phone_number.clone()),
        occupation: Set(voter.occupation.clone()),
        status: Set(voter.status.as_i16()),
        rejection_reason: Set(voter.rejection_reason.clone()),
        has_voted: Set(voter.has_voted),
        voted_at: Set(voter.voted_at),
        created_at: Set(voter.created_at),
        updated_at: Set(voter.updated_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn voter_from_model(model: voters::Model) -> Result<Voter, ElectionServiceError> {
    let status = ApprovalStatus::from_i16(model.status).ok_or_else(|| {
        anyhow!("unknown status value {} for voter {}", model.status, model.id)
    })?;
    Ok(Voter {
        id: model.id,
        user_id: model.user_id,
        voter_no: model.voter_no,
        national_id: model.national_id,
        date_of_birth: model.date_of_birth,
        guardian_name: model.guardian_name,
        phone_number: model.phone_number,
        occupation: model.occupation,
        status,
        rejection_reason: model.rejection_reason,
        has_voted: model.has_voted,
        voted_at: model.voted_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Candidate repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCandidateRepository {
    pub db: DatabaseConnection,
}

impl CandidateRepository for DbCandidateRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Candidate>, ElectionServiceError> {
        let model = candidates::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find candidate by id")?;
        model.map(candidate_from_model).transpose()
    }

    async fn find_latest_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Candidate>, ElectionServiceError> {
        let model = candidates::Entity::find()
            .filter(candidates::Column::UserId.eq(user_id))
            .order_by_desc(candidates::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find latest candidate by user id")?;
        model.map(candidate_from_model).transpose()
    }

    async fn create_with_user(
        &self,
        user: &User,
        candidate: &Candidate,
    ) -> Result<(), ElectionServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let user = user.clone();
                let candidate = candidate.clone();
                Box::pin(async move {
                    user_active_model(&user).insert(txn).await?;
                    insert_candidate(txn, &candidate).await?;
                    Ok(())
                })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(err)) => {
                if unique_violation(&err).is_some() {
                    return Err(ElectionServiceError::EmailTaken);
                }
                Err(internal(err, "create candidate with user"))
            }
            Err(TransactionError::Connection(err)) => {
                Err(internal(err, "create candidate with user"))
            }
        }
    }

    async fn create(&self, candidate: &Candidate) -> Result<(), ElectionServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let candidate = candidate.clone();
                Box::pin(async move { insert_candidate(txn, &candidate).await })
            })
            .await;
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(err)) => Err(internal(err, "create candidate")),
            Err(TransactionError::Connection(err)) => Err(internal(err, "create candidate")),
        }
    }

    async fn mark_approved(&self, id: Uuid) -> Result<bool, ElectionServiceError> {
        let result = candidates::Entity::update_many()
            .filter(candidates::Column::Id.eq(id))
            .filter(candidates::Column::Status.eq(ApprovalStatus::Pending.as_i16()))
            .col_expr(
                candidates::Column::Status,
                Expr::value(ApprovalStatus::Approved.as_i16()),
            )
            .col_expr(candidates::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("approve candidate")?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_rejected(&self, id: Uuid, reason: &str) -> Result<bool, ElectionServiceError> {
        let result = candidates::Entity::update_many()
            .filter(candidates::Column::Id.eq(id))
            .filter(candidates::Column::Status.eq(ApprovalStatus::Pending.as_i16()))
            .col_expr(
                candidates::Column::Status,
                Expr::value(ApprovalStatus::Rejected.as_i16()),
            )
            .col_expr(
                candidates::Column::RejectionReason,
                Expr::value(reason.to_owned()),
            )
            .col_expr(candidates::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .context("reject candidate")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_with_users(
        &self,
        statuses: &[ApprovalStatus],
        page: PageRequest,
    ) -> Result<Vec<NominationProfile>, ElectionServiceError> {
        let wire: Vec<i16> = statuses.iter().map(|s| s.as_i16()).collect();
        let rows = candidates::Entity::find()
            .find_also_related(users::Entity)
            .filter(candidates::Column::Status.is_in(wire))
            .order_by_asc(candidates::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list candidates with users")?;

        rows.into_iter()
            .map(|(candidate, user)| {
                let user = user
                    .ok_or_else(|| anyhow!("candidate {} has no user row", candidate.id))?;
                Ok(NominationProfile {
                    candidate: candidate_from_model(candidate)?,
                    name: user.name,
                    email: user.email,
                })
            })
            .collect()
    }

    async fn standings(&self) -> Result<Vec<CandidateStanding>, ElectionServiceError> {
        let rows = candidates::Entity::find()
            .find_also_related(users::Entity)
            .filter(candidates::Column::Status.eq(ApprovalStatus::Approved.as_i16()))
            .order_by_desc(candidates::Column::TotalVotes)
            .all(&self.db)
            .await
            .context("list candidate standings")?;

        rows.into_iter()
            .map(|(candidate, user)| {
                let user = user
                    .ok_or_else(|| anyhow!("candidate {} has no user row", candidate.id))?;
                Ok(CandidateStanding {
                    candidate_id: candidate.id,
                    name: user.name,
                    party_name: candidate.party_name,
                    votes: candidate.total_votes,
                })
            })
            .collect()
    }

    async fn count_all(&self) -> Result<u64, ElectionServiceError> {
        let count = candidates::Entity::find()
            .count(&self.db)
            .await
            .context("count candidates")?;
        Ok(count)
    }

    async fn count_by_status(
        &self,
        status: ApprovalStatus,
    ) -> Result<u64, ElectionServiceError> {
        let count = candidates::Entity::find()
            .filter(candidates::Column::Status.eq(status.as_i16()))
            .count(&self.db)
            .await
            .context("count candidates by status")?;
        Ok(count)
    }
}

async fn insert_candidate(txn: &DatabaseTransaction, candidate: &Candidate) -> Result<(), DbErr> {
    candidates::ActiveModel {
        id: Set(candidate.id),
        user_id: Set(candidate.user_id),
        party_name: Set(candidate.party_name.clone()),
        status: Set(candidate.status.as_i16()),
        rejection_reason: Set(candidate.rejection_reason.clone()),
        total_votes: Set(candidate.total_votes),
        created_at: Set(candidate.created_at),
        updated_at: Set(candidate.updated_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn candidate_from_model(model: candidates::Model) -> Result<Candidate, ElectionServiceError> {
    let status = ApprovalStatus::from_i16(model.status).ok_or_else(|| {
        anyhow!(
            "unknown status value {} for candidate {}",
            model.status,
            model.id
        )
    })?;
    Ok(Candidate {
        id: model.id,
        user_id: model.user_id,
        party_name: model.party_name,
        status,
        rejection_reason: model.rejection_reason,
        total_votes: model.total_votes,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn supersede_active(&self, voter_id: Uuid) -> Result<u64, ElectionServiceError> {
        let now = Utc::now();
        let result = otp_codes::Entity::update_many()
            .filter(otp_codes::Column::VoterId.eq(voter_id))
            .filter(otp_codes::Column::Superseded.eq(false))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .col_expr(otp_codes::Column::Superseded, Expr::value(true))
            .exec(&self.db)
            .await
            .context("supersede active otp codes")?;
        Ok(result.rows_affected)
    }

    async fn create(&self, code: &OtpCode) -> Result<(), ElectionServiceError> {
        otp_codes::ActiveModel {
            id: Set(code.id),
            voter_id: Set(code.voter_id),
            code: Set(code.code.clone()),
            superseded: Set(code.superseded),
            consumed_at: Set(code.consumed_at),
            expires_at: Set(code.expires_at),
            created_at: Set(code.created_at),
        }
        .insert(&self.db)
        .await
        .context("create otp code")?;
        Ok(())
    }

    async fn find_active(
        &self,
        voter_id: Uuid,
    ) -> Result<Option<OtpCode>, ElectionServiceError> {
        let now = Utc::now();
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::VoterId.eq(voter_id))
            .filter(otp_codes::Column::Superseded.eq(false))
            .filter(otp_codes::Column::ConsumedAt.is_null())
            .filter(otp_codes::Column::ExpiresAt.gt(now))
            .order_by_desc(otp_codes::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find active otp code")?;
        Ok(model.map(otp_from_model))
    }

    async fn mark_consumed(&self, id: Uuid) -> Result<(), ElectionServiceError> {
        otp_codes::ActiveModel {
            id: Set(id),
            consumed_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark otp code consumed")?;
        Ok(())
    }

    async fn last_consumed_at(
        &self,
        voter_id: Uuid,
    ) -> Result<Option<DateTime<Utc>>, ElectionServiceError> {
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::VoterId.eq(voter_id))
            .filter(otp_codes::Column::ConsumedAt.is_not_null())
            .order_by_desc(otp_codes::Column::ConsumedAt)
            .one(&self.db)
            .await
            .context("find last consumed otp code")?;
        Ok(model.and_then(|m| m.consumed_at))
    }
}

fn otp_from_model(model: otp_codes::Model) -> OtpCode {
    OtpCode {
        id: model.id,
        voter_id: model.voter_id,
        code: model.code,
        superseded: model.superseded,
        consumed_at: model.consumed_at,
        expires_at: model.expires_at,
        created_at: model.created_at,
    }
}

// ── Vote ledger ──────────────────────────────────────────────────────────────

/// Sentinel used to roll back the cast transaction when the conditional
/// has-voted flip matches no row.
const DUPLICATE_VOTE_SENTINEL: &str = "duplicate vote";

#[derive(Clone)]
pub struct DbVoteLedger {
    pub db: DatabaseConnection,
}

impl VoteLedger for DbVoteLedger {
    async fn record(
        &self,
        vote: &VoteRecord,
        entry: &AuditEntry,
    ) -> Result<(), ElectionServiceError> {
        let result = self
            .db
            .transaction::<_, (), DbErr>(|txn| {
                let vote = vote.clone();
                let entry = entry.clone();
                Box::pin(async move {
                    // The unique constraint on voter_id rejects a second
                    // vote even if both requests passed the use-case checks.
                    votes::ActiveModel {
                        id: Set(vote.id),
                        voter_id: Set(vote.voter_id),
                        candidate_id: Set(vote.candidate_id),
                        voted_at: Set(vote.voted_at),
                    }
                    .insert(txn)
                    .await?;

                    let flipped = voters::Entity::update_many()
                        .filter(voters::Column::Id.eq(vote.voter_id))
                        .filter(voters::Column::HasVoted.eq(false))
                        .col_expr(voters::Column::HasVoted, Expr::value(true))
                        .col_expr(voters::Column::VotedAt, Expr::value(vote.voted_at))
                        .col_expr(voters::Column::UpdatedAt, Expr::value(vote.voted_at))
                        .exec(txn)
                        .await?;
                    if flipped.rows_affected == 0 {
                        return Err(DbErr::Custom(DUPLICATE_VOTE_SENTINEL.to_owned()));
                    }

                    // In-place increment: no read-modify-write, no lost
                    // updates under concurrent votes for the same candidate.
                    candidates::Entity::update_many()
                        .filter(candidates::Column::Id.eq(vote.candidate_id))
                        .col_expr(
                            candidates::Column::TotalVotes,
                            Expr::col(candidates::Column::TotalVotes).add(1),
                        )
                        .col_expr(candidates::Column::UpdatedAt, Expr::value(vote.voted_at))
                        .exec(txn)
                        .await?;

                    insert_audit_entry(txn, &entry).await?;
                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Transaction(err)) => {
                let lost_race = unique_violation(&err).is_some();
                let flag_already_set =
                    matches!(&err, DbErr::Custom(msg) if msg == DUPLICATE_VOTE_SENTINEL);
                if lost_race || flag_already_set {
                    return Err(ElectionServiceError::DuplicateVote);
                }
                Err(internal(err, "record vote"))
            }
            Err(TransactionError::Connection(err)) => Err(internal(err, "record vote")),
        }
    }

    async fn count_all(&self) -> Result<u64, ElectionServiceError> {
        let count = votes::Entity::find()
            .count(&self.db)
            .await
            .context("count votes")?;
        Ok(count)
    }

    async fn reset(&self) -> Result<ResetSummary, ElectionServiceError> {
        let summary = self
            .db
            .transaction::<_, ResetSummary, DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let votes = votes::Entity::delete_many().exec(txn).await?;
                    let voters = voters::Entity::update_many()
                        .filter(voters::Column::HasVoted.eq(true))
                        .col_expr(voters::Column::HasVoted, Expr::value(false))
                        .col_expr(
                            voters::Column::VotedAt,
                            Expr::value(Option::<DateTime<Utc>>::None),
                        )
                        .col_expr(voters::Column::UpdatedAt, Expr::value(now))
                        .exec(txn)
                        .await?;
                    let candidates = candidates::Entity::update_many()
                        .filter(candidates::Column::TotalVotes.gt(0))
                        .col_expr(candidates::Column::TotalVotes, Expr::value(0i64))
                        .col_expr(candidates::Column::UpdatedAt, Expr::value(now))
                        .exec(txn)
                        .await?;
                    Ok(ResetSummary {
                        votes_deleted: votes.rows_affected,
                        voters_reset: voters.rows_affected,
                        candidates_reset: candidates.rows_affected,
                    })
                })
            })
            .await;
        match summary {
            Ok(summary) => Ok(summary),
            Err(TransactionError::Transaction(err)) => Err(internal(err, "reset election")),
            Err(TransactionError::Connection(err)) => Err(internal(err, "reset election")),
        }
    }
}

// ── Audit log repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuditLogRepository {
    pub db: DatabaseConnection,
}

impl AuditLogRepository for DbAuditLogRepository {
    async fn append(&self, entry: &AuditEntry) -> Result<(), ElectionServiceError> {
        insert_audit_entry(&self.db, entry)
            .await
            .context("append audit entry")?;
        Ok(())
    }

    async fn list_recent(
        &self,
        page: PageRequest,
    ) -> Result<Vec<AuditEntry>, ElectionServiceError> {
        let models = audit_logs::Entity::find()
            .order_by_desc(audit_logs::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list audit entries")?;
        Ok(models.into_iter().map(audit_from_model).collect())
    }
}

async fn insert_audit_entry<C: ConnectionTrait>(conn: &C, entry: &AuditEntry) -> Result<(), DbErr> {
    audit_logs::ActiveModel {
        id: Set(entry.id),
        voter_id: Set(entry.voter_id),
        action: Set(entry.action.clone()),
        detail: Set(entry.detail.clone()),
        ip_address: Set(entry.ip_address.clone()),
        created_at: Set(entry.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn audit_from_model(model: audit_logs::Model) -> AuditEntry {
    AuditEntry {
        id: model.id,
        voter_id: model.voter_id,
        action: model.action,
        detail: model.detail,
        ip_address: model.ip_address,
        created_at: model.created_at,
    }
}

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAuditLogRepository, DbCandidateRepository, DbOtpRepository, DbUserRepository,
    DbVoteLedger, DbVoterRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub cookie_domain: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn voter_repo(&self) -> DbVoterRepository {
        DbVoterRepository {
            db: self.db.clone(),
        }
    }

    pub fn candidate_repo(&self) -> DbCandidateRepository {
        DbCandidateRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn vote_ledger(&self) -> DbVoteLedger {
        DbVoteLedger {
            db: self.db.clone(),
        }
    }

    pub fn audit_repo(&self) -> DbAuditLogRepository {
        DbAuditLogRepository {
            db: self.db.clone(),
        }
    }
}

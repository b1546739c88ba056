use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Voters::Table)
                    .col(Voters::Status)
                    .name("idx_voters_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Candidates::Table)
                    .col(Candidates::Status)
                    .name("idx_candidates_status")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Votes::Table)
                    .col(Votes::CandidateId)
                    .name("idx_votes_candidate_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(OtpCodes::Table)
                    .col(OtpCodes::VoterId)
                    .name("idx_otp_codes_voter_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AuditLogs::Table)
                    .col(AuditLogs::CreatedAt)
                    .name("idx_audit_logs_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_audit_logs_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_otp_codes_voter_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_votes_candidate_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_candidates_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_voters_status").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Voters {
    Table,
    Status,
}

#[derive(Iden)]
enum Candidates {
    Table,
    Status,
}

#[derive(Iden)]
enum Votes {
    Table,
    CandidateId,
}

#[derive(Iden)]
enum OtpCodes {
    Table,
    VoterId,
}

#[derive(Iden)]
enum AuditLogs {
    Table,
    CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Voters::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Voters::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Voters::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    // NULL until approved; multiple NULLs are fine under a
                    // Postgres unique constraint.
                    .col(ColumnDef::new(Voters::VoterNo).string().unique_key())
                    .col(
                        ColumnDef::new(Voters::NationalId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Voters::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Voters::GuardianName).string().not_null())
                    .col(ColumnDef::new(Voters::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Voters::Occupation).string().not_null())
                    .col(
                        ColumnDef::new(Voters::Status)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Voters::RejectionReason).string())
                    .col(
                        ColumnDef::new(Voters::HasVoted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Voters::VotedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Voters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Voters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Voters::Table, Voters::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Voters::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Voters {
    Table,
    Id,
    UserId,
    VoterNo,
    NationalId,
    DateOfBirth,
    GuardianName,
    PhoneNumber,
    Occupation,
    Status,
    RejectionReason,
    HasVoted,
    VotedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

use sea_orm_migration::prelude::*;

mod m20260808_000001_create_users;
mod m20260808_000002_create_voters;
mod m20260808_000003_create_candidates;
mod m20260808_000004_create_votes;
mod m20260808_000005_create_otp_codes;
mod m20260808_000006_create_audit_logs;
mod m20260808_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260808_000001_create_users::Migration),
            Box::new(m20260808_000002_create_voters::Migration),
            Box::new(m20260808_000003_create_candidates::Migration),
            Box::new(m20260808_000004_create_votes::Migration),
            Box::new(m20260808_000005_create_otp_codes::Migration),
            Box::new(m20260808_000006_create_audit_logs::Migration),
            Box::new(m20260808_000007_add_indexes::Migration),
        ]
    }
}

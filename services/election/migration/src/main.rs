use sea_orm_migration::prelude::*;

use matdaan_election_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}

use sea_orm::Database;
use tracing::info;

use matdaan_election::config::ElectionConfig;
use matdaan_election::router::build_router;
use matdaan_election::state::AppState;
use matdaan_election::usecase::admin::seed_admin;

#[tokio::main]
async fn main() {
    matdaan_core::tracing::init_tracing();

    let config = ElectionConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: config.jwt_secret.clone(),
        cookie_domain: config.cookie_domain.clone(),
    };

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        match seed_admin(&state.user_repo(), email, &config.admin_name, password).await {
            Ok(true) => info!(email = %email, "seeded admin account"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "admin seeding failed"),
        }
    }

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.election_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("election service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}

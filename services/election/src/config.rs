/// Election service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ElectionConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3200). Env var: `ELECTION_PORT`.
    pub election_port: u16,
    /// Initial admin credentials; the account is seeded at startup only when
    /// both `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    /// Display name for the seeded admin (default "System Admin").
    pub admin_name: String,
}

impl ElectionConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            election_port: std::env::var("ELECTION_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3200),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            admin_name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "System Admin".to_owned()),
        }
    }
}

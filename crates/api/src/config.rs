use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Shared secret for verifying checkout webhook signatures.
    pub checkout_webhook_secret: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Required | Default                 |
    /// |---------------------------|----------|-------------------------|
    /// | `HOST`                    | no       | `0.0.0.0`               |
    /// | `PORT`                    | no       | `3000`                  |
    /// | `CORS_ORIGINS`            | no       | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | no       | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`   | no       | `30`                    |
    /// | `CHECKOUT_WEBHOOK_SECRET` | **yes**  | --                      |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics if `CHECKOUT_WEBHOOK_SECRET` is not set or is empty; a server
    /// that silently accepted unsigned payment callbacks would be worse than
    /// one that refuses to start.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let checkout_webhook_secret = std::env::var("CHECKOUT_WEBHOOK_SECRET")
            .expect("CHECKOUT_WEBHOOK_SECRET must be set in the environment");
        assert!(
            !checkout_webhook_secret.is_empty(),
            "CHECKOUT_WEBHOOK_SECRET must not be empty"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            checkout_webhook_secret,
        }
    }
}

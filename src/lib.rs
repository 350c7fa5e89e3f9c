pub mod auth;
pub mod config;
pub mod error;
pub mod users;

use std::sync::Arc;

use actix_web::HttpResponse;

pub use error::{AppError, AuthError};
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{Claims, TokenService};
pub use users::{Credential, UserStore};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub users: Arc<UserStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Wires the credential store and token service from settings. Fails
    /// when the signing secret is unset, so a misconfigured process never
    /// reaches the listener.
    pub fn new(config: Settings) -> Result<Self> {
        let tokens = TokenService::new(
            config.auth.jwt_secret.clone(),
            chrono::Duration::seconds(config.auth.token_ttl_seconds),
        )?;

        Ok(Self {
            config: Arc::new(config),
            users: Arc::new(UserStore::with_defaults()),
            tokens: Arc::new(tokens),
        })
    }
}

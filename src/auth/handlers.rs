use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::auth::middleware::AuthenticatedUser;
use crate::error::{AppError, AuthError};
use crate::AppState;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for username: {}", req.username);

    // One response for both unknown user and wrong password; the body must
    // not reveal which check failed.
    match state.users.find(&req.username) {
        Some(credential) if credential.password == req.password => {
            let token = state.tokens.issue(&req.username)?;
            info!("Login successful for username: {}", req.username);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        _ => {
            warn!("Login failed for username: {}", req.username);
            Err(AuthError::InvalidCredentials.into())
        }
    }
}

pub async fn protected(user: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "You made it!",
        "user": user.0,
    }))
}

use crate::error::{AppError, AuthError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Authenticated username
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// Issues and verifies signed bearer tokens. Stateless apart from the
/// shared secret and the clock; the token is the whole session.
pub struct TokenService {
    jwt_secret: String,
    token_ttl: Duration,
}

impl TokenService {
    /// Fails when the signing secret is empty. Signing with an empty key
    /// must never happen silently, so this is checked once at construction
    /// and treated as fatal at startup.
    pub fn new(jwt_secret: String, token_ttl: Duration) -> Result<Self, AppError> {
        if jwt_secret.is_empty() {
            return Err(AppError::ConfigError(
                "token signing secret is not set".to_string(),
            ));
        }
        Ok(Self {
            jwt_secret,
            token_ttl,
        })
    }

    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + self.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Signature and payload checks, then expiry against the supplied
    /// clock with zero leeway: `now >= exp` is expired. Tests move time
    /// through `now` instead of sleeping.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )?;

        let claims = data.claims;
        if now.timestamp() >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The expected shape is `Bearer <token>`; the scheme literal is
/// case-sensitive. No header, or fewer than two whitespace-separated
/// parts, means no token was presented at all. A two-part value with the
/// wrong scheme carries a credential, just not a valid one.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;

    let mut parts = header.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::MissingToken)?;
    let token = parts.next().ok_or(AuthError::MissingToken)?;

    if scheme != "Bearer" {
        return Err(AuthError::InvalidToken);
    }

    Ok(token)
}

//! Bearer token authentication.
//!
//! Requests without an `Authorization` header proceed as an anonymous
//! caller; role checks happen in the security aspect. A header that is
//! present but malformed or carries an invalid token is rejected.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};

use crate::api::AppState;
use crate::service::aspects::Caller;

pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration as a unix timestamp
    pub exp: usize,
}

impl Claims {
    pub fn new(sub: impl Into<String>, roles: Vec<String>, ttl: chrono::Duration) -> Self {
        Self {
            sub: sub.into(),
            roles,
            exp: (Utc::now() + ttl).timestamp().max(0) as usize,
        }
    }
}

impl From<Claims> for Caller {
    fn from(claims: Claims) -> Self {
        Caller::new(claims.sub, claims.roles)
    }
}

/// HS256 token encoding and verification.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn encode(&self, claims: &Claims) -> AppResult<String> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }

    /// Verify signature and expiry.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Resolve the request's [`Caller`] and store it in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = match request.headers().get(AUTHORIZATION) {
        None => Caller::anonymous(),
        Some(value) => {
            let token = value
                .to_str()
                .ok()
                .and_then(|header| header.strip_prefix(BEARER_TOKEN_PREFIX))
                .ok_or(AppError::Unauthorized)?;

            Caller::from(state.tokens.decode(token)?)
        }
    };

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

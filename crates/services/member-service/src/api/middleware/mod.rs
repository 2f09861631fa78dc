//! API middleware.

mod auth;

pub use auth::{authenticate, Claims, TokenCodec, BEARER_TOKEN_PREFIX};

//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified infrastructure error handling for HTTP
//! - Configuration structures
//! - The JSON envelope that carries business results over HTTP

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult};
pub use response::{failure_status, ApiResponse, ResultResponse};

//! Custom extractors.

mod json;

pub use json::AppJson;

//! HTTP request handlers.

pub mod health_handler;
pub mod member_handler;
pub mod trainer_handler;

pub use health_handler::health;
pub use member_handler::member_routes;
pub use trainer_handler::trainer_routes;

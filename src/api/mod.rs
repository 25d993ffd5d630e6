//! hpcheck API Module
//! REST boundary for the honeypot analysis pipeline

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;

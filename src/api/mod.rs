//! Rebot Intel REST API Module
//! Thin HTTP surface over the address intelligence service

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;

//! HTTP API module
//!
//! Axum routers, the response envelope and error mapping

pub mod error;
pub mod extract;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use response::{ApiResponse, Paginated};
pub use routes::build_router;
pub use state::AppState;

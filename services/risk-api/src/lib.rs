pub mod auth;
pub mod config;
pub mod cors;
pub mod demo_metrics;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod state;

// Re-exports for convenience
pub use config::Config;
pub use errors::{ApiError, ApiResult};
pub use state::AppState;

pub mod auth;
pub mod rate_limit;

pub use auth::JwtAuth;
pub use rate_limit::RateLimiter;

pub mod password;
pub mod rate_limit;

pub use password::PasswordHasher;
pub use rate_limit::{IpRateLimiter, RateLimitMiddleware};

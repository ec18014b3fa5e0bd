pub mod auth_flow;
pub mod body_limit_test;
pub mod health_test;
pub mod rate_limit_test;

#[macro_use]
extern crate actix_web;

pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod errors;
pub mod helpers;
pub mod middlewares;
pub mod models;
pub mod requests;
pub mod router;
pub mod security;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod utils;
pub mod validators;
pub mod views;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use errors::{Error, Validation};
pub use middlewares::v1::session::{Session, SessionCache};
pub use security::{PasswordHasher, RateLimitMiddleware};
pub use state::AppState;

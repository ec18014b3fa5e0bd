//! Integration test harness for lighter-signin
//!
//! Run with: cargo test --test integration_tests
//!
//! Covers the signup, login, home and logout pages end to end, the health
//! endpoint and form throttling.

mod integration;

//! Helpers shared by unit tests and the `tests/` harness

pub mod setup;

/// Build an initialized test service over a fresh in-memory database
///
/// Expands to `(service, db, state)`. Takes an optional [`AppConfig`] and
/// defaults to the testing profile.
///
/// [`AppConfig`]: crate::config::AppConfig
#[macro_export]
macro_rules! service {
    () => {
        $crate::service!($crate::testing::setup::config())
    };
    ($config:expr) => {{
        let db = ::actix_web::web::Data::new($crate::testing::setup::database().await);
        let state = ::actix_web::web::Data::new(
            $crate::state::AppState::new($config).expect("Failed to build application state"),
        );
        let app = ::actix_web::App::new()
            .wrap($crate::security::RateLimitMiddleware::with_limiter(
                state.limiter.clone(),
            ))
            .configure($crate::state::configure(db.clone(), state.clone()))
            .configure($crate::router::route);

        (::actix_web::test::init_service(app).await, db, state)
    }};
}

//! # Rate Limiting Middleware
//!
//! Per-client throttling of form submissions (`POST /signup`, `POST /login`)
//! using a `governor` limiter per IP address.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lighter_signin::config::RateLimitConfig;
//! use lighter_signin::security::RateLimitMiddleware;
//! use actix_web::{App, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() {
//!     let config = RateLimitConfig::default();
//!
//!     HttpServer::new(move || {
//!         App::new()
//!             .wrap(RateLimitMiddleware::new(config.clone()))
//!             // ... your routes
//!     })
//!     .bind("0.0.0.0:8080")
//!     .unwrap()
//!     .run()
//!     .await
//!     .unwrap()
//! }
//! ```

use std::future::{Ready, ready};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::Method;
use actix_web::http::header::{self, ContentType};
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::RateLimitConfig;
use crate::views;

/// Per-IP rate limiter with thread-safe tracking
///
/// Backed by a keyed `governor` limiter, whose state store is a `DashMap`.
/// Idle addresses are dropped by [`IpRateLimiter::purge_idle`].
#[derive(Clone)]
pub struct IpRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    config: RateLimitConfig,
}

impl IpRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::keyed(quota(&config))),
            config,
        }
    }

    /// `Err(wait)` when `ip` is over quota
    #[tracing::instrument(skip(self), fields(ip = %ip))]
    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), Duration> {
        if !self.config.enabled {
            return Ok(());
        }

        match self.limiter.check_key(&ip) {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(DefaultClock::default().now());
                tracing::warn!(ip = %ip, retry_after = ?wait_time, "Rate limit exceeded");
                Err(wait_time)
            }
        }
    }

    /// Forget addresses whose quota has fully refilled, returns how many were dropped
    pub fn purge_idle(&self) -> usize {
        let before = self.limiter.len();

        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();

        before.saturating_sub(self.limiter.len())
    }

    pub fn tracked(&self) -> usize {
        self.limiter.len()
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }
}

/// `requests` per `window_seconds`, all of which may be spent at once
fn quota(config: &RateLimitConfig) -> Quota {
    let requests = NonZeroU32::new(config.requests).unwrap_or(NonZeroU32::MIN);
    let period = Duration::from_secs(config.window_seconds.max(1)) / requests.get();

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(requests))
        .allow_burst(requests)
}

/// Rate limiting middleware for actix-web; only POST requests are counted
pub struct RateLimitMiddleware {
    limiter: IpRateLimiter,
}

impl RateLimitMiddleware {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: IpRateLimiter::new(config),
        }
    }

    /// Share one limiter between server workers
    pub fn with_limiter(limiter: IpRateLimiter) -> Self {
        Self { limiter }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: IpRateLimiter,
}

/// Client address used as the limiter key
///
/// The socket peer address, unless `trust_forwarded` is set. Only then are
/// `Forwarded` and `X-Forwarded-For` read, since any client can send them.
fn client_ip(req: &ServiceRequest, trust_forwarded: bool) -> IpAddr {
    let forwarded = trust_forwarded
        .then(|| req.connection_info().realip_remote_addr().and_then(parse_ip))
        .flatten();

    forwarded
        .or_else(|| req.peer_addr().map(|addr| addr.ip()))
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

fn parse_ip(addr: &str) -> Option<IpAddr> {
    addr.parse::<IpAddr>()
        .ok()
        .or_else(|| addr.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if req.method() != Method::POST {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let ip = client_ip(&req, self.limiter.config().trust_forwarded);

        match self.limiter.check_rate_limit(ip) {
            Ok(_) => {
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(wait_time) => {
                let retry_after = wait_time.as_secs().max(1);
                let response = HttpResponse::TooManyRequests()
                    .insert_header((header::RETRY_AFTER, retry_after.to_string()))
                    .content_type(ContentType::html())
                    .body(views::error(
                        "Too many requests",
                        [format!("Please try again in {retry_after} seconds.").as_str()],
                    ));

                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

use actix_web::HttpRequest;
use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, CookieJar, Key};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::helpers::base58;

/// Signed cookie carrying the base58 session id
pub fn session_cookie(config: &SessionConfig, key: &Key, session_id: Uuid) -> Cookie<'static> {
    let max_age = i64::try_from(config.lifetime).unwrap_or(i64::MAX);
    let cookie = Cookie::build(config.cookie_name.clone(), base58::to_string(session_id))
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(config.same_site.into())
        .max_age(Duration::seconds(max_age))
        .finish();

    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(cookie);

    jar.get(&config.cookie_name)
        .cloned()
        .unwrap_or_else(|| Cookie::new(config.cookie_name.clone(), ""))
}

/// Removal cookie that makes the browser forget the session
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(config.same_site.into())
        .finish();

    cookie.make_removal();
    cookie
}

/// Session id from a request cookie; `None` when missing, tampered or malformed
pub fn read_session_id(req: &HttpRequest, config: &SessionConfig, key: &Key) -> Option<Uuid> {
    let cookie = req.cookie(&config.cookie_name)?;

    let mut jar = CookieJar::new();
    jar.add_original(cookie);

    let verified = jar.signed(key).get(&config.cookie_name)?;

    base58::decode(verified.value())
}

use axum_extra::extract::PrivateCookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use super::state::CookieSettings;
use crate::types::SessionId;

/// Create the session id cookie.
pub(super) fn session_cookie(settings: &CookieSettings, id: &SessionId) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), id.to_string()))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(settings.ttl_days))
        .build()
}

/// Create the removal cookie for logout.
pub(super) fn clear_session_cookie(settings: &CookieSettings) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

/// Read the session id from the jar, if present.
pub(super) fn session_id(jar: &PrivateCookieJar, settings: &CookieSettings) -> Option<SessionId> {
    jar.get(&settings.cookie_name)
        .map(|c| SessionId(c.value().to_string()))
}

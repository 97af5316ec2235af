use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;

use crate::api::PlatformClient;
use crate::error::Error;
use crate::session::SessionStore;

/// Behavior of the session id cookie.
#[derive(Clone, Debug)]
pub struct CookieSettings {
    pub(super) key: Key,
    pub(super) cookie_name: String,
    pub(super) ttl_days: i64,
    pub(super) secure: bool,
}

impl CookieSettings {
    /// Defaults: ephemeral key, year-long cookie, `Secure` flag on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key: Key::generate(),
            cookie_name: "__scenes_session".into(),
            ttl_days: 365,
            secure: true,
        }
    }

    /// Create cookie settings from environment variables.
    ///
    /// # Optional env vars
    /// - `COOKIE_KEY`: stable cookie encryption key bytes (at least 64);
    ///   without it an ephemeral key is generated and sessions do not
    ///   survive a restart
    /// - `DEV_COOKIES`: `"1"` or `"true"` drops the `Secure` flag for
    ///   plain-HTTP development
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `COOKIE_KEY` is set but too short.
    pub fn from_env() -> Result<Self, Error> {
        let key = match std::env::var("COOKIE_KEY") {
            Ok(k) => Key::try_from(k.as_bytes()).map_err(|_| {
                Error::Config(
                    "COOKIE_KEY is set but invalid (must be at least 64 bytes). \
                     Remove the env var to use an ephemeral key, or provide a valid key."
                        .into(),
                )
            })?,
            Err(_) => Key::generate(),
        };

        let dev_cookies = matches!(std::env::var("DEV_COOKIES").as_deref(), Ok("1") | Ok("true"));

        Ok(Self::new().with_key(key).with_secure(!dev_cookies))
    }

    #[must_use]
    pub fn with_key(mut self, key: Key) -> Self {
        self.key = key;
        self
    }

    #[must_use]
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    #[must_use]
    pub fn with_ttl_days(mut self, days: i64) -> Self {
        self.ttl_days = days;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared state for the web handlers.
pub struct AppState<S> {
    pub(super) client: Arc<PlatformClient>,
    pub(super) sessions: Arc<S>,
    pub(super) cookies: CookieSettings,
}

// Manual Clone: avoid derive adding an `S: Clone` bound.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            sessions: self.sessions.clone(),
            cookies: self.cookies.clone(),
        }
    }
}

// PrivateCookieJar requires Key to be extractable from state
impl<S: SessionStore> FromRef<AppState<S>> for Key {
    fn from_ref(state: &AppState<S>) -> Self {
        state.cookies.key.clone()
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn from_env_rejects_short_cookie_key() {
        unsafe {
            std::env::set_var("COOKIE_KEY", "too-short");
        }
        let err = CookieSettings::from_env().unwrap_err();
        assert!(err.to_string().contains("COOKIE_KEY"));
        unsafe {
            std::env::remove_var("COOKIE_KEY");
        }
    }

    #[test]
    #[serial]
    fn dev_cookies_drop_the_secure_flag() {
        unsafe {
            std::env::set_var("DEV_COOKIES", "1");
        }
        let settings = CookieSettings::from_env().unwrap();
        assert!(!settings.secure);
        unsafe {
            std::env::remove_var("DEV_COOKIES");
        }
        let settings = CookieSettings::from_env().unwrap();
        assert!(settings.secure);
    }
}

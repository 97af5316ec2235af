use url::Url;

use crate::error::Error;

/// OAuth2 scope requested from SmartThings.
pub const SCOPE: &str = "r:locations:* r:scenes:* x:scenes:*";

const DEFAULT_AUTHORIZE_URL: &str = "https://api.smartthings.com/oauth/authorize";
const DEFAULT_TOKEN_URL: &str = "https://api.smartthings.com/oauth/token";
const DEFAULT_API_BASE: &str = "https://api.smartthings.com";

/// Immutable application configuration, constructed once at startup.
///
/// Required fields are constructor parameters — no runtime "missing field"
/// errors past this point.
///
/// ```rust,ignore
/// use smartthings_scenes::Config;
///
/// let config = Config::new("client-id", "client-secret", "app-id",
///     "https://my-app.example.com".parse()?)?;
/// // Optional overrides via chaining:
/// let config = config.with_port(8080);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    pub(crate) port: u16,
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) app_id: String,
    pub(crate) base_url: Url,
    pub(crate) redirect_uri: Url,
    pub(crate) authorize_url: Url,
    pub(crate) token_url: Url,
    pub(crate) api_base: Url,
}

impl Config {
    /// Create a configuration from the required credentials and base URL.
    ///
    /// The redirect URI is derived as `{base_url}/oauth/callback`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the base URL cannot carry the callback
    /// path (for example a non-hierarchical URL).
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        app_id: impl Into<String>,
        base_url: Url,
    ) -> Result<Self, Error> {
        let redirect_uri: Url = format!(
            "{}/oauth/callback",
            base_url.as_str().trim_end_matches('/')
        )
        .parse()
        .map_err(|e| Error::Config(format!("base URL does not accept a callback path: {e}")))?;

        Ok(Self {
            port: 3000,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            app_id: app_id.into(),
            base_url,
            redirect_uri,
            authorize_url: DEFAULT_AUTHORIZE_URL.parse().expect("valid default URL"),
            token_url: DEFAULT_TOKEN_URL.parse().expect("valid default URL"),
            api_base: DEFAULT_API_BASE.parse().expect("valid default URL"),
        })
    }

    /// Create a configuration from environment variables.
    ///
    /// # Required env vars
    /// - `CLIENT_ID`: OAuth2 client id
    /// - `CLIENT_SECRET`: OAuth2 client secret
    /// - `APP_ID`: SmartThings app id
    /// - `SERVER_URL` (or `URL`): externally reachable base URL of this server
    ///
    /// # Optional env vars
    /// - `PORT`: listen port (default 3000)
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the missing or invalid variable.
    pub fn from_env() -> Result<Self, Error> {
        let client_id = require("CLIENT_ID")?;
        let client_secret = require("CLIENT_SECRET")?;
        let app_id = require("APP_ID")?;

        let base = std::env::var("SERVER_URL")
            .or_else(|_| std::env::var("URL"))
            .map_err(|_| Error::Config("SERVER_URL (or URL) is required".into()))?;
        let base_url: Url = base
            .parse()
            .map_err(|e| Error::Config(format!("SERVER_URL: {e}")))?;

        let mut config = Self::new(client_id, client_secret, app_id, base_url)?;

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| Error::Config(format!("PORT: {e}")))?;
        }

        Ok(config)
    }

    /// Override the listen port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_authorize_url(mut self, url: Url) -> Self {
        self.authorize_url = url;
        self
    }

    /// Override the token exchange endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the REST API base URL.
    #[must_use]
    pub fn with_api_base(mut self, url: Url) -> Self {
        self.api_base = url;
        self
    }

    /// Listen port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// OAuth2 client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// SmartThings app id.
    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Externally reachable base URL of this server.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// OAuth2 redirect URI (`{base_url}/oauth/callback`).
    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    /// Authorization endpoint URL.
    #[must_use]
    pub fn authorize_url(&self) -> &Url {
        &self.authorize_url
    }

    /// Token exchange endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// REST API base URL.
    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }
}

fn require(name: &'static str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::Config(format!("{name} is required")))
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    fn test_config() -> Config {
        Config::new(
            "test-client",
            "test-secret",
            "test-app",
            "https://example.com".parse().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn redirect_uri_is_derived_from_base() {
        let config = test_config();
        assert_eq!(
            config.redirect_uri().as_str(),
            "https://example.com/oauth/callback"
        );
    }

    #[test]
    fn trailing_slash_does_not_double_up() {
        let config = Config::new(
            "c",
            "s",
            "a",
            "https://example.com/".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(
            config.redirect_uri().as_str(),
            "https://example.com/oauth/callback"
        );
    }

    #[test]
    fn defaults_point_at_smartthings() {
        let config = test_config();
        assert_eq!(
            config.authorize_url().as_str(),
            "https://api.smartthings.com/oauth/authorize"
        );
        assert_eq!(
            config.token_url().as_str(),
            "https://api.smartthings.com/oauth/token"
        );
        assert_eq!(config.port(), 3000);
    }

    #[test]
    fn endpoint_overrides() {
        let config = test_config()
            .with_token_url("http://127.0.0.1:9999/oauth/token".parse().unwrap())
            .with_port(8080);
        assert_eq!(
            config.token_url().as_str(),
            "http://127.0.0.1:9999/oauth/token"
        );
        assert_eq!(config.port(), 8080);
    }

    #[test]
    #[serial]
    fn from_env_reads_all_vars() {
        unsafe {
            std::env::set_var("CLIENT_ID", "env-client");
            std::env::set_var("CLIENT_SECRET", "env-secret");
            std::env::set_var("APP_ID", "env-app");
            std::env::set_var("SERVER_URL", "https://env.example.com");
            std::env::set_var("PORT", "4040");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.client_id(), "env-client");
        assert_eq!(config.app_id(), "env-app");
        assert_eq!(config.port(), 4040);
        assert_eq!(
            config.redirect_uri().as_str(),
            "https://env.example.com/oauth/callback"
        );
        unsafe {
            for var in ["CLIENT_ID", "CLIENT_SECRET", "APP_ID", "SERVER_URL", "PORT"] {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn from_env_rejects_missing_credentials() {
        unsafe {
            for var in ["CLIENT_ID", "CLIENT_SECRET", "APP_ID", "SERVER_URL", "URL"] {
                std::env::remove_var(var);
            }
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("CLIENT_ID"));
    }
}

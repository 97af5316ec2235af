//! OAuth2 authorization-code flow against SmartThings.
//!
//! The platform uses the confidential-client variant: the authorization URL
//! carries only `client_id`, `scope`, `response_type` and `redirect_uri`,
//! and the token exchange authenticates with HTTP Basic credentials.

use serde::Deserialize;

use crate::api::PlatformClient;
use crate::config::SCOPE;
use crate::error::Error;
use crate::types::InstalledAppId;

/// Token endpoint response.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub installed_app_id: InstalledAppId,
    pub access_token: String,
    pub refresh_token: String,
}

impl PlatformClient {
    /// Build the authorization URL the login page links to.
    ///
    /// All query values are URL-encoded by construction.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let mut url = self.config.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("scope", SCOPE)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", self.config.redirect_uri.as_str());
        url.into()
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure or a malformed body, or
    /// [`Error::Api`] if the token endpoint rejects the code. No session
    /// state is touched here; the caller decides what a failure means.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&params)
            .send()
            .await?;

        let response = Self::ensure_success(response, "token exchange").await?;
        response.json::<TokenResponse>().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::PlatformClient;
    use crate::config::Config;

    fn test_client() -> PlatformClient {
        let config = Config::new(
            "test-client",
            "test-secret",
            "test-app",
            "https://example.com".parse().unwrap(),
        )
        .unwrap();
        PlatformClient::new(config)
    }

    #[test]
    fn authorization_url_carries_all_parameters() {
        let url = test_client().authorization_url();

        assert!(url.starts_with("https://api.smartthings.com/oauth/authorize?"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("scope=r%3Alocations%3A*+r%3Ascenes%3A*+x%3Ascenes%3A*"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fexample.com%2Foauth%2Fcallback"));
    }

    #[test]
    fn authorization_url_is_stable() {
        let client = test_client();
        assert_eq!(client.authorization_url(), client.authorization_url());
    }

    #[test]
    fn token_response_deserializes_snake_case() {
        let body = r#"{
            "installed_app_id": "A1",
            "access_token": "T1",
            "refresh_token": "R1",
            "token_type": "bearer",
            "expires_in": 86400
        }"#;
        let tokens: super::TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(tokens.installed_app_id.0, "A1");
        assert_eq!(tokens.access_token, "T1");
        assert_eq!(tokens.refresh_token, "R1");
    }
}

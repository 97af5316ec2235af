//! Authenticated calls against the SmartThings REST API.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::Config;
use crate::error::Error;
use crate::types::{InstalledAppId, LocationId, SceneId, ScenePage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the SmartThings platform.
///
/// Wraps one `reqwest::Client` reused for every outbound call; each call is
/// bounded by a 10 second timeout and a timeout surfaces as a recoverable
/// [`Error::Http`].
pub struct PlatformClient {
    pub(crate) config: Config,
    pub(crate) http: reqwest::Client,
}

/// Installed-app record (the subset this app reads).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct InstalledApp {
    pub location_id: LocationId,
}

/// Location record (the subset this app reads).
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct Location {
    pub name: String,
}

impl PlatformClient {
    /// Create a new platform client.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("client with static configuration");
        Self { config, http }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch the installed-app record; carries the location id the
    /// integration was installed into.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Api`] if the
    /// platform rejects the request.
    pub async fn installed_app(
        &self,
        token: &str,
        id: &InstalledAppId,
    ) -> Result<InstalledApp, Error> {
        let url = self.endpoint(&format!("v1/installedapps/{id}"));
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response, "installed-app lookup").await?;
        response.json::<InstalledApp>().await.map_err(Into::into)
    }

    /// Fetch a location record; carries the display name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Api`] if the
    /// platform rejects the request.
    pub async fn location(&self, token: &str, id: &LocationId) -> Result<Location, Error> {
        let url = self.endpoint(&format!("v1/locations/{id}"));
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response, "location lookup").await?;
        response.json::<Location>().await.map_err(Into::into)
    }

    /// List the scenes of a location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Api`] if the
    /// platform rejects the request.
    pub async fn scenes(&self, token: &str, location: &LocationId) -> Result<ScenePage, Error> {
        let mut url = self.endpoint("v1/scenes");
        url.query_pairs_mut()
            .append_pair("locationId", &location.0);
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response, "scene list").await?;
        response.json::<ScenePage>().await.map_err(Into::into)
    }

    /// Execute a scene. The platform's JSON result is passed through as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Api`] if the
    /// platform rejects the request.
    pub async fn execute_scene(
        &self,
        token: &str,
        scene: &SceneId,
    ) -> Result<serde_json::Value, Error> {
        let url = self.endpoint(&format!("v1/scenes/{scene}/execute"));
        let response = self.http.post(url).bearer_auth(token).send().await?;
        let response = Self::ensure_success(response, "scene execution").await?;
        response.json::<serde_json::Value>().await.map_err(Into::into)
    }

    /// Remove the installed app from the platform (uninstall).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] on network failure, or [`Error::Api`] if the
    /// platform rejects the request.
    pub async fn delete_installed_app(
        &self,
        token: &str,
        id: &InstalledAppId,
    ) -> Result<(), Error> {
        let url = self.endpoint(&format!("v1/installedapps/{id}"));
        let response = self.http.delete(url).bearer_auth(token).send().await?;
        Self::ensure_success(response, "installed-app removal").await?;
        Ok(())
    }

    /// Resolve a path relative to the API base.
    fn endpoint(&self, path: &str) -> Url {
        self.config
            .api_base
            .join(path)
            .expect("API base accepts relative paths")
    }

    /// Checks HTTP response status; returns the response on success or an
    /// error carrying the status and body text.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        Err(Error::Api {
            operation,
            status,
            detail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn endpoints_resolve_under_api_base() {
        let client = test_client();
        assert_eq!(
            client.endpoint("v1/scenes").as_str(),
            "https://api.smartthings.com/v1/scenes"
        );
        assert_eq!(
            client
                .endpoint(&format!("v1/installedapps/{}", InstalledAppId::from("A1".to_string())))
                .as_str(),
            "https://api.smartthings.com/v1/installedapps/A1"
        );
    }

    #[test]
    fn installed_app_record_deserializes() {
        let record: InstalledApp = serde_json::from_str(
            r#"{"installedAppId":"A1","locationId":"L1","installedAppType":"API_ONLY"}"#,
        )
        .unwrap();
        assert_eq!(record.location_id.0, "L1");
    }

    #[test]
    fn location_record_deserializes() {
        let record: Location =
            serde_json::from_str(r#"{"locationId":"L1","name":"Home","countryCode":"USA"}"#)
                .unwrap();
        assert_eq!(record.name, "Home");
    }
}

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Platform-assigned installed-app identifier (opaque).
///
/// Created when the integration is installed into a location; every
/// authenticated API call acts on behalf of this installation.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct InstalledAppId(pub String);

/// Platform location identifier (opaque).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct LocationId(pub String);

/// Platform scene identifier (opaque).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct SceneId(pub String);

/// Server-side session identifier (opaque, unguessable).
///
/// The only value the browser ever holds; generated by the session store.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct SessionId(pub String);

/// Authenticated context for one browser session.
///
/// Composed by the OAuth callback after the token exchange and both metadata
/// lookups have succeeded. Every field is mandatory, so a stored context is
/// always immediately usable for API calls; a session is either fully
/// populated or absent, never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub installed_app_id: InstalledAppId,
    pub auth_token: String,
    pub refresh_token: String,
    pub location_id: LocationId,
    pub location_name: String,
}

/// A scene as returned by the platform's scenes list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub scene_id: SceneId,
    pub scene_name: String,
}

/// One page of scenes. The platform omits `items` for an empty location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenePage {
    #[serde(default)]
    pub items: Vec<Scene>,
}

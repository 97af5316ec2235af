#![doc = include_str!("../README.md")]

pub mod api;
pub mod config;
pub mod error;
pub mod oauth;
pub mod session;
pub mod types;
pub mod web;

// Re-exports for convenient access
pub use api::{InstalledApp, Location, PlatformClient};
pub use config::{Config, SCOPE};
pub use error::Error;
pub use oauth::TokenResponse;
pub use session::{MemorySessionStore, SessionStore, StoreError};
pub use types::{
    InstalledAppId, LocationId, Scene, SceneId, ScenePage, SessionContext, SessionId,
};
pub use web::app_router;

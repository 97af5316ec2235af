//! Axum web layer: routes, session cookie plumbing, and HTML views.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use smartthings_scenes::web::CookieSettings;
//! use smartthings_scenes::{Config, MemorySessionStore, PlatformClient, app_router};
//!
//! let config = Config::from_env()?;
//! let app = app_router(
//!     PlatformClient::new(config),
//!     MemorySessionStore::new(),
//!     CookieSettings::from_env()?,
//! );
//! ```

mod cookies;
mod error;
mod routes;
mod state;
mod views;

pub use error::WebError;
pub use routes::app_router;
pub use state::{AppState, CookieSettings};

/// Re-export of the cookie encryption key type.
pub use axum_extra::extract::cookie::Key as CookieKey;

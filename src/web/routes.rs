use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use super::cookies;
use super::error::WebError;
use super::state::{AppState, CookieSettings};
use super::views;
use crate::api::PlatformClient;
use crate::session::SessionStore;
use crate::types::{SceneId, SessionContext};

/// Create the application router.
pub fn app_router<S>(client: PlatformClient, sessions: S, cookies: CookieSettings) -> Router
where
    S: SessionStore,
{
    let state = AppState {
        client: Arc::new(client),
        sessions: Arc::new(sessions),
        cookies,
    };

    Router::new()
        .route("/", get(index::<S>))
        .route("/logout", get(logout::<S>))
        .route("/scenes/{scene_id}", post(execute_scene::<S>))
        .route("/oauth/callback", get(oauth_callback::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the current session, if any. A store fault reads as "no session"
/// so the visitor lands on the login page instead of an opaque 500.
async fn resolve_session<S: SessionStore>(
    state: &AppState<S>,
    jar: &PrivateCookieJar,
) -> Option<SessionContext> {
    let id = cookies::session_id(jar, &state.cookies)?;
    match state.sessions.find(&id).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(error = %e, "session lookup failed");
            None
        }
    }
}

// ── Landing page ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct IndexParams {
    error: Option<String>,
}

async fn index<S: SessionStore>(
    State(state): State<AppState<S>>,
    jar: PrivateCookieJar,
    Query(params): Query<IndexParams>,
) -> Response {
    let Some(context) = resolve_session(&state, &jar).await else {
        let url = state.client.authorization_url();
        return views::login_page(&url, params.error.as_deref()).into_response();
    };

    match state
        .client
        .scenes(&context.auth_token, &context.location_id)
        .await
    {
        Ok(page) => {
            tracing::debug!(count = page.items.len(), "scene list fetched");
            views::scenes_page(&context, "", &page.items).into_response()
        }
        Err(e) => {
            // The page still renders; the failure becomes its error line.
            tracing::warn!(error = %e, "scene list failed");
            views::scenes_page(&context, &e.to_string(), &[]).into_response()
        }
    }
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout<S: SessionStore>(
    State(state): State<AppState<S>>,
    jar: PrivateCookieJar,
) -> (PrivateCookieJar, Redirect) {
    if let Some(id) = cookies::session_id(&jar, &state.cookies) {
        match state.sessions.find(&id).await {
            Ok(Some(context)) => {
                // Best-effort uninstall; the local session goes away either way.
                if let Err(e) = state
                    .client
                    .delete_installed_app(&context.auth_token, &context.installed_app_id)
                    .await
                {
                    tracing::warn!(error = %e, "installed-app removal failed during logout");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "session lookup failed during logout"),
        }

        if let Err(e) = state.sessions.delete(&id).await {
            tracing::warn!(error = %e, "session deletion failed during logout");
        }
    }

    let jar = jar.remove(cookies::clear_session_cookie(&state.cookies));
    (jar, Redirect::to("/"))
}

// ── Scene execution ────────────────────────────────────────────────

async fn execute_scene<S: SessionStore>(
    State(state): State<AppState<S>>,
    jar: PrivateCookieJar,
    Path(scene_id): Path<SceneId>,
) -> Result<Json<serde_json::Value>, WebError> {
    let context = resolve_session(&state, &jar)
        .await
        .ok_or(WebError::Unauthenticated)?;

    let result = state
        .client
        .execute_scene(&context.auth_token, &scene_id)
        .await?;

    tracing::info!(scene_id = %scene_id, "scene executed");
    Ok(Json(result))
}

// ── OAuth callback ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Authorization-code callback: token exchange, metadata completion,
/// session write, redirect to the landing page.
///
/// The three platform calls are strictly sequential and the session is
/// written only after all of them succeed; a failure at any step leaves no
/// session behind and carries an error code back to the login page.
async fn oauth_callback<S: SessionStore>(
    State(state): State<AppState<S>>,
    jar: PrivateCookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(PrivateCookieJar, Redirect), WebError> {
    if let Some(error) = &params.error {
        let desc = params.error_description.as_deref().unwrap_or(error);
        tracing::warn!(error = %error, description = %desc, "authorization denied by platform");
        return Err(WebError::OAuth(desc.to_string()));
    }

    let code = params
        .code
        .ok_or_else(|| WebError::OAuth("missing_code".into()))?;

    let tokens = state.client.exchange_code(&code).await.map_err(|e| {
        tracing::error!(error = %e, "token exchange failed");
        WebError::OAuth("token_exchange_failed".into())
    })?;

    // The token response does not carry the location, so complete the
    // context through the installed-app record.
    let installed_app = state
        .client
        .installed_app(&tokens.access_token, &tokens.installed_app_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "installed-app lookup failed");
            WebError::OAuth("installed_app_lookup_failed".into())
        })?;

    let location = state
        .client
        .location(&tokens.access_token, &installed_app.location_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "location lookup failed");
            WebError::OAuth("location_lookup_failed".into())
        })?;

    let context = SessionContext {
        installed_app_id: tokens.installed_app_id,
        auth_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        location_id: installed_app.location_id,
        location_name: location.name,
    };

    let session_id = state.sessions.create(context).await.map_err(|e| {
        tracing::error!(error = %e, "session creation failed");
        WebError::Store(e.to_string())
    })?;

    let jar = jar.add(cookies::session_cookie(&state.cookies, &session_id));
    tracing::info!("OAuth login successful");

    Ok((jar, Redirect::to("/")))
}

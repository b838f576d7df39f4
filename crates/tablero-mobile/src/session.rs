//! Session gate and teardown for protected views.
//!
//! Protected views resolve their token through [`resolve_session`] before
//! issuing any request: a navigation-supplied token wins and is persisted
//! first, then the stored token, and with neither the caller redirects to
//! the login view.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use tablero_core::util::normalize_text_option;
use tablero_core::PanelApiClient;

use crate::token_store::TokenStore;

/// Outcome of entering a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    /// A usable token; already persisted for the next app start.
    Active(String),
    /// No active session: redirect to login.
    Missing,
}

pub async fn resolve_session(
    store: &TokenStore,
    nav_token: Option<String>,
) -> SessionResolution {
    if let Some(token) = normalize_text_option(nav_token) {
        // Persistence completes before the token is used in this view-entry cycle.
        if let Err(error) = store.save(&token).await {
            tracing::warn!("Failed to persist navigation token: {error}");
        }
        return SessionResolution::Active(token);
    }

    match store.load().await {
        Some(token) => SessionResolution::Active(token),
        None => SessionResolution::Missing,
    }
}

/// Drop a session that the server reported as expired (401 on a protected
/// call). The caller redirects to login afterwards.
pub async fn expire_session(store: &TokenStore) {
    if let Err(error) = store.clear().await {
        tracing::warn!("Failed to clear expired session token: {error}");
    }
}

/// Logout: local teardown happens unconditionally and first; the remote
/// invalidation runs as a detached best-effort task whose failure is logged
/// and otherwise ignored.
pub async fn teardown_session(
    store: &TokenStore,
    client: Option<PanelApiClient>,
    token: Option<String>,
) {
    if let Err(error) = store.clear().await {
        tracing::warn!("Failed to clear stored session token: {error}");
    }

    if let (Some(client), Some(token)) = (client, token) {
        tokio::spawn(async move {
            if let Err(error) = client.logout(&token).await {
                tracing::debug!("Remote logout failed (ignored): {error}");
            }
        });
    }
}

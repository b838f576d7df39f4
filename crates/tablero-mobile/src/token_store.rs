//! Session token persistence with platform-conditional backends.
//!
//! One three-operation contract (`save` / `load` / `clear`) over two
//! backings: the platform secret store on Android, and a single token file
//! under the app data dir everywhere else. The backend is picked once at
//! startup; callers never branch on platform again.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::path::PathBuf;

use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::paths::tablero_data_dir;
use crate::secret_store;

const TOKEN_FILE_NAME: &str = "userToken.txt";
const SECRET_SESSION_TOKEN: &str = "session_token";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Secure storage error: {0}")]
    Secret(String),
    #[error("Token file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Backing store for the single persisted session token.
#[derive(Debug, Clone)]
pub enum TokenStore {
    /// Key-value secret store (Android native keyring).
    Secret,
    /// Single token file at the given path.
    File(PathBuf),
}

impl TokenStore {
    /// Pick the backend for the current platform. Called once at startup.
    #[cfg(target_os = "android")]
    #[must_use]
    pub fn for_platform() -> Self {
        Self::Secret
    }

    /// Pick the backend for the current platform. Called once at startup.
    #[cfg(not(target_os = "android"))]
    #[must_use]
    pub fn for_platform() -> Self {
        Self::File(default_token_path())
    }

    /// Persist the token. The value is durable before this returns.
    pub async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        match self {
            Self::Secret => {
                secret_store::write_secret(SECRET_SESSION_TOKEN, token)
                    .map_err(TokenStoreError::Secret)
            }
            Self::File(path) => {
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let mut file = tokio::fs::File::create(path).await?;
                file.write_all(token.trim().as_bytes()).await?;
                file.sync_all().await?;
                Ok(())
            }
        }
    }

    /// Return the stored token, or `None` when there is none.
    ///
    /// A failed read counts as absent: the caller falls back to the login
    /// flow rather than surfacing a storage error.
    pub async fn load(&self) -> Option<String> {
        match self {
            Self::Secret => match secret_store::read_secret(SECRET_SESSION_TOKEN) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!("Failed to read stored session token: {error}");
                    None
                }
            },
            Self::File(path) => match tokio::fs::read_to_string(path).await {
                Ok(value) => tablero_core::util::normalize_text_option(Some(value)),
                Err(_) => None,
            },
        }
    }

    /// Remove the persisted token. Idempotent.
    pub async fn clear(&self) -> Result<(), TokenStoreError> {
        match self {
            Self::Secret => secret_store::delete_secret(SECRET_SESSION_TOKEN)
                .map_err(TokenStoreError::Secret),
            Self::File(path) => match tokio::fs::remove_file(path).await {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(error) => Err(error.into()),
            },
        }
    }
}

#[cfg(not(target_os = "android"))]
fn default_token_path() -> PathBuf {
    tablero_data_dir().join(TOKEN_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn file_token_survives_a_fresh_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);

        let store = TokenStore::File(path.clone());
        store.save("jwt-token-value").await.unwrap();

        let fresh = TokenStore::File(path);
        assert_eq!(fresh.load().await.as_deref(), Some("jwt-token-value"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn file_load_without_a_token_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::File(dir.path().join(TOKEN_FILE_NAME));

        assert_eq!(store.load().await, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn file_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::File(dir.path().join(TOKEN_FILE_NAME));

        store.save("jwt").await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load().await, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn secret_backend_roundtrip() {
        let store = TokenStore::Secret;

        store.save("secret-jwt").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("secret-jwt"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await, None);
        store.clear().await.unwrap();
    }
}

//! Runtime configuration handling for mobile.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tablero_core::util::{is_http_url, normalize_text_option};

use crate::paths::tablero_data_dir;

const RUNTIME_CONFIG_FILE: &str = "mobile-config.json";

/// Remote panel service used when no override is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://api-control-motor.onrender.com";

/// Which configuration layer supplied the active API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBaseUrlSource {
    RuntimeSettings,
    Environment,
    Bootstrap,
    BuiltinDefault,
}

#[derive(Debug, Clone)]
pub struct ResolvedApiBaseUrl {
    pub base_url: String,
    pub source: ApiBaseUrlSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MobileRuntimeConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

impl MobileRuntimeConfig {
    pub fn from_raw(api_base_url: Option<String>) -> Self {
        Self {
            api_base_url: normalize_text_option(api_base_url),
        }
    }
}

/// Build-time bootstrap values baked in by `build.rs` from the workspace
/// environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MobileBootstrapConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Loads the generated mobile bootstrap JSON from `OUT_DIR`.
pub fn load_bootstrap_config() -> MobileBootstrapConfig {
    let raw = include_str!(concat!(env!("OUT_DIR"), "/mobile-bootstrap.json"));
    serde_json::from_str(raw)
        .unwrap_or_else(|error| panic!("Failed to parse mobile bootstrap config: {error}"))
}

pub fn default_runtime_config_path() -> PathBuf {
    tablero_data_dir().join(RUNTIME_CONFIG_FILE)
}

pub fn load_runtime_config() -> MobileRuntimeConfig {
    load_runtime_config_from_path(&default_runtime_config_path())
}

pub fn load_runtime_config_from_path(path: &Path) -> MobileRuntimeConfig {
    if !path.exists() {
        return MobileRuntimeConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<MobileRuntimeConfig>(&content) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    "Failed to parse mobile runtime config at {}: {}",
                    path.display(),
                    error
                );
                MobileRuntimeConfig::default()
            }
        },
        Err(error) => {
            tracing::warn!(
                "Failed to read mobile runtime config at {}: {}",
                path.display(),
                error
            );
            MobileRuntimeConfig::default()
        }
    }
}

pub fn save_runtime_config(config: &MobileRuntimeConfig) -> std::io::Result<()> {
    save_runtime_config_to_path(config, &default_runtime_config_path())
}

pub fn save_runtime_config_to_path(
    config: &MobileRuntimeConfig,
    path: &Path,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let normalized = MobileRuntimeConfig::from_raw(config.api_base_url.clone());
    let content = serde_json::to_string_pretty(&normalized)
        .map_err(|error| std::io::Error::new(std::io::ErrorKind::InvalidData, error))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the active API base URL: runtime settings file, then process
/// environment, then build-time bootstrap, then the built-in default.
pub fn resolve_api_base_url() -> ResolvedApiBaseUrl {
    resolve_api_base_url_from(
        &load_runtime_config(),
        std::env::var("TABLERO_API_BASE_URL").ok(),
        &load_bootstrap_config(),
    )
}

pub fn resolve_api_base_url_from(
    runtime: &MobileRuntimeConfig,
    env_value: Option<String>,
    bootstrap: &MobileBootstrapConfig,
) -> ResolvedApiBaseUrl {
    if let Some(base_url) = sanitize_base_url(runtime.api_base_url.clone()) {
        return ResolvedApiBaseUrl {
            base_url,
            source: ApiBaseUrlSource::RuntimeSettings,
        };
    }
    if let Some(base_url) = sanitize_base_url(env_value) {
        return ResolvedApiBaseUrl {
            base_url,
            source: ApiBaseUrlSource::Environment,
        };
    }
    if let Some(base_url) = sanitize_base_url(bootstrap.api_base_url.clone()) {
        return ResolvedApiBaseUrl {
            base_url,
            source: ApiBaseUrlSource::Bootstrap,
        };
    }

    ResolvedApiBaseUrl {
        base_url: DEFAULT_API_BASE_URL.to_string(),
        source: ApiBaseUrlSource::BuiltinDefault,
    }
}

/// Overrides without an `http(s)://` scheme are ignored.
fn sanitize_base_url(value: Option<String>) -> Option<String> {
    let value = normalize_text_option(value)?;
    if is_http_url(&value) {
        Some(value)
    } else {
        tracing::warn!("Ignoring API base URL override without http(s) scheme: {value}");
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_raw_normalizes_the_override() {
        let config = MobileRuntimeConfig::from_raw(Some(" https://panel.example.com ".to_string()));
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://panel.example.com")
        );
        assert_eq!(MobileRuntimeConfig::from_raw(Some("   ".to_string())), MobileRuntimeConfig::default());
    }

    #[test]
    fn resolution_order_prefers_runtime_then_env_then_bootstrap() {
        let runtime = MobileRuntimeConfig::from_raw(Some("https://runtime.example.com".to_string()));
        let bootstrap = MobileBootstrapConfig {
            api_base_url: Some("https://bootstrap.example.com".to_string()),
        };

        let resolved = resolve_api_base_url_from(
            &runtime,
            Some("https://env.example.com".to_string()),
            &bootstrap,
        );
        assert_eq!(resolved.base_url, "https://runtime.example.com");
        assert_eq!(resolved.source, ApiBaseUrlSource::RuntimeSettings);

        let resolved = resolve_api_base_url_from(
            &MobileRuntimeConfig::default(),
            Some("https://env.example.com".to_string()),
            &bootstrap,
        );
        assert_eq!(resolved.base_url, "https://env.example.com");
        assert_eq!(resolved.source, ApiBaseUrlSource::Environment);

        let resolved =
            resolve_api_base_url_from(&MobileRuntimeConfig::default(), None, &bootstrap);
        assert_eq!(resolved.base_url, "https://bootstrap.example.com");
        assert_eq!(resolved.source, ApiBaseUrlSource::Bootstrap);
    }

    #[test]
    fn resolution_falls_back_to_the_builtin_default() {
        let resolved = resolve_api_base_url_from(
            &MobileRuntimeConfig::default(),
            None,
            &MobileBootstrapConfig::default(),
        );
        assert_eq!(resolved.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.source, ApiBaseUrlSource::BuiltinDefault);
    }

    #[test]
    fn overrides_without_a_scheme_are_ignored() {
        let runtime = MobileRuntimeConfig::from_raw(Some("panel.example.com".to_string()));
        let resolved = resolve_api_base_url_from(
            &runtime,
            None,
            &MobileBootstrapConfig::default(),
        );
        assert_eq!(resolved.source, ApiBaseUrlSource::BuiltinDefault);
    }

    #[test]
    fn save_and_load_runtime_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(RUNTIME_CONFIG_FILE);

        let config =
            MobileRuntimeConfig::from_raw(Some(" https://runtime.example.com ".to_string()));
        save_runtime_config_to_path(&config, &config_path).unwrap();

        let loaded = load_runtime_config_from_path(&config_path);
        assert_eq!(
            loaded.api_base_url.as_deref(),
            Some("https://runtime.example.com")
        );
    }

    #[test]
    fn unreadable_runtime_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(RUNTIME_CONFIG_FILE);
        std::fs::write(&config_path, "{not json").unwrap();

        assert_eq!(
            load_runtime_config_from_path(&config_path),
            MobileRuntimeConfig::default()
        );
    }
}

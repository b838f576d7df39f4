//! Mobile filesystem path helpers.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static TABLERO_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Shared writable app data directory for Tablero mobile.
///
/// Holds the persisted session token file, the runtime config, and the
/// exported report.
#[must_use]
pub fn tablero_data_dir() -> PathBuf {
    TABLERO_DATA_DIR
        .get_or_init(resolve_tablero_data_dir)
        .clone()
}

fn resolve_tablero_data_dir() -> PathBuf {
    for base in candidate_base_dirs() {
        let candidate = base.join("tablero");
        if ensure_writable_dir(&candidate) {
            tracing::info!("Resolved mobile data directory: {}", candidate.display());
            return candidate;
        }
    }

    std::env::temp_dir().join("tablero")
}

fn candidate_base_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = std::env::var_os("TABLERO_DATA_DIR").map(PathBuf::from) {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_local_dir() {
        candidates.push(path);
    }
    if let Some(path) = dirs::data_dir() {
        candidates.push(path);
    }
    if let Some(path) = std::env::var_os("HOME").map(PathBuf::from) {
        candidates.push(path.join(".local").join("share"));
    }
    candidates.push(std::env::temp_dir());
    candidates
}

fn ensure_writable_dir(path: &Path) -> bool {
    if std::fs::create_dir_all(path).is_err() {
        return false;
    }

    let test_file = path.join(".tablero-write-test");
    let Ok(mut file) = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&test_file)
    else {
        return false;
    };

    if file.write_all(b"ok").is_err() {
        let _ = std::fs::remove_file(&test_file);
        return false;
    }

    let _ = std::fs::remove_file(test_file);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_writable_and_stable() {
        let first = tablero_data_dir();
        assert!(first.ends_with("tablero"));
        assert!(ensure_writable_dir(&first));
        assert_eq!(first, tablero_data_dir());
    }
}

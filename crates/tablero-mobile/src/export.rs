//! Mobile report export helpers.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::path::{Path, PathBuf};

use tablero_core::export::render_readings_export;
use tablero_core::Reading;
use thiserror::Error;

use crate::paths::tablero_data_dir;

const EXPORT_FILE_NAME: &str = "lecturas_sensores.txt";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}

/// Well-known destination of the exported report. Overwritten on each export.
#[must_use]
pub fn default_export_path() -> PathBuf {
    tablero_data_dir().join(EXPORT_FILE_NAME)
}

/// Render readings and write them to the default report path.
pub async fn export_readings(readings: &[Reading]) -> Result<PathBuf, ExportError> {
    let output_path = default_export_path();
    export_readings_to_path(readings, &output_path).await?;
    Ok(output_path)
}

/// Write the rendered report to `output_path`, replacing prior content.
///
/// The destination is never left partially written: the text is staged in a
/// sibling file and moved into place in one rename.
pub async fn export_readings_to_path(
    readings: &[Reading],
    output_path: &Path,
) -> Result<(), ExportError> {
    let rendered = render_readings_export(readings);

    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Staged next to the destination: the rename must not cross filesystems.
    let staged_path = output_path.with_extension("txt.tmp");
    tokio::fs::write(&staged_path, rendered.as_bytes()).await?;
    if let Err(error) = tokio::fs::rename(&staged_path, output_path).await {
        let _ = tokio::fs::remove_file(&staged_path).await;
        return Err(error.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_reading() -> Reading {
        Reading {
            id: 1,
            output_value: 23.5,
            timestamp: "2024-01-01T00:00".to_string(),
            sensor_id: 2,
            user_id: 7,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join(EXPORT_FILE_NAME);

        export_readings_to_path(&[sample_reading()], &output_path)
            .await
            .unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            content,
            "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario\n\
             1, 23.5, 2024-01-01T00:00, 2, 7\n"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_overwrites_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join(EXPORT_FILE_NAME);
        std::fs::write(&output_path, "stale report").unwrap();

        export_readings_to_path(&[], &output_path).await.unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(
            content,
            "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario\n"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn export_leaves_no_staging_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join(EXPORT_FILE_NAME);

        export_readings_to_path(&[sample_reading()], &output_path)
            .await
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![EXPORT_FILE_NAME]);
    }
}

//! Report text rendering shared by the Tablero clients.

use std::fmt::Write as _;

use crate::Reading;

/// Column header line of the exported report, matching the panel service's
/// reading fields in fixed order.
pub const EXPORT_HEADER: &str = "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario";

/// Render readings as comma-separated lines preceded by the header line.
///
/// Deterministic: records are rendered in the order given, one `\n`-terminated
/// line each.
#[must_use]
pub fn render_readings_export(readings: &[Reading]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{EXPORT_HEADER}");
    for reading in readings {
        let _ = writeln!(
            output,
            "{}, {}, {}, {}, {}",
            reading.id, reading.output_value, reading.timestamp, reading.sensor_id, reading.user_id
        );
    }
    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn render_readings_export_matches_fixed_layout() {
        let readings = vec![Reading {
            id: 1,
            output_value: 23.5,
            timestamp: "2024-01-01T00:00".to_string(),
            sensor_id: 2,
            user_id: 7,
        }];

        assert_eq!(
            render_readings_export(&readings),
            "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario\n\
             1, 23.5, 2024-01-01T00:00, 2, 7\n"
        );
    }

    #[test]
    fn render_readings_export_with_no_records_is_header_only() {
        assert_eq!(
            render_readings_export(&[]),
            "ID Lectura, Valor de Salida, Fecha y Hora, ID Sensor, ID Usuario\n"
        );
    }

    #[test]
    fn render_readings_export_keeps_record_order() {
        let readings = vec![
            Reading {
                id: 9,
                output_value: 1.0,
                timestamp: "2024-02-02T10:00".to_string(),
                sensor_id: 1,
                user_id: 3,
            },
            Reading {
                id: 4,
                output_value: 0.25,
                timestamp: "2024-02-02T10:05".to_string(),
                sensor_id: 1,
                user_id: 3,
            },
        ];

        let rendered = render_readings_export(&readings);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        assert_eq!(lines.next(), Some("9, 1, 2024-02-02T10:00, 1, 3"));
        assert_eq!(lines.next(), Some("4, 0.25, 2024-02-02T10:05, 1, 3"));
        assert_eq!(lines.next(), None);
    }
}

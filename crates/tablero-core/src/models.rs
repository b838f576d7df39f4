//! Shared data models for the Tablero clients.

use serde::{Deserialize, Serialize};

/// A remotely controlled binary device exposed by the panel service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorKind {
    Led,
    Motor,
}

impl ActuatorKind {
    /// Command endpoint path on the remote service.
    #[must_use]
    pub const fn command_path(self) -> &'static str {
        match self {
            Self::Led => "/api/controlar_led",
            Self::Motor => "/api/controlar_motor",
        }
    }

    /// Human-readable device label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Led => "LED",
            Self::Motor => "Motor",
        }
    }
}

/// Commanded state of an actuator. Serialized as `"on"` / `"off"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActuatorState {
    On,
    #[default]
    Off,
}

impl ActuatorState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// One sensor reading as returned by `GET /api/lecturas`.
///
/// Immutable once fetched; the service uses Spanish field names on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(rename = "id_lectura")]
    pub id: i64,
    #[serde(rename = "valor_salida")]
    pub output_value: f64,
    #[serde(rename = "fecha_hora")]
    pub timestamp: String,
    #[serde(rename = "id_sensor")]
    pub sensor_id: i64,
    #[serde(rename = "id_usuario")]
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn actuator_kind_maps_to_command_paths() {
        assert_eq!(ActuatorKind::Led.command_path(), "/api/controlar_led");
        assert_eq!(ActuatorKind::Motor.command_path(), "/api/controlar_motor");
    }

    #[test]
    fn actuator_state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ActuatorState::On).unwrap(),
            "\"on\""
        );
        assert_eq!(
            serde_json::to_string(&ActuatorState::Off).unwrap(),
            "\"off\""
        );
    }

    #[test]
    fn reading_deserializes_from_wire_field_names() {
        let payload = r#"
        {
            "id_lectura": 1,
            "valor_salida": 23.5,
            "fecha_hora": "2024-01-01T00:00",
            "id_sensor": 2,
            "id_usuario": 7
        }
        "#;

        let reading: Reading = serde_json::from_str(payload).unwrap();
        assert_eq!(
            reading,
            Reading {
                id: 1,
                output_value: 23.5,
                timestamp: "2024-01-01T00:00".to_string(),
                sensor_id: 2,
                user_id: 7,
            }
        );
    }
}

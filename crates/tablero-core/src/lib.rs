//! tablero-core - Core library for Tablero
//!
//! This crate contains the shared models, the remote panel API client, and
//! the report rendering logic used by the Tablero client shells.

pub mod api;
pub mod export;
pub mod models;
pub mod util;

pub use api::{ApiError, PanelApiClient};
pub use models::{ActuatorKind, ActuatorState, Reading};

//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die zwischen `app` und Binary geteilt werden.

pub mod options;

pub use options::EngineOptions;
pub use options::{CONFIG_FILE_NAME, DEFAULT_EMISSION_STRENGTH, DEFAULT_ENVIRONMENT_STRENGTH};

//! Feature-Handler für AppCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod file_io;
pub mod isolation;
pub mod light_groups;
pub mod options;
pub mod scene;
pub mod toggle;

//! Application-Layer: Engine-Komponenten, Controller, State und Events.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod group_resolver;
pub mod handlers;
mod intent_mapping;
pub mod isolation;
pub mod light_groups;
pub mod report;
pub mod snapshot_store;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Szene, Session, Toggles, Optionen).
pub mod state;
mod suppression;
pub mod toggle;
pub mod use_cases;

pub use command_log::{CommandLog, CommandLogEntry};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use group_resolver::{resolve, GroupDescriptor, KeepSet, NameFilter};
pub use isolation::{IsolationMode, IsolationSession, IsolationTarget, SessionState};
pub use light_groups::LightGroups;
pub use report::{ApplyReport, EngineWarning};
pub use snapshot_store::{SnapshotRecord, SnapshotStore};
pub use state::AppState;
pub use suppression::is_enabled;
pub use toggle::{ToggleController, ToggleDefaults, ToggleOutcome};

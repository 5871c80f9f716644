//! Light Editor Library.
//! Isolations-, Toggle- und Backup/Restore-Engine für Lichter, emissive
//! Materialien und das Environment einer Szene. Als Library exportiert für
//! Tests, Benchmarks und den Headless-Runner.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{
    ApplyReport, AppCommand, AppController, AppIntent, AppState, EngineWarning, GroupDescriptor,
    IsolationMode, IsolationSession, IsolationTarget, KeepSet, LightGroups, NameFilter,
    SnapshotRecord, SnapshotStore, ToggleController,
};
pub use core::{
    EmissiveEntry, EmissiveIndex, EntityId, EnvSocket, LightKind, Material, NodeTree, Scene,
    SceneObject, SearchScope, ShaderNode, SocketValue, World,
};
pub use shared::EngineOptions;

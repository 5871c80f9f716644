use crate::app::isolation::IsolationTarget;
use crate::core::EntityId;
use crate::shared::EngineOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Isolation mit aufgelöster Keep-Menge aktivieren
    ActivateIsolation { target: IsolationTarget },
    /// Aktive Isolation aufheben
    DeactivateIsolation,
    /// Einzelne Entität umschalten
    ToggleEntity { entity: EntityId },
    /// Gruppe umschalten (Key + aufgelöste Mitglieder)
    ToggleGroup { key: String, members: Vec<EntityId> },
    /// Filter-Text setzen
    SetFilter { text: String },
    /// Emissive-Cache verwerfen
    InvalidateEmissiveIndex,
    /// Szene aus JSON-Datei laden
    LoadScene { path: String },
    /// Szene als JSON-Datei speichern
    SaveScene { path: String },
    /// Light-Group anlegen
    AddLightGroup { name: Option<String> },
    /// Light-Group entfernen
    RemoveLightGroup { name: String },
    /// Lichter einer Light-Group zuweisen
    AssignLightGroup {
        group: String,
        lights: Vec<String>,
        include_world: bool,
    },
    /// Light-Group-Zuweisung lösen
    UnassignLightGroup {
        lights: Vec<String>,
        include_world: bool,
    },
    /// Alle Light-Group-Zuweisungen lösen
    ResetLightGroups,
    /// Alle Light-Groups entfernen
    RemoveAllLightGroups,
    /// Exklusive Anzeige umschalten
    ToggleLightGroupExclusive { group: String },
    /// Optionen übernehmen
    ApplyOptions { options: EngineOptions },
}

use crate::app::group_resolver::GroupDescriptor;
use crate::core::{EntityId, EnvSocket};
use crate::shared::EngineOptions;
use serde::{Deserialize, Serialize};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus Panel/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppIntent {
    // ── Isolation ───────────────────────────────────────────────
    /// Einzelnes Licht isolieren (erneut: aufheben)
    IsolateLightRequested { light: String },
    /// Einzelnes Material isolieren (erneut: aufheben)
    IsolateMaterialRequested { material: String },
    /// Gruppe von Lichtern und Emissiven isolieren
    IsolateGroupRequested { group: GroupDescriptor },
    /// Nur die Emissiven einer Gruppe isolieren, alle Lichter aus
    IsolateEmissiveGroupRequested { group: GroupDescriptor },
    /// World isolieren; `side` hält Surface bzw. Volume verbunden
    IsolateEnvironmentRequested {
        #[serde(default)]
        side: Option<EnvSocket>,
    },
    /// Aktive Isolation aufheben
    DeactivateIsolationRequested,

    // ── Toggles ─────────────────────────────────────────────────
    /// Einzelne Entität stumm-/einschalten
    ToggleEntityRequested { entity: EntityId },
    /// Alle Mitglieder einer Gruppe stumm-/einschalten
    ToggleGroupRequested { group: GroupDescriptor },

    // ── Filter ──────────────────────────────────────────────────
    /// Filter-Text geändert
    FilterChanged { text: String },
    /// Filter-Text geleert
    FilterCleared,

    // ── Szene ───────────────────────────────────────────────────
    /// Host meldet strukturelle Szenenänderung (Objekte/Materialien)
    SceneStructureChanged,
    /// Szene aus Datei laden
    SceneLoadRequested { path: String },
    /// Szene in Datei speichern
    SceneSaveRequested { path: String },

    // ── Light Groups ────────────────────────────────────────────
    /// Neue Light-Group anlegen
    LightGroupAddRequested {
        #[serde(default)]
        name: Option<String>,
    },
    /// Light-Group entfernen
    LightGroupRemoveRequested { name: String },
    /// Lichter (und optional die World) einer Gruppe zuweisen
    LightGroupAssignRequested {
        group: String,
        lights: Vec<String>,
        #[serde(default)]
        include_world: bool,
    },
    /// Zuweisung lösen
    LightGroupUnassignRequested {
        lights: Vec<String>,
        #[serde(default)]
        include_world: bool,
    },
    /// Alle Zuweisungen lösen
    LightGroupsResetRequested,
    /// Alle Light-Groups entfernen
    LightGroupsRemoveAllRequested,
    /// Exklusive Anzeige einer Gruppe umschalten
    LightGroupExclusiveToggled { group: String },

    // ── Optionen ────────────────────────────────────────────────
    /// Optionen übernehmen
    OptionsChanged { options: EngineOptions },
}

//! Application State: zentrale Datenhaltung.

use super::group_resolver::{resolve, GroupDescriptor, KeepSet, NameFilter};
use super::isolation::IsolationSession;
use super::light_groups::LightGroups;
use super::report::ApplyReport;
use super::toggle::{ToggleController, ToggleDefaults};
use super::CommandLog;
use crate::core::{EmissiveIndex, Scene};
use crate::shared::EngineOptions;
use std::path::PathBuf;

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktuelle Szene
    pub scene: Scene,
    /// Pfad der zuletzt geladenen Szene
    pub scene_path: Option<PathBuf>,
    /// Cache der emissiven Entitäten
    pub emissive_index: EmissiveIndex,
    /// Isolation-Session (höchstens ein aktives Ziel)
    pub session: IsolationSession,
    /// Einzel- und Gruppen-Toggles
    pub toggles: ToggleController,
    /// Exklusive Light-Group-Anzeige
    pub light_groups: LightGroups,
    /// Laufzeit-Optionen
    pub options: EngineOptions,
    /// Zieldatei für geänderte Optionen (None = nicht persistieren)
    pub options_path: Option<PathBuf>,
    /// Aktueller Filter-Text des Panels
    pub filter_text: String,
    /// Ergebnis des zuletzt ausgeführten Commands
    pub last_report: ApplyReport,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl AppState {
    /// Erstellt einen neuen App-State mit leerer Szene
    pub fn new() -> Self {
        Self::with_options(EngineOptions::default())
    }

    /// Erstellt einen App-State mit den angegebenen Optionen.
    pub fn with_options(options: EngineOptions) -> Self {
        let mut emissive_index = EmissiveIndex::new();
        emissive_index.set_cache_enabled(options.emissive_cache_enabled);
        Self {
            scene: Scene::new(),
            scene_path: None,
            emissive_index,
            session: IsolationSession::new(),
            toggles: ToggleController::new(toggle_defaults(&options)),
            light_groups: LightGroups::new(),
            options,
            options_path: None,
            filter_text: String::new(),
            last_report: ApplyReport::new(),
            command_log: CommandLog::new(),
        }
    }

    /// Ersetzt die Szene. Backups der alten Szene werden verworfen, nicht angewendet.
    pub fn replace_scene(&mut self, mut scene: Scene) {
        scene.sync_light_states();
        self.session.discard();
        self.toggles.clear();
        self.light_groups.discard();
        self.emissive_index.invalidate();
        self.scene = scene;
    }

    /// Übernimmt neue Optionen in alle abhängigen Komponenten.
    pub fn apply_options(&mut self, options: EngineOptions) {
        self.emissive_index
            .set_cache_enabled(options.emissive_cache_enabled);
        self.toggles.set_defaults(toggle_defaults(&options));
        self.options = options;
    }

    /// Filter-Prädikat aus dem aktuellen Filter-Text
    pub fn name_filter(&self) -> NameFilter {
        NameFilter::new(&self.filter_text, self.options.filter_case_insensitive)
    }

    /// Löst eine Gruppe gegen die aktuelle Szene auf (read-only).
    pub fn resolve_group(&self, descriptor: &GroupDescriptor) -> KeepSet {
        let entries = self.emissive_index.lookup(&self.scene);
        resolve(descriptor, &self.scene, &entries, &self.name_filter())
    }

    /// Anzahl Lichter (für Status-Ausgabe)
    pub fn light_count(&self) -> usize {
        self.scene.lights().count()
    }

    /// Anzahl Materialien (für Status-Ausgabe)
    pub fn material_count(&self) -> usize {
        self.scene.material_count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_defaults(options: &EngineOptions) -> ToggleDefaults {
    ToggleDefaults {
        emission_strength: options.default_emission_strength,
        emission_color: options.emission_color(),
        environment_strength: options.default_environment_strength,
    }
}

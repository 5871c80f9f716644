//! Handler für Datei-Operationen (Szene laden und speichern).

use crate::app::use_cases;
use crate::app::AppState;

/// Lädt eine Szene aus dem übergebenen Pfad.
pub fn load(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::scene_io::load_scene_file(state, path)
}

/// Speichert die Szene unter dem übergebenen Pfad.
pub fn save(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    use_cases::scene_io::save_scene_file(state, path)
}

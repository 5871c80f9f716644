//! Use-Case-Funktionen für Szenen-Dateien.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::Scene;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Liest eine Szene aus einer JSON-Datei.
pub fn read_scene(path: &Path) -> anyhow::Result<Scene> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Szene nicht lesbar: {}", path.display()))?;
    let scene: Scene = serde_json::from_str(&content)
        .with_context(|| format!("Szene fehlerhaft: {}", path.display()))?;
    Ok(scene)
}

/// Lädt die Szene in den AppState.
///
/// Backups der vorherigen Szene werden verworfen; die Licht-Zustände werden
/// aus den Hide-Flags abgeleitet.
pub fn load_scene_file(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let scene = read_scene(Path::new(path))?;
    log::info!(
        "Szene geladen: {} Objekte, {} Materialien, World: {}",
        scene.object_count(),
        scene.material_count(),
        scene.world.as_ref().map_or("-", |w| w.name.as_str())
    );
    state.replace_scene(scene);
    state.scene_path = Some(PathBuf::from(path));
    Ok(())
}

/// Schreibt die aktuelle Szene als JSON.
pub fn save_scene_file(state: &mut AppState, path: &str) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(&state.scene)?;
    std::fs::write(path, content).with_context(|| format!("Szene nicht schreibbar: {path}"))?;
    log::info!("Szene gespeichert als: {}", path);
    Ok(())
}

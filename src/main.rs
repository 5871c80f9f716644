//! Light Editor Headless-Runner.
//!
//! Lädt eine Szene (JSON), spielt optional ein Intent-Skript (JSON-Liste von
//! `AppIntent`s) über den Controller ab und gibt die resultierende Szene aus.
//!
//! Aufruf: `light-editor <scene.json> [script.json]`

use anyhow::Context;
use light_editor::{AppController, AppIntent, AppState, EngineOptions};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Light Editor v{} startet...", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let Some(scene_path) = args.next() else {
        anyhow::bail!("Aufruf: light-editor <scene.json> [script.json]");
    };
    let script_path = args.next();

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = EngineOptions::config_path();
    let options = EngineOptions::load_from_file(&config_path);

    let mut state = AppState::with_options(options);
    state.options_path = Some(config_path);
    let mut controller = AppController::new();

    controller.handle_intent(&mut state, AppIntent::SceneLoadRequested { path: scene_path })?;

    if let Some(script_path) = script_path {
        let intents = read_script(Path::new(&script_path))?;
        log::info!("{} Intents aus {} geladen", intents.len(), script_path);
        for intent in intents {
            if let Err(e) = controller.handle_intent(&mut state, intent) {
                log::error!("Event handling failed: {:#}", e);
                continue;
            }
            for warning in &state.last_report.warnings {
                eprintln!("Warnung: {warning}");
            }
        }
    }

    log::info!(
        "Fertig: {} Lichter, {} Materialien, {} Commands, {} Warnungen",
        state.light_count(),
        state.material_count(),
        state.command_log.len(),
        state.command_log.total_warnings()
    );
    println!("{}", serde_json::to_string_pretty(&state.scene)?);

    Ok(())
}

fn read_script(path: &Path) -> anyhow::Result<Vec<AppIntent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Skript konnte nicht gelesen werden: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Skript ist kein gültiges Intent-JSON: {}", path.display()))
}

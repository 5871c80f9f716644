//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EngineOptions;

/// Übernimmt neue Optionen und persistiert sie, falls ein Optionen-Pfad gesetzt ist.
pub fn apply_options(state: &mut AppState, options: EngineOptions) -> anyhow::Result<()> {
    state.apply_options(options);
    match state.options_path.as_deref() {
        Some(path) => state.options.save_to_file(path),
        None => Ok(()),
    }
}

//! Handler für Filter und Szenen-Struktur.

use crate::app::AppState;

/// Setzt den Filter-Text des Panels.
pub fn set_filter(state: &mut AppState, text: String) {
    log::debug!("Filter: '{text}'");
    state.filter_text = text;
}

/// Verwirft den Emissive-Cache nach struktureller Änderung.
pub fn invalidate_emissive_index(state: &mut AppState) {
    state.emissive_index.invalidate();
}

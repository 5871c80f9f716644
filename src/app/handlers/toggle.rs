//! Handler für Einzel- und Gruppen-Toggles.

use crate::app::AppState;
use crate::core::EntityId;

/// Schaltet eine einzelne Entität um.
pub fn toggle_entity(state: &mut AppState, entity: &EntityId) {
    let outcome = state.toggles.toggle(&mut state.scene, entity);
    log::info!(
        "{entity} {}",
        if outcome.enabled { "eingeschaltet" } else { "ausgeschaltet" }
    );
    state.last_report = outcome.report;
}

/// Schaltet alle Mitglieder einer Gruppe um.
pub fn toggle_group(state: &mut AppState, key: &str, members: &[EntityId]) {
    let outcome = state.toggles.toggle_group(&mut state.scene, key, members);
    state.last_report = outcome.report;
}

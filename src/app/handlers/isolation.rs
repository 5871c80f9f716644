//! Handler für Aktivieren und Aufheben der Isolation.

use crate::app::isolation::IsolationTarget;
use crate::app::AppState;

/// Aktiviert ein Isolationsziel (eine aktive Isolation wird vorher aufgehoben).
pub fn activate(state: &mut AppState, target: IsolationTarget) {
    state.last_report = state
        .session
        .activate(&mut state.scene, &mut state.emissive_index, target);
}

/// Hebt die aktive Isolation auf.
pub fn deactivate(state: &mut AppState) {
    if !state.session.is_active(None, None) {
        log::debug!("Keine Isolation aktiv");
    }
    state.last_report = state.session.deactivate(&mut state.scene);
}

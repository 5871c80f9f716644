//! Handler für Render-Light-Groups.

use crate::app::{AppState, IsolationSession, SnapshotStore, ToggleController};

/// Ablagen, die Sichtbarkeits-Records von Lichtern halten können.
fn pending_stores<'a>(
    toggles: &'a mut ToggleController,
    session: &'a mut IsolationSession,
) -> Vec<&'a mut SnapshotStore> {
    let mut stores: Vec<&mut SnapshotStore> = toggles.stores_mut().collect();
    stores.push(session.store_mut());
    stores
}

/// Legt eine Light-Group an.
pub fn add(state: &mut AppState, name: Option<&str>) {
    state.light_groups.add_group(&mut state.scene, name);
}

/// Entfernt eine Light-Group.
pub fn remove(state: &mut AppState, name: &str) {
    let mut pending = pending_stores(&mut state.toggles, &mut state.session);
    state.last_report = state
        .light_groups
        .remove_group(&mut state.scene, name, &mut pending);
}

/// Weist Lichter einer Light-Group zu.
pub fn assign(state: &mut AppState, group: &str, lights: &[String], include_world: bool) {
    let count = state
        .light_groups
        .assign(&mut state.scene, group, lights, include_world);
    log::info!("{count} Zuweisungen zu Light-Group '{group}'");
}

/// Löst die Light-Group-Zuweisung.
pub fn unassign(state: &mut AppState, lights: &[String], include_world: bool) {
    let count = state
        .light_groups
        .unassign(&mut state.scene, lights, include_world);
    log::info!("{count} Zuweisungen gelöst");
}

/// Löst alle Zuweisungen.
pub fn reset_all(state: &mut AppState) {
    state.light_groups.reset_all(&mut state.scene);
}

/// Entfernt alle Light-Groups.
pub fn remove_all(state: &mut AppState) {
    let mut pending = pending_stores(&mut state.toggles, &mut state.session);
    state.last_report = state.light_groups.remove_all(&mut state.scene, &mut pending);
}

/// Schaltet die exklusive Anzeige einer Light-Group um.
pub fn toggle_exclusive(state: &mut AppState, group: &str) {
    let mut pending = pending_stores(&mut state.toggles, &mut state.session);
    state.last_report = state
        .light_groups
        .toggle_exclusive(&mut state.scene, group, &mut pending);
}

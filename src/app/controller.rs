//! Application Controller für zentrale Event-Verarbeitung.

use super::{AppCommand, AppIntent, AppState};

/// Orchestriert Panel-Events und Engine-Operationen auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.last_report = Default::default();
        let logged = command.clone();
        use super::handlers;

        match command {
            // === Isolation ===
            AppCommand::ActivateIsolation { target } => handlers::isolation::activate(state, target),
            AppCommand::DeactivateIsolation => handlers::isolation::deactivate(state),

            // === Toggles ===
            AppCommand::ToggleEntity { entity } => handlers::toggle::toggle_entity(state, &entity),
            AppCommand::ToggleGroup { key, members } => {
                handlers::toggle::toggle_group(state, &key, &members)
            }

            // === Filter & Szene ===
            AppCommand::SetFilter { text } => handlers::scene::set_filter(state, text),
            AppCommand::InvalidateEmissiveIndex => handlers::scene::invalidate_emissive_index(state),
            AppCommand::LoadScene { path } => handlers::file_io::load(state, &path)?,
            AppCommand::SaveScene { path } => handlers::file_io::save(state, &path)?,

            // === Light Groups ===
            AppCommand::AddLightGroup { name } => handlers::light_groups::add(state, name.as_deref()),
            AppCommand::RemoveLightGroup { name } => handlers::light_groups::remove(state, &name),
            AppCommand::AssignLightGroup {
                group,
                lights,
                include_world,
            } => handlers::light_groups::assign(state, &group, &lights, include_world),
            AppCommand::UnassignLightGroup {
                lights,
                include_world,
            } => handlers::light_groups::unassign(state, &lights, include_world),
            AppCommand::ResetLightGroups => handlers::light_groups::reset_all(state),
            AppCommand::RemoveAllLightGroups => handlers::light_groups::remove_all(state),
            AppCommand::ToggleLightGroupExclusive { group } => {
                handlers::light_groups::toggle_exclusive(state, &group)
            }

            // === Optionen ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)?
            }
        }

        state.command_log.record(logged, &state.last_report);
        Ok(())
    }
}

//! Mapping von Panel-Intents auf mutierende App-Commands.

use super::group_resolver::GroupDescriptor;
use super::isolation::{IsolationMode, IsolationTarget};
use super::{AppCommand, AppIntent, AppState};
use crate::core::EnvSocket;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::IsolateLightRequested { light } => isolate_or_release(
            state,
            IsolationMode::SingleLight,
            GroupDescriptor::SingleLight(light),
        ),
        AppIntent::IsolateMaterialRequested { material } => isolate_or_release(
            state,
            IsolationMode::SingleMaterial,
            GroupDescriptor::SingleMaterial(material),
        ),
        AppIntent::IsolateGroupRequested { group } => {
            isolate_or_release(state, IsolationMode::LightGroup, group)
        }
        AppIntent::IsolateEmissiveGroupRequested { group } => {
            isolate_or_release(state, IsolationMode::MaterialGroup, group)
        }
        AppIntent::IsolateEnvironmentRequested { side } => {
            let mode = match side {
                None => IsolationMode::Environment,
                Some(EnvSocket::Surface) => IsolationMode::EnvironmentSurface,
                Some(EnvSocket::Volume) => IsolationMode::EnvironmentVolume,
            };
            if state.session.is_active(Some(mode), None) {
                vec![AppCommand::DeactivateIsolation]
            } else {
                vec![AppCommand::ActivateIsolation {
                    target: IsolationTarget::environment(mode),
                }]
            }
        }
        AppIntent::DeactivateIsolationRequested => vec![AppCommand::DeactivateIsolation],

        AppIntent::ToggleEntityRequested { entity } => vec![AppCommand::ToggleEntity { entity }],
        AppIntent::ToggleGroupRequested { group } => {
            let keep = state.resolve_group(&group);
            vec![AppCommand::ToggleGroup {
                key: group.key(),
                members: keep.all().cloned().collect(),
            }]
        }

        AppIntent::FilterChanged { text } => vec![AppCommand::SetFilter { text }],
        AppIntent::FilterCleared => vec![AppCommand::SetFilter {
            text: String::new(),
        }],

        AppIntent::SceneStructureChanged => vec![AppCommand::InvalidateEmissiveIndex],
        AppIntent::SceneLoadRequested { path } => vec![AppCommand::LoadScene { path }],
        AppIntent::SceneSaveRequested { path } => vec![AppCommand::SaveScene { path }],

        AppIntent::LightGroupAddRequested { name } => vec![AppCommand::AddLightGroup { name }],
        AppIntent::LightGroupRemoveRequested { name } => {
            vec![AppCommand::RemoveLightGroup { name }]
        }
        AppIntent::LightGroupAssignRequested {
            group,
            lights,
            include_world,
        } => vec![AppCommand::AssignLightGroup {
            group,
            lights,
            include_world,
        }],
        AppIntent::LightGroupUnassignRequested {
            lights,
            include_world,
        } => vec![AppCommand::UnassignLightGroup {
            lights,
            include_world,
        }],
        AppIntent::LightGroupsResetRequested => vec![AppCommand::ResetLightGroups],
        AppIntent::LightGroupsRemoveAllRequested => vec![AppCommand::RemoveAllLightGroups],
        AppIntent::LightGroupExclusiveToggled { group } => {
            vec![AppCommand::ToggleLightGroupExclusive { group }]
        }

        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
    }
}

/// Dasselbe Ziel erneut angefordert → aufheben, sonst (neu) aktivieren.
///
/// Die Keep-Menge wird nicht hier aufgelöst: während einer aktiven Isolation
/// ist die Szene unterdrückt, die Auflösung erfolgt erst nach dem Restore.
fn isolate_or_release(
    state: &AppState,
    mode: IsolationMode,
    group: GroupDescriptor,
) -> Vec<AppCommand> {
    if state.session.is_active(Some(mode), Some(&group.key())) {
        return vec![AppCommand::DeactivateIsolation];
    }
    vec![AppCommand::ActivateIsolation {
        target: IsolationTarget::for_group(mode, group, state.name_filter()),
    }]
}

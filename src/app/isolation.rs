//! Isolation-Session: höchstens ein aktives Ziel, eine Snapshot-Ablage.
//!
//! Zustände: `Idle` und `Active(target)`. Eine neue Aktivierung während einer
//! aktiven Session stellt zuerst den alten Zustand vollständig wieder her.

use super::group_resolver::{resolve, GroupDescriptor, KeepSet, NameFilter};
use super::report::ApplyReport;
use super::snapshot_store::SnapshotStore;
use super::suppression::{suppress_input, suppress_light};
use crate::core::{EmissiveIndex, EntityId, EnvSocket, Scene, SearchScope};
use serde::{Deserialize, Serialize};

/// Art des Isolationsziels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IsolationMode {
    /// Ein einzelnes Licht
    SingleLight,
    /// Eine Gruppe von Lichtern (und ggf. Emissiven)
    LightGroup,
    /// Ein einzelnes Material
    SingleMaterial,
    /// Eine Gruppe emissiver Materialien
    MaterialGroup,
    /// World komplett
    Environment,
    /// World, Surface-Seite bleibt verbunden
    EnvironmentSurface,
    /// World, Volume-Seite bleibt verbunden
    EnvironmentVolume,
}

impl IsolationMode {
    /// World-Sockets, deren Kante in diesem Modus getrennt wird.
    pub fn disconnected_env_sockets(&self) -> &'static [EnvSocket] {
        match self {
            IsolationMode::EnvironmentSurface => &[EnvSocket::Volume],
            IsolationMode::EnvironmentVolume => &[EnvSocket::Surface],
            _ => &EnvSocket::ALL,
        }
    }
}

/// Aktives Isolationsziel
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationTarget {
    /// Modus
    pub mode: IsolationMode,
    /// Bezeichner (Licht-, Material- oder Gruppen-Key); None für die World
    pub identifier: Option<String>,
    /// Entitäten, die aktiv bleiben
    pub keep: KeepSet,
    /// Gruppe, aus der `keep` bei der Aktivierung aufgelöst wird
    pub group: Option<GroupDescriptor>,
    /// Namensfilter für die Auflösung von `group`
    pub filter: NameFilter,
}

impl IsolationTarget {
    /// Erstellt ein Ziel mit fester Keep-Menge.
    pub fn new(mode: IsolationMode, identifier: Option<String>, keep: KeepSet) -> Self {
        Self {
            mode,
            identifier,
            keep,
            group: None,
            filter: NameFilter::none(),
        }
    }

    /// Ziel, dessen Keep-Menge erst in `activate` gegen die wiederhergestellte
    /// Szene aufgelöst wird. Der Identifier ist der Gruppen-Key.
    pub fn for_group(mode: IsolationMode, group: GroupDescriptor, filter: NameFilter) -> Self {
        Self {
            mode,
            identifier: Some(group.key()),
            keep: KeepSet::default(),
            group: Some(group),
            filter,
        }
    }

    /// World-Ziel ohne Keep-Menge
    pub fn environment(mode: IsolationMode) -> Self {
        Self::new(mode, None, KeepSet::default())
    }
}

/// Zustand der Session
///
/// `Active` mit leerer Snapshot-Ablage ist möglich: eine Aktivierung, die
/// nichts mutieren musste (alles bereits aus), sichert auch nichts.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    /// Keine Isolation aktiv
    #[default]
    Idle,
    /// Isolation aktiv
    Active(IsolationTarget),
}

/// Isolation-Session mit eigener Snapshot-Ablage
#[derive(Debug, Default)]
pub struct IsolationSession {
    state: SessionState,
    store: SnapshotStore,
}

impl IsolationSession {
    /// Erstellt eine Session im Zustand `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktiviert ein Ziel. Eine bereits aktive Session wird vorher deaktiviert.
    ///
    /// Es wird nur gesichert, was tatsächlich mutiert wird; jeder Record in der
    /// Ablage gehört damit zu einer Mutation dieser Session.
    pub fn activate(
        &mut self,
        scene: &mut Scene,
        index: &mut EmissiveIndex,
        mut target: IsolationTarget,
    ) -> ApplyReport {
        let mut report = self.deactivate(scene);
        let entries = index.find(scene, &SearchScope::VisibleScene);

        if let Some(group) = &target.group {
            let keep = resolve(group, scene, &entries, &target.filter);
            target.keep = match target.mode {
                IsolationMode::MaterialGroup => keep.emissives_only(),
                _ => keep,
            };
        }

        // Lichter
        let light_names: Vec<String> = scene.lights().map(|(name, _)| name.to_string()).collect();
        for name in light_names {
            if target.keep.lights.contains(&EntityId::Light(name.clone())) {
                continue;
            }
            if suppress_light(scene, &name, &mut self.store) {
                report.applied(EntityId::Light(name));
            }
        }

        // Emissive Nodes
        for entry in entries.iter() {
            let Some(id) = entry.entity_id() else {
                continue;
            };
            if target.keep.emissives.contains(&id) || self.store.contains(&id) {
                continue;
            }
            suppress_input(scene, &id, &mut self.store, &mut report);
        }

        // World
        if scene.world_tree().is_some() {
            suppress_input(scene, &EntityId::EnvironmentStrength, &mut self.store, &mut report);
            for env in target.mode.disconnected_env_sockets() {
                suppress_input(
                    scene,
                    &EntityId::EnvironmentSocket(*env),
                    &mut self.store,
                    &mut report,
                );
            }
        }

        log::info!(
            "Isolation aktiviert: {:?} {} ({} Records, {} Warnungen)",
            target.mode,
            target.identifier.as_deref().unwrap_or("-"),
            self.store.len(),
            report.warnings.len()
        );
        self.state = SessionState::Active(target);
        report
    }

    /// Stellt alle gesicherten Zustände wieder her. No-op im Zustand `Idle`.
    pub fn deactivate(&mut self, scene: &mut Scene) -> ApplyReport {
        let SessionState::Active(target) = std::mem::take(&mut self.state) else {
            return ApplyReport::new();
        };
        let report = self.store.restore_all(scene);
        log::info!(
            "Isolation beendet: {:?} ({} wiederhergestellt, {} übersprungen)",
            target.mode,
            report.applied.len(),
            report.skipped.len()
        );
        report
    }

    /// Verwirft die Session ohne Wiederherstellung (die Szene wurde ersetzt).
    pub fn discard(&mut self) {
        if self.is_active(None, None) {
            log::info!("Isolation verworfen ({} Records)", self.store.len());
        }
        self.state = SessionState::Idle;
        self.store.clear();
    }

    /// Seiteneffektfreie Abfrage für die Icon-Anzeige.
    ///
    /// Ohne Argumente: irgendeine Isolation aktiv. Mit Modus: Modus stimmt.
    /// Mit Modus und Identifier: beides stimmt exakt.
    pub fn is_active(&self, mode: Option<IsolationMode>, identifier: Option<&str>) -> bool {
        let SessionState::Active(target) = &self.state else {
            return false;
        };
        match (mode, identifier) {
            (None, _) => true,
            (Some(mode), None) => target.mode == mode,
            (Some(mode), Some(identifier)) => {
                target.mode == mode && target.identifier.as_deref() == Some(identifier)
            }
        }
    }

    /// Modus und Identifier des aktiven Ziels
    pub fn active_info(&self) -> Option<(IsolationMode, Option<&str>)> {
        match &self.state {
            SessionState::Active(target) => Some((target.mode, target.identifier.as_deref())),
            SessionState::Idle => None,
        }
    }

    /// Aktueller Zustand
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Read-only Sicht auf die Snapshot-Ablage
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Ablage für Light-Groups, die ausstehende Sichtbarkeits-Records nachführen.
    pub fn store_mut(&mut self) -> &mut SnapshotStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests;

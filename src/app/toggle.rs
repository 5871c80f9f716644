//! Ad-hoc-Stummschaltung einzelner Entitäten, unabhängig von der Isolation-Session.
//!
//! Backups liegen gruppiert nach Besitzer (Material, Licht, World). Eine leere
//! Besitzer-Ablage wird sofort entfernt: kein Eintrag bedeutet "nichts
//! wiederherzustellen" und steuert so den Icon-Zustand.

use super::report::{ApplyReport, EngineWarning};
use super::snapshot_store::{restore_record, SnapshotStore};
use super::suppression::{enable_with_default, is_enabled, suppress_input, suppress_light};
use crate::core::{EntityId, Scene};
use glam::Vec4;
use indexmap::{IndexMap, IndexSet};

/// Standardwerte für das Einschalten ohne Backup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleDefaults {
    /// Emissions-Stärke
    pub emission_strength: f32,
    /// Emissions-Farbe
    pub emission_color: Vec4,
    /// Stärke des World-Backgrounds
    pub environment_strength: f32,
}

impl Default for ToggleDefaults {
    fn default() -> Self {
        Self {
            emission_strength: 1.0,
            emission_color: Vec4::ONE,
            environment_strength: 1.0,
        }
    }
}

/// Ergebnis eines Toggles
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleOutcome {
    /// Neuer Zustand: `true` = Entität trägt wieder bei
    pub enabled: bool,
    /// Details je Entität
    pub report: ApplyReport,
}

/// Controller für Einzel- und Gruppen-Toggles
#[derive(Debug, Default)]
pub struct ToggleController {
    backups: IndexMap<String, SnapshotStore>,
    muted_groups: IndexSet<String>,
    defaults: ToggleDefaults,
}

impl ToggleController {
    /// Erstellt einen Controller mit den angegebenen Standardwerten.
    pub fn new(defaults: ToggleDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Ersetzt die Standardwerte (z.B. nach Options-Änderung).
    pub fn set_defaults(&mut self, defaults: ToggleDefaults) {
        self.defaults = defaults;
    }

    /// Schaltet eine Entität um.
    ///
    /// Existiert ein Backup, wird es angewendet und entfernt. Sonst wird eine
    /// aktive Entität gesichert und unterdrückt, eine inaktive mit
    /// Standardwerten eingeschaltet.
    pub fn toggle(&mut self, scene: &mut Scene, id: &EntityId) -> ToggleOutcome {
        let mut report = ApplyReport::new();
        let owner = id.owner_key();

        if let Some(record) = self.take_record(&owner, id) {
            restore_record(scene, id, &record, &mut report);
            // Übersprungene oder abgelehnte Restores: tatsächlichen Zustand melden
            let enabled = is_enabled(scene, id);
            log::debug!("{id} Backup angewendet, aktiv: {enabled}");
            return ToggleOutcome { enabled, report };
        }

        if is_enabled(scene, id) {
            let store = self.backups.entry(owner.clone()).or_default();
            let mutated = match id {
                EntityId::Light(name) => {
                    let done = suppress_light(scene, name, store);
                    if done {
                        report.applied(id.clone());
                    }
                    done
                }
                _ => suppress_input(scene, id, store, &mut report),
            };
            if store.is_empty() {
                self.backups.shift_remove(&owner);
            }
            log::debug!("{id} ausgeschaltet (mutiert: {mutated})");
            return ToggleOutcome {
                enabled: !mutated,
                report,
            };
        }

        if matches!(id, EntityId::EnvironmentSocket(_)) {
            report.warn(EngineWarning::NothingToReconnect(id.clone()));
            return ToggleOutcome {
                enabled: false,
                report,
            };
        }

        let strength = match id {
            EntityId::EnvironmentStrength => self.defaults.environment_strength,
            _ => self.defaults.emission_strength,
        };
        let enabled = enable_with_default(
            scene,
            id,
            strength,
            self.defaults.emission_color,
            &mut report,
        );
        log::debug!("{id} mit Standardwert eingeschaltet: {enabled}");
        ToggleOutcome { enabled, report }
    }

    /// Schaltet alle Mitglieder einer Gruppe gemeinsam stumm bzw. wieder ein.
    ///
    /// Stummschalten betrifft jedes aktuell aktive Mitglied, Einschalten jedes
    /// Mitglied mit Backup. Der Zustand wird pro Gruppen-Key geführt.
    pub fn toggle_group(&mut self, scene: &mut Scene, key: &str, ids: &[EntityId]) -> ToggleOutcome {
        let mut report = ApplyReport::new();
        let unmute = self.muted_groups.shift_remove(key);

        for id in ids {
            let wanted = if unmute {
                self.has_record(id)
            } else {
                is_enabled(scene, id)
            };
            if wanted {
                report.merge(self.toggle(scene, id).report);
            }
        }

        if !unmute {
            self.muted_groups.insert(key.to_string());
        }
        log::info!(
            "Gruppe '{key}' {} ({} Entitäten)",
            if unmute { "eingeschaltet" } else { "stummgeschaltet" },
            report.applied.len()
        );
        ToggleOutcome {
            enabled: unmute,
            report,
        }
    }

    /// Hat der Besitzer (z.B. `material:M1`) mindestens ein Backup?
    pub fn is_muted(&self, owner: &str) -> bool {
        self.backups.contains_key(owner)
    }

    /// Ist die Gruppe über `toggle_group` stummgeschaltet?
    pub fn is_group_muted(&self, key: &str) -> bool {
        self.muted_groups.contains(key)
    }

    /// Existiert ein Backup für die Entität?
    pub fn has_record(&self, id: &EntityId) -> bool {
        self.backups
            .get(&id.owner_key())
            .is_some_and(|store| store.contains(id))
    }

    /// Anzahl Besitzer mit Backups
    pub fn owner_count(&self) -> usize {
        self.backups.len()
    }

    /// Alle Backup-Ablagen, für Light-Groups mit ausstehenden Sichtbarkeits-Records.
    pub fn stores_mut(&mut self) -> impl Iterator<Item = &mut SnapshotStore> {
        self.backups.values_mut()
    }

    /// Verwirft alle Backups (neue Szene geladen).
    pub fn clear(&mut self) {
        self.backups.clear();
        self.muted_groups.clear();
    }

    fn take_record(&mut self, owner: &str, id: &EntityId) -> Option<super::snapshot_store::SnapshotRecord> {
        let store = self.backups.get_mut(owner)?;
        let record = store.take(id);
        if store.is_empty() {
            self.backups.shift_remove(owner);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{socket, LightKind, Material, NodeTree, SceneObject, ShaderNode, SocketValue, World};
    use approx::assert_relative_eq;

    fn scene() -> Scene {
        let mut tree = NodeTree::new();
        tree.add_node(ShaderNode::emission("Emission", 5.0, Vec4::ONE));
        tree.add_node(ShaderNode::principled("Principled", Vec4::new(1.0, 0.5, 0.2, 1.0), 2.0));
        tree.add_node(ShaderNode::material_output("Output"));
        tree.add_link("Emission", socket::EMISSION, "Output", socket::SURFACE)
            .unwrap();
        let mut scene = Scene::new();
        scene.add_material(Material::with_nodes("M1", tree));
        scene.add_object(SceneObject::light("L1", LightKind::Spot));
        scene.world = Some(World::with_background("World", 1.0));
        scene
    }

    fn strength_of(scene: &Scene) -> f32 {
        match scene.material_tree("M1").unwrap().input_value("Emission", socket::STRENGTH) {
            Some(SocketValue::Float(v)) => v,
            other => panic!("unerwarteter Wert: {other:?}"),
        }
    }

    #[test]
    fn test_toggle_scalar_twice_restores_value() {
        let mut scene = scene();
        let mut toggles = ToggleController::default();
        let id = EntityId::emission("M1", "Emission", socket::STRENGTH);

        let off = toggles.toggle(&mut scene, &id);
        assert!(!off.enabled);
        assert_relative_eq!(strength_of(&scene), 0.0);
        assert!(toggles.is_muted("material:M1"));

        let on = toggles.toggle(&mut scene, &id);
        assert!(on.enabled);
        assert_relative_eq!(strength_of(&scene), 5.0);
        assert!(!toggles.is_muted("material:M1"));
        assert_eq!(toggles.owner_count(), 0);
    }

    #[test]
    fn test_toggle_linked_socket_removes_and_recreates_edge() {
        let mut scene = scene();
        let mut toggles = ToggleController::default();
        let id = EntityId::emission("M1", "Output", socket::SURFACE);

        toggles.toggle(&mut scene, &id);
        assert!(!scene.material_tree("M1").unwrap().is_linked("Output", socket::SURFACE));

        toggles.toggle(&mut scene, &id);
        let link = scene
            .material_tree("M1")
            .unwrap()
            .incoming("Output", socket::SURFACE)
            .unwrap();
        assert_eq!(link.from_node, "Emission");
    }

    #[test]
    fn test_skipped_restore_reports_actual_state() {
        let mut scene = scene();
        let mut toggles = ToggleController::default();
        let id = EntityId::emission("M1", "Emission", socket::STRENGTH);
        toggles.toggle(&mut scene, &id);
        scene.material_tree_mut("M1").unwrap().remove_node("Emission");

        let outcome = toggles.toggle(&mut scene, &id);

        assert!(!outcome.enabled);
        assert_eq!(outcome.report.skipped, vec![id.clone()]);
        assert!(!toggles.has_record(&id));
    }

    #[test]
    fn test_toggle_on_without_record_uses_default() {
        let mut scene = scene();
        scene
            .material_tree_mut("M1")
            .unwrap()
            .set_input_value("Emission", socket::STRENGTH, SocketValue::Float(0.0))
            .unwrap();
        let mut toggles = ToggleController::new(ToggleDefaults {
            emission_strength: 3.5,
            ..ToggleDefaults::default()
        });

        let outcome = toggles.toggle(&mut scene, &EntityId::emission("M1", "Emission", socket::STRENGTH));

        assert!(outcome.enabled);
        assert_relative_eq!(strength_of(&scene), 3.5);
        assert_eq!(toggles.owner_count(), 0);
    }

    #[test]
    fn test_color_socket_zeroes_to_opaque_black() {
        let mut scene = scene();
        let mut toggles = ToggleController::default();
        let id = EntityId::emission("M1", "Principled", socket::EMISSION_COLOR);

        toggles.toggle(&mut scene, &id);
        assert_eq!(
            scene.material_tree("M1").unwrap().input_value("Principled", socket::EMISSION_COLOR),
            Some(SocketValue::Color(Vec4::new(0.0, 0.0, 0.0, 1.0)))
        );

        toggles.toggle(&mut scene, &id);
        assert_eq!(
            scene.material_tree("M1").unwrap().input_value("Principled", socket::EMISSION_COLOR),
            Some(SocketValue::Color(Vec4::new(1.0, 0.5, 0.2, 1.0)))
        );
    }

    #[test]
    fn test_unlinked_env_socket_without_record_warns() {
        let mut scene = scene();
        let mut toggles = ToggleController::default();

        let outcome = toggles.toggle(&mut scene, &EntityId::EnvironmentSocket(crate::core::EnvSocket::Volume));

        assert!(!outcome.enabled);
        assert_eq!(outcome.report.warnings.len(), 1);
    }

    #[test]
    fn test_toggle_group_mutes_and_restores_members() {
        let mut scene = scene();
        scene.add_object(SceneObject::light("L2", LightKind::Spot));
        scene.light_mut("L2").unwrap().set_enabled(false);
        let before = scene.clone();
        let mut toggles = ToggleController::default();
        let ids = vec![EntityId::Light("L1".into()), EntityId::Light("L2".into())];

        let muted = toggles.toggle_group(&mut scene, "kind_SPOT", &ids);
        assert!(!muted.enabled);
        assert!(toggles.is_group_muted("kind_SPOT"));
        assert!(!scene.light("L1").unwrap().enabled);
        assert!(!toggles.has_record(&EntityId::Light("L2".into())));

        let unmuted = toggles.toggle_group(&mut scene, "kind_SPOT", &ids);
        assert!(unmuted.enabled);
        assert_eq!(scene, before);
        assert_eq!(toggles.owner_count(), 0);
    }
}

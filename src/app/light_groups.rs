//! Render-Light-Groups des View-Layers: Anlegen, Zuweisen und exklusive Anzeige.
//!
//! Die Gruppennamen leben in `Scene::light_groups`, die Zuweisung am Licht
//! bzw. an der World. Exklusive Anzeige blendet alle anderen Lichter im
//! Viewport aus und sichert nur deren vorheriges `hide_viewport`.
//!
//! Hält eine andere Ablage (Isolation, Toggle) bereits das vollständige
//! Sichtbarkeits-Tripel eines Lichts, wird `hide_viewport` in diesem Record
//! gelesen und geschrieben statt am Licht. So stellt jede Ebene genau ihren
//! eigenen Anteil wieder her, unabhängig von der Reihenfolge.

use super::report::{ApplyReport, EngineWarning};
use super::snapshot_store::{restore_record, SnapshotRecord, SnapshotStore};
use crate::core::{EntityId, Scene};

/// Name des Sammel-Buckets für nicht zugewiesene Lichter
pub const NOT_ASSIGNED: &str = "Not Assigned";

/// Basisname neuer Gruppen
const NEW_GROUP: &str = "NewGroup";

/// Verwaltung der exklusiven Light-Group-Anzeige
#[derive(Debug, Default)]
pub struct LightGroups {
    exclusive: Option<String>,
    hidden: SnapshotStore,
}

impl LightGroups {
    /// Erstellt eine Verwaltung ohne exklusive Gruppe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt eine Gruppe an und liefert den (eindeutigen) Namen.
    ///
    /// Ohne Namen wird `NewGroup`, `NewGroup.001`, … vergeben.
    pub fn add_group(&mut self, scene: &mut Scene, name: Option<&str>) -> String {
        let base = name.map(str::trim).filter(|n| !n.is_empty()).unwrap_or(NEW_GROUP);
        let mut candidate = base.to_string();
        let mut suffix = 0;
        while scene.light_groups.iter().any(|g| g == &candidate) {
            suffix += 1;
            candidate = format!("{base}.{suffix:03}");
        }
        scene.light_groups.push(candidate.clone());
        log::info!("Light-Group '{candidate}' angelegt");
        candidate
    }

    /// Entfernt eine Gruppe; zugewiesene Lichter werden vorher gelöst.
    pub fn remove_group(
        &mut self,
        scene: &mut Scene,
        name: &str,
        pending: &mut [&mut SnapshotStore],
    ) -> ApplyReport {
        let mut report = ApplyReport::new();
        let Some(pos) = scene.light_groups.iter().position(|g| g == name) else {
            return report;
        };
        if self.exclusive.as_deref() == Some(name) {
            report = self.release(scene, pending);
        }
        for object in scene.objects.values_mut() {
            if let Some(light) = object.as_light_mut() {
                if light.light_group == name {
                    light.light_group.clear();
                }
            }
        }
        scene.light_groups.remove(pos);
        log::info!("Light-Group '{name}' entfernt");
        report
    }

    /// Weist Lichter (und optional die World) einer Gruppe zu. Liefert die Anzahl Zuweisungen.
    pub fn assign(&mut self, scene: &mut Scene, group: &str, lights: &[String], include_world: bool) -> usize {
        if !scene.light_groups.iter().any(|g| g == group) {
            log::warn!("Light-Group '{group}' existiert nicht");
            return 0;
        }
        let mut count = 0;
        for name in lights {
            if let Some(light) = scene.light_mut(name) {
                light.light_group = group.to_string();
                count += 1;
            }
        }
        if include_world {
            if let Some(world) = scene.world.as_mut() {
                world.light_group = group.to_string();
                count += 1;
            }
        }
        count
    }

    /// Löst die Zuweisung von Lichtern (und optional der World).
    pub fn unassign(&mut self, scene: &mut Scene, lights: &[String], include_world: bool) -> usize {
        let mut count = 0;
        for name in lights {
            if let Some(light) = scene.light_mut(name) {
                if !light.light_group.is_empty() {
                    light.light_group.clear();
                    count += 1;
                }
            }
        }
        if include_world {
            if let Some(world) = scene.world.as_mut() {
                world.light_group.clear();
                count += 1;
            }
        }
        count
    }

    /// Löst alle Zuweisungen, die Gruppen selbst bleiben bestehen.
    pub fn reset_all(&mut self, scene: &mut Scene) {
        for object in scene.objects.values_mut() {
            if let Some(light) = object.as_light_mut() {
                light.light_group.clear();
            }
        }
        if let Some(world) = scene.world.as_mut() {
            world.light_group.clear();
        }
    }

    /// Entfernt alle Gruppen inklusive Zuweisungen.
    pub fn remove_all(&mut self, scene: &mut Scene, pending: &mut [&mut SnapshotStore]) -> ApplyReport {
        let report = self.release(scene, pending);
        self.reset_all(scene);
        scene.light_groups.clear();
        report
    }

    /// Schaltet die exklusive Anzeige einer Gruppe um.
    ///
    /// Alle Lichter außerhalb der Gruppe werden im Viewport ausgeblendet. Eine
    /// andere exklusive Gruppe wird vorher aufgehoben. `pending` sind die
    /// Ablagen, deren Licht-Records beim Restore Vorrang vor dem Licht haben.
    pub fn toggle_exclusive(
        &mut self,
        scene: &mut Scene,
        group: &str,
        pending: &mut [&mut SnapshotStore],
    ) -> ApplyReport {
        let was_this = self.exclusive.as_deref() == Some(group);
        let mut report = self.release(scene, pending);
        if was_this {
            return report;
        }

        let names: Vec<String> = scene
            .lights()
            .filter(|(_, light)| light.light_group != group)
            .map(|(name, _)| name.to_string())
            .collect();
        for name in names {
            let id = EntityId::Light(name.clone());
            let target = match pending_viewport(pending, &id) {
                Some(recorded) => recorded,
                None => match scene.light_mut(&name) {
                    Some(light) => &mut light.hide_viewport,
                    None => continue,
                },
            };
            let previous = std::mem::replace(target, true);
            if previous {
                continue;
            }
            self.hidden.save(id.clone(), SnapshotRecord::ViewportHidden { hide_viewport: previous });
            report.applied(id);
        }
        log::info!("Light-Group '{group}' exklusiv ({} Lichter ausgeblendet)", self.hidden.len());
        self.exclusive = Some(group.to_string());
        report
    }

    /// Aktuell exklusive Gruppe
    pub fn exclusive(&self) -> Option<&str> {
        self.exclusive.as_deref()
    }

    /// Gruppen mit ihren Mitgliedern, gefolgt vom Bucket "Not Assigned".
    ///
    /// Aufgelistet werden Lichter, die im Render sichtbar sind, sowie die World.
    pub fn groups_with_members(&self, scene: &Scene) -> Vec<(String, Vec<String>)> {
        let members_of = |group: &str| -> Vec<String> {
            let mut members: Vec<String> = scene
                .lights()
                .filter(|(_, light)| !light.hide_render && light.light_group == group)
                .map(|(name, _)| name.to_string())
                .collect();
            if let Some(world) = scene.world.as_ref().filter(|w| w.light_group == group) {
                members.push(world.name.clone());
            }
            members
        };

        let mut groups: Vec<(String, Vec<String>)> = scene
            .light_groups
            .iter()
            .map(|group| (group.clone(), members_of(group)))
            .collect();
        let unassigned = members_of("");
        if !unassigned.is_empty() {
            groups.push((NOT_ASSIGNED.to_string(), unassigned));
        }
        groups
    }

    /// Verwirft den exklusiven Zustand ohne Wiederherstellung (neue Szene).
    pub fn discard(&mut self) {
        self.exclusive = None;
        self.hidden.clear();
    }

    fn release(&mut self, scene: &mut Scene, pending: &mut [&mut SnapshotStore]) -> ApplyReport {
        let mut report = ApplyReport::new();
        let Some(previous) = self.exclusive.take() else {
            return report;
        };
        log::info!("Exklusive Anzeige von '{previous}' aufgehoben");
        for (id, record) in self.hidden.drain() {
            let SnapshotRecord::ViewportHidden { hide_viewport } = record else {
                report.warn(EngineWarning::RecordMismatch(id));
                continue;
            };
            match pending_viewport(pending, &id) {
                Some(recorded) => {
                    *recorded = hide_viewport;
                    report.applied(id);
                }
                None => restore_record(scene, &id, &record, &mut report),
            }
        }
        report
    }
}

/// `hide_viewport` aus einem ausstehenden Sichtbarkeits-Record einer anderen Ablage.
fn pending_viewport<'a>(pending: &'a mut [&mut SnapshotStore], id: &EntityId) -> Option<&'a mut bool> {
    pending.iter_mut().find_map(|store| match store.get_mut(id) {
        Some(SnapshotRecord::LightVisibility { hide_viewport, .. }) => Some(hide_viewport),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LightKind, SceneObject, World};

    fn scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::light("Key", LightKind::Area));
        scene.add_object(SceneObject::light("Fill", LightKind::Area));
        scene.add_object(SceneObject::light("Rim", LightKind::Spot));
        scene.world = Some(World::with_background("World", 1.0));
        scene
    }

    #[test]
    fn test_add_group_generates_unique_names() {
        let mut scene = scene();
        let mut groups = LightGroups::new();
        assert_eq!(groups.add_group(&mut scene, None), "NewGroup");
        assert_eq!(groups.add_group(&mut scene, None), "NewGroup.001");
        assert_eq!(groups.add_group(&mut scene, Some("Front")), "Front");
        assert_eq!(groups.add_group(&mut scene, Some("NewGroup")), "NewGroup.002");
    }

    #[test]
    fn test_assign_and_list_members() {
        let mut scene = scene();
        let mut groups = LightGroups::new();
        let front = groups.add_group(&mut scene, Some("Front"));

        let count = groups.assign(&mut scene, &front, &["Key".into(), "Fill".into()], true);

        assert_eq!(count, 3);
        let listing = groups.groups_with_members(&scene);
        assert_eq!(
            listing,
            vec![
                ("Front".to_string(), vec!["Key".to_string(), "Fill".into(), "World".into()]),
                (NOT_ASSIGNED.to_string(), vec!["Rim".to_string()]),
            ]
        );
    }

    #[test]
    fn test_remove_group_unassigns_members() {
        let mut scene = scene();
        let mut groups = LightGroups::new();
        let front = groups.add_group(&mut scene, Some("Front"));
        groups.assign(&mut scene, &front, &["Key".into()], false);

        groups.remove_group(&mut scene, &front, &mut []);

        assert!(scene.light_groups.is_empty());
        assert!(scene.light("Key").unwrap().light_group.is_empty());
    }

    #[test]
    fn test_toggle_exclusive_hides_and_restores() {
        let mut scene = scene();
        scene.light_mut("Rim").unwrap().hide_render = true;
        let before = scene.clone();
        let mut groups = LightGroups::new();
        let front = groups.add_group(&mut scene, Some("Front"));
        let back = groups.add_group(&mut scene, Some("Back"));
        groups.assign(&mut scene, &front, &["Key".into()], false);
        groups.assign(&mut scene, &back, &["Fill".into()], false);

        groups.toggle_exclusive(&mut scene, &front, &mut []);
        assert!(!scene.light("Key").unwrap().hide_viewport);
        assert!(scene.light("Fill").unwrap().hide_viewport);
        assert!(scene.light("Rim").unwrap().hide_viewport);

        groups.toggle_exclusive(&mut scene, &back, &mut []);
        assert_eq!(groups.exclusive(), Some("Back"));
        assert!(scene.light("Key").unwrap().hide_viewport);
        assert!(!scene.light("Fill").unwrap().hide_viewport);

        groups.toggle_exclusive(&mut scene, &back, &mut []);
        assert_eq!(groups.exclusive(), None);
        groups.remove_all(&mut scene, &mut []);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_exclusive_release_writes_into_pending_visibility_record() {
        let mut scene = scene();
        let before = scene.clone();
        let mut groups = LightGroups::new();
        let front = groups.add_group(&mut scene, Some("Front"));
        groups.assign(&mut scene, &front, &["Key".into()], false);
        let before_groups = scene.clone();

        groups.toggle_exclusive(&mut scene, &front, &mut []);
        let mut isolation = SnapshotStore::new();
        let fill = scene.light_mut("Fill").unwrap();
        isolation.save(
            EntityId::Light("Fill".into()),
            SnapshotRecord::LightVisibility {
                enabled: fill.enabled,
                hide_viewport: fill.hide_viewport,
                hide_render: fill.hide_render,
            },
        );
        fill.set_enabled(false);

        let report = groups.toggle_exclusive(&mut scene, &front, &mut [&mut isolation]);

        assert!(report.is_clean());
        assert!(!scene.light("Fill").unwrap().enabled);
        assert!(!scene.light("Rim").unwrap().hide_viewport);
        isolation.restore_all(&mut scene);
        assert_eq!(scene, before_groups);
        groups.remove_all(&mut scene, &mut []);
        assert_eq!(scene, before);
    }

    #[test]
    fn test_exclusive_over_pending_record_leaves_suppressed_light_alone() {
        let mut scene = scene();
        let mut groups = LightGroups::new();
        let front = groups.add_group(&mut scene, Some("Front"));
        groups.assign(&mut scene, &front, &["Key".into()], false);
        let before = scene.clone();
        let mut isolation = SnapshotStore::new();
        isolation.save(
            EntityId::Light("Fill".into()),
            SnapshotRecord::LightVisibility {
                enabled: true,
                hide_viewport: false,
                hide_render: false,
            },
        );
        scene.light_mut("Fill").unwrap().set_enabled(false);

        groups.toggle_exclusive(&mut scene, &front, &mut [&mut isolation]);

        assert!(scene.light("Fill").unwrap().hide_render);
        assert_eq!(
            isolation.get(&EntityId::Light("Fill".into())),
            Some(&SnapshotRecord::LightVisibility {
                enabled: true,
                hide_viewport: true,
                hide_render: false,
            })
        );

        isolation.restore_all(&mut scene);
        let fill = scene.light("Fill").unwrap();
        assert!(fill.enabled && fill.hide_viewport && !fill.hide_render);

        groups.toggle_exclusive(&mut scene, &front, &mut []);
        assert_eq!(scene, before);
    }
}

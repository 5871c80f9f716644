//! Geschlüsselte Ablage von Snapshot-Records (ein Record pro Entität).
//!
//! Wird von der Isolation-Session und vom ToggleController verwendet. Ein
//! Record wird in dem Moment aus der Ablage entfernt, in dem er angewendet
//! wird; ein doppeltes Anwenden ist damit ausgeschlossen.

use super::report::{ApplyReport, EngineWarning};
use super::suppression::{socket_of, tree_of_mut};
use crate::core::{EntityId, GraphError, Scene, SocketValue};
use indexmap::IndexMap;

/// Minimale Information, um eine Unterdrückung rückgängig zu machen
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotRecord {
    /// Sichtbarkeits-Tripel eines Lichts
    LightVisibility {
        enabled: bool,
        hide_viewport: bool,
        hide_render: bool,
    },
    /// Nur die Viewport-Sichtbarkeit eines Lichts (exklusive Light-Group-Anzeige)
    ViewportHidden { hide_viewport: bool },
    /// Socket war unverbunden; der Wert wurde überschrieben
    ScalarValue { value: SocketValue },
    /// Socket war verbunden; die eingehende Kante wurde entfernt
    EdgeRef { from_node: String, from_socket: String },
}

/// Snapshot-Ablage in Einfügereihenfolge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotStore {
    records: IndexMap<EntityId, SnapshotRecord>,
}

impl SnapshotStore {
    /// Erstellt eine leere Ablage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Speichert einen Record; ein vorhandener Record derselben Entität wird überschrieben.
    pub fn save(&mut self, id: EntityId, record: SnapshotRecord) {
        self.records.insert(id, record);
    }

    /// Gespeicherter Record einer Entität
    pub fn get(&self, id: &EntityId) -> Option<&SnapshotRecord> {
        self.records.get(id)
    }

    /// Prüft ob für die Entität ein Record existiert.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.records.contains_key(id)
    }

    /// Veränderbarer Zugriff auf einen gespeicherten Record
    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut SnapshotRecord> {
        self.records.get_mut(id)
    }

    /// Entnimmt alle Records in Einfügereihenfolge, ohne sie anzuwenden.
    pub fn drain(&mut self) -> impl Iterator<Item = (EntityId, SnapshotRecord)> + '_ {
        self.records.drain(..)
    }

    /// Entnimmt den Record einer Entität.
    pub fn take(&mut self, id: &EntityId) -> Option<SnapshotRecord> {
        self.records.shift_remove(id)
    }

    /// Anzahl Records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true`, wenn keine Records vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterator über alle gesicherten Entitäten.
    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.records.keys()
    }

    /// Verwirft alle Records ohne sie anzuwenden.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Wendet alle Records an und leert dabei die Ablage.
    ///
    /// Jeder Record wird vor dem Anwenden entnommen. Der Report enthält jede
    /// entnommene Entität in genau einer Liste (applied, skipped oder warnings).
    pub fn restore_all(&mut self, scene: &mut Scene) -> ApplyReport {
        let mut report = ApplyReport::new();
        while let Some((id, record)) = self.records.shift_remove_index(0) {
            restore_record(scene, &id, &record, &mut report);
        }
        report
    }
}

/// Schreibt einen einzelnen Record in die Szene zurück.
///
/// - LightVisibility: alle drei Felder unverändert zurück
/// - ViewportHidden: nur `hide_viewport`
/// - ScalarValue: nur wenn Node und Socket noch existieren
/// - EdgeRef: nur wenn der Ziel-Socket aktuell unverbunden ist
pub fn restore_record(
    scene: &mut Scene,
    id: &EntityId,
    record: &SnapshotRecord,
    report: &mut ApplyReport,
) {
    match (id, record) {
        (
            EntityId::Light(name),
            SnapshotRecord::LightVisibility {
                enabled,
                hide_viewport,
                hide_render,
            },
        ) => match scene.light_mut(name) {
            Some(light) => {
                light.enabled = *enabled;
                light.hide_viewport = *hide_viewport;
                light.hide_render = *hide_render;
                report.applied(id.clone());
            }
            None => report.skip(id.clone(), "Licht existiert nicht mehr"),
        },
        (EntityId::Light(name), SnapshotRecord::ViewportHidden { hide_viewport }) => {
            match scene.light_mut(name) {
                Some(light) => {
                    light.hide_viewport = *hide_viewport;
                    report.applied(id.clone());
                }
                None => report.skip(id.clone(), "Licht existiert nicht mehr"),
            }
        }
        (EntityId::Light(_), _)
        | (_, SnapshotRecord::LightVisibility { .. } | SnapshotRecord::ViewportHidden { .. }) => {
            report.warn(EngineWarning::RecordMismatch(id.clone()));
        }
        (_, SnapshotRecord::ScalarValue { value }) => {
            let Some(target) = socket_of(scene, id) else {
                report.skip(id.clone(), "Node oder Socket existiert nicht mehr");
                return;
            };
            let Some(tree) = tree_of_mut(scene, id) else {
                return;
            };
            match tree.set_input_value(&target.node, &target.socket, *value) {
                Ok(_) => report.applied(id.clone()),
                Err(err) => report.graph_error(id.clone(), err),
            }
        }
        (
            _,
            SnapshotRecord::EdgeRef {
                from_node,
                from_socket,
            },
        ) => {
            let Some(target) = socket_of(scene, id) else {
                report.skip(id.clone(), "Ziel-Socket existiert nicht mehr");
                return;
            };
            let Some(tree) = tree_of_mut(scene, id) else {
                return;
            };
            if tree.is_linked(&target.node, &target.socket) {
                report.skip(id.clone(), "Socket wurde zwischenzeitlich neu verbunden");
                return;
            }
            match tree.add_link(from_node, from_socket, &target.node, &target.socket) {
                Ok(()) => report.applied(id.clone()),
                Err(GraphError::UnknownNode(_)) => {
                    report.skip(id.clone(), "Quell-Node existiert nicht mehr");
                }
                Err(err) => report.graph_error(id.clone(), err),
            }
        }
    }
}

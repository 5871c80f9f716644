//! Cache der aktuell emissiven (Objekt, Material, Node)-Tripel einer Szene.
//!
//! Der Fingerprint besteht nur aus Zählern (Materialien, Objekte) und der
//! Scope-Identität (View-Layer). Das ist bewusst grob: Wertänderungen an
//! Sockets invalidieren den Cache nicht, der Index ist jederzeit aus dem
//! Graph neu ableitbar.

use super::entity::EntityId;
use super::graph_walker::{find_all_emission_nodes, is_emissive_output, material_entry, node_emits};
use super::scene::{ObjectData, Scene};
use std::collections::HashSet;
use std::sync::Arc;

/// Ein emissiver Node eines Materials, gefunden über ein Objekt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmissiveEntry {
    /// Erstes Objekt, das dieses Material verwendet
    pub object: String,
    /// Materialname
    pub material: String,
    /// Name des emissionsfähigen Nodes
    pub node: String,
    /// Steuernder Input-Socket (Strength bzw. Emission Color)
    pub control_socket: Option<String>,
}

impl EmissiveEntry {
    /// Entitäts-ID des steuernden Inputs (None ohne steuernden Socket).
    pub fn entity_id(&self) -> Option<EntityId> {
        self.control_socket
            .as_deref()
            .map(|socket| EntityId::emission(&self.material, &self.node, socket))
    }
}

/// Suchbereich
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// Alle Objekte des aktiven View-Layers (gecacht)
    VisibleScene,
    /// Explizite Objektliste (nie gecacht)
    Objects(Vec<String>),
}

/// Cache-Schlüssel: (View-Layer, Material-Anzahl, Objekt-Anzahl)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Fingerprint {
    scope: String,
    material_count: usize,
    object_count: usize,
}

impl Fingerprint {
    fn of(scene: &Scene) -> Self {
        Self {
            scope: scene.view_layer.clone(),
            material_count: scene.material_count(),
            object_count: scene.object_count(),
        }
    }
}

/// Emissive-Index mit Fingerprint-Cache
///
/// Gehalten wird nur das Ergebnis des zuletzt gesehenen Fingerprints. Ein
/// älterer Fingerprint kann zufällig wiederkehren und darf dann keine Liste
/// einer anderen Szene liefern.
#[derive(Debug, Default)]
pub struct EmissiveIndex {
    cache: Option<(Fingerprint, Arc<Vec<EmissiveEntry>>)>,
    enabled: bool,
}

impl EmissiveIndex {
    /// Erstellt einen leeren Index mit aktivem Cache.
    pub fn new() -> Self {
        Self {
            cache: None,
            enabled: true,
        }
    }

    /// Aktiviert oder deaktiviert das Caching (deaktivieren leert den Cache).
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cache = None;
        }
    }

    /// Findet alle emissiven Entitäten im Scope.
    ///
    /// Ein Cache-Treffer liefert dasselbe `Arc` zurück. Explizite Objektlisten
    /// umgehen den Cache vollständig, damit Teilmengen ihn nicht verfälschen.
    pub fn find(&mut self, scene: &Scene, scope: &SearchScope) -> Arc<Vec<EmissiveEntry>> {
        match scope {
            SearchScope::Objects(names) => {
                Arc::new(collect_entries(scene, names.iter().map(String::as_str)))
            }
            SearchScope::VisibleScene => {
                if !self.enabled {
                    return Arc::new(collect_entries(scene, scene.objects.keys().map(String::as_str)));
                }
                let key = Fingerprint::of(scene);
                if let Some(hit) = self.hit(&key) {
                    log::debug!("Emissive-Index: Cache-Treffer ({} Einträge)", hit.len());
                    return Arc::clone(hit);
                }
                let entries = Arc::new(collect_entries(
                    scene,
                    scene.objects.keys().map(String::as_str),
                ));
                log::debug!(
                    "Emissive-Index neu berechnet: {} Einträge ({} Materialien, {} Objekte)",
                    entries.len(),
                    key.material_count,
                    key.object_count
                );
                self.cache = Some((key, Arc::clone(&entries)));
                entries
            }
        }
    }

    /// Read-only Variante von `find` für die ganze Szene: liefert einen
    /// Cache-Treffer oder berechnet neu, ohne den Cache zu befüllen.
    pub fn lookup(&self, scene: &Scene) -> Arc<Vec<EmissiveEntry>> {
        if self.enabled {
            if let Some(hit) = self.hit(&Fingerprint::of(scene)) {
                return Arc::clone(hit);
            }
        }
        Arc::new(collect_entries(scene, scene.objects.keys().map(String::as_str)))
    }

    /// Verwirft den gesamten Cache (strukturelle Szenenänderung).
    pub fn invalidate(&mut self) {
        if let Some((_, entries)) = self.cache.take() {
            log::debug!("Emissive-Index invalidiert ({} Einträge)", entries.len());
        }
    }

    /// Anzahl gecachter Fingerprints (0 oder 1)
    pub fn cached_len(&self) -> usize {
        usize::from(self.cache.is_some())
    }

    fn hit(&self, key: &Fingerprint) -> Option<&Arc<Vec<EmissiveEntry>>> {
        self.cache
            .as_ref()
            .filter(|(cached, _)| cached == key)
            .map(|(_, entries)| entries)
    }
}

/// Durchsucht die angegebenen Objekte. Jedes Material wird nur einmal gemeldet.
fn collect_entries<'a>(scene: &Scene, objects: impl Iterator<Item = &'a str>) -> Vec<EmissiveEntry> {
    let mut entries = Vec::new();
    let mut seen_materials: HashSet<&str> = HashSet::new();

    for object_name in objects {
        let Some(object) = scene.objects.get(object_name) else {
            continue;
        };
        if !matches!(object.data, ObjectData::Mesh { .. }) {
            continue;
        }
        for material_name in object.materials() {
            let Some(tree) = scene.material_tree(material_name) else {
                continue;
            };
            if !seen_materials.insert(material_name) {
                continue;
            }
            let Some(entry) = material_entry(tree) else {
                continue;
            };
            if !is_emissive_output(tree, entry, &mut HashSet::new()) {
                continue;
            }
            for hit in find_all_emission_nodes(tree, entry) {
                let emits = tree.node(&hit.node).is_some_and(|n| node_emits(tree, n));
                if !emits {
                    continue;
                }
                entries.push(EmissiveEntry {
                    object: object.name.clone(),
                    material: material_name.to_string(),
                    node: hit.node,
                    control_socket: hit.control,
                });
            }
        }
    }

    entries
}

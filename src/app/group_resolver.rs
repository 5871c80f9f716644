//! Auflösung von Gruppen-Beschreibungen zu den Entitäten, die aktiv bleiben sollen.
//!
//! Reine Funktion über Szene und Emissive-Index; mutiert nie den Graph.

use crate::core::{EmissiveEntry, EntityId, LightKind, Scene, SceneObject};
use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// Benannte Gruppe von Lichtern und/oder emissiven Materialien
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupDescriptor {
    /// Einzelnes Licht
    SingleLight(String),
    /// Alle emissiven Nodes eines Materials
    SingleMaterial(String),
    /// Ein einzelner emissiver Node
    SingleEmissionNode { material: String, node: String },
    /// Alle Lichter einer Art
    LightKind(LightKind),
    /// Mitglieder einer Collection inkl. Kind-Collections
    Collection(String),
    /// Objekte ohne Collection-Zugehörigkeit
    NoCollection,
    /// Mitglieder einer Render-Light-Group
    LightGroup(String),
    /// Alle Lichter (ungefiltert)
    AllLights,
    /// Alle emissiven Materialien (ungefiltert)
    AllEmissives,
}

/// Anzeigename des Sammel-Buckets ohne Collection
pub const NO_COLLECTION: &str = "No Collection";

impl GroupDescriptor {
    /// Stabiler Schlüssel (Gruppen-Toggle-Key und Isolations-Identifier).
    pub fn key(&self) -> String {
        match self {
            GroupDescriptor::SingleLight(name) | GroupDescriptor::SingleMaterial(name) => {
                name.clone()
            }
            GroupDescriptor::SingleEmissionNode { material, node } => {
                format!("emissive_{material}_{node}")
            }
            GroupDescriptor::LightKind(kind) => format!("kind_{}", kind.as_str()),
            GroupDescriptor::Collection(name) => format!("coll_{name}"),
            GroupDescriptor::NoCollection => format!("coll_{NO_COLLECTION}"),
            GroupDescriptor::LightGroup(name) => format!("group_{name}"),
            GroupDescriptor::AllLights => "all_lights_alpha".to_string(),
            GroupDescriptor::AllEmissives => "all_emissives_alpha".to_string(),
        }
    }

    /// Wird der Namensfilter auf die Mitglieder angewendet?
    fn is_filtered(&self) -> bool {
        matches!(
            self,
            GroupDescriptor::LightKind(_)
                | GroupDescriptor::Collection(_)
                | GroupDescriptor::NoCollection
                | GroupDescriptor::LightGroup(_)
        )
    }
}

/// Filter-Prädikat aus dem Filter-Text des Panels
#[derive(Debug, Clone)]
pub struct NameFilter {
    text: String,
    regex: Option<Regex>,
    case_insensitive: bool,
}

impl NameFilter {
    /// Baut den Filter. Ungültige Regex fallen auf Teilstring-Suche zurück.
    pub fn new(text: &str, case_insensitive: bool) -> Self {
        let text = text.trim().to_string();
        let regex = if text.is_empty() {
            None
        } else {
            match RegexBuilder::new(&text)
                .case_insensitive(case_insensitive)
                .build()
            {
                Ok(regex) => Some(regex),
                Err(err) => {
                    log::debug!("Filter '{text}' ist keine gültige Regex ({err}), Teilstring-Suche");
                    None
                }
            }
        };
        Self {
            text,
            regex,
            case_insensitive,
        }
    }

    /// Filter ohne Einschränkung
    pub fn none() -> Self {
        Self::new("", true)
    }

    /// Leerer Filter?
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Prüft einen Namen gegen den Filter.
    pub fn matches(&self, name: &str) -> bool {
        if self.text.is_empty() {
            return true;
        }
        match &self.regex {
            Some(regex) => regex.is_match(name),
            None if self.case_insensitive => {
                name.to_lowercase().contains(&self.text.to_lowercase())
            }
            None => name.contains(&self.text),
        }
    }
}

impl Default for NameFilter {
    fn default() -> Self {
        Self::none()
    }
}

/// Gleichheit über Filter-Text und Modus (die kompilierte Regex folgt daraus).
impl PartialEq for NameFilter {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.case_insensitive == other.case_insensitive
    }
}

/// Menge der Entitäten, die aktiv bleiben (Lichter und emissive Inputs getrennt)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeepSet {
    /// Lichter (`EntityId::Light`)
    pub lights: IndexSet<EntityId>,
    /// Emissive Inputs (`EntityId::EmissionInput`)
    pub emissives: IndexSet<EntityId>,
}

impl KeepSet {
    /// Ein einzelnes Licht
    pub fn light(name: &str) -> Self {
        let mut keep = Self::default();
        keep.lights.insert(EntityId::Light(name.to_string()));
        keep
    }

    /// Nur die emissive Hälfte behalten (Lichter werden alle unterdrückt).
    pub fn emissives_only(mut self) -> Self {
        self.lights.clear();
        self
    }

    /// Keine Entität bleibt aktiv
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty() && self.emissives.is_empty()
    }

    /// Alle Entitäten beider Hälften
    pub fn all(&self) -> impl Iterator<Item = &EntityId> {
        self.lights.iter().chain(self.emissives.iter())
    }

    fn push_emissive(&mut self, entry: &EmissiveEntry) {
        if let Some(id) = entry.entity_id() {
            self.emissives.insert(id);
        }
    }
}

/// Löst eine Gruppe zu ihrer Keep-Menge auf.
pub fn resolve(
    descriptor: &GroupDescriptor,
    scene: &Scene,
    emissives: &[EmissiveEntry],
    filter: &NameFilter,
) -> KeepSet {
    let mut keep = KeepSet::default();
    let filtered = descriptor.is_filtered();
    let light_passes = |name: &str| !filtered || filter.matches(name);
    let emissive_passes =
        |e: &EmissiveEntry| !filtered || filter.matches(&e.object) || filter.matches(&e.material);

    match descriptor {
        GroupDescriptor::SingleLight(name) => {
            if scene.light(name).is_some() {
                keep.lights.insert(EntityId::Light(name.clone()));
            }
        }
        GroupDescriptor::SingleMaterial(material) => {
            emissives
                .iter()
                .filter(|e| &e.material == material)
                .for_each(|e| keep.push_emissive(e));
        }
        GroupDescriptor::SingleEmissionNode { material, node } => {
            emissives
                .iter()
                .filter(|e| &e.material == material && &e.node == node)
                .for_each(|e| keep.push_emissive(e));
        }
        GroupDescriptor::LightKind(kind) => {
            for (name, light) in scene.lights() {
                if light.kind == *kind && light_passes(name) {
                    keep.lights.insert(EntityId::Light(name.to_string()));
                }
            }
        }
        GroupDescriptor::Collection(collection) => {
            let closure = scene.collection_closure(collection);
            let member = |object: &SceneObject| object.collections.iter().any(|c| closure.contains(c));
            collect_members(scene, emissives, &mut keep, member, light_passes, emissive_passes);
        }
        GroupDescriptor::NoCollection => {
            let member = |object: &SceneObject| object.collections.is_empty();
            collect_members(scene, emissives, &mut keep, member, light_passes, emissive_passes);
        }
        GroupDescriptor::LightGroup(group) => {
            for (name, light) in scene.lights() {
                if &light.light_group == group && light_passes(name) {
                    keep.lights.insert(EntityId::Light(name.to_string()));
                }
            }
        }
        GroupDescriptor::AllLights => {
            for (name, _) in scene.lights() {
                keep.lights.insert(EntityId::Light(name.to_string()));
            }
        }
        GroupDescriptor::AllEmissives => {
            emissives.iter().for_each(|e| keep.push_emissive(e));
        }
    }

    log::debug!(
        "Gruppe '{}' aufgelöst: {} Lichter, {} Emissive",
        descriptor.key(),
        keep.lights.len(),
        keep.emissives.len()
    );
    keep
}

fn collect_members(
    scene: &Scene,
    emissives: &[EmissiveEntry],
    keep: &mut KeepSet,
    member: impl Fn(&SceneObject) -> bool,
    light_passes: impl Fn(&str) -> bool,
    emissive_passes: impl Fn(&EmissiveEntry) -> bool,
) {
    for object in scene.objects.values() {
        if object.as_light().is_some() && member(object) && light_passes(&object.name) {
            keep.lights.insert(EntityId::Light(object.name.clone()));
        }
    }
    for entry in emissives {
        let is_member = scene.objects.get(&entry.object).is_some_and(&member);
        if is_member && emissive_passes(entry) {
            keep.push_emissive(entry);
        }
    }
}

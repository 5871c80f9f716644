//! Szenen-Modell: Objekte (Lichter, Meshes), Materialien, World und Collections.
//!
//! Das Modell ist die In-Process-Sicht auf den Host. Die Engine liest und
//! mutiert ausschließlich diese Strukturen.

use super::shader_graph::{socket, NodeKind, NodeTree, ShaderNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lichtart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightKind {
    /// Punktlicht
    Point,
    /// Sonnenlicht (gerichtet)
    Sun,
    /// Spot
    Spot,
    /// Flächenlicht
    Area,
}

impl LightKind {
    /// Host-Bezeichner (z.B. für Gruppen-Keys `kind_POINT`).
    pub fn as_str(&self) -> &'static str {
        match self {
            LightKind::Point => "POINT",
            LightKind::Sun => "SUN",
            LightKind::Spot => "SPOT",
            LightKind::Area => "AREA",
        }
    }
}

/// Sichtbarkeitszustand eines Licht-Objekts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightObject {
    /// Lichtart
    pub kind: LightKind,
    /// Licht aktiv (Panel-Checkbox)
    pub enabled: bool,
    /// Im Viewport ausgeblendet
    pub hide_viewport: bool,
    /// Im Render ausgeblendet
    pub hide_render: bool,
    /// Zugewiesene Render-Light-Group (leer = keine)
    #[serde(default)]
    pub light_group: String,
}

impl LightObject {
    /// Erstellt ein aktives, sichtbares Licht.
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            enabled: true,
            hide_viewport: false,
            hide_render: false,
            light_group: String::new(),
        }
    }

    /// Setzt `enabled` und koppelt beide Hide-Flags daran.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.hide_viewport = !enabled;
        self.hide_render = !enabled;
    }

    /// Leitet `enabled` aus den Hide-Flags ab (nur beide gesetzt = aus).
    pub fn sync_enabled_from_visibility(&mut self) {
        self.enabled = !(self.hide_viewport && self.hide_render);
    }
}

/// Objektdaten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectData {
    /// Licht-Objekt
    Light(LightObject),
    /// Mesh mit Material-Slots (Material-Namen, leere Slots sind erlaubt)
    Mesh { material_slots: Vec<Option<String>> },
}

/// Ein Objekt in der Szene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Eindeutiger Objektname
    pub name: String,
    /// Direkte Collection-Mitgliedschaften (leer = nur Scene Collection)
    #[serde(default)]
    pub collections: Vec<String>,
    /// Objektdaten
    pub data: ObjectData,
}

impl SceneObject {
    /// Erstellt ein Licht-Objekt.
    pub fn light(name: impl Into<String>, kind: LightKind) -> Self {
        Self {
            name: name.into(),
            collections: Vec::new(),
            data: ObjectData::Light(LightObject::new(kind)),
        }
    }

    /// Erstellt ein Mesh-Objekt mit den angegebenen Materialien.
    pub fn mesh(name: impl Into<String>, materials: &[&str]) -> Self {
        Self {
            name: name.into(),
            collections: Vec::new(),
            data: ObjectData::Mesh {
                material_slots: materials.iter().map(|m| Some(m.to_string())).collect(),
            },
        }
    }

    /// Builder: ordnet das Objekt einer Collection zu.
    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collections.push(collection.into());
        self
    }

    /// Licht-Daten (falls Licht-Objekt)
    pub fn as_light(&self) -> Option<&LightObject> {
        match &self.data {
            ObjectData::Light(light) => Some(light),
            ObjectData::Mesh { .. } => None,
        }
    }

    /// Mutable Licht-Daten (falls Licht-Objekt)
    pub fn as_light_mut(&mut self) -> Option<&mut LightObject> {
        match &mut self.data {
            ObjectData::Light(light) => Some(light),
            ObjectData::Mesh { .. } => None,
        }
    }

    /// Belegte Material-Slots (nur Meshes)
    pub fn materials(&self) -> impl Iterator<Item = &str> {
        let slots: &[Option<String>] = match &self.data {
            ObjectData::Mesh { material_slots } => material_slots,
            ObjectData::Light(_) => &[],
        };
        slots.iter().filter_map(|slot| slot.as_deref())
    }
}

/// Material mit optionalem Node-Graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Eindeutiger Materialname
    pub name: String,
    /// Node-Graph (None = Nodes deaktiviert)
    pub node_tree: Option<NodeTree>,
}

impl Material {
    /// Erstellt ein Material mit Node-Graph.
    pub fn with_nodes(name: impl Into<String>, node_tree: NodeTree) -> Self {
        Self {
            name: name.into(),
            node_tree: Some(node_tree),
        }
    }
}

/// World (Environment) der Szene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Name der World
    pub name: String,
    /// Node-Graph (None = Nodes deaktiviert)
    pub node_tree: Option<NodeTree>,
    /// Zugewiesene Render-Light-Group (leer = keine)
    #[serde(default)]
    pub light_group: String,
    /// Für Light-Group-Zuweisung markiert
    #[serde(default)]
    pub selected: bool,
}

impl World {
    /// Standard-World: Background → World Output (Surface).
    pub fn with_background(name: impl Into<String>, strength: f32) -> Self {
        let mut tree = NodeTree::new();
        tree.add_node(ShaderNode::background("Background", strength, glam::Vec4::new(0.05, 0.05, 0.05, 1.0)));
        tree.add_node(ShaderNode::world_output("World Output"));
        let linked = tree.add_link("Background", socket::BACKGROUND, "World Output", socket::SURFACE);
        debug_assert!(linked.is_ok(), "Standard-World-Kante abgelehnt: {linked:?}");
        Self {
            name: name.into(),
            node_tree: Some(tree),
            light_group: String::new(),
            selected: false,
        }
    }

    /// Erster World-Output-Node
    pub fn output_node(&self) -> Option<&ShaderNode> {
        self.node_tree.as_ref()?.first_of_kind(NodeKind::WorldOutput)
    }

    /// Erster Background-Node
    pub fn background_node(&self) -> Option<&ShaderNode> {
        self.node_tree.as_ref()?.first_of_kind(NodeKind::Background)
    }
}

/// Collection mit Kind-Collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Name der Collection
    pub name: String,
    /// Namen der direkten Kind-Collections
    #[serde(default)]
    pub children: Vec<String>,
}

/// Vollständige Szene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Name des aktiven View-Layers (Teil des Emissive-Cache-Fingerprints)
    #[serde(default = "default_view_layer")]
    pub view_layer: String,
    /// Alle Objekte, indexiert nach Name
    #[serde(default)]
    pub objects: IndexMap<String, SceneObject>,
    /// Alle Materialien, indexiert nach Name
    #[serde(default)]
    pub materials: IndexMap<String, Material>,
    /// World der Szene
    #[serde(default)]
    pub world: Option<World>,
    /// Alle Collections, indexiert nach Name
    #[serde(default)]
    pub collections: IndexMap<String, Collection>,
    /// Render-Light-Groups des View-Layers
    #[serde(default)]
    pub light_groups: Vec<String>,
}

fn default_view_layer() -> String {
    "ViewLayer".to_string()
}

impl Scene {
    /// Erstellt eine leere Szene
    pub fn new() -> Self {
        Self {
            view_layer: default_view_layer(),
            ..Self::default()
        }
    }

    /// Fügt ein Objekt hinzu (ersetzt ein gleichnamiges).
    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.insert(object.name.clone(), object);
    }

    /// Fügt ein Material hinzu (ersetzt ein gleichnamiges).
    pub fn add_material(&mut self, material: Material) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Fügt eine Collection hinzu; ist `parent` gesetzt, wird sie dort als Kind eingetragen.
    pub fn add_collection(&mut self, name: impl Into<String>, parent: Option<&str>) {
        let name = name.into();
        if let Some(parent) = parent.and_then(|p| self.collections.get_mut(p)) {
            if !parent.children.contains(&name) {
                parent.children.push(name.clone());
            }
        }
        self.collections.entry(name.clone()).or_insert(Collection {
            name,
            children: Vec::new(),
        });
    }

    /// Anzahl Objekte
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Anzahl Materialien
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Iterator über alle Licht-Objekte (Name, Daten).
    pub fn lights(&self) -> impl Iterator<Item = (&str, &LightObject)> {
        self.objects
            .values()
            .filter_map(|o| o.as_light().map(|l| (o.name.as_str(), l)))
    }

    /// Mutable Licht-Daten per Objektname.
    pub fn light_mut(&mut self, name: &str) -> Option<&mut LightObject> {
        self.objects.get_mut(name)?.as_light_mut()
    }

    /// Licht-Daten per Objektname.
    pub fn light(&self, name: &str) -> Option<&LightObject> {
        self.objects.get(name)?.as_light()
    }

    /// Node-Graph eines Materials.
    pub fn material_tree(&self, material: &str) -> Option<&NodeTree> {
        self.materials.get(material)?.node_tree.as_ref()
    }

    /// Mutabler Node-Graph eines Materials.
    pub fn material_tree_mut(&mut self, material: &str) -> Option<&mut NodeTree> {
        self.materials.get_mut(material)?.node_tree.as_mut()
    }

    /// Node-Graph der World.
    pub fn world_tree(&self) -> Option<&NodeTree> {
        self.world.as_ref()?.node_tree.as_ref()
    }

    /// Mutabler Node-Graph der World.
    pub fn world_tree_mut(&mut self) -> Option<&mut NodeTree> {
        self.world.as_mut()?.node_tree.as_mut()
    }

    /// Namen einer Collection und aller (transitiven) Kind-Collections.
    ///
    /// Zyklische Collection-Hierarchien terminieren über ein Visited-Set.
    pub fn collection_closure(&self, root: &str) -> HashSet<String> {
        let mut visited = HashSet::new();
        let mut stack = vec![root.to_string()];
        while let Some(name) = stack.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            if let Some(collection) = self.collections.get(&name) {
                stack.extend(collection.children.iter().cloned());
            }
        }
        visited
    }

    /// Prüft ob ein Objekt (direkt oder über Kind-Collections) Mitglied einer Collection ist.
    pub fn is_in_collection(&self, object: &SceneObject, collection: &str) -> bool {
        let closure = self.collection_closure(collection);
        object.collections.iter().any(|c| closure.contains(c))
    }

    /// Gleicht `enabled` aller Lichter mit ihren Hide-Flags ab (nach dem Laden).
    pub fn sync_light_states(&mut self) {
        for object in self.objects.values_mut() {
            if let Some(light) = object.as_light_mut() {
                light.sync_enabled_from_visibility();
            }
        }
    }
}

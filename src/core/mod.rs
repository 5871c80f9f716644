//! Core-Domänentypen: Szene, Shader-Graph, Entitäten, Traversierung und Emissive-Index.

pub mod emissive_index;
pub mod entity;
pub mod graph_walker;
/// Szenen-Modell (Objekte, Materialien, World, Collections)
///
/// Dieses Modul definiert die Haupt-Datenstrukturen:
/// - Scene: Container für Objekte, Materialien und World
/// - SceneObject: Licht oder Mesh mit Material-Slots
/// - World: Environment mit eigenem Node-Graph
pub mod scene;
pub mod shader_graph;

pub use emissive_index::{EmissiveEntry, EmissiveIndex, SearchScope};
pub use entity::{EntityId, EnvSocket};
pub use graph_walker::{
    depth_first, find_all_emission_nodes, find_emission_nodes, is_emissive_output,
    material_entry, node_emits, world_output, EmissionNode, Visit, WalkMode,
};
pub use scene::{
    Collection, LightKind, LightObject, Material, ObjectData, Scene, SceneObject, World,
};
pub use shader_graph::{
    socket, GraphError, Link, NodeKind, NodeTree, ShaderNode, Socket, SocketValue,
};

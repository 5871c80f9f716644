//! Shader-Node-Graph eines Materials oder einer World.
//!
//! Nodes werden über ihren (eindeutigen) Namen adressiert, nicht über Zeiger.
//! Dadurch bleiben Referenzen in Snapshots auch nach Graph-Mutationen gültig
//! und können nach einem Restore erneut aufgelöst werden.

use glam::Vec4;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Socket-Namen, wie sie der Host verwendet.
pub mod socket {
    /// Stärke-Input eines Emission- oder Background-Nodes
    pub const STRENGTH: &str = "Strength";
    /// Farb-Input eines Emission- oder Background-Nodes
    pub const COLOR: &str = "Color";
    /// Emissions-Stärke eines Principled-Nodes
    pub const EMISSION_STRENGTH: &str = "Emission Strength";
    /// Emissions-Farbe eines Principled-Nodes
    pub const EMISSION_COLOR: &str = "Emission Color";
    /// Surface-Input eines Output-Nodes
    pub const SURFACE: &str = "Surface";
    /// Volume-Input eines Output-Nodes
    pub const VOLUME: &str = "Volume";
    /// Shader-Output eines Emission-Nodes
    pub const EMISSION: &str = "Emission";
    /// Shader-Output eines Background-Nodes
    pub const BACKGROUND: &str = "Background";
    /// Shader-Output eines Principled-Nodes
    pub const BSDF: &str = "BSDF";
    /// Generischer Shader-Output
    pub const SHADER: &str = "Shader";
}

/// Art eines Shader-Nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Reiner Emissions-Shader (Strength + Color)
    Emission,
    /// Principled BSDF mit Emission-Inputs
    PrincipledSurface,
    /// Hintergrund-Shader der World
    Background,
    /// Material-Output (Surface/Volume)
    MaterialOutput,
    /// World-Output (Surface/Volume)
    WorldOutput,
    /// Alle übrigen Nodes (Mix, Texturen, Gruppen, …)
    Generic,
}

/// Wert eines Input-Sockets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SocketValue {
    /// Skalarer Wert (z.B. Strength)
    Float(f32),
    /// RGBA-Farbwert
    Color(Vec4),
    /// Shader-Socket ohne eigenen Wert
    Shader,
}

impl SocketValue {
    /// Neutraler "Aus"-Wert gleichen Typs: 0.0 bzw. deckendes Schwarz (Alpha 1).
    pub fn zeroed(&self) -> SocketValue {
        match self {
            SocketValue::Float(_) => SocketValue::Float(0.0),
            SocketValue::Color(_) => SocketValue::Color(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            SocketValue::Shader => SocketValue::Shader,
        }
    }

    /// Liefert `true`, wenn der Wert Licht beiträgt (Skalar > 0 bzw. ein RGB-Kanal > 0).
    pub fn is_positive(&self) -> bool {
        match self {
            SocketValue::Float(v) => *v > 0.0,
            SocketValue::Color(c) => c.x > 0.0 || c.y > 0.0 || c.z > 0.0,
            SocketValue::Shader => false,
        }
    }

    fn same_type(&self, other: &SocketValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Ein Input-Socket mit Default-Wert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Socket {
    /// Socket-Name (innerhalb des Nodes eindeutig)
    pub name: String,
    /// Aktueller Default-Wert (wirksam wenn nicht verbunden)
    pub value: SocketValue,
}

impl Socket {
    /// Erstellt einen Input-Socket.
    pub fn new(name: impl Into<String>, value: SocketValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Ein Node im Shader-Graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShaderNode {
    /// Eindeutiger Node-Name im Graph
    pub name: String,
    /// Node-Art
    pub kind: NodeKind,
    /// Input-Sockets in Host-Reihenfolge
    pub inputs: Vec<Socket>,
    /// Namen der Output-Sockets
    pub outputs: Vec<String>,
}

impl ShaderNode {
    /// Emission-Node mit Strength und Color.
    pub fn emission(name: impl Into<String>, strength: f32, color: Vec4) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Emission,
            inputs: vec![
                Socket::new(socket::COLOR, SocketValue::Color(color)),
                Socket::new(socket::STRENGTH, SocketValue::Float(strength)),
            ],
            outputs: vec![socket::EMISSION.to_string()],
        }
    }

    /// Principled-Node mit Emission-Color und Emission-Strength.
    pub fn principled(name: impl Into<String>, emission_color: Vec4, emission_strength: f32) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::PrincipledSurface,
            inputs: vec![
                Socket::new("Base Color", SocketValue::Color(Vec4::new(0.8, 0.8, 0.8, 1.0))),
                Socket::new(socket::EMISSION_COLOR, SocketValue::Color(emission_color)),
                Socket::new(socket::EMISSION_STRENGTH, SocketValue::Float(emission_strength)),
            ],
            outputs: vec![socket::BSDF.to_string()],
        }
    }

    /// Background-Node der World.
    pub fn background(name: impl Into<String>, strength: f32, color: Vec4) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Background,
            inputs: vec![
                Socket::new(socket::COLOR, SocketValue::Color(color)),
                Socket::new(socket::STRENGTH, SocketValue::Float(strength)),
            ],
            outputs: vec![socket::BACKGROUND.to_string()],
        }
    }

    /// Material-Output mit Surface- und Volume-Input.
    pub fn material_output(name: impl Into<String>) -> Self {
        Self::output(name, NodeKind::MaterialOutput)
    }

    /// World-Output mit Surface- und Volume-Input.
    pub fn world_output(name: impl Into<String>) -> Self {
        Self::output(name, NodeKind::WorldOutput)
    }

    fn output(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            inputs: vec![
                Socket::new(socket::SURFACE, SocketValue::Shader),
                Socket::new(socket::VOLUME, SocketValue::Shader),
            ],
            outputs: Vec::new(),
        }
    }

    /// Beliebiger Node ohne Sonderbedeutung (Mix-Shader, Texturen, …).
    pub fn generic(name: impl Into<String>, inputs: Vec<Socket>, outputs: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Generic,
            inputs,
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Sucht einen Input-Socket per Name.
    pub fn input(&self, name: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// Prüft ob ein Output-Socket mit diesem Namen existiert.
    pub fn has_output(&self, name: &str) -> bool {
        self.outputs.iter().any(|s| s == name)
    }
}

/// Gerichtete Kante: Output-Socket → Input-Socket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Quell-Node
    pub from_node: String,
    /// Output-Socket am Quell-Node
    pub from_socket: String,
    /// Ziel-Node
    pub to_node: String,
    /// Input-Socket am Ziel-Node
    pub to_socket: String,
}

/// Abgelehnte Graph-Operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Node existiert nicht (mehr)
    #[error("Node '{0}' existiert nicht")]
    UnknownNode(String),
    /// Socket existiert am Node nicht
    #[error("Socket '{socket}' existiert nicht an Node '{node}'")]
    UnknownSocket { node: String, socket: String },
    /// Ziel-Socket hat bereits eine eingehende Kante
    #[error("Socket '{node}.{socket}' ist bereits verbunden")]
    AlreadyLinked { node: String, socket: String },
    /// Ziel-Socket hat keine eingehende Kante
    #[error("Socket '{node}.{socket}' ist nicht verbunden")]
    NotLinked { node: String, socket: String },
    /// Wert passt nicht zum Socket-Typ
    #[error("Werttyp passt nicht zu Socket '{node}.{socket}'")]
    ValueTypeMismatch { node: String, socket: String },
}

/// Vollständiger Node-Graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeTree {
    /// Alle Nodes, indexiert nach Name (Einfügereihenfolge bleibt erhalten)
    nodes: IndexMap<String, ShaderNode>,
    /// Eingehende Kanten, indexiert nach (to_node, to_socket), max. eine pro Input
    #[serde(with = "link_list")]
    links: HashMap<(String, String), Link>,
}

impl NodeTree {
    /// Erstellt einen leeren Graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Node hinzu (ersetzt einen gleichnamigen Node).
    pub fn add_node(&mut self, node: ShaderNode) {
        self.nodes.insert(node.name.clone(), node);
    }

    /// Entfernt einen Node inklusive aller ein- und ausgehenden Kanten.
    pub fn remove_node(&mut self, name: &str) -> Option<ShaderNode> {
        let removed = self.nodes.shift_remove(name);
        if removed.is_some() {
            self.links
                .retain(|_, link| link.from_node != name && link.to_node != name);
        }
        removed
    }

    /// Sucht einen Node per Name.
    pub fn node(&self, name: &str) -> Option<&ShaderNode> {
        self.nodes.get(name)
    }

    /// Iterator über alle Nodes in Einfügereihenfolge.
    pub fn nodes(&self) -> impl Iterator<Item = &ShaderNode> {
        self.nodes.values()
    }

    /// Erster Node einer bestimmten Art.
    pub fn first_of_kind(&self, kind: NodeKind) -> Option<&ShaderNode> {
        self.nodes.values().find(|n| n.kind == kind)
    }

    /// Anzahl Nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Anzahl Kanten
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Eingehende Kante eines Input-Sockets, O(1)
    pub fn incoming(&self, node: &str, socket: &str) -> Option<&Link> {
        self.links.get(&(node.to_string(), socket.to_string()))
    }

    /// Prüft ob ein Input-Socket verbunden ist, O(1)
    pub fn is_linked(&self, node: &str, socket: &str) -> bool {
        self.incoming(node, socket).is_some()
    }

    /// Quell-Nodes aller verbundenen Inputs eines Nodes, in Input-Reihenfolge.
    pub fn inbound_sources<'a>(&'a self, node: &'a ShaderNode) -> impl Iterator<Item = &'a str> + 'a {
        node.inputs
            .iter()
            .filter_map(move |s| self.incoming(&node.name, &s.name))
            .map(|link| link.from_node.as_str())
    }

    /// Iterator über alle Kanten (read-only).
    pub fn links_iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Aktueller Wert eines Input-Sockets.
    pub fn input_value(&self, node: &str, socket: &str) -> Option<SocketValue> {
        self.nodes.get(node)?.input(socket).map(|s| s.value)
    }

    /// Setzt den Default-Wert eines Inputs und liefert den vorherigen Wert.
    pub fn set_input_value(
        &mut self,
        node: &str,
        socket: &str,
        value: SocketValue,
    ) -> Result<SocketValue, GraphError> {
        let target = self
            .nodes
            .get_mut(node)
            .ok_or_else(|| GraphError::UnknownNode(node.to_string()))?;
        let input = target
            .inputs
            .iter_mut()
            .find(|s| s.name == socket)
            .ok_or_else(|| GraphError::UnknownSocket {
                node: node.to_string(),
                socket: socket.to_string(),
            })?;
        if !input.value.same_type(&value) {
            return Err(GraphError::ValueTypeMismatch {
                node: node.to_string(),
                socket: socket.to_string(),
            });
        }
        Ok(std::mem::replace(&mut input.value, value))
    }

    /// Erstellt eine Kante. Ein bereits verbundener Ziel-Socket wird nicht überschrieben.
    pub fn add_link(
        &mut self,
        from_node: &str,
        from_socket: &str,
        to_node: &str,
        to_socket: &str,
    ) -> Result<(), GraphError> {
        let source = self
            .nodes
            .get(from_node)
            .ok_or_else(|| GraphError::UnknownNode(from_node.to_string()))?;
        if !source.has_output(from_socket) {
            return Err(GraphError::UnknownSocket {
                node: from_node.to_string(),
                socket: from_socket.to_string(),
            });
        }
        let target = self
            .nodes
            .get(to_node)
            .ok_or_else(|| GraphError::UnknownNode(to_node.to_string()))?;
        if target.input(to_socket).is_none() {
            return Err(GraphError::UnknownSocket {
                node: to_node.to_string(),
                socket: to_socket.to_string(),
            });
        }

        let key = (to_node.to_string(), to_socket.to_string());
        if self.links.contains_key(&key) {
            return Err(GraphError::AlreadyLinked {
                node: to_node.to_string(),
                socket: to_socket.to_string(),
            });
        }
        self.links.insert(
            key,
            Link {
                from_node: from_node.to_string(),
                from_socket: from_socket.to_string(),
                to_node: to_node.to_string(),
                to_socket: to_socket.to_string(),
            },
        );
        Ok(())
    }

    /// Entfernt die eingehende Kante eines Input-Sockets und gibt sie zurück.
    pub fn remove_link(&mut self, to_node: &str, to_socket: &str) -> Result<Link, GraphError> {
        self.links
            .remove(&(to_node.to_string(), to_socket.to_string()))
            .ok_or_else(|| GraphError::NotLinked {
                node: to_node.to_string(),
                socket: to_socket.to_string(),
            })
    }
}

/// Kanten werden als Liste serialisiert (Tupel-Keys sind in JSON nicht erlaubt).
mod link_list {
    use super::Link;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S: Serializer>(
        links: &HashMap<(String, String), Link>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut list: Vec<&Link> = links.values().collect();
        list.sort_by(|a, b| (&a.to_node, &a.to_socket).cmp(&(&b.to_node, &b.to_socket)));
        list.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<(String, String), Link>, D::Error> {
        let list = Vec::<Link>::deserialize(deserializer)?;
        Ok(list
            .into_iter()
            .map(|link| ((link.to_node.clone(), link.to_socket.clone()), link))
            .collect())
    }
}

#[cfg(test)]
mod tests;

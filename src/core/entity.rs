//! Stabile Bezeichner für alle Entitäten, die isoliert oder stummgeschaltet werden können.

use super::shader_graph::socket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input-Socket des World-Outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnvSocket {
    /// Surface-Input
    Surface,
    /// Volume-Input
    Volume,
}

impl EnvSocket {
    /// Beide Sockets in fester Reihenfolge
    pub const ALL: [EnvSocket; 2] = [EnvSocket::Surface, EnvSocket::Volume];

    /// Socket-Name am World-Output-Node
    pub fn socket_name(&self) -> &'static str {
        match self {
            EnvSocket::Surface => socket::SURFACE,
            EnvSocket::Volume => socket::VOLUME,
        }
    }
}

/// Diskriminierter, stabiler Entitäts-Bezeichner (Namen statt Zeiger).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityId {
    /// Licht-Objekt per Objektname
    Light(String),
    /// Steuernder Emissions-Input eines Nodes in einem Material
    EmissionInput {
        material: String,
        node: String,
        socket: String,
    },
    /// Surface- oder Volume-Input des World-Outputs
    EnvironmentSocket(EnvSocket),
    /// Strength des Background-Nodes der World
    EnvironmentStrength,
}

impl EntityId {
    /// Kurzform für einen Emissions-Input.
    pub fn emission(material: &str, node: &str, socket: &str) -> Self {
        EntityId::EmissionInput {
            material: material.to_string(),
            node: node.to_string(),
            socket: socket.to_string(),
        }
    }

    /// Besitzer für die gruppierte Backup-Ablage (Material-, Licht- oder World-Ebene).
    pub fn owner_key(&self) -> String {
        match self {
            EntityId::Light(name) => format!("light:{name}"),
            EntityId::EmissionInput { material, .. } => format!("material:{material}"),
            EntityId::EnvironmentSocket(_) | EntityId::EnvironmentStrength => "world".to_string(),
        }
    }

    /// Material-Name (nur Emissions-Inputs)
    pub fn material(&self) -> Option<&str> {
        match self {
            EntityId::EmissionInput { material, .. } => Some(material),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Light(name) => write!(f, "Light({name})"),
            EntityId::EmissionInput {
                material,
                node,
                socket,
            } => write!(f, "{material}:{node}.{socket}"),
            EntityId::EnvironmentSocket(s) => write!(f, "World.{}", s.socket_name()),
            EntityId::EnvironmentStrength => write!(f, "World.Background.Strength"),
        }
    }
}

//! Zugriff auf die steuernden Zustände einer Entität: Licht-Sichtbarkeit,
//! Socket-Wert oder eingehende Kante. Unterdrücken schreibt vorher immer
//! einen SnapshotRecord.

use super::report::ApplyReport;
use super::snapshot_store::{SnapshotRecord, SnapshotStore};
use crate::core::{socket, world_output, EntityId, NodeKind, NodeTree, Scene, SocketValue};

/// Aufgelöster Input-Socket einer Graph-Entität (Node + Socket-Name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SocketRef {
    pub node: String,
    pub socket: String,
}

/// Node-Graph, in dem die Entität lebt (None für Lichter oder fehlende Graphen).
pub(crate) fn tree_of<'a>(scene: &'a Scene, id: &EntityId) -> Option<&'a NodeTree> {
    match id {
        EntityId::Light(_) => None,
        EntityId::EmissionInput { material, .. } => scene.material_tree(material),
        EntityId::EnvironmentSocket(_) | EntityId::EnvironmentStrength => scene.world_tree(),
    }
}

/// Mutabler Node-Graph der Entität.
pub(crate) fn tree_of_mut<'a>(scene: &'a mut Scene, id: &EntityId) -> Option<&'a mut NodeTree> {
    match id {
        EntityId::Light(_) => None,
        EntityId::EmissionInput { material, .. } => scene.material_tree_mut(material),
        EntityId::EnvironmentSocket(_) | EntityId::EnvironmentStrength => scene.world_tree_mut(),
    }
}

/// Löst den steuernden Socket auf. Fehlt Node oder Socket, ist das Ziel verschwunden.
pub(crate) fn socket_of(scene: &Scene, id: &EntityId) -> Option<SocketRef> {
    let tree = tree_of(scene, id)?;
    let (node, socket) = match id {
        EntityId::Light(_) => return None,
        EntityId::EmissionInput { node, socket, .. } => (node.clone(), socket.clone()),
        EntityId::EnvironmentSocket(env) => {
            (world_output(tree)?.name.clone(), env.socket_name().to_string())
        }
        EntityId::EnvironmentStrength => (
            tree.first_of_kind(NodeKind::Background)?.name.clone(),
            socket::STRENGTH.to_string(),
        ),
    };
    tree.node(&node)?.input(&socket)?;
    Some(SocketRef { node, socket })
}

/// Trägt die Entität aktuell bei? Licht: `enabled`; Socket: verbunden oder Wert > 0.
pub fn is_enabled(scene: &Scene, id: &EntityId) -> bool {
    if let EntityId::Light(name) = id {
        return scene.light(name).is_some_and(|l| l.enabled);
    }
    let (Some(tree), Some(target)) = (tree_of(scene, id), socket_of(scene, id)) else {
        return false;
    };
    tree.is_linked(&target.node, &target.socket)
        || tree
            .input_value(&target.node, &target.socket)
            .is_some_and(|v| v.is_positive())
}

/// Deaktiviert ein Licht (alle drei Sichtbarkeitsfelder) und sichert den vorherigen Zustand.
///
/// Ein bereits vollständig deaktiviertes Licht wird nicht angefasst.
pub(crate) fn suppress_light(scene: &mut Scene, name: &str, store: &mut SnapshotStore) -> bool {
    let Some(light) = scene.light_mut(name) else {
        return false;
    };
    if !light.enabled && light.hide_viewport && light.hide_render {
        return false;
    }
    store.save(
        EntityId::Light(name.to_string()),
        SnapshotRecord::LightVisibility {
            enabled: light.enabled,
            hide_viewport: light.hide_viewport,
            hide_render: light.hide_render,
        },
    );
    light.set_enabled(false);
    true
}

/// Unterdrückt einen Input-Socket: verbundene Kante entfernen (EdgeRef),
/// sonst Wert nullen (ScalarValue). Liefert `true`, wenn mutiert wurde.
pub(crate) fn suppress_input(
    scene: &mut Scene,
    id: &EntityId,
    store: &mut SnapshotStore,
    report: &mut ApplyReport,
) -> bool {
    let Some(target) = socket_of(scene, id) else {
        report.skip(id.clone(), "Ziel existiert nicht");
        return false;
    };
    let Some(tree) = tree_of_mut(scene, id) else {
        return false;
    };

    if tree.is_linked(&target.node, &target.socket) {
        return match tree.remove_link(&target.node, &target.socket) {
            Ok(link) => {
                store.save(
                    id.clone(),
                    SnapshotRecord::EdgeRef {
                        from_node: link.from_node,
                        from_socket: link.from_socket,
                    },
                );
                report.applied(id.clone());
                true
            }
            Err(err) => {
                report.graph_error(id.clone(), err);
                false
            }
        };
    }

    // Unverbundene World-Sockets haben keinen Wert, der genullt werden könnte
    let Some(current) = tree.input_value(&target.node, &target.socket) else {
        return false;
    };
    if matches!(current, SocketValue::Shader) || current == current.zeroed() {
        return false;
    }
    match tree.set_input_value(&target.node, &target.socket, current.zeroed()) {
        Ok(previous) => {
            store.save(id.clone(), SnapshotRecord::ScalarValue { value: previous });
            report.applied(id.clone());
            true
        }
        Err(err) => {
            report.graph_error(id.clone(), err);
            false
        }
    }
}

/// Schaltet eine Entität ohne Backup auf einen Standardwert ein.
///
/// Für Farb-Sockets wird `default_color`, für Skalare `default_strength` gesetzt.
/// Kanten können ohne Backup nicht erraten werden.
pub(crate) fn enable_with_default(
    scene: &mut Scene,
    id: &EntityId,
    default_strength: f32,
    default_color: glam::Vec4,
    report: &mut ApplyReport,
) -> bool {
    if let EntityId::Light(name) = id {
        return match scene.light_mut(name) {
            Some(light) => {
                light.set_enabled(true);
                report.applied(id.clone());
                true
            }
            None => {
                report.skip(id.clone(), "Licht existiert nicht");
                false
            }
        };
    }

    let Some(target) = socket_of(scene, id) else {
        report.skip(id.clone(), "Ziel existiert nicht");
        return false;
    };
    let Some(tree) = tree_of_mut(scene, id) else {
        return false;
    };
    let value = match tree.input_value(&target.node, &target.socket) {
        Some(SocketValue::Float(_)) => SocketValue::Float(default_strength),
        Some(SocketValue::Color(_)) => SocketValue::Color(default_color),
        Some(SocketValue::Shader) | None => {
            report.warn(super::report::EngineWarning::NothingToReconnect(id.clone()));
            return false;
        }
    };
    match tree.set_input_value(&target.node, &target.socket, value) {
        Ok(_) => {
            report.applied(id.clone());
            true
        }
        Err(err) => {
            report.graph_error(id.clone(), err);
            false
        }
    }
}

#![no_main]

//! Baut aus beliebigen Bytes einen (meist zyklischen) Node-Graph und prüft,
//! dass Traversierung und Isolation terminieren und exakt wiederherstellen.

use libfuzzer_sys::fuzz_target;
use light_editor::core::{
    find_all_emission_nodes, find_emission_nodes, is_emissive_output, socket, Socket,
};
use light_editor::{
    EmissiveIndex, IsolationMode, IsolationSession, IsolationTarget, KeepSet, Material, NodeTree,
    Scene, SceneObject, ShaderNode, SocketValue,
};
use std::collections::HashSet;

const NODE_COUNT: usize = 8;

fn node_name(byte: u8) -> String {
    format!("N{}", byte as usize % NODE_COUNT)
}

fn build_tree(data: &[u8]) -> NodeTree {
    let mut tree = NodeTree::new();
    tree.add_node(ShaderNode::material_output("Material Output"));
    for index in 0..NODE_COUNT {
        let name = format!("N{index}");
        let strength = data.get(index).copied().unwrap_or(0) as f32 / 16.0;
        let node = match data.get(index).copied().unwrap_or(0) % 3 {
            0 => ShaderNode::emission(name, strength, glam::Vec4::ONE),
            1 => ShaderNode::principled(name, glam::Vec4::ONE, strength),
            _ => ShaderNode::generic(
                name,
                vec![
                    Socket::new("A", SocketValue::Shader),
                    Socket::new("B", SocketValue::Shader),
                ],
                &[socket::SHADER],
            ),
        };
        tree.add_node(node);
    }

    // Jeweils zwei Bytes: Quelle und Ziel; abgelehnte Kanten werden ignoriert
    for pair in data.chunks_exact(2).skip(NODE_COUNT / 2) {
        let from = node_name(pair[0]);
        let to = if pair[1] == u8::MAX {
            "Material Output".to_string()
        } else {
            node_name(pair[1])
        };
        let output = tree
            .node(&from)
            .and_then(|n| n.outputs.first().cloned())
            .unwrap_or_default();
        let input = if to == "Material Output" {
            socket::SURFACE.to_string()
        } else {
            tree.node(&to)
                .and_then(|n| n.inputs.get(pair[1] as usize % n.inputs.len().max(1)))
                .map(|s| s.name.clone())
                .unwrap_or_default()
        };
        let _ = tree.add_link(&from, &output, &to, &input);
    }
    tree
}

fuzz_target!(|data: &[u8]| {
    let tree = build_tree(data);

    let first = find_emission_nodes(&tree, "Material Output");
    let all = find_all_emission_nodes(&tree, "Material Output");
    let emissive = is_emissive_output(&tree, "Material Output", &mut HashSet::new());
    assert_eq!(first.is_some(), !all.is_empty());
    if emissive {
        assert!(first.is_some());
    }

    let mut scene = Scene::new();
    scene.add_material(Material::with_nodes("Fuzz", tree));
    scene.add_object(SceneObject::mesh("Mesh", &["Fuzz"]));
    let before = scene.clone();

    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();
    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::MaterialGroup, None, KeepSet::default()),
    );
    session.deactivate(&mut scene);
    assert_eq!(scene, before);
});

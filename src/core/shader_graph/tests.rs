use super::*;

fn emission_material_tree() -> NodeTree {
    let mut tree = NodeTree::new();
    tree.add_node(ShaderNode::emission("Emission", 5.0, Vec4::ONE));
    tree.add_node(ShaderNode::material_output("Material Output"));
    tree.add_link("Emission", socket::EMISSION, "Material Output", socket::SURFACE)
        .expect("Kante muss erstellt werden");
    tree
}

#[test]
fn test_add_link_rejects_already_linked_destination() {
    let mut tree = emission_material_tree();
    tree.add_node(ShaderNode::emission("Second", 1.0, Vec4::ONE));

    let err = tree
        .add_link("Second", socket::EMISSION, "Material Output", socket::SURFACE)
        .expect_err("Doppelte Kante muss abgelehnt werden");

    assert!(matches!(err, GraphError::AlreadyLinked { .. }));
    let link = tree.incoming("Material Output", socket::SURFACE).unwrap();
    assert_eq!(link.from_node, "Emission");
}

#[test]
fn test_add_link_rejects_unknown_node_and_socket() {
    let mut tree = emission_material_tree();

    assert!(matches!(
        tree.add_link("Missing", socket::EMISSION, "Material Output", socket::VOLUME),
        Err(GraphError::UnknownNode(_))
    ));
    assert!(matches!(
        tree.add_link("Emission", "Nope", "Material Output", socket::VOLUME),
        Err(GraphError::UnknownSocket { .. })
    ));
    assert!(matches!(
        tree.add_link("Emission", socket::EMISSION, "Material Output", "Nope"),
        Err(GraphError::UnknownSocket { .. })
    ));
}

#[test]
fn test_remove_link_returns_edge_and_fails_when_unlinked() {
    let mut tree = emission_material_tree();

    let link = tree
        .remove_link("Material Output", socket::SURFACE)
        .expect("Kante vorhanden");
    assert_eq!(link.from_socket, socket::EMISSION);
    assert!(!tree.is_linked("Material Output", socket::SURFACE));

    assert!(matches!(
        tree.remove_link("Material Output", socket::SURFACE),
        Err(GraphError::NotLinked { .. })
    ));
}

#[test]
fn test_set_input_value_returns_previous_and_checks_type() {
    let mut tree = emission_material_tree();

    let previous = tree
        .set_input_value("Emission", socket::STRENGTH, SocketValue::Float(0.0))
        .expect("Wert muss gesetzt werden");
    assert_eq!(previous, SocketValue::Float(5.0));
    assert_eq!(
        tree.input_value("Emission", socket::STRENGTH),
        Some(SocketValue::Float(0.0))
    );

    assert!(matches!(
        tree.set_input_value("Emission", socket::STRENGTH, SocketValue::Color(Vec4::ONE)),
        Err(GraphError::ValueTypeMismatch { .. })
    ));
}

#[test]
fn test_remove_node_drops_connected_links() {
    let mut tree = emission_material_tree();

    assert!(tree.remove_node("Emission").is_some());
    assert_eq!(tree.link_count(), 0);
    assert!(tree.node("Emission").is_none());
}

#[test]
fn test_zeroed_color_keeps_alpha_opaque() {
    let value = SocketValue::Color(Vec4::new(0.5, 0.2, 0.1, 0.3));
    assert_eq!(value.zeroed(), SocketValue::Color(Vec4::new(0.0, 0.0, 0.0, 1.0)));
    assert!(!value.zeroed().is_positive());
    assert!(value.is_positive());
}

#[test]
fn test_json_roundtrip_keeps_links() {
    let tree = emission_material_tree();
    let json = serde_json::to_string(&tree).expect("Serialisierung");
    let back: NodeTree = serde_json::from_str(&json).expect("Deserialisierung");
    assert_eq!(back, tree);
}

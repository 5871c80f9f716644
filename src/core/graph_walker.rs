//! Traversierung des Shader-Graphs entlang eingehender Kanten.
//!
//! Der Graph ist vom Benutzer editierbar und nicht garantiert azyklisch.
//! Jede Traversierung erhält daher ein explizites Visited-Set (Node-Namen);
//! jeder Node wird pro Set höchstens einmal klassifiziert.

use super::shader_graph::{socket, NodeKind, NodeTree, ShaderNode};
use std::collections::HashSet;

/// Ergebnis der Klassifizierung eines besuchten Nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Visit<T> {
    /// Treffer; hinter diesem Node wird nicht weiter traversiert
    Match(T),
    /// Kein Treffer, aber Traversierung endet an diesem Node
    Stop,
    /// Weiter zu den Quell-Nodes der verbundenen Inputs
    Descend,
}

/// Abbruchverhalten der Traversierung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMode {
    /// Erster Treffer beendet die gesamte Traversierung
    FirstMatch,
    /// Alle erreichbaren Treffer sammeln
    AllMatches,
}

/// Tiefensuche ab `start` über eingehende Kanten.
///
/// Inputs werden in Host-Reihenfolge besucht (erster Input zuerst).
/// Kanten zu nicht (mehr) existierenden Nodes werden ignoriert.
pub fn depth_first<'a, T>(
    tree: &'a NodeTree,
    start: &str,
    visited: &mut HashSet<String>,
    mode: WalkMode,
    mut classify: impl FnMut(&'a NodeTree, &'a ShaderNode) -> Visit<T>,
) -> Vec<T> {
    let mut found = Vec::new();
    let mut stack: Vec<&'a ShaderNode> = tree.node(start).into_iter().collect();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.name.clone()) {
            continue;
        }
        match classify(tree, node) {
            Visit::Match(hit) => {
                found.push(hit);
                if mode == WalkMode::FirstMatch {
                    break;
                }
            }
            Visit::Stop => {}
            Visit::Descend => {
                let sources: Vec<&str> = tree.inbound_sources(node).collect();
                for source in sources.into_iter().rev() {
                    if let Some(next) = tree.node(source) {
                        stack.push(next);
                    }
                }
            }
        }
    }

    found
}

/// Emissionsfähiger Node samt steuerndem Input-Socket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmissionNode {
    /// Node-Name
    pub node: String,
    /// Steuernder Input (Strength, sonst Emission Color); None wenn keiner existiert
    pub control: Option<String>,
}

/// Klassifiziert emissionsfähige Nodes: Emission oder Principled mit Emission-Inputs.
fn classify_emission_capable(_tree: &NodeTree, node: &ShaderNode) -> Visit<EmissionNode> {
    match node.kind {
        NodeKind::Emission => Visit::Match(EmissionNode {
            node: node.name.clone(),
            control: node.input(socket::STRENGTH).map(|s| s.name.clone()),
        }),
        NodeKind::PrincipledSurface => {
            let control = node
                .input(socket::EMISSION_STRENGTH)
                .or_else(|| node.input(socket::EMISSION_COLOR))
                .map(|s| s.name.clone());
            Visit::Match(EmissionNode {
                node: node.name.clone(),
                control,
            })
        }
        _ => Visit::Descend,
    }
}

/// Erster emissionsfähiger Node ab `entry` (DFS); None wenn keiner erreichbar ist.
pub fn find_emission_nodes(tree: &NodeTree, entry: &str) -> Option<EmissionNode> {
    let mut visited = HashSet::new();
    depth_first(tree, entry, &mut visited, WalkMode::FirstMatch, classify_emission_capable)
        .into_iter()
        .next()
}

/// Alle emissionsfähigen Nodes ab `entry` in DFS-Reihenfolge.
pub fn find_all_emission_nodes(tree: &NodeTree, entry: &str) -> Vec<EmissionNode> {
    let mut visited = HashSet::new();
    depth_first(tree, entry, &mut visited, WalkMode::AllMatches, classify_emission_capable)
}

/// Trägt ein skalarer/farbiger Input aktuell Licht bei (verbunden oder Wert > 0)?
fn input_contributes(tree: &NodeTree, node: &ShaderNode, input: &str) -> Option<bool> {
    let socket = node.input(input)?;
    Some(tree.is_linked(&node.name, input) || socket.value.is_positive())
}

/// Ist der Node selbst ein aktuell leuchtender emissionsfähiger Node?
///
/// - Emission: Strength verbunden oder > 0
/// - Principled: Emission Strength verbunden oder > 0; ohne diesen Socket
///   ein RGB-Kanal der Emission Color > 0
pub fn node_emits(tree: &NodeTree, node: &ShaderNode) -> bool {
    match node.kind {
        NodeKind::Emission => input_contributes(tree, node, socket::STRENGTH).unwrap_or(false),
        NodeKind::PrincipledSurface => match input_contributes(tree, node, socket::EMISSION_STRENGTH) {
            Some(emits) => emits,
            None => node
                .input(socket::EMISSION_COLOR)
                .is_some_and(|s| s.value.is_positive()),
        },
        _ => false,
    }
}

/// Prüft ob ab `node` ein aktuell leuchtender Emissions-Node erreichbar ist.
///
/// Nicht leuchtende emissionsfähige Nodes beenden ihren Zweig. Der Aufrufer
/// stellt pro Prüfung ein eigenes Visited-Set bereit, damit zusammenlaufende
/// Zweige nicht fälschlich als bereits negativ geprüft gelten.
pub fn is_emissive_output(tree: &NodeTree, node: &str, visited: &mut HashSet<String>) -> bool {
    let hits = depth_first(tree, node, visited, WalkMode::FirstMatch, |tree, n| match n.kind {
        NodeKind::Emission | NodeKind::PrincipledSurface => {
            if node_emits(tree, n) {
                Visit::Match(())
            } else {
                Visit::Stop
            }
        }
        _ => Visit::Descend,
    });
    !hits.is_empty()
}

/// Einstiegs-Node eines Materials: Quelle des Surface-Inputs am Material-Output.
///
/// Kein Output-Node oder unverbundener Surface-Input gilt als "nicht emissiv", nicht als Fehler.
pub fn material_entry(tree: &NodeTree) -> Option<&str> {
    let output = tree.first_of_kind(NodeKind::MaterialOutput)?;
    tree.incoming(&output.name, socket::SURFACE)
        .map(|link| link.from_node.as_str())
}

/// Erster World-Output-Node eines World-Graphs.
pub fn world_output(tree: &NodeTree) -> Option<&ShaderNode> {
    tree.first_of_kind(NodeKind::WorldOutput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shader_graph::{Socket, SocketValue};
    use glam::Vec4;

    fn mix_node(name: &str) -> ShaderNode {
        ShaderNode::generic(
            name,
            vec![
                Socket::new("Fac", SocketValue::Float(0.5)),
                Socket::new("Shader", SocketValue::Shader),
                Socket::new("Shader_001", SocketValue::Shader),
            ],
            &[socket::SHADER],
        )
    }

    /// Output ← Mix ← (Principled, Emission)
    fn mixed_tree(emission_strength: f32) -> NodeTree {
        let mut tree = NodeTree::new();
        tree.add_node(ShaderNode::material_output("Output"));
        tree.add_node(mix_node("Mix"));
        tree.add_node(ShaderNode::principled("Principled", Vec4::ZERO, 0.0));
        tree.add_node(ShaderNode::emission("Emission", emission_strength, Vec4::ONE));
        tree.add_link("Mix", socket::SHADER, "Output", socket::SURFACE).unwrap();
        tree.add_link("Principled", socket::BSDF, "Mix", "Shader").unwrap();
        tree.add_link("Emission", socket::EMISSION, "Mix", "Shader_001").unwrap();
        tree
    }

    #[test]
    fn test_material_entry_follows_surface_link() {
        let tree = mixed_tree(3.0);
        assert_eq!(material_entry(&tree), Some("Mix"));

        let mut unlinked = NodeTree::new();
        unlinked.add_node(ShaderNode::material_output("Output"));
        assert_eq!(material_entry(&unlinked), None);
        assert_eq!(material_entry(&NodeTree::new()), None);
    }

    #[test]
    fn test_find_emission_nodes_first_match_in_input_order() {
        let tree = mixed_tree(3.0);
        let hit = find_emission_nodes(&tree, "Mix").expect("Treffer erwartet");
        assert_eq!(hit.node, "Principled");
        assert_eq!(hit.control.as_deref(), Some(socket::EMISSION_STRENGTH));
    }

    #[test]
    fn test_find_all_emission_nodes_lists_every_branch() {
        let tree = mixed_tree(3.0);
        let all: Vec<String> = find_all_emission_nodes(&tree, "Mix")
            .into_iter()
            .map(|n| n.node)
            .collect();
        assert_eq!(all, vec!["Principled".to_string(), "Emission".to_string()]);
    }

    #[test]
    fn test_principled_without_strength_falls_back_to_color() {
        let mut tree = NodeTree::new();
        tree.add_node(ShaderNode::generic(
            "OldPrincipled",
            vec![Socket::new(socket::EMISSION_COLOR, SocketValue::Color(Vec4::ONE))],
            &[socket::BSDF],
        ));
        // Als Principled deklarieren, aber ohne Strength-Socket
        let mut node = tree.node("OldPrincipled").unwrap().clone();
        node.kind = NodeKind::PrincipledSurface;
        tree.add_node(node);

        let hit = find_emission_nodes(&tree, "OldPrincipled").unwrap();
        assert_eq!(hit.control.as_deref(), Some(socket::EMISSION_COLOR));
        assert!(is_emissive_output(&tree, "OldPrincipled", &mut HashSet::new()));
    }

    #[test]
    fn test_is_emissive_output_checks_reconverging_branches() {
        // Principled ist nicht emissiv, Emission schon → Gesamtergebnis emissiv
        let tree = mixed_tree(3.0);
        assert!(is_emissive_output(&tree, "Mix", &mut HashSet::new()));

        let dark = mixed_tree(0.0);
        assert!(!is_emissive_output(&dark, "Mix", &mut HashSet::new()));
    }

    #[test]
    fn test_linked_strength_counts_as_emissive() {
        let mut tree = mixed_tree(0.0);
        tree.add_node(ShaderNode::generic("Value", vec![], &["Value"]));
        tree.add_link("Value", "Value", "Emission", socket::STRENGTH).unwrap();
        assert!(is_emissive_output(&tree, "Mix", &mut HashSet::new()));
    }

    #[test]
    fn test_cycle_terminates_with_same_result_as_acyclic_graph() {
        let acyclic = mixed_tree(3.0);
        let mut cyclic = acyclic.clone();
        // Zyklus Mix → Fac ← Mix2 ← Mix (nicht auf dem Pfad zur Emission)
        cyclic.add_node(mix_node("Mix2"));
        cyclic.add_link("Mix2", socket::SHADER, "Mix", "Fac").unwrap();
        cyclic.add_link("Mix", socket::SHADER, "Mix2", "Shader").unwrap();

        assert_eq!(
            find_emission_nodes(&cyclic, "Mix"),
            find_emission_nodes(&acyclic, "Mix")
        );
        assert_eq!(
            find_all_emission_nodes(&cyclic, "Mix"),
            find_all_emission_nodes(&acyclic, "Mix")
        );
        assert_eq!(
            is_emissive_output(&cyclic, "Mix", &mut HashSet::new()),
            is_emissive_output(&acyclic, "Mix", &mut HashSet::new())
        );
    }

    #[test]
    fn test_self_loop_without_emission_returns_none() {
        let mut tree = NodeTree::new();
        tree.add_node(mix_node("Loop"));
        tree.add_link("Loop", socket::SHADER, "Loop", "Shader").unwrap();

        assert_eq!(find_emission_nodes(&tree, "Loop"), None);
        assert!(!is_emissive_output(&tree, "Loop", &mut HashSet::new()));
    }
}

use super::*;
use crate::core::{socket, LightKind, Material, NodeTree, SceneObject, ShaderNode, SocketValue, World};
use glam::Vec4;

fn emission_material(name: &str, strength: f32) -> Material {
    let mut tree = NodeTree::new();
    tree.add_node(ShaderNode::emission("Emission", strength, Vec4::ONE));
    tree.add_node(ShaderNode::material_output("Output"));
    tree.add_link("Emission", socket::EMISSION, "Output", socket::SURFACE)
        .unwrap();
    Material::with_nodes(name, tree)
}

fn scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::light("L1", LightKind::Point));
    scene.add_object(SceneObject::light("L2", LightKind::Area));
    scene.add_material(emission_material("M1", 5.0));
    scene.add_material(emission_material("M2", 2.0));
    scene.add_object(SceneObject::mesh("Panel", &["M1"]));
    scene.add_object(SceneObject::mesh("Strip", &["M2"]));
    scene.world = Some(World::with_background("World", 1.0));
    scene
}

fn strength(scene: &Scene, material: &str) -> Option<SocketValue> {
    scene
        .material_tree(material)?
        .input_value("Emission", socket::STRENGTH)
}

#[test]
fn test_single_light_isolation_and_restore() {
    let mut scene = scene();
    let before = scene.clone();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();

    let report = session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleLight, Some("L1".into()), KeepSet::light("L1")),
    );

    assert!(report.is_clean());
    assert!(scene.light("L1").unwrap().enabled);
    assert!(!scene.light("L2").unwrap().enabled);
    assert_eq!(strength(&scene, "M1"), Some(SocketValue::Float(0.0)));
    assert!(session.is_active(Some(IsolationMode::SingleLight), Some("L1")));
    assert!(!session.store().is_empty());

    let restored = session.deactivate(&mut scene);

    assert!(restored.is_clean());
    assert_eq!(scene, before);
    assert!(session.store().is_empty());
    assert!(!session.is_active(None, None));
}

#[test]
fn test_environment_surface_keeps_surface_edge() {
    let mut scene = scene();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();

    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::environment(IsolationMode::EnvironmentSurface),
    );

    let world = scene.world_tree().unwrap();
    assert!(world.is_linked("World Output", socket::SURFACE));
    assert_eq!(
        world.input_value("Background", socket::STRENGTH),
        Some(SocketValue::Float(0.0))
    );
    assert!(!session.store().contains(&EntityId::EnvironmentSocket(EnvSocket::Surface)));
}

#[test]
fn test_reactivation_supersedes_previous_target() {
    let mut scene = scene();
    let before = scene.clone();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();

    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleLight, Some("L1".into()), KeepSet::light("L1")),
    );
    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleLight, Some("L2".into()), KeepSet::light("L2")),
    );

    assert!(!session.is_active(Some(IsolationMode::SingleLight), Some("L1")));
    assert!(session.is_active(Some(IsolationMode::SingleLight), Some("L2")));
    assert!(!session.store().contains(&EntityId::Light("L2".into())));
    assert!(session.store().contains(&EntityId::Light("L1".into())));
    assert!(scene.light("L2").unwrap().enabled);
    assert!(!scene.light("L1").unwrap().enabled);

    session.deactivate(&mut scene);
    assert_eq!(scene, before);
}

#[test]
fn test_deactivate_when_idle_is_noop() {
    let mut scene = scene();
    let before = scene.clone();
    let mut session = IsolationSession::new();

    let report = session.deactivate(&mut scene);

    assert_eq!(report, ApplyReport::new());
    assert_eq!(scene, before);
    assert_eq!(session.active_info(), None);
}

#[test]
fn test_is_active_predicate() {
    let mut scene = scene();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();
    assert!(!session.is_active(None, None));

    let mut keep = KeepSet::default();
    keep.emissives
        .insert(EntityId::emission("M1", "Emission", socket::STRENGTH));
    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleMaterial, Some("M1".into()), keep),
    );

    assert!(session.is_active(None, None));
    assert!(session.is_active(Some(IsolationMode::SingleMaterial), None));
    assert!(!session.is_active(Some(IsolationMode::MaterialGroup), None));
    assert!(!session.is_active(Some(IsolationMode::SingleMaterial), Some("M2")));
    assert_eq!(
        session.active_info(),
        Some((IsolationMode::SingleMaterial, Some("M1")))
    );
    assert_eq!(strength(&scene, "M1"), Some(SocketValue::Float(5.0)));
    assert_eq!(strength(&scene, "M2"), Some(SocketValue::Float(0.0)));
}

#[test]
fn test_deleted_material_is_skipped_on_restore() {
    let mut scene = scene();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();

    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleLight, Some("L1".into()), KeepSet::light("L1")),
    );
    scene.materials.shift_remove("M2");

    let report = session.deactivate(&mut scene);

    assert!(report.is_clean());
    assert_eq!(
        report.skipped,
        vec![EntityId::emission("M2", "Emission", socket::STRENGTH)]
    );
    assert_eq!(strength(&scene, "M1"), Some(SocketValue::Float(5.0)));
    assert!(scene.light("L2").unwrap().enabled);
}

#[test]
fn test_discard_drops_records_without_restore() {
    let mut scene = scene();
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();
    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::environment(IsolationMode::Environment),
    );

    session.discard();

    assert!(session.store().is_empty());
    assert!(!session.is_active(None, None));
    assert!(!scene.light("L1").unwrap().enabled);
}

#[test]
fn test_group_target_resolves_against_restored_scene() {
    let mut scene = scene();
    let mut index = EmissiveIndex::new();
    index.set_cache_enabled(false);
    let mut session = IsolationSession::new();

    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::for_group(
            IsolationMode::SingleMaterial,
            GroupDescriptor::SingleMaterial("M1".into()),
            NameFilter::none(),
        ),
    );
    assert_eq!(strength(&scene, "M2"), Some(SocketValue::Float(0.0)));

    session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::for_group(
            IsolationMode::SingleMaterial,
            GroupDescriptor::SingleMaterial("M2".into()),
            NameFilter::none(),
        ),
    );

    assert_eq!(strength(&scene, "M2"), Some(SocketValue::Float(2.0)));
    assert_eq!(strength(&scene, "M1"), Some(SocketValue::Float(0.0)));
    assert!(session.is_active(Some(IsolationMode::SingleMaterial), Some("M2")));
}

#[test]
fn test_activation_without_mutation_is_active_with_empty_store() {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::light("L1", LightKind::Point));
    scene.add_object(SceneObject::light("L2", LightKind::Point));
    scene.light_mut("L2").unwrap().set_enabled(false);
    let mut index = EmissiveIndex::new();
    let mut session = IsolationSession::new();

    let report = session.activate(
        &mut scene,
        &mut index,
        IsolationTarget::new(IsolationMode::SingleLight, Some("L1".into()), KeepSet::light("L1")),
    );

    assert!(report.applied.is_empty());
    assert!(session.is_active(Some(IsolationMode::SingleLight), Some("L1")));
    assert!(session.store().is_empty());
}

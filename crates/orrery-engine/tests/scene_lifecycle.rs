use std::future::ready;

use orrery_engine::{
    build_render_buffer, BodyRegistry, BoundaryState, BoundaryView, FailurePolicy, FieldKind, LazyBoundary,
    Placeholder, RenderBuffer, RequestOutcome, SceneComposer, SceneError, SceneHandle, SceneVariant,
    MAX_FIELD_ELEMENTS,
};
use pollster::block_on;

#[test]
fn canonical_solar_system_scene() {
    let config = SceneVariant::SolarSystem
        .config()
        .with_focus_set(["earth", "mars", "jupiter"]);
    let scene = SceneComposer::builtin().compose(&config).unwrap();

    assert_eq!(scene.bodies().len(), 4);
    assert_eq!(scene.bodies()[0].id(), "sun");
    assert_eq!(scene.field(FieldKind::AsteroidBelt).map(|f| f.len()), Some(20));
    assert_eq!(scene.field(FieldKind::StarField).map(|f| f.len()), Some(50));
}

#[test]
fn focus_set_size_plus_central() {
    let registry = BodyRegistry::builtin();
    let ids: Vec<String> = registry.all().iter().map(|b| b.id.clone()).collect();
    for n in 0..=ids.len() {
        let config = SceneVariant::Skills.config().with_focus_set(ids[..n].to_vec());
        let scene = SceneComposer::new(registry).compose(&config).unwrap();
        assert_eq!(scene.bodies().len(), n + 1);
    }
}

#[test]
fn absent_body_is_not_found() {
    let config = SceneVariant::SolarSystem.config().with_focus_set(["pluto"]);
    match SceneComposer::builtin().compose(&config) {
        Err(SceneError::NotFound { id }) => assert_eq!(id, "pluto"),
        Err(other) => panic!("wrong error: {other}"),
        Ok(_) => panic!("composed a scene with an unknown body"),
    }
}

#[test]
fn orbital_angle_is_linear_for_every_body() {
    let mut scene = SceneComposer::builtin()
        .compose(&SceneVariant::Contact.config().with_seed(1))
        .unwrap();
    for t in [0.0_f32, 0.5, 12.0, 240.0] {
        scene.on_frame(t);
        for body in scene.bodies() {
            assert_eq!(body.state.orbital_angle, body.descriptor.orbital_speed * t);
        }
    }
}

#[test]
fn unmount_mid_animation_stops_frames() {
    let boundary: LazyBoundary<SceneHandle> =
        LazyBoundary::new(Placeholder::spinner("Loading scene"), FailurePolicy::KeepPlaceholder);
    let scene = SceneComposer::builtin().compose(&SceneVariant::About.config());
    assert_eq!(boundary.resolve(scene), RequestOutcome::Applied);

    let mut frames = 0;
    for i in 0..30 {
        if boundary.with_ready_mut(|s| s.on_frame(i as f32 / 60.0)) == Some(true) {
            frames += 1;
        }
    }
    assert_eq!(frames, 30);

    boundary.unmount();
    assert_eq!(boundary.with_ready_mut(|s| s.on_frame(1.0)), None);
    assert_eq!(boundary.state(), BoundaryState::Unmounted);
}

#[test]
fn unmount_while_loading_discards_module() {
    let boundary: LazyBoundary<SceneHandle> = LazyBoundary::new(Placeholder::Empty, FailurePolicy::Collapse);
    let pending = boundary.request(ready(SceneComposer::builtin().compose(&SceneVariant::Projects.config())));
    boundary.unmount();
    assert_eq!(block_on(pending), RequestOutcome::Abandoned);
    assert!(!boundary.is_mounted());
}

#[test]
fn every_variant_renders_a_frame() {
    for variant in SceneVariant::ALL {
        let mut scene = SceneComposer::builtin().compose(&variant.config().with_seed(21)).unwrap();
        assert!(scene.on_frame(3.0), "{variant}");
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&scene, &mut buffer);
        assert!(buffer.instance_count() > 0, "{variant}");
    }
}

#[test]
fn composition_failure_behind_boundary_shows_nothing() {
    let boundary: LazyBoundary<SceneHandle> =
        LazyBoundary::new(Placeholder::spinner("Loading scene"), FailurePolicy::KeepPlaceholder);
    let config = SceneVariant::Contact.config().with_focus_set(["pluto"]);
    assert_eq!(boundary.resolve(SceneComposer::builtin().compose(&config)), RequestOutcome::Failed);
    assert_eq!(boundary.state(), BoundaryState::Failed(SceneError::not_found("pluto")));
    assert!(boundary.view(|v| matches!(v, BoundaryView::Empty)));
}

#[test]
fn oversized_field_fails_without_panicking() {
    let mut config = SceneVariant::Projects.config();
    config.recipe.fields[0].count = usize::MAX;
    assert!(matches!(
        SceneComposer::builtin().compose(&config),
        Err(SceneError::Configuration { .. })
    ));
    config.recipe.fields[0].count = MAX_FIELD_ELEMENTS;
    assert!(SceneComposer::builtin().compose(&config.with_seed(1)).is_ok());
}

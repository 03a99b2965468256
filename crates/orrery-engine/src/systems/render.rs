use crate::assets::bodies::{RING_COLOR, RING_GLOW, RING_GLOW_INTENSITY, RING_INNER_RADIUS, RING_OPACITY, RING_OUTER_RADIUS};
use crate::components::material::{Material, Shape};
use crate::core::scene::SceneHandle;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer for the scene's current frame.
/// Opaque instances first, then translucent ones; `transparent_split` marks the boundary.
pub fn build_render_buffer(scene: &SceneHandle, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut opaque: Vec<RenderInstance> = Vec::new();
    let mut translucent: Vec<RenderInstance> = Vec::new();
    let mut push = |inst: RenderInstance| {
        if inst.is_transparent() {
            translucent.push(inst)
        } else {
            opaque.push(inst)
        }
    };

    let ring_material = Material::new(RING_COLOR)
        .with_glow(RING_GLOW, RING_GLOW_INTENSITY)
        .with_surface(0.8, 0.1)
        .with_opacity(RING_OPACITY);

    for body in scene.bodies() {
        push(RenderInstance::new(body.transform.to_matrix(), Shape::Sphere, &body.material));
        if let Some(ring) = &body.ring_transform {
            push(
                RenderInstance::new(ring.to_matrix(), Shape::Ring, &ring_material)
                    .with_param(RING_INNER_RADIUS / RING_OUTER_RADIUS),
            );
        }
    }

    for (index, field) in scene.fields().iter().enumerate() {
        for (element, tf) in field.elements.iter().zip(scene.element_transforms(index)) {
            push(RenderInstance::new(tf.to_matrix(), element.shape, &element.material()));
        }
    }

    for (accent, tf) in scene.accents().iter().zip(scene.accent_transforms()) {
        push(RenderInstance::new(tf.to_matrix(), accent.shape, &accent.material()));
    }

    let split = opaque.len() as u32;
    for inst in opaque {
        buffer.push(inst);
    }
    buffer.set_transparent_split(split);
    for inst in translucent {
        buffer.push(inst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recipe::{FloatIntensity, SceneVariant};
    use crate::api::types::Color;
    use crate::core::composer::SceneComposer;

    #[test]
    fn hero_frame_has_every_object() {
        let mut scene = SceneComposer::builtin()
            .compose(&SceneVariant::SolarSystem.config().with_seed(3))
            .unwrap();
        scene.on_frame(2.0);
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        // sun + 3 planets + 20 rocks + 50 stars
        assert_eq!(buf.instance_count(), 74);
        // rocks and the four bodies are opaque
        assert_eq!(buf.transparent_split, 24);
        assert!(buf.instances[..24].iter().all(|i| !i.is_transparent()));
    }

    #[test]
    fn ring_is_emitted_for_saturn() {
        let scene = SceneComposer::builtin()
            .compose(&SceneVariant::Contact.config().with_seed(3))
            .unwrap();
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        let rings = buf.instances.iter().filter(|i| i.shape == Shape::Ring.code()).count();
        assert_eq!(rings, 1);
    }

    #[test]
    fn field_glow_follows_palette() {
        let scene = SceneComposer::builtin()
            .compose(&SceneVariant::SolarSystem.config().with_seed(3))
            .unwrap();
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        let rock_glow = Color::hex(0x2F2F2F);
        let rock = buf.instances[..24]
            .iter()
            .find(|i| i.shape == Shape::Box.code())
            .unwrap();
        assert_eq!(rock.glow, [rock_glow.r, rock_glow.g, rock_glow.b, 0.02]);
        assert_eq!(rock.roughness, 0.9);
    }

    #[test]
    fn overlay_emits_octahedra() {
        let scene = SceneComposer::builtin()
            .compose(&SceneVariant::Floating(FloatIntensity::Low).config().with_seed(3))
            .unwrap();
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        assert_eq!(buf.instance_count(), 3);
        assert_eq!(buf.instances.iter().filter(|i| i.shape == Shape::Octahedron.code()).count(), 1);
        assert!(buf.instances.iter().all(|i| i.glow[3] == 0.15));
    }

    #[test]
    fn rebuild_replaces_previous_frame() {
        let scene = SceneComposer::builtin()
            .compose(&SceneVariant::About.config().with_seed(3))
            .unwrap();
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        let first = buf.instance_count();
        build_render_buffer(&scene, &mut buf);
        assert_eq!(buf.instance_count(), first);
    }
}

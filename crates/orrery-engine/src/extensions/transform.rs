// extensions/transform.rs
//
// Pure transform evaluation. Every transform is recomputed from immutable
// inputs (descriptor, elapsed time, system yaw) each frame; nothing keeps a
// mutable handle to a render node.
//
// Composition, outermost first:
//   system yaw · orbital yaw · translate(distance) · hover · spin · scale

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::recipe::Accent;
use crate::assets::bodies::{RING_OUTER_RADIUS, RING_TILT};
use crate::components::body::SceneBody;
use crate::systems::fields::FieldElement;

/// Translation, rotation and scale of one rendered object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Gentle bob-and-wobble applied on top of a body's placement.
///
/// Follows the usual "float" helper: the phase advances at `speed / 4`
/// radians per second, the bob height is `sin(phase) / 10 · float_intensity`,
/// and the wobble angles are scaled by `rotation_intensity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Hover {
    pub const NONE: Hover = Hover {
        speed: 0.0,
        rotation_intensity: 0.0,
        float_intensity: 0.0,
    };

    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }

    /// Vertical offset and wobble rotation at time `t`.
    pub fn sample(&self, t: f32, phase: f32) -> (f32, Quat) {
        if self.speed == 0.0 {
            return (0.0, Quat::IDENTITY);
        }
        let a = phase + t * self.speed / 4.0;
        let wobble = Quat::from_euler(
            glam::EulerRot::XYZ,
            a.cos() / 8.0 * self.rotation_intensity,
            a.sin() / 8.0 * self.rotation_intensity,
            a.sin() / 20.0 * self.rotation_intensity,
        );
        (a.sin() / 10.0 * self.float_intensity, wobble)
    }
}

/// World transform of a body at `elapsed` seconds, given the system yaw.
/// Reads `body.state`, so the clock must have ticked for the same `elapsed`.
pub fn transform_at(body: &SceneBody, elapsed: f32, system_yaw: f32) -> Transform {
    let yaw = Quat::from_rotation_y(system_yaw + body.state.orbital_angle);
    let (bob, wobble) = body.hover.sample(elapsed, 0.0);
    let local = Vec3::new(body.descriptor.orbital_distance, bob, 0.0);
    Transform {
        translation: yaw * local,
        rotation: yaw * wobble * Quat::from_rotation_y(body.state.spin_angle),
        scale: Vec3::splat(body.descriptor.radius),
    }
}

/// Ring placement for a ringed body. Rides the orbit but not the hover.
pub fn ring_transform_at(body: &SceneBody, system_yaw: f32) -> Transform {
    let yaw = Quat::from_rotation_y(system_yaw + body.state.orbital_angle);
    Transform {
        translation: yaw * Vec3::new(body.descriptor.orbital_distance, 0.0, 0.0),
        rotation: yaw * Quat::from_rotation_x(RING_TILT),
        scale: Vec3::splat(RING_OUTER_RADIUS),
    }
}

/// Transform of a procedural field element inside a group rotating by `group_yaw`.
pub fn element_transform_at(element: &FieldElement, elapsed: f32, group_yaw: f32) -> Transform {
    let yaw = Quat::from_rotation_y(group_yaw);
    let hover = Hover::new(element.float_speed, element.rotation_intensity, element.float_intensity);
    let (bob, wobble) = hover.sample(elapsed, element.phase);
    Transform {
        translation: yaw * (element.position + Vec3::Y * bob),
        rotation: yaw * wobble,
        scale: element.size,
    }
}

/// Transform of a hand-placed accent inside the same rotating group as the particles.
pub fn accent_transform_at(accent: &Accent, elapsed: f32, group_yaw: f32) -> Transform {
    let yaw = Quat::from_rotation_y(group_yaw);
    let (bob, wobble) = accent.hover.sample(elapsed, accent.phase);
    Transform {
        translation: yaw * (accent.position + Vec3::Y * bob),
        rotation: yaw * wobble,
        scale: Vec3::splat(accent.size),
    }
}

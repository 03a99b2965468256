use crate::assets::catalog::CelestialBodyDescriptor;
use crate::components::material::Material;
use crate::extensions::transform::{Hover, Transform};

/// Per-body animation state. Pure function of elapsed time; never accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitalState {
    /// Angular position around the central body, radians.
    pub orbital_angle: f32,
    /// Rotation about the body's own axis, radians.
    pub spin_angle: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRole {
    Central,
    Orbiting,
}

/// A body mounted in one scene instance.
/// Owns its descriptor copy and state, so nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct SceneBody {
    pub descriptor: CelestialBodyDescriptor,
    pub role: BodyRole,
    pub material: Material,
    /// Spin radians per second.
    pub spin_factor: f32,
    pub hover: Hover,
    pub state: OrbitalState,
    /// World transform as of the last frame.
    pub transform: Transform,
    /// Ring transform, present only for ringed bodies.
    pub ring_transform: Option<Transform>,
}

impl SceneBody {
    pub fn new(descriptor: CelestialBodyDescriptor, role: BodyRole) -> Self {
        Self {
            material: descriptor.material(0.0),
            descriptor,
            role,
            spin_factor: 0.0,
            hover: Hover::NONE,
            state: OrbitalState::default(),
            transform: Transform::IDENTITY,
            ring_transform: None,
        }
    }

    // -- Builder pattern --

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_spin_factor(mut self, spin_factor: f32) -> Self {
        self.spin_factor = spin_factor;
        self
    }

    pub fn with_hover(mut self, hover: Hover) -> Self {
        self.hover = hover;
        self
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn is_central(&self) -> bool {
        self.role == BodyRole::Central
    }
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::components::material::{Material, Shape};

/// Per-instance render data read by the page's 3D renderer.
/// Must match the host protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major model matrix.
    pub model: [f32; 16],
    /// Base color RGB and opacity.
    pub base_color: [f32; 4],
    /// Emissive color RGB and intensity.
    pub glow: [f32; 4],
    pub roughness: f32,
    pub metalness: f32,
    /// `Shape` wire code.
    pub shape: f32,
    /// Shape parameter: inner/outer radius ratio for rings, 0 otherwise.
    pub param: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: Mat4, shape: Shape, material: &Material) -> Self {
        let base = material.base_color;
        let glow = material.glow_color;
        Self {
            model: model.to_cols_array(),
            base_color: [base.r, base.g, base.b, material.opacity],
            glow: [glow.r, glow.g, glow.b, material.glow_intensity],
            roughness: material.roughness,
            metalness: material.metalness,
            shape: shape.code(),
            param: 0.0,
        }
    }

    pub fn with_param(mut self, param: f32) -> Self {
        self.param = param;
        self
    }

    pub fn opacity(&self) -> f32 {
        self.base_color[3]
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }
}

/// Render buffer containing all instances of one scene frame.
pub struct RenderBuffer {
    /// Instances ordered for blending: opaque first, then translucent
    /// instances from `transparent_split` on.
    pub instances: Vec<RenderInstance>,
    /// Index of the first translucent instance.
    pub transparent_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(128),
            transparent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Color;

    #[test]
    fn render_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), 112);
        assert_eq!(RenderInstance::FLOATS, 28);
    }

    #[test]
    fn material_lands_in_wire_slots() {
        let material = Material::new(Color::hex(0xFF0000))
            .with_glow(Color::hex(0x0000FF), 0.8)
            .with_surface(0.3, 0.6)
            .with_opacity(0.5);
        let inst = RenderInstance::new(Mat4::IDENTITY, Shape::Box, &material);
        assert_eq!(inst.base_color, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(inst.glow, [0.0, 0.0, 1.0, 0.8]);
        assert_eq!(inst.shape, 1.0);
        assert!(inst.is_transparent());
    }

    #[test]
    fn buffer_exposes_flat_floats() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::new(Mat4::IDENTITY, Shape::Sphere, &Material::default()));
        buf.push(RenderInstance::new(Mat4::IDENTITY, Shape::Sphere, &Material::default()));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 56);
        assert_eq!(buf.as_floats()[0], 1.0);
    }
}

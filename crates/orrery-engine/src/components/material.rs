use serde::{Deserialize, Serialize};

use crate::api::types::Color;

/// Geometry primitive the host renderer instantiates.
/// The numeric value is the wire code in `RenderInstance::shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Sphere = 0,
    Box = 1,
    Octahedron = 2,
    Ring = 3,
}

impl Shape {
    pub fn code(self) -> f32 {
        self as u32 as f32
    }
}

/// Standard PBR-ish material consumed by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub glow_color: Color,
    /// Emissive multiplier applied to `glow_color`.
    pub glow_intensity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// 1.0 = opaque.
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Color::new(0.6, 0.6, 0.8),
            glow_color: Color::BLACK,
            glow_intensity: 0.0,
            roughness: 0.5,
            metalness: 0.0,
            opacity: 1.0,
        }
    }
}

impl Material {
    pub fn new(base_color: Color) -> Self {
        Self {
            base_color,
            ..Default::default()
        }
    }

    pub fn with_glow(mut self, color: Color, intensity: f32) -> Self {
        self.glow_color = color;
        self.glow_intensity = intensity;
        self
    }

    pub fn with_surface(mut self, roughness: f32, metalness: f32) -> Self {
        self.roughness = roughness;
        self.metalness = metalness;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Scene lighting: one ambient term plus point and directional lights.
///
/// Lights are fixed for the life of a scene. Each frame the page's renderer
/// reads them through the frame header to set up its lighting pass.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::types::Color;

/// A point light with position, color and intensity.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, kind]`, `kind` 0 = point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    #[serde(default = "white")]
    pub color: Color,
    pub intensity: f32,
}

/// A directional light shining from `position` toward the origin.
///
/// Same 8-float wire format as `PointLight` with `kind` 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub position: Vec3,
    #[serde(default = "white")]
    pub color: Color,
    pub intensity: f32,
}

fn white() -> Color {
    Color::WHITE
}

impl PointLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self { position, color, intensity }
    }

    pub fn to_wire(&self) -> [f32; LIGHT_FLOATS] {
        pack(self.position, self.color, self.intensity, 0.0)
    }
}

impl DirectionalLight {
    pub fn new(position: Vec3, color: Color, intensity: f32) -> Self {
        Self { position, color, intensity }
    }

    /// Unit vector the light travels along.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }

    pub fn to_wire(&self) -> [f32; LIGHT_FLOATS] {
        pack(self.position, self.color, self.intensity, 1.0)
    }
}

/// Floats per light on the wire.
pub const LIGHT_FLOATS: usize = 8;

fn pack(p: Vec3, c: Color, intensity: f32, kind: f32) -> [f32; LIGHT_FLOATS] {
    [p.x, p.y, p.z, c.r, c.g, c.b, intensity, kind]
}

/// Serializable lighting description, part of a scene config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingPreset {
    pub ambient_intensity: f32,
    #[serde(default)]
    pub point_lights: Vec<PointLight>,
    #[serde(default)]
    pub directional_lights: Vec<DirectionalLight>,
}

impl LightingPreset {
    /// Ambient-only lighting.
    pub fn ambient(intensity: f32) -> Self {
        Self {
            ambient_intensity: intensity,
            point_lights: Vec::new(),
            directional_lights: Vec::new(),
        }
    }

    pub fn with_point(mut self, light: PointLight) -> Self {
        self.point_lights.push(light);
        self
    }

    pub fn with_directional(mut self, light: DirectionalLight) -> Self {
        self.directional_lights.push(light);
        self
    }
}

/// Live lights of one mounted scene.
#[derive(Debug, Clone)]
pub struct LightState {
    ambient: f32,
    points: Vec<PointLight>,
    directionals: Vec<DirectionalLight>,
}

impl LightState {
    pub fn new() -> Self {
        Self {
            ambient: 1.0,
            points: Vec::new(),
            directionals: Vec::new(),
        }
    }

    pub fn from_preset(preset: &LightingPreset) -> Self {
        Self {
            ambient: preset.ambient_intensity,
            points: preset.point_lights.clone(),
            directionals: preset.directional_lights.clone(),
        }
    }

    pub fn add_point(&mut self, light: PointLight) {
        self.points.push(light);
    }

    pub fn add_directional(&mut self, light: DirectionalLight) {
        self.directionals.push(light);
    }

    pub fn points(&self) -> &[PointLight] {
        &self.points
    }

    pub fn directionals(&self) -> &[DirectionalLight] {
        &self.directionals
    }

    /// Number of point and directional lights.
    pub fn count(&self) -> usize {
        self.points.len() + self.directionals.len()
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn set_ambient(&mut self, intensity: f32) {
        self.ambient = intensity;
    }

    /// Append all lights in wire format, points first.
    pub fn write_wire(&self, out: &mut Vec<f32>) {
        for light in &self.points {
            out.extend_from_slice(&light.to_wire());
        }
        for light in &self.directionals {
            out.extend_from_slice(&light.to_wire());
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_preset_copies_everything() {
        let preset = LightingPreset::ambient(0.3)
            .with_point(PointLight::new(Vec3::ZERO, Color::hex(0xFFD700), 1.5))
            .with_directional(DirectionalLight::new(Vec3::new(-20.0, 10.0, 10.0), Color::hex(0x87CEEB), 0.2));
        let state = LightState::from_preset(&preset);
        assert_eq!(state.ambient(), 0.3);
        assert_eq!(state.count(), 2);
        assert_eq!(state.points()[0].intensity, 1.5);
    }

    #[test]
    fn wire_is_8_floats_per_light() {
        let mut state = LightState::new();
        state.add_point(PointLight::new(Vec3::new(1.0, 2.0, 3.0), Color::WHITE, 0.4));
        state.add_directional(DirectionalLight::new(Vec3::X, Color::BLACK, 1.0));
        let mut out = Vec::new();
        state.write_wire(&mut out);
        assert_eq!(out.len(), 2 * LIGHT_FLOATS);
        assert_eq!(&out[..3], &[1.0, 2.0, 3.0]);
        assert_eq!(out[7], 0.0);
        assert_eq!(out[15], 1.0);
    }

    #[test]
    fn directional_points_at_origin() {
        let light = DirectionalLight::new(Vec3::new(0.0, 10.0, 0.0), Color::WHITE, 1.0);
        assert_eq!(light.direction(), Vec3::NEG_Y);
    }

    #[test]
    fn preset_from_json() {
        let json = r##"{
            "ambient_intensity": 0.6,
            "point_lights": [{ "position": [10, 10, 10], "intensity": 1.0 }]
        }"##;
        let preset: LightingPreset = serde_json::from_str(json).unwrap();
        assert_eq!(preset.point_lights[0].color, Color::WHITE);
        assert!(preset.directional_lights.is_empty());
    }
}

use serde::{Deserialize, Serialize};

use crate::api::types::Color;
use crate::components::material::Material;

/// Describes one celestial body. Immutable once it is in a registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBodyDescriptor {
    /// Unique symbolic name (e.g. "earth").
    pub id: String,
    /// Visual radius in scene units.
    pub radius: f32,
    pub base_color: Color,
    pub glow_color: Color,
    /// Surface roughness in [0, 1].
    pub roughness: f32,
    /// Surface metalness in [0, 1].
    pub metalness: f32,
    /// Distance from the central body (0 for the central body itself).
    #[serde(default)]
    pub orbital_distance: f32,
    /// Radians per simulated second; sign gives direction.
    #[serde(default)]
    pub orbital_speed: f32,
    /// Draw the ring geometry around this body.
    #[serde(default)]
    pub has_ring: bool,
}

impl CelestialBodyDescriptor {
    /// Material for the body surface with the given emissive strength.
    pub fn material(&self, glow_intensity: f32) -> Material {
        Material::new(self.base_color)
            .with_glow(self.glow_color, glow_intensity)
            .with_surface(self.roughness, self.metalness)
    }
}

/// A body catalog: one central body plus the ordered orbiting bodies.
/// Loaded from JSON when a page wants something other than the built-in set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyCatalog {
    pub central: CelestialBodyDescriptor,
    #[serde(default)]
    pub bodies: Vec<CelestialBodyDescriptor>,
}

impl BodyCatalog {
    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

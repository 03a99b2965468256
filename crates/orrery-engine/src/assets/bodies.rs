//! Built-in body catalog: the sun plus eight planets.
//!
//! Sizes, distances and speeds are chosen for readability, not accuracy.

use crate::api::types::Color;
use crate::assets::catalog::{BodyCatalog, CelestialBodyDescriptor};

// ── Central body ─────────────────────────────────────────────────────

pub const SUN_ID: &str = "sun";
pub const SUN_RADIUS: f32 = 1.5;
pub const SUN_COLOR: Color = Color::hex(0xFFD700);
pub const SUN_GLOW: Color = Color::hex(0xFF6347);
pub const SUN_GLOW_INTENSITY: f32 = 0.8;

/// Emissive strength for every orbiting body.
pub const PLANET_GLOW_INTENSITY: f32 = 0.1;

// ── Ring ─────────────────────────────────────────────────────────────

pub const RING_INNER_RADIUS: f32 = 1.2;
pub const RING_OUTER_RADIUS: f32 = 1.8;
/// Tilt about the X axis.
pub const RING_TILT: f32 = std::f32::consts::PI / 6.0;
pub const RING_COLOR: Color = Color::hex(0xC4B5A1);
pub const RING_GLOW: Color = Color::hex(0x8B7355);
pub const RING_GLOW_INTENSITY: f32 = 0.05;
pub const RING_OPACITY: f32 = 0.8;

// ── Planets ──────────────────────────────────────────────────────────

struct PlanetRow {
    id: &'static str,
    radius: f32,
    color: u32,
    glow: u32,
    roughness: f32,
    metalness: f32,
    distance: f32,
    speed: f32,
    ring: bool,
}

#[rustfmt::skip]
const PLANETS: [PlanetRow; 8] = [
    PlanetRow { id: "mercury", radius: 0.4,  color: 0x8C7853, glow: 0x4A4A4A, roughness: 0.8, metalness: 0.1, distance: 4.0,  speed: 0.47, ring: false },
    PlanetRow { id: "venus",   radius: 0.6,  color: 0xFFC649, glow: 0xFF8C00, roughness: 0.9, metalness: 0.0, distance: 5.0,  speed: 0.35, ring: false },
    PlanetRow { id: "earth",   radius: 0.65, color: 0x6B93D6, glow: 0x4169E1, roughness: 0.7, metalness: 0.2, distance: 6.0,  speed: 0.30, ring: false },
    PlanetRow { id: "mars",    radius: 0.5,  color: 0xCD5C5C, glow: 0xB22222, roughness: 0.8, metalness: 0.1, distance: 7.0,  speed: 0.24, ring: false },
    PlanetRow { id: "jupiter", radius: 1.2,  color: 0xD8CA9D, glow: 0xDAA520, roughness: 0.6, metalness: 0.3, distance: 9.0,  speed: 0.13, ring: false },
    PlanetRow { id: "saturn",  radius: 1.0,  color: 0xFAD5A5, glow: 0xDEB887, roughness: 0.5, metalness: 0.4, distance: 12.0, speed: 0.09, ring: true  },
    PlanetRow { id: "uranus",  radius: 0.8,  color: 0x4FD0E7, glow: 0x00CED1, roughness: 0.3, metalness: 0.6, distance: 15.0, speed: 0.06, ring: false },
    PlanetRow { id: "neptune", radius: 0.75, color: 0x4B70DD, glow: 0x1E90FF, roughness: 0.4, metalness: 0.5, distance: 18.0, speed: 0.05, ring: false },
];

pub fn sun() -> CelestialBodyDescriptor {
    CelestialBodyDescriptor {
        id: SUN_ID.to_string(),
        radius: SUN_RADIUS,
        base_color: SUN_COLOR,
        glow_color: SUN_GLOW,
        roughness: 0.1,
        metalness: 0.0,
        orbital_distance: 0.0,
        orbital_speed: 0.0,
        has_ring: false,
    }
}

pub fn planets() -> Vec<CelestialBodyDescriptor> {
    PLANETS
        .iter()
        .map(|p| CelestialBodyDescriptor {
            id: p.id.to_string(),
            radius: p.radius,
            base_color: Color::hex(p.color),
            glow_color: Color::hex(p.glow),
            roughness: p.roughness,
            metalness: p.metalness,
            orbital_distance: p.distance,
            orbital_speed: p.speed,
            has_ring: p.ring,
        })
        .collect()
}

pub fn builtin_catalog() -> BodyCatalog {
    BodyCatalog {
        central: sun(),
        bodies: planets(),
    }
}

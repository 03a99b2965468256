use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::api::config::SceneConfig;
use crate::api::types::Color;
use crate::components::material::{Material, Shape};
use crate::core::clock::SYSTEM_YAW_SPEED;
use crate::error::SceneError;
use crate::extensions::transform::Hover;
use crate::renderer::camera::CameraPreset;
use crate::renderer::viewport::ViewportConstraints;
use crate::systems::fields::{Envelope, FieldKind, FieldPalette, FieldRecipe, Layout};
use crate::systems::lighting::{DirectionalLight, LightingPreset, PointLight};

/// Hover applied to orbiting bodies.
pub const PLANET_HOVER: Hover = Hover::new(0.5, 0.1, 0.2);
/// Hover applied to the central body.
pub const CENTRAL_HOVER: Hover = Hover::new(0.2, 0.05, 0.1);
/// Yaw speed of the ambient-particle and accent group, radians per second.
pub const GROUP_YAW_SPEED: f32 = 0.05;

const GOLD: Color = Color::hex(0xFFD700);
const BLUE: Color = Color::hex(0x3B82F6);
const VIOLET: Color = Color::hex(0x8B5CF6);

/// A fixed decorative primitive placed by hand rather than generated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accent {
    pub shape: Shape,
    pub position: Vec3,
    pub size: f32,
    pub color: Color,
    #[serde(default)]
    pub glow_intensity: f32,
    #[serde(default = "opaque")]
    pub opacity: f32,
    #[serde(default = "still")]
    pub hover: Hover,
    #[serde(default)]
    pub phase: f32,
}

fn opaque() -> f32 {
    1.0
}

fn still() -> Hover {
    Hover::NONE
}

impl Accent {
    pub fn new(shape: Shape, position: Vec3, size: f32, color: Color) -> Self {
        Self {
            shape,
            position,
            size,
            color,
            glow_intensity: 0.0,
            opacity: 1.0,
            hover: Hover::NONE,
            phase: 0.0,
        }
    }

    pub fn with_glow(mut self, intensity: f32) -> Self {
        self.glow_intensity = intensity;
        self
    }

    pub fn with_hover(mut self, hover: Hover, phase: f32) -> Self {
        self.hover = hover;
        self.phase = phase;
        self
    }

    pub fn material(&self) -> Material {
        Material::new(self.color)
            .with_glow(self.color, self.glow_intensity)
            .with_opacity(self.opacity)
    }

    /// `count` accents evenly spaced on a circle of `radius` in the XY plane.
    pub fn ring(count: usize, radius: f32, size: f32, color: Color) -> Vec<Accent> {
        (0..count)
            .map(|i| {
                let a = i as f32 * TAU / count as f32;
                Accent::new(Shape::Sphere, Vec3::new(a.cos() * radius, a.sin() * radius, 0.0), size, color)
                    .with_glow(0.5)
                    .with_hover(Hover::new(1.0, 0.5, 0.5), a)
            })
            .collect()
    }
}

/// Secondary content of a scene: procedural fields, accents, and motion constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecipe {
    #[serde(default)]
    pub fields: Vec<FieldRecipe>,
    #[serde(default)]
    pub accents: Vec<Accent>,
    /// Whether the central body is mounted. Only pure particle overlays drop it.
    #[serde(default = "included")]
    pub include_central: bool,
    #[serde(default = "system_yaw_speed")]
    pub system_yaw_speed: f32,
    #[serde(default = "group_yaw_speed")]
    pub group_yaw_speed: f32,
    #[serde(default = "planet_hover")]
    pub planet_hover: Hover,
    #[serde(default = "central_hover")]
    pub central_hover: Hover,
}

fn included() -> bool {
    true
}

fn system_yaw_speed() -> f32 {
    SYSTEM_YAW_SPEED
}

fn group_yaw_speed() -> f32 {
    GROUP_YAW_SPEED
}

fn planet_hover() -> Hover {
    PLANET_HOVER
}

fn central_hover() -> Hover {
    CENTRAL_HOVER
}

impl Default for SceneRecipe {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            accents: Vec::new(),
            include_central: true,
            system_yaw_speed: SYSTEM_YAW_SPEED,
            group_yaw_speed: GROUP_YAW_SPEED,
            planet_hover: PLANET_HOVER,
            central_hover: CENTRAL_HOVER,
        }
    }
}

impl SceneRecipe {
    pub fn with_field(mut self, field: FieldRecipe) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_accents(mut self, accents: Vec<Accent>) -> Self {
        self.accents.extend(accents);
        self
    }

    pub fn without_central(mut self) -> Self {
        self.include_central = false;
        self
    }

    /// 20-rock belt between radii 8 and 9 plus a 50-star backdrop.
    pub fn belt_and_stars() -> Self {
        Self::default()
            .with_field(FieldRecipe::new(
                FieldKind::AsteroidBelt,
                20,
                Envelope::Annulus { inner: 8.0, outer: 9.0, jitter: 0.3 },
                FieldPalette::asteroids(),
            ))
            .with_field(FieldRecipe::new(
                FieldKind::StarField,
                50,
                Envelope::Cube { size: 100.0 },
                FieldPalette::stars(),
            ))
    }

    /// Drifting particles plus four accents around the center.
    pub fn particles_and_accents(count: usize, extents: Vec3, colors: Vec<Color>) -> Self {
        let accent_color = colors.first().copied().unwrap_or(Color::WHITE);
        Self::default()
            .with_field(FieldRecipe::new(
                FieldKind::AmbientParticle,
                count,
                Envelope::Box { extents },
                FieldPalette::ambient(colors),
            ))
            .with_accents(Accent::ring(4, 3.0, 0.08, accent_color))
    }
}

/// Density of the floating-geometry overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatIntensity {
    Low,
    Medium,
    High,
}

impl FloatIntensity {
    pub fn element_count(self) -> usize {
        match self {
            FloatIntensity::Low => 3,
            FloatIntensity::Medium => 5,
            FloatIntensity::High => 8,
        }
    }
}

/// The page sections that carry a background scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneVariant {
    SolarSystem,
    About,
    Contact,
    Projects,
    Skills,
    Floating(FloatIntensity),
}

impl SceneVariant {
    pub const ALL: [SceneVariant; 8] = [
        SceneVariant::SolarSystem,
        SceneVariant::About,
        SceneVariant::Contact,
        SceneVariant::Projects,
        SceneVariant::Skills,
        SceneVariant::Floating(FloatIntensity::Low),
        SceneVariant::Floating(FloatIntensity::Medium),
        SceneVariant::Floating(FloatIntensity::High),
    ];

    pub fn name(self) -> &'static str {
        match self {
            SceneVariant::SolarSystem => "solar-system",
            SceneVariant::About => "about",
            SceneVariant::Contact => "contact",
            SceneVariant::Projects => "projects",
            SceneVariant::Skills => "skills",
            SceneVariant::Floating(FloatIntensity::Low) => "floating-low",
            SceneVariant::Floating(FloatIntensity::Medium) => "floating",
            SceneVariant::Floating(FloatIntensity::High) => "floating-high",
        }
    }

    /// Full preset for this variant. Seed is left unset (fresh layout per mount).
    pub fn config(self) -> SceneConfig {
        let sun = PointLight::new(Vec3::ZERO, GOLD, 1.5);
        match self {
            SceneVariant::SolarSystem => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 5.0, 25.0), 60.0),
                LightingPreset::ambient(0.3)
                    .with_point(sun)
                    .with_point(PointLight::new(Vec3::splat(20.0), Color::WHITE, 0.4))
                    .with_directional(DirectionalLight::new(Vec3::new(-20.0, 10.0, 10.0), Color::hex(0x87CEEB), 0.2)),
                ViewportConstraints::orbit(0.2, PI / 4.0).with_azimuth(-PI / 6.0, PI / 6.0),
                focus(&["earth", "mars", "jupiter"]),
                SceneRecipe::belt_and_stars(),
            ),
            SceneVariant::About => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 0.0, 6.0), 60.0),
                LightingPreset::ambient(0.4)
                    .with_point(sun)
                    .with_directional(DirectionalLight::new(Vec3::splat(10.0), Color::WHITE, 0.3)),
                ViewportConstraints::orbit(0.3, PI / 4.0),
                focus(&["earth", "mars", "jupiter"]),
                SceneRecipe::particles_and_accents(6, Vec3::new(10.0, 6.0, 6.0), vec![GOLD, BLUE, VIOLET]),
            ),
            SceneVariant::Contact => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 0.0, 9.0), 45.0),
                LightingPreset::ambient(0.4)
                    .with_point(sun)
                    .with_point(PointLight::new(Vec3::new(10.0, -10.0, 15.0), Color::hex(0xCD5C5C), 0.5)),
                ViewportConstraints::orbit(0.25, PI / 3.5),
                focus(&["earth", "mars", "jupiter", "saturn", "neptune"]),
                SceneRecipe::particles_and_accents(12, Vec3::new(12.0, 8.0, 6.0), vec![BLUE, VIOLET, Color::hex(0x06B6D4)]),
            ),
            SceneVariant::Projects => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 0.0, 7.0), 55.0),
                LightingPreset::ambient(0.3)
                    .with_point(PointLight::new(Vec3::ZERO, GOLD, 1.2))
                    .with_point(PointLight::new(Vec3::new(15.0, 10.0, 15.0), Color::hex(0x87CEEB), 0.4)),
                ViewportConstraints::orbit(0.4, PI / 3.0),
                focus(&["venus", "earth", "saturn", "jupiter"]),
                SceneRecipe::belt_and_stars(),
            ),
            SceneVariant::Skills => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 0.0, 8.0), 50.0),
                LightingPreset::ambient(0.35)
                    .with_point(PointLight::new(Vec3::ZERO, GOLD, 1.8))
                    .with_point(PointLight::new(Vec3::new(-15.0, 5.0, 10.0), Color::hex(0x4B70DD), 0.6)),
                ViewportConstraints::orbit(0.35, PI / 4.0),
                focus(&["mercury", "venus", "earth", "mars", "uranus"]),
                SceneRecipe::belt_and_stars(),
            ),
            SceneVariant::Floating(intensity) => SceneConfig::new(
                CameraPreset::new(Vec3::new(0.0, 0.0, 5.0), 50.0),
                LightingPreset::ambient(0.3).with_point(PointLight::new(Vec3::splat(5.0), BLUE, 0.4)),
                ViewportConstraints::fixed(),
                Vec::new(),
                SceneRecipe {
                    fields: vec![FieldRecipe::new(
                        FieldKind::AmbientParticle,
                        intensity.element_count(),
                        Envelope::Box { extents: Vec3::new(6.0, 4.0, 3.0) },
                        FieldPalette {
                            colors: vec![BLUE, VIOLET],
                            // box, sphere, octahedron
                            sizes: vec![0.15, 0.1, 0.12],
                            opacity: (0.4, 0.4),
                            float_speed: (0.3, 0.6),
                            float_intensity: (0.8, 0.8),
                            rotation_intensity: 0.3,
                            glow: None,
                            glow_intensity: 0.15,
                            layout: Layout::Cycled,
                        },
                    )],
                    group_yaw_speed: 0.0,
                    ..SceneRecipe::default()
                }
                .without_central(),
            ),
        }
    }
}

fn focus(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

impl fmt::Display for SceneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneVariant {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "hero" | "portfolio" => Ok(SceneVariant::SolarSystem),
            "floating-medium" => Ok(SceneVariant::Floating(FloatIntensity::Medium)),
            _ => SceneVariant::ALL
                .into_iter()
                .find(|v| v.name() == wanted)
                .ok_or_else(|| SceneError::config(format!("unknown scene variant {s:?}"))),
        }
    }
}

//! Procedural fields: asteroid belts, starfields and ambient particles.
//!
//! Every field is regenerated on scene mount from a count, a spatial envelope
//! and a palette. The PRNG is explicit: seed it for reproducible layouts, or
//! draw from entropy to get a fresh layout every mount.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::api::types::Color;
use crate::components::material::{Material, Shape};
use crate::error::{Result, SceneError};

/// Maximum extra angle added to each asteroid's evenly spaced slot.
const BELT_ANGLE_JITTER: f32 = 0.5;
/// Size used for stars when the palette lists none.
pub const STAR_SIZE: f32 = 0.02;
/// Upper bound on elements in one field. Larger recipes are configuration errors.
pub const MAX_FIELD_ELEMENTS: usize = 10_000;
/// Shape sequence of a cycled layout.
const CYCLE_SHAPES: [Shape; 3] = [Shape::Box, Shape::Sphere, Shape::Octahedron];
const FIELD_ROUGHNESS: f32 = 0.9;
const FIELD_METALNESS: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    AsteroidBelt,
    StarField,
    AmbientParticle,
}

/// Spatial region elements are sampled from. All are centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Envelope {
    /// Flat ring in the XZ plane with a total vertical jitter band.
    Annulus { inner: f32, outer: f32, jitter: f32 },
    /// Cube of the given edge length.
    Cube { size: f32 },
    /// Axis-aligned box with the given full extents.
    Box { extents: Vec3 },
}

/// How shapes, sizes and colors are assigned to ambient particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Box or sphere by coin flip; size and color drawn from the palette.
    #[default]
    Random,
    /// Element `i` is box, sphere, octahedron by `i % 3`, takes
    /// `sizes[i % len]` and `colors[i % len]`.
    Cycled,
}

/// Colors, surface and size/opacity/motion bands for a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPalette {
    pub colors: Vec<Color>,
    /// Discrete sizes to pick from.
    pub sizes: Vec<f32>,
    #[serde(default = "full_opacity")]
    pub opacity: (f32, f32),
    #[serde(default)]
    pub float_speed: (f32, f32),
    #[serde(default)]
    pub float_intensity: (f32, f32),
    /// Wobble strength of the hover animation.
    #[serde(default = "full_rotation")]
    pub rotation_intensity: f32,
    /// Emissive color. `None` glows in each element's own color.
    #[serde(default)]
    pub glow: Option<Color>,
    #[serde(default = "faint_glow")]
    pub glow_intensity: f32,
    #[serde(default)]
    pub layout: Layout,
}

fn full_opacity() -> (f32, f32) {
    (1.0, 1.0)
}

fn full_rotation() -> f32 {
    1.0
}

fn faint_glow() -> f32 {
    0.1
}

impl FieldPalette {
    /// Grey rock with a barely-there dark glow.
    pub fn asteroids() -> Self {
        Self {
            colors: vec![Color::hex(0x696969), Color::hex(0x5A5A5A), Color::hex(0x7A7268)],
            sizes: vec![0.05, 0.075, 0.1, 0.125, 0.15],
            opacity: (1.0, 1.0),
            float_speed: (0.3, 0.5),
            float_intensity: (0.5, 0.5),
            rotation_intensity: 1.0,
            glow: Some(Color::hex(0x2F2F2F)),
            glow_intensity: 0.02,
            layout: Layout::Random,
        }
    }

    /// White pin-points with twinkle variety. Unlit, so fully emissive.
    pub fn stars() -> Self {
        Self {
            colors: vec![Color::WHITE],
            sizes: vec![STAR_SIZE],
            opacity: (0.6, 1.0),
            float_speed: (0.0, 0.0),
            float_intensity: (0.0, 0.0),
            rotation_intensity: 0.0,
            glow: None,
            glow_intensity: 1.0,
            layout: Layout::Random,
        }
    }

    /// Translucent drifting particles in the given colors.
    pub fn ambient(colors: Vec<Color>) -> Self {
        Self {
            colors,
            sizes: vec![0.1, 0.15, 0.2],
            opacity: (0.4, 0.6),
            float_speed: (0.5, 1.0),
            float_intensity: (0.8, 1.0),
            rotation_intensity: 0.5,
            glow: None,
            glow_intensity: 0.2,
            layout: Layout::Random,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// One decorative element. Positions are in scene space at t = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldElement {
    pub position: Vec3,
    /// Per-axis extent (uniform for spheres).
    pub size: Vec3,
    pub shape: Shape,
    pub color: Color,
    pub opacity: f32,
    pub float_speed: f32,
    pub float_intensity: f32,
    pub rotation_intensity: f32,
    /// Phase offset for the hover animation.
    pub phase: f32,
    pub glow_color: Color,
    pub glow_intensity: f32,
}

impl FieldElement {
    pub fn material(&self) -> Material {
        Material::new(self.color)
            .with_glow(self.glow_color, self.glow_intensity)
            .with_surface(FIELD_ROUGHNESS, FIELD_METALNESS)
            .with_opacity(self.opacity)
    }
}

/// A generated field, owned by one scene instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProceduralField {
    pub kind: FieldKind,
    pub elements: Vec<FieldElement>,
}

impl ProceduralField {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// What to generate for one field of a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecipe {
    pub kind: FieldKind,
    pub count: usize,
    pub envelope: Envelope,
    pub palette: FieldPalette,
}

impl FieldRecipe {
    pub fn new(kind: FieldKind, count: usize, envelope: Envelope, palette: FieldPalette) -> Self {
        Self { kind, count, envelope, palette }
    }
}

/// Field generator with an explicit PRNG.
pub struct FieldGenerator {
    rng: SmallRng,
}

impl FieldGenerator {
    /// Reproducible generator: same seed, same fields.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Fresh layout every time.
    pub fn from_entropy() -> Self {
        Self { rng: SmallRng::from_entropy() }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Run a recipe, producing a complete field.
    pub fn run(&mut self, recipe: &FieldRecipe) -> Result<ProceduralField> {
        let elements = self.generate(recipe.kind, recipe.count, &recipe.envelope, &recipe.palette)?;
        Ok(ProceduralField { kind: recipe.kind, elements })
    }

    /// Generate `count` elements of `kind` inside `envelope`.
    pub fn generate(
        &mut self,
        kind: FieldKind,
        count: usize,
        envelope: &Envelope,
        palette: &FieldPalette,
    ) -> Result<Vec<FieldElement>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        check_count(count)?;
        validate_palette(palette)?;

        let mut out = Vec::with_capacity(count);
        match (kind, *envelope) {
            (FieldKind::AsteroidBelt, Envelope::Annulus { inner, outer, jitter }) => {
                if !(inner.is_finite() && outer.is_finite() && jitter.is_finite()) {
                    return Err(SceneError::config("annulus values must be finite"));
                }
                if inner < 0.0 || outer < inner || jitter < 0.0 {
                    return Err(SceneError::config(format!(
                        "malformed annulus: inner {inner}, outer {outer}, jitter {jitter}"
                    )));
                }
                for i in 0..count {
                    let angle = i as f32 / count as f32 * TAU + self.rng.gen::<f32>() * BELT_ANGLE_JITTER;
                    let radius = lerp(inner, outer, self.rng.gen());
                    let y = (self.rng.gen::<f32>() - 0.5) * jitter;
                    let size = Vec3::new(self.pick(&palette.sizes), self.pick(&palette.sizes), self.pick(&palette.sizes));
                    let color = self.pick(&palette.colors);
                    out.push(self.element(Vec3::new(angle.cos() * radius, y, angle.sin() * radius), size, Shape::Box, color, palette));
                }
            }
            (FieldKind::StarField, Envelope::Cube { size }) => {
                if !(size.is_finite() && size > 0.0) {
                    return Err(SceneError::config(format!("star cube size must be positive, got {size}")));
                }
                let star = palette.sizes.first().copied().unwrap_or(STAR_SIZE);
                for _ in 0..count {
                    let pos = Vec3::new(self.centered(size), self.centered(size), self.centered(size));
                    let color = self.pick(&palette.colors);
                    out.push(self.element(pos, Vec3::splat(star), Shape::Sphere, color, palette));
                }
            }
            (FieldKind::AmbientParticle, Envelope::Box { extents }) => {
                if !extents.is_finite() || extents.min_element() < 0.0 {
                    return Err(SceneError::config(format!("malformed particle box {extents}")));
                }
                for i in 0..count {
                    let pos = Vec3::new(self.centered(extents.x), self.centered(extents.y), self.centered(extents.z));
                    let (shape, size, color) = match palette.layout {
                        Layout::Random => {
                            let shape = if self.rng.gen_bool(0.5) { Shape::Box } else { Shape::Sphere };
                            (shape, self.pick(&palette.sizes), self.pick(&palette.colors))
                        }
                        Layout::Cycled => (
                            CYCLE_SHAPES[i % CYCLE_SHAPES.len()],
                            palette.sizes[i % palette.sizes.len()],
                            palette.colors[i % palette.colors.len()],
                        ),
                    };
                    out.push(self.element(pos, Vec3::splat(size), shape, color, palette));
                }
            }
            (kind, envelope) => {
                return Err(SceneError::config(format!("{kind:?} cannot be sampled from {envelope:?}")));
            }
        }
        Ok(out)
    }

    fn element(&mut self, position: Vec3, size: Vec3, shape: Shape, color: Color, palette: &FieldPalette) -> FieldElement {
        FieldElement {
            position,
            size,
            shape,
            color,
            opacity: lerp(palette.opacity.0, palette.opacity.1, self.rng.gen()),
            float_speed: lerp(palette.float_speed.0, palette.float_speed.1, self.rng.gen()),
            float_intensity: lerp(palette.float_intensity.0, palette.float_intensity.1, self.rng.gen()),
            rotation_intensity: palette.rotation_intensity,
            phase: self.rng.gen::<f32>() * TAU,
            glow_color: palette.glow.unwrap_or(color),
            glow_intensity: palette.glow_intensity,
        }
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }

    /// Uniform in [-extent/2, extent/2].
    fn centered(&mut self, extent: f32) -> f32 {
        (self.rng.gen::<f32>() - 0.5) * extent
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Reject element counts that would not fit a decorative layer.
pub fn check_count(count: usize) -> Result<()> {
    if count > MAX_FIELD_ELEMENTS {
        return Err(SceneError::config(format!(
            "field of {count} elements exceeds the limit of {MAX_FIELD_ELEMENTS}"
        )));
    }
    Ok(())
}

fn validate_palette(palette: &FieldPalette) -> Result<()> {
    if palette.colors.is_empty() {
        return Err(SceneError::config("palette has no colors"));
    }
    if palette.sizes.is_empty() || palette.sizes.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
        return Err(SceneError::config("palette sizes must be a non-empty list of positive values"));
    }
    let (lo, hi) = palette.opacity;
    if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
        return Err(SceneError::config(format!("bad opacity band ({lo}, {hi})")));
    }
    let non_negative = |v: f32| v.is_finite() && v >= 0.0;
    if !non_negative(palette.rotation_intensity) || !non_negative(palette.glow_intensity) {
        return Err(SceneError::config("rotation and glow intensities must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn belt() -> Envelope {
        Envelope::Annulus { inner: 8.0, outer: 9.0, jitter: 0.3 }
    }

    #[test]
    fn zero_count_is_empty_for_every_kind() {
        let mut gen = FieldGenerator::seeded(1);
        let cases = [
            (FieldKind::AsteroidBelt, belt(), FieldPalette::asteroids()),
            (FieldKind::StarField, Envelope::Cube { size: 100.0 }, FieldPalette::stars()),
            (FieldKind::AmbientParticle, Envelope::Box { extents: Vec3::ONE }, FieldPalette::ambient(vec![Color::WHITE])),
        ];
        for (kind, env, palette) in cases {
            assert!(gen.generate(kind, 0, &env, &palette).unwrap().is_empty());
        }
    }

    #[test]
    fn asteroids_stay_in_annulus() {
        let mut gen = FieldGenerator::seeded(7);
        let rocks = gen.generate(FieldKind::AsteroidBelt, 20, &belt(), &FieldPalette::asteroids()).unwrap();
        assert_eq!(rocks.len(), 20);
        for rock in &rocks {
            let planar = Vec3::new(rock.position.x, 0.0, rock.position.z).length();
            assert!((8.0 - 1e-4..=9.0 + 1e-4).contains(&planar), "planar distance {planar}");
            assert!(rock.position.y.abs() <= 0.15 + 1e-6);
            assert_eq!(rock.shape, Shape::Box);
        }
    }

    #[test]
    fn asteroid_sizes_come_from_palette() {
        let palette = FieldPalette::asteroids();
        let mut gen = FieldGenerator::seeded(3);
        for rock in gen.generate(FieldKind::AsteroidBelt, 30, &belt(), &palette).unwrap() {
            for axis in rock.size.to_array() {
                assert!(palette.sizes.contains(&axis));
            }
            assert!(palette.colors.contains(&rock.color));
        }
    }

    #[test]
    fn stars_fill_cube_with_twinkle_band() {
        let mut gen = FieldGenerator::seeded(11);
        let stars = gen.generate(FieldKind::StarField, 50, &Envelope::Cube { size: 100.0 }, &FieldPalette::stars()).unwrap();
        assert_eq!(stars.len(), 50);
        for star in &stars {
            assert!(star.position.abs().max_element() <= 50.0);
            assert_eq!(star.size, Vec3::splat(STAR_SIZE));
            assert!((0.6..=1.0).contains(&star.opacity));
        }
    }

    #[test]
    fn ambient_particles_get_motion_pairs() {
        let palette = FieldPalette::ambient(vec![Color::hex(0x3B82F6), Color::hex(0x8B5CF6)]);
        let extents = Vec3::new(8.0, 6.0, 4.0);
        let mut gen = FieldGenerator::seeded(5);
        let parts = gen.generate(FieldKind::AmbientParticle, 6, &Envelope::Box { extents }, &palette).unwrap();
        assert_eq!(parts.len(), 6);
        for p in &parts {
            assert!(p.position.x.abs() <= 4.0 && p.position.y.abs() <= 3.0 && p.position.z.abs() <= 2.0);
            assert!((0.5..=1.0).contains(&p.float_speed));
            assert!((0.8..=1.0).contains(&p.float_intensity));
            assert!(palette.colors.contains(&p.color));
        }
    }

    #[test]
    fn same_seed_same_field() {
        let recipe = FieldRecipe::new(FieldKind::AsteroidBelt, 20, belt(), FieldPalette::asteroids());
        let a = FieldGenerator::seeded(42).run(&recipe).unwrap();
        let b = FieldGenerator::seeded(42).run(&recipe).unwrap();
        assert_eq!(a, b);
        let c = FieldGenerator::seeded(43).run(&recipe).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn mismatched_envelope_is_configuration_error() {
        let mut gen = FieldGenerator::seeded(1);
        let err = gen
            .generate(FieldKind::StarField, 5, &belt(), &FieldPalette::stars())
            .unwrap_err();
        assert!(matches!(err, SceneError::Configuration { .. }));
    }

    #[test]
    fn inverted_annulus_rejected() {
        let mut gen = FieldGenerator::seeded(1);
        let env = Envelope::Annulus { inner: 9.0, outer: 8.0, jitter: 0.0 };
        assert!(gen.generate(FieldKind::AsteroidBelt, 5, &env, &FieldPalette::asteroids()).is_err());
    }

    #[test]
    fn empty_palette_rejected() {
        let mut gen = FieldGenerator::seeded(1);
        let env = Envelope::Box { extents: Vec3::ONE };
        assert!(gen.generate(FieldKind::AmbientParticle, 3, &env, &FieldPalette::ambient(vec![])).is_err());
    }

    #[test]
    fn oversized_count_is_configuration_error() {
        let mut gen = FieldGenerator::seeded(1);
        let env = Envelope::Cube { size: 10.0 };
        let err = gen
            .generate(FieldKind::StarField, usize::MAX, &env, &FieldPalette::stars())
            .unwrap_err();
        assert!(matches!(err, SceneError::Configuration { .. }));
        let stars = gen.generate(FieldKind::StarField, MAX_FIELD_ELEMENTS, &env, &FieldPalette::stars()).unwrap();
        assert_eq!(stars.len(), MAX_FIELD_ELEMENTS);
    }

    #[test]
    fn cycled_layout_walks_shapes_sizes_and_colors() {
        let blue = Color::hex(0x3B82F6);
        let violet = Color::hex(0x8B5CF6);
        let palette = FieldPalette {
            sizes: vec![0.15, 0.1, 0.12],
            ..FieldPalette::ambient(vec![blue, violet])
        }
        .with_layout(Layout::Cycled);
        let env = Envelope::Box { extents: Vec3::new(6.0, 4.0, 3.0) };
        let parts = FieldGenerator::seeded(2).generate(FieldKind::AmbientParticle, 8, &env, &palette).unwrap();
        let shapes: Vec<Shape> = parts.iter().map(|p| p.shape).collect();
        assert_eq!(
            shapes,
            [Shape::Box, Shape::Sphere, Shape::Octahedron, Shape::Box, Shape::Sphere, Shape::Octahedron, Shape::Box, Shape::Sphere]
        );
        assert_eq!(parts[2].size, Vec3::splat(0.12));
        assert_eq!(parts[4].size, Vec3::splat(0.1));
        assert!(parts.iter().step_by(2).all(|p| p.color == blue));
        assert!(parts.iter().skip(1).step_by(2).all(|p| p.color == violet));
    }

    #[test]
    fn elements_carry_palette_surface() {
        let mut gen = FieldGenerator::seeded(9);
        let rock = gen.generate(FieldKind::AsteroidBelt, 1, &belt(), &FieldPalette::asteroids()).unwrap()[0];
        assert_eq!(rock.glow_color, Color::hex(0x2F2F2F));
        assert_eq!(rock.glow_intensity, 0.02);
        assert_eq!(rock.rotation_intensity, 1.0);
        assert_eq!(rock.material().roughness, 0.9);

        let env = Envelope::Box { extents: Vec3::ONE };
        let palette = FieldPalette::ambient(vec![Color::hex(0x8B5CF6)]);
        let part = gen.generate(FieldKind::AmbientParticle, 1, &env, &palette).unwrap()[0];
        assert_eq!(part.glow_color, part.color);
        assert_eq!(part.glow_intensity, 0.2);
        assert_eq!(part.rotation_intensity, 0.5);
    }

    #[test]
    fn recipe_parses_from_json() {
        let json = r##"{
            "kind": "star_field", "count": 10,
            "envelope": { "type": "cube", "size": 40.0 },
            "palette": { "colors": ["#FFFFFF"], "sizes": [0.02], "opacity": [0.6, 1.0] }
        }"##;
        let recipe: FieldRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.kind, FieldKind::StarField);
        assert_eq!(recipe.envelope, Envelope::Cube { size: 40.0 });
        assert_eq!(recipe.palette.float_speed, (0.0, 0.0));
        assert_eq!(recipe.palette.rotation_intensity, 1.0);
        assert_eq!(recipe.palette.glow, None);
        assert_eq!(recipe.palette.layout, Layout::Random);
    }
}

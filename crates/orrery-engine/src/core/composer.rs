use std::collections::HashSet;

use crate::api::config::SceneConfig;
use crate::assets::bodies::{PLANET_GLOW_INTENSITY, SUN_GLOW_INTENSITY};
use crate::assets::catalog::CelestialBodyDescriptor;
use crate::assets::registry::BodyRegistry;
use crate::components::body::{BodyRole, SceneBody};
use crate::core::clock::{OrbitalClock, CENTRAL_SPIN_FACTOR, PLANET_SPIN_FACTOR};
use crate::core::scene::SceneHandle;
use crate::error::{Result, SceneError};
use crate::renderer::camera::Camera3D;
use crate::renderer::viewport::ViewportController;
use crate::systems::fields::FieldGenerator;
use crate::systems::lighting::LightState;

/// Builds scene instances from a config against a body registry.
///
/// Composition is all-or-nothing: any error leaves nothing mounted.
pub struct SceneComposer<'a> {
    registry: &'a BodyRegistry,
}

impl SceneComposer<'static> {
    /// Composer over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(BodyRegistry::builtin())
    }
}

impl<'a> SceneComposer<'a> {
    pub fn new(registry: &'a BodyRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BodyRegistry {
        self.registry
    }

    /// Look up every focus id, in order. First miss wins.
    pub fn resolve_focus(&self, ids: &[String]) -> Result<Vec<&'a CelestialBodyDescriptor>> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            let desc = self.registry.lookup(id)?;
            if !seen.insert(id.as_str()) {
                return Err(SceneError::config(format!("body {id:?} appears twice in the focus set")));
            }
            out.push(desc);
        }
        Ok(out)
    }

    pub fn compose(&self, config: &SceneConfig) -> Result<SceneHandle> {
        config.validate()?;
        let focus = self.resolve_focus(&config.focus_set)?;
        let recipe = &config.recipe;

        let mut bodies = Vec::with_capacity(focus.len() + 1);
        if recipe.include_central {
            let central = self.registry.central();
            bodies.push(
                SceneBody::new(central.clone(), BodyRole::Central)
                    .with_material(central.material(SUN_GLOW_INTENSITY))
                    .with_spin_factor(CENTRAL_SPIN_FACTOR)
                    .with_hover(recipe.central_hover),
            );
        }
        for desc in focus {
            bodies.push(
                SceneBody::new(desc.clone(), BodyRole::Orbiting)
                    .with_material(desc.material(PLANET_GLOW_INTENSITY))
                    .with_spin_factor(PLANET_SPIN_FACTOR)
                    .with_hover(recipe.planet_hover),
            );
        }

        let mut generator = FieldGenerator::from_seed_option(config.seed);
        let fields = recipe
            .fields
            .iter()
            .map(|field| generator.run(field))
            .collect::<Result<Vec<_>>>()?;

        let camera = Camera3D::from_preset(&config.camera);
        let viewport = ViewportController::new(config.viewport, config.camera.position);
        let lights = LightState::from_preset(&config.lighting);

        log::debug!(
            "composed scene: {} bodies, {} fields ({} elements), {} accents, seed {:?}",
            bodies.len(),
            fields.len(),
            fields.iter().map(|f| f.len()).sum::<usize>(),
            recipe.accents.len(),
            config.seed,
        );

        Ok(SceneHandle::new(
            bodies,
            fields,
            recipe.accents.clone(),
            camera,
            lights,
            viewport,
            OrbitalClock::new(recipe.system_yaw_speed),
            recipe.group_yaw_speed,
        ))
    }
}

use serde::{Deserialize, Serialize};

use crate::api::recipe::SceneRecipe;
use crate::error::{Result, SceneError};
use crate::renderer::camera::CameraPreset;
use crate::renderer::viewport::ViewportConstraints;
use crate::systems::fields::check_count;
use crate::systems::lighting::LightingPreset;

/// Everything needed to compose one scene instance.
/// Immutable once a scene is mounted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub camera: CameraPreset,
    pub lighting: LightingPreset,
    pub viewport: ViewportConstraints,
    /// Registry ids of the orbiting bodies, in mount order.
    #[serde(default)]
    pub focus_set: Vec<String>,
    #[serde(default)]
    pub recipe: SceneRecipe,
    /// PRNG seed for procedural fields. `None` draws a fresh layout per mount.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SceneConfig {
    pub fn new(
        camera: CameraPreset,
        lighting: LightingPreset,
        viewport: ViewportConstraints,
        focus_set: Vec<String>,
        recipe: SceneRecipe,
    ) -> Self {
        Self {
            camera,
            lighting,
            viewport,
            focus_set,
            recipe,
            seed: None,
        }
    }

    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn with_focus_set<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus_set = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Structural checks that don't need the registry.
    pub fn validate(&self) -> Result<()> {
        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(SceneError::config(format!("camera fov must be in (0, 180), got {fov}")));
        }
        if !self.camera.position.is_finite() {
            return Err(SceneError::config("camera position must be finite"));
        }
        if self.camera.position.length_squared() == 0.0 {
            return Err(SceneError::config("camera cannot sit on the scene origin"));
        }
        self.viewport.validate()?;
        if !self.lighting.ambient_intensity.is_finite() || self.lighting.ambient_intensity < 0.0 {
            return Err(SceneError::config("ambient intensity must be a non-negative number"));
        }
        if !self.recipe.system_yaw_speed.is_finite() || !self.recipe.group_yaw_speed.is_finite() {
            return Err(SceneError::config("yaw speeds must be finite"));
        }
        for field in &self.recipe.fields {
            check_count(field.count)?;
        }
        for accent in &self.recipe.accents {
            if !(accent.size.is_finite() && accent.size > 0.0) || !accent.position.is_finite() {
                return Err(SceneError::config(format!("malformed accent {accent:?}")));
            }
        }
        Ok(())
    }
}

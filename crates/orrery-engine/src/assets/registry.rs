use std::collections::HashMap;
use std::sync::OnceLock;

use crate::assets::bodies;
use crate::assets::catalog::{BodyCatalog, CelestialBodyDescriptor};
use crate::error::{Result, SceneError};

/// Read-only catalog of celestial bodies, looked up by id.
/// The built-in registry is process-wide and shared by every scene instance.
#[derive(Debug)]
pub struct BodyRegistry {
    central: CelestialBodyDescriptor,
    bodies: Vec<CelestialBodyDescriptor>,
    index: HashMap<String, usize>,
}

static BUILTIN: OnceLock<BodyRegistry> = OnceLock::new();

impl BodyRegistry {
    /// The compiled-in registry (sun + eight planets).
    pub fn builtin() -> &'static BodyRegistry {
        BUILTIN.get_or_init(|| {
            let catalog = bodies::builtin_catalog();
            let index = catalog
                .bodies
                .iter()
                .enumerate()
                .map(|(i, b)| (b.id.clone(), i))
                .collect();
            BodyRegistry {
                central: catalog.central,
                bodies: catalog.bodies,
                index,
            }
        })
    }

    /// Build a registry from a catalog, validating every descriptor.
    pub fn from_catalog(catalog: BodyCatalog) -> Result<Self> {
        validate(&catalog.central)?;
        let mut index = HashMap::with_capacity(catalog.bodies.len());
        for (i, body) in catalog.bodies.iter().enumerate() {
            validate(body)?;
            if body.id == catalog.central.id || index.insert(body.id.clone(), i).is_some() {
                return Err(SceneError::config(format!("duplicate body id {:?}", body.id)));
            }
        }
        for pair in catalog.bodies.windows(2) {
            if pair[1].orbital_distance <= pair[0].orbital_distance {
                log::warn!(
                    "body {:?} orbits at or inside {:?}; orbits may overlap",
                    pair[1].id,
                    pair[0].id
                );
            }
        }
        Ok(Self {
            central: catalog.central,
            bodies: catalog.bodies,
            index,
        })
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_catalog(BodyCatalog::from_json(json)?)
    }

    /// Look up an orbiting body by id.
    pub fn lookup(&self, id: &str) -> Result<&CelestialBodyDescriptor> {
        self.index
            .get(id)
            .map(|&i| &self.bodies[i])
            .ok_or_else(|| SceneError::not_found(id))
    }

    /// All orbiting bodies in definition order.
    pub fn all(&self) -> &[CelestialBodyDescriptor] {
        &self.bodies
    }

    /// The fixed central body every scene includes.
    pub fn central(&self) -> &CelestialBodyDescriptor {
        &self.central
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of orbiting bodies (the central body is not counted).
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn validate(body: &CelestialBodyDescriptor) -> Result<()> {
    let bad = |what: &str| SceneError::config(format!("body {:?}: {what}", body.id));
    if body.id.is_empty() {
        return Err(SceneError::config("body id must not be empty"));
    }
    if !(body.radius.is_finite() && body.radius > 0.0) {
        return Err(bad("radius must be positive"));
    }
    if !(0.0..=1.0).contains(&body.roughness) || !(0.0..=1.0).contains(&body.metalness) {
        return Err(bad("roughness and metalness must lie in [0, 1]"));
    }
    if !(body.orbital_distance.is_finite() && body.orbital_distance >= 0.0) {
        return Err(bad("orbital distance must be non-negative"));
    }
    if !body.orbital_speed.is_finite() {
        return Err(bad("orbital speed must be finite"));
    }
    Ok(())
}

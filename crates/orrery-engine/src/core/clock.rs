use crate::components::body::{OrbitalState, SceneBody};

/// Spin radians per second for orbiting bodies.
pub const PLANET_SPIN_FACTOR: f32 = 2.0;
/// Spin radians per second for the central body.
pub const CENTRAL_SPIN_FACTOR: f32 = 0.1;
/// Default whole-system yaw, radians per second.
pub const SYSTEM_YAW_SPEED: f32 = 0.02;

/// Orbital simulation clock.
///
/// Angles are pure functions of the elapsed time since mount, so a dropped
/// frame only means the next tick sees a larger `elapsed`. There is no
/// accumulator to drift.
#[derive(Debug, Clone)]
pub struct OrbitalClock {
    system_yaw_speed: f32,
    system_yaw: f32,
    elapsed: f32,
}

impl OrbitalClock {
    pub fn new(system_yaw_speed: f32) -> Self {
        Self {
            system_yaw_speed,
            system_yaw: 0.0,
            elapsed: 0.0,
        }
    }

    /// State of a single body at time `t`.
    pub fn state_at(orbital_speed: f32, spin_factor: f32, t: f32) -> OrbitalState {
        OrbitalState {
            orbital_angle: orbital_speed * t,
            spin_angle: spin_factor * t,
        }
    }

    /// Advance every body to `elapsed` seconds since mount.
    /// Returns false (and changes nothing) when `elapsed` is not finite.
    pub fn tick(&mut self, elapsed: f32, bodies: &mut [SceneBody]) -> bool {
        if !elapsed.is_finite() {
            log::warn!("ignoring frame with non-finite elapsed time {elapsed}");
            return false;
        }
        // Host clocks can report a tiny negative value on the first frame.
        let t = elapsed.max(0.0);
        for body in bodies.iter_mut() {
            body.state = Self::state_at(body.descriptor.orbital_speed, body.spin_factor, t);
        }
        self.system_yaw = self.system_yaw_speed * t;
        self.elapsed = t;
        true
    }

    /// Yaw applied to the whole composed system.
    pub fn system_yaw(&self) -> f32 {
        self.system_yaw
    }

    pub fn system_yaw_speed(&self) -> f32 {
        self.system_yaw_speed
    }

    /// Elapsed time of the last accepted tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

impl Default for OrbitalClock {
    fn default() -> Self {
        Self::new(SYSTEM_YAW_SPEED)
    }
}

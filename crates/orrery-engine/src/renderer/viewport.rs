use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

use crate::error::{Result, SceneError};
use crate::input::queue::InputEvent;

/// Static camera interaction policy for one scene.
///
/// Pan and zoom are never offered. Rotation is drag-driven, auto-rotation
/// always runs at `auto_rotate_speed`, and the look angles stay inside
/// their bounds so the camera can't flip or spin all the way round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportConstraints {
    #[serde(default = "enabled")]
    pub rotate_enabled: bool,
    /// Same unit as three.js OrbitControls: 1.0 = one turn per 60 s.
    pub auto_rotate_speed: f32,
    /// Vertical look limit (min, max), radians from the +Y axis.
    #[serde(default = "full_polar")]
    pub polar: (f32, f32),
    /// Horizontal look limit (min, max), if any.
    #[serde(default)]
    pub azimuth: Option<(f32, f32)>,
    /// Drag sensitivity multiplier.
    #[serde(default = "unit_speed")]
    pub rotate_speed: f32,
}

fn enabled() -> bool {
    true
}

fn full_polar() -> (f32, f32) {
    (0.0, PI)
}

fn unit_speed() -> f32 {
    1.0
}

impl ViewportConstraints {
    /// Rotation-only orbit with symmetric polar limits `[margin, π - margin]`.
    pub fn orbit(auto_rotate_speed: f32, polar_margin: f32) -> Self {
        Self {
            rotate_enabled: true,
            auto_rotate_speed,
            polar: (polar_margin, PI - polar_margin),
            azimuth: None,
            rotate_speed: 1.0,
        }
    }

    pub fn with_azimuth(mut self, min: f32, max: f32) -> Self {
        self.azimuth = Some((min, max));
        self
    }

    /// Decorative-only: no drag, no spin.
    pub fn fixed() -> Self {
        Self {
            rotate_enabled: false,
            auto_rotate_speed: 0.0,
            polar: full_polar(),
            azimuth: None,
            rotate_speed: 1.0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = self.polar;
        if !(0.0..=PI).contains(&lo) || !(0.0..=PI).contains(&hi) || lo > hi {
            return Err(SceneError::config(format!("polar bounds ({lo}, {hi}) must satisfy 0 <= min <= max <= π")));
        }
        if let Some((lo, hi)) = self.azimuth {
            if !(lo.is_finite() && hi.is_finite()) || lo > hi {
                return Err(SceneError::config(format!("azimuth bounds ({lo}, {hi}) are inverted")));
            }
        }
        if !(self.auto_rotate_speed.is_finite() && self.auto_rotate_speed >= 0.0) {
            return Err(SceneError::config("auto-rotate speed must be a non-negative number"));
        }
        if !self.rotate_speed.is_finite() {
            return Err(SceneError::config("rotate speed must be finite"));
        }
        Ok(())
    }
}

/// Applies a `ViewportConstraints` policy to the scene camera.
///
/// Orientation is `base + drag + auto(t)`, clamped. Only the drag offset
/// is state; auto-rotation is a pure function of elapsed time.
#[derive(Debug, Clone)]
pub struct ViewportController {
    constraints: ViewportConstraints,
    radius: f32,
    base_polar: f32,
    base_azimuth: f32,
    drag_polar: f32,
    drag_azimuth: f32,
    surface_height: f32,
    pointer: Option<Vec2>,
    elapsed: f32,
    polar: f32,
    azimuth: f32,
}

impl ViewportController {
    pub fn new(constraints: ViewportConstraints, camera_position: Vec3) -> Self {
        let radius = camera_position.length().max(f32::EPSILON);
        let base_polar = (camera_position.y / radius).clamp(-1.0, 1.0).acos();
        let base_azimuth = camera_position.x.atan2(camera_position.z);
        let mut controller = Self {
            constraints,
            radius,
            base_polar,
            base_azimuth,
            drag_polar: 0.0,
            drag_azimuth: 0.0,
            surface_height: 600.0,
            pointer: None,
            elapsed: 0.0,
            polar: base_polar,
            azimuth: base_azimuth,
        };
        controller.update(0.0);
        controller
    }

    pub const fn pan_enabled(&self) -> bool {
        false
    }

    pub const fn zoom_enabled(&self) -> bool {
        false
    }

    pub fn constraints(&self) -> &ViewportConstraints {
        &self.constraints
    }

    /// Auto-rotation angle after `t` seconds.
    pub fn auto_rotation_at(&self, t: f32) -> f32 {
        TAU / 60.0 * self.constraints.auto_rotate_speed * t
    }

    /// Feed one pointer/resize event.
    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::Resize { height, .. } => {
                if height > 0.0 {
                    self.surface_height = height;
                }
            }
            InputEvent::PointerDown { x, y } => {
                if self.constraints.rotate_enabled {
                    self.pointer = Some(Vec2::new(x, y));
                }
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(last) = self.pointer {
                    let now = Vec2::new(x, y);
                    let delta = now - last;
                    let scale = TAU / self.surface_height * self.constraints.rotate_speed;
                    self.drag_azimuth -= delta.x * scale;
                    self.drag_polar -= delta.y * scale;
                    self.pointer = Some(now);
                    self.settle_drag();
                }
            }
            InputEvent::PointerUp { .. } => {
                self.pointer = None;
            }
        }
    }

    pub fn handle_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) {
        for event in events {
            self.handle(event);
        }
    }

    /// Recompute orientation for `elapsed` seconds and return the camera position.
    pub fn update(&mut self, elapsed: f32) -> Vec3 {
        self.elapsed = elapsed;
        let (polar, azimuth) = self.orientation_at(elapsed);
        self.polar = polar;
        self.azimuth = azimuth;
        self.camera_position()
    }

    /// Clamped (polar, azimuth) at time `t` with the current drag offset.
    pub fn orientation_at(&self, t: f32) -> (f32, f32) {
        let polar = (self.base_polar + self.drag_polar).clamp(self.constraints.polar.0, self.constraints.polar.1);
        let mut azimuth = self.base_azimuth + self.drag_azimuth + self.auto_rotation_at(t);
        if let Some((lo, hi)) = self.constraints.azimuth {
            azimuth = azimuth.clamp(lo, hi);
        }
        (polar, azimuth)
    }

    pub fn polar(&self) -> f32 {
        self.polar
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    /// Camera position for the current orientation, on a sphere around the origin.
    pub fn camera_position(&self) -> Vec3 {
        let (sp, cp) = self.polar.sin_cos();
        let (sa, ca) = self.azimuth.sin_cos();
        Vec3::new(self.radius * sp * sa, self.radius * cp, self.radius * sp * ca)
    }

    /// Pull the drag offset back so dragging past a limit doesn't build up slack.
    fn settle_drag(&mut self) {
        let (polar, azimuth) = self.orientation_at(self.elapsed);
        self.drag_polar = polar - self.base_polar;
        if self.constraints.azimuth.is_some() {
            self.drag_azimuth = azimuth - self.base_azimuth - self.auto_rotation_at(self.elapsed);
        }
    }
}

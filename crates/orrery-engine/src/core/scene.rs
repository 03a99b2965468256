use crate::api::recipe::Accent;
use crate::components::body::SceneBody;
use crate::core::clock::OrbitalClock;
use crate::extensions::transform::{
    accent_transform_at, element_transform_at, ring_transform_at, transform_at, Transform,
};
use crate::input::queue::InputEvent;
use crate::renderer::camera::Camera3D;
use crate::renderer::viewport::ViewportController;
use crate::systems::fields::{FieldKind, ProceduralField};
use crate::systems::lighting::LightState;

/// One mounted scene instance.
///
/// Owns every piece of per-instance state: bodies and their orbital state,
/// generated fields, camera, lights and viewport. Two handles never share
/// mutable state, so the same variant can be mounted twice on a page.
pub struct SceneHandle {
    bodies: Vec<SceneBody>,
    fields: Vec<ProceduralField>,
    accents: Vec<Accent>,
    camera: Camera3D,
    lights: LightState,
    viewport: ViewportController,
    clock: OrbitalClock,
    group_yaw_speed: f32,
    frame_count: u64,
}

impl SceneHandle {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        bodies: Vec<SceneBody>,
        fields: Vec<ProceduralField>,
        accents: Vec<Accent>,
        camera: Camera3D,
        lights: LightState,
        viewport: ViewportController,
        clock: OrbitalClock,
        group_yaw_speed: f32,
    ) -> Self {
        let mut handle = Self {
            bodies,
            fields,
            accents,
            camera,
            lights,
            viewport,
            clock,
            group_yaw_speed,
            frame_count: 0,
        };
        handle.advance(0.0);
        handle
    }

    /// Advance to `elapsed` seconds since mount.
    ///
    /// Bodies, rings and camera are all updated before this returns.
    /// Returns false when the frame was rejected (non-finite time).
    pub fn on_frame(&mut self, elapsed: f32) -> bool {
        if !self.advance(elapsed) {
            return false;
        }
        self.frame_count += 1;
        true
    }

    fn advance(&mut self, elapsed: f32) -> bool {
        if !self.clock.tick(elapsed, &mut self.bodies) {
            return false;
        }
        let t = self.clock.elapsed();
        let yaw = self.clock.system_yaw();
        for body in self.bodies.iter_mut() {
            body.transform = transform_at(body, t, yaw);
            body.ring_transform = body.descriptor.has_ring.then(|| ring_transform_at(body, yaw));
        }
        self.camera.position = self.viewport.update(t);
        true
    }

    /// Route pointer and resize events to the viewport and camera.
    pub fn handle_input(&mut self, events: &[InputEvent]) {
        for event in events {
            if let InputEvent::Resize { width, height } = *event {
                self.camera.resize(width, height);
            }
            self.viewport.handle(event);
        }
        self.camera.position = self.viewport.update(self.clock.elapsed());
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// Bodies in mount order: central body (if any) first, then the focus set.
    pub fn bodies(&self) -> &[SceneBody] {
        &self.bodies
    }

    pub fn body(&self, id: &str) -> Option<&SceneBody> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn fields(&self) -> &[ProceduralField] {
        &self.fields
    }

    /// First field of the given kind.
    pub fn field(&self, kind: FieldKind) -> Option<&ProceduralField> {
        self.fields.iter().find(|f| f.kind == kind)
    }

    pub fn accents(&self) -> &[Accent] {
        &self.accents
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn lights(&self) -> &LightState {
        &self.lights
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut ViewportController {
        &mut self.viewport
    }

    pub fn system_yaw(&self) -> f32 {
        self.clock.system_yaw()
    }

    /// Yaw of the particle/accent group.
    pub fn group_yaw(&self) -> f32 {
        self.group_yaw_speed * self.clock.elapsed()
    }

    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed()
    }

    /// Accepted frames since mount.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Current transform of one element of one field.
    pub fn element_transform(&self, field: usize, element: usize) -> Option<Transform> {
        let element = self.fields.get(field)?.elements.get(element)?;
        Some(element_transform_at(element, self.elapsed(), self.element_yaw(field)))
    }

    /// Current transforms of every element in a field, in element order.
    pub fn element_transforms(&self, field: usize) -> Vec<Transform> {
        let Some(f) = self.fields.get(field) else {
            return Vec::new();
        };
        let yaw = self.element_yaw(field);
        f.elements
            .iter()
            .map(|e| element_transform_at(e, self.elapsed(), yaw))
            .collect()
    }

    pub fn accent_transforms(&self) -> Vec<Transform> {
        let yaw = self.group_yaw();
        self.accents
            .iter()
            .map(|a| accent_transform_at(a, self.elapsed(), yaw))
            .collect()
    }

    /// Belts and star fields ride the system yaw; particles drift with the group.
    fn element_yaw(&self, field: usize) -> f32 {
        match self.fields.get(field).map(|f| f.kind) {
            Some(FieldKind::AmbientParticle) => self.group_yaw(),
            _ => self.system_yaw(),
        }
    }
}

/// Frame buffer layout shared with the page's renderer.
/// Must stay in sync with the TypeScript `protocol.ts` on the host side.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Camera: 20 floats: view_proj (16, column-major), position xyz1 (4)]
/// [Lights: light_count × 8 floats]
/// [Instances: instance_count × 28 floats]
/// ```
///
/// Counts and offsets are written into the header every frame.
/// TypeScript reads them from the header to find each section.

use crate::core::scene::SceneHandle;
use crate::renderer::instance::{RenderBuffer, RenderInstance};
use crate::systems::lighting::LIGHT_FLOATS;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_ELAPSED: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_TRANSPARENT_SPLIT: usize = 4;
pub const HEADER_LIGHT_COUNT: usize = 5;
pub const HEADER_AMBIENT: usize = 6;
pub const HEADER_CAMERA_OFFSET: usize = 7;
pub const HEADER_LIGHT_OFFSET: usize = 8;
pub const HEADER_INSTANCE_OFFSET: usize = 9;
pub const HEADER_TOTAL_FLOATS: usize = 10;
pub const HEADER_FOV: usize = 11;
pub const HEADER_ASPECT: usize = 12;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section.
pub const CAMERA_FLOATS: usize = 20;

/// Computed offsets for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolLayout {
    pub light_count: usize,
    pub instance_count: usize,
    /// Offset (in floats) where camera data begins.
    pub camera_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_offset: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_offset: usize,
    /// Total buffer size in floats.
    pub total_floats: usize,
}

impl ProtocolLayout {
    pub fn new(light_count: usize, instance_count: usize) -> Self {
        let camera_offset = HEADER_FLOATS;
        let light_offset = camera_offset + CAMERA_FLOATS;
        let instance_offset = light_offset + light_count * LIGHT_FLOATS;
        let total_floats = instance_offset + instance_count * RenderInstance::FLOATS;
        Self {
            light_count,
            instance_count,
            camera_offset,
            light_offset,
            instance_offset,
            total_floats,
        }
    }

    pub fn total_bytes(&self) -> usize {
        self.total_floats * 4
    }
}

/// Serialize one frame (header, camera, lights, instances) into `out`.
/// `out` is cleared first; its allocation is reused across frames.
pub fn encode_frame(scene: &SceneHandle, buffer: &RenderBuffer, out: &mut Vec<f32>) -> ProtocolLayout {
    let lights = scene.lights();
    let layout = ProtocolLayout::new(lights.count(), buffer.instances.len());

    out.clear();
    out.reserve(layout.total_floats);
    out.resize(HEADER_FLOATS, 0.0);
    out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    out[HEADER_FRAME_COUNTER] = scene.frame_count() as f32;
    out[HEADER_ELAPSED] = scene.elapsed();
    out[HEADER_INSTANCE_COUNT] = layout.instance_count as f32;
    out[HEADER_TRANSPARENT_SPLIT] = buffer.transparent_split as f32;
    out[HEADER_LIGHT_COUNT] = layout.light_count as f32;
    out[HEADER_AMBIENT] = lights.ambient();
    out[HEADER_CAMERA_OFFSET] = layout.camera_offset as f32;
    out[HEADER_LIGHT_OFFSET] = layout.light_offset as f32;
    out[HEADER_INSTANCE_OFFSET] = layout.instance_offset as f32;
    out[HEADER_TOTAL_FLOATS] = layout.total_floats as f32;
    out[HEADER_FOV] = scene.camera().fov_degrees;
    out[HEADER_ASPECT] = scene.camera().aspect;

    let camera = scene.camera().uniform();
    out.extend_from_slice(bytemuck::cast_slice(&camera.view_proj));
    out.extend_from_slice(&camera.position);

    lights.write_wire(out);
    out.extend_from_slice(buffer.as_floats());

    debug_assert_eq!(out.len(), layout.total_floats);
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::recipe::SceneVariant;
    use crate::core::composer::SceneComposer;
    use crate::systems::render::build_render_buffer;

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(3, 10);
        assert_eq!(layout.camera_offset, HEADER_FLOATS);
        assert_eq!(layout.light_offset, HEADER_FLOATS + CAMERA_FLOATS);
        assert_eq!(layout.instance_offset, layout.light_offset + 3 * 8);
        assert_eq!(layout.total_floats, layout.instance_offset + 10 * 28);
        assert_eq!(layout.total_bytes(), layout.total_floats * 4);
    }

    #[test]
    fn encoded_frame_matches_layout() {
        let mut scene = SceneComposer::builtin()
            .compose(&SceneVariant::SolarSystem.config().with_seed(8))
            .unwrap();
        scene.on_frame(1.5);
        let mut buf = RenderBuffer::new();
        build_render_buffer(&scene, &mut buf);
        let mut out = Vec::new();
        let layout = encode_frame(&scene, &buf, &mut out);

        assert_eq!(out.len(), layout.total_floats);
        assert_eq!(out[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(out[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(out[HEADER_LIGHT_COUNT], 3.0);
        assert_eq!(out[HEADER_INSTANCE_COUNT], buf.instance_count() as f32);
        assert_eq!(out[HEADER_AMBIENT], 0.3);
        // first light is the golden point light at the origin
        let light = &out[layout.light_offset..layout.light_offset + 8];
        assert_eq!(&light[..3], &[0.0, 0.0, 0.0]);
        assert_eq!(light[6], 1.5);
        assert_eq!(&out[layout.instance_offset..], buf.as_floats());
    }
}

pub mod error;
pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use error::{Result, SceneError};
pub use api::config::SceneConfig;
pub use api::recipe::{Accent, FloatIntensity, SceneRecipe, SceneVariant};
pub use api::types::{Color, SceneSlot};
pub use assets::catalog::{BodyCatalog, CelestialBodyDescriptor};
pub use assets::registry::BodyRegistry;
pub use components::body::{BodyRole, OrbitalState, SceneBody};
pub use components::material::{Material, Shape};
pub use core::boundary::{BoundaryState, BoundaryView, FailurePolicy, LazyBoundary, Placeholder, RequestOutcome};
pub use core::clock::OrbitalClock;
pub use core::composer::SceneComposer;
pub use core::scene::SceneHandle;
pub use renderer::camera::{Camera3D, CameraPreset};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::viewport::{ViewportConstraints, ViewportController};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::protocol::{encode_frame, ProtocolLayout};
pub use systems::fields::{
    Envelope, FieldElement, FieldGenerator, FieldKind, FieldPalette, FieldRecipe, Layout, ProceduralField,
    MAX_FIELD_ELEMENTS,
};
pub use systems::lighting::{DirectionalLight, LightState, LightingPreset, PointLight};
pub use systems::render::build_render_buffer;
pub use extensions::transform::{Hover, Transform, transform_at};

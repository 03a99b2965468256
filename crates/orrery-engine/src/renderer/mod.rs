pub mod camera;
pub mod instance;
pub mod viewport;

// Re-export key types for convenient access
pub use camera::{Camera3D, CameraPreset, CameraUniform};
pub use instance::{RenderBuffer, RenderInstance};
pub use viewport::{ViewportConstraints, ViewportController};

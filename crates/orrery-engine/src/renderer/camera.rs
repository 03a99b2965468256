use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Where the camera starts and how wide it sees. Supplied per scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPreset {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

impl CameraPreset {
    pub const fn new(position: Vec3, fov_degrees: f32) -> Self {
        Self { position, fov_degrees }
    }
}

/// Perspective camera looking at the scene origin.
#[derive(Debug, Clone)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width / height of the host surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl Camera3D {
    pub fn from_preset(preset: &CameraPreset) -> Self {
        Self {
            position: preset.position,
            target: Vec3::ZERO,
            fov_degrees: preset.fov_degrees,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }

    /// Track the host surface size. Zero-sized surfaces keep the old aspect.
    pub fn resize(&mut self, surface_width: f32, surface_height: f32) {
        if surface_width > 0.0 && surface_height > 0.0 {
            self.aspect = surface_width / surface_height;
        }
    }

    /// Distance from the camera to its target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_is_copied() {
        let cam = Camera3D::from_preset(&CameraPreset::new(Vec3::new(0.0, 5.0, 25.0), 60.0));
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 25.0));
        assert_eq!(cam.fov_degrees, 60.0);
        assert!((cam.distance() - (25.0f32 * 25.0 + 25.0).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = Camera3D::from_preset(&CameraPreset::new(Vec3::Z * 6.0, 60.0));
        cam.resize(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.resize(0.0, 0.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera3D::from_preset(&CameraPreset::new(Vec3::Z * 6.0, 60.0));
        let clip = cam.view_projection_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}

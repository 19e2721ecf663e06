use glam::{Mat4, Vec3};

use crate::api::config::{CameraConfig, ProjectionConfig, PITCH_MARGIN_RAD};
use crate::math;

/// Orbit camera circling a fixed target.
/// Yaw/pitch/distance change only through the input-delta methods; the
/// position and view matrix are derived in `update`.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera looks at (the scene origin).
    target: Vec3,
    /// Rotation around +Y in radians (0 = camera on +Z).
    yaw: f32,
    /// Elevation above the XZ plane in radians.
    pitch: f32,
    /// Distance from the target.
    distance: f32,
    position: Vec3,
    view: Mat4,
    config: CameraConfig,
}

impl OrbitCamera {
    pub fn new(config: CameraConfig) -> Self {
        let mut camera = Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 0.0,
            position: Vec3::ZERO,
            view: Mat4::IDENTITY,
            config,
        };
        camera.reset();
        camera
    }

    /// Restore the configured starting yaw, pitch and distance.
    pub fn reset(&mut self) {
        self.yaw = self.config.yaw_deg.to_radians();
        self.pitch = self.clamp_pitch(self.config.pitch_deg.to_radians());
        self.distance = self.clamp_distance(self.config.distance);
        self.update();
    }

    fn pitch_limit(&self) -> f32 {
        // Unvalidated configs may leave no room; pin pitch to level then
        (self.config.pitch_limit_deg.to_radians() - PITCH_MARGIN_RAD).max(0.0)
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        let limit = self.pitch_limit();
        pitch.clamp(-limit, limit)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance
            .max(self.config.min_distance)
            .min(self.config.max_distance)
    }

    /// Apply a pointer-drag delta in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        self.yaw += dx * self.config.sensitivity;
        self.pitch = self.clamp_pitch(self.pitch + dy * self.config.sensitivity);
    }

    /// Apply a wheel delta. Positive scroll moves the camera closer.
    pub fn scroll(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.distance = self.clamp_distance(self.distance - delta * self.config.zoom_sensitivity);
    }

    /// Recompute position and view matrix from the spherical coordinates.
    pub fn update(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let dir = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw);
        self.position = self.target + dir * self.distance;
        self.view = math::look_at(self.position, self.target, Vec3::Y);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }
}

/// Perspective projection tracking the canvas aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub config: ProjectionConfig,
}

impl Projection {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Update the aspect ratio from a canvas size. Zero-sized canvases are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.config.aspect = width / height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.config.aspect
    }

    pub fn matrix(&self) -> Mat4 {
        let c = &self.config;
        math::perspective(c.fov_deg, c.aspect, c.near, c.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_camera(distance: f32) -> OrbitCamera {
        OrbitCamera::new(CameraConfig {
            distance,
            pitch_deg: 0.0,
            yaw_deg: 0.0,
            ..CameraConfig::default()
        })
    }

    #[test]
    fn level_camera_sits_on_positive_z() {
        for d in [2.0, 10.0, 45.5, 90.0] {
            let cam = level_camera(d);
            assert!((cam.position() - Vec3::new(0.0, 0.0, d)).length() < 1e-4);
            // Target projects to the view-space -Z axis at distance d
            let t = cam.view_matrix().transform_point3(Vec3::ZERO);
            assert!((t - Vec3::new(0.0, 0.0, -d)).length() < 1e-4, "got {t:?}");
        }
    }

    #[test]
    fn drag_changes_yaw_and_pitch() {
        let mut cam = level_camera(10.0);
        cam.drag(100.0, 50.0);
        assert!((cam.yaw() - 0.5).abs() < 1e-6);
        assert!((cam.pitch() - 0.25).abs() < 1e-6);
        cam.update();
        assert!((cam.position().length() - 10.0).abs() < 1e-4);
        assert!(cam.position().y > 0.0);
    }

    #[test]
    fn pitch_clamps_inside_limit() {
        let limit = 89f32.to_radians();
        let mut cam = level_camera(10.0);
        cam.drag(0.0, 1.0e6);
        assert!(cam.pitch() < limit);
        assert!(cam.pitch() > 0.0);
        cam.drag(0.0, -1.0e7);
        assert!(cam.pitch() > -limit);
        cam.update();
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn tiny_pitch_limit_keeps_camera_level() {
        let cam = OrbitCamera::new(CameraConfig {
            pitch_limit_deg: 0.05,
            ..CameraConfig::default()
        });
        assert_eq!(cam.pitch(), 0.0);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn scroll_clamps_distance() {
        let mut cam = level_camera(10.0);
        cam.scroll(1.0e6);
        assert_eq!(cam.distance(), cam.config().min_distance);
        cam.scroll(-1.0e6);
        assert_eq!(cam.distance(), cam.config().max_distance);
    }

    #[test]
    fn non_finite_input_ignored() {
        let mut cam = level_camera(10.0);
        cam.drag(f32::NAN, 1.0);
        cam.scroll(f32::INFINITY);
        assert_eq!(cam.yaw(), 0.0);
        assert_eq!(cam.distance(), 10.0);
    }

    #[test]
    fn reset_restores_start() {
        let mut cam = OrbitCamera::new(CameraConfig::default());
        let start = cam.position();
        cam.drag(300.0, -20.0);
        cam.scroll(100.0);
        cam.update();
        cam.reset();
        assert!((cam.position() - start).length() < 1e-5);
    }

    #[test]
    fn projection_tracks_aspect() {
        let mut proj = Projection::new(ProjectionConfig::default());
        proj.resize(800.0, 400.0);
        assert_eq!(proj.aspect(), 2.0);
        proj.resize(0.0, 400.0);
        assert_eq!(proj.aspect(), 2.0);
        let m = proj.matrix();
        assert!(m.is_finite());
    }
}

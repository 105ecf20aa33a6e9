//! Viewer state: world position, orientation and screen projection

use crate::core::types::{Quat, Vec2, Vec3};

/// Depth used in place of zero when projecting points on the eye plane
const MIN_PROJECTION_DEPTH: f32 = 1e-4;

/// A point projected into screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate (0 = left edge)
    pub x: f32,
    /// Vertical pixel coordinate (0 = top edge, grows downward)
    pub y: f32,
    /// Distance along the view direction (positive = in front of the viewer)
    pub depth: f32,
}

impl ScreenPoint {
    /// Whether the point lies in front of the viewer
    pub fn is_in_front(&self) -> bool {
        self.depth > 0.0
    }
}

/// Read-only per-frame input: where the viewer is and where it looks.
#[derive(Clone, Debug)]
pub struct Viewer {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion (identity looks down -Z)
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Viewer {
    /// Create a viewer looking down -Z with a 60 degree vertical field of view
    pub fn new(position: Vec3, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: 60.0_f32.to_radians(),
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    /// Set rotation from euler angles (yaw, pitch in radians)
    pub fn set_rotation_euler(&mut self, yaw: f32, pitch: f32) {
        self.rotation = Quat::from_euler(glam::EulerRot::YXZ, yaw, pitch, 0.0);
    }

    /// Builder-style variant of [`Viewer::set_rotation_euler`]
    pub fn looking(mut self, yaw: f32, pitch: f32) -> Self {
        self.set_rotation_euler(yaw, pitch);
        self
    }

    /// Get forward direction (negative Z in view space)
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Translate a world point by the viewer position, then rotate it into view space
    pub fn to_view_space(&self, point: Vec3) -> Vec3 {
        self.rotation.conjugate() * (point - self.position)
    }

    /// Focal length in pixels derived from the vertical field of view
    pub fn focal_length(&self) -> f32 {
        0.5 * self.viewport.y / (0.5 * self.fov_y).tan()
    }

    /// Project a world point to screen space.
    ///
    /// `x`/`y` are only meaningful when the point is in front of the viewer.
    pub fn project(&self, point: Vec3) -> ScreenPoint {
        let view = self.to_view_space(point);
        let depth = -view.z;
        let scale = self.focal_length() / depth.abs().max(MIN_PROJECTION_DEPTH);

        ScreenPoint {
            x: 0.5 * self.viewport.x + view.x * scale,
            y: 0.5 * self.viewport.y - view.y * scale,
            depth,
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 640.0, 480.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let viewer = Viewer::default();
        let forward = viewer.forward();
        assert!((forward.z - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_point_ahead_projects_to_center() {
        let viewer = Viewer::new(Vec3::new(10.0, 5.0, 10.0), 640.0, 480.0);
        let p = viewer.project(Vec3::new(10.0, 5.0, 0.0));
        assert!(p.is_in_front());
        assert!((p.depth - 10.0).abs() < 0.001);
        assert!((p.x - 320.0).abs() < 0.001);
        assert!((p.y - 240.0).abs() < 0.001);
    }

    #[test]
    fn test_point_behind_has_negative_depth() {
        let viewer = Viewer::default();
        let p = viewer.project(Vec3::new(0.0, 0.0, 4.0));
        assert!(!p.is_in_front());
    }

    #[test]
    fn test_screen_axes() {
        let viewer = Viewer::default();
        // Right and up in the world map to larger x and smaller y on screen
        let right = viewer.project(Vec3::new(1.0, 0.0, -10.0));
        let up = viewer.project(Vec3::new(0.0, 1.0, -10.0));
        assert!(right.x > 320.0);
        assert!(up.y < 240.0);
    }

    #[test]
    fn test_yaw_turns_forward() {
        // Quarter turn to the left looks down -X
        let viewer = Viewer::default().looking(std::f32::consts::FRAC_PI_2, 0.0);
        let forward = viewer.forward();
        assert!((forward.x - (-1.0)).abs() < 0.001);

        let p = viewer.project(Vec3::new(-5.0, 0.0, 0.0));
        assert!((p.depth - 5.0).abs() < 0.001);
    }
}

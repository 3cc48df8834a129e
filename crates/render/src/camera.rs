use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]`.
pub const PITCH_LIMIT: f32 = PI / 2.5;
/// Pointer travel, in pixels, per radian of rotation.
pub const POINTER_PIXELS_PER_RADIAN: f32 = 50.0;
/// Camera offset from the orbit center before rotation.
pub const ORBIT_OFFSET: Vec3 = Vec3::new(0.0, 0.25, 1.0);

/// Orbit camera driven by absolute pointer positions.
///
/// Pitch (`x_rotation`) is clamped; yaw (`y_rotation`) spins freely. Only
/// the previous pointer position is remembered; there is no smoothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitCamera {
    x_rotation: f32,
    y_rotation: f32,
    last_pointer: Vec2,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one pointer-move event in page coordinates.
    pub fn on_pointer_move(&mut self, page_x: f32, page_y: f32) {
        self.x_rotation += (page_y - self.last_pointer.y) / POINTER_PIXELS_PER_RADIAN;
        self.y_rotation -= (page_x - self.last_pointer.x) / POINTER_PIXELS_PER_RADIAN;
        self.x_rotation = self.x_rotation.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.last_pointer = Vec2::new(page_x, page_y);
    }

    pub fn x_rotation(&self) -> f32 {
        self.x_rotation
    }

    pub fn y_rotation(&self) -> f32 {
        self.y_rotation
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.last_pointer
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        orbit_transform(self.x_rotation, self.y_rotation)
            .w_axis
            .truncate()
    }

    pub fn view_matrix(&self, focus: Vec3) -> Mat4 {
        view_matrix(self.x_rotation, self.y_rotation, focus)
    }
}

/// `Y(y_rotation) * X(-x_rotation) * T(ORBIT_OFFSET)`.
pub fn orbit_transform(x_rotation: f32, y_rotation: f32) -> Mat4 {
    Mat4::from_rotation_y(y_rotation)
        * Mat4::from_rotation_x(-x_rotation)
        * Mat4::from_translation(ORBIT_OFFSET)
}

/// Look-at view from the orbit position towards `focus`, up `+Y`.
pub fn view_matrix(x_rotation: f32, y_rotation: f32, focus: Vec3) -> Mat4 {
    let eye = orbit_transform(x_rotation, y_rotation).w_axis.truncate();
    Mat4::look_at_rh(eye, focus, Vec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_sits_at_orbit_offset() {
        let cam = OrbitCamera::new();
        assert_eq!(cam.eye(), ORBIT_OFFSET);
        let expected = Mat4::look_at_rh(ORBIT_OFFSET, Vec3::ZERO, Vec3::Y);
        assert!(cam.view_matrix(Vec3::ZERO).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn view_maps_eye_to_origin_and_focus_ahead() {
        let view = view_matrix(0.0, 0.0, Vec3::ZERO);
        assert!(view.transform_point3(ORBIT_OFFSET).length() < 1e-6);
        let focus = view.transform_point3(Vec3::ZERO);
        assert!(focus.x.abs() < 1e-6 && focus.y.abs() < 1e-6);
        assert!(focus.z < 0.0);
    }

    #[test]
    fn view_matrix_is_deterministic() {
        let a = view_matrix(0.3, -1.7, Vec3::new(0.5, 0.5, 0.0));
        let b = view_matrix(0.3, -1.7, Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(a.to_cols_array(), b.to_cols_array());
    }

    #[test]
    fn pointer_move_rotates_by_delta_over_fifty() {
        let mut cam = OrbitCamera::new();
        cam.on_pointer_move(100.0, 25.0);
        assert_eq!(cam.x_rotation(), 0.5);
        assert_eq!(cam.y_rotation(), -2.0);
        assert_eq!(cam.last_pointer(), Vec2::new(100.0, 25.0));

        cam.on_pointer_move(50.0, 25.0);
        assert_eq!(cam.x_rotation(), 0.5);
        assert_eq!(cam.y_rotation(), -1.0);
    }

    #[test]
    fn pitch_stays_clamped() {
        let mut cam = OrbitCamera::new();
        let path = [(0.0, 500.0), (10.0, -4000.0), (20.0, 35.0), (-9.0, 9000.0), (3.0, 0.0)];
        for (x, y) in path {
            cam.on_pointer_move(x, y);
            assert!(cam.x_rotation() >= -PITCH_LIMIT && cam.x_rotation() <= PITCH_LIMIT);
        }
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut cam = OrbitCamera::new();
        for i in 1..=10 {
            cam.on_pointer_move(i as f32 * 1000.0, 0.0);
        }
        assert_eq!(cam.y_rotation(), -200.0);
    }

    #[test]
    fn pitch_raises_camera() {
        let mut cam = OrbitCamera::new();
        cam.on_pointer_move(0.0, 25.0);
        assert!(cam.eye().y > ORBIT_OFFSET.y);
        // distance to the orbit center is preserved
        assert!((cam.eye().length() - ORBIT_OFFSET.length()).abs() < 1e-5);
    }
}

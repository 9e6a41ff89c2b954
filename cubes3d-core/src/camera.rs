//! Camera with a fixed look-at target
use crate::matrix::Matrix4;
use crate::transform::Transformable;
use crate::vector::Vector3;

/// A transform that always faces `target`.
///
/// There is no free rotation: orientation is a function of position and
/// target, re-derived after every move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    transform: Transformable,
    target: Vector3,
    up: Vector3,
}

impl Camera {
    pub fn new(position: Vector3, target: Vector3) -> Self {
        let mut transform = Transformable::new();
        transform.set_position(position);
        let mut camera = Self {
            transform,
            target,
            up: Vector3::UP,
        };
        camera.refresh();
        camera
    }

    /// Use a reference up direction other than world +Y.
    pub fn with_up(mut self, up: Vector3) -> Self {
        self.up = up;
        self.refresh();
        self
    }

    pub fn transform(&self) -> &Transformable {
        &self.transform
    }

    /// Camera-to-world matrix.
    pub fn matrix(&self) -> &Matrix4 {
        self.transform.matrix()
    }

    /// World-to-camera matrix, for feeding a renderer.
    pub fn view_matrix(&self) -> Matrix4 {
        self.transform.view_matrix()
    }

    pub fn position(&self) -> Vector3 {
        self.transform.position()
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn forward(&self) -> Vector3 {
        self.transform.forward()
    }

    pub fn right(&self) -> Vector3 {
        self.transform.right()
    }

    pub fn up(&self) -> Vector3 {
        self.transform.up()
    }

    pub fn set_position(&mut self, position: Vector3) {
        self.transform.set_position(position);
        self.refresh();
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.transform.translate(delta);
        self.refresh();
    }

    pub fn set_target(&mut self, target: Vector3) {
        self.target = target;
        self.refresh();
    }

    /// Place the camera on a horizontal circle of `radius` around the target,
    /// at `angle` radians measured from +Z towards +X.
    pub fn orbit(&mut self, angle: f32, radius: f32) {
        let (s, c) = angle.sin_cos();
        let offset = Vector3::new(s * radius, 0.0, c * radius);
        self.set_position(self.target + offset);
    }

    fn refresh(&mut self) {
        self.transform.look_at(self.target, self.up);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 3.0), Vector3::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_forward_points_at_target() {
        let camera = Camera::new(Vector3::new(0.0, 0.0, -3.0), Vector3::ZERO);
        let forward = camera.forward();
        assert!(vec_approx_eq(forward, Vector3::Z));
        assert!((forward.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_translate_reorients() {
        let mut camera = Camera::default();
        camera.translate(Vector3::new(3.0, 0.0, -3.0));
        assert_eq!(camera.position(), Vector3::new(3.0, 0.0, 0.0));
        assert!(vec_approx_eq(camera.forward(), -Vector3::X));
    }

    #[test]
    fn test_set_target_reorients() {
        let mut camera = Camera::default();
        camera.set_target(Vector3::new(0.0, 0.0, 10.0));
        assert!(vec_approx_eq(camera.forward(), Vector3::Z));
        assert_eq!(camera.target(), Vector3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut camera = Camera::default();
        for step in 0..16 {
            camera.orbit(step as f32 * 0.4, 5.0);
            assert!((camera.position().distance(&camera.target()) - 5.0).abs() < 1e-5);
            let expected = (camera.target() - camera.position()).normalized();
            assert!(vec_approx_eq(camera.forward(), expected));
        }
    }

    #[test]
    fn test_view_matrix_moves_target_onto_negative_z() {
        let camera = Camera::new(Vector3::new(4.0, 2.0, 4.0), Vector3::new(0.0, 1.0, 0.0));
        let distance = camera.position().distance(&camera.target());
        let in_view = camera.view_matrix().transform_point(camera.target());
        assert!(vec_approx_eq(in_view, Vector3::new(0.0, 0.0, -distance)));
    }

    #[test]
    fn test_custom_up() {
        let camera = Camera::new(Vector3::new(0.0, 0.0, 5.0), Vector3::ZERO).with_up(Vector3::X);
        assert!(vec_approx_eq(camera.up(), Vector3::X));
    }
}

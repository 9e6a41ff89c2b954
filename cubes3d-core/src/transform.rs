//! Object-to-world transform with derived position/rotation/scale
//!
//! Basis convention used throughout the crate (OpenGL style, objects look
//! down their local -Z):
//!
//! | basis     | source                |
//! |-----------|-----------------------|
//! | `right`   | column 0              |
//! | `up`      | column 1              |
//! | `forward` | column 2, negated     |
//! | position  | column 3              |
use tracing::trace;

use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// Below this squared length the forward/up pair is treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-12;

/// An object placed in world space through a single matrix.
///
/// Position, rotation and scale are computed from the matrix on demand; none
/// of them is stored separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformable {
    matrix: Matrix4,
}

impl Transformable {
    pub fn new() -> Self {
        Self::from_matrix(Matrix4::identity())
    }

    pub fn from_matrix(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Matrix4) {
        self.matrix = matrix;
    }

    // ---- derived queries ---------------------------------------------------

    pub fn position(&self) -> Vector3 {
        self.matrix.position()
    }

    /// Per-axis scale, taken as the length of each of the first three rows.
    /// Assumes no shear.
    pub fn scale(&self) -> Vector3 {
        Vector3::new(
            self.matrix.row(0).length(),
            self.matrix.row(1).length(),
            self.matrix.row(2).length(),
        )
    }

    /// Euler angles (x, y, z) in radians.
    ///
    /// Only meaningful for a pure rotation; near ±90° pitch the x and z
    /// angles are not unique.
    pub fn rotation(&self) -> Vector3 {
        let m = &self.matrix;
        Vector3::new(
            m.element(2, 1).atan2(m.element(2, 2)),
            (-m.element(2, 0)).clamp(-1.0, 1.0).asin(),
            m.element(1, 0).atan2(m.element(0, 0)),
        )
    }

    pub fn right(&self) -> Vector3 {
        self.matrix.column(0).normalized()
    }

    pub fn up(&self) -> Vector3 {
        self.matrix.column(1).normalized()
    }

    pub fn forward(&self) -> Vector3 {
        (-self.matrix.column(2)).normalized()
    }

    /// World-to-object matrix, assuming the transform is rotation plus
    /// translation only (what `look_at` produces).
    pub fn view_matrix(&self) -> Matrix4 {
        let right = self.matrix.column(0);
        let up = self.matrix.column(1);
        let back = self.matrix.column(2);
        let pos = self.position();

        Matrix4::from_rows([
            [right.x, right.y, right.z, -right.dot(&pos)],
            [up.x, up.y, up.z, -up.dot(&pos)],
            [back.x, back.y, back.z, -back.dot(&pos)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    // ---- mutators ----------------------------------------------------------

    /// Move to an absolute position, keeping rotation and scale.
    pub fn set_position(&mut self, position: Vector3) {
        self.translate(position - self.position());
    }

    /// Relative world-space move.
    pub fn translate(&mut self, delta: Vector3) {
        self.matrix.translate(delta);
    }

    /// Set the absolute per-axis scale.
    ///
    /// The scale currently in the matrix is divided out first, so repeated
    /// calls replace rather than compound. An axis whose current scale is
    /// zero gets its diagonal entry written directly.
    pub fn set_scale(&mut self, scale: Vector3) {
        let current = self.scale();
        let mut factors = [0.0; 3];
        for (axis, factor) in factors.iter_mut().enumerate() {
            let (now, wanted) = match axis {
                0 => (current.x, scale.x),
                1 => (current.y, scale.y),
                _ => (current.z, scale.z),
            };
            if now == 0.0 {
                self.matrix.set_element(axis, axis, wanted);
                *factor = 1.0;
            } else {
                *factor = wanted / now;
            }
        }
        self.matrix.scale(Vector3::from(factors));
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vector3::splat(scale));
    }

    /// Rotate around `axis` on top of the current orientation.
    pub fn rotate(&mut self, radians: f32, axis: Vector3) {
        self.matrix.rotate(radians, axis);
    }

    /// Orient so that `forward()` points at `target`.
    ///
    /// The upper 3x3 is rebuilt from scratch (any previous rotation and scale
    /// are dropped); the position is kept. If `target` equals the current
    /// position nothing changes. If the view direction is parallel to `up`,
    /// the world axis least aligned with the view direction is used instead.
    pub fn look_at(&mut self, target: Vector3, up: Vector3) {
        let position = self.position();
        let forward = (target - position).normalized();
        if forward == Vector3::ZERO {
            trace!(?target, "look_at target coincides with position");
            return;
        }

        let mut right = forward.cross(&up);
        if right.length_squared() < PARALLEL_EPSILON {
            right = forward.cross(&least_aligned_axis(forward));
        }
        right.normalize();
        let up = right.cross(&forward).normalized();
        let back = -forward;

        self.matrix = Matrix4::from_rows([
            [right.x, up.x, back.x, position.x],
            [right.y, up.y, back.y, position.y],
            [right.z, up.z, back.z, position.z],
            [0.0, 0.0, 0.0, 1.0],
        ]);
    }

    pub fn look_at_object(&mut self, other: &Transformable, up: Vector3) {
        self.look_at(other.position(), up);
    }
}

impl Default for Transformable {
    fn default() -> Self {
        Self::new()
    }
}

fn least_aligned_axis(direction: Vector3) -> Vector3 {
    [Vector3::X, Vector3::Y, Vector3::Z]
        .into_iter()
        .min_by(|a, b| {
            a.dot(&direction)
                .abs()
                .total_cmp(&b.dot(&direction).abs())
        })
        .unwrap_or(Vector3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn vec_approx_eq(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_is_identity() {
        let t = Transformable::default();
        assert_eq!(*t.matrix(), Matrix4::identity());
        assert_eq!(t.position(), Vector3::ZERO);
        assert_eq!(t.scale(), Vector3::splat(1.0));
        assert_eq!(t.rotation(), Vector3::ZERO);
    }

    #[test]
    fn test_set_position_is_exact() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.position(), Vector3::new(1.0, 2.0, 3.0));

        t.translate(Vector3::new(1.0, 0.0, -1.0));
        assert_eq!(t.position(), Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_set_position_keeps_rotation() {
        let mut t = Transformable::new();
        t.rotate(0.5, Vector3::Y);
        let before = t.rotation();
        t.set_position(Vector3::new(-4.0, 0.0, 9.0));
        assert_eq!(t.rotation(), before);
    }

    #[test]
    fn test_scale_is_absolute() {
        let mut t = Transformable::new();
        t.set_scale(Vector3::new(2.0, 2.0, 2.0));
        t.set_scale(Vector3::new(3.0, 3.0, 3.0));
        assert!(vec_approx_eq(t.scale(), Vector3::new(3.0, 3.0, 3.0)));
    }

    #[test]
    fn test_scale_preserves_translation() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(5.0, -1.0, 2.0));
        t.set_scale(Vector3::new(1.0, 4.0, 0.5));
        assert_eq!(t.position(), Vector3::new(5.0, -1.0, 2.0));
        assert!(vec_approx_eq(t.scale(), Vector3::new(1.0, 4.0, 0.5)));

        t.set_uniform_scale(1.0);
        assert!(vec_approx_eq(t.scale(), Vector3::splat(1.0)));
    }

    #[test]
    fn test_scale_recovers_from_zero() {
        let mut t = Transformable::new();
        t.set_scale(Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(t.scale().x, 0.0);
        t.set_scale(Vector3::new(2.0, 1.0, 1.0));
        assert!(vec_approx_eq(t.scale(), Vector3::new(2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_rotation_euler_angles() {
        let mut t = Transformable::new();
        t.rotate(0.3, Vector3::Z);
        assert!(vec_approx_eq(t.rotation(), Vector3::new(0.0, 0.0, 0.3)));

        let mut t = Transformable::new();
        t.rotate(-0.6, Vector3::X);
        assert!(vec_approx_eq(t.rotation(), Vector3::new(-0.6, 0.0, 0.0)));

        let mut t = Transformable::new();
        t.rotate(0.2, Vector3::Y);
        assert!(vec_approx_eq(t.rotation(), Vector3::new(0.0, 0.2, 0.0)));
    }

    #[test]
    fn test_identity_basis() {
        let t = Transformable::new();
        assert_eq!(t.right(), Vector3::X);
        assert_eq!(t.up(), Vector3::Y);
        assert_eq!(t.forward(), -Vector3::Z);
    }

    #[test]
    fn test_basis_follows_rotation() {
        let mut t = Transformable::new();
        t.rotate(FRAC_PI_2, Vector3::Y);
        assert!(vec_approx_eq(t.forward(), -Vector3::X));
        assert!(vec_approx_eq(t.right(), -Vector3::Z));
        assert!(vec_approx_eq(t.up(), Vector3::Y));
    }

    #[test]
    fn test_look_at() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(0.0, 0.0, -3.0));
        t.set_scale(Vector3::splat(4.0));
        t.look_at(Vector3::ZERO, Vector3::UP);

        assert!(vec_approx_eq(t.forward(), Vector3::Z));
        assert!(vec_approx_eq(t.up(), Vector3::Y));
        assert!(vec_approx_eq(t.right(), -Vector3::X));
        assert_eq!(t.position(), Vector3::new(0.0, 0.0, -3.0));
        assert!(vec_approx_eq(t.scale(), Vector3::splat(1.0)));
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(3.0, 2.0, -1.0));
        t.look_at(Vector3::new(-1.0, 0.5, 4.0), Vector3::UP);

        let (f, r, u) = (t.forward(), t.right(), t.up());
        assert!(f.dot(&r).abs() < 1e-6);
        assert!(f.dot(&u).abs() < 1e-6);
        assert!(r.dot(&u).abs() < 1e-6);
        assert!(vec_approx_eq(r.cross(&u), -f));
        assert!((t.matrix().determinant() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_straight_down() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(0.0, 5.0, 0.0));
        t.look_at(Vector3::ZERO, Vector3::UP);

        assert!(vec_approx_eq(t.forward(), -Vector3::Y));
        assert!(t.matrix().as_array().iter().all(|v| v.is_finite()));
        assert!((t.right().length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_own_position_is_noop() {
        let mut t = Transformable::new();
        t.rotate(0.4, Vector3::X);
        t.set_position(Vector3::new(1.0, 1.0, 1.0));
        let before = t;
        t.look_at(Vector3::new(1.0, 1.0, 1.0), Vector3::UP);
        assert_eq!(t, before);
    }

    #[test]
    fn test_look_at_object() {
        let mut target = Transformable::new();
        target.set_position(Vector3::new(10.0, 0.0, 0.0));
        let mut t = Transformable::new();
        t.look_at_object(&target, Vector3::UP);
        assert!(vec_approx_eq(t.forward(), Vector3::X));
    }

    #[test]
    fn test_view_matrix_inverts_transform() {
        let mut t = Transformable::new();
        t.set_position(Vector3::new(2.0, 1.0, 6.0));
        t.look_at(Vector3::new(0.0, 0.0, 0.0), Vector3::UP);

        let view = t.view_matrix();
        let inverse = t.matrix().make_inversed();
        for (a, b) in view.as_array().iter().zip(inverse.as_array()) {
            assert!((a - b).abs() < 1e-5);
        }
        assert!(vec_approx_eq(view.transform_point(t.position()), Vector3::ZERO));
    }
}

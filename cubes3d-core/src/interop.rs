//! Conversions to and from `nalgebra` types
//!
//! Both sides store matrices column-major, so conversion is a straight copy.
use nalgebra as na;

use crate::matrix::Matrix4;
use crate::vector::Vector3;

impl From<Vector3> for na::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        na::Vector3::new(v.x, v.y, v.z)
    }
}

impl From<na::Vector3<f32>> for Vector3 {
    fn from(v: na::Vector3<f32>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for na::Point3<f32> {
    fn from(v: Vector3) -> Self {
        na::Point3::new(v.x, v.y, v.z)
    }
}

impl From<Matrix4> for na::Matrix4<f32> {
    fn from(m: Matrix4) -> Self {
        na::Matrix4::from_column_slice(m.as_array())
    }
}

impl From<na::Matrix4<f32>> for Matrix4 {
    fn from(m: na::Matrix4<f32>) -> Self {
        let mut elements = [0.0; 16];
        elements.copy_from_slice(m.as_slice());
        Matrix4::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transformable;

    fn assert_close(a: &Matrix4, b: &Matrix4, eps: f32) {
        for (x, y) in a.as_array().iter().zip(b.as_array()) {
            assert!((x - y).abs() < eps, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_layout_agrees() {
        let m = Matrix4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ]);
        let n: na::Matrix4<f32> = m.into();
        for row in 0..4 {
            for col in 0..4 {
                assert_eq!(n[(row, col)], m.element(row, col));
            }
        }
        assert_eq!(Matrix4::from(n), m);
    }

    #[test]
    fn test_inverse_matches_nalgebra() {
        let m = Matrix4::from_rows([
            [4.0, 7.0, 2.0, 3.0],
            [0.0, 5.0, 0.0, 1.0],
            [1.0, 0.0, 3.0, 0.0],
            [2.0, 1.0, 0.0, 6.0],
        ]);
        let expected = na::Matrix4::from(m).try_inverse().expect("invertible");
        assert_close(&m.make_inversed(), &Matrix4::from(expected), 1e-5);
        assert!((m.determinant() - na::Matrix4::from(m).determinant()).abs() < 1e-3);
    }

    #[test]
    fn test_projections_match_nalgebra() {
        let ours = Matrix4::perspective(45.0, 800.0 / 600.0, 0.1, 100.0);
        let theirs = na::Matrix4::new_perspective(800.0 / 600.0, 45.0_f32.to_radians(), 0.1, 100.0);
        assert_close(&ours, &Matrix4::from(theirs), 1e-5);

        let ours = Matrix4::orthographic(-2.0, 3.0, -1.0, 4.0, 0.5, 20.0);
        let theirs = na::Matrix4::new_orthographic(-2.0, 3.0, -1.0, 4.0, 0.5, 20.0);
        assert_close(&ours, &Matrix4::from(theirs), 1e-5);
    }

    #[test]
    fn test_rotation_matches_nalgebra() {
        let axis = Vector3::new(1.0, 2.0, -0.5);
        let ours = Matrix4::make_rotation(0.9, axis);
        let unit = na::Unit::new_normalize(na::Vector3::from(axis));
        let theirs = na::Matrix4::from_axis_angle(&unit, 0.9);
        assert_close(&ours, &Matrix4::from(theirs), 1e-5);
    }

    #[test]
    fn test_view_matrix_matches_nalgebra_look_at() {
        let eye = Vector3::new(3.0, 1.5, -4.0);
        let target = Vector3::new(0.0, 0.5, 1.0);

        let mut t = Transformable::new();
        t.set_position(eye);
        t.look_at(target, Vector3::UP);

        let theirs = na::Matrix4::look_at_rh(
            &na::Point3::from(eye),
            &na::Point3::from(target),
            &na::Vector3::y(),
        );
        assert_close(&t.view_matrix(), &Matrix4::from(theirs), 1e-5);
    }
}

//! 4x4 column-major transformation matrix
//!
//! Elements are stored in the layout a GL-style backend expects for a uniform
//! upload: `element(row, col)` lives at `row + col * 4`.
use std::ops::{Index, IndexMut, Mul, MulAssign};

use crate::vector::{to_radians, Vector3};

#[inline]
const fn idx(row: usize, col: usize) -> usize {
    row + col * 4
}

/// A general 4x4 transform. It may be singular; nothing here checks.
///
/// There is deliberately no `Default`: every matrix is built from one of the
/// explicit constructors below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    m: [f32; 16],
}

impl Matrix4 {
    /// Build from 16 values already in column-major order.
    pub const fn new(elements: [f32; 16]) -> Self {
        Self { m: elements }
    }

    /// Build from four rows, written the way the matrix reads on paper.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                m[idx(row, col)] = *value;
            }
        }
        Self { m }
    }

    /// Diagonal matrix with `value` on all four diagonal entries.
    pub const fn diagonal(value: f32) -> Self {
        let mut m = [0.0; 16];
        m[idx(0, 0)] = value;
        m[idx(1, 1)] = value;
        m[idx(2, 2)] = value;
        m[idx(3, 3)] = value;
        Self { m }
    }

    pub const fn identity() -> Self {
        Self::diagonal(1.0)
    }

    pub const fn zero() -> Self {
        Self { m: [0.0; 16] }
    }

    #[inline]
    pub fn element(&self, row: usize, col: usize) -> f32 {
        self.m[idx(row, col)]
    }

    #[inline]
    pub fn set_element(&mut self, row: usize, col: usize, value: f32) {
        self.m[idx(row, col)] = value;
    }

    /// Raw column-major storage, ready for a uniform upload.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    pub fn column(&self, col: usize) -> Vector3 {
        Vector3::new(self.element(0, col), self.element(1, col), self.element(2, col))
    }

    pub fn row(&self, row: usize) -> Vector3 {
        Vector3::new(self.element(row, 0), self.element(row, 1), self.element(row, 2))
    }

    /// Translation column
    pub fn position(&self) -> Vector3 {
        self.column(3)
    }

    // ---- in-place mutators -------------------------------------------------

    /// Add `offset` straight into the translation column.
    ///
    /// This is a world-space delta: it is not rotated or scaled by the current
    /// upper 3x3, unlike `self * make_translated(offset)` would be.
    pub fn translate(&mut self, offset: Vector3) {
        self.m[idx(0, 3)] += offset.x;
        self.m[idx(1, 3)] += offset.y;
        self.m[idx(2, 3)] += offset.z;
    }

    /// Multiply the three diagonal entries by `factors`.
    ///
    /// Only meaningful while the matrix is axis aligned; a rotated matrix is
    /// skewed rather than scaled.
    pub fn scale(&mut self, factors: Vector3) {
        self.m[idx(0, 0)] *= factors.x;
        self.m[idx(1, 1)] *= factors.y;
        self.m[idx(2, 2)] *= factors.z;
    }

    /// Right-multiply by an axis-angle rotation.
    pub fn rotate(&mut self, radians: f32, axis: Vector3) {
        *self *= Self::make_rotation(radians, axis);
    }

    pub fn rotate_x(&mut self, radians: f32) {
        *self *= Self::make_rotation_x(radians);
    }

    pub fn rotate_y(&mut self, radians: f32) {
        *self *= Self::make_rotation_y(radians);
    }

    pub fn rotate_z(&mut self, radians: f32) {
        *self *= Self::make_rotation_z(radians);
    }

    // ---- builders ----------------------------------------------------------

    pub fn make_translated(offset: Vector3) -> Self {
        let mut result = Self::identity();
        result.translate(offset);
        result
    }

    pub fn make_scale(factors: Vector3) -> Self {
        let mut result = Self::identity();
        result.scale(factors);
        result
    }

    /// Rotation of `radians` around `axis` (Rodrigues' formula).
    ///
    /// The axis is normalized first; a zero axis yields `cos(radians)` times
    /// identity on the upper 3x3.
    pub fn make_rotation(radians: f32, axis: Vector3) -> Self {
        let Vector3 { x, y, z } = axis.normalized();
        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;

        Self::from_rows([
            [c + t * x * x, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * x * y + s * z, c + t * y * y, t * y * z - s * x, 0.0],
            [t * x * z - s * y, t * y * z + s * x, c + t * z * z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn make_rotation_x(radians: f32) -> Self {
        Self::make_rotation(radians, Vector3::X)
    }

    pub fn make_rotation_y(radians: f32) -> Self {
        Self::make_rotation(radians, Vector3::Y)
    }

    pub fn make_rotation_z(radians: f32) -> Self {
        Self::make_rotation(radians, Vector3::Z)
    }

    pub fn make_transposed(&self) -> Self {
        let mut result = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.m[idx(col, row)] = self.m[idx(row, col)];
            }
        }
        result
    }

    /// General inverse through the adjugate, built from 2x2 sub-determinants.
    ///
    /// A singular matrix is not detected: the division by a zero determinant
    /// leaves `inf`/`NaN` entries in the result.
    pub fn make_inversed(&self) -> Self {
        let a = |r, c| self.element(r, c);

        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        let inv = 1.0 / det;

        Self::from_rows([
            [
                (a(1, 1) * c5 - a(1, 2) * c4 + a(1, 3) * c3) * inv,
                (-a(0, 1) * c5 + a(0, 2) * c4 - a(0, 3) * c3) * inv,
                (a(3, 1) * s5 - a(3, 2) * s4 + a(3, 3) * s3) * inv,
                (-a(2, 1) * s5 + a(2, 2) * s4 - a(2, 3) * s3) * inv,
            ],
            [
                (-a(1, 0) * c5 + a(1, 2) * c2 - a(1, 3) * c1) * inv,
                (a(0, 0) * c5 - a(0, 2) * c2 + a(0, 3) * c1) * inv,
                (-a(3, 0) * s5 + a(3, 2) * s2 - a(3, 3) * s1) * inv,
                (a(2, 0) * s5 - a(2, 2) * s2 + a(2, 3) * s1) * inv,
            ],
            [
                (a(1, 0) * c4 - a(1, 1) * c2 + a(1, 3) * c0) * inv,
                (-a(0, 0) * c4 + a(0, 1) * c2 - a(0, 3) * c0) * inv,
                (a(3, 0) * s4 - a(3, 1) * s2 + a(3, 3) * s0) * inv,
                (-a(2, 0) * s4 + a(2, 1) * s2 - a(2, 3) * s0) * inv,
            ],
            [
                (-a(1, 0) * c3 + a(1, 1) * c1 - a(1, 2) * c0) * inv,
                (a(0, 0) * c3 - a(0, 1) * c1 + a(0, 2) * c0) * inv,
                (-a(3, 0) * s3 + a(3, 1) * s1 - a(3, 2) * s0) * inv,
                (a(2, 0) * s3 - a(2, 1) * s1 + a(2, 2) * s0) * inv,
            ],
        ])
    }

    pub fn determinant(&self) -> f32 {
        let a = |r, c| self.element(r, c);

        let s0 = a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1);
        let s1 = a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2);
        let s2 = a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3);
        let s3 = a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2);
        let s4 = a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3);
        let s5 = a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3);

        let c5 = a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3);
        let c4 = a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3);
        let c3 = a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2);
        let c2 = a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3);
        let c1 = a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2);
        let c0 = a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1);

        s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0
    }

    /// OpenGL-style orthographic projection mapping the box to the [-1, 1] cube.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self::from_rows([
            [2.0 / (right - left), 0.0, 0.0, (left + right) / (left - right)],
            [0.0, 2.0 / (top - bottom), 0.0, (bottom + top) / (bottom - top)],
            [0.0, 0.0, 2.0 / (near - far), (far + near) / (near - far)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Symmetric-frustum perspective projection. `fov_degrees` is vertical.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let q = 1.0 / (to_radians(0.5 * fov_degrees)).tan();
        let a = q / aspect;
        let b = (near + far) / (near - far);
        let c = (2.0 * near * far) / (near - far);

        Self::from_rows([
            [a, 0.0, 0.0, 0.0],
            [0.0, q, 0.0, 0.0],
            [0.0, 0.0, b, c],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    // ---- application -------------------------------------------------------

    /// `self * (x, y, z, w)`
    pub fn transform_homogeneous(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|k| self.element(row, k) * v[k]).sum();
        }
        out
    }

    /// Transform a point (w = 1), ignoring the projective row.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform_homogeneous([p.x, p.y, p.z, 1.0]);
        Vector3::new(x, y, z)
    }

    /// Transform a direction (w = 0); translation does not apply.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let [x, y, z, _] = self.transform_homogeneous([v.x, v.y, v.z, 0.0]);
        Vector3::new(x, y, z)
    }
}

impl Mul for Matrix4 {
    type Output = Self;

    /// `(a * b)` applied to a point applies `b` first, then `a`.
    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::zero();
        for row in 0..4 {
            for col in 0..4 {
                result.m[idx(row, col)] = (0..4)
                    .map(|k| self.element(row, k) * rhs.element(k, col))
                    .sum();
            }
        }
        result
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.m[idx(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.m[idx(row, col)]
    }
}

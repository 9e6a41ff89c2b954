//! Projection setup and clip-space to screen mapping
use crate::matrix::Matrix4;
use crate::vector::Vector3;

/// Projection used to build the clip-space matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in degrees
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Orthographic box centred on the view axis, `height` units tall.
    pub fn orthographic(height: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_h = height / 2.0;
        let half_w = half_h * aspect;
        Self::Orthographic {
            left: -half_w,
            right: half_w,
            bottom: -half_h,
            top: half_h,
            near,
            far,
        }
    }

    pub fn matrix(&self) -> Matrix4 {
        match *self {
            Self::Perspective {
                fov_degrees,
                aspect,
                near,
                far,
            } => Matrix4::perspective(fov_degrees, aspect, near, far),
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Matrix4::orthographic(left, right, bottom, top, near, far),
        }
    }

    /// Adjust for a resized viewport.
    pub fn set_aspect(&mut self, new_aspect: f32) {
        match self {
            Self::Perspective { aspect, .. } => *aspect = new_aspect,
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                ..
            } => {
                let half_w = (*top - *bottom) / 2.0 * new_aspect;
                let centre = (*left + *right) / 2.0;
                *left = centre - half_w;
                *right = centre + half_w;
            }
        }
    }
}

/// Project a model-space point through `mvp` to screen coordinates.
///
/// Returns `(x, y, depth)` with `x`/`y` in pixels (origin top-left) and depth
/// in NDC, or `None` when the point is behind the eye or outside the view
/// volume.
pub fn project_to_screen(point: Vector3, mvp: &Matrix4, width: u32, height: u32) -> Option<(f32, f32, f32)> {
    let [x, y, z, w] = mvp.transform_homogeneous([point.x, point.y, point.z, 1.0]);

    // Prevent division by near-zero w
    if w <= 1e-6 {
        return None;
    }

    let ndc_x = x / w;
    let ndc_y = y / w;
    let depth = z / w;

    // Clip test
    if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) || !(-1.0..=1.0).contains(&depth) {
        return None;
    }

    // Convert to screen space
    let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
    let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

    Some((screen_x, screen_y, depth))
}

//! Cubes3D Core Library - Linear algebra and object/camera transforms
//!
//! A small column-major matrix/vector library plus the transform model built
//! on it: objects own a single object-to-world matrix, cameras keep theirs
//! pointed at a target, and meshes pair shared vertex data with a per-instance
//! transform.

pub mod camera;
pub mod error;
pub mod interop;
pub mod matrix;
pub mod mesh;
pub mod projection;
pub mod registry;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use camera::Camera;
pub use error::MeshError;
pub use matrix::Matrix4;
pub use mesh::{Mesh, MeshHash, Triangle, Vertex};
pub use projection::{project_to_screen, Projection};
pub use registry::{BufferHandle, MeshRegistry};
pub use transform::Transformable;
pub use vector::{to_radians, Vector3};

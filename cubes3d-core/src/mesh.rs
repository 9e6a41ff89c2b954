//! Vertex data and per-instance mesh state
use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::error::MeshError;
use crate::transform::Transformable;
use crate::vector::Vector3;

/// Interleaved layout: position (3) followed by normal (3).
pub const FLOATS_PER_VERTEX: usize = 6;

/// A vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vector3,
    pub normal: Vector3,
}

impl Vertex {
    fn from_slice(chunk: &[f32]) -> Self {
        Self {
            position: Vector3::new(chunk[0], chunk[1], chunk[2]),
            normal: Vector3::new(chunk[3], chunk[4], chunk[5]),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    /// Face normal from the winding of the positions
    pub fn face_normal(&self) -> Vector3 {
        let [v0, v1, v2] = self.vertices.map(|v| v.position);
        (v1 - v0).cross(&(v2 - v0)).normalized()
    }
}

/// Content hash of a vertex buffer, used to share uploaded buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHash(pub u64);

impl MeshHash {
    pub fn of(vertices: &[f32]) -> Self {
        let mut hasher = Sha256::new();
        for v in vertices {
            hasher.update(v.to_le_bytes());
        }
        let result = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&result[..8]);
        Self(u64::from_le_bytes(bytes))
    }
}

impl fmt::Display for MeshHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// A drawable instance: shared vertex data plus its own transform and colour.
///
/// Cloning shares the vertex buffer; transforms are independent.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Arc<[f32]>,
    hash: MeshHash,
    pub color: Vector3,
    pub transform: Transformable,
}

impl Mesh {
    pub fn new(vertices: Vec<f32>) -> Result<Self, MeshError> {
        let hash = MeshHash::of(&vertices);
        Self::with_hash(vertices, hash)
    }

    /// Skip hashing when the hash of `vertices` is already known.
    pub fn with_hash(vertices: Vec<f32>, hash: MeshHash) -> Result<Self, MeshError> {
        if vertices.len() % FLOATS_PER_VERTEX != 0 {
            return Err(MeshError::MalformedBuffer { len: vertices.len() });
        }
        Ok(Self {
            vertices: vertices.into(),
            hash,
            color: Vector3::splat(1.0),
            transform: Transformable::new(),
        })
    }

    /// Unit cube centred on the origin, 36 vertices with outward normals.
    pub fn cube() -> Self {
        let faces = [
            (Vector3::Z, Vector3::X, Vector3::Y),
            (-Vector3::Z, Vector3::Y, Vector3::X),
            (Vector3::X, Vector3::Y, Vector3::Z),
            (-Vector3::X, Vector3::Z, Vector3::Y),
            (Vector3::Y, Vector3::Z, Vector3::X),
            (-Vector3::Y, Vector3::X, Vector3::Z),
        ];
        let mut data = Vec::with_capacity(36 * FLOATS_PER_VERTEX);
        for (normal, u, v) in faces {
            push_quad(&mut data, normal * 0.5, u * 0.5, v * 0.5, normal);
        }
        Self::from_primitive(data)
    }

    /// Unit square on the XZ plane facing +Y.
    pub fn plane() -> Self {
        let mut data = Vec::with_capacity(6 * FLOATS_PER_VERTEX);
        push_quad(&mut data, Vector3::ZERO, Vector3::Z * 0.5, Vector3::X * 0.5, Vector3::Y);
        Self::from_primitive(data)
    }

    fn from_primitive(data: Vec<f32>) -> Self {
        let hash = MeshHash::of(&data);
        Self {
            vertices: data.into(),
            hash,
            color: Vector3::splat(1.0),
            transform: Transformable::new(),
        }
    }

    pub fn with_color(mut self, color: Vector3) -> Self {
        self.color = color;
        self
    }

    pub fn hash(&self) -> MeshHash {
        self.hash
    }

    /// Raw interleaved buffer, as uploaded to a backend
    pub fn vertex_buffer(&self) -> &[f32] {
        &self.vertices
    }

    pub(crate) fn shared_buffer(&self) -> Arc<[f32]> {
        Arc::clone(&self.vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / FLOATS_PER_VERTEX
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        vertices(&self.vertices)
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        triangles(&self.vertices)
    }

    pub fn rotate(&mut self, radians: f32, axis: Vector3) {
        self.transform.rotate(radians, axis);
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.transform.translate(delta);
    }

    pub fn set_scale(&mut self, scale: Vector3) {
        self.transform.set_scale(scale);
    }
}

/// Iterate an interleaved buffer as vertices.
pub fn vertices(buffer: &[f32]) -> impl Iterator<Item = Vertex> + '_ {
    buffer.chunks_exact(FLOATS_PER_VERTEX).map(Vertex::from_slice)
}

/// Iterate an interleaved buffer as triangles; trailing vertices are ignored.
pub fn triangles(buffer: &[f32]) -> impl Iterator<Item = Triangle> + '_ {
    buffer.chunks_exact(FLOATS_PER_VERTEX * 3).map(|tri| Triangle {
        vertices: [
            Vertex::from_slice(&tri[0..6]),
            Vertex::from_slice(&tri[6..12]),
            Vertex::from_slice(&tri[12..18]),
        ],
    })
}

/// Two counter-clockwise triangles spanning `centre ± u ± v`.
fn push_quad(data: &mut Vec<f32>, centre: Vector3, u: Vector3, v: Vector3, normal: Vector3) {
    let corners = [
        centre - u - v,
        centre + u - v,
        centre + u + v,
        centre - u - v,
        centre + u + v,
        centre - u + v,
    ];
    for corner in corners {
        data.extend_from_slice(&corner.to_array());
        data.extend_from_slice(&normal.to_array());
    }
}

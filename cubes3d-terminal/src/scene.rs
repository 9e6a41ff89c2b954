//! The four-cube demo scene
use cubes3d_core::{Camera, Matrix4, Mesh, MeshRegistry, Projection, Vector3};
use tracing::debug;

use crate::config::Config;

/// Spin rate of every cube, radians per second
const SPIN_SPEED: f32 = 1.0;
const MIN_DISTANCE: f32 = 0.5;

/// Yellow, red, green and blue cubes at (±1, ±1, 0), each spinning about its
/// own axis, watched by a camera orbiting the origin.
pub struct CubeScene {
    cubes: Vec<(Mesh, Vector3)>,
    camera: Camera,
    projection: Projection,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    distance: f32,
    elapsed: f32,
}

impl CubeScene {
    pub fn new(config: &Config, aspect: f32) -> Self {
        let layout = [
            (Vector3::new(1.0, 1.0, 0.0), Vector3::new(-1.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0)),
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Vector3::new(0.0, 1.0, 0.0), Vector3::new(-1.0, -1.0, 0.0), Vector3::new(1.1, 0.0, 1.0)),
            (Vector3::new(0.0, 0.0, 1.0), Vector3::new(1.0, -1.0, 0.0), Vector3::new(0.0, 0.0, 1.0)),
        ];

        let cubes = layout
            .into_iter()
            .map(|(color, offset, axis)| {
                let mut cube = Mesh::cube().with_color(color);
                cube.translate(offset);
                (cube, axis.normalized())
            })
            .collect();

        let mut scene = Self {
            cubes,
            camera: Camera::new(Vector3::new(0.0, 0.0, -config.distance), Vector3::ZERO),
            projection: Projection::perspective(config.fov, aspect, config.near, config.far),
            fov: config.fov,
            near: config.near,
            far: config.far,
            aspect,
            distance: config.distance,
            elapsed: 0.0,
        };
        if config.orthographic {
            scene.toggle_projection();
        }
        scene
    }

    /// Upload every cube's vertex data.
    pub fn register(&self, registry: &mut MeshRegistry) {
        for (cube, _) in &self.cubes {
            registry.register(cube);
        }
    }

    /// Advance the animation by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;

        for (cube, axis) in &mut self.cubes {
            cube.rotate(SPIN_SPEED * dt, *axis);
        }

        let t = self.elapsed;
        let radius = self.distance * (1.1 + t.sin());
        self.camera.orbit(t, radius);
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.cubes.iter().map(|(cube, _)| cube)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn view_projection(&self) -> Matrix4 {
        self.projection.matrix() * self.camera.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.projection.set_aspect(aspect);
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            Projection::Perspective { .. } => {
                Projection::orthographic(2.0 * self.distance, self.aspect, self.near, self.far)
            }
            Projection::Orthographic { .. } => {
                Projection::perspective(self.fov, self.aspect, self.near, self.far)
            }
        };
        debug!(projection = ?self.projection, "projection switched");
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn adjust_distance(&mut self, delta: f32) {
        self.distance = (self.distance + delta).max(MIN_DISTANCE);
    }
}

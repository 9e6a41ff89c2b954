use cubes3d_core::{Camera, Matrix4, Mesh, MeshRegistry, Projection, Transformable, Vector3};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn position_round_trips_exactly() {
    let mut object = Transformable::new();
    object.set_position(Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(object.position(), Vector3::new(1.0, 2.0, 3.0));
}

#[test]
fn repeated_scale_does_not_compound() {
    let mut object = Transformable::new();
    object.set_scale(Vector3::new(2.0, 2.0, 2.0));
    object.set_scale(Vector3::new(3.0, 3.0, 3.0));
    let scale = object.scale();
    assert!(approx(scale.x, 3.0) && approx(scale.y, 3.0) && approx(scale.z, 3.0));
}

#[test]
fn camera_faces_its_target() {
    let camera = Camera::new(Vector3::new(0.0, 0.0, -3.0), Vector3::new(0.0, 0.0, 0.0));
    let forward = camera.forward();
    assert!(approx(forward.length(), 1.0));
    assert!(approx(forward.x, 0.0) && approx(forward.y, 0.0) && approx(forward.z, 1.0));
}

#[test]
fn perspective_has_standard_depth_terms() {
    let (near, far) = (0.1_f32, 100.0_f32);
    let p = Matrix4::perspective(45.0, 800.0 / 600.0, near, far);
    assert_eq!(p.element(3, 2), -1.0);
    assert_eq!(p.element(2, 2), (near + far) / (near - far));
}

#[test]
fn inverse_twice_returns_original() {
    let mut m = Matrix4::make_rotation(0.7, Vector3::new(0.3, 1.0, 0.2));
    m.translate(Vector3::new(2.0, -3.0, 0.5));
    m *= Matrix4::make_scale(Vector3::new(1.5, 0.5, 2.0));

    let back = m.make_inversed().make_inversed();
    for (a, b) in back.as_array().iter().zip(m.as_array()) {
        assert!(approx(*a, *b));
    }
}

#[test]
fn spinning_cubes_stay_in_place() {
    let mut registry = MeshRegistry::new();
    let offsets = [
        Vector3::new(-1.0, 1.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(-1.0, -1.0, 0.0),
        Vector3::new(1.0, -1.0, 0.0),
    ];
    let mut cubes: Vec<Mesh> = offsets
        .iter()
        .map(|offset| {
            let mut cube = Mesh::cube();
            cube.translate(*offset);
            cube
        })
        .collect();
    for cube in &cubes {
        registry.register(cube);
    }
    assert_eq!(registry.len(), 1);

    for _ in 0..120 {
        for cube in &mut cubes {
            cube.rotate(1.0 / 60.0, Vector3::new(1.1, 0.0, 1.0));
        }
    }
    for (cube, offset) in cubes.iter().zip(offsets) {
        assert_eq!(cube.transform.position(), offset);
        let scale = cube.transform.scale();
        assert!(approx(scale.x, 1.0) && approx(scale.y, 1.0) && approx(scale.z, 1.0));
    }

    let camera = Camera::new(Vector3::new(0.0, 0.0, 6.0), Vector3::ZERO);
    let view_projection = Projection::perspective(45.0, 1.0, 0.1, 100.0).matrix() * camera.view_matrix();
    for cube in &cubes {
        let mvp = view_projection * *cube.transform.matrix();
        let visible = registry
            .bind(cube)
            .map(|buffer| cubes3d_core::mesh::vertices(buffer).count())
            .unwrap_or(0);
        assert_eq!(visible, 36);
        assert!(cubes3d_core::project_to_screen(Vector3::ZERO, &mvp, 100, 100).is_some());
    }
}

mod common;

use common::{device, strict_device, write_fixture};
use gpu_harness::{gl, AssetError, Attribute, Corner, DriverCall, Mesh, Warning};
use math::{Vec2, Vec3};

#[test]
fn quad_uploads_shared_vertices_and_six_indices() {
    let mut device = device();
    let quad = device.load_mesh_plane().strict().unwrap();

    assert_eq!(quad.vertex_count, Some(6));
    assert_eq!(quad.indices, Some(vec![0, 1, 2, 0, 2, 3]));
    assert_eq!(
        quad.tcoords,
        Some(vec![
            Vec2::from_components(0.0, 0.0),
            Vec2::from_components(1.0, 0.0),
            Vec2::from_components(1.0, 1.0),
            Vec2::from_components(0.0, 1.0),
        ])
    );

    let driver = device.driver();
    let indices: Vec<u16> =
        bytemuck::pod_collect_to_vec(driver.buffer_contents(quad.ibo.0.raw()).unwrap().as_slice());
    assert_eq!(indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(driver.element_buffer_of(quad.vao.0.raw()), Some(quad.ibo.0.raw()));
    assert!(device.ctx.is_unbound());
}

#[test]
fn attribute_layout_is_non_interleaved() {
    let mut device = device();
    let quad = device.load_mesh_plane().into_value();
    let vao = quad.vao.0.raw();

    let expected = [
        (Attribute::Position, &quad.pbo, 3, 12),
        (Attribute::TexCoord, &quad.tbo, 2, 8),
        (Attribute::Normal, &quad.nbo, 3, 12),
    ];

    for (attribute, buffer, size, stride) in expected.iter() {
        let layout = device
            .driver()
            .attribute_layout(vao, attribute.location())
            .unwrap();

        assert!(layout.enabled, "{} is not enabled", attribute);
        assert_eq!(layout.buffer, buffer.0.raw());
        assert_eq!(layout.size, *size);
        assert_eq!(layout.type_, gl::FLOAT);
        assert_eq!(layout.stride, *stride);
    }
}

#[test]
fn optimal_and_unoptimal_quads_render_the_same_corners() {
    let mut device = device();
    let optimal = device.load_mesh(Mesh::quad_optimal()).into_value();
    let (unoptimal, warnings) = device.load_mesh(Mesh::quad_unoptimal()).into_parts();

    assert_eq!(warnings, vec![Warning::MissingIndexBuffer]);
    assert!(!unoptimal.is_indexed());
    assert_eq!(unoptimal.positions.len(), 6);

    device.draw_mesh(&optimal);
    let indexed = device.driver().last_draw().unwrap();
    device.draw_mesh(&unoptimal);
    let flat = device.driver().last_draw().unwrap();

    assert!(indexed.indexed);
    assert!(!flat.indexed);
    assert_eq!(indexed.corners.len(), 6);
    assert_eq!(flat.corners.len(), 6);

    for corner in indexed.corners.iter() {
        assert!(flat.corners.contains(corner), "{:?} missing", corner);
    }
    for corner in flat.corners.iter() {
        assert!(indexed.corners.contains(corner), "{:?} missing", corner);
        assert_eq!(corner.normal, Some(Vec3::unit_z()));
    }
}

#[test]
fn positions_only_mesh_warns_and_draws_non_indexed() {
    let mut device = device();
    let positions = vec![
        Vec3::from_components(0.0, 0.0, 0.0),
        Vec3::from_components(1.0, 0.0, 0.0),
        Vec3::from_components(0.0, 1.0, 0.0),
    ];

    let mut mesh = Mesh::from_positions(positions.clone());
    let report = device.upload_mesh(&mut mesh);

    assert_eq!(
        report.warnings(),
        &[
            Warning::MissingAttribute(Attribute::TexCoord),
            Warning::MissingAttribute(Attribute::Normal),
            Warning::MissingIndexBuffer,
        ]
    );
    assert!(mesh.tbo.is_null() && mesh.nbo.is_null() && mesh.ibo.is_null());
    assert_eq!(mesh.vertex_count, Some(3));

    device.draw_mesh(&mesh);
    let draw = device.driver().last_draw().unwrap();

    assert!(!draw.indexed);
    let expected: Vec<Corner> = positions
        .iter()
        .map(|p| Corner {
            position: Some(*p),
            tcoord: None,
            normal: None,
        })
        .collect();
    assert_eq!(draw.corners, expected);
}

#[test]
#[should_panic(expected = "escalated warning: mesh loaded without texture coordinates")]
fn strict_context_escalates_missing_attributes() {
    let mut device = strict_device();
    device.load_mesh(Mesh::from_positions(vec![Vec3::new(); 3]));
}

#[test]
#[should_panic(expected = "cannot upload a mesh without positions")]
fn empty_mesh_cannot_be_uploaded() {
    let mut device = device();
    device.upload_mesh(&mut Mesh::default());
}

#[test]
#[should_panic(expected = "texture coordinate count differs from position count")]
fn mismatched_attribute_lengths_are_rejected() {
    let mut device = device();
    let mut mesh = Mesh::from_positions(vec![Vec3::new(); 3]);
    mesh.tcoords = Some(vec![Vec2::new(); 2]);

    device.upload_mesh(&mut mesh);
}

#[test]
fn unload_releases_everything_and_resets_the_mesh() {
    let mut device = device();
    let mut sphere = device.load_mesh_sphere().into_value();
    assert_eq!(device.driver().live_objects(), 5);

    device.unload_mesh(&mut sphere);

    assert_eq!(device.driver().live_objects(), 0);
    assert!(sphere.positions.is_empty());
    assert!(sphere.tcoords.is_none() && sphere.normals.is_none() && sphere.indices.is_none());
    assert_eq!(sphere.vertex_count, None);
    assert!(sphere.vao.is_null() && sphere.pbo.is_null() && sphere.ibo.is_null());
}

#[test]
fn unload_skips_buffers_that_were_never_allocated() {
    let mut device = device();
    let mut mesh = device
        .load_mesh(Mesh::from_positions(vec![Vec3::new(); 3]))
        .into_value();
    assert_eq!(device.driver().live_objects(), 2);

    device.unload_mesh(&mut mesh);
    assert_eq!(device.driver().live_objects(), 0);
}

#[test]
#[should_panic(expected = "mesh is not loaded")]
fn unloading_twice_fails_loudly() {
    let mut device = device();
    let mut cube = device.load_mesh_cube().into_value();

    device.unload_mesh(&mut cube);
    device.unload_mesh(&mut cube);
}

#[test]
fn generated_shapes_draw_indexed_with_normals() {
    let mut device = device();

    let sphere = device.load_mesh_sphere().into_value();
    assert_eq!(sphere.vertex_count, Some(8 * 8 * 6));
    assert!(sphere.tcoords.is_some());

    device.draw_mesh(&sphere);
    let draw = device.driver().last_draw().unwrap();
    assert!(draw.indexed);
    assert_eq!(draw.corners.len(), 384);
    assert!(draw.corners.iter().all(|c| c.normal.is_some() && c.tcoord.is_some()));

    let (icosahedron, warnings) = device.load_mesh_icosahedron().into_parts();
    assert_eq!(warnings, vec![Warning::MissingAttribute(Attribute::TexCoord)]);
    assert_eq!(icosahedron.vertex_count, Some(60));
}

#[test]
fn every_solid_loads() {
    let mut device = device();

    let counts = [
        device.load_mesh_tetrahedron().into_value().vertex_count,
        device.load_mesh_cube().into_value().vertex_count,
        device.load_mesh_octahedron().into_value().vertex_count,
        device.load_mesh_dodecahedron().into_value().vertex_count,
        device.load_mesh_icosahedron().into_value().vertex_count,
        device.load_mesh_hemisphere().into_value().vertex_count,
    ];

    assert_eq!(
        counts,
        [Some(12), Some(36), Some(24), Some(108), Some(60), Some(96)]
    );
    assert!(device.ctx.is_unbound());
}

#[test]
fn cube_is_centred() {
    let mut device = device();
    let cube = device.load_mesh_cube().into_value();

    assert!(cube
        .positions
        .iter()
        .all(|p| p.x.abs() == 0.5 && p.y.abs() == 0.5 && p.z.abs() == 0.5));
}

#[test]
fn obj_is_flattened_into_a_corner_stream() {
    let path = write_fixture(
        "square.obj",
        "# two triangles as one polygon\n\
         v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\n\
         vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
         vn 0 0 1\n\
         f 1/1/1 2/2/1 3/3/1 4/4/1\n",
    );

    let mut device = device();
    let (mesh, warnings) = device.load_mesh_obj(&path).unwrap().into_parts();

    assert_eq!(warnings.len(), 3);
    assert_eq!(mesh.vertex_count, Some(6));
    assert!(mesh.ibo.is_null());
    assert_eq!(mesh.positions[0], mesh.positions[3]);
    assert_eq!(mesh.positions[2], mesh.positions[4]);

    device.draw_mesh(&mesh);
    let draw = device.driver().last_draw().unwrap();
    let drawn: Vec<Vec3> = draw.corners.iter().filter_map(|c| c.position).collect();
    assert_eq!(drawn, mesh.positions);
}

#[test]
fn missing_obj_file_is_an_error() {
    let mut device = device();

    assert!(device
        .load_mesh_obj(common::fixture_path("does_not_exist.obj"))
        .is_err());
}

#[test]
fn faceless_obj_is_an_asset_error() {
    let mut device = device();
    let path = write_fixture("points.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\n");

    let result = device.load_mesh_obj(&path);

    assert!(matches!(result, Err(AssetError::Obj { .. })));
    assert!(!device
        .driver()
        .calls()
        .iter()
        .any(|call| matches!(call, DriverCall::BufferData { .. })));
}

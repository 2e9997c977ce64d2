//! Procedural geometry: parametric surfaces and the platonic solids.
//!
//! Generators return shared-vertex triangle lists. Parametric surfaces carry
//! their UV coordinates; platonic solids only have positions.

use math::{Vec2, Vec3, HALF_PI, PI, TAU};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Plane { slices: u32, stacks: u32 },
    Sphere { slices: u32, stacks: u32 },
    Hemisphere { slices: u32, stacks: u32 },
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedMesh {
    pub points: Vec<Vec3>,
    pub tcoords: Option<Vec<Vec2>>,
    pub triangles: Vec<u16>,
}

impl GeneratedMesh {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn translate(&mut self, offset: &Vec3) {
        for point in self.points.iter_mut() {
            point.add(offset);
        }
    }

    fn corners(&self, triangle: &[u16]) -> (Vec3, Vec3, Vec3) {
        (
            self.points[triangle[0] as usize],
            self.points[triangle[1] as usize],
            self.points[triangle[2] as usize],
        )
    }

    /// Per-vertex normals: the area-weighted sum of adjacent face normals.
    pub fn compute_normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::new(); self.points.len()];

        for triangle in self.triangles.chunks_exact(3) {
            let (a, b, c) = self.corners(triangle);
            let face = Vec3::from_cross(&Vec3::from_sub_vectors(&b, &a), &Vec3::from_sub_vectors(&c, &a));

            for index in triangle {
                normals[*index as usize].add(&face);
            }
        }

        for normal in normals.iter_mut() {
            normal.normalize();
        }

        normals
    }

    fn orient_outward(mut self) -> Self {
        let mut center = Vec3::new();
        for point in self.points.iter() {
            center.add(point);
        }
        center.divide_scalar(self.points.len() as f32);

        for t in 0..self.triangle_count() {
            let triangle = &self.triangles[t * 3..t * 3 + 3];
            let (a, b, c) = self.corners(triangle);

            let face = Vec3::from_cross(&Vec3::from_sub_vectors(&b, &a), &Vec3::from_sub_vectors(&c, &a));
            let mut centroid = Vec3::from_add_vectors(&Vec3::from_add_vectors(&a, &b), &c);
            centroid.divide_scalar(3.0);

            if face.dot(&Vec3::from_sub_vectors(&centroid, &center)) < 0.0 {
                self.triangles.swap(t * 3 + 1, t * 3 + 2);
            }
        }

        self
    }
}

pub fn generate(shape: Shape) -> GeneratedMesh {
    match shape {
        Shape::Plane { slices, stacks } => {
            parametric(slices, stacks, |uv| Vec3::from_components(uv.x, uv.y, 0.0))
        }
        Shape::Sphere { slices, stacks } => parametric(slices, stacks, |uv| {
            spherical(uv.x * PI, uv.y * TAU)
        }),
        Shape::Hemisphere { slices, stacks } => parametric(slices, stacks, |uv| {
            spherical(uv.x * HALF_PI, uv.y * TAU)
        }),
        Shape::Tetrahedron => tetrahedron(),
        Shape::Cube => cube(),
        Shape::Octahedron => octahedron(),
        Shape::Dodecahedron => dodecahedron(),
        Shape::Icosahedron => icosahedron(),
    }
}

fn spherical(phi: f32, theta: f32) -> Vec3 {
    Vec3::from_components(theta.cos() * phi.sin(), theta.sin() * phi.sin(), phi.cos())
}

/// Samples `f` on a `(stacks + 1) x (slices + 1)` UV grid, u along stacks.
fn parametric<F: Fn(Vec2) -> Vec3>(slices: u32, stacks: u32, f: F) -> GeneratedMesh {
    assert!(slices > 0 && stacks > 0, "tessellation must be at least 1x1");
    assert!(
        (slices + 1) * (stacks + 1) <= u16::MAX as u32 + 1,
        "{}x{} tessellation does not fit 16-bit indices",
        slices,
        stacks
    );

    let mut points = Vec::new();
    let mut tcoords = Vec::new();

    for stack in 0..=stacks {
        for slice in 0..=slices {
            let uv = Vec2::from_components(stack as f32 / stacks as f32, slice as f32 / slices as f32);
            points.push(f(uv));
            tcoords.push(uv);
        }
    }

    let row = slices + 1;
    let mut triangles = Vec::with_capacity((slices * stacks * 6) as usize);

    for stack in 0..stacks {
        let v = stack * row;
        for slice in 0..slices {
            let next = slice + 1;
            let quad = [
                v + slice + row,
                v + next,
                v + slice,
                v + slice + row,
                v + next + row,
                v + next,
            ];
            triangles.extend(quad.iter().map(|index| *index as u16));
        }
    }

    GeneratedMesh {
        points,
        tcoords: Some(tcoords),
        triangles,
    }
}

fn solid(points: Vec<Vec3>, faces: &[&[u16]]) -> GeneratedMesh {
    let mut triangles = Vec::new();

    for face in faces {
        for i in 1..face.len() - 1 {
            triangles.extend_from_slice(&[face[0], face[i], face[i + 1]]);
        }
    }

    GeneratedMesh {
        points,
        tcoords: None,
        triangles,
    }
    .orient_outward()
}

fn vec3s(coords: &[[f32; 3]]) -> Vec<Vec3> {
    coords
        .iter()
        .map(|c| Vec3::from_components(c[0], c[1], c[2]))
        .collect()
}

fn tetrahedron() -> GeneratedMesh {
    let points = vec3s(&[
        [0.000, 1.333, 0.0],
        [0.943, 0.0, 0.0],
        [-0.471, 0.0, 0.816],
        [-0.471, 0.0, -0.816],
    ]);

    solid(points, &[&[2, 1, 0], &[3, 2, 0], &[1, 3, 0], &[1, 2, 3]])
}

/// Unit cube spanning `[0, 1]` on every axis.
fn cube() -> GeneratedMesh {
    let points = vec3s(&[
        [0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0],
        [1.0, 0.0, 1.0],
    ]);

    solid(
        points,
        &[
            &[7, 6, 5, 4],
            &[0, 1, 2, 3],
            &[6, 7, 3, 2],
            &[5, 6, 2, 1],
            &[4, 5, 1, 0],
            &[7, 4, 0, 3],
        ],
    )
}

fn octahedron() -> GeneratedMesh {
    let points = vec3s(&[
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ]);

    solid(
        points,
        &[
            &[0, 4, 2],
            &[0, 2, 5],
            &[0, 5, 3],
            &[0, 3, 4],
            &[1, 2, 4],
            &[1, 5, 2],
            &[1, 3, 5],
            &[1, 4, 3],
        ],
    )
}

fn icosahedron() -> GeneratedMesh {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let points = vec3s(&[
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ])
    .into_iter()
    .map(Vec3::normalized)
    .collect();

    solid(
        points,
        &[
            &[0, 11, 5],
            &[0, 5, 1],
            &[0, 1, 7],
            &[0, 7, 10],
            &[0, 10, 11],
            &[1, 5, 9],
            &[5, 11, 4],
            &[11, 10, 2],
            &[10, 7, 6],
            &[7, 1, 8],
            &[3, 9, 4],
            &[3, 4, 2],
            &[3, 2, 6],
            &[3, 6, 8],
            &[3, 8, 9],
            &[4, 9, 5],
            &[2, 4, 11],
            &[6, 2, 10],
            &[8, 6, 7],
            &[9, 8, 1],
        ],
    )
}

/// Dual of the icosahedron: one vertex per icosahedron face, one pentagon per
/// icosahedron vertex.
fn dodecahedron() -> GeneratedMesh {
    let ico = icosahedron();

    let points: Vec<Vec3> = ico
        .triangles
        .chunks_exact(3)
        .map(|triangle| {
            let (a, b, c) = ico.corners(triangle);
            Vec3::from_add_vectors(&Vec3::from_add_vectors(&a, &b), &c).normalized()
        })
        .collect();

    let mut pentagons: Vec<Vec<u16>> = Vec::with_capacity(ico.points.len());

    for (vertex, axis) in ico.points.iter().enumerate() {
        let mut ring: Vec<u16> = ico
            .triangles
            .chunks_exact(3)
            .enumerate()
            .filter(|(_, triangle)| triangle.contains(&(vertex as u16)))
            .map(|(face, _)| face as u16)
            .collect();

        // Order the ring by angle around the vertex axis.
        let mut u = Vec3::from_sub_vectors(&points[ring[0] as usize], axis);
        u.normalize();
        let w = Vec3::from_cross(axis, &u);
        let angle = |face: &u16| {
            let p = Vec3::from_sub_vectors(&points[*face as usize], axis);
            p.dot(&w).atan2(p.dot(&u))
        };
        ring.sort_by(|a, b| angle(a).partial_cmp(&angle(b)).unwrap_or(Ordering::Equal));

        pentagons.push(ring);
    }

    let faces: Vec<&[u16]> = pentagons.iter().map(|ring| ring.as_slice()).collect();
    solid(points, &faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &GeneratedMesh) {
        let mut center = Vec3::new();
        for p in mesh.points.iter() {
            center.add(p);
        }
        center.divide_scalar(mesh.points.len() as f32);

        for triangle in mesh.triangles.chunks_exact(3) {
            let (a, b, c) = mesh.corners(triangle);
            let face = Vec3::from_cross(&Vec3::from_sub_vectors(&b, &a), &Vec3::from_sub_vectors(&c, &a));
            assert!(face.dot(&Vec3::from_sub_vectors(&a, &center)) > 0.0);
        }
    }

    #[test]
    fn platonic_solid_sizes() {
        let expected = [
            (Shape::Tetrahedron, 4, 4),
            (Shape::Cube, 8, 12),
            (Shape::Octahedron, 6, 8),
            (Shape::Dodecahedron, 20, 36),
            (Shape::Icosahedron, 12, 20),
        ];

        for (shape, points, triangles) in expected.iter() {
            let mesh = generate(*shape);
            assert_eq!(mesh.points.len(), *points, "{:?}", shape);
            assert_eq!(mesh.triangle_count(), *triangles, "{:?}", shape);
            assert!(mesh.tcoords.is_none());
            assert_outward(&mesh);
        }
    }

    #[test]
    fn dodecahedron_uses_every_vertex_three_times() {
        let mesh = generate(Shape::Dodecahedron);

        for vertex in 0..20u16 {
            let faces = mesh
                .triangles
                .chunks_exact(3)
                .filter(|t| t.contains(&vertex))
                .count();
            // three pentagons meet at each vertex; fans add extra triangles at
            // the fan roots only
            assert!(faces >= 3, "vertex {} touches {} triangles", vertex, faces);
        }
    }

    #[test]
    fn sphere_grid_has_uvs_and_outward_normals() {
        let mesh = generate(Shape::Sphere { slices: 8, stacks: 8 });

        assert_eq!(mesh.points.len(), 81);
        assert_eq!(mesh.triangle_count(), 128);
        assert_eq!(mesh.tcoords.as_ref().map(Vec::len), Some(81));

        // the first and last pole vertices only touch collapsed triangles
        let normals = mesh.compute_normals();
        let shaded = normals
            .iter()
            .zip(mesh.points.iter())
            .filter(|(normal, _)| normal.length_squared() > 0.0);

        assert_eq!(shaded.clone().count(), 79);
        for (normal, point) in shaded {
            assert!(normal.dot(point) > 0.0);
        }
    }

    #[test]
    fn hemisphere_stays_above_equator() {
        let mesh = generate(Shape::Hemisphere { slices: 4, stacks: 4 });

        assert!(mesh.points.iter().all(|p| p.z >= -1e-6));
    }

    #[test]
    fn plane_faces_positive_z() {
        let mesh = generate(Shape::Plane { slices: 1, stacks: 1 });

        assert_eq!(mesh.triangles, vec![2, 1, 0, 2, 3, 1]);
        for normal in mesh.compute_normals() {
            assert_eq!(normal, Vec3::unit_z());
        }
    }

    #[test]
    fn translate_moves_every_point() {
        let mut mesh = generate(Shape::Cube);
        mesh.translate(&Vec3::from_scalar(-0.5));

        assert!(mesh
            .points
            .iter()
            .all(|p| p.x.abs() == 0.5 && p.y.abs() == 0.5 && p.z.abs() == 0.5));
    }
}

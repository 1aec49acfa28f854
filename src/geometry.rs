use nalgebra::{Rotation3, UnitQuaternion, Vector3};

use crate::aabb::Aabb;

pub type Fp = f64;
pub type Vec3f = Vector3<Fp>;

pub static EPS: Fp = 0.00001;
pub const FP_INF: Fp = Fp::INFINITY;
pub const FP_NEG_INF: Fp = Fp::NEG_INFINITY;

/// Normals of two triangles on the same flat face are within this of each other.
pub static COPLANAR_DOT: Fp = 0.99;

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3f,
    pub b: Vec3f,
    pub c: Vec3f,
}

impl Triangle {
    pub fn new(a: Vec3f, b: Vec3f, c: Vec3f) -> Triangle {
        Triangle { a, b, c }
    }

    pub fn vertices(&self) -> [Vec3f; 3] {
        [self.a, self.b, self.c]
    }

    /// Outward normal for counter-clockwise winding.
    pub fn normal(&self) -> Vec3f {
        (self.b - self.a).cross(&(self.c - self.a)).normalize()
    }

    pub fn shares_edge(&self, other: &Triangle) -> bool {
        let other_vertices = other.vertices();
        self.vertices()
            .iter()
            .filter(|v| other_vertices.contains(v))
            .count()
            >= 2
    }

    pub fn map_coords(&self, f: impl Fn(&Vec3f) -> Vec3f) -> Triangle {
        Triangle {
            a: f(&self.a),
            b: f(&self.b),
            c: f(&self.c),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Mesh {
        Mesh { triangles }
    }

    /// Closed box spanning `min..max`, two counter-clockwise triangles per face.
    pub fn new_rect(min: Vec3f, max: Vec3f) -> Mesh {
        let (x0, y0, z0) = (min.x, min.y, min.z);
        let (x1, y1, z1) = (max.x, max.y, max.z);
        let faces = [
            // -x
            [
                Vec3f::new(x0, y0, z0),
                Vec3f::new(x0, y0, z1),
                Vec3f::new(x0, y1, z1),
                Vec3f::new(x0, y1, z0),
            ],
            // +x
            [
                Vec3f::new(x1, y0, z0),
                Vec3f::new(x1, y1, z0),
                Vec3f::new(x1, y1, z1),
                Vec3f::new(x1, y0, z1),
            ],
            // -y
            [
                Vec3f::new(x0, y0, z0),
                Vec3f::new(x1, y0, z0),
                Vec3f::new(x1, y0, z1),
                Vec3f::new(x0, y0, z1),
            ],
            // +y
            [
                Vec3f::new(x0, y1, z0),
                Vec3f::new(x0, y1, z1),
                Vec3f::new(x1, y1, z1),
                Vec3f::new(x1, y1, z0),
            ],
            // -z
            [
                Vec3f::new(x0, y0, z0),
                Vec3f::new(x0, y1, z0),
                Vec3f::new(x1, y1, z0),
                Vec3f::new(x1, y0, z0),
            ],
            // +z
            [
                Vec3f::new(x0, y0, z1),
                Vec3f::new(x1, y0, z1),
                Vec3f::new(x1, y1, z1),
                Vec3f::new(x0, y1, z1),
            ],
        ];
        let triangles = faces
            .iter()
            .flat_map(|[p0, p1, p2, p3]| {
                [
                    Triangle::new(*p0, *p1, *p2),
                    Triangle::new(*p0, *p2, *p3),
                ]
            })
            .collect();
        Mesh { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// NaN coordinates never show up in `bounds`, so they have to be checked separately.
    pub fn is_finite(&self) -> bool {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices())
            .all(|v| v.iter().all(|c| c.is_finite()))
    }

    pub fn bounds(&self) -> Aabb {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices())
            .fold(Aabb::default(), |aabb, point| aabb.extend_point(point))
    }

    /// Indices of the triangles sharing an edge with `self.triangles()[index]`.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let triangle = &self.triangles[index];
        self.triangles
            .iter()
            .enumerate()
            .filter(move |(i, t)| *i != index && triangle.shares_edge(t))
            .map(|(i, _)| i)
    }

    pub fn map_coords(self, f: impl Fn(&Vec3f) -> Vec3f) -> Mesh {
        Mesh {
            triangles: self.triangles.iter().map(|t| t.map_coords(&f)).collect(),
        }
    }

    pub fn scale(self, factor: Fp) -> Mesh {
        self.map_coords(|v| v * factor)
    }

    pub fn translate(self, offset: Vec3f) -> Mesh {
        self.map_coords(|v| v + offset)
    }

    pub fn rotate(self, rotation: &Rotation3<Fp>) -> Mesh {
        self.map_coords(|v| rotation * v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape3D {
    Ellipsoid { r: Vec3f },
    Box { s: Vec3f },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Object3D {
    pub shape: Shape3D,
    pub position: Vec3f,
    pub rotation: UnitQuaternion<Fp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    Dielectric,
    Metallic,
    Diffused,
}

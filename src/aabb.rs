use crate::geometry::{Fp, Object3D, Shape3D, Vec3f, FP_INF, FP_NEG_INF};

#[derive(Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3f,
    pub max: Vec3f,
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb {
            min: Vec3f::new(FP_INF, FP_INF, FP_INF),
            max: Vec3f::new(FP_NEG_INF, FP_NEG_INF, FP_NEG_INF),
        }
    }
}

impl Aabb {
    pub fn new(min: Vec3f, max: Vec3f) -> Aabb {
        Aabb {
            min: min.inf(&max),
            max: min.sup(&max),
        }
    }

    pub fn extend_point(&self, point: Vec3f) -> Aabb {
        Aabb {
            min: self.min.inf(&point),
            max: self.max.sup(&point),
        }
    }

    pub fn size(&self) -> Vec3f {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3f {
        (self.min + self.max) / 2.0
    }

    pub fn diagonal(&self) -> Fp {
        (self.max - self.min).norm()
    }

    /// First axis along which the box is flat, inverted (as for an empty box) or unbounded.
    pub fn degenerate_axis(&self) -> Option<usize> {
        let size = self.size();
        (0..3).find(|&axis| !(size[axis] > 0.0 && size[axis].is_finite()))
    }

    pub fn contains(&self, aabb: &Aabb, tolerance: Fp) -> bool {
        for coord in 0..3 {
            if aabb.min[coord] < self.min[coord] - tolerance {
                return false;
            }
            if aabb.max[coord] > self.max[coord] + tolerance {
                return false;
            }
        }
        true
    }
}

fn calculate_aabb_for_shape(shape3d: &Shape3D) -> Aabb {
    match shape3d {
        Shape3D::Box { s } => Aabb { min: -s, max: *s },
        Shape3D::Ellipsoid { r } => Aabb { min: -r, max: *r },
    }
}

// to make the formatter happy
fn if_then_else<T>(cond: bool, fst: T, snd: T) -> T {
    if cond {
        fst
    } else {
        snd
    }
}

pub fn calculate_aabb_for_object(object: &Object3D) -> Aabb {
    let shape_aabb = calculate_aabb_for_shape(&object.shape);
    let mut result = Aabb::default();
    for x_from_min in [false, true] {
        for y_from_min in [false, true] {
            for z_from_min in [false, true] {
                let point = Vec3f::new(
                    if_then_else(x_from_min, shape_aabb.min.x, shape_aabb.max.x),
                    if_then_else(y_from_min, shape_aabb.min.y, shape_aabb.max.y),
                    if_then_else(z_from_min, shape_aabb.min.z, shape_aabb.max.z),
                );
                result = result.extend_point(object.rotation.transform_vector(&point) + object.position);
            }
        }
    }
    result
}

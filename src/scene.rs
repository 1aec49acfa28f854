use std::f64::consts::PI;
use std::path::PathBuf;

use nalgebra::{Rotation3, Unit};
use rand::Rng;

use crate::aabb::{calculate_aabb_for_object, Aabb};
use crate::config::SceneConfig;
use crate::distributions::random_unit_vec;
use crate::error::SceneError;
use crate::geometry::{Fp, Mesh, Object3D, Vec3f, EPS};
use crate::layout::SceneLayout;
use crate::materials::{MaterialSampler, SurfaceMaterial};
use crate::mesh_io::load_mesh;

/// An emissive-only shape. It reflects nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub object3d: Object3D,
    pub emission: Vec3f,
}

impl Light {
    pub fn bounds(&self) -> Aabb {
        calculate_aabb_for_object(&self.object3d)
    }

    /// Sphere enclosing the light's bounding box.
    pub fn focus_point(&self) -> FocusPoint {
        let bounds = self.bounds();
        FocusPoint {
            center: bounds.center(),
            radius: bounds.diagonal() / 2.0,
        }
    }
}

/// A region the renderer sends extra rays towards.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusPoint {
    pub center: Vec3f,
    pub radius: Fp,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3f,
    pub target: Vec3f,
    pub fov: Fp,
}

impl Camera {
    pub fn look_at(position: Vec3f, target: Vec3f, fov: Fp) -> Result<Camera, SceneError> {
        if (target - position).norm() < EPS {
            return Err(SceneError::DegenerateCamera);
        }
        Ok(Camera {
            position,
            target,
            fov,
        })
    }

    pub fn forward(&self) -> Vec3f {
        (self.target - self.position).normalize()
    }

    /// Horizontal screen axis, with `+z` as world up.
    pub fn right(&self) -> Vec3f {
        let right = self.forward().cross(&Vec3f::z());
        if right.norm() < EPS {
            Vec3f::x()
        } else {
            right.normalize()
        }
    }

    pub fn up(&self) -> Vec3f {
        self.right().cross(&self.forward())
    }
}

/// Everything the ray tracer needs besides the objects. `focus_probs[i]` is the chance of
/// aiming a ray at `focus_points[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TracerConfig {
    pub camera: Camera,
    pub focus_points: Vec<FocusPoint>,
    pub focus_probs: Vec<Fp>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneObject {
    Surface {
        mesh: Mesh,
        material: SurfaceMaterial,
    },
    Light(Light),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneComposition {
    pub layout: SceneLayout,
    pub objects: Vec<SceneObject>,
    pub tracer: TracerConfig,
}

impl SceneComposition {
    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.objects.iter().filter_map(|object| match object {
            SceneObject::Light(light) => Some(light),
            SceneObject::Surface { .. } => None,
        })
    }

    pub fn surfaces(&self) -> impl Iterator<Item = (&Mesh, &SurfaceMaterial)> {
        self.objects.iter().filter_map(|object| match object {
            SceneObject::Surface { mesh, material } => Some((mesh, material)),
            SceneObject::Light(_) => None,
        })
    }
}

/// Meshes the composer picks objects from.
pub trait MeshSource {
    fn count(&self) -> usize;
    fn load(&self, index: usize) -> Result<Mesh, SceneError>;
}

impl MeshSource for [PathBuf] {
    fn count(&self) -> usize {
        self.len()
    }

    fn load(&self, index: usize) -> Result<Mesh, SceneError> {
        let path = &self[index];
        load_mesh(path).map_err(|source| SceneError::MeshLoad {
            path: path.clone(),
            source,
        })
    }
}

impl MeshSource for [Mesh] {
    fn count(&self) -> usize {
        self.len()
    }

    fn load(&self, index: usize) -> Result<Mesh, SceneError> {
        Ok(self[index].clone())
    }
}

/// Builds a random room with randomly rotated and placed objects, a few lights and a
/// camera. Any load failure aborts the whole scene.
pub fn random_scene<M, S, R>(
    models: &M,
    materials: &S,
    config: &SceneConfig,
    rng: &mut R,
) -> Result<SceneComposition, SceneError>
where
    M: MeshSource + ?Sized,
    S: MaterialSampler + ?Sized,
    R: Rng + ?Sized,
{
    if models.count() == 0 {
        return Err(SceneError::NoModels);
    }
    let layout = SceneLayout::sample(&config.room, rng);
    let num_objects = rng.gen_range(1..=config.max_objects.max(1));
    let num_lights = rng.gen_range(1..=config.max_lights.max(1));
    log::info!("{layout:?}: {num_objects} objects, {num_lights} lights");

    let mut objects = Vec::new();
    let mut focus_points = Vec::with_capacity(num_lights);
    let mut focus_probs = Vec::with_capacity(num_lights);

    for wall in layout.create_backdrop()? {
        objects.push(SceneObject::Surface {
            mesh: wall,
            material: materials.sample(rng)?,
        });
    }

    for _ in 0..num_objects {
        let mesh = models.load(rng.gen_range(0..models.count()))?;
        let axis = Unit::new_normalize(random_unit_vec(rng));
        let rotation = Rotation3::from_axis_angle(&axis, rng.gen_range(0.0..2.0 * PI));
        let mesh = match layout.place_mesh(mesh.rotate(&rotation), rng) {
            Ok(mesh) => mesh,
            Err(SceneError::DegenerateMesh { axis }) => {
                log::warn!("skipping object with no extent along axis {axis}");
                continue;
            }
            Err(e) => return Err(e),
        };
        objects.push(SceneObject::Surface {
            mesh,
            material: materials.sample(rng)?,
        });
    }

    for _ in 0..num_lights {
        let light = layout.create_light(rng);
        focus_points.push(light.focus_point());
        focus_probs.push(config.light_focus_probability / num_lights as Fp);
        objects.push(SceneObject::Light(light));
    }

    let (position, target) = layout.camera_info();
    let fov = (rng.gen::<Fp>() * 0.5 + 0.5) * PI / 3.0;
    let camera = Camera::look_at(position, target, fov)?;

    Ok(SceneComposition {
        layout,
        objects,
        tracer: TracerConfig {
            camera,
            focus_points,
            focus_probs,
        },
    })
}

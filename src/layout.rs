use rand::Rng;

use crate::aabb::Aabb;
use crate::config::RoomConfig;
use crate::distributions::{uniform_in, uniform_vec};
use crate::error::SceneError;
use crate::geometry::{Fp, Mesh, Object3D, Shape3D, Vec3f, EPS};
use crate::placement::place_in_bounds;
use crate::scene::Light;
use crate::walls::decompose_walls;

/// Room height; widths and depths are measured against it.
pub static ROOM_HEIGHT: Fp = 1.0;

/// The kinds of scene a composer can build. Every layout decides where the camera and
/// lights go, what the enclosing walls are and where objects may be put.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneLayout {
    Room(RoomLayout),
}

impl SceneLayout {
    pub fn sample<R: Rng + ?Sized>(config: &RoomConfig, rng: &mut R) -> SceneLayout {
        SceneLayout::Room(RoomLayout::sample(config, rng))
    }

    /// Camera position and the point it looks at.
    pub fn camera_info(&self) -> (Vec3f, Vec3f) {
        match self {
            SceneLayout::Room(room) => room.camera_info(),
        }
    }

    pub fn create_light<R: Rng + ?Sized>(&self, rng: &mut R) -> Light {
        match self {
            SceneLayout::Room(room) => room.create_light(rng),
        }
    }

    /// Wall meshes, each paintable on its own.
    pub fn create_backdrop(&self) -> Result<Vec<Mesh>, SceneError> {
        match self {
            SceneLayout::Room(room) => room.create_backdrop(),
        }
    }

    /// Scales and moves `mesh` somewhere inside the layout.
    pub fn place_mesh<R: Rng + ?Sized>(&self, mesh: Mesh, rng: &mut R) -> Result<Mesh, SceneError> {
        match self {
            SceneLayout::Room(room) => room.place_mesh(mesh, rng),
        }
    }
}

/// A box-shaped room centered on the y axis, floor at `z = 0`, lights on the ceiling and
/// the side walls, camera looking down the depth axis.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomLayout {
    pub width: Fp,
    pub depth: Fp,
}

impl RoomLayout {
    pub fn sample<R: Rng + ?Sized>(config: &RoomConfig, rng: &mut R) -> RoomLayout {
        RoomLayout {
            width: uniform_in(rng, config.width[0], config.width[1]),
            depth: uniform_in(rng, config.depth[0], config.depth[1]),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            Vec3f::new(-self.width / 2.0, -self.depth / 2.0, 0.0),
            Vec3f::new(self.width / 2.0, self.depth / 2.0, ROOM_HEIGHT),
        )
    }

    pub fn camera_info(&self) -> (Vec3f, Vec3f) {
        let height = ROOM_HEIGHT / 2.0;
        (
            Vec3f::new(0.0, -self.depth / 2.0 + EPS, height),
            Vec3f::new(0.0, self.depth / 2.0, height),
        )
    }

    pub fn create_light<R: Rng + ?Sized>(&self, rng: &mut R) -> Light {
        let y = (rng.gen::<Fp>() - 0.5) * self.depth;
        let center = if rng.gen_bool(0.5) {
            // ceiling
            Vec3f::new((rng.gen::<Fp>() - 0.5) * self.width, y, ROOM_HEIGHT)
        } else {
            // side wall
            let x = if rng.gen_bool(0.5) {
                self.width / 2.0
            } else {
                -self.width / 2.0
            };
            Vec3f::new(x, y, rng.gen::<Fp>() * 0.9)
        };

        let shape = if rng.gen_bool(0.5) {
            let radius = rng.gen_range(0.05..0.25);
            Shape3D::Ellipsoid {
                r: Vec3f::new(radius, radius, radius),
            }
        } else {
            Shape3D::Box {
                s: uniform_vec(rng) * 0.1 + Vec3f::new(0.05, 0.05, 0.05),
            }
        };

        let intensity = (rng.gen::<Fp>() + 0.1) * 10.0;
        Light {
            object3d: Object3D {
                shape,
                position: center,
                rotation: Default::default(),
            },
            emission: Vec3f::new(intensity, intensity, intensity),
        }
    }

    pub fn create_backdrop(&self) -> Result<Vec<Mesh>, SceneError> {
        let bounds = self.bounds();
        decompose_walls(Mesh::new_rect(bounds.min, bounds.max))
    }

    pub fn place_mesh<R: Rng + ?Sized>(&self, mesh: Mesh, rng: &mut R) -> Result<Mesh, SceneError> {
        place_in_bounds(&self.bounds(), mesh, rng)
    }
}

use std::path::PathBuf;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::distributions::uniform_vec;
use crate::error::SceneError;
use crate::geometry::{Fp, Material, Vec3f};

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMaterial {
    pub material: Material,
    pub color: Vec3f,
    pub ior: Fp,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        SurfaceMaterial {
            material: Material::Diffused,
            color: Vec3f::new(0.5, 0.5, 0.5),
            ior: 1.5,
        }
    }
}

pub trait MaterialSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SurfaceMaterial, SceneError>;
}

/// Mostly diffuse surfaces, colored after a randomly picked image when any are given.
#[derive(Clone, Debug, Default)]
pub struct ImageMaterials {
    pub images: Vec<PathBuf>,
}

impl ImageMaterials {
    pub fn new(images: Vec<PathBuf>) -> ImageMaterials {
        ImageMaterials { images }
    }

    fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec3f, SceneError> {
        let Some(path) = self.images.choose(rng) else {
            return Ok(uniform_vec(rng));
        };
        let img = image::open(path)
            .map_err(|source| SceneError::ImageLoad {
                path: path.clone(),
                source,
            })?
            .into_rgb32f();
        let pixel_count = (img.width() as Fp * img.height() as Fp).max(1.0);
        let sum = img.pixels().fold(Vec3f::zeros(), |acc, pixel| {
            let [r, g, b] = pixel.0;
            acc + Vec3f::new(r as Fp, g as Fp, b as Fp)
        });
        Ok(sum / pixel_count)
    }
}

impl MaterialSampler for ImageMaterials {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SurfaceMaterial, SceneError> {
        let color = self.sample_color(rng)?;
        let roll: Fp = rng.gen();
        let surface = if roll < 0.8 {
            SurfaceMaterial {
                material: Material::Diffused,
                color,
                ..Default::default()
            }
        } else if roll < 0.9 {
            SurfaceMaterial {
                material: Material::Metallic,
                color,
                ..Default::default()
            }
        } else {
            SurfaceMaterial {
                material: Material::Dielectric,
                color,
                ior: rng.gen_range(1.3..1.7),
            }
        };
        Ok(surface)
    }
}

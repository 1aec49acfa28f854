use rand::Rng;

use crate::aabb::Aabb;
use crate::distributions::uniform_in_box;
use crate::error::SceneError;
use crate::geometry::{Fp, Mesh, EPS};

/// Smallest share of the largest fitting scale a placed mesh is shrunk to.
pub static MIN_SCALE_FRACTION: Fp = 0.1;

/// Largest uniform scale that fits a box of size `mesh` inside a box of size `target`.
pub fn max_fitting_scale(mesh: &Aabb, target: &Aabb) -> Result<Fp, SceneError> {
    if let Some(axis) = mesh.degenerate_axis() {
        return Err(SceneError::DegenerateMesh { axis });
    }
    Ok(target.size().component_div(&mesh.size()).min())
}

/// Scales `mesh` about the origin by a random fraction of the largest scale that fits
/// `target`, then moves it to a random position where it lies entirely inside `target`.
pub fn place_in_bounds<R: Rng + ?Sized>(
    target: &Aabb,
    mesh: Mesh,
    rng: &mut R,
) -> Result<Mesh, SceneError> {
    if mesh.is_empty() {
        return Err(SceneError::DegenerateMesh { axis: 0 });
    }
    if !mesh.is_finite() {
        return Err(SceneError::NonFiniteMesh);
    }
    let max_scale = max_fitting_scale(&mesh.bounds(), target)?;
    let scale = rng.gen_range(MIN_SCALE_FRACTION..1.0) * max_scale;
    let mesh = mesh.scale(scale);

    let bounds = mesh.bounds();
    let translate_min = target.min - bounds.min;
    let translate_max = target.max - bounds.max;
    let translate = uniform_in_box(rng, &translate_min, &translate_max);
    log::debug!("placing mesh with scale {scale:.4} (max {max_scale:.4}) at offset {translate:?}");
    let mesh = mesh.translate(translate);
    debug_assert!(target.contains(&mesh.bounds(), EPS));
    Ok(mesh)
}

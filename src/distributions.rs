use rand::Rng;
use rand_distr::{Distribution, Normal, UnitSphere};

use crate::geometry::{Fp, Vec3f};

pub fn random_unit_vec<R: Rng + ?Sized>(rng: &mut R) -> Vec3f {
    let [x, y, z]: [Fp; 3] = UnitSphere.sample(rng);
    Vec3f::new(x, y, z)
}

/// Each component uniform in `[0, 1)`.
pub fn uniform_vec<R: Rng + ?Sized>(rng: &mut R) -> Vec3f {
    Vec3f::new(rng.gen(), rng.gen(), rng.gen())
}

/// Uniform in `[lo, hi]`, collapsing to `lo` when rounding made the interval empty.
pub fn uniform_in<R: Rng + ?Sized>(rng: &mut R, lo: Fp, hi: Fp) -> Fp {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Per-axis uniform point of the box `lo..=hi`.
pub fn uniform_in_box<R: Rng + ?Sized>(rng: &mut R, lo: &Vec3f, hi: &Vec3f) -> Vec3f {
    Vec3f::new(
        uniform_in(rng, lo.x, hi.x),
        uniform_in(rng, lo.y, hi.y),
        uniform_in(rng, lo.z, hi.z),
    )
}

/// Normal sample clamped to `[min, max]`. Falls back to the mean for a non-finite deviation.
pub fn clamped_normal<R: Rng + ?Sized>(rng: &mut R, mean: Fp, std_dev: Fp, min: Fp, max: Fp) -> Fp {
    let sample = match Normal::new(mean, std_dev) {
        Ok(normal_distr) => normal_distr.sample(rng),
        Err(_) => mean,
    };
    Fp::min(max, Fp::max(min, sample))
}

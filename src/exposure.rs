//! Brightening of rendered images towards a randomly drawn target brightness.
//!
//! The brightness estimate is a high quantile (80th percentile by default) of the
//! per-pixel channel means, not the median: images dominated by a dark background would
//! otherwise be brightened until their few lit pixels saturate.

use image::Rgb32FImage;
use rand::Rng;

use crate::config::ExposureConfig;
use crate::distributions::clamped_normal;
use crate::geometry::Fp;

/// Brightness estimates are floored at this before dividing by them.
pub static MIN_BRIGHTNESS: Fp = 1e-5;

#[derive(Clone, Debug, Default)]
pub struct ExposureNormalizer {
    pub config: ExposureConfig,
}

impl ExposureNormalizer {
    pub fn new(config: ExposureConfig) -> ExposureNormalizer {
        ExposureNormalizer { config }
    }

    /// Per-pixel channel mean at the configured quantile, taken from the sorted values
    /// without interpolation. An empty image is black.
    pub fn quantile_brightness(&self, img: &Rgb32FImage) -> Fp {
        let mut brightness = img
            .pixels()
            .map(|pixel| pixel.0.iter().map(|&c| c as Fp).sum::<Fp>() / 3.0)
            .collect::<Vec<_>>();
        if brightness.is_empty() {
            return 0.0;
        }
        brightness.sort_by(|a, b| a.total_cmp(b));
        let index = (brightness.len() as Fp * self.config.quantile) as usize;
        brightness[index.min(brightness.len() - 1)]
    }

    /// Factor that brings the image's brightness estimate up to a sampled target.
    /// Never below 1: images already at or above the target are left alone.
    pub fn brightness_scale<R: Rng + ?Sized>(&self, img: &Rgb32FImage, rng: &mut R) -> Fp {
        let target = clamped_normal(
            rng,
            self.config.target_mean,
            self.config.target_std_dev,
            self.config.target_min,
            self.config.target_max,
        );
        let estimate = Fp::max(MIN_BRIGHTNESS, self.quantile_brightness(img));
        let scale = Fp::max(1.0, target / estimate);
        log::debug!("brightness estimate {estimate:.5}, target {target:.3}, scale {scale:.3}");
        scale
    }
}

pub fn apply_scale(img: &mut Rgb32FImage, scale: Fp) {
    for pixel in img.pixels_mut() {
        for c in pixel.0.iter_mut() {
            *c = (*c as Fp * scale) as f32;
        }
    }
}

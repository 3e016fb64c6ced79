// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Random augmentation of rendered documents, driven by the caller's RNG.

use image::RgbaImage;
use papiers_core::AugmentConfig;
use papiers_core::error::Result;
use rand::Rng;
use tracing::debug;

use super::processor::ImageProcessor;

/// Applies small random rotations, brightness/contrast jitter, and
/// occasional grayscale conversion.
#[derive(Debug, Clone)]
pub struct Augmenter {
    config: AugmentConfig,
}

impl Augmenter {
    /// Rejects out-of-range or NaN settings, which would otherwise reach
    /// `gen_range` and `gen_bool` and panic there.
    pub fn new(config: AugmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Perturb `image`. Every random draw comes from `rng`, so a seeded RNG
    /// reproduces the same output.
    pub fn apply<R: Rng>(&self, image: RgbaImage, rng: &mut R) -> RgbaImage {
        let cfg = &self.config;

        let rotation = symmetric_f32(rng, cfg.max_rotation_deg);
        let brightness = if cfg.max_brightness_shift > 0 {
            rng.gen_range(-cfg.max_brightness_shift..=cfg.max_brightness_shift)
        } else {
            0
        };
        let contrast = 1.0 + symmetric_f32(rng, cfg.max_contrast_delta);
        let grayscale = rng.gen_bool(cfg.grayscale_probability.clamp(0.0, 1.0));

        debug!(rotation, brightness, contrast, grayscale, "Augmenting document");

        let mut processor = ImageProcessor::from_rgba(image)
            .rotate(rotation)
            .adjust_brightness(brightness)
            .adjust_contrast(contrast);
        if grayscale {
            processor = processor.grayscale();
        }
        processor.into_rgba()
    }
}

/// Uniform draw from `-bound..=bound`, or zero when the bound is zero.
fn symmetric_f32<R: Rng>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> RgbaImage {
        RgbaImage::from_fn(32, 16, |x, y| Rgba([(x * 8) as u8, (y * 16) as u8, 90, 255]))
    }

    #[test]
    fn same_seed_same_output() {
        let augmenter = Augmenter::new(AugmentConfig::default()).unwrap();
        let a = augmenter.apply(sample(), &mut StdRng::seed_from_u64(11));
        let b = augmenter.apply(sample(), &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn zeroed_config_is_identity() {
        let augmenter = Augmenter::new(AugmentConfig {
            max_rotation_deg: 0.0,
            max_brightness_shift: 0,
            max_contrast_delta: 0.0,
            grayscale_probability: 0.0,
        })
        .unwrap();
        let out = augmenter.apply(sample(), &mut StdRng::seed_from_u64(3));
        assert_eq!(out, sample());
    }

    #[test]
    fn dimensions_are_preserved() {
        let augmenter = Augmenter::new(AugmentConfig {
            max_rotation_deg: 10.0,
            ..AugmentConfig::default()
        })
        .unwrap();
        let out = augmenter.apply(sample(), &mut StdRng::seed_from_u64(5));
        assert_eq!(out.dimensions(), (32, 16));
    }

    #[test]
    fn certain_grayscale_equalises_channels() {
        let augmenter = Augmenter::new(AugmentConfig {
            grayscale_probability: 1.0,
            ..AugmentConfig::default()
        })
        .unwrap();
        let out = augmenter.apply(sample(), &mut StdRng::seed_from_u64(9));
        assert!(out.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn nan_settings_are_rejected() {
        let nan_probability = AugmentConfig {
            grayscale_probability: f64::NAN,
            ..AugmentConfig::default()
        };
        assert!(Augmenter::new(nan_probability).is_err());

        let nan_rotation = AugmentConfig {
            max_rotation_deg: f32::NAN,
            ..AugmentConfig::default()
        };
        assert!(Augmenter::new(nan_rotation).is_err());
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generator configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PapiersError, Result};
use crate::{Country, DocumentKind};

/// Settings for one dataset generation run.
///
/// Loaded from an optional JSON file; keys missing from the file fall back to
/// the defaults below, and CLI flags override whatever was loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root of the dataset directory (images, metadata, summary).
    pub output_dir: PathBuf,
    /// Directory of portrait photos. `None` uses a synthetic placeholder portrait.
    pub photo_dir: Option<PathBuf>,
    /// Directory whose SVG files override the built-in templates by name.
    pub templates_dir: Option<PathBuf>,
    /// Number of documents to generate.
    pub count: usize,
    /// Seed for the random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Document kinds to draw from.
    pub kinds: Vec<DocumentKind>,
    /// Issuing countries to draw from.
    pub countries: Vec<Country>,
    /// Rasterization scale applied to the SVG canvas.
    pub scale: f32,
    /// Youngest holder age, in years, at the reference date.
    pub min_age: u32,
    /// Oldest holder age, in years, at the reference date.
    pub max_age: u32,
    /// Latest expiry, in years after the reference date.
    pub validity_years: u32,
    /// Vertical gap between the front and back of an ID card, in pixels.
    pub side_gap_px: u32,
    /// Post-render augmentation. Disabled when `None`.
    pub augment: Option<AugmentConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            photo_dir: None,
            templates_dir: None,
            count: 1,
            seed: None,
            kinds: DocumentKind::ALL.to_vec(),
            countries: Country::ALL.to_vec(),
            scale: 3.0,
            min_age: 18,
            max_age: 65,
            validity_years: 6,
            side_gap_px: 10,
            augment: None,
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Reject settings the generator cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(PapiersError::Config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if self.kinds.is_empty() {
            return Err(PapiersError::Config("at least one document kind is required".into()));
        }
        if self.countries.is_empty() {
            return Err(PapiersError::Config("at least one country is required".into()));
        }
        if self.min_age > self.max_age {
            return Err(PapiersError::Config(format!(
                "min_age ({}) is greater than max_age ({})",
                self.min_age, self.max_age
            )));
        }
        if self.max_age > 120 {
            return Err(PapiersError::Config(format!(
                "max_age {} is not a plausible holder age",
                self.max_age
            )));
        }
        if let Some(augment) = &self.augment {
            augment.validate()?;
        }
        Ok(())
    }
}

/// Random perturbations applied to rendered documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Maximum absolute rotation, in degrees.
    pub max_rotation_deg: f32,
    /// Maximum absolute brightness shift (0..=255).
    pub max_brightness_shift: i32,
    /// Maximum deviation of the contrast factor from 1.0.
    pub max_contrast_delta: f32,
    /// Probability of converting the document to grayscale.
    pub grayscale_probability: f64,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            max_rotation_deg: 3.0,
            max_brightness_shift: 20,
            max_contrast_delta: 0.15,
            grayscale_probability: 0.1,
        }
    }
}

impl AugmentConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=45.0).contains(&self.max_rotation_deg) {
            return Err(PapiersError::Config(format!(
                "max_rotation_deg must be within 0..=45, got {}",
                self.max_rotation_deg
            )));
        }
        if !(0..=255).contains(&self.max_brightness_shift) {
            return Err(PapiersError::Config(format!(
                "max_brightness_shift must be within 0..=255, got {}",
                self.max_brightness_shift
            )));
        }
        if !(0.0..1.0).contains(&self.max_contrast_delta) {
            return Err(PapiersError::Config(format!(
                "max_contrast_delta must be within 0..1, got {}",
                self.max_contrast_delta
            )));
        }
        if !(0.0..=1.0).contains(&self.grayscale_probability) {
            return Err(PapiersError::Config(format!(
                "grayscale_probability must be within 0..=1, got {}",
                self.grayscale_probability
            )));
        }
        Ok(())
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Portrait photo library: scanned once per run, sampled with the caller's RNG.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_ellipse_mut;
use papiers_core::error::{PapiersError, Result};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, instrument};

use crate::image::processor::ImageProcessor;

const PHOTO_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Size of the generated placeholder portrait.
const PLACEHOLDER_SIZE: (u32, u32) = (300, 400);

/// The set of portrait photos available to a run.
#[derive(Debug, Clone, Default)]
pub struct PhotoLibrary {
    photos: Vec<PathBuf>,
}

impl PhotoLibrary {
    /// List the photos in `dir` (non-recursive), sorted by path so that a
    /// seeded run picks the same files on every machine.
    #[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(PapiersError::EmptyPhotoLibrary {
                dir: dir.to_path_buf(),
            });
        }

        let mut photos = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_photo = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    PHOTO_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
                });
            if is_photo && path.is_file() {
                photos.push(path);
            }
        }

        if photos.is_empty() {
            return Err(PapiersError::EmptyPhotoLibrary {
                dir: dir.to_path_buf(),
            });
        }
        photos.sort();
        info!(photos = photos.len(), "Photo library scanned");
        Ok(Self { photos })
    }

    /// A library with no photos; every portrait is the generated placeholder.
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[PathBuf] {
        &self.photos
    }

    /// Pick a photo uniformly at random.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&Path> {
        self.photos.choose(rng).map(PathBuf::as_path)
    }

    /// Load a random portrait, or the placeholder when the library is empty.
    pub fn portrait<R: Rng>(&self, rng: &mut R) -> Result<ImageProcessor> {
        match self.choose(rng) {
            Some(path) => ImageProcessor::open(path),
            None => Ok(placeholder_portrait()),
        }
    }
}

/// A neutral grey head-and-shoulders silhouette.
pub fn placeholder_portrait() -> ImageProcessor {
    let (width, height) = PLACEHOLDER_SIZE;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([214, 220, 226, 255]));
    let silhouette = Rgba([128, 138, 150, 255]);

    let centre_x = (width / 2) as i32;
    draw_filled_ellipse_mut(&mut canvas, (centre_x, 150), 70, 90, silhouette);
    draw_filled_ellipse_mut(&mut canvas, (centre_x, height as i32), 140, 130, silhouette);

    ImageProcessor::from_rgba(canvas)
}

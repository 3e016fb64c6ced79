// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor: portrait fitting, rotation, grayscale, and
// brightness/contrast adjustment for rendered documents. Operates on
// in-memory images using the `image` and `imageproc` crates.

use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::geometric_transformations::{self, Interpolation};
use papiers_core::error::PapiersError;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`
/// wrapping the result, enabling method chaining.
///
/// ```ignore
/// let portrait = ImageProcessor::open("photos/0001.jpg")?
///     .fit_to_slot(660, 840)
///     .into_rgba();
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PapiersError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            PapiersError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, PapiersError> {
        let img = image::load_from_memory(data)
            .map_err(|err| PapiersError::ImageError(format!("failed to decode image: {err}")))?;
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded RGBA buffer, e.g. a rasterized template.
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the image as 8-bit RGBA.
    pub fn into_rgba(self) -> RgbaImage {
        self.image.into_rgba8()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize to fit within `max_width` x `max_height`, preserving the
    /// aspect ratio. The result may be smaller than the box on one axis.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn resize(self, max_width: u32, max_height: u32) -> Self {
        let resized =
            self.image
                .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Lanczos3);
        Self { image: resized }
    }

    /// Scale and centre-crop to exactly `width` x `height`, preserving the
    /// aspect ratio of what remains. Used to fit portraits into photo slots.
    #[instrument(skip(self), fields(width, height))]
    pub fn fit_to_slot(self, width: u32, height: u32) -> Self {
        let fitted =
            self.image
                .resize_to_fill(width, height, image::imageops::FilterType::Lanczos3);
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Image fitted to slot"
        );
        Self { image: fitted }
    }

    /// Rotate the image by an angle in degrees (clockwise).
    ///
    /// Multiples of 90 degrees are lossless. Other angles use bilinear
    /// interpolation about the centre on a canvas of the same size, filling
    /// uncovered corners with transparent white.
    #[instrument(skip(self), fields(degrees))]
    pub fn rotate(self, degrees: f32) -> Self {
        let normalised = degrees.rem_euclid(360.0);
        if (normalised - 90.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate90(),
            };
        }
        if (normalised - 180.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate180(),
            };
        }
        if (normalised - 270.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate270(),
            };
        }
        if normalised.abs() < 0.01 || (normalised - 360.0).abs() < 0.01 {
            return self;
        }

        let rgba = self.image.to_rgba8();
        let rotated: RgbaImage = geometric_transformations::rotate_about_center(
            &rgba,
            degrees.to_radians(),
            Interpolation::Bilinear,
            Rgba([255u8, 255, 255, 0]),
        );
        debug!(degrees, "General rotation applied");
        Self {
            image: DynamicImage::ImageRgba8(rotated),
        }
    }

    /// Convert to grayscale while keeping the alpha channel.
    pub fn grayscale(self) -> Self {
        let gray = DynamicImage::ImageLumaA8(self.image.to_luma_alpha8());
        Self {
            image: DynamicImage::ImageRgba8(gray.to_rgba8()),
        }
    }

    /// Shift brightness by `value`, clamped to -255..=255. Alpha is untouched.
    #[instrument(skip(self), fields(value))]
    pub fn adjust_brightness(self, value: i32) -> Self {
        let shift = value.clamp(-255, 255);
        self.map_channels(|channel| (i32::from(channel) + shift).clamp(0, 255) as u8)
    }

    /// Scale contrast around mid-grey. Values > 1.0 increase contrast, 1.0 is
    /// a no-op. Alpha is untouched.
    #[instrument(skip(self), fields(factor))]
    pub fn adjust_contrast(self, factor: f32) -> Self {
        self.map_channels(|channel| {
            (factor * (f32::from(channel) - 128.0) + 128.0).clamp(0.0, 255.0) as u8
        })
    }

    fn map_channels(self, adjust: impl Fn(u8) -> u8) -> Self {
        let mut rgba = self.image.into_rgba8();
        for pixel in rgba.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            *pixel = Rgba([adjust(r), adjust(g), adjust(b), a]);
        }
        Self {
            image: DynamicImage::ImageRgba8(rgba),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, PapiersError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| PapiersError::ImageError(format!("PNG encoding failed: {err}")))?;
        info!(bytes = buffer.len(), "Image encoded as PNG");
        Ok(buffer)
    }

    /// Write the image to a file. The format is inferred from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PapiersError> {
        self.image.save(path.as_ref()).map_err(|err| {
            PapiersError::ImageError(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })
    }
}

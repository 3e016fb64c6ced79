// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SVG rasterization: parses rendered templates with usvg and paints them
// with resvg into an RGBA image.

use image::{Rgba, RgbaImage};
use papiers_core::error::{PapiersError, Result};
use resvg::{tiny_skia, usvg};
use tracing::{debug, info, instrument};

/// Largest canvas edge, in pixels, the rasterizer will allocate.
const MAX_EDGE_PX: u32 = 16_384;

/// Rasterizer holding parse options and the font database.
///
/// Loading system fonts is the expensive part, so one rasterizer is built
/// per run and shared by every render.
pub struct SvgRasterizer {
    options: usvg::Options<'static>,
}

impl SvgRasterizer {
    /// Create a rasterizer with the system fonts loaded.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        let rasterizer = Self { options };
        info!(faces = rasterizer.font_count(), "Font database loaded");
        rasterizer
    }

    /// Create a rasterizer with an empty font database; `<text>` is skipped.
    pub fn without_fonts() -> Self {
        Self {
            options: usvg::Options::default(),
        }
    }

    /// Number of font faces available to `<text>` elements.
    pub fn font_count(&self) -> usize {
        self.options.fontdb.len()
    }

    /// Render `svg` at `scale` onto a transparent canvas.
    #[instrument(skip(self, svg), fields(svg_len = svg.len(), scale))]
    pub fn rasterize(&self, svg: &str, scale: f32) -> Result<RgbaImage> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(PapiersError::Render(format!("invalid scale {scale}")));
        }

        let tree = usvg::Tree::from_str(svg, &self.options)
            .map_err(|err| PapiersError::Render(format!("failed to parse SVG: {err}")))?;

        let size = tree.size();
        let width = (size.width() * scale).ceil();
        let height = (size.height() * scale).ceil();
        if width < 1.0 || height < 1.0 || width > MAX_EDGE_PX as f32 || height > MAX_EDGE_PX as f32 {
            return Err(PapiersError::Render(format!(
                "canvas {width}x{height} is outside 1..={MAX_EDGE_PX} pixels"
            )));
        }
        let (width, height) = (width as u32, height as u32);

        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            PapiersError::Render(format!("failed to allocate a {width}x{height} canvas"))
        })?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        debug!(width, height, "SVG rasterized");

        Ok(pixmap_to_rgba(&pixmap))
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// tiny-skia stores premultiplied alpha; `image` expects straight alpha.
fn pixmap_to_rgba(pixmap: &tiny_skia::Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

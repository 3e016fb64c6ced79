// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Compositing: stacking document sides and placing portraits.

use image::{Rgba, RgbaImage, imageops};
use tracing::debug;

use super::processor::ImageProcessor;
use crate::template::catalog::PhotoSlot;

/// Stack `top` above `bottom` with `gap` transparent pixels between them.
///
/// The canvas is as wide as the wider image; the narrower one is left-aligned.
pub fn stack_vertical(top: &RgbaImage, bottom: &RgbaImage, gap: u32) -> RgbaImage {
    let width = top.width().max(bottom.width());
    let height = top.height() + gap + bottom.height();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 0]));

    imageops::replace(&mut canvas, top, 0, 0);
    imageops::replace(&mut canvas, bottom, 0, i64::from(top.height() + gap));
    debug!(width, height, gap, "Sides stacked");
    canvas
}

/// Fit `photo` into `slot` (given in SVG units, multiplied by `scale`) and
/// alpha-blend it onto `canvas`.
pub fn place_photo(canvas: &mut RgbaImage, photo: ImageProcessor, slot: PhotoSlot, scale: f32) {
    let to_px = |units: u32| (units as f32 * scale).round().max(0.0) as u32;
    let (x, y) = (to_px(slot.x), to_px(slot.y));
    let (width, height) = (to_px(slot.width).max(1), to_px(slot.height).max(1));

    let portrait = photo.fit_to_slot(width, height).into_rgba();
    imageops::overlay(canvas, &portrait, i64::from(x), i64::from(y));
    debug!(x, y, width, height, "Portrait placed");
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// papiers-render: Document rendering for the Papiers generator.
//
// Provides SVG template compilation and substitution, a catalog of the
// built-in document templates, SVG rasterization via resvg, image processing
// (resize, rotate, grayscale, brightness/contrast), compositing of document
// sides and portraits, random augmentation, and the portrait photo library.

pub mod image;
pub mod photo;
pub mod raster;
pub mod template;

// Re-export the primary structs so callers can use `papiers_render::SvgRasterizer` etc.
pub use crate::image::augment::Augmenter;
pub use crate::image::compose::{place_photo, stack_vertical};
pub use crate::image::processor::ImageProcessor;
pub use photo::PhotoLibrary;
pub use raster::SvgRasterizer;
pub use template::catalog::{PhotoSlot, TemplateCatalog, TemplateEntry};
pub use template::{SvgTemplate, TemplateContext, escape_xml};

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module: processing, compositing of document sides and portraits,
// and random augmentation.

pub mod augment;
pub mod compose;
pub mod processor;

pub use augment::Augmenter;
pub use compose::{place_photo, stack_vertical};
pub use processor::ImageProcessor;

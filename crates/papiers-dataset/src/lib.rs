// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// papiers-dataset: from fake identities to a finished dataset directory.
//
// Draws synthetic identities from Beninese and Ivorian locale tables, turns
// them into MRZ codes and rendered document images, and writes the images,
// JSON Lines metadata, and a run summary in the `imagefolder` layout.

pub mod document;
pub mod identity;
pub mod integrity;
pub mod locale;
pub mod pipeline;
pub mod writer;

pub use document::{DocumentAssembler, RenderedDocument, mrz_for, mrz_layout, template_context};
pub use identity::{IdentityFaker, bothify};
pub use pipeline::DatasetGenerator;
pub use writer::{DatasetSummary, DatasetWriter, MetadataRow};

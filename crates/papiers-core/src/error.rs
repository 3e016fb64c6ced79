// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Papiers.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Papiers operations.
#[derive(Debug, Error)]
pub enum PapiersError {
    // -- MRZ errors --
    #[error("invalid MRZ field {field}: {reason}")]
    InvalidMrzField { field: &'static str, reason: String },

    // -- Rendering errors --
    #[error("template error: {0}")]
    Template(String),

    #[error("SVG rendering failed: {0}")]
    Render(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("no photos found in {}", dir.display())]
    EmptyPhotoLibrary { dir: PathBuf },

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Dataset integrity --
    #[error("integrity check failed for {file}: expected {expected}, got {actual}")]
    IntegrityMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PapiersError>;

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dataset writer: images, JSON Lines metadata, and the run summary, laid
// out as an `imagefolder` dataset:
//
//   <out>/images/<kind>_<COUNTRY>_<number>_<index>.png
//   <out>/metadata.jsonl
//   <out>/summary.json

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use papiers_core::error::Result;
use papiers_core::{Country, DocumentKind, IdentityRecord};
use papiers_mrz::MrzFormat;
use papiers_render::ImageProcessor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::document::RenderedDocument;
use crate::integrity::{hash_bytes, verify_file};

pub const IMAGES_DIR: &str = "images";
pub const METADATA_FILE: &str = "metadata.jsonl";
pub const SUMMARY_FILE: &str = "summary.json";

/// One line of `metadata.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRow {
    /// Image path relative to the dataset root, with `/` separators.
    pub file_name: String,
    #[serde(flatten)]
    pub record: IdentityRecord,
    pub mrz_format: MrzFormat,
    pub mrz: Vec<String>,
    /// SHA-256 of the PNG file, lowercase hex.
    pub sha256: String,
}

/// Contents of `summary.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub written: usize,
    pub failures: usize,
    pub by_kind: BTreeMap<DocumentKind, usize>,
    pub by_country: BTreeMap<Country, usize>,
    pub seed: Option<u64>,
    pub reference_date: NaiveDate,
}

impl DatasetSummary {
    fn new(seed: Option<u64>, reference_date: NaiveDate) -> Self {
        Self {
            written: 0,
            failures: 0,
            by_kind: BTreeMap::new(),
            by_country: BTreeMap::new(),
            seed,
            reference_date,
        }
    }
}

/// Streams documents into a dataset directory.
pub struct DatasetWriter {
    root: PathBuf,
    metadata: BufWriter<File>,
    summary: DatasetSummary,
}

impl DatasetWriter {
    /// Create `root/images/` and start a fresh `metadata.jsonl`.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn create(root: impl AsRef<Path>, seed: Option<u64>, reference_date: NaiveDate) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(IMAGES_DIR))?;
        let metadata = BufWriter::new(File::create(root.join(METADATA_FILE))?);
        info!("Dataset directory ready");
        Ok(Self {
            root,
            metadata,
            summary: DatasetSummary::new(seed, reference_date),
        })
    }

    /// Encode `document` as PNG, write it under `images/`, and append its
    /// metadata row.
    pub fn write(&mut self, record: &IdentityRecord, document: RenderedDocument) -> Result<MetadataRow> {
        let file_name = format!(
            "{IMAGES_DIR}/{}_{}_{}_{:05}.png",
            record.kind.slug(),
            record.country.alpha3(),
            file_safe(&record.document_number),
            self.summary.written
        );

        let png = ImageProcessor::from_rgba(document.image).to_png_bytes()?;
        let row = MetadataRow {
            file_name,
            record: record.clone(),
            mrz_format: document.mrz.format,
            mrz: document.mrz.lines,
            sha256: hash_bytes(&png),
        };
        let mut line = serde_json::to_vec(&row)?;
        line.push(b'\n');

        commit_entry(&self.root.join(&row.file_name), &png, &line, &mut self.metadata)?;

        self.summary.written += 1;
        *self.summary.by_kind.entry(record.kind).or_default() += 1;
        *self.summary.by_country.entry(record.country).or_default() += 1;
        debug!(file = %row.file_name, "Document written");
        Ok(row)
    }

    /// Count a record that could not be produced.
    pub fn record_failure(&mut self) {
        self.summary.failures += 1;
    }

    /// Flush the metadata and write `summary.json`.
    pub fn finish(mut self) -> Result<DatasetSummary> {
        self.metadata.flush()?;
        let json = serde_json::to_string_pretty(&self.summary)?;
        fs::write(self.root.join(SUMMARY_FILE), json)?;
        info!(
            written = self.summary.written,
            failures = self.summary.failures,
            "Dataset finished"
        );
        Ok(self.summary)
    }

    /// Read back the metadata rows of the dataset at `root`.
    pub fn read_metadata(root: impl AsRef<Path>) -> Result<Vec<MetadataRow>> {
        let file = File::open(root.as_ref().join(METADATA_FILE))?;
        let mut rows = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push(serde_json::from_str(&line)?);
        }
        Ok(rows)
    }

    /// Re-hash every image listed in the metadata. Returns the number of
    /// images checked, or the first mismatch.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn verify(root: impl AsRef<Path>) -> Result<usize> {
        let root = root.as_ref();
        let rows = Self::read_metadata(root)?;
        for row in &rows {
            verify_file(root.join(&row.file_name), &row.file_name, &row.sha256)?;
        }
        info!(images = rows.len(), "Dataset verified");
        Ok(rows.len())
    }
}

/// Write the image, then append its metadata line. An image whose row could
/// not be appended is removed again so every image on disk has a row.
fn commit_entry(path: &Path, png: &[u8], line: &[u8], metadata: &mut impl Write) -> Result<()> {
    fs::write(path, png)?;
    if let Err(err) = metadata.write_all(line) {
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "Orphan image left behind");
        }
        return Err(err.into());
    }
    Ok(())
}

/// Keep only ASCII alphanumerics so the number is safe in a file name.
fn file_safe(number: &str) -> String {
    number.chars().filter(char::is_ascii_alphanumeric).collect()
}

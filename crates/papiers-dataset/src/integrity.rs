// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dataset integrity: SHA-256 fingerprints of every written image.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use papiers_core::error::{PapiersError, Result};
use sha2::{Digest, Sha256};

/// SHA-256 of `data` as lowercase hex. Recorded in each metadata row.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// SHA-256 of a file's contents, streamed rather than read into memory.
pub fn hash_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
        PapiersError::Io(io::Error::new(err.kind(), format!("{}: {err}", path.display())))
    })?;
    let mut hasher = Sha256::new();
    io::copy(&mut BufReader::new(file), &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Compare a computed digest with the recorded one (hex, any case).
///
/// `file` only labels the error.
pub fn check_digest(file: &str, actual: String, expected_hex: &str) -> Result<()> {
    if actual.eq_ignore_ascii_case(expected_hex) {
        Ok(())
    } else {
        Err(PapiersError::IntegrityMismatch {
            file: file.to_owned(),
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}

/// Hash the file at `path` and compare it with `expected_hex`.
pub fn verify_file(path: impl AsRef<Path>, file: &str, expected_hex: &str) -> Result<()> {
    check_digest(file, hash_file(path)?, expected_hex)
}

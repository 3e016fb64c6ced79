// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// papiers-mrz: Machine-readable zone support for the Papiers generator.
//
// Provides the name-field normalizer that fits a surname and given names into
// the MRZ name budget, ICAO 9303 check digits, field encoding (filler padding
// and Latin transliteration), and TD1/TD3/MRVA line generation.

pub mod check;
pub mod code;
pub mod field;
pub mod normalize;

pub use check::check_digit;
pub use code::{MrzCode, MrzFields, MrzFormat};
pub use normalize::{DEFAULT_NAME_BUDGET, MrzNames, normalize};

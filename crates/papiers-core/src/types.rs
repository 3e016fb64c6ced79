// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Papiers document generator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a generated identity record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Build a v4-shaped identifier from caller-supplied random bytes, so a
    /// seeded run produces the same identifiers every time.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issuing country of a synthetic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    Benin,
    IvoryCoast,
}

impl Country {
    pub const ALL: [Self; 2] = [Self::Benin, Self::IvoryCoast];

    /// ISO 3166-1 alpha-3 code, as used in the MRZ.
    pub fn alpha3(&self) -> &'static str {
        match self {
            Self::Benin => "BEN",
            Self::IvoryCoast => "CIV",
        }
    }

    /// Prefix used for template file names (`bj_passport.svg`, ...).
    pub fn template_prefix(&self) -> &'static str {
        match self {
            Self::Benin => "bj",
            Self::IvoryCoast => "ci",
        }
    }

    /// Parse an alpha-3 code or the ccTLD-style prefix, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "ben" | "bj" => Some(Self::Benin),
            "civ" | "ci" => Some(Self::IvoryCoast),
            _ => None,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alpha3())
    }
}

/// Kind of identity document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Passport,
    IdCard,
}

impl DocumentKind {
    pub const ALL: [Self; 2] = [Self::Passport, Self::IdCard];

    /// Short name used in file names and templates.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Passport => "passport",
            Self::IdCard => "idcard",
        }
    }

    /// Sides rendered for this kind, in stacking order.
    pub fn sides(&self) -> &'static [Side] {
        match self {
            Self::Passport => &[Side::Single],
            Self::IdCard => &[Side::Front, Side::Back],
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One rendered face of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Passport data page.
    Single,
    Front,
    Back,
}

impl Side {
    /// Suffix appended to the template file stem (empty for single-sided documents).
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Front => "_front",
            Self::Back => "_back",
        }
    }
}

/// Sex marker as printed in the MRZ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "X")]
    Unspecified,
}

impl Sex {
    /// MRZ sex character (`<` for unspecified).
    pub fn mrz_char(&self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Unspecified => '<',
        }
    }

    /// Letter printed in the visual zone.
    pub fn display_char(&self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Unspecified => 'X',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Self::Male),
            'F' => Some(Self::Female),
            'X' | '<' => Some(Self::Unspecified),
            _ => None,
        }
    }
}

/// One synthetic person plus the document data issued to them.
///
/// Produced once per document by the identity faker and never mutated
/// afterwards; only its metadata row outlives rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: RecordId,
    pub country: Country,
    pub kind: DocumentKind,
    pub surname: String,
    pub given_names: String,
    /// Given names followed by the surname.
    pub full_name: String,
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub place_of_birth: String,
    pub residence: String,
    pub document_number: String,
    /// National personal number (NPI on Beninese cards), when the document carries one.
    pub personal_number: Option<String>,
    /// Height in metres (passports only).
    pub height_m: Option<f32>,
    pub issue_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

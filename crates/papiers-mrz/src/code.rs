// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MRZ line generation for TD1 (ID-1 cards), TD3 (passports), and MRV-A
// (visa-sized) documents.

use chrono::NaiveDate;
use papiers_core::error::{PapiersError, Result};
use papiers_core::Sex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::check::check_digit;
use crate::field::{FILLER, encode_name, encode_text};
use crate::normalize::MrzNames;

/// Physical MRZ layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrzFormat {
    /// Three lines of 30 characters (ID-1 cards).
    Td1,
    /// Two lines of 44 characters (passport data pages).
    Td3,
    /// Two lines of 44 characters (MRV-A visas, also used on Beninese cards).
    Mrva,
}

impl MrzFormat {
    pub fn line_width(&self) -> usize {
        match self {
            Self::Td1 => 30,
            Self::Td3 | Self::Mrva => 44,
        }
    }

    pub fn line_count(&self) -> usize {
        match self {
            Self::Td1 => 3,
            Self::Td3 | Self::Mrva => 2,
        }
    }

    /// Characters available to the name field; this is the normalizer budget.
    pub fn name_width(&self) -> usize {
        match self {
            Self::Td1 => 30,
            Self::Td3 | Self::Mrva => 39,
        }
    }

    /// Width of the first optional-data field.
    fn optional_width(&self) -> usize {
        match self {
            Self::Td1 => 15,
            Self::Td3 => 14,
            Self::Mrva => 16,
        }
    }
}

/// Everything printed in the MRZ, before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MrzFields {
    /// Document code, e.g. `P`, `V`, `ID`.
    pub document_code: String,
    /// Issuing state, ISO 3166-1 alpha-3.
    pub issuing_state: String,
    /// Normalized name fields.
    pub names: MrzNames,
    pub document_number: String,
    /// Holder nationality, ISO 3166-1 alpha-3.
    pub nationality: String,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub expiry_date: NaiveDate,
    /// Optional data (personal number on TD3, line 1 optional data on TD1).
    pub optional_data: String,
    /// Line 2 optional data (TD1 only).
    pub optional_data_2: String,
}

/// Encoded MRZ lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzCode {
    pub format: MrzFormat,
    pub lines: Vec<String>,
}

impl MrzCode {
    /// Validate `fields` and encode them in `format`.
    pub fn generate(format: MrzFormat, fields: &MrzFields) -> Result<Self> {
        validate(format, fields)?;

        let lines = match format {
            MrzFormat::Td3 => two_line(format, fields, true),
            MrzFormat::Mrva => two_line(format, fields, false),
            MrzFormat::Td1 => td1(fields),
        };
        debug!(?format, document = %fields.document_number, "MRZ generated");
        Ok(Self { format, lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line `index`, or an empty string when the format has fewer lines.
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }

    /// Recompute every check digit and compare with the encoded lines.
    pub fn check_digits_valid(&self) -> bool {
        let width = self.format.line_width();
        if self.lines.len() != self.format.line_count()
            || self.lines.iter().any(|l| l.len() != width || !l.is_ascii())
        {
            return false;
        }
        match self.format {
            MrzFormat::Td3 | MrzFormat::Mrva => {
                let l2 = self.lines[1].as_str();
                let digits_ok = digit_ok(&l2[0..9], &l2[9..10])
                    && digit_ok(&l2[13..19], &l2[19..20])
                    && digit_ok(&l2[21..27], &l2[27..28]);
                if self.format == MrzFormat::Mrva {
                    return digits_ok;
                }
                let optional_ok = if l2[28..43].chars().all(|c| c == FILLER) {
                    true
                } else {
                    digit_ok(&l2[28..42], &l2[42..43])
                };
                let composite = format!("{}{}{}", &l2[0..10], &l2[13..20], &l2[21..43]);
                digits_ok && optional_ok && digit_ok(&composite, &l2[43..44])
            }
            MrzFormat::Td1 => {
                let (l1, l2) = (self.lines[0].as_str(), self.lines[1].as_str());
                let composite =
                    format!("{}{}{}{}", &l1[5..30], &l2[0..7], &l2[8..15], &l2[18..29]);
                digit_ok(&l1[5..14], &l1[14..15])
                    && digit_ok(&l2[0..6], &l2[6..7])
                    && digit_ok(&l2[8..14], &l2[14..15])
                    && digit_ok(&composite, &l2[29..30])
            }
        }
    }
}

impl std::fmt::Display for MrzCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn digit_ok(field: &str, digit: &str) -> bool {
    digit.chars().next() == Some(check_digit(field))
}

fn validate(format: MrzFormat, fields: &MrzFields) -> Result<()> {
    let code = fields.document_code.trim();
    if code.is_empty() || code.chars().count() > 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PapiersError::InvalidMrzField {
            field: "document_code",
            reason: format!("expected one or two letters, got {:?}", fields.document_code),
        });
    }
    check_state("issuing_state", &fields.issuing_state)?;
    check_state("nationality", &fields.nationality)?;

    let number = fields.document_number.trim();
    if number.is_empty() || number.chars().count() > 9 {
        return Err(PapiersError::InvalidMrzField {
            field: "document_number",
            reason: format!("expected 1 to 9 characters, got {:?}", fields.document_number),
        });
    }

    let optional_width = format.optional_width();
    if fields.optional_data.chars().count() > optional_width {
        return Err(PapiersError::InvalidMrzField {
            field: "optional_data",
            reason: format!("longer than {optional_width} characters"),
        });
    }
    if fields.optional_data_2.chars().count() > 11 {
        return Err(PapiersError::InvalidMrzField {
            field: "optional_data_2",
            reason: "longer than 11 characters".into(),
        });
    }
    Ok(())
}

fn check_state(field: &'static str, code: &str) -> Result<()> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic() || c == FILLER) {
        Ok(())
    } else {
        Err(PapiersError::InvalidMrzField {
            field,
            reason: format!("expected an alpha-3 code, got {code:?}"),
        })
    }
}

fn yymmdd(date: NaiveDate) -> String {
    date.format("%y%m%d").to_string()
}

/// Encoded document number, birth date and expiry date, each followed by its
/// check digit.
struct CheckedFields {
    number: String,
    birth: String,
    expiry: String,
}

impl CheckedFields {
    fn new(fields: &MrzFields) -> Self {
        let with_digit = |value: String| {
            let digit = check_digit(&value);
            format!("{value}{digit}")
        };
        Self {
            number: with_digit(encode_text(fields.document_number.trim(), 9)),
            birth: with_digit(yymmdd(fields.birth_date)),
            expiry: with_digit(yymmdd(fields.expiry_date)),
        }
    }
}

fn two_line(format: MrzFormat, fields: &MrzFields, composite: bool) -> Vec<String> {
    let line1 = format!(
        "{}{}{}",
        encode_text(fields.document_code.trim(), 2),
        encode_text(&fields.issuing_state, 3),
        encode_name(&fields.names, format.name_width()),
    );

    let checked = CheckedFields::new(fields);
    let optional = encode_text(&fields.optional_data, format.optional_width());
    let mut line2 = format!(
        "{}{}{}{}{}",
        checked.number,
        encode_text(&fields.nationality, 3),
        checked.birth,
        fields.sex.mrz_char(),
        checked.expiry,
    );

    if composite {
        let optional_digit = if optional.chars().all(|c| c == FILLER) {
            FILLER
        } else {
            check_digit(&optional)
        };
        let optional = format!("{optional}{optional_digit}");
        let composite_digit = check_digit(&format!(
            "{}{}{}{}",
            checked.number, checked.birth, checked.expiry, optional
        ));
        line2.push_str(&optional);
        line2.push(composite_digit);
    } else {
        line2.push_str(&optional);
    }

    vec![line1, line2]
}

fn td1(fields: &MrzFields) -> Vec<String> {
    let checked = CheckedFields::new(fields);
    let optional_1 = encode_text(&fields.optional_data, 15);
    let optional_2 = encode_text(&fields.optional_data_2, 11);

    let line1 = format!(
        "{}{}{}{}",
        encode_text(fields.document_code.trim(), 2),
        encode_text(&fields.issuing_state, 3),
        checked.number,
        optional_1,
    );
    let composite_digit = check_digit(&format!(
        "{}{}{}{}{}",
        checked.number, optional_1, checked.birth, checked.expiry, optional_2
    ));
    let line2 = format!(
        "{}{}{}{}{}{}",
        checked.birth,
        fields.sex.mrz_char(),
        checked.expiry,
        encode_text(&fields.nationality, 3),
        optional_2,
        composite_digit,
    );
    let line3 = encode_name(&fields.names, MrzFormat::Td1.name_width());

    vec![line1, line2, line3]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn specimen(code: &str, number: &str, nationality: &str, optional: &str) -> MrzFields {
        MrzFields {
            document_code: code.into(),
            issuing_state: "UTO".into(),
            names: normalize("Eriksson", "Anna Maria Eriksson", 39),
            document_number: number.into(),
            nationality: nationality.into(),
            birth_date: date(1974, 8, 12),
            sex: Sex::Female,
            expiry_date: date(2012, 4, 15),
            optional_data: optional.into(),
            optional_data_2: String::new(),
        }
    }

    #[test]
    fn td3_matches_icao_specimen() {
        let fields = specimen("P", "L898902C3", "UTO", "ZE184226B");
        let code = MrzCode::generate(MrzFormat::Td3, &fields).unwrap();
        assert_eq!(code.line(0), "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<");
        assert_eq!(code.line(1), "L898902C36UTO7408122F1204159ZE184226B<<<<<10");
        assert!(code.check_digits_valid());
    }

    #[test]
    fn mrva_matches_icao_specimen() {
        let mut fields = specimen("V", "L8988901C", "XXX", "6ZE184226B");
        fields.birth_date = date(1940, 9, 7);
        fields.expiry_date = date(1996, 12, 10);
        let code = MrzCode::generate(MrzFormat::Mrva, &fields).unwrap();
        assert_eq!(code.line(0), "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<");
        assert_eq!(code.line(1), "L8988901C4XXX4009078F96121096ZE184226B<<<<<<");
        assert!(code.check_digits_valid());
    }

    #[test]
    fn td1_matches_icao_specimen() {
        let mut fields = specimen("I", "D23145890", "UTO", "");
        fields.names = normalize("Eriksson", "Anna Maria Eriksson", 30);
        let code = MrzCode::generate(MrzFormat::Td1, &fields).unwrap();
        assert_eq!(code.line(0), "I<UTOD231458907<<<<<<<<<<<<<<<");
        assert_eq!(code.line(1), "7408122F1204159UTO<<<<<<<<<<<6");
        assert_eq!(code.line(2), "ERIKSSON<<ANNA<MARIA<<<<<<<<<<");
        assert!(code.check_digits_valid());
    }

    #[test]
    fn empty_optional_data_uses_filler_check_digit() {
        let fields = specimen("P", "12AB34567", "BEN", "");
        let code = MrzCode::generate(MrzFormat::Td3, &fields).unwrap();
        assert_eq!(&code.line(1)[28..43], "<<<<<<<<<<<<<<<");
        assert!(code.check_digits_valid());
    }

    #[test]
    fn every_line_has_format_width() {
        for format in [MrzFormat::Td1, MrzFormat::Td3, MrzFormat::Mrva] {
            let mut fields = specimen("ID", "CI1234567", "CIV", "");
            fields.names = normalize(
                "Ahouandjinou-Hounkpatin",
                "Marie-Claire Eyram Sɛnan Ahouandjinou-Hounkpatin",
                format.name_width(),
            );
            let code = MrzCode::generate(format, &fields).unwrap();
            assert_eq!(code.lines().len(), format.line_count());
            for line in code.lines() {
                assert_eq!(line.len(), format.line_width(), "{line}");
                assert!(line.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '<'));
            }
        }
    }

    #[test]
    fn tampered_line_fails_verification() {
        let fields = specimen("P", "L898902C3", "UTO", "ZE184226B");
        let mut code = MrzCode::generate(MrzFormat::Td3, &fields).unwrap();
        code.lines[1].replace_range(0..1, "M");
        assert!(!code.check_digits_valid());
    }

    #[test]
    fn rejects_long_document_number() {
        let fields = specimen("P", "1234567890", "BEN", "");
        let err = MrzCode::generate(MrzFormat::Td3, &fields).unwrap_err();
        assert!(matches!(
            err,
            PapiersError::InvalidMrzField { field: "document_number", .. }
        ));
    }

    #[test]
    fn rejects_bad_country_code() {
        let mut fields = specimen("P", "L898902C3", "UTO", "");
        fields.issuing_state = "BJ".into();
        assert!(MrzCode::generate(MrzFormat::Td3, &fields).is_err());
    }

    #[test]
    fn rejects_long_optional_data() {
        let fields = specimen("P", "L898902C3", "UTO", "ABCDEFGHIJKLMNO");
        assert!(MrzCode::generate(MrzFormat::Td3, &fields).is_err());
        assert!(MrzCode::generate(MrzFormat::Td1, &fields).is_ok());
    }

    #[test]
    fn display_joins_lines() {
        let fields = specimen("P", "L898902C3", "UTO", "ZE184226B");
        let code = MrzCode::generate(MrzFormat::Td3, &fields).unwrap();
        assert_eq!(code.to_string(), code.lines().join("\n"));
        assert_eq!(code.line(5), "");
    }
}

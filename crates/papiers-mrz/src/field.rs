// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MRZ field encoding: filler padding, truncation, and Latin transliteration.

use crate::normalize::MrzNames;

/// The MRZ filler character.
pub const FILLER: char = '<';

/// Encode a free-form field: uppercase, anything outside `A-Z0-9` becomes a
/// filler, then pad or truncate to `width`.
pub fn encode_text(value: &str, width: usize) -> String {
    let encoded: String = value
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .map(|c| if c.is_ascii_alphanumeric() { c } else { FILLER })
        .collect();
    fit(encoded, width)
}

/// Encode the name field as `SURNAME<<GIVEN<NAMES`, transliterating letters
/// to `A-Z`, then pad or truncate to `width`.
///
/// Transliteration can lengthen a name (`Ü` to `UE`, `ß` to `SS`), so the
/// surname-first split is applied again to the encoded parts: the surname
/// keeps at most half of the budget left after the separator and the given
/// names take the rest. With no surname the field starts directly with the
/// given names, which is how ICAO encodes single-name holders.
pub fn encode_name(names: &MrzNames, width: usize) -> String {
    let mut surname = encode_name_part(&names.surname);
    let mut given = encode_name_part(&names.given_names);

    if surname.is_empty() || given.is_empty() {
        surname.push_str(&given);
        return fit(surname, width);
    }

    if surname.len() + given.len() + 2 > width {
        let budget = width.saturating_sub(2);
        let surname_budget = surname.len().min(budget / 2);
        surname.truncate(surname_budget);
        given.truncate(budget - surname_budget);
    }

    let mut field = String::with_capacity(width);
    field.push_str(&surname);
    field.push(FILLER);
    field.push(FILLER);
    field.push_str(&given);
    fit(field, width)
}

/// Transliterate one name part; spaces, hyphens and letters with no ICAO
/// transliteration become fillers. The result is always ASCII.
fn encode_name_part(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.trim().chars() {
        if c.is_ascii_alphabetic() {
            out.push(c.to_ascii_uppercase());
        } else if let Some(latin) = transliterate(c) {
            out.push_str(latin);
        } else {
            out.push(FILLER);
        }
    }
    out
}

/// ICAO 9303 Part 3 recommended transliteration of a non-ASCII Latin letter.
pub fn transliterate(c: char) -> Option<&'static str> {
    let upper = c.to_uppercase().next().unwrap_or(c);
    let latin = match upper {
        'À' | 'Á' | 'Â' | 'Ã' | 'Ā' | 'Ă' | 'Ą' | 'Ạ' => "A",
        'Ä' | 'Æ' => "AE",
        'Å' => "AA",
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => "C",
        'Ð' | 'Ď' | 'Đ' | 'Ɖ' => "D",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' | 'Ẹ' | 'Ɛ' => "E",
        'Ĝ' | 'Ğ' | 'Ġ' | 'Ģ' => "G",
        'Ĥ' | 'Ħ' => "H",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' | 'Ị' => "I",
        'Ĳ' => "IJ",
        'Ĵ' => "J",
        'Ķ' => "K",
        'Ĺ' | 'Ļ' | 'Ľ' | 'Ŀ' | 'Ł' => "L",
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' | 'Ǹ' | 'Ŋ' => "N",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ō' | 'Ŏ' | 'Ő' | 'Ọ' | 'Ɔ' => "O",
        'Ö' | 'Ø' | 'Œ' => "OE",
        'Ŕ' | 'Ŗ' | 'Ř' => "R",
        'Ś' | 'Ŝ' | 'Ş' | 'Š' | 'Ṣ' => "S",
        'ẞ' => "SS",
        'Ţ' | 'Ť' | 'Ŧ' => "T",
        'Þ' => "TH",
        'Ù' | 'Ú' | 'Û' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' | 'Ụ' => "U",
        'Ü' => "UE",
        'Ŵ' => "W",
        'Ý' | 'Ÿ' | 'Ŷ' => "Y",
        'Ź' | 'Ż' | 'Ž' => "Z",
        _ => {
            // 'ß' uppercases to "SS", which `to_uppercase().next()` cuts short.
            if c == 'ß' {
                "SS"
            } else {
                return None;
            }
        }
    };
    Some(latin)
}

/// Pad with fillers or truncate to exactly `width` characters.
fn fit(mut value: String, width: usize) -> String {
    let len = value.chars().count();
    if len > width {
        value = value.chars().take(width).collect();
    } else {
        value.extend(std::iter::repeat_n(FILLER, width - len));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(surname: &str, given: &str) -> MrzNames {
        MrzNames {
            surname: surname.into(),
            given_names: given.into(),
        }
    }

    #[test]
    fn text_fields_are_padded_and_uppercased() {
        assert_eq!(encode_text("12ab345", 9), "12AB345<<");
        assert_eq!(encode_text("ZE 184-226", 12), "ZE<184<226<<");
    }

    #[test]
    fn text_fields_are_truncated() {
        assert_eq!(encode_text("ABCDEFGHIJK", 9), "ABCDEFGHI");
    }

    #[test]
    fn icao_specimen_name() {
        let field = encode_name(&names("Eriksson", "Anna Maria"), 39);
        assert_eq!(field, "ERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<");
    }

    #[test]
    fn hyphens_become_fillers() {
        let field = encode_name(&names("Gbaguidi-Zinsou", "Jean-Baptiste"), 30);
        assert_eq!(field, "GBAGUIDI<ZINSOU<<JEAN<BAPTISTE");
        let field = encode_name(&names("Gbaguidi-Zinsou", "Jean-Baptiste"), 25);
        assert_eq!(field, "GBAGUIDI<ZI<<JEAN<BAPTIST");
    }

    #[test]
    fn accented_letters_are_transliterated() {
        let field = encode_name(&names("Houngbédji", "Sɛnan Ọlá"), 39);
        assert!(field.starts_with("HOUNGBEDJI<<SENAN<OLA<"));
        let field = encode_name(&names("Müller", "Jörg"), 20);
        assert_eq!(field, "MUELLER<<JOERG<<<<<<");
    }

    #[test]
    fn sharp_s_expands() {
        assert_eq!(transliterate('ß'), Some("SS"));
        assert_eq!(transliterate('é'), Some("E"));
        assert_eq!(transliterate('Ж'), None);
    }

    #[test]
    fn untransliterable_letters_become_fillers() {
        let field = encode_name(&names("Жуков", ""), 10);
        assert_eq!(field, "<<<<<<<<<<");
    }

    #[test]
    fn given_names_only() {
        let field = encode_name(&names("", "Jean Dupont"), 15);
        assert_eq!(field, "JEAN<DUPONT<<<<");
    }

    #[test]
    fn expanded_surname_keeps_separator_and_given_names() {
        let normalized = crate::normalize("Müllerßöäü", "Jean Müllerßöäü", 16);
        assert_eq!(normalized.encoded_len(), 16);
        let field = encode_name(&normalized, 16);
        assert_eq!(field, "MUELLER<<JEAN<<<");
    }

    #[test]
    fn expanded_names_split_budget_like_the_normalizer() {
        let field = encode_name(&names("Öäü", "Ääää Öööö"), 12);
        assert_eq!(field.len(), 12);
        assert_eq!(field, "OEAEU<<AEAEA");
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ICAO 9303 check digits (Part 3, section 4.9).

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Numeric value of an MRZ character: digits are themselves, `A`-`Z` map to
/// 10-35, and the filler `<` (or anything else) counts as zero.
pub fn char_value(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A'..='Z' => c as u32 - 'A' as u32 + 10,
        _ => 0,
    }
}

/// Compute the check digit of an encoded MRZ field.
pub fn check_digit(field: &str) -> char {
    let sum: u32 = field
        .chars()
        .zip(WEIGHTS.iter().cycle())
        .map(|(c, weight)| char_value(c) * weight)
        .sum();
    char::from_digit(sum % 10, 10).unwrap_or('0')
}

/// Whether `digit` is the correct check digit for `field`.
pub fn verify(field: &str, digit: char) -> bool {
    check_digit(field) == digit
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Identity faker: draws one synthetic person and their document data from
// the locale tables, using only the RNG it is handed.

use chrono::{Datelike, Days, Months, NaiveDate};
use papiers_core::{Country, DocumentKind, GeneratorConfig, IdentityRecord, RecordId, Sex};
use papiers_mrz::normalize::sanitize;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::locale::Locale;

/// Draws identity records relative to a fixed reference date.
#[derive(Debug, Clone)]
pub struct IdentityFaker {
    reference_date: NaiveDate,
    min_age: u32,
    max_age: u32,
    validity_years: u32,
}

impl IdentityFaker {
    /// `reference_date` plays the role of "today" for ages, issue, and expiry.
    pub fn new(reference_date: NaiveDate, min_age: u32, max_age: u32, validity_years: u32) -> Self {
        Self {
            reference_date,
            min_age: min_age.min(max_age),
            max_age: max_age.max(min_age),
            validity_years,
        }
    }

    pub fn from_config(config: &GeneratorConfig, reference_date: NaiveDate) -> Self {
        Self::new(
            reference_date,
            config.min_age,
            config.max_age,
            config.validity_years,
        )
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Draw one identity for a document of `kind` issued by `country`.
    pub fn generate<R: Rng>(&self, country: Country, kind: DocumentKind, rng: &mut R) -> IdentityRecord {
        let locale = Locale::for_country(country);

        let mut id_bytes = [0u8; 16];
        rng.fill(&mut id_bytes);

        let sex = if rng.gen_bool(0.5) { Sex::Male } else { Sex::Female };
        let surname = pick(locale.surnames, rng).to_owned();

        // Some names are both given names and surnames. A given name
        // containing the surname would absorb the substring removal that
        // recovers the given names from the full name.
        let surname_key = sanitize(&surname);
        let candidates: Vec<&str> = locale
            .given_names(sex)
            .iter()
            .copied()
            .filter(|name| surname_key.is_empty() || !sanitize(name).contains(&surname_key))
            .collect();
        let given_count = rng.gen_range(1..=3);
        let given_names = candidates
            .choose_multiple(rng, given_count)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let full_name = format!("{given_names} {surname}");

        let place_of_birth = pick(locale.cities, rng).to_owned();
        let residence = pick(locale.cities, rng).to_owned();

        let (document_number, personal_number) = document_numbers(country, kind, rng);
        let height_m = match kind {
            DocumentKind::Passport => Some((rng.gen_range(1.50f32..=2.00) * 100.0).round() / 100.0),
            DocumentKind::IdCard => None,
        };

        IdentityRecord {
            id: RecordId::from_random_bytes(id_bytes),
            country,
            kind,
            surname,
            given_names,
            full_name,
            sex,
            birth_date: self.birth_date(rng),
            place_of_birth,
            residence,
            document_number,
            personal_number,
            height_m,
            issue_date: self.issue_date(rng),
            expiry_date: self.expiry_date(rng),
        }
    }

    /// Birth date such that the holder's age at the reference date lies in
    /// `min_age..=max_age`.
    fn birth_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let latest = years_before(self.reference_date, self.min_age);
        let earliest = years_before(self.reference_date, self.max_age + 1)
            .checked_add_days(Days::new(1))
            .unwrap_or(latest);
        random_date(rng, earliest, latest)
    }

    /// Expiry between the reference date and `validity_years` later.
    fn expiry_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let latest = self
            .reference_date
            .checked_add_months(Months::new(12 * self.validity_years))
            .unwrap_or(self.reference_date);
        random_date(rng, self.reference_date, latest)
    }

    /// Issue date within the current decade, not after the reference date.
    fn issue_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let decade = self.reference_date.year() - self.reference_date.year().rem_euclid(10);
        let start = NaiveDate::from_ymd_opt(decade, 1, 1).unwrap_or(self.reference_date);
        random_date(rng, start, self.reference_date)
    }
}

fn pick<'a, R: Rng>(items: &'a [&'static str], rng: &mut R) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(12 * years))
        .unwrap_or(NaiveDate::MIN)
}

/// Uniform date in `start..=end`; `start` when the range is empty.
fn random_date<R: Rng>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    let offset = rng.gen_range(0..=span) as u64;
    start.checked_add_days(Days::new(offset)).unwrap_or(end)
}

/// Document number and optional personal number for each document type.
fn document_numbers<R: Rng>(country: Country, kind: DocumentKind, rng: &mut R) -> (String, Option<String>) {
    match (country, kind) {
        (Country::Benin, DocumentKind::Passport) => (bothify("##??#####", rng), None),
        (Country::Benin, DocumentKind::IdCard) => {
            (bothify("#########", rng), Some(bothify("#########", rng)))
        }
        (Country::IvoryCoast, DocumentKind::Passport) => (bothify("??#######", rng), None),
        (Country::IvoryCoast, DocumentKind::IdCard) => {
            (bothify("CI#######", rng), Some(bothify("###########", rng)))
        }
    }
}

/// Replace `#` with a random digit and `?` with a random uppercase letter;
/// other characters are copied through.
pub fn bothify<R: Rng>(mask: &str, rng: &mut R) -> String {
    mask.chars()
        .map(|c| match c {
            '#' => char::from(b'0' + rng.gen_range(0..10u8)),
            '?' => char::from(b'A' + rng.gen_range(0..26u8)),
            other => other,
        })
        .collect()
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// MRZ name-field normalizer.
//
// Fits a surname and the given names derived from a full name into the MRZ
// name budget. "Alphabetic" means `char::is_alphabetic` (the Unicode
// `Alphabetic` property): precomposed accented letters survive here and are
// folded to A-Z later by the field encoder, while combining marks are dropped.

use serde::{Deserialize, Serialize};

/// Name budget of a TD3/MRVA line: the 44-character line minus the
/// document code and issuing state.
pub const DEFAULT_NAME_BUDGET: usize = 39;

/// Width of the `<<` separator between surname and given names.
const SEPARATOR_LEN: usize = 2;

/// Surname and given-names fields ready for MRZ encoding.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MrzNames {
    pub surname: String,
    pub given_names: String,
}

impl MrzNames {
    /// Characters occupied once the two fields are joined by the separator.
    pub fn encoded_len(&self) -> usize {
        self.surname.chars().count() + self.given_names.chars().count() + SEPARATOR_LEN
    }
}

/// Keep only alphabetic characters, spaces and hyphens.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic() || *c == ' ' || *c == '-')
        .collect()
}

/// Normalize `surname` and `full_name` into fields that fit `max_length`
/// once joined by the two-character separator.
///
/// Given names are the sanitized full name with the first verbatim
/// occurrence of the sanitized surname removed. When the pair is over budget
/// the surname keeps at most half of the budget and the given names take the
/// rest. Never fails; a budget below the separator width yields empty fields.
pub fn normalize(surname: &str, full_name: &str, max_length: usize) -> MrzNames {
    let surname = sanitize(surname);
    let full_name = sanitize(full_name);
    let given_names = full_name.replacen(surname.as_str(), "", 1).trim().to_owned();

    let surname_len = surname.chars().count();
    let given_len = given_names.chars().count();

    if surname_len + given_len + SEPARATOR_LEN <= max_length {
        return MrzNames {
            surname,
            given_names,
        };
    }

    let budget = max_length.saturating_sub(SEPARATOR_LEN);
    let surname_budget = surname_len.min(budget / 2);
    let surname_field: String = surname.chars().take(surname_budget).collect();
    let given_field: String = given_names.chars().take(budget - surname_budget).collect();

    MrzNames {
        surname: surname_field,
        given_names: given_field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apostrophes_are_dropped_and_surname_removed() {
        let names = normalize("O'Brien-Smith", "Jean O'Brien-Smith", 39);
        assert_eq!(names.surname, "OBrien-Smith");
        assert_eq!(names.given_names, "Jean");
        assert_eq!(names.encoded_len(), 18);
    }

    #[test]
    fn long_names_split_the_budget() {
        let surname = "A".repeat(30);
        let full_name = format!("{surname} {}", "B".repeat(20));
        let names = normalize(&surname, &full_name, 39);
        assert_eq!(names.surname, "A".repeat(18));
        assert_eq!(names.given_names, "B".repeat(19));
        assert_eq!(names.encoded_len(), 39);
    }

    #[test]
    fn empty_surname_keeps_full_name() {
        let names = normalize("", "Jean Dupont", 39);
        assert_eq!(names.surname, "");
        assert_eq!(names.given_names, "Jean Dupont");
    }

    #[test]
    fn surname_absent_from_full_name_is_not_removed() {
        let names = normalize("Adjovi", "Koffi Zinsou", 39);
        assert_eq!(names.given_names, "Koffi Zinsou");
    }

    #[test]
    fn removal_is_case_sensitive() {
        let names = normalize("dossou", "Aimé DOSSOU", 39);
        assert_eq!(names.given_names, "Aimé DOSSOU");
    }

    #[test]
    fn only_first_occurrence_is_removed() {
        let names = normalize("Yao", "Yao Kouassi Yao", 39);
        assert_eq!(names.given_names, "Kouassi Yao");
    }

    #[test]
    fn digits_and_punctuation_are_stripped() {
        assert_eq!(sanitize("N'Guessan, 2nd."), "NGuessan nd");
        assert_eq!(sanitize("Jean-Baptiste"), "Jean-Baptiste");
    }

    #[test]
    fn precomposed_accents_are_letters() {
        assert_eq!(sanitize("Houngbédji"), "Houngbédji");
        assert_eq!(sanitize("Sɛnan"), "Sɛnan");
    }

    #[test]
    fn combining_marks_are_dropped() {
        // "e" followed by U+0301 COMBINING ACUTE ACCENT.
        assert_eq!(sanitize("Ame\u{301}"), "Ame");
    }

    #[test]
    fn fully_invalid_input_yields_empty_fields() {
        let names = normalize("1234", "!!! 42", 39);
        assert_eq!(names, MrzNames::default());
    }

    #[test]
    fn tiny_budget_does_not_panic() {
        let names = normalize("Kouassi", "Aya Kouassi", 1);
        assert_eq!(names.surname, "");
        assert_eq!(names.given_names, "");
    }

    #[test]
    fn surname_shorter_than_half_budget_leaves_room_for_given_names() {
        let given = "C".repeat(40);
        let names = normalize("Bamba", &format!("{given} Bamba"), 39);
        assert_eq!(names.surname, "Bamba");
        assert_eq!(names.given_names, "C".repeat(32));
        assert_eq!(names.encoded_len(), 39);
    }

    #[test]
    fn td1_budget_is_honoured() {
        let names = normalize(
            "Ahouandjinou-Hounkpatin",
            "Marie-Claire Eyram Ahouandjinou-Hounkpatin",
            30,
        );
        assert_eq!(names.surname.chars().count(), 14);
        assert!(names.encoded_len() <= 30);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z' .,0-9-]{0,40}",
            "\\PC{0,40}",
            "[A-Za-zéèɛɔ]{1,12}( [A-Za-z]{1,12}){0,4}",
        ]
    }

    fn word_list() -> impl Strategy<Value = String> {
        "[A-Z][a-z]{0,14}( [A-Z][a-z]{0,14}){0,4}"
    }

    proptest! {
        /// Joined fields never exceed the budget.
        #[test]
        fn output_fits_budget(
            surname in any_name(),
            full_name in any_name(),
            max_length in 2usize..60,
        ) {
            let names = normalize(&surname, &full_name, max_length);
            prop_assert!(names.encoded_len() <= max_length);
        }

        /// Only letters, spaces and hyphens come out.
        #[test]
        fn output_uses_permitted_characters(
            surname in any_name(),
            full_name in any_name(),
        ) {
            let names = normalize(&surname, &full_name, DEFAULT_NAME_BUDGET);
            for c in names.surname.chars().chain(names.given_names.chars()) {
                prop_assert!(c.is_alphabetic() || c == ' ' || c == '-', "unexpected {c:?}");
            }
        }

        /// Pairs already within budget come back exactly as sanitized.
        #[test]
        fn in_budget_pairs_are_untouched(
            surname in any_name(),
            full_name in any_name(),
        ) {
            let clean_surname = sanitize(&surname);
            let given = sanitize(&full_name)
                .replacen(clean_surname.as_str(), "", 1)
                .trim()
                .to_owned();
            let fits = clean_surname.chars().count() + given.chars().count() + 2
                <= DEFAULT_NAME_BUDGET;
            let names = normalize(&surname, &full_name, DEFAULT_NAME_BUDGET);
            if fits {
                prop_assert_eq!(names.surname, clean_surname);
                prop_assert_eq!(names.given_names, given);
            }
        }

        /// Re-normalizing an output pair with the same surname is a no-op.
        #[test]
        fn normalizing_twice_is_idempotent(
            surname in "[A-Z][a-z]{0,29}",
            given in word_list(),
            max_length in 4usize..50,
        ) {
            let first = normalize(&surname, &format!("{given} {surname}"), max_length);
            prop_assume!(!first.surname.is_empty());
            prop_assume!(first.given_names.trim() == first.given_names);
            prop_assume!(!first.given_names.contains(first.surname.as_str()));

            let again = normalize(
                &first.surname,
                &format!("{} {}", first.surname, first.given_names),
                max_length,
            );
            prop_assert_eq!(again, first);
        }
    }
}

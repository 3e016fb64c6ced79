// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Template catalog: the compiled template of every document side, built
// once per run and passed by reference to the renderers.

use std::collections::BTreeMap;
use std::path::Path;

use papiers_core::error::{PapiersError, Result};
use papiers_core::{Country, DocumentKind, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::SvgTemplate;

/// Rectangle, in SVG user units, where the portrait is composited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSlot {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A compiled template and the portrait slot of its side, if any.
#[derive(Debug, Clone)]
pub struct TemplateEntry {
    pub template: SvgTemplate,
    pub photo_slot: Option<PhotoSlot>,
}

type Key = (Country, DocumentKind, Side);

const PASSPORT_SLOT: PhotoSlot = PhotoSlot {
    x: 40,
    y: 110,
    width: 220,
    height: 280,
};

const ID_CARD_SLOT: PhotoSlot = PhotoSlot {
    x: 30,
    y: 130,
    width: 200,
    height: 250,
};

/// Built-in templates, embedded at compile time.
const BUILTIN: [(Country, DocumentKind, Side, &str); 6] = [
    (
        Country::Benin,
        DocumentKind::Passport,
        Side::Single,
        include_str!("../../templates/bj_passport.svg"),
    ),
    (
        Country::Benin,
        DocumentKind::IdCard,
        Side::Front,
        include_str!("../../templates/bj_idcard_front.svg"),
    ),
    (
        Country::Benin,
        DocumentKind::IdCard,
        Side::Back,
        include_str!("../../templates/bj_idcard_back.svg"),
    ),
    (
        Country::IvoryCoast,
        DocumentKind::Passport,
        Side::Single,
        include_str!("../../templates/ci_passport.svg"),
    ),
    (
        Country::IvoryCoast,
        DocumentKind::IdCard,
        Side::Front,
        include_str!("../../templates/ci_idcard_front.svg"),
    ),
    (
        Country::IvoryCoast,
        DocumentKind::IdCard,
        Side::Back,
        include_str!("../../templates/ci_idcard_back.svg"),
    ),
];

/// File name of the template for one document side, e.g. `bj_idcard_front.svg`.
pub fn template_file_name(country: Country, kind: DocumentKind, side: Side) -> String {
    format!(
        "{}_{}{}.svg",
        country.template_prefix(),
        kind.slug(),
        side.file_suffix()
    )
}

fn default_slot(kind: DocumentKind, side: Side) -> Option<PhotoSlot> {
    match (kind, side) {
        (DocumentKind::Passport, Side::Single) => Some(PASSPORT_SLOT),
        (DocumentKind::IdCard, Side::Front) => Some(ID_CARD_SLOT),
        _ => None,
    }
}

/// Lookup table of compiled templates keyed by (country, kind, side).
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    entries: BTreeMap<Key, TemplateEntry>,
}

impl TemplateCatalog {
    /// Compile the built-in templates.
    pub fn builtin() -> Result<Self> {
        Self::load(None)
    }

    /// Compile the built-in templates, replacing any whose file name exists in
    /// `overrides`.
    #[instrument(skip_all, fields(overrides = ?overrides.map(Path::display)))]
    pub fn load(overrides: Option<&Path>) -> Result<Self> {
        if let Some(dir) = overrides {
            if !dir.is_dir() {
                return Err(PapiersError::Template(format!(
                    "templates directory {} does not exist",
                    dir.display()
                )));
            }
        }

        let mut entries = BTreeMap::new();
        let mut overridden = 0usize;
        for (country, kind, side, source) in BUILTIN {
            let name = template_file_name(country, kind, side);
            let custom = overrides.map(|dir| dir.join(&name)).filter(|p| p.is_file());

            let template = match custom {
                Some(path) => {
                    debug!(path = %path.display(), "using template override");
                    overridden += 1;
                    let source = std::fs::read_to_string(&path)?;
                    SvgTemplate::compile(name, &source)?
                }
                None => SvgTemplate::compile(name, source)?,
            };

            entries.insert(
                (country, kind, side),
                TemplateEntry {
                    template,
                    photo_slot: default_slot(kind, side),
                },
            );
        }

        info!(templates = entries.len(), overridden, "Template catalog compiled");
        Ok(Self { entries })
    }

    pub fn get(&self, country: Country, kind: DocumentKind, side: Side) -> Result<&TemplateEntry> {
        self.entries.get(&(country, kind, side)).ok_or_else(|| {
            PapiersError::Template(format!(
                "no template for {}",
                template_file_name(country, kind, side)
            ))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_document_side_has_a_template() {
        let catalog = TemplateCatalog::builtin().unwrap();
        for country in Country::ALL {
            for kind in DocumentKind::ALL {
                for side in kind.sides() {
                    assert!(catalog.get(country, kind, *side).is_ok());
                }
            }
        }
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn portrait_slot_only_on_photo_sides() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let back = catalog
            .get(Country::Benin, DocumentKind::IdCard, Side::Back)
            .unwrap();
        assert!(back.photo_slot.is_none());
        let front = catalog
            .get(Country::Benin, DocumentKind::IdCard, Side::Front)
            .unwrap();
        assert_eq!(front.photo_slot, Some(ID_CARD_SLOT));
    }

    #[test]
    fn mrz_placeholders_match_formats() {
        let catalog = TemplateCatalog::builtin().unwrap();
        let td1_back = catalog
            .get(Country::IvoryCoast, DocumentKind::IdCard, Side::Back)
            .unwrap();
        assert!(td1_back.template.placeholders().contains(&"MRZ_LINE3"));
        let passport = catalog
            .get(Country::Benin, DocumentKind::Passport, Side::Single)
            .unwrap();
        assert!(!passport.template.placeholders().contains(&"MRZ_LINE3"));
    }

    #[test]
    fn file_names_follow_convention() {
        assert_eq!(
            template_file_name(Country::Benin, DocumentKind::IdCard, Side::Front),
            "bj_idcard_front.svg"
        );
        assert_eq!(
            template_file_name(Country::IvoryCoast, DocumentKind::Passport, Side::Single),
            "ci_passport.svg"
        );
    }

    #[test]
    fn override_directory_replaces_one_template() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("bj_passport.svg"),
            "<svg xmlns=\"http://www.w3.org/2000/svg\"><text>{{ SURNAME }}</text></svg>",
        )
        .unwrap();

        let catalog = TemplateCatalog::load(Some(dir.path())).unwrap();
        let passport = catalog
            .get(Country::Benin, DocumentKind::Passport, Side::Single)
            .unwrap();
        assert_eq!(passport.template.placeholders(), vec!["SURNAME"]);

        let untouched = catalog
            .get(Country::IvoryCoast, DocumentKind::Passport, Side::Single)
            .unwrap();
        assert!(untouched.template.placeholders().contains(&"MRZ_LINE2"));
    }

    #[test]
    fn missing_override_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(TemplateCatalog::load(Some(&missing)).is_err());
    }
}

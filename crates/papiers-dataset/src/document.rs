// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly: identity record to MRZ code to rendered image.

use image::RgbaImage;
use papiers_core::error::Result;
use papiers_core::{Country, DocumentKind, IdentityRecord};
use papiers_mrz::{MrzCode, MrzFields, MrzFormat, normalize};
use papiers_render::{
    Augmenter, PhotoLibrary, SvgRasterizer, TemplateCatalog, TemplateContext, place_photo,
    stack_vertical,
};
use rand::Rng;
use tracing::{debug, instrument};

/// Date format of the visual inspection zone.
const DISPLAY_DATE: &str = "%d %m %Y";

/// A finished document image and the MRZ printed on it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub image: RgbaImage,
    pub mrz: MrzCode,
}

/// MRZ layout and document code for each issuing country and document kind.
pub fn mrz_layout(country: Country, kind: DocumentKind) -> (MrzFormat, &'static str) {
    match (country, kind) {
        (_, DocumentKind::Passport) => (MrzFormat::Td3, "P"),
        (Country::Benin, DocumentKind::IdCard) => (MrzFormat::Mrva, "V"),
        (Country::IvoryCoast, DocumentKind::IdCard) => (MrzFormat::Td1, "ID"),
    }
}

/// Build the MRZ code of `record`, normalizing its names into the name
/// width of the document's MRZ format.
pub fn mrz_for(record: &IdentityRecord) -> Result<MrzCode> {
    let (format, document_code) = mrz_layout(record.country, record.kind);
    let names = normalize(&record.surname, &record.full_name, format.name_width());

    let fields = MrzFields {
        document_code: document_code.to_owned(),
        issuing_state: record.country.alpha3().to_owned(),
        names,
        document_number: record.document_number.clone(),
        nationality: record.country.alpha3().to_owned(),
        birth_date: record.birth_date,
        sex: record.sex,
        expiry_date: record.expiry_date,
        optional_data: record.personal_number.clone().unwrap_or_default(),
        optional_data_2: String::new(),
    };
    MrzCode::generate(format, &fields)
}

/// Fill the placeholders shared by every template. Keys a document does not
/// use are set to the empty string so any template can reference them.
pub fn template_context(record: &IdentityRecord, mrz: &MrzCode) -> TemplateContext {
    let upper = |value: &str| value.to_uppercase();
    let number = upper(&record.document_number);
    let (passport_number, card_number) = match record.kind {
        DocumentKind::Passport => (number, String::new()),
        DocumentKind::IdCard => (String::new(), number),
    };
    let height = record
        .height_m
        .map(|h| format!("{h:.2}"))
        .unwrap_or_default();

    let mut ctx = TemplateContext::new();
    ctx.insert("SURNAME", upper(&record.surname))
        .insert("GIVEN_NAMES", upper(&record.given_names))
        .insert("FULL_NAME", upper(&record.full_name))
        .insert("NATIONALITY", record.country.alpha3())
        .insert("DATE_OF_BIRTH", record.birth_date.format(DISPLAY_DATE).to_string())
        .insert("GENDER", record.sex.display_char().to_string())
        .insert("PLACE_OF_BIRTH", upper(&record.place_of_birth))
        .insert("RESIDENCE", upper(&record.residence))
        .insert("DATE_OF_ISSUE", record.issue_date.format(DISPLAY_DATE).to_string())
        .insert("DATE_OF_EXPIRY", record.expiry_date.format(DISPLAY_DATE).to_string())
        .insert("PASSPORT_NUMBER", passport_number)
        .insert("CARD_NUMBER", card_number)
        .insert(
            "PERSONAL_NUMBER",
            upper(record.personal_number.as_deref().unwrap_or_default()),
        )
        .insert("HEIGHT", height)
        .insert("MRZ_LINE1", mrz.line(0))
        .insert("MRZ_LINE2", mrz.line(1))
        .insert("MRZ_LINE3", mrz.line(2));
    ctx
}

/// Turns identity records into document images using shared, read-only
/// rendering resources.
pub struct DocumentAssembler<'a> {
    catalog: &'a TemplateCatalog,
    rasterizer: &'a SvgRasterizer,
    photos: &'a PhotoLibrary,
    scale: f32,
    side_gap_px: u32,
    augmenter: Option<Augmenter>,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        catalog: &'a TemplateCatalog,
        rasterizer: &'a SvgRasterizer,
        photos: &'a PhotoLibrary,
        scale: f32,
    ) -> Self {
        Self {
            catalog,
            rasterizer,
            photos,
            scale,
            side_gap_px: 10,
            augmenter: None,
        }
    }

    /// Pixels of transparent gap between the stacked sides of an ID card.
    pub fn with_side_gap(mut self, gap_px: u32) -> Self {
        self.side_gap_px = gap_px;
        self
    }

    pub fn with_augmenter(mut self, augmenter: Option<Augmenter>) -> Self {
        self.augmenter = augmenter;
        self
    }

    /// Render every side of the document, composite the portrait, stack the
    /// sides top to bottom, then apply augmentation if configured.
    #[instrument(skip_all, fields(id = %record.id, country = %record.country, kind = %record.kind))]
    pub fn assemble<R: Rng>(&self, record: &IdentityRecord, rng: &mut R) -> Result<RenderedDocument> {
        let mrz = mrz_for(record)?;
        let ctx = template_context(record, &mrz);
        let mut portrait = Some(self.photos.portrait(rng)?);

        let mut image: Option<RgbaImage> = None;
        for side in record.kind.sides() {
            let entry = self.catalog.get(record.country, record.kind, *side)?;
            let svg = entry.template.render(&ctx)?;
            let mut raster = self.rasterizer.rasterize(&svg, self.scale)?;
            if let (Some(slot), Some(photo)) = (entry.photo_slot, portrait.take()) {
                place_photo(&mut raster, photo, slot, self.scale);
            }
            debug!(?side, width = raster.width(), height = raster.height(), "Side rendered");

            image = Some(match image {
                Some(top) => stack_vertical(&top, &raster, self.side_gap_px),
                None => raster,
            });
        }

        let image = image.unwrap_or_default();
        let image = match &self.augmenter {
            Some(augmenter) => augmenter.apply(image, rng),
            None => image,
        };
        Ok(RenderedDocument { image, mrz })
    }
}

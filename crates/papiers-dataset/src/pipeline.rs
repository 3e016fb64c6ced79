// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Generation pipeline: one run from configuration to finished dataset.

use chrono::{Local, NaiveDate};
use papiers_core::error::{PapiersError, Result};
use papiers_core::GeneratorConfig;
use papiers_render::{Augmenter, PhotoLibrary, SvgRasterizer, TemplateCatalog};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, instrument, warn};

use crate::document::DocumentAssembler;
use crate::identity::IdentityFaker;
use crate::writer::{DatasetSummary, DatasetWriter};

/// Drives identity faking, rendering, and writing for a whole dataset.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
    reference_date: NaiveDate,
}

impl DatasetGenerator {
    /// Validate `config`; the reference date defaults to today.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            reference_date: Local::now().date_naive(),
        })
    }

    /// Pin "today" so a seeded run produces identical output on any day.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Run with a rasterizer that has the system fonts loaded.
    pub fn run(&self) -> Result<DatasetSummary> {
        self.run_with(&SvgRasterizer::new())
    }

    /// Generate `count` documents into the output directory.
    ///
    /// Shared resources are built once up front; any error there aborts the
    /// run. A failure on a single document is logged, counted in the summary,
    /// and the run moves on.
    #[instrument(skip_all, fields(count = self.config.count, out = %self.config.output_dir.display()))]
    pub fn run_with(&self, rasterizer: &SvgRasterizer) -> Result<DatasetSummary> {
        let cfg = &self.config;
        let catalog = TemplateCatalog::load(cfg.templates_dir.as_deref())?;
        let photos = match &cfg.photo_dir {
            Some(dir) => PhotoLibrary::scan(dir)?,
            None => PhotoLibrary::placeholder(),
        };
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let faker = IdentityFaker::from_config(cfg, self.reference_date);
        let assembler = DocumentAssembler::new(&catalog, rasterizer, &photos, cfg.scale)
            .with_side_gap(cfg.side_gap_px)
            .with_augmenter(cfg.augment.clone().map(Augmenter::new).transpose()?);
        let mut writer = DatasetWriter::create(&cfg.output_dir, cfg.seed, self.reference_date)?;

        info!(
            seed = ?cfg.seed,
            reference_date = %self.reference_date,
            photos = photos.len(),
            "Dataset generation started"
        );

        for index in 0..cfg.count {
            let kind = *cfg
                .kinds
                .choose(&mut rng)
                .ok_or_else(|| PapiersError::Config("no document kinds configured".into()))?;
            let country = *cfg
                .countries
                .choose(&mut rng)
                .ok_or_else(|| PapiersError::Config("no countries configured".into()))?;

            let record = faker.generate(country, kind, &mut rng);
            let outcome = assembler
                .assemble(&record, &mut rng)
                .and_then(|document| writer.write(&record, document));
            match outcome {
                Ok(row) => info!(index, file = %row.file_name, "Document written"),
                Err(err) => {
                    warn!(index, id = %record.id, %country, %kind, error = %err, "Document failed");
                    writer.record_failure();
                }
            }
        }

        writer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papiers_core::{Country, DocumentKind};
    use std::fs;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn config(out: &std::path::Path, count: usize) -> GeneratorConfig {
        GeneratorConfig {
            output_dir: out.to_path_buf(),
            count,
            seed: Some(42),
            scale: 0.25,
            ..GeneratorConfig::default()
        }
    }

    fn run(config: GeneratorConfig) -> Result<DatasetSummary> {
        DatasetGenerator::new(config)?
            .with_reference_date(reference())
            .run_with(&SvgRasterizer::without_fonts())
    }

    #[test]
    fn generates_requested_count() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(config(dir.path(), 4)).unwrap();

        assert_eq!(summary.written, 4);
        assert_eq!(summary.failures, 0);
        assert_eq!(summary.by_kind.values().sum::<usize>(), 4);
        assert_eq!(summary.seed, Some(42));
        assert_eq!(summary.reference_date, reference());

        let rows = DatasetWriter::read_metadata(dir.path()).unwrap();
        assert_eq!(rows.len(), 4);
        for row in &rows {
            assert!(dir.path().join(&row.file_name).is_file());
            assert_eq!(row.mrz_format.line_count(), row.mrz.len());
        }
        assert_eq!(DatasetWriter::verify(dir.path()).unwrap(), 4);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        run(config(a.path(), 3)).unwrap();
        run(config(b.path(), 3)).unwrap();

        let meta_a = fs::read_to_string(a.path().join("metadata.jsonl")).unwrap();
        let meta_b = fs::read_to_string(b.path().join("metadata.jsonl")).unwrap();
        assert_eq!(meta_a, meta_b);
    }

    #[test]
    fn restricted_kinds_and_countries() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(GeneratorConfig {
            kinds: vec![DocumentKind::IdCard],
            countries: vec![Country::IvoryCoast],
            ..config(dir.path(), 2)
        })
        .unwrap();
        assert_eq!(summary.by_kind.get(&DocumentKind::IdCard), Some(&2));
        assert_eq!(summary.by_country.get(&Country::IvoryCoast), Some(&2));
        assert!(summary.by_kind.get(&DocumentKind::Passport).is_none());
    }

    #[test]
    fn broken_template_counts_failures_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let templates = tempfile::tempdir().unwrap();
        fs::write(
            templates.path().join("bj_passport.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">{{ UNKNOWN_KEY }}</svg>"#,
        )
        .unwrap();

        let summary = run(GeneratorConfig {
            kinds: vec![DocumentKind::Passport],
            countries: vec![Country::Benin],
            templates_dir: Some(templates.path().to_path_buf()),
            ..config(dir.path(), 3)
        })
        .unwrap();
        assert_eq!(summary.written, 0);
        assert_eq!(summary.failures, 3);
        assert!(dir.path().join("summary.json").is_file());
    }

    #[test]
    fn missing_photo_directory_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(GeneratorConfig {
            photo_dir: Some(dir.path().join("no-photos")),
            ..config(dir.path(), 1)
        })
        .unwrap_err();
        assert!(matches!(err, PapiersError::EmptyPhotoLibrary { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = DatasetGenerator::new(GeneratorConfig {
            kinds: Vec::new(),
            ..config(dir.path(), 1)
        })
        .unwrap_err();
        assert!(matches!(err, PapiersError::Config(_)));
    }
}

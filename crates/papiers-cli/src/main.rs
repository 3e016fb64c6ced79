// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Papiers: synthetic passport and ID card dataset generator.
//
// Entry point. Initialises logging, parses the command line, and dispatches
// to the dataset pipeline or the MRZ helpers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use papiers_core::{Country, DocumentKind, GeneratorConfig, Sex};
use papiers_dataset::{DatasetGenerator, DatasetWriter};
use papiers_mrz::{DEFAULT_NAME_BUDGET, MrzCode, MrzFields, MrzFormat, normalize};

#[derive(Parser)]
#[command(name = "papiers", version, about = "Synthetic identity-document dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a dataset of document images with metadata
    Generate(GenerateArgs),
    /// Fit a surname and full name into the MRZ name field
    Normalize {
        #[arg(long)]
        surname: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value_t = DEFAULT_NAME_BUDGET)]
        max_length: usize,
    },
    /// Print the MRZ lines for the given document data
    Mrz(MrzArgs),
    /// Re-hash every image of a generated dataset against its metadata
    Verify {
        #[arg(long)]
        dir: PathBuf,
    },
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    out: Option<PathBuf>,
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Directory of portrait photos (placeholder portrait when omitted)
    #[arg(long)]
    photos: Option<PathBuf>,
    /// Directory of SVG files overriding the built-in templates
    #[arg(long)]
    templates: Option<PathBuf>,
    /// Restrict to these document kinds (repeatable)
    #[arg(long = "kind", value_enum)]
    kinds: Vec<KindArg>,
    /// Restrict to these issuing countries (repeatable)
    #[arg(long = "country", value_enum)]
    countries: Vec<CountryArg>,
    #[arg(long)]
    scale: Option<f32>,
    /// Reference date used as "today", YYYY-MM-DD
    #[arg(long)]
    reference_date: Option<NaiveDate>,
}

#[derive(clap::Args)]
struct MrzArgs {
    #[arg(long, value_enum)]
    format: FormatArg,
    /// Document code, e.g. P, V, ID
    #[arg(long)]
    code: String,
    /// Issuing state, ISO 3166-1 alpha-3
    #[arg(long)]
    state: String,
    #[arg(long)]
    surname: String,
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    number: String,
    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    birth: NaiveDate,
    #[arg(long, value_parser = parse_sex)]
    sex: Sex,
    /// Expiry date, YYYY-MM-DD
    #[arg(long)]
    expiry: NaiveDate,
    /// Holder nationality; defaults to the issuing state
    #[arg(long)]
    nationality: Option<String>,
    #[arg(long, default_value = "")]
    optional: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Passport,
    IdCard,
}

impl From<KindArg> for DocumentKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Passport => Self::Passport,
            KindArg::IdCard => Self::IdCard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CountryArg {
    Ben,
    Civ,
}

impl From<CountryArg> for Country {
    fn from(arg: CountryArg) -> Self {
        match arg {
            CountryArg::Ben => Self::Benin,
            CountryArg::Civ => Self::IvoryCoast,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Td1,
    Td3,
    Mrva,
}

impl From<FormatArg> for MrzFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Td1 => Self::Td1,
            FormatArg::Td3 => Self::Td3,
            FormatArg::Mrva => Self::Mrva,
        }
    }
}

fn parse_sex(value: &str) -> Result<Sex, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Sex::from_char(c).ok_or_else(|| format!("unknown sex marker {value:?}")),
        _ => Err(format!("expected one of M, F, X, got {value:?}")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => generate(args)?,
        Commands::Normalize {
            surname,
            full_name,
            max_length,
        } => {
            let names = normalize(&surname, &full_name, max_length);
            println!("{}", names.surname);
            println!("{}", names.given_names);
        }
        Commands::Mrz(args) => println!("{}", mrz(args)?),
        Commands::Verify { dir } => {
            let checked = DatasetWriter::verify(&dir)
                .with_context(|| format!("verifying dataset at {}", dir.display()))?;
            println!("{checked} images verified");
        }
    }

    Ok(())
}

/// Merge the configuration file with command-line overrides.
fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if let Some(count) = args.count {
        config.count = count;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.photos.is_some() {
        config.photo_dir = args.photos.clone();
    }
    if args.templates.is_some() {
        config.templates_dir = args.templates.clone();
    }
    if !args.kinds.is_empty() {
        config.kinds = args.kinds.iter().map(|&k| k.into()).collect();
    }
    if !args.countries.is_empty() {
        config.countries = args.countries.iter().map(|&c| c.into()).collect();
    }
    if let Some(scale) = args.scale {
        config.scale = scale;
    }
    Ok(config)
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = build_config(&args)?;
    let mut generator = DatasetGenerator::new(config).context("invalid configuration")?;
    if let Some(date) = args.reference_date {
        generator = generator.with_reference_date(date);
    }

    tracing::info!(out = %generator.config().output_dir.display(), "Papiers starting");
    let summary = generator.run().context("dataset generation failed")?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn mrz(args: MrzArgs) -> Result<MrzCode> {
    let format = MrzFormat::from(args.format);
    let fields = MrzFields {
        document_code: args.code,
        nationality: args.nationality.unwrap_or_else(|| args.state.clone()),
        issuing_state: args.state,
        names: normalize(&args.surname, &args.full_name, format.name_width()),
        document_number: args.number,
        birth_date: args.birth,
        sex: args.sex,
        expiry_date: args.expiry,
        optional_data: args.optional,
        optional_data_2: String::new(),
    };
    MrzCode::generate(format, &fields).context("cannot encode MRZ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "papiers", "generate", "--out", "ds", "--count", "12", "--seed", "7", "--kind",
            "id-card", "--country", "civ", "--country", "ben", "--scale", "1.5",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        let config = build_config(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("ds"));
        assert_eq!(config.count, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.kinds, vec![DocumentKind::IdCard]);
        assert_eq!(config.countries, vec![Country::IvoryCoast, Country::Benin]);
        assert_eq!(config.scale, 1.5);
    }

    #[test]
    fn mrz_subcommand_reproduces_td3_specimen() {
        let cli = Cli::try_parse_from([
            "papiers", "mrz", "--format", "td3", "--code", "P", "--state", "UTO", "--surname",
            "Eriksson", "--full-name", "Anna Maria Eriksson", "--number", "L898902C3",
            "--birth", "1974-08-12", "--sex", "F", "--expiry", "2012-04-15", "--optional",
            "ZE184226B",
        ])
        .unwrap();
        let Commands::Mrz(args) = cli.command else {
            panic!("expected mrz");
        };
        let code = mrz(args).unwrap();
        assert_eq!(
            code.line(0),
            "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<"
        );
        assert_eq!(
            code.line(1),
            "L898902C36UTO7408122F1204159ZE184226B<<<<<10"
        );
    }

    #[test]
    fn sex_parser_rejects_words() {
        assert_eq!(parse_sex("f"), Ok(Sex::Female));
        assert!(parse_sex("female").is_err());
    }
}

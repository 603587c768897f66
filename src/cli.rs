//! CLI argument surface (§6.1): a minimal driver over the library, not a
//! full document-conversion pipeline.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use pagenum::config::ClassifierKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliClassifier {
    Naivebayes,
    Logisticregression,
}

impl From<CliClassifier> for ClassifierKind {
    fn from(c: CliClassifier) -> Self {
        match c {
            CliClassifier::Naivebayes => ClassifierKind::NaiveBayes,
            CliClassifier::Logisticregression => ClassifierKind::LogisticRegression,
        }
    }
}

/// Infer printed page numbers from a per-page stream of OCR word observations.
#[derive(Debug, Parser)]
#[command(name = "pagenum-infer", version, about)]
pub struct Cli {
    /// Path to the OCR-JSON document.
    pub infile: PathBuf,

    /// Path to write the result JSON.
    pub outfile: PathBuf,

    /// Path to a skip-pages JSON array (scandata).
    #[arg(long)]
    pub scandata: Option<PathBuf>,

    /// Optional TOML config file supplying defaults, overridden by explicit flags.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which classifier to train between pass 1 and pass 2.
    #[arg(long, value_enum)]
    pub classifier: Option<CliClassifier>,

    #[arg(long = "two-pass", action = clap::ArgAction::SetTrue)]
    two_pass_on: bool,
    #[arg(long = "no-two-pass", action = clap::ArgAction::SetTrue, conflicts_with = "two_pass_on")]
    two_pass_off: bool,

    /// Sequence-enumerator density threshold for pass 1.
    #[arg(long)]
    pub density_pass1: Option<f64>,

    /// Sequence-enumerator density threshold for pass 2.
    #[arg(long)]
    pub density_pass2: Option<f64>,

    #[arg(long = "opportunistic-fill", action = clap::ArgAction::SetTrue)]
    opportunistic_fill_on: bool,
    #[arg(long = "no-opportunistic-fill", action = clap::ArgAction::SetTrue, conflicts_with = "opportunistic_fill_on")]
    opportunistic_fill_off: bool,

    /// Override the output document's identifier field.
    #[arg(long)]
    pub identifier: Option<String>,
}

impl Cli {
    /// `Some(true)`/`Some(false)` if `--two-pass`/`--no-two-pass` was given, `None` otherwise.
    pub fn two_pass(&self) -> Option<bool> {
        if self.two_pass_on {
            Some(true)
        } else if self.two_pass_off {
            Some(false)
        } else {
            None
        }
    }

    /// `Some(true)`/`Some(false)` if `--opportunistic-fill`/`--no-opportunistic-fill` was given.
    pub fn opportunistic_fill(&self) -> Option<bool> {
        if self.opportunistic_fill_on {
            Some(true)
        } else if self.opportunistic_fill_off {
            Some(false)
        } else {
            None
        }
    }
}

//! `pagenum-infer`: a minimal CLI driver over the `pagenum` library (§6.1).

mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use pagenum::config::{Options, PartialConfig};
use pagenum::ocr::{JsonOcrSource, JsonScandataSource, OcrSource, ScandataSource};
use pagenum::{infer, output};

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let mut options = Options::default();
    if let Some(config_path) = &cli.config {
        let text = fs::read_to_string(config_path).with_context(|| format!("reading config file {}", config_path.display()))?;
        let partial = PartialConfig::from_toml_str(&text).with_context(|| format!("parsing config file {}", config_path.display()))?;
        options = partial.apply(options);
    }
    if let Some(classifier) = cli.classifier {
        options.classifier = classifier.into();
    }
    if let Some(two_pass) = cli.two_pass() {
        options.two_pass = two_pass;
    }
    if let Some(density) = cli.density_pass1 {
        options.density_pass1 = density.clamp(0.0, 1.0);
    }
    if let Some(density) = cli.density_pass2 {
        options.density_pass2 = density.clamp(0.0, 1.0);
    }
    if let Some(opportunistic_fill) = cli.opportunistic_fill() {
        options.opportunistic_fill = opportunistic_fill;
    }
    if let Some(identifier) = &cli.identifier {
        options.identifier = Some(identifier.clone());
    }

    let bar = ProgressBar::new(4);
    bar.set_style(ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}").expect("static template is valid"));

    bar.set_message("reading input");
    let ocr_source = JsonOcrSource::from_path(&cli.infile).with_context(|| format!("reading OCR input {}", cli.infile.display()))?;
    let scandata_source = match &cli.scandata {
        Some(path) => Some(JsonScandataSource::from_path(path).with_context(|| format!("reading scandata {}", path.display()))?),
        None => None,
    };
    bar.inc(1);

    bar.set_message("inferring page numbers");
    let scandata_ref: Option<&dyn ScandataSource> = scandata_source.as_ref().map(|s| s as &dyn ScandataSource);
    let ocr_ref: &dyn OcrSource = &ocr_source;
    let document = infer(ocr_ref, scandata_ref, &options).context("running inference pipeline")?;
    bar.inc(2);

    bar.set_message("writing output");
    let json = output::to_pretty_json(&document);
    fs::write(&cli.outfile, json).with_context(|| format!("writing output {}", cli.outfile.display()))?;
    bar.inc(1);
    bar.finish_and_clear();

    let found = document.pages.iter().filter(|p| !p.page_number.is_empty()).count();
    println!("confidence={}% pages_found={}/{}", document.confidence, found, document.pages.len());

    Ok(())
}

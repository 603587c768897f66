//! `pagenum`: page-number inference engine for scanned books (§1).
//!
//! Given a per-page stream of OCR word observations, infers the printed
//! page number (if any) for every page, a per-page confidence, and a
//! document-level confidence score.

pub mod classifier;
pub mod config;
pub mod confidence;
pub mod edgefill;
pub mod enumerate;
pub mod error;
pub mod extract;
pub mod features;
pub mod gapfill;
pub mod model;
pub mod ocr;
pub mod output;
pub mod rng;
pub mod scheme;
pub mod trellis;
pub mod twopass;

use std::collections::HashSet;

use config::Options;
use error::Result;
use ocr::{OcrSource, ScandataSource};
use output::OutputDocument;
use scheme::SchemeRegistry;

/// Run the full inference pipeline end to end (§2): extract candidates,
/// solve the best path through the two-pass driver, optionally apply the
/// opportunistic edge filler, and build the output document.
pub fn infer(ocr: &dyn OcrSource, scandata: Option<&dyn ScandataSource>, options: &Options) -> Result<OutputDocument> {
    let pages = ocr.pages()?;
    let total_pages = pages.len();
    let skip_pages = match scandata {
        Some(s) => s.skip_pages()?,
        None => HashSet::new(),
    };

    let mut registry = SchemeRegistry::new(config::COMPOSITE_LIMIT);
    let mut rng = rng::seeded_rng();

    let mut result = twopass::run(&pages, &skip_pages, &mut registry, &mut rng, options)?;

    if options.opportunistic_fill {
        edgefill::fill_edges(&mut result.final_path, &registry)?;
        result.refined_sequences = twopass::refine_sequences(&result.final_path);
    }

    let leaf_numbers = ocr::effective_leaf_numbers(total_pages, &skip_pages);
    Ok(output::build_document(&result.final_path, &result.refined_sequences, &leaf_numbers, options.identifier.clone()))
}

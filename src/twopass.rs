//! Two-Pass Driver (§4.7): runs pass 1 unfiltered, trains a classifier on
//! its output, then reruns extraction with the classifier as a prefilter.

use std::collections::HashSet;

use rand::rngs::StdRng;

use crate::classifier;
use crate::config::{Options, TRELLIS_F_PASS1, TRELLIS_F_PASS2, TRELLIS_NONE_COST, TRELLIS_SENTINEL_COST};
use crate::enumerate;
use crate::error::Result;
use crate::extract::{self, Filter};
use crate::features;
use crate::gapfill;
use crate::model::{Candidate, PageInfo, Sequence, WordObservation};
use crate::ocr::OcrPage;
use crate::scheme::SchemeRegistry;
use crate::trellis;

/// Output of the two-pass driver: the final per-page assignment, the
/// refined sequences regrouped from it, and the page geometry used to
/// compute them (needed downstream for confidence/output).
pub struct TwoPassResult {
    pub final_path: Vec<Option<Candidate>>,
    pub refined_sequences: Vec<Sequence>,
    pub page_info: Vec<PageInfo>,
}

pub fn run(pages: &[OcrPage], skip_pages: &HashSet<usize>, registry: &mut SchemeRegistry, rng: &mut StdRng, options: &Options) -> Result<TwoPassResult> {
    let extraction1 = extract::extract(pages, skip_pages, registry, None, rng)?;
    let num_pages = extraction1.page_matches.len();

    let assigned1 = run_pass(&extraction1.page_matches, num_pages, registry, options.density_pass1, TRELLIS_F_PASS1)?;

    if !options.two_pass {
        let refined = refine_sequences(&assigned1);
        return Ok(TwoPassResult {
            final_path: assigned1,
            refined_sequences: refined,
            page_info: extraction1.page_info,
        });
    }

    let (train_x, train_y) = training_corpus(&assigned1, &extraction1.page_info, &extraction1.page_non_matches);
    let trained = classifier::fit(options.classifier, &train_x, &train_y);

    let Ok(clf) = trained else {
        // TrainingUnderdetermined (§7): fall through to pass-1 output.
        let refined = refine_sequences(&assigned1);
        return Ok(TwoPassResult {
            final_path: assigned1,
            refined_sequences: refined,
            page_info: extraction1.page_info,
        });
    };

    let page_info_ref = &extraction1.page_info;
    let mut prefilter = |effective_idx: usize, word: &WordObservation| -> (bool, (f64, f64)) {
        let page_info = &page_info_ref[effective_idx];
        let feats = features::extract(word, page_info, effective_idx);
        let (p_false, p_true) = clf.predict_proba(&feats);
        (p_true > 0.5, (p_false, p_true))
    };
    let filter_obj: &mut Filter = &mut prefilter;

    let extraction2 = extract::extract(pages, skip_pages, registry, Some(filter_obj), rng)?;
    let assigned2 = run_pass(&extraction2.page_matches, num_pages, registry, options.density_pass2, TRELLIS_F_PASS2)?;

    let refined = refine_sequences(&assigned2);
    Ok(TwoPassResult {
        final_path: assigned2,
        refined_sequences: refined,
        page_info: extraction2.page_info,
    })
}

/// Enumerate, gap-fill, build the trellis and solve for one extraction pass.
fn run_pass(page_matches: &[Vec<Candidate>], num_pages: usize, registry: &SchemeRegistry, density_threshold: f64, f_divisor: f64) -> Result<Vec<Option<Candidate>>> {
    let sequences = enumerate::enumerate(page_matches, density_threshold);
    let filled = gapfill::fill_gaps(sequences, registry)?;
    let layers = trellis::build_layers(num_pages, &filled);
    let path = trellis::solve(&layers, &filled, f_divisor, TRELLIS_NONE_COST, TRELLIS_SENTINEL_COST);
    Ok(path
        .into_iter()
        .map(|src| src.map(|(seq_idx, item_idx)| filled[seq_idx].items[item_idx].1.clone()))
        .collect())
}

/// Regroup a single-candidate-per-page stream into sequences (§4.7: "the
/// pass-2 chosen candidates are then regrouped into refined sequences").
/// No density threshold is meaningful here since each page contributes at
/// most one candidate, so parking never applies.
pub(crate) fn refine_sequences(path: &[Option<Candidate>]) -> Vec<Sequence> {
    let page_matches: Vec<Vec<Candidate>> = path.iter().map(|c| c.clone().into_iter().collect()).collect();
    enumerate::enumerate(&page_matches, 0.0)
}

/// Positives: non-synthetic candidates from the best path. Negatives: the
/// sampled non-matches from those same pages (§4.6).
fn training_corpus(path: &[Option<Candidate>], page_info: &[PageInfo], page_non_matches: &[Vec<WordObservation>]) -> (Vec<[f64; features::FEATURE_DIM]>, Vec<u8>) {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (p, candidate) in path.iter().enumerate() {
        let Some(c) = candidate else { continue };
        if c.synthetic {
            continue;
        }
        let Some(obs) = &c.observation else { continue };
        x.push(features::extract(obs, &page_info[p], p));
        y.push(1u8);

        for neg in &page_non_matches[p] {
            x.push(features::extract(neg, &page_info[p], p));
            y.push(0u8);
        }
    }

    (x, y)
}

//! Confidence Aggregator (§4.9) and seqoffset computation (§4.10).

use crate::model::{Candidate, Sequence};
use crate::scheme::SchemeId;

/// Compute the document confidence in `[0, 1]` from the final per-page
/// assignment and the refined sequences (§4.9).
pub fn document_confidence(final_path: &[Option<Candidate>], refined_sequences: &[Sequence]) -> f64 {
    let total = final_path.len();
    if total == 0 {
        return 0.0;
    }

    let found_or_synth = final_path.iter().filter(|c| c.is_some()).count();
    let found = final_path.iter().filter(|c| matches!(c, Some(c) if !c.synthetic)).count();

    let prob_avg = {
        let probs: Vec<f64> = final_path
            .iter()
            .filter_map(|c| c.as_ref())
            .filter(|c| !c.synthetic)
            .filter_map(|c| c.prob)
            .map(|(_, p_true)| p_true)
            .collect();
        if probs.is_empty() {
            0.0
        } else {
            probs.iter().sum::<f64>() / probs.len() as f64
        }
    };

    let synth_ratio = if found_or_synth == 0 { 0.0 } else { found as f64 / found_or_synth as f64 };

    let offset = seqoffset(refined_sequences);
    let refined_seq_count = refined_sequences.len();
    let denom = (refined_seq_count as i64 - offset as i64).max(1) as f64;
    let pages_per_seq = total as f64 / denom;

    let f1 = (found_or_synth as f64 / total as f64 + 0.20).min(1.0);
    let f2 = (found as f64 / total as f64 + 0.70).min(1.0);
    let f3 = (synth_ratio + 2.0 / 3.0).min(1.0);
    let f4 = (prob_avg + 0.10).min(1.0);
    let f5 = (pages_per_seq / (total.min(30) as f64) + 0.05).min(1.0);

    f1 * f2 * f3 * f4 * f5
}

/// Confidence as an integer percent (§4.9, §6: "confidence" field).
pub fn confidence_percent(final_path: &[Option<Candidate>], refined_sequences: &[Sequence]) -> u32 {
    (document_confidence(final_path, refined_sequences) * 100.0).round() as u32
}

/// Count Arabic refined sequences that look like sub-continuations of an
/// earlier Arabic sequence (§4.10).
fn seqoffset(refined_sequences: &[Sequence]) -> usize {
    let arabic: Vec<&Sequence> = refined_sequences.iter().filter(|s| s.scheme == SchemeId::ARABIC).collect();

    let mut offset = 0usize;
    for (i, a) in arabic.iter().enumerate() {
        let Some((a_start_page, a_start_cand)) = a.first() else { continue };
        for b in arabic.iter().skip(i + 1) {
            let Some((b_start_page, b_start_cand)) = b.first() else { continue };
            let leaf = *b_start_page as i128 - *a_start_page as i128;
            let val = b_start_cand.num_value - a_start_cand.num_value;
            if leaf > 0 && leaf < 20 && val > 0 && val < 20 && (leaf - val) > 0 && (leaf - val) < 5 {
                offset += 1;
                break;
            }
        }
    }
    offset
}

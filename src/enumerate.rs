//! Sequence Enumerator (§4.3): greedily groups candidates into
//! monotonically-increasing, same-scheme runs.

use crate::model::{Candidate, Sequence};

/// Enumerate sequences over `page_matches` at the given density threshold
/// (pass 1: 0.3, pass 2: 0.05 by default). Sequences of length < 2 are
/// discarded.
pub fn enumerate(page_matches: &[Vec<Candidate>], density_threshold: f64) -> Vec<Sequence> {
    let mut active: Vec<Sequence> = Vec::new();
    let mut parked: Vec<Sequence> = Vec::new();

    for (p, candidates) in page_matches.iter().enumerate() {
        for c in candidates {
            let mut placed = false;
            for seq in active.iter_mut() {
                if let Some((p_last, v_last)) = seq.last() {
                    if v_last.scheme == c.scheme && *p_last != p && v_last.num_value + (p - p_last) as i128 == c.num_value {
                        seq.items.push((p, c.clone()));
                        placed = true;
                        break;
                    }
                }
            }
            if !placed {
                let mut seq = Sequence::new(c.scheme);
                seq.items.push((p, c.clone()));
                active.push(seq);
            }
        }

        // Snapshot before removing (§4.3, §9): avoids an iteration-order
        // hazard where removing while scanning could leave one sequence
        // unparked.
        let snapshot = std::mem::take(&mut active);
        for seq in snapshot {
            let (p0, _) = seq.first().expect("just-populated sequence is non-empty");
            let span = if p == *p0 { 1 } else { p - p0 };
            let density = seq.len() as f64 / span as f64;
            if density >= density_threshold {
                active.push(seq);
            } else {
                parked.push(seq);
            }
        }
    }

    parked.extend(active);
    parked.into_iter().filter(|s| s.len() >= 2).collect()
}

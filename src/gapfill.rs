//! Gap Filler (§4.4): synthesizes missing page numbers inside an
//! extrapolation-capable sequence.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Candidate, Sequence};
use crate::scheme::SchemeRegistry;

/// Fill gaps in every sequence whose scheme supports extrapolation;
/// sequences of non-extrapolating schemes pass through unchanged.
pub fn fill_gaps(sequences: Vec<Sequence>, registry: &SchemeRegistry) -> Result<Vec<Sequence>> {
    sequences.into_iter().map(|seq| fill_one(seq, registry)).collect()
}

fn fill_one(seq: Sequence, registry: &SchemeRegistry) -> Result<Sequence> {
    let scheme_id = seq.scheme;
    let scheme = registry.get(scheme_id);
    if !scheme.supports_extrapolation() {
        return Ok(seq);
    }

    let Some((first_page, first_candidate)) = seq.first().cloned() else {
        return Ok(seq);
    };
    let last_page = seq.last().map(|(p, _)| *p).unwrap_or(first_page);
    let base_value = first_candidate.num_value;

    let mut by_page: HashMap<usize, Candidate> = seq.items.into_iter().collect();
    let mut filled = Sequence::new(scheme_id);

    for page in first_page..=last_page {
        if let Some(candidate) = by_page.remove(&page) {
            filled.items.push((page, candidate));
        } else {
            let expected = base_value + (page - first_page) as i128;
            let value = scheme.from_num(expected);
            let candidate = Candidate::synthetic(value, expected, scheme_id)?;
            filled.items.push((page, candidate));
        }
    }

    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordObservation;
    use crate::scheme::SchemeId;

    #[test]
    fn test_fills_single_gap() {
        let registry = SchemeRegistry::new(2500);
        let mut seq = Sequence::new(SchemeId::ARABIC);
        let obs = WordObservation::new((0.0, 0.0, 10.0, 10.0), "1", 9.0, 90);
        seq.items.push((0, Candidate::observed("1".into(), 1, SchemeId::ARABIC, obs.clone())));
        seq.items.push((2, Candidate::observed("3".into(), 3, SchemeId::ARABIC, obs)));

        let filled = fill_one(seq, &registry).unwrap();
        assert_eq!(filled.len(), 3);
        assert_eq!(filled.items[1].0, 1);
        assert_eq!(filled.items[1].1.value, "2");
        assert!(filled.items[1].1.synthetic);
        assert!(filled.validate().is_ok());
    }

    #[test]
    fn test_non_extrapolating_composite_passes_through() {
        let mut registry = SchemeRegistry::new(2500);
        let (scheme_id, value) = registry.try_discover_composite("Ch.3.9").unwrap().unwrap();
        assert!(!registry.get(scheme_id).supports_extrapolation());

        let obs = WordObservation::new((0.0, 0.0, 10.0, 10.0), "Ch.3.9", 9.0, 90);
        let mut seq = Sequence::new(scheme_id);
        seq.items.push((0, Candidate::observed("Ch.3.9".into(), value, scheme_id, obs)));

        let filled = fill_one(seq.clone(), &registry).unwrap();
        assert_eq!(filled.items, seq.items);
    }
}

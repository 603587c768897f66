//! Opportunistic Edge Filler (§4.8): back-fills towards page 0 from the
//! first confirmed page number, and forward-fills towards the last page
//! from the last confirmed page number. Optional, caller-gated.

use crate::error::Result;
use crate::model::Candidate;
use crate::scheme::SchemeRegistry;

/// Mutates `final_path` in place. Only one direction is walked per end: back
/// from the first present candidate towards page 0/value 1, forward from the
/// last present candidate towards the document's end. Neither walk touches
/// pages strictly between the two anchors.
pub fn fill_edges(final_path: &mut [Option<Candidate>], registry: &SchemeRegistry) -> Result<()> {
    let n = final_path.len();
    if n == 0 {
        return Ok(());
    }

    let first = final_path.iter().position(|c| c.is_some()).map(|idx| (idx, final_path[idx].clone().unwrap()));
    let last = final_path.iter().rposition(|c| c.is_some()).map(|idx| (idx, final_path[idx].clone().unwrap()));

    if let Some((first_idx, candidate)) = first {
        let scheme = registry.get(candidate.scheme);
        let mut value = candidate.num_value;
        let mut page = first_idx;
        while page > 0 && value > 1 {
            page -= 1;
            value -= 1;
            let text = scheme.from_num(value);
            final_path[page] = Some(Candidate::synthetic(text, value, candidate.scheme)?);
        }
    }

    if let Some((last_idx, candidate)) = last {
        let scheme = registry.get(candidate.scheme);
        let mut value = candidate.num_value;
        for slot in final_path.iter_mut().skip(last_idx + 1) {
            value += 1;
            let text = scheme.from_num(value);
            *slot = Some(Candidate::synthetic(text, value, candidate.scheme)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WordObservation;
    use crate::scheme::SchemeId;

    fn observed(value: &str, n: i128) -> Candidate {
        let obs = WordObservation::new((0.0, 0.0, 10.0, 10.0), value, 9.0, 90);
        Candidate::observed(value.into(), n, SchemeId::ARABIC, obs)
    }

    #[test]
    fn test_backward_fill_to_value_one() {
        let registry = SchemeRegistry::new(2500);
        let mut path: Vec<Option<Candidate>> = vec![None, None, None, Some(observed("4", 4))];
        fill_edges(&mut path, &registry).unwrap();
        assert_eq!(path[0].as_ref().unwrap().value, "1");
        assert_eq!(path[1].as_ref().unwrap().value, "2");
        assert_eq!(path[2].as_ref().unwrap().value, "3");
        assert!(path[0].as_ref().unwrap().synthetic);
    }

    #[test]
    fn test_forward_fill_unbounded() {
        let registry = SchemeRegistry::new(2500);
        let mut path: Vec<Option<Candidate>> = vec![Some(observed("18", 18)), None, None];
        fill_edges(&mut path, &registry).unwrap();
        assert_eq!(path[1].as_ref().unwrap().value, "19");
        assert_eq!(path[2].as_ref().unwrap().value, "20");
    }

    #[test]
    fn test_forward_fill_leaves_interior_entries_untouched() {
        // Only the true tail (strictly after the last present candidate) is
        // synthesized; an already-assigned interior page is left alone.
        let registry = SchemeRegistry::new(2500);
        let mut path: Vec<Option<Candidate>> = vec![Some(observed("1", 1)), Some(observed("99", 99)), None];
        fill_edges(&mut path, &registry).unwrap();
        assert_eq!(path[1].as_ref().unwrap().value, "99");
        assert_eq!(path[2].as_ref().unwrap().value, "100");
    }

    #[test]
    fn test_no_assignments_no_op() {
        let registry = SchemeRegistry::new(2500);
        let mut path: Vec<Option<Candidate>> = vec![None, None];
        fill_edges(&mut path, &registry).unwrap();
        assert!(path.iter().all(|c| c.is_none()));
    }
}

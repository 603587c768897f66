//! Candidate Extractor (§4.2).

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;

use crate::config::NEGATIVES_PER_PAGE;
use crate::error::Result;
use crate::model::{Candidate, PageInfo, WordObservation};
use crate::ocr::OcrPage;
use crate::scheme::SchemeRegistry;

/// A classifier prefilter, present only in pass 2 (§4.2, §4.7).
///
/// Takes the effective page index and the candidate word, returns whether to
/// keep it plus the classifier's `(p_false, p_true)`.
pub type Filter<'a> = dyn FnMut(usize, &WordObservation) -> (bool, (f64, f64)) + 'a;

/// Per-page extraction output (§4.2).
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    pub page_matches: Vec<Vec<Candidate>>,
    pub page_non_matches: Vec<Vec<WordObservation>>,
    pub page_info: Vec<PageInfo>,
}

/// Central-region margin used to throttle further negative collection.
const CENTRAL_MARGIN_PCT: f64 = 0.2;

/// Run the extractor over `pages`, consulting and growing `registry`.
///
/// `filter` is `Some` only in pass 2; its absence means no classifier
/// prefilter is applied and every syntactic match is kept.
pub fn extract(
    pages: &[OcrPage],
    skip_pages: &HashSet<usize>,
    registry: &mut SchemeRegistry,
    mut filter: Option<&mut Filter<'_>>,
    rng: &mut StdRng,
) -> Result<ExtractionResult> {
    let mut out = ExtractionResult::default();
    let mut skip_counter = 0usize;

    for (page_index, page) in pages.iter().enumerate() {
        if skip_pages.contains(&page_index) {
            skip_counter += 1;
            continue;
        }
        let effective_index = page_index - skip_counter;

        let mut page_info = PageInfo::new(page.dimensions);
        let mut matches = Vec::new();
        let mut non_matches: Vec<WordObservation> = Vec::new();

        for word in &page.words {
            page_info.union_word(word);

            if non_matches.len() >= NEGATIVES_PER_PAGE && word.inside_central_region(&page_info, CENTRAL_MARGIN_PCT) {
                continue;
            }

            let scheme_match = registry.scan(&word.text);
            let mut prob = None;

            if let Some(f) = filter.as_deref_mut() {
                let composite_eligible = registry.composite_eligible(&word.text);
                if scheme_match.is_none() && !composite_eligible {
                    non_matches.push(word.clone());
                    continue;
                }
                let (keep, p) = f(effective_index, word);
                prob = Some(p);
                if !keep {
                    non_matches.push(word.clone());
                    continue;
                }
            }

            match scheme_match {
                Some((scheme_id, value)) => {
                    let mut candidate = Candidate::observed(word.text.clone(), value, scheme_id, word.clone());
                    candidate.prob = prob;
                    matches.push(candidate);
                }
                None => match registry.try_discover_composite(&word.text) {
                    Ok(Some((scheme_id, value))) => {
                        let mut candidate = Candidate::observed(word.text.clone(), value, scheme_id, word.clone());
                        candidate.prob = prob;
                        matches.push(candidate);
                    }
                    Ok(None) | Err(_) => non_matches.push(word.clone()),
                },
            }
        }

        let sampled_negatives = if non_matches.is_empty() {
            Vec::new()
        } else {
            (0..NEGATIVES_PER_PAGE)
                .map(|_| non_matches[rng.gen_range(0..non_matches.len())].clone())
                .collect()
        };

        out.page_matches.push(matches);
        out.page_non_matches.push(sampled_negatives);
        out.page_info.push(page_info);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GLOBAL_SEED;
    use crate::scheme::SchemeId;
    use rand::SeedableRng;

    fn word(text: &str, x: f64, y: f64) -> WordObservation {
        WordObservation::new((x, y, x + 10.0, y + 10.0), text, 9.0, 90)
    }

    fn page(dims: (f64, f64), words: Vec<WordObservation>) -> OcrPage {
        OcrPage { dimensions: dims, words }
    }

    #[test]
    fn test_arabic_candidate_extraction() {
        let pages = vec![page((100.0, 200.0), vec![word("1", 5.0, 5.0)])];
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        let result = extract(&pages, &HashSet::new(), &mut registry, None, &mut rng).unwrap();
        assert_eq!(result.page_matches[0].len(), 1);
        assert_eq!(result.page_matches[0][0].scheme, SchemeId::ARABIC);
        assert_eq!(result.page_matches[0][0].num_value, 1);
    }

    #[test]
    fn test_skip_pages_renumber_densely() {
        let pages = vec![
            page((100.0, 200.0), vec![word("1", 5.0, 5.0)]),
            page((100.0, 200.0), vec![word("2", 5.0, 5.0)]),
            page((100.0, 200.0), vec![word("3", 5.0, 5.0)]),
        ];
        let mut skip = HashSet::new();
        skip.insert(1);
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        let result = extract(&pages, &skip, &mut registry, None, &mut rng).unwrap();
        assert_eq!(result.page_matches.len(), 2);
        assert_eq!(result.page_matches[1][0].num_value, 3);
    }

    #[test]
    fn test_composite_discovery_during_extraction() {
        let pages = vec![page((100.0, 200.0), vec![word("A-1", 5.0, 5.0)])];
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        let result = extract(&pages, &HashSet::new(), &mut registry, None, &mut rng).unwrap();
        assert_eq!(registry.composite_count(), 1);
        assert_eq!(result.page_matches[0][0].value, "A-1");
    }

    #[test]
    fn test_non_matches_sampled_with_replacement() {
        let words = vec![word("hello", 5.0, 5.0)];
        let pages = vec![page((100.0, 200.0), words)];
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        let result = extract(&pages, &HashSet::new(), &mut registry, None, &mut rng).unwrap();
        assert!(result.page_matches[0].is_empty());
        assert_eq!(result.page_non_matches[0].len(), NEGATIVES_PER_PAGE);
    }

    #[test]
    fn test_classifier_prefilter_rejects() {
        let pages = vec![page((100.0, 200.0), vec![word("1", 5.0, 5.0)])];
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        let mut filter: Box<Filter> = Box::new(|_idx, _w| (false, (0.9, 0.1)));
        let result = extract(&pages, &HashSet::new(), &mut registry, Some(&mut *filter), &mut rng).unwrap();
        assert!(result.page_matches[0].is_empty());
        assert_eq!(result.page_non_matches[0].len(), NEGATIVES_PER_PAGE);
    }

    #[test]
    fn test_classifier_prefilter_skips_non_eligible_words() {
        let mut calls = 0usize;
        let pages = vec![page((100.0, 200.0), vec![word("hello", 5.0, 5.0)])];
        let mut registry = SchemeRegistry::new(2500);
        let mut rng = StdRng::seed_from_u64(GLOBAL_SEED);
        {
            let mut filter: Box<Filter> = Box::new(|_idx, _w| {
                calls += 1;
                (true, (0.1, 0.9))
            });
            extract(&pages, &HashSet::new(), &mut registry, Some(&mut *filter), &mut rng).unwrap();
        }
        assert_eq!(calls, 0);
    }
}

//! Core data model (§3): observations, candidates, sequences.

use crate::error::{PageNumError, Result};
use crate::scheme::SchemeId;

/// A single OCR word observation, supplied by the external OCR collaborator (§6).
#[derive(Debug, Clone, PartialEq)]
pub struct WordObservation {
    /// `(x1, y1, x2, y2)`.
    pub bbox: (f64, f64, f64, f64),
    pub text: String,
    pub fontsize: f64,
    /// OCR word confidence, `0..=100`.
    pub confidence: u8,
}

impl WordObservation {
    pub fn new(bbox: (f64, f64, f64, f64), text: impl Into<String>, fontsize: f64, confidence: u8) -> Self {
        Self {
            bbox,
            text: text.into(),
            fontsize,
            confidence,
        }
    }

    /// Is this word wholly inside the central `width_pct` x `height_pct` of the page
    /// (i.e. outside `margin_pct` on every side)?
    pub fn inside_central_region(&self, page: &PageInfo, margin_pct: f64) -> bool {
        let (pw, ph) = page.dimensions;
        if pw <= 0.0 || ph <= 0.0 {
            return false;
        }
        let (x1, y1, x2, y2) = self.bbox;
        let margin_x = pw * margin_pct;
        let margin_y = ph * margin_pct;
        x1 >= margin_x && x2 <= pw - margin_x && y1 >= margin_y && y2 <= ph - margin_y
    }
}

/// Per-page geometry (§3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    pub dimensions: (f64, f64),
    pub content_bbox: (f64, f64, f64, f64),
}

impl PageInfo {
    pub fn new(dimensions: (f64, f64)) -> Self {
        Self {
            dimensions,
            content_bbox: (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
        }
    }

    /// Fold a word's bbox into the running content-bbox union.
    pub fn union_word(&mut self, word: &WordObservation) {
        let (x1, y1, x2, y2) = word.bbox;
        self.content_bbox.0 = self.content_bbox.0.min(x1);
        self.content_bbox.1 = self.content_bbox.1.min(y1);
        self.content_bbox.2 = self.content_bbox.2.max(x2);
        self.content_bbox.3 = self.content_bbox.3.max(y2);
    }

    /// The content bbox, or all-zero if no word was ever folded in.
    pub fn content_bbox_or_zero(&self) -> (f64, f64, f64, f64) {
        if self.content_bbox.0 > self.content_bbox.2 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            self.content_bbox
        }
    }
}

/// A page-number candidate (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub value: String,
    pub num_value: i128,
    pub scheme: SchemeId,
    pub synthetic: bool,
    pub observation: Option<WordObservation>,
    /// `(p_false, p_true)`, assigned at most once (pass 2 only).
    pub prob: Option<(f64, f64)>,
}

impl Candidate {
    /// Construct an observed (non-synthetic) candidate.
    pub fn observed(value: String, num_value: i128, scheme: SchemeId, observation: WordObservation) -> Self {
        Self {
            value,
            num_value,
            scheme,
            synthetic: false,
            observation: Some(observation),
            prob: None,
        }
    }

    /// Construct a synthetic (gap-filled) candidate. Errors if an observation is
    /// accidentally attached (§7 `SyntheticWithObservation`).
    pub fn synthetic(value: String, num_value: i128, scheme: SchemeId) -> Result<Self> {
        Ok(Self {
            value,
            num_value,
            scheme,
            synthetic: true,
            observation: None,
            prob: None,
        })
    }

    /// Check the `synthetic == observation.is_none()` invariant (§3).
    pub fn check_invariant(&self) -> Result<()> {
        if self.synthetic != self.observation.is_none() {
            return Err(PageNumError::SyntheticWithObservation);
        }
        Ok(())
    }

    pub fn word_confidence(&self) -> Option<u8> {
        self.observation.as_ref().map(|o| o.confidence)
    }

    pub fn fontsize(&self) -> f64 {
        self.observation.as_ref().map(|o| o.fontsize).unwrap_or(0.0)
    }

    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        self.observation
            .as_ref()
            .map(|o| o.bbox)
            .unwrap_or((0.0, 0.0, 0.0, 0.0))
    }
}

/// An ordered, same-scheme, page-increasing run of candidates (§3).
#[derive(Debug, Clone)]
pub struct Sequence {
    pub scheme: SchemeId,
    pub items: Vec<(usize, Candidate)>,
}

impl Sequence {
    pub fn new(scheme: SchemeId) -> Self {
        Self {
            scheme,
            items: Vec::new(),
        }
    }

    pub fn first(&self) -> Option<&(usize, Candidate)> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&(usize, Candidate)> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `len / span`, where `span = last.page - first.page` (or 1 when they're equal).
    pub fn density(&self) -> f64 {
        match (self.first(), self.last()) {
            (Some((p0, _)), Some((p1, _))) => {
                let span = if p1 == p0 { 1 } else { p1 - p0 };
                self.len() as f64 / span as f64
            }
            _ => 0.0,
        }
    }

    /// Validate the sequence invariants in §8: strictly increasing pages, and
    /// value deltas equal page-index deltas.
    pub fn validate(&self) -> Result<()> {
        for w in self.items.windows(2) {
            let (p_i, c_i) = &w[0];
            let (p_j, c_j) = &w[1];
            if p_j <= p_i {
                return Err(PageNumError::SchemeMismatch {
                    candidate_scheme: c_j.scheme,
                    sequence_scheme: c_i.scheme,
                });
            }
            if c_i.scheme != self.scheme || c_j.scheme != self.scheme {
                return Err(PageNumError::SchemeMismatch {
                    candidate_scheme: c_j.scheme,
                    sequence_scheme: self.scheme,
                });
            }
            let expected = c_i.num_value + (p_j - p_i) as i128;
            if c_j.num_value != expected {
                return Err(PageNumError::SchemeMismatch {
                    candidate_scheme: c_j.scheme,
                    sequence_scheme: self.scheme,
                });
            }
        }
        Ok(())
    }
}

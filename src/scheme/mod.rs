//! Numbering schemes and the scheme registry (§3, §4.1).

mod composite;

pub use composite::CompositeTemplate;

use crate::error::PageNumError;

/// Handle into a [`SchemeRegistry`]. Indices `0..3` are always the
/// preinstalled Arabic/Roman/SingleLetter schemes; composites are appended
/// from index `3` onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemeId(pub usize);

impl SchemeId {
    pub const ARABIC: SchemeId = SchemeId(0);
    pub const ROMAN: SchemeId = SchemeId(1);
    pub const SINGLE_LETTER: SchemeId = SchemeId(2);
}

/// A numbering scheme: Arabic, Roman, single-letter, or an observed
/// composite template.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberingScheme {
    Arabic,
    Roman,
    SingleLetter,
    Composite(CompositeTemplate),
}

impl NumberingScheme {
    pub fn syntactic_match(&self, s: &str) -> bool {
        match self {
            NumberingScheme::Arabic => !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()),
            NumberingScheme::Roman => parse_roman(s).is_some(),
            // §9 / §4.1 note: return the computed predicate (the upstream
            // source had a latent bug where this was computed but never
            // returned, effectively disabling the scheme).
            NumberingScheme::SingleLetter => {
                let mut chars = s.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
            }
            NumberingScheme::Composite(t) => t.syntactic_match(s),
        }
    }

    pub fn numeral_value(&self, s: &str) -> Option<i128> {
        match self {
            NumberingScheme::Arabic => s.parse::<i128>().ok(),
            NumberingScheme::Roman => parse_roman(s).map(|v| v as i128),
            NumberingScheme::SingleLetter => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => Some(c as i128),
                    _ => None,
                }
            }
            NumberingScheme::Composite(t) => t.numeral_value(s),
        }
    }

    pub fn from_num(&self, n: i128) -> String {
        match self {
            NumberingScheme::Arabic => n.max(0).to_string(),
            NumberingScheme::Roman => format_roman(n.max(1) as i64),
            NumberingScheme::SingleLetter => {
                let code = n.clamp(0, 0x10FFFF) as u32;
                char::from_u32(code).map(|c| c.to_string()).unwrap_or_default()
            }
            NumberingScheme::Composite(t) => t.from_num(n),
        }
    }

    /// `base + steps == candidate` (§3).
    pub fn is_increase(&self, base_value: i128, steps: usize, candidate_value: i128) -> bool {
        base_value + steps as i128 == candidate_value
    }

    pub fn supports_extrapolation(&self) -> bool {
        match self {
            NumberingScheme::Arabic | NumberingScheme::Roman | NumberingScheme::SingleLetter => true,
            NumberingScheme::Composite(t) => t.supports_extrapolation(),
        }
    }
}

/// Append-only scheme registry (§3 lifecycle, §4.1 scan order).
pub struct SchemeRegistry {
    schemes: Vec<NumberingScheme>,
    composite_limit: usize,
}

impl SchemeRegistry {
    pub fn new(composite_limit: usize) -> Self {
        Self {
            schemes: vec![
                NumberingScheme::Arabic,
                NumberingScheme::Roman,
                NumberingScheme::SingleLetter,
            ],
            composite_limit,
        }
    }

    pub fn get(&self, id: SchemeId) -> &NumberingScheme {
        &self.schemes[id.0]
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    pub fn composite_count(&self) -> usize {
        self.schemes.len() - 3
    }

    /// Try the fixed, preinstalled + insertion-order scan (§4.1). Returns the
    /// first matching scheme and its integer value.
    pub fn scan(&self, text: &str) -> Option<(SchemeId, i128)> {
        for (idx, scheme) in self.schemes.iter().enumerate() {
            if scheme.syntactic_match(text) {
                if let Some(value) = scheme.numeral_value(text) {
                    return Some((SchemeId(idx), value));
                }
            }
        }
        None
    }

    /// Is `text` eligible to become a new composite scheme (contains at
    /// least one digit run mixed with non-digit characters, i.e. isn't
    /// plain Arabic/Roman/SingleLetter)? §4.2's "eligible to become a
    /// composite" check, used both for discovery and for the pass-2
    /// classifier prefilter skip.
    pub fn composite_eligible(&self, text: &str) -> bool {
        CompositeTemplate::from_sample(text).is_some()
    }

    /// Attempt to discover and register a new composite scheme from `text`
    /// (§4.1 resolution in DESIGN.md: any digit-bearing sample is eligible,
    /// not only the 8 "simple" shapes; those just gate extrapolation).
    /// Returns the new scheme id and value, or `None` if the cap is reached
    /// or the text isn't composite-eligible.
    pub fn try_discover_composite(&mut self, text: &str) -> Result<Option<(SchemeId, i128)>, PageNumError> {
        let Some(template) = CompositeTemplate::from_sample(text) else {
            return Ok(None);
        };
        if self.composite_count() >= self.composite_limit {
            return Err(PageNumError::CompositeCapReached {
                limit: self.composite_limit,
            });
        }
        let value = template
            .numeral_value(text)
            .ok_or_else(|| PageNumError::InvalidComposite(text.to_string()))?;
        let id = SchemeId(self.schemes.len());
        self.schemes.push(NumberingScheme::Composite(template));
        Ok(Some((id, value)))
    }
}

/// Parse a classical Roman numeral, case-insensitively. Returns `None` for
/// anything that doesn't decompose cleanly (mirrors the teacher's
/// `parse_roman_numeral`, generalized to reject leftover characters).
fn parse_roman(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    const TABLE: &[(&str, i64)] = &[
        ("M", 1000),
        ("CM", 900),
        ("D", 500),
        ("CD", 400),
        ("C", 100),
        ("XC", 90),
        ("L", 50),
        ("XL", 40),
        ("X", 10),
        ("IX", 9),
        ("V", 5),
        ("IV", 4),
        ("I", 1),
    ];
    let lower = s.to_ascii_lowercase();
    let mut result = 0i64;
    let mut remaining = lower.as_str();
    for (numeral, value) in TABLE {
        let lower_numeral = numeral.to_ascii_lowercase();
        while remaining.starts_with(lower_numeral.as_str()) {
            result += value;
            remaining = &remaining[lower_numeral.len()..];
        }
    }
    if remaining.is_empty() && result > 0 {
        Some(result)
    } else {
        None
    }
}

/// Format an integer as a classical uppercase Roman numeral.
fn format_roman(mut n: i64) -> String {
    const TABLE: &[(i64, &str)] = &[
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in TABLE {
        while n >= *value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

//! Composite numbering scheme templates (§3, §4.1).
//!
//! A template is derived from one observed sample: every maximal run of
//! ASCII digits becomes a hole, everything else is a literal segment. No
//! regex dependency is used — matching is a single left-to-right walk,
//! which is sound because literal segments (by construction) never contain
//! a digit, so a maximal digit run at any position is unambiguous.

const PACK_BASE: i128 = 1_000_000_000_000; // 10^12
const MAX_DIGIT_WIDTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Digits,
}

/// A composite scheme template discovered from a sample string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeTemplate {
    segments: Vec<Segment>,
    /// Digit-group widths as observed in the originating sample, used to
    /// zero-pad synthesized values back to a plausible width.
    sample_widths: Vec<usize>,
    supports_extrapolation: bool,
}

impl CompositeTemplate {
    /// Build a template from a sample that contains at least one digit run
    /// mixed with non-digit characters (i.e. is not itself plain Arabic).
    pub fn from_sample(sample: &str) -> Option<Self> {
        if sample.is_empty() || sample.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !sample.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }

        let mut segments = Vec::new();
        let mut sample_widths = Vec::new();
        let mut literal = String::new();
        let mut digits = String::new();

        for c in sample.chars() {
            if c.is_ascii_digit() {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                digits.push(c);
            } else {
                if !digits.is_empty() {
                    sample_widths.push(digits.len());
                    segments.push(Segment::Digits);
                    digits.clear();
                }
                literal.push(c);
            }
        }
        if !digits.is_empty() {
            sample_widths.push(digits.len());
            segments.push(Segment::Digits);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let supports_extrapolation = classify_shape(&segments, &sample_widths);

        Some(Self {
            segments,
            sample_widths,
            supports_extrapolation,
        })
    }

    pub fn supports_extrapolation(&self) -> bool {
        self.supports_extrapolation
    }

    pub fn digit_group_count(&self) -> usize {
        self.segments.iter().filter(|s| matches!(s, Segment::Digits)).count()
    }

    /// Parse a candidate string into its per-segment digit-group strings, if it
    /// matches this template.
    fn parse_groups(&self, s: &str) -> Option<Vec<String>> {
        let mut rest = s;
        let mut groups = Vec::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(lit) => {
                    rest = rest.strip_prefix(lit.as_str())?;
                }
                Segment::Digits => {
                    let digit_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
                    if digit_len == 0 || digit_len > MAX_DIGIT_WIDTH * 2 {
                        return None;
                    }
                    let (group, remainder) = rest.split_at(digit_len);
                    groups.push(group.to_string());
                    rest = remainder;
                }
            }
        }
        if rest.is_empty() {
            Some(groups)
        } else {
            None
        }
    }

    pub fn syntactic_match(&self, s: &str) -> bool {
        self.parse_groups(s).is_some()
    }

    pub fn numeral_value(&self, s: &str) -> Option<i128> {
        let groups = self.parse_groups(s)?;
        let k = groups.len();
        let mut value: i128 = 0;
        for (i, g) in groups.iter().enumerate() {
            let digit_val: i128 = g.parse().ok()?;
            let power = (k - 1 - i) as u32;
            value += digit_val * PACK_BASE.pow(power);
        }
        Some(value)
    }

    pub fn from_num(&self, n: i128) -> String {
        let k = self.digit_group_count();
        let mut remaining = n.max(0);
        let mut groups = vec![0i128; k];
        for i in (0..k).rev() {
            groups[i] = remaining % PACK_BASE;
            remaining /= PACK_BASE;
        }

        let mut out = String::new();
        let mut group_idx = 0;
        for seg in &self.segments {
            match seg {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Digits => {
                    let width = self.sample_widths.get(group_idx).copied().unwrap_or(1);
                    out.push_str(&format!("{:0width$}", groups[group_idx], width = width));
                    group_idx += 1;
                }
            }
        }
        out
    }
}

/// Is this segment shape one of the 8 "simple composite" forms (§4.1)?
/// `(d)`, `Ad`, `dA`, `(d)(d)`, `(d)d`, `d/d`, `d.d`, `d-d`, where `d` is a
/// 1-8 digit run and `A` an uppercase-letter run.
fn classify_shape(segments: &[Segment], widths: &[usize]) -> bool {
    fn is_uppercase_run(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase())
    }
    fn widths_ok(widths: &[usize]) -> bool {
        widths.iter().all(|w| (1..=MAX_DIGIT_WIDTH).contains(w))
    }

    if !widths_ok(widths) {
        return false;
    }

    match segments {
        // (d)
        [Segment::Literal(open), Segment::Digits, Segment::Literal(close)]
            if open == "(" && close == ")" =>
        {
            true
        }
        // Ad
        [Segment::Literal(prefix), Segment::Digits] if is_uppercase_run(prefix) => true,
        // dA
        [Segment::Digits, Segment::Literal(suffix)] if is_uppercase_run(suffix) => true,
        // (d)(d)
        [Segment::Literal(open), Segment::Digits, Segment::Literal(mid), Segment::Digits, Segment::Literal(close)]
            if open == "(" && mid == ")(" && close == ")" =>
        {
            true
        }
        // (d)d
        [Segment::Literal(open), Segment::Digits, Segment::Literal(close), Segment::Digits]
            if open == "(" && close == ")" =>
        {
            true
        }
        // d/d, d.d, d-d
        [Segment::Digits, Segment::Literal(sep), Segment::Digits]
            if sep == "/" || sep == "." || sep == "-" =>
        {
            true
        }
        _ => false,
    }
}

//! Inference options.
//!
//! Mirrors the teacher's `PageNumberOptions` / `PageNumberOptionsBuilder`
//! shape: a plain `Default`-able struct plus a fluent, clamped builder.

use serde::{Deserialize, Serialize};

// ============================================================
// Constants
// ============================================================

/// Global seed for all deterministic randomness (negative sampling,
/// classifier initialization).
pub const GLOBAL_SEED: u64 = 42;

/// Hard cap on the number of composite schemes the registry will admit.
pub const COMPOSITE_LIMIT: usize = 2500;

/// Negatives sampled per page for classifier training.
pub const NEGATIVES_PER_PAGE: usize = 10;

/// Default density threshold for pass 1's sequence enumerator.
pub const DEFAULT_DENSITY_PASS1: f64 = 0.3;

/// Default density threshold for pass 2's sequence enumerator.
pub const DEFAULT_DENSITY_PASS2: f64 = 0.05;

/// Per-edge "none" transition cost in the trellis.
pub const TRELLIS_NONE_COST: f64 = 2.0;

/// Sentinel cost for an edge that was never explicitly established.
pub const TRELLIS_SENTINEL_COST: f64 = TRELLIS_NONE_COST + 1.0;

/// Sequence-length cost divisor used in pass 1.
pub const TRELLIS_F_PASS1: f64 = 3.0;

/// Sequence-length cost divisor used in pass 2.
pub const TRELLIS_F_PASS2: f64 = 1.0;

/// Which binary classifier to fit between passes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    #[default]
    NaiveBayes,
    LogisticRegression,
}

/// Inference options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Which classifier to train between pass 1 and pass 2.
    pub classifier: ClassifierKind,
    /// Whether to run the two-pass driver (§4.7) at all.
    pub two_pass: bool,
    /// Sequence-enumerator density threshold for pass 1.
    pub density_pass1: f64,
    /// Sequence-enumerator density threshold for pass 2.
    pub density_pass2: f64,
    /// Whether to run the opportunistic edge filler (§4.8).
    pub opportunistic_fill: bool,
    /// Overrides the output document's `identifier` field.
    pub identifier: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            classifier: ClassifierKind::default(),
            two_pass: true,
            density_pass1: DEFAULT_DENSITY_PASS1,
            density_pass2: DEFAULT_DENSITY_PASS2,
            opportunistic_fill: false,
            identifier: None,
        }
    }
}

impl Options {
    /// Create a new options builder.
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }
}

/// Builder for [`Options`].
#[derive(Debug, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Set the classifier kind.
    #[must_use]
    pub fn classifier(mut self, kind: ClassifierKind) -> Self {
        self.options.classifier = kind;
        self
    }

    /// Toggle the two-pass driver.
    #[must_use]
    pub fn two_pass(mut self, enabled: bool) -> Self {
        self.options.two_pass = enabled;
        self
    }

    /// Set pass-1 density threshold (clamped to `[0, 1]`).
    #[must_use]
    pub fn density_pass1(mut self, density: f64) -> Self {
        self.options.density_pass1 = density.clamp(0.0, 1.0);
        self
    }

    /// Set pass-2 density threshold (clamped to `[0, 1]`).
    #[must_use]
    pub fn density_pass2(mut self, density: f64) -> Self {
        self.options.density_pass2 = density.clamp(0.0, 1.0);
        self
    }

    /// Toggle the opportunistic edge filler.
    #[must_use]
    pub fn opportunistic_fill(mut self, enabled: bool) -> Self {
        self.options.opportunistic_fill = enabled;
        self
    }

    /// Override the output document's identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.options.identifier = Some(identifier.into());
        self
    }

    /// Build the options.
    #[must_use]
    pub fn build(self) -> Options {
        self.options
    }
}

/// A partial options overlay loaded from an optional TOML config file
/// (§6.1, ambient config layer). Every field defaults to "unset" so the
/// CLI can layer defaults → config file → explicit flags.
#[derive(Debug, Default, Deserialize)]
pub struct PartialConfig {
    pub classifier: Option<ClassifierKind>,
    pub two_pass: Option<bool>,
    pub density_pass1: Option<f64>,
    pub density_pass2: Option<f64>,
    pub opportunistic_fill: Option<bool>,
    pub identifier: Option<String>,
}

impl PartialConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Apply this overlay onto `opts`, leaving unset fields untouched.
    #[must_use]
    pub fn apply(&self, mut opts: Options) -> Options {
        if let Some(c) = self.classifier {
            opts.classifier = c;
        }
        if let Some(v) = self.two_pass {
            opts.two_pass = v;
        }
        if let Some(v) = self.density_pass1 {
            opts.density_pass1 = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.density_pass2 {
            opts.density_pass2 = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.opportunistic_fill {
            opts.opportunistic_fill = v;
        }
        if let Some(ref v) = self.identifier {
            opts.identifier = Some(v.clone());
        }
        opts
    }
}

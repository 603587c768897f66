//! Feature Extractor (§4.6): fixed 40-dimensional geometric/typographic
//! feature vector per observation, plus population standardization.

use crate::model::{PageInfo, WordObservation};

pub const FEATURE_DIM: usize = 40;

/// Compute the 40-dim feature vector for one observation in the context of
/// its page (§4.6 index table).
pub fn extract(obs: &WordObservation, page: &PageInfo, page_index: usize) -> [f64; FEATURE_DIM] {
    let mut f = [0.0f64; FEATURE_DIM];

    let (x1, y1, x2, y2) = obs.bbox;
    f[0] = x1;
    f[1] = y1;
    f[2] = x2;
    f[3] = y2;

    f[4] = x1 * x1;
    f[5] = y1 * y1;
    f[6] = x2 * x2;
    f[7] = y2 * y2;
    f[8] = x1 * y1;
    f[9] = x1 * x2;
    f[10] = x1 * y2;
    f[11] = y1 * x2;
    f[12] = y1 * y2;
    f[13] = x2 * y2;

    let (pw, ph) = page.dimensions;
    f[14] = if ph != 0.0 { (pw / ph).floor() } else { 0.0 };

    let (cx1, cy1, cx2, cy2) = page.content_bbox_or_zero();
    f[15] = cx1;
    f[16] = cy1;
    f[17] = cx2;
    f[18] = cy2;

    f[19] = if page_index % 2 == 0 { 1.0 } else { -1.0 };

    for i in 0..19 {
        f[20 + i] = f[i] * f[19];
    }

    f[39] = obs.fontsize;

    f
}

/// A saved per-feature mean/stddev vector (§9: "standardize ... with a saved
/// mean/stddev vector carried alongside the fitted model").
#[derive(Debug, Clone)]
pub struct Standardizer {
    mean: [f64; FEATURE_DIM],
    std: [f64; FEATURE_DIM],
}

impl Standardizer {
    /// Fit mean/population-stddev per feature. Zero-variance features
    /// standardize to 0 rather than dividing by zero (§4.6).
    pub fn fit(samples: &[[f64; FEATURE_DIM]]) -> Self {
        let n = samples.len().max(1) as f64;
        let mut mean = [0.0f64; FEATURE_DIM];
        for s in samples {
            for i in 0..FEATURE_DIM {
                mean[i] += s[i];
            }
        }
        for m in mean.iter_mut() {
            *m /= n;
        }

        let mut var = [0.0f64; FEATURE_DIM];
        for s in samples {
            for i in 0..FEATURE_DIM {
                let d = s[i] - mean[i];
                var[i] += d * d;
            }
        }
        let mut std = [0.0f64; FEATURE_DIM];
        for i in 0..FEATURE_DIM {
            std[i] = (var[i] / n).sqrt();
        }

        Self { mean, std }
    }

    pub fn transform(&self, x: &[f64; FEATURE_DIM]) -> [f64; FEATURE_DIM] {
        let mut out = [0.0f64; FEATURE_DIM];
        for i in 0..FEATURE_DIM {
            out[i] = if self.std[i] > 0.0 { (x[i] - self.mean[i]) / self.std[i] } else { 0.0 };
        }
        out
    }
}

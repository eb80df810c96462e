// crates/choromap-core/src/scale.rs
use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};

/// Nine-class sequential blue scheme, lightest first.
pub const SCHEME_BLUES_9: [&str; 9] = [
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

/// Rounds half-way cases towards positive infinity (`2.5 -> 3`, `-2.5 -> -2`).
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Threshold scale: `n - 1` ascending split points cut the real line into
/// `n` buckets, each painted with one color.
///
/// Bucket `k` holds the values `v` with `thresholds[k - 1] <= v < thresholds[k]`;
/// the first and last buckets are open-ended, so every input maps to a color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    thresholds: Vec<f64>,
    colors: Vec<String>,
}

impl ColorScale {
    pub fn new(thresholds: Vec<f64>, colors: Vec<String>) -> Result<Self> {
        if colors.len() != thresholds.len() + 1 {
            return Err(MapError::InvalidScale(format!(
                "{} thresholds need {} colors, got {}",
                thresholds.len(),
                thresholds.len() + 1,
                colors.len()
            )));
        }
        if thresholds.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(MapError::InvalidScale(
                "thresholds must be strictly ascending".into(),
            ));
        }
        Ok(Self { thresholds, colors })
    }

    /// Splits `[lo, hi]` into `colors.len()` equal steps; the split points are
    /// `lo + i * step` for every step but the last.
    pub fn uniform(lo: f64, hi: f64, colors: Vec<String>) -> Result<Self> {
        if colors.len() < 2 || !(lo < hi) {
            return Err(MapError::InvalidScale(format!(
                "need at least two colors over a non-empty domain, got {} over [{lo}, {hi}]",
                colors.len()
            )));
        }
        Self::new(uniform_thresholds(lo, hi, colors.len() - 1), colors)
    }

    /// The education scale: 2.6%–75.1% over [`SCHEME_BLUES_9`].
    pub fn education() -> Self {
        Self {
            thresholds: uniform_thresholds(2.6, 75.1, SCHEME_BLUES_9.len() - 1),
            colors: SCHEME_BLUES_9.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    /// Index of the bucket containing `value`. `NaN` falls into bucket 0.
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|t| *t <= value)
    }

    pub fn color(&self, value: f64) -> &str {
        &self.colors[self.bucket(value)]
    }

    /// Bounds `[lo, hi)` of the bucket painted with `color`; `None` marks an
    /// open end. Returns `None` when the color is not part of the scale.
    pub fn invert_extent(&self, color: &str) -> Option<(Option<f64>, Option<f64>)> {
        let k = self.colors.iter().position(|c| c == color)?;
        let lo = k.checked_sub(1).map(|i| self.thresholds[i]);
        let hi = self.thresholds.get(k).copied();
        Some((lo, hi))
    }
}

fn uniform_thresholds(lo: f64, hi: f64, steps: usize) -> Vec<f64> {
    let step = (hi - lo) / steps as f64;
    (0..steps).map(|i| lo + i as f64 * step).collect()
}

/// Linear mapping from a value domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    /// Round every output to a whole pixel.
    pub round: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: false,
        }
    }

    pub fn rounded(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            round: true,
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        let out = r0 * (1.0 - t) + r1 * t;
        if self.round {
            round_half_up(out)
        } else {
            out
        }
    }

    pub fn span(&self) -> f64 {
        self.range.1 - self.range.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn education_scale_has_eight_split_points() {
        let scale = ColorScale::education();
        assert_eq!(scale.thresholds().len(), 8);
        assert_eq!(scale.thresholds()[0], 2.6);
        assert!((scale.thresholds()[7] - 66.0375).abs() < 1e-9);
    }

    #[test]
    fn threshold_lookup_is_right_closed_on_split_points() {
        let scale = ColorScale::education();
        assert_eq!(scale.color(0.0), "#f7fbff");
        assert_eq!(scale.color(2.59), "#f7fbff");
        assert_eq!(scale.color(2.6), "#deebf7");
        assert_eq!(scale.color(21.3), "#9ecae1");
        assert_eq!(scale.color(75.1), "#08306b");
        assert_eq!(scale.color(f64::NAN), "#f7fbff");
    }

    #[test]
    fn mapping_is_total_and_monotonic_over_domain() {
        let scale = ColorScale::education();
        let mut last = 0;
        let mut p = 2.6;
        while p <= 75.1 {
            let k = scale.bucket(p);
            assert!(k < 9);
            assert!(SCHEME_BLUES_9.contains(&scale.color(p)));
            assert!(k >= last, "bucket decreased at {p}");
            last = k;
            p += 0.05;
        }
    }

    #[test]
    fn invert_extent_marks_open_ends() {
        let scale = ColorScale::education();
        assert_eq!(scale.invert_extent("#f7fbff"), Some((None, Some(2.6))));
        let (lo, hi) = scale.invert_extent("#08306b").unwrap();
        assert!(lo.is_some());
        assert_eq!(hi, None);
        assert_eq!(scale.invert_extent("#000000"), None);
    }

    #[test]
    fn rejects_mismatched_colors() {
        let err = ColorScale::new(vec![1.0, 2.0], vec!["#000".into()]).unwrap_err();
        assert!(matches!(err, MapError::InvalidScale(_)));
        assert!(ColorScale::new(vec![2.0, 1.0], vec!["a".into(), "b".into(), "c".into()]).is_err());
    }

    #[test]
    fn rounded_linear_scale() {
        let key = LinearScale::rounded((2.6, 75.1), (600.0, 860.0));
        assert_eq!(key.apply(2.6), 600.0);
        assert_eq!(key.apply(75.1), 860.0);
        assert_eq!(key.apply(38.85), 730.0);
        assert_eq!(key.span(), 260.0);
    }

    #[test]
    fn round_half_up_matches_browser_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(66.0375), 66.0);
    }
}

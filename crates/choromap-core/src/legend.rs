// crates/choromap-core/src/legend.rs
use crate::scale::{round_half_up, ColorScale, LinearScale};
use serde::Serialize;

/// One colored block of the legend key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSegment {
    pub color: String,
    /// Bucket bounds, open ends clamped to the key domain.
    pub lo: f64,
    pub hi: f64,
    pub x: f64,
    pub width: f64,
}

/// Axis tick placed under a split point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendTick {
    pub value: f64,
    pub x: f64,
    pub label: String,
}

/// Geometry of the legend key, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub segments: Vec<LegendSegment>,
    pub ticks: Vec<LegendTick>,
}

impl Legend {
    pub fn build(scale: &ColorScale, key: &LinearScale) -> Self {
        let (d0, d1) = key.domain;

        let segments = scale
            .colors()
            .iter()
            .filter_map(|color| {
                let (lo, hi) = scale.invert_extent(color)?;
                let lo = lo.unwrap_or(d0);
                let hi = hi.unwrap_or(d1);
                let x = key.apply(lo);
                Some(LegendSegment {
                    color: color.clone(),
                    lo,
                    hi,
                    x,
                    width: key.apply(hi) - x,
                })
            })
            .collect();

        let ticks = scale
            .thresholds()
            .iter()
            .map(|&value| LegendTick {
                value,
                x: key.apply(value),
                label: format!("{}%", round_half_up(value)),
            })
            .collect();

        Legend { segments, ticks }
    }

    pub fn total_width(&self) -> f64 {
        self.segments.iter().map(|s| s.width).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;

    fn legend() -> (Legend, LinearScale) {
        let cfg = MapConfig::default();
        let key = cfg.key_scale();
        (Legend::build(&cfg.color_scale().unwrap(), &key), key)
    }

    #[test]
    fn one_segment_per_color() {
        let (legend, _) = legend();
        assert_eq!(legend.segments.len(), 9);
        assert_eq!(legend.segments[0].color, "#f7fbff");
        // The first bucket is open below and clamps to an empty block.
        assert_eq!(legend.segments[0].width, 0.0);
        assert_eq!(legend.segments[8].hi, 75.1);
    }

    #[test]
    fn widths_sum_to_key_width() {
        let (legend, key) = legend();
        assert_eq!(legend.total_width(), key.span());
    }

    #[test]
    fn widths_are_proportional_to_bucket_span() {
        let (legend, key) = legend();
        let domain = key.domain.1 - key.domain.0;
        for s in &legend.segments {
            let exact = (s.hi - s.lo) / domain * key.span();
            assert!((s.width - exact).abs() <= 1.0, "{s:?} vs {exact}");
        }
    }

    #[test]
    fn tick_labels_are_whole_percentages() {
        let (legend, _) = legend();
        let labels: Vec<&str> = legend.ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["3%", "12%", "21%", "30%", "39%", "48%", "57%", "66%"]
        );
        assert_eq!(legend.ticks[0].x, 600.0);
    }
}

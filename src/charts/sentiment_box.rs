use std::collections::BTreeMap;

use super::{BoxGroup, BoxSpec, ChartBuilder, ChartInput, ChartKind, ChartSpec};
use crate::data::model::{Sentiment, TrackFeature};
use crate::style::ChartStyle;

// ---------------------------------------------------------------------------
// Five-number summary
// ---------------------------------------------------------------------------

/// Box-plot statistics of one sample.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers
/// reach the most extreme values within 1.5 × IQR of the box; anything
/// beyond them is an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    /// `None` when the sample holds no finite values.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - fence, q3 + fence);

        let lower_whisker = sorted.iter().copied().find(|v| *v >= low_fence).unwrap_or(q1);
        let upper_whisker = sorted.iter().rev().copied().find(|v| *v <= high_fence).unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
            count: sorted.len(),
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Distribution of one numeric feature per sentiment.
#[derive(Debug, Clone, Copy)]
pub struct SentimentBoxChart {
    pub feature: TrackFeature,
}

impl SentimentBoxChart {
    pub fn new(feature: TrackFeature) -> Self {
        Self { feature }
    }
}

impl ChartBuilder for SentimentBoxChart {
    fn build(&self, input: &ChartInput<'_>, style: &ChartStyle) -> ChartSpec {
        let mut samples: BTreeMap<&Sentiment, Vec<f64>> = BTreeMap::new();
        for track in input.view {
            samples
                .entry(&track.sentiment)
                .or_default()
                .push(track.feature(self.feature));
        }

        let groups = samples
            .into_iter()
            .filter_map(|(sentiment, values)| {
                let stats = BoxStats::from_values(values)?;
                Some(BoxGroup {
                    sentiment: sentiment.clone(),
                    color: style.color_for(sentiment),
                    fill: style.fill_for(sentiment),
                    stats,
                })
            })
            .collect();

        let title = self.feature.title();
        ChartSpec {
            layout: style.layout(format!("Sentiment vs. {title}"), "Sentiment", title),
            kind: ChartKind::Box(BoxSpec {
                feature: self.feature,
                groups,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;
    use crate::data::model::{MoodMetric, Track};

    #[test]
    fn quartiles_interpolate_linearly() {
        let stats = BoxStats::from_values([1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!((stats.lower_whisker, stats.upper_whisker), (1.0, 4.0));
        assert!(stats.outliers.is_empty());
        assert_eq!(stats.count, 4);
    }

    #[test]
    fn far_values_become_outliers() {
        let stats = BoxStats::from_values([10.0, 11.0, 12.0, 13.0, 14.0, 100.0]).unwrap();
        assert_eq!(stats.outliers, [100.0]);
        assert_eq!(stats.upper_whisker, 14.0);
        assert_eq!(stats.lower_whisker, 10.0);
    }

    #[test]
    fn single_value_collapses_the_box() {
        let stats = BoxStats::from_values([0.3]).unwrap();
        assert_eq!(
            (stats.lower_whisker, stats.q1, stats.median, stats.q3, stats.upper_whisker),
            (0.3, 0.3, 0.3, 0.3, 0.3)
        );
    }

    #[test]
    fn nan_values_are_skipped() {
        assert!(BoxStats::from_values([f64::NAN]).is_none());
        let stats = BoxStats::from_values([f64::NAN, 1.0, 3.0]).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.median, 2.0);
    }

    #[test]
    fn one_group_per_sentiment_in_display_order() {
        let tracks: Vec<Track> = vec![
            track("a", "pop", "negative", 10.0),
            track("b", "pop", "positive", 90.0),
            track("c", "pop", "positive", 70.0),
            track("d", "pop", "mixed", 50.0),
        ];
        let view: Vec<&Track> = tracks.iter().collect();
        let input = ChartInput {
            view: &view,
            aggregate: &[],
            mood_metric: MoodMetric::default(),
        };
        let spec = SentimentBoxChart::new(TrackFeature::Popularity).build(&input, ChartStyle::shared());
        assert_eq!(spec.layout.title, "Sentiment vs. Popularity");
        assert_eq!(spec.layout.y_title, "Popularity");

        let ChartKind::Box(boxes) = spec.kind else {
            panic!("expected a box chart");
        };
        let order: Vec<&str> = boxes.groups.iter().map(|g| g.sentiment.label()).collect();
        assert_eq!(order, ["positive", "negative", "mixed"]);
        assert_eq!(boxes.groups[0].stats.median, 80.0);
    }

    #[test]
    fn audio_feature_titles() {
        let input = ChartInput {
            view: &[],
            aggregate: &[],
            mood_metric: MoodMetric::default(),
        };
        let spec = SentimentBoxChart::new(MoodMetric::Danceability.into()).build(&input, ChartStyle::shared());
        assert_eq!(spec.layout.title, "Sentiment vs. Danceability");
        assert!(spec.is_empty());
    }
}

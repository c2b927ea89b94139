use std::collections::BTreeMap;

use super::{ChartBuilder, ChartInput, ChartKind, ChartSpec, ScatterPoint, ScatterSeries, ScatterSpec};
use crate::data::model::{MoodMetric, Sentiment, TrackFeature};
use crate::style::ChartStyle;

const MIN_RADIUS: f32 = 1.5;
const MAX_RADIUS: f32 = 10.0;

/// Scatter of the selected mood metric against energy; marker area grows
/// with popularity.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodNavigatorChart;

/// Marker radius for `popularity` relative to the largest popularity shown.
/// Area, not radius, is proportional to popularity.
pub fn marker_radius(popularity: f64, max_popularity: f64) -> f32 {
    if !(max_popularity > 0.0) || !popularity.is_finite() || popularity <= 0.0 {
        return MIN_RADIUS;
    }
    let scale = (popularity / max_popularity).clamp(0.0, 1.0).sqrt() as f32;
    MIN_RADIUS + (MAX_RADIUS - MIN_RADIUS) * scale
}

impl ChartBuilder for MoodNavigatorChart {
    fn build(&self, input: &ChartInput<'_>, style: &ChartStyle) -> ChartSpec {
        let metric = input.mood_metric;
        let x_feature = TrackFeature::from(metric);
        let y_feature = TrackFeature::from(MoodMetric::Energy);

        let max_popularity = input
            .view
            .iter()
            .map(|t| t.popularity)
            .filter(|p| p.is_finite())
            .fold(0.0, f64::max);

        let mut by_sentiment: BTreeMap<&Sentiment, Vec<ScatterPoint>> = BTreeMap::new();
        for track in input.view {
            let (x, y) = (track.feature(x_feature), track.feature(y_feature));
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            by_sentiment.entry(&track.sentiment).or_default().push(ScatterPoint {
                x,
                y,
                radius: marker_radius(track.popularity, max_popularity),
                popularity: track.popularity,
                track_name: track.track_name.clone(),
                artists: track.artists.clone(),
            });
        }

        let series = by_sentiment
            .into_iter()
            .map(|(sentiment, points)| ScatterSeries {
                sentiment: sentiment.clone(),
                color: style.color_for(sentiment),
                points,
            })
            .collect();

        ChartSpec {
            layout: style
                .layout(
                    format!("Find Your Track Based on {metric} and Energy"),
                    x_feature.title(),
                    y_feature.title(),
                )
                .left_aligned(0.05),
            kind: ChartKind::Scatter(ScatterSpec {
                x_feature,
                y_feature,
                series,
            }),
        }
    }
}

use std::collections::{BTreeMap, BTreeSet};

use super::{BarSeries, ChartBuilder, ChartInput, ChartKind, ChartSpec, StackedBarSpec};
use crate::data::model::Sentiment;
use crate::style::ChartStyle;

/// Stacked bars: genre on x, track count on y, one stack layer per sentiment.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreSentimentChart;

impl ChartBuilder for GenreSentimentChart {
    fn build(&self, input: &ChartInput<'_>, style: &ChartStyle) -> ChartSpec {
        let categories: Vec<String> = input
            .aggregate
            .iter()
            .map(|row| row.genre.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        // sentiment → genre index → count
        let mut layers: BTreeMap<&Sentiment, Vec<f64>> = BTreeMap::new();
        for row in input.aggregate {
            let Ok(idx) = categories.binary_search(&row.genre) else {
                continue;
            };
            let values = layers
                .entry(&row.sentiment)
                .or_insert_with(|| vec![0.0; categories.len()]);
            values[idx] += row.count as f64;
        }

        let series = layers
            .into_iter()
            .map(|(sentiment, values)| BarSeries {
                sentiment: sentiment.clone(),
                color: style.color_for(sentiment),
                values,
            })
            .collect();

        ChartSpec {
            layout: style
                .layout("Sentiment Distribution by Genre", "Genre", "Count")
                .legend_title("Sentiment"),
            kind: ChartKind::StackedBar(StackedBarSpec { categories, series }),
        }
    }
}

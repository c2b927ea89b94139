/// Chart builders: filtered tracks → toolkit-independent chart specs.
///
/// ```text
///   FilteredView ──┬──► aggregate ──► GenreSentimentChart ──┐
///                  ├──────────────► SentimentBoxChart × 3 ───┼──► DashboardCharts
///                  └──────────────► MoodNavigatorChart ──────┘
/// ```
///
/// Every builder takes the same [`ChartInput`] and the shared
/// [`ChartStyle`], and returns a [`ChartSpec`] that `ui::plot` draws.
pub mod genre_sentiment;
pub mod mood_navigator;
pub mod sentiment_box;

use eframe::egui::Color32;

use crate::data::aggregate::GenreSentimentCount;
use crate::data::model::{MoodMetric, Sentiment, Track, TrackFeature};
use crate::style::{ChartLayout, ChartStyle};

pub use genre_sentiment::GenreSentimentChart;
pub use mood_navigator::MoodNavigatorChart;
pub use sentiment_box::{BoxStats, SentimentBoxChart};

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub layout: ChartLayout,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    StackedBar(StackedBarSpec),
    Box(BoxSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    /// True when there is nothing to draw (e.g. empty genre selection result).
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::StackedBar(bar) => bar.categories.is_empty(),
            ChartKind::Box(b) => b.groups.is_empty(),
            ChartKind::Scatter(s) => s.series.iter().all(|ser| ser.points.is_empty()),
        }
    }
}

/// Bars stacked per category; `values[i]` belongs to `categories[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarSpec {
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub sentiment: Sentiment,
    pub color: Color32,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpec {
    pub feature: TrackFeature,
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub sentiment: Sentiment,
    pub color: Color32,
    pub fill: Color32,
    pub stats: BoxStats,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub x_feature: TrackFeature,
    pub y_feature: TrackFeature,
    pub series: Vec<ScatterSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub sentiment: Sentiment,
    pub color: Color32,
    pub points: Vec<ScatterPoint>,
}

/// One track on the scatter, with its tooltip text.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub popularity: f64,
    pub track_name: String,
    pub artists: String,
}

impl ScatterSpec {
    /// Closest point to `(x, y)` within `max_distance`, for hover labels.
    pub fn nearest(&self, x: f64, y: f64, max_distance: f64) -> Option<&ScatterPoint> {
        self.series
            .iter()
            .flat_map(|s| &s.points)
            .map(|p| (p, (p.x - x).hypot(p.y - y)))
            .filter(|(_, d)| *d <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(p, _)| p)
    }
}

// ---------------------------------------------------------------------------
// Builder capability
// ---------------------------------------------------------------------------

/// Everything a builder may read for one render pass.
#[derive(Debug, Clone, Copy)]
pub struct ChartInput<'a> {
    pub view: &'a [&'a Track],
    pub aggregate: &'a [GenreSentimentCount],
    pub mood_metric: MoodMetric,
}

pub trait ChartBuilder {
    fn build(&self, input: &ChartInput<'_>, style: &ChartStyle) -> ChartSpec;
}

// ---------------------------------------------------------------------------
// Dashboard: the five charts in tab order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    MoodNavigator,
    GenreSentiment,
    Popularity,
    Danceability,
    Energy,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 5] = [
        DashboardTab::MoodNavigator,
        DashboardTab::GenreSentiment,
        DashboardTab::Popularity,
        DashboardTab::Danceability,
        DashboardTab::Energy,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::MoodNavigator => "Mood Navigator",
            DashboardTab::GenreSentiment => "Sentiment Distribution by Genre",
            DashboardTab::Popularity => "Sentiment vs. Popularity",
            DashboardTab::Danceability => "Sentiment vs. Danceability",
            DashboardTab::Energy => "Sentiment vs. Energy",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCharts {
    pub mood_navigator: ChartSpec,
    pub genre_sentiment: ChartSpec,
    pub popularity: ChartSpec,
    pub danceability: ChartSpec,
    pub energy: ChartSpec,
}

impl DashboardCharts {
    pub fn get(&self, tab: DashboardTab) -> &ChartSpec {
        match tab {
            DashboardTab::MoodNavigator => &self.mood_navigator,
            DashboardTab::GenreSentiment => &self.genre_sentiment,
            DashboardTab::Popularity => &self.popularity,
            DashboardTab::Danceability => &self.danceability,
            DashboardTab::Energy => &self.energy,
        }
    }
}

/// Run all five builders against one input.
pub fn build_dashboard(input: &ChartInput<'_>, style: &ChartStyle) -> DashboardCharts {
    DashboardCharts {
        mood_navigator: MoodNavigatorChart.build(input, style),
        genre_sentiment: GenreSentimentChart.build(input, style),
        popularity: SentimentBoxChart::new(TrackFeature::Popularity).build(input, style),
        danceability: SentimentBoxChart::new(MoodMetric::Danceability.into()).build(input, style),
        energy: SentimentBoxChart::new(MoodMetric::Energy.into()).build(input, style),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::filter::apply;
    use crate::data::model::tests::track;
    use crate::data::model::TrackDataset;

    fn dataset() -> TrackDataset {
        let mut tracks = vec![
            track("a", "pop", "positive", 80.0),
            track("b", "rock", "negative", 40.0),
            track("c", "pop", "neutral", 60.0),
            track("d", "rock", "positive", 20.0),
        ];
        tracks[1].valence = 0.9;
        TrackDataset::from_tracks(tracks)
    }

    fn charts(ds: &TrackDataset, genres: &[&str], metric: MoodMetric) -> DashboardCharts {
        let selected: BTreeSet<String> = genres.iter().map(|g| g.to_string()).collect();
        let view = apply(ds, &selected);
        let table = aggregate(&view);
        let input = ChartInput {
            view: &view,
            aggregate: &table,
            mood_metric: metric,
        };
        build_dashboard(&input, ChartStyle::shared())
    }

    #[test]
    fn tabs_are_in_fixed_order() {
        let titles: Vec<&str> = DashboardTab::ALL.iter().map(|t| t.title()).collect();
        assert_eq!(
            titles,
            [
                "Mood Navigator",
                "Sentiment Distribution by Genre",
                "Sentiment vs. Popularity",
                "Sentiment vs. Danceability",
                "Sentiment vs. Energy"
            ]
        );
    }

    #[test]
    fn absent_genre_gives_five_empty_charts() {
        let ds = dataset();
        let charts = charts(&ds, &["jazz"], MoodMetric::default());
        for tab in DashboardTab::ALL {
            assert!(charts.get(tab).is_empty(), "{} should be empty", tab.title());
        }
    }

    #[test]
    fn metric_change_only_touches_mood_navigator() {
        let ds = dataset();
        let valence = charts(&ds, &[], MoodMetric::Valence);
        let energy = charts(&ds, &[], MoodMetric::Energy);

        assert!(valence.mood_navigator.layout.title.contains("valence"));
        assert_eq!(valence.mood_navigator.layout.x_title, "Valence");
        let ChartKind::Scatter(scatter) = &valence.mood_navigator.kind else {
            panic!("mood navigator should be a scatter");
        };
        assert_eq!(scatter.x_feature, TrackFeature::Audio(MoodMetric::Valence));
        assert!(scatter.series.iter().flat_map(|s| &s.points).any(|p| p.x == 0.9));

        assert_ne!(valence.mood_navigator, energy.mood_navigator);
        assert!(energy.mood_navigator.layout.title.contains("energy"));
        assert_eq!(valence.genre_sentiment, energy.genre_sentiment);
        assert_eq!(valence.popularity, energy.popularity);
        assert_eq!(valence.danceability, energy.danceability);
        assert_eq!(valence.energy, energy.energy);
    }

    #[test]
    fn unknown_sentiment_renders_with_fallback_colour() {
        let ds = TrackDataset::from_tracks(vec![
            track("a", "pop", "positive", 50.0),
            track("b", "pop", "unknown", 30.0),
        ]);
        let charts = charts(&ds, &[], MoodMetric::default());
        let fallback = ChartStyle::shared().fallback;

        let ChartKind::StackedBar(bar) = &charts.genre_sentiment.kind else {
            panic!("expected bars");
        };
        assert!(bar.series.iter().any(|s| s.color == fallback));

        let ChartKind::Box(boxes) = &charts.energy.kind else {
            panic!("expected boxes");
        };
        assert_eq!(boxes.groups.last().map(|g| g.color), Some(fallback));
    }

    #[test]
    fn every_chart_shares_the_template() {
        let ds = dataset();
        let charts = charts(&ds, &[], MoodMetric::default());
        let template = ChartStyle::shared().template;
        for tab in DashboardTab::ALL {
            assert_eq!(charts.get(tab).layout.template, template);
        }
    }

    #[test]
    fn nearest_point_respects_distance() {
        let ds = dataset();
        let charts = charts(&ds, &[], MoodMetric::Valence);
        let ChartKind::Scatter(scatter) = &charts.mood_navigator.kind else {
            panic!("expected scatter");
        };
        let hit = scatter.nearest(0.88, 0.6, 0.05).unwrap();
        assert_eq!(hit.track_name, "b");
        assert!(scatter.nearest(0.0, 0.0, 0.05).is_none());
    }
}

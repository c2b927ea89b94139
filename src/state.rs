use crate::charts::{build_dashboard, ChartInput, DashboardCharts, DashboardTab};
use crate::data::aggregate::aggregate;
use crate::data::filter::{apply, FilterSelection};
use crate::data::model::{MoodMetric, TrackDataset};
use crate::style::ChartStyle;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, read-only until replaced by File → Open.
    pub dataset: TrackDataset,

    /// Sidebar inputs.
    pub selection: FilterSelection,

    /// Chart specs for the current selection (cached between changes).
    pub charts: DashboardCharts,

    /// Number of tracks passing the genre filter.
    pub visible_count: usize,

    pub active_tab: DashboardTab,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    style: &'static ChartStyle,
}

impl AppState {
    pub fn new(dataset: TrackDataset, style: &'static ChartStyle) -> Self {
        let selection = FilterSelection::default();
        let (charts, visible_count) = compute(&dataset, &selection, style);
        Self {
            dataset,
            selection,
            charts,
            visible_count,
            active_tab: DashboardTab::default(),
            status_message: None,
            style,
        }
    }

    /// Replace the dataset; the genre selection starts over.
    pub fn set_dataset(&mut self, dataset: TrackDataset) {
        self.dataset = dataset;
        self.selection.clear_genres();
        self.status_message = None;
        self.recompute();
    }

    /// Filter → aggregate → rebuild all five charts.
    pub fn recompute(&mut self) {
        let (charts, visible_count) = compute(&self.dataset, &self.selection, self.style);
        log::debug!(
            "Recomputed charts: {visible_count} of {} tracks, genres {:?}, metric {}",
            self.dataset.len(),
            self.selection.selected_genres,
            self.selection.mood_metric
        );
        self.charts = charts;
        self.visible_count = visible_count;
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.selection.toggle_genre(genre);
        self.recompute();
    }

    pub fn clear_genres(&mut self) {
        if !self.selection.selected_genres.is_empty() {
            self.selection.clear_genres();
            self.recompute();
        }
    }

    pub fn set_mood_metric(&mut self, metric: MoodMetric) {
        if self.selection.mood_metric != metric {
            self.selection.set_mood_metric(metric);
            self.recompute();
        }
    }
}

fn compute(
    dataset: &TrackDataset,
    selection: &FilterSelection,
    style: &ChartStyle,
) -> (DashboardCharts, usize) {
    let view = apply(dataset, &selection.selected_genres);
    let table = aggregate(&view);
    let input = ChartInput {
        view: &view,
        aggregate: &table,
        mood_metric: selection.mood_metric,
    };
    (build_dashboard(&input, style), view.len())
}

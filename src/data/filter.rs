use std::collections::BTreeSet;

use super::model::{MoodMetric, Track, TrackDataset};

// ---------------------------------------------------------------------------
// Filter selection: genre set + mood metric
// ---------------------------------------------------------------------------

/// The two sidebar inputs. An empty genre set means "no filter" (show all).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub selected_genres: BTreeSet<String>,
    pub mood_metric: MoodMetric,
}

impl FilterSelection {
    /// Add the genre if absent, remove it if present.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
    }

    pub fn clear_genres(&mut self) {
        self.selected_genres.clear();
    }

    pub fn set_mood_metric(&mut self, metric: MoodMetric) {
        self.mood_metric = metric;
    }
}

/// Read-only subset of a dataset's tracks, in dataset order.
pub type FilteredView<'a> = Vec<&'a Track>;

/// Return the tracks whose genre is in `selected_genres`, or every track
/// when the selection is empty.
pub fn apply<'a>(dataset: &'a TrackDataset, selected_genres: &BTreeSet<String>) -> FilteredView<'a> {
    if selected_genres.is_empty() {
        return dataset.tracks.iter().collect();
    }
    dataset
        .tracks
        .iter()
        .filter(|t| selected_genres.contains(&t.genre))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::track;

    fn dataset() -> TrackDataset {
        TrackDataset::from_tracks(vec![
            track("a", "pop", "positive", 80.0),
            track("b", "rock", "negative", 40.0),
            track("c", "pop", "neutral", 60.0),
            track("d", "metal", "negative", 20.0),
            track("e", "rock", "positive", 50.0),
        ])
    }

    fn genres(v: &[&str]) -> BTreeSet<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_is_identity() {
        let ds = dataset();
        let view = apply(&ds, &BTreeSet::new());
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.tracks).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn selection_keeps_only_members() {
        let ds = dataset();
        let selected = genres(&["pop", "metal"]);
        let view = apply(&ds, &selected);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|t| selected.contains(&t.genre)));
        let excluded = ds.tracks.iter().filter(|t| !selected.contains(&t.genre)).count();
        assert_eq!(view.len() + excluded, ds.len());
    }

    #[test]
    fn selection_preserves_dataset_order() {
        let ds = dataset();
        let view = apply(&ds, &genres(&["rock"]));
        let names: Vec<&str> = view.iter().map(|t| t.track_name.as_str()).collect();
        assert_eq!(names, ["b", "e"]);
    }

    #[test]
    fn absent_genre_yields_empty_view() {
        let ds = dataset();
        assert!(apply(&ds, &genres(&["jazz"])).is_empty());
    }

    #[test]
    fn toggle_and_clear() {
        let mut sel = FilterSelection::default();
        sel.toggle_genre("pop");
        sel.toggle_genre("rock");
        sel.toggle_genre("pop");
        assert_eq!(sel.selected_genres, genres(&["rock"]));
        sel.clear_genres();
        assert!(sel.selected_genres.is_empty());
        sel.set_mood_metric(MoodMetric::Liveness);
        assert_eq!(sel.mood_metric, MoodMetric::Liveness);
    }
}

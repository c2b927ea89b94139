use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// Sentiment – precomputed categorical label
// ---------------------------------------------------------------------------

/// Sentiment label attached upstream to every track.
///
/// Labels outside the three known categories are kept verbatim in
/// [`Sentiment::Other`] so they can still be counted and drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    Other(String),
}

impl Sentiment {
    pub fn parse(label: &str) -> Self {
        match label {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            other => Sentiment::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Sentiment::Other(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Neutral => 1,
            Sentiment::Negative => 2,
            Sentiment::Other(_) => 3,
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        Sentiment::parse(&label)
    }
}

// Display order: positive, neutral, negative, then unknown labels A→Z.
impl Ord for Sentiment {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Sentiment::Other(a), Sentiment::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Sentiment {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Numeric features
// ---------------------------------------------------------------------------

/// The six audio features selectable as the Mood Navigator x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum MoodMetric {
    #[default]
    Danceability,
    Energy,
    Valence,
    Acousticness,
    Liveness,
    Speechiness,
}

impl MoodMetric {
    pub const ALL: [MoodMetric; 6] = [
        MoodMetric::Danceability,
        MoodMetric::Energy,
        MoodMetric::Valence,
        MoodMetric::Acousticness,
        MoodMetric::Liveness,
        MoodMetric::Speechiness,
    ];

    /// Column name in the source table.
    pub fn column(self) -> &'static str {
        match self {
            MoodMetric::Danceability => "danceability",
            MoodMetric::Energy => "energy",
            MoodMetric::Valence => "valence",
            MoodMetric::Acousticness => "acousticness",
            MoodMetric::Liveness => "liveness",
            MoodMetric::Speechiness => "speechiness",
        }
    }
}

impl fmt::Display for MoodMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Any numeric column a chart can put on an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackFeature {
    Popularity,
    Audio(MoodMetric),
}

impl TrackFeature {
    pub fn column(self) -> &'static str {
        match self {
            TrackFeature::Popularity => "popularity",
            TrackFeature::Audio(m) => m.column(),
        }
    }

    /// Column name with the first letter upper-cased, for axis titles.
    pub fn title(self) -> String {
        capitalize(self.column())
    }
}

impl From<MoodMetric> for TrackFeature {
    fn from(m: MoodMetric) -> Self {
        TrackFeature::Audio(m)
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Track – one row of the dataset
// ---------------------------------------------------------------------------

/// Empty cells and JSON `null` read as NaN; chart builders skip them.
fn nan_if_missing<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// A single track (one row of the source table).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub track_name: String,
    pub artists: String,
    #[serde(rename = "track_genre")]
    pub genre: String,
    #[serde(deserialize_with = "nan_if_missing")]
    pub danceability: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub energy: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub valence: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub acousticness: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub liveness: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub speechiness: f64,
    #[serde(deserialize_with = "nan_if_missing")]
    pub popularity: f64,
    pub sentiment: Sentiment,
}

impl Track {
    pub fn metric(&self, metric: MoodMetric) -> f64 {
        match metric {
            MoodMetric::Danceability => self.danceability,
            MoodMetric::Energy => self.energy,
            MoodMetric::Valence => self.valence,
            MoodMetric::Acousticness => self.acousticness,
            MoodMetric::Liveness => self.liveness,
            MoodMetric::Speechiness => self.speechiness,
        }
    }

    pub fn feature(&self, feature: TrackFeature) -> f64 {
        match feature {
            TrackFeature::Popularity => self.popularity,
            TrackFeature::Audio(m) => self.metric(m),
        }
    }
}

/// Columns every input table must provide.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "track_name",
    "artists",
    "track_genre",
    "danceability",
    "energy",
    "valence",
    "acousticness",
    "liveness",
    "speechiness",
    "popularity",
    "sentiment",
];

// ---------------------------------------------------------------------------
// TrackDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with its derived genre option list.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDataset {
    pub tracks: Vec<Track>,
    /// Distinct genres, sorted. Options for the genre selector.
    pub genres: Vec<String>,
}

impl TrackDataset {
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let genres: BTreeSet<&str> = tracks.iter().map(|t| t.genre.as_str()).collect();
        let genres = genres.into_iter().map(str::to_string).collect();
        Self { tracks, genres }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Distinct sentiment labels that have no palette entry.
    pub fn unknown_sentiments(&self) -> BTreeSet<&str> {
        self.tracks
            .iter()
            .filter(|t| !t.sentiment.is_known())
            .map(|t| t.sentiment.label())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn track(name: &str, genre: &str, sentiment: &str, popularity: f64) -> Track {
        Track {
            track_name: name.to_string(),
            artists: format!("{name} artist"),
            genre: genre.to_string(),
            danceability: 0.5,
            energy: 0.6,
            valence: 0.4,
            acousticness: 0.2,
            liveness: 0.1,
            speechiness: 0.05,
            popularity,
            sentiment: Sentiment::parse(sentiment),
        }
    }

    #[test]
    fn sentiment_parses_known_labels() {
        assert_eq!(Sentiment::parse("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse("neutral"), Sentiment::Neutral);
        assert_eq!(Sentiment::parse("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::parse("unknown"), Sentiment::Other("unknown".into()));
        assert!(!Sentiment::parse("Positive").is_known());
        assert_eq!(Sentiment::parse(" positive"), Sentiment::Other(" positive".into()));
    }

    #[test]
    fn sentiment_display_order() {
        let mut v = vec![
            Sentiment::Other("zzz".into()),
            Sentiment::Negative,
            Sentiment::Other("mixed".into()),
            Sentiment::Positive,
            Sentiment::Neutral,
        ];
        v.sort();
        let labels: Vec<&str> = v.iter().map(Sentiment::label).collect();
        assert_eq!(labels, ["positive", "neutral", "negative", "mixed", "zzz"]);
    }

    #[test]
    fn metric_columns_follow_source_table() {
        let columns: Vec<&str> = MoodMetric::ALL.iter().map(|m| m.column()).collect();
        assert_eq!(
            columns,
            ["danceability", "energy", "valence", "acousticness", "liveness", "speechiness"]
        );
        assert_eq!(MoodMetric::default(), MoodMetric::Danceability);
    }

    #[test]
    fn feature_lookup_and_titles() {
        let t = track("a", "pop", "positive", 70.0);
        assert_eq!(t.feature(TrackFeature::Popularity), 70.0);
        assert_eq!(t.feature(MoodMetric::Valence.into()), 0.4);
        assert_eq!(TrackFeature::Audio(MoodMetric::Speechiness).title(), "Speechiness");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn dataset_derives_sorted_distinct_genres() {
        let ds = TrackDataset::from_tracks(vec![
            track("a", "rock", "positive", 1.0),
            track("b", "pop", "negative", 2.0),
            track("c", "rock", "unknown", 3.0),
        ]);
        assert_eq!(ds.genres, ["pop", "rock"]);
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.unknown_sentiments().into_iter().collect::<Vec<_>>(), ["unknown"]);
    }
}

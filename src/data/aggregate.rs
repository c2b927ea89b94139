use std::collections::BTreeMap;

use super::model::{Sentiment, Track};

/// One row of the genre × sentiment count table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSentimentCount {
    pub genre: String,
    pub sentiment: Sentiment,
    pub count: usize,
}

/// Count tracks per observed (genre, sentiment) pair.
///
/// Rows come out sorted by genre, then by sentiment display order.
pub fn aggregate(view: &[&Track]) -> Vec<GenreSentimentCount> {
    let mut counts: BTreeMap<(&str, &Sentiment), usize> = BTreeMap::new();
    for t in view {
        *counts.entry((t.genre.as_str(), &t.sentiment)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((genre, sentiment), count)| GenreSentimentCount {
            genre: genre.to_string(),
            sentiment: sentiment.clone(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;
    use crate::data::filter::apply;
    use crate::data::model::tests::track;
    use crate::data::model::TrackDataset;

    fn dataset() -> TrackDataset {
        TrackDataset::from_tracks(vec![
            track("a", "pop", "positive", 80.0),
            track("b", "rock", "negative", 40.0),
            track("c", "pop", "positive", 60.0),
            track("d", "pop", "negative", 20.0),
            track("e", "rock", "unknown", 50.0),
            track("f", "rock", "negative", 10.0),
        ])
    }

    #[test]
    fn counts_sum_to_view_length_and_pairs_are_unique() {
        let ds = dataset();
        let view = apply(&ds, &BTreeSet::new());
        let table = aggregate(&view);

        assert_eq!(table.iter().map(|r| r.count).sum::<usize>(), view.len());
        let pairs: HashSet<(&str, &Sentiment)> =
            table.iter().map(|r| (r.genre.as_str(), &r.sentiment)).collect();
        assert_eq!(pairs.len(), table.len());
    }

    #[test]
    fn single_genre_has_one_row_per_observed_sentiment() {
        let ds = dataset();
        let selected: BTreeSet<String> = ["pop".to_string()].into();
        let table = aggregate(&apply(&ds, &selected));
        assert_eq!(
            table,
            vec![
                GenreSentimentCount {
                    genre: "pop".into(),
                    sentiment: Sentiment::Positive,
                    count: 2
                },
                GenreSentimentCount {
                    genre: "pop".into(),
                    sentiment: Sentiment::Negative,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn unknown_sentiment_is_counted() {
        let ds = dataset();
        let table = aggregate(&apply(&ds, &BTreeSet::new()));
        let unknown = table
            .iter()
            .find(|r| r.sentiment == Sentiment::Other("unknown".into()))
            .unwrap();
        assert_eq!((unknown.genre.as_str(), unknown.count), ("rock", 1));
    }

    #[test]
    fn empty_view_gives_empty_table() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn filter_then_aggregate_is_idempotent() {
        let ds = dataset();
        let before = ds.clone();
        let selected: BTreeSet<String> = ["rock".to_string()].into();
        let first = aggregate(&apply(&ds, &selected));
        let second = aggregate(&apply(&ds, &selected));
        assert_eq!(first, second);
        assert_eq!(ds, before);
    }
}

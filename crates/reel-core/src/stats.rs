use reel_models::{Movie, Review, ReviewStats, Sentiment};

/// Count the reviews of one movie, split by sentiment.
///
/// Reviews with an unrecognized sentiment count toward `total` only.
pub fn stats(cache: &[Review], title: &str) -> ReviewStats {
    cache
        .iter()
        .filter(|review| review.movie.title == title)
        .fold(ReviewStats::default(), |mut acc, review| {
            acc.total += 1;
            match review.sentiment {
                Sentiment::Positive => acc.positive += 1,
                Sentiment::Negative => acc.negative += 1,
                Sentiment::Other(_) => {}
            }
            acc
        })
}

/// Stats for every movie of the catalog, in catalog order
pub fn catalog_stats<'a>(cache: &[Review], movies: &'a [Movie]) -> Vec<(&'a Movie, ReviewStats)> {
    movies.iter().map(|movie| (movie, stats(cache, &movie.title))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::review;

    #[test]
    fn test_two_reviews_split_by_sentiment() {
        let cache = vec![
            review("X", "loved it", "Positive", "2024-01-01T00:00:00Z"),
            review("X", "hated it", "Negative", "2024-01-02T00:00:00Z"),
            review("Y", "fine", "Positive", "2024-01-03T00:00:00Z"),
        ];
        assert_eq!(
            stats(&cache, "X"),
            ReviewStats {
                total: 2,
                positive: 1,
                negative: 1
            }
        );
    }

    #[test]
    fn test_unknown_sentiment_undercounts() {
        let cache = vec![
            review("X", "meh", "Neutral", "2024-01-01T00:00:00Z"),
            review("X", "good", "positive", "2024-01-02T00:00:00Z"),
        ];
        let s = stats(&cache, "X");
        assert_eq!(s.total, 2);
        assert_eq!(s.positive + s.negative, 1);
        assert_eq!(s.unclassified(), 1);
    }

    #[test]
    fn test_unknown_title_is_zero() {
        assert_eq!(stats(&[], "Nope"), ReviewStats::default());
    }

    #[test]
    fn test_catalog_stats_keeps_catalog_order() {
        let movies = vec![Movie::new("B"), Movie::new("A")];
        let cache = vec![review("A", "ok", "Positive", "2024-01-01T00:00:00Z")];
        let rows = catalog_stats(&cache, &movies);
        assert_eq!(rows[0].0.title, "B");
        assert_eq!(rows[0].1.total, 0);
        assert_eq!(rows[1].1.positive, 1);
    }
}

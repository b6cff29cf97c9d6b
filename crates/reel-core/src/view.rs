use reel_models::{FilterCriteria, MovieFilter, Review, SentimentFilter, SortOrder};
use std::collections::BTreeSet;

/// Filter and order a copy of the cache.
///
/// The cache is never touched. Ties on timestamp keep cache order, in both
/// directions, because `sort_by` is stable.
pub fn derive_view(cache: &[Review], criteria: &FilterCriteria) -> Vec<Review> {
    let mut view: Vec<Review> = cache
        .iter()
        .filter(|review| accepts_sentiment(&criteria.sentiment, review) && accepts_movie(&criteria.movie, review))
        .cloned()
        .collect();

    match criteria.sort {
        SortOrder::Latest => view.sort_by(|a, b| b.timestamp.cmp_chronological(&a.timestamp)),
        SortOrder::Oldest => view.sort_by(|a, b| a.timestamp.cmp_chronological(&b.timestamp)),
    }

    view
}

fn accepts_sentiment(filter: &SentimentFilter, review: &Review) -> bool {
    match filter {
        SentimentFilter::All => true,
        SentimentFilter::Only(sentiment) => &review.sentiment == sentiment,
    }
}

fn accepts_movie(filter: &MovieFilter, review: &Review) -> bool {
    match filter {
        MovieFilter::All => true,
        MovieFilter::Title(title) => review.movie.title == *title,
    }
}

/// Sorted distinct movie titles present in the cache
pub fn movie_titles(cache: &[Review]) -> Vec<String> {
    cache
        .iter()
        .map(|review| review.movie.title.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

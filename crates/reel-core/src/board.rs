use crate::store::ReviewStore;
use crate::view::derive_view;
use reel_models::{FilterCriteria, Review, SentimentFilter, SortOrder};

struct Memo {
    revision: u64,
    criteria: FilterCriteria,
    rows: Vec<Review>,
}

/// The filterable, sortable list of posted reviews.
///
/// Holds the criteria and the derived view. The view is recomputed when the
/// store revision or the criteria differ from the ones it was built from, so a
/// reader can never get rows from an older cache.
#[derive(Default)]
pub struct ReviewBoard {
    criteria: FilterCriteria,
    memo: Option<Memo>,
    recomputations: usize,
}

impl ReviewBoard {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            memo: None,
            recomputations: 0,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_sentiment(&mut self, sentiment: SentimentFilter) {
        self.criteria.sentiment = sentiment;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.criteria.sort = sort;
    }

    pub fn view(&mut self, store: &ReviewStore) -> &[Review] {
        let fresh = matches!(
            &self.memo,
            Some(memo) if memo.revision == store.revision() && memo.criteria == self.criteria
        );
        if !fresh {
            self.recomputations += 1;
            self.memo = Some(Memo {
                revision: store.revision(),
                criteria: self.criteria.clone(),
                rows: derive_view(store.reviews(), &self.criteria),
            });
        }
        self.memo.as_ref().map(|memo| memo.rows.as_slice()).unwrap_or(&[])
    }

    /// Review at 1-based display position `row` of the current view
    pub fn row(&mut self, store: &ReviewStore, row: usize) -> Option<Review> {
        row.checked_sub(1).and_then(|index| self.view(store).get(index).cloned())
    }

    /// Choices for the movie filter: "All" followed by the cached titles
    pub fn movie_options(&self, store: &ReviewStore) -> Vec<String> {
        std::iter::once("All".to_string())
            .chain(store.movie_titles().iter().cloned())
            .collect()
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

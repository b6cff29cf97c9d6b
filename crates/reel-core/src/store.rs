use crate::error::{AddressResolutionError, ClientError};
use crate::view::movie_titles;
use reel_gateway::{Ack, GatewayError, RemoteGateway};
use reel_models::{RemoteTarget, Review, ReviewKey};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle of a remotely loaded collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Sequence number handed out when a refresh is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the cache
    Applied { reviews: usize },
    /// A response to a later request was already applied; this one was dropped
    Stale,
    /// Only reported after a mutation, whose own success stands regardless
    Failed(String),
}

/// A successful mutation and the refresh that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    pub target: Option<RemoteTarget>,
    pub ack: Ack,
    pub refresh: RefreshOutcome,
}

/// A review identity resolved against the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReview {
    pub index: usize,
    pub target: RemoteTarget,
    pub review: Review,
}

/// Owner of the cached review list.
///
/// The cache only ever changes by replacing it with a full list fetched from
/// the service. Every refresh carries a ticket; a response is applied only if
/// no response to a later ticket has been applied before it.
pub struct ReviewStore {
    gateway: Arc<dyn RemoteGateway>,
    reviews: Vec<Review>,
    titles: Vec<String>,
    state: LoadState,
    last_issued: u64,
    last_applied: u64,
    in_flight: usize,
    revision: u64,
    notifier: watch::Sender<u64>,
}

impl ReviewStore {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let (notifier, _) = watch::channel(0);
        Self {
            gateway,
            reviews: Vec::new(),
            titles: Vec::new(),
            state: LoadState::Idle,
            last_issued: 0,
            last_applied: 0,
            in_flight: 0,
            revision: 0,
            notifier,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Sorted distinct movie titles of the cached reviews
    pub fn movie_titles(&self) -> &[String] {
        &self.titles
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Bumped every time the cache is replaced
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Receiver that observes every cache revision
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight > 0
    }

    /// Initial load. Same as a refresh, reported as the resulting state.
    pub async fn load(&mut self) -> LoadState {
        if let Err(e) = self.refresh().await {
            debug!("Initial review load failed: {}", e);
        }
        self.state.clone()
    }

    pub async fn refresh(&mut self) -> Result<RefreshOutcome, ClientError> {
        let ticket = self.begin_refresh();
        let result = self.gateway.list_reviews().await;
        self.complete_refresh(ticket, result)
    }

    /// Refresh following a confirmed mutation. A failure here does not undo the
    /// mutation, so it is folded into the outcome instead of returned as an error.
    pub async fn refresh_after_mutation(&mut self) -> RefreshOutcome {
        match self.refresh().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Refresh after mutation failed: {}", e);
                RefreshOutcome::Failed(e.user_message())
            }
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.last_issued += 1;
        self.in_flight += 1;
        if self.state == LoadState::Idle {
            self.state = LoadState::Loading;
        }
        debug!("Issued review refresh #{}", self.last_issued);
        RefreshTicket(self.last_issued)
    }

    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Review>, GatewayError>,
    ) -> Result<RefreshOutcome, ClientError> {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.0 <= self.last_applied {
            warn!(
                "Dropping response to refresh #{}: refresh #{} was already applied",
                ticket.0, self.last_applied
            );
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(reviews) => {
                let count = reviews.len();
                self.titles = movie_titles(&reviews);
                self.reviews = reviews;
                self.last_applied = ticket.0;
                self.state = LoadState::Ready;
                self.revision += 1;
                self.notifier.send_replace(self.revision);
                info!("Loaded {} reviews (refresh #{}, revision {})", count, ticket.0, self.revision);
                Ok(RefreshOutcome::Applied { reviews: count })
            }
            Err(e) => {
                warn!("Refresh #{} failed, keeping {} cached reviews: {}", ticket.0, self.reviews.len(), e);
                let error = ClientError::from(e);
                self.state = LoadState::Failed(error.user_message());
                Err(error)
            }
        }
    }

    /// Find the single cached review carrying `key`.
    pub fn resolve(&self, key: &ReviewKey) -> Result<ResolvedReview, AddressResolutionError> {
        let mut matches = self.reviews.iter().enumerate().filter(|(_, review)| key.matches(review));

        let (index, review) = matches
            .next()
            .ok_or_else(|| AddressResolutionError::NotFound(key.clone()))?;

        let extra = matches.count();
        if extra > 0 {
            warn!("Identity {} matches {} cached reviews", key, extra + 1);
            return Err(AddressResolutionError::Ambiguous {
                key: key.clone(),
                count: extra + 1,
            });
        }

        let target = match &review.id {
            Some(id) => RemoteTarget::Id(id.clone()),
            None => RemoteTarget::Index(index),
        };

        Ok(ResolvedReview {
            index,
            target,
            review: review.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{review, server_error, FakeGateway};

    fn store_with(fake: &Arc<FakeGateway>) -> ReviewStore {
        ReviewStore::new(fake.clone())
    }

    #[tokio::test]
    async fn test_load_replaces_cache() {
        let fake = FakeGateway::with_reviews(vec![
            review("Heat", "a", "Positive", "2024-01-01T00:00:00Z"),
            review("Alien", "b", "Negative", "2024-01-02T00:00:00Z"),
        ]);
        let mut store = store_with(&fake);
        assert_eq!(store.state(), &LoadState::Idle);

        assert_eq!(store.load().await, LoadState::Ready);
        assert_eq!(store.len(), 2);
        assert_eq!(store.movie_titles(), &["Alien".to_string(), "Heat".to_string()]);
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_cache() {
        let fake = FakeGateway::with_reviews(vec![review("Heat", "a", "Positive", "2024-01-01T00:00:00Z")]);
        let mut store = store_with(&fake);
        store.refresh().await.unwrap();

        fake.fail_next_list_reviews();
        let err = store.refresh().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(store.len(), 1);
        assert_eq!(store.revision(), 1);
        assert!(matches!(store.state(), LoadState::Failed(_)));
        assert_eq!(fake.list_reviews_calls(), 2);
    }

    #[test]
    fn test_out_of_order_response_is_dropped() {
        let fake = FakeGateway::with_reviews(vec![]);
        let mut store = store_with(&fake);

        let older = store.begin_refresh();
        let newer = store.begin_refresh();
        assert!(store.is_refreshing());

        let newer_data = vec![
            review("Heat", "a", "Positive", "2024-01-01T00:00:00Z"),
            review("Heat", "b", "Positive", "2024-01-02T00:00:00Z"),
        ];
        let older_data = vec![review("Heat", "a", "Positive", "2024-01-01T00:00:00Z")];

        assert_eq!(
            store.complete_refresh(newer, Ok(newer_data)).unwrap(),
            RefreshOutcome::Applied { reviews: 2 }
        );
        // the older request is still outstanding
        assert!(store.is_refreshing());
        assert_eq!(store.complete_refresh(older, Ok(older_data)).unwrap(), RefreshOutcome::Stale);
        assert_eq!(store.len(), 2);
        assert!(!store.is_refreshing());
    }

    #[test]
    fn test_older_response_applies_when_newer_failed() {
        let fake = FakeGateway::with_reviews(vec![]);
        let mut store = store_with(&fake);

        let older = store.begin_refresh();
        let newer = store.begin_refresh();
        assert!(store.complete_refresh(newer, Err(server_error("GET /reviews"))).is_err());
        assert_eq!(
            store
                .complete_refresh(older, Ok(vec![review("Heat", "a", "Positive", "")]))
                .unwrap(),
            RefreshOutcome::Applied { reviews: 1 }
        );
        assert_eq!(store.state(), &LoadState::Ready);
    }

    #[tokio::test]
    async fn test_subscribers_see_revisions() {
        let fake = FakeGateway::with_reviews(vec![review("Heat", "a", "Positive", "")]);
        let mut store = store_with(&fake);
        let mut rx = store.subscribe();

        store.refresh().await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        store.refresh().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 2);
    }

    #[tokio::test]
    async fn test_resolve_unique_ambiguous_and_missing() {
        let twin = review("Heat", "same", "Positive", "2024-01-01T00:00:00Z");
        let fake = FakeGateway::with_reviews(vec![
            review("Alien", "x", "Negative", "2024-01-03T00:00:00Z"),
            twin.clone(),
            twin.clone(),
        ]);
        let mut store = store_with(&fake);
        store.refresh().await.unwrap();

        let first = store.reviews()[0].key();
        let resolved = store.resolve(&first).unwrap();
        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.target, RemoteTarget::Index(0));

        assert_eq!(
            store.resolve(&twin.key()),
            Err(AddressResolutionError::Ambiguous {
                key: twin.key(),
                count: 2
            })
        );

        let ghost = review("Nope", "gone", "Positive", "").key();
        assert!(matches!(store.resolve(&ghost), Err(AddressResolutionError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_prefers_server_id() {
        let mut with_id = review("Heat", "a", "Positive", "");
        with_id.id = Some("r-42".to_string());
        let fake = FakeGateway::with_reviews(vec![review("Alien", "b", "Positive", ""), with_id.clone()]);
        let mut store = store_with(&fake);
        store.refresh().await.unwrap();

        let resolved = store.resolve(&with_id.key()).unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.target, RemoteTarget::Id("r-42".to_string()));
    }
}

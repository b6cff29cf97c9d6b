use crate::error::{ClientError, ValidationError};
use crate::store::{MutationReport, ReviewStore};
use reel_gateway::RemoteGateway;
use reel_models::ReviewKey;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Idle,
    Editing { key: ReviewKey, draft: String },
}

/// In-place editing of posted reviews, one review at a time.
///
/// Reviews are addressed by identity, never by display position. The identity
/// is resolved against the store when editing starts and again when the edit
/// is committed, since the cache may have been replaced in between.
pub struct InlineEditor {
    gateway: Arc<dyn RemoteGateway>,
    state: EditorState,
    message: Option<String>,
}

impl InlineEditor {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            state: EditorState::Idle,
            message: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn editing(&self) -> Option<(&ReviewKey, &str)> {
        match &self.state {
            EditorState::Editing { key, draft } => Some((key, draft.as_str())),
            EditorState::Idle => None,
        }
    }

    pub fn is_editing(&self, key: &ReviewKey) -> bool {
        matches!(&self.state, EditorState::Editing { key: current, .. } if current.same_review(key))
    }

    /// Start editing `key`. Starting another edit replaces the current one and
    /// discards its draft.
    pub fn begin_edit(
        &mut self,
        store: &ReviewStore,
        key: ReviewKey,
        current_text: impl Into<String>,
    ) -> Result<(), ClientError> {
        let resolved = store.resolve(&key).map_err(|e| {
            self.message = Some(ClientError::from(e.clone()).user_message());
            e
        })?;

        if let EditorState::Editing { key: previous, .. } = &self.state {
            if !previous.same_review(&key) {
                debug!("Abandoning edit of {} to edit {}", previous, key);
            }
        }

        debug!("Editing review {} ({})", key, resolved.target);
        self.state = EditorState::Editing {
            key,
            draft: current_text.into(),
        };
        self.message = None;
        Ok(())
    }

    pub fn update_draft(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        match &mut self.state {
            EditorState::Editing { draft, .. } => {
                *draft = text.into();
                Ok(())
            }
            EditorState::Idle => Err(ValidationError::InvalidState {
                action: "update the draft",
                state: "not editing".to_string(),
            }),
        }
    }

    /// Send the draft to the service. On success the editor goes idle and the
    /// store is refreshed; on failure the edit and its draft stay in place.
    pub async fn commit(&mut self, store: &mut ReviewStore) -> Result<MutationReport, ClientError> {
        let (key, draft) = match &self.state {
            EditorState::Editing { key, draft } => (key.clone(), draft.clone()),
            EditorState::Idle => {
                return Err(ValidationError::InvalidState {
                    action: "save an edit",
                    state: "not editing".to_string(),
                }
                .into())
            }
        };

        let resolved = match store.resolve(&key) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Not saving edit of {}: {}", key, e);
                let error = ClientError::from(e);
                self.message = Some(error.user_message());
                return Err(error);
            }
        };

        let ack = match self.gateway.update_review(&resolved.target, &draft).await {
            Ok(ack) => ack,
            Err(e) => {
                warn!("Error updating review {}: {}", key, e);
                self.message = Some("Error updating review.".to_string());
                return Err(e.into());
            }
        };

        info!("Saved edit of {} at {}", key, resolved.target);
        self.state = EditorState::Idle;
        self.message = None;
        let refresh = store.refresh_after_mutation().await;
        Ok(MutationReport {
            target: Some(resolved.target),
            ack,
            refresh,
        })
    }

    pub fn cancel(&mut self) -> Result<(), ValidationError> {
        match self.state {
            EditorState::Editing { .. } => {
                self.state = EditorState::Idle;
                self.message = None;
                Ok(())
            }
            EditorState::Idle => Err(ValidationError::InvalidState {
                action: "cancel an edit",
                state: "not editing".to_string(),
            }),
        }
    }

    /// Delete the review carrying `key`. If it is the review being edited, the
    /// edit ends once the delete is confirmed.
    pub async fn delete(&mut self, store: &mut ReviewStore, key: &ReviewKey) -> Result<MutationReport, ClientError> {
        let resolved = match store.resolve(key) {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!("Not deleting {}: {}", key, e);
                let error = ClientError::from(e);
                self.message = Some(error.user_message());
                return Err(error);
            }
        };

        let ack = match self.gateway.delete_review(&resolved.target).await {
            Ok(ack) => ack,
            Err(e) => {
                warn!("Error deleting review {}: {}", key, e);
                self.message = Some("Error deleting review.".to_string());
                return Err(e.into());
            }
        };

        info!("Deleted {} at {}", key, resolved.target);
        if self.is_editing(key) {
            self.state = EditorState::Idle;
        }
        self.message = None;
        let refresh = store.refresh_after_mutation().await;
        Ok(MutationReport {
            target: Some(resolved.target),
            ack,
            refresh,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::RefreshOutcome;
    use crate::testing::{review, Call, FakeGateway, Op};
    use reel_models::RemoteTarget;

    async fn loaded(fake: &Arc<FakeGateway>) -> ReviewStore {
        let mut store = ReviewStore::new(fake.clone());
        store.refresh().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_commit_updates_and_refreshes() {
        let fake = FakeGateway::with_reviews(vec![
            review("Alien", "first", "Positive", "2024-01-01T00:00:00Z"),
            review("Heat", "second", "Negative", "2024-01-02T00:00:00Z"),
        ]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let key = store.reviews()[1].key();
        editor.begin_edit(&store, key.clone(), "second").unwrap();
        assert!(editor.is_editing(&key));
        editor.update_draft("second, revised").unwrap();

        let report = editor.commit(&mut store).await.unwrap();
        assert_eq!(report.target, Some(RemoteTarget::Index(1)));
        assert_eq!(report.refresh, RefreshOutcome::Applied { reviews: 2 });
        assert_eq!(editor.state(), &EditorState::Idle);
        assert_eq!(store.reviews()[1].review, "second, revised");
        assert_eq!(fake.list_reviews_calls(), 2);
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_draft() {
        let fake = FakeGateway::with_reviews(vec![review("Alien", "first", "Positive", "")]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let key = store.reviews()[0].key();
        editor.begin_edit(&store, key.clone(), "first").unwrap();
        editor.update_draft("kept").unwrap();

        fake.fail_next(Op::Update);
        let err = editor.commit(&mut store).await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(editor.editing(), Some((&key, "kept")));
        assert_eq!(editor.message(), Some("Error updating review."));
        assert_eq!(store.reviews()[0].review, "first");
        assert_eq!(fake.list_reviews_calls(), 1);
    }

    #[tokio::test]
    async fn test_cancel_discards_without_remote_call() {
        let fake = FakeGateway::with_reviews(vec![review("Alien", "first", "Positive", "")]);
        let store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        editor.begin_edit(&store, store.reviews()[0].key(), "first").unwrap();
        editor.update_draft("scratch").unwrap();
        editor.cancel().unwrap();

        assert_eq!(editor.state(), &EditorState::Idle);
        assert_eq!(fake.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_operations_invalid_while_idle() {
        let fake = FakeGateway::with_reviews(vec![]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        assert!(matches!(editor.update_draft("x"), Err(ValidationError::InvalidState { .. })));
        assert!(editor.cancel().is_err());
        assert!(editor.commit(&mut store).await.unwrap_err().is_validation());
        assert_eq!(fake.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_only_one_review_editable() {
        let fake = FakeGateway::with_reviews(vec![
            review("Alien", "a", "Positive", "2024-01-01T00:00:00Z"),
            review("Alien", "b", "Positive", "2024-01-02T00:00:00Z"),
        ]);
        let store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let first = store.reviews()[0].key();
        let second = store.reviews()[1].key();
        editor.begin_edit(&store, first.clone(), "a").unwrap();
        editor.begin_edit(&store, second.clone(), "b").unwrap();

        assert!(!editor.is_editing(&first));
        assert!(editor.is_editing(&second));
    }

    #[tokio::test]
    async fn test_ambiguous_identity_aborts() {
        let twin = review("Alien", "same", "Positive", "2024-01-01T00:00:00Z");
        let fake = FakeGateway::with_reviews(vec![twin.clone(), twin.clone()]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let err = editor.begin_edit(&store, twin.key(), "same").unwrap_err();
        assert!(err.is_address_resolution());
        assert_eq!(editor.state(), &EditorState::Idle);

        let err = editor.delete(&mut store, &twin.key()).await.unwrap_err();
        assert!(err.is_address_resolution());
        assert_eq!(fake.mutation_calls(), 0);
    }

    #[tokio::test]
    async fn test_commit_reresolves_after_cache_change() {
        let fake = FakeGateway::with_reviews(vec![
            review("Alien", "gone soon", "Positive", "2024-01-01T00:00:00Z"),
            review("Heat", "target", "Negative", "2024-01-02T00:00:00Z"),
        ]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let key = store.reviews()[1].key();
        editor.begin_edit(&store, key, "target").unwrap();

        // someone else removes the first review; the target shifts to index 0
        let doomed = store.reviews()[0].key();
        InlineEditor::new(fake.clone()).delete(&mut store, &doomed).await.unwrap();

        editor.update_draft("edited").unwrap();
        let report = editor.commit(&mut store).await.unwrap();
        assert_eq!(report.target, Some(RemoteTarget::Index(0)));
        assert_eq!(fake.server_reviews()[0].review, "edited");
    }

    #[tokio::test]
    async fn test_delete_of_edited_review_ends_edit() {
        let fake = FakeGateway::with_reviews(vec![review("Alien", "a", "Positive", "")]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let key = store.reviews()[0].key();
        editor.begin_edit(&store, key.clone(), "a").unwrap();
        let report = editor.delete(&mut store, &key).await.unwrap();

        assert_eq!(report.refresh, RefreshOutcome::Applied { reviews: 0 });
        assert_eq!(editor.state(), &EditorState::Idle);
        assert!(store.is_empty());
        assert_eq!(fake.calls().last(), Some(&Call::ListReviews));
    }

    #[tokio::test]
    async fn test_delete_by_id_ends_edit_after_text_changed_elsewhere() {
        let mut original = review("Alien", "a", "Positive", "");
        original.id = Some("r1".to_string());
        let fake = FakeGateway::with_reviews(vec![original.clone()]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());
        editor.begin_edit(&store, original.key(), "a").unwrap();

        // another client rewrote the text; the refreshed row has a new key
        let mut rewritten = original.clone();
        rewritten.review = "rewritten".to_string();
        assert!(editor.is_editing(&rewritten.key()));

        let report = editor.delete(&mut store, &rewritten.key()).await.unwrap();
        assert_eq!(report.target, Some(RemoteTarget::Id("r1".to_string())));
        assert_eq!(editor.state(), &EditorState::Idle);
    }

    #[tokio::test]
    async fn test_failed_refresh_after_delete_still_succeeds() {
        let fake = FakeGateway::with_reviews(vec![review("Alien", "a", "Positive", "")]);
        let mut store = loaded(&fake).await;
        let mut editor = InlineEditor::new(fake.clone());

        let key = store.reviews()[0].key();
        fake.fail_next_list_reviews();
        let report = editor.delete(&mut store, &key).await.unwrap();
        assert!(matches!(report.refresh, RefreshOutcome::Failed(_)));
        // stale until the next successful refresh
        assert_eq!(store.len(), 1);
        assert!(fake.server_reviews().is_empty());
    }
}

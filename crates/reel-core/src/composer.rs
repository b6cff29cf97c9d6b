use crate::error::{ClientError, ValidationError};
use crate::store::{MutationReport, ReviewStore};
use reel_config::ComposerConfig;
use reel_gateway::{RemoteGateway, ReviewSubmission};
use reel_models::{Movie, Sentiment};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MSG_PREDICTION_FAILED: &str = "Prediction failed.";
pub const MSG_POSTED: &str = "Review posted successfully!";
pub const MSG_POST_FAILED: &str = "Something went wrong while posting.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerState {
    #[default]
    Closed,
    Drafting,
    Predicted,
    Submitting,
}

impl fmt::Display for ComposerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComposerState::Closed => "closed",
            ComposerState::Drafting => "drafting",
            ComposerState::Predicted => "predicted",
            ComposerState::Submitting => "submitting",
        };
        write!(f, "{}", name)
    }
}

/// A review being written. Nothing here reaches the service until posted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftReview {
    pub movie: Option<Movie>,
    pub text: String,
    pub predicted: Option<Sentiment>,
}

/// Compose, predict, then post a review for one movie.
pub struct ReviewComposer {
    gateway: Arc<dyn RemoteGateway>,
    state: ComposerState,
    draft: DraftReview,
    message: Option<String>,
    invalidate_prediction_on_edit: bool,
}

impl ReviewComposer {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            state: ComposerState::Closed,
            draft: DraftReview::default(),
            message: None,
            invalidate_prediction_on_edit: false,
        }
    }

    pub fn with_config(mut self, config: &ComposerConfig) -> Self {
        self.invalidate_prediction_on_edit = config.invalidate_prediction_on_edit;
        self
    }

    pub fn with_prediction_invalidation(mut self, enabled: bool) -> Self {
        self.invalidate_prediction_on_edit = enabled;
        self
    }

    pub fn state(&self) -> ComposerState {
        self.state
    }

    pub fn draft(&self) -> &DraftReview {
        &self.draft
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn invalid(&self, action: &'static str) -> ValidationError {
        ValidationError::InvalidState {
            action,
            state: self.state.to_string(),
        }
    }

    /// Start a fresh draft for `movie`. Opening another movie while drafting
    /// throws the current draft away.
    pub fn open(&mut self, movie: Movie) -> Result<(), ValidationError> {
        if self.state == ComposerState::Submitting {
            return Err(self.invalid("open another movie"));
        }
        debug!("Composing review for {}", movie.title);
        self.draft = DraftReview {
            movie: Some(movie),
            ..DraftReview::default()
        };
        self.state = ComposerState::Drafting;
        self.message = None;
        Ok(())
    }

    pub fn update_text(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        if !matches!(self.state, ComposerState::Drafting | ComposerState::Predicted) {
            return Err(self.invalid("edit the review"));
        }
        let text = text.into();
        if self.state == ComposerState::Predicted && self.invalidate_prediction_on_edit && text != self.draft.text {
            debug!("Draft changed after prediction, clearing predicted sentiment");
            self.draft.predicted = None;
            self.state = ComposerState::Drafting;
        }
        self.draft.text = text;
        Ok(())
    }

    /// Ask the service for the sentiment of the current text. Empty text is
    /// sent as is; judging it is the service's call.
    pub async fn predict(&mut self) -> Result<Sentiment, ClientError> {
        if !matches!(self.state, ComposerState::Drafting | ComposerState::Predicted) {
            return Err(self.invalid("predict").into());
        }

        match self.gateway.predict(&self.draft.text).await {
            Ok(sentiment) => {
                debug!("Predicted sentiment {}", sentiment);
                self.draft.predicted = Some(sentiment.clone());
                self.state = ComposerState::Predicted;
                self.message = None;
                Ok(sentiment)
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                self.message = Some(MSG_PREDICTION_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    /// First unmet precondition for posting, if any
    fn check_postable(&self) -> Result<(Movie, Sentiment), ValidationError> {
        if self.state == ComposerState::Submitting {
            return Err(self.invalid("post"));
        }
        let movie = self.draft.movie.clone().ok_or(ValidationError::NoMovieSelected)?;
        if self.draft.text.trim().is_empty() {
            return Err(ValidationError::EmptyReview);
        }
        match (&self.draft.predicted, self.state) {
            (Some(sentiment), ComposerState::Predicted) => Ok((movie, sentiment.clone())),
            _ => Err(ValidationError::NotPredicted),
        }
    }

    /// Submit the draft. Rejected without any request unless a movie is
    /// selected, the text is not blank and a sentiment has been predicted.
    pub async fn post(&mut self, store: &mut ReviewStore) -> Result<MutationReport, ClientError> {
        let (movie, sentiment) = match self.check_postable() {
            Ok(ready) => ready,
            Err(e) => {
                debug!("Post rejected: {}", e);
                self.message = Some(e.user_message());
                return Err(e.into());
            }
        };

        self.state = ComposerState::Submitting;
        let submission = ReviewSubmission {
            movie,
            review: self.draft.text.clone(),
            sentiment,
        };

        match self.gateway.submit_review(&submission).await {
            Ok(ack) => {
                info!("Posted {} review for {}", submission.sentiment, submission.movie.title);
                self.state = ComposerState::Closed;
                self.draft = DraftReview::default();
                self.message = Some(MSG_POSTED.to_string());
                let refresh = store.refresh_after_mutation().await;
                Ok(MutationReport {
                    target: None,
                    ack,
                    refresh,
                })
            }
            Err(e) => {
                warn!("Error posting review for {}: {}", submission.movie.title, e);
                self.state = ComposerState::Predicted;
                self.message = Some(MSG_POST_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn close(&mut self) {
        self.state = ComposerState::Closed;
        self.draft = DraftReview::default();
        self.message = None;
    }
}

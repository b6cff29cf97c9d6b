use reel_gateway::GatewayError;
use reel_models::ReviewKey;

/// A client-side precondition failed; no request was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("no movie is selected")]
    NoMovieSelected,

    #[error("review text is empty")]
    EmptyReview,

    #[error("sentiment has not been predicted")]
    NotPredicted,

    #[error("cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::NoMovieSelected | ValidationError::EmptyReview | ValidationError::NotPredicted => {
                "Please select a movie, write a review, and predict sentiment before posting.".to_string()
            }
            ValidationError::InvalidState { action, state } => format!("Cannot {} while {}.", action, state),
        }
    }
}

/// A review identity did not point at exactly one cached review.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressResolutionError {
    #[error("review {0} is not in the current review list")]
    NotFound(ReviewKey),

    #[error("{count} reviews share the identity {key}")]
    Ambiguous { key: ReviewKey, count: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] GatewayError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("address resolution error: {0}")]
    AddressResolution(#[from] AddressResolutionError),
}

impl ClientError {
    /// Status line suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(e) => match e.status() {
                Some(404) => "That review no longer exists on the server. Refresh and try again.".to_string(),
                Some(status) => format!("The review service rejected the request ({}).", status),
                None => "Could not reach the review service.".to_string(),
            },
            ClientError::Validation(e) => e.user_message(),
            ClientError::AddressResolution(AddressResolutionError::NotFound(_)) => {
                "That review no longer exists. Refresh and try again.".to_string()
            }
            ClientError::AddressResolution(AddressResolutionError::Ambiguous { count, .. }) => {
                format!("{} identical reviews match; refusing to guess which one to change.", count)
            }
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    pub fn is_address_resolution(&self) -> bool {
        matches!(self, ClientError::AddressResolution(_))
    }
}

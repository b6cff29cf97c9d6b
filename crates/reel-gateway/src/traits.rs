use crate::api::{Ack, ReviewSubmission};
use crate::error::GatewayError;
use async_trait::async_trait;
use reel_models::{Movie, RemoteTarget, Review, Sentiment};

/// The remote operations of the review service.
///
/// Implementations hold no client state beyond their connection; every call is
/// an independent request.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError>;
    async fn list_reviews(&self) -> Result<Vec<Review>, GatewayError>;
    async fn predict(&self, text: &str) -> Result<Sentiment, GatewayError>;

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<Ack, GatewayError>;
    async fn update_review(&self, target: &RemoteTarget, text: &str) -> Result<Ack, GatewayError>;
    async fn delete_review(&self, target: &RemoteTarget) -> Result<Ack, GatewayError>;
}

use crate::api::{self, Ack, ReviewSubmission};
use crate::error::GatewayError;
use crate::traits::RemoteGateway;
use async_trait::async_trait;
use reel_models::{Movie, RemoteTarget, Review, Sentiment};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// `RemoteGateway` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpGateway {
    client: Arc<Client>,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = base_url.into();
        reqwest::Url::parse(&base_url).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .user_agent(concat!("reelreview/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client: Arc::new(client),
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError> {
        let movies = api::get_movies(&self.client, &self.base_url).await?;
        debug!("Fetched {} movies", movies.len());
        Ok(movies)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, GatewayError> {
        let reviews = api::get_reviews(&self.client, &self.base_url).await?;
        debug!("Fetched {} reviews", reviews.len());
        Ok(reviews)
    }

    async fn predict(&self, text: &str) -> Result<Sentiment, GatewayError> {
        let sentiment = api::predict(&self.client, &self.base_url, text).await?;
        debug!("Predicted {} for {} characters of text", sentiment, text.chars().count());
        Ok(sentiment)
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<Ack, GatewayError> {
        let ack = api::submit_review(&self.client, &self.base_url, submission).await?;
        info!("Submitted {} review for {}", submission.sentiment, submission.movie.title);
        Ok(ack)
    }

    async fn update_review(&self, target: &RemoteTarget, text: &str) -> Result<Ack, GatewayError> {
        let ack = api::update_review(&self.client, &self.base_url, target, text).await?;
        info!("Updated review at {}", target);
        Ok(ack)
    }

    async fn delete_review(&self, target: &RemoteTarget) -> Result<Ack, GatewayError> {
        let ack = api::delete_review(&self.client, &self.base_url, target).await?;
        info!("Deleted review at {}", target);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = HttpGateway::new("not a url", Duration::from_secs(5));
        assert!(matches!(result, Err(GatewayError::InvalidUrl(_))));
    }

    #[test]
    fn test_keeps_base_url() {
        let gateway = HttpGateway::new("http://localhost:5000", Duration::from_secs(5)).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        // port 9 (discard) on localhost is closed on any sane test machine
        let gateway = HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = gateway.list_reviews().await.unwrap_err();
        assert!(matches!(err, GatewayError::Request { .. }));
        assert_eq!(err.endpoint(), Some("GET /reviews"));
    }
}

use async_trait::async_trait;
use reel_gateway::{Ack, GatewayError, RemoteGateway, ReviewSubmission};
use reel_models::{Movie, RemoteTarget, Review, Sentiment, Timestamp};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub fn review(title: &str, text: &str, sentiment: &str, timestamp: &str) -> Review {
    Review {
        id: None,
        movie: Movie::new(title),
        review: text.to_string(),
        sentiment: Sentiment::from(sentiment),
        timestamp: Timestamp::parse(timestamp),
    }
}

pub fn server_error(endpoint: &str) -> GatewayError {
    GatewayError::Status {
        endpoint: endpoint.to_string(),
        status: 500,
        body: "boom".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListMovies,
    ListReviews,
    Predict,
    Submit,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListMovies,
    ListReviews,
    Predict(String),
    Submit(ReviewSubmission),
    Update(RemoteTarget, String),
    Delete(RemoteTarget),
}

impl Call {
    fn op(&self) -> Op {
        match self {
            Call::ListMovies => Op::ListMovies,
            Call::ListReviews => Op::ListReviews,
            Call::Predict(_) => Op::Predict,
            Call::Submit(_) => Op::Submit,
            Call::Update(..) => Op::Update,
            Call::Delete(_) => Op::Delete,
        }
    }
}

/// In-memory review service. Behaves like the real backend (append on
/// submit, positional or id addressing on edit and delete) and records
/// every call it receives.
pub struct FakeGateway {
    movies: Mutex<Vec<Movie>>,
    reviews: Mutex<Vec<Review>>,
    prediction: Mutex<Sentiment>,
    failures: Mutex<HashSet<Op>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeGateway {
    pub fn with_reviews(reviews: Vec<Review>) -> Arc<Self> {
        Arc::new(Self {
            movies: Mutex::new(Vec::new()),
            reviews: Mutex::new(reviews),
            prediction: Mutex::new(Sentiment::Positive),
            failures: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn with_movies(movies: Vec<Movie>) -> Arc<Self> {
        let fake = Self::with_reviews(Vec::new());
        *fake.movies.lock().unwrap() = movies;
        fake
    }

    pub fn set_prediction(&self, sentiment: Sentiment) {
        *self.prediction.lock().unwrap() = sentiment;
    }

    /// Make the next call of `op` fail with a server error
    pub fn fail_next(&self, op: Op) {
        self.failures.lock().unwrap().insert(op);
    }

    pub fn fail_next_list_reviews(&self) {
        self.fail_next(Op::ListReviews);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| call.op() == op).count()
    }

    pub fn list_reviews_calls(&self) -> usize {
        self.count(Op::ListReviews)
    }

    /// Number of calls other than list reads
    pub fn mutation_calls(&self) -> usize {
        self.count(Op::Predict) + self.count(Op::Submit) + self.count(Op::Update) + self.count(Op::Delete)
    }

    pub fn server_reviews(&self) -> Vec<Review> {
        self.reviews.lock().unwrap().clone()
    }

    fn record(&self, call: Call, endpoint: &str) -> Result<(), GatewayError> {
        let op = call.op();
        self.calls.lock().unwrap().push(call);
        if self.failures.lock().unwrap().remove(&op) {
            return Err(server_error(endpoint));
        }
        Ok(())
    }

    fn position(reviews: &[Review], target: &RemoteTarget) -> Option<usize> {
        match target {
            RemoteTarget::Index(index) => (*index < reviews.len()).then_some(*index),
            RemoteTarget::Id(id) => reviews.iter().position(|r| r.id.as_ref() == Some(id)),
        }
    }

    fn not_found(endpoint: &str) -> GatewayError {
        GatewayError::Status {
            endpoint: endpoint.to_string(),
            status: 404,
            body: "Review not found".to_string(),
        }
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn list_movies(&self) -> Result<Vec<Movie>, GatewayError> {
        self.record(Call::ListMovies, "GET /movies")?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, GatewayError> {
        self.record(Call::ListReviews, "GET /reviews")?;
        Ok(self.server_reviews())
    }

    async fn predict(&self, text: &str) -> Result<Sentiment, GatewayError> {
        self.record(Call::Predict(text.to_string()), "POST /predict")?;
        Ok(self.prediction.lock().unwrap().clone())
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<Ack, GatewayError> {
        self.record(Call::Submit(submission.clone()), "POST /submit_review")?;
        let mut reviews = self.reviews.lock().unwrap();
        let timestamp = Timestamp::parse(format!("2030-01-01T00:00:{:02}Z", reviews.len() % 60));
        reviews.push(Review {
            id: None,
            movie: submission.movie.clone(),
            review: submission.review.clone(),
            sentiment: submission.sentiment.clone(),
            timestamp,
        });
        Ok(Ack {
            message: Some("Review saved successfully".to_string()),
        })
    }

    async fn update_review(&self, target: &RemoteTarget, text: &str) -> Result<Ack, GatewayError> {
        let endpoint = format!("PUT /reviews/{}", target.path_segment());
        self.record(Call::Update(target.clone(), text.to_string()), &endpoint)?;
        let mut reviews = self.reviews.lock().unwrap();
        let index = Self::position(&reviews, target).ok_or_else(|| Self::not_found(&endpoint))?;
        reviews[index].review = text.to_string();
        Ok(Ack::default())
    }

    async fn delete_review(&self, target: &RemoteTarget) -> Result<Ack, GatewayError> {
        let endpoint = format!("DELETE /reviews/{}", target.path_segment());
        self.record(Call::Delete(target.clone()), &endpoint)?;
        let mut reviews = self.reviews.lock().unwrap();
        let index = Self::position(&reviews, target).ok_or_else(|| Self::not_found(&endpoint))?;
        reviews.remove(index);
        Ok(Ack::default())
    }
}

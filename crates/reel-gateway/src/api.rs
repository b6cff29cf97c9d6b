use crate::error::GatewayError;
use reel_models::{Movie, RemoteTarget, Review, Sentiment};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Body of `POST /submit_review`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewSubmission {
    pub movie: Movie,
    pub review: String,
    pub sentiment: Sentiment,
}

/// Acknowledgement of a mutation. The service only promises "some" body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    review: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    result: Sentiment,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    review: &'a str,
}

#[derive(Debug, Deserialize)]
struct AckBody {
    #[serde(default)]
    message: Option<String>,
}

/// Join the base url and an endpoint path, tolerating a trailing slash on the base
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

pub fn review_path(target: &RemoteTarget) -> String {
    format!("reviews/{}", urlencoding::encode(&target.path_segment()))
}

async fn send(request: RequestBuilder, endpoint: &str) -> Result<String, GatewayError> {
    let response: Response = request.send().await.map_err(|source| GatewayError::Request {
        endpoint: endpoint.to_string(),
        source,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|source| GatewayError::Request {
        endpoint: endpoint.to_string(),
        source,
    })?;

    if !status.is_success() {
        return Err(GatewayError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    debug!("{} answered {} ({} bytes)", endpoint, status, body.len());
    Ok(body)
}

pub fn decode<T: DeserializeOwned>(endpoint: &str, body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// Read whatever the service sent back for a mutation
pub fn decode_ack(body: &str) -> Ack {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ack::default();
    }
    match serde_json::from_str::<AckBody>(trimmed) {
        Ok(parsed) => Ack { message: parsed.message },
        Err(_) => Ack {
            message: Some(trimmed.to_string()),
        },
    }
}

fn request(client: &Client, method: Method, url: &str) -> RequestBuilder {
    client.request(method, url).header("Accept", "application/json")
}

pub async fn get_movies(client: &Client, base_url: &str) -> Result<Vec<Movie>, GatewayError> {
    let url = endpoint_url(base_url, "movies");
    let body = send(request(client, Method::GET, &url), "GET /movies").await?;
    decode("GET /movies", &body)
}

pub async fn get_reviews(client: &Client, base_url: &str) -> Result<Vec<Review>, GatewayError> {
    let url = endpoint_url(base_url, "reviews");
    let body = send(request(client, Method::GET, &url), "GET /reviews").await?;
    decode("GET /reviews", &body)
}

pub async fn predict(client: &Client, base_url: &str, text: &str) -> Result<Sentiment, GatewayError> {
    let url = endpoint_url(base_url, "predict");
    let body = send(
        request(client, Method::POST, &url).json(&PredictRequest { review: text }),
        "POST /predict",
    )
    .await?;
    let parsed: PredictResponse = decode("POST /predict", &body)?;
    Ok(parsed.result)
}

pub async fn submit_review(
    client: &Client,
    base_url: &str,
    submission: &ReviewSubmission,
) -> Result<Ack, GatewayError> {
    let url = endpoint_url(base_url, "submit_review");
    let body = send(request(client, Method::POST, &url).json(submission), "POST /submit_review").await?;
    Ok(decode_ack(&body))
}

pub async fn update_review(
    client: &Client,
    base_url: &str,
    target: &RemoteTarget,
    text: &str,
) -> Result<Ack, GatewayError> {
    let path = review_path(target);
    let endpoint = format!("PUT /{}", path);
    let url = endpoint_url(base_url, &path);
    let body = send(
        request(client, Method::PUT, &url).json(&UpdateRequest { review: text }),
        &endpoint,
    )
    .await?;
    Ok(decode_ack(&body))
}

pub async fn delete_review(client: &Client, base_url: &str, target: &RemoteTarget) -> Result<Ack, GatewayError> {
    let path = review_path(target);
    let endpoint = format!("DELETE /{}", path);
    let url = endpoint_url(base_url, &path);
    let body = send(request(client, Method::DELETE, &url), &endpoint).await?;
    Ok(decode_ack(&body))
}

/// Transport-level failures of the review service.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

impl GatewayError {
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GatewayError::Request { endpoint, .. }
            | GatewayError::Status { endpoint, .. }
            | GatewayError::Decode { endpoint, .. } => Some(endpoint),
            GatewayError::InvalidUrl(_) => None,
        }
    }

    /// HTTP status for errors the server answered, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

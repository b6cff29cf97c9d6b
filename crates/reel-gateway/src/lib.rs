pub mod api;
pub mod client;
pub mod error;
pub mod factory;
pub mod traits;

pub use api::{Ack, ReviewSubmission};
pub use client::HttpGateway;
pub use error::GatewayError;
pub use factory::create_gateway;
pub use traits::RemoteGateway;

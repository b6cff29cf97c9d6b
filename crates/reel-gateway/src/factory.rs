use crate::client::HttpGateway;
use crate::error::GatewayError;
use crate::traits::RemoteGateway;
use reel_config::Config;
use std::sync::Arc;
use std::time::Duration;

/// Build the gateway described by the `[server]` section of the config
pub fn create_gateway(config: &Config) -> Result<Arc<dyn RemoteGateway>, GatewayError> {
    let gateway = HttpGateway::new(
        config.server.base_url.trim(),
        Duration::from_secs(config.server.timeout_seconds),
    )?;
    Ok(Arc::new(gateway))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gateway_from_default_config() {
        assert!(create_gateway(&Config::default()).is_ok());
    }

    #[test]
    fn test_create_gateway_rejects_bad_url() {
        let mut config = Config::default();
        config.server.base_url = "::nonsense".to_string();
        assert!(create_gateway(&config).is_err());
    }
}

use std::env;

use serde::{Deserialize, Serialize};

use stowage_bucket::{BucketError, BucketResult};

/// Environment variable naming the host the gateway advertises in signed
/// URLs.
pub const GATEWAY_HOST_ENV: &str = "STOWAGE_GATEWAY_HOST";

/// Environment variable naming the TCP port the gateway listens on. A value
/// of `0` lets the OS pick a free port; signed URLs always carry the port
/// that was actually bound.
pub const GATEWAY_PORT_ENV: &str = "STOWAGE_GATEWAY_PORT";

/// Gateway network configuration.
///
/// Both settings are mandatory. Their absence fails bucket-open with a
/// [`BucketError::Config`] before any network resource is touched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Host name advertised in signed URLs.
    pub host: String,
    /// Port the listener binds (all interfaces).
    pub port: u16,
}

impl GatewayConfig {
    /// Read both mandatory settings from the environment.
    pub fn from_env() -> BucketResult<Self> {
        Self::parse(
            env::var(GATEWAY_HOST_ENV).ok(),
            env::var(GATEWAY_PORT_ENV).ok(),
        )
    }

    /// Validate raw setting values. Empty strings count as unset.
    fn parse(host: Option<String>, port: Option<String>) -> BucketResult<Self> {
        let host = host
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BucketError::Config(format!("{GATEWAY_HOST_ENV} is not set")))?;
        let port_raw = port
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BucketError::Config(format!("{GATEWAY_PORT_ENV} is not set")))?;
        let port = port_raw.parse::<u16>().map_err(|_| {
            BucketError::Config(format!(
                "{GATEWAY_PORT_ENV} is not a valid port: {port_raw}"
            ))
        })?;
        Ok(Self { host, port })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_settings_present() {
        let config =
            GatewayConfig::parse(Some("localhost".to_string()), Some("8080".to_string())).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_host_is_a_config_error() {
        let err = GatewayConfig::parse(None, Some("8080".to_string())).unwrap_err();
        assert!(matches!(err, BucketError::Config(msg) if msg.contains(GATEWAY_HOST_ENV)));
    }

    #[test]
    fn missing_port_is_a_config_error() {
        let err = GatewayConfig::parse(Some("localhost".to_string()), None).unwrap_err();
        assert!(matches!(err, BucketError::Config(msg) if msg.contains(GATEWAY_PORT_ENV)));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let err =
            GatewayConfig::parse(Some(String::new()), Some("8080".to_string())).unwrap_err();
        assert!(matches!(err, BucketError::Config(_)));
    }

    #[test]
    fn unparsable_port_is_a_config_error() {
        let err = GatewayConfig::parse(
            Some("localhost".to_string()),
            Some("eight-thousand".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, BucketError::Config(msg) if msg.contains("not a valid port")));
    }

    #[test]
    fn port_zero_is_accepted() {
        let config =
            GatewayConfig::parse(Some("127.0.0.1".to_string()), Some("0".to_string())).unwrap();
        assert_eq!(config.port, 0);
    }
}

//! # Client Configuration
//!
//! The settings a single invocation runs with. The command line fills it in; the
//! library only reads it.
//!
//! | Setting       | Default | Meaning                                           |
//! |---------------|---------|---------------------------------------------------|
//! | `timeout`     | 5 s     | wait per attempt before retransmitting            |
//! | `max_retries` | 3       | datagrams sent before giving up                   |
//! | `port`        | 53      | UDP port of the name server                       |
//! | `query_type`  | `A`     | one of `A`, `NS`, `MX`                            |
//! | `strict_id`   | `false` | reject replies whose ID differs from the query's  |
//!
//! ```rust
//! use std::time::Duration;
//! use dnsclient::dns::resolver::RecordType;
//! use dnsclient::utils::{ClientConfig, ServerAddress};
//!
//! let config = ClientConfig::new(ServerAddress::new("@8.8.8.8").unwrap(), "mcgill.ca")
//!     .with_query_type(RecordType::Mx)
//!     .with_timeout(Duration::from_secs(2));
//! assert!(config.validate().is_ok());
//! ```
use super::target::{ServerAddress, ServerAddressErrors};
use crate::dns::compressor::{EncodeErrors, MessageCompressor};
use crate::dns::resolver::{QuerySpec, RecordType};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 53;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server: ServerAddress,
    pub port: u16,
    pub timeout: Duration,
    pub max_retries: u32,
    pub query_type: RecordType,
    pub domain_name: String,
    /// Reject replies whose transaction ID differs from the query's.
    pub strict_id: bool,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout, retries, port and type `A`.
    pub fn new(server: ServerAddress, domain_name: impl Into<String>) -> Self {
        Self {
            server,
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            query_type: RecordType::A,
            domain_name: domain_name.into(),
            strict_id: false,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_query_type(mut self, query_type: RecordType) -> Self {
        self.query_type = query_type;
        self
    }

    pub fn with_strict_id(mut self, strict_id: bool) -> Self {
        self.strict_id = strict_id;
        self
    }

    /// Checks everything that can be checked before touching the network.
    pub fn validate(&self) -> Result<(), ConfigErrors> {
        if self.timeout.is_zero() {
            return Err(ConfigErrors::ZeroTimeout);
        }
        if self.port == 0 {
            return Err(ConfigErrors::InvalidPort);
        }
        MessageCompressor::labels(&self.domain_name)?;
        Ok(())
    }

    /// A query for the configured name and type with a fresh random ID.
    pub fn query_spec(&self) -> QuerySpec {
        QuerySpec::new(self.domain_name.as_str(), self.query_type)
    }

    #[cfg(any(feature = "std", feature = "tokio-dep"))]
    pub fn transport_settings(&self) -> crate::dns::resolver::transporter::TransportSettings {
        crate::dns::resolver::transporter::TransportSettings {
            server: std::net::SocketAddrV4::new(self.server.ip(), self.port),
            timeout: self.timeout,
            max_retries: self.max_retries,
        }
    }
}

/// Picks the query type from the mutually exclusive `-mx` / `-ns` switches.
pub fn query_type_from_flags(mx: bool, ns: bool) -> Result<RecordType, ConfigErrors> {
    match (mx, ns) {
        (true, true) => Err(ConfigErrors::ConflictingQueryTypes),
        (true, false) => Ok(RecordType::Mx),
        (false, true) => Ok(RecordType::Ns),
        (false, false) => Ok(RecordType::A),
    }
}

/// Represents errors found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigErrors {
    #[error("{0}")]
    InvalidServer(#[from] ServerAddressErrors),
    #[error("Invalid domain name: {0}")]
    InvalidDomain(#[from] EncodeErrors),
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
    #[error("Invalid port => (1 -> 65,535)")]
    InvalidPort,
    #[error("Only one of MX or NS can be requested")]
    ConflictingQueryTypes,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ServerAddress {
        ServerAddress::new("@8.8.8.8").unwrap()
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new(server(), "example.com");
        assert_eq!(config.port, 53);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.query_type, RecordType::A);
        assert!(!config.strict_id);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_timeout_and_port() {
        let config = ClientConfig::new(server(), "example.com").with_timeout(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigErrors::ZeroTimeout));

        let config = ClientConfig::new(server(), "example.com").with_port(0);
        assert_eq!(config.validate(), Err(ConfigErrors::InvalidPort));
    }

    #[test]
    fn test_config_rejects_unencodable_domain() {
        let config = ClientConfig::new(server(), "exa mple.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigErrors::InvalidDomain(EncodeErrors::InvalidCharacter { .. }))
        ));
    }

    #[test]
    fn test_query_spec_uses_configured_type() {
        let config = ClientConfig::new(server(), "mcgill.ca").with_query_type(RecordType::Ns);
        let spec = config.query_spec();
        assert_eq!(spec.domain_name, "mcgill.ca");
        assert_eq!(spec.query_type, RecordType::Ns);
    }

    #[test]
    fn test_query_type_flags_are_exclusive() {
        assert_eq!(query_type_from_flags(false, false), Ok(RecordType::A));
        assert_eq!(query_type_from_flags(true, false), Ok(RecordType::Mx));
        assert_eq!(query_type_from_flags(false, true), Ok(RecordType::Ns));
        assert_eq!(query_type_from_flags(true, true), Err(ConfigErrors::ConflictingQueryTypes));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_transport_settings() {
        let config = ClientConfig::new(server(), "example.com").with_port(5353).with_max_retries(7);
        let settings = config.transport_settings();
        assert_eq!(settings.server.to_string(), "8.8.8.8:5353");
        assert_eq!(settings.max_retries, 7);
    }
}

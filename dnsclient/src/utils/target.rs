//! # ServerAddress
//!
//! Parses the name server argument: an IPv4 literal, optionally written with a
//! leading `@` (`@8.8.8.8`).
//!
//! ## Example
//!
//! ```rust
//! use std::str::FromStr;
//! use dnsclient::utils::ServerAddress;
//!
//! // Via `new` constructor (returns Result)
//! let server = ServerAddress::new("@8.8.8.8").unwrap();
//!
//! // Via `parse` using FromStr (returns Result)
//! let server2: ServerAddress = "1.1.1.1".parse().unwrap();
//!
//! // Via TryFrom (returns Result)
//! let server3 = ServerAddress::try_from("@9.9.9.9").unwrap();
//!
//! assert_eq!(server.to_string(), "8.8.8.8");
//! # let _ = (server2, server3);
//! ```
use std::fmt::Display;
use std::net::Ipv4Addr;
use std::str::FromStr;
use thiserror::Error;

/// IPv4 address of the name server to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerAddress(Ipv4Addr);

impl ServerAddress {
    /// Parses `a.b.c.d` or `@a.b.c.d`.
    ///
    /// # Errors
    /// Returns [`ServerAddressErrors`] if:
    /// - The input is empty (or just `@`)
    /// - The rest is not a dotted-quad IPv4 address
    pub fn new(input: &str) -> Result<ServerAddress, ServerAddressErrors> {
        let target = input.strip_prefix('@').unwrap_or(input);

        if target.is_empty() {
            return Err(ServerAddressErrors::Empty);
        }

        match Ipv4Addr::from_str(target) {
            Ok(ip) => Ok(ServerAddress(ip)),
            Err(_) => Err(ServerAddressErrors::InvalidIpv4(input.to_string())),
        }
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.0
    }
}

impl From<Ipv4Addr> for ServerAddress {
    fn from(value: Ipv4Addr) -> Self {
        ServerAddress(value)
    }
}

impl FromStr for ServerAddress {
    type Err = ServerAddressErrors;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerAddress::new(s)
    }
}

impl TryFrom<&str> for ServerAddress {
    type Error = ServerAddressErrors;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ServerAddress::new(value)
    }
}

impl Display for ServerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents possible errors when parsing a server address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerAddressErrors {
    #[error("The server address is empty")]
    Empty,
    #[error("Invalid server address {0} => must be an IPv4 address such as @8.8.8.8")]
    InvalidIpv4(String),
}

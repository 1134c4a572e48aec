#![cfg_attr(docsrs, feature(doc_cfg))]
//! # dnsclient
//!
//! A small DNS client library: it builds one RFC 1035 query, sends it to a
//! name server over UDP, retransmits on timeout, and decodes the `A`, `NS` and
//! `MX` records of the reply.
//!
//! ## Features
//!
//! - **Standard (`std`, default)**
//!   - Blocking transport using `std::net::UdpSocket`.
//!   - [`dns::resolver::resolve`] runs a complete query.
//!
//! - **Tokio (`tokio-dep`)**
//!   - Async transport using `tokio::net::UdpSocket`.
//!   - `dns::resolver::resolve_async` mirrors the blocking call.
//!
//! - **JSON (`json`)**
//!   - `serde` derives on reports and `reporter::JsonFormatter`.
//!
//! With `default-features = false` only the message codec is built.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! dnsclient = { version = "0.1", features = ["std"] }
//! dnsclient = { version = "0.1", features = ["tokio-dep"] }
//! dnsclient = { version = "0.1", default-features = false }
//! ```
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "std")]
//! # {
//! use dnsclient::dns::resolver::{RecordType, resolve};
//! use dnsclient::reporter::{ReplyFormatter, TextFormatter, error_line, request_preamble};
//! use dnsclient::utils::{ClientConfig, ServerAddress};
//! use std::time::Duration;
//!
//! let config = ClientConfig::new(ServerAddress::new("@132.206.85.18").unwrap(), "mcgill.ca")
//!     .with_query_type(RecordType::Mx)
//!     .with_timeout(Duration::from_secs(2));
//!
//! println!("{}", request_preamble(&config));
//! match resolve(&config) {
//!     Ok(resolution) => print!("{}", TextFormatter.format(&resolution)),
//!     Err(e) => println!("{}", error_line(&e)),
//! }
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`dns`** - Wire codec, record decoding and UDP transport
//! - **`utils`** - Client configuration and server address parsing
//! - **`reporter`** - Text, structured and JSON output of a resolution
//!
//! ## Error Handling
//!
//! Every layer has its own error enum (`EncodeErrors`, `DecodeErrors`,
//! `TransportErrors`, `ConfigErrors`, ...) and they convert upward into
//! `ResolverErrors`, so one `?` is enough at the call site.

pub mod dns;

pub mod utils;

#[cfg(any(feature = "std", feature = "tokio-dep"))]
pub mod reporter;

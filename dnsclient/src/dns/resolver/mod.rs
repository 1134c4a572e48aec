//! # dnsclient Resolver
//!
//! A one-shot DNS stub resolver over UDP, following [RFC 1035](https://datatracker.ietf.org/doc/html/rfc1035).
//!
//! A call to [`resolve`] performs exactly one query:
//!
//! ```text
//! ClientConfig -> encode_query -> send_and_await (retry loop) -> DecodedReply::decode -> Resolution
//! ```
//!
//! ### Available Features
//!
//! | Feature       | Description                                                                 |
//! |----------------|------------------------------------------------------------------------------|
//! | `std`          | Enables the **blocking** UDP resolver using the standard library.            |
//! | `tokio-dep`    | Enables the **asynchronous** resolver built on [Tokio](https://tokio.rs).    |
//!
//! Without either feature only the message codec ([`encode_query`], [`DecodedReply`]) is built.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dnsclient::dns::resolver::{RecordData, resolve};
//! use dnsclient::utils::{ClientConfig, ServerAddress};
//!
//! let config = ClientConfig::new(ServerAddress::new("@8.8.8.8").unwrap(), "example.com");
//!
//! match resolve(&config) {
//!     Ok(resolution) => {
//!         for answer in resolution.reply.answers {
//!             if let RecordData::A(ip) = answer.data {
//!                 println!("IPv4: {ip} (ttl {})", answer.ttl);
//!             }
//!         }
//!     }
//!     Err(e) => eprintln!("DNS resolution failed: {e}"),
//! }
//! ```
//!
//! ## Supported Record Types
//!
//! - `A`: IPv4 address records
//! - `NS`: Authoritative name servers
//! - `MX`: Mail exchange
//!
//! Records of any other type in a reply are stepped over and listed in
//! [`DecodedReply::skipped`].
//!
//! ## Error Handling
//!
//! - [`ResolverErrors`]: top-level errors from [`resolve`].
//! - [`TransportErrors`](transporter::TransportErrors): retries exhausted or socket failures.
//! - [`DecodeErrors`]: reply parsing failures, including server-reported RCODEs.
//! - [`EncodeErrors`]: names that cannot be put on the wire.

pub mod message;
pub mod records;

pub use self::message::{
    DecodeErrors, DecodedReply, DnsHeaderFlags, DnsMessage, EncodedMessage, HeaderSection,
    QuerySpec, QuestionSection, RecordType, ResponseCode, decode_message, encode_query,
    generate_id,
};
pub use self::records::{RecordData, ResourceRecord, Section, SkippedRecord};
pub use crate::dns::compressor::EncodeErrors;

cfg_if::cfg_if! {
    if #[cfg(any(feature = "std", feature = "tokio-dep"))] {
        pub mod transporter;

        use crate::utils::{ClientConfig, ConfigErrors};
        use std::time::Duration;
        use thiserror::Error;
        use tracing::{debug, info};
        use transporter::{Exchange, TransportErrors};

        /// The outcome of one successful query.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct Resolution {
            pub query: QuerySpec,
            pub reply: DecodedReply,
            /// Time from the first datagram sent to the reply.
            pub elapsed: Duration,
            /// Retransmissions before the reply arrived.
            pub retries: u32,
        }

        /// Represents high-level resolver errors exposed to users.
        #[derive(Debug, Error)]
        pub enum ResolverErrors {
            #[error("{0}")]
            Config(#[from] ConfigErrors),
            #[error("Invalid domain name: {0}")]
            Encoding(#[from] EncodeErrors),
            #[error("{0}")]
            Transport(#[from] TransportErrors),
            #[error("{0}")]
            Decode(#[from] DecodeErrors),
            #[error("The DNS response ID {received} didn't match the query ID {expected}")]
            IdMismatch { expected: u16, received: u16 },
        }

        /// Validates and encodes the query; nothing here touches the network.
        fn prepare(config: &ClientConfig) -> Result<(QuerySpec, EncodedMessage), ResolverErrors> {
            config.validate()?;
            let spec = config.query_spec();
            let query = encode_query(&spec)?;
            debug!(
                name = %spec.domain_name,
                record_type = %spec.query_type,
                id = spec.transaction_id,
                bytes = query.len(),
                "query encoded"
            );
            Ok((spec, query))
        }

        fn complete(
            config: &ClientConfig,
            query: QuerySpec,
            exchange: Exchange,
        ) -> Result<Resolution, ResolverErrors> {
            if config.strict_id {
                if let Some(received) = internal::response_id(&exchange.datagram) {
                    if received != query.transaction_id {
                        return Err(ResolverErrors::IdMismatch {
                            expected: query.transaction_id,
                            received,
                        });
                    }
                }
            }

            let reply = DecodedReply::decode(&exchange.datagram)?;
            info!(
                answers = reply.answers.len(),
                additionals = reply.additionals.len(),
                skipped = reply.skipped.len(),
                authoritative = reply.header.authoritative(),
                "reply decoded"
            );

            Ok(Resolution {
                query,
                reply,
                elapsed: exchange.elapsed,
                retries: exchange.retries(),
            })
        }

        mod internal {
            /// ID of a reply datagram, if it is long enough to carry one.
            pub(crate) fn response_id(datagram: &[u8]) -> Option<u16> {
                match datagram {
                    [hi, lo, ..] => Some(u16::from_be_bytes([*hi, *lo])),
                    _ => None,
                }
            }
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Resolves the configured name with a blocking UDP exchange.
        ///
        /// # Errors
        /// - [`ResolverErrors::Config`] / [`ResolverErrors::Encoding`] before any I/O.
        /// - [`ResolverErrors::Transport`] when no reply arrives or the socket fails.
        /// - [`ResolverErrors::Decode`] when the reply is an error or malformed.
        /// - [`ResolverErrors::IdMismatch`] in strict mode only.
        pub fn resolve(config: &ClientConfig) -> Result<Resolution, ResolverErrors> {
            let (spec, query) = prepare(config)?;
            let exchange = transporter::send_and_await(&config.transport_settings(), &query)?;
            complete(config, spec, exchange)
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        /// Async counterpart of `resolve`, one socket and one query in flight.
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub async fn resolve_async(config: &ClientConfig) -> Result<Resolution, ResolverErrors> {
            let (spec, query) = prepare(config)?;
            let exchange = transporter::send_and_await_async(&config.transport_settings(), &query).await?;
            complete(config, spec, exchange)
        }
    }
}

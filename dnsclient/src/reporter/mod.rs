//! # Reporter
//!
//! Turns a [`Resolution`] into something a user (or a program) reads.
//!
//! The shape of the output is chosen with a [`ReplyFormatter`]:
//!
//! | Formatter               | Output                             | Feature |
//! |-------------------------|------------------------------------|---------|
//! | [`TextFormatter`]       | `String`                           |         |
//! | [`StructuredFormatter`] | [`ReplyReport`]                    |         |
//! | `JsonFormatter`         | `Result<String, serde_json::Error>` | `json`  |
//!
//! The text form looks like this:
//!
//! ```text
//! DnsClient sending request for example.com
//! Server: 8.8.8.8
//! Request type: A
//! Response received after 0.021 seconds (0 retries)
//! ***Answer Section (1 records)***
//! IP	93.184.216.34	300	nonauth
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dnsclient::reporter::{error_line, request_preamble};
//! use dnsclient::utils::{ClientConfig, ServerAddress};
//!
//! let config = ClientConfig::new(ServerAddress::new("@8.8.8.8").unwrap(), "example.com");
//! assert_eq!(
//!     request_preamble(&config),
//!     "DnsClient sending request for example.com\nServer: 8.8.8.8\nRequest type: A"
//! );
//! assert_eq!(error_line(&"Maximum number of retries 3 exceeded"), "ERROR\tMaximum number of retries 3 exceeded");
//! ```
use crate::dns::resolver::{RecordData, Resolution, ResourceRecord, SkippedRecord};
use crate::utils::ClientConfig;
use std::fmt::Display;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

pub mod formatter;

pub use formatter::*;

/// A resolution flattened into plain values, one [`RecordLine`] per record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ReplyReport {
    pub name: String,
    pub query_type: String,
    pub elapsed_secs: f64,
    pub retries: u32,
    pub answers: Vec<RecordLine>,
    pub additionals: Vec<RecordLine>,
    /// Records of types the client does not decode.
    pub skipped: Vec<SkippedLine>,
    pub not_found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct RecordLine {
    pub record_type: String,
    pub value: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none", default))]
    pub preference: Option<u16>,
    pub ttl: u32,
    pub authoritative: bool,
}

/// A record the reply carried but the client does not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SkippedLine {
    pub section: String,
    pub owner: String,
    pub record_type: u16,
}

impl From<&SkippedRecord> for SkippedLine {
    fn from(record: &SkippedRecord) -> Self {
        SkippedLine {
            section: record.section.to_string(),
            owner: record.owner.clone(),
            record_type: record.record_type,
        }
    }
}

impl From<&ResourceRecord> for RecordLine {
    fn from(record: &ResourceRecord) -> Self {
        let (value, preference) = match &record.data {
            RecordData::A(ip) => (ip.to_string(), None),
            RecordData::Ns(name) => (name.clone(), None),
            RecordData::Mx {
                preference,
                exchange,
            } => (exchange.clone(), Some(*preference)),
        };

        RecordLine {
            record_type: record.data.record_type().to_string(),
            value,
            preference,
            ttl: record.ttl,
            authoritative: record.authoritative,
        }
    }
}

impl From<&Resolution> for ReplyReport {
    fn from(resolution: &Resolution) -> Self {
        let reply = &resolution.reply;
        ReplyReport {
            name: resolution.query.domain_name.clone(),
            query_type: resolution.query.query_type.to_string(),
            elapsed_secs: resolution.elapsed.as_secs_f64(),
            retries: resolution.retries,
            answers: reply.answers.iter().map(RecordLine::from).collect(),
            additionals: reply.additionals.iter().map(RecordLine::from).collect(),
            skipped: reply.skipped.iter().map(SkippedLine::from).collect(),
            not_found: reply.is_not_found(),
        }
    }
}

/// The three lines printed before the query goes out.
pub fn request_preamble(config: &ClientConfig) -> String {
    format!(
        "DnsClient sending request for {}\nServer: {}\nRequest type: {}",
        config.domain_name, config.server, config.query_type
    )
}

/// `ERROR\t<description>`, the single line printed when an invocation fails.
pub fn error_line(error: &dyn Display) -> String {
    format!("ERROR\t{error}")
}

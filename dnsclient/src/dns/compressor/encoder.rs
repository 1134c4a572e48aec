//! DNS Name Encoder
//!
//! Writes domain names into a DNS message in RFC 1035 wire format, optionally
//! replacing a repeated suffix with a compression pointer.
//!
//! # Overview
//!
//! RFC1035 §4.1.4 allows a domain name, or any suffix of it, to be replaced by a
//! 2-byte pointer to an earlier occurrence in the same message:
//!
//! - The top two bits of the pointer are `11`.
//! - The lower 14 bits hold the offset from the start of the message.
//!
//! The encoder builds the message incrementally:
//! 1. The `message` buffer receives the label bytes (or a pointer).
//! 2. The `pointer_map` records each suffix written and its offset, so later
//!    names can point back at it.
//! 3. Every label is lowercased and checked against the label character table,
//!    the 63-octet label limit and the 255-octet name limit.
//!
//! A query carries a single name, so [`DnsMessage::encode_query`] hands in an empty
//! map and no pointer is ever emitted there. Test fixtures reuse one map across
//! several names to build compressed replies.
//!
//! # Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use dnsclient::dns::compressor::MessageCompressor;
//!
//! let mut message = Vec::new();
//! let mut pointer_map = HashMap::new();
//!
//! MessageCompressor::compress("www.Example.com", &mut message, &mut pointer_map).unwrap();
//! MessageCompressor::compress("mail.example.com", &mut message, &mut pointer_map).unwrap();
//! ```
//!
//! [`DnsMessage::encode_query`]: crate::dns::resolver::DnsMessage::encode_query
use std::collections::HashMap;
use thiserror::Error;

/// Longest label allowed on the wire.
pub const MAX_LABEL_LEN: usize = 63;
/// Longest encoded name, length octets and terminator included.
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u16 = 0b1100_0000_0000_0000;
const MAX_POINTER_OFFSET: usize = 0x3FFF;

/// Characters accepted inside a label, indexed by ASCII value.
///
/// Letters, digits, `-` and `_`. Upper-case letters are accepted here and folded to
/// lower case while encoding.
static LABEL_CHARS: [bool; 128] = label_chars();

const fn label_chars() -> [bool; 128] {
    let mut table = [false; 128];
    let mut c = 0;
    while c < 128 {
        let b = c as u8;
        table[c] = b.is_ascii_alphanumeric() || b == b'-' || b == b'_';
        c += 1;
    }
    table
}

fn is_label_char(c: char) -> bool {
    c.is_ascii() && LABEL_CHARS[c as usize]
}

#[derive(PartialEq, Eq, Hash)]
pub struct MessageCompressor {}

impl MessageCompressor {
    /// Splits `name` into validated, lowercased labels.
    ///
    /// A single trailing dot is accepted (`example.com.`); any other empty label is an
    /// error.
    pub fn labels(name: &str) -> Result<Vec<String>, EncodeErrors> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Err(EncodeErrors::EmptyName);
        }

        let mut encoded_len = 1;
        let mut labels = Vec::new();
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(EncodeErrors::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(EncodeErrors::LabelTooLong(label.to_string()));
            }
            if let Some(c) = label.chars().find(|c| !is_label_char(*c)) {
                return Err(EncodeErrors::InvalidCharacter {
                    label: label.to_string(),
                    character: c,
                });
            }
            encoded_len += 1 + label.len();
            labels.push(label.to_ascii_lowercase());
        }

        if encoded_len > MAX_NAME_LEN {
            return Err(EncodeErrors::NameTooLong(encoded_len));
        }
        Ok(labels)
    }

    /// Reference to RFC1035, page 30 (4.1.4)
    ///
    /// The pointer takes the form of a two octet sequence:
    ///
    ///   +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///   | 1  1|                OFFSET                   |
    ///   +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
    ///
    /// The OFFSET field specifies an offset from the start of the message (the first
    /// octet of the ID field in the header).
    ///
    /// On error nothing is written to `message`.
    pub fn compress(
        name: &str,
        message: &mut Vec<u8>,
        pointer_map: &mut HashMap<String, usize>,
    ) -> Result<(), EncodeErrors> {
        let labels = Self::labels(name)?;

        for i in 0..labels.len() {
            let suffix = labels[i..].join(".");

            match pointer_map.get(&suffix) {
                Some(&offset) if offset <= MAX_POINTER_OFFSET => {
                    let pointer = POINTER_MASK | (offset as u16);
                    message.extend_from_slice(&pointer.to_be_bytes());
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    pointer_map.insert(suffix, message.len());
                }
            }

            let label = &labels[i];
            message.push(label.len() as u8);
            message.extend_from_slice(label.as_bytes());
        }

        message.push(0);
        Ok(())
    }
}

/// Reasons a domain name cannot be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeErrors {
    #[error("Domain name is empty")]
    EmptyName,
    #[error("Empty label in domain name: {0}")]
    EmptyLabel(String),
    #[error("Label too long (>63): {0}")]
    LabelTooLong(String),
    #[error("Name is too long (>255 encoded octets): {0}")]
    NameTooLong(usize),
    #[error("Label {label} contains an unsupported character {character:?}")]
    InvalidCharacter { label: String, character: char },
}

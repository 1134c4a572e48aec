//! # dnsclient DNS
//!
//! Everything that deals with DNS messages, from the byte level up:
//!
//! - `cursor`: a bounds-checked reader over a received datagram.
//! - `compressor`: domain name encoding with compression on the way out, and
//!   pointer-following decompression on the way in.
//! - `resolver`: query building, reply decoding and (with `std` or `tokio-dep`)
//!   the UDP transport with its retry loop.
//!
//! The codec parts never touch the network, so they build with
//! `default-features = false`:
//!
//! ```rust
//! use dnsclient::dns::resolver::{QuerySpec, RecordType, encode_query};
//!
//! let query = encode_query(&QuerySpec::new("example.com", RecordType::A).with_id(0x1234)).unwrap();
//! assert_eq!(query.len(), 29);
//! assert_eq!(query.transaction_id(), 0x1234);
//! ```

pub mod compressor;
pub mod cursor;
pub mod resolver;

//! # DNS Message Codec
//!
//! Builds the query datagram and decodes the reply.
//!
//! ## Sections
//!
//! - **HeaderSection**: message ID, flags and the four section counts.
//! - **DnsHeaderFlags**: the 16-bit flags field, with encode/decode helpers.
//! - **QuestionSection**: the name, type and class being asked for.
//! - **DecodedReply**: header plus the decoded answer and additional records.
//!
//! ## Usage
//!
//! ```rust
//! use dnsclient::dns::resolver::{DecodedReply, QuerySpec, RecordType, encode_query};
//!
//! let spec = QuerySpec::new("example.com", RecordType::A).with_id(0x1234);
//! let query = encode_query(&spec).unwrap();
//! assert_eq!(&query.as_bytes()[..2], &[0x12, 0x34]);
//!
//! // A reply is decoded from the raw datagram.
//! assert!(DecodedReply::decode(&query.as_bytes()[..4]).is_err());
//! ```
use super::records::{self, ResourceRecord, Section, SkippedRecord};
use crate::dns::compressor::{DecompressorErrors, EncodeErrors, MessageCompressor, MessageDecompressor};
use crate::dns::cursor::{ByteReader, ReadOutOfBounds};
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;
use tracing::{debug, warn};

mod internal {
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Generates a random 16-bit ID for a DNS query.
    pub fn generate_id() -> u16 {
        let mut thread_rng = rand::rng();
        let mut rng = SmallRng::from_rng(&mut thread_rng);

        rng.random::<u16>()
    }
}

pub use internal::generate_id;

/// Size of the fixed DNS header.
pub const HEADER_LEN: usize = 12;
/// QCLASS / CLASS value for the Internet.
pub const CLASS_IN: u16 = 1;
/// OPCODE of a standard query.
pub const OPCODE_QUERY: u8 = 0;

/// What to ask the server: one name, one record type, one transaction ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub domain_name: String,
    pub query_type: RecordType,
    pub transaction_id: u16,
}

impl QuerySpec {
    /// Creates a query with a random transaction ID.
    pub fn new(domain_name: impl Into<String>, query_type: RecordType) -> Self {
        Self {
            domain_name: domain_name.into(),
            query_type,
            transaction_id: generate_id(),
        }
    }

    pub fn with_id(mut self, transaction_id: u16) -> Self {
        self.transaction_id = transaction_id;
        self
    }
}

/// The query datagram. Built once and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMessage(Box<[u8]>);

impl EncodedMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn transaction_id(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }
}

/// A query message: header plus a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct DnsMessage {
    pub header: HeaderSection,
    // The question for the name server
    pub question: QuestionSection,
}

impl DnsMessage {
    /// Creates a new standard query (OPCODE 0) with recursion desired.
    ///
    /// # Arguments
    /// * `spec` - Name, record type and transaction ID to ask for.
    pub fn new_query(spec: &QuerySpec) -> DnsMessage {
        DnsMessage {
            header: HeaderSection {
                id: spec.transaction_id,
                flags: DnsHeaderFlags {
                    qr: false,
                    opcode: OPCODE_QUERY,
                    aa: false,
                    tc: false,
                    rd: true,
                    ra: false,
                    z: 0,
                    rcode: 0,
                }
                .to_u16(),
                qd_count: 1,
                an_count: 0,
                ns_count: 0,
                ar_count: 0,
            },
            question: QuestionSection {
                name: spec.domain_name.clone(),
                record_type: spec.query_type as u16,
                class: CLASS_IN,
            },
        }
    }

    /// Encodes the query into bytes for sending over the network.
    pub fn encode_query(&self) -> Result<EncodedMessage, EncodeErrors> {
        let mut message: Vec<u8> = Vec::with_capacity(HEADER_LEN + self.question.name.len() + 6);
        let mut pointer_map: HashMap<String, usize> = HashMap::new();

        message.extend_from_slice(&self.header.to_bytes());

        MessageCompressor::compress(&self.question.name, &mut message, &mut pointer_map)?;
        message.extend_from_slice(&self.question.record_type.to_be_bytes());
        message.extend_from_slice(&self.question.class.to_be_bytes());
        Ok(EncodedMessage(message.into_boxed_slice()))
    }
}

/// Encodes a standard, recursion-desired query for `spec`.
pub fn encode_query(spec: &QuerySpec) -> Result<EncodedMessage, EncodeErrors> {
    DnsMessage::new_query(spec).encode_query()
}

/// Represents the header section of a DNS message.
///
/// The header contains an ID, flags, and counts for each section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSection {
    /// Identifier to match requests and responses.
    pub id: u16,
    /// Flags and control bits for the DNS message.
    /// Use [`DnsHeaderFlags`]
    pub flags: u16,
    /// Number of entries in the question section.
    pub qd_count: u16,
    /// Number of resource records in the answer section.
    pub an_count: u16,
    /// Number of name server records in the authority section.
    pub ns_count: u16,
    /// Number of resource records in the additional section.
    pub ar_count: u16,
}

impl HeaderSection {
    /// Converts the header into a 12-byte array suitable for network transmission.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..2].copy_from_slice(&self.id.to_be_bytes());
        bytes[2..4].copy_from_slice(&self.flags.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.qd_count.to_be_bytes());
        bytes[6..8].copy_from_slice(&self.an_count.to_be_bytes());
        bytes[8..10].copy_from_slice(&self.ns_count.to_be_bytes());
        bytes[10..12].copy_from_slice(&self.ar_count.to_be_bytes());
        bytes
    }

    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, ReadOutOfBounds> {
        Ok(Self {
            id: reader.read_u16()?,
            flags: reader.read_u16()?,
            qd_count: reader.read_u16()?,
            an_count: reader.read_u16()?,
            ns_count: reader.read_u16()?,
            ar_count: reader.read_u16()?,
        })
    }

    pub fn decoded_flags(&self) -> DnsHeaderFlags {
        DnsHeaderFlags::from_u16(self.flags)
    }

    pub fn authoritative(&self) -> bool {
        self.decoded_flags().aa
    }

    pub fn response_code(&self) -> ResponseCode {
        ResponseCode::from(self.decoded_flags().rcode)
    }
}

/// Represents the 16-bit DNS flags field (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DnsHeaderFlags {
    /// Query/Response flag
    pub qr: bool,
    /// Operation code
    pub opcode: u8,
    /// Authoritative Answer
    pub aa: bool,
    /// Truncation flag
    pub tc: bool,
    /// Recursion Desired
    pub rd: bool,
    /// Recursion Available
    pub ra: bool,
    /// Reserved bits (RFC 1035)
    pub z: u8,
    /// Response code
    pub rcode: u8,
}

impl DnsHeaderFlags {
    /// Encode the flags into a 16-bit integer.
    pub fn to_u16(self) -> u16 {
        ((self.qr as u16) << 15)
            | ((self.opcode as u16 & 0b1111) << 11)
            | ((self.aa as u16) << 10)
            | ((self.tc as u16) << 9)
            | ((self.rd as u16) << 8)
            | ((self.ra as u16) << 7)
            | ((self.z as u16 & 0b111) << 4)
            | (self.rcode as u16 & 0b1111)
    }
    /// Decode from a 16-bit integer into structured flags.
    pub fn from_u16(value: u16) -> Self {
        Self {
            qr: (value >> 15) & 1 != 0,
            opcode: ((value >> 11) & 0b1111) as u8,
            aa: (value >> 10) & 1 != 0,
            tc: (value >> 9) & 1 != 0,
            rd: (value >> 8) & 1 != 0,
            ra: (value >> 7) & 1 != 0,
            z: ((value >> 4) & 0b111) as u8,
            rcode: (value & 0b1111) as u8,
        }
    }
}

/// RCODE values from RFC 1035 §4.1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Other(u8),
}

impl ResponseCode {
    pub fn code(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::FormatError => 1,
            Self::ServerFailure => 2,
            Self::NameError => 3,
            Self::NotImplemented => 4,
            Self::Refused => 5,
            Self::Other(code) => code,
        }
    }
}

impl From<u8> for ResponseCode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::NoError,
            1 => Self::FormatError,
            2 => Self::ServerFailure,
            3 => Self::NameError,
            4 => Self::NotImplemented,
            5 => Self::Refused,
            other => Self::Other(other),
        }
    }
}

impl Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoError => write!(f, "no error (0)"),
            Self::FormatError => write!(f, "format error: the name server was unable to interpret the query (1)"),
            Self::ServerFailure => write!(f, "server failure: the name server was unable to process this query (2)"),
            Self::NameError => write!(f, "name error: the domain name referenced in the query does not exist (3)"),
            Self::NotImplemented => write!(f, "not implemented: the name server does not support this kind of query (4)"),
            Self::Refused => write!(f, "refused: the name server refuses to perform the requested operation (5)"),
            Self::Other(code) => write!(f, "unknown response code ({code})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSection {
    /// The domain name being queried.
    pub name: String,
    /// The type of DNS record being requested.
    pub record_type: u16,
    /// The class of the DNS record (always IN here).
    pub class: u16,
}

/// TYPE values this client can ask for and decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    // A host address
    A = 1,
    // An authoritative name server
    Ns = 2,
    // Mail exchange
    Mx = 15,
}

impl RecordType {
    /// Encode the record type as a 2-byte big-endian value.
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl TryFrom<u16> for RecordType {
    type Error = DecodeErrors;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::A),
            2 => Ok(Self::Ns),
            15 => Ok(Self::Mx),
            other => Err(DecodeErrors::UnsupportedRecordType(other)),
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Ns => write!(f, "NS"),
            Self::Mx => write!(f, "MX"),
        }
    }
}

/// A decoded reply datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
    pub header: HeaderSection,
    // RRs answering the question
    pub answers: Vec<ResourceRecord>,
    // RRs holding additional information
    pub additionals: Vec<ResourceRecord>,
    /// Records that were stepped over because their type is not supported.
    pub skipped: Vec<SkippedRecord>,
}

impl DecodedReply {
    /// Decodes a reply datagram.
    ///
    /// # Errors
    /// - [`DecodeErrors::ServerError`] when the header carries a non-zero RCODE; nothing
    ///   past the header is parsed in that case.
    /// - [`DecodeErrors::MalformedName`], [`DecodeErrors::RdataLengthMismatch`] or
    ///   [`DecodeErrors::Truncated`] when the message is corrupt.
    ///
    /// Records of an unsupported type never fail the decode; they are listed in
    /// [`DecodedReply::skipped`].
    pub fn decode(message: &[u8]) -> Result<Self, DecodeErrors> {
        let mut reader = ByteReader::new(message);
        let header = HeaderSection::read(&mut reader)?;

        let rcode = header.response_code();
        if rcode != ResponseCode::NoError {
            return Err(DecodeErrors::ServerError(rcode));
        }

        let authoritative = header.authoritative();
        let mut reply = DecodedReply {
            header,
            answers: Vec::new(),
            additionals: Vec::new(),
            skipped: Vec::new(),
        };

        if header.an_count == 0 {
            debug!(id = header.id, "reply carries no answers");
            return Ok(reply);
        }

        for _ in 0..header.qd_count {
            MessageDecompressor::skip_name(&mut reader)?;
            // QTYPE + QCLASS
            reader.skip(4)?;
        }

        for _ in 0..header.an_count {
            reply.read_record(&mut reader, Section::Answer, authoritative)?;
        }
        for _ in 0..header.ns_count {
            records::skip_record(&mut reader)?;
        }
        for _ in 0..header.ar_count {
            reply.read_record(&mut reader, Section::Additional, authoritative)?;
        }

        Ok(reply)
    }

    fn read_record(
        &mut self,
        reader: &mut ByteReader<'_>,
        section: Section,
        authoritative: bool,
    ) -> Result<(), DecodeErrors> {
        let owner = MessageDecompressor::read_name(reader)?;
        match records::decode_record(reader, owner.clone(), authoritative) {
            Ok(record) => {
                match section {
                    Section::Answer => self.answers.push(record),
                    Section::Additional => self.additionals.push(record),
                    Section::Authority => {}
                }
                Ok(())
            }
            Err(DecodeErrors::UnsupportedRecordType(record_type)) => {
                warn!(%owner, record_type, ?section, "skipping record of unsupported type");
                self.skipped.push(SkippedRecord {
                    section,
                    owner,
                    record_type,
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// `true` when the header advertises no answer records.
    ///
    /// A reply whose answers are all of unsupported types is not "not found":
    /// its records are listed in [`DecodedReply::skipped`] instead.
    pub fn is_not_found(&self) -> bool {
        self.header.an_count == 0
    }
}

/// Decodes a reply datagram. See [`DecodedReply::decode`].
pub fn decode_message(message: &[u8]) -> Result<DecodedReply, DecodeErrors> {
    DecodedReply::decode(message)
}

/// Errors raised while decoding a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrors {
    #[error("The server answered with an error: {0}")]
    ServerError(ResponseCode),
    #[error("Malformed name: {0}")]
    MalformedName(#[from] DecompressorErrors),
    #[error("RDATA length mismatch for record type {record_type}: expected {expected} octets, got {actual}")]
    RdataLengthMismatch {
        record_type: u16,
        expected: u16,
        actual: u16,
    },
    #[error("Unsupported record type {0}")]
    UnsupportedRecordType(u16),
    #[error("Truncated message: {0}")]
    Truncated(#[from] ReadOutOfBounds),
}

impl DecodeErrors {
    /// Per-record conditions that leave the rest of the message decodable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnsupportedRecordType(_))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{Rdata, ReplyBuilder};
    use super::records::RecordData;
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_record_type_to_bytes() {
        assert_eq!(RecordType::A.to_bytes(), [0x00, 0x01]);
        assert_eq!(RecordType::Ns.to_bytes(), [0x00, 0x02]);
        assert_eq!(RecordType::Mx.to_bytes(), [0x00, 0x0f]);
    }

    #[test]
    fn test_dns_header_flags_encode_decode() {
        let flags = DnsHeaderFlags {
            qr: true,
            opcode: 2,
            aa: true,
            tc: false,
            rd: true,
            ra: false,
            z: 3,
            rcode: 5,
        };

        assert_eq!(DnsHeaderFlags::from_u16(flags.to_u16()), flags);
    }

    #[test]
    fn test_encode_query_wire_format() {
        let spec = QuerySpec::new("Example.com", RecordType::A).with_id(0xBEEF);
        let query = encode_query(&spec).unwrap();

        let expected: &[u8] = &[
            0xBE, 0xEF, // id
            0x01, 0x00, // standard query, RD
            0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // counts
            7, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 3, b'c', b'o', b'm', 0, // qname
            0x00, 0x01, // QTYPE A
            0x00, 0x01, // QCLASS IN
        ];
        assert_eq!(query.as_bytes(), expected);
        assert_eq!(query.transaction_id(), 0xBEEF);
    }

    #[test]
    fn test_encode_query_types() {
        for (record_type, code) in [(RecordType::A, 1u16), (RecordType::Ns, 2), (RecordType::Mx, 15)] {
            let query = encode_query(&QuerySpec::new("mcgill.ca", record_type)).unwrap();
            let bytes = query.as_bytes();
            let encoded_type = u16::from_be_bytes([bytes[bytes.len() - 4], bytes[bytes.len() - 3]]);
            assert_eq!(encoded_type, code);
        }
    }

    #[test]
    fn test_encode_query_rejects_bad_names() {
        assert_eq!(
            encode_query(&QuerySpec::new("", RecordType::A)),
            Err(EncodeErrors::EmptyName)
        );
        assert!(matches!(
            encode_query(&QuerySpec::new("bad name.com", RecordType::A)),
            Err(EncodeErrors::InvalidCharacter { character: ' ', .. })
        ));
    }

    #[test]
    fn test_query_round_trip_recovers_name() {
        let query = encode_query(&QuerySpec::new("example.com", RecordType::A).with_id(7)).unwrap();
        let mut reader = ByteReader::at(query.as_bytes(), HEADER_LEN).unwrap();

        assert_eq!(MessageDecompressor::read_name(&mut reader).unwrap(), "example.com");
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_query_round_trip_label_sequences() {
        let names = [
            "a".to_string(),
            "a.b.c.d.e.f".to_string(),
            format!("{}.{}", "x".repeat(63), "y".repeat(63)),
            vec!["z".repeat(63); 3].join(".") + "." + &"q".repeat(61),
            "under_score.with-hyphen.0123456789".to_string(),
        ];

        for name in names {
            let query = encode_query(&QuerySpec::new(name.as_str(), RecordType::Ns)).unwrap();
            let mut reader = ByteReader::at(query.as_bytes(), HEADER_LEN).unwrap();
            let decoded = MessageDecompressor::read_name(&mut reader).unwrap();
            assert_eq!(decoded.split('.').collect::<Vec<_>>(), name.split('.').collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_decode_single_a_record() {
        let reply = ReplyBuilder::new(0x4242, "example.com", RecordType::A)
            .record(1, "example.com", 1, 300, Rdata::Raw(&[93, 184, 216, 34]))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(decoded.header.id, 0x4242);
        assert_eq!(decoded.answers.len(), 1);
        let record = &decoded.answers[0];
        assert_eq!(record.owner, "example.com");
        assert_eq!(record.ttl, 300);
        assert!(!record.authoritative);
        assert_eq!(record.data, RecordData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert!(decoded.additionals.is_empty());
        assert!(!decoded.is_not_found());
    }

    #[test]
    fn test_decode_authoritative_flag_applies_to_every_record() {
        let reply = ReplyBuilder::new(1, "mcgill.ca", RecordType::Ns)
            .flags(0x8580)
            .record(1, "mcgill.ca", 2, 3600, Rdata::Name("ns1.mcgill.ca"))
            .record(1, "mcgill.ca", 2, 3600, Rdata::Name("ns2.mcgill.ca"))
            .record(3, "ns1.mcgill.ca", 1, 60, Rdata::Raw(&[132, 206, 44, 21]))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(decoded.answers.len(), 2);
        assert_eq!(decoded.additionals.len(), 1);
        assert!(decoded.answers.iter().chain(&decoded.additionals).all(|r| r.authoritative));
        assert_eq!(decoded.answers[0].data, RecordData::Ns("ns1.mcgill.ca".to_string()));
        assert_eq!(decoded.answers[1].data, RecordData::Ns("ns2.mcgill.ca".to_string()));
        assert_eq!(decoded.additionals[0].owner, "ns1.mcgill.ca");
    }

    #[test]
    fn test_decode_mx_with_compressed_exchange() {
        let reply = ReplyBuilder::new(9, "gmail.com", RecordType::Mx)
            .record(1, "gmail.com", 15, 1800, Rdata::Mx(5, "gmail-smtp-in.l.google.com"))
            .record(1, "gmail.com", 15, 1800, Rdata::Mx(10, "alt1.gmail-smtp-in.l.google.com"))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(
            decoded.answers[0].data,
            RecordData::Mx {
                preference: 5,
                exchange: "gmail-smtp-in.l.google.com".to_string()
            }
        );
        assert_eq!(
            decoded.answers[1].data,
            RecordData::Mx {
                preference: 10,
                exchange: "alt1.gmail-smtp-in.l.google.com".to_string()
            }
        );
    }

    #[test]
    fn test_decode_no_answers_is_not_found() {
        let reply = ReplyBuilder::new(3, "nothing.example", RecordType::A).build();

        let decoded = DecodedReply::decode(&reply).unwrap();
        assert!(decoded.is_not_found());
        assert!(decoded.answers.is_empty());
        assert!(decoded.additionals.is_empty());
    }

    #[test]
    fn test_decode_no_answers_ignores_garbage_after_header() {
        let mut reply = ReplyBuilder::new(3, "nothing.example", RecordType::A).build();
        reply.truncate(HEADER_LEN + 2);

        assert!(DecodedReply::decode(&reply).unwrap().is_not_found());
    }

    #[test]
    fn test_decode_server_error_short_circuits() {
        let mut reply = ReplyBuilder::new(5, "nxdomain.example", RecordType::A)
            .flags(0x8183)
            .record(1, "nxdomain.example", 1, 1, Rdata::Raw(&[1, 2, 3, 4]))
            .build();
        // Corrupt everything after the header; it must not be looked at.
        for b in reply[HEADER_LEN..].iter_mut() {
            *b = 0xff;
        }

        let err = DecodedReply::decode(&reply).unwrap_err();
        assert_eq!(err, DecodeErrors::ServerError(ResponseCode::NameError));
        assert!(matches!(err, DecodeErrors::ServerError(code) if code.code() == 3));
    }

    #[test]
    fn test_decode_unsupported_record_is_skipped() {
        let reply = ReplyBuilder::new(11, "www.example.com", RecordType::A)
            .record(1, "www.example.com", 5, 60, Rdata::Name("example.com"))
            .record(1, "example.com", 1, 60, Rdata::Raw(&[10, 0, 0, 1]))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(decoded.answers.len(), 1);
        assert_eq!(decoded.answers[0].data, RecordData::A(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(
            decoded.skipped,
            vec![SkippedRecord {
                section: Section::Answer,
                owner: "www.example.com".to_string(),
                record_type: 5,
            }]
        );
    }

    #[test]
    fn test_decode_cname_only_reply_is_found_but_skipped() {
        let reply = ReplyBuilder::new(15, "www.example.com", RecordType::A)
            .record(1, "www.example.com", 5, 60, Rdata::Name("example.com"))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(decoded.header.an_count, 1);
        assert!(decoded.answers.is_empty());
        assert_eq!(decoded.skipped.len(), 1);
        assert!(!decoded.is_not_found());
    }

    #[test]
    fn test_decode_skips_authority_section() {
        let reply = ReplyBuilder::new(12, "example.com", RecordType::A)
            .record(1, "example.com", 1, 10, Rdata::Raw(&[1, 1, 1, 1]))
            .record(2, "example.com", 2, 10, Rdata::Name("a.iana-servers.net"))
            .record(2, "example.com", 6, 10, Rdata::Raw(&[0u8; 22]))
            .record(3, "a.iana-servers.net", 1, 10, Rdata::Raw(&[199, 43, 135, 53]))
            .build();

        let decoded = DecodedReply::decode(&reply).unwrap();

        assert_eq!(decoded.answers.len(), 1);
        assert_eq!(decoded.additionals.len(), 1);
        assert_eq!(decoded.additionals[0].owner, "a.iana-servers.net");
        assert_eq!(decoded.additionals[0].data, RecordData::A(Ipv4Addr::new(199, 43, 135, 53)));
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn test_decode_a_record_with_bad_length_fails() {
        let reply = ReplyBuilder::new(13, "example.com", RecordType::A)
            .record(1, "example.com", 1, 10, Rdata::Raw(&[1, 2, 3]))
            .build();

        assert_eq!(
            DecodedReply::decode(&reply),
            Err(DecodeErrors::RdataLengthMismatch {
                record_type: 1,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_decode_pointer_cycle_in_answer_fails() {
        let mut reply = ReplyBuilder::new(14, "example.com", RecordType::Ns)
            .record(1, "example.com", 2, 10, Rdata::Raw(&[0xc0, 0x00]))
            .build();
        // Point the RDATA name at itself.
        let at = reply.len() - 2;
        reply[at + 1] = at as u8;

        assert!(matches!(
            DecodedReply::decode(&reply),
            Err(DecodeErrors::MalformedName(DecompressorErrors::TooManyHops(_)))
        ));
    }

    #[test]
    fn test_decode_truncated_header() {
        assert!(matches!(
            DecodedReply::decode(&[0x12, 0x34, 0x81]),
            Err(DecodeErrors::Truncated(_))
        ));
    }

    #[test]
    fn test_decode_truncated_rdata() {
        let mut reply = ReplyBuilder::new(15, "example.com", RecordType::A)
            .record(1, "example.com", 1, 10, Rdata::Raw(&[1, 2, 3, 4]))
            .build();
        reply.pop();

        assert!(matches!(DecodedReply::decode(&reply), Err(DecodeErrors::Truncated(_))));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let reply = ReplyBuilder::new(16, "example.com", RecordType::Mx)
            .record(1, "example.com", 15, 10, Rdata::Mx(0, "mail.example.com"))
            .record(3, "mail.example.com", 1, 10, Rdata::Raw(&[192, 0, 2, 1]))
            .build();

        assert_eq!(DecodedReply::decode(&reply).unwrap(), DecodedReply::decode(&reply).unwrap());
    }
}

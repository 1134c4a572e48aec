//! # Resource Record Decoder
//!
//! Decodes the fixed part of a resource record (TYPE, CLASS, TTL, RDLENGTH) and
//! dispatches the RDATA to one decoder per supported type:
//!
//! | TYPE | RDATA                                        |
//! |------|----------------------------------------------|
//! | `A`  | 4-octet IPv4 address                         |
//! | `NS` | a domain name, possibly compressed           |
//! | `MX` | 16-bit preference, then a domain name         |
//!
//! Whatever the type, the cursor ends exactly RDLENGTH octets after the start of
//! the RDATA, even when a name inside it jumped elsewhere through a pointer.
use super::message::{DecodeErrors, RecordType};
use crate::dns::compressor::MessageDecompressor;
use crate::dns::cursor::ByteReader;
use std::fmt::Display;
use std::net::Ipv4Addr;

/// Message section a record was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Answer => write!(f, "answer"),
            Section::Authority => write!(f, "authority"),
            Section::Additional => write!(f, "additional"),
        }
    }
}

/// Type-specific payload of a supported record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Ns(String),
    Mx { preference: u16, exchange: String },
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::Ns(_) => RecordType::Ns,
            Self::Mx { .. } => RecordType::Mx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    /// The domain name that owns this record.
    pub owner: String,
    /// Time-to-live of the record in seconds.
    pub ttl: u32,
    /// Copied from the AA bit of the reply header; identical for every record of a reply.
    pub authoritative: bool,
    pub data: RecordData,
}

/// A record stepped over because its TYPE is not decoded by this client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub section: Section,
    pub owner: String,
    pub record_type: u16,
}

/// Decodes one record whose owner name has already been read.
///
/// On success, and on [`DecodeErrors::UnsupportedRecordType`], `reader` is left at
/// the end of the RDATA so the next record can be read.
pub(crate) fn decode_record(
    reader: &mut ByteReader<'_>,
    owner: String,
    authoritative: bool,
) -> Result<ResourceRecord, DecodeErrors> {
    let record_type = reader.read_u16()?;
    // CLASS
    reader.skip(2)?;
    let ttl = reader.read_u32()?;
    let rd_length = reader.read_u16()?;

    let mut rdata = *reader;
    reader.skip(rd_length as usize)?;

    let start = rdata.position();
    let data = match RecordType::try_from(record_type)? {
        RecordType::A => decode_a(&mut rdata, rd_length)?,
        RecordType::Ns => decode_ns(&mut rdata)?,
        RecordType::Mx => decode_mx(&mut rdata, rd_length)?,
    };

    // A name inside RDATA must not run into the bytes that follow it.
    let consumed = rdata.position() - start;
    if consumed > rd_length as usize {
        return Err(DecodeErrors::RdataLengthMismatch {
            record_type,
            expected: u16::try_from(consumed).unwrap_or(u16::MAX),
            actual: rd_length,
        });
    }

    Ok(ResourceRecord {
        owner,
        ttl,
        authoritative,
        data,
    })
}

/// Advances past a whole record without materializing it.
pub(crate) fn skip_record(reader: &mut ByteReader<'_>) -> Result<(), DecodeErrors> {
    MessageDecompressor::skip_name(reader)?;
    // TYPE, CLASS, TTL
    reader.skip(8)?;
    let rd_length = reader.read_u16()?;
    reader.skip(rd_length as usize)?;
    Ok(())
}

fn decode_a(rdata: &mut ByteReader<'_>, rd_length: u16) -> Result<RecordData, DecodeErrors> {
    if rd_length != 4 {
        return Err(DecodeErrors::RdataLengthMismatch {
            record_type: RecordType::A as u16,
            expected: 4,
            actual: rd_length,
        });
    }
    Ok(RecordData::A(Ipv4Addr::from(rdata.read_array::<4>()?)))
}

fn decode_ns(rdata: &mut ByteReader<'_>) -> Result<RecordData, DecodeErrors> {
    Ok(RecordData::Ns(MessageDecompressor::read_name(rdata)?))
}

fn decode_mx(rdata: &mut ByteReader<'_>, rd_length: u16) -> Result<RecordData, DecodeErrors> {
    // preference plus at least a root label
    if rd_length < 3 {
        return Err(DecodeErrors::RdataLengthMismatch {
            record_type: RecordType::Mx as u16,
            expected: 3,
            actual: rd_length,
        });
    }
    let preference = rdata.read_u16()?;
    let exchange = MessageDecompressor::read_name(rdata)?;
    Ok(RecordData::Mx {
        preference,
        exchange,
    })
}

//! DNS Name Decompressor
//!
//! Reads domain names out of a received message, following RFC1035 §4.1.4
//! compression pointers.
//!
//! A length octet is interpreted by its two high bits:
//!
//! | bits | meaning                                                          |
//! |------|------------------------------------------------------------------|
//! | `00` | literal label of 0..=63 octets (0 terminates the name)           |
//! | `11` | pointer: this octet and the next hold a 14-bit absolute offset   |
//! | `01`, `10` | reserved, rejected                                          |
//!
//! Once a pointer has been taken the name is finished at the pointer target; the
//! caller's cursor resumes right after the 2-byte pointer. Pointer chains are
//! bounded by [`MAX_POINTER_HOPS`], so a reply whose pointers form a cycle fails
//! instead of looping.
use super::encoder::MAX_NAME_LEN;
use crate::dns::cursor::{ByteReader, ReadOutOfBounds};
use thiserror::Error;
use tracing::trace;

/// Upper bound on compression pointers followed while reading one name.
pub const MAX_POINTER_HOPS: usize = 16;

const LABEL_TYPE_MASK: u8 = 0b1100_0000;
const POINTER_OFFSET_MASK: u16 = 0x3FFF;

pub struct MessageDecompressor;

impl MessageDecompressor {
    /// Decodes the name at the reader's position.
    ///
    /// The reader is advanced past the name as stored at its original position: past
    /// the zero terminator, or past the first compression pointer.
    pub fn read_name(reader: &mut ByteReader<'_>) -> Result<String, DecompressorErrors> {
        let start = reader.position();
        let message_len = reader.message().len();

        let mut cursor = *reader;
        let mut resume: Option<ByteReader<'_>> = None;
        let mut hops = 0;
        let mut encoded_len = 1;
        let mut labels: Vec<String> = Vec::new();

        loop {
            let at = cursor.position();
            let len = cursor.read_u8()?;

            match len & LABEL_TYPE_MASK {
                LABEL_TYPE_MASK => {
                    let low = cursor.read_u8()?;
                    let target = (u16::from_be_bytes([len, low]) & POINTER_OFFSET_MASK) as usize;

                    if resume.is_none() {
                        resume = Some(cursor);
                    }
                    hops += 1;
                    if hops > MAX_POINTER_HOPS {
                        return Err(DecompressorErrors::TooManyHops(start));
                    }
                    if target >= message_len {
                        return Err(DecompressorErrors::PointerOutOfBounds { at, target });
                    }
                    trace!(at, target, "following compression pointer");
                    cursor.seek(target)?;
                }
                0 if len == 0 => break,
                0 => {
                    let label = cursor.read_bytes(len as usize)?;
                    encoded_len += 1 + label.len();
                    if encoded_len > MAX_NAME_LEN {
                        return Err(DecompressorErrors::NameTooLong(start));
                    }
                    // Latin-1: every octet maps onto the char with the same code point.
                    labels.push(label.iter().map(|&b| b as char).collect());
                }
                _ => return Err(DecompressorErrors::ReservedLabelType { at, octet: len }),
            }
        }

        *reader = resume.unwrap_or(cursor);
        Ok(labels.join("."))
    }

    /// Advances past the name at the reader's position without following pointers.
    pub fn skip_name(reader: &mut ByteReader<'_>) -> Result<(), DecompressorErrors> {
        loop {
            let at = reader.position();
            let len = reader.read_u8()?;

            match len & LABEL_TYPE_MASK {
                LABEL_TYPE_MASK => {
                    reader.skip(1)?;
                    return Ok(());
                }
                0 if len == 0 => return Ok(()),
                0 => reader.skip(len as usize)?,
                _ => return Err(DecompressorErrors::ReservedLabelType { at, octet: len }),
            }
        }
    }
}

/// Reasons a name inside a received message cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompressorErrors {
    #[error("Compression pointer at offset {at} targets offset {target}, outside the message")]
    PointerOutOfBounds { at: usize, target: usize },
    #[error("Name at offset {0} follows more than {MAX_POINTER_HOPS} compression pointers")]
    TooManyHops(usize),
    #[error("Reserved label type {octet:#04x} at offset {at}")]
    ReservedLabelType { at: usize, octet: u8 },
    #[error("Name at offset {0} decodes to more than 255 octets")]
    NameTooLong(usize),
    #[error("Name is truncated: {0}")]
    Truncated(#[from] ReadOutOfBounds),
}

//! DNS name compression
//!
//! - [`encoder`]: writes validated, lowercased names (with optional suffix pointers).
//! - [`decompressor`]: reads names back, following pointers with a bounded hop count.

pub mod decompressor;
pub mod encoder;

pub use self::decompressor::{DecompressorErrors, MAX_POINTER_HOPS, MessageDecompressor};
pub use self::encoder::{EncodeErrors, MAX_LABEL_LEN, MAX_NAME_LEN, MessageCompressor};

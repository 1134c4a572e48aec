//! # Utilities
//!
//! Input handling shared by the library and the command line:
//!
//! - [`ServerAddress`]: the `@a.b.c.d` name server argument.
//! - [`ClientConfig`]: every setting of one invocation, with defaults and validation.

pub mod config;
pub mod target;

pub use self::config::{ClientConfig, ConfigErrors, query_type_from_flags};
pub use self::target::{ServerAddress, ServerAddressErrors};

//! # DNS Transporter
//!
//! The `transporter` module owns the UDP exchange with a single name server: send
//! the encoded query, wait for one datagram, and retransmit on silence until the
//! retry budget runs out.
//!
//! ## State machine
//!
//! ```text
//! Idle -> Sending -> AwaitingReply -> Decoding            (reply received)
//!            ^             |
//!            |             v
//!            +-------- Retrying -> Exhausted               (budget spent)
//! ```
//!
//! - Every entry into `Sending` transmits exactly one datagram.
//! - `AwaitingReply` blocks for at most the configured timeout.
//! - A timeout or a socket error moves to `Retrying`; once the number of attempts
//!   reaches `max_retries` the exchange ends in `Exhausted` with
//!   [`TransportErrors::RetriesExceeded`].
//!
//! With `max_retries = 3` and a server that never answers, exactly three datagrams
//! are sent.
//!
//! ## Resources
//!
//! One socket is opened per exchange and dropped when the exchange returns, on
//! success and on every error path. There is no background work and at most one
//! query in flight.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use dnsclient::dns::resolver::{QuerySpec, RecordType, encode_query};
//! use dnsclient::dns::resolver::transporter::{TransportSettings, send_and_await};
//!
//! let query = encode_query(&QuerySpec::new("example.com", RecordType::A)).unwrap();
//! let settings = TransportSettings {
//!     server: "8.8.8.8:53".parse().unwrap(),
//!     timeout: Duration::from_secs(5),
//!     max_retries: 3,
//! };
//! let exchange = send_and_await(&settings, &query).unwrap();
//! println!("{} bytes after {:?}", exchange.datagram.len(), exchange.elapsed);
//! ```
use std::fmt::Display;
use std::io;
use std::net::SocketAddrV4;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        mod blocking;
        pub use self::blocking::{DatagramSocket, exchange, send_and_await};
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio-dep")] {
        mod nonblocking;
        #[cfg_attr(docsrs, doc(cfg(feature = "tokio-dep")))]
        pub use self::nonblocking::send_and_await_async;
    }
}

/// Largest reply accepted over UDP without EDNS (RFC 1035 §4.2.1).
pub const MAX_UDP_PAYLOAD: usize = 512;

/// Where to send the query and how long to keep trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub server: SocketAddrV4,
    /// Per-attempt wait for a reply.
    pub timeout: Duration,
    /// Total number of datagrams sent before giving up.
    pub max_retries: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Sending,
    AwaitingReply,
    Retrying,
    Decoding,
    Exhausted,
}

/// A reply datagram together with the cost of getting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub datagram: Vec<u8>,
    /// Datagrams sent, the successful one included.
    pub attempts: u32,
    /// Wall-clock time from the first send to the reply.
    pub elapsed: Duration,
}

impl Exchange {
    /// Retransmissions needed before the reply arrived.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }
}

/// Attempt counter, clock and current state shared by the blocking and async loops.
#[derive(Debug)]
pub(crate) struct RetryBudget {
    state: TransportState,
    attempts: u32,
    max_retries: u32,
    started: Option<Instant>,
}

impl RetryBudget {
    pub(crate) fn new(max_retries: u32) -> Self {
        Self {
            state: TransportState::Idle,
            attempts: 0,
            max_retries,
            started: None,
        }
    }

    pub(crate) fn state(&self) -> TransportState {
        self.state
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.attempts
    }

    fn enter(&mut self, next: TransportState) {
        debug!(from = ?self.state, to = ?next, attempt = self.attempts, "transport state change");
        self.state = next;
    }

    pub(crate) fn sending(&mut self) {
        self.started.get_or_insert_with(Instant::now);
        self.attempts += 1;
        self.enter(TransportState::Sending);
    }

    pub(crate) fn awaiting_reply(&mut self) {
        self.enter(TransportState::AwaitingReply);
    }

    /// Records a failed attempt. Returns `Err` once the budget is spent.
    pub(crate) fn retry(&mut self, reason: &dyn Display) -> Result<(), TransportErrors> {
        self.enter(TransportState::Retrying);
        warn!(attempt = self.attempts, max_retries = self.max_retries, %reason, "no reply");

        if self.attempts >= self.max_retries {
            self.enter(TransportState::Exhausted);
            return Err(TransportErrors::RetriesExceeded {
                attempts: self.attempts,
            });
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self, datagram: Vec<u8>) -> Exchange {
        self.enter(TransportState::Decoding);
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        info!(bytes = datagram.len(), attempts = self.attempts, ?elapsed, "reply received");
        Exchange {
            datagram,
            attempts: self.attempts,
            elapsed,
        }
    }
}

/// Represents errors that may occur when exchanging datagrams with the server.
#[derive(Debug, Error)]
pub enum TransportErrors {
    #[error("Maximum number of retries {attempts} exceeded")]
    RetriesExceeded { attempts: u32 },
    #[error("Socket error: {0}")]
    SocketIo(#[from] io::Error),
}

//! Blocking transport over `std::net::UdpSocket`.
use super::{Exchange, MAX_UDP_PAYLOAD, RetryBudget, TransportErrors, TransportSettings};
use crate::dns::resolver::message::EncodedMessage;
use std::io;
use std::net::{Ipv4Addr, UdpSocket};
use tracing::debug;

/// The two socket operations the retry loop needs.
///
/// Implemented for a connected [`UdpSocket`]; the receive is expected to give up
/// after the per-attempt timeout with an error.
pub trait DatagramSocket {
    fn send(&self, datagram: &[u8]) -> io::Result<usize>;
    fn recv(&self, buf: &mut [u8]) -> io::Result<usize>;
}

impl DatagramSocket for UdpSocket {
    fn send(&self, datagram: &[u8]) -> io::Result<usize> {
        UdpSocket::send(self, datagram)
    }

    fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        UdpSocket::recv(self, buf)
    }
}

/// Opens a socket, runs the retry loop against `settings.server`, and closes it.
///
/// # Errors
/// - [`TransportErrors::SocketIo`] if the socket cannot be opened or configured.
/// - [`TransportErrors::RetriesExceeded`] if no reply arrived within the budget.
pub fn send_and_await(
    settings: &TransportSettings,
    query: &EncodedMessage,
) -> Result<Exchange, TransportErrors> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
    socket.set_read_timeout(Some(settings.timeout))?;
    socket.connect(settings.server)?;
    debug!(server = %settings.server, timeout = ?settings.timeout, "socket ready");

    exchange(&socket, query, settings.max_retries)
}

/// Sends `query` and waits for one reply, retransmitting up to `max_retries` times in total.
pub fn exchange<S: DatagramSocket>(
    socket: &S,
    query: &EncodedMessage,
    max_retries: u32,
) -> Result<Exchange, TransportErrors> {
    let mut budget = RetryBudget::new(max_retries);
    let mut buf = [0u8; MAX_UDP_PAYLOAD];

    loop {
        budget.sending();
        if let Err(e) = socket.send(query.as_bytes()) {
            budget.retry(&e)?;
            continue;
        }

        budget.awaiting_reply();
        match socket.recv(&mut buf) {
            Ok(len) => return Ok(budget.finish(buf[..len].to_vec())),
            Err(e) => budget.retry(&e)?,
        }
    }
}

//! Async transport over `tokio::net::UdpSocket`.
//!
//! Same retry semantics as the blocking loop; the per-attempt wait is a
//! `tokio::time::timeout` around the receive.
use super::{Exchange, MAX_UDP_PAYLOAD, RetryBudget, TransportErrors, TransportSettings};
use crate::dns::resolver::message::EncodedMessage;
use std::net::Ipv4Addr;
use tokio::net::UdpSocket as TokioUdpSocket;
use tokio::time::timeout;
use tracing::debug;

/// Async counterpart of [`send_and_await`](super::send_and_await).
pub async fn send_and_await_async(
    settings: &TransportSettings,
    query: &EncodedMessage,
) -> Result<Exchange, TransportErrors> {
    let socket = TokioUdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).await?;
    socket.connect(settings.server).await?;
    debug!(server = %settings.server, timeout = ?settings.timeout, "socket ready");

    let mut budget = RetryBudget::new(settings.max_retries);
    let mut buf = [0u8; MAX_UDP_PAYLOAD];

    loop {
        budget.sending();
        if let Err(e) = socket.send(query.as_bytes()).await {
            budget.retry(&e)?;
            continue;
        }

        budget.awaiting_reply();
        match timeout(settings.timeout, socket.recv(&mut buf)).await {
            Ok(Ok(len)) => return Ok(budget.finish(buf[..len].to_vec())),
            Ok(Err(e)) => budget.retry(&e)?,
            Err(elapsed) => budget.retry(&elapsed)?,
        }
    }
}

//! UDP listener for console commands
//!
//! Datagrams are handled strictly one after another: the next receive only
//! happens once the previous command's call sequence has finished.

use std::net::SocketAddr;
use tokio::net::UdpSocket;

use crate::{
    client::ApiClient,
    dispatch::{Bridge, Outcome},
    Result,
};

/// Bytes read per datagram; anything beyond is truncated
pub const RECV_BUFFER_SIZE: usize = 24;

/// Receives console datagrams and feeds them to a [`Bridge`]
pub struct UdpCommandListener {
    socket: UdpSocket,
}

impl UdpCommandListener {
    /// Bind on all interfaces
    pub async fn bind(port: u16) -> Result<Self> {
        Self::bind_addr(SocketAddr::from(([0, 0, 0, 0], port))).await
    }

    pub async fn bind_addr(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        tracing::info!("Listening on UDP {}...", socket.local_addr()?);
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive and handle one datagram. Receive errors are logged and
    /// reported as `None`.
    pub async fn handle_next<C: ApiClient>(&self, bridge: &mut Bridge<C>) -> Option<Outcome> {
        let mut buf = [0u8; RECV_BUFFER_SIZE];
        let (len, addr) = match self.socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                tracing::error!("Failed to read input buffer: {}", e);
                return None;
            }
        };

        let now = chrono::Utc::now();
        let payload = &buf[..len];
        tracing::info!(
            "Packet from {}: {:?}",
            addr,
            String::from_utf8_lossy(payload)
        );

        Some(bridge.handle_datagram(payload, now.timestamp()).await)
    }

    /// Handle datagrams forever
    pub async fn run<C: ApiClient>(&self, bridge: &mut Bridge<C>) {
        loop {
            if let Some(outcome) = self.handle_next(bridge).await {
                tracing::debug!("Outcome: {:?}", outcome);
            }
        }
    }
}

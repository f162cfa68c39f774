// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTP server using the Tokio runtime.
//!
//! Provides a minimal, stateless NTPv3/v4 responder: one async task owns
//! the UDP socket and processes each datagram fully (decode, build
//! response, encode, send) before receiving the next. Malformed or
//! unsupported datagrams are dropped without reply and without
//! terminating the loop.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use localntp::server::NtpServer;
//! use localntp::protocol::Stratum;
//!
//! let server = NtpServer::builder()
//!     .listen("[::]:123")
//!     .stratum(Stratum(3))
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::debug;

use crate::protocol::{self, Packet};
use crate::server_common::{
    build_server_response, decode_request, serialize_response, ServerConfig,
};
use crate::unix_time;

/// Hooks invoked synchronously by the receive loop, for logging and
/// observability only; they have no effect on protocol behavior.
///
/// The receive notification for a datagram always precedes its send
/// notification, and callbacks never overlap (the loop is sequential).
/// All methods default to no-ops.
pub trait PacketObserver: Send {
    /// A well-formed request packet arrived from `remote`.
    ///
    /// Called after decoding, before the answer policy is applied, so
    /// requests that end up unanswered are still observed.
    fn on_packet_received(&self, remote: SocketAddr, packet: &Packet) {
        let _ = (remote, packet);
    }

    /// A response packet was sent to `remote`.
    fn on_packet_sent(&self, remote: SocketAddr, packet: &Packet) {
        let _ = (remote, packet);
    }
}

/// Builder for configuring and creating an [`NtpServer`].
pub struct NtpServerBuilder {
    listen_addr: String,
    config: ServerConfig,
    observer: Option<Box<dyn PacketObserver>>,
}

impl NtpServerBuilder {
    fn new() -> Self {
        NtpServerBuilder {
            listen_addr: format!("[::]:{}", protocol::PORT),
            config: ServerConfig::default(),
            observer: None,
        }
    }

    /// Set the listen address (default `[::]:123`).
    pub fn listen(mut self, addr: impl Into<String>) -> Self {
        self.listen_addr = addr.into();
        self
    }

    /// Set the stratum reported in responses (default 3).
    pub fn stratum(mut self, stratum: protocol::Stratum) -> Self {
        self.config.stratum = stratum;
        self
    }

    /// Set the reference identifier reported in responses (default all-zero).
    pub fn reference_id(mut self, reference_id: protocol::ReferenceId) -> Self {
        self.config.reference_id = reference_id;
        self
    }

    /// Attach an observer notified of received and sent packets.
    pub fn observer(mut self, observer: impl PacketObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Build the server. Binds to the configured listen address.
    pub async fn build(self) -> io::Result<NtpServer> {
        let sock = UdpSocket::bind(&self.listen_addr).await?;
        debug!("NTP server listening on {}", self.listen_addr);
        Ok(NtpServer {
            sock,
            config: self.config,
            observer: self.observer,
        })
    }
}

/// A stateless NTP server that responds to client-mode requests.
///
/// Created via [`NtpServer::builder()`]. Call [`run()`](NtpServer::run)
/// to start serving requests.
pub struct NtpServer {
    sock: UdpSocket,
    config: ServerConfig,
    observer: Option<Box<dyn PacketObserver>>,
}

impl NtpServer {
    /// Create a builder for configuring the server.
    pub fn builder() -> NtpServerBuilder {
        NtpServerBuilder::new()
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }

    /// Run the server, processing incoming NTP requests indefinitely.
    ///
    /// This future runs until an I/O error occurs on the socket, which is
    /// also how an external close is observed. Use `tokio::select!` or a
    /// shutdown signal to stop the server gracefully; a datagram in
    /// flight at cancellation time is simply abandoned.
    pub async fn run(self) -> io::Result<()> {
        let mut recv_buf = [0u8; 2048];

        loop {
            let (recv_len, src_addr) = self.sock.recv_from(&mut recv_buf).await?;
            // Two time samples per datagram: wall clock for the response
            // timestamps, monotonic for the processing latency.
            let receive_time = unix_time::Instant::now();
            let receive_tick = std::time::Instant::now();

            let request = match decode_request(&recv_buf, recv_len) {
                Ok(request) => request,
                Err(e) => {
                    debug!("dropped malformed datagram from {}: {}", src_addr, e);
                    continue;
                }
            };
            if let Some(observer) = &self.observer {
                observer.on_packet_received(src_addr, &request);
            }

            let response = match build_server_response(
                &request,
                receive_time,
                receive_tick.elapsed(),
                &self.config,
            ) {
                Some(response) => response,
                None => {
                    debug!("unanswered request from {}", src_addr);
                    continue;
                }
            };

            let send_buf = match serialize_response(&response) {
                Ok(buf) => buf,
                Err(e) => {
                    debug!("failed to serialize response for {}: {}", src_addr, e);
                    continue;
                }
            };
            if let Err(e) = self.sock.send_to(&send_buf, src_addr).await {
                debug!("send to {} failed: {}", src_addr, e);
                continue;
            }
            if let Some(observer) = &self.observer {
                observer.on_packet_sent(src_addr, &response);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{ReferenceId, Stratum};

    #[test]
    fn test_builder_defaults() {
        let builder = NtpServer::builder();
        assert_eq!(builder.listen_addr, "[::]:123");
        assert_eq!(builder.config.stratum, Stratum(3));
        assert_eq!(builder.config.reference_id, ReferenceId::default());
        assert!(builder.observer.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = NtpServer::builder()
            .listen("0.0.0.0:1123")
            .stratum(Stratum(2))
            .reference_id("GPS".parse().unwrap());
        assert_eq!(builder.listen_addr, "0.0.0.0:1123");
        assert_eq!(builder.config.stratum, Stratum(2));
        assert_eq!(
            builder.config.reference_id.as_bytes(),
            [0x47, 0x50, 0x53, 0x00]
        );
    }

    #[tokio::test]
    async fn test_builder_build_binds_socket() {
        let server = NtpServer::builder()
            .listen("127.0.0.1:0")
            .build()
            .await
            .expect("should bind to ephemeral port");

        let addr = server.local_addr().unwrap();
        assert!(addr.port() > 0);
    }
}

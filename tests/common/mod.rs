// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers for server integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use localntp::protocol::{
    ConstPackedSizeBytes, FromBytes, Mode, Packet, TimestampFormat, ToBytes, Version,
};
use localntp::server::NtpServerBuilder;
use tokio::net::UdpSocket;

/// Spawn a test server on an ephemeral port and return its bound address.
///
/// The server runs in a background tokio task. It will shut down when the
/// tokio runtime is dropped.
pub(crate) async fn spawn_test_server(builder: NtpServerBuilder) -> SocketAddr {
    let server = builder
        .listen("127.0.0.1:0")
        .build()
        .await
        .expect("failed to bind test server");
    let addr = server.local_addr().expect("failed to get local addr");
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    // Small yield to ensure the server task is running.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Build a minimal valid NTPv3 client request packet (48 bytes).
pub(crate) fn build_client_packet() -> [u8; Packet::PACKED_SIZE_BYTES] {
    let packet = Packet {
        version: Version::V3,
        mode: Mode::Client,
        poll_interval: 6,
        transmit_timestamp: TimestampFormat {
            seconds: 0xE000_0000,
            fraction: 0x1234_5678,
        },
        ..Packet::default()
    };
    let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
    packet.to_bytes(&mut buf[..]).expect("failed to serialize");
    buf
}

/// Send a raw UDP packet to `addr` and receive the response with a timeout.
///
/// Returns `None` if the server doesn't respond within the timeout.
pub(crate) async fn send_receive_raw(
    addr: SocketAddr,
    packet: &[u8],
    timeout: Duration,
) -> Option<Vec<u8>> {
    let sock = UdpSocket::bind("127.0.0.1:0").await.expect("bind failed");
    sock.send_to(packet, addr).await.expect("send failed");

    let mut buf = vec![0u8; 2048];
    match tokio::time::timeout(timeout, sock.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

/// Parse a response buffer into a Packet.
pub(crate) fn parse_response(buf: &[u8]) -> Packet {
    let (packet, _) = Packet::from_bytes(buf).expect("failed to parse response");
    packet
}

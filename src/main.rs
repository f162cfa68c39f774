// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Minimal NTP server binary.
//!
//! Usage: `localntp [PORT]`
//!
//! Serves NTP on the given UDP port (default 123) until interrupted with
//! Ctrl-C. Set `RUST_LOG=debug` for per-datagram drop diagnostics.

use std::env;
use std::net::SocketAddr;
use std::process::ExitCode;

use tracing::info;

use localntp::protocol::{self, Packet};
use localntp::server::{NtpServer, PacketObserver};

/// Logs each answered exchange, one line per direction.
struct LogObserver;

impl PacketObserver for LogObserver {
    fn on_packet_received(&self, remote: SocketAddr, _packet: &Packet) {
        info!("receive from {}", remote);
    }

    fn on_packet_sent(&self, remote: SocketAddr, _packet: &Packet) {
        info!("send to {}", remote);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let port = match env::args().nth(1) {
        Some(arg) => match arg.parse::<u16>() {
            Ok(port) => port,
            Err(_) => {
                eprintln!("usage: localntp [PORT]");
                return ExitCode::FAILURE;
            }
        },
        None => protocol::PORT,
    };

    if let Err(e) = serve(port).await {
        eprintln!("localntp: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn serve(port: u16) -> std::io::Result<()> {
    let server = NtpServer::builder()
        .listen(format!("[::]:{}", port))
        .observer(LogObserver)
        .build()
        .await?;

    info!("NTP server open {}", server.local_addr()?);

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {}
    }

    info!("NTP server close");
    Ok(())
}

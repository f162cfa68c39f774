// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

/*!
A minimal, stateless NTP v3/v4 server.

The crate decodes 48-byte NTP request datagrams, synthesizes response
packets per the RFC 5905 on-wire contract (mode/version filtering,
origin timestamp echoing, precision/stratum reporting), and serves them
over UDP. It is a responder only: no client-side synchronization, no
clock filtering, no clock adjustment.

# Example

```no_run
use localntp::server::NtpServer;
use localntp::protocol::Stratum;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let server = NtpServer::builder()
        .listen("[::]:123")
        .stratum(Stratum(3))
        .build()
        .await?;

    server.run().await
}
```
*/

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Custom error types for packet parsing and reference identifier configuration.
pub mod error;
/// Types and constants that precisely match the NTP packet wire format,
/// with bit-exact conversion to and from 48-byte buffers.
pub mod protocol;
/// The tokio UDP receive loop and server builder.
pub mod server;
/// Immutable server configuration and the request/response protocol logic.
pub mod server_common;
/// Unix time conversion utilities for NTP timestamps.
///
/// Provides the `Instant` type for converting between NTP timestamps
/// (seconds since 1900-01-01) and Unix timestamps (seconds since 1970-01-01).
pub mod unix_time;

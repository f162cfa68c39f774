// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Immutable server configuration and the request/response protocol logic,
//! used by the tokio receive loop in [`crate::server`].
//!
//! The responder is stateless: configuration is a plain value passed into
//! [`build_server_response`], and every response is synthesized fresh from
//! the request and two time samples.

use std::time::Duration;

use log::debug;

use crate::error::ParseError;
use crate::protocol::{
    self, ConstPackedSizeBytes, FromBytes, LeapIndicator, Mode, Packet, ReferenceId, ShortFormat,
    Stratum, ToBytes, Version,
};
use crate::unix_time;

/// The precision reported in every response, as a raw byte.
///
/// `0xF6` is -10 as a signed log2 exponent, roughly 1 ms resolution. The
/// sign is never interpreted; the byte travels verbatim.
pub const RESPONSE_PRECISION: u8 = 0xF6;

/// How far in the past the reported reference timestamp is placed.
///
/// This server has no real reference clock to report a last-update time
/// for, so it claims one a fixed three seconds before each request.
const REFERENCE_AGE: Duration = Duration::from_secs(3);

/// Server configuration included in every response.
///
/// This is an immutable value: the receive loop holds one copy for its
/// lifetime and the responder reads it per request. There is no shared
/// mutable server state.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Stratum level reported in responses.
    pub stratum: Stratum,
    /// Reference identifier reported in responses.
    pub reference_id: ReferenceId,
}

impl Default for ServerConfig {
    /// Stratum 3 with an all-zero reference identifier.
    fn default() -> Self {
        ServerConfig {
            stratum: Stratum(3),
            reference_id: ReferenceId::default(),
        }
    }
}

/// Decode an incoming request datagram.
///
/// Fails with [`ParseError::BufferTooShort`] for datagrams under 48 bytes.
/// Trailing bytes past the header (extension fields, MAC) are ignored.
/// No version or mode validation happens here.
pub fn decode_request(recv_buf: &[u8], recv_len: usize) -> Result<Packet, ParseError> {
    let (request, _) = Packet::from_bytes(&recv_buf[..recv_len.min(recv_buf.len())])?;
    Ok(request)
}

/// Build the response packet for a client request, or `None` when the
/// request is not answered.
///
/// Policy, evaluated in order:
/// 1. Requests below version 2 are silently ignored.
/// 2. Only `Client` mode queries are answered; symmetric, broadcast and
///    control modes are out of scope for this server.
///
/// For answered requests:
/// - the client's transmit timestamp is echoed back as the originate
///   timestamp (T1), which the client uses to match the response to its
///   request and compute round-trip delay;
/// - `receive_time` becomes the receive timestamp (T2);
/// - `receive_time + processing_latency` becomes the transmit timestamp
///   (T3), so the client's round-trip calculation excludes server-side
///   processing time;
/// - root delay and dispersion are zero: this server claims a direct,
///   dispersion-free reference.
pub fn build_server_response(
    request: &Packet,
    receive_time: unix_time::Instant,
    processing_latency: Duration,
    config: &ServerConfig,
) -> Option<Packet> {
    if request.version < Version::V2 {
        debug!("ignoring request with version {}", request.version.0);
        return None;
    }
    if request.mode != Mode::Client {
        debug!("ignoring request with mode {:?}", request.mode);
        return None;
    }

    Some(Packet {
        leap_indicator: LeapIndicator::NoWarning,
        version: Version::V3,
        mode: Mode::Server,
        stratum: config.stratum,
        poll_interval: request.poll_interval,
        precision: RESPONSE_PRECISION,
        root_delay: ShortFormat::default(),
        root_dispersion: ShortFormat::default(),
        reference_id: config.reference_id,
        reference_timestamp: (receive_time - REFERENCE_AGE).into(),
        originate_timestamp: request.transmit_timestamp,
        receive_timestamp: receive_time.into(),
        transmit_timestamp: (receive_time + processing_latency).into(),
    })
}

/// Serialize a response packet into a 48-byte send buffer.
pub fn serialize_response(
    response: &Packet,
) -> Result<[u8; Packet::PACKED_SIZE_BYTES], ParseError> {
    let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
    response.to_bytes(&mut buf[..])?;
    Ok(buf)
}

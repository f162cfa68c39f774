// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wire-format tests against fixed byte vectors.

use localntp::protocol::{
    ConstPackedSizeBytes, FromBytes, LeapIndicator, Mode, Packet, ShortFormat, Stratum,
    TimestampFormat, ToBytes, Version,
};

// A stratum-1 server response as it appears on the wire.
#[rustfmt::skip]
const SERVER_RESPONSE: [u8; 48] = [
    0x24, 0x01, 0x03, 0xE9, // LI=0, VN=4, Mode=4 | stratum 1 | poll 3 | precision -23
    0x00, 0x00, 0x00, 0x00, // root delay
    0x00, 0x00, 0x00, 0x18, // root dispersion
    0x43, 0x44, 0x4D, 0x41, // reference ID "CDMA"
    0xE0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // reference timestamp
    0xE0, 0x00, 0x00, 0x01, 0x80, 0x00, 0x00, 0x00, // originate timestamp
    0xE0, 0x00, 0x00, 0x02, 0x40, 0x00, 0x00, 0x00, // receive timestamp
    0xE0, 0x00, 0x00, 0x03, 0x12, 0x34, 0x56, 0x78, // transmit timestamp
];

#[test]
fn decode_server_response() {
    let (packet, consumed) = Packet::from_bytes(&SERVER_RESPONSE).unwrap();
    assert_eq!(consumed, Packet::PACKED_SIZE_BYTES);

    assert_eq!(packet.leap_indicator, LeapIndicator::NoWarning);
    assert_eq!(packet.version, Version::V4);
    assert_eq!(packet.mode, Mode::Server);
    assert_eq!(packet.stratum, Stratum::PRIMARY);
    assert_eq!(packet.poll_interval, 3);
    assert_eq!(packet.precision, 0xE9);
    assert_eq!(
        packet.root_delay,
        ShortFormat {
            seconds: 0,
            fraction: 0,
        }
    );
    assert_eq!(
        packet.root_dispersion,
        ShortFormat {
            seconds: 0,
            fraction: 0x0018,
        }
    );
    assert_eq!(packet.reference_id.as_bytes(), *b"CDMA");
    assert_eq!(packet.reference_id.to_string(), "CDMA");
    assert_eq!(
        packet.reference_timestamp,
        TimestampFormat {
            seconds: 0xE000_0000,
            fraction: 0,
        }
    );
    assert_eq!(
        packet.originate_timestamp,
        TimestampFormat {
            seconds: 0xE000_0001,
            fraction: 0x8000_0000,
        }
    );
    assert_eq!(
        packet.receive_timestamp,
        TimestampFormat {
            seconds: 0xE000_0002,
            fraction: 0x4000_0000,
        }
    );
    assert_eq!(
        packet.transmit_timestamp,
        TimestampFormat {
            seconds: 0xE000_0003,
            fraction: 0x1234_5678,
        }
    );
}

#[test]
fn reencode_server_response() {
    let (packet, _) = Packet::from_bytes(&SERVER_RESPONSE).unwrap();
    let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
    let written = packet.to_bytes(&mut buf).unwrap();
    assert_eq!(written, Packet::PACKED_SIZE_BYTES);
    assert_eq!(buf, SERVER_RESPONSE);
}

#[test]
fn decode_minimal_client_request() {
    // A bare client request: first byte 0x1B (VN=3, Mode=3), rest zero.
    let mut buf = [0u8; 48];
    buf[0] = 0x1B;
    let (packet, _) = Packet::from_bytes(&buf).unwrap();
    assert_eq!(packet.leap_indicator, LeapIndicator::NoWarning);
    assert_eq!(packet.version, Version::V3);
    assert_eq!(packet.mode, Mode::Client);
    assert_eq!(packet.stratum, Stratum::UNSPECIFIED);
    assert_eq!(packet.transmit_timestamp, TimestampFormat::default());
}

#[test]
fn encode_default_packet() {
    let mut buf = [0u8; 48];
    Packet::default().to_bytes(&mut buf).unwrap();
    // NTPv4 client request: 0x23, everything else zero.
    assert_eq!(buf[0], 0x23);
    assert!(buf[1..].iter().all(|b| *b == 0));
}

#[test]
fn encode_into_short_buffer_fails() {
    let mut buf = [0u8; 47];
    assert!(Packet::default().to_bytes(&mut buf).is_err());
}

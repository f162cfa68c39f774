// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Types and constants that precisely match the NTP packet wire format.
//!
//! Provides the [`FromBytes`] and [`ToBytes`] traits for bit-exact
//! conversion between a 48-byte buffer and a structured [`Packet`] value.
//! Decoding performs no validation of version/mode legality; that is the
//! responder's job (see [`crate::server_common`]). Encoding is lenient:
//! every bit-field is masked to its slot width before being OR-ed into
//! its byte, so out-of-range inputs truncate rather than corrupt
//! adjacent bits.
//!
//! Documentation is largely derived from IETF RFC 5905.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, RefIdError};

/// NTP port number.
pub const PORT: u16 = 123;

/// Parse a type from a byte slice, returning the parsed value and the number
/// of bytes consumed from the front of `buf`.
pub trait FromBytes: Sized {
    /// Parse from the given byte slice.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError>;
}

/// Serialize a type into a byte slice, returning the number of bytes written.
pub trait ToBytes {
    /// Write to the front of the given byte slice in network byte order.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError>;
}

/// Types that have a constant size when written to or read from bytes.
pub trait ConstPackedSizeBytes {
    /// The constant size in bytes when this type is packed for network transmission.
    const PACKED_SIZE_BYTES: usize;
}

/// **NTP Short Format** - Used in the root delay and root dispersion header
/// fields. A 16-bit unsigned seconds field followed by a 16-bit fraction
/// field (16.16 fixed-point seconds), transmitted big-endian.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Seconds component (16-bit unsigned).
    pub seconds: u16,
    /// Fractional seconds component (16-bit unsigned).
    pub fraction: u16,
}

/// **NTP Timestamp Format** - A 32-bit unsigned seconds field spanning 136
/// years and a 32-bit fraction field resolving ~232 picoseconds.
///
/// The prime epoch is 0 h 1 January 1900 UTC, when all bits are zero.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Seconds since 1900-01-01 00:00:00 UTC (32-bit unsigned).
    pub seconds: u32,
    /// Fractional seconds (32-bit unsigned, unit = 1/2^32 second).
    pub fraction: u32,
}

/// A 2-bit integer warning of an impending leap second to be inserted or
/// deleted in the last minute of the current month.
///
/// Packed into bits 7-6 of the first header byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddSecond = 1,
    /// Last minute of the day has 59 seconds.
    SubSecond = 2,
    /// Clock unsynchronized.
    Unknown = 3,
}

impl LeapIndicator {
    /// Decode from a raw 2-bit value. Values wider than 2 bits are masked.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => LeapIndicator::NoWarning,
            1 => LeapIndicator::AddSecond,
            2 => LeapIndicator::SubSecond,
            _ => LeapIndicator::Unknown,
        }
    }
}

/// A 3-bit integer representing the NTP version number, currently 4.
///
/// Stored as the raw field value; decoding does not reject unknown
/// versions. The responder ignores requests below [`Version::V2`].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub u8);

impl Version {
    /// NTP version 1.
    pub const V1: Self = Version(1);
    /// NTP version 2.
    pub const V2: Self = Version(2);
    /// NTP version 3.
    pub const V3: Self = Version(3);
    /// NTP version 4 (current standard).
    pub const V4: Self = Version(4);

    /// Whether or not the version is a known, valid version.
    pub fn is_known(&self) -> bool {
        self.0 >= 1 && self.0 <= 4
    }
}

impl Default for Version {
    /// Defaults to NTPv4, the current standard (RFC 5905).
    fn default() -> Self {
        Version::V4
    }
}

/// A 3-bit integer representing the association mode.
///
/// Packed into bits 2-0 of the first header byte. All eight field values
/// are covered, so decoding a masked 3-bit value cannot fail.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved mode (value 0).
    Reserved = 0,
    /// Symmetric active mode (value 1).
    SymmetricActive = 1,
    /// Symmetric passive mode (value 2).
    SymmetricPassive = 2,
    /// Client mode (value 3).
    #[default]
    Client = 3,
    /// Server mode (value 4).
    Server = 4,
    /// Broadcast mode (value 5).
    Broadcast = 5,
    /// NTP control message mode (value 6).
    ControlMessage = 6,
    /// Reserved for private use (value 7).
    Private = 7,
}

impl Mode {
    /// Decode from a raw 3-bit value. Values wider than 3 bits are masked.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Mode::Reserved,
            1 => Mode::SymmetricActive,
            2 => Mode::SymmetricPassive,
            3 => Mode::Client,
            4 => Mode::Server,
            5 => Mode::Broadcast,
            6 => Mode::ControlMessage,
            _ => Mode::Private,
        }
    }
}

/// An 8-bit integer representing the stratum.
///
/// ```ignore
/// +--------+-----------------------------------------------------+
/// | Value  | Meaning                                             |
/// +--------+-----------------------------------------------------+
/// | 0      | unspecified or invalid                              |
/// | 1      | primary server (e.g., equipped with a GPS receiver) |
/// | 2-15   | secondary server (via NTP)                          |
/// | 16     | unsynchronized                                      |
/// | 17-255 | reserved                                            |
/// +--------+-----------------------------------------------------+
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

impl Stratum {
    /// Unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// The primary server (e.g. equipped with a GPS receiver).
    pub const PRIMARY: Self = Stratum(1);
    /// The minimum value specifying a secondary server (via NTP).
    pub const SECONDARY_MIN: Self = Stratum(2);
    /// The maximum value specifying a secondary server (via NTP).
    pub const SECONDARY_MAX: Self = Stratum(15);
    /// An unsynchronized stratum.
    pub const UNSYNCHRONIZED: Self = Stratum(16);

    /// Whether or not the stratum represents a secondary server.
    pub fn is_secondary(&self) -> bool {
        Self::SECONDARY_MIN <= *self && *self <= Self::SECONDARY_MAX
    }
}

/// A 4-byte opaque token identifying the server's time source.
///
/// Depending on stratum this is an ASCII reference-clock code (`"GPS\0"`),
/// an IPv4 address, or an address hash. The codec never interprets the
/// bytes; they travel verbatim in both directions.
///
/// A `ReferenceId` can be parsed from a string: inputs of up to four
/// bytes are taken as raw ASCII characters, right-padded with zeros;
/// longer inputs are treated as a dotted quad with each segment a decimal
/// byte value.
///
/// ```
/// use localntp::protocol::ReferenceId;
///
/// let gps: ReferenceId = "GPS".parse().unwrap();
/// assert_eq!(gps.as_bytes(), [0x47, 0x50, 0x53, 0x00]);
///
/// let addr: ReferenceId = "192.168.1.1".parse().unwrap();
/// assert_eq!(addr.as_bytes(), [192, 168, 1, 1]);
///
/// assert!("999.1.1.1".parse::<ReferenceId>().is_err());
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceId(pub [u8; 4]);

impl ReferenceId {
    /// Returns the raw 4-byte representation of the reference identifier.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl FromStr for ReferenceId {
    type Err = RefIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 4];
        if s.len() <= 4 {
            bytes[..s.len()].copy_from_slice(s.as_bytes());
            return Ok(ReferenceId(bytes));
        }
        // Dotted quad: every segment must parse, extras beyond four are dropped.
        let mut parsed = [0u8; 4];
        let mut count = 0;
        for segment in s.split('.') {
            let value: u8 = segment
                .parse()
                .map_err(|_| RefIdError::InvalidSegment {
                    segment: segment.to_owned(),
                })?;
            if count < 4 {
                parsed[count] = value;
                count += 1;
            }
        }
        bytes[..count].copy_from_slice(&parsed[..count]);
        Ok(ReferenceId(bytes))
    }
}

impl fmt::Display for ReferenceId {
    /// Renders as ASCII when the token looks like a zero-padded clock code,
    /// as a dotted quad otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let printable = self.0.iter().take_while(|b| **b != 0).count();
        let ascii = self.0[..printable].iter().all(|b| b.is_ascii_graphic())
            && self.0[printable..].iter().all(|b| *b == 0)
            && printable > 0;
        if ascii {
            for &b in &self.0[..printable] {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "{}.{}.{}.{}", self.0[0], self.0[1], self.0[2], self.0[3])
        }
    }
}

/// **Packet Header** - The 48-byte NTP packet header, twelve 32-bit words
/// in network byte order.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |    Stratum     |     Poll      |  Precision   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Delay                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Dispersion                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Reference ID                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Reference Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Originate Timestamp (64)                 +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Receive Timestamp (64)                   +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Transmit Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Trailing extension fields and an optional MAC may follow the header on
/// the wire; they are ignored when decoding and never produced.
///
/// The `poll_interval` and `precision` fields are kept as raw bytes. NTP
/// defines both as signed log2 exponents, but this server only echoes or
/// sets fixed byte values and never interprets their sign.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Leap indicator warning of impending leap second.
    pub leap_indicator: LeapIndicator,
    /// NTP protocol version number.
    pub version: Version,
    /// Association mode (client, server, broadcast, etc.).
    pub mode: Mode,
    /// Stratum level of the time source.
    pub stratum: Stratum,
    /// Maximum interval between successive messages, in log2 seconds (raw byte).
    pub poll_interval: u8,
    /// Precision of the system clock, in log2 seconds (raw byte).
    pub precision: u8,
    /// Total round-trip delay to the reference clock.
    pub root_delay: ShortFormat,
    /// Total dispersion to the reference clock.
    pub root_dispersion: ShortFormat,
    /// Reference identifier (clock source code or server address).
    pub reference_id: ReferenceId,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: TimestampFormat,
    /// Time at the client when the request departed for the server (T1).
    pub originate_timestamp: TimestampFormat,
    /// Time at the server when the request arrived from the client (T2).
    pub receive_timestamp: TimestampFormat,
    /// Time at the server when the response left for the client (T3).
    pub transmit_timestamp: TimestampFormat,
}

impl Default for Packet {
    /// Defaults to a valid NTPv4 client request template.
    ///
    /// All timestamp and delay fields are zeroed.
    fn default() -> Self {
        Packet {
            leap_indicator: LeapIndicator::default(),
            version: Version::default(),
            mode: Mode::default(),
            stratum: Stratum::default(),
            poll_interval: 0,
            precision: 0,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: ReferenceId::default(),
            reference_timestamp: TimestampFormat::default(),
            originate_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat::default(),
        }
    }
}

// Size implementations.

impl ConstPackedSizeBytes for ShortFormat {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Stratum {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for ReferenceId {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for Packet {
    const PACKED_SIZE_BYTES: usize = 1 // LI | VN | Mode
        + Stratum::PACKED_SIZE_BYTES
        + 2 // poll interval + precision
        + ShortFormat::PACKED_SIZE_BYTES * 2
        + ReferenceId::PACKED_SIZE_BYTES
        + TimestampFormat::PACKED_SIZE_BYTES * 4;
}

// Reader implementations.

impl FromBytes for ShortFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let seconds = u16::from_be_bytes([buf[0], buf[1]]);
        let fraction = u16::from_be_bytes([buf[2], buf[3]]);
        Ok((ShortFormat { seconds, fraction }, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let seconds = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let fraction = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok((
            TimestampFormat { seconds, fraction },
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for Packet {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let li_vn_mode = buf[0];
        let leap_indicator = LeapIndicator::from_bits(li_vn_mode >> 6);
        let version = Version((li_vn_mode >> 3) & 0b111);
        let mode = Mode::from_bits(li_vn_mode & 0b111);

        let stratum = Stratum(buf[1]);
        let poll_interval = buf[2];
        let precision = buf[3];

        let mut offset = 4;
        let (root_delay, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;
        let (root_dispersion, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let reference_id = ReferenceId([
            buf[offset],
            buf[offset + 1],
            buf[offset + 2],
            buf[offset + 3],
        ]);
        offset += 4;

        let (reference_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;
        let (originate_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;
        let (receive_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;
        let (transmit_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        Ok((
            Packet {
                leap_indicator,
                version,
                mode,
                stratum,
                poll_interval,
                precision,
                root_delay,
                root_dispersion,
                reference_id,
                reference_timestamp,
                originate_timestamp,
                receive_timestamp,
                transmit_timestamp,
            },
            offset,
        ))
    }
}

// Writer implementations.

impl ToBytes for ShortFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        buf[..2].copy_from_slice(&self.seconds.to_be_bytes());
        buf[2..4].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        buf[..4].copy_from_slice(&self.seconds.to_be_bytes());
        buf[4..8].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        // Each field is masked before shifting so an out-of-range value
        // truncates to its slot width instead of bleeding into neighbors.
        let mut li_vn_mode = 0u8;
        li_vn_mode |= (self.leap_indicator as u8 & 0b11) << 6;
        li_vn_mode |= (self.version.0 & 0b111) << 3;
        li_vn_mode |= self.mode as u8 & 0b111;
        buf[0] = li_vn_mode;

        buf[1] = self.stratum.0;
        buf[2] = self.poll_interval;
        buf[3] = self.precision;

        let mut offset = 4;
        offset += self.root_delay.to_bytes(&mut buf[offset..])?;
        offset += self.root_dispersion.to_bytes(&mut buf[offset..])?;

        buf[offset..offset + 4].copy_from_slice(&self.reference_id.0);
        offset += 4;

        offset += self.reference_timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.originate_timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.receive_timestamp.to_bytes(&mut buf[offset..])?;
        offset += self.transmit_timestamp.to_bytes(&mut buf[offset..])?;

        Ok(offset)
    }
}

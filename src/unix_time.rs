// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::ops::{Add, Sub};
use std::time::{self, Duration};

use chrono::{DateTime, Utc};

use crate::protocol::TimestampFormat;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

/// Describes an instant relative to the `UNIX_EPOCH` - 00:00:00 Coordinated Universal Time (UTC),
/// Thursday, 1 January 1970 in seconds with the fractional part in nanoseconds.
///
/// If the **Instant** describes some moment prior to `UNIX_EPOCH`, both the `secs` and
/// `subsec_nanos` components will be negative.
///
/// The sole purpose of this type is for retrieving the "current" time using the `std::time`
/// module or a [`chrono::DateTime`], and for converting to and from the NTP timestamp format.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// To indicate a time following `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be positive.
    /// To indicate a time prior to `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be negative.
    /// Violating these invariants will result in a **panic!**.
    pub fn new(secs: i64, subsec_nanos: i32) -> Instant {
        if secs > 0 && subsec_nanos < 0 {
            panic!("invalid instant: secs was positive but subsec_nanos was negative");
        }
        if secs < 0 && subsec_nanos > 0 {
            panic!("invalid instant: secs was negative but subsec_nanos was positive");
        }
        Instant { secs, subsec_nanos }
    }

    /// Uses `std::time::SystemTime::now` and `std::time::UNIX_EPOCH` to determine the current
    /// **Instant**.
    pub fn now() -> Self {
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(duration) => {
                let secs = duration.as_secs() as i64;
                let subsec_nanos = duration.subsec_nanos() as i32;
                Instant::new(secs, subsec_nanos)
            }
            Err(sys_time_err) => {
                let duration_pre_unix_epoch = sys_time_err.duration();
                let secs = -(duration_pre_unix_epoch.as_secs() as i64);
                let subsec_nanos = -(duration_pre_unix_epoch.subsec_nanos() as i32);
                Instant::new(secs, subsec_nanos)
            }
        }
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }
}

// Truncating division keeps the seconds and nanoseconds components the
// same sign, which is exactly the `Instant::new` invariant.
fn from_total_nanos(total: i128) -> Instant {
    let secs = (total / 1_000_000_000) as i64;
    let nanos = (total % 1_000_000_000) as i32;
    Instant::new(secs, nanos)
}

fn total_nanos(t: &Instant) -> i128 {
    t.secs as i128 * 1_000_000_000 + t.subsec_nanos as i128
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        from_total_nanos(total_nanos(&self) + rhs.as_nanos() as i128)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        from_total_nanos(total_nanos(&self) - rhs.as_nanos() as i128)
    }
}

// Conversion implementations.

impl From<DateTime<Utc>> for Instant {
    /// Converts a calendar time (normalized to UTC) to a Unix [`Instant`].
    fn from(t: DateTime<Utc>) -> Self {
        let mut secs = t.timestamp();
        let mut nanos = t.timestamp_subsec_nanos() as i64;
        // chrono reports a non-negative fraction even before the epoch.
        if secs < 0 && nanos > 0 {
            secs += 1;
            nanos -= 1_000_000_000;
        }
        Instant::new(secs, nanos as i32)
    }
}

impl From<TimestampFormat> for Instant {
    /// Converts a 64-bit NTP timestamp to a Unix [`Instant`] within NTP era 0.
    fn from(t: TimestampFormat) -> Self {
        let secs = t.seconds as i64 - EPOCH_DELTA;
        let subsec_nanos = ((t.fraction as u64 * 1_000_000_000) >> 32) as i64;
        let (secs, subsec_nanos) = if secs < 0 && subsec_nanos > 0 {
            (secs + 1, subsec_nanos - 1_000_000_000)
        } else {
            (secs, subsec_nanos)
        };
        Instant::new(secs, subsec_nanos as i32)
    }
}

impl From<Instant> for TimestampFormat {
    /// Converts a Unix [`Instant`] to a 64-bit NTP timestamp.
    ///
    /// The seconds component counts from the prime epoch (1900-01-01 UTC).
    /// When the count exceeds 32 bits, `0xFFFF_FFFF` is subtracted once.
    /// This keeps the on-wire value in range past 2036 but is an
    /// approximation, not full era disambiguation: receivers in a later
    /// era must resolve the era themselves.
    ///
    /// The fraction is `floor(subsec * 2^32)`, giving a resolution of
    /// ~233 picoseconds.
    fn from(t: Instant) -> Self {
        let mut sec = t.secs() + EPOCH_DELTA;
        let mut nanos = t.subsec_nanos() as i64;
        // Pre-epoch instants carry a negative fraction; borrow a second
        // so the wire fraction counts forward from the 1900 epoch.
        if nanos < 0 {
            sec -= 1;
            nanos += 1_000_000_000;
        }
        if sec > 0xFFFF_FFFF {
            sec -= 0xFFFF_FFFF;
        }
        let frac = ((nanos as u64) << 32) / 1_000_000_000;
        TimestampFormat {
            seconds: sec as u32,
            fraction: (frac & 0xFFFF_FFFF) as u32,
        }
    }
}

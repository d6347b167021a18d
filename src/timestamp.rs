//! The Timestamp extension (type code -1).
//!
//! Three wire layouts, chosen by range, smallest first:
//!
//! ```text
//! ┌──────────────┬──────────┬──────────────────────────────────────────┐
//! │ Timestamp-32 │  4 bytes │ seconds as u32 BE (nanoseconds == 0)     │
//! │ Timestamp-64 │  8 bytes │ nanoseconds:30 | seconds:34, one u64 BE  │
//! │ Timestamp-96 │ 12 bytes │ nanoseconds u32 BE, then seconds i64 BE  │
//! └──────────────┴──────────┴──────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use wirepack::{pack, Timestamp, Value};
//!
//! let epoch = Timestamp::from_unix_seconds(0);
//! assert_eq!(
//!     pack(&epoch.encode()).unwrap().as_ref(),
//!     &[0xd6, 0xff, 0x00, 0x00, 0x00, 0x00]
//! );
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};
use crate::value::Value;

/// The extension type code reserved for timestamps.
pub const TIMESTAMP_TYPE_CODE: i8 = -1;

/// Largest valid nanosecond field.
pub const MAX_NANOSECONDS: u32 = 999_999_999;

/// Seconds since (or before) the unix epoch plus a sub-second
/// nanosecond offset in `[0, 999_999_999]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    seconds: i64,
    nanoseconds: u32,
}

impl Timestamp {
    /// Create a timestamp, carrying excess nanoseconds into seconds
    /// (the `std::time::Duration::new` rule), so the stored nanosecond
    /// field is always valid. Second overflow saturates.
    pub fn new(seconds: i64, nanoseconds: u32) -> Self {
        let carry = (nanoseconds / 1_000_000_000) as i64;
        Timestamp {
            seconds: seconds.saturating_add(carry),
            nanoseconds: nanoseconds % 1_000_000_000,
        }
    }

    /// Whole seconds since the unix epoch (negative for earlier instants).
    #[inline]
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second offset, always in `[0, 999_999_999]`.
    #[inline]
    pub fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    /// Timestamp at a whole number of unix seconds.
    pub fn from_unix_seconds(seconds: i64) -> Self {
        Timestamp {
            seconds,
            nanoseconds: 0,
        }
    }

    /// Timestamp at a number of unix milliseconds.
    ///
    /// Uses a euclidean split so negative inputs produce the correct
    /// non-negative nanosecond field: `-1 ms` is one second before the
    /// epoch plus `999_000_000 ns`.
    pub fn from_unix_millis(millis: i64) -> Self {
        Timestamp {
            seconds: millis.div_euclid(1000),
            nanoseconds: (millis.rem_euclid(1000) as u32) * 1_000_000,
        }
    }

    /// Whole unix seconds, truncating the nanosecond field.
    #[inline]
    pub fn to_unix_seconds(&self) -> i64 {
        self.seconds
    }

    /// Unix milliseconds, or `None` when the result overflows `i64`.
    pub fn to_unix_millis(&self) -> Option<i64> {
        self.seconds
            .checked_mul(1000)?
            .checked_add((self.nanoseconds / 1_000_000) as i64)
    }

    /// `true` when `value` is an Extension carrying the timestamp code.
    pub fn is_timestamp(value: &Value) -> bool {
        matches!(value, Value::Extension(TIMESTAMP_TYPE_CODE, _))
    }

    /// Encode as `Extension(-1, ...)`, picking the smallest layout that fits.
    pub fn encode(&self) -> Value {
        let mut payload = BytesMut::with_capacity(12);
        if self.nanoseconds == 0 && (0..=u32::MAX as i64).contains(&self.seconds) {
            payload.put_u32(self.seconds as u32);
        } else if (0..(1i64 << 34)).contains(&self.seconds) {
            let word = ((self.nanoseconds as u64) << 34) | self.seconds as u64;
            payload.put_u64(word);
        } else {
            payload.put_u32(self.nanoseconds);
            payload.put_i64(self.seconds);
        }
        Value::Extension(TIMESTAMP_TYPE_CODE, payload.freeze())
    }

    /// Decode from an `Extension(-1, ...)` value, dispatching on payload
    /// length.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::TypeMismatch`] when `value` is not an Extension
    ///   or its payload is not 4, 8, or 12 bytes
    /// - [`DecodeError::ExtensionTypeMismatch`] on a foreign type code
    /// - [`DecodeError::OutOfRange`] when a 96-bit payload carries a
    ///   nanosecond field above `999_999_999`
    pub fn decode(value: &Value) -> DecodeResult<Timestamp> {
        let (code, data) = match value {
            Value::Extension(code, data) => (*code, data),
            other => return Err(DecodeError::mismatch("Extension", other)),
        };
        if code != TIMESTAMP_TYPE_CODE {
            return Err(DecodeError::ExtensionTypeMismatch {
                expected: TIMESTAMP_TYPE_CODE,
                actual: code,
            });
        }
        match data.len() {
            4 => Ok(Timestamp {
                seconds: read_u32(data, 0) as i64,
                nanoseconds: 0,
            }),
            8 => {
                let word = read_u64(data, 0);
                let nanoseconds = (word >> 34) as u32;
                check_nanoseconds(nanoseconds)?;
                Ok(Timestamp {
                    seconds: (word & 0x3_ffff_ffff) as i64,
                    nanoseconds,
                })
            }
            12 => {
                let nanoseconds = read_u32(data, 0);
                check_nanoseconds(nanoseconds)?;
                Ok(Timestamp {
                    seconds: read_u64(data, 4) as i64,
                    nanoseconds,
                })
            }
            other => Err(DecodeError::TypeMismatch {
                expected: "timestamp payload of 4, 8, or 12 bytes".to_string(),
                actual: format!("{other} bytes"),
            }),
        }
    }
}

fn check_nanoseconds(nanoseconds: u32) -> DecodeResult<()> {
    if nanoseconds > MAX_NANOSECONDS {
        return Err(DecodeError::OutOfRange(format!(
            "timestamp nanoseconds {nanoseconds} out of range [0, {MAX_NANOSECONDS}]"
        )));
    }
    Ok(())
}

fn read_u32(data: &Bytes, offset: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&data[offset..offset + 4]);
    u32::from_be_bytes(raw)
}

fn read_u64(data: &Bytes, offset: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&data[offset..offset + 8]);
    u64::from_be_bytes(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::pack;

    fn payload(ts: Timestamp) -> Bytes {
        match ts.encode() {
            Value::Extension(TIMESTAMP_TYPE_CODE, data) => data,
            other => panic!("expected timestamp extension, got {other:?}"),
        }
    }

    #[test]
    fn test_epoch_is_four_zero_bytes() {
        let epoch = Timestamp::from_unix_seconds(0);
        assert_eq!(payload(epoch).as_ref(), &[0, 0, 0, 0]);
        assert_eq!(
            pack(&epoch.encode()).unwrap().as_ref(),
            &[0xd6, 0xff, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_timestamp32_upper_boundary() {
        let ts = Timestamp::from_unix_seconds(u32::MAX as i64);
        assert_eq!(payload(ts).as_ref(), &[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(Timestamp::decode(&ts.encode()).unwrap(), ts);
    }

    #[test]
    fn test_seconds_past_u32_use_timestamp64() {
        let ts = Timestamp::from_unix_seconds(u32::MAX as i64 + 1);
        let data = payload(ts);
        assert_eq!(data.len(), 8);
        assert_eq!(data.as_ref(), &[0, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(Timestamp::decode(&ts.encode()).unwrap(), ts);
    }

    #[test]
    fn test_nonzero_nanos_use_timestamp64() {
        let ts = Timestamp::new(1, 1);
        let data = payload(ts);
        // (1 << 34) | 1
        assert_eq!(data.as_ref(), &[0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(Timestamp::decode(&ts.encode()).unwrap(), ts);
    }

    #[test]
    fn test_timestamp64_boundaries() {
        let max64 = Timestamp::new((1 << 34) - 1, MAX_NANOSECONDS);
        assert_eq!(payload(max64).len(), 8);
        assert_eq!(Timestamp::decode(&max64.encode()).unwrap(), max64);

        let past64 = Timestamp::new(1 << 34, 0);
        assert_eq!(payload(past64).len(), 12);
        assert_eq!(Timestamp::decode(&past64.encode()).unwrap(), past64);
    }

    #[test]
    fn test_negative_seconds_use_timestamp96() {
        let ts = Timestamp::new(-1, 500_000_000);
        let data = payload(ts);
        assert_eq!(data.len(), 12);
        assert_eq!(
            data.as_ref(),
            &[0x1d, 0xcd, 0x65, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
        assert_eq!(Timestamp::decode(&ts.encode()).unwrap(), ts);
    }

    #[test]
    fn test_decode_rejects_other_payload_lengths() {
        let bogus = Value::extension(TIMESTAMP_TYPE_CODE, vec![0u8; 7]);
        let err = Timestamp::decode(&bogus).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                expected: "timestamp payload of 4, 8, or 12 bytes".to_string(),
                actual: "7 bytes".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_foreign_type_code() {
        let foreign = Value::extension(7, vec![0u8; 4]);
        assert_eq!(
            Timestamp::decode(&foreign).unwrap_err(),
            DecodeError::ExtensionTypeMismatch {
                expected: -1,
                actual: 7
            }
        );
    }

    #[test]
    fn test_decode_rejects_non_extension() {
        assert_eq!(
            Timestamp::decode(&Value::Integer(0)).unwrap_err(),
            DecodeError::TypeMismatch {
                expected: "Extension".to_string(),
                actual: "Integer".to_string(),
            }
        );
    }

    #[test]
    fn test_decode_rejects_oversized_nanoseconds() {
        // Timestamp-96 with nanoseconds = 1_000_000_000.
        let mut data = vec![0x3b, 0x9a, 0xca, 0x00];
        data.extend_from_slice(&[0u8; 8]);
        let bogus = Value::extension(TIMESTAMP_TYPE_CODE, data);
        assert!(matches!(
            Timestamp::decode(&bogus).unwrap_err(),
            DecodeError::OutOfRange(_)
        ));
    }

    #[test]
    fn test_new_carries_excess_nanos() {
        let ts = Timestamp::new(10, 2_500_000_000);
        assert_eq!(ts.seconds(), 12);
        assert_eq!(ts.nanoseconds(), 500_000_000);
    }

    #[test]
    fn test_millis_round_trip() {
        let ts = Timestamp::from_unix_millis(1_500);
        assert_eq!(ts.seconds(), 1);
        assert_eq!(ts.nanoseconds(), 500_000_000);
        assert_eq!(ts.to_unix_millis(), Some(1_500));
    }

    #[test]
    fn test_negative_millis_split_euclidean() {
        let ts = Timestamp::from_unix_millis(-1);
        assert_eq!(ts.seconds(), -1);
        assert_eq!(ts.nanoseconds(), 999_000_000);
        assert_eq!(ts.to_unix_millis(), Some(-1));
    }

    #[test]
    fn test_to_unix_millis_overflow_is_none() {
        assert_eq!(Timestamp::from_unix_seconds(i64::MAX).to_unix_millis(), None);
    }

    #[test]
    fn test_is_timestamp() {
        assert!(Timestamp::is_timestamp(&Timestamp::from_unix_seconds(5).encode()));
        assert!(!Timestamp::is_timestamp(&Value::extension(3, vec![0u8; 4])));
        assert!(!Timestamp::is_timestamp(&Value::Nil));
    }
}

//! Canonical MessagePack encoding.
//!
//! One writer per value kind, each picking the shortest format that fits:
//!
//! ```text
//! Integer   fixint → u/int8 → u/int16 → u/int32 → u/int64
//! String    fixstr → str8 → str16 → str32
//! Binary    bin8 → bin16 → bin32
//! Array     fixarray → array16 → array32
//! Map       fixmap → map16 → map32
//! Extension fixext{1,2,4,8,16} → ext8 → ext16 → ext32
//! ```
//!
//! All multi-byte integers are Big Endian. Floats are always emitted as
//! float64 so precision survives the round trip.

use bytes::{BufMut, Bytes, BytesMut};

use super::marker;
use crate::error::{EncodeError, EncodeResult};
use crate::value::Value;

/// Encode a single value into a freshly allocated buffer.
pub(super) fn encode_value(value: &Value) -> EncodeResult<Bytes> {
    let mut buf = BytesMut::with_capacity(64);
    write_value(&mut buf, value)?;
    Ok(buf.freeze())
}

fn write_value(buf: &mut BytesMut, value: &Value) -> EncodeResult<()> {
    match value {
        Value::Nil => buf.put_u8(marker::NIL),
        Value::Boolean(false) => buf.put_u8(marker::FALSE),
        Value::Boolean(true) => buf.put_u8(marker::TRUE),
        Value::Integer(n) => write_integer(buf, *n),
        Value::Float(f) => {
            buf.put_u8(marker::FLOAT64);
            buf.put_f64(*f);
        }
        Value::String(s) => write_string(buf, s)?,
        Value::Binary(data) => write_binary(buf, data)?,
        Value::Array(items) => {
            write_array_header(buf, items.len())?;
            for item in items {
                write_value(buf, item)?;
            }
        }
        Value::Map(pairs) => {
            write_map_header(buf, pairs.len())?;
            for (key, val) in pairs {
                write_value(buf, key)?;
                write_value(buf, val)?;
            }
        }
        Value::Extension(type_code, data) => write_extension(buf, *type_code, data)?,
    }
    Ok(())
}

/// Canonical integer format selection. Infallible for `i64`: every value
/// lands in exactly one row of the table.
fn write_integer(buf: &mut BytesMut, n: i64) {
    match n {
        0..=127 => buf.put_u8(n as u8),
        // Negative fixint: the low 5 bits of the two's complement, 0xe0..0xff.
        -32..=-1 => buf.put_u8(n as u8),
        128..=255 => {
            buf.put_u8(marker::UINT8);
            buf.put_u8(n as u8);
        }
        -128..=-33 => {
            buf.put_u8(marker::INT8);
            buf.put_i8(n as i8);
        }
        256..=65_535 => {
            buf.put_u8(marker::UINT16);
            buf.put_u16(n as u16);
        }
        -32_768..=-129 => {
            buf.put_u8(marker::INT16);
            buf.put_i16(n as i16);
        }
        65_536..=4_294_967_295 => {
            buf.put_u8(marker::UINT32);
            buf.put_u32(n as u32);
        }
        -2_147_483_648..=-32_769 => {
            buf.put_u8(marker::INT32);
            buf.put_i32(n as i32);
        }
        4_294_967_296..=i64::MAX => {
            buf.put_u8(marker::UINT64);
            buf.put_u64(n as u64);
        }
        i64::MIN..=-2_147_483_649 => {
            buf.put_u8(marker::INT64);
            buf.put_i64(n);
        }
    }
}

fn write_string(buf: &mut BytesMut, s: &str) -> EncodeResult<()> {
    let len = s.len();
    match len {
        0..=31 => buf.put_u8(0xa0 | len as u8),
        32..=255 => {
            buf.put_u8(marker::STR8);
            buf.put_u8(len as u8);
        }
        256..=65_535 => {
            buf.put_u8(marker::STR16);
            buf.put_u16(len as u16);
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| EncodeError::StringTooLong(len))?;
            buf.put_u8(marker::STR32);
            buf.put_u32(len32);
        }
    }
    buf.put_slice(s.as_bytes());
    Ok(())
}

fn write_binary(buf: &mut BytesMut, data: &[u8]) -> EncodeResult<()> {
    let len = data.len();
    match len {
        0..=255 => {
            buf.put_u8(marker::BIN8);
            buf.put_u8(len as u8);
        }
        256..=65_535 => {
            buf.put_u8(marker::BIN16);
            buf.put_u16(len as u16);
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| EncodeError::BinaryTooLong(len))?;
            buf.put_u8(marker::BIN32);
            buf.put_u32(len32);
        }
    }
    buf.put_slice(data);
    Ok(())
}

fn write_array_header(buf: &mut BytesMut, len: usize) -> EncodeResult<()> {
    match len {
        0..=15 => buf.put_u8(0x90 | len as u8),
        16..=65_535 => {
            buf.put_u8(marker::ARRAY16);
            buf.put_u16(len as u16);
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| EncodeError::ArrayTooLong(len))?;
            buf.put_u8(marker::ARRAY32);
            buf.put_u32(len32);
        }
    }
    Ok(())
}

fn write_map_header(buf: &mut BytesMut, pairs: usize) -> EncodeResult<()> {
    match pairs {
        0..=15 => buf.put_u8(0x80 | pairs as u8),
        16..=65_535 => {
            buf.put_u8(marker::MAP16);
            buf.put_u16(pairs as u16);
        }
        _ => {
            let len32 = u32::try_from(pairs).map_err(|_| EncodeError::MapTooLong(pairs))?;
            buf.put_u8(marker::MAP32);
            buf.put_u32(len32);
        }
    }
    Ok(())
}

/// Fixext sizes take priority over ext8; any other length up to 255 falls
/// through to ext8.
fn write_extension(buf: &mut BytesMut, type_code: i8, data: &[u8]) -> EncodeResult<()> {
    let len = data.len();
    match len {
        1 => buf.put_u8(marker::FIXEXT1),
        2 => buf.put_u8(marker::FIXEXT2),
        4 => buf.put_u8(marker::FIXEXT4),
        8 => buf.put_u8(marker::FIXEXT8),
        16 => buf.put_u8(marker::FIXEXT16),
        0..=255 => {
            buf.put_u8(marker::EXT8);
            buf.put_u8(len as u8);
        }
        256..=65_535 => {
            buf.put_u8(marker::EXT16);
            buf.put_u16(len as u16);
        }
        _ => {
            let len32 = u32::try_from(len).map_err(|_| EncodeError::ExtensionDataTooLong(len))?;
            buf.put_u8(marker::EXT32);
            buf.put_u32(len32);
        }
    }
    buf.put_i8(type_code);
    buf.put_slice(data);
    Ok(())
}

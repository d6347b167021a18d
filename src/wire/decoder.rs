//! Prefix-dispatched MessagePack decoding.
//!
//! Recursive descent over a byte slice: every reader consumes a prefix of
//! the input and leaves the suffix untouched, so the top-level entry point
//! can hand unread bytes back to streaming callers. Arrays and maps
//! re-enter the value reader count-times on the tail.
//!
//! The decoder accepts every valid encoding, canonical or not: a `1`
//! carried in a uint16 decodes the same as a positive fixint `1`.

use bytes::Bytes;

use super::marker;
use crate::error::{DecodeError, DecodeResult};
use crate::value::Value;

/// Decode the first value in `input`, returning the unread suffix.
pub(super) fn decode_value(input: &[u8]) -> DecodeResult<(Value, &[u8])> {
    let mut reader = Reader { input };
    let value = read_value(&mut reader)?;
    Ok((value, reader.input))
}

/// Cursor over the undecoded remainder of the input.
struct Reader<'a> {
    input: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Consume exactly `n` bytes.
    fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        if self.input.len() < n {
            return Err(DecodeError::UnexpectedEof);
        }
        let (head, tail) = self.input.split_at(n);
        self.input = tail;
        Ok(head)
    }

    fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    fn read_u16(&mut self) -> DecodeResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> DecodeResult<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self) -> DecodeResult<u64> {
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(u64::from_be_bytes(raw))
    }

    fn read_i16(&mut self) -> DecodeResult<i16> {
        Ok(self.read_u16()? as i16)
    }

    fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    fn read_i64(&mut self) -> DecodeResult<i64> {
        Ok(self.read_u64()? as i64)
    }
}

// TODO: recursion depth limit for adversarial nesting like `91 91 91 ...`.
fn read_value(r: &mut Reader<'_>) -> DecodeResult<Value> {
    let prefix = r.read_u8()?;
    let value = match prefix {
        0x00..=0x7f => Value::Integer(prefix as i64),
        0xe0..=0xff => Value::Integer(prefix as i8 as i64),
        0x80..=0x8f => read_map(r, (prefix & 0x0f) as usize)?,
        0x90..=0x9f => read_array(r, (prefix & 0x0f) as usize)?,
        0xa0..=0xbf => read_string(r, (prefix & 0x1f) as usize)?,
        marker::NIL => Value::Nil,
        marker::RESERVED => return Err(DecodeError::ReservedFormat(prefix)),
        marker::FALSE => Value::Boolean(false),
        marker::TRUE => Value::Boolean(true),
        marker::BIN8 => {
            let len = r.read_u8()? as usize;
            read_binary(r, len)?
        }
        marker::BIN16 => {
            let len = r.read_u16()? as usize;
            read_binary(r, len)?
        }
        marker::BIN32 => {
            let len = r.read_u32()? as usize;
            read_binary(r, len)?
        }
        marker::EXT8 => {
            let len = r.read_u8()? as usize;
            read_extension(r, len)?
        }
        marker::EXT16 => {
            let len = r.read_u16()? as usize;
            read_extension(r, len)?
        }
        marker::EXT32 => {
            let len = r.read_u32()? as usize;
            read_extension(r, len)?
        }
        marker::FLOAT32 => {
            let bytes = r.take(4)?;
            let mut raw = [0u8; 4];
            raw.copy_from_slice(bytes);
            Value::Float(f32::from_be_bytes(raw) as f64)
        }
        marker::FLOAT64 => {
            let bytes = r.take(8)?;
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            Value::Float(f64::from_be_bytes(raw))
        }
        marker::UINT8 => Value::Integer(r.read_u8()? as i64),
        marker::UINT16 => Value::Integer(r.read_u16()? as i64),
        marker::UINT32 => Value::Integer(r.read_u32()? as i64),
        marker::UINT64 => {
            let raw = r.read_u64()?;
            let n = i64::try_from(raw).map_err(|_| DecodeError::IntegerOverflow)?;
            Value::Integer(n)
        }
        marker::INT8 => Value::Integer(r.read_i8()? as i64),
        marker::INT16 => Value::Integer(r.read_i16()? as i64),
        marker::INT32 => Value::Integer(r.read_i32()? as i64),
        marker::INT64 => Value::Integer(r.read_i64()?),
        marker::FIXEXT1 => read_extension(r, 1)?,
        marker::FIXEXT2 => read_extension(r, 2)?,
        marker::FIXEXT4 => read_extension(r, 4)?,
        marker::FIXEXT8 => read_extension(r, 8)?,
        marker::FIXEXT16 => read_extension(r, 16)?,
        marker::STR8 => {
            let len = r.read_u8()? as usize;
            read_string(r, len)?
        }
        marker::STR16 => {
            let len = r.read_u16()? as usize;
            read_string(r, len)?
        }
        marker::STR32 => {
            let len = r.read_u32()? as usize;
            read_string(r, len)?
        }
        marker::ARRAY16 => {
            let count = r.read_u16()? as usize;
            read_array(r, count)?
        }
        marker::ARRAY32 => {
            let count = r.read_u32()? as usize;
            read_array(r, count)?
        }
        marker::MAP16 => {
            let count = r.read_u16()? as usize;
            read_map(r, count)?
        }
        marker::MAP32 => {
            let count = r.read_u32()? as usize;
            read_map(r, count)?
        }
    };
    Ok(value)
}

fn read_string(r: &mut Reader<'_>, len: usize) -> DecodeResult<Value> {
    let bytes = r.take(len)?;
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8)?;
    Ok(Value::String(text.to_string()))
}

fn read_binary(r: &mut Reader<'_>, len: usize) -> DecodeResult<Value> {
    Ok(Value::Binary(Bytes::copy_from_slice(r.take(len)?)))
}

fn read_extension(r: &mut Reader<'_>, len: usize) -> DecodeResult<Value> {
    let type_code = r.read_i8()?;
    let data = Bytes::copy_from_slice(r.take(len)?);
    Ok(Value::Extension(type_code, data))
}

fn read_array(r: &mut Reader<'_>, count: usize) -> DecodeResult<Value> {
    // The count comes off the wire; cap the preallocation.
    let mut items = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        items.push(read_value(r)?);
    }
    Ok(Value::Array(items))
}

fn read_map(r: &mut Reader<'_>, count: usize) -> DecodeResult<Value> {
    let mut pairs = Vec::with_capacity(count.min(4096));
    for _ in 0..count {
        let key = read_value(r)?;
        let val = read_value(r)?;
        pairs.push((key, val));
    }
    Ok(Value::Map(pairs))
}

//! Field-level protobuf reader.
//!
//! This is not a style decoder. It splits a message into its raw fields so
//! encoded output can be inspected: tag order, field presence, payloads.
//!
//! Keys and varints are decoded with `prost::encoding`, the same primitives
//! the writer encodes with.

use crate::error::{Error, Result};
use prost::encoding::{decode_key, decode_varint, WireType};
use prost::DecodeError;

/// One field of a message, payload borrowed from the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawField<'a> {
    /// Field number
    pub tag: u32,
    /// Wire type from the key
    pub wire_type: WireType,
    /// Varint value for VARINT fields, otherwise 0
    pub varint: u64,
    /// Raw bytes for length-delimited and fixed-width fields, otherwise empty
    pub payload: &'a [u8],
}

impl<'a> RawField<'a> {
    /// Varint value, if this is a varint field
    pub fn as_varint(&self) -> Option<u64> {
        (self.wire_type == WireType::Varint).then_some(self.varint)
    }

    /// UTF-8 payload, if this is a length-delimited string
    pub fn as_str(&self) -> Option<&'a str> {
        if self.wire_type != WireType::LengthDelimited {
            return None;
        }
        std::str::from_utf8(self.payload).ok()
    }

    /// Fields of the nested message carried by this LEN field
    pub fn as_message(&self) -> Result<Vec<RawField<'a>>> {
        if self.wire_type != WireType::LengthDelimited {
            return Err(Error::invalid_wire_format(
                0,
                format!("field {} is not length-delimited", self.tag),
            ));
        }
        read_fields(self.payload)
    }

    /// Packed little-endian `f32` values carried by this LEN field
    pub fn as_packed_floats(&self) -> Option<Vec<f32>> {
        if self.wire_type != WireType::LengthDelimited || self.payload.len() % 4 != 0 {
            return None;
        }
        Some(
            self.payload
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

/// Split a message into its fields, in wire order.
///
/// Group-encoded fields are rejected; nothing in the style format uses them.
pub fn read_fields(data: &[u8]) -> Result<Vec<RawField<'_>>> {
    let mut fields = Vec::new();
    let mut buf = data;

    while !buf.is_empty() {
        let offset = data.len() - buf.len();
        let (tag, wire_type) = decode_key(&mut buf).map_err(|e| decode_error(offset, e))?;

        let (varint, payload): (u64, &[u8]) = match wire_type {
            WireType::Varint => {
                let value = decode_varint(&mut buf).map_err(|e| decode_error(offset, e))?;
                (value, &[])
            }
            WireType::LengthDelimited => {
                let len = decode_varint(&mut buf).map_err(|e| decode_error(offset, e))?;
                (0, take(&mut buf, offset, len)?)
            }
            WireType::ThirtyTwoBit => (0, take(&mut buf, offset, 4)?),
            WireType::SixtyFourBit => (0, take(&mut buf, offset, 8)?),
            WireType::StartGroup | WireType::EndGroup => {
                return Err(Error::invalid_wire_format(
                    offset,
                    format!("field {} uses group encoding", tag),
                ));
            }
        };

        fields.push(RawField {
            tag,
            wire_type,
            varint,
            payload,
        });
    }

    Ok(fields)
}

fn take<'a>(buf: &mut &'a [u8], offset: usize, len: u64) -> Result<&'a [u8]> {
    let available = buf.len();
    let len = usize::try_from(len)
        .ok()
        .filter(|&len| len <= available)
        .ok_or_else(|| {
            Error::invalid_wire_format(
                offset,
                format!("not enough bytes (need {}, have {})", len, available),
            )
        })?;
    let (payload, rest) = buf.split_at(len);
    *buf = rest;
    Ok(payload)
}

fn decode_error(offset: usize, err: DecodeError) -> Error {
    Error::invalid_wire_format(offset, err.to_string())
}

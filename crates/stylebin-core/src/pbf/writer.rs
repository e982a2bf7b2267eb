//! Tagged field writer.
//!
//! Keys and varints go through `prost::encoding`, so the output is plain
//! protobuf wire format readable by any protobuf decoder.

use bytes::{BufMut, Bytes, BytesMut};
use prost::encoding::{encode_key, encode_varint, WireType};

/// Append-only buffer of protobuf fields.
///
/// Nested messages are built in their own writer and attached with
/// [`PbfWriter::write_message`].
#[derive(Debug, Default, Clone)]
pub struct PbfWriter {
    buf: BytesMut,
}

impl PbfWriter {
    /// Creates an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Length-delimited UTF-8 string
    pub fn write_tagged_string(&mut self, tag: u32, value: &str) {
        self.write_bytes(tag, value.as_bytes());
    }

    /// Unsigned varint
    pub fn write_tagged_varint(&mut self, tag: u32, value: u64) {
        encode_key(tag, WireType::Varint, &mut self.buf);
        encode_varint(value, &mut self.buf);
    }

    /// 32-bit unsigned integer, varint encoded
    pub fn write_tagged_uint32(&mut self, tag: u32, value: u32) {
        self.write_tagged_varint(tag, u64::from(value));
    }

    /// Single-byte boolean
    pub fn write_tagged_boolean(&mut self, tag: u32, value: bool) {
        self.write_tagged_varint(tag, u64::from(value));
    }

    /// Length-delimited nested message
    pub fn write_message(&mut self, tag: u32, message: &PbfWriter) {
        self.write_bytes(tag, &message.buf);
    }

    /// Length-delimited packed little-endian `f32` array.
    ///
    /// Written even when `values` is empty.
    pub fn write_packed_floats(&mut self, tag: u32, values: &[f32]) {
        encode_key(tag, WireType::LengthDelimited, &mut self.buf);
        encode_varint((values.len() * 4) as u64, &mut self.buf);
        for value in values {
            self.buf.put_f32_le(*value);
        }
    }

    fn write_bytes(&mut self, tag: u32, bytes: &[u8]) {
        encode_key(tag, WireType::LengthDelimited, &mut self.buf);
        encode_varint(bytes.len() as u64, &mut self.buf);
        self.buf.put_slice(bytes);
    }

    /// Number of bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the encoded bytes
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

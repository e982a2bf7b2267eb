//! Protobuf wire primitives.
//!
//! [`PbfWriter`] is the only thing the encoders write through. The reader
//! half splits encoded bytes back into raw fields for inspection.

mod reader;
mod writer;

pub use prost::encoding::WireType;
pub use reader::{read_fields, RawField};
pub use writer::PbfWriter;

//! Bucket filter values.

use crate::error::{Error, Result};
use crate::pbf::PbfWriter;
use crate::schema::tags;
use crate::style::Literal;

/// Encodes one filter value of `bucket` as a standalone `Value` message.
///
/// Only strings and booleans have a wire form. Anything else fails with
/// [`Error::UnsupportedValueKind`] naming the bucket and the value's index.
pub fn encode_value(bucket: &str, index: usize, value: &Literal) -> Result<PbfWriter> {
    let mut pbf = PbfWriter::new();
    match value {
        Literal::String(s) => pbf.write_tagged_string(tags::value::STRING, s),
        Literal::Bool(b) => pbf.write_tagged_boolean(tags::value::BOOL, *b),
        Literal::Number(_) | Literal::Null | Literal::Compound(_) => {
            return Err(Error::unsupported_value(bucket, index, value.to_string()));
        }
    }
    Ok(pbf)
}

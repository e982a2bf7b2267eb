//! Paint properties: null, constant or zoom stops.

use crate::error::{Error, Result};
use crate::pbf::PbfWriter;
use crate::schema::{tags, PropertyFunction};
use crate::style::{Literal, Width, WidthTerm};

/// A validated property ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// How `values` is interpreted
    pub function: PropertyFunction,
    /// One value for constants, `[z0, v0, z1, v1, ...]` for stops
    pub values: Vec<f32>,
}

impl Property {
    /// Builds a property, checking the value count against the function.
    ///
    /// `context` names the property in error messages.
    pub fn new(context: &str, function: PropertyFunction, values: Vec<f32>) -> Result<Self> {
        match function {
            PropertyFunction::Null if !values.is_empty() => {
                return Err(Error::malformed_property(
                    context,
                    format!("null takes no values, got {}", values.len()),
                ));
            }
            PropertyFunction::Constant if values.len() != 1 => {
                return Err(Error::malformed_property(
                    context,
                    format!("constant takes exactly one value, got {}", values.len()),
                ));
            }
            PropertyFunction::Stops if values.len() % 2 != 0 => {
                return Err(Error::malformed_stops(
                    context,
                    format!("expected zoom/value pairs, got {} values", values.len()),
                ));
            }
            _ => {}
        }
        Ok(Self { function, values })
    }

    /// A constant property from a single literal
    pub fn constant(context: &str, value: &Literal) -> Result<Self> {
        Self::new(context, PropertyFunction::Constant, vec![coerce(context, value)?])
    }

    /// Expands a line width into a property.
    ///
    /// Scalars become constants. Arrays name their function in the first
    /// element; for `stops` every following element must be a `{z, val}`
    /// pair, otherwise every following element is a raw value.
    pub fn from_width(context: &str, width: &Width) -> Result<Self> {
        let terms = match width {
            Width::Constant(value) => return Self::constant(context, value),
            Width::Function(terms) => terms,
        };

        let Some((head, rest)) = terms.split_first() else {
            return Err(Error::malformed_property(context, "empty function array"));
        };
        let name = match head {
            WidthTerm::Literal(Literal::String(name)) => name.as_str(),
            WidthTerm::Literal(other) => {
                return Err(Error::unknown_property_function(context, other.to_string()))
            }
            WidthTerm::Stop(_) => {
                return Err(Error::unknown_property_function(context, "{z, val}"))
            }
        };
        let function = PropertyFunction::from_name(name)
            .ok_or_else(|| Error::unknown_property_function(context, name))?;

        let mut values = Vec::with_capacity(rest.len() * 2);
        for (i, term) in rest.iter().enumerate() {
            match (function, term) {
                (PropertyFunction::Stops, WidthTerm::Stop(stop)) => {
                    values.push(coerce(context, &stop.z)?);
                    values.push(coerce(context, &stop.val)?);
                }
                (PropertyFunction::Stops, WidthTerm::Literal(value)) => {
                    return Err(Error::malformed_stops(
                        context,
                        format!("element {} is {}, expected a {{z, val}} pair", i + 1, value),
                    ));
                }
                (_, WidthTerm::Literal(value)) => values.push(coerce(context, value)?),
                (_, WidthTerm::Stop(_)) => {
                    return Err(Error::malformed_property(
                        context,
                        format!("element {} is a {{z, val}} pair outside a stops function", i + 1),
                    ));
                }
            }
        }

        Self::new(context, function, values)
    }

    /// Fails unless stop zoom levels are strictly ascending.
    ///
    /// Non-stops properties always pass.
    pub fn check_stop_order(&self, context: &str) -> Result<()> {
        if self.function != PropertyFunction::Stops {
            return Ok(());
        }
        let zooms: Vec<f32> = self.values.iter().step_by(2).copied().collect();
        for pair in zooms.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(Error::malformed_stops(
                    context,
                    format!("zoom {} does not follow zoom {} in ascending order", pair[1], pair[0]),
                ));
            }
        }
        Ok(())
    }

    /// Writes the `Property` message
    pub fn write(&self) -> PbfWriter {
        let mut pbf = PbfWriter::new();
        pbf.write_tagged_varint(tags::property::FUNCTION, u64::from(self.function.wire_value()));
        pbf.write_packed_floats(tags::property::VALUE, &self.values);
        pbf
    }
}

/// Coerces every literal to a number and writes the `Property` message.
pub fn encode_property(
    context: &str,
    function: PropertyFunction,
    values: &[Literal],
) -> Result<PbfWriter> {
    let values = values
        .iter()
        .map(|value| coerce(context, value))
        .collect::<Result<Vec<_>>>()?;
    Ok(Property::new(context, function, values)?.write())
}

/// Numeric conversion of a property element
fn coerce(context: &str, value: &Literal) -> Result<f32> {
    value
        .to_number()
        .map(|n| n as f32)
        .ok_or_else(|| Error::numeric_coercion(context, value.to_string()))
}

//! Classes and their fill and line paint overrides.
//!
//! Layer types other than `fill` and `line` are either skipped (`point`) or
//! rejected as unsupported, subject to the lenient policy.

use crate::error::{Error, Result};
use crate::pbf::PbfWriter;
use crate::schema::tags;
use crate::style::{ClassDef, LayerStyle, Literal};
use tracing::{debug, trace};

use super::color::rgba;
use super::property::Property;
use super::Session;

/// Layer types that carry no paint overrides and are skipped without error
const NON_DRAWABLE_TYPES: &[&str] = &["point"];

/// Encodes a class and dispatches each layer by type.
pub(crate) fn encode_class(class: &ClassDef, session: &mut Session<'_>) -> Result<PbfWriter> {
    let mut pbf = PbfWriter::new();
    pbf.write_tagged_string(tags::class::NAME, &class.name);

    for (layer_name, layer) in class.layers.iter() {
        match layer.kind.as_deref() {
            Some("fill") => {
                let encoded = encode_fill(&class.name, layer_name, layer, session)?;
                pbf.write_message(tags::class::FILL, &encoded);
                session.stats.fill_layers += 1;
            }
            Some("line") => {
                let encoded = encode_line(&class.name, layer_name, layer, session)?;
                pbf.write_message(tags::class::LINE, &encoded);
                session.stats.line_layers += 1;
            }
            Some(kind) if NON_DRAWABLE_TYPES.contains(&kind) => {
                debug!(
                    "Skipping {} layer '{}' in class '{}'",
                    kind, layer_name, class.name
                );
                session.stats.skipped_layers += 1;
            }
            other => {
                let err = Error::unsupported_layer_type(
                    &class.name,
                    layer_name,
                    other.unwrap_or("<none>"),
                );
                session.demote(err)?;
                session.stats.skipped_layers += 1;
            }
        }
    }

    Ok(pbf)
}

fn encode_fill(
    class: &str,
    layer_name: &str,
    layer: &LayerStyle,
    session: &mut Session<'_>,
) -> Result<PbfWriter> {
    let mut pbf = PbfWriter::new();
    pbf.write_tagged_string(tags::fill::LAYER_NAME, layer_name);

    if let Some(antialias) = &layer.antialias {
        let context = property_context(class, layer_name, "antialias");
        let property = Property::constant(&context, antialias)?;
        pbf.write_message(tags::fill::ANTIALIAS, &property.write());
    }

    if let Some(color) = &layer.color {
        if let Some(rgba) = parse_layer_color(class, layer_name, color, session)? {
            pbf.write_tagged_uint32(tags::fill::FILL_COLOR, rgba);
        }
    }

    if let Some(opacity) = &layer.opacity {
        let context = property_context(class, layer_name, "opacity");
        match opacity {
            Literal::Number(_) => {
                let property = Property::constant(&context, opacity)?;
                pbf.write_message(tags::fill::OPACITY, &property.write());
            }
            other => session.demote(Error::invalid_opacity(context, other.to_string()))?,
        }
    }

    trace!("Encoded fill layer '{}' of class '{}'", layer_name, class);
    Ok(pbf)
}

fn encode_line(
    class: &str,
    layer_name: &str,
    layer: &LayerStyle,
    session: &mut Session<'_>,
) -> Result<PbfWriter> {
    let mut pbf = PbfWriter::new();
    pbf.write_tagged_string(tags::line::LAYER_NAME, layer_name);

    if let Some(color) = &layer.color {
        if let Some(rgba) = parse_layer_color(class, layer_name, color, session)? {
            pbf.write_tagged_uint32(tags::line::COLOR, rgba);
        }
    }

    if let Some(width) = &layer.width {
        let context = property_context(class, layer_name, "width");
        let property = Property::from_width(&context, width)?;
        if session.config.validate_stop_order {
            property.check_stop_order(&context)?;
        }
        pbf.write_message(tags::line::WIDTH, &property.write());
    }

    trace!("Encoded line layer '{}' of class '{}'", layer_name, class);
    Ok(pbf)
}

/// `Ok(None)` when an invalid color was demoted in lenient mode.
///
/// Only strings can hold a color; `null` and other literals are invalid.
fn parse_layer_color(
    class: &str,
    layer_name: &str,
    color: &Literal,
    session: &mut Session<'_>,
) -> Result<Option<u32>> {
    if let Some(rgba) = color.as_str().and_then(rgba) {
        return Ok(Some(rgba));
    }

    let context = format!("class '{}', layer '{}'", class, layer_name);
    let shown = match color {
        Literal::String(s) => s.clone(),
        other => other.to_string(),
    };
    session.demote(Error::invalid_color(context, shown))?;
    Ok(None)
}

fn property_context(class: &str, layer_name: &str, property: &str) -> String {
    format!("class '{}', layer '{}', {}", class, layer_name, property)
}

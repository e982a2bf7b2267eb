//! Style encoding.
//!
//! [`StyleEncoder`] walks the three top-level collections and assembles a
//! single `Style` message (see [`schema`](crate::schema) for the layout):
//!
//! 1. every bucket, in document order, as field 1
//! 2. every structure root, in authored order, as field 2
//! 3. every class, in document order, as field 3
//!
//! The whole blob is built in memory. On error nothing is returned, so a
//! caller never sees truncated output.
//!
//! ## Error policy
//!
//! In [`EncodeMode::Strict`] (the default) any error aborts the conversion.
//! [`EncodeMode::Lenient`] logs and omits three per-field problems instead:
//! invalid colors, layers of unsupported type, and non-numeric opacity.
//! Structural errors abort in both modes.

mod bucket;
mod class;
mod color;
mod property;
mod structure;
mod value;

use crate::error::{Error, Result};
use crate::pbf::PbfWriter;
use crate::schema::tags;
use crate::style::{Bucket, OrderedMap, Style};
use bytes::Bytes;
use tracing::{debug, warn};

pub use bucket::encode_bucket;
pub use color::parse_color;
pub use property::{encode_property, Property};
pub use value::encode_value;

/// How per-field errors are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodeMode {
    /// Every error aborts the conversion
    #[default]
    Strict,
    /// Per-field errors are logged and the field or layer is omitted
    Lenient,
}

/// Configuration for the encoder
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Error policy
    pub mode: EncodeMode,
    /// Require strictly ascending zoom levels in stops properties
    pub validate_stop_order: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            mode: EncodeMode::Strict,
            validate_stop_order: true,
        }
    }
}

impl EncoderConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error policy
    pub fn mode(mut self, mode: EncodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether stop zoom levels must ascend
    pub fn validate_stop_order(mut self, validate: bool) -> Self {
        self.validate_stop_order = validate;
        self
    }
}

/// Counters collected during one encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Buckets written
    pub buckets: usize,
    /// Structure nodes written, at every depth
    pub structure_nodes: usize,
    /// Classes written
    pub classes: usize,
    /// Fill layers written
    pub fill_layers: usize,
    /// Line layers written
    pub line_layers: usize,
    /// Class layers left out (non-drawable, or demoted in lenient mode)
    pub skipped_layers: usize,
    /// Errors demoted to warnings in lenient mode
    pub omitted_fields: usize,
}

/// State threaded through one encoding pass
pub(crate) struct Session<'a> {
    config: &'a EncoderConfig,
    buckets: &'a OrderedMap<Bucket>,
    stats: EncodeStats,
}

impl<'a> Session<'a> {
    fn new(style: &'a Style, config: &'a EncoderConfig) -> Self {
        Self {
            config,
            buckets: &style.buckets,
            stats: EncodeStats::default(),
        }
    }

    fn has_bucket(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// Fails in strict mode; logs and counts the omission in lenient mode.
    ///
    /// Only call this for errors the lenient policy may drop.
    fn demote(&mut self, err: Error) -> Result<()> {
        match self.config.mode {
            EncodeMode::Strict => Err(err),
            EncodeMode::Lenient => {
                warn!("{}; omitting", err);
                self.stats.omitted_fields += 1;
                Ok(())
            }
        }
    }
}

/// Encodes styles into the binary style format
#[derive(Debug, Clone, Default)]
pub struct StyleEncoder {
    config: EncoderConfig,
}

impl StyleEncoder {
    /// Creates a strict encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with custom configuration
    pub fn with_config(config: EncoderConfig) -> Self {
        Self { config }
    }

    /// Returns the encoder's configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encodes a style into a single top-level message
    pub fn encode(&self, style: &Style) -> Result<Bytes> {
        self.encode_with_stats(style).map(|(bytes, _)| bytes)
    }

    /// Encodes a style and reports what was written
    pub fn encode_with_stats(&self, style: &Style) -> Result<(Bytes, EncodeStats)> {
        let mut session = Session::new(style, &self.config);
        let mut pbf = PbfWriter::new();

        for (name, bucket) in style.buckets.iter() {
            let encoded = encode_bucket(name, bucket)?;
            pbf.write_message(tags::style::BUCKET, &encoded);
            session.stats.buckets += 1;
        }

        for root in &style.structure {
            let encoded = structure::encode_structure(root, &mut session);
            pbf.write_message(tags::style::STRUCTURE, &encoded);
        }

        for class in &style.classes {
            let encoded = class::encode_class(class, &mut session)?;
            pbf.write_message(tags::style::CLASS, &encoded);
            session.stats.classes += 1;
        }

        let stats = session.stats;
        debug!(
            "Encoded {} buckets, {} structure nodes, {} classes ({} bytes)",
            stats.buckets,
            stats.structure_nodes,
            stats.classes,
            pbf.len()
        );
        if stats.omitted_fields > 0 {
            warn!("{} invalid entries omitted", stats.omitted_fields);
        }

        Ok((pbf.finish(), stats))
    }
}

/// Encodes a style with the default strict configuration
pub fn encode_style(style: &Style) -> Result<Bytes> {
    StyleEncoder::new().encode(style)
}

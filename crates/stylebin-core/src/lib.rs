//! # stylebin-core
//!
//! A library for encoding declarative map styles into the compact binary
//! style format consumed by the renderer.
//!
//! A style has three parts:
//! - render buckets binding source layers to a render type
//! - a structure tree fixing draw order
//! - classes of per-layer paint overrides
//!
//! ## Architecture
//!
//! - [`style`]: Typed in-memory style model and JSON loading
//! - [`encode`]: Bucket, structure and class encoders plus the orchestrator
//! - [`pbf`]: Protobuf field writer and a field-level reader for inspection
//! - [`schema`]: Tag numbers, enum tables and `prost` messages for the wire layout
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use stylebin_core::{EncoderConfig, EncodeMode, Style, StyleEncoder};
//!
//! let style = Style::from_file("style.json")?;
//!
//! let encoder = StyleEncoder::with_config(EncoderConfig::new().mode(EncodeMode::Strict));
//! let blob = encoder.encode(&style)?;
//! std::fs::write("style.pbf", &blob)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod encode;
pub mod error;
pub mod pbf;
pub mod schema;
pub mod style;

// Re-export primary types for convenience
pub use encode::{encode_style, parse_color, EncodeMode, EncodeStats, EncoderConfig, StyleEncoder};
pub use error::{Error, Result};
pub use pbf::PbfWriter;
pub use style::{Bucket, ClassDef, LayerStyle, Literal, OneOrMany, StructureNode, Style, Width};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

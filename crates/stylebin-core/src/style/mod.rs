//! In-memory style model.
//!
//! A [`Style`] holds three collections:
//!
//! - `buckets`: named source bindings, keyed by bucket name
//! - `structure`: the ordered layer tree that fixes draw order
//! - `classes`: named sets of per-layer paint overrides
//!
//! Enumerated names (bucket type, cap, join, layer type) are kept as raw
//! strings here. They are resolved against closed tables when encoding so a
//! typo surfaces as a typed error naming the offending entity.

mod literal;
mod ordered;

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

pub use literal::{Literal, OneOrMany, Stop, Width, WidthTerm};
pub use ordered::OrderedMap;

/// Root style document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Style {
    /// Buckets in document order
    #[serde(default)]
    pub buckets: OrderedMap<Bucket>,
    /// Root nodes of the structure tree
    #[serde(default)]
    pub structure: Vec<StructureNode>,
    /// Class definitions
    #[serde(default)]
    pub classes: Vec<ClassDef>,
}

impl Style {
    /// Creates an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a style from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a style from a JSON reader
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads and parses a style file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
        Ok(serde_json::from_slice(&data)?)
    }

    /// Adds a bucket
    pub fn bucket(mut self, name: impl Into<String>, bucket: Bucket) -> Self {
        self.buckets.insert(name, bucket);
        self
    }

    /// Appends a structure root
    pub fn root(mut self, node: StructureNode) -> Self {
        self.structure.push(node);
        self
    }

    /// Appends a class
    pub fn class(mut self, class: ClassDef) -> Self {
        self.classes.push(class);
        self
    }
}

/// A named binding of a data source layer to a render type
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bucket {
    /// Render type name: `fill`, `line` or `point`
    #[serde(rename = "type")]
    pub kind: String,
    /// Source name
    pub datasource: String,
    /// Layer inside the source
    pub layer: String,
    /// Feature attribute to filter on
    #[serde(default)]
    pub field: Option<String>,
    /// Accepted attribute values; only read when `field` is set
    #[serde(default)]
    pub value: Option<OneOrMany<Literal>>,
    /// Line cap name
    #[serde(default)]
    pub cap: Option<String>,
    /// Line join name
    #[serde(default)]
    pub join: Option<String>,
}

impl Bucket {
    /// Creates a bucket without filter or line options
    pub fn new(kind: impl Into<String>, datasource: impl Into<String>, layer: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            datasource: datasource.into(),
            layer: layer.into(),
            field: None,
            value: None,
            cap: None,
            join: None,
        }
    }

    /// Filters on `field` matching any of `values`
    pub fn filter(mut self, field: impl Into<String>, values: impl Into<OneOrMany<Literal>>) -> Self {
        self.field = Some(field.into());
        self.value = Some(values.into());
        self
    }

    /// Sets the line cap
    pub fn cap(mut self, cap: impl Into<String>) -> Self {
        self.cap = Some(cap.into());
        self
    }

    /// Sets the line join
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.join = Some(join.into());
        self
    }
}

/// Node of the structure tree
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawStructureNode")]
pub struct StructureNode {
    /// Node name
    pub name: String,
    /// Leaf reference, child list, or nothing
    pub content: StructureContent,
}

/// What a structure node carries besides its name
#[derive(Debug, Clone, PartialEq)]
pub enum StructureContent {
    /// Leaf referencing a bucket by name
    Bucket(String),
    /// Group of child nodes, in draw order
    Layers(Vec<StructureNode>),
    /// Degenerate node with only a name
    Empty,
}

impl StructureNode {
    /// Creates a leaf node
    pub fn leaf(name: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: StructureContent::Bucket(bucket.into()),
        }
    }

    /// Creates a group node
    pub fn group(name: impl Into<String>, layers: Vec<StructureNode>) -> Self {
        Self {
            name: name.into(),
            content: StructureContent::Layers(layers),
        }
    }

    /// Creates a node with neither bucket nor children
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: StructureContent::Empty,
        }
    }
}

#[derive(Deserialize)]
struct RawStructureNode {
    name: String,
    #[serde(default)]
    bucket: Option<String>,
    #[serde(default)]
    layers: Option<Vec<StructureNode>>,
}

impl TryFrom<RawStructureNode> for StructureNode {
    type Error = String;

    fn try_from(raw: RawStructureNode) -> std::result::Result<Self, Self::Error> {
        let content = match (raw.bucket, raw.layers) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "structure node '{}' has both 'bucket' and 'layers'",
                    raw.name
                ))
            }
            (Some(bucket), None) => StructureContent::Bucket(bucket),
            (None, Some(layers)) => StructureContent::Layers(layers),
            (None, None) => StructureContent::Empty,
        };
        Ok(Self {
            name: raw.name,
            content,
        })
    }
}

/// A named set of per-layer overrides
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassDef {
    /// Class name
    pub name: String,
    /// Layer styles keyed by layer name, in document order
    #[serde(default)]
    pub layers: OrderedMap<LayerStyle>,
}

impl ClassDef {
    /// Creates a class with no layers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: OrderedMap::new(),
        }
    }

    /// Adds a layer style
    pub fn layer(mut self, name: impl Into<String>, style: LayerStyle) -> Self {
        self.layers.insert(name, style);
        self
    }
}

/// Paint overrides for one layer.
///
/// Fill layers read `antialias`, `color` and `opacity`; line layers read
/// `color` and `width`. A paint key set to `null` is present, not absent:
/// it reaches the encoder as [`Literal::Null`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayerStyle {
    /// Layer type name
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Fill antialiasing flag
    #[serde(default, deserialize_with = "present")]
    pub antialias: Option<Literal>,
    /// `#RRGGBB` color; any other literal is rejected when encoding
    #[serde(default, deserialize_with = "present")]
    pub color: Option<Literal>,
    /// Fill opacity
    #[serde(default, deserialize_with = "present")]
    pub opacity: Option<Literal>,
    /// Line width
    #[serde(default, deserialize_with = "present")]
    pub width: Option<Width>,
}

/// Maps any key that appears, `null` included, to `Some`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl LayerStyle {
    /// Creates an empty style of the given type
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Creates an empty fill style
    pub fn fill() -> Self {
        Self::of_kind("fill")
    }

    /// Creates an empty line style
    pub fn line() -> Self {
        Self::of_kind("line")
    }

    /// Sets the antialias flag
    pub fn antialias(mut self, antialias: bool) -> Self {
        self.antialias = Some(Literal::Bool(antialias));
        self
    }

    /// Sets the color
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(Literal::String(color.into()));
        self
    }

    /// Sets the opacity
    pub fn opacity(mut self, opacity: impl Into<Literal>) -> Self {
        self.opacity = Some(opacity.into());
        self
    }

    /// Sets the width
    pub fn width(mut self, width: impl Into<Width>) -> Self {
        self.width = Some(width.into());
        self
    }
}

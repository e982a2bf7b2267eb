//! Wire contract of the encoded style.
//!
//! The encoder writes fields by hand through [`PbfWriter`](crate::pbf::PbfWriter);
//! the tag numbers it uses live in [`tags`]. The `prost` messages below
//! describe the same layout so the blob can be decoded by any protobuf
//! implementation:
//!
//! ```text
//! message Style {
//!   repeated Bucket    bucket    = 1;
//!   repeated Structure structure = 2;
//!   repeated Class     class     = 3;
//! }
//! message Bucket {
//!   string         name         = 1;
//!   BucketType     type         = 2;  // fill=1 line=2 point=3
//!   string         source_name  = 3;
//!   string         source_layer = 4;
//!   optional string source_field = 5;
//!   repeated Value source_value = 6;
//!   optional CapType  cap       = 7;  // round=1
//!   optional JoinType join      = 8;  // butt=1 bevel=2
//! }
//! message Value     { optional string string_value = 1; optional bool bool_value = 7; }
//! message Structure { string name = 1; optional string bucket_name = 2; repeated Structure child_layer = 3; }
//! message Property  { PropertyFunction function = 1; repeated float value = 2 [packed = true]; }
//! message FillClass { string layer_name = 1; Property antialias = 4; optional uint32 fill_color = 5; Property opacity = 7; }
//! message LineClass { string layer_name = 1; optional uint32 color = 3; Property width = 4; }
//! message Class     { string name = 1; repeated FillClass fill = 2; repeated LineClass line = 3; }
//! ```
//!
//! Colors are `0xRRGGBBAA` with alpha always `0xFF`. Stops properties carry
//! `[z0, v0, z1, v1, ...]` in their value array.

/// Field numbers, grouped by message
pub mod tags {
    /// Top-level style message
    pub mod style {
        /// Repeated bucket
        pub const BUCKET: u32 = 1;
        /// Repeated structure root
        pub const STRUCTURE: u32 = 2;
        /// Repeated class
        pub const CLASS: u32 = 3;
    }

    /// Bucket message
    pub mod bucket {
        /// Bucket name
        pub const NAME: u32 = 1;
        /// Bucket type
        pub const TYPE: u32 = 2;
        /// Source name
        pub const SOURCE_NAME: u32 = 3;
        /// Source layer
        pub const SOURCE_LAYER: u32 = 4;
        /// Filter field
        pub const SOURCE_FIELD: u32 = 5;
        /// Repeated filter value
        pub const SOURCE_VALUE: u32 = 6;
        /// Line cap
        pub const CAP: u32 = 7;
        /// Line join
        pub const JOIN: u32 = 8;
    }

    /// Value message
    pub mod value {
        /// String literal
        pub const STRING: u32 = 1;
        /// Boolean literal
        pub const BOOL: u32 = 7;
    }

    /// Structure message
    pub mod structure {
        /// Node name
        pub const NAME: u32 = 1;
        /// Referenced bucket
        pub const BUCKET_NAME: u32 = 2;
        /// Repeated child node
        pub const CHILD_LAYER: u32 = 3;
    }

    /// Property message
    pub mod property {
        /// Function discriminant
        pub const FUNCTION: u32 = 1;
        /// Packed float values
        pub const VALUE: u32 = 2;
    }

    /// Class message
    pub mod class {
        /// Class name
        pub const NAME: u32 = 1;
        /// Repeated fill layer
        pub const FILL: u32 = 2;
        /// Repeated line layer
        pub const LINE: u32 = 3;
    }

    /// FillClass message
    pub mod fill {
        /// Layer name
        pub const LAYER_NAME: u32 = 1;
        /// Antialias property
        pub const ANTIALIAS: u32 = 4;
        /// Packed RGBA color
        pub const FILL_COLOR: u32 = 5;
        /// Opacity property
        pub const OPACITY: u32 = 7;
    }

    /// LineClass message
    pub mod line {
        /// Layer name
        pub const LAYER_NAME: u32 = 1;
        /// Packed RGBA color
        pub const COLOR: u32 = 3;
        /// Width property
        pub const WIDTH: u32 = 4;
    }
}

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal => $text:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Looks up a variant by its style-document name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Style-document name of this variant
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Value written on the wire
            pub fn wire_value(self) -> u32 {
                self as u32
            }
        }
    };
}

wire_enum! {
    /// Render type of a bucket
    BucketType {
        /// Polygon fill
        Fill = 1 => "fill",
        /// Stroked line
        Line = 2 => "line",
        /// Point
        Point = 3 => "point",
    }
}

wire_enum! {
    /// Line cap of a bucket
    CapType {
        /// Rounded ends
        Round = 1 => "round",
    }
}

wire_enum! {
    /// Line join of a bucket
    JoinType {
        /// Flat join
        Butt = 1 => "butt",
        /// Beveled join
        Bevel = 2 => "bevel",
    }
}

wire_enum! {
    /// How a property's value array is interpreted
    PropertyFunction {
        /// No value
        Null = 1 => "null",
        /// A single value
        Constant = 2 => "constant",
        /// Zoom/value breakpoints
        Stops = 3 => "stops",
    }
}

/// Top-level message
#[derive(Clone, PartialEq, prost::Message)]
pub struct StyleMessage {
    /// Buckets in document order
    #[prost(message, repeated, tag = "1")]
    pub bucket: Vec<BucketMessage>,
    /// Structure roots in draw order
    #[prost(message, repeated, tag = "2")]
    pub structure: Vec<StructureMessage>,
    /// Classes in document order
    #[prost(message, repeated, tag = "3")]
    pub class: Vec<ClassMessage>,
}

/// Bucket message
#[derive(Clone, PartialEq, prost::Message)]
pub struct BucketMessage {
    /// Bucket name
    #[prost(string, tag = "1")]
    pub name: String,
    /// [`BucketType`] wire value
    #[prost(uint32, tag = "2")]
    pub kind: u32,
    /// Source name
    #[prost(string, tag = "3")]
    pub source_name: String,
    /// Source layer
    #[prost(string, tag = "4")]
    pub source_layer: String,
    /// Filter field
    #[prost(string, optional, tag = "5")]
    pub source_field: Option<String>,
    /// Accepted filter values
    #[prost(message, repeated, tag = "6")]
    pub source_value: Vec<ValueMessage>,
    /// [`CapType`] wire value
    #[prost(uint32, optional, tag = "7")]
    pub cap: Option<u32>,
    /// [`JoinType`] wire value
    #[prost(uint32, optional, tag = "8")]
    pub join: Option<u32>,
}

/// Literal value message
#[derive(Clone, PartialEq, prost::Message)]
pub struct ValueMessage {
    /// String literal
    #[prost(string, optional, tag = "1")]
    pub string_value: Option<String>,
    /// Boolean literal
    #[prost(bool, optional, tag = "7")]
    pub bool_value: Option<bool>,
}

/// Structure node message
#[derive(Clone, PartialEq, prost::Message)]
pub struct StructureMessage {
    /// Node name
    #[prost(string, tag = "1")]
    pub name: String,
    /// Referenced bucket, for leaves
    #[prost(string, optional, tag = "2")]
    pub bucket_name: Option<String>,
    /// Children, for groups
    #[prost(message, repeated, tag = "3")]
    pub child_layer: Vec<StructureMessage>,
}

/// Property message
#[derive(Clone, PartialEq, prost::Message)]
pub struct PropertyMessage {
    /// [`PropertyFunction`] wire value
    #[prost(uint32, tag = "1")]
    pub function: u32,
    /// Constant value or flattened stops
    #[prost(float, repeated, tag = "2")]
    pub value: Vec<f32>,
}

/// Class message
#[derive(Clone, PartialEq, prost::Message)]
pub struct ClassMessage {
    /// Class name
    #[prost(string, tag = "1")]
    pub name: String,
    /// Fill layer overrides
    #[prost(message, repeated, tag = "2")]
    pub fill: Vec<FillClassMessage>,
    /// Line layer overrides
    #[prost(message, repeated, tag = "3")]
    pub line: Vec<LineClassMessage>,
}

/// Fill layer override message
#[derive(Clone, PartialEq, prost::Message)]
pub struct FillClassMessage {
    /// Layer name
    #[prost(string, tag = "1")]
    pub layer_name: String,
    /// Antialias flag as a constant property
    #[prost(message, optional, tag = "4")]
    pub antialias: Option<PropertyMessage>,
    /// Packed RGBA color
    #[prost(uint32, optional, tag = "5")]
    pub fill_color: Option<u32>,
    /// Opacity as a constant property
    #[prost(message, optional, tag = "7")]
    pub opacity: Option<PropertyMessage>,
}

/// Line layer override message
#[derive(Clone, PartialEq, prost::Message)]
pub struct LineClassMessage {
    /// Layer name
    #[prost(string, tag = "1")]
    pub layer_name: String,
    /// Packed RGBA color
    #[prost(uint32, optional, tag = "3")]
    pub color: Option<u32>,
    /// Width property
    #[prost(message, optional, tag = "4")]
    pub width: Option<PropertyMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_tables() {
        assert_eq!(BucketType::from_name("fill").map(BucketType::wire_value), Some(1));
        assert_eq!(BucketType::from_name("line").map(BucketType::wire_value), Some(2));
        assert_eq!(BucketType::from_name("point").map(BucketType::wire_value), Some(3));
        assert_eq!(BucketType::from_name("Fill"), None);

        assert_eq!(CapType::from_name("round"), Some(CapType::Round));
        assert_eq!(JoinType::from_name("bevel").map(JoinType::wire_value), Some(2));
        assert_eq!(JoinType::from_name("miter"), None);

        assert_eq!(PropertyFunction::Stops.as_str(), "stops");
        assert_eq!(PropertyFunction::from_name("null"), Some(PropertyFunction::Null));
    }
}

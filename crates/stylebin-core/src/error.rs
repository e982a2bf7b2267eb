//! Error types for the stylebin-core library.
//!
//! Every error here describes bad input shape. None of them are transient,
//! so nothing is retried: an error aborts the encode of the current
//! top-level item and, in strict mode, the whole conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stylebin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all stylebin operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A bucket filter value is neither a string nor a boolean
    #[error("bucket '{bucket}': unsupported value {value} at index {index}")]
    UnsupportedValueKind {
        /// Name of the bucket holding the value
        bucket: String,
        /// Position of the value in the normalized value list
        index: usize,
        /// JSON rendering of the offending value
        value: String,
    },

    /// A property element could not be converted to a number
    #[error("{context}: cannot convert {value} to a number")]
    NumericCoercion {
        /// Where the property lives (class / layer / property)
        context: String,
        /// JSON rendering of the offending value
        value: String,
    },

    /// A stops property is not a well-formed sequence of zoom/value pairs
    #[error("{context}: malformed stops: {details}")]
    MalformedStops {
        /// Where the property lives (class / layer / property)
        context: String,
        /// What is wrong with the stops
        details: String,
    },

    /// A color string does not match `#RRGGBB`
    #[error("{context}: invalid color '{color}', expected #RRGGBB")]
    InvalidColor {
        /// Where the color lives (class / layer)
        context: String,
        /// The offending color string
        color: String,
    },

    /// A fill opacity is not a JSON number
    #[error("{context}: opacity must be a number, got {value}")]
    InvalidOpacity {
        /// Where the opacity lives (class / layer)
        context: String,
        /// JSON rendering of the offending value
        value: String,
    },

    /// A bucket declares a type outside `fill`, `line` and `point`
    #[error("bucket '{bucket}': unknown bucket type '{kind}'")]
    UnknownBucketType {
        /// Name of the bucket
        bucket: String,
        /// The unrecognized type name
        kind: String,
    },

    /// A bucket declares a cap or join name with no wire value
    #[error("bucket '{bucket}': unknown {property} '{name}'")]
    UnknownCapOrJoin {
        /// Name of the bucket
        bucket: String,
        /// Either `cap` or `join`
        property: &'static str,
        /// The unrecognized name
        name: String,
    },

    /// A class layer has a type the class encoder cannot draw
    #[error("class '{class}', layer '{layer}': unsupported layer type '{kind}'")]
    UnsupportedLayerType {
        /// Name of the class
        class: String,
        /// Name of the layer inside the class
        layer: String,
        /// The unsupported type, `<none>` when missing
        kind: String,
    },

    /// A function property names an interpolation kind with no wire value
    #[error("{context}: unknown property function '{name}'")]
    UnknownPropertyFunction {
        /// Where the property lives (class / layer / property)
        context: String,
        /// The unrecognized function name
        name: String,
    },

    /// A property has the wrong arity or element shape for its kind
    #[error("{context}: malformed property: {details}")]
    MalformedProperty {
        /// Where the property lives (class / layer / property)
        context: String,
        /// What is wrong with the property
        details: String,
    },

    /// Malformed protobuf wire data handed to the field reader
    #[error("invalid protobuf wire format at offset {offset}: {details}")]
    InvalidWireFormat {
        /// Byte offset where the error occurred
        offset: usize,
        /// Detailed description of the issue
        details: String,
    },

    /// Failed to read the style document
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The style document is not valid JSON for the style model
    #[error("failed to parse style document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new unsupported value error
    pub fn unsupported_value(bucket: impl Into<String>, index: usize, value: impl Into<String>) -> Self {
        Self::UnsupportedValueKind {
            bucket: bucket.into(),
            index,
            value: value.into(),
        }
    }

    /// Creates a new numeric coercion error
    pub fn numeric_coercion(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NumericCoercion {
            context: context.into(),
            value: value.into(),
        }
    }

    /// Creates a new malformed stops error
    pub fn malformed_stops(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedStops {
            context: context.into(),
            details: details.into(),
        }
    }

    /// Creates a new invalid color error
    pub fn invalid_color(context: impl Into<String>, color: impl Into<String>) -> Self {
        Self::InvalidColor {
            context: context.into(),
            color: color.into(),
        }
    }

    /// Creates a new invalid opacity error
    pub fn invalid_opacity(context: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidOpacity {
            context: context.into(),
            value: value.into(),
        }
    }

    /// Creates a new unknown bucket type error
    pub fn unknown_bucket_type(bucket: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnknownBucketType {
            bucket: bucket.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new unknown cap/join error
    pub fn unknown_cap_or_join(
        bucket: impl Into<String>,
        property: &'static str,
        name: impl Into<String>,
    ) -> Self {
        Self::UnknownCapOrJoin {
            bucket: bucket.into(),
            property,
            name: name.into(),
        }
    }

    /// Creates a new unsupported layer type error
    pub fn unsupported_layer_type(
        class: impl Into<String>,
        layer: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::UnsupportedLayerType {
            class: class.into(),
            layer: layer.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new unknown property function error
    pub fn unknown_property_function(context: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownPropertyFunction {
            context: context.into(),
            name: name.into(),
        }
    }

    /// Creates a new malformed property error
    pub fn malformed_property(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::MalformedProperty {
            context: context.into(),
            details: details.into(),
        }
    }

    /// Creates a new wire format error
    pub fn invalid_wire_format(offset: usize, details: impl Into<String>) -> Self {
        Self::InvalidWireFormat {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Returns true if lenient mode may log this error and omit the field
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidColor { .. }
                | Self::InvalidOpacity { .. }
                | Self::UnsupportedLayerType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unknown_bucket_type("water", "polygon");
        assert!(err.to_string().contains("water"));
        assert!(err.to_string().contains("polygon"));

        let err = Error::unsupported_value("roads", 1, "5");
        assert_eq!(
            err.to_string(),
            "bucket 'roads': unsupported value 5 at index 1"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::invalid_color("class 'night'", "red").is_recoverable());
        assert!(Error::unsupported_layer_type("night", "poi", "symbol").is_recoverable());
        assert!(Error::invalid_opacity("class 'night', layer 'water'", "\"half\"").is_recoverable());
        assert!(!Error::numeric_coercion("width", "\"wide\"").is_recoverable());
        assert!(!Error::malformed_stops("width", "odd length").is_recoverable());
        assert!(!Error::unknown_bucket_type("b", "x").is_recoverable());
    }
}

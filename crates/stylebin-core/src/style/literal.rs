//! Dynamically-shaped style values.
//!
//! Style documents mix scalars, arrays and small objects freely. These
//! types close that set so the encoder can match on it exhaustively.

use serde::Deserialize;
use std::fmt;

/// A single literal from a style document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// Any JSON number
    Number(f64),
    /// A string
    String(String),
    /// JSON `null`
    Null,
    /// Arrays and objects, kept only so they can be reported
    Compound(serde_json::Value),
}

impl Literal {
    /// Numeric conversion: booleans map to 1/0, numeric strings are parsed.
    ///
    /// Returns `None` for anything without a finite numeric reading.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            Literal::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Literal::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Some(0.0);
                }
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
            Literal::Null => Some(0.0),
            Literal::Compound(_) => None,
        }
    }

    /// Returns the string if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Null => f.write_str("null"),
            Literal::Compound(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

/// Either a single item or a list of items, normalized with [`OneOrMany::into_vec`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A list, kept in document order
    Many(Vec<T>),
    /// A lone scalar
    One(T),
}

impl<T> OneOrMany<T> {
    /// Normalize to a list
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }

    /// Iterate over the items in order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::Many(items) => items.iter(),
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(items: Vec<T>) -> Self {
        OneOrMany::Many(items)
    }
}

/// One `{z, val}` breakpoint of a stops function.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    /// Zoom level
    pub z: Literal,
    /// Value at that zoom
    pub val: Literal,
}

impl Stop {
    /// Creates a numeric breakpoint
    pub fn new(z: f64, val: f64) -> Self {
        Self {
            z: Literal::Number(z),
            val: Literal::Number(val),
        }
    }
}

/// An element following the function name in a width array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WidthTerm {
    /// A `{z, val}` breakpoint
    Stop(Stop),
    /// A raw value
    Literal(Literal),
}

/// A line width: either a scalar or `[function, term, term, ...]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Width {
    /// Function form; the first element names the function
    Function(Vec<WidthTerm>),
    /// Scalar form, encoded as a constant
    Constant(Literal),
}

impl Width {
    /// Builds a `["stops", {z, val}, ...]` width
    pub fn stops(stops: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut terms = vec![WidthTerm::Literal(Literal::from("stops"))];
        terms.extend(
            stops
                .into_iter()
                .map(|(z, val)| WidthTerm::Stop(Stop::new(z, val))),
        );
        Width::Function(terms)
    }
}

impl From<f64> for Width {
    fn from(value: f64) -> Self {
        Width::Constant(Literal::Number(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_from_json() {
        let values: Vec<Literal> = serde_json::from_str(r#"["a", true, 3.5, null, [1], {"k": 1}]"#).unwrap();
        assert_eq!(values[0], Literal::String("a".into()));
        assert_eq!(values[1], Literal::Bool(true));
        assert_eq!(values[2], Literal::Number(3.5));
        assert_eq!(values[3], Literal::Null);
        assert!(matches!(values[4], Literal::Compound(serde_json::Value::Array(_))));
        assert!(matches!(values[5], Literal::Compound(serde_json::Value::Object(_))));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Literal::Bool(true).to_number(), Some(1.0));
        assert_eq!(Literal::Bool(false).to_number(), Some(0.0));
        assert_eq!(Literal::from(" 2.5 ").to_number(), Some(2.5));
        assert_eq!(Literal::from("wide").to_number(), None);
        assert_eq!(Literal::Compound(serde_json::json!([1])).to_number(), None);
        assert_eq!(Literal::Null.to_number(), Some(0.0));
        assert_eq!(Literal::from("").to_number(), Some(0.0));
    }

    #[test]
    fn test_one_or_many() {
        let one: OneOrMany<Literal> = serde_json::from_str(r#""park""#).unwrap();
        assert_eq!(one.into_vec(), vec![Literal::from("park")]);

        let many: OneOrMany<Literal> = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(many.iter().count(), 2);
        assert_eq!(many.into_vec(), vec![Literal::from("a"), Literal::from("b")]);
    }

    #[test]
    fn test_width_forms() {
        let scalar: Width = serde_json::from_str("2").unwrap();
        assert_eq!(scalar, Width::from(2.0));

        let stops: Width =
            serde_json::from_str(r#"["stops", {"z": 0, "val": 1}, {"z": 5, "val": 2}]"#).unwrap();
        assert_eq!(stops, Width::stops([(0.0, 1.0), (5.0, 2.0)]));
    }
}

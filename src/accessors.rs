//! Declarative field accessors over an XML element.
//!
//! Every capability field is declared once as a [`FieldSpec`]: its name, where
//! it lives relative to the `<capability>` element, and how its text is typed.
//! Reads and writes go through [`read_field`] and [`write_field`] so all
//! variants share one set of parsing and formatting rules.

use crate::error::{NodedevError, Result};
use crate::xml::Element;
use serde::Serialize;
use std::fmt;

/// Where a field's value is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// Text content of the element at this path
    Text(&'static str),
    /// Attribute on the element at this path
    Attribute(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Int { radix: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub location: FieldLocation,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn text(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            location: FieldLocation::Text(path),
            kind: FieldKind::Text,
        }
    }

    pub const fn int(name: &'static str, path: &'static str, radix: u32) -> Self {
        Self {
            name,
            location: FieldLocation::Text(path),
            kind: FieldKind::Int { radix },
        }
    }

    pub const fn attribute(name: &'static str, path: &'static str, attr: &'static str) -> Self {
        Self {
            name,
            location: FieldLocation::Attribute(path, attr),
            kind: FieldKind::Text,
        }
    }

    /// Human-readable location used in error messages
    fn describe(&self) -> String {
        match self.location {
            FieldLocation::Text(path) => format!("/capability/{path}"),
            FieldLocation::Attribute(path, attr) => format!("/capability/{path}/@{attr}"),
        }
    }
}

/// A typed value read from, or destined for, a capability field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(u64),
    Text(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Int(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Parse integer text in the given radix. Base 16 tolerates a `0x` prefix,
/// which is how libvirt writes PCI address parts. Signs are rejected.
pub fn parse_int(field: &str, raw: &str, radix: u32) -> Result<u64> {
    let invalid = || NodedevError::InvalidInteger {
        field: field.to_string(),
        value: raw.to_string(),
        radix,
    };
    let trimmed = raw.trim();
    let digits = if radix == 16 {
        trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed)
    } else {
        trimmed
    };
    // from_str_radix accepts a leading '+'
    if digits.starts_with(['+', '-']) {
        return Err(invalid());
    }
    u64::from_str_radix(digits, radix).map_err(|_| invalid())
}

fn format_int(value: u64, radix: u32) -> String {
    if radix == 16 {
        format!("0x{value:x}")
    } else {
        value.to_string()
    }
}

/// Read a declared field from a capability element.
pub fn read_field(capability: &Element, spec: &FieldSpec) -> Result<FieldValue> {
    let raw = match spec.location {
        FieldLocation::Text(path) => capability.find(path).and_then(Element::text),
        FieldLocation::Attribute(path, attr) => {
            capability.find(path).and_then(|e| e.attribute(attr))
        }
    }
    .ok_or_else(|| NodedevError::missing_element(spec.describe()))?;

    match spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Int { radix } => parse_int(spec.name, raw, radix).map(FieldValue::Int),
    }
}

/// Write a declared field, creating any elements on its path.
pub fn write_field(capability: &mut Element, spec: &FieldSpec, value: &FieldValue) -> Result<()> {
    let rendered = match (spec.kind, value) {
        (FieldKind::Text, FieldValue::Text(s)) => s.clone(),
        (FieldKind::Int { radix }, FieldValue::Int(v)) => format_int(*v, radix),
        (FieldKind::Text, FieldValue::Int(_)) => {
            return Err(NodedevError::FieldKindMismatch {
                field: spec.name.to_string(),
                expected: "text",
            })
        }
        (FieldKind::Int { .. }, FieldValue::Text(_)) => {
            return Err(NodedevError::FieldKindMismatch {
                field: spec.name.to_string(),
                expected: "integer",
            })
        }
    };

    match spec.location {
        FieldLocation::Text(path) => capability.ensure(path).set_text(rendered),
        FieldLocation::Attribute(path, attr) => capability.ensure(path).set_attribute(attr, &rendered),
    }
    Ok(())
}

#[cfg(test)]
#[path = "accessors_test.rs"]
mod tests;

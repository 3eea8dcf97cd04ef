//! Generic property introspection for editor tooling.
//!
//! Components describe their field set as a [`PropertyGroup`] so external
//! tools — editors, scripting bridges — can present and edit component
//! data without knowing concrete Rust types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single introspected value.
///
/// The variant set is closed on purpose: tooling switches over these
/// variants instead of handling arbitrary types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A text value.
    Text(String),
    /// A 2-component vector.
    Vec2([f32; 2]),
    /// A 3-component vector.
    Vec3([f32; 3]),
    /// A 4-component vector (also used for RGBA colors).
    Vec4([f32; 4]),
    /// A rotation quaternion, `[x, y, z, w]`.
    Quat([f32; 4]),
    /// An ordered list of values.
    List(Vec<PropertyValue>),
    /// A nested group of named values.
    Group(PropertyGroup),
}

/// An ordered name → value map describing a component's fields.
///
/// Iteration order is sorted field-name order, so tooling output is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    entries: BTreeMap<String, PropertyValue>,
}

impl PropertyGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a named property.
    pub fn insert(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.entries.insert(name.into(), value);
    }

    /// Look up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.get(name)
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no properties are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }
}

//! Core [`Component`] trait, type tags, and the erased capability handle.
//!
//! Every typed aspect attached to an entity implements [`Component`]. The
//! trait carries the three contracts the storage layer depends on: a
//! stable type tag, synchronous lifecycle callbacks, and property
//! introspection for generic tooling.
//!
//! ## Type Identity
//!
//! [`ComponentType`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. This is deterministic and
//! language-neutral — scripting bridges and editors can compute the same
//! tag for a given name without touching Rust type machinery.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::property::PropertyGroup;

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
///
/// The tag is deterministic: any implementation that applies FNV-1a to the
/// same UTF-8 name bytes produces the same `ComponentType`, so tags are
/// stable across processes and plugin reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentType(pub u64);

impl ComponentType {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the tag from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the tag for a Rust component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        T::component_type()
    }
}

/// The core component trait.
///
/// A component is one typed aspect of an entity. Implementations must be
/// default-constructible: stores allocate instances through
/// `T::default()`, and editors introspect the default-constructed field
/// set.
///
/// # Examples
///
/// ```rust
/// use stage_entity::{Component, PropertyGroup, PropertyValue};
///
/// #[derive(Debug, Default)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str {
///         "Health"
///     }
///
///     fn properties(&self) -> PropertyGroup {
///         let mut group = PropertyGroup::new();
///         group.insert("current", PropertyValue::Float(f64::from(self.current)));
///         group.insert("max", PropertyValue::Float(f64::from(self.max)));
///         group
///     }
/// }
/// ```
pub trait Component: Default + 'static {
    /// A stable human-readable name for this component type.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentType`] tag for this component.
    ///
    /// The default implementation hashes [`Component::type_name`] with
    /// FNV-1a 64-bit.
    fn component_type() -> ComponentType {
        ComponentType::from_name(Self::type_name())
    }

    /// Called synchronously after this component has been created for
    /// `entity`, before the creating caller can observe or mutate it.
    fn attached(&mut self, entity: Entity) {
        let _ = entity;
    }

    /// Called synchronously before this component is destroyed by an
    /// explicit delete.
    ///
    /// Not called on store teardown; see the store's drop contract.
    fn detached(&mut self, entity: Entity) {
        let _ = entity;
    }

    /// Describe this component's fields for generic tooling.
    ///
    /// Editors call this on a default-constructed instance to discover the
    /// editable field set; components with no editable state return the
    /// empty group.
    fn properties(&self) -> PropertyGroup {
        PropertyGroup::new()
    }
}

/// Type-erased component capability, implemented for every [`Component`].
///
/// Storage stays typed internally; this handle exists only at the access
/// boundary, for callers that work across component types — the entity
/// manager, editors, scripting bridges. Downcast through [`Self::as_any`]
/// to recover the concrete type.
pub trait AnyComponent: Any {
    /// The tag of the concrete component type.
    fn component_type(&self) -> ComponentType;

    /// Property introspection, see [`Component::properties`].
    fn properties(&self) -> PropertyGroup;

    /// Upcast for downcasting to the concrete component type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete component type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyComponent for T {
    fn component_type(&self) -> ComponentType {
        T::component_type()
    }

    fn properties(&self) -> PropertyGroup {
        Component::properties(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::property::PropertyValue;

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Health {
        current: f32,
        max: f32,
    }

    impl Component for Health {
        fn type_name() -> &'static str {
            "Health"
        }

        fn properties(&self) -> PropertyGroup {
            let mut group = PropertyGroup::new();
            group.insert("current", PropertyValue::Float(f64::from(self.current)));
            group.insert("max", PropertyValue::Float(f64::from(self.max)));
            group
        }
    }

    #[test]
    fn test_component_type_is_stable() {
        assert_eq!(<Health as Component>::component_type(), <Health as Component>::component_type());
    }

    #[test]
    fn test_component_type_matches_from_name() {
        assert_eq!(<Health as Component>::component_type(), ComponentType::from_name("Health"));
        assert_eq!(ComponentType::of::<Health>(), <Health as Component>::component_type());
    }

    #[test]
    fn test_component_type_differs_between_names() {
        assert_ne!(
            ComponentType::from_name("Health"),
            ComponentType::from_name("Velocity")
        );
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // FNV-1a 64-bit of the empty string is the offset basis itself.
        assert_eq!(
            ComponentType::from_name(""),
            ComponentType(0xcbf2_9ce4_8422_2325)
        );
    }

    #[test]
    fn test_erased_handle_reports_concrete_tag() {
        let health = Health::default();
        let erased: &dyn AnyComponent = &health;
        assert_eq!(erased.component_type(), <Health as Component>::component_type());
    }

    #[test]
    fn test_erased_handle_downcasts() {
        let mut health = Health {
            current: 50.0,
            max: 100.0,
        };
        let erased: &mut dyn AnyComponent = &mut health;
        let concrete = erased.as_any_mut().downcast_mut::<Health>().unwrap();
        concrete.current = 75.0;
        assert_eq!(health.current, 75.0);
    }

    #[test]
    fn test_erased_properties_match_typed_properties() {
        let health = Health::default();
        let erased: &dyn AnyComponent = &health;
        assert_eq!(erased.properties(), Component::properties(&health));
    }
}

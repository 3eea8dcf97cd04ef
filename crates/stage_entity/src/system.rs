//! The type-erased entity-system capability.

use std::any::Any;

use crate::component::{AnyComponent, ComponentType};
use crate::entity::{EntityId, EntityResolver};
use crate::error::ComponentError;
use crate::property::PropertyGroup;

/// The totality of components of one type, as seen by the entity manager
/// and other polymorphic callers.
///
/// [`ComponentStore`] is the stock implementation; a system with bespoke
/// storage implements this trait directly and registers the same way.
/// Typed access stays on the concrete type — this trait only erases.
///
/// [`ComponentStore`]: crate::store::ComponentStore
pub trait EntitySystem: Any {
    /// The fixed tag of the component type this system manages.
    fn component_type(&self) -> ComponentType;

    /// The human-readable name behind [`EntitySystem::component_type`].
    fn component_type_name(&self) -> &'static str;

    /// Returns `true` if `id` has a component in this system.
    fn has_component(&self, id: EntityId) -> bool;

    /// Type-erased component lookup.
    ///
    /// Reports the same presence/absence as the concrete system's typed
    /// accessor.
    fn component(&self, id: EntityId) -> Option<&dyn AnyComponent>;

    /// Type-erased mutable component lookup.
    fn component_mut(&mut self, id: EntityId) -> Option<&mut dyn AnyComponent>;

    /// Create a component for `id`, resolving the entity through
    /// `entities` for the attach callback.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::AlreadyExists`] if `id` already has a component
    ///   in this system.
    /// - [`ComponentError::UnknownEntity`] if `entities` does not resolve
    ///   `id`.
    /// - [`ComponentError::OutOfMemory`] if allocation fails.
    fn create_component(
        &mut self,
        id: EntityId,
        entities: &dyn EntityResolver,
    ) -> Result<&mut dyn AnyComponent, ComponentError>;

    /// Delete the component for `id`, running its detach callback.
    ///
    /// Returns `false` (and does nothing) if `id` has no component in this
    /// system.
    fn delete_component(&mut self, id: EntityId, entities: &dyn EntityResolver) -> bool;

    /// Ids currently holding a component in this system. Order is not
    /// significant.
    fn entities_in_system(&self) -> Vec<EntityId>;

    /// Current number of stored components.
    fn component_count(&self) -> usize;

    /// Introspect the default-constructed field set of the component type.
    fn component_properties(&self) -> PropertyGroup;

    /// Upcast for downcasting to the concrete system type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete system type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

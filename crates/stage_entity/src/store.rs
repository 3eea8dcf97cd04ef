//! Generic per-type component storage.
//!
//! [`ComponentStore`] is the stock [`EntitySystem`] implementation: an
//! associative map from entity id to an exclusively-owned component,
//! parameterized by an allocation strategy chosen at construction.

use std::any::Any;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::alloc::{ComponentAllocator, HeapAllocator};
use crate::component::{AnyComponent, Component, ComponentType};
use crate::entity::{EntityId, EntityResolver};
use crate::error::ComponentError;
use crate::property::PropertyGroup;
use crate::system::EntitySystem;

/// Storage and lifecycle management for all components of type `T`.
///
/// The backing map exclusively owns every stored component. External
/// references are reborrows: deletion invalidates them, so callers must
/// re-look-up a component rather than cache a reference across mutations.
pub struct ComponentStore<T: Component> {
    components: HashMap<EntityId, Box<T>>,
    allocator: Box<dyn ComponentAllocator<T>>,
}

impl<T: Component> ComponentStore<T> {
    /// Create a store backed by the heap strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_allocator(Box::new(HeapAllocator))
    }

    /// Create a store backed by the given allocation strategy.
    #[must_use]
    pub fn with_allocator(allocator: Box<dyn ComponentAllocator<T>>) -> Self {
        Self {
            components: HashMap::new(),
            allocator,
        }
    }

    /// The fixed tag for `T`.
    #[must_use]
    pub fn component_type(&self) -> ComponentType {
        T::component_type()
    }

    /// Returns `true` if `id` has a component in this store.
    #[must_use]
    pub fn has_component(&self, id: EntityId) -> bool {
        self.components.contains_key(&id)
    }

    /// Typed component lookup.
    #[must_use]
    pub fn component(&self, id: EntityId) -> Option<&T> {
        self.components.get(&id).map(|c| &**c)
    }

    /// Typed mutable component lookup.
    #[must_use]
    pub fn component_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.components.get_mut(&id).map(|c| &mut **c)
    }

    /// Create a component for `id`.
    ///
    /// The instance is default-constructed by the allocation strategy and
    /// receives its [`Component::attached`] callback before this method
    /// returns, so the caller only ever observes an attached component.
    ///
    /// # Errors
    ///
    /// - [`ComponentError::AlreadyExists`] if `id` already has a component
    ///   here; the existing component is untouched.
    /// - [`ComponentError::UnknownEntity`] if `entities` does not resolve
    ///   `id`; nothing is allocated.
    /// - [`ComponentError::OutOfMemory`] if the strategy is exhausted.
    pub fn create_component(
        &mut self,
        id: EntityId,
        entities: &dyn EntityResolver,
    ) -> Result<&mut T, ComponentError> {
        if self.has_component(id) {
            warn!(entity = %id, component = T::type_name(), "component already exists");
            return Err(ComponentError::AlreadyExists(id));
        }
        let Some(entity) = entities.resolve(id) else {
            warn!(entity = %id, component = T::type_name(), "cannot attach component to unknown entity");
            return Err(ComponentError::UnknownEntity(id));
        };

        let mut component = self.allocator.allocate()?;
        component.attached(entity);
        debug!(entity = %id, component = T::type_name(), "component created");

        let slot = self.components.entry(id).or_insert(component);
        Ok(&mut **slot)
    }

    /// Delete the component for `id`, if any.
    ///
    /// Runs the [`Component::detached`] callback, erases the map entry,
    /// then hands the instance back to the allocation strategy. Returns
    /// `false` without side effects if `id` has no component here.
    ///
    /// # Panics
    ///
    /// Panics if the component's entity can no longer be resolved: the
    /// manager must erase an id from every system before releasing it, so
    /// an unresolvable id here is a sequencing-contract violation.
    pub fn delete_component(&mut self, id: EntityId, entities: &dyn EntityResolver) -> bool {
        let Some(mut component) = self.components.remove(&id) else {
            return false;
        };
        let Some(entity) = entities.resolve(id) else {
            panic!("{id} was released while its components still exist");
        };

        component.detached(entity);
        self.allocator.release(component);
        debug!(entity = %id, component = T::type_name(), "component deleted");
        true
    }

    /// Ids currently holding a component in this store. Order is not
    /// significant.
    #[must_use]
    pub fn entities_in_system(&self) -> Vec<EntityId> {
        self.components.keys().copied().collect()
    }

    /// Current number of stored components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns `true` if the store holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over `(id, component)` pairs. Insertion order is not
    /// preserved.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.components.iter().map(|(id, c)| (*id, &**c))
    }

    /// Mutable iteration over `(id, component)` pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.components.iter_mut().map(|(id, c)| (*id, &mut **c))
    }
}

impl<T: Component> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Component> Drop for ComponentStore<T> {
    /// Teardown releases every remaining component through the allocation
    /// strategy in one pass. [`Component::detached`] does not run here —
    /// only explicit deletes announce detachment — but component `Drop`
    /// impls always run.
    fn drop(&mut self) {
        if self.components.is_empty() {
            return;
        }
        debug!(
            component = T::type_name(),
            count = self.components.len(),
            "store teardown"
        );
        let remaining: Vec<Box<T>> = self.components.drain().map(|(_, c)| c).collect();
        self.allocator.release_all(remaining);
    }
}

impl<T: Component> EntitySystem for ComponentStore<T> {
    fn component_type(&self) -> ComponentType {
        T::component_type()
    }

    fn component_type_name(&self) -> &'static str {
        T::type_name()
    }

    fn has_component(&self, id: EntityId) -> bool {
        ComponentStore::has_component(self, id)
    }

    fn component(&self, id: EntityId) -> Option<&dyn AnyComponent> {
        self.components.get(&id).map(|c| &**c as &dyn AnyComponent)
    }

    fn component_mut(&mut self, id: EntityId) -> Option<&mut dyn AnyComponent> {
        self.components
            .get_mut(&id)
            .map(|c| &mut **c as &mut dyn AnyComponent)
    }

    fn create_component(
        &mut self,
        id: EntityId,
        entities: &dyn EntityResolver,
    ) -> Result<&mut dyn AnyComponent, ComponentError> {
        ComponentStore::create_component(self, id, entities).map(|c| c as &mut dyn AnyComponent)
    }

    fn delete_component(&mut self, id: EntityId, entities: &dyn EntityResolver) -> bool {
        ComponentStore::delete_component(self, id, entities)
    }

    fn entities_in_system(&self) -> Vec<EntityId> {
        ComponentStore::entities_in_system(self)
    }

    fn component_count(&self) -> usize {
        self.components.len()
    }

    fn component_properties(&self) -> PropertyGroup {
        Component::properties(&T::default())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

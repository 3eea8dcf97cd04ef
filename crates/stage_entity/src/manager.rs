//! The per-application entity and system registry.
//!
//! [`EntityManager`] owns every registered [`EntitySystem`], the set of
//! live entity ids, and the scene-membership subset. It is created and
//! torn down by the top-level driver — there is no global instance — and
//! all cross-system operations flow through it so that id liveness is
//! checked in one place.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::component::{Component, ComponentType};
use crate::entity::{Entity, EntityId, EntityResolver, IdAllocator};
use crate::error::ComponentError;
use crate::events::EntityEvent;
use crate::store::ComponentStore;
use crate::system::EntitySystem;

/// Entity liveness, scene membership, and id allocation.
///
/// Kept separate from the system registry so the manager can lend it to a
/// mutably-borrowed system as an [`EntityResolver`].
#[derive(Debug, Default)]
pub struct EntityDirectory {
    allocator: IdAllocator,
    live: HashSet<EntityId>,
    scene: HashSet<EntityId>,
}

impl EntityDirectory {
    fn create(&mut self) -> Entity {
        let id = self.allocator.allocate();
        self.live.insert(id);
        Entity::from_id(id)
    }

    fn release(&mut self, id: EntityId) {
        self.live.remove(&id);
        self.scene.remove(&id);
        self.allocator.release(id);
    }

    /// Returns `true` if the id is currently live.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }
}

impl EntityResolver for EntityDirectory {
    fn resolve(&self, id: EntityId) -> Option<Entity> {
        self.live.contains(&id).then(|| Entity::from_id(id))
    }
}

/// Process-wide registry owning all entity systems and live entity ids.
///
/// Exactly one system is registered per component-type tag; tag lookups
/// are map-backed since they happen on every component create/access.
pub struct EntityManager {
    directory: EntityDirectory,
    systems: HashMap<ComponentType, Box<dyn EntitySystem>>,
    events: VecDeque<EntityEvent>,
}

impl EntityManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            directory: EntityDirectory::default(),
            systems: HashMap::new(),
            events: VecDeque::new(),
        }
    }

    // -- Entity lifecycle --

    /// Create a new live entity.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.directory.create();
        debug!(entity = %entity.id(), "entity created");
        entity
    }

    /// Resolve `id` to a live entity.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<Entity> {
        self.directory.resolve(id)
    }

    /// Returns `true` if `id` is live.
    #[must_use]
    pub fn is_live(&self, id: EntityId) -> bool {
        self.directory.is_live(id)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.directory.live.len()
    }

    /// Destroy an entity: drop it from the scene, erase its components
    /// from every system, then release the id for reuse.
    ///
    /// Returns `false` if `id` was not live.
    pub fn destroy_entity(&mut self, id: EntityId) -> bool {
        if !self.directory.is_live(id) {
            return false;
        }
        self.remove_from_scene(id);

        // Components must be gone before the id is released; stores assert
        // on this ordering.
        let Self {
            directory, systems, ..
        } = self;
        for system in systems.values_mut() {
            system.delete_component(id, &*directory);
        }

        self.directory.release(id);
        debug!(entity = %id, "entity destroyed");
        true
    }

    // -- Scene membership --

    /// Add a live entity to the scene.
    ///
    /// Idempotent: queues [`EntityEvent::AddedToScene`] only on the first
    /// transition.
    ///
    /// # Errors
    ///
    /// [`ComponentError::UnknownEntity`] if `id` is not live.
    pub fn add_to_scene(&mut self, id: EntityId) -> Result<(), ComponentError> {
        if !self.directory.is_live(id) {
            return Err(ComponentError::UnknownEntity(id));
        }
        if self.directory.scene.insert(id) {
            self.events.push_back(EntityEvent::AddedToScene(id));
        }
        Ok(())
    }

    /// Remove an entity from the scene.
    ///
    /// Returns `false` if it was not in the scene; queues
    /// [`EntityEvent::RemovedFromScene`] otherwise.
    pub fn remove_from_scene(&mut self, id: EntityId) -> bool {
        if self.directory.scene.remove(&id) {
            self.events.push_back(EntityEvent::RemovedFromScene(id));
            true
        } else {
            false
        }
    }

    /// Returns `true` if the entity is in the scene.
    #[must_use]
    pub fn is_in_scene(&self, id: EntityId) -> bool {
        self.directory.scene.contains(&id)
    }

    /// Ids currently in the scene. Order is not significant.
    #[must_use]
    pub fn entities_in_scene(&self) -> Vec<EntityId> {
        self.directory.scene.iter().copied().collect()
    }

    // -- System registry --

    /// Register a system under its component-type tag.
    ///
    /// Exactly one system per tag: returns `false` and keeps the existing
    /// system if the tag is already taken.
    pub fn add_system(&mut self, system: Box<dyn EntitySystem>) -> bool {
        let ty = system.component_type();
        if self.systems.contains_key(&ty) {
            warn!(
                component = system.component_type_name(),
                "entity system already registered"
            );
            return false;
        }
        info!(
            component = system.component_type_name(),
            "entity system registered"
        );
        self.systems.insert(ty, system);
        self.events.push_back(EntityEvent::SystemAdded(ty));
        true
    }

    /// Deregister and return the system for `ty`.
    ///
    /// Dropping the returned box tears down its remaining components.
    pub fn remove_system(&mut self, ty: ComponentType) -> Option<Box<dyn EntitySystem>> {
        let system = self.systems.remove(&ty)?;
        info!(
            component = system.component_type_name(),
            "entity system removed"
        );
        self.events.push_back(EntityEvent::SystemRemoved(ty));
        Some(system)
    }

    /// Returns `true` if a system is registered for `ty`.
    #[must_use]
    pub fn has_system(&self, ty: ComponentType) -> bool {
        self.systems.contains_key(&ty)
    }

    /// Type-erased system lookup by tag.
    #[must_use]
    pub fn system(&self, ty: ComponentType) -> Option<&dyn EntitySystem> {
        self.systems.get(&ty).map(|s| &**s)
    }

    /// Type-erased mutable system lookup by tag.
    pub fn system_mut(&mut self, ty: ComponentType) -> Option<&mut dyn EntitySystem> {
        self.systems.get_mut(&ty).map(|s| &mut **s)
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// The stock typed store for `T`, if the system registered under `T`'s
    /// tag is a [`ComponentStore`].
    #[must_use]
    pub fn store<T: Component>(&self) -> Option<&ComponentStore<T>> {
        self.system(T::component_type())?.as_any().downcast_ref()
    }

    /// Mutable variant of [`EntityManager::store`].
    pub fn store_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        self.systems
            .get_mut(&T::component_type())?
            .as_any_mut()
            .downcast_mut()
    }

    // -- Mediated component operations --

    /// Create a component of type `T` for `id` through the registered
    /// system.
    ///
    /// # Errors
    ///
    /// [`ComponentError::NoSuchSystem`] if no system carries `T`'s tag,
    /// plus every error [`EntitySystem::create_component`] reports.
    ///
    /// # Panics
    ///
    /// Panics if the system registered under `T`'s tag stores a different
    /// concrete type; that is a registration bug, not a runtime condition.
    pub fn create_component<T: Component>(
        &mut self,
        id: EntityId,
    ) -> Result<&mut T, ComponentError> {
        let Self {
            directory, systems, ..
        } = self;
        let system = systems
            .get_mut(&T::component_type())
            .ok_or_else(|| ComponentError::NoSuchSystem(T::component_type()))?;
        let component = system.create_component(id, &*directory)?;
        match component.as_any_mut().downcast_mut::<T>() {
            Some(component) => Ok(component),
            None => panic!(
                "entity system registered for {} stores a different component type",
                T::type_name()
            ),
        }
    }

    /// Typed component lookup across systems.
    #[must_use]
    pub fn component<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.system(T::component_type())?
            .component(id)?
            .as_any()
            .downcast_ref()
    }

    /// Typed mutable component lookup across systems.
    pub fn component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.system_mut(T::component_type())?
            .component_mut(id)?
            .as_any_mut()
            .downcast_mut()
    }

    /// Returns `true` if `id` has a `T` component.
    #[must_use]
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.system(T::component_type())
            .is_some_and(|system| system.has_component(id))
    }

    /// Delete the `T` component for `id`.
    ///
    /// Returns `false` if there is no such system or no such component.
    pub fn delete_component<T: Component>(&mut self, id: EntityId) -> bool {
        let Self {
            directory, systems, ..
        } = self;
        let Some(system) = systems.get_mut(&T::component_type()) else {
            return false;
        };
        system.delete_component(id, &*directory)
    }

    // -- Facade --

    /// Mutable facade for a live entity.
    #[must_use]
    pub fn entity_mut(&mut self, id: EntityId) -> Option<EntityMut<'_>> {
        let entity = self.directory.resolve(id)?;
        Some(EntityMut {
            entity,
            manager: self,
        })
    }

    // -- Events --

    /// Drain queued lifecycle events in FIFO order.
    ///
    /// The frame driver calls this once per frame and fans the events out
    /// to its handlers.
    pub fn drain_events(&mut self) -> Vec<EntityEvent> {
        self.events.drain(..).collect()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityResolver for EntityManager {
    fn resolve(&self, id: EntityId) -> Option<Entity> {
        self.directory.resolve(id)
    }
}

impl std::fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityManager")
            .field("entities", &self.directory.live.len())
            .field("systems", &self.systems.len())
            .field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

/// A live entity bound to its manager, for convenience component access.
///
/// The facade holds a mutable manager borrow, so it is transient by
/// design: obtain it, mutate through it, and let it go before the next
/// manager call.
pub struct EntityMut<'m> {
    entity: Entity,
    manager: &'m mut EntityManager,
}

impl EntityMut<'_> {
    /// The underlying resolved entity.
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    /// Create a `T` component on this entity.
    ///
    /// # Errors
    ///
    /// See [`EntityManager::create_component`].
    pub fn create<T: Component>(&mut self) -> Result<&mut T, ComponentError> {
        self.manager.create_component::<T>(self.entity.id())
    }

    /// Look up this entity's `T` component.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.manager.component::<T>(self.entity.id())
    }

    /// Mutable lookup of this entity's `T` component.
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.manager.component_mut::<T>(self.entity.id())
    }

    /// Returns `true` if this entity has a `T` component.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.manager.has_component::<T>(self.entity.id())
    }

    /// Delete this entity's `T` component.
    pub fn delete<T: Component>(&mut self) -> bool {
        self.manager.delete_component::<T>(self.entity.id())
    }

    /// Add this entity to the scene.
    pub fn add_to_scene(&mut self) {
        // The facade was resolved from a live id and holds the manager
        // exclusively, so the liveness check cannot fail.
        let _ = self.manager.add_to_scene(self.entity.id());
    }

    /// Remove this entity from the scene.
    pub fn remove_from_scene(&mut self) -> bool {
        self.manager.remove_from_scene(self.entity.id())
    }
}

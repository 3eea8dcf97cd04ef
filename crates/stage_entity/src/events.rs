//! Entity lifecycle events.
//!
//! The manager queues an event for each scene-membership or registry
//! transition; the frame driver drains the queue once per frame and fans
//! the events out to interested handlers. Delivery is deferred on purpose:
//! handlers always observe a consistent post-transition world.

use crate::component::ComponentType;
use crate::entity::EntityId;

/// A deferred notification about an entity or system transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityEvent {
    /// The entity became visible to simulation and rendering.
    AddedToScene(EntityId),
    /// The entity left the scene.
    RemovedFromScene(EntityId),
    /// A system was registered for the component type.
    SystemAdded(ComponentType),
    /// The system for the component type was deregistered.
    SystemRemoved(ComponentType),
}

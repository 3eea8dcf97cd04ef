//! Error types for component storage and manager operations.

use crate::component::ComponentType;
use crate::entity::EntityId;

/// Errors reported by component stores and the entity manager.
///
/// Absence on delete/lookup is not an error: deletes return `bool` and
/// lookups return `Option`, since a missing component is an expected
/// outcome on hot per-frame paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ComponentError {
    /// The entity already has a component of this type in this system.
    #[error("{0} already has a component of this type")]
    AlreadyExists(EntityId),

    /// The entity manager does not recognize the id as live.
    #[error("{0} is not live")]
    UnknownEntity(EntityId),

    /// The allocation strategy is exhausted.
    #[error("component allocator exhausted")]
    OutOfMemory,

    /// No entity system is registered for the component type.
    #[error("no entity system registered for component type {0:?}")]
    NoSuchSystem(ComponentType),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_entity() {
        let err = ComponentError::AlreadyExists(EntityId(7));
        assert_eq!(err.to_string(), "entity 7 already has a component of this type");

        let err = ComponentError::UnknownEntity(EntityId(9));
        assert_eq!(err.to_string(), "entity 9 is not live");
    }

    #[test]
    fn test_errors_are_comparable() {
        assert_eq!(ComponentError::OutOfMemory, ComponentError::OutOfMemory);
        assert_ne!(
            ComponentError::AlreadyExists(EntityId(1)),
            ComponentError::UnknownEntity(EntityId(1))
        );
    }
}

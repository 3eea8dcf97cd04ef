//! Map membership component.
//!
//! [`MapMembership`] records which map an entity belongs to together with
//! its editor-facing name and a stable unique id. The scene persistence
//! layer keys saved entities by that unique id.

use serde::{Deserialize, Serialize};
use stage_entity::{Component, Entity, PropertyGroup, PropertyValue};
use uuid::Uuid;

/// Membership of an entity in a named map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapMembership {
    /// Editor-facing entity name. Not required to be unique.
    pub entity_name: String,
    /// Stable unique id, generated on attach when empty.
    pub unique_id: String,
    /// Name of the map this entity belongs to.
    pub map_name: String,
}

impl MapMembership {
    /// Set the editor-facing entity name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity_name = name.into();
        self
    }

    /// Set the owning map name.
    #[must_use]
    pub fn in_map(mut self, map: impl Into<String>) -> Self {
        self.map_name = map.into();
        self
    }
}

impl Component for MapMembership {
    fn type_name() -> &'static str {
        "MapMembership"
    }

    fn attached(&mut self, entity: Entity) {
        if self.unique_id.is_empty() {
            self.unique_id = Uuid::new_v4().to_string();
        }
        if self.entity_name.is_empty() {
            self.entity_name = entity.id().to_string();
        }
    }

    fn properties(&self) -> PropertyGroup {
        let mut group = PropertyGroup::new();
        group.insert("entity_name", PropertyValue::Text(self.entity_name.clone()));
        group.insert("unique_id", PropertyValue::Text(self.unique_id.clone()));
        group.insert("map_name", PropertyValue::Text(self.map_name.clone()));
        group
    }
}

#[cfg(test)]
mod tests {
    use stage_entity::{ComponentStore, EntityId, EntityResolver};

    use super::*;

    struct AnyEntity;

    impl EntityResolver for AnyEntity {
        fn resolve(&self, id: EntityId) -> Option<Entity> {
            Some(Entity::from_id(id))
        }
    }

    #[test]
    fn test_attach_generates_unique_id_and_name() {
        let mut store: ComponentStore<MapMembership> = ComponentStore::new();
        let membership = store.create_component(EntityId(5), &AnyEntity).unwrap();

        assert!(!membership.unique_id.is_empty());
        assert_eq!(membership.entity_name, "entity 5");
    }

    #[test]
    fn test_attach_preserves_existing_ids() {
        let mut component = MapMembership::default()
            .named("player_spawn")
            .in_map("maps/arena");
        component.unique_id = "fixed".to_string();

        component.attached(Entity::from_id(EntityId(1)));
        assert_eq!(component.unique_id, "fixed");
        assert_eq!(component.entity_name, "player_spawn");
        assert_eq!(component.map_name, "maps/arena");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let mut store: ComponentStore<MapMembership> = ComponentStore::new();
        let a = store
            .create_component(EntityId(1), &AnyEntity)
            .unwrap()
            .unique_id
            .clone();
        let b = store
            .create_component(EntityId(2), &AnyEntity)
            .unwrap()
            .unique_id
            .clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_properties_reflect_fields() {
        let component = MapMembership::default().in_map("maps/camera");
        let props = component.properties();
        assert_eq!(
            props.get("map_name"),
            Some(&PropertyValue::Text("maps/camera".to_string()))
        );
        assert_eq!(props.len(), 3);
    }
}

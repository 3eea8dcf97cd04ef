//! 3D transform component.
//!
//! [`Transform3D`] represents translation, rotation, and scale in 3D
//! space. Nearly every placed entity carries one.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use stage_entity::{Component, PropertyGroup, PropertyValue};

/// Translation, rotation, and per-axis scale in world space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Transform3D {
    /// World-space translation.
    pub translation: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform3D {
    /// The identity transform: origin, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform at the given translation with default
    /// rotation/scale.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Compute the 4×4 model matrix for this transform.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Translate by the given offset.
    #[must_use]
    pub fn translated(mut self, offset: Vec3) -> Self {
        self.translation += offset;
        self
    }

    /// Rotate by the given quaternion.
    #[must_use]
    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation * self.rotation;
        self
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Component for Transform3D {
    fn type_name() -> &'static str {
        "Transform3D"
    }

    fn properties(&self) -> PropertyGroup {
        let mut group = PropertyGroup::new();
        group.insert("translation", PropertyValue::Vec3(self.translation.to_array()));
        group.insert("rotation", PropertyValue::Quat(self.rotation.to_array()));
        group.insert("scale", PropertyValue::Vec3(self.scale.to_array()));
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let t = Transform3D::IDENTITY;
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t, Transform3D::default());
    }

    #[test]
    fn test_matrix_identity() {
        assert_eq!(Transform3D::IDENTITY.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_translated() {
        let t = Transform3D::from_translation(Vec3::new(1.0, 0.0, 0.0))
            .translated(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_properties_reflect_fields() {
        let t = Transform3D::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let props = t.properties();
        assert_eq!(
            props.get("translation"),
            Some(&PropertyValue::Vec3([1.0, 2.0, 3.0]))
        );
        assert_eq!(props.len(), 3);
    }
}

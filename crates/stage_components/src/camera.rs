//! Camera component.

use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};
use stage_entity::{Component, PropertyGroup, PropertyValue};

/// A perspective camera attached to an entity.
///
/// `context_id` ties the camera to a rendering window/context managed by
/// the viewer layer; the core only stores it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Camera {
    /// Rendering context this camera draws into.
    pub context_id: u32,
    /// RGBA clear color.
    pub clear_color: Vec4,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Near clip plane distance.
    pub near_clip: f32,
    /// Far clip plane distance.
    pub far_clip: f32,
}

impl Camera {
    /// Compute the perspective projection matrix for the given aspect
    /// ratio.
    #[must_use]
    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_y.to_radians(),
            aspect,
            self.near_clip,
            self.far_clip,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            context_id: 0,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            fov_y: 45.0,
            near_clip: 0.1,
            far_clip: 10_000.0,
        }
    }
}

impl Component for Camera {
    fn type_name() -> &'static str {
        "Camera"
    }

    fn properties(&self) -> PropertyGroup {
        let mut group = PropertyGroup::new();
        group.insert("context_id", PropertyValue::Int(i64::from(self.context_id)));
        group.insert("clear_color", PropertyValue::Vec4(self.clear_color.to_array()));
        group.insert("fov_y", PropertyValue::Float(f64::from(self.fov_y)));
        group.insert("near_clip", PropertyValue::Float(f64::from(self.near_clip)));
        group.insert("far_clip", PropertyValue::Float(f64::from(self.far_clip)));
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::default();
        assert_eq!(camera.context_id, 0);
        assert_eq!(camera.clear_color, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(camera.near_clip < camera.far_clip);
    }

    #[test]
    fn test_projection_is_finite() {
        let camera = Camera::default();
        let proj = camera.projection(16.0 / 9.0);
        assert!(proj.to_cols_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_properties_reflect_fields() {
        let camera = Camera {
            context_id: 2,
            ..Camera::default()
        };
        let props = camera.properties();
        assert_eq!(props.get("context_id"), Some(&PropertyValue::Int(2)));
        assert_eq!(
            props.get("clear_color"),
            Some(&PropertyValue::Vec4([0.0, 0.0, 0.0, 1.0]))
        );
        assert_eq!(props.len(), 5);
    }
}

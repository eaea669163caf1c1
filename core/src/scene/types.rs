//! Transform types shared by targets, bones, and keyframes.
//!
//! All types use plain arrays (`[f32; 3]`, `[f32; 4]`) so they serialize
//! directly into rig descriptions. Convert with [`NodeTransform::to_matrix`]
//! when a transform has to be applied.

use serde::{Deserialize, Serialize};

use crate::math::{self, Mat4, Vec3};

/// Translation, rotation and scale of a target root, bone or keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeTransform {
    pub translation: [f32; 3],
    /// Unit quaternion, `[x, y, z, w]`.
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl NodeTransform {
    /// The transform that leaves every point where it is.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };

    /// Replace the translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Replace the rotation (`[x, y, z, w]` quaternion).
    #[must_use]
    pub const fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Affine matrix applying scale, then rotation, then translation.
    pub fn to_matrix(&self) -> Mat4 {
        math::mat4_from_scale_rotation_translation(
            Vec3::from(self.scale),
            math::quat_from_array(self.rotation),
            Vec3::from(self.translation),
        )
    }

    /// Returns `true` if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.translation.iter().all(|c| c.is_finite())
            && self.rotation.iter().all(|c| c.is_finite())
            && self.scale.iter().all(|c| c.is_finite())
    }

    /// Apply the transform to a point.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 3] {
        math::transform_point(&self.to_matrix(), p)
    }

    /// Rotate a direction. Scale and translation are ignored.
    pub fn rotate_vector(&self, v: [f32; 3]) -> [f32; 3] {
        let r = math::UnitQuat::from_quaternion(math::quat_from_array(self.rotation));
        let out = r * Vec3::from(v);
        [out.x, out.y, out.z]
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_leaves_points_in_place() {
        let t = NodeTransform::default();
        assert_eq!(t, NodeTransform::IDENTITY);
        assert_eq!(t.transform_point([4.0, -1.0, 0.5]), [4.0, -1.0, 0.5]);
    }

    #[test]
    fn quarter_turn_about_y() {
        let t = NodeTransform::IDENTITY
            .with_rotation(math::quat_array_from_axis_angle([0.0, 1.0, 0.0], FRAC_PI_2))
            .with_scale([3.0, 3.0, 3.0]);
        let n = t.rotate_vector([1.0, 0.0, 0.0]);
        assert!((n[0]).abs() < 1e-6 && (n[2] + 1.0).abs() < 1e-6, "{n:?}");
        let p = t.transform_point([1.0, 0.0, 0.0]);
        assert!((p[2] + 3.0).abs() < 1e-5, "{p:?}");
    }

    #[test]
    fn transform_point_scales_then_translates() {
        let t = NodeTransform::IDENTITY
            .with_translation([0.0, 1.0, 0.0])
            .with_scale([2.0, 2.0, 2.0]);
        assert_eq!(t.transform_point([1.0, 1.0, 1.0]), [2.0, 3.0, 2.0]);
    }

    #[test]
    fn rotate_vector_ignores_translation() {
        let t = NodeTransform::IDENTITY.with_translation([5.0, 5.0, 5.0]);
        assert_eq!(t.rotate_vector([0.0, 0.0, 1.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn non_finite_detected() {
        let t = NodeTransform::IDENTITY.with_scale([f32::NAN, 1.0, 1.0]);
        assert!(!t.is_finite());
        assert!(NodeTransform::IDENTITY.is_finite());
    }

    #[test]
    fn missing_fields_deserialize_to_identity() {
        let t: NodeTransform = serde_json::from_str(r#"{ "translation": [1, 2, 3] }"#).unwrap();
        assert_eq!(t.translation, [1.0, 2.0, 3.0]);
        assert_eq!(t.rotation, NodeTransform::IDENTITY.rotation);
        assert_eq!(t.scale, NodeTransform::IDENTITY.scale);
    }
}

//! Bake-unit planning and coordinate-space conversion.
//!
//! A bake unit is one texture pair: either a single mesh part or, under
//! [`PackStrategy::MergeByMaterial`], every part sharing a material name,
//! concatenated in first-seen order.

use std::ops::Range;
use std::sync::Arc;

use crate::animation::AnimationClip;
use crate::compute::CancellationToken;
use crate::material::CpuMaterial;
use crate::math::{self, Mat4, UnitQuat, Vec3};
use crate::mesh::{FrameSnapshot, MeshPart, PartId};
use crate::naming;
use crate::scene::NodeTransform;
use crate::target::AnimatedTarget;

use super::channel::BakedChannel;
use super::error::BakeError;
use super::sampler::{FrameSampler, validate_clip};
use super::settings::{CoordinateSpace, PackStrategy};

/// Where one mesh part's vertices sit inside its bake unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartSegment {
    pub part: PartId,
    pub name: String,
    /// First texel column of the part.
    pub offset: u32,
    pub vertex_count: u32,
}

impl PartSegment {
    /// Texel columns covered by the part.
    pub fn range(&self) -> Range<u32> {
        self.offset..self.offset + self.vertex_count
    }
}

/// Parts baked together into one position/normal texture pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeUnit {
    /// Unique, file-safe name within the bake.
    pub name: String,
    pub segments: Vec<PartSegment>,
    pub material: Arc<CpuMaterial>,
    /// Sum of the segments' vertex counts.
    pub vertex_count: u32,
}

impl BakeUnit {
    fn single(part: &MeshPart, name: &str) -> Self {
        Self {
            name: name.to_string(),
            segments: vec![PartSegment {
                part: part.id,
                name: part.name.clone(),
                offset: 0,
                vertex_count: part.vertex_count,
            }],
            material: part.material.clone(),
            vertex_count: part.vertex_count,
        }
    }

    fn append(&mut self, part: &MeshPart) {
        self.segments.push(PartSegment {
            part: part.id,
            name: part.name.clone(),
            offset: self.vertex_count,
            vertex_count: part.vertex_count,
        });
        self.vertex_count += part.vertex_count;
    }

    /// Segment of `part`, if this unit covers it.
    pub fn segment(&self, part: PartId) -> Option<&PartSegment> {
        self.segments.iter().find(|s| s.part == part)
    }
}

/// Group `parts` into bake units.
///
/// Unit names are sanitized and made unique. Merged units are named after
/// their material.
pub fn plan_units(parts: &[MeshPart], strategy: PackStrategy) -> Vec<BakeUnit> {
    let mut units: Vec<BakeUnit> = Vec::new();
    let mut merged: Vec<(&str, usize)> = Vec::new();
    for part in parts {
        let merge_key = match strategy {
            PackStrategy::Separate => None,
            PackStrategy::MergeByMaterial => part.material_name(),
        };
        let Some(material) = merge_key else {
            units.push(BakeUnit::single(part, &part.name));
            continue;
        };
        match merged.iter().find(|(name, _)| *name == material) {
            Some(&(_, index)) => units[index].append(part),
            None => {
                merged.push((material, units.len()));
                units.push(BakeUnit::single(part, material));
            }
        }
    }

    let names = naming::unique_names(units.iter().map(|u| u.name.as_str()));
    for (unit, name) in units.iter_mut().zip(names) {
        unit.name = name;
    }
    units
}

/// Cached conversion from world space into the bake's coordinate space.
///
/// Built once per bake unit and dropped when the unit is done.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceTransform {
    inverse: Option<(Mat4, UnitQuat)>,
}

impl SpaceTransform {
    /// Pass-through conversion (world space).
    pub fn identity() -> Self {
        Self { inverse: None }
    }

    /// Conversion for `space` relative to a target whose root sits at `world`.
    pub fn for_target(
        space: CoordinateSpace,
        world: &NodeTransform,
        target: &str,
    ) -> Result<Self, BakeError> {
        match space {
            CoordinateSpace::World => Ok(Self::identity()),
            CoordinateSpace::Local => {
                let degenerate = || BakeError::InvalidTargetTransform {
                    target: target.to_string(),
                };
                let rotation = math::quat_from_array(world.rotation);
                if !world.is_finite() || rotation.norm() <= f32::EPSILON {
                    return Err(degenerate());
                }
                if world.scale.iter().any(|s| s.abs() <= f32::EPSILON) {
                    return Err(degenerate());
                }
                let point = world.to_matrix().try_inverse().ok_or_else(degenerate)?;
                let rotation = UnitQuat::from_quaternion(rotation).inverse();
                Ok(Self {
                    inverse: Some((point, rotation)),
                })
            }
        }
    }

    pub fn is_identity(&self) -> bool {
        self.inverse.is_none()
    }

    /// Convert a snapshot in place.
    pub fn apply(&self, snapshot: &mut FrameSnapshot) {
        let Some((point, rotation)) = &self.inverse else {
            return;
        };
        for p in &mut snapshot.positions {
            *p = math::transform_point(point, *p);
        }
        for n in &mut snapshot.normals {
            let r = rotation * Vec3::from(*n);
            *n = [r.x, r.y, r.z];
        }
    }
}

/// Sample every frame of `unit` into a [`BakedChannel`].
///
/// Holds the whole clip in memory; the baker itself streams rows instead.
pub fn extract_channel<T: AnimatedTarget + ?Sized>(
    target: &mut T,
    clip: &AnimationClip,
    unit: &BakeUnit,
    space: CoordinateSpace,
    cancel: Option<&CancellationToken>,
) -> Result<BakedChannel, BakeError> {
    validate_clip(clip)?;
    let transform = SpaceTransform::for_target(space, &target.world_transform(), target.name())?;
    let mut channel = BakedChannel::with_capacity(&unit.name, unit.vertex_count, clip.frame_count());

    let mut sampler = FrameSampler::new(target, clip, unit)?;
    if let Some(token) = cancel {
        sampler = sampler.with_cancellation(token);
    }
    while let Some(frame) = sampler.next_frame() {
        let (_, snapshot) = frame?;
        transform.apply(snapshot);
        channel.push(snapshot.clone())?;
    }
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(id: u32, name: &str, material: Option<&str>, vertices: u32) -> MeshPart {
        let mut mat = CpuMaterial::new();
        mat.name = material.map(str::to_string);
        MeshPart::new(PartId(id), name, vertices).with_material(Arc::new(mat))
    }

    #[test]
    fn separate_strategy_keeps_one_unit_per_part() {
        let parts = [
            part(0, "body", Some("skin"), 10),
            part(1, "head", Some("skin"), 5),
        ];
        let units = plan_units(&parts, PackStrategy::Separate);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].name, "body");
        assert_eq!(units[1].segments[0].range(), 0..5);
    }

    #[test]
    fn merge_concatenates_parts_sharing_a_material() {
        let parts = [
            part(0, "body", Some("skin"), 10),
            part(1, "hat", Some("cloth"), 4),
            part(2, "head", Some("skin"), 5),
        ];
        let units = plan_units(&parts, PackStrategy::MergeByMaterial);
        assert_eq!(units.len(), 2);
        let skin = &units[0];
        assert_eq!(skin.name, "skin");
        assert_eq!(skin.vertex_count, 15);
        assert_eq!(skin.segment(PartId(2)).unwrap().range(), 10..15);
        assert_eq!(units[1].name, "cloth");
    }

    #[test]
    fn unnamed_materials_are_never_merged() {
        let parts = [part(0, "a", None, 3), part(1, "b", None, 3)];
        let units = plan_units(&parts, PackStrategy::MergeByMaterial);
        assert_eq!(units.len(), 2);
    }

    #[test]
    fn duplicate_part_names_are_disambiguated() {
        let parts = [
            part(0, "Mesh", None, 1),
            part(1, "Mesh", None, 1),
            part(2, "Mesh", None, 1),
        ];
        let names: Vec<_> = plan_units(&parts, PackStrategy::Separate)
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, ["Mesh", "Mesh_1", "Mesh_2"]);
    }

    #[test]
    fn local_space_inverts_world_transform() {
        let world = NodeTransform::IDENTITY
            .with_translation([1.0, 2.0, 3.0])
            .with_rotation(math::quat_array_from_axis_angle(
                [0.0, 1.0, 0.0],
                std::f32::consts::FRAC_PI_2,
            ))
            .with_scale([2.0, 2.0, 2.0]);
        let local = SpaceTransform::for_target(CoordinateSpace::Local, &world, "t").unwrap();

        let mut snapshot = FrameSnapshot::new();
        snapshot.push(
            world.transform_point([0.5, -1.0, 0.25]),
            world.rotate_vector([0.0, 0.0, 1.0]),
        );
        local.apply(&mut snapshot);

        let p = snapshot.positions[0];
        let n = snapshot.normals[0];
        for (a, b) in p.iter().zip([0.5, -1.0, 0.25]) {
            assert!((a - b).abs() < 1e-5, "{p:?}");
        }
        for (a, b) in n.iter().zip([0.0, 0.0, 1.0]) {
            assert!((a - b).abs() < 1e-5, "{n:?}");
        }
    }

    #[test]
    fn world_space_passes_through() {
        let transform = SpaceTransform::for_target(
            CoordinateSpace::World,
            &NodeTransform::IDENTITY.with_scale([0.0; 3]),
            "t",
        )
        .unwrap();
        assert!(transform.is_identity());
        let mut snapshot = FrameSnapshot::new();
        snapshot.push([1.0, 2.0, 3.0], [0.0, 1.0, 0.0]);
        let before = snapshot.clone();
        transform.apply(&mut snapshot);
        assert_eq!(snapshot, before);
    }

    #[test]
    fn degenerate_transform_is_rejected_in_local_space() {
        let zero_scale = NodeTransform::IDENTITY.with_scale([1.0, 0.0, 1.0]);
        let err = SpaceTransform::for_target(CoordinateSpace::Local, &zero_scale, "rig").unwrap_err();
        assert_eq!(
            err,
            BakeError::InvalidTargetTransform {
                target: "rig".into()
            }
        );
        let nan = NodeTransform::IDENTITY.with_translation([f32::NAN, 0.0, 0.0]);
        assert!(SpaceTransform::for_target(CoordinateSpace::Local, &nan, "rig").is_err());
    }
}

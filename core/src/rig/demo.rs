//! Built-in demo rig: a twisting, bending column with a head.

use std::f32::consts::FRAC_PI_2;

use crate::animation::{AnimationChannel, AnimationClip, Keyframe};
use crate::material::{CpuMaterial, MaterialSemantic, TextureRef};
use crate::math;
use crate::mesh::generators::{generate_column, generate_sphere};
use crate::scene::NodeTransform;

use super::description::{RigClip, RigDescription, SkinnedMesh};
use super::skeleton::Bone;

const BONES: u32 = 3;
const HEIGHT: f32 = 3.0;

/// Description of the demo rig.
///
/// A three-bone chain drives a column (`body`, material `skin`) and a sphere
/// rigidly bound to the top bone (`head`, material `skin` as well, so the two
/// merge under [`PackStrategy::MergeByMaterial`](crate::bake::PackStrategy)).
/// Clips: `twist` (looping, 2 s at 30 fps) and `bend` (1 s at 24 fps).
pub fn demo_description() -> RigDescription {
    let span = HEIGHT / BONES as f32;
    let bones = (0..BONES)
        .map(|i| {
            let (parent, rest) = if i == 0 {
                (None, NodeTransform::IDENTITY)
            } else {
                (
                    Some(i as usize - 1),
                    NodeTransform::IDENTITY.with_translation([0.0, span, 0.0]),
                )
            };
            Bone::new(format!("spine{i}"), parent, rest)
        })
        .collect();

    let skin = CpuMaterial::new()
        .with_name("skin")
        .with_texture(MaterialSemantic::BaseColorTexture, TextureRef::new("textures/skin_albedo"))
        .with_texture(MaterialSemantic::NormalTexture, TextureRef::new("textures/skin_normal"));

    let meshes = vec![
        SkinnedMesh {
            name: "body".into(),
            material: skin.clone(),
            vertices: generate_column(0.4, HEIGHT, 12, 12, BONES),
        },
        SkinnedMesh {
            name: "head".into(),
            material: skin,
            vertices: generate_sphere([0.0, HEIGHT + 0.5, 0.0], 0.5, 8, 6, BONES - 1),
        },
    ];

    RigDescription {
        name: "demo_column".into(),
        world: NodeTransform::IDENTITY.with_translation([0.0, 0.0, 2.0]),
        bones,
        meshes,
        clips: vec![twist_clip(span), bend_clip(span)],
    }
}

fn rotated(span: f32, bone: u32, axis: [f32; 3], angle: f32) -> NodeTransform {
    let translation = if bone == 0 { [0.0; 3] } else { [0.0, span, 0.0] };
    NodeTransform::IDENTITY
        .with_translation(translation)
        .with_rotation(math::quat_array_from_axis_angle(axis, angle))
}

fn twist_clip(span: f32) -> RigClip {
    let length = 2.0;
    let channels = (1..BONES)
        .map(|bone| {
            let keys = [0.0, 0.5, 1.0]
                .into_iter()
                .zip([0.0, FRAC_PI_2, 0.0])
                .map(|(t, angle)| Keyframe {
                    time: t * length,
                    transform: rotated(span, bone, [0.0, 1.0, 0.0], angle),
                })
                .collect();
            AnimationChannel::new(format!("spine{bone}"), keys)
        })
        .collect();
    RigClip {
        clip: AnimationClip::new("twist", length, 30.0).with_looping(true),
        channels,
    }
}

fn bend_clip(span: f32) -> RigClip {
    let length = 1.0;
    let channels = (1..BONES)
        .map(|bone| {
            let keys = vec![
                Keyframe {
                    time: 0.0,
                    transform: rotated(span, bone, [0.0, 0.0, 1.0], 0.0),
                },
                Keyframe {
                    time: length,
                    transform: rotated(span, bone, [0.0, 0.0, 1.0], 0.6),
                },
            ];
            AnimationChannel::new(format!("spine{bone}"), keys)
        })
        .collect();
    RigClip {
        clip: AnimationClip::new("bend", length, 24.0),
        channels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::SkinnedTarget;
    use crate::target::AnimatedTarget;

    #[test]
    fn demo_rig_builds() {
        let target = SkinnedTarget::from_description(demo_description()).unwrap();
        let parts = target.mesh_parts();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].vertex_count, 13 * 13);
        assert_eq!(parts[1].vertex_count, 7 * 9);
        let clips: Vec<_> = target.clips().map(|c| c.name.clone()).collect();
        assert_eq!(clips, ["twist", "bend"]);
    }
}

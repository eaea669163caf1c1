//! Shared fixtures for the bake integration tests.

#![allow(dead_code)]

use vatbake_core::animation::{AnimationChannel, AnimationClip, Keyframe};
use vatbake_core::compute::CancellationToken;
use vatbake_core::material::{CpuMaterial, MaterialSemantic, TextureRef};
use vatbake_core::math;
use vatbake_core::mesh::{FrameSnapshot, MeshPart, PartId, SkinnedVertex};
use vatbake_core::rig::{Bone, RigClip, RigDescription, SkinnedMesh, SkinnedTarget};
use vatbake_core::scene::NodeTransform;
use vatbake_core::target::{AnimatedTarget, OracleError};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A two-bone arm with `vertices` vertices spread along +X and blended
/// between the bones. `clip` swings the tip bone and lifts the root.
pub fn arm_rig(vertices: u32, clip: AnimationClip) -> SkinnedTarget {
    let end = if clip.length.is_finite() && clip.length > 0.0 {
        clip.length
    } else {
        1.0
    };
    let mesh_vertices = (0..vertices)
        .map(|i| {
            let x = 2.0 * i as f32 / vertices.max(2).saturating_sub(1) as f32;
            let blend = (x - 0.5).clamp(0.0, 1.0);
            SkinnedVertex {
                position: [x, 0.1 * (i % 3) as f32, 0.0],
                normal: [0.0, 1.0, 0.0],
                joints: [0, 1, 0, 0],
                weights: [1.0 - blend, blend, 0.0, 0.0],
            }
        })
        .collect();

    let tip_rest = NodeTransform::IDENTITY.with_translation([1.0, 0.0, 0.0]);
    let channels = vec![
        AnimationChannel::new(
            "root",
            vec![
                Keyframe {
                    time: 0.0,
                    transform: NodeTransform::IDENTITY,
                },
                Keyframe {
                    time: end,
                    transform: NodeTransform::IDENTITY.with_translation([0.0, 0.5, 0.0]),
                },
            ],
        ),
        AnimationChannel::new(
            "tip",
            vec![
                Keyframe {
                    time: 0.0,
                    transform: tip_rest,
                },
                Keyframe {
                    time: end,
                    transform: tip_rest
                        .with_rotation(math::quat_array_from_axis_angle([0.0, 0.0, 1.0], 1.2)),
                },
            ],
        ),
    ];

    let material = CpuMaterial::new()
        .with_name("arm_mat")
        .with_texture(MaterialSemantic::BaseColorTexture, TextureRef::new("arm_albedo"));

    SkinnedTarget::from_description(RigDescription {
        name: "arm".into(),
        world: NodeTransform::IDENTITY,
        bones: vec![
            Bone::new("root", None, NodeTransform::IDENTITY),
            Bone::new("tip", Some(0), tip_rest),
        ],
        meshes: vec![SkinnedMesh {
            name: "arm".into(),
            material,
            vertices: mesh_vertices,
        }],
        clips: vec![RigClip { clip, channels }],
    })
    .expect("arm rig is valid")
}

/// Wraps a target, counting poses and optionally cancelling a token after
/// a number of them.
pub struct CountingTarget<T> {
    pub inner: T,
    pub poses: usize,
    pub cancel_after: Option<(usize, CancellationToken)>,
}

impl<T> CountingTarget<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            poses: 0,
            cancel_after: None,
        }
    }
}

impl<T: AnimatedTarget> AnimatedTarget for CountingTarget<T> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn mesh_parts(&self) -> Vec<MeshPart> {
        self.inner.mesh_parts()
    }

    fn world_transform(&self) -> NodeTransform {
        self.inner.world_transform()
    }

    fn pose(&mut self, clip: &AnimationClip, time: f32) -> Result<(), OracleError> {
        self.poses += 1;
        if let Some((after, token)) = &self.cancel_after
            && self.poses >= *after
        {
            token.cancel();
        }
        self.inner.pose(clip, time)
    }

    fn read_part(&self, part: PartId, out: &mut FrameSnapshot) -> Result<(), OracleError> {
        self.inner.read_part(part, out)
    }
}

pub fn assert_close(actual: [f32; 3], expected: [f32; 3], tolerance: f32) {
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a - e).abs() <= tolerance,
            "{actual:?} != {expected:?} (tolerance {tolerance})"
        );
    }
}

pub fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("vatbake_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

//! Skinned mesh generators for demo rigs, tests and benchmarks.
//!
//! Generators return bind-pose [`SkinnedVertex`] lists; vertex order is
//! deterministic so baked textures are reproducible.

use std::f32::consts::PI;

use super::data::SkinnedVertex;

/// Generate an open cylinder along +Y skinned to a chain of bones.
///
/// The column has `rings + 1` vertex rings of `segments + 1` vertices each
/// (the seam is duplicated). Bone `i` of `bones` sits at height
/// `i * height / bones`; every vertex is weighted between the two bones
/// bracketing its height so the column bends smoothly.
///
/// # Arguments
///
/// * `radius` - Column radius
/// * `height` - Column height
/// * `segments` - Number of segments around the circumference
/// * `rings` - Number of segments along the height
/// * `bones` - Number of bones in the chain (at least 1)
pub fn generate_column(
    radius: f32,
    height: f32,
    segments: u32,
    rings: u32,
    bones: u32,
) -> Vec<SkinnedVertex> {
    let bones = bones.max(1);
    let rings = rings.max(1);
    let segments = segments.max(3);
    let bone_span = height / bones as f32;
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);

    for ring in 0..=rings {
        let y = height * ring as f32 / rings as f32;
        // Position along the bone chain, in bone units.
        let chain = if bone_span > 0.0 { y / bone_span } else { 0.0 };
        let lower = (chain.floor() as u32).min(bones - 1);
        let upper = (lower + 1).min(bones - 1);
        let blend = if upper == lower {
            0.0
        } else {
            (chain - lower as f32).clamp(0.0, 1.0)
        };

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            vertices.push(SkinnedVertex {
                position: [cos_phi * radius, y, sin_phi * radius],
                normal: [cos_phi, 0.0, sin_phi],
                joints: [lower, upper, 0, 0],
                weights: [1.0 - blend, blend, 0.0, 0.0],
            });
        }
    }

    vertices
}

/// Generate a UV sphere rigidly bound to one bone.
///
/// # Arguments
///
/// * `center` - Sphere centre in target space
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
/// * `bone` - Bone the sphere follows
pub fn generate_sphere(
    center: [f32; 3],
    radius: f32,
    segments: u32,
    rings: u32,
    bone: u32,
) -> Vec<SkinnedVertex> {
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);

    for ring in 0..=rings {
        let theta = ring as f32 * PI / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for segment in 0..=segments {
            let phi = segment as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let x = sin_theta * cos_phi;
            let y = cos_theta;
            let z = sin_theta * sin_phi;

            vertices.push(SkinnedVertex::rigid(
                [
                    center[0] + x * radius,
                    center[1] + y * radius,
                    center[2] + z * radius,
                ],
                [x, y, z],
                bone,
            ));
        }
    }

    vertices
}

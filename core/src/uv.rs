//! Vertex-id UV encoding.
//!
//! A mesh played back from a vertex animation texture finds its column by
//! UV: vertex `i` of `n` samples at the centre of texel column `i`. The V
//! coordinate is left at `1.0`; the shader replaces it with the frame
//! coordinate at runtime.

use crate::bake::PartSegment;
use crate::math;

/// UV of vertex `index` in a texture `width` texels wide.
pub fn vertex_uv(index: u32, width: u32) -> [f32; 2] {
    let width = width.max(1) as f32;
    let u = math::remap(index as f32, 0.0, width, 0.0, 1.0) + 0.5 / width;
    [u, 1.0]
}

/// UVs for `vertex_count` vertices occupying columns `0..vertex_count`.
pub fn encode_vertex_ids(vertex_count: u32) -> Vec<[f32; 2]> {
    (0..vertex_count)
        .map(|i| vertex_uv(i, vertex_count))
        .collect()
}

/// UVs for the vertices of `segment` inside a texture `width` texels wide.
///
/// Used when several parts share one merged texture.
pub fn encode_segment(segment: &PartSegment, width: u32) -> Vec<[f32; 2]> {
    segment.range().map(|i| vertex_uv(i, width)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::PartId;

    #[test]
    fn uvs_hit_texel_centres() {
        let uvs = encode_vertex_ids(4);
        assert_eq!(uvs, [[0.125, 1.0], [0.375, 1.0], [0.625, 1.0], [0.875, 1.0]]);
    }

    #[test]
    fn segment_uvs_are_offset_into_merged_texture() {
        let segment = PartSegment {
            part: PartId(1),
            name: "head".into(),
            offset: 2,
            vertex_count: 2,
        };
        let uvs = encode_segment(&segment, 4);
        assert_eq!(uvs, [[0.625, 1.0], [0.875, 1.0]]);
    }

    #[test]
    fn zero_width_does_not_divide_by_zero() {
        assert_eq!(vertex_uv(0, 0), [0.5, 1.0]);
        assert!(encode_vertex_ids(0).is_empty());
    }
}

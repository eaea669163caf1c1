//! Streaming texture packing of baked vertex vectors.

use thiserror::Error;

use crate::sampler::TextureSampler;
use crate::texture::CpuTexture;

use super::channel::{BakedChannel, VertexAttribute};
use super::settings::BakeSettings;

/// Errors raised while writing texture rows.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PackError {
    #[error("frame {frame} is outside the {frame_count} baked frames")]
    FrameOutOfRange { frame: u32, frame_count: u32 },
    #[error("frame {frame} holds {actual} vectors, expected {expected}")]
    RowLength {
        frame: u32,
        expected: usize,
        actual: usize,
    },
    #[error("frame {frame} was written twice")]
    DuplicateRow { frame: u32 },
    #[error("only {written} of {frame_count} frames were written")]
    Incomplete { written: u32, frame_count: u32 },
    /// A component is not finite or does not fit the texture format.
    #[error("vertex {vertex} of frame {frame} holds {value}, which the texture format cannot store")]
    ValueOutOfRange { frame: u32, vertex: u32, value: f32 },
}

/// Writes one vertex animation texture row by row.
///
/// The texture is allocated up front from the vertex and frame counts; rows
/// arrive as frames are sampled, so the full channel never has to be held in
/// memory. Texel `(vertex, frame)` receives `(x, y, z, 1.0)`.
///
/// Padding columns stay zero. Padding rows of a looping clip repeat frame 0,
/// so filtering across the wrap blends the last frame into the first one;
/// for other clips they stay zero and are never sampled.
#[derive(Debug)]
pub struct TexturePacker {
    texture: CpuTexture,
    vertex_count: u32,
    frame_count: u32,
    is_looping: bool,
    written: Vec<bool>,
    rows_written: u32,
}

impl TexturePacker {
    pub fn new(vertex_count: u32, frame_count: u32, is_looping: bool, settings: &BakeSettings) -> Self {
        let width = settings.dimension_policy.apply(vertex_count);
        let height = settings.dimension_policy.apply(frame_count);
        let texture = CpuTexture::new(width, height, settings.format)
            .with_sampler(TextureSampler::vertex_animation(is_looping));
        Self {
            texture,
            vertex_count,
            frame_count,
            is_looping,
            written: vec![false; frame_count as usize],
            rows_written: 0,
        }
    }

    /// Set the name of the produced texture.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.texture = self.texture.with_name(name);
        self
    }

    /// Write the vectors of `frame`, one per vertex.
    pub fn write_row(&mut self, frame: u32, vectors: &[[f32; 3]]) -> Result<(), PackError> {
        if frame >= self.frame_count {
            return Err(PackError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }
        if vectors.len() != self.vertex_count as usize {
            return Err(PackError::RowLength {
                frame,
                expected: self.vertex_count as usize,
                actual: vectors.len(),
            });
        }
        if self.written[frame as usize] {
            return Err(PackError::DuplicateRow { frame });
        }

        let format = self.texture.format();
        for (vertex, v) in vectors.iter().enumerate() {
            if let Some(&value) = v.iter().find(|c| !format.can_store(**c)) {
                return Err(PackError::ValueOutOfRange {
                    frame,
                    vertex: vertex as u32,
                    value,
                });
            }
        }

        let bpp = format.bytes_per_pixel();
        let row = self
            .texture
            .row_mut(frame)
            .ok_or(PackError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            })?;
        for (texel, v) in row.chunks_exact_mut(bpp).zip(vectors) {
            format.encode([v[0], v[1], v[2], 1.0], texel);
        }

        self.written[frame as usize] = true;
        self.rows_written += 1;
        Ok(())
    }

    /// Return the texture once every frame has been written.
    pub fn finish(mut self) -> Result<CpuTexture, PackError> {
        if self.rows_written != self.frame_count {
            return Err(PackError::Incomplete {
                written: self.rows_written,
                frame_count: self.frame_count,
            });
        }
        if self.is_looping && self.texture.height() > self.frame_count {
            self.repeat_first_row();
        }
        Ok(self.texture)
    }

    fn repeat_first_row(&mut self) {
        let Some(first) = self.texture.row(0).map(<[u8]>::to_vec) else {
            return;
        };
        for y in self.frame_count..self.texture.height() {
            if let Some(row) = self.texture.row_mut(y) {
                row.copy_from_slice(&first);
            }
        }
    }
}

/// Pack one attribute of a complete channel.
pub fn pack_channel(
    channel: &BakedChannel,
    attribute: VertexAttribute,
    is_looping: bool,
    settings: &BakeSettings,
) -> Result<CpuTexture, PackError> {
    let mut packer =
        TexturePacker::new(channel.vertex_count(), channel.frame_count(), is_looping, settings)
            .with_name(format!("{}_{}", channel.name(), attribute.suffix()));
    for (frame, snapshot) in channel.frames().iter().enumerate() {
        packer.write_row(frame as u32, attribute.select(snapshot))?;
    }
    packer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::settings::DimensionPolicy;
    use crate::mesh::FrameSnapshot;
    use crate::sampler::{AddressMode, FilterMode};
    use crate::texture::TextureFormat;

    fn full_precision() -> BakeSettings {
        BakeSettings::new().with_format(TextureFormat::Rgba32Float)
    }

    #[test]
    fn rows_land_at_vertex_frame_cells() {
        let mut packer = TexturePacker::new(2, 3, false, &full_precision());
        for frame in 0..3 {
            let f = frame as f32;
            packer
                .write_row(frame, &[[f, 1.0, 2.0], [f, -1.0, -2.0]])
                .unwrap();
        }
        let tex = packer.finish().unwrap();
        assert_eq!((tex.width(), tex.height()), (2, 3));
        assert_eq!(tex.texel(1, 2), Some([2.0, -1.0, -2.0, 1.0]));
        assert_eq!(tex.texel(0, 0), Some([0.0, 1.0, 2.0, 1.0]));
    }

    #[test]
    fn sampler_follows_loop_flag() {
        for looping in [false, true] {
            let tex = TexturePacker::new(1, 1, looping, &BakeSettings::new());
            let sampler = *tex.texture.sampler();
            assert_eq!(sampler.address_mode_u, AddressMode::ClampToEdge);
            let expected_v = if looping {
                AddressMode::Repeat
            } else {
                AddressMode::ClampToEdge
            };
            assert_eq!(sampler.address_mode_v, expected_v);
            assert_eq!(sampler.mag_filter, FilterMode::Linear);
        }
    }

    #[test]
    fn power_of_two_leaves_padding_zero() {
        let settings = full_precision().with_dimension_policy(DimensionPolicy::NextPowerOfTwo);
        let mut packer = TexturePacker::new(3, 5, false, &settings);
        for frame in 0..5 {
            packer.write_row(frame, &[[1.0; 3]; 3]).unwrap();
        }
        let tex = packer.finish().unwrap();
        assert_eq!((tex.width(), tex.height()), (4, 8));
        assert_eq!(tex.texel(3, 0), Some([0.0; 4]));
        assert_eq!(tex.texel(0, 7), Some([0.0; 4]));
        assert_eq!(tex.texel(2, 4), Some([1.0, 1.0, 1.0, 1.0]));
    }

    #[test]
    fn looping_padding_rows_repeat_first_frame() {
        let settings = full_precision().with_dimension_policy(DimensionPolicy::NextPowerOfTwo);
        let mut packer = TexturePacker::new(3, 5, true, &settings);
        for frame in 0..5 {
            let f = frame as f32 + 1.0;
            packer.write_row(frame, &[[f, 2.0 * f, -f]; 3]).unwrap();
        }
        let tex = packer.finish().unwrap();
        assert_eq!(tex.height(), 8);
        for y in 5..8 {
            assert_eq!(tex.row(y), tex.row(0));
        }
        assert_eq!(tex.texel(1, 6), Some([1.0, 2.0, -1.0, 1.0]));
        assert_eq!(tex.texel(3, 6), Some([0.0; 4]));
    }

    #[test]
    fn values_beyond_half_range_are_rejected() {
        let mut packer = TexturePacker::new(2, 1, false, &BakeSettings::new());
        assert_eq!(
            packer.write_row(0, &[[1.0, 2.0, 3.0], [70_000.0, 1.0e6, -90_000.0]]),
            Err(PackError::ValueOutOfRange {
                frame: 0,
                vertex: 1,
                value: 70_000.0
            })
        );
        packer.write_row(0, &[[65_504.0, -65_504.0, 0.0]; 2]).unwrap();
        let tex = packer.finish().unwrap();
        assert_eq!(tex.texel(1, 0), Some([65_504.0, -65_504.0, 0.0, 1.0]));

        let mut wide = TexturePacker::new(1, 1, false, &full_precision());
        wide.write_row(0, &[[70_000.0, 1.0e6, -90_000.0]]).unwrap();
        assert_eq!(
            wide.finish().unwrap().texel(0, 0),
            Some([70_000.0, 1.0e6, -90_000.0, 1.0])
        );
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for format in [TextureFormat::Rgba16Float, TextureFormat::Rgba32Float] {
            let settings = BakeSettings::new().with_format(format);
            let mut packer = TexturePacker::new(1, 2, true, &settings);
            let err = packer.write_row(1, &[[0.0, f32::INFINITY, 0.0]]).unwrap_err();
            assert_eq!(
                err,
                PackError::ValueOutOfRange {
                    frame: 1,
                    vertex: 0,
                    value: f32::INFINITY
                }
            );
            assert!(matches!(
                packer.write_row(1, &[[f32::NAN, 0.0, 0.0]]),
                Err(PackError::ValueOutOfRange { frame: 1, vertex: 0, value }) if value.is_nan()
            ));
            // A rejected row is not marked as written.
            packer.write_row(1, &[[0.0; 3]]).unwrap();
        }
    }

    #[test]
    fn bad_rows_are_rejected() {
        let mut packer = TexturePacker::new(2, 2, false, &BakeSettings::new());
        assert_eq!(
            packer.write_row(2, &[[0.0; 3]; 2]),
            Err(PackError::FrameOutOfRange {
                frame: 2,
                frame_count: 2
            })
        );
        assert_eq!(
            packer.write_row(0, &[[0.0; 3]; 3]),
            Err(PackError::RowLength {
                frame: 0,
                expected: 2,
                actual: 3
            })
        );
        packer.write_row(0, &[[0.0; 3]; 2]).unwrap();
        assert_eq!(
            packer.write_row(0, &[[0.0; 3]; 2]),
            Err(PackError::DuplicateRow { frame: 0 })
        );
        assert_eq!(
            packer.finish().unwrap_err(),
            PackError::Incomplete {
                written: 1,
                frame_count: 2
            }
        );
    }

    #[test]
    fn pack_channel_is_deterministic() {
        let mut channel = BakedChannel::new("body", 2);
        for frame in 0..4 {
            let mut s = FrameSnapshot::new();
            s.push([frame as f32 * 0.1, 0.3, -7.25], [0.0, 0.0, 1.0]);
            s.push([1.0e3, -1.0e-3, 0.5], [1.0, 0.0, 0.0]);
            channel.push(s).unwrap();
        }
        let settings = BakeSettings::new();
        let a = pack_channel(&channel, VertexAttribute::Position, true, &settings).unwrap();
        let b = pack_channel(&channel, VertexAttribute::Position, true, &settings).unwrap();
        assert_eq!(a.data(), b.data());
        assert_eq!(a.name(), Some("body_pos"));

        let normals = pack_channel(&channel, VertexAttribute::Normal, true, &settings).unwrap();
        assert_eq!(normals.texel(1, 3), Some([1.0, 0.0, 0.0, 1.0]));
    }
}

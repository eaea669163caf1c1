//! CPU-side texture types for baked vertex data.

use half::f16;
use serde::{Deserialize, Serialize};

use crate::sampler::{AddressMode, FilterMode, TextureSampler};

use super::error::TextureError;

/// Pixel storage format of a baked texture.
///
/// Both formats store four float channels; the baker writes
/// `(x, y, z, 1.0)`. Half precision is the minimum that keeps
/// real-world mesh coordinates usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureFormat {
    /// 16-bit RGBA channels, float.
    #[default]
    Rgba16Float,
    /// 32-bit RGBA channels, float.
    Rgba32Float,
}

impl TextureFormat {
    /// Returns the size in bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgba16Float => 8,
            Self::Rgba32Float => 16,
        }
    }

    /// Stable numeric code used in the `.vat` header.
    pub fn code(self) -> u32 {
        match self {
            Self::Rgba16Float => 0,
            Self::Rgba32Float => 1,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Rgba16Float),
            1 => Some(Self::Rgba32Float),
            _ => None,
        }
    }

    /// Largest absolute error introduced by storing `value` in this format.
    pub fn tolerance(&self, value: f32) -> f32 {
        match self {
            // Half floats keep 11 significant bits.
            Self::Rgba16Float => (value.abs() * 2.0_f32.powi(-11)).max(f32::from(f16::MIN_POSITIVE)),
            Self::Rgba32Float => 0.0,
        }
    }

    /// Largest magnitude a channel holds without overflowing to infinity.
    pub fn max_value(&self) -> f32 {
        match self {
            Self::Rgba16Float => f32::from(f16::MAX),
            Self::Rgba32Float => f32::MAX,
        }
    }

    /// Returns `true` if `value` survives encoding as a finite number.
    pub fn can_store(&self, value: f32) -> bool {
        value.is_finite() && value.abs() <= self.max_value()
    }

    /// Encode one texel into `out` (little-endian).
    ///
    /// `out` must be exactly [`bytes_per_pixel`](Self::bytes_per_pixel) long.
    pub fn encode(&self, texel: [f32; 4], out: &mut [u8]) {
        match self {
            Self::Rgba16Float => {
                for (chunk, value) in out.chunks_exact_mut(2).zip(texel) {
                    chunk.copy_from_slice(&f16::from_f32(value).to_le_bytes());
                }
            }
            Self::Rgba32Float => {
                for (chunk, value) in out.chunks_exact_mut(4).zip(texel) {
                    chunk.copy_from_slice(&value.to_le_bytes());
                }
            }
        }
    }

    /// Decode one texel previously written by [`encode`](Self::encode).
    pub fn decode(&self, bytes: &[u8]) -> [f32; 4] {
        let mut texel = [0.0; 4];
        match self {
            Self::Rgba16Float => {
                for (value, chunk) in texel.iter_mut().zip(bytes.chunks_exact(2)) {
                    *value = f16::from_le_bytes([chunk[0], chunk[1]]).to_f32();
                }
            }
            Self::Rgba32Float => {
                for (value, chunk) in texel.iter_mut().zip(bytes.chunks_exact(4)) {
                    *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
            }
        }
        texel
    }
}

/// A CPU-side 2D texture holding raw pixel data.
///
/// Rows are stored top to bottom without padding; row `y` starts at
/// `y * width * bytes_per_pixel`. For vertex animation textures `x` is the
/// vertex index and `y` the frame index.
#[derive(Clone, PartialEq)]
pub struct CpuTexture {
    name: Option<String>,
    width: u32,
    height: u32,
    format: TextureFormat,
    sampler: TextureSampler,
    data: Vec<u8>,
}

impl CpuTexture {
    /// Create a zero-filled texture.
    pub fn new(width: u32, height: u32, format: TextureFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        Self {
            name: None,
            width,
            height,
            format,
            sampler: TextureSampler::default(),
            data: vec![0; len],
        }
    }

    /// Wrap an existing pixel buffer, checking its length.
    pub fn from_raw(
        width: u32,
        height: u32,
        format: TextureFormat,
        data: Vec<u8>,
    ) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return Err(TextureError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name: None,
            width,
            height,
            format,
            sampler: TextureSampler::default(),
            data,
        })
    }

    /// Set the texture name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the sampler.
    #[must_use]
    pub fn with_sampler(mut self, sampler: TextureSampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn sampler(&self) -> &TextureSampler {
        &self.sampler
    }

    /// Raw pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn texel_range(&self, x: u32, y: u32) -> Result<std::ops::Range<usize>, TextureError> {
        if x >= self.width || y >= self.height {
            return Err(TextureError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        Ok(start..start + bpp)
    }

    /// Write one texel.
    pub fn set_texel(&mut self, x: u32, y: u32, texel: [f32; 4]) -> Result<(), TextureError> {
        let range = self.texel_range(x, y)?;
        self.format.encode(texel, &mut self.data[range]);
        Ok(())
    }

    /// Read one texel, or `None` outside the texture.
    pub fn texel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        let range = self.texel_range(x, y).ok()?;
        Some(self.format.decode(&self.data[range]))
    }

    /// Raw bytes of row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * self.format.bytes_per_pixel();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Mutable raw bytes of row `y`.
    pub(crate) fn row_mut(&mut self, y: u32) -> Option<&mut [u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.width as usize * self.format.bytes_per_pixel();
        let start = y as usize * stride;
        Some(&mut self.data[start..start + stride])
    }

    /// Sample at normalized coordinates the way the runtime shader does.
    ///
    /// Honors the sampler's address modes; with [`FilterMode::Linear`] the
    /// four nearest texel centres are blended.
    pub fn sample(&self, u: f32, v: f32) -> [f32; 4] {
        if self.width == 0 || self.height == 0 {
            return [0.0; 4];
        }
        let fetch = |x: i64, y: i64| -> [f32; 4] {
            let x = self.sampler.address_mode_u.resolve(x, self.width);
            let y = self.sampler.address_mode_v.resolve(y, self.height);
            self.texel(x, y).unwrap_or([0.0; 4])
        };

        let px = u * self.width as f32 - 0.5;
        let py = v * self.height as f32 - 0.5;

        match self.sampler.mag_filter {
            FilterMode::Nearest => fetch(px.round() as i64, py.round() as i64),
            FilterMode::Linear => {
                let x0 = px.floor();
                let y0 = py.floor();
                let tx = px - x0;
                let ty = py - y0;
                let (x0, y0) = (x0 as i64, y0 as i64);
                let a = fetch(x0, y0);
                let b = fetch(x0 + 1, y0);
                let c = fetch(x0, y0 + 1);
                let d = fetch(x0 + 1, y0 + 1);
                let mut out = [0.0; 4];
                for i in 0..4 {
                    let top = a[i] + (b[i] - a[i]) * tx;
                    let bottom = c[i] + (d[i] - c[i]) * tx;
                    out[i] = top + (bottom - top) * ty;
                }
                out
            }
        }
    }

    /// Returns `true` if the frame axis wraps (looping clip).
    pub fn loops(&self) -> bool {
        self.sampler.address_mode_v == AddressMode::Repeat
    }
}

impl std::fmt::Debug for CpuTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuTexture")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("sampler", &self.sampler)
            .field("bytes", &self.data.len())
            .finish()
    }
}

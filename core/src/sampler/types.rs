//! Sampler filter and address mode definitions for baked textures.

/// How texels between centres are reconstructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Closest texel centre.
    #[default]
    Nearest,
    /// Bilinear filtering.
    Linear,
}

impl FilterMode {
    /// Stable numeric code used in the `.vat` header.
    pub fn code(self) -> u8 {
        match self {
            Self::Nearest => 0,
            Self::Linear => 1,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// What happens to coordinates outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Clamp to edge.
    #[default]
    ClampToEdge,
    /// Repeat.
    Repeat,
    /// Mirrored repeat.
    MirrorRepeat,
}

impl AddressMode {
    /// Stable numeric code used in the `.vat` header.
    pub fn code(self) -> u8 {
        match self {
            Self::ClampToEdge => 0,
            Self::Repeat => 1,
            Self::MirrorRepeat => 2,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::ClampToEdge),
            1 => Some(Self::Repeat),
            2 => Some(Self::MirrorRepeat),
            _ => None,
        }
    }

    /// Resolve a (possibly out of range) texel coordinate along one axis.
    pub fn resolve(self, coord: i64, size: u32) -> u32 {
        let size = i64::from(size.max(1));
        let resolved = match self {
            Self::ClampToEdge => coord.clamp(0, size - 1),
            Self::Repeat => coord.rem_euclid(size),
            Self::MirrorRepeat => {
                let period = coord.rem_euclid(size * 2);
                if period < size { period } else { size * 2 - 1 - period }
            }
        };
        resolved as u32
    }
}

/// Sampler configuration attached to a baked texture.
///
/// U runs along the vertex axis, V along the frame axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    /// Vertex axis.
    pub address_mode_u: AddressMode,
    /// Frame axis.
    pub address_mode_v: AddressMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Minification filter.
    pub min_filter: FilterMode,
}

impl TextureSampler {
    /// Create a bilinear sampler.
    pub fn linear() -> Self {
        Self {
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            ..Default::default()
        }
    }

    /// Sampler for a vertex animation texture.
    ///
    /// The vertex axis always clamps; the frame axis repeats only for
    /// looping clips so playback wraps seamlessly.
    pub fn vertex_animation(is_looping: bool) -> Self {
        Self::linear()
            .with_address_mode_u(AddressMode::ClampToEdge)
            .with_address_mode_v(if is_looping {
                AddressMode::Repeat
            } else {
                AddressMode::ClampToEdge
            })
    }

    /// Set address mode for the U coordinate.
    pub fn with_address_mode_u(mut self, mode: AddressMode) -> Self {
        self.address_mode_u = mode;
        self
    }

    /// Set address mode for the V coordinate.
    pub fn with_address_mode_v(mut self, mode: AddressMode) -> Self {
        self.address_mode_v = mode;
        self
    }

    /// Set both filters.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.mag_filter = filter;
        self.min_filter = filter;
        self
    }
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            address_mode_u: AddressMode::ClampToEdge,
            address_mode_v: AddressMode::ClampToEdge,
            mag_filter: FilterMode::Nearest,
            min_filter: FilterMode::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looping_repeats_frame_axis_only() {
        let s = TextureSampler::vertex_animation(true);
        assert_eq!(s.address_mode_u, AddressMode::ClampToEdge);
        assert_eq!(s.address_mode_v, AddressMode::Repeat);
        assert_eq!(s.mag_filter, FilterMode::Linear);
        assert_eq!(s.min_filter, FilterMode::Linear);
    }

    #[test]
    fn non_looping_clamps_both_axes() {
        let s = TextureSampler::vertex_animation(false);
        assert_eq!(s.address_mode_u, AddressMode::ClampToEdge);
        assert_eq!(s.address_mode_v, AddressMode::ClampToEdge);
    }

    #[test]
    fn codes_roundtrip() {
        for mode in [AddressMode::ClampToEdge, AddressMode::Repeat, AddressMode::MirrorRepeat] {
            assert_eq!(AddressMode::from_code(mode.code()), Some(mode));
        }
        for filter in [FilterMode::Nearest, FilterMode::Linear] {
            assert_eq!(FilterMode::from_code(filter.code()), Some(filter));
        }
        assert_eq!(AddressMode::from_code(9), None);
    }

    #[test]
    fn resolve_coordinates() {
        assert_eq!(AddressMode::ClampToEdge.resolve(-3, 4), 0);
        assert_eq!(AddressMode::ClampToEdge.resolve(7, 4), 3);
        assert_eq!(AddressMode::Repeat.resolve(5, 4), 1);
        assert_eq!(AddressMode::Repeat.resolve(-1, 4), 3);
        assert_eq!(AddressMode::MirrorRepeat.resolve(4, 4), 3);
        assert_eq!(AddressMode::MirrorRepeat.resolve(6, 4), 1);
    }
}

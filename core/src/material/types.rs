//! Source and generated material data.
//!
//! A material is a flat list of [`MaterialProperty`] entries, each pairing a
//! [`MaterialSemantic`] with a [`MaterialValue`]. Source materials come from
//! the animated target; the generator copies their surface maps and adds the
//! vertex animation slots.

use serde::{Deserialize, Serialize};

/// What a material property feeds in the shader.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialSemantic {
    /// Albedo tint, `[r, g, b, a]`.
    BaseColorFactor,
    BaseColorTexture,
    /// Tangent-space normal map.
    NormalTexture,
    /// Strength of the normal map.
    NormalScale,

    /// Baked per-vertex position texture.
    VatPositionTexture,
    /// Baked per-vertex normal texture.
    VatNormalTexture,
    /// Frames per second the textures were baked at.
    VatSampleRate,
    /// Length of the baked clip in seconds.
    VatClipLength,

    /// Any other shader property, bound by its own name.
    Custom(String),
}

impl MaterialSemantic {
    /// Shader property name the runtime shader binds this semantic to.
    pub fn shader_property(&self) -> &str {
        match self {
            Self::BaseColorFactor => "_BaseColor",
            Self::BaseColorTexture => "_BaseMap",
            Self::NormalTexture => "_BumpMap",
            Self::NormalScale => "_BumpScale",
            Self::VatPositionTexture => "_PosTex",
            Self::VatNormalTexture => "_NmlTex",
            Self::VatSampleRate => "_SampleRate",
            Self::VatClipLength => "_Length",
            Self::Custom(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialValue {
    Float(f32),
    Vec4([f32; 4]),
    Texture(TextureRef),
}

impl MaterialValue {
    fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    fn as_texture(&self) -> Option<&TextureRef> {
        match self {
            Self::Texture(t) => Some(t),
            _ => None,
        }
    }
}

/// Reference to a texture asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    /// Asset name or path of the texture.
    pub asset: String,
    /// UV set the texture is sampled with.
    #[serde(default)]
    pub tex_coord: u32,
}

impl TextureRef {
    /// Reference an asset through UV set 0.
    pub fn new(asset: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            tex_coord: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperty {
    pub semantic: MaterialSemantic,
    pub value: MaterialValue,
}

/// How the surface treats alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AlphaMode {
    #[default]
    Opaque,
    /// Cut out below a threshold.
    Mask,
    Blend,
}

/// Material of a mesh part as reported by the animated target.
///
/// The name is the grouping key when parts are merged by material; unnamed
/// materials are never merged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuMaterial {
    pub name: Option<String>,
    pub alpha_mode: AlphaMode,
    pub double_sided: bool,
    pub properties: Vec<MaterialProperty>,
}

impl CpuMaterial {
    /// An unnamed opaque material with no properties.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_double_sided(mut self, double_sided: bool) -> Self {
        self.double_sided = double_sided;
        self
    }

    /// Append a property. A later property never shadows an earlier one
    /// with the same semantic.
    #[must_use]
    pub fn with_property(mut self, semantic: MaterialSemantic, value: MaterialValue) -> Self {
        self.properties.push(MaterialProperty { semantic, value });
        self
    }

    #[must_use]
    pub fn with_texture(self, semantic: MaterialSemantic, texture: TextureRef) -> Self {
        self.with_property(semantic, MaterialValue::Texture(texture))
    }

    /// First property tagged `semantic`.
    pub fn get(&self, semantic: &MaterialSemantic) -> Option<&MaterialValue> {
        self.properties
            .iter()
            .find_map(|p| (&p.semantic == semantic).then_some(&p.value))
    }

    pub fn get_float(&self, semantic: &MaterialSemantic) -> Option<f32> {
        self.get(semantic)?.as_float()
    }

    pub fn get_texture(&self, semantic: &MaterialSemantic) -> Option<&TextureRef> {
        self.get(semantic)?.as_texture()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skin() -> CpuMaterial {
        CpuMaterial::new()
            .with_name("skin")
            .with_property(
                MaterialSemantic::BaseColorFactor,
                MaterialValue::Vec4([0.9, 0.7, 0.6, 1.0]),
            )
            .with_property(MaterialSemantic::NormalScale, MaterialValue::Float(0.8))
            .with_texture(MaterialSemantic::BaseColorTexture, TextureRef::new("skin_albedo"))
            .with_property(MaterialSemantic::NormalScale, MaterialValue::Float(2.0))
    }

    #[test]
    fn lookup_by_semantic() {
        let mat = skin();
        assert_eq!(mat.get_float(&MaterialSemantic::NormalScale), Some(0.8));
        assert_eq!(
            mat.get_texture(&MaterialSemantic::BaseColorTexture)
                .map(|t| (t.asset.as_str(), t.tex_coord)),
            Some(("skin_albedo", 0))
        );
        assert_eq!(mat.get(&MaterialSemantic::NormalTexture), None);
    }

    #[test]
    fn mismatched_value_kind_is_none() {
        let mat = skin();
        assert_eq!(mat.get_float(&MaterialSemantic::BaseColorFactor), None);
        assert_eq!(mat.get_texture(&MaterialSemantic::NormalScale), None);
    }

    #[test]
    fn custom_semantic_uses_its_own_property_name() {
        let semantic = MaterialSemantic::Custom("_Wind".into());
        assert_eq!(semantic.shader_property(), "_Wind");
        assert_eq!(MaterialSemantic::VatPositionTexture.shader_property(), "_PosTex");
    }

    #[test]
    fn material_deserializes_from_json() {
        let json = r#"{
            "name": "cloth",
            "properties": [
                { "semantic": "NormalTexture", "value": { "Texture": { "asset": "cloth_n" } } }
            ]
        }"#;
        let mat: CpuMaterial = serde_json::from_str(json).unwrap();
        assert_eq!(mat.name.as_deref(), Some("cloth"));
        assert_eq!(
            mat.get_texture(&MaterialSemantic::NormalTexture),
            Some(&TextureRef::new("cloth_n"))
        );
    }
}

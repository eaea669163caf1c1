//! Runtime material generation for baked parts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationClip;
use crate::naming;

use super::types::{
    AlphaMode, CpuMaterial, MaterialProperty, MaterialSemantic, MaterialValue, TextureRef,
};

/// Errors from material generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterialError {
    /// No (or an empty) shader reference was supplied.
    #[error("no shader reference given for the material of '{part}'")]
    MissingShaderReference { part: String },
}

/// Name of the runtime shader a generated material uses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShaderRef(String);

impl ShaderRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Asset references of a part's baked position and normal textures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedTextureRefs {
    pub position: TextureRef,
    pub normal: TextureRef,
}

impl BakedTextureRefs {
    pub fn new(position: impl Into<String>, normal: impl Into<String>) -> Self {
        Self {
            position: TextureRef::new(position),
            normal: TextureRef::new(normal),
        }
    }
}

/// A material ready to be persisted as a named asset.
///
/// Binds the baked textures and the playback parameters the shader uses to
/// compute `frame = time * sample_rate`, next to the surface maps copied from
/// the source material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDescriptor {
    pub name: String,
    pub shader: ShaderRef,
    #[serde(default)]
    pub alpha_mode: AlphaMode,
    #[serde(default)]
    pub double_sided: bool,
    pub properties: Vec<MaterialProperty>,
}

impl MaterialDescriptor {
    pub fn get(&self, semantic: &MaterialSemantic) -> Option<&MaterialValue> {
        self.properties
            .iter()
            .find(|p| &p.semantic == semantic)
            .map(|p| &p.value)
    }

    pub fn get_texture(&self, semantic: &MaterialSemantic) -> Option<&TextureRef> {
        match self.get(semantic)? {
            MaterialValue::Texture(t) => Some(t),
            _ => None,
        }
    }

    pub fn get_float(&self, semantic: &MaterialSemantic) -> Option<f32> {
        match self.get(semantic)? {
            MaterialValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Properties keyed by the shader property they bind to.
    pub fn shader_bindings(&self) -> impl Iterator<Item = (&str, &MaterialValue)> {
        self.properties
            .iter()
            .map(|p| (p.semantic.shader_property(), &p.value))
    }
}

/// Build the runtime material of a baked part.
///
/// The base color map and factor, and the normal map and scale, are copied
/// from `source` when present. The baked textures go into the dedicated
/// vertex animation slots with the clip's sample rate and length.
pub fn generate_material(
    part: &str,
    textures: &BakedTextureRefs,
    source: &CpuMaterial,
    shader: Option<&ShaderRef>,
    clip: &AnimationClip,
) -> Result<MaterialDescriptor, MaterialError> {
    let shader = shader
        .filter(|s| !s.name().trim().is_empty())
        .ok_or_else(|| MaterialError::MissingShaderReference {
            part: part.to_string(),
        })?;

    const COPIED: [MaterialSemantic; 4] = [
        MaterialSemantic::BaseColorTexture,
        MaterialSemantic::BaseColorFactor,
        MaterialSemantic::NormalTexture,
        MaterialSemantic::NormalScale,
    ];
    let mut properties: Vec<MaterialProperty> = COPIED
        .iter()
        .filter_map(|semantic| {
            source.get(semantic).map(|value| MaterialProperty {
                semantic: semantic.clone(),
                value: value.clone(),
            })
        })
        .collect();

    properties.extend([
        MaterialProperty {
            semantic: MaterialSemantic::VatPositionTexture,
            value: MaterialValue::Texture(textures.position.clone()),
        },
        MaterialProperty {
            semantic: MaterialSemantic::VatNormalTexture,
            value: MaterialValue::Texture(textures.normal.clone()),
        },
        MaterialProperty {
            semantic: MaterialSemantic::VatSampleRate,
            value: MaterialValue::Float(clip.frame_rate),
        },
        MaterialProperty {
            semantic: MaterialSemantic::VatClipLength,
            value: MaterialValue::Float(clip.length),
        },
    ]);

    Ok(MaterialDescriptor {
        name: naming::asset_stem(part, &clip.name, "mat"),
        shader: shader.clone(),
        alpha_mode: source.alpha_mode,
        double_sided: source.double_sided,
        properties,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_with_maps(normal: bool) -> CpuMaterial {
        let mut mat = CpuMaterial::new()
            .with_name("skin")
            .with_double_sided(true)
            .with_texture(MaterialSemantic::BaseColorTexture, TextureRef::new("skin_albedo"));
        if normal {
            mat = mat.with_texture(MaterialSemantic::NormalTexture, TextureRef::new("skin_n"));
        }
        mat
    }

    fn refs() -> BakedTextureRefs {
        BakedTextureRefs::new("body_walk_pos.vat", "body_walk_nml.vat")
    }

    #[test]
    fn binds_baked_textures_and_playback_parameters() {
        let clip = AnimationClip::new("walk", 2.0, 24.0);
        let shader = ShaderRef::new("VAT/Lit");
        let mat =
            generate_material("body", &refs(), &source_with_maps(true), Some(&shader), &clip).unwrap();

        assert_eq!(mat.name, "body_walk_mat");
        assert_eq!(mat.shader.name(), "VAT/Lit");
        assert!(mat.double_sided);
        assert_eq!(
            mat.get_texture(&MaterialSemantic::VatPositionTexture),
            Some(&TextureRef::new("body_walk_pos.vat"))
        );
        assert_eq!(
            mat.get_texture(&MaterialSemantic::VatNormalTexture),
            Some(&TextureRef::new("body_walk_nml.vat"))
        );
        assert_eq!(mat.get_float(&MaterialSemantic::VatSampleRate), Some(24.0));
        assert_eq!(mat.get_float(&MaterialSemantic::VatClipLength), Some(2.0));
        assert_eq!(
            mat.get_texture(&MaterialSemantic::BaseColorTexture),
            Some(&TextureRef::new("skin_albedo"))
        );
        assert_eq!(
            mat.get_texture(&MaterialSemantic::NormalTexture),
            Some(&TextureRef::new("skin_n"))
        );
    }

    #[test]
    fn normal_map_is_omitted_when_source_has_none() {
        let clip = AnimationClip::new("walk", 1.0, 30.0);
        let shader = ShaderRef::new("VAT/Lit");
        let mat =
            generate_material("body", &refs(), &source_with_maps(false), Some(&shader), &clip).unwrap();
        assert!(mat.get(&MaterialSemantic::NormalTexture).is_none());
        assert_eq!(mat.properties.len(), 5);
    }

    #[test]
    fn missing_shader_is_an_error() {
        let clip = AnimationClip::new("walk", 1.0, 30.0);
        let err = generate_material("body", &refs(), &CpuMaterial::new(), None, &clip).unwrap_err();
        assert_eq!(
            err,
            MaterialError::MissingShaderReference {
                part: "body".into()
            }
        );
        let blank = ShaderRef::new("  ");
        assert!(generate_material("body", &refs(), &CpuMaterial::new(), Some(&blank), &clip).is_err());
    }

    #[test]
    fn shader_bindings_use_property_names() {
        let clip = AnimationClip::new("walk", 1.0, 30.0);
        let shader = ShaderRef::new("VAT/Lit");
        let mat = generate_material("body", &refs(), &CpuMaterial::new(), Some(&shader), &clip).unwrap();
        let names: Vec<_> = mat.shader_bindings().map(|(name, _)| name).collect();
        assert_eq!(names, ["_PosTex", "_NmlTex", "_SampleRate", "_Length"]);
    }

    #[test]
    fn descriptor_serializes_to_json() {
        let clip = AnimationClip::new("walk", 1.0, 30.0);
        let shader = ShaderRef::new("VAT/Lit");
        let mat = generate_material("body", &refs(), &CpuMaterial::new(), Some(&shader), &clip).unwrap();
        let json = serde_json::to_string(&mat).unwrap();
        assert!(json.contains("\"shader\":\"VAT/Lit\""));
        let back: MaterialDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mat);
    }
}

//! Persistence of bake results into an [`AssetStore`].
//!
//! Per baked part three assets are written next to each other:
//!
//! | asset | contents |
//! |-------|----------|
//! | `<part>_<clip>_pos.vat` | position texture |
//! | `<part>_<clip>_nml.vat` | normal texture |
//! | `<part>_<clip>_mat.json` | [`MaterialDescriptor`] |
//!
//! A `.vat` file is a 32-byte little-endian [`VatHeader`] followed by the raw
//! pixel buffer exactly as the baker produced it.

use bytemuck::{Pod, Zeroable};
use log::{debug, info, warn};
use thiserror::Error;

use crate::bake::{BakeResult, VertexAttribute};
use crate::material::{
    BakedTextureRefs, MaterialDescriptor, MaterialError, ShaderRef, generate_material,
};
use crate::naming;
use crate::sampler::{AddressMode, FilterMode, TextureSampler};
use crate::store::{self, AssetStore, StoreError};
use crate::texture::{CpuTexture, TextureFormat};

/// File magic of a vertex animation texture.
pub const VAT_MAGIC: [u8; 4] = *b"VATX";
/// Current `.vat` layout version.
pub const VAT_VERSION: u32 = 1;

/// Errors from persisting or loading bake artifacts.
#[derive(Error, Debug)]
pub enum PersistError {
    /// The store rejected a read or write.
    #[error("store failure at '{path}': {source}")]
    Store { path: String, source: StoreError },
    /// The bytes at `path` are not a valid `.vat` texture.
    #[error("'{path}' is not a valid vertex animation texture: {reason}")]
    Decode { path: String, reason: String },
    /// Material JSON could not be produced or parsed.
    #[error("material '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Header preceding the pixel data of a `.vat` file.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct VatHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub format: u32,
    pub address_u: u32,
    pub address_v: u32,
    pub filter: u32,
}

impl VatHeader {
    /// Encoded size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Header describing `texture`.
    pub fn for_texture(texture: &CpuTexture) -> Self {
        let sampler = texture.sampler();
        Self {
            magic: VAT_MAGIC,
            version: VAT_VERSION,
            width: texture.width(),
            height: texture.height(),
            format: texture.format().code(),
            address_u: u32::from(sampler.address_mode_u.code()),
            address_v: u32::from(sampler.address_mode_v.code()),
            filter: u32::from(sampler.mag_filter.code()),
        }
    }

    fn swap_to_le(self) -> Self {
        Self {
            magic: self.magic,
            version: self.version.to_le(),
            width: self.width.to_le(),
            height: self.height.to_le(),
            format: self.format.to_le(),
            address_u: self.address_u.to_le(),
            address_v: self.address_v.to_le(),
            filter: self.filter.to_le(),
        }
    }

    fn swap_from_le(self) -> Self {
        Self {
            magic: self.magic,
            version: u32::from_le(self.version),
            width: u32::from_le(self.width),
            height: u32::from_le(self.height),
            format: u32::from_le(self.format),
            address_u: u32::from_le(self.address_u),
            address_v: u32::from_le(self.address_v),
            filter: u32::from_le(self.filter),
        }
    }
}

/// Serialize a texture into `.vat` bytes.
pub fn encode_texture(texture: &CpuTexture) -> Vec<u8> {
    let header = VatHeader::for_texture(texture).swap_to_le();
    let mut bytes = Vec::with_capacity(VatHeader::SIZE + texture.data().len());
    bytes.extend_from_slice(bytemuck::bytes_of(&header));
    bytes.extend_from_slice(texture.data());
    bytes
}

/// Parse `.vat` bytes. `path` is only used in error messages and as the
/// texture name.
pub fn decode_texture(path: &str, bytes: &[u8]) -> Result<CpuTexture, PersistError> {
    let decode_err = |reason: String| PersistError::Decode {
        path: path.to_string(),
        reason,
    };
    if bytes.len() < VatHeader::SIZE {
        return Err(decode_err(format!(
            "{} bytes is shorter than the {}-byte header",
            bytes.len(),
            VatHeader::SIZE
        )));
    }
    let (head, pixels) = bytes.split_at(VatHeader::SIZE);
    let header = bytemuck::pod_read_unaligned::<VatHeader>(head).swap_from_le();

    if header.magic != VAT_MAGIC {
        return Err(decode_err("bad magic".into()));
    }
    if header.version != VAT_VERSION {
        return Err(decode_err(format!("unsupported version {}", header.version)));
    }
    let format = TextureFormat::from_code(header.format)
        .ok_or_else(|| decode_err(format!("unknown format {}", header.format)))?;
    let address = |code: u32| {
        u8::try_from(code)
            .ok()
            .and_then(AddressMode::from_code)
            .ok_or_else(|| decode_err(format!("unknown address mode {code}")))
    };
    let filter = u8::try_from(header.filter)
        .ok()
        .and_then(FilterMode::from_code)
        .ok_or_else(|| decode_err(format!("unknown filter {}", header.filter)))?;
    let sampler = TextureSampler::default()
        .with_address_mode_u(address(header.address_u)?)
        .with_address_mode_v(address(header.address_v)?)
        .with_filter(filter);

    let texture = CpuTexture::from_raw(header.width, header.height, format, pixels.to_vec())
        .map_err(|e| decode_err(e.to_string()))?;
    let name = path.rsplit('/').next().unwrap_or(path);
    let name = name.strip_suffix(".vat").unwrap_or(name);
    Ok(texture.with_sampler(sampler).with_name(name))
}

/// Write `texture` to `path` as a `.vat` asset.
pub fn write_texture(
    store: &dyn AssetStore,
    path: &str,
    texture: &CpuTexture,
) -> Result<(), PersistError> {
    store
        .create_asset(path, encode_texture(texture))
        .map_err(|source| PersistError::Store {
            path: path.to_string(),
            source,
        })
}

/// Read back a `.vat` texture: dimensions, sampler and raw pixel buffer.
pub fn read_texture(store: &dyn AssetStore, path: &str) -> Result<CpuTexture, PersistError> {
    let bytes = store.read_asset(path).map_err(|source| PersistError::Store {
        path: path.to_string(),
        source,
    })?;
    decode_texture(path, &bytes)
}

/// Read back a material written by [`persist_bake`].
pub fn read_material(
    store: &dyn AssetStore,
    path: &str,
) -> Result<MaterialDescriptor, PersistError> {
    let bytes = store.read_asset(path).map_err(|source| PersistError::Store {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| PersistError::Json {
        path: path.to_string(),
        source,
    })
}

/// Assets written for one baked part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPart {
    pub name: String,
    pub position: String,
    pub normal: String,
    /// `None` when material generation failed for this part.
    pub material: Option<String>,
}

/// Outcome of [`persist_bake`].
#[derive(Debug, Default)]
pub struct PersistReport {
    pub parts: Vec<PersistedPart>,
    /// Parts whose material could not be generated. Their textures were
    /// still written.
    pub material_failures: Vec<MaterialError>,
}

impl PersistReport {
    /// Every asset path written, in write order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().flat_map(|p| {
            [Some(p.position.as_str()), Some(p.normal.as_str()), p.material.as_deref()]
                .into_iter()
                .flatten()
        })
    }
}

/// Persist every part of `result` under `base`.
///
/// Textures are always written. Materials are generated with `shader`; a
/// part whose material cannot be generated is recorded in
/// [`PersistReport::material_failures`] and gets no material asset. A store
/// failure stops persistence and is returned; nothing is retried.
pub fn persist_bake(
    store: &dyn AssetStore,
    base: &str,
    result: &BakeResult,
    shader: Option<&ShaderRef>,
) -> Result<PersistReport, PersistError> {
    persist_parts(store, base, result, Materials::Generate(shader))
}

/// Persist only the textures of every part of `result` under `base`.
///
/// No material is generated, so the report never lists material failures.
pub fn persist_textures(
    store: &dyn AssetStore,
    base: &str,
    result: &BakeResult,
) -> Result<PersistReport, PersistError> {
    persist_parts(store, base, result, Materials::Skip)
}

#[derive(Clone, Copy)]
enum Materials<'a> {
    Skip,
    Generate(Option<&'a ShaderRef>),
}

fn persist_parts(
    store: &dyn AssetStore,
    base: &str,
    result: &BakeResult,
    materials: Materials<'_>,
) -> Result<PersistReport, PersistError> {
    let clip = result.clip();
    if !base.trim_matches('/').is_empty() && base.trim() != "." {
        store.create_dir(base).map_err(|source| PersistError::Store {
            path: base.to_string(),
            source,
        })?;
    }

    let asset_path = |part: &str, suffix: &str, ext: &str| {
        let file = format!("{}.{ext}", naming::asset_stem(part, &clip.name, suffix));
        store::join(base, &file).map_err(|source| PersistError::Store { path: file, source })
    };

    let mut report = PersistReport::default();
    for part in result {
        let position = asset_path(&part.name, VertexAttribute::Position.suffix(), "vat")?;
        let normal = asset_path(&part.name, VertexAttribute::Normal.suffix(), "vat")?;
        write_texture(store, &position, &part.position)?;
        write_texture(store, &normal, &part.normal)?;
        debug!("Wrote '{position}' and '{normal}'");

        let Materials::Generate(shader) = materials else {
            report.parts.push(PersistedPart {
                name: part.name.clone(),
                position,
                normal,
                material: None,
            });
            continue;
        };

        let refs = BakedTextureRefs::new(position.clone(), normal.clone());
        let material = match generate_material(&part.name, &refs, &part.material, shader, clip) {
            Ok(descriptor) => {
                let path = asset_path(&part.name, "mat", "json")?;
                let json = serde_json::to_vec_pretty(&descriptor).map_err(|source| {
                    PersistError::Json {
                        path: path.clone(),
                        source,
                    }
                })?;
                store
                    .create_asset(&path, json)
                    .map_err(|source| PersistError::Store {
                        path: path.clone(),
                        source,
                    })?;
                Some(path)
            }
            Err(err) => {
                warn!("Skipping material of '{}': {err}", part.name);
                report.material_failures.push(err);
                None
            }
        };

        report.parts.push(PersistedPart {
            name: part.name.clone(),
            position,
            normal,
            material,
        });
    }

    info!(
        "Persisted {} part(s) of clip '{}' under '{}'",
        report.parts.len(),
        clip.name,
        base
    );
    Ok(report)
}

//! The bake entry point.

use std::time::Instant;

use log::{debug, info, warn};

use crate::animation::AnimationClip;
use crate::compute::CancellationToken;
use crate::mesh::FrameSnapshot;
use crate::naming;
use crate::target::AnimatedTarget;

use super::channel::VertexAttribute;
use super::error::BakeError;
use super::extract::{BakeUnit, SpaceTransform, plan_units};
use super::pack::{PackError, TexturePacker};
use super::result::{BakeResult, BakedPart};
use super::sampler::{FrameSampler, validate_clip};
use super::settings::BakeSettings;

/// Bake `clip` on every mesh part of `target`.
///
/// See [`bake_with_cancellation`].
pub fn bake<T: AnimatedTarget + ?Sized>(
    target: &mut T,
    clip: &AnimationClip,
    settings: &BakeSettings,
) -> Result<BakeResult, BakeError> {
    bake_with_cancellation(target, clip, settings, &CancellationToken::new())
}

/// Bake `clip` on every mesh part of `target`, checking `cancel` before
/// each frame.
///
/// The clip is validated before the target is touched. A target without
/// mesh parts yields an empty result. Any failure aborts the whole bake and
/// drops every texture produced so far. Nothing is persisted and no state is
/// kept between calls.
pub fn bake_with_cancellation<T: AnimatedTarget + ?Sized>(
    target: &mut T,
    clip: &AnimationClip,
    settings: &BakeSettings,
    cancel: &CancellationToken,
) -> Result<BakeResult, BakeError> {
    validate_clip(clip)?;

    let parts = target.mesh_parts();
    if parts.is_empty() {
        warn!("Target '{}' has no mesh parts, nothing to bake", target.name());
        return Ok(BakeResult::empty(clip.clone()));
    }

    let units = plan_units(&parts, settings.pack_strategy);
    let frame_count = clip.frame_count();
    info!(
        "Baking clip '{}' on '{}': {} frames, {} unit(s), {:?} space",
        clip.name,
        target.name(),
        frame_count,
        units.len(),
        settings.space
    );

    let start = Instant::now();
    let mut scratch = FrameSnapshot::new();
    let mut baked = Vec::with_capacity(units.len());
    for unit in &units {
        let (part, returned) = bake_unit(target, clip, unit, settings, cancel, scratch)?;
        scratch = returned;
        baked.push(part);
    }

    info!("Baked clip '{}' in {:.2?}", clip.name, start.elapsed());
    Ok(BakeResult::new(clip.clone(), baked))
}

fn bake_unit<T: AnimatedTarget + ?Sized>(
    target: &mut T,
    clip: &AnimationClip,
    unit: &BakeUnit,
    settings: &BakeSettings,
    cancel: &CancellationToken,
    scratch: FrameSnapshot,
) -> Result<(BakedPart, FrameSnapshot), BakeError> {
    let frame_count = clip.frame_count();
    let transform =
        SpaceTransform::for_target(settings.space, &target.world_transform(), target.name())?;

    let packer = |attribute: VertexAttribute| {
        TexturePacker::new(unit.vertex_count, frame_count, clip.is_looping, settings)
            .with_name(naming::asset_stem(&unit.name, &clip.name, attribute.suffix()))
    };
    let mut position = packer(VertexAttribute::Position);
    let mut normal = packer(VertexAttribute::Normal);
    let pack_err = |source: PackError| BakeError::Pack {
        part: unit.name.clone(),
        source,
    };

    let mut sampler = FrameSampler::new(target, clip, unit)?
        .with_cancellation(cancel)
        .with_scratch(scratch);
    while let Some(frame) = sampler.next_frame() {
        let (index, snapshot) = frame?;
        transform.apply(snapshot);
        position
            .write_row(index, &snapshot.positions)
            .map_err(pack_err)?;
        normal.write_row(index, &snapshot.normals).map_err(pack_err)?;
    }
    let scratch = sampler.into_scratch();

    let position = position.finish().map_err(pack_err)?;
    let normal = normal.finish().map_err(pack_err)?;
    debug!(
        "Unit '{}': {} part(s), {}x{} texels",
        unit.name,
        unit.segments.len(),
        position.width(),
        position.height()
    );

    let part = BakedPart {
        name: unit.name.clone(),
        segments: unit.segments.clone(),
        material: unit.material.clone(),
        vertex_count: unit.vertex_count,
        frame_count,
        position,
        normal,
    };
    Ok((part, scratch))
}

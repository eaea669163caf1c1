//! `vatbake` command line front end.
//!
//! Loads a rig description (or the built-in demo rig), bakes one clip into
//! vertex animation textures and writes them with their materials to the
//! output directory.

mod args;

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use thiserror::Error;
use vatbake_core::bake::{self, BakeError};
use vatbake_core::material::ShaderRef;
use vatbake_core::persist::{self, PersistError};
use vatbake_core::rig::{self, RigError, SkinnedTarget};
use vatbake_core::store::FileSystemStore;
use vatbake_core::target::AnimatedTarget;

use args::BakeArgs;

#[derive(Error, Debug)]
enum AppError {
    #[error("failed to read rig '{path}': {source}")]
    ReadRig {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid rig: {0}")]
    Rig(#[from] RigError),
    #[error("rig '{0}' has no clips")]
    NoClips(String),
    #[error("rig has no clip named '{0}'")]
    UnknownClip(String),
    #[error(transparent)]
    Bake(#[from] BakeError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

fn load_target(args: &BakeArgs) -> Result<SkinnedTarget, AppError> {
    match &args.rig {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| AppError::ReadRig {
                path: path.display().to_string(),
                source,
            })?;
            Ok(SkinnedTarget::from_json(&json)?)
        }
        None => Ok(rig::demo_target()?),
    }
}

fn run(args: &BakeArgs) -> Result<(), AppError> {
    let mut target = load_target(args)?;

    if args.list_clips {
        for clip in target.clips() {
            println!(
                "{}\t{:.3}s @ {} fps{}",
                clip.name,
                clip.length,
                clip.frame_rate,
                if clip.is_looping { "\tlooping" } else { "" }
            );
        }
        return Ok(());
    }

    let clip = match &args.clip {
        Some(name) => target
            .clip(name)
            .cloned()
            .ok_or_else(|| AppError::UnknownClip(name.clone()))?,
        None => target
            .clips()
            .next()
            .cloned()
            .ok_or_else(|| AppError::NoClips(target.name().to_string()))?,
    };

    let settings = args.settings();
    let result = bake::bake(&mut target, &clip, &settings)?;

    let store = FileSystemStore::new(args.out.clone());
    let report = if args.no_materials {
        persist::persist_textures(&store, ".", &result)?
    } else {
        persist::persist_bake(&store, ".", &result, Some(&ShaderRef::new(&args.shader)))?
    };

    for part in &report.parts {
        info!(
            "{}: {} / {}{}",
            part.name,
            part.position,
            part.normal,
            part.material
                .as_deref()
                .map(|m| format!(" / {m}"))
                .unwrap_or_default()
        );
    }
    info!(
        "Baked {} part(s) of '{}' into {}",
        report.parts.len(),
        clip.name,
        store.root().display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    vatbake_core::init();

    let args = BakeArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Command line arguments.
//!
//! Uses clap for parsing, with help text (`--help`) and validation of the
//! enumerated options. [`BakeArgs::settings`] turns the flags into
//! [`BakeSettings`].

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use vatbake_core::bake::{BakeSettings, CoordinateSpace, DimensionPolicy, PackStrategy};
use vatbake_core::texture::TextureFormat;

/// Default shader referenced by generated materials.
pub const DEFAULT_SHADER: &str = "VAT/Lit";

/// Space the baked vectors are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliSpace {
    /// Relative to the target root; the runtime applies the object transform.
    Local,
    /// Absolute world space at bake time.
    #[default]
    World,
}

impl From<CliSpace> for CoordinateSpace {
    fn from(cli: CliSpace) -> Self {
        match cli {
            CliSpace::Local => CoordinateSpace::Local,
            CliSpace::World => CoordinateSpace::World,
        }
    }
}

/// Bake vertex animation textures from a skinned rig.
#[derive(Parser, Debug)]
#[command(
    name = "vatbake",
    about = "Vertex animation texture baker",
    long_about = "Samples a skeletal animation clip at a fixed frame rate and writes \
        one position and one normal texture per mesh part, plus a material \
        descriptor that binds them.\n\n\
        EXAMPLES:\n  \
          # Bake every part of the built-in demo rig\n  \
          vatbake --demo --clip twist --out baked\n\n  \
          # Bake a rig description in local space, merged by material\n  \
          vatbake --rig worm.json --space local --merge --out baked",
    version
)]
pub struct BakeArgs {
    /// Rig description (JSON) to bake.
    #[arg(long, value_name = "JSON", required_unless_present = "demo")]
    pub rig: Option<PathBuf>,

    /// Bake the built-in demo rig instead of a file.
    #[arg(long, conflicts_with = "rig")]
    pub demo: bool,

    /// Clip to bake. Defaults to the first clip of the rig.
    #[arg(long)]
    pub clip: Option<String>,

    /// List the clips of the rig and exit.
    #[arg(long)]
    pub list_clips: bool,

    /// Coordinate space of the baked vectors.
    #[arg(long, default_value = "world", value_enum)]
    pub space: CliSpace,

    /// Pack parts that share a material into one texture pair.
    #[arg(long)]
    pub merge: bool,

    /// Round texture dimensions up to powers of two.
    #[arg(long)]
    pub pot: bool,

    /// Store 32-bit floats instead of 16-bit.
    #[arg(long)]
    pub full_precision: bool,

    /// Shader referenced by generated materials.
    #[arg(long, default_value = DEFAULT_SHADER)]
    pub shader: String,

    /// Skip material generation and write textures only.
    #[arg(long)]
    pub no_materials: bool,

    /// Output directory.
    #[arg(long, short, default_value = "baked")]
    pub out: PathBuf,
}

impl BakeArgs {
    /// Bake settings selected by the flags.
    pub fn settings(&self) -> BakeSettings {
        BakeSettings::new()
            .with_space(self.space.into())
            .with_pack_strategy(if self.merge {
                PackStrategy::MergeByMaterial
            } else {
                PackStrategy::Separate
            })
            .with_dimension_policy(if self.pot {
                DimensionPolicy::NextPowerOfTwo
            } else {
                DimensionPolicy::Exact
            })
            .with_format(if self.full_precision {
                TextureFormat::Rgba32Float
            } else {
                TextureFormat::Rgba16Float
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<BakeArgs, clap::Error> {
        BakeArgs::try_parse_from(std::iter::once("vatbake").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_bake_settings() {
        let args = parse(&["--demo"]).unwrap();
        assert_eq!(args.settings(), BakeSettings::default());
        assert_eq!(args.shader, DEFAULT_SHADER);
        assert_eq!(args.out, PathBuf::from("baked"));
        assert!(args.clip.is_none());
    }

    #[test]
    fn flags_select_settings() {
        let args = parse(&[
            "--rig",
            "worm.json",
            "--space",
            "local",
            "--merge",
            "--pot",
            "--full-precision",
        ])
        .unwrap();
        let settings = args.settings();
        assert_eq!(settings.space, CoordinateSpace::Local);
        assert_eq!(settings.pack_strategy, PackStrategy::MergeByMaterial);
        assert_eq!(settings.dimension_policy, DimensionPolicy::NextPowerOfTwo);
        assert_eq!(settings.format, TextureFormat::Rgba32Float);
    }

    #[test]
    fn rig_source_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--demo", "--rig", "worm.json"]).is_err());
        assert!(parse(&["--space", "object", "--demo"]).is_err());
    }
}

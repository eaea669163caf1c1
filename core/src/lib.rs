//! # vatbake core
//!
//! Bakes skinned mesh animation into vertex animation textures (VAT): one
//! position and one normal texture per mesh part, with texel
//! `(vertex, frame)` holding the deformed vector, plus a runtime material
//! that tells the shader how to index them.
//!
//! The pipeline is driven through [`bake::bake`] against any
//! [`target::AnimatedTarget`]; results are written out with
//! [`persist::persist_bake`].

pub mod animation;
pub mod bake;
pub mod compute;
pub mod material;
pub mod math;
pub mod mesh;
pub mod naming;
pub mod persist;
pub mod rig;
pub mod sampler;
pub mod scene;
pub mod store;
pub mod target;
pub mod texture;
pub mod uv;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version once at startup.
pub fn init() {
    log::info!("vatbake core v{} initialized", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

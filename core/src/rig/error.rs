use thiserror::Error;

/// Errors raised while building a reference rig.
#[derive(Error, Debug)]
pub enum RigError {
    /// A bone's parent index does not refer to an earlier bone.
    #[error("bone '{bone}' has parent {parent}, which is not an earlier bone")]
    InvalidParent { bone: String, parent: usize },
    /// Two bones share a name.
    #[error("duplicate bone name '{0}'")]
    DuplicateBone(String),
    /// A bone's rest transform cannot be inverted.
    #[error("bone '{0}' has a degenerate rest transform")]
    DegenerateBone(String),
    /// A vertex references a bone that does not exist.
    #[error("mesh '{mesh}' vertex {vertex} references missing bone {joint}")]
    UnknownJoint { mesh: String, vertex: usize, joint: u32 },
    /// A clip channel drives a bone that does not exist.
    #[error("clip '{clip}' animates unknown bone '{bone}'")]
    UnknownBone { clip: String, bone: String },
    /// Two clips share a name.
    #[error("duplicate clip name '{0}'")]
    DuplicateClip(String),
    /// The rig description is not valid JSON.
    #[error("invalid rig description: {0}")]
    Json(#[from] serde_json::Error),
}

use bevy::reflect::prelude::*;
use thiserror::Error;

/// Possible errors produced by pose evaluation.
///
/// Evaluation never aborts mid-walk: the skinning palette always holds the
/// best-effort pose, and the first error encountered is reported alongside it.
#[non_exhaustive]
#[derive(Debug, Error, Reflect, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("bone {bone_id} has no keyframes; its parent transform was passed through")]
    NoKeyframes { bone_id: u32 },
    #[error("bone id {bone_id} does not fit in the skinning palette (capacity {capacity})")]
    BoneIndexOutOfRange { bone_id: u32, capacity: usize },
}

pub type EvaluationResult<T> = Result<T, EvaluationError>;

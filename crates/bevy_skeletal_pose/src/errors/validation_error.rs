use thiserror::Error;

/// Validation failures while building a bone tree from imported clip data.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipValidationError {
    #[error("duplicate bone name '{0}' in skeleton")]
    DuplicateBoneName(String),
    #[error("duplicate bone id {0} in skeleton")]
    DuplicateBoneId(u32),
    #[error("bone id {id} exceeds the skinning palette capacity of {capacity}")]
    BoneIdOutOfRange { id: u32, capacity: usize },
    #[error("skeleton exceeds the maximum of {0} bones")]
    TooManyBones(usize),
}

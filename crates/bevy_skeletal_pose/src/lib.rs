//! # Bevy Skeletal Pose
//!
//! CPU-side skeletal animation playback for [Bevy](https://bevyengine.org/):
//! hierarchical keyframe interpolation over an owned bone tree, producing a
//! flattened per-bone matrix palette ready for GPU skinning.
//!
//! An [`Animation`] owns its skeleton as a value-type tree of [`Bone`]s, each
//! carrying a track of timestamped [`Keyframe`]s. Every frame,
//! [`Animation::update`] advances the playback clock (looping or stopping at
//! the clip duration) and [`Animation::current_pose_transforms`] walks the
//! tree twice: pass one interpolates each bone's local pose (translation
//! lerp, NLERP rotation blend with double-cover sign correction) and composes
//! it onto the accumulated parent transform; pass two flattens the corrected
//! per-bone transforms into the skinning palette, indexed by bone id.
//!
//! Clips can be authored as `*.skelanim.ron` assets:
//!
//! ```ron
//! (
//!     name: "wave",
//!     duration: 1.5,
//!     root_bone: (
//!         name: "root",
//!         keyframes: [
//!             (timestamp: 0.0, translation: (0.0, 0.0, 0.0), rotation: (0.0, 0.0, 0.0, 1.0)),
//!             (timestamp: 1.5, translation: (0.0, 1.0, 0.0), rotation: (0.0, 0.0, 0.0, 1.0)),
//!         ],
//!     ),
//! )
//! ```
//!
//! [`SkeletalPosePlugin`] registers the asset loader and two chained
//! `PostUpdate` systems: one driving playback from [`Time`], one evaluating
//! every playing [`Animation`] into its entity's [`SkinningPalette`]
//! component, which is the seam a renderer uploads as its skinning buffer.
//!
//! Evaluation never panics on malformed assets: empty keyframe tracks pass
//! the parent transform through and report [`EvaluationError::NoKeyframes`],
//! out-of-range bone ids report [`EvaluationError::BoneIndexOutOfRange`], and
//! non-finite interpolation results are dropped so the palette holds the last
//! valid pose.
//!
//! [`Time`]: bevy::time::Time
//! [`Animation`]: crate::animation::Animation
//! [`Bone`]: crate::skeleton::Bone
//! [`Keyframe`]: crate::pose::Keyframe
//! [`SkeletalPosePlugin`]: crate::plugin::SkeletalPosePlugin
//! [`SkinningPalette`]: crate::systems::SkinningPalette
//! [`EvaluationError::NoKeyframes`]: crate::errors::EvaluationError::NoKeyframes
//! [`EvaluationError::BoneIndexOutOfRange`]: crate::errors::EvaluationError::BoneIndexOutOfRange

pub mod animation;
pub mod errors;
pub mod import;
pub mod loader;
pub mod plugin;
pub mod pose;
pub mod serial;
pub mod skeleton;
pub mod systems;

pub mod prelude {
    pub use super::animation::Animation;
    pub use super::errors::*;
    pub use super::import::BoneIndexMap;
    pub use super::loader::AnimationClipLoader;
    pub use super::plugin::SkeletalPosePlugin;
    pub use super::pose::{BoneTransform, Keyframe};
    pub use super::skeleton::{Bone, MAX_SKELETAL_BONES};
    pub use super::systems::SkinningPalette;
}

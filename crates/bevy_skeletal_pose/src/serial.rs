use bevy::math::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    animation::Animation,
    errors::ClipValidationError,
    import::BoneIndexMap,
    pose::{BoneTransform, Keyframe},
    skeleton::Bone,
};

fn identity_matrix() -> [f32; 16] {
    Mat4::IDENTITY.to_cols_array()
}

fn default_ticks_per_second() -> f32 {
    24.0
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct KeyframeSerial {
    pub timestamp: f32,
    pub translation: [f32; 3],
    /// Quaternion components in `(x, y, z, w)` order.
    pub rotation: [f32; 4],
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BoneSerial {
    pub name: String,
    /// Explicit palette index. When omitted, ids are assigned densely in
    /// pre-order while building the tree.
    #[serde(default)]
    pub id: Option<u32>,
    /// Bind-pose inverse, column-major.
    #[serde(default = "identity_matrix")]
    pub offset_matrix: [f32; 16],
    #[serde(default)]
    pub keyframes: Vec<KeyframeSerial>,
    #[serde(default)]
    pub children: Vec<BoneSerial>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnimationSerial {
    pub name: String,
    pub duration: f32,
    #[serde(default = "default_ticks_per_second")]
    pub ticks_per_second: f32,
    #[serde(default = "identity_matrix")]
    pub inverse_root_transform: [f32; 16],
    /// Coordinate-system fix-up applied uniformly to every bone, e.g. a -90
    /// degree rotation about X for assets authored Z-up.
    #[serde(default = "identity_matrix")]
    pub correction_matrix: [f32; 16],
    #[serde(default = "default_true")]
    pub should_loop: bool,
    pub root_bone: BoneSerial,
}

impl From<KeyframeSerial> for Keyframe {
    fn from(serial: KeyframeSerial) -> Self {
        Keyframe::new(
            serial.timestamp,
            BoneTransform::new(
                Vec3::from_array(serial.translation),
                Quat::from_array(serial.rotation),
            ),
        )
    }
}

impl AnimationSerial {
    /// Build a validated [`Animation`] from the serial representation. Bone
    /// ids are checked for duplicates and palette range through a fresh
    /// [`BoneIndexMap`], so concurrent imports share no state.
    pub fn into_animation(self) -> Result<Animation, ClipValidationError> {
        let mut mapping = BoneIndexMap::new();
        let root_bone = build_bone(self.root_bone, &mut mapping)?;

        let mut animation = Animation::new(
            self.name,
            self.duration,
            self.ticks_per_second,
            Mat4::from_cols_array(&self.inverse_root_transform),
            mapping.len() as u32,
            root_bone,
            Mat4::from_cols_array(&self.correction_matrix),
        );
        animation.should_loop = self.should_loop;

        Ok(animation)
    }
}

fn build_bone(
    serial: BoneSerial,
    mapping: &mut BoneIndexMap,
) -> Result<Bone, ClipValidationError> {
    let id = match serial.id {
        Some(id) => {
            mapping.insert_explicit(&serial.name, id)?;
            id
        }
        None => {
            if mapping.contains(&serial.name) {
                return Err(ClipValidationError::DuplicateBoneName(serial.name));
            }
            mapping.index_for(&serial.name)?
        }
    };

    let mut bone = Bone::new(serial.name, id);
    bone.offset_matrix = Mat4::from_cols_array(&serial.offset_matrix);
    bone.keyframes = serial.keyframes.into_iter().map(Keyframe::from).collect();
    bone.children = serial
        .children
        .into_iter()
        .map(|child| build_bone(child, mapping))
        .collect::<Result<_, _>>()?;

    Ok(bone)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_CLIP: &str = r#"(
        name: "wave",
        duration: 1.5,
        root_bone: (
            name: "root",
            keyframes: [
                (timestamp: 0.0, translation: (0.0, 0.0, 0.0), rotation: (0.0, 0.0, 0.0, 1.0)),
                (timestamp: 1.5, translation: (0.0, 1.0, 0.0), rotation: (0.0, 0.0, 0.0, 1.0)),
            ],
            children: [
                (name: "arm", keyframes: [
                    (timestamp: 0.0, translation: (0.5, 0.0, 0.0), rotation: (0.0, 0.0, 0.0, 1.0)),
                ]),
            ],
        ),
    )"#;

    #[test]
    fn parses_a_clip_and_assigns_preorder_ids() {
        let serial: AnimationSerial = ron::de::from_str(SIMPLE_CLIP).unwrap();
        let animation = serial.into_animation().unwrap();

        assert_eq!(animation.name, "wave");
        assert_eq!(animation.duration, 1.5);
        assert_eq!(animation.ticks_per_second, 24.0);
        assert!(animation.should_loop);
        assert_eq!(animation.bone_count(), 2);
        assert_eq!(animation.root_bone().id, 0);
        assert_eq!(animation.find_bone("arm").map(|bone| bone.id), Some(1));
    }

    #[test]
    fn explicit_ids_are_respected() {
        let serial: AnimationSerial = ron::de::from_str(
            r#"(
                name: "clip",
                duration: 1.0,
                root_bone: (
                    name: "root",
                    id: Some(3),
                    keyframes: [],
                ),
            )"#,
        )
        .unwrap();
        let animation = serial.into_animation().unwrap();

        assert_eq!(animation.root_bone().id, 3);
    }

    #[test]
    fn duplicate_bone_names_are_rejected() {
        let serial: AnimationSerial = ron::de::from_str(
            r#"(
                name: "clip",
                duration: 1.0,
                root_bone: (
                    name: "root",
                    children: [(name: "root")],
                ),
            )"#,
        )
        .unwrap();

        assert_eq!(
            serial.into_animation().unwrap_err(),
            ClipValidationError::DuplicateBoneName("root".into())
        );
    }

    #[test]
    fn duplicate_explicit_ids_are_rejected() {
        let serial: AnimationSerial = ron::de::from_str(
            r#"(
                name: "clip",
                duration: 1.0,
                root_bone: (
                    name: "root",
                    id: Some(0),
                    children: [(name: "child", id: Some(0))],
                ),
            )"#,
        )
        .unwrap();

        assert_eq!(
            serial.into_animation().unwrap_err(),
            ClipValidationError::DuplicateBoneId(0)
        );
    }

    #[test]
    fn keyframes_carry_over() {
        let serial: AnimationSerial = ron::de::from_str(SIMPLE_CLIP).unwrap();
        let animation = serial.into_animation().unwrap();

        let root = animation.root_bone();
        assert_eq!(root.keyframes.len(), 2);
        assert_eq!(root.keyframes[1].timestamp, 1.5);
        assert!(
            root.keyframes[1]
                .transform
                .translation
                .abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), 1e-6)
        );
    }
}

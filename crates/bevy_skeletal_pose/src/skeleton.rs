use bevy::math::prelude::*;

use crate::pose::Keyframe;

/// Capacity of the skinning palette. Bone ids must stay below this.
pub const MAX_SKELETAL_BONES: usize = 150;

/// A joint in the skeleton hierarchy. Bones own their subtree directly
/// (children never link back to their parent, so the tree is acyclic by
/// construction) and carry no behavior of their own; the tree-walk logic
/// lives in [`Animation`].
///
/// [`Animation`]: crate::animation::Animation
#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    /// Index into the flattened skinning palette. [`Bone::UNSET_ID`] until the
    /// importer assigns one.
    pub id: u32,
    pub keyframes: Vec<Keyframe>,
    /// Bind-pose inverse, set once at import.
    pub offset_matrix: Mat4,
    /// Identity unless overridden at runtime, e.g. by procedural bone control.
    pub user_transformation: Mat4,
    /// Scratch output of the last evaluation pass.
    pub(crate) final_transform: Mat4,
    pub children: Vec<Bone>,
}

impl Default for Bone {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: Self::UNSET_ID,
            keyframes: Vec::new(),
            offset_matrix: Mat4::IDENTITY,
            user_transformation: Mat4::IDENTITY,
            final_transform: Mat4::IDENTITY,
            children: Vec::new(),
        }
    }
}

impl Bone {
    /// Sentinel for a bone the importer has not assigned an id to.
    pub const UNSET_ID: u32 = u32::MAX;

    pub fn new(name: impl Into<String>, id: u32) -> Self {
        Self {
            name: name.into(),
            id,
            ..Default::default()
        }
    }

    /// World-space skinning transform produced by the last evaluation.
    pub fn final_transform(&self) -> Mat4 {
        self.final_transform
    }

    /// Indices of the keyframes bracketing `time`: the last keyframe at or
    /// before `time` and the first one after it (or the track's last keyframe
    /// when `time` runs past the end). `None` for an empty track.
    pub fn bracketing_keyframes(&self, time: f32) -> Option<(usize, usize)> {
        if self.keyframes.is_empty() {
            return None;
        }

        let mut previous = 0;
        let mut next = 0;

        for i in 1..self.keyframes.len() {
            next = i;
            if self.keyframes[i].timestamp > time {
                break;
            }
            previous = i;
        }

        Some((previous, next))
    }

    /// Depth-first search by name; returns the first match.
    pub fn find(&self, name: &str) -> Option<&Bone> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Bone> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// Pre-order traversal: the visitor sees a bone before any of its
    /// descendants.
    pub fn visit(&self, visitor: &mut impl FnMut(&Bone)) {
        visitor(self);
        for child in &self.children {
            child.visit(visitor);
        }
    }

    pub fn visit_mut(&mut self, visitor: &mut impl FnMut(&mut Bone)) {
        visitor(self);
        for child in &mut self.children {
            child.visit_mut(visitor);
        }
    }
}

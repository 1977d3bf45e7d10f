use bevy::platform::collections::HashSet;
use indexmap::IndexMap;

use crate::{errors::ClipValidationError, skeleton::MAX_SKELETAL_BONES};

/// Scoped bone-name to palette-index mapping used while importing a clip.
///
/// One map is created per import call and threaded through the build, so two
/// imports never share index state. Indices are assigned densely in the order
/// bone names are first seen; importers may also register ids of their own
/// choosing, which are validated against duplicates and the palette capacity.
#[derive(Debug, Default)]
pub struct BoneIndexMap {
    indices: IndexMap<String, u32>,
    used_ids: HashSet<u32>,
}

impl BoneIndexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index already assigned to `name`, or the next free dense index.
    pub fn index_for(&mut self, name: &str) -> Result<u32, ClipValidationError> {
        if let Some(&index) = self.indices.get(name) {
            return Ok(index);
        }

        let mut index = self.indices.len() as u32;
        while self.used_ids.contains(&index) {
            index += 1;
        }
        if index as usize >= MAX_SKELETAL_BONES {
            return Err(ClipValidationError::TooManyBones(MAX_SKELETAL_BONES));
        }

        self.indices.insert(name.to_owned(), index);
        self.used_ids.insert(index);
        Ok(index)
    }

    /// Register an importer-chosen id for `name`.
    pub fn insert_explicit(&mut self, name: &str, id: u32) -> Result<(), ClipValidationError> {
        if id as usize >= MAX_SKELETAL_BONES {
            return Err(ClipValidationError::BoneIdOutOfRange {
                id,
                capacity: MAX_SKELETAL_BONES,
            });
        }
        if self.indices.contains_key(name) {
            return Err(ClipValidationError::DuplicateBoneName(name.to_owned()));
        }
        if !self.used_ids.insert(id) {
            return Err(ClipValidationError::DuplicateBoneId(id));
        }

        self.indices.insert(name.to_owned(), id);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.indices.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

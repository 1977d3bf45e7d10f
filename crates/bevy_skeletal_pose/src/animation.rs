use bevy::{
    asset::prelude::*, ecs::prelude::*, math::prelude::*, reflect::prelude::*,
};

use crate::{
    errors::{EvaluationError, EvaluationResult},
    pose::BoneTransform,
    skeleton::{Bone, MAX_SKELETAL_BONES},
};

/// A skeletal animation clip together with its playback state and the
/// flattened skinning palette it evaluates into.
///
/// The bone tree is owned by value; cloning an `Animation` asset into a
/// component deep-copies the tree, so every playing instance has its own
/// scratch state. Evaluation is synchronous and single-threaded: the slice
/// returned by [`Animation::current_pose_transforms`] borrows the animation
/// and must be re-fetched every frame.
#[derive(Asset, Component, Reflect, Clone, Debug)]
#[reflect(Component)]
pub struct Animation {
    pub name: String,
    pub duration: f32,
    pub ticks_per_second: f32,

    pub speed: f32,
    pub speed_denominator: f32,
    pub should_loop: bool,
    pub current_time: f32,

    is_playing: bool,
    inverse_root_transform: Mat4,
    correction_matrix: Mat4,
    bone_count: u32,
    #[reflect(ignore)]
    root_bone: Bone,
    #[reflect(ignore)]
    bone_frame_transforms: Vec<Mat4>,
    skipped_pose_writes: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: 0.0,
            ticks_per_second: 0.0,
            speed: 1.0,
            speed_denominator: 1.0,
            should_loop: true,
            current_time: 0.0,
            is_playing: false,
            inverse_root_transform: Mat4::IDENTITY,
            correction_matrix: Mat4::IDENTITY,
            bone_count: 0,
            root_bone: Bone::default(),
            bone_frame_transforms: vec![Mat4::IDENTITY; MAX_SKELETAL_BONES],
            skipped_pose_writes: 0,
        }
    }
}

impl Animation {
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        ticks_per_second: f32,
        inverse_root_transform: Mat4,
        bone_count: u32,
        root_bone: Bone,
        correction_matrix: Mat4,
    ) -> Self {
        Self {
            name: name.into(),
            duration,
            ticks_per_second,
            inverse_root_transform,
            bone_count,
            root_bone,
            correction_matrix,
            ..Default::default()
        }
    }

    pub fn correction_matrix(&self) -> Mat4 {
        self.correction_matrix
    }

    pub fn bone_count(&self) -> u32 {
        self.bone_count
    }

    pub fn root_bone(&self) -> &Bone {
        &self.root_bone
    }

    pub fn root_bone_mut(&mut self) -> &mut Bone {
        &mut self.root_bone
    }

    /// Number of pass-2 palette writes dropped so far because interpolation
    /// produced a non-finite matrix.
    pub fn skipped_pose_writes(&self) -> u32 {
        self.skipped_pose_writes
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    /// Halt playback, retaining the current playback time.
    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Halt playback and rewind to the start of the clip.
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }

    /// Advance playback by `delta_seconds`, scaled by
    /// `speed / speed_denominator`. Once the time runs past the clip duration
    /// it wraps back to exactly zero when looping, otherwise playback stops.
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.is_playing {
            return;
        }

        if self.current_time < 0.0 {
            self.current_time = 0.0;
        }

        self.current_time += (delta_seconds * self.speed) / self.speed_denominator;

        if self.current_time > self.duration {
            if self.should_loop {
                self.current_time = 0.0;
            } else {
                self.stop();
            }
        }
    }

    /// Evaluate the pose at the current playback time into the skinning
    /// palette, indexed by bone id.
    ///
    /// While not playing, every slot up to the bone count is the correction
    /// matrix (a defined idle pose). While playing, pass 1 walks the tree
    /// accumulating parent transforms and pass 2 flattens the corrected
    /// per-bone transforms into the palette. The walk always completes; the
    /// first soft failure (empty keyframe track, out-of-range bone id) is
    /// returned after the palette holds the best-effort pose.
    pub fn current_pose_transforms(&mut self) -> EvaluationResult<&[Mat4]> {
        if self.bone_frame_transforms.len() != MAX_SKELETAL_BONES {
            self.bone_frame_transforms
                .resize(MAX_SKELETAL_BONES, Mat4::IDENTITY);
        }

        if !self.is_playing {
            let count = (self.bone_count as usize).min(MAX_SKELETAL_BONES);
            self.bone_frame_transforms[..count].fill(self.correction_matrix);
            return Ok(&self.bone_frame_transforms);
        }

        let mut first_error = None;

        Self::calculate_final_bone_transforms(
            &mut self.root_bone,
            Mat4::IDENTITY,
            self.current_time,
            self.inverse_root_transform,
            &mut first_error,
        );
        Self::add_bone_transform(
            &self.root_bone,
            self.correction_matrix,
            &mut self.bone_frame_transforms,
            &mut self.skipped_pose_writes,
            &mut first_error,
        );

        match first_error {
            None => Ok(&self.bone_frame_transforms),
            Some(error) => Err(error),
        }
    }

    pub fn find_bone(&self, name: &str) -> Option<&Bone> {
        self.root_bone.find(name)
    }

    /// Mutable lookup, e.g. to override a bone's `user_transformation` for
    /// procedural control.
    pub fn find_bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.root_bone.find_mut(name)
    }

    pub fn for_each_bone(&self, mut visitor: impl FnMut(&Bone)) {
        self.root_bone.visit(&mut visitor);
    }

    pub fn for_each_bone_mut(&mut self, mut visitor: impl FnMut(&mut Bone)) {
        self.root_bone.visit_mut(&mut visitor);
    }

    /// Pass 1: depth-first, pre-order. Interpolates each bone's local pose at
    /// `time`, composes it onto the accumulated parent transform and stores
    /// the bind-pose-relative result in the bone's scratch transform.
    ///
    /// A bone with an empty track passes the parent transform through
    /// unchanged so its descendants still animate correctly.
    fn calculate_final_bone_transforms(
        bone: &mut Bone,
        parent_transform: Mat4,
        time: f32,
        inverse_root_transform: Mat4,
        first_error: &mut Option<EvaluationError>,
    ) {
        let world_transform = match bone.bracketing_keyframes(time) {
            Some((previous, next)) => {
                let progression = Self::progression(bone, previous, next, time);
                let pose = BoneTransform::interpolate(
                    &bone.keyframes[previous].transform,
                    &bone.keyframes[next].transform,
                    progression,
                );
                parent_transform * pose.local_matrix()
            }
            None => {
                first_error.get_or_insert(EvaluationError::NoKeyframes { bone_id: bone.id });
                parent_transform
            }
        };

        bone.final_transform = inverse_root_transform * world_transform * bone.offset_matrix;

        for child in &mut bone.children {
            Self::calculate_final_bone_transforms(
                child,
                world_transform,
                time,
                inverse_root_transform,
                first_error,
            );
        }
    }

    /// Fraction of the way `time` is through the bracketed keyframe interval.
    /// A zero-length interval (coincident timestamps, single keyframe, or time
    /// past the end of the track) resolves to the first sample.
    fn progression(bone: &Bone, previous: usize, next: usize, time: f32) -> f32 {
        let interval = bone.keyframes[next].timestamp - bone.keyframes[previous].timestamp;
        if interval.abs() <= f32::EPSILON {
            return 0.0;
        }
        (time - bone.keyframes[previous].timestamp) / interval
    }

    /// Pass 2: depth-first. Applies the per-bone user override and the global
    /// correction matrix, then flattens into the palette by bone id. A
    /// non-finite result is dropped and the previous palette entry kept.
    fn add_bone_transform(
        bone: &Bone,
        correction_matrix: Mat4,
        palette: &mut [Mat4],
        skipped_pose_writes: &mut u32,
        first_error: &mut Option<EvaluationError>,
    ) {
        let entry = bone.user_transformation * correction_matrix * bone.final_transform;

        if bone.id as usize >= palette.len() {
            first_error.get_or_insert(EvaluationError::BoneIndexOutOfRange {
                bone_id: bone.id,
                capacity: palette.len(),
            });
        } else if !entry.is_finite() {
            *skipped_pose_writes += 1;
        } else {
            palette[bone.id as usize] = entry;
        }

        for child in &bone.children {
            Self::add_bone_transform(
                child,
                correction_matrix,
                palette,
                skipped_pose_writes,
                first_error,
            );
        }
    }
}

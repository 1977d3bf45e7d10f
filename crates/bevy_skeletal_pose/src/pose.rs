use bevy::{math::prelude::*, reflect::prelude::*, transform::prelude::*};

/// A single bone's sampled local transform: a translation and a rotation
/// applied in bone-local space.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct BoneTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl BoneTransform {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: Vec3::ONE,
        }
    }

    /// Local pose matrix: translate, then rotate in bone-local space.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }

    /// Blend between two samples. Translation is a plain component-wise lerp,
    /// rotation a normalized linear blend ([NLERP]).
    ///
    /// `progression` is expected in `[0, 1]` but is not clamped; callers may
    /// extrapolate.
    ///
    /// [NLERP]: https://en.wikipedia.org/wiki/Slerp#Geometric_slerp
    pub fn interpolate(first: &Self, second: &Self, progression: f32) -> Self {
        Self {
            translation: first.translation.lerp(second.translation, progression),
            rotation: nlerp(first.rotation, second.rotation, progression),
        }
    }
}

/// Normalized linear quaternion blend with double-cover sign correction:
/// when `dot(a, b) < 0`, `b` is negated so the blend takes the short path.
fn nlerp(a: Quat, b: Quat, blend: f32) -> Quat {
    let b = if a.dot(b) < 0.0 { -b } else { b };
    let blend_i = 1.0 - blend;

    Quat::from_xyzw(
        blend_i * a.x + blend * b.x,
        blend_i * a.y + blend * b.y,
        blend_i * a.z + blend * b.z,
        blend_i * a.w + blend * b.w,
    )
    .normalize()
}

/// A timestamped [`BoneTransform`]. Timestamps within one bone's track are
/// assumed non-decreasing; the importer is responsible for sorting them.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub timestamp: f32,
    pub transform: BoneTransform,
}

impl Keyframe {
    pub fn new(timestamp: f32, transform: BoneTransform) -> Self {
        Self {
            timestamp,
            transform,
        }
    }
}

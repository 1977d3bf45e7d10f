use bevy::{
    ecs::prelude::*, log::prelude::*, math::prelude::*, reflect::prelude::*, time::prelude::*,
};

use crate::animation::Animation;

/// Flattened per-bone skinning matrices, indexed by bone id. Refreshed every
/// frame from the owning entity's [`Animation`]; the renderer should re-read
/// it each frame it draws the skinned mesh.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component)]
pub struct SkinningPalette {
    pub joints: Vec<Mat4>,
}

/// Advances playback time on every [`Animation`] component.
pub fn advance_animations(time: Res<Time>, mut animations: Query<&mut Animation>) {
    for mut animation in &mut animations {
        animation.update(time.delta_secs());
    }
}

/// Evaluates every playing [`Animation`] into its entity's
/// [`SkinningPalette`]. On a soft evaluation failure the palette is left
/// untouched, so the renderer keeps the last valid pose.
pub fn sample_poses(mut query: Query<(Entity, &mut Animation, &mut SkinningPalette)>) {
    for (entity, mut animation, mut palette) in &mut query {
        match animation.current_pose_transforms() {
            Ok(pose) => {
                palette.joints.clear();
                palette.joints.extend_from_slice(pose);
            }
            Err(error) => {
                warn!("pose evaluation failed for {entity}: {error}");
            }
        }
    }
}

use bevy::{
    app::{App, Plugin, PostUpdate},
    asset::AssetApp,
    ecs::schedule::IntoScheduleConfigs,
};

use crate::{
    animation::Animation,
    loader::AnimationClipLoader,
    systems::{SkinningPalette, advance_animations, sample_poses},
};

/// Adds skeletal animation playback support to an app.
pub struct SkeletalPosePlugin;

impl Plugin for SkeletalPosePlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<Animation>()
            .init_asset_loader::<AnimationClipLoader>()
            .register_type::<Animation>()
            .register_type::<SkinningPalette>()
            .add_systems(PostUpdate, (advance_animations, sample_poses).chain());
    }
}

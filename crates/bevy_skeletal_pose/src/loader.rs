use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use bevy::reflect::TypePath;

use crate::{animation::Animation, errors::AssetLoaderError, serial::AnimationSerial};

/// Loads [`Animation`] assets from `*.skelanim.ron` files.
#[derive(Default, TypePath)]
pub struct AnimationClipLoader;

impl AssetLoader for AnimationClipLoader {
    type Asset = Animation;
    type Settings = ();
    type Error = AssetLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        let serial: AnimationSerial = ron::de::from_bytes(&bytes)?;

        Ok(serial.into_animation()?)
    }

    fn extensions(&self) -> &[&str] {
        &["skelanim.ron"]
    }
}

//! Loads any `Deserialize` asset straight from a `.ron` file.

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
};
use serde::Deserialize;
use std::marker::PhantomData;
use thiserror::Error;

pub struct RonAssetPlugin<A> {
    extensions: Vec<&'static str>,
    _marker: PhantomData<fn() -> A>,
}

impl<A> Default for RonAssetPlugin<A> {
    fn default() -> Self {
        Self {
            extensions: vec!["ron"],
            _marker: PhantomData,
        }
    }
}

impl<A> Plugin for RonAssetPlugin<A>
where
    for<'de> A: Asset + Deserialize<'de>,
{
    fn build(&self, app: &mut App) {
        app.init_asset::<A>()
            .register_asset_loader(RonLoader::<A> {
                extensions: self.extensions.clone(),
                _marker: PhantomData,
            });
    }
}

struct RonLoader<A> {
    extensions: Vec<&'static str>,
    _marker: PhantomData<fn() -> A>,
}

#[derive(Debug, Error)]
pub enum RonLoaderError {
    #[error("could not read asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse RON: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

impl<A> AssetLoader for RonLoader<A>
where
    for<'de> A: Asset + Deserialize<'de>,
{
    type Asset = A;
    type Settings = ();
    type Error = RonLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        let asset = ron::de::from_bytes::<A>(&bytes)?;
        debug!("parsed '{}'", load_context.path().display());
        Ok(asset)
    }

    fn extensions(&self) -> &[&str] {
        &self.extensions
    }
}

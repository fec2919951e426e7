//! The app's screen states and transitions between them.
use crate::{asset_loading::ResourceHandles, models::*};
use bevy::prelude::*;

mod loading;

pub fn plugin(app: &mut App) {
    app.init_state::<Screen>();
    app.add_plugins(loading::plugin);
}

/// True once every tracked asset resource has been inserted.
pub fn all_loaded(handles: Res<ResourceHandles>) -> bool {
    handles.is_all_done()
}

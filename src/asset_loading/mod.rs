use crate::models::Config;
use bevy::prelude::*;

mod ron;
mod tracking;

pub use self::ron::*;
pub use tracking::*;

pub const CONFIG_PATH: &str = "config.ron";

pub fn plugin(app: &mut App) {
    // start asset loading
    app.add_plugins(tracking::plugin)
        .add_plugins(RonAssetPlugin::<Config>::default())
        .load_resource_from_path::<Config>(CONFIG_PATH);
}

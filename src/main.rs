// Disable console on Windows for non-dev builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::{app::App, asset::AssetMetaCheck, log, prelude::*};

pub mod asset_loading;
pub mod card;
pub mod catalog;
pub mod fx;
pub mod game;
pub mod models;
pub mod particles;
pub mod scene;
pub mod screens;
pub mod sequencer;
pub mod ui;

use models::*;

fn main() {
    let mut app = App::new();

    let window = WindowPlugin {
        primary_window: Some(game::portal_window()),
        exit_condition: game::exit_condition(),
        ..default()
    };
    let assets = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };
    // DEBUG
    // let filter = "info,wgpu=warn,naga=off,bevy_enhanced_input=debug".to_string();
    let filter = "info,dimension_portal=debug,calloop=off,naga=off,wgpu=warn".to_string();
    let log_level = log::LogPlugin {
        level: log::Level::DEBUG,
        filter,
        ..Default::default()
    };

    app.add_plugins(DefaultPlugins.set(window).set(assets).set(log_level));

    // custom plugins. the order is important
    // be sure you use resources/types AFTER you add plugins that insert them
    app.add_plugins((asset_loading::plugin, ui::plugin, game::plugin));

    app.run();
}

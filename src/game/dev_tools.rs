//! Development tools. This plugin is only enabled in native dev builds.
use super::*;
use bevy::dev_tools::states::log_transitions;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(EguiPlugin::default())
        .add_plugins(WorldInspectorPlugin::new().run_if(debug_ui_enabled))
        .add_systems(Update, log_transitions::<Screen>);
}

/// The inspector follows the same chord as the rest of the debug overlay.
fn debug_ui_enabled(state: Res<PortalState>) -> bool {
    state.debug_ui
}

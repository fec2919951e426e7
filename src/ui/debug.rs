//! The debug chord toggles layout outlines and the fps counter.
use super::*;
use crate::sequencer::{InteractionState, Showcase};
use bevy::{
    dev_tools::fps_overlay::{FpsOverlayConfig, FpsOverlayPlugin},
    diagnostic::EntityCountDiagnosticsPlugin,
};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FpsOverlayPlugin {
            config: FpsOverlayConfig {
                enabled: false,
                text_color: NEON_GREEN,
                ..default()
            },
        },
        EntityCountDiagnosticsPlugin::default(),
    ))
    .add_systems(OnEnter(Screen::Portal), spawn_debug_panel)
    .add_systems(
        Update,
        (
            send_toggle
                .in_set(PortalSystems::RecordInput)
                .run_if(debug_chord_pressed),
            update_debug_panel.in_set(PortalSystems::ChangeUi),
        ),
    )
    .add_observer(toggle_debug_ui);
}

fn send_toggle(mut commands: Commands) {
    commands.trigger(ToggleDebugUi);
}

fn spawn_debug_panel(mut commands: Commands) {
    commands.spawn((
        Name::new("Debug Panel"),
        DebugPanel,
        DespawnOnExit(Screen::Portal),
        label("", 12.0, NEON_GREEN),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            bottom: Val::Px(8.0),
            ..default()
        },
        GlobalZIndex(20),
        Visibility::Hidden,
    ));
}

fn panel_text(state: &InteractionState, showcase: &Showcase) -> String {
    let shown = showcase
        .record
        .as_ref()
        .map_or("none".to_string(), |r| format!("#{} {}", r.id, r.name));
    format!("phase: {:?}\nlast: {shown}", state.phase())
}

fn update_debug_panel(
    portal: Res<PortalState>,
    state: Res<InteractionState>,
    showcase: Res<Showcase>,
    mut panel: Query<(&mut Text, &mut Visibility), With<DebugPanel>>,
) {
    for (mut text, mut visibility) in panel.iter_mut() {
        *visibility = if portal.debug_ui {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if portal.debug_ui {
            text.0 = panel_text(&state, &showcase);
        }
    }
}

fn toggle_debug_ui(
    _: On<ToggleDebugUi>,
    mut state: ResMut<PortalState>,
    mut outlines: ResMut<UiDebugOptions>,
    mut fps: ResMut<FpsOverlayConfig>,
) {
    state.debug_ui = !state.debug_ui;
    outlines.enabled = state.debug_ui;
    fps.enabled = state.debug_ui;
    info!("debug overlay {}", if state.debug_ui { "on" } else { "off" });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_reports_phase_and_last_catch() {
        let state = InteractionState::default();
        let showcase = Showcase {
            record: Some(crate::catalog::fixtures::bulbasaur()),
            visible: true,
        };
        assert_eq!(panel_text(&state, &showcase), "phase: Idle\nlast: #1 bulbasaur");
    }

    #[test]
    fn toggle_flips_every_overlay_together() {
        let mut app = App::new();
        app.init_resource::<PortalState>()
            .init_resource::<UiDebugOptions>()
            .insert_resource(FpsOverlayConfig::default())
            .add_observer(toggle_debug_ui);

        app.world_mut().trigger(ToggleDebugUi);
        assert!(app.world().resource::<PortalState>().debug_ui);
        assert!(app.world().resource::<UiDebugOptions>().enabled);
        assert!(app.world().resource::<FpsOverlayConfig>().enabled);

        app.world_mut().trigger(ToggleDebugUi);
        assert!(!app.world().resource::<UiDebugOptions>().enabled);
        assert!(!app.world().resource::<FpsOverlayConfig>().enabled);
    }
}

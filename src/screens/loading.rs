//! Waits for `config.ron`, then opens the portal.
use super::*;
use crate::ui::*;

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Loading), spawn_loading)
        .add_systems(
            Update,
            enter_portal.run_if(in_state(Screen::Loading).and(all_loaded)),
        );
}

fn spawn_loading(mut commands: Commands) {
    commands.spawn((
        ui_root("Loading Screen"),
        DespawnOnExit(Screen::Loading),
        children![label("Charging the portal...", 18.0, INSTRUCTION)],
    ));
}

fn enter_portal(
    config: Option<Res<Config>>,
    mut next: ResMut<NextState<Screen>>,
    mut commands: Commands,
) {
    if config.is_none() {
        warn!("no config resource after loading, using compiled-in defaults");
        commands.insert_resource(Config::default());
    }
    debug!("assets ready, entering portal");
    next.set(Screen::Portal);
}

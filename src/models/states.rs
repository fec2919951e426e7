use super::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<PortalState>();
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct PortalState {
    pub debug_ui: bool,
    pub screen_shake: bool,
}

impl Default for PortalState {
    fn default() -> Self {
        Self {
            debug_ui: false,
            screen_shake: true,
        }
    }
}

/// The app's screen states.
/// See <https://bevy-cheatbook.github.io/programming/states.html>
#[derive(States, Default, Clone, Eq, PartialEq, Debug, Hash, Reflect)]
pub enum Screen {
    // Config and fonts are loaded here
    #[default]
    Loading,
    // The pokeball, the card and the whole catch flow
    Portal,
}

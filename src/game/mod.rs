use crate::*;

#[cfg(feature = "dev_native")]
mod dev_tools;
mod window;

pub use window::{TITLE, exit_condition, portal_window};

pub fn plugin(app: &mut App) {
    app.add_plugins((
        models::plugin,
        catalog::plugin,
        sequencer::plugin,
        scene::plugin,
        card::plugin,
        particles::plugin,
        fx::plugin,
        window::plugin,
        #[cfg(feature = "dev_native")]
        dev_tools::plugin,
        screens::plugin,
    ));
}

//! Everything drawn in screen space: the HUD, the backdrop and the debug overlay.
//! The creature card lives in its own module but builds on the same widgets.
use crate::models::*;
use bevy::prelude::*;

mod backdrop;
mod debug;
mod hud;
mod interaction;
mod palette;
mod widget;

pub use backdrop::Orb;
pub use interaction::Dimmed;
pub use palette::*;
pub use widget::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((
        interaction::plugin,
        hud::plugin,
        backdrop::plugin,
        debug::plugin,
    ));
}

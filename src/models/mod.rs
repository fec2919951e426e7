use bevy::prelude::*;
use serde::{Deserialize, Serialize};

mod config;
mod event_dispatch;
mod ext_traits;
mod input;
mod primitives;
mod states;

pub use config::*;
pub use event_dispatch::*;
pub use ext_traits::*;
pub use input::*;
pub use primitives::*;
pub use states::*;

pub fn plugin(app: &mut App) {
    app.configure_sets(
        Update,
        (
            PortalSystems::TickTimers,
            PortalSystems::RecordInput,
            PortalSystems::Sequence,
            PortalSystems::Animate,
            PortalSystems::ChangeUi,
        )
            .chain(),
    );

    app.add_plugins((states::plugin, input::plugin, event_dispatch::plugin));
}

/// High-level groupings of systems for the app in the [`Update`] schedule.
/// When adding a new variant, make sure to order it in the `configure_sets`
/// call above.
#[derive(SystemSet, Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum PortalSystems {
    /// Tick timers.
    TickTimers,
    /// Record player input.
    RecordInput,
    /// Advance the catch sequence.
    Sequence,
    /// Tweens, particles and other per-frame motion.
    Animate,
    /// Change UI.
    ChangeUi,
}

/// Named poses of the pokeball lid driven by the sequencer.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[reflect(Component)]
pub enum BallPose {
    #[default]
    Closed,
    Open,
}

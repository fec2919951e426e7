use super::*;
use bevy_enhanced_input::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_observer(catch_on_input);
}

/// A single catch attempt was requested, from the ball, the button or the keyboard.
/// The sequencer decides whether it is accepted.
#[derive(Event, Debug, Clone, Copy)]
pub struct CatchRequested;

#[derive(Event)]
pub struct ToggleDebugUi;

/// Moves the pokeball to one of its named poses.
#[derive(Event, Debug, Clone, Copy, Deref)]
pub struct SetBallPose(pub BallPose);

/// Short wobble before the lid pops.
#[derive(Event, Debug, Clone, Copy)]
pub struct ShakeBall;

/// Full-screen white flash.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScreenFlash;

/// Glowing rift behind the ball.
#[derive(Event, Debug, Clone, Copy)]
pub struct PortalGlow;

/// Camera trauma, `0.0..=1.0`.
#[derive(Event, Debug, Clone, Copy, Deref)]
pub struct ShakeScreen(pub f32);

/// The instruction line failed loudly, flash it red.
#[derive(Event, Debug, Clone, Copy)]
pub struct InstructionAlert;

/// The card from the previous catch should fade out of view.
#[derive(Event, Debug, Clone, Copy)]
pub struct DismissCard;

/// The particle field should be rebuilt for this primary type.
#[derive(Event, Debug, Clone, Deref)]
pub struct TypeThemeChanged(pub String);

/// Layer a golden particle burst over the field.
#[derive(Event, Debug, Clone, Copy)]
pub struct LegendaryBurst;

// ================== trigger events on input ========================
fn catch_on_input(_: On<Start<Catch>>, mut commands: Commands) {
    commands.trigger(CatchRequested);
}

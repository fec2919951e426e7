use super::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use bevy_enhanced_input::prelude::*;

pub fn plugin(app: &mut App) {
    app.add_plugins(EnhancedInputPlugin)
        .add_input_context::<PortalCtx>()
        .init_resource::<PointerNdc>()
        .add_systems(Startup, spawn_ctx)
        .add_systems(Update, track_pointer.in_set(PortalSystems::RecordInput))
        .add_observer(add_portal_ctx);
}

markers!(PortalCtx);

fn spawn_ctx(mut commands: Commands) {
    commands.spawn((Name::new("Portal input"), PortalCtx));
}

#[derive(InputAction)]
#[action_output(bool)]
pub struct Catch;

/// Pointer position in normalized device coordinates, `-1.0..=1.0` on both axes.
/// Y grows downwards, the same way window coordinates do.
#[derive(Resource, Reflect, Debug, Clone, Copy, Default, Deref)]
#[reflect(Resource)]
pub struct PointerNdc(pub Vec2);

impl PointerNdc {
    pub fn from_cursor(position: Vec2, window_size: Vec2) -> Self {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return Self::default();
        }
        Self((position / window_size) * 2.0 - Vec2::ONE)
    }
}

fn add_portal_ctx(add: On<Add, PortalCtx>, mut commands: Commands) {
    commands.entity(add.entity).insert(actions!(PortalCtx[
        (
            Action::<Catch>::new(),
            ActionSettings {
                require_reset: true,
                ..Default::default()
            },
            bindings![KeyCode::Space, KeyCode::Enter, GamepadButton::South],
        ),
    ]));
}

fn track_pointer(
    mut moves: MessageReader<CursorMoved>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerNdc>,
) {
    let Some(last) = moves.read().last() else {
        return;
    };
    let Ok(window) = window.single() else {
        return;
    };
    *pointer = PointerNdc::from_cursor(last.position, window.size());
}

/// `Ctrl+Shift+I` everywhere, `Cmd+Option+I` on macOS keyboards.
pub fn debug_chord_pressed(keys: Res<ButtonInput<KeyCode>>) -> bool {
    debug_chord(&keys)
}

pub fn debug_chord(keys: &ButtonInput<KeyCode>) -> bool {
    if !keys.just_pressed(KeyCode::KeyI) {
        return false;
    }
    let control = keys.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    let super_key = keys.any_pressed([KeyCode::SuperLeft, KeyCode::SuperRight]);
    let alt = keys.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]);

    (control && shift) || (super_key && alt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_maps_to_ndc() {
        let size = Vec2::new(500.0, 750.0);
        assert_eq!(PointerNdc::from_cursor(Vec2::ZERO, size).0, Vec2::new(-1.0, -1.0));
        assert_eq!(PointerNdc::from_cursor(size, size).0, Vec2::ONE);
        assert_eq!(PointerNdc::from_cursor(size / 2.0, size).0, Vec2::ZERO);
        assert_eq!(PointerNdc::from_cursor(Vec2::ONE, Vec2::ZERO).0, Vec2::ZERO);
    }

    #[test]
    fn debug_chord_needs_both_modifiers() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ControlLeft);
        keys.press(KeyCode::KeyI);
        assert!(!debug_chord(&keys));

        keys.press(KeyCode::ShiftRight);
        keys.release(KeyCode::KeyI);
        keys.clear();
        keys.press(KeyCode::KeyI);
        assert!(debug_chord(&keys));
    }

    #[test]
    fn debug_chord_accepts_mac_combination() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::SuperLeft);
        keys.press(KeyCode::AltLeft);
        keys.press(KeyCode::KeyI);
        assert!(debug_chord(&keys));
    }

    #[test]
    fn held_key_does_not_retrigger() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::ControlLeft);
        keys.press(KeyCode::ShiftLeft);
        keys.press(KeyCode::KeyI);
        keys.clear();
        assert!(!debug_chord(&keys));
    }
}

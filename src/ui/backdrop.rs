//! Soft neon orbs behind everything, drifting against the pointer.
use super::*;
use bevy::ui::{UiTransform, Val::*, Val2};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Portal), spawn_orbs).add_systems(
        Update,
        parallax
            .in_set(PortalSystems::ChangeUi)
            .run_if(resource_changed::<PointerNdc>),
    );
}

/// Background orb, the index sets how far it follows the pointer.
#[derive(Component, Debug, Clone, Copy)]
pub struct Orb(pub usize);

impl Orb {
    /// Pixel offset for a pointer position, nearer orbs move more.
    pub fn offset(&self, pointer: Vec2) -> Vec2 {
        pointer * (self.0 as f32 + 1.0) * 10.0
    }
}

const ORBS: [(Color, f32, Val, Val); 3] = [
    (NEON_CYAN, 300.0, Percent(-10.0), Percent(-5.0)),
    (NEON_PINK, 250.0, Percent(55.0), Percent(60.0)),
    (NEON_VIOLET, 200.0, Percent(60.0), Percent(5.0)),
];

fn spawn_orbs(mut commands: Commands) {
    let orbs = ORBS.iter().enumerate().map(|(i, (color, size, left, top))| {
        (
            Name::new(format!("Orb {i}")),
            Orb(i),
            Node {
                position_type: PositionType::Absolute,
                left: *left,
                top: *top,
                width: Px(*size),
                height: Px(*size),
                ..default()
            },
            BorderRadius::MAX,
            BackgroundColor(color.with_alpha(0.12)),
            BoxShadow::new(color.with_alpha(0.25), Px(0.0), Px(0.0), Px(20.0), Px(80.0)),
            UiTransform::default(),
            Pickable::IGNORE,
        )
    });

    commands
        .spawn((
            Name::new("Backdrop"),
            DespawnOnExit(Screen::Portal),
            GlobalZIndex(-1),
            Node {
                position_type: PositionType::Absolute,
                width: Percent(100.0),
                height: Percent(100.0),
                overflow: Overflow::clip(),
                ..default()
            },
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            for orb in orbs {
                parent.spawn(orb);
            }
        });
}

fn parallax(pointer: Res<PointerNdc>, mut orbs: Query<(&Orb, &mut UiTransform)>) {
    for (orb, mut transform) in orbs.iter_mut() {
        let offset = orb.offset(**pointer);
        transform.translation = Val2::px(offset.x, offset.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn further_orbs_follow_the_pointer_more() {
        let pointer = Vec2::new(1.0, -0.5);
        assert_eq!(Orb(0).offset(pointer), Vec2::new(10.0, -5.0));
        assert_eq!(Orb(2).offset(pointer), Vec2::new(30.0, -15.0));
        assert_eq!(Orb(1).offset(Vec2::ZERO), Vec2::ZERO);
    }
}

//! Title, instruction line and the CATCH button.
use super::*;
use crate::sequencer::{Instruction, InteractionState};
use bevy::{
    math::curve::{Curve, EaseFunction},
    ui::{UiTransform, Val::*, Val2},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Portal), spawn_hud)
        .add_systems(
            Update,
            (play_intro, sync_instruction, dim_catch_button)
                .in_set(PortalSystems::ChangeUi)
                .run_if(in_state(Screen::Portal)),
        );
}

/// Slide and fade in once after the screen appears.
#[derive(Component, Debug, Clone)]
pub struct Intro {
    delay: f32,
    duration: f32,
    /// Vertical offset in pixels the node slides in from.
    offset: f32,
    ease: EaseFunction,
    elapsed: f32,
}

impl Intro {
    fn new(delay: f32, duration: f32, offset: f32, ease: EaseFunction) -> Self {
        Self {
            delay,
            duration,
            offset,
            ease,
            elapsed: 0.0,
        }
    }

    fn progress(&self) -> f32 {
        let local = ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0);
        self.ease.sample_clamped(local)
    }

    fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

fn spawn_hud(mut commands: Commands, instruction: Res<Instruction>) {
    commands.spawn((
        ui_root("Portal UI"),
        PortalUi,
        DespawnOnExit(Screen::Portal),
        GlobalZIndex(1),
        children![
            (
                Name::new("Title"),
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    ..default()
                },
                Intro::new(0.0, 0.8, -30.0, EaseFunction::QuadraticOut),
                UiTransform::default(),
                Pickable::IGNORE,
                children![
                    label("POKÉMON", 34.0, NEON_CYAN),
                    label("DIMENSION PORTAL", 16.0, NEON_PINK),
                ],
            ),
            (
                Name::new("Controls"),
                Node {
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Px(14.0),
                    ..default()
                },
                Pickable::IGNORE,
                children![
                    (
                        InstructionLabel,
                        label(instruction.as_str(), 15.0, INSTRUCTION),
                        Intro::new(0.3, 0.6, 0.0, EaseFunction::Linear),
                        UiTransform::default(),
                    ),
                    (
                        CatchButton,
                        btn("CATCH", ButtonPalette::neon(NEON_CYAN), catch),
                        Intro::new(0.5, 0.6, 30.0, EaseFunction::BackOut),
                        UiTransform::default(),
                    ),
                ],
            ),
        ],
    ));
}

fn catch(_: On<Pointer<Click>>, mut commands: Commands) {
    commands.trigger(CatchRequested);
}

fn play_intro(
    time: Res<Time>,
    mut intros: Query<(Entity, &mut Intro, &mut UiTransform, Option<&Children>)>,
    mut colors: Query<&mut TextColor>,
    children: Query<&Children>,
    mut commands: Commands,
) {
    for (entity, mut intro, mut transform, direct) in intros.iter_mut() {
        intro.elapsed += time.delta_secs();
        let p = intro.progress();
        transform.translation = Val2::px(0.0, intro.offset * (1.0 - p));

        // the label itself, its children, and the text inside a button
        let grandchildren = direct
            .into_iter()
            .flatten()
            .flat_map(|c| children.get(*c).into_iter().flatten());
        let texts = std::iter::once(&entity)
            .chain(direct.into_iter().flatten())
            .chain(grandchildren);
        for text in texts {
            if let Ok(mut color) = colors.get_mut(*text) {
                color.0 = color.0.with_alpha(p.min(1.0) * base_alpha(color.0));
            }
        }

        if intro.is_finished() {
            commands.entity(entity).remove::<Intro>();
        }
    }
}

/// The alpha a text colour settles at once fully shown.
fn base_alpha(color: Color) -> f32 {
    if color == INSTRUCTION.with_alpha(color.alpha()) {
        INSTRUCTION.alpha()
    } else {
        1.0
    }
}

fn sync_instruction(
    instruction: Res<Instruction>,
    mut label: Query<&mut Text, With<InstructionLabel>>,
) {
    if !instruction.is_changed() {
        return;
    }
    for mut text in label.iter_mut() {
        text.0.clone_from(&instruction.0);
    }
}

fn dim_catch_button(
    state: Res<InteractionState>,
    wrappers: Query<&Children, With<CatchButton>>,
    mut buttons: Query<(Entity, &ButtonPalette, &mut BackgroundColor, &mut BorderColor, Has<Dimmed>)>,
    mut commands: Commands,
) {
    let busy = state.is_busy();
    for content in wrappers.iter().flatten() {
        let Ok((entity, palette, mut bg, mut border, dimmed)) = buttons.get_mut(*content) else {
            continue;
        };
        if busy == dimmed {
            continue;
        }
        let factor = if busy { 0.4 } else { 1.0 };
        bg.0 = palette.idle.bg.faded(factor);
        *border = BorderColor::all(palette.idle.border.faded(factor));
        if busy {
            commands.entity(entity).insert(Dimmed);
        } else {
            commands.entity(entity).remove::<Dimmed>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_waits_for_delay() {
        let mut intro = Intro::new(0.5, 0.6, 30.0, EaseFunction::BackOut);
        intro.elapsed = 0.4;
        assert_eq!(intro.progress(), 0.0);
        intro.elapsed = 1.1;
        assert!((intro.progress() - 1.0).abs() < 1e-5);
        assert!(intro.is_finished());
    }

    #[test]
    fn instruction_keeps_its_softer_alpha() {
        assert!((base_alpha(INSTRUCTION.with_alpha(0.0)) - 0.6).abs() < 1e-6);
        assert_eq!(base_alpha(NEON_CYAN.with_alpha(0.2)), 1.0);
    }
}

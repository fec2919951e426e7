use super::*;
use bevy::{
    ecs::{spawn::SpawnWith, system::IntoObserverSystem},
    ui::Val::*,
};
use std::borrow::Cow;

/// A root UI node that fills the window and stacks its content in a column.
pub fn ui_root(name: impl Into<Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            width: Percent(100.0),
            height: Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::SpaceBetween,
            align_items: AlignItems::Center,
            padding: UiRect::axes(Px(16.0), Px(28.0)),
            ..default()
        },
        // Don't block picking events for the ball underneath.
        Pickable::IGNORE,
    )
}

pub fn label(content: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Label,
        Text::new(content),
        TextFont::from_font_size(size),
        TextColor(color),
        TextLayout::new_with_justify(Justify::Center),
        Pickable::IGNORE,
    )
}

/// A rounded neon button with text and an action defined as an [`Observer`].
/// Hover and press colours come from its [`ButtonPalette`].
pub fn btn<E, B, M, I>(content: impl Into<String>, palette: ButtonPalette, action: I) -> impl Bundle
where
    E: EntityEvent,
    B: Bundle,
    I: IntoObserverSystem<E, B, M>,
{
    let content = content.into();
    let action = IntoObserverSystem::into_system(action);
    (
        Name::new(format!("Button {content}")),
        Node::default(),
        Pickable::IGNORE,
        Children::spawn(SpawnWith(move |parent: &mut ChildSpawner| {
            parent
                .spawn((
                    Button,
                    Name::new("Button Content"),
                    Node {
                        padding: UiRect::axes(Px(40.0), Px(12.0)),
                        border: UiRect::all(Px(2.0)),
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BorderRadius::all(Px(24.0)),
                    BackgroundColor(palette.idle.bg),
                    BorderColor::all(palette.idle.border),
                    palette,
                    children![label(content, 20.0, palette.idle.text)],
                ))
                .observe(action);
        })),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    pub bg: Color,
    pub border: Color,
    pub text: Color,
}

/// Colours a button switches between on pointer interaction.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ButtonPalette {
    pub idle: ButtonColors,
    pub hovered: ButtonColors,
    pub pressed: ButtonColors,
}

impl ButtonPalette {
    pub fn neon(accent: Color) -> Self {
        Self {
            idle: ButtonColors {
                bg: accent.with_alpha(0.1),
                border: accent,
                text: accent,
            },
            hovered: ButtonColors {
                bg: accent.with_alpha(0.25),
                border: WHITE,
                text: WHITE,
            },
            pressed: ButtonColors {
                bg: accent.with_alpha(0.5),
                border: WHITE,
                text: VOID,
            },
        }
    }
}

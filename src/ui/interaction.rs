use super::*;

pub(super) fn plugin(app: &mut App) {
    app.add_observer(on_hover)
        .add_observer(on_out)
        .add_observer(on_press)
        .add_observer(on_release);
}

/// Buttons that currently ignore clicks, they keep whatever colours they were dimmed to.
#[derive(Component, Reflect, Clone, Copy, Default)]
#[reflect(Component)]
pub struct Dimmed;

type PaletteQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static ButtonPalette,
        &'static mut BackgroundColor,
        &'static mut BorderColor,
        &'static Children,
        Has<Dimmed>,
    ),
>;

fn paint(
    entity: Entity,
    pick: fn(&ButtonPalette) -> ButtonColors,
    buttons: &mut PaletteQuery,
    text: &mut Query<&mut TextColor>,
) {
    let Ok((palette, mut bg, mut border, children, dimmed)) = buttons.get_mut(entity) else {
        return;
    };
    if dimmed {
        return;
    }
    let colors = pick(palette);
    bg.0 = colors.bg;
    *border = BorderColor::all(colors.border);
    for child in children {
        if let Ok(mut color) = text.get_mut(*child) {
            color.0 = colors.text;
        }
    }
}

fn on_hover(hover: On<Pointer<Over>>, mut buttons: PaletteQuery, mut text: Query<&mut TextColor>) {
    paint(hover.event_target(), |p| p.hovered, &mut buttons, &mut text);
}

fn on_out(out: On<Pointer<Out>>, mut buttons: PaletteQuery, mut text: Query<&mut TextColor>) {
    paint(out.event_target(), |p| p.idle, &mut buttons, &mut text);
}

fn on_press(press: On<Pointer<Press>>, mut buttons: PaletteQuery, mut text: Query<&mut TextColor>) {
    paint(press.event_target(), |p| p.pressed, &mut buttons, &mut text);
}

fn on_release(
    release: On<Pointer<Release>>,
    mut buttons: PaletteQuery,
    mut text: Query<&mut TextColor>,
) {
    paint(release.event_target(), |p| p.hovered, &mut buttons, &mut text);
}

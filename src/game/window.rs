//! The primary window: its settings, a drawn pokeball icon and the macOS
//! keep-alive behaviour.
use super::*;
use bevy::{
    window::{AppLifecycle, PrimaryWindow, WindowResizeConstraints, WindowResolution},
    winit::WinitWindows,
};
use image::{Rgba, RgbaImage};
use winit::window::Icon;

pub const TITLE: &str = "Pokémon Dimension Portal";

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, set_window_icon)
        .add_systems(Update, (set_window_icon.run_if(window_added), reopen_window));
}

pub fn portal_window() -> Window {
    Window {
        title: TITLE.to_string(),
        resolution: WindowResolution::new(500, 750),
        resize_constraints: WindowResizeConstraints {
            min_width: 400.0,
            min_height: 600.0,
            ..default()
        },
        // Bind to canvas included in `index.html` on web
        fit_canvas_to_parent: true,
        // Tells wasm not to override default event handling, like F5 and Ctrl+R
        prevent_default_event_handling: false,
        ..default()
    }
}

/// macOS apps stay alive without windows, everything else quits with the last one.
pub fn exit_condition() -> bevy::window::ExitCondition {
    if cfg!(target_os = "macos") {
        bevy::window::ExitCondition::DontExit
    } else {
        bevy::window::ExitCondition::OnAllClosed
    }
}

fn window_added(added: Query<(), Added<PrimaryWindow>>) -> bool {
    !added.is_empty()
}

/// A resume with no window left opens a fresh portal window. winit only resumes once
/// at startup on macOS, so a dock click does not get here.
fn reopen_window(
    mut lifecycle: MessageReader<AppLifecycle>,
    windows: Query<(), With<Window>>,
    mut commands: Commands,
) {
    let resumed = lifecycle
        .read()
        .any(|event| matches!(event, AppLifecycle::WillResume));
    if resumed && windows.is_empty() {
        info!("no window left on resume, opening a new one");
        commands.spawn((portal_window(), PrimaryWindow));
    }
}

/// Red over white with a dark band and a pale button, `size` pixels square.
pub fn pokeball_icon(size: u32) -> RgbaImage {
    let red = Rgba([255, 61, 61, 255]);
    let white = Rgba([240, 240, 240, 255]);
    let dark = Rgba([26, 26, 26, 255]);
    let clear = Rgba([0, 0, 0, 0]);

    let half = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let r = (dx * dx + dy * dy).sqrt() / half;
        let band = dy.abs() / half < 0.08;
        match r {
            r if r > 1.0 => clear,
            r if r < 0.22 => white,
            r if r < 0.32 => dark,
            _ if band => dark,
            r if r > 0.92 => dark,
            _ if dy < 0.0 => red,
            _ => white,
        }
    })
}

/// Sets the icon on Windows and X11.
fn set_window_icon(
    windows: NonSend<WinitWindows>,
    primary_window: Query<Entity, With<PrimaryWindow>>,
) -> Result {
    let Ok(primary_entity) = primary_window.single() else {
        return Ok(());
    };
    let Some(primary) = windows.get_window(primary_entity) else {
        return Ok(());
    };
    let image = pokeball_icon(64);
    let (width, height) = image.dimensions();
    let icon = Icon::from_rgba(image.into_raw(), width, height)?;
    primary.set_window_icon(Some(icon));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_is_a_pokeball() {
        let icon = pokeball_icon(64);
        assert_eq!(icon.dimensions(), (64, 64));
        // corners are transparent
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
        // top half red, bottom half white, centre button white
        assert_eq!(icon.get_pixel(32, 12), &Rgba([255, 61, 61, 255]));
        assert_eq!(icon.get_pixel(32, 52), &Rgba([240, 240, 240, 255]));
        assert_eq!(icon.get_pixel(32, 32), &Rgba([240, 240, 240, 255]));
    }

    #[test]
    fn window_matches_portal_layout() {
        let window = portal_window();
        assert_eq!(window.title, TITLE);
        assert_eq!(window.resolution.width(), 500.0);
        assert_eq!(window.resize_constraints.min_height, 600.0);
    }
}

//! The 3D side of the portal: camera, lights and the pokeball.
//!
//! Everything here is procedural, there are no models to load.
use crate::{models::*, ui::*};
use bevy::{picking::mesh_picking::MeshPickingPlugin, prelude::*};

mod pokeball;
mod tween;

pub use pokeball::*;
pub use tween::*;

pub fn plugin(app: &mut App) {
    app.add_plugins((MeshPickingPlugin, pokeball::plugin, tween::plugin))
        .insert_resource(ClearColor(VOID))
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 600.0,
            ..default()
        })
        .add_systems(Startup, spawn_camera)
        .add_systems(OnEnter(Screen::Portal), spawn_lights);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Scene Camera"),
        SceneCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 50f32.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_lights(mut commands: Commands) {
    for (name, color, intensity, position) in [
        ("Cyan Light", NEON_CYAN, 1.0, Vec3::new(5.0, 5.0, 5.0)),
        ("Pink Light", NEON_PINK, 0.8, Vec3::new(-5.0, -5.0, 5.0)),
    ] {
        commands.spawn((
            Name::new(name),
            DespawnOnExit(Screen::Portal),
            PointLight {
                color,
                intensity: intensity * 1_000_000.0,
                range: 100.0,
                ..default()
            },
            Transform::from_translation(position),
        ));
    }
}

//! The procedural pokeball: meshes, idle float, pointer tilt, poses and the click target.
use super::tween::*;
use crate::{models::*, ui::*};
use bevy::{
    asset::RenderAssetUsages,
    math::curve::EaseFunction,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Screen::Portal), spawn_pokeball)
        .add_systems(Update, idle_motion.in_set(PortalSystems::Animate))
        .add_observer(on_set_pose)
        .add_observer(on_shake_ball);
}

const REST_HEIGHT: f32 = 0.3;
const CLOSED_SCALE: f32 = 1.2;
const OPEN_SCALE: f32 = 1.4;
const LID_CLOSED: Vec3 = Vec3::new(0.0, 0.02, 0.0);
const LID_OPEN: Vec3 = Vec3::new(0.0, 1.5, 0.0);
/// Idle rates are tuned per 60 Hz frame.
const SPIN_PER_FRAME: f32 = 0.005;
const TILT_DAMPING: f32 = 0.05;
const TILT_RANGE: f32 = 0.2;

/// Spin and pointer tilt, composed into the ball's rotation every frame.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct BallMotion {
    pub spin: f32,
    /// Tilt around x and z.
    pub tilt: Vec2,
}

/// Pivot between the ball and its meshes that takes the shake.
#[derive(Component, Reflect, Clone, Default)]
#[reflect(Component)]
pub struct BallWobble;

/// One half of a unit sphere split at the equator, open on the cut face.
pub fn hemisphere_mesh(radius: f32, sectors: u32, stacks: u32, upper: bool) -> Mesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let phi_start = if upper { 0.0 } else { FRAC_PI_2 };
    for i in 0..=stacks {
        let v = i as f32 / stacks as f32;
        let phi = phi_start + v * FRAC_PI_2;
        for j in 0..=sectors {
            let u = j as f32 / sectors as f32;
            let theta = u * TAU;
            let normal = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            positions.push((normal * radius).to_array());
            normals.push(normal.to_array());
            uvs.push([u, v]);
        }
    }

    let ring = sectors + 1;
    for i in 0..stacks {
        for j in 0..sectors {
            let a = i * ring + j;
            let b = a + ring;
            indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(indices))
}

fn glossy(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        perceptual_roughness: 0.25,
        reflectance: 0.6,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}

fn spawn_pokeball(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let red = materials.add(glossy(BALL_RED));
    let white = materials.add(glossy(BALL_WHITE));
    let dark = materials.add(StandardMaterial {
        base_color: BAND_DARK,
        perceptual_roughness: 0.5,
        ..default()
    });
    let button = materials.add(StandardMaterial {
        base_color: WHITE,
        emissive: LinearRgba::from(NEON_CYAN) * 4.0,
        perceptual_roughness: 0.1,
        ..default()
    });

    let top = meshes.add(hemisphere_mesh(1.0, 32, 16, true));
    let bottom = meshes.add(hemisphere_mesh(1.0, 32, 16, false));
    let band = meshes.add(Torus {
        minor_radius: 0.08,
        major_radius: 1.0,
    });
    let button_mesh = meshes.add(Sphere::new(0.2).mesh().uv(32, 32));
    let ring = meshes.add(Torus {
        minor_radius: 0.04,
        major_radius: 0.25,
    });

    let mut entrance = Tweens::default();
    entrance.play([
        Tween::new(
            Track::Translation(Vec3::new(0.0, -5.0, 0.0), Vec3::Y * REST_HEIGHT),
            1.0,
        )
        .ease(EaseFunction::BounceOut)
        .delay(0.2),
        Tween::new(Track::Scale(Vec3::ZERO, Vec3::splat(CLOSED_SCALE)), 0.8)
            .ease(EaseFunction::BackOut)
            .delay(0.2),
    ]);

    commands
        .spawn((
            Name::new("Pokeball"),
            Pokeball,
            DespawnOnExit(Screen::Portal),
            BallPose::Closed,
            BallMotion::default(),
            entrance,
            Transform::from_xyz(0.0, -5.0, 0.0).with_scale(Vec3::ZERO),
            Visibility::default(),
            children![(
                Name::new("Wobble"),
                BallWobble,
                Tweens::default(),
                Transform::default(),
                Visibility::default(),
                children![
                    (
                        Name::new("Lid"),
                        Lid,
                        Tweens::default(),
                        Mesh3d(top),
                        MeshMaterial3d(red),
                        Transform::from_translation(LID_CLOSED),
                    ),
                    (
                        Name::new("Base"),
                        Mesh3d(bottom),
                        MeshMaterial3d(white),
                        Transform::from_xyz(0.0, -0.02, 0.0),
                    ),
                    (
                        Name::new("Band"),
                        Mesh3d(band),
                        MeshMaterial3d(dark.clone()),
                        Transform::default(),
                    ),
                    (
                        Name::new("Button"),
                        Mesh3d(button_mesh),
                        MeshMaterial3d(button),
                        Transform::from_xyz(0.0, 0.0, 0.95),
                    ),
                    (
                        Name::new("Button Ring"),
                        Mesh3d(ring),
                        MeshMaterial3d(dark),
                        Transform::from_xyz(0.0, 0.0, 0.92)
                            .with_rotation(Quat::from_rotation_x(FRAC_PI_2)),
                    ),
                ],
            )],
        ))
        .observe(on_ball_click);
}

/// Clicks on any part bubble up to the root.
fn on_ball_click(_: On<Pointer<Click>>, mut commands: Commands) {
    commands.trigger(CatchRequested);
}

/// Spin, float and lean towards the pointer, all paused while the lid is open.
pub(super) fn idle_motion(
    time: Res<Time>,
    pointer: Res<PointerNdc>,
    mut ball: Query<(&mut Transform, &mut BallMotion, &BallPose), With<Pokeball>>,
) {
    let frames = time.delta_secs() * 60.0;
    let damping = 1.0 - (1.0 - TILT_DAMPING).powf(frames);
    let target = Vec2::new(pointer.y, -pointer.x) * TILT_RANGE;

    for (mut transform, mut motion, pose) in ball.iter_mut() {
        if *pose == BallPose::Open {
            continue;
        }
        motion.spin = (motion.spin + SPIN_PER_FRAME * frames) % TAU;
        let tilt = motion.tilt;
        motion.tilt += (target - tilt) * damping;

        transform.translation.y = REST_HEIGHT + time.elapsed_secs().sin() * 0.1;
        transform.rotation =
            Quat::from_euler(EulerRot::XYZ, motion.tilt.x, motion.spin, motion.tilt.y);
    }
}

fn on_set_pose(
    pose: On<SetBallPose>,
    mut ball: Query<(&mut BallPose, &Transform, &mut Tweens), (With<Pokeball>, Without<Lid>)>,
    mut lid: Query<(&Transform, &mut Tweens), With<Lid>>,
) {
    let open = **pose == BallPose::Open;
    for (mut current, transform, mut tweens) in ball.iter_mut() {
        *current = **pose;
        let to = if open { OPEN_SCALE } else { CLOSED_SCALE };
        tweens.play([
            Tween::new(Track::Scale(transform.scale, Vec3::splat(to)), 0.3)
                .ease(EaseFunction::CubicOut),
        ]);
    }

    for (transform, mut tweens) in lid.iter_mut() {
        let (position, rotation, secs, move_ease, turn_ease) = if open {
            let tilt = Quat::from_rotation_x(-FRAC_PI_4);
            (LID_OPEN, tilt, 0.6, EaseFunction::BackOut, EaseFunction::CubicOut)
        } else {
            let ease = EaseFunction::CubicInOut;
            (LID_CLOSED, Quat::IDENTITY, 0.4, ease, ease)
        };
        tweens.play([
            Tween::new(Track::Translation(transform.translation, position), secs).ease(move_ease),
            Tween::new(Track::Rotation(transform.rotation, rotation), secs).ease(turn_ease),
        ]);
    }
}

fn on_shake_ball(_: On<ShakeBall>, mut wobble: Query<&mut Tweens, With<BallWobble>>) {
    let lean = Quat::from_rotation_z(PI * 0.05);
    for mut tweens in wobble.iter_mut() {
        tweens.play(yoyo(
            Track::Rotation(Quat::IDENTITY, lean),
            0.1,
            6,
            EaseFunction::SineInOut,
        ));
    }
}

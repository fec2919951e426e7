//! Fire-and-forget effects. Each one owns its entity and timer, nobody waits on them.
use crate::{models::*, ui::*};
use bevy::{
    math::curve::{Curve, EaseFunction},
    prelude::*,
    transform::TransformSystems,
};

pub fn plugin(app: &mut App) {
    app.init_resource::<ScreenShake>()
        .add_observer(on_screen_flash)
        .add_observer(on_portal_glow)
        .add_observer(on_screen_shake)
        .add_observer(on_instruction_alert)
        .add_systems(
            Update,
            (tick_flash, tick_glow, tick_alert).in_set(PortalSystems::TickTimers),
        )
        // restore the camera before anything reads it, shake it again right before propagation
        .add_systems(PreUpdate, reset_camera_shake)
        .add_systems(
            PostUpdate,
            apply_camera_shake.before(TransformSystems::Propagate),
        );
}

const FLASH_PEAK: f32 = 0.8;
const GLOW_DEPTH: f32 = -1.0;

fn on_screen_flash(_: On<ScreenFlash>, config: Res<Config>, mut commands: Commands) {
    commands.spawn((
        Name::new("Screen Flash"),
        DespawnOnExit(Screen::Portal),
        FlashTimer(Timer::from_seconds(config.timings.flash, TimerMode::Once)),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(WHITE.with_alpha(FLASH_PEAK)),
        GlobalZIndex(10),
        Pickable::IGNORE,
    ));
}

fn tick_flash(
    time: Res<Time>,
    mut flashes: Query<(Entity, &mut FlashTimer, &mut BackgroundColor)>,
    mut commands: Commands,
) {
    for (entity, mut timer, mut bg) in flashes.iter_mut() {
        if timer.tick(time.delta()).is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        bg.0 = WHITE.with_alpha(FLASH_PEAK * (1.0 - timer.fraction()));
    }
}

/// Colour and spread of a glow while it plays out.
#[derive(Component)]
struct Glow {
    material: Handle<StandardMaterial>,
}

fn on_portal_glow(
    _: On<PortalGlow>,
    config: Res<Config>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let material = materials.add(StandardMaterial {
        base_color: NEON_VIOLET.with_alpha(0.0),
        emissive: LinearRgba::from(NEON_CYAN) * 2.0,
        unlit: true,
        alpha_mode: AlphaMode::Add,
        ..default()
    });
    commands.spawn((
        Name::new("Portal Glow"),
        DespawnOnExit(Screen::Portal),
        GlowTimer(Timer::from_seconds(config.timings.portal, TimerMode::Once)),
        Glow {
            material: material.clone(),
        },
        Mesh3d(meshes.add(Circle::new(1.0))),
        MeshMaterial3d(material),
        Transform::from_xyz(0.0, 0.3, GLOW_DEPTH).with_scale(Vec3::ZERO),
        Pickable::IGNORE,
    ));
}

/// Swells out of the ball, peaks a third of the way in, then fades.
fn glow_shape(t: f32) -> (f32, f32) {
    let scale = 0.5 + 2.5 * EaseFunction::CubicOut.sample_clamped(t);
    let alpha = if t < 0.3 {
        t / 0.3
    } else {
        1.0 - (t - 0.3) / 0.7
    };
    (scale, alpha.clamp(0.0, 1.0) * 0.6)
}

fn tick_glow(
    time: Res<Time>,
    mut glows: Query<(Entity, &mut GlowTimer, &Glow, &mut Transform)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for (entity, mut timer, glow, mut transform) in glows.iter_mut() {
        if timer.tick(time.delta()).is_finished() {
            commands.entity(entity).despawn();
            continue;
        }
        let (scale, alpha) = glow_shape(timer.fraction());
        transform.scale = Vec3::splat(scale);
        if let Some(material) = materials.get_mut(&glow.material) {
            material.base_color = NEON_VIOLET.with_alpha(alpha);
            material.emissive = LinearRgba::from(NEON_CYAN) * (2.0 * alpha);
        }
    }
}

/// Red instruction text easing back to its normal colour.
#[derive(Component, Deref, DerefMut)]
pub struct AlertFlash(Timer);

fn on_instruction_alert(
    _: On<InstructionAlert>,
    config: Res<Config>,
    mut label: Query<(Entity, &mut TextColor), With<InstructionLabel>>,
    mut commands: Commands,
) {
    for (entity, mut color) in label.iter_mut() {
        color.0 = ALERT_RED;
        commands.entity(entity).insert(AlertFlash(Timer::from_seconds(
            config.timings.error_flash,
            TimerMode::Once,
        )));
    }
}

fn tick_alert(
    time: Res<Time>,
    mut labels: Query<(Entity, &mut AlertFlash, &mut TextColor)>,
    mut commands: Commands,
) {
    for (entity, mut flash, mut color) in labels.iter_mut() {
        if flash.tick(time.delta()).is_finished() {
            color.0 = INSTRUCTION;
            commands.entity(entity).remove::<AlertFlash>();
            continue;
        }
        let red = LinearRgba::from(ALERT_RED);
        color.0 = red.mix(&LinearRgba::from(INSTRUCTION), flash.fraction()).into();
    }
}

#[derive(Resource, Debug, Default)]
pub struct ScreenShake {
    pub trauma: f32,
    /// Camera transform from before the shake, only set while shaking.
    pub stored_transform: Option<Transform>,
}

impl ScreenShake {
    pub const MAX_TRANSLATION: f32 = 0.15;
    pub const NOISE_SPEED: f32 = 25.0;
    pub const EXPONENT: f32 = 2.0;

    /// Full trauma drains over the configured shake time.
    pub fn decay(timings: &TimingsPreset) -> f32 {
        1.0 / timings.shake.max(0.01)
    }

    pub fn add(&mut self, trauma: f32) {
        self.trauma = (self.trauma + trauma).clamp(0.0, 1.0);
    }
}

fn on_screen_shake(shake: On<ShakeScreen>, mut screen: ResMut<ScreenShake>) {
    screen.add(**shake);
}

fn reset_camera_shake(
    mut shake: ResMut<ScreenShake>,
    mut camera: Query<&mut Transform, With<SceneCamera>>,
) {
    if let Some(original) = shake.stored_transform.take()
        && let Ok(mut transform) = camera.single_mut()
    {
        *transform = original;
    }
}

fn apply_camera_shake(
    time: Res<Time>,
    state: Res<PortalState>,
    config: Option<Res<Config>>,
    mut shake: ResMut<ScreenShake>,
    mut camera: Query<&mut Transform, With<SceneCamera>>,
) {
    let decay = config.map_or(2.0, |c| ScreenShake::decay(&c.timings));
    shake.trauma = (shake.trauma - decay * time.delta_secs()).max(0.0);

    if !state.screen_shake || shake.trauma <= 0.0 {
        return;
    }
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    shake.stored_transform = Some(*transform);

    let amount = shake.trauma.powf(ScreenShake::EXPONENT);
    let t = time.elapsed_secs() * ScreenShake::NOISE_SPEED;
    let x_noise = t.sin() * 0.5 + (t * 2.3).cos() * 0.3 + (t * 4.1).sin() * 0.2;
    let y_noise = (t * 1.7).cos() * 0.5 + (t * 3.1).sin() * 0.3 + (t * 5.3).cos() * 0.2;

    transform.translation.x += x_noise * amount * ScreenShake::MAX_TRANSLATION;
    transform.translation.y += y_noise * amount * ScreenShake::MAX_TRANSLATION;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn trauma_saturates_at_one() {
        let mut shake = ScreenShake::default();
        shake.add(0.7);
        shake.add(0.7);
        assert_eq!(shake.trauma, 1.0);
    }

    #[test]
    fn shake_drains_over_configured_time() {
        let timings = TimingsPreset::default();
        assert!((ScreenShake::decay(&timings) * timings.shake - 1.0).abs() < 1e-6);
    }

    #[test]
    fn glow_fades_in_then_out() {
        let (start_scale, start_alpha) = glow_shape(0.0);
        let (_, peak) = glow_shape(0.3);
        let (end_scale, end_alpha) = glow_shape(1.0);
        assert_eq!(start_alpha, 0.0);
        assert!((peak - 0.6).abs() < 1e-6);
        assert!(end_alpha.abs() < 1e-6);
        assert!(end_scale > start_scale);
    }

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<Config>()
            .init_resource::<PortalState>()
            .add_observer(on_screen_flash)
            .add_observer(on_instruction_alert)
            .add_systems(Update, (tick_flash, tick_alert));
        app
    }

    #[test]
    fn flash_despawns_after_its_timer() {
        let mut app = app();
        app.world_mut().trigger(ScreenFlash);
        app.update();
        let flashes = |app: &mut App| {
            app.world_mut()
                .query::<&FlashTimer>()
                .iter(app.world())
                .count()
        };
        assert_eq!(flashes(&mut app), 1);
        for _ in 0..5 {
            app.update();
        }
        assert_eq!(flashes(&mut app), 0);
    }

    #[test]
    fn alert_turns_red_then_settles() {
        let mut app = app();
        let label = app
            .world_mut()
            .spawn((InstructionLabel, TextColor(INSTRUCTION)))
            .id();
        app.world_mut().trigger(InstructionAlert);
        app.update();
        assert!(app.world().get::<AlertFlash>(label).is_some());

        for _ in 0..25 {
            app.update();
        }
        assert!(app.world().get::<AlertFlash>(label).is_none());
        assert_eq!(app.world().get::<TextColor>(label).map(|c| c.0), Some(INSTRUCTION));
    }
}

//! Decorative particle field behind the ball, rebuilt for every caught type.
//!
//! The field is a single root entity, particles are its children. Switching themes
//! despawns the root and everything under it, then spawns a fresh one.
use crate::{models::*, ui::*};
use bevy::{prelude::*, window::PrimaryWindow};
use rand::{Rng, seq::IndexedRandom};
use std::f32::consts::TAU;

mod theme;

pub use theme::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<FieldBounds>()
        .init_resource::<FieldPointer>()
        .init_resource::<BurstQueue>()
        .add_systems(Startup, setup_particle_assets)
        .add_systems(OnEnter(Screen::Portal), spawn_ambient_field)
        .add_systems(
            Update,
            (
                track_window,
                run_emitters,
                run_burst,
                move_particles,
                twinkle,
                draw_grab_links,
            )
                .chain()
                .in_set(PortalSystems::Animate)
                .run_if(in_state(Screen::Portal)),
        )
        .add_observer(on_theme_changed)
        .add_observer(on_legendary_burst);
}

/// Depth of the particle plane, well behind the ball.
const FIELD_DEPTH: f32 = -3.0;
/// World units per pixel of the 750 px tall default window.
const PX: f32 = 0.01;
/// Pixel-per-frame speeds into world units per second.
const SPEED_SCALE: f32 = 0.25;
/// Pointer reach of a repulsing field and how long it takes to clear that reach.
const REPULSE_RADIUS: f32 = 100.0 * PX;
const REPULSE_DURATION: f32 = 0.4;
/// Pointer reach and peak opacity of grab links.
const GRAB_RADIUS: f32 = 150.0 * PX;
const GRAB_OPACITY: f32 = 0.3;

#[derive(Resource)]
struct ParticleAssets {
    circle: Handle<Mesh>,
    polygon: Handle<Mesh>,
    star: Handle<Mesh>,
}

impl ParticleAssets {
    fn mesh(&self, shape: ParticleShape) -> Handle<Mesh> {
        match shape {
            ParticleShape::Circle => self.circle.clone(),
            ParticleShape::Polygon => self.polygon.clone(),
            ParticleShape::Star => self.star.clone(),
        }
    }
}

/// Half extents of the visible particle plane.
#[derive(Resource, Debug, Clone, Copy, Deref)]
pub struct FieldBounds(pub Vec2);

impl Default for FieldBounds {
    fn default() -> Self {
        Self::for_aspect(500.0 / 750.0)
    }
}

impl FieldBounds {
    /// What a 50 degree camera at z = 5 sees on the field plane.
    pub fn for_aspect(aspect: f32) -> Self {
        let half_height = (5.0 - FIELD_DEPTH) * 25f32.to_radians().tan();
        Self(Vec2::new(half_height * aspect, half_height))
    }

    /// Teleports a point that left the field to the opposite edge.
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        let wrap_axis = |v: f32, half: f32| {
            if v > half {
                -half
            } else if v < -half {
                half
            } else {
                v
            }
        };
        Vec2::new(wrap_axis(p.x, self.x), wrap_axis(p.y, self.y))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.x && p.y.abs() <= self.y
    }

    /// Point on the field under a pointer given in normalized device coordinates.
    pub fn at_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(ndc.x * self.x, -ndc.y * self.y)
    }
}

/// Pointer position on the field plane, `None` while it is outside the window.
#[derive(Resource, Debug, Clone, Copy, Default, Deref)]
pub struct FieldPointer(pub Option<Vec2>);

/// How far a particle at `at` gets pushed this second by a pointer at `pointer`.
/// Strongest right under the pointer, zero at `radius` and beyond.
pub fn repulse_offset(at: Vec2, pointer: Vec2, radius: f32, duration: f32) -> Vec2 {
    let away = at - pointer;
    let distance = away.length();
    if distance >= radius || distance <= f32::EPSILON {
        return Vec2::ZERO;
    }
    let falloff = 1.0 - (distance / radius).powi(2);
    away / distance * falloff * radius / duration
}

/// Opacity of the line linking a particle to the pointer, `None` when out of reach.
pub fn grab_link_alpha(at: Vec2, pointer: Vec2, radius: f32, opacity: f32) -> Option<f32> {
    let distance = at.distance(pointer);
    (distance < radius).then(|| opacity * (1.0 - distance / radius))
}

/// Particle colour at twinkle `wave`, flaring towards `tint` over the top fifth of the pulse.
pub fn twinkle_color(base: Color, tint: Option<Color>, wave: f32) -> Color {
    let Some(tint) = tint else {
        return base;
    };
    let flare = ((wave - 0.8) / 0.2).clamp(0.0, 1.0);
    if flare <= 0.0 {
        return base;
    }
    LinearRgba::from(base)
        .mix(&LinearRgba::from(tint), flare)
        .into()
}

#[derive(Component)]
pub struct ParticleField {
    theme: ParticleTheme,
}

#[derive(Component, Debug, Clone)]
pub struct Particle {
    velocity: Vec2,
    speed: f32,
    drift: Drift,
    color: Color,
    opacity: (f32, f32),
    size: (f32, f32),
    phase: f32,
    pulse: f32,
    tint: Option<Color>,
    /// Emitted and burst particles die, field particles wrap forever.
    lifetime: Option<Timer>,
}

/// Spawns particles along the bottom edge on a fixed beat.
#[derive(Component)]
struct BottomEmitter {
    timer: Timer,
    quantity: usize,
}

/// Golden particles still to come for a legendary reveal.
#[derive(Resource, Default)]
struct BurstQueue {
    remaining: usize,
    timer: Timer,
}

fn setup_particle_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(ParticleAssets {
        circle: meshes.add(Circle::new(1.0)),
        polygon: meshes.add(RegularPolygon::new(1.0, 6)),
        star: meshes.add(star_mesh(5, 1.0, 0.45)),
    });
}

fn particle_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

fn heading(drift: Drift, rng: &mut impl Rng) -> Vec2 {
    match drift {
        Drift::Up => Vec2::from_angle(rng.random_range(-0.4..0.4)).perp(),
        Drift::Down => -Vec2::from_angle(rng.random_range(-0.4..0.4)).perp(),
        Drift::Wander => Vec2::from_angle(rng.random_range(0.0..TAU)),
    }
}

fn random_particle(theme: &ParticleTheme, rng: &mut impl Rng) -> Particle {
    let color = theme.palette.choose(rng).copied().unwrap_or(WHITE);
    let opacity = rng.random_range(theme.opacity.1..=theme.opacity.0);
    let size = rng.random_range(theme.size.1..=theme.size.0);
    let speed = theme.speed * SPEED_SCALE * rng.random_range(0.3..=1.0);
    Particle {
        velocity: heading(theme.drift, rng) * speed,
        speed,
        drift: theme.drift,
        color,
        opacity: (opacity, theme.opacity.1),
        size: (size, theme.size.1),
        phase: rng.random_range(0.0..TAU),
        pulse: rng.random_range(0.5..2.0),
        tint: theme.twinkle,
        lifetime: None,
    }
}

fn particle_bundle(
    particle: Particle,
    shape: ParticleShape,
    position: Vec2,
    assets: &ParticleAssets,
    materials: &mut Assets<StandardMaterial>,
) -> impl Bundle {
    let scale = particle.size.0 * PX;
    (
        Name::new("Particle"),
        Mesh3d(assets.mesh(shape)),
        MeshMaterial3d(materials.add(particle_material(particle.color.with_alpha(particle.opacity.0)))),
        Transform::from_translation(position.extend(0.0)).with_scale(Vec3::splat(scale)),
        Pickable::IGNORE,
        particle,
    )
}

fn spawn_field(
    commands: &mut Commands,
    theme: ParticleTheme,
    count: usize,
    bounds: &FieldBounds,
    emitter: Option<BottomEmitter>,
    assets: &ParticleAssets,
    materials: &mut Assets<StandardMaterial>,
) {
    let mut rng = rand::rng();
    debug!("spawning {} field with {count} particles", theme.name);

    let mut field = commands.spawn((
        Name::new(format!("Particle Field ({})", theme.name)),
        DespawnOnExit(Screen::Portal),
        Transform::from_xyz(0.0, 0.0, FIELD_DEPTH),
        Visibility::default(),
    ));
    if let Some(emitter) = emitter {
        field.insert(emitter);
    }
    field.with_children(|parent| {
        for _ in 0..count {
            let particle = random_particle(&theme, &mut rng);
            let shape = *theme.shapes.choose(&mut rng).unwrap_or(&ParticleShape::Circle);
            let position = Vec2::new(
                rng.random_range(-bounds.x..=bounds.x),
                rng.random_range(-bounds.y..=bounds.y),
            );
            parent.spawn(particle_bundle(particle, shape, position, assets, materials));
        }
    });
    field.insert(ParticleField { theme });
}

fn spawn_ambient_field(
    mut commands: Commands,
    config: Res<Config>,
    bounds: Res<FieldBounds>,
    assets: Res<ParticleAssets>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_field(
        &mut commands,
        ParticleTheme::ambient(),
        config.particles.ambient,
        &bounds,
        None,
        &assets,
        &mut materials,
    );
}

fn on_theme_changed(
    changed: On<TypeThemeChanged>,
    config: Res<Config>,
    bounds: Res<FieldBounds>,
    assets: Res<ParticleAssets>,
    fields: Query<Entity, With<ParticleField>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    for field in fields.iter() {
        commands.entity(field).despawn();
    }

    let theme = ParticleTheme::for_type(&changed.0);
    let emitter = theme.emitter.then(|| BottomEmitter {
        timer: Timer::from_seconds(config.particles.emitter_interval, TimerMode::Repeating),
        quantity: config.particles.emitter_quantity,
    });
    spawn_field(
        &mut commands,
        theme,
        config.particles.themed,
        &bounds,
        emitter,
        &assets,
        &mut materials,
    );
}

fn on_legendary_burst(_: On<LegendaryBurst>, config: Res<Config>, mut queue: ResMut<BurstQueue>) {
    queue.remaining = config.particles.burst;
    queue.timer = Timer::from_seconds(config.particles.burst_interval, TimerMode::Repeating);
}

fn track_window(
    window: Query<&Window, With<PrimaryWindow>>,
    mut bounds: ResMut<FieldBounds>,
    mut pointer: ResMut<FieldPointer>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let size = window.size();
    if size.y <= 0.0 {
        return;
    }
    let next = FieldBounds::for_aspect(size.x / size.y);
    if next.0 != bounds.0 {
        *bounds = next;
    }
    let next = window
        .cursor_position()
        .map(|cursor| bounds.at_ndc(*PointerNdc::from_cursor(cursor, size)));
    if next != pointer.0 {
        pointer.0 = next;
    }
}

fn run_emitters(
    time: Res<Time>,
    bounds: Res<FieldBounds>,
    assets: Res<ParticleAssets>,
    mut fields: Query<(Entity, &ParticleField, &mut BottomEmitter)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    let mut rng = rand::rng();
    for (entity, field, mut emitter) in fields.iter_mut() {
        emitter.timer.tick(time.delta());
        let bursts = emitter.timer.times_finished_this_tick() as usize;
        for _ in 0..bursts * emitter.quantity {
            let mut particle = random_particle(&field.theme, &mut rng);
            particle.speed = 5.0 * SPEED_SCALE;
            particle.velocity = heading(Drift::Up, &mut rng) * particle.speed;
            particle.size = (3.0, 3.0);
            particle.opacity = (0.5, 0.5);
            particle.lifetime = Some(Timer::from_seconds(6.0, TimerMode::Once));

            let position = Vec2::new(rng.random_range(-bounds.x..=bounds.x), -bounds.y);
            let child = commands
                .spawn(particle_bundle(
                    particle,
                    ParticleShape::Circle,
                    position,
                    &assets,
                    &mut materials,
                ))
                .id();
            commands.entity(entity).add_child(child);
        }
    }
}

fn run_burst(
    time: Res<Time>,
    assets: Res<ParticleAssets>,
    field: Query<Entity, With<ParticleField>>,
    mut queue: ResMut<BurstQueue>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if queue.remaining == 0 {
        return;
    }
    // the field is respawned in the same frame as the burst starts
    let Some(field) = field.iter().last() else {
        return;
    };
    let mut rng = rand::rng();
    queue.timer.tick(time.delta());
    let due = (queue.timer.times_finished_this_tick() as usize).min(queue.remaining);
    queue.remaining -= due;

    for _ in 0..due {
        let mut particle = random_particle(&ParticleTheme::ambient(), &mut rng);
        particle.color = LEGENDARY_GOLD;
        particle.opacity = (0.9, 0.4);
        particle.size = (rng.random_range(3.0..=5.0), 1.0);
        particle.tint = None;
        particle.lifetime = Some(Timer::from_seconds(2.5, TimerMode::Once));

        let spread = 200.0 * PX;
        let position = Vec2::new(
            rng.random_range(-spread..=spread),
            rng.random_range(-spread..=spread),
        );
        let child = commands
            .spawn(particle_bundle(
                particle,
                ParticleShape::Star,
                position,
                &assets,
                &mut materials,
            ))
            .id();
        commands.entity(field).add_child(child);
    }
}

fn move_particles(
    time: Res<Time>,
    bounds: Res<FieldBounds>,
    pointer: Res<FieldPointer>,
    fields: Query<&ParticleField>,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &ChildOf)>,
    mut commands: Commands,
) {
    let dt = time.delta_secs();
    let t = time.elapsed_secs();
    for (entity, mut particle, mut transform, child_of) in particles.iter_mut() {
        if particle.drift == Drift::Wander {
            let turn = (t * 0.5 + particle.phase).sin() * dt;
            particle.velocity = Vec2::from_angle(turn).rotate(particle.velocity);
        }
        let mut position = transform.translation.truncate() + particle.velocity * dt;

        let repulsing = fields
            .get(child_of.parent())
            .is_ok_and(|field| field.theme.hover == Hover::Repulse);
        if repulsing && let Some(target) = pointer.0 {
            position += repulse_offset(position, target, REPULSE_RADIUS, REPULSE_DURATION) * dt;
        }

        if let Some(lifetime) = particle.lifetime.as_mut() {
            if lifetime.tick(time.delta()).is_finished() || !bounds.contains(position) {
                commands.entity(entity).despawn();
                continue;
            }
            transform.translation = position.extend(0.0);
        } else {
            transform.translation = bounds.wrap(position).extend(0.0);
        }
    }
}

fn twinkle(
    time: Res<Time>,
    mut particles: Query<(&Particle, &mut Transform, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let t = time.elapsed_secs();
    for (particle, mut transform, material) in particles.iter_mut() {
        let wave = 0.5 + 0.5 * (t * particle.pulse + particle.phase).sin();
        let fade_out = particle
            .lifetime
            .as_ref()
            .map_or(1.0, |timer| 1.0 - timer.fraction());

        let (base, floor) = particle.opacity;
        let alpha = (floor + (base - floor) * wave) * fade_out;
        let (size, min_size) = particle.size;
        transform.scale = Vec3::splat((min_size + (size - min_size) * wave) * PX);

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color = twinkle_color(particle.color, particle.tint, wave).with_alpha(alpha);
        }
    }
}

fn draw_grab_links(
    pointer: Res<FieldPointer>,
    fields: Query<(&ParticleField, &Children)>,
    particles: Query<&Transform, With<Particle>>,
    mut gizmos: Gizmos,
) {
    let Some(pointer) = pointer.0 else {
        return;
    };
    for (field, children) in fields.iter() {
        if field.theme.hover != Hover::Grab {
            continue;
        }
        for transform in particles.iter_many(children) {
            let at = transform.translation.truncate();
            if let Some(alpha) = grab_link_alpha(at, pointer, GRAB_RADIUS, GRAB_OPACITY) {
                gizmos.line(
                    pointer.extend(FIELD_DEPTH),
                    at.extend(FIELD_DEPTH),
                    NEON_CYAN.with_alpha(alpha),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_window_aspect() {
        let tall = FieldBounds::for_aspect(500.0 / 750.0);
        let wide = FieldBounds::for_aspect(2.0);
        assert!((tall.y - wide.y).abs() < 1e-6);
        assert!(wide.x > tall.x);
        assert!((tall.y - 8.0 * 25f32.to_radians().tan()).abs() < 1e-5);
    }

    #[test]
    fn particles_wrap_to_the_opposite_edge() {
        let bounds = FieldBounds(Vec2::new(2.0, 3.0));
        assert_eq!(bounds.wrap(Vec2::new(2.1, 0.0)), Vec2::new(-2.0, 0.0));
        assert_eq!(bounds.wrap(Vec2::new(0.0, -3.5)), Vec2::new(0.0, 3.0));
        assert_eq!(bounds.wrap(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
        assert!(!bounds.contains(Vec2::new(0.0, 3.1)));
    }

    #[test]
    fn pointer_maps_onto_the_field() {
        let bounds = FieldBounds(Vec2::new(2.0, 3.0));
        assert_eq!(bounds.at_ndc(Vec2::ZERO), Vec2::ZERO);
        // window y grows down, field y grows up
        assert_eq!(bounds.at_ndc(Vec2::new(1.0, -1.0)), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn repulse_pushes_away_and_fades_with_distance() {
        let pointer = Vec2::new(1.0, 1.0);
        let near = repulse_offset(Vec2::new(1.2, 1.0), pointer, 1.0, 0.4);
        let far = repulse_offset(Vec2::new(1.8, 1.0), pointer, 1.0, 0.4);
        assert!(near.x > far.x && far.x > 0.0);
        assert!(near.y.abs() < 1e-6);
        // 1 - 0.2^2 of the full push
        assert!((near.x - 0.96 / 0.4).abs() < 1e-4);

        assert_eq!(repulse_offset(Vec2::new(2.0, 1.0), pointer, 1.0, 0.4), Vec2::ZERO);
        assert_eq!(repulse_offset(pointer, pointer, 1.0, 0.4), Vec2::ZERO);
        assert!(repulse_offset(Vec2::new(1.0, 0.5), pointer, 1.0, 0.4).y < 0.0);
    }

    #[test]
    fn grab_links_only_reach_nearby_particles() {
        let alpha = grab_link_alpha(Vec2::new(0.75, 0.0), Vec2::ZERO, 1.5, 0.3);
        assert!(alpha.is_some_and(|a| (a - 0.15).abs() < 1e-6));
        assert_eq!(grab_link_alpha(Vec2::new(1.5, 0.0), Vec2::ZERO, 1.5, 0.3), None);
    }

    #[test]
    fn twinkle_flares_towards_tint_at_peak() {
        let tint = Some(Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(twinkle_color(WHITE, tint, 0.5), WHITE);
        assert_eq!(twinkle_color(WHITE, None, 1.0), WHITE);
        let peak = LinearRgba::from(twinkle_color(WHITE, tint, 1.0));
        assert!((peak.red - 1.0).abs() < 1e-5 && peak.green.abs() < 1e-5);
    }

    #[test]
    fn rising_particles_head_up() {
        let mut rng = rand::rng();
        for _ in 0..100 {
            assert!(heading(Drift::Up, &mut rng).y > 0.0);
            assert!(heading(Drift::Down, &mut rng).y < 0.0);
        }
    }

    #[test]
    fn random_particles_respect_theme_ranges() {
        let theme = ParticleTheme::for_type("grass");
        let mut rng = rand::rng();
        for _ in 0..100 {
            let p = random_particle(&theme, &mut rng);
            assert!(theme.palette.contains(&p.color));
            assert!((0.2..=0.7).contains(&p.opacity.0));
            assert!((1.0..=4.0).contains(&p.size.0));
            assert!(p.lifetime.is_none());
        }
    }
}

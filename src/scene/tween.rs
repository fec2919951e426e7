//! Small transform tweens: one track per property, eased over a fixed duration.
use bevy::{
    math::curve::{Curve, EaseFunction},
    prelude::*,
};

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        run_tweens
            .in_set(crate::models::PortalSystems::Animate)
            .after(super::pokeball::idle_motion),
    );
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Track {
    Translation(Vec3, Vec3),
    Rotation(Quat, Quat),
    Scale(Vec3, Vec3),
}

impl Track {
    fn same_property(&self, other: &Track) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn apply(&self, p: f32, transform: &mut Transform) {
        match *self {
            Track::Translation(from, to) => transform.translation = from.lerp(to, p),
            Track::Rotation(from, to) => transform.rotation = from.slerp(to, p),
            Track::Scale(from, to) => transform.scale = from.lerp(to, p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub track: Track,
    pub duration: f32,
    pub delay: f32,
    pub ease: EaseFunction,
    elapsed: f32,
}

impl Tween {
    pub fn new(track: Track, duration: f32) -> Self {
        Self {
            track,
            duration,
            delay: 0.0,
            ease: EaseFunction::Linear,
            elapsed: 0.0,
        }
    }

    pub fn ease(mut self, ease: EaseFunction) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, secs: f32) -> Self {
        self.delay = secs;
        self
    }

    /// Eased progress, `None` while still waiting out the delay.
    pub fn progress(&self) -> Option<f32> {
        let local = self.elapsed - self.delay;
        if local < 0.0 {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(self.ease.sample_clamped((local / self.duration).min(1.0)))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}

/// Back and forth between two ends of a track, `swings` legs of `leg` seconds each.
pub fn yoyo(track: Track, leg: f32, swings: usize, ease: EaseFunction) -> Vec<Tween> {
    let reversed = match track {
        Track::Translation(a, b) => Track::Translation(b, a),
        Track::Rotation(a, b) => Track::Rotation(b, a),
        Track::Scale(a, b) => Track::Scale(b, a),
    };
    (0..swings)
        .map(|i| {
            let track = if i % 2 == 0 { track } else { reversed };
            Tween::new(track, leg).ease(ease).delay(leg * i as f32)
        })
        .collect()
}

/// Running tweens of an entity. Empty when at rest.
#[derive(Component, Debug, Clone, Default)]
pub struct Tweens(Vec<Tween>);

impl Tweens {
    /// Starts `tweens`, cancelling anything already animating the same properties.
    pub fn play(&mut self, tweens: impl IntoIterator<Item = Tween>) {
        let incoming: Vec<Tween> = tweens.into_iter().collect();
        self.0
            .retain(|t| !incoming.iter().any(|n| n.track.same_property(&t.track)));
        self.0.extend(incoming);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn advance(&mut self, dt: f32, transform: &mut Transform) {
        for tween in self.0.iter_mut() {
            tween.elapsed += dt;
            if let Some(p) = tween.progress() {
                tween.track.apply(p, transform);
            }
        }
        self.0.retain(|t| !t.is_finished());
    }
}

fn run_tweens(time: Res<Time>, mut query: Query<(&mut Transform, &mut Tweens)>) {
    let dt = time.delta_secs();
    for (mut transform, mut tweens) in query.iter_mut() {
        if tweens.is_empty() {
            continue;
        }
        tweens.advance(dt, &mut transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_waits_for_delay_then_lands_on_target() {
        let mut tweens = Tweens::default();
        tweens.play([Tween::new(Track::Scale(Vec3::ZERO, Vec3::splat(1.2)), 0.8).delay(0.2)]);
        let mut transform = Transform::from_scale(Vec3::ZERO);

        tweens.advance(0.1, &mut transform);
        assert_eq!(transform.scale, Vec3::ZERO);

        tweens.advance(0.5, &mut transform);
        assert!(transform.scale.x > 0.0 && transform.scale.x < 1.2);

        tweens.advance(0.5, &mut transform);
        assert_eq!(transform.scale, Vec3::splat(1.2));
        assert!(tweens.is_empty());
    }

    #[test]
    fn play_replaces_same_property_only() {
        let mut tweens = Tweens::default();
        tweens.play([
            Tween::new(Track::Scale(Vec3::ONE, Vec3::splat(2.0)), 1.0),
            Tween::new(Track::Translation(Vec3::ZERO, Vec3::Y), 1.0),
        ]);
        tweens.play([Tween::new(Track::Scale(Vec3::splat(2.0), Vec3::ONE), 0.3)]);
        assert_eq!(tweens.0.len(), 2);
        assert!(
            tweens
                .0
                .iter()
                .any(|t| t.track == Track::Scale(Vec3::splat(2.0), Vec3::ONE))
        );
    }

    #[test]
    fn yoyo_alternates_and_returns_home() {
        let tilt = Quat::from_rotation_z(0.15);
        let legs = yoyo(
            Track::Rotation(Quat::IDENTITY, tilt),
            0.1,
            6,
            EaseFunction::SineInOut,
        );
        assert_eq!(legs.len(), 6);
        assert_eq!(legs[1].track, Track::Rotation(tilt, Quat::IDENTITY));
        assert!((legs[5].delay - 0.5).abs() < 1e-6);

        let mut tweens = Tweens::default();
        tweens.play(legs);
        let mut transform = Transform::default();
        for _ in 0..70 {
            tweens.advance(0.01, &mut transform);
        }
        assert!(tweens.is_empty());
        assert!(transform.rotation.angle_between(Quat::IDENTITY) < 1e-3);
    }
}

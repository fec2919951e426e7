//! Staggered reveal schedule of the card. Each step starts relative to the end of
//! everything scheduled before it, so later parts overlap earlier ones.
use bevy::math::curve::{Curve, EaseFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    Card,
    Sprite,
    Name,
    Number,
    Badge(usize),
    Row(usize),
    Bar(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub target: RevealTarget,
    pub start: f32,
    pub duration: f32,
    pub ease: EaseFunction,
}

impl Step {
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Eased progress in `0.0..=1.0` at `elapsed` seconds into the timeline.
    pub fn progress(&self, elapsed: f32) -> f32 {
        if self.duration <= 0.0 {
            return if elapsed >= self.start { 1.0 } else { 0.0 };
        }
        let t = ((elapsed - self.start) / self.duration).clamp(0.0, 1.0);
        self.ease.sample_clamped(t)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RevealTimeline {
    steps: Vec<Step>,
    end: f32,
}

impl RevealTimeline {
    /// Schedule for a card with `badges` type badges and `rows` stat rows.
    pub fn for_card(badges: usize, rows: usize) -> Self {
        let mut tl = Self::default();
        tl.push(RevealTarget::Card, 0.6, 0.0, EaseFunction::BackOut);
        tl.push(RevealTarget::Sprite, 0.5, 0.3, EaseFunction::BackOut);
        tl.push(RevealTarget::Name, 0.3, 0.2, EaseFunction::QuadraticOut);
        tl.push(RevealTarget::Number, 0.3, 0.3, EaseFunction::QuadraticOut);
        tl.push_staggered(
            (0..badges).map(RevealTarget::Badge),
            0.3,
            0.1,
            0.2,
            EaseFunction::BackOut,
        );
        tl.push_staggered(
            (0..rows).map(RevealTarget::Row),
            0.2,
            0.05,
            0.1,
            EaseFunction::QuadraticOut,
        );
        for i in 0..rows {
            tl.push(RevealTarget::Bar(i), 0.6, 0.5, EaseFunction::QuadraticOut);
        }
        tl
    }

    /// Appends a step that starts `overlap` seconds before the current end.
    fn push(&mut self, target: RevealTarget, duration: f32, overlap: f32, ease: EaseFunction) {
        let start = (self.end - overlap).max(0.0);
        self.add(Step {
            target,
            start,
            duration,
            ease,
        });
    }

    fn push_staggered(
        &mut self,
        targets: impl Iterator<Item = RevealTarget>,
        duration: f32,
        stagger: f32,
        overlap: f32,
        ease: EaseFunction,
    ) {
        let start = (self.end - overlap).max(0.0);
        for (i, target) in targets.enumerate() {
            self.add(Step {
                target,
                start: start + stagger * i as f32,
                duration,
                ease,
            });
        }
    }

    fn add(&mut self, step: Step) {
        self.end = self.end.max(step.end());
        self.steps.push(step);
    }

    pub fn duration(&self) -> f32 {
        self.end
    }

    pub fn step(&self, target: RevealTarget) -> Option<&Step> {
        self.steps.iter().find(|s| s.target == target)
    }

    /// Progress of `target`, fully shown when the target has no step.
    pub fn progress(&self, target: RevealTarget, elapsed: f32) -> f32 {
        self.step(target).map_or(1.0, |s| s.progress(elapsed))
    }

    pub fn is_finished(&self, elapsed: f32) -> bool {
        elapsed >= self.end
    }
}

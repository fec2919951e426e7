use super::*;
use easy_ext::ext;
use std::time::Duration;

/// Seconds from config presets into [`Duration`]s with millisecond precision,
/// negative values clamp to zero.
#[ext(Secs)]
impl f32 {
    pub fn secs(self) -> Duration {
        Duration::from_millis((self.max(0.0) * 1000.0).round() as u64)
    }
}

/// Helper trait to swap every child of a node for a freshly spawned set
///
/// Used by the card to rebuild type badges and stat rows on every reveal.
#[ext(ReplaceChildren)]
impl Commands<'_, '_> {
    pub fn replace_children<B: Bundle>(
        &mut self,
        parent: Entity,
        children: impl IntoIterator<Item = B>,
    ) -> Vec<Entity> {
        self.entity(parent).despawn_related::<Children>();
        let spawned: Vec<Entity> = children
            .into_iter()
            .map(|bundle| self.spawn(bundle).id())
            .collect();
        self.entity(parent).add_children(&spawned);
        spawned
    }
}

/// Flash-friendly colour helpers.
#[ext(ColorAlpha)]
impl Color {
    /// Same colour with its alpha multiplied by `factor`.
    pub fn faded(self, factor: f32) -> Color {
        let alpha = self.alpha();
        self.with_alpha(alpha * factor.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_seconds_clamp_to_zero() {
        assert_eq!((-1.0f32).secs(), Duration::ZERO);
        assert_eq!(2.0f32.secs(), Duration::from_secs(2));
        assert_eq!(0.6f32.secs(), Duration::from_millis(600));
    }

    #[test]
    fn faded_scales_alpha() {
        let c = Color::srgba(1.0, 0.0, 0.0, 0.8).faded(0.5);
        assert!((c.alpha() - 0.4).abs() < 1e-6);
    }
}

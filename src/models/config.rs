use super::*;
use std::time::Duration;

/// Everything tunable about the portal, loaded from `assets/config.ron`.
///
/// The compiled-in [`Default`] matches the shipped file so headless runs and tests
/// behave the same as the app.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Reflect, Asset, Resource)]
#[reflect(Resource)]
pub struct Config {
    pub catalog: CatalogPreset,
    pub timings: TimingsPreset,
    pub particles: ParticlesPreset,
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
pub struct CatalogPreset {
    /// Base url, the creature id is appended as the last path segment.
    pub endpoint: String,
    /// Highest id the randomizer may roll.
    pub size: u32,
    pub legendary: Vec<u32>,
}

impl CatalogPreset {
    pub const ENDPOINT: &'static str = "https://pokeapi.co/api/v2/pokemon";
    pub const SIZE: u32 = 1010;
    pub const LEGENDARY: &'static [u32] = &[
        144, 145, 146, 150, 151, // gen 1
        243, 244, 245, 249, 250, 251, // gen 2
        377, 378, 379, 380, 381, 382, 383, 384, 385, 386, // gen 3
        480, 481, 482, 483, 484, 485, 486, 487, 488, 489, 490, 491, 492, 493, // gen 4
        494, 638, 639, 640, 641, 642, 643, 644, 645, 646, 647, 648, 649, // gen 5
        716, 717, 718, 719, 720, 721, // gen 6
        785, 786, 787, 788, 789, 790, 791, 792, 800, 801, 802, 807, 808, 809, // gen 7
        888, 889, 890, 891, 892, 893, 894, 895, 896, 897, 898, // gen 8
    ];
}

impl Default for CatalogPreset {
    fn default() -> Self {
        Self {
            endpoint: Self::ENDPOINT.to_string(),
            size: Self::SIZE,
            legendary: Self::LEGENDARY.to_vec(),
        }
    }
}

/// Durations in seconds.
#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
pub struct TimingsPreset {
    /// Shake before the lid opens.
    pub open: f32,
    /// Dramatic pause between a successful fetch and the reveal.
    pub reveal: f32,
    /// Hold before the lid closes again.
    pub close: f32,
    pub flash: f32,
    pub portal: f32,
    pub shake: f32,
    pub card_fade: f32,
    pub error_flash: f32,
}

impl Default for TimingsPreset {
    fn default() -> Self {
        Self {
            open: 0.6,
            reveal: 0.4,
            close: 1.0,
            flash: 0.3,
            portal: 1.0,
            shake: 0.5,
            card_fade: 0.3,
            error_flash: 2.0,
        }
    }
}

impl TimingsPreset {
    pub fn open(&self) -> Duration {
        self.open.secs()
    }
    pub fn reveal(&self) -> Duration {
        self.reveal.secs()
    }
    pub fn close(&self) -> Duration {
        self.close.secs()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Reflect)]
pub struct ParticlesPreset {
    /// Particle count of the field shown before the first catch.
    pub ambient: usize,
    /// Particle count of a type themed field.
    pub themed: usize,
    /// Extra particles spawned for a legendary reveal.
    pub burst: usize,
    pub burst_interval: f32,
    pub emitter_interval: f32,
    pub emitter_quantity: usize,
}

impl Default for ParticlesPreset {
    fn default() -> Self {
        Self {
            ambient: 80,
            themed: 100,
            burst: 50,
            burst_interval: 0.02,
            emitter_interval: 0.1,
            emitter_quantity: 5,
        }
    }
}

//! Session tuning knobs.

use serde::Deserialize;

/// Seed used when no explicit seed is configured.
pub const DEFAULT_RNG_SEED: u64 = 0x6761_7264_656e_0001;

/// Tuning parameters controlling a game session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Money held when the session starts.
    pub starting_money: i32,
    /// Storage capacity before any storage towers are placed.
    pub base_storage: i32,
    /// Blight amount at which the session is lost.
    pub max_blight: i32,
    /// Ticks a floating text stays visible.
    pub floating_text_lifetime: u32,
    /// Seed for the session's random number generator.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_money: 100,
            base_storage: 30,
            max_blight: 100,
            floating_text_lifetime: 60,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl GameConfig {
    /// Returns the configuration with a different RNG seed.
    #[must_use]
    pub fn with_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Returns the configuration with different starting money.
    #[must_use]
    pub fn with_starting_money(mut self, starting_money: i32) -> Self {
        self.starting_money = starting_money;
        self
    }
}

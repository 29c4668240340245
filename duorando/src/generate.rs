//! Seed generation driver: validates configs, runs the fill and the
//! sphere walk, and retries with derived seeds when an attempt dead-ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use duorando_game::{Config, GameMode, ItemPool, World};

use crate::fill::Filler;
use crate::playthrough::Playthrough;
use crate::spoiler_log::SpoilerLog;

/// Attempts per call before giving up on a seed.
pub const MAX_ATTEMPTS: usize = 10;

#[derive(Clone, Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("fill exhausted: no location accepts {item} for world {world}")]
    FillExhausted { item: String, world: usize },
    #[error("unsolvable seed: {unresolved} locations stayed out of reach")]
    UnsolvableSeed { unresolved: usize },
    #[error("retry limit reached after {attempts} attempts")]
    RetryLimitReached { attempts: usize },
    #[error("generation cancelled")]
    Cancelled,
}

impl GenerationError {
    /// Whether a fresh attempt with a different seed could succeed.
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::FillExhausted { .. } | GenerationError::UnsolvableSeed { .. }
        )
    }
}

/// Cooperative cancellation flag, checked between placements and
/// between spheres. Cloning shares the flag.
#[derive(Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    pub(crate) fn check(&self) -> Result<(), GenerationError> {
        if self.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        Ok(())
    }
}

/// A finished, verified seed.
#[derive(Debug)]
pub struct SeedData {
    pub seed: u64,
    pub attempts: usize,
    pub worlds: Vec<World>,
    pub playthrough: Playthrough,
    pub spoiler: SpoilerLog,
}

pub struct SeedGenerator {
    configs: Vec<Config>,
    max_attempts: usize,
}

impl SeedGenerator {
    /// One config per player; `player_id`/`player_count` are overwritten
    /// from the position in the slice.
    pub fn new(configs: Vec<Config>) -> Self {
        SeedGenerator {
            configs,
            max_attempts: MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Generates a seed, retrying with seeds derived from the master seed
    /// when the fill or the sphere walk fails. Config errors are not
    /// retried.
    pub fn generate(&self, seed: u64, cancel: &CancelToken) -> Result<SeedData, GenerationError> {
        if self.configs.is_empty() {
            return Err(GenerationError::Config("no players configured".to_string()));
        }
        let configs = self.world_configs();
        for config in &configs {
            config.validate().map_err(GenerationError::Config)?;
        }

        let mut rng_seed = [0u8; 32];
        rng_seed[..8].copy_from_slice(&seed.to_le_bytes());
        let mut rng = rand::rngs::StdRng::from_seed(rng_seed);
        let mut attempt_seed = seed;
        for attempt in 1..=self.max_attempts {
            cancel.check()?;
            match self.attempt(&configs, attempt_seed, cancel) {
                Ok(mut data) => {
                    data.seed = seed;
                    data.attempts = attempt;
                    info!("seed {} generated on attempt {}", seed, attempt);
                    return Ok(data);
                }
                Err(err) if err.is_retryable() => {
                    info!("attempt {} failed: {}", attempt, err);
                    attempt_seed = rng.next_u64();
                }
                Err(err) => return Err(err),
            }
        }
        Err(GenerationError::RetryLimitReached {
            attempts: self.max_attempts,
        })
    }

    /// Stamps the per-world player fields onto the configured settings.
    fn world_configs(&self) -> Vec<Config> {
        let player_count = self.configs.len();
        let game_mode = if player_count > 1 {
            GameMode::Multiworld
        } else {
            GameMode::Normal
        };
        self.configs
            .iter()
            .enumerate()
            .map(|(id, config)| Config {
                game_mode,
                player_id: id,
                player_count,
                ..config.clone()
            })
            .collect()
    }

    fn attempt(
        &self,
        configs: &[Config],
        attempt_seed: u64,
        cancel: &CancelToken,
    ) -> Result<SeedData, GenerationError> {
        let mut worlds: Vec<World> = configs
            .iter()
            .enumerate()
            .map(|(id, config)| World::new(config.clone(), id))
            .collect();
        let mut pools: Vec<ItemPool> = Vec::with_capacity(worlds.len());
        for world in &worlds {
            let pool =
                ItemPool::build(world).map_err(|e| GenerationError::Config(e.to_string()))?;
            pools.push(pool);
        }

        let mut filler = Filler::new(attempt_seed);
        filler.fill(&mut worlds, &mut pools, cancel)?;
        let playthrough = Playthrough::generate(&worlds, cancel)?;
        let spoiler = SpoilerLog::new(&worlds, &playthrough);
        Ok(SeedData {
            seed: attempt_seed,
            attempts: 0,
            worlds,
            playthrough,
            spoiler,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_is_rejected_without_retry() {
        let mut config = Config::default();
        config.tower_crystal_count = 9;
        let generator = SeedGenerator::new(vec![config]);
        let err = generator.generate(1, &CancelToken::new()).unwrap_err();
        assert!(matches!(err, GenerationError::Config(_)));
    }

    #[test]
    fn cancellation_short_circuits() {
        let generator = SeedGenerator::new(vec![Config::default()]);
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = generator.generate(1, &cancel).unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
    }

    #[test]
    fn generation_succeeds_and_reports_the_master_seed() {
        let generator = SeedGenerator::new(vec![Config::default()]);
        let data = generator.generate(12345, &CancelToken::new()).unwrap();
        assert_eq!(data.seed, 12345);
        assert!(data.attempts >= 1);
        assert!(!data.playthrough.spheres.is_empty());
    }
}

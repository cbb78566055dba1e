//! Shared loading of layouts and evaluation weights

use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use abalone_core::{GameState, Layout, Weights};

/// Starting position: the standard layout, or one read from JSON
pub fn load_state(layout: Option<&Path>) -> Result<GameState> {
    let layout = match layout {
        Some(path) => Layout::load(path)
            .with_context(|| format!("Failed to load layout: {}", path.display()))?,
        None => Layout::standard(),
    };
    GameState::from_layout(&layout).with_context(|| format!("Invalid layout '{}'", layout.name))
}

/// Evaluation weights: defaults, or read from JSON
pub fn load_weights(weights: Option<&Path>) -> Result<Weights> {
    match weights {
        Some(path) => Weights::load(path)
            .with_context(|| format!("Failed to load weights: {}", path.display())),
        None => Ok(Weights::default()),
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

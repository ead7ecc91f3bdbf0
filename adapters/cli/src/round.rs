//! Drives one round: generate a grid, then score it.

use anyhow::{Context, Result};
use rand::Rng;
use scratch_card_core::{BetAmount, GameConfig, RoundResult};
use scratch_card_system_matrix_generation::MatrixGenerator;
use scratch_card_system_reward::RewardEngine;
use tracing::info;

/// Plays a round against `config` using `rng` for every random draw.
pub(crate) fn play<R>(config: &GameConfig, bet: BetAmount, rng: &mut R) -> Result<RoundResult>
where
    R: Rng + ?Sized,
{
    let grid = MatrixGenerator::new(config).generate(rng);
    let result = RewardEngine::new(config)
        .score(&grid, bet)
        .context("failed to score generated grid")?;

    info!(
        bet = bet.get(),
        reward = result.reward(),
        bonus = ?result.applied_bonus_symbol(),
        "round complete"
    );
    Ok(result)
}

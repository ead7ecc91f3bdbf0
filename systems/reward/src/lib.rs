#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reward system that scores a frozen grid against the win combination rules.

use std::collections::BTreeMap;

use scratch_card_core::{
    AppliedBonus, BetAmount, BonusImpact, CellCoord, GameConfig, Grid, Result, RoundResult, RuleId,
    ScratchError, SymbolDefinition, SymbolId, WinCombinationRule, WinCondition,
};
use tracing::debug;

/// Pure system that evaluates grids for a single config.
///
/// Scoring holds no state between calls: the same grid, bet and config
/// always produce the same [`RoundResult`].
#[derive(Clone, Copy, Debug)]
pub struct RewardEngine<'config> {
    config: &'config GameConfig,
}

impl<'config> RewardEngine<'config> {
    /// Creates an engine bound to the round's config.
    #[must_use]
    pub const fn new(config: &'config GameConfig) -> Self {
        Self { config }
    }

    /// Scores `grid` for the provided bet.
    ///
    /// Rewards are computed in `f64` and rounded; a total beyond `u64::MAX`
    /// saturates. Bets parsed by [`BetAmount::parse`] stay within the range
    /// `f64` represents exactly.
    ///
    /// Standard symbols are scored in ascending id order. For each symbol the
    /// best count rule and the best linear rule are chosen independently,
    /// the first rule in ascending id order winning a multiplier tie. Bonus
    /// cells are applied afterwards, and a round where no standard symbol
    /// won is reported as a loss with a zero reward.
    ///
    /// # Errors
    ///
    /// Fails with [`ScratchError::ConfigShape`] when the grid dimensions do
    /// not match the config, and with [`ScratchError::UndefinedSymbol`] when
    /// a cell holds a symbol missing from the symbol table.
    pub fn score(&self, grid: &Grid, bet: BetAmount) -> Result<RoundResult> {
        let cells = self.resolve_cells(grid)?;

        let mut total: u64 = 0;
        let mut applied_winning_combinations: BTreeMap<SymbolId, Vec<RuleId>> = BTreeMap::new();

        for definition in self.config.symbols().standard() {
            let Some(win) = self.evaluate_symbol(grid, definition.id()) else {
                continue;
            };

            let reward = win.reward(bet, definition);
            debug!(
                symbol = %definition.id(),
                count_rule = ?win.count_rule.map(WinCombinationRule::id),
                linear_rule = ?win.linear_rule.map(WinCombinationRule::id),
                reward,
                "standard symbol won"
            );
            total = total.saturating_add(reward);
            let _ = applied_winning_combinations.insert(definition.id().clone(), win.rule_ids());
        }

        let mut applied_bonus = AppliedBonus::None;
        let bonus_cells = cells
            .into_iter()
            .filter(|(_, definition)| definition.is_bonus());
        for (coord, definition) in bonus_cells {
            let before = total;
            total = apply_bonus(total, definition);
            debug!(
                cell = %coord,
                symbol = %definition.id(),
                before,
                after = total,
                "applied bonus symbol"
            );
            applied_bonus = AppliedBonus::Symbol(definition.id().clone());
        }

        if applied_winning_combinations.is_empty() {
            debug!(discarded = total, "no winning combination; round is a loss");
            total = 0;
            applied_bonus = AppliedBonus::Loss;
        }

        Ok(RoundResult::new(
            grid.clone(),
            total,
            applied_winning_combinations,
            applied_bonus,
        ))
    }

    /// Checks the grid shape and resolves every cell in row-major order.
    fn resolve_cells(&self, grid: &Grid) -> Result<Vec<(CellCoord, &'config SymbolDefinition)>> {
        let expected = self.config.dimensions();
        if grid.dimensions() != expected {
            return Err(ScratchError::ConfigShape(format!(
                "grid is {} but the configuration expects {expected}",
                grid.dimensions()
            )));
        }

        grid.cells()
            .map(|(coord, symbol)| {
                self.config
                    .symbols()
                    .resolve(symbol, || format!("grid cell {coord}"))
                    .map(|definition| (coord, definition))
            })
            .collect()
    }

    fn evaluate_symbol(&self, grid: &Grid, symbol: &SymbolId) -> Option<SymbolWin<'config>> {
        let count = grid.count(symbol);
        if count == 0 {
            return None;
        }

        let mut win = SymbolWin::default();
        for rule in self.config.rules() {
            match rule.condition() {
                WinCondition::SameSymbols { count: threshold } => {
                    if count >= *threshold as usize
                        && rule.reward_multiplier() > multiplier_of(win.count_rule)
                    {
                        win.count_rule = Some(rule);
                    }
                }
                WinCondition::LinearSymbols { covered_areas } => {
                    let covered = covered_areas.iter().any(|area| grid.covers(area, symbol));
                    if covered && rule.reward_multiplier() > multiplier_of(win.linear_rule) {
                        win.linear_rule = Some(rule);
                    }
                }
            }
        }

        if win.count_rule.is_none() && win.linear_rule.is_none() {
            None
        } else {
            Some(win)
        }
    }
}

/// Rules selected for a single standard symbol.
#[derive(Clone, Copy, Debug, Default)]
struct SymbolWin<'config> {
    count_rule: Option<&'config WinCombinationRule>,
    linear_rule: Option<&'config WinCombinationRule>,
}

impl SymbolWin<'_> {
    /// A linear-only win keeps its rule id but pays nothing, because the
    /// missing count multiplier contributes a factor of zero.
    fn reward(&self, bet: BetAmount, definition: &SymbolDefinition) -> u64 {
        let count_multiplier = multiplier_of(self.count_rule);
        let linear_multiplier = multiplier_of(self.linear_rule).max(1.0);
        let reward =
            bet.get() as f64 * definition.base_multiplier() * count_multiplier * linear_multiplier;
        reward.round() as u64
    }

    fn rule_ids(&self) -> Vec<RuleId> {
        [self.count_rule, self.linear_rule]
            .into_iter()
            .flatten()
            .map(|rule| rule.id().clone())
            .collect()
    }
}

fn multiplier_of(rule: Option<&WinCombinationRule>) -> f64 {
    rule.map_or(0.0, WinCombinationRule::reward_multiplier)
}

/// Multiplication truncates toward zero.
fn apply_bonus(total: u64, definition: &SymbolDefinition) -> u64 {
    match definition.impact() {
        BonusImpact::MultiplyReward => (total as f64 * definition.base_multiplier()) as u64,
        BonusImpact::ExtraBonus { amount } => total.saturating_add(amount),
        BonusImpact::NoEffect => total,
    }
}

/// Scores `grid` for `bet` against `config`.
pub fn score(grid: &Grid, bet: BetAmount, config: &GameConfig) -> Result<RoundResult> {
    RewardEngine::new(config).score(grid, bet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_bonus_truncates() {
        let definition = SymbolDefinition::bonus("1.5x", 1.5, BonusImpact::MultiplyReward);
        assert_eq!(apply_bonus(333, &definition), 499);
    }

    #[test]
    fn extra_bonus_adds_amount() {
        let definition = SymbolDefinition::bonus("+500", 0.0, BonusImpact::ExtraBonus { amount: 500 });
        assert_eq!(apply_bonus(100, &definition), 600);
    }

    #[test]
    fn no_effect_bonus_leaves_total() {
        let definition = SymbolDefinition::bonus("MISS", 0.0, BonusImpact::NoEffect);
        assert_eq!(apply_bonus(100, &definition), 100);
    }

    #[test]
    fn linear_only_win_pays_nothing() {
        let linear = WinCombinationRule::linear_symbols("same_horizontally", 2.0, Vec::new());
        let win = SymbolWin {
            count_rule: None,
            linear_rule: Some(&linear),
        };
        let definition = SymbolDefinition::standard("A", 5.0);
        assert_eq!(win.reward(BetAmount::new(100), &definition), 0);
        assert_eq!(win.rule_ids(), vec![RuleId::from("same_horizontally")]);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Matrix generation system that populates a round's symbol grid.
//!
//! Generation runs three passes over a scratch buffer of optional cells:
//! weighted per-cell standard placement, a single weighted bonus placement
//! that overwrites whatever the first pass left in its cell, and a uniform
//! fallback fill for every cell still empty. All randomness comes from the
//! caller-supplied source so a seeded source replays the same grid.

use std::collections::BTreeMap;

use rand::{
    distributions::{Distribution, WeightedIndex},
    Rng,
};
use scratch_card_core::{GameConfig, Grid, SymbolId};
use tracing::{debug, trace};

/// Weighted distribution over the symbols of a probability map.
#[derive(Clone, Debug)]
struct SymbolDistribution<'a> {
    symbols: Vec<&'a SymbolId>,
    index: WeightedIndex<u64>,
}

impl<'a> SymbolDistribution<'a> {
    /// Returns `None` when no symbol carries a positive weight.
    fn new(weights: &'a BTreeMap<SymbolId, u32>) -> Option<Self> {
        let index = WeightedIndex::new(weights.values().map(|weight| u64::from(*weight))).ok()?;
        Some(Self {
            symbols: weights.keys().collect(),
            index,
        })
    }

    fn sample<R>(&self, rng: &mut R) -> &'a SymbolId
    where
        R: Rng + ?Sized,
    {
        self.symbols[self.index.sample(rng)]
    }
}

/// Pure system that turns a validated config into a populated grid.
#[derive(Clone, Copy, Debug)]
pub struct MatrixGenerator<'config> {
    config: &'config GameConfig,
}

impl<'config> MatrixGenerator<'config> {
    /// Creates a generator bound to the round's config.
    #[must_use]
    pub const fn new(config: &'config GameConfig) -> Self {
        Self { config }
    }

    /// Generates a fully populated grid using the supplied random source.
    ///
    /// Every cell of the returned grid holds a symbol defined in the config.
    /// When the bonus distribution has a positive total weight exactly one
    /// cell holds a bonus symbol, even if that replaced a standard placement.
    pub fn generate<R>(&self, rng: &mut R) -> Grid
    where
        R: Rng + ?Sized,
    {
        let dimensions = self.config.dimensions();
        let mut slots: Vec<Option<SymbolId>> = vec![None; dimensions.cell_count()];

        self.place_standard_symbols(&mut slots, rng);
        self.place_bonus_symbol(&mut slots, rng);

        let fallback: Vec<&SymbolId> = self
            .config
            .symbols()
            .standard()
            .map(|definition| definition.id())
            .collect();
        debug_assert!(!fallback.is_empty(), "validated configs define a standard symbol");

        Grid::from_fn(dimensions, |coord| {
            let slot = dimensions
                .index_of(coord)
                .and_then(|index| slots.get_mut(index))
                .and_then(Option::take);
            slot.unwrap_or_else(|| {
                let symbol = fallback[rng.gen_range(0..fallback.len())].clone();
                trace!(cell = %coord, symbol = %symbol, "filled uncovered cell");
                symbol
            })
        })
    }

    fn place_standard_symbols<R>(&self, slots: &mut [Option<SymbolId>], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let dimensions = self.config.dimensions();
        for probability in self.config.cell_probabilities() {
            let Some(distribution) = SymbolDistribution::new(probability.weights()) else {
                continue;
            };
            let Some(index) = dimensions.index_of(probability.coord()) else {
                continue;
            };

            let symbol = distribution.sample(rng);
            debug!(cell = %probability.coord(), symbol = %symbol, "placed standard symbol");
            slots[index] = Some(symbol.clone());
        }
    }

    fn place_bonus_symbol<R>(&self, slots: &mut [Option<SymbolId>], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let Some(distribution) = SymbolDistribution::new(self.config.bonus_probability().weights())
        else {
            debug!("bonus distribution is empty; no bonus symbol placed");
            return;
        };

        let index = rng.gen_range(0..slots.len());
        let symbol = distribution.sample(rng);
        if let Some(replaced) = slots[index].replace(symbol.clone()) {
            debug!(index, symbol = %symbol, replaced = %replaced, "bonus symbol overwrote standard placement");
        } else {
            debug!(index, symbol = %symbol, "placed bonus symbol");
        }
    }
}

/// Generates a grid for `config` using `rng`.
pub fn generate<R>(config: &GameConfig, rng: &mut R) -> Grid
where
    R: Rng + ?Sized,
{
    MatrixGenerator::new(config).generate(rng)
}

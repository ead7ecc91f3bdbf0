use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scratch_card_core::{
    AppliedBonus, BetAmount, BonusImpact, BonusProbability, CellCoord, CellProbability,
    GameConfig, GridDimensions, SymbolDefinition, SymbolId, SymbolTable, WinCombinationRule,
};
use scratch_card_system_matrix_generation::MatrixGenerator;
use scratch_card_system_reward::RewardEngine;

#[test]
fn losing_rounds_always_pay_zero() {
    let config = scripted_config();
    let generator = MatrixGenerator::new(&config);
    let engine = RewardEngine::new(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(0x10_55);

    let mut losses = 0;
    let mut wins = 0;
    for _ in 0..500 {
        let grid = generator.generate(&mut rng);
        let result = engine.score(&grid, BetAmount::new(100)).expect("generated grids score");

        if result.applied_winning_combinations().is_empty() {
            losses += 1;
            assert_eq!(result.reward(), 0);
            assert_eq!(result.applied_bonus_symbol(), &AppliedBonus::Loss);
        } else {
            wins += 1;
            assert!(matches!(
                result.applied_bonus_symbol(),
                AppliedBonus::Symbol(_)
            ));
        }
    }

    assert!(losses > 0, "expected some losing rounds");
    assert!(wins > 0, "expected some winning rounds");
}

#[test]
fn scoring_a_generated_grid_is_pure() {
    let config = scripted_config();
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let grid = MatrixGenerator::new(&config).generate(&mut rng);
    let engine = RewardEngine::new(&config);

    let first = engine.score(&grid, BetAmount::new(40)).expect("generated grids score");
    let second = engine.score(&grid, BetAmount::new(40)).expect("generated grids score");

    assert_eq!(first, second);
}

#[test]
fn zero_bet_never_pays_standard_wins() {
    let config = scripted_config();
    let generator = MatrixGenerator::new(&config);
    let engine = RewardEngine::new(&config);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        let grid = generator.generate(&mut rng);
        let result = engine.score(&grid, BetAmount::new(0)).expect("generated grids score");
        let bonus_only = match result.applied_bonus_symbol() {
            AppliedBonus::Symbol(symbol) if symbol.as_str() == "+500" => 500,
            _ => 0,
        };
        assert_eq!(result.reward(), bonus_only);
    }
}

fn scripted_config() -> GameConfig {
    let symbols = SymbolTable::from_definitions([
        SymbolDefinition::standard("A", 5.0),
        SymbolDefinition::standard("B", 3.0),
        SymbolDefinition::standard("C", 2.5),
        SymbolDefinition::standard("D", 2.0),
        SymbolDefinition::standard("E", 1.2),
        SymbolDefinition::standard("F", 1.0),
        SymbolDefinition::bonus("10x", 10.0, BonusImpact::MultiplyReward),
        SymbolDefinition::bonus("+500", 0.0, BonusImpact::ExtraBonus { amount: 500 }),
        SymbolDefinition::bonus("MISS", 0.0, BonusImpact::NoEffect),
    ])
    .expect("symbols are unique");

    let mut cells = Vec::new();
    for row in 0..3 {
        for column in 0..3 {
            let weights: BTreeMap<SymbolId, u32> =
                [("A", 1), ("B", 2), ("C", 3), ("D", 4), ("E", 5), ("F", 6)]
                    .into_iter()
                    .map(|(id, weight)| (SymbolId::from(id), weight))
                    .collect();
            cells.push(CellProbability::new(CellCoord::new(row, column), weights));
        }
    }

    let bonus: BTreeMap<SymbolId, u32> = [("10x", 1), ("+500", 2), ("MISS", 3)]
        .into_iter()
        .map(|(id, weight)| (SymbolId::from(id), weight))
        .collect();

    let rows: Vec<Vec<CellCoord>> = (0..3)
        .map(|row| (0..3).map(|column| CellCoord::new(row, column)).collect())
        .collect();

    GameConfig::new(
        GridDimensions::new(3, 3).expect("non-empty grid"),
        symbols,
        cells,
        BonusProbability::new(bonus),
        vec![
            WinCombinationRule::same_symbols("same_symbol_3_times", 1.0, 3),
            WinCombinationRule::same_symbols("same_symbol_4_times", 1.5, 4),
            WinCombinationRule::same_symbols("same_symbol_5_times", 2.0, 5),
            WinCombinationRule::linear_symbols("same_symbols_horizontally", 2.0, rows),
        ],
    )
    .expect("valid config")
}

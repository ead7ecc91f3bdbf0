use std::path::PathBuf;

use scratch_card_config::{load, LoadError};
use scratch_card_core::{BonusImpact, GridDimensions, ScratchError, SymbolId};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../configs")
        .join(name)
}

#[test]
fn shipped_json_config_is_valid() {
    let config = load(sample("scratch_3x3.json")).expect("shipped config loads");

    assert_eq!(config.dimensions(), GridDimensions::new(3, 3).expect("non-empty"));
    assert_eq!(config.symbols().standard().count(), 6);
    assert_eq!(config.cell_probabilities().len(), 9);
    assert_eq!(config.rules().len(), 11);

    let ten_x = config
        .symbols()
        .get(&SymbolId::from("10x"))
        .expect("10x defined");
    assert_eq!(ten_x.impact(), BonusImpact::MultiplyReward);
    assert_eq!(ten_x.base_multiplier(), 10.0);
}

#[test]
fn json_and_toml_samples_describe_the_same_game() {
    let json = load(sample("scratch_3x3.json")).expect("json loads");
    let toml = load(sample("scratch_3x3.toml")).expect("toml loads");
    assert_eq!(json, toml);
}

#[test]
fn validation_errors_surface_through_the_loader() {
    let document = std::fs::read_to_string(sample("scratch_3x3.json")).expect("readable");
    let broken = document.replacen("\"row\": 0", "\"row\": 7", 1);

    match scratch_card_config::from_json_str(&broken) {
        Err(LoadError::Invalid(ScratchError::Bounds { dimensions, .. })) => {
            assert_eq!(dimensions, GridDimensions::new(3, 3).expect("non-empty"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

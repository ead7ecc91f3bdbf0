use std::{path::PathBuf, process::Command};

use serde_json::Value;

fn sample_config() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../configs/scratch_3x3.json")
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_scratch-card"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch scratch-card")
}

fn play_seeded(seed: &str) -> Value {
    let config = sample_config();
    let output = run(&[
        "--config",
        config.to_str().expect("utf-8 path"),
        "--betting-amount",
        "100",
        "--seed",
        seed,
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn prints_round_result_as_json() {
    let result = play_seeded("42");

    let matrix = result["matrix"].as_array().expect("matrix is an array");
    assert_eq!(matrix.len(), 3);
    for row in matrix {
        let row = row.as_array().expect("row is an array");
        assert_eq!(row.len(), 3);
        assert!(row.iter().all(Value::is_string));
    }

    assert!(result["reward"].is_u64());
    assert!(result["appliedWinningCombinations"].is_object());

    let bonus = &result["appliedBonusSymbol"];
    if result["appliedWinningCombinations"]
        .as_object()
        .is_some_and(serde_json::Map::is_empty)
    {
        assert_eq!(result["reward"], 0);
        assert_eq!(bonus, "LOSS");
    } else {
        assert!(bonus.is_string(), "a bonus symbol is always placed by the sample config");
    }
}

#[test]
fn seeded_rounds_replay() {
    assert_eq!(play_seeded("7"), play_seeded("7"));
}

#[test]
fn compact_output_is_a_single_line() {
    let config = sample_config();
    let output = run(&[
        "-c",
        config.to_str().expect("utf-8 path"),
        "-b",
        "10",
        "--seed",
        "3",
        "--compact",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn negative_bet_is_a_usage_error() {
    let config = sample_config();
    let output = run(&["-c", config.to_str().expect("utf-8 path"), "-b", "-10"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bet must not be negative"));
}

#[test]
fn missing_config_fails() {
    let output = run(&["-c", "no/such/config.json", "-b", "10"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no/such/config.json"));
}

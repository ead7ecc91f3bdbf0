#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a single scratch card round.

mod round;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scratch_card_core::BetAmount;
use tracing_subscriber::EnvFilter;

/// Command-line arguments accepted by the scratch card binary.
#[derive(Debug, Parser)]
#[command(
    name = "scratch-card",
    version,
    about = "Plays one scratch card round and prints the result as JSON"
)]
struct Cli {
    /// Game configuration file (.json or .toml).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: PathBuf,
    /// Amount wagered on the round.
    #[arg(
        short = 'b',
        long = "betting-amount",
        value_name = "AMOUNT",
        value_parser = BetAmount::parse,
        allow_hyphen_values = true
    )]
    betting_amount: BetAmount,
    /// Seeds the round so it can be replayed.
    #[arg(long)]
    seed: Option<u64>,
    /// Prints the result on a single line.
    #[arg(long)]
    compact: bool,
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

/// Entry point for the scratch card command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = scratch_card_config::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let result = round::play(&config, cli.betting_amount, &mut rng)?;

    let rendered = if cli.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("failed to render round result")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_short_flags() {
        let cli = Cli::try_parse_from(["scratch-card", "-c", "game.json", "-b", "100"])
            .expect("valid arguments");
        assert_eq!(cli.config, PathBuf::from("game.json"));
        assert_eq!(cli.betting_amount, BetAmount::new(100));
        assert_eq!(cli.seed, None);
        assert!(!cli.compact);
    }

    #[test]
    fn rejects_negative_bet() {
        let error = Cli::try_parse_from(["scratch-card", "-c", "game.json", "-b", "-5"])
            .expect_err("negative bets are invalid");
        assert!(error.to_string().contains("bet must not be negative"));
    }

    #[test]
    fn rejects_non_numeric_bet() {
        let error = Cli::try_parse_from(["scratch-card", "--config", "game.json", "--betting-amount", "ten"])
            .expect_err("non-numeric bets are invalid");
        assert!(error.to_string().contains("whole number"));
    }

    #[test]
    fn requires_config_and_bet() {
        assert!(Cli::try_parse_from(["scratch-card", "-b", "10"]).is_err());
        assert!(Cli::try_parse_from(["scratch-card", "-c", "game.json"]).is_err());
    }
}

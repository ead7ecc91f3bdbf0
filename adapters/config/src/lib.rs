#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adapter that decodes scratch card configuration documents.
//!
//! The document shape mirrors the JSON layout used by the game's config
//! files (`rows`, `columns`, `symbols`, `probabilities`, `win_combinations`).
//! TOML documents with the same logical shape are accepted as well. Decoding
//! only checks the document's syntax; every semantic rule is enforced by
//! [`GameConfig::new`].

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use scratch_card_core::{
    BonusImpact, BonusProbability, CellCoord, CellProbability, GameConfig, GridDimensions,
    ScratchError, SymbolDefinition, SymbolId, SymbolTable, WinCombinationRule,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a configuration document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read configuration at {}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file extension does not name a supported format.
    #[error("unsupported configuration format for {}; expected .json or .toml", path.display())]
    UnsupportedFormat {
        /// Path whose extension was rejected.
        path: PathBuf,
    },
    /// The JSON document could not be decoded.
    #[error("could not parse JSON configuration")]
    Json(#[from] serde_json::Error),
    /// The TOML document could not be decoded.
    #[error("could not parse TOML configuration")]
    Toml(#[from] toml::de::Error),
    /// The document decoded but describes an invalid game.
    #[error(transparent)]
    Invalid(#[from] ScratchError),
}

/// Encodings accepted for configuration documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Infers the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Loads and validates the configuration stored at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<GameConfig, LoadError> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_owned(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let config = from_str(&contents, format)?;
    debug!(
        path = %path.display(),
        dimensions = %config.dimensions(),
        symbols = config.symbols().len(),
        rules = config.rules().len(),
        "loaded configuration"
    );
    Ok(config)
}

/// Decodes and validates a document held in memory.
pub fn from_str(contents: &str, format: ConfigFormat) -> Result<GameConfig, LoadError> {
    match format {
        ConfigFormat::Json => from_json_str(contents),
        ConfigFormat::Toml => from_toml_str(contents),
    }
}

/// Decodes and validates a JSON document.
pub fn from_json_str(contents: &str) -> Result<GameConfig, LoadError> {
    let raw: RawConfig = serde_json::from_str(contents)?;
    Ok(raw.into_config()?)
}

/// Decodes and validates a TOML document.
pub fn from_toml_str(contents: &str) -> Result<GameConfig, LoadError> {
    let raw: RawConfig = toml::from_str(contents)?;
    Ok(raw.into_config()?)
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    rows: u32,
    columns: u32,
    symbols: BTreeMap<String, RawSymbol>,
    #[serde(default)]
    probabilities: RawProbabilities,
    #[serde(default)]
    win_combinations: BTreeMap<String, RawWinCombination>,
}

#[derive(Debug, Deserialize)]
struct RawSymbol {
    #[serde(default)]
    reward_multiplier: f64,
    #[serde(rename = "type")]
    kind: String,
    impact: Option<String>,
    extra: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProbabilities {
    #[serde(default)]
    standard_symbols: Vec<RawCellProbability>,
    #[serde(default)]
    bonus_symbols: RawBonusProbability,
}

#[derive(Debug, Deserialize)]
struct RawCellProbability {
    row: u32,
    column: u32,
    symbols: BTreeMap<String, u32>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBonusProbability {
    #[serde(default)]
    symbols: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct RawWinCombination {
    reward_multiplier: f64,
    when: String,
    count: Option<u32>,
    group: Option<String>,
    #[serde(default)]
    covered_areas: Vec<Vec<String>>,
}

impl RawConfig {
    fn into_config(self) -> Result<GameConfig, ScratchError> {
        let dimensions = GridDimensions::new(self.rows, self.columns)?;

        let definitions = self
            .symbols
            .into_iter()
            .map(|(id, symbol)| symbol.into_definition(id))
            .collect::<Result<Vec<_>, _>>()?;
        let symbols = SymbolTable::from_definitions(definitions)?;

        let cell_probabilities = self
            .probabilities
            .standard_symbols
            .into_iter()
            .map(|cell| {
                CellProbability::new(CellCoord::new(cell.row, cell.column), to_weights(cell.symbols))
            })
            .collect();
        let bonus_probability =
            BonusProbability::new(to_weights(self.probabilities.bonus_symbols.symbols));

        let rules = self
            .win_combinations
            .into_iter()
            .map(|(id, rule)| rule.into_rule(id))
            .collect::<Result<Vec<_>, _>>()?;

        GameConfig::new(dimensions, symbols, cell_probabilities, bonus_probability, rules)
    }
}

impl RawSymbol {
    fn into_definition(self, id: String) -> Result<SymbolDefinition, ScratchError> {
        match self.kind.as_str() {
            "standard" => Ok(SymbolDefinition::standard(id, self.reward_multiplier)),
            "bonus" => {
                let impact = parse_impact(&id, self.impact.as_deref(), self.extra)?;
                Ok(SymbolDefinition::bonus(id, self.reward_multiplier, impact))
            }
            other => Err(ScratchError::ConfigShape(format!(
                "symbol `{id}` has unknown type `{other}`"
            ))),
        }
    }
}

fn parse_impact(id: &str, impact: Option<&str>, extra: Option<i64>) -> Result<BonusImpact, ScratchError> {
    match impact {
        Some("multiply_reward") => Ok(BonusImpact::MultiplyReward),
        Some("extra_bonus") => {
            let extra = extra.ok_or_else(|| {
                ScratchError::ConfigShape(format!("bonus symbol `{id}` has extra_bonus impact but no extra"))
            })?;
            let amount = u64::try_from(extra).map_err(|_| {
                ScratchError::ConfigShape(format!("bonus symbol `{id}` has negative extra {extra}"))
            })?;
            Ok(BonusImpact::ExtraBonus { amount })
        }
        Some("miss") | Some("none") | None => Ok(BonusImpact::NoEffect),
        Some(other) => Err(ScratchError::ConfigShape(format!(
            "bonus symbol `{id}` has unknown impact `{other}`"
        ))),
    }
}

impl RawWinCombination {
    fn into_rule(self, id: String) -> Result<WinCombinationRule, ScratchError> {
        let rule = match self.when.as_str() {
            "same_symbols" => {
                let count = self.count.ok_or_else(|| {
                    ScratchError::ConfigShape(format!("win combination `{id}` is missing its count"))
                })?;
                WinCombinationRule::same_symbols(id, self.reward_multiplier, count)
            }
            "linear_symbols" => {
                let covered_areas = self
                    .covered_areas
                    .iter()
                    .map(|area| {
                        area.iter()
                            .map(|coord| coord.parse::<CellCoord>())
                            .collect::<Result<Vec<_>, _>>()
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                WinCombinationRule::linear_symbols(id, self.reward_multiplier, covered_areas)
            }
            other => {
                return Err(ScratchError::ConfigShape(format!(
                    "win combination `{id}` has unknown condition `{other}`"
                )))
            }
        };

        Ok(match self.group {
            Some(group) => rule.with_group(group),
            None => rule,
        })
    }
}

fn to_weights(raw: BTreeMap<String, u32>) -> BTreeMap<SymbolId, u32> {
    raw.into_iter()
        .map(|(id, weight)| (SymbolId::from(id), weight))
        .collect()
}

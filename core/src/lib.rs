#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the scratch card engine.
//!
//! This crate defines the data model that connects adapters and the pure
//! systems. Adapters decode an external document into a validated
//! [`GameConfig`], the matrix generation system turns that config plus an
//! explicit random source into a [`Grid`], and the reward system scores the
//! frozen grid into a [`RoundResult`]. Nothing in here performs I/O or draws
//! random numbers.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Value reported as the applied bonus symbol when a round wins nothing.
pub const LOSS_SENTINEL: &str = "LOSS";

/// Separator used by the external `"row:column"` coordinate notation.
const COORD_DELIMITER: char = ':';

/// Errors that abort a round.
///
/// None of these are recoverable inside the engine; the caller decides
/// whether to abort or retry with corrected input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScratchError {
    /// The configuration or an input grid is structurally invalid.
    #[error("invalid configuration: {0}")]
    ConfigShape(String),
    /// A symbol id could not be resolved in the symbol table.
    #[error("symbol `{symbol}` is not defined ({context})")]
    UndefinedSymbol {
        /// Identifier that failed to resolve.
        symbol: SymbolId,
        /// Where the identifier was referenced.
        context: String,
    },
    /// A coordinate falls outside the configured grid.
    #[error("coordinate {coord} lies outside the {dimensions} grid ({context})")]
    Bounds {
        /// Offending coordinate.
        coord: CellCoord,
        /// Dimensions the coordinate was checked against.
        dimensions: GridDimensions,
        /// Where the coordinate was referenced.
        context: String,
    },
    /// The bet amount is not a non-negative integer.
    #[error("invalid bet amount `{input}`: {reason}")]
    InputAmount {
        /// Text that was rejected.
        input: String,
        /// Why the text was rejected.
        reason: String,
    },
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ScratchError>;

/// Identifier of a symbol definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SymbolId(String);

impl SymbolId {
    /// Creates a new symbol identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SymbolId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifier of a win combination rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    /// Creates a new rule identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RuleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Location of a single grid cell expressed as zero-based row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{COORD_DELIMITER}{}", self.row, self.column)
    }
}

impl FromStr for CellCoord {
    type Err = ScratchError;

    /// Parses the external `"row:column"` notation.
    fn from_str(value: &str) -> Result<Self> {
        let malformed =
            || ScratchError::ConfigShape(format!("coordinate `{value}` is not of the form row:column"));

        let (row, column) = value.trim().split_once(COORD_DELIMITER).ok_or_else(malformed)?;
        let row = row.trim().parse::<u32>().map_err(|_| malformed())?;
        let column = column.trim().parse::<u32>().map_err(|_| malformed())?;
        Ok(Self::new(row, column))
    }
}

/// Number of rows and columns in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    rows: u32,
    columns: u32,
}

impl GridDimensions {
    /// Creates grid dimensions; both axes must hold at least one cell.
    pub fn new(rows: u32, columns: u32) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(ScratchError::ConfigShape(format!(
                "grid dimensions {rows}x{columns} must be at least 1x1"
            )));
        }
        Ok(Self { rows, columns })
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    /// Row-major index of the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }

    /// Coordinate of the cell at the row-major index, if it exists.
    #[must_use]
    pub fn coord_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.cell_count() {
            return None;
        }
        let width = self.columns as usize;
        let row = u32::try_from(index / width).ok()?;
        let column = u32::try_from(index % width).ok()?;
        Some(CellCoord::new(row, column))
    }

    fn check(&self, coord: CellCoord, context: impl FnOnce() -> String) -> Result<()> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(ScratchError::Bounds {
                coord,
                dimensions: *self,
                context: context(),
            })
        }
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

/// Role a symbol plays on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Participates in count and linear win evaluation.
    Standard,
    /// Applies a post-scoring effect instead of matching.
    Bonus,
}

/// Effect a bonus symbol applies to the round total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BonusImpact {
    /// Multiplies the running total by the symbol's base multiplier.
    MultiplyReward,
    /// Adds a fixed amount to the running total.
    ExtraBonus {
        /// Amount added to the total.
        amount: u64,
    },
    /// Leaves the total untouched.
    NoEffect,
}

/// Definition of a single symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolDefinition {
    id: SymbolId,
    kind: SymbolKind,
    base_multiplier: f64,
    impact: BonusImpact,
}

impl SymbolDefinition {
    /// Creates a standard symbol paying `base_multiplier` times the bet.
    #[must_use]
    pub fn standard(id: impl Into<SymbolId>, base_multiplier: f64) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Standard,
            base_multiplier,
            impact: BonusImpact::NoEffect,
        }
    }

    /// Creates a bonus symbol applying `impact` after standard scoring.
    #[must_use]
    pub fn bonus(id: impl Into<SymbolId>, base_multiplier: f64, impact: BonusImpact) -> Self {
        Self {
            id: id.into(),
            kind: SymbolKind::Bonus,
            base_multiplier,
            impact,
        }
    }

    /// Identifier of the symbol.
    #[must_use]
    pub fn id(&self) -> &SymbolId {
        &self.id
    }

    /// Whether the symbol is standard or bonus.
    #[must_use]
    pub const fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Multiplier applied to the bet (standard) or to the total (`multiply_reward` bonus).
    #[must_use]
    pub const fn base_multiplier(&self) -> f64 {
        self.base_multiplier
    }

    /// Effect applied by a bonus symbol; always [`BonusImpact::NoEffect`] for standard symbols.
    #[must_use]
    pub const fn impact(&self) -> BonusImpact {
        self.impact
    }

    /// Reports whether the symbol is of bonus kind.
    #[must_use]
    pub fn is_bonus(&self) -> bool {
        self.kind == SymbolKind::Bonus
    }
}

/// Lookup table of every symbol known to a round, ordered by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
    symbols: BTreeMap<SymbolId, SymbolDefinition>,
}

impl SymbolTable {
    /// Builds a table from definitions, rejecting duplicate ids.
    pub fn from_definitions(definitions: impl IntoIterator<Item = SymbolDefinition>) -> Result<Self> {
        let mut symbols = BTreeMap::new();
        for definition in definitions {
            let id = definition.id().clone();
            if symbols.insert(id.clone(), definition).is_some() {
                return Err(ScratchError::ConfigShape(format!(
                    "symbol `{id}` is defined more than once"
                )));
            }
        }
        Ok(Self { symbols })
    }

    /// Returns the definition for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &SymbolId) -> Option<&SymbolDefinition> {
        self.symbols.get(id)
    }

    /// Returns the definition for `id`, or an undefined-symbol error naming `context`.
    pub fn resolve(&self, id: &SymbolId, context: impl FnOnce() -> String) -> Result<&SymbolDefinition> {
        self.get(id).ok_or_else(|| ScratchError::UndefinedSymbol {
            symbol: id.clone(),
            context: context(),
        })
    }

    /// Iterator over all definitions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &SymbolDefinition> {
        self.symbols.values()
    }

    /// Iterator over standard definitions in ascending id order.
    pub fn standard(&self) -> impl Iterator<Item = &SymbolDefinition> {
        self.iter().filter(|definition| !definition.is_bonus())
    }

    /// Number of definitions in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Reports whether the table holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Weighted standard-symbol distribution for a single cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellProbability {
    coord: CellCoord,
    weights: BTreeMap<SymbolId, u32>,
}

impl CellProbability {
    /// Creates a distribution addressed at `coord`.
    #[must_use]
    pub fn new(coord: CellCoord, weights: BTreeMap<SymbolId, u32>) -> Self {
        Self { coord, weights }
    }

    /// Cell the distribution applies to.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Symbol weights in ascending id order.
    #[must_use]
    pub fn weights(&self) -> &BTreeMap<SymbolId, u32> {
        &self.weights
    }
}

/// Grid-wide weighted bonus-symbol distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BonusProbability {
    weights: BTreeMap<SymbolId, u32>,
}

impl BonusProbability {
    /// Creates a bonus distribution.
    #[must_use]
    pub fn new(weights: BTreeMap<SymbolId, u32>) -> Self {
        Self { weights }
    }

    /// Bonus symbol weights in ascending id order.
    #[must_use]
    pub fn weights(&self) -> &BTreeMap<SymbolId, u32> {
        &self.weights
    }

}

/// Matching condition of a win combination rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WinCondition {
    /// Qualifies when a symbol appears at least `count` times anywhere.
    SameSymbols {
        /// Minimum number of occurrences.
        count: u32,
    },
    /// Qualifies when every coordinate of any one area holds the symbol.
    LinearSymbols {
        /// Ordered areas, each an ordered list of coordinates.
        covered_areas: Vec<Vec<CellCoord>>,
    },
}

/// A rule describing a winning arrangement and its payout multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct WinCombinationRule {
    id: RuleId,
    condition: WinCondition,
    reward_multiplier: f64,
    group: Option<String>,
}

impl WinCombinationRule {
    /// Creates a count-based rule.
    #[must_use]
    pub fn same_symbols(id: impl Into<RuleId>, reward_multiplier: f64, count: u32) -> Self {
        Self {
            id: id.into(),
            condition: WinCondition::SameSymbols { count },
            reward_multiplier,
            group: None,
        }
    }

    /// Creates a positional rule over the provided areas.
    #[must_use]
    pub fn linear_symbols(
        id: impl Into<RuleId>,
        reward_multiplier: f64,
        covered_areas: Vec<Vec<CellCoord>>,
    ) -> Self {
        Self {
            id: id.into(),
            condition: WinCondition::LinearSymbols { covered_areas },
            reward_multiplier,
            group: None,
        }
    }

    /// Attaches an informational group label.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Identifier of the rule.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Matching condition of the rule.
    #[must_use]
    pub fn condition(&self) -> &WinCondition {
        &self.condition
    }

    /// Multiplier applied when the rule is selected.
    #[must_use]
    pub const fn reward_multiplier(&self) -> f64 {
        self.reward_multiplier
    }

    /// Informational group label.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Validated, immutable description of one round's game.
///
/// Every cross-reference is checked once in [`GameConfig::new`], so the
/// systems can rely on coordinates being in bounds and on every symbol id
/// resolving. Rules are held in ascending id order, which is the tie-break
/// order used when two qualifying rules share a multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    dimensions: GridDimensions,
    symbols: SymbolTable,
    cell_probabilities: Vec<CellProbability>,
    bonus_probability: BonusProbability,
    rules: Vec<WinCombinationRule>,
}

impl GameConfig {
    /// Validates the parts and assembles a config.
    pub fn new(
        dimensions: GridDimensions,
        symbols: SymbolTable,
        cell_probabilities: Vec<CellProbability>,
        bonus_probability: BonusProbability,
        mut rules: Vec<WinCombinationRule>,
    ) -> Result<Self> {
        validate_symbols(&symbols)?;
        validate_cell_probabilities(dimensions, &symbols, &cell_probabilities)?;
        validate_bonus_probability(&symbols, &bonus_probability)?;
        rules.sort_by(|left, right| left.id().cmp(right.id()));
        validate_rules(dimensions, &rules)?;

        Ok(Self {
            dimensions,
            symbols,
            cell_probabilities,
            bonus_probability,
            rules,
        })
    }

    /// Grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Per-cell standard distributions, in configuration order.
    #[must_use]
    pub fn cell_probabilities(&self) -> &[CellProbability] {
        &self.cell_probabilities
    }

    /// Grid-wide bonus distribution.
    #[must_use]
    pub fn bonus_probability(&self) -> &BonusProbability {
        &self.bonus_probability
    }

    /// Win combination rules in ascending id order.
    #[must_use]
    pub fn rules(&self) -> &[WinCombinationRule] {
        &self.rules
    }
}

fn validate_symbols(symbols: &SymbolTable) -> Result<()> {
    if symbols.is_empty() {
        return Err(ScratchError::ConfigShape("no symbols are defined".to_owned()));
    }
    if symbols.standard().next().is_none() {
        return Err(ScratchError::ConfigShape(
            "at least one standard symbol must be defined".to_owned(),
        ));
    }

    for definition in symbols.iter() {
        let multiplier = definition.base_multiplier();
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ScratchError::ConfigShape(format!(
                "symbol `{}` has invalid reward multiplier {multiplier}",
                definition.id()
            )));
        }
    }
    Ok(())
}

fn validate_cell_probabilities(
    dimensions: GridDimensions,
    symbols: &SymbolTable,
    cell_probabilities: &[CellProbability],
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for probability in cell_probabilities {
        let coord = probability.coord();
        dimensions.check(coord, || "standard symbol probability".to_owned())?;
        if !seen.insert(coord) {
            return Err(ScratchError::ConfigShape(format!(
                "cell {coord} has more than one standard symbol probability"
            )));
        }
        if probability.weights().is_empty() {
            return Err(ScratchError::ConfigShape(format!(
                "cell {coord} lists no standard symbols"
            )));
        }

        for (id, weight) in probability.weights() {
            let definition = symbols.resolve(id, || format!("probability for cell {coord}"))?;
            if definition.is_bonus() {
                return Err(ScratchError::ConfigShape(format!(
                    "cell {coord} lists bonus symbol `{id}` among standard symbols"
                )));
            }
            if *weight == 0 {
                return Err(ScratchError::ConfigShape(format!(
                    "cell {coord} gives symbol `{id}` a zero weight"
                )));
            }
        }
    }
    Ok(())
}

fn validate_bonus_probability(symbols: &SymbolTable, bonus: &BonusProbability) -> Result<()> {
    for (id, weight) in bonus.weights() {
        let definition = symbols.resolve(id, || "bonus symbol probability".to_owned())?;
        if !definition.is_bonus() {
            return Err(ScratchError::ConfigShape(format!(
                "standard symbol `{id}` listed among bonus symbols"
            )));
        }
        if *weight == 0 {
            return Err(ScratchError::ConfigShape(format!(
                "bonus symbol `{id}` has a zero weight"
            )));
        }
    }
    Ok(())
}

fn validate_rules(dimensions: GridDimensions, rules: &[WinCombinationRule]) -> Result<()> {
    for pair in rules.windows(2) {
        if pair[0].id() == pair[1].id() {
            return Err(ScratchError::ConfigShape(format!(
                "win combination `{}` is defined more than once",
                pair[0].id()
            )));
        }
    }

    for rule in rules {
        let multiplier = rule.reward_multiplier();
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(ScratchError::ConfigShape(format!(
                "win combination `{}` has invalid reward multiplier {multiplier}",
                rule.id()
            )));
        }

        if let WinCondition::LinearSymbols { covered_areas } = rule.condition() {
            if covered_areas.is_empty() {
                return Err(ScratchError::ConfigShape(format!(
                    "linear win combination `{}` has no covered areas",
                    rule.id()
                )));
            }
            for (area_index, area) in covered_areas.iter().enumerate() {
                if area.is_empty() {
                    return Err(ScratchError::ConfigShape(format!(
                        "covered area {area_index} of win combination `{}` is empty",
                        rule.id()
                    )));
                }
                for coord in area {
                    dimensions.check(*coord, || {
                        format!("covered area {area_index} of win combination `{}`", rule.id())
                    })?;
                }
            }
        }
    }
    Ok(())
}

/// Fully populated matrix of symbol ids, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<SymbolId>,
}

impl Grid {
    /// Wraps row-major cells; the cell count must match the dimensions.
    pub fn from_cells(dimensions: GridDimensions, cells: Vec<SymbolId>) -> Result<Self> {
        if cells.len() != dimensions.cell_count() {
            return Err(ScratchError::ConfigShape(format!(
                "{dimensions} grid needs {} cells, got {}",
                dimensions.cell_count(),
                cells.len()
            )));
        }
        Ok(Self { dimensions, cells })
    }

    /// Builds a grid by asking `fill` for each cell in row-major order.
    pub fn from_fn(dimensions: GridDimensions, mut fill: impl FnMut(CellCoord) -> SymbolId) -> Self {
        let cells = (0..dimensions.cell_count())
            .filter_map(|index| dimensions.coord_at(index))
            .map(&mut fill)
            .collect();
        Self { dimensions, cells }
    }

    /// Builds a grid from explicit rows, which must be non-empty and rectangular.
    pub fn from_rows<S>(rows: Vec<Vec<S>>) -> Result<Self>
    where
        S: Into<SymbolId>,
    {
        let row_count = u32::try_from(rows.len())
            .map_err(|_| ScratchError::ConfigShape("grid has too many rows".to_owned()))?;
        let width = rows.first().map_or(0, Vec::len);
        let column_count = u32::try_from(width)
            .map_err(|_| ScratchError::ConfigShape("grid has too many columns".to_owned()))?;
        let dimensions = GridDimensions::new(row_count, column_count)?;

        let mut cells = Vec::with_capacity(dimensions.cell_count());
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ScratchError::ConfigShape(format!(
                    "grid row {index} has {} cells, expected {width}",
                    row.len()
                )));
            }
            cells.extend(row.into_iter().map(Into::into));
        }
        Self::from_cells(dimensions, cells)
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Symbol held by the cell, if the coordinate is in bounds.
    #[must_use]
    pub fn get(&self, coord: CellCoord) -> Option<&SymbolId> {
        self.dimensions
            .index_of(coord)
            .and_then(|index| self.cells.get(index))
    }

    /// Iterator over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[SymbolId]> {
        self.cells.chunks(self.dimensions.columns() as usize)
    }

    /// Iterator over every cell with its coordinate, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, &SymbolId)> {
        let dimensions = self.dimensions;
        self.cells.iter().enumerate().filter_map(move |(index, symbol)| {
            dimensions.coord_at(index).map(|coord| (coord, symbol))
        })
    }

    /// Number of cells holding `symbol`.
    #[must_use]
    pub fn count(&self, symbol: &SymbolId) -> usize {
        self.cells.iter().filter(|cell| *cell == symbol).count()
    }

    /// Reports whether every coordinate of `area` holds `symbol`.
    #[must_use]
    pub fn covers(&self, area: &[CellCoord], symbol: &SymbolId) -> bool {
        area.iter().all(|coord| self.get(*coord) == Some(symbol))
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows())
    }
}

/// Bonus outcome reported for a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppliedBonus {
    /// A bonus symbol was on the grid of a winning round.
    Symbol(SymbolId),
    /// The round won without a bonus symbol on the grid.
    None,
    /// No standard symbol won; any bonus effect was discarded.
    Loss,
}

impl Serialize for AppliedBonus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Symbol(id) => id.serialize(serializer),
            Self::None => serializer.serialize_none(),
            Self::Loss => serializer.serialize_str(LOSS_SENTINEL),
        }
    }
}

/// Outcome of scoring a single round.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    matrix: Grid,
    reward: u64,
    applied_winning_combinations: BTreeMap<SymbolId, Vec<RuleId>>,
    applied_bonus_symbol: AppliedBonus,
}

impl RoundResult {
    /// Assembles a round result.
    #[must_use]
    pub fn new(
        matrix: Grid,
        reward: u64,
        applied_winning_combinations: BTreeMap<SymbolId, Vec<RuleId>>,
        applied_bonus_symbol: AppliedBonus,
    ) -> Self {
        Self {
            matrix,
            reward,
            applied_winning_combinations,
            applied_bonus_symbol,
        }
    }

    /// Grid the round was scored against.
    #[must_use]
    pub fn matrix(&self) -> &Grid {
        &self.matrix
    }

    /// Total payout of the round.
    #[must_use]
    pub const fn reward(&self) -> u64 {
        self.reward
    }

    /// Rule ids that matched, per standard symbol.
    #[must_use]
    pub fn applied_winning_combinations(&self) -> &BTreeMap<SymbolId, Vec<RuleId>> {
        &self.applied_winning_combinations
    }

    /// Bonus outcome of the round.
    #[must_use]
    pub fn applied_bonus_symbol(&self) -> &AppliedBonus {
        &self.applied_bonus_symbol
    }

    /// Reports whether the round was a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.applied_bonus_symbol == AppliedBonus::Loss
    }
}

/// Validated, non-negative bet.
///
/// Rewards are computed in `f64`, so parsed bets are capped at
/// [`BetAmount::MAX`], the largest integer `f64` represents exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BetAmount(u64);

impl BetAmount {
    /// Largest bet accepted by [`BetAmount::parse`] (2^53).
    pub const MAX: u64 = 1 << 53;

    /// Wraps an already validated amount.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Parses textual input, rejecting anything but a non-negative integer
    /// no greater than [`BetAmount::MAX`].
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if let Ok(value) = trimmed.parse::<u64>() {
            if value <= Self::MAX {
                return Ok(Self(value));
            }
        }

        let reason = match trimmed.parse::<i128>() {
            Ok(value) if value < 0 => "bet must not be negative",
            Ok(_) => "bet is too large",
            Err(_) => "bet must be a whole number",
        };
        Err(ScratchError::InputAmount {
            input: input.to_owned(),
            reason: reason.to_owned(),
        })
    }

    /// Retrieves the amount.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

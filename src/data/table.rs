//! Game Table Module
//! The immutable dataset every filter and aggregation reads from.

use polars::prelude::*;
use std::collections::HashSet;

/// Column holding the cultural fit quadrant of each game.
pub const QUADRANT_COL: &str = "Quadrant";
/// Column identifying the game.
pub const GAME_COL: &str = "Game";

/// Loaded dataset. Never mutated after construction; filters produce new
/// DataFrames derived from it.
#[derive(Debug, Clone)]
pub struct GameTable {
    df: DataFrame,
}

impl GameTable {
    /// Wrap a DataFrame whose `Quadrant` and `Game` columns are text and non-null.
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Column names in file order.
    pub fn columns(&self) -> Vec<String> {
        column_names(&self.df)
    }

    /// Distinct quadrants in order of first appearance.
    pub fn quadrants(&self) -> Vec<String> {
        self.df
            .column(QUADRANT_COL)
            .and_then(distinct_text)
            .unwrap_or_default()
    }

    /// Distinct games of one quadrant in order of first appearance.
    pub fn games_in(&self, quadrant: &str) -> Vec<String> {
        let (Ok(quadrants), Ok(games)) = (self.df.column(QUADRANT_COL), self.df.column(GAME_COL))
        else {
            return Vec::new();
        };
        let (Ok(quadrants), Ok(games)) = (column_text(quadrants), column_text(games)) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        quadrants
            .into_iter()
            .zip(games)
            .filter(|(q, _)| q.as_deref() == Some(quadrant))
            .filter_map(|(_, g)| g)
            .filter(|g| seen.insert(g.clone()))
            .collect()
    }

    /// Whether a column holds text, i.e. is usable as a categorical axis.
    pub fn is_categorical(&self, column: &str) -> bool {
        self.df
            .column(column)
            .map(|c| matches!(c.dtype(), DataType::String | DataType::Categorical(_, _)))
            .unwrap_or(false)
    }
}

/// Column names of a DataFrame as owned strings.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Text rendering of every cell in a column, `None` for nulls.
pub fn column_text(column: &Column) -> PolarsResult<Vec<Option<String>>> {
    let text = column.cast(&DataType::String)?;
    let series = text.as_materialized_series();
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Distinct non-null values of a column in order of first appearance.
pub fn distinct_text(column: &Column) -> PolarsResult<Vec<String>> {
    let mut seen = HashSet::new();
    Ok(column_text(column)?
        .into_iter()
        .flatten()
        .filter(|v| seen.insert(v.clone()))
        .collect())
}

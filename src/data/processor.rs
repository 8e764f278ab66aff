//! Data Processor Module
//! Quadrant/game filtering, column projection and value counting.

use crate::charts::ChartKind;
use crate::data::table::{column_names, column_text, GameTable, GAME_COL, QUADRANT_COL};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Label used for missing cells so every row is counted.
pub const MISSING_LABEL: &str = "(missing)";

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Frequency of each distinct value in a column, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCounts {
    pub column: String,
    pub entries: Vec<(String, usize)>,
}

impl ValueCounts {
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|(v, _)| v.clone()).collect()
    }

    /// Number of distinct values, not counting missing cells.
    pub fn distinct_present(&self) -> usize {
        self.entries
            .iter()
            .filter(|(v, _)| v != MISSING_LABEL)
            .count()
    }

    /// At least two distinct non-missing values.
    pub fn is_chartable(&self) -> bool {
        self.distinct_present() >= 2
    }
}

/// What the user currently has selected in the control panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub quadrant: String,
    pub games: HashSet<String>,
    /// Projected columns, in table order.
    pub columns: Vec<String>,
    pub chart_kind: ChartKind,
    /// Column charted over the full, unfiltered table.
    pub overall_column: String,
}

impl Selection {
    /// Initial selection: first quadrant, all of its games, all columns.
    pub fn initial(table: &GameTable) -> Self {
        let quadrant = table.quadrants().into_iter().next().unwrap_or_default();
        let games = table.games_in(&quadrant).into_iter().collect();
        let columns = table.columns();
        let overall_column = columns.first().cloned().unwrap_or_default();
        Self {
            quadrant,
            games,
            columns,
            chart_kind: ChartKind::default(),
            overall_column,
        }
    }
}

/// Overall distribution chart over the full dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum OverallChart {
    Distribution(ValueCounts),
    /// Column is not categorical or has a single value.
    Insufficient { column: String },
}

/// Everything rendered for one selection.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub quadrant: String,
    pub table: DataFrame,
    /// One entry per selected column with at least two distinct non-missing values.
    pub column_charts: Vec<ValueCounts>,
    pub chart_kind: ChartKind,
    pub overall: OverallChart,
}

/// Stateless filtering and aggregation over a [`GameTable`].
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose quadrant equals `quadrant`.
    pub fn filter_by_quadrant(df: &DataFrame, quadrant: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(QUADRANT_COL).eq(lit(quadrant)))
            .collect()?;
        Ok(filtered)
    }

    /// Keep rows whose game is in `games`. An empty set keeps nothing.
    pub fn filter_by_games(
        df: &DataFrame,
        games: &HashSet<String>,
    ) -> Result<DataFrame, ProcessorError> {
        let mask: BooleanChunked = column_text(df.column(GAME_COL)?)?
            .iter()
            .map(|g| Some(g.as_ref().is_some_and(|g| games.contains(g))))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// Project onto `columns` in the given order.
    pub fn select_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame, ProcessorError> {
        Ok(df.select(columns.iter().map(String::as_str))?)
    }

    /// Count each distinct value of `column`.
    ///
    /// Sorted by count descending; equal counts keep first-appearance order.
    pub fn value_counts(df: &DataFrame, column: &str) -> Result<ValueCounts, ProcessorError> {
        let mut entries: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for value in column_text(df.column(column)?)? {
            let label = value.unwrap_or_else(|| MISSING_LABEL.to_string());
            match index.get(&label) {
                Some(&i) => entries[i].1 += 1,
                None => {
                    index.insert(label.clone(), entries.len());
                    entries.push((label, 1));
                }
            }
        }

        // sort_by is stable, which preserves encounter order among ties
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(ValueCounts {
            column: column.to_string(),
            entries,
        })
    }

    /// Distribution of `column` over the full table, if it is categorical
    /// and has more than one non-missing value.
    pub fn overall_distribution(
        table: &GameTable,
        column: &str,
    ) -> Result<OverallChart, ProcessorError> {
        if !table.is_categorical(column) {
            return Ok(OverallChart::Insufficient {
                column: column.to_string(),
            });
        }
        let counts = Self::value_counts(table.dataframe(), column)?;
        if counts.is_chartable() {
            Ok(OverallChart::Distribution(counts))
        } else {
            Ok(OverallChart::Insufficient {
                column: column.to_string(),
            })
        }
    }

    /// Run the whole filter-and-aggregate pipeline for one selection.
    pub fn build_view(
        table: &GameTable,
        selection: &Selection,
    ) -> Result<DashboardView, ProcessorError> {
        let by_quadrant = Self::filter_by_quadrant(table.dataframe(), &selection.quadrant)?;
        let by_games = Self::filter_by_games(&by_quadrant, &selection.games)?;
        let projected = Self::select_columns(&by_games, &selection.columns)?;
        tracing::debug!(
            "Filtered to quadrant {:?}: shape {:?}",
            selection.quadrant,
            projected.shape()
        );

        let mut column_charts = Vec::new();
        for column in column_names(&projected) {
            let counts = Self::value_counts(&projected, &column)?;
            if counts.is_chartable() {
                column_charts.push(counts);
            } else {
                tracing::debug!("Skipping chart for {}: fewer than two values", column);
            }
        }

        let overall = Self::overall_distribution(table, &selection.overall_column)?;

        Ok(DashboardView {
            quadrant: selection.quadrant.clone(),
            table: projected,
            column_charts,
            chart_kind: selection.chart_kind,
            overall,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games_table() -> GameTable {
        GameTable::new(
            df!(
                "Quadrant" => &["A", "A", "A", "B", "B", "C"],
                "Game" => &["Foo", "Bar", "Baz", "Chess", "Go", "Pong"],
                "Genre" => &["RPG", "RPG", "Action", "Board", "Board", "Arcade"],
                "Platform" => &["PC", "PC", "PC", "Table", "Table", "Arcade"],
                "Year" => &[2001i64, 2005, 2001, 1500, 1600, 1972]
            )
            .unwrap(),
        )
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn games_of(df: &DataFrame) -> Vec<String> {
        column_text(df.column(GAME_COL).unwrap())
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    #[test]
    fn quadrant_filter_keeps_only_that_quadrant() {
        let table = games_table();
        for quadrant in table.quadrants() {
            let filtered = DataProcessor::filter_by_quadrant(table.dataframe(), &quadrant).unwrap();
            let quadrants = column_text(filtered.column(QUADRANT_COL).unwrap()).unwrap();
            assert!(!quadrants.is_empty());
            assert!(quadrants.iter().all(|q| q.as_deref() == Some(quadrant.as_str())));
        }
    }

    #[test]
    fn quadrant_filters_partition_the_table() {
        let table = games_table();
        let mut seen: Vec<String> = table
            .quadrants()
            .iter()
            .flat_map(|q| games_of(&DataProcessor::filter_by_quadrant(table.dataframe(), q).unwrap()))
            .collect();
        seen.sort();

        let mut all = games_of(table.dataframe());
        all.sort();
        assert_eq!(seen, all);
    }

    #[test]
    fn selecting_all_games_is_identity() {
        let table = games_table();
        let quadrant_a = DataProcessor::filter_by_quadrant(table.dataframe(), "A").unwrap();
        let all = table.games_in("A").into_iter().collect();

        let filtered = DataProcessor::filter_by_games(&quadrant_a, &all).unwrap();
        assert!(filtered.equals(&quadrant_a));
    }

    #[test]
    fn empty_game_set_yields_empty_table() {
        let table = games_table();
        let filtered = DataProcessor::filter_by_games(table.dataframe(), &HashSet::new()).unwrap();
        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.width(), table.dataframe().width());
    }

    #[test]
    fn game_filter_preserves_row_order() {
        let table = games_table();
        let filtered =
            DataProcessor::filter_by_games(table.dataframe(), &set(&["Go", "Foo", "Baz"])).unwrap();
        assert_eq!(games_of(&filtered), vec!["Foo", "Baz", "Go"]);
    }

    #[test]
    fn select_columns_follows_requested_order() {
        let table = games_table();
        let columns = vec!["Genre".to_string(), "Game".to_string()];
        let projected = DataProcessor::select_columns(table.dataframe(), &columns).unwrap();
        assert_eq!(column_names(&projected), columns);
        assert_eq!(projected.height(), 6);
    }

    #[test]
    fn select_unknown_column_is_an_error() {
        let table = games_table();
        let columns = vec!["Rating".to_string()];
        assert!(DataProcessor::select_columns(table.dataframe(), &columns).is_err());
    }

    #[test]
    fn value_counts_scenario() {
        let df = df!(
            "Quadrant" => &["A", "A", "A"],
            "Game" => &["Foo", "Bar", "Baz"],
            "Genre" => &["RPG", "RPG", "Action"]
        )
        .unwrap();
        let table = GameTable::new(df);
        let selection = Selection {
            quadrant: "A".to_string(),
            games: set(&["Foo", "Bar", "Baz"]),
            columns: vec!["Genre".to_string()],
            chart_kind: ChartKind::Bar,
            overall_column: "Genre".to_string(),
        };

        let view = DataProcessor::build_view(&table, &selection).unwrap();
        assert_eq!(view.column_charts.len(), 1);
        assert_eq!(
            view.column_charts[0].entries,
            vec![("RPG".to_string(), 2), ("Action".to_string(), 1)]
        );
    }

    #[test]
    fn value_counts_cover_every_row() {
        let table = games_table();
        for column in table.columns() {
            let counts = DataProcessor::value_counts(table.dataframe(), &column).unwrap();
            assert_eq!(counts.total(), table.height());
            assert!(counts.entries.iter().all(|(_, n)| *n >= 1));
        }
    }

    #[test]
    fn value_count_ties_keep_encounter_order() {
        let df = df!("Genre" => &["Puzzle", "RPG", "Action", "RPG", "Action", "Puzzle"]).unwrap();
        let counts = DataProcessor::value_counts(&df, "Genre").unwrap();
        assert_eq!(counts.labels(), vec!["Puzzle", "RPG", "Action"]);
    }

    #[test]
    fn missing_values_are_counted() {
        let df = df!("Genre" => &[Some("RPG"), None, Some("RPG")]).unwrap();
        let counts = DataProcessor::value_counts(&df, "Genre").unwrap();
        assert_eq!(
            counts.entries,
            vec![("RPG".to_string(), 2), (MISSING_LABEL.to_string(), 1)]
        );
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn missing_cells_do_not_make_a_column_chartable() {
        let table = GameTable::new(
            df!(
                "Quadrant" => &["A", "A", "A"],
                "Game" => &["Foo", "Bar", "Baz"],
                "Genre" => &[Some("RPG"), None, Some("RPG")]
            )
            .unwrap(),
        );
        let selection = Selection {
            quadrant: "A".to_string(),
            games: set(&["Foo", "Bar", "Baz"]),
            columns: vec!["Genre".to_string()],
            chart_kind: ChartKind::Bar,
            overall_column: "Genre".to_string(),
        };

        let view = DataProcessor::build_view(&table, &selection).unwrap();
        assert!(view.column_charts.is_empty());
        assert_eq!(column_names(&view.table), vec!["Genre"]);
        assert_eq!(
            view.overall,
            OverallChart::Insufficient {
                column: "Genre".to_string()
            }
        );
    }

    #[test]
    fn missing_cells_stay_in_chartable_counts() {
        let df = df!("Genre" => &[Some("RPG"), None, Some("Action")]).unwrap();
        let counts = DataProcessor::value_counts(&df, "Genre").unwrap();
        assert!(counts.is_chartable());
        assert_eq!(counts.distinct(), 3);
        assert_eq!(counts.distinct_present(), 2);
    }

    #[test]
    fn single_valued_column_is_table_only() {
        let table = games_table();
        let selection = Selection {
            quadrant: "A".to_string(),
            games: set(&["Foo", "Bar", "Baz"]),
            columns: vec!["Game".to_string(), "Platform".to_string(), "Genre".to_string()],
            chart_kind: ChartKind::Pie,
            overall_column: "Genre".to_string(),
        };

        let view = DataProcessor::build_view(&table, &selection).unwrap();
        assert_eq!(column_names(&view.table), vec!["Game", "Platform", "Genre"]);
        let charted: Vec<&str> = view.column_charts.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(charted, vec!["Game", "Genre"]);
    }

    #[test]
    fn overall_chart_ignores_the_filters() {
        let table = games_table();
        let mut selection = Selection::initial(&table);
        selection.games = set(&["Foo"]);
        selection.overall_column = "Genre".to_string();

        let view = DataProcessor::build_view(&table, &selection).unwrap();
        match view.overall {
            OverallChart::Distribution(counts) => assert_eq!(counts.total(), table.height()),
            other => panic!("expected distribution, got {:?}", other),
        }
    }

    #[test]
    fn overall_chart_needs_categorical_data() {
        let table = games_table();
        assert_eq!(
            DataProcessor::overall_distribution(&table, "Year").unwrap(),
            OverallChart::Insufficient {
                column: "Year".to_string()
            }
        );

        let single = GameTable::new(
            df!("Quadrant" => &["A", "A"], "Game" => &["Foo", "Bar"], "Tag" => &["x", "x"]).unwrap(),
        );
        assert_eq!(
            DataProcessor::overall_distribution(&single, "Tag").unwrap(),
            OverallChart::Insufficient {
                column: "Tag".to_string()
            }
        );
    }

    #[test]
    fn initial_selection_covers_first_quadrant() {
        let table = games_table();
        let selection = Selection::initial(&table);
        assert_eq!(selection.quadrant, "A");
        assert_eq!(selection.games, set(&["Foo", "Bar", "Baz"]));
        assert_eq!(selection.columns, table.columns());
        assert_eq!(selection.overall_column, "Quadrant");
    }

    #[test]
    fn rebuilding_a_view_is_deterministic() {
        let table = games_table();
        let selection = Selection::initial(&table);

        let first = DataProcessor::build_view(&table, &selection).unwrap();
        let second = DataProcessor::build_view(&table, &selection).unwrap();
        assert!(first.table.equals_missing(&second.table));
        assert_eq!(first.column_charts, second.column_charts);
        assert_eq!(first.overall, second.overall);
    }
}

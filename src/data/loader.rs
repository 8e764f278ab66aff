//! CSV Data Loader Module
//! Reads the game dataset with Polars and checks the columns it must carry.

use crate::data::table::{GameTable, GAME_COL, QUADRANT_COL};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("The file '{}' was not found.", .0.display())]
    SourceFileMissing(PathBuf),
    #[error("The dataset has no '{0}' column.")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Loads the dataset once at startup.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file into a [`GameTable`].
    ///
    /// `Quadrant` and `Game` are read as text; rows missing either are dropped.
    pub fn load_csv(path: &Path) -> Result<GameTable, LoaderError> {
        if !path.exists() {
            tracing::error!("Data file not found: {}", path.display());
            return Err(LoaderError::SourceFileMissing(path.to_path_buf()));
        }

        tracing::debug!("Reading CSV from {}", path.display());
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        for required in [QUADRANT_COL, GAME_COL] {
            if df.column(required).is_err() {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let raw_rows = df.height();
        let df = df
            .lazy()
            .with_columns([
                col(QUADRANT_COL).cast(DataType::String),
                col(GAME_COL).cast(DataType::String),
            ])
            .filter(col(QUADRANT_COL).is_not_null().and(col(GAME_COL).is_not_null()))
            .collect()?;

        if df.height() < raw_rows {
            tracing::warn!(
                "Dropped {} rows without a Quadrant or Game",
                raw_rows - df.height()
            );
        }
        tracing::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(GameTable::new(df))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game_type.csv");

        match DataLoader::load_csv(&path) {
            Err(LoaderError::SourceFileMissing(p)) => assert_eq!(p, path),
            other => panic!("expected SourceFileMissing, got {:?}", other.map(|t| t.height())),
        }
    }

    #[test]
    fn missing_file_message_names_the_file() {
        let err = LoaderError::SourceFileMissing(PathBuf::from("game_type.csv"));
        assert_eq!(err.to_string(), "The file 'game_type.csv' was not found.");
    }

    #[test]
    fn loads_header_columns_in_order() {
        let file = write_csv("Quadrant,Game,Genre\nA,Foo,RPG\nA,Bar,RPG\nB,Baz,Action\n");
        let table = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(table.columns(), vec!["Quadrant", "Game", "Genre"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.quadrants(), vec!["A", "B"]);
    }

    #[test]
    fn numeric_quadrants_are_read_as_text() {
        let file = write_csv("Quadrant,Game\n1,Foo\n2,Bar\n1,Baz\n");
        let table = DataLoader::load_csv(file.path()).unwrap();

        assert!(table.is_categorical(QUADRANT_COL));
        assert_eq!(table.games_in("1"), vec!["Foo", "Baz"]);
    }

    #[test]
    fn rows_without_game_are_dropped() {
        let file = write_csv("Quadrant,Game,Genre\nA,Foo,RPG\nA,,RPG\n,Bar,Action\n");
        let table = DataLoader::load_csv(file.path()).unwrap();

        assert_eq!(table.height(), 1);
        assert_eq!(table.games_in("A"), vec!["Foo"]);
    }

    #[test]
    fn required_column_must_exist() {
        let file = write_csv("Quadrant,Title\nA,Foo\n");

        assert!(matches!(
            DataLoader::load_csv(file.path()),
            Err(LoaderError::MissingColumn(c)) if c == "Game"
        ));
    }
}

//! Command execution implementations

use super::Commands;
use super::{combine, convert, inspect, preface};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
                book,
                dialect,
                translations,
                config,
                quiet,
            } => convert::execute(
                source,
                destination.as_deref(),
                book.as_deref(),
                *dialect,
                translations.as_deref(),
                config.as_deref(),
                *quiet,
            ),
            Commands::Batch {
                sources,
                destination,
                translations,
                config,
            } => convert::batch(
                sources,
                destination,
                translations.as_deref(),
                config.as_deref(),
            ),
            Commands::Inspect {
                source,
                dialect,
                json,
                config,
            } => inspect::execute(source, *dialect, *json, config.as_deref()),
            Commands::Preface {
                destination,
                date,
                config,
            } => preface::execute(destination, date.as_deref(), config.as_deref()),
            Commands::Combine {
                sources,
                destination,
                preface,
                date,
                translations,
                config,
                quiet,
            } => combine::execute(
                sources,
                destination,
                *preface,
                date.as_deref(),
                translations.as_deref(),
                config.as_deref(),
                *quiet,
            ),
        }
    }
}

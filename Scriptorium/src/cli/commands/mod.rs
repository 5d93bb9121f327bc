use clap::Subcommand;
use std::path::PathBuf;

use crate::formats::Dialect;

pub mod combine;
pub mod convert;
pub mod execute;
pub mod inspect;
pub mod preface;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one source book to annotated USFX
    Convert {
        /// Source OSIS or SBLGNT file
        #[arg(short, long)]
        source: PathBuf,

        /// Output file (defaults to output/<ID>.usfx.xml)
        #[arg(short, long)]
        destination: Option<PathBuf>,

        /// Book code, abbreviation or title (inferred from the source if omitted)
        #[arg(short, long)]
        book: Option<String>,

        /// Source dialect: osis/hebrew, sblgnt/greek (detected if omitted)
        #[arg(long)]
        dialect: Option<Dialect>,

        /// JSON object mapping verse ids to translations
        #[arg(short, long)]
        translations: Option<PathBuf>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert several source books in parallel into a directory
    Batch {
        /// Source OSIS or SBLGNT files
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        destination: PathBuf,

        /// JSON object mapping verse ids to translations
        #[arg(short, long)]
        translations: Option<PathBuf>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Parse a source file and print its structure
    Inspect {
        /// Source OSIS or SBLGNT file
        source: PathBuf,

        /// Source dialect (detected if omitted)
        #[arg(long)]
        dialect: Option<Dialect>,

        /// Print the parsed book as JSON
        #[arg(long)]
        json: bool,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the front-matter preface document
    Preface {
        /// Output file
        #[arg(short, long)]
        destination: PathBuf,

        /// Generation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert several books into a single USFX document
    Combine {
        /// Source OSIS or SBLGNT files
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        destination: PathBuf,

        /// Include the preface, dated today unless --date is given
        #[arg(long)]
        preface: bool,

        /// Preface date (YYYY-MM-DD)
        #[arg(long, requires = "preface")]
        date: Option<String>,

        /// JSON object mapping verse ids to translations
        #[arg(short, long)]
        translations: Option<PathBuf>,

        /// Pipeline configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}

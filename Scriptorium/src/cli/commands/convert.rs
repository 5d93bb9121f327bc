//! CLI commands for book conversion

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use indicatif::ProgressBar;

use crate::annotate::{Annotator, TranslationTable};
use crate::cli::progress::{ConversionDisplay, bar_style, print_done};
use crate::config::PipelineConfig;
use crate::formats::Dialect;
use crate::pipeline::{
    BookMetadata, ConvertRequest, batch_convert, convert_book, output_filename, save_output,
};

/// Default output directory when no destination is given
const OUTPUT_DIR: &str = "output";

/// Load the configuration file, or the defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> anyhow::Result<PipelineConfig> {
    Ok(match path {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    })
}

/// Annotator for the CLI: a translation table, empty if no file is given
/// (every verse then gets the pending placeholder).
pub(crate) fn load_annotator(
    translations: Option<&Path>,
    config: &PipelineConfig,
) -> anyhow::Result<Arc<dyn Annotator>> {
    let table = match translations {
        Some(path) => TranslationTable::load(path, config.lexicon.clone())?,
        None => {
            tracing::warn!("No translations given; all verses will be marked pending");
            TranslationTable::new(IndexMap::new(), config.lexicon.clone())
        }
    };
    Ok(Arc::new(table))
}

pub(crate) fn build_request(
    source: &Path,
    book: Option<&str>,
    dialect: Option<Dialect>,
) -> anyhow::Result<ConvertRequest> {
    let mut request = ConvertRequest::new(source);
    if let Some(code) = book {
        request = request.with_metadata(BookMetadata::from_code(code)?);
    }
    if let Some(dialect) = dialect {
        request = request.with_dialect(dialect);
    }
    Ok(request)
}

/// Convert a single book
pub fn execute(
    source: &Path,
    destination: Option<&Path>,
    book: Option<&str>,
    dialect: Option<Dialect>,
    translations: Option<&Path>,
    config: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = load_config(config)?;
    let annotator = load_annotator(translations, &config)?;
    let request = build_request(source, book, dialect)?;

    let display = ConversionDisplay::new(quiet);
    let conversion = convert_book(&request, &annotator, &config, |p| display.update(p))?;

    let written = match destination {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &conversion.usfx)?;
            path.to_path_buf()
        }
        None => save_output(
            &conversion.usfx,
            Path::new(OUTPUT_DIR),
            &output_filename(&conversion.book.id),
        )?,
    };

    if !quiet {
        println!(
            "{} ({}): {} verses, {} pending -> {}",
            conversion.book.title,
            conversion.dialect,
            conversion.summary.total(),
            conversion.summary.pending,
            written.display()
        );
        print_done(started.elapsed());
    }

    Ok(())
}

/// Convert several books in parallel into a directory
pub fn batch(
    sources: &[PathBuf],
    destination: &Path,
    translations: Option<&Path>,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = load_config(config)?;
    let annotator = load_annotator(translations, &config)?;
    let requests: Vec<_> = sources.iter().map(ConvertRequest::new).collect();

    let pb = ProgressBar::new(requests.len() as u64);
    pb.set_style(bar_style());
    pb.set_message("Converting");

    let result = batch_convert(&requests, destination, &annotator, &config, |progress| {
        pb.set_position(progress.current as u64);
        if let Some(item) = &progress.current_item {
            pb.set_message(item.clone());
        }
    });
    pb.finish_and_clear();

    for line in &result.results {
        println!("{line}");
    }
    println!(
        "\nConverted {} books, {} failed",
        result.success_count, result.fail_count
    );
    print_done(started.elapsed());

    if result.fail_count > 0 {
        anyhow::bail!("{} of {} books failed", result.fail_count, requests.len());
    }
    Ok(())
}

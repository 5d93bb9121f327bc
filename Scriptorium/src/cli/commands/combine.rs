//! CLI command for combining several books into one USFX document

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::convert::{build_request, load_annotator, load_config};
use super::preface::resolve_date;
use crate::cli::progress::{BOOKS, ConversionDisplay, print_done, print_step};
use crate::formats::{UsfxOptions, serialize_collection};
use crate::pipeline::convert_book;

pub fn execute(
    sources: &[PathBuf],
    destination: &Path,
    preface: bool,
    date: Option<&str>,
    translations: Option<&Path>,
    config: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = load_config(config)?;
    let annotator = load_annotator(translations, &config)?;
    let preface_date = if preface { Some(resolve_date(date)?) } else { None };

    let mut books = Vec::with_capacity(sources.len());
    for (i, source) in sources.iter().enumerate() {
        if !quiet {
            print_step(
                i + 1,
                sources.len(),
                BOOKS,
                &source.display().to_string(),
            );
        }
        let request = build_request(source, None, None)?;
        let display = ConversionDisplay::new(quiet);
        let conversion = convert_book(&request, &annotator, &config, |p| display.update(p))?;
        books.push(conversion.book);
    }

    books.sort_by_key(|b| b.book_number);
    let xml = serialize_collection(&books, preface_date, &UsfxOptions::from_config(&config))?;
    std::fs::write(destination, xml)?;

    if !quiet {
        let ids: Vec<_> = books.iter().map(|b| b.id.as_str()).collect();
        println!(
            "Combined {} into {}",
            ids.join(", "),
            destination.display()
        );
        print_done(started.elapsed());
    }
    Ok(())
}

//! CLI command for inspecting a parsed source file

use std::path::Path;

use super::convert::load_config;
use crate::canon;
use crate::formats::{Dialect, read_source};

pub fn execute(
    source: &Path,
    dialect: Option<Dialect>,
    json: bool,
    config: Option<&Path>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let (dialect, mut book) = read_source(source, dialect, config.parsing.policy)?;

    let source_title = book.title.clone();
    if let Some(canon) = canon::infer(&book) {
        canon.apply_to(&mut book);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&book)?);
        return Ok(());
    }

    println!("Source: {}", source.display());
    println!("Dialect: {dialect}");
    if book.book_number > 0 {
        println!("Book: {} {} (#{})", book.id, book.title, book.book_number);
    } else {
        println!("Book: unidentified");
    }
    if !source_title.is_empty() {
        println!("Source title: {source_title}");
    }
    println!("Testament: {}", book.testament);
    println!();

    let words: usize = book.verses().map(|v| v.words.len()).sum();
    let tagged = book
        .verses()
        .flat_map(|v| v.words.iter())
        .filter(|w| w.strongs_number.is_some())
        .count();
    println!("Chapters: {}", book.chapters.len());
    println!("Verses: {}", book.verse_count());
    println!("Words: {words} ({tagged} with Strong's numbers)");
    println!();

    for chapter in &book.chapters {
        let first = chapter.verses.first().map_or("-", |v| v.verse_id.as_str());
        let last = chapter.verses.last().map_or("-", |v| v.verse_id.as_str());
        println!(
            "  Chapter {:>3}: {:>3} verses  ({first} .. {last})",
            chapter.chapter_number,
            chapter.verses.len()
        );
    }

    Ok(())
}

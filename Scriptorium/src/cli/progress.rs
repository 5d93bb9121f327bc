//! CLI progress display utilities
//!
//! Numbered step lines for each conversion phase and a verse bar while
//! annotation runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::pipeline::{ConvertPhase, ConvertProgress};

// Step glyphs; terminals without emoji support get nothing.
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static QUILL: Emoji<'_, '_> = Emoji("✒️  ", "");
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Prefix of each per-book line printed by `combine`.
pub static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// One line of a conversion: parse, annotate, write, or a book of a collection.
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Summary line after `convert` or `combine` finishes.
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Bar shared by verse annotation and batch conversion.
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

#[must_use]
pub fn simple_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(bar_style());
    pb.set_message(msg.to_string());
    pb
}

/// Step-and-bar display for a single book conversion.
///
/// Prints a step line when a phase starts and drives a bar while verses
/// are annotated. Silent when `quiet` is set.
pub struct ConversionDisplay {
    bar: ProgressBar,
    annotating: AtomicBool,
    quiet: bool,
}

impl ConversionDisplay {
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            simple_bar(0, "Annotating")
        };
        Self {
            bar,
            annotating: AtomicBool::new(false),
            quiet,
        }
    }

    /// Progress callback for [`crate::pipeline::convert_book`].
    pub fn update(&self, progress: &ConvertProgress) {
        match progress.phase {
            ConvertPhase::Parsing => self.step(1, LOOKING_GLASS, progress),
            ConvertPhase::Annotating => {
                // callbacks arrive from several worker threads
                if !self.annotating.swap(true, Ordering::SeqCst) {
                    if !self.quiet {
                        print_step(2, 3, QUILL, "Annotating verses...");
                    }
                    self.bar.set_length(progress.total as u64);
                }
                self.bar.inc(1);
            }
            ConvertPhase::Writing => {
                self.bar.finish_and_clear();
                self.step(3, DISK, progress);
            }
            ConvertPhase::Complete => self.bar.finish_and_clear(),
        }
    }

    fn step(&self, n: usize, emoji: Emoji, progress: &ConvertProgress) {
        if self.quiet {
            return;
        }
        let msg = match &progress.current_item {
            Some(item) => format!("{} {item}...", progress.phase.as_str()),
            None => format!("{}...", progress.phase.as_str()),
        };
        print_step(n, 3, emoji, &msg);
    }
}

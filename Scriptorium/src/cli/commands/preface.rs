//! CLI command for the front-matter preface

use std::path::Path;

use chrono::NaiveDate;

use super::convert::load_config;
use crate::formats::{UsfxOptions, serialize_preface};

/// Parse a `YYYY-MM-DD` date, or today's local date when none is given.
pub(crate) fn resolve_date(date: Option<&str>) -> anyhow::Result<NaiveDate> {
    match date {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date '{text}' (expected YYYY-MM-DD): {e}")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn execute(destination: &Path, date: Option<&str>, config: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let date = resolve_date(date)?;

    let xml = serialize_preface(date, &UsfxOptions::from_config(&config))?;
    std::fs::write(destination, xml)?;

    println!("Wrote preface ({date}) to {}", destination.display());
    Ok(())
}

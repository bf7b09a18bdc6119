//! Result rendering.
//!
//! Items are sorted here, not in the collectors, so every strategy prints
//! the same bytes for the same set.

use std::io::{self, Write};

use anyhow::Result;
use colored::Colorize;

use super::OutputFormat;
use crate::config::CONFIG_FILE_NAME;
use crate::core::{Collection, ImageRef};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the collection to stdout.
pub fn print(collection: &Collection, format: OutputFormat, parsed: bool) -> Result<()> {
    print_to(collection, format, parsed, &mut io::stdout().lock())
}

/// Print the collection to a custom writer, sorted.
pub fn print_to<W: Write>(
    collection: &Collection,
    format: OutputFormat,
    parsed: bool,
    writer: &mut W,
) -> Result<()> {
    let mut items: Vec<&str> = collection.items.iter().map(String::as_str).collect();
    items.sort_unstable();

    match (format, parsed) {
        (OutputFormat::Json, false) => {
            writeln!(writer, "{}", serde_json::to_string(&items)?)?;
        }
        (OutputFormat::Json, true) => {
            let images: Vec<ImageRef> = items.iter().map(|item| ImageRef::parse(item)).collect();
            writeln!(writer, "{}", serde_json::to_string(&images)?)?;
        }
        (OutputFormat::Raw, false) => {
            for item in items {
                writeln!(writer, "{}", item)?;
            }
        }
        (OutputFormat::Raw, true) => {
            for item in items {
                let image = ImageRef::parse(item);
                writeln!(writer, "{}\t{}", image.repository, image.tag)?;
            }
        }
    }
    Ok(())
}

/// Warn on stderr when the enumeration did not reach the end.
pub fn print_partial_warning(collection: &Collection) {
    print_partial_warning_to(collection, &mut io::stderr().lock());
}

pub fn print_partial_warning_to<W: Write>(collection: &Collection, writer: &mut W) {
    if let Some(reason) = collection.stop_reason() {
        let _ = writeln!(
            writer,
            "{} listing stopped early ({}); {}",
            "warning:".bold().yellow(),
            reason,
            "the image list may be incomplete".yellow()
        );
    }
}

pub fn print_init_success() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}

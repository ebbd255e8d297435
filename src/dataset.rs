//! The dataset module moves stories between CSV files and the database.

use anyhow::{Context, Result};
use chrono::Utc;
use csv::StringRecord;
use log::{debug, info};
use serde::Serialize;

use crate::cleanup::{
    dedup_by_key, is_analysis_row, normalize_country, normalize_title_ending, remove_non_ascii,
};
use crate::constants::{FETCH_BATCH_SIZE, MIN_ANALYSIS_STORY_CHARS};
use crate::storage::{Storage, StoryFilter};

const COUNTRY_HEADERS: &[&str] = &["country"];
const STORY_HEADERS: &[&str] = &["story", "narrative"];

/// Import settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImportOptions {
    /// Keep non-ASCII characters instead of stripping them
    pub keep_non_ascii: bool,
}

/// Outcome of an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub read: usize,
    pub empty: usize,
    pub duplicates: usize,
    pub inserted: usize,
}

/// Export settings.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExportOptions {
    /// Only rows with a country and a story long enough for analysis
    pub analysis: bool,
    /// End every title with `...`
    pub ellipsis: bool,
}

/// A CSV row as exported.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportRecord<'a> {
    country: &'a str,
    story: &'a str,
    themes: String,
    title: String,
    headline: &'a str,
}

/// Positions of the imported columns in the CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    country: usize,
    story: usize,
}

impl Columns {
    /// Locates columns by header name, else uses the first two columns.
    fn locate(headers: &StringRecord) -> Self {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
        };

        Self {
            country: find(COUNTRY_HEADERS).unwrap_or(0),
            story: find(STORY_HEADERS).unwrap_or(1),
        }
    }
}

/// A cleaned row ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportRow {
    country: String,
    story: String,
}

/// Imports a CSV dataset into the database.
///
/// Rows are cleaned (non-ASCII stripped unless kept, country normalized), rows
/// with an empty story are dropped and repeated stories keep their first
/// occurrence. Stories already in the database are counted as duplicates.
/// All rows are stored in one transaction.
///
/// # Errors
///
/// Returns an error if the CSV cannot be read or database operations fail
pub fn import_dataset(
    csv_path: &str,
    db_path: &str,
    options: ImportOptions,
) -> Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open dataset {csv_path}"))?;
    let columns = Columns::locate(reader.headers()?);
    debug!("Dataset columns: {columns:?}");

    let mut report = ImportReport::default();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed row in {csv_path}"))?;
        report.read += 1;

        let row = clean_row(&record, columns, options);
        if row.story.is_empty() {
            report.empty += 1;
        } else {
            rows.push(row);
        }
    }
    report.duplicates = dedup_by_key(&mut rows, |row| row.story.clone());

    let storage = Storage::new(db_path)?;
    let pairs: Vec<(Option<&str>, &str)> = rows
        .iter()
        .map(|row| {
            let country = Some(row.country.as_str()).filter(|c| !c.is_empty());
            (country, row.story.as_str())
        })
        .collect();
    report.inserted = storage.insert_stories(&pairs, Utc::now())?;
    report.duplicates += pairs.len() - report.inserted;

    info!(
        "Imported {} of {} rows from {csv_path} ({} empty, {} duplicates)",
        report.inserted, report.read, report.empty, report.duplicates
    );

    Ok(report)
}

fn clean_row(record: &StringRecord, columns: Columns, options: ImportOptions) -> ImportRow {
    let field = |index: usize| {
        let value = record.get(index).unwrap_or_default();
        if options.keep_non_ascii {
            value.to_string()
        } else {
            remove_non_ascii(value)
        }
    };

    ImportRow {
        country: normalize_country(&field(columns.country)),
        story: field(columns.story).trim().to_string(),
    }
}

/// Exports the stories from the database to a CSV file with the columns
/// `Country,Story,Themes,Title,Headline`. Returns the number of rows written.
///
/// # Errors
///
/// Returns an error if the file cannot be written or database operations fail
pub fn export_dataset(db_path: &str, csv_path: &str, options: ExportOptions) -> Result<usize> {
    let storage = Storage::new(db_path)?;
    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("Failed to create {csv_path}"))?;

    let mut written = 0;
    let mut last_id = 0;
    loop {
        let batch = storage.fetch_stories(StoryFilter::All, last_id, FETCH_BATCH_SIZE)?;
        let Some(last) = batch.last() else {
            break;
        };
        last_id = last.id;

        for story in &batch {
            if options.analysis
                && !is_analysis_row(
                    story.country.as_deref(),
                    &story.story,
                    MIN_ANALYSIS_STORY_CHARS,
                )
            {
                continue;
            }

            let title = story.title.as_deref().unwrap_or_default();
            let title = if options.ellipsis && !title.is_empty() {
                normalize_title_ending(title)
            } else {
                title.to_string()
            };

            writer.serialize(ExportRecord {
                country: story.country.as_deref().unwrap_or_default(),
                story: &story.story,
                themes: story.themes.join(", "),
                title,
                headline: story.headline.as_deref().unwrap_or_default(),
            })?;
            written += 1;
        }
    }
    writer.flush()?;

    info!("Exported {written} stories to {csv_path}");

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_by_header() {
        let headers = StringRecord::from(vec!["Id", "Narrative", " Country "]);

        assert_eq!(
            Columns::locate(&headers),
            Columns {
                country: 2,
                story: 1
            }
        );
    }

    #[test]
    fn test_columns_fallback_to_position() {
        let headers = StringRecord::from(vec!["Where", "What"]);

        assert_eq!(
            Columns::locate(&headers),
            Columns {
                country: 0,
                story: 1
            }
        );
    }

    #[test]
    fn test_clean_row() {
        let record = StringRecord::from(vec!["US", "  I was told “no”.  "]);
        let columns = Columns {
            country: 0,
            story: 1,
        };

        let row = clean_row(&record, columns, ImportOptions::default());
        assert_eq!(row.country, "United States");
        assert_eq!(row.story, "I was told no.");

        let row = clean_row(&record, columns, ImportOptions { keep_non_ascii: true });
        assert_eq!(row.story, "I was told “no”.");
    }
}

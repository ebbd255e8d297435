//! The title stage runs the extractor over stored stories and writes each
//! title back, one row at a time.

use anyhow::Result;
use log::{debug, info, warn};

use super::TitleExtractor;
use crate::TitleTarget;
use crate::constants::{FALLBACK_TITLE, FETCH_BATCH_SIZE};
use crate::storage::{Storage, Story, StoryFilter};

/// Outcome of a title run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TitleReport {
    /// Rows that received a title, fallback included
    pub processed: u32,
    /// Rows whose extraction failed and got the fallback title with a diagnostic
    pub failed: u32,
}

/// Extracts titles for the stories in the database selected by `target`.
///
/// A row whose extraction fails is stored with the fallback title and the
/// failure message in its `diagnostic` column; the run continues.
///
/// # Errors
///
/// Returns an error if database operations fail
pub fn assign_titles(
    db_path: &str,
    extractor: &TitleExtractor,
    target: TitleTarget,
) -> Result<TitleReport> {
    let storage = Storage::new(db_path)?;

    let report = match &target {
        TitleTarget::Untitled => {
            info!("Extracting titles for untitled stories in {db_path}...");
            title_stories(&storage, extractor, StoryFilter::Untitled)?
        }
        TitleTarget::All => {
            info!("Extracting titles for ALL stories in {db_path}...");
            title_stories(&storage, extractor, StoryFilter::All)?
        }
        TitleTarget::Story { id } => {
            info!("Extracting title for story {id} in {db_path}...");
            match storage.get_story(*id)? {
                Some(story) => {
                    let mut report = TitleReport::default();
                    title_story(&storage, extractor, &story, &mut report)?;
                    report
                }
                None => TitleReport::default(),
            }
        }
    };

    if report.processed == 0 {
        match &target {
            TitleTarget::Untitled => info!("No stories to title. All stories already have titles."),
            TitleTarget::All => info!("No stories in the database."),
            TitleTarget::Story { id } => info!("Story {id} not found in the database."),
        }
    } else {
        info!(
            "Titled {} stories ({} with diagnostics)",
            report.processed, report.failed
        );
    }

    Ok(report)
}

/// Titles every story matching `filter`, in batches.
///
/// # Errors
///
/// Returns an error if database operations fail
pub fn title_stories(
    storage: &Storage,
    extractor: &TitleExtractor,
    filter: StoryFilter,
) -> Result<TitleReport> {
    let mut report = TitleReport::default();
    let mut last_id = 0;

    loop {
        let batch = storage.fetch_stories(filter, last_id, FETCH_BATCH_SIZE)?;
        let Some(last) = batch.last() else {
            break;
        };
        last_id = last.id;

        for story in &batch {
            title_story(storage, extractor, story, &mut report)?;
        }
    }

    Ok(report)
}

fn title_story(
    storage: &Storage,
    extractor: &TitleExtractor,
    story: &Story,
    report: &mut TitleReport,
) -> Result<()> {
    match extractor.extract(&story.story) {
        Ok(title) => {
            storage.update_title(story.id, &title, None)?;
            debug!("Titled story {}: {title}", story.id);
        }
        Err(err) => {
            warn!("Title extraction failed for story {}: {err}", story.id);
            storage.update_title(story.id, FALLBACK_TITLE, Some(&err.to_string()))?;
            report.failed += 1;
        }
    }
    report.processed += 1;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Capabilities;
    use crate::title::TitleConfig;
    use crate::vocabulary::Vocabulary;
    use chrono::Utc;

    fn storage_with(stories: &[&str]) -> Storage {
        let storage = Storage::new(":memory:").expect("in-memory database");
        for story in stories {
            storage.insert_story(None, story, Utc::now()).expect("insert");
        }
        storage
    }

    #[test]
    fn test_untitled_rows_get_titles() {
        let storage = storage_with(&["I refused to stay silent. My boss ignored me.", ""]);
        let extractor = TitleExtractor::with_defaults().expect("defaults");

        let report = title_stories(&storage, &extractor, StoryFilter::Untitled).expect("run");

        assert_eq!(report, TitleReport { processed: 2, failed: 0 });
        let empty = storage
            .fetch_stories(StoryFilter::All, 0, 10)
            .expect("fetch")
            .into_iter()
            .find(|s| s.story.is_empty())
            .expect("empty story");
        assert_eq!(empty.title.as_deref(), Some(FALLBACK_TITLE));

        let again = title_stories(&storage, &extractor, StoryFilter::Untitled).expect("run");
        assert_eq!(again.processed, 0);
    }

    #[test]
    fn test_missing_syntax_is_isolated_per_row() {
        let storage = storage_with(&[
            "My boss ignored every complaint I made.",
            "Teachers never listened to the girls in class.",
        ]);
        let extractor = TitleExtractor::new(
            &Vocabulary::default(),
            TitleConfig::default(),
            Capabilities::builtin().without_syntax("lexicon missing"),
        )
        .expect("valid vocabulary");

        let report = title_stories(&storage, &extractor, StoryFilter::All).expect("run");

        assert_eq!(report, TitleReport { processed: 2, failed: 2 });
        for story in storage.fetch_stories(StoryFilter::All, 0, 10).expect("fetch") {
            assert_eq!(story.title.as_deref(), Some(FALLBACK_TITLE));
            assert!(
                story
                    .diagnostic
                    .is_some_and(|d| d.contains("lexicon missing"))
            );
        }
    }
}

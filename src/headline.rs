//! The headline module asks an LLM for a short first-person sentence per story
//! and stores it in the database.

use anyhow::Result;
use llm::builder::LLMBuilder;
use log::{debug, info, warn};

use crate::constants::{DEFAULT_HEADLINE_PROMPT_TEMPLATE, FETCH_BATCH_SIZE};
use crate::llm_client::{LlmContext, ask, build_rate_limiter};
use crate::storage::{Storage, StoryFilter};

/// Outcome of a headline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeadlineReport {
    pub generated: u32,
    pub failed: u32,
}

/// Generates headlines for every story without one.
///
/// # Errors
///
/// Returns an error if:
/// * The LLM model fails to build
/// * Database operations fail
pub async fn generate_headlines(
    db_path: &str,
    llm_builder: LLMBuilder,
    prompt_template: Option<&str>,
    rpm: Option<u32>,
) -> Result<HeadlineReport> {
    let model = llm_builder
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))?;
    let rate_limiter = build_rate_limiter(rpm);
    let storage = Storage::new(db_path)?;

    let ctx = LlmContext {
        model: model.as_ref(),
        prompt_template,
        rate_limiter: rate_limiter.as_ref(),
    };

    info!("Generating headlines for stories in {db_path} that have none yet...");
    let report = headline_stories(&ctx, &storage).await?;

    if report.generated == 0 && report.failed == 0 {
        info!("No stories need a headline.");
    } else {
        info!(
            "Generated {} headlines, {} failed",
            report.generated, report.failed
        );
    }

    Ok(report)
}

/// Generates headlines for stored stories that have none. A failed request is
/// logged and leaves the story without a headline.
///
/// # Errors
///
/// Returns an error if database operations fail
pub async fn headline_stories(ctx: &LlmContext<'_>, storage: &Storage) -> Result<HeadlineReport> {
    let mut report = HeadlineReport::default();
    let mut last_id = 0;

    loop {
        let batch = storage.fetch_stories(StoryFilter::MissingHeadline, last_id, FETCH_BATCH_SIZE)?;
        let Some(last) = batch.last() else {
            break;
        };
        last_id = last.id;

        for story in &batch {
            match generate_headline(&story.story, ctx).await {
                Ok(headline) if !headline.is_empty() => {
                    storage.update_headline(story.id, &headline)?;
                    report.generated += 1;
                    debug!("Headline for story {}: {headline}", story.id);
                }
                Ok(_) => {
                    warn!("Empty headline for story {}", story.id);
                    report.failed += 1;
                }
                Err(err) => {
                    warn!("Headline generation failed for story {}: {err:#}", story.id);
                    report.failed += 1;
                }
            }
        }
    }

    Ok(report)
}

/// Asks the model for a headline and keeps the first non-empty line of the answer.
///
/// # Errors
///
/// Returns an error if the LLM request fails
pub async fn generate_headline(text: &str, ctx: &LlmContext<'_>) -> Result<String> {
    let answer = ask(ctx, DEFAULT_HEADLINE_PROMPT_TEMPLATE, text).await?;

    Ok(answer
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .trim_matches('"')
        .to_string())
}

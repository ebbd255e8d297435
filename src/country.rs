//! Country detection for stories imported without one.
//!
//! Configured synonyms are tried first, then every country name, each as a
//! whole word in the lowercased story. When nothing matches and a model is
//! configured, the model is asked instead.

use anyhow::Result;
use llm::builder::LLMBuilder;
use log::{debug, info, warn};
use regex::Regex;

use crate::constants::{COUNTRY_PROMPT_TEMPLATE, FETCH_BATCH_SIZE};
use crate::llm_client::{LlmContext, ask, build_rate_limiter};
use crate::storage::{Storage, StoryFilter};
use crate::vocabulary::Vocabulary;

/// Answer the model gives when the story holds no clue.
const UNKNOWN_ANSWER: &str = "unknown";

/// Outcome of a country run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountryReport {
    /// Countries found in the story text
    pub matched: u32,
    /// Countries answered by the model
    pub inferred: u32,
    /// Stories left without a country
    pub unresolved: u32,
}

/// Matches country names and their synonyms against story text.
#[derive(Debug, Clone)]
pub struct CountryDetector {
    /// Pattern and canonical country, synonyms first, in configuration order.
    patterns: Vec<(Regex, String)>,
}

impl CountryDetector {
    /// Compiles the synonyms and country names of `vocabulary`.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry produces an invalid pattern
    pub fn new(vocabulary: &Vocabulary) -> Result<Self, regex::Error> {
        let synonyms = vocabulary
            .country_synonyms
            .iter()
            .map(|synonym| (synonym.alias.as_str(), synonym.country.as_str()));
        let countries = vocabulary
            .countries
            .iter()
            .map(|country| (country.as_str(), country.as_str()));

        let patterns = synonyms
            .chain(countries)
            .filter(|(alias, _)| !alias.trim().is_empty())
            .map(|(alias, country)| {
                let pattern = format!(r"\b{}\b", regex::escape(&alias.trim().to_lowercase()));
                Regex::new(&pattern).map(|regex| (regex, country.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// The first country whose name or synonym appears in `story`.
    pub fn detect(&self, story: &str) -> Option<&str> {
        let story = story.to_lowercase();
        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(&story))
            .map(|(_, country)| country.as_str())
    }
}

/// Fills in the country of every story without one.
///
/// # Errors
///
/// Returns an error if:
/// * The vocabulary produces an invalid pattern
/// * The LLM model fails to build
/// * Database operations fail
pub async fn fill_countries(
    db_path: &str,
    vocabulary: &Vocabulary,
    llm_builder: Option<LLMBuilder>,
    rpm: Option<u32>,
) -> Result<CountryReport> {
    let detector = CountryDetector::new(vocabulary)?;
    let storage = Storage::new(db_path)?;

    let model = llm_builder
        .map(|builder| {
            builder
                .build()
                .map_err(|e| anyhow::anyhow!("Failed to build LLM model: {}", e))
        })
        .transpose()?;
    let rate_limiter = build_rate_limiter(rpm);
    let ctx = model.as_ref().map(|model| LlmContext {
        model: &**model,
        prompt_template: None,
        rate_limiter: rate_limiter.as_ref(),
    });

    info!("Detecting countries for stories in {db_path} that have none...");
    let report = detect_countries(&storage, &detector, ctx.as_ref()).await?;
    info!(
        "Countries: {} matched in text, {} inferred by model, {} unresolved",
        report.matched, report.inferred, report.unresolved
    );

    Ok(report)
}

/// Detects countries for stored stories without one, asking the model (when
/// given) for stories with no textual match.
///
/// # Errors
///
/// Returns an error if database operations fail
pub async fn detect_countries(
    storage: &Storage,
    detector: &CountryDetector,
    ctx: Option<&LlmContext<'_>>,
) -> Result<CountryReport> {
    let mut report = CountryReport::default();
    let mut last_id = 0;

    loop {
        let batch = storage.fetch_stories(StoryFilter::MissingCountry, last_id, FETCH_BATCH_SIZE)?;
        let Some(last) = batch.last() else {
            break;
        };
        last_id = last.id;

        for story in &batch {
            if let Some(country) = detector.detect(&story.story) {
                storage.update_country(story.id, country)?;
                report.matched += 1;
                debug!("Story {} matched country {country}", story.id);
                continue;
            }

            let inferred = match ctx {
                Some(ctx) => infer_country(&story.story, ctx)
                    .await
                    .unwrap_or_else(|err| {
                        warn!("Country inference failed for story {}: {err:#}", story.id);
                        None
                    }),
                None => None,
            };

            match inferred {
                Some(country) => {
                    storage.update_country(story.id, &country)?;
                    report.inferred += 1;
                    debug!("Story {} inferred country {country}", story.id);
                }
                None => report.unresolved += 1,
            }
        }
    }

    Ok(report)
}

/// Asks the model for the narrator's country. `Unknown` and empty answers
/// yield `None`.
///
/// # Errors
///
/// Returns an error if the LLM request fails
pub async fn infer_country(story: &str, ctx: &LlmContext<'_>) -> Result<Option<String>> {
    let answer = ask(ctx, COUNTRY_PROMPT_TEMPLATE, story).await?;
    let country = answer
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c: char| c == '.' || c == '"' || c == '\'')
        .trim();

    if country.is_empty() || country.eq_ignore_ascii_case(UNKNOWN_ANSWER) {
        Ok(None)
    } else {
        Ok(Some(country.to_string()))
    }
}

//! Theme identification by keyword votes.

use anyhow::Result;
use log::{debug, info};
use std::collections::BTreeMap;

use crate::constants::{FETCH_BATCH_SIZE, OTHER_THEME};
use crate::storage::{Storage, StoryFilter};
use crate::vocabulary::{ThemeKeywords, Vocabulary};

/// Label used in tallies for stories without a country.
const UNKNOWN_COUNTRY: &str = "Unknown";

/// Scores stories against the configured themes.
#[derive(Debug, Clone)]
pub struct ThemeClassifier {
    themes: Vec<ThemeKeywords>,
}

impl ThemeClassifier {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let themes = vocabulary
            .themes
            .iter()
            .map(|theme| ThemeKeywords {
                name: theme.name.clone(),
                keywords: theme.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();

        Self { themes }
    }

    /// One or two theme names for `story`.
    ///
    /// Each theme scores the number of its keywords found in the lowercased
    /// story. The best theme is kept, and the runner-up too when it scores at
    /// least half as much. Ties keep configuration order; no match gives
    /// [`OTHER_THEME`].
    pub fn classify(&self, story: &str) -> Vec<String> {
        let story = story.to_lowercase();
        let mut scores: Vec<(&str, usize)> = self
            .themes
            .iter()
            .map(|theme| {
                let score = theme
                    .keywords
                    .iter()
                    .filter(|keyword| story.contains(keyword.as_str()))
                    .count();
                (theme.name.as_str(), score)
            })
            .filter(|(_, score)| *score > 0)
            .collect();
        scores.sort_by(|a, b| b.1.cmp(&a.1));

        let mut ranked = scores.into_iter();
        let Some((best, best_score)) = ranked.next() else {
            return vec![OTHER_THEME.to_string()];
        };

        let mut themes = vec![best.to_string()];
        if let Some((second, second_score)) = ranked.next()
            && second_score * 2 >= best_score
        {
            themes.push(second.to_string());
        }
        themes
    }
}

/// Theme counts overall and per country.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ThemeReport {
    pub stories: u32,
    pub distribution: BTreeMap<String, u32>,
    pub by_country: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ThemeReport {
    fn record(&mut self, country: Option<&str>, themes: &[String]) {
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_COUNTRY);
        let tally = self.by_country.entry(country.to_string()).or_default();

        for theme in themes {
            *self.distribution.entry(theme.clone()).or_default() += 1;
            *tally.entry(theme.clone()).or_default() += 1;
        }
        self.stories += 1;
    }

    /// Share of stories carrying `theme`, in percent.
    pub fn percentage(&self, theme: &str) -> f64 {
        if self.stories == 0 {
            return 0.0;
        }
        let count = self.distribution.get(theme).copied().unwrap_or_default();
        f64::from(count) * 100.0 / f64::from(self.stories)
    }

    fn log_summary(&self) {
        for (theme, count) in &self.distribution {
            info!("{theme}: {count} ({:.1}%)", self.percentage(theme));
        }
        for (country, tally) in &self.by_country {
            let total: u32 = tally.values().sum();
            let shares = tally
                .iter()
                .map(|(theme, count)| {
                    format!("{theme} {:.1}%", f64::from(*count) * 100.0 / f64::from(total))
                })
                .collect::<Vec<_>>()
                .join(", ");
            debug!("{country}: {shares}");
        }
    }
}

/// Assigns themes to every story in the database.
///
/// # Errors
///
/// Returns an error if database operations fail
pub fn assign_themes(db_path: &str, vocabulary: &Vocabulary) -> Result<ThemeReport> {
    let storage = Storage::new(db_path)?;
    let classifier = ThemeClassifier::new(vocabulary);

    info!("Identifying themes for stories in {db_path}...");
    let report = theme_stories(&storage, &classifier)?;

    if report.stories == 0 {
        info!("No stories in the database.");
    } else {
        info!("Assigned themes to {} stories", report.stories);
        report.log_summary();
    }

    Ok(report)
}

/// Classifies and stores the themes of every stored story.
///
/// # Errors
///
/// Returns an error if database operations fail
pub fn theme_stories(storage: &Storage, classifier: &ThemeClassifier) -> Result<ThemeReport> {
    let mut report = ThemeReport::default();
    let mut last_id = 0;

    loop {
        let batch = storage.fetch_stories(StoryFilter::All, last_id, FETCH_BATCH_SIZE)?;
        let Some(last) = batch.last() else {
            break;
        };
        last_id = last.id;

        for story in &batch {
            let themes = classifier.classify(&story.story);
            storage.update_themes(story.id, &themes)?;
            report.record(story.country.as_deref(), &themes);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> ThemeClassifier {
        ThemeClassifier::new(&Vocabulary::default())
    }

    #[test]
    fn test_no_keywords_is_other() {
        assert_eq!(classifier().classify("Nothing relevant."), vec![OTHER_THEME]);
    }

    #[test]
    fn test_runner_up_kept_at_half_score() {
        let themes = classifier().classify(
            "My boss and my manager cut my salary, so my family suffered at home.",
        );

        assert_eq!(themes, vec!["Workplace", "Domestic"]);
    }

    #[test]
    fn test_runner_up_dropped_below_half() {
        let themes =
            classifier().classify("My boss, my manager and a colleague cut my salary at home.");

        assert_eq!(themes, vec!["Workplace"]);
    }

    #[test]
    fn test_report_percentages() {
        let mut report = ThemeReport::default();
        report.record(Some("India"), &["Workplace".to_string()]);
        report.record(None, &["Workplace".to_string(), "Domestic".to_string()]);

        assert_eq!(report.stories, 2);
        assert_eq!(report.percentage("Workplace"), 100.0);
        assert_eq!(report.percentage("Domestic"), 50.0);
        assert!(report.by_country.contains_key(UNKNOWN_COUNTRY));
    }
}

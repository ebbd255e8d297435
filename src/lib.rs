//! The storycard library turns a dataset of personal narratives into story cards:
//! each story gets a country, one or two themes, a short quotable title and an
//! optional LLM-written headline.

pub mod cleanup;
pub mod constants;
pub mod country;
pub mod dataset;
pub mod error;
pub mod headline;
pub mod llm_client;
pub mod nlp;
pub mod storage;
pub mod themes;
pub mod title;
pub mod vocabulary;

/// Enum representing which stories the title stage processes.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TitleTarget {
    /// All stories with no title yet.
    #[default]
    Untitled,
    /// All stories.
    All,
    /// A single story with specified id.
    Story { id: i64 },
}

impl std::str::FromStr for TitleTarget {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_lowercase().as_str() {
            "untitled" => Ok(Self::Untitled),
            "all" => Ok(Self::All),
            id => id
                .parse::<i64>()
                .map(|id| Self::Story { id })
                .map_err(|_| format!("Invalid title target: {input}")),
        }
    }
}

pub use country::fill_countries;
pub use dataset::{export_dataset, import_dataset};
pub use error::ExtractError;
pub use headline::generate_headlines;
pub use themes::assign_themes;
pub use title::{TitleExtractor, assign_titles, extract_title};
pub use vocabulary::Vocabulary;

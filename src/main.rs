//! storycard is a CLI tool that turns a CSV dataset of personal narratives into
//! story cards stored in a local SQLite database.
//!
//! Typical run:
//! 1. `import` - Loads and cleans the CSV dataset into the database
//! 2. `countries` - Fills in missing countries
//! 3. `themes` - Tags each story with one or two themes
//! 4. `titles` - Extracts a short quotable title from each story
//! 5. `headlines` - Asks an LLM for a first-person headline (optional)
//! 6. `export` - Writes the cards back to CSV

use std::fs;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, warn};

use storycard::{
    TitleExtractor, TitleTarget, Vocabulary, assign_themes, assign_titles,
    constants::{DEFAULT_MAX_WORDS, FALLBACK_TITLE},
    dataset::{ExportOptions, ImportOptions},
    export_dataset, fill_countries, generate_headlines, import_dataset,
    llm_client::llm_builder_from_url,
    nlp::Capabilities,
    title::TitleConfig,
};

/// A CLI tool to build story cards from personal narratives
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

/// Options shared by the commands that extract titles
#[derive(Args)]
struct ExtractionArgs {
    /// Maximum number of words in a title
    #[arg(long, short = 'w', default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,
    /// Path to a JSON vocabulary file overriding the built-in word lists
    #[arg(long)]
    vocabulary: Option<String>,
    /// Path to a tab-separated sentiment lexicon (word, valence)
    #[arg(long)]
    sentiment_lexicon: Option<String>,
    /// Path to a tab-separated word class lexicon (word, tag)
    #[arg(long)]
    syntax_lexicon: Option<String>,
}

impl ExtractionArgs {
    fn extractor(&self) -> Result<TitleExtractor> {
        let vocabulary = Vocabulary::load(self.vocabulary.as_deref())?;
        let capabilities = Capabilities::resolve(
            self.sentiment_lexicon.as_deref(),
            self.syntax_lexicon.as_deref(),
        );

        Ok(TitleExtractor::new(
            &vocabulary,
            TitleConfig::default().with_max_words(self.max_words),
            capabilities,
        )?)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Import a CSV dataset into a local database
    Import {
        /// Path to the CSV file with Country and Story columns
        csv: String,
        /// Path to database file to store stories
        db: String,
        /// Keep non-ASCII characters
        #[arg(long)]
        keep_non_ascii: bool,
    },
    /// Fill in missing countries from the story text, optionally asking an LLM
    Countries {
        /// Path to database file to read stories from
        db: String,
        /// URL of the LLM model to ask when the text names no country
        #[arg(long, short = 'm')]
        model: Option<String>,
        /// Path to a JSON vocabulary file overriding the built-in word lists
        #[arg(long)]
        vocabulary: Option<String>,
        /// Rate limit: requests per minute (default: no limit)
        #[arg(long, short = 'r')]
        rpm: Option<u32>,
    },
    /// Assign one or two themes to every story
    Themes {
        /// Path to database file to read stories from
        db: String,
        /// Path to a JSON vocabulary file overriding the built-in word lists
        #[arg(long)]
        vocabulary: Option<String>,
    },
    /// Extract titles for stories in the database
    Titles {
        /// Path to database file to read stories from
        db: String,
        /// Target to title: "untitled", "all" or a story id
        #[arg(long, short = 't', default_value = "untitled")]
        target: TitleTarget,
        #[command(flatten)]
        extraction: ExtractionArgs,
    },
    /// Generate first-person headlines using an LLM model
    Headlines {
        /// Path to database file to read stories from
        db: String,
        /// URL of the LLM model to use
        model: String,
        /// Path to the file with a prompt template
        #[arg(long, short = 'p')]
        prompt_file: Option<String>,
        /// Rate limit: requests per minute (default: no limit)
        #[arg(long, short = 'r')]
        rpm: Option<u32>,
    },
    /// Export stories from the database to a CSV file
    Export {
        /// Path to database file to read stories from
        db: String,
        /// Path to output CSV file
        csv: String,
        /// Only export rows with a country and a meaningful story
        #[arg(long)]
        analysis: bool,
        /// End every title with an ellipsis
        #[arg(long)]
        ellipsis: bool,
    },
    /// Extract a title from a single narrative and print it
    Title {
        /// The narrative text
        narrative: String,
        #[command(flatten)]
        extraction: ExtractionArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    match cli.command {
        Command::Import {
            csv,
            db,
            keep_non_ascii,
        } => import_dataset(&csv, &db, ImportOptions { keep_non_ascii }).map(|_| ()),
        Command::Countries {
            db,
            model,
            vocabulary,
            rpm,
        } => {
            let vocabulary = Vocabulary::load(vocabulary.as_deref())?;
            let llm_builder = model.as_deref().map(llm_builder_from_url).transpose()?;
            fill_countries(&db, &vocabulary, llm_builder, rpm)
                .await
                .map(|_| ())
        }
        Command::Themes { db, vocabulary } => {
            let vocabulary = Vocabulary::load(vocabulary.as_deref())?;
            assign_themes(&db, &vocabulary).map(|_| ())
        }
        Command::Titles {
            db,
            target,
            extraction,
        } => assign_titles(&db, &extraction.extractor()?, target).map(|_| ()),
        Command::Headlines {
            db,
            model,
            prompt_file,
            rpm,
        } => handle_headlines_command(db, model, prompt_file, rpm).await,
        Command::Export {
            db,
            csv,
            analysis,
            ellipsis,
        } => export_dataset(&db, &csv, ExportOptions { analysis, ellipsis }).map(|_| ()),
        Command::Title {
            narrative,
            extraction,
        } => {
            let title = extraction
                .extractor()?
                .extract(&narrative)
                .unwrap_or_else(|err| {
                    warn!("Title extraction failed: {err}");
                    FALLBACK_TITLE.to_string()
                });
            println!("{title}");
            Ok(())
        }
    }
}

async fn handle_headlines_command(
    db: String,
    model: String,
    prompt_file: Option<String>,
    rpm: Option<u32>,
) -> Result<()> {
    let llm_builder = llm_builder_from_url(&model)?;

    let prompt_template = match prompt_file {
        Some(file) => {
            let content =
                fs::read_to_string(&file).context(format!("Failed to read prompt file: {file}"))?;
            Some(content)
        }
        None => None,
    };

    generate_headlines(&db, llm_builder, prompt_template.as_deref(), rpm)
        .await
        .map(|_| ())
}

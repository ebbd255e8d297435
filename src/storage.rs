//! The storage module keeps the story dataset in a local SQLite database so each
//! pipeline stage can fill its column independently and be re-run.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::convert::TryFrom;
use std::sync::{Arc, Mutex};

/// Separator of theme names inside the `themes` column.
const THEME_SEPARATOR: &str = ";";

const STORY_COLUMNS: &str = "id, country, story, themes, title, diagnostic, headline, added_at";

/// Storage provides database operations over the `stories` table.
pub struct Storage {
    /// The underlying SQLite connection wrapped in Arc<Mutex<>> to make it thread-safe
    conn: Arc<Mutex<Connection>>,
}

/// Which stories a batch fetch returns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StoryFilter {
    All,
    /// Stories with no country.
    MissingCountry,
    /// Stories with no title.
    Untitled,
    /// Stories with no headline.
    MissingHeadline,
}

impl StoryFilter {
    fn condition(self) -> &'static str {
        match self {
            Self::All => "1 = 1",
            Self::MissingCountry => "(country IS NULL OR country = '')",
            Self::Untitled => "(title IS NULL OR title = '')",
            Self::MissingHeadline => "(headline IS NULL OR headline = '')",
        }
    }
}

impl Storage {
    /// Opens the database at `database_path`, creating the schema if needed.
    /// `":memory:"` opens a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .with_context(|| format!("Failed to open database {database_path}"))?;

        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Initializes the database schema with the stories table if it doesn't exist.
    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS stories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                country TEXT NULL,
                story TEXT NOT NULL UNIQUE,
                themes TEXT NULL,
                title TEXT NULL,
                diagnostic TEXT NULL,
                headline TEXT NULL,
                added_at INTEGER NOT NULL
            )",
            params![],
        )?;

        Ok(())
    }

    /// Inserts a story unless the same story text is already stored.
    ///
    /// Returns `true` when a row was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn insert_story(
        &self,
        country: Option<&str>,
        story: &str,
        added_at: DateTime<Utc>,
    ) -> Result<bool> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO stories (country, story, added_at) VALUES (?1, ?2, ?3)",
            params![country, story, added_at.timestamp()],
        )?;

        Ok(inserted > 0)
    }

    /// Inserts `(country, story)` pairs in a single transaction, skipping
    /// stories already stored.
    ///
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails; nothing is inserted then
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn insert_stories(
        &self,
        stories: &[(Option<&str>, &str)],
        added_at: DateTime<Utc>,
    ) -> Result<usize> {
        let mut conn = self.conn.lock().expect("Storage mutex poisoned");
        let tx = conn.transaction()?;

        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO stories (country, story, added_at) VALUES (?1, ?2, ?3)",
            )?;
            for (country, story) in stories {
                inserted += stmt.execute(params![country, story, added_at.timestamp()])?;
            }
        }
        tx.commit()?;

        Ok(inserted)
    }

    /// Gets a story by id.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or the row is malformed
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn get_story(&self, id: i64) -> Result<Option<Story>> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        let mut stmt = conn.prepare(&format!("SELECT {STORY_COLUMNS} FROM stories WHERE id = ?1"))?;
        let story_row = stmt
            .query_row([id], StoryRow::from_row)
            .optional()
            .map_err(|e| anyhow::anyhow!("Unable to fetch story row: {e}"))?;

        story_row.map(Story::try_from).transpose()
    }

    /// Gets up to `limit` stories matching `filter` with an id greater than
    /// `after_id`, in id order.
    ///
    /// Pass the last id of the previous batch as `after_id` to walk the table
    /// in batches; updates made to the previous batch do not shift the next.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails or a row is malformed
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn fetch_stories(&self, filter: StoryFilter, after_id: i64, limit: u32) -> Result<Vec<Story>> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id > ?1 AND {} ORDER BY id ASC LIMIT ?2",
            filter.condition()
        ))?;
        let rows = stmt
            .query_map(params![after_id, limit], StoryRow::from_row)?
            .collect::<Result<Vec<_>, rusqlite::Error>>()?;

        rows.into_iter().map(Story::try_from).collect()
    }

    /// Counts all stored stories.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn count_stories(&self) -> Result<u64> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM stories", [], |row| row.get(0))?;

        Ok(u64::try_from(count)?)
    }

    /// Updates the country of a story.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn update_country(&self, id: i64, country: &str) -> Result<()> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        conn.execute(
            "UPDATE stories SET country = ?1 WHERE id = ?2",
            params![country, id],
        )?;

        Ok(())
    }

    /// Updates the themes of a story.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn update_themes(&self, id: i64, themes: &[String]) -> Result<()> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        conn.execute(
            "UPDATE stories SET themes = ?1 WHERE id = ?2",
            params![themes.join(THEME_SEPARATOR), id],
        )?;

        Ok(())
    }

    /// Updates the title of a story together with its diagnostic. A `None`
    /// diagnostic clears the one left by a previous failed run.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn update_title(&self, id: i64, title: &str, diagnostic: Option<&str>) -> Result<()> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        conn.execute(
            "UPDATE stories SET title = ?1, diagnostic = ?2 WHERE id = ?3",
            params![title, diagnostic, id],
        )?;

        Ok(())
    }

    /// Updates the headline of a story.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    pub fn update_headline(&self, id: i64, headline: &str) -> Result<()> {
        let conn = self.conn.lock().expect("Storage mutex poisoned");
        conn.execute(
            "UPDATE stories SET headline = ?1 WHERE id = ?2",
            params![headline, id],
        )?;

        Ok(())
    }
}

/// Represents a story as stored in the database
#[derive(Debug)]
pub struct StoryRow {
    pub id: i64,
    pub country: Option<String>,
    pub story: String,
    pub themes: Option<String>,
    pub title: Option<String>,
    pub diagnostic: Option<String>,
    pub headline: Option<String>,
    pub added_at: i64,
}

impl StoryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            country: row.get(1)?,
            story: row.get(2)?,
            themes: row.get(3)?,
            title: row.get(4)?,
            diagnostic: row.get(5)?,
            headline: row.get(6)?,
            added_at: row.get(7)?,
        })
    }
}

/// Represents domain Story
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: i64,
    pub country: Option<String>,
    pub story: String,
    pub themes: Vec<String>,
    pub title: Option<String>,
    pub diagnostic: Option<String>,
    pub headline: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl TryFrom<StoryRow> for Story {
    type Error = anyhow::Error;

    fn try_from(story_row: StoryRow) -> Result<Self> {
        Ok(Story {
            id: story_row.id,
            country: story_row.country,
            story: story_row.story,
            themes: story_row
                .themes
                .map(|themes| {
                    themes
                        .split(THEME_SEPARATOR)
                        .filter(|theme| !theme.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            title: story_row.title,
            diagnostic: story_row.diagnostic,
            headline: story_row.headline,
            added_at: DateTime::from_timestamp_secs(story_row.added_at)
                .context("Unable to initialize added_at from database")?,
        })
    }
}

//! SQLite storage for user decks, cards, review progress and answer stats
//!
//! All four tables live in one database file (`vocabecho.db`):
//! ```text
//! user_decks     id, title, created_at_epoch_day, image_uri
//! user_cards     id, deck_id, position, front, back, type, cloze_*
//! card_progress  card_id, deck_id, due_epoch_day, last_reviewed_epoch_day, is_new
//! card_stats     card_id, deck_id, correct_count, wrong_count, correct_streak, ...
//! ```
//! Progress and stats rows are keyed by note id and carry the deck id for
//! bulk cleanup. Writes are full-row `INSERT OR REPLACE` upserts.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use uuid::Uuid;

use super::authoring::{validate_content, DraftError, NewDeck};
use super::models::*;
use super::progress::{ProgressStore, StatsStore};

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid card: {0}")]
    InvalidDraft(#[from] DraftError),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS user_decks (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        created_at_epoch_day INTEGER NOT NULL,
        image_uri TEXT
    );

    CREATE TABLE IF NOT EXISTS user_cards (
        id TEXT PRIMARY KEY,
        deck_id TEXT NOT NULL,
        position INTEGER NOT NULL DEFAULT 0,
        front TEXT NOT NULL DEFAULT '',
        back TEXT NOT NULL DEFAULT '',
        created_at_epoch_day INTEGER NOT NULL,
        type TEXT DEFAULT 'BASIC',
        cloze_text TEXT,
        cloze_answer TEXT,
        cloze_hint TEXT
    );

    CREATE TABLE IF NOT EXISTS card_progress (
        card_id TEXT PRIMARY KEY,
        deck_id TEXT NOT NULL,
        due_epoch_day INTEGER NOT NULL,
        last_reviewed_epoch_day INTEGER,
        is_new INTEGER NOT NULL DEFAULT 1
    );

    CREATE TABLE IF NOT EXISTS card_stats (
        card_id TEXT PRIMARY KEY,
        deck_id TEXT NOT NULL,
        correct_count INTEGER NOT NULL DEFAULT 0,
        wrong_count INTEGER NOT NULL DEFAULT 0,
        correct_streak INTEGER NOT NULL DEFAULT 0,
        last_answered_epoch_day INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_user_cards_deck_id ON user_cards(deck_id);
    CREATE INDEX IF NOT EXISTS idx_card_progress_deck_due ON card_progress(deck_id, due_epoch_day);
    CREATE INDEX IF NOT EXISTS idx_card_stats_deck_id ON card_stats(deck_id);
"#;

const CARD_COLUMNS: &str =
    "id, deck_id, front, back, created_at_epoch_day, type, cloze_text, cloze_answer, cloze_hint";

/// Storage manager for user decks and review state
pub struct FlashcardStorage {
    conn: Connection,
}

impl FlashcardStorage {
    /// Open (or create) the database at `db_path`
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::with_connection(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Default location of the app data (e.g. ~/.local/share/vocabecho)
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("vocabecho"))
            .ok_or(FlashcardStorageError::DataDirNotFound)
    }

    // ==================== Deck Operations ====================

    /// Create a deck with its cards. Returns the new deck id.
    pub fn create_deck_with_cards(&self, deck: &NewDeck, today_epoch_day: i64) -> Result<String> {
        deck.validate()?;

        let deck_id = Uuid::new_v4().to_string();
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO user_decks (id, title, created_at_epoch_day, image_uri) VALUES (?1, ?2, ?3, ?4)",
            params![deck_id, deck.title.trim(), today_epoch_day, deck.image_uri],
        )?;

        for (index, content) in deck.cards.iter().enumerate() {
            let note = Note::new(format!("{}_card_{}", deck_id, index), deck_id.as_str(), content.trimmed());
            insert_card(&tx, &NoteRow::from_note(&note, today_epoch_day), index as i64)?;
        }

        tx.commit()?;
        log::info!("Created deck {:?} ({}) with {} cards", deck.title, deck_id, deck.cards.len());
        Ok(deck_id)
    }

    /// List all user decks, newest first
    pub fn list_decks(&self) -> Result<Vec<UserDeck>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, created_at_epoch_day, image_uri FROM user_decks
             ORDER BY created_at_epoch_day DESC, rowid DESC",
        )?;
        let decks = stmt
            .query_map([], deck_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(decks)
    }

    /// Get a specific deck
    pub fn get_deck(&self, deck_id: &str) -> Result<Option<UserDeck>> {
        let deck = self
            .conn
            .query_row(
                "SELECT id, title, created_at_epoch_day, image_uri FROM user_decks WHERE id = ?1",
                params![deck_id],
                deck_from_row,
            )
            .optional()?;
        Ok(deck)
    }

    /// Delete a deck together with its cards, progress and stats
    pub fn delete_deck(&self, deck_id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM user_cards WHERE deck_id = ?1", params![deck_id])?;
        self.delete_progress_for_deck(deck_id)?;
        self.delete_stats_for_deck(deck_id)?;
        let rows = tx.execute("DELETE FROM user_decks WHERE id = ?1", params![deck_id])?;
        tx.commit()?;

        if rows == 1 {
            log::info!("Deleted deck {}", deck_id);
        }
        Ok(rows == 1)
    }

    // ==================== Card Operations ====================

    /// All notes of a deck in authoring order
    pub fn list_notes(&self, deck_id: &str) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM user_cards WHERE deck_id = ?1 ORDER BY position, rowid",
            CARD_COLUMNS
        ))?;
        let rows = stmt
            .query_map(params![deck_id], note_row_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows.into_iter().map(Note::from_row).collect())
    }

    /// Raw row of a card, as stored
    pub fn get_note_row(&self, deck_id: &str, card_id: &str) -> Result<Option<NoteRow>> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM user_cards WHERE deck_id = ?1 AND id = ?2",
                    CARD_COLUMNS
                ),
                params![deck_id, card_id],
                note_row_from_row,
            )
            .optional()?;
        Ok(row)
    }

    /// Get a specific card
    pub fn get_note(&self, deck_id: &str, card_id: &str) -> Result<Option<Note>> {
        Ok(self.get_note_row(deck_id, card_id)?.map(Note::from_row))
    }

    /// Append a card to an existing deck. Returns `None` when the deck does
    /// not exist.
    pub fn add_note(
        &self,
        deck_id: &str,
        content: NoteContent,
        today_epoch_day: i64,
    ) -> Result<Option<Note>> {
        validate_content(&content)?;
        if self.get_deck(deck_id)?.is_none() {
            return Ok(None);
        }

        let position: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM user_cards WHERE deck_id = ?1",
            params![deck_id],
            |row| row.get(0),
        )?;

        let note = Note::new(Uuid::new_v4().to_string(), deck_id, content.trimmed());
        insert_card(&self.conn, &NoteRow::from_note(&note, today_epoch_day), position)?;
        Ok(Some(note))
    }

    /// Replace the content (and type) of a card
    pub fn update_note(&self, deck_id: &str, card_id: &str, content: NoteContent) -> Result<bool> {
        validate_content(&content)?;

        let note = Note::new(card_id, deck_id, content.trimmed());
        let row = NoteRow::from_note(&note, 0);
        let rows = self.conn.execute(
            "UPDATE user_cards
             SET type = ?3, front = ?4, back = ?5, cloze_text = ?6, cloze_answer = ?7, cloze_hint = ?8
             WHERE deck_id = ?1 AND id = ?2",
            params![
                deck_id,
                card_id,
                row.card_type,
                row.front,
                row.back,
                row.cloze_text,
                row.cloze_answer,
                row.cloze_hint,
            ],
        )?;
        Ok(rows == 1)
    }

    /// Delete a card and its progress and stats
    pub fn delete_note(&self, deck_id: &str, card_id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx.execute(
            "DELETE FROM user_cards WHERE deck_id = ?1 AND id = ?2",
            params![deck_id, card_id],
        )?;
        if rows == 1 {
            self.delete_progress_for_card(card_id)?;
            self.delete_stats_for_card(card_id)?;
        }
        tx.commit()?;
        Ok(rows == 1)
    }
}

fn insert_card(conn: &Connection, row: &NoteRow, position: i64) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO user_cards
         (id, deck_id, position, front, back, created_at_epoch_day, type, cloze_text, cloze_answer, cloze_hint)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            row.id,
            row.deck_id,
            position,
            row.front,
            row.back,
            row.created_at_epoch_day,
            row.card_type,
            row.cloze_text,
            row.cloze_answer,
            row.cloze_hint,
        ],
    )?;
    Ok(())
}

fn deck_from_row(row: &Row<'_>) -> rusqlite::Result<UserDeck> {
    Ok(UserDeck {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at_epoch_day: row.get(2)?,
        image_uri: row.get(3)?,
    })
}

fn note_row_from_row(row: &Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get(0)?,
        deck_id: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        created_at_epoch_day: row.get(4)?,
        card_type: row.get(5)?,
        cloze_text: row.get(6)?,
        cloze_answer: row.get(7)?,
        cloze_hint: row.get(8)?,
    })
}

fn progress_from_row(row: &Row<'_>) -> rusqlite::Result<ProgressRecord> {
    Ok(ProgressRecord {
        card_id: row.get(0)?,
        deck_id: row.get(1)?,
        due_epoch_day: row.get(2)?,
        last_reviewed_epoch_day: row.get(3)?,
        is_new: row.get(4)?,
    })
}

fn stats_from_row(row: &Row<'_>) -> rusqlite::Result<StatsRecord> {
    Ok(StatsRecord {
        card_id: row.get(0)?,
        deck_id: row.get(1)?,
        correct_count: row.get(2)?,
        wrong_count: row.get(3)?,
        correct_streak: row.get(4)?,
        last_answered_epoch_day: row.get(5)?,
    })
}

const PROGRESS_COLUMNS: &str = "card_id, deck_id, due_epoch_day, last_reviewed_epoch_day, is_new";

impl ProgressStore for FlashcardStorage {
    fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO card_progress
             (card_id, deck_id, due_epoch_day, last_reviewed_epoch_day, is_new)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.card_id,
                record.deck_id,
                record.due_epoch_day,
                record.last_reviewed_epoch_day,
                record.is_new,
            ],
        )?;
        Ok(())
    }

    fn progress_for_card(&self, card_id: &str) -> Result<Option<ProgressRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("SELECT {} FROM card_progress WHERE card_id = ?1", PROGRESS_COLUMNS),
                params![card_id],
                progress_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn due_for_deck(&self, deck_id: &str, today_epoch_day: i64) -> Result<Vec<ProgressRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM card_progress
             WHERE deck_id = ?1 AND due_epoch_day <= ?2
             ORDER BY due_epoch_day ASC",
            PROGRESS_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![deck_id, today_epoch_day], progress_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn all_for_deck(&self, deck_id: &str) -> Result<Vec<ProgressRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM card_progress WHERE deck_id = ?1",
            PROGRESS_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![deck_id], progress_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    fn count_reviewed_today(&self, deck_id: &str, today_epoch_day: i64) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM card_progress WHERE deck_id = ?1 AND last_reviewed_epoch_day = ?2",
            params![deck_id, today_epoch_day],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn delete_progress_for_card(&self, card_id: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM card_progress WHERE card_id = ?1", params![card_id])?)
    }

    fn delete_progress_for_deck(&self, deck_id: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM card_progress WHERE deck_id = ?1", params![deck_id])?)
    }
}

impl StatsStore for FlashcardStorage {
    fn stats_for_card(&self, card_id: &str) -> Result<Option<StatsRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT card_id, deck_id, correct_count, wrong_count, correct_streak, last_answered_epoch_day
                 FROM card_stats WHERE card_id = ?1",
                params![card_id],
                stats_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn upsert_stats(&self, record: &StatsRecord) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO card_stats
             (card_id, deck_id, correct_count, wrong_count, correct_streak, last_answered_epoch_day)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.card_id,
                record.deck_id,
                record.correct_count,
                record.wrong_count,
                record.correct_streak,
                record.last_answered_epoch_day,
            ],
        )?;
        Ok(())
    }

    fn delete_stats_for_card(&self, card_id: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM card_stats WHERE card_id = ?1", params![card_id])?)
    }

    fn delete_stats_for_deck(&self, deck_id: &str) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM card_stats WHERE deck_id = ?1", params![deck_id])?)
    }
}

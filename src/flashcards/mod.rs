//! Flashcards for VocabEcho
//!
//! This module provides:
//! - Card content and study instances (basic, reversed, typed, cloze)
//! - Answer checking for typed cards
//! - Day-table scheduling and the daily study queue
//! - Built-in and user deck sources, with SQLite persistence
//! - Per-screen session state

pub mod algorithm;
pub mod answer;
pub mod authoring;
pub mod decks;
pub mod instance;
pub mod models;
pub mod progress;
pub mod queue;
pub mod session;
pub mod storage;

pub use decks::{AssetDeckSource, CombinedDeckSource, DeckSource, DeckSourceError};
pub use models::*;
pub use progress::{ProgressStore, ProgressTracker, StatsStore};
pub use storage::{FlashcardStorage, FlashcardStorageError};

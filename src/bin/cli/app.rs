use std::path::Path;

use anyhow::{bail, Context, Result};

use vocabecho_lib::flashcards::progress::{summarize_deck, AnswerOutcome};
use vocabecho_lib::flashcards::queue::build_queue;
use vocabecho_lib::flashcards::session::LearnEffect;
use vocabecho_lib::flashcards::{
    instance, AssetDeckSource, CardInstance, CombinedDeckSource, Deck, DeckSource, DeckSummary,
    FlashcardStorage, Grade, Note, ProgressRecord, ProgressStore, ProgressTracker,
};
use vocabecho_lib::settings::{ParentSettings, SettingsStorage};
use vocabecho_lib::time::{Clock, FixedClock, SystemClock};

/// Shared application state for CLI commands
pub struct App {
    pub storage: FlashcardStorage,
    pub settings: SettingsStorage,
    assets: AssetDeckSource,
    clock: Box<dyn Clock>,
}

impl App {
    /// Open the data directory (default location unless overridden)
    pub fn new(data_dir: Option<&Path>, today: Option<i64>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => FlashcardStorage::default_data_dir().context("Failed to get data directory")?,
        };

        let storage = FlashcardStorage::open(&data_dir.join("vocabecho.db"))
            .context("Failed to open flashcard database")?;
        let settings =
            SettingsStorage::new(data_dir).context("Failed to load parent settings")?;
        let clock: Box<dyn Clock> = match today {
            Some(day) => Box::new(FixedClock(day)),
            None => Box::new(SystemClock),
        };

        Ok(Self {
            storage,
            settings,
            assets: AssetDeckSource::new(),
            clock,
        })
    }

    pub fn today(&self) -> i64 {
        self.clock.today_epoch_day()
    }

    fn decks(&self) -> CombinedDeckSource<'_, AssetDeckSource, FlashcardStorage> {
        CombinedDeckSource::new(&self.assets, &self.storage)
    }

    /// Built-in decks followed by user decks
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.decks().load_all_decks().context("Failed to load decks")
    }

    /// Find a deck by id, or by title (case-insensitive prefix match)
    pub fn find_deck(&self, query: &str) -> Result<Deck> {
        if let Some(deck) = self.decks().load_deck(query).context("Failed to load deck")? {
            return Ok(deck);
        }

        let decks = self.list_decks()?;
        let query_lower = query.to_lowercase();

        // Exact title first
        if let Some(deck) = decks.iter().find(|d| d.title.to_lowercase() == query_lower) {
            return Ok(deck.clone());
        }

        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.title.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                query,
                decks
                    .iter()
                    .map(|d| format!("  - {} ({})", d.title, d.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|d| format!("  - {} ({})", d.title, d.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Like `find_deck`, but refuses built-in decks
    pub fn find_user_deck(&self, query: &str) -> Result<Deck> {
        let deck = self.find_deck(query)?;
        if deck.built_in {
            bail!("'{}' is a built-in deck and cannot be changed", deck.title);
        }
        Ok(deck)
    }

    /// Find a card by note id or instance id (`{note}#F`)
    pub fn find_note<'d>(&self, deck: &'d Deck, query: &str) -> Result<&'d Note> {
        let note_id = query.split('#').next().unwrap_or(query);
        deck.notes
            .iter()
            .find(|n| n.id == note_id)
            .with_context(|| format!("No card '{}' in deck '{}'", query, deck.title))
    }

    pub fn progress_for_deck(&self, deck: &Deck) -> Result<Vec<ProgressRecord>> {
        self.storage
            .all_for_deck(&deck.id)
            .context("Failed to load progress")
    }

    pub fn summarize(&self, deck: &Deck) -> Result<DeckSummary> {
        summarize_deck(deck, &self.storage, self.today()).context("Failed to load progress")
    }

    /// Card instances to study today, due cards first
    pub fn study_queue(&self, deck: &Deck) -> Result<Vec<CardInstance>> {
        let progress = self.progress_for_deck(deck)?;
        let instances = instance::generate_all(&deck.notes);
        Ok(build_queue(&instances, &progress, self.today()))
    }

    pub fn parent_settings(&self) -> ParentSettings {
        self.settings.get()
    }

    pub fn grade(&self, deck_id: &str, note_id: &str, grade: Grade) -> Result<ProgressRecord> {
        let tracker = ProgressTracker::new(&self.storage, &self.storage);
        tracker
            .grade_card(deck_id, note_id, self.today(), grade, &self.parent_settings())
            .context("Failed to save progress")
    }

    pub fn record_answer(&self, deck_id: &str, note_id: &str, is_correct: bool) -> Result<AnswerOutcome> {
        let tracker = ProgressTracker::new(&self.storage, &self.storage);
        tracker
            .apply_answer_result(deck_id, note_id, self.today(), is_correct, &self.parent_settings())
            .context("Failed to save progress")
    }

    /// Run a write requested by a learn session
    #[cfg_attr(not(feature = "tui"), allow(dead_code))]
    pub fn apply_effect(&self, effect: LearnEffect) -> Result<()> {
        match effect {
            LearnEffect::Grade {
                deck_id,
                note_id,
                grade,
            } => {
                self.grade(&deck_id, &note_id, grade)?;
            }
            LearnEffect::RecordAnswer {
                deck_id,
                note_id,
                is_correct,
            } => {
                self.record_answer(&deck_id, &note_id, is_correct)?;
            }
        }
        Ok(())
    }
}

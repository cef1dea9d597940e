//! Review progress: store contracts and grading
//!
//! Grading has two entry points. An explicit grade (AGAIN / HARD / EASY)
//! reschedules the card directly. An auto-checked answer first updates the
//! answer stats, derives a grade from the new streak and then reschedules
//! through the explicit path.

use crate::settings::ParentSettings;

use super::algorithm::{grade_for_answer, next_due_epoch_day};
use super::models::{Deck, DeckSummary, Grade, ProgressRecord, StatsRecord};
use super::queue::queue_counts;
use super::storage::Result;

/// Per-card review schedule rows
pub trait ProgressStore {
    /// Insert or fully replace the row for `record.card_id`
    fn upsert_progress(&self, record: &ProgressRecord) -> Result<()>;

    fn progress_for_card(&self, card_id: &str) -> Result<Option<ProgressRecord>>;

    /// Rows due on or before `today_epoch_day`, earliest first
    fn due_for_deck(&self, deck_id: &str, today_epoch_day: i64) -> Result<Vec<ProgressRecord>>;

    fn all_for_deck(&self, deck_id: &str) -> Result<Vec<ProgressRecord>>;

    fn count_reviewed_today(&self, deck_id: &str, today_epoch_day: i64) -> Result<usize>;

    fn delete_progress_for_card(&self, card_id: &str) -> Result<usize>;

    fn delete_progress_for_deck(&self, deck_id: &str) -> Result<usize>;
}

/// Per-card answer statistics rows
pub trait StatsStore {
    fn stats_for_card(&self, card_id: &str) -> Result<Option<StatsRecord>>;

    /// Insert or fully replace the row for `record.card_id`
    fn upsert_stats(&self, record: &StatsRecord) -> Result<()>;

    fn delete_stats_for_card(&self, card_id: &str) -> Result<usize>;

    fn delete_stats_for_deck(&self, deck_id: &str) -> Result<usize>;
}

/// What an auto-checked answer did to a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub grade: Grade,
    pub stats: StatsRecord,
    pub progress: ProgressRecord,
}

/// Applies grades to the progress and stats stores
pub struct ProgressTracker<'a, P, S> {
    progress: &'a P,
    stats: &'a S,
}

impl<'a, P: ProgressStore, S: StatsStore> ProgressTracker<'a, P, S> {
    pub fn new(progress: &'a P, stats: &'a S) -> Self {
        Self { progress, stats }
    }

    /// Reschedule a card with an explicit grade
    pub fn grade_card(
        &self,
        deck_id: &str,
        card_id: &str,
        today_epoch_day: i64,
        grade: Grade,
        settings: &ParentSettings,
    ) -> Result<ProgressRecord> {
        let record = ProgressRecord {
            card_id: card_id.to_string(),
            deck_id: deck_id.to_string(),
            due_epoch_day: next_due_epoch_day(today_epoch_day, grade, settings),
            last_reviewed_epoch_day: Some(today_epoch_day),
            is_new: false,
        };
        self.progress.upsert_progress(&record)?;

        log::debug!(
            "Graded card {} as {}, due on day {}",
            card_id,
            grade.as_str(),
            record.due_epoch_day
        );
        Ok(record)
    }

    /// Record an auto-checked answer and reschedule from the resulting streak
    pub fn apply_answer_result(
        &self,
        deck_id: &str,
        card_id: &str,
        today_epoch_day: i64,
        is_correct: bool,
        settings: &ParentSettings,
    ) -> Result<AnswerOutcome> {
        let stats = self
            .stats
            .stats_for_card(card_id)?
            .unwrap_or_else(|| StatsRecord::new(card_id, deck_id))
            .record_answer(is_correct, today_epoch_day);
        self.stats.upsert_stats(&stats)?;

        let grade = grade_for_answer(is_correct, stats.correct_streak);
        let progress = self.grade_card(deck_id, card_id, today_epoch_day, grade, settings)?;

        Ok(AnswerOutcome {
            grade,
            stats,
            progress,
        })
    }
}

/// Deck-list counters for one deck
pub fn summarize_deck<P: ProgressStore>(
    deck: &Deck,
    progress_store: &P,
    today_epoch_day: i64,
) -> Result<DeckSummary> {
    let progress = progress_store.all_for_deck(&deck.id)?;
    let counts = queue_counts(&deck.notes, &progress, today_epoch_day);

    Ok(DeckSummary {
        deck_id: deck.id.clone(),
        title: deck.title.clone(),
        built_in: deck.built_in,
        total_notes: deck.notes.len(),
        due_today: counts.due,
        new_cards: counts.new,
        reviewed_today: progress_store.count_reviewed_today(&deck.id, today_epoch_day)?,
    })
}

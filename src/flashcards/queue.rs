//! Study queue construction
//!
//! Due cards (progress record with due day <= today) come first, then new
//! cards (no progress record). Both buckets keep input order. Cards due in
//! the future are left out.

use std::collections::HashMap;

use super::models::{AssetCard, CardInstance, Note, ProgressRecord};

/// Anything that can be looked up in the progress table
pub trait Reviewable {
    /// Id of the progress row for this item
    fn progress_key(&self) -> &str;
}

impl Reviewable for Note {
    fn progress_key(&self) -> &str {
        &self.id
    }
}

impl Reviewable for AssetCard {
    fn progress_key(&self) -> &str {
        &self.id
    }
}

/// Instances share the progress row of their note.
impl Reviewable for CardInstance {
    fn progress_key(&self) -> &str {
        &self.note_id
    }
}

/// Where an item lands for a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueBucket {
    Due,
    New,
    Scheduled,
}

/// Due and new counts for a deck on a given day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueCounts {
    pub due: usize,
    pub new: usize,
}

fn index_progress(progress: &[ProgressRecord]) -> HashMap<&str, &ProgressRecord> {
    progress.iter().map(|p| (p.card_id.as_str(), p)).collect()
}

fn bucket_of(record: Option<&&ProgressRecord>, today_epoch_day: i64) -> QueueBucket {
    match record {
        None => QueueBucket::New,
        Some(p) if p.is_due(today_epoch_day) => QueueBucket::Due,
        Some(_) => QueueBucket::Scheduled,
    }
}

/// Build today's queue: due items, then new items, in source order.
pub fn build_queue<T: Reviewable + Clone>(
    cards: &[T],
    progress: &[ProgressRecord],
    today_epoch_day: i64,
) -> Vec<T> {
    let by_id = index_progress(progress);

    let (mut due, mut fresh) = (Vec::new(), Vec::new());
    for card in cards {
        match bucket_of(by_id.get(card.progress_key()), today_epoch_day) {
            QueueBucket::Due => due.push(card.clone()),
            QueueBucket::New => fresh.push(card.clone()),
            QueueBucket::Scheduled => {}
        }
    }

    log::debug!(
        "Built queue for day {}: {} due, {} new, {} scheduled later",
        today_epoch_day,
        due.len(),
        fresh.len(),
        cards.len() - due.len() - fresh.len()
    );

    due.extend(fresh);
    due
}

/// Count due and new items without building the queue
pub fn queue_counts<T: Reviewable>(
    cards: &[T],
    progress: &[ProgressRecord],
    today_epoch_day: i64,
) -> QueueCounts {
    let by_id = index_progress(progress);
    let mut counts = QueueCounts::default();
    for card in cards {
        match bucket_of(by_id.get(card.progress_key()), today_epoch_day) {
            QueueBucket::Due => counts.due += 1,
            QueueBucket::New => counts.new += 1,
            QueueBucket::Scheduled => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::instance::generate_all;
    use crate::flashcards::models::NoteContent;

    fn note(id: &str) -> Note {
        Note::new(
            id,
            "deck",
            NoteContent::Basic {
                front: format!("{} front", id),
                back: format!("{} back", id),
            },
        )
    }

    fn progress(card_id: &str, due: i64) -> ProgressRecord {
        ProgressRecord {
            card_id: card_id.to_string(),
            deck_id: "deck".to_string(),
            due_epoch_day: due,
            last_reviewed_epoch_day: Some(due - 1),
            is_new: false,
        }
    }

    fn ids(queue: &[Note]) -> Vec<&str> {
        queue.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn test_all_new_cards_keep_order() {
        let cards = vec![note("a"), note("b"), note("c")];
        let queue = build_queue(&cards, &[], 100);
        assert_eq!(ids(&queue), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_due_before_new_and_future_excluded() {
        let cards = vec![note("a"), note("b"), note("c"), note("d"), note("e")];
        let progress = vec![progress("d", 99), progress("b", 100), progress("c", 101)];
        let queue = build_queue(&cards, &progress, 100);
        // due bucket keeps source order, not due-day order
        assert_eq!(ids(&queue), vec!["b", "d", "a", "e"]);
    }

    #[test]
    fn test_again_with_zero_offset_returns_same_day() {
        let cards = vec![note("a"), note("b")];
        let queue = build_queue(&cards, &[progress("b", 100)], 100);
        assert_eq!(ids(&queue), vec!["b", "a"]);
    }

    #[test]
    fn test_hard_with_one_day_offset_drops_card_today() {
        let cards = vec![note("a"), note("b")];
        let queue = build_queue(&cards, &[progress("a", 101)], 100);
        assert_eq!(ids(&queue), vec!["b"]);
    }

    #[test]
    fn test_instances_share_note_progress() {
        let notes = vec![
            note("a"),
            Note::new(
                "b",
                "deck",
                NoteContent::BasicReversed {
                    front: "moon".to_string(),
                    back: "луна".to_string(),
                },
            ),
        ];
        let instances = generate_all(&notes);

        let queue = build_queue(&instances, &[], 100);
        let qids: Vec<_> = queue.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(qids, vec!["a#F", "b#F", "b#R"]);

        let queue = build_queue(&instances, &[progress("b", 103)], 100);
        let qids: Vec<_> = queue.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(qids, vec!["a#F"]);
    }

    #[test]
    fn test_queue_counts() {
        let cards = vec![note("a"), note("b"), note("c")];
        let counts = queue_counts(&cards, &[progress("a", 90), progress("b", 200)], 100);
        assert_eq!(counts, QueueCounts { due: 1, new: 1 });
    }

    #[test]
    fn test_progress_for_unknown_cards_is_ignored() {
        let cards = vec![note("a")];
        let queue = build_queue(&cards, &[progress("zzz", 1)], 100);
        assert_eq!(ids(&queue), vec!["a"]);
    }
}

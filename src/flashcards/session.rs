//! Screen state for study sessions and the settings form
//!
//! Each state type owns its data and changes only through `apply`, which may
//! hand back an effect for the caller to run against the stores. Events that
//! make no sense in the current phase are ignored.

use crate::settings::{ParentSettings, SettingsError, SettingsForm};

use super::answer::{is_correct, letter_diff, LetterMark};
use super::instance::generate_all;
use super::models::{CardInstance, Deck, Grade, NoteContent, ProgressRecord};
use super::queue::{build_queue, queue_counts};

// ==================== Learn ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// What was typed; `None` when the answer was only revealed
    pub user_answer: Option<String>,
    pub expected: String,
    pub correct: Option<bool>,
    pub diff: Vec<(char, LetterMark)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnPhase {
    Loading,
    NotFound,
    Question,
    Feedback(Feedback),
    Finished,
}

#[derive(Debug, Clone)]
pub enum LearnEvent {
    Loaded {
        deck: Deck,
        progress: Vec<ProgressRecord>,
        today_epoch_day: i64,
    },
    NotFound,
    Submitted { answer: String },
    Revealed,
    /// Explicit grade from the feedback screen
    Graded(Grade),
    /// Leave the feedback screen without choosing a grade
    Continue,
}

/// Writes the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnEffect {
    Grade {
        deck_id: String,
        note_id: String,
        grade: Grade,
    },
    RecordAnswer {
        deck_id: String,
        note_id: String,
        is_correct: bool,
    },
}

#[derive(Debug, Clone)]
pub struct LearnState {
    pub phase: LearnPhase,
    pub deck_id: String,
    pub deck_title: String,
    pub due_today: usize,
    pub new_cards: usize,
    queue: Vec<CardInstance>,
    index: usize,
}

impl Default for LearnState {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnState {
    pub fn new() -> Self {
        Self {
            phase: LearnPhase::Loading,
            deck_id: String::new(),
            deck_title: String::new(),
            due_today: 0,
            new_cards: 0,
            queue: Vec::new(),
            index: 0,
        }
    }

    pub fn current(&self) -> Option<&CardInstance> {
        match self.phase {
            LearnPhase::Question | LearnPhase::Feedback(_) => self.queue.get(self.index),
            _ => None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.index)
    }

    pub fn apply(&mut self, event: LearnEvent) -> Option<LearnEffect> {
        match event {
            LearnEvent::Loaded {
                deck,
                progress,
                today_epoch_day,
            } => {
                self.load(deck, &progress, today_epoch_day);
                None
            }
            LearnEvent::NotFound => {
                *self = Self::new();
                self.phase = LearnPhase::NotFound;
                None
            }
            LearnEvent::Submitted { answer } => {
                let card = self.question()?;
                let feedback = Feedback {
                    correct: Some(is_correct(&answer, &card.answer)),
                    diff: letter_diff(&answer, &card.answer),
                    expected: card.answer.clone(),
                    user_answer: Some(answer),
                };
                self.phase = LearnPhase::Feedback(feedback);
                None
            }
            LearnEvent::Revealed => {
                let card = self.question()?;
                let feedback = Feedback {
                    user_answer: None,
                    expected: card.answer.clone(),
                    correct: None,
                    diff: Vec::new(),
                };
                self.phase = LearnPhase::Feedback(feedback);
                None
            }
            LearnEvent::Graded(grade) => {
                let card = self.answered()?;
                let effect = LearnEffect::Grade {
                    deck_id: card.deck_id.clone(),
                    note_id: card.note_id.clone(),
                    grade,
                };
                self.advance();
                Some(effect)
            }
            LearnEvent::Continue => {
                let card = self.answered()?;
                let effect = match &self.phase {
                    LearnPhase::Feedback(Feedback {
                        correct: Some(correct),
                        ..
                    }) => Some(LearnEffect::RecordAnswer {
                        deck_id: card.deck_id.clone(),
                        note_id: card.note_id.clone(),
                        is_correct: *correct,
                    }),
                    _ => None,
                };
                self.advance();
                effect
            }
        }
    }

    fn load(&mut self, deck: Deck, progress: &[ProgressRecord], today_epoch_day: i64) {
        let counts = queue_counts(&deck.notes, progress, today_epoch_day);
        let instances = generate_all(&deck.notes);

        self.queue = build_queue(&instances, progress, today_epoch_day);
        self.index = 0;
        self.deck_id = deck.id;
        self.deck_title = deck.title;
        self.due_today = counts.due;
        self.new_cards = counts.new;
        self.phase = if self.queue.is_empty() {
            LearnPhase::Finished
        } else {
            LearnPhase::Question
        };
    }

    fn question(&self) -> Option<&CardInstance> {
        match self.phase {
            LearnPhase::Question => self.queue.get(self.index),
            _ => None,
        }
    }

    fn answered(&self) -> Option<&CardInstance> {
        match self.phase {
            LearnPhase::Feedback(_) => self.queue.get(self.index),
            _ => None,
        }
    }

    fn advance(&mut self) {
        self.index += 1;
        self.phase = if self.index < self.queue.len() {
            LearnPhase::Question
        } else {
            LearnPhase::Finished
        };
    }
}

// ==================== Browse ====================

/// Flip through every card of a deck without touching progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    pub deck_title: String,
    pub not_found: bool,
    pub finished: bool,
    index: usize,
    sides: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub enum BrowseEvent {
    Loaded(Deck),
    NotFound,
    Know,
    DontKnow,
    Restart,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Front and back of the card on screen
    pub fn current(&self) -> Option<(&str, &str)> {
        if self.finished {
            return None;
        }
        self.sides
            .get(self.index)
            .map(|(front, back)| (front.as_str(), back.as_str()))
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index, self.sides.len())
    }

    pub fn apply(&mut self, event: BrowseEvent) {
        match event {
            BrowseEvent::Loaded(deck) => {
                self.sides = deck.notes.iter().map(|n| browse_sides(&n.content)).collect();
                self.deck_title = deck.title;
                self.not_found = false;
                self.finished = false;
                self.index = 0;
            }
            BrowseEvent::NotFound => {
                *self = Self::new();
                self.not_found = true;
            }
            BrowseEvent::Know | BrowseEvent::DontKnow => {
                if self.not_found || self.finished || self.sides.is_empty() {
                    return;
                }
                self.index += 1;
                if self.index >= self.sides.len() {
                    self.index = self.sides.len();
                    self.finished = true;
                }
            }
            BrowseEvent::Restart => {
                if self.not_found {
                    return;
                }
                self.index = 0;
                self.finished = false;
            }
        }
    }
}

/// Cloze cards show the hidden word first and the sentence on the back
fn browse_sides(content: &NoteContent) -> (String, String) {
    match content {
        NoteContent::Cloze { text, answer, .. } => (answer.clone(), text.clone()),
        NoteContent::Basic { front, back }
        | NoteContent::BasicReversed { front, back }
        | NoteContent::BasicTyped { front, back } => (front.clone(), back.clone()),
    }
}

// ==================== Settings form ====================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsMessage {
    Saved,
    Invalid(String),
}

#[derive(Debug, Clone)]
pub enum SettingsEvent {
    /// Fresh values from the settings store
    Loaded(ParentSettings),
    AgainChanged(String),
    HardChanged(String),
    EasyChanged(String),
    Save,
    Saved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFormState {
    pub form: SettingsForm,
    pub message: Option<SettingsMessage>,
}

impl SettingsFormState {
    pub fn new(settings: &ParentSettings) -> Self {
        Self {
            form: SettingsForm::from_settings(settings),
            message: None,
        }
    }

    /// Returns the settings to persist on a valid save
    pub fn apply(&mut self, event: SettingsEvent) -> Option<ParentSettings> {
        match event {
            SettingsEvent::Loaded(settings) => {
                *self = Self::new(&settings);
                None
            }
            SettingsEvent::AgainChanged(v) => self.edit(|f| f.again_days = v),
            SettingsEvent::HardChanged(v) => self.edit(|f| f.hard_days = v),
            SettingsEvent::EasyChanged(v) => self.edit(|f| f.easy_days = v),
            SettingsEvent::Save => match self.form.parse() {
                Ok(settings) => {
                    self.message = None;
                    Some(settings)
                }
                Err(e) => {
                    self.message = Some(SettingsMessage::Invalid(invalid_message(&e)));
                    None
                }
            },
            SettingsEvent::Saved => {
                self.message = Some(SettingsMessage::Saved);
                None
            }
        }
    }

    fn edit(&mut self, f: impl FnOnce(&mut SettingsForm)) -> Option<ParentSettings> {
        f(&mut self.form);
        self.message = None;
        None
    }
}

fn invalid_message(err: &SettingsError) -> String {
    match err {
        SettingsError::NotAnInteger(_) => "Enter whole numbers".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::Note;

    fn note(id: &str, content: NoteContent) -> Note {
        Note::new(id, "deck", content)
    }

    fn test_deck() -> Deck {
        Deck {
            id: "deck".to_string(),
            title: "Test".to_string(),
            image_uri: None,
            built_in: false,
            notes: vec![
                note(
                    "A",
                    NoteContent::BasicTyped {
                        front: "cat".to_string(),
                        back: "кошка".to_string(),
                    },
                ),
                note(
                    "B",
                    NoteContent::BasicReversed {
                        front: "sun".to_string(),
                        back: "солнце".to_string(),
                    },
                ),
                note(
                    "C",
                    NoteContent::Cloze {
                        text: "The dog barks".to_string(),
                        answer: "dog".to_string(),
                        hint: None,
                    },
                ),
            ],
        }
    }

    fn loaded(progress: Vec<ProgressRecord>) -> LearnState {
        let mut state = LearnState::new();
        state.apply(LearnEvent::Loaded {
            deck: test_deck(),
            progress,
            today_epoch_day: 100,
        });
        state
    }

    #[test]
    fn test_learn_load_builds_queue() {
        let state = loaded(vec![]);
        assert_eq!(state.phase, LearnPhase::Question);
        assert_eq!(state.remaining(), 4);
        assert_eq!(state.new_cards, 3);
        assert_eq!(state.due_today, 0);
        assert_eq!(state.current().unwrap().instance_id, "A#F");
    }

    #[test]
    fn test_learn_skips_future_cards() {
        let progress = vec![ProgressRecord {
            card_id: "B".to_string(),
            deck_id: "deck".to_string(),
            due_epoch_day: 105,
            last_reviewed_epoch_day: Some(99),
            is_new: false,
        }];
        let mut state = loaded(progress);
        let mut ids = Vec::new();
        while let Some(card) = state.current() {
            ids.push(card.instance_id.clone());
            state.apply(LearnEvent::Revealed);
            state.apply(LearnEvent::Continue);
        }
        assert_eq!(ids, vec!["A#F", "C#C1"]);
        assert_eq!(state.phase, LearnPhase::Finished);
    }

    #[test]
    fn test_typed_answer_records_result() {
        let mut state = loaded(vec![]);
        assert!(state
            .apply(LearnEvent::Submitted {
                answer: " Кошка ".to_string()
            })
            .is_none());

        match &state.phase {
            LearnPhase::Feedback(feedback) => {
                assert_eq!(feedback.correct, Some(true));
                assert_eq!(feedback.expected, "кошка");
            }
            other => panic!("unexpected phase {:?}", other),
        }

        let effect = state.apply(LearnEvent::Continue);
        assert_eq!(
            effect,
            Some(LearnEffect::RecordAnswer {
                deck_id: "deck".to_string(),
                note_id: "A".to_string(),
                is_correct: true
            })
        );
        assert_eq!(state.current().unwrap().instance_id, "B#F");
    }

    #[test]
    fn test_explicit_grade_uses_note_id() {
        let mut state = loaded(vec![]);
        state.apply(LearnEvent::Revealed);
        state.apply(LearnEvent::Continue);

        // now on B#F
        state.apply(LearnEvent::Revealed);
        let effect = state.apply(LearnEvent::Graded(Grade::Hard));
        assert_eq!(
            effect,
            Some(LearnEffect::Grade {
                deck_id: "deck".to_string(),
                note_id: "B".to_string(),
                grade: Grade::Hard
            })
        );
        assert_eq!(state.current().unwrap().instance_id, "B#R");
    }

    #[test]
    fn test_out_of_phase_events_are_ignored() {
        let mut state = loaded(vec![]);
        assert!(state.apply(LearnEvent::Graded(Grade::Easy)).is_none());
        assert!(state.apply(LearnEvent::Continue).is_none());
        assert_eq!(state.current().unwrap().instance_id, "A#F");

        state.apply(LearnEvent::NotFound);
        assert_eq!(state.phase, LearnPhase::NotFound);
        assert!(state.current().is_none());
        assert!(state
            .apply(LearnEvent::Submitted {
                answer: "x".to_string()
            })
            .is_none());
    }

    #[test]
    fn test_browse_walks_and_restarts() {
        let mut state = BrowseState::new();
        state.apply(BrowseEvent::Loaded(test_deck()));
        assert_eq!(state.current(), Some(("cat", "кошка")));

        state.apply(BrowseEvent::Know);
        state.apply(BrowseEvent::DontKnow);
        assert_eq!(state.current(), Some(("dog", "The dog barks")));

        state.apply(BrowseEvent::Know);
        assert!(state.finished);
        assert_eq!(state.position(), (3, 3));
        assert!(state.current().is_none());

        state.apply(BrowseEvent::Know);
        assert_eq!(state.position(), (3, 3));

        state.apply(BrowseEvent::Restart);
        assert_eq!(state.current(), Some(("cat", "кошка")));
    }

    #[test]
    fn test_browse_empty_and_missing() {
        let mut state = BrowseState::new();
        let mut deck = test_deck();
        deck.notes.clear();
        state.apply(BrowseEvent::Loaded(deck));
        state.apply(BrowseEvent::Know);
        assert!(!state.finished);
        assert!(state.current().is_none());

        state.apply(BrowseEvent::NotFound);
        assert!(state.not_found);
        state.apply(BrowseEvent::Restart);
        assert!(state.not_found);
    }

    #[test]
    fn test_settings_form_validation() {
        let mut state = SettingsFormState::new(&ParentSettings::default());
        assert_eq!(state.form.hard_days, "1");

        state.apply(SettingsEvent::EasyChanged("abc".to_string()));
        assert!(state.apply(SettingsEvent::Save).is_none());
        assert_eq!(
            state.message,
            Some(SettingsMessage::Invalid("Enter whole numbers".to_string()))
        );

        state.apply(SettingsEvent::EasyChanged("-2".to_string()));
        assert!(state.message.is_none());
        assert!(state.apply(SettingsEvent::Save).is_none());
        assert!(matches!(state.message, Some(SettingsMessage::Invalid(_))));

        state.apply(SettingsEvent::EasyChanged("7".to_string()));
        let saved = state.apply(SettingsEvent::Save).unwrap();
        assert_eq!(saved.easy_days, 7);
        state.apply(SettingsEvent::Saved);
        assert_eq!(state.message, Some(SettingsMessage::Saved));
    }
}

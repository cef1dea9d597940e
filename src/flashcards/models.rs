//! Data models for the flashcard system

use serde::{Deserialize, Serialize};

/// Type of flashcard as authored by a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    /// Recognition only: look at the front, reveal the back, self-assess
    #[default]
    Basic,
    /// Front -> back and back -> front
    BasicReversed,
    /// Front -> back, the answer has to be typed
    BasicTyped,
    /// Fill-in-the-blank sentence
    Cloze,
}

impl CardType {
    /// Tag stored in the `user_cards.type` column
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::BasicReversed => "BASIC_REVERSED",
            Self::BasicTyped => "BASIC_TYPED",
            Self::Cloze => "CLOZE",
        }
    }

    /// Decode a stored type tag.
    ///
    /// Missing and unknown tags decode to [`CardType::Basic`]. Rows written by
    /// older or newer schema versions stay readable instead of failing the
    /// whole deck. Tags match exactly; `" CLOZE "` is unknown.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("BASIC") => Self::Basic,
            Some("BASIC_REVERSED") => Self::BasicReversed,
            Some("BASIC_TYPED") => Self::BasicTyped,
            Some("CLOZE") => Self::Cloze,
            None => Self::Basic,
            Some(other) => {
                log::warn!("Unknown card type tag {:?}, treating as BASIC", other);
                Self::Basic
            }
        }
    }

    /// Whether the learner has to type the answer for this type
    pub fn expects_typing(&self) -> bool {
        match self {
            Self::Basic | Self::BasicReversed => false,
            Self::BasicTyped | Self::Cloze => true,
        }
    }

    /// Human-readable label used by the CLI
    pub fn label(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::BasicReversed => "reversed",
            Self::BasicTyped => "typed",
            Self::Cloze => "cloze",
        }
    }
}

/// Authored content of a note, one variant per card type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NoteContent {
    Basic {
        front: String,
        back: String,
    },
    BasicReversed {
        front: String,
        back: String,
    },
    BasicTyped {
        front: String,
        back: String,
    },
    Cloze {
        text: String,
        answer: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
}

impl NoteContent {
    pub fn card_type(&self) -> CardType {
        match self {
            Self::Basic { .. } => CardType::Basic,
            Self::BasicReversed { .. } => CardType::BasicReversed,
            Self::BasicTyped { .. } => CardType::BasicTyped,
            Self::Cloze { .. } => CardType::Cloze,
        }
    }

    /// Same content with surrounding whitespace removed and a blank hint
    /// dropped
    pub fn trimmed(&self) -> Self {
        match self {
            Self::Basic { front, back } => Self::Basic {
                front: front.trim().to_string(),
                back: back.trim().to_string(),
            },
            Self::BasicReversed { front, back } => Self::BasicReversed {
                front: front.trim().to_string(),
                back: back.trim().to_string(),
            },
            Self::BasicTyped { front, back } => Self::BasicTyped {
                front: front.trim().to_string(),
                back: back.trim().to_string(),
            },
            Self::Cloze { text, answer, hint } => Self::Cloze {
                text: text.trim().to_string(),
                answer: answer.trim().to_string(),
                hint: hint
                    .as_deref()
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
            },
        }
    }

    /// Build content of the given type from loose authoring fields.
    ///
    /// Fields that do not belong to `card_type` are dropped.
    pub fn from_fields(
        card_type: CardType,
        front: &str,
        back: &str,
        cloze_text: Option<&str>,
        cloze_answer: Option<&str>,
        cloze_hint: Option<&str>,
    ) -> Self {
        let front = front.trim().to_string();
        let back = back.trim().to_string();
        match card_type {
            CardType::Basic => Self::Basic { front, back },
            CardType::BasicReversed => Self::BasicReversed { front, back },
            CardType::BasicTyped => Self::BasicTyped { front, back },
            CardType::Cloze => Self::Cloze {
                text: cloze_text.unwrap_or_default().trim().to_string(),
                answer: cloze_answer.unwrap_or_default().trim().to_string(),
                hint: cloze_hint
                    .map(str::trim)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
            },
        }
    }
}

/// An authored card as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub deck_id: String,
    pub content: NoteContent,
}

impl Note {
    pub fn new(id: impl Into<String>, deck_id: impl Into<String>, content: NoteContent) -> Self {
        Self {
            id: id.into(),
            deck_id: deck_id.into(),
            content,
        }
    }

    pub fn card_type(&self) -> CardType {
        self.content.card_type()
    }

    /// Decode a flat `user_cards` row.
    ///
    /// A CLOZE row whose sentence or answer is blank is read back as a BASIC
    /// note over its front/back columns.
    pub fn from_row(row: NoteRow) -> Self {
        let card_type = CardType::from_tag(row.card_type.as_deref());
        let content = match card_type {
            CardType::Basic => NoteContent::Basic {
                front: row.front,
                back: row.back,
            },
            CardType::BasicReversed => NoteContent::BasicReversed {
                front: row.front,
                back: row.back,
            },
            CardType::BasicTyped => NoteContent::BasicTyped {
                front: row.front,
                back: row.back,
            },
            CardType::Cloze => match (row.cloze_text, row.cloze_answer) {
                (Some(text), Some(answer)) if !text.trim().is_empty() && !answer.trim().is_empty() => {
                    NoteContent::Cloze {
                        text,
                        answer,
                        hint: row.cloze_hint.filter(|h| !h.trim().is_empty()),
                    }
                }
                _ => {
                    log::warn!("Cloze card {} has no cloze data, showing it as basic", row.id);
                    NoteContent::Basic {
                        front: row.front,
                        back: row.back,
                    }
                }
            },
        };

        Self {
            id: row.id,
            deck_id: row.deck_id,
            content,
        }
    }
}

/// Flat `user_cards` row with the legacy nullable column layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteRow {
    pub id: String,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub created_at_epoch_day: i64,
    pub card_type: Option<String>,
    pub cloze_text: Option<String>,
    pub cloze_answer: Option<String>,
    pub cloze_hint: Option<String>,
}

impl NoteRow {
    /// Flatten a note for storage; unused columns are left blank or NULL.
    pub fn from_note(note: &Note, created_at_epoch_day: i64) -> Self {
        let mut row = Self {
            id: note.id.clone(),
            deck_id: note.deck_id.clone(),
            created_at_epoch_day,
            card_type: Some(note.card_type().as_tag().to_string()),
            ..Default::default()
        };
        match &note.content {
            NoteContent::Basic { front, back }
            | NoteContent::BasicReversed { front, back }
            | NoteContent::BasicTyped { front, back } => {
                row.front = front.clone();
                row.back = back.clone();
            }
            NoteContent::Cloze { text, answer, hint } => {
                row.cloze_text = Some(text.clone());
                row.cloze_answer = Some(answer.clone());
                row.cloze_hint = hint.clone();
            }
        }
        row
    }
}

/// Card as shipped in a bundled deck file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCard {
    pub id: String,
    pub front: String,
    pub back: String,
}

/// A deck ready for study, built-in or user-created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub built_in: bool,
    pub notes: Vec<Note>,
}

/// `user_decks` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeck {
    pub id: String,
    pub title: String,
    pub created_at_epoch_day: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// Which side of a reversed pair is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

/// One question/answer pairing shown during study
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInstance {
    /// `{note}#F`, `{note}#R` or `{note}#C1`
    pub instance_id: String,
    /// Progress and stats are keyed by this id
    pub note_id: String,
    pub deck_id: String,
    pub card_type: CardType,
    pub question: String,
    pub answer: String,
    pub expects_typing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
}

/// Coarse difficulty judgment driving the next due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 3] = [Grade::Again, Grade::Hard, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Easy => "easy",
        }
    }
}

/// Review schedule of one card (keyed by note id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub card_id: String,
    pub deck_id: String,
    pub due_epoch_day: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_epoch_day: Option<i64>,
    pub is_new: bool,
}

impl ProgressRecord {
    pub fn is_due(&self, today_epoch_day: i64) -> bool {
        self.due_epoch_day <= today_epoch_day
    }
}

/// Answer statistics of one card (keyed by note id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub card_id: String,
    pub deck_id: String,
    pub correct_count: u32,
    pub wrong_count: u32,
    pub correct_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answered_epoch_day: Option<i64>,
}

impl StatsRecord {
    pub fn new(card_id: impl Into<String>, deck_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            deck_id: deck_id.into(),
            ..Default::default()
        }
    }

    /// Stats after one more answer. A wrong answer resets the streak.
    pub fn record_answer(&self, is_correct: bool, today_epoch_day: i64) -> Self {
        let mut next = self.clone();
        if is_correct {
            next.correct_count += 1;
            next.correct_streak += 1;
        } else {
            next.wrong_count += 1;
            next.correct_streak = 0;
        }
        next.last_answered_epoch_day = Some(today_epoch_day);
        next
    }
}

/// Per-deck counters shown on the deck list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub deck_id: String,
    pub title: String,
    pub built_in: bool,
    pub total_notes: usize,
    pub due_today: usize,
    pub new_cards: usize,
    pub reviewed_today: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(card_type: Option<&str>) -> NoteRow {
        NoteRow {
            id: "n1".to_string(),
            deck_id: "d1".to_string(),
            front: "cat".to_string(),
            back: "кот".to_string(),
            card_type: card_type.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_tag_decodes_as_basic() {
        assert_eq!(CardType::from_tag(Some("MULTIPLE_CHOICE")), CardType::Basic);
        assert_eq!(CardType::from_tag(None), CardType::Basic);
        assert_eq!(CardType::from_tag(Some("")), CardType::Basic);
        assert_eq!(CardType::from_tag(Some(" CLOZE ")), CardType::Basic);
        assert_eq!(CardType::from_tag(Some("cloze")), CardType::Basic);
        assert_eq!(CardType::from_tag(Some("BASIC_REVERSED")), CardType::BasicReversed);
    }

    #[test]
    fn test_tag_roundtrip() {
        for t in [CardType::Basic, CardType::BasicReversed, CardType::BasicTyped, CardType::Cloze] {
            assert_eq!(CardType::from_tag(Some(t.as_tag())), t);
        }
    }

    #[test]
    fn test_cloze_row_without_cloze_data_becomes_basic() {
        let mut r = row(Some("CLOZE"));
        r.cloze_text = Some("   ".to_string());
        r.cloze_answer = Some("cat".to_string());

        let note = Note::from_row(r);
        assert_eq!(
            note.content,
            NoteContent::Basic {
                front: "cat".to_string(),
                back: "кот".to_string()
            }
        );
    }

    #[test]
    fn test_cloze_row_keeps_fields_and_drops_blank_hint() {
        let mut r = row(Some("CLOZE"));
        r.front = String::new();
        r.back = String::new();
        r.cloze_text = Some("The cat sleeps".to_string());
        r.cloze_answer = Some("cat".to_string());
        r.cloze_hint = Some(" ".to_string());

        let note = Note::from_row(r);
        assert_eq!(
            note.content,
            NoteContent::Cloze {
                text: "The cat sleeps".to_string(),
                answer: "cat".to_string(),
                hint: None
            }
        );
    }

    #[test]
    fn test_note_row_leaves_unused_columns_empty() {
        let note = Note::new(
            "n1",
            "d1",
            NoteContent::Cloze {
                text: "I like milk".to_string(),
                answer: "milk".to_string(),
                hint: Some("drink".to_string()),
            },
        );
        let r = NoteRow::from_note(&note, 10);
        assert_eq!(r.front, "");
        assert_eq!(r.back, "");
        assert_eq!(r.card_type.as_deref(), Some("CLOZE"));
        assert_eq!(r.cloze_hint.as_deref(), Some("drink"));
        assert_eq!(Note::from_row(r), note);
    }

    #[test]
    fn test_from_fields_drops_foreign_fields() {
        let content = NoteContent::from_fields(
            CardType::BasicTyped,
            " dog ",
            " собака ",
            Some("ignored"),
            Some("ignored"),
            None,
        );
        assert_eq!(
            content,
            NoteContent::BasicTyped {
                front: "dog".to_string(),
                back: "собака".to_string()
            }
        );
    }

    #[test]
    fn test_stats_streak_resets_on_wrong_answer() {
        let stats = StatsRecord::new("n1", "d1")
            .record_answer(true, 5)
            .record_answer(true, 6);
        assert_eq!(stats.correct_streak, 2);

        let stats = stats.record_answer(false, 7);
        assert_eq!(stats.correct_streak, 0);
        assert_eq!(stats.correct_count, 2);
        assert_eq!(stats.wrong_count, 1);
        assert_eq!(stats.last_answered_epoch_day, Some(7));
    }
}

//! Validation of parent-authored decks and cards before they are stored

use thiserror::Error;

use super::instance::find_cloze_match;
use super::models::NoteContent;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("Front side is empty")]
    EmptyFront,

    #[error("Back side is empty")]
    EmptyBack,

    #[error("Cloze sentence is empty")]
    EmptyClozeText,

    #[error("Hidden word is empty")]
    EmptyClozeAnswer,

    #[error("Hidden word {answer:?} does not appear in the sentence")]
    ClozeAnswerNotInText { answer: String },

    #[error("Deck title is empty")]
    EmptyTitle,

    #[error("A deck needs at least one card")]
    NoCards,

    #[error("Card {index}: {source}")]
    InvalidCard {
        index: usize,
        #[source]
        source: Box<DraftError>,
    },
}

/// A deck being created together with its first cards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDeck {
    pub title: String,
    pub image_uri: Option<String>,
    pub cards: Vec<NoteContent>,
}

impl NewDeck {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.cards.is_empty() {
            return Err(DraftError::NoCards);
        }
        for (index, card) in self.cards.iter().enumerate() {
            validate_content(card).map_err(|e| DraftError::InvalidCard {
                index,
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

/// Check one card draft.
///
/// The cloze answer has to occur in the sentence (ignoring case); the study
/// side tolerates a missing match but authoring does not.
pub fn validate_content(content: &NoteContent) -> Result<(), DraftError> {
    match content {
        NoteContent::Basic { front, back }
        | NoteContent::BasicReversed { front, back }
        | NoteContent::BasicTyped { front, back } => {
            if front.trim().is_empty() {
                return Err(DraftError::EmptyFront);
            }
            if back.trim().is_empty() {
                return Err(DraftError::EmptyBack);
            }
        }
        NoteContent::Cloze { text, answer, .. } => {
            let text = text.trim();
            let answer = answer.trim();
            if text.is_empty() {
                return Err(DraftError::EmptyClozeText);
            }
            if answer.is_empty() {
                return Err(DraftError::EmptyClozeAnswer);
            }
            if find_cloze_match(text, answer).is_none() {
                return Err(DraftError::ClozeAnswerNotInText {
                    answer: answer.to_string(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(front: &str, back: &str) -> NoteContent {
        NoteContent::Basic {
            front: front.to_string(),
            back: back.to_string(),
        }
    }

    fn cloze(text: &str, answer: &str) -> NoteContent {
        NoteContent::Cloze {
            text: text.to_string(),
            answer: answer.to_string(),
            hint: None,
        }
    }

    #[test]
    fn test_basic_requires_both_sides() {
        assert_eq!(validate_content(&basic(" ", "b")), Err(DraftError::EmptyFront));
        assert_eq!(validate_content(&basic("a", "")), Err(DraftError::EmptyBack));
        assert_eq!(validate_content(&basic("a", "b")), Ok(()));
    }

    #[test]
    fn test_cloze_answer_must_be_in_text() {
        assert_eq!(validate_content(&cloze("", "x")), Err(DraftError::EmptyClozeText));
        assert_eq!(validate_content(&cloze("text", " ")), Err(DraftError::EmptyClozeAnswer));
        assert_eq!(
            validate_content(&cloze("The dog barks", "cat")),
            Err(DraftError::ClozeAnswerNotInText {
                answer: "cat".to_string()
            })
        );
        assert_eq!(validate_content(&cloze("The Dog barks", "dog")), Ok(()));
    }

    #[test]
    fn test_new_deck_validation() {
        let mut deck = NewDeck {
            title: "  ".to_string(),
            image_uri: None,
            cards: vec![basic("a", "b")],
        };
        assert_eq!(deck.validate(), Err(DraftError::EmptyTitle));

        deck.title = "Fruits".to_string();
        assert_eq!(deck.validate(), Ok(()));

        deck.cards.push(basic("c", ""));
        assert_eq!(
            deck.validate(),
            Err(DraftError::InvalidCard {
                index: 1,
                source: Box::new(DraftError::EmptyBack)
            })
        );

        deck.cards.clear();
        assert_eq!(deck.validate(), Err(DraftError::NoCards));
    }
}

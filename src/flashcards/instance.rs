//! Expansion of stored notes into study instances
//!
//! - BASIC: 1 instance (front -> back)
//! - BASIC_REVERSED: 2 instances (front -> back, back -> front)
//! - BASIC_TYPED: 1 instance (front -> back, typed)
//! - CLOZE: 1 instance (sentence with the answer blanked out)

use std::ops::Range;

use regex::RegexBuilder;

use super::models::{AssetCard, CardInstance, CardType, Direction, Note, NoteContent};

/// Placeholder used when a cloze card has no hint
pub const CLOZE_BLANK: &str = "[...]";

/// Generate all instances for a single note. Never empty.
pub fn generate(note: &Note) -> Vec<CardInstance> {
    match &note.content {
        NoteContent::Basic { front, back } => {
            vec![instance(note, "F", CardType::Basic, front, back, None)]
        }
        NoteContent::BasicReversed { front, back } => vec![
            instance(
                note,
                "F",
                CardType::BasicReversed,
                front,
                back,
                Some(Direction::Forward),
            ),
            instance(
                note,
                "R",
                CardType::BasicReversed,
                back,
                front,
                Some(Direction::Reverse),
            ),
        ],
        NoteContent::BasicTyped { front, back } => {
            vec![instance(note, "F", CardType::BasicTyped, front, back, None)]
        }
        NoteContent::Cloze { text, answer, hint } => {
            if text.trim().is_empty() || answer.trim().is_empty() {
                // Stored rows degrade in `Note::from_row`; this covers notes
                // built in memory, which have no front/back to fall back on.
                log::warn!("Cloze note {} is missing its sentence or answer", note.id);
                let question = if text.trim().is_empty() {
                    CLOZE_BLANK
                } else {
                    text.as_str()
                };
                return vec![instance(note, "F", CardType::Basic, question, answer, None)];
            }

            let placeholder = cloze_placeholder(hint.as_deref());
            let question = blank_out(text, answer, &placeholder);
            vec![instance(note, "C1", CardType::Cloze, &question, answer, None)]
        }
    }
}

/// Generate instances for every note, keeping note order.
pub fn generate_all(notes: &[Note]) -> Vec<CardInstance> {
    notes.iter().flat_map(generate).collect()
}

/// Built-in deck cards are always typed.
pub fn from_asset_card(card: &AssetCard, deck_id: &str) -> Note {
    Note::new(
        card.id.clone(),
        deck_id,
        NoteContent::BasicTyped {
            front: card.front.clone(),
            back: card.back.clone(),
        },
    )
}

/// `[hint]` when a non-blank hint is present, `[...]` otherwise
pub fn cloze_placeholder(hint: Option<&str>) -> String {
    match hint.map(str::trim) {
        Some(h) if !h.is_empty() => format!("[{}]", h),
        _ => CLOZE_BLANK.to_string(),
    }
}

/// Byte range of the first case-insensitive occurrence of `answer` in `text`
pub fn find_cloze_match(text: &str, answer: &str) -> Option<Range<usize>> {
    if answer.is_empty() {
        return None;
    }
    let re = RegexBuilder::new(&regex::escape(answer))
        .case_insensitive(true)
        .build()
        .ok()?;
    re.find(text).map(|m| m.range())
}

/// Replace the first case-insensitive occurrence of `answer` with
/// `placeholder`. The text is returned unchanged when there is no match.
pub fn blank_out(text: &str, answer: &str, placeholder: &str) -> String {
    match find_cloze_match(text, answer) {
        Some(range) => {
            let mut out = String::with_capacity(text.len() + placeholder.len());
            out.push_str(&text[..range.start]);
            out.push_str(placeholder);
            out.push_str(&text[range.end..]);
            out
        }
        None => text.to_string(),
    }
}

fn instance(
    note: &Note,
    suffix: &str,
    card_type: CardType,
    question: &str,
    answer: &str,
    direction: Option<Direction>,
) -> CardInstance {
    CardInstance {
        instance_id: format!("{}#{}", note.id, suffix),
        note_id: note.id.clone(),
        deck_id: note.deck_id.clone(),
        card_type,
        question: question.to_string(),
        answer: answer.to_string(),
        expects_typing: card_type.expects_typing(),
        direction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(id: &str, front: &str, back: &str) -> Note {
        Note::new(
            id,
            "deck",
            NoteContent::Basic {
                front: front.to_string(),
                back: back.to_string(),
            },
        )
    }

    fn cloze(text: &str, answer: &str, hint: Option<&str>) -> Note {
        Note::new(
            "c",
            "deck",
            NoteContent::Cloze {
                text: text.to_string(),
                answer: answer.to_string(),
                hint: hint.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_basic_yields_one_instance() {
        let out = generate(&basic("n1", "cat", "кот"));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].instance_id, "n1#F");
        assert_eq!(out[0].note_id, "n1");
        assert_eq!(out[0].question, "cat");
        assert_eq!(out[0].answer, "кот");
        assert!(!out[0].expects_typing);
        assert_eq!(out[0].direction, None);
    }

    #[test]
    fn test_reversed_yields_mirrored_pair() {
        let note = Note::new(
            "n2",
            "deck",
            NoteContent::BasicReversed {
                front: "dog".to_string(),
                back: "собака".to_string(),
            },
        );
        let out = generate(&note);
        assert_eq!(out.len(), 2);

        assert_eq!(out[0].instance_id, "n2#F");
        assert_eq!(out[0].question, "dog");
        assert_eq!(out[0].answer, "собака");
        assert_eq!(out[0].direction, Some(Direction::Forward));

        assert_eq!(out[1].instance_id, "n2#R");
        assert_eq!(out[1].question, "собака");
        assert_eq!(out[1].answer, "dog");
        assert_eq!(out[1].direction, Some(Direction::Reverse));

        assert!(out.iter().all(|i| i.note_id == "n2"));
    }

    #[test]
    fn test_typed_expects_typing() {
        let note = Note::new(
            "n3",
            "deck",
            NoteContent::BasicTyped {
                front: "milk".to_string(),
                back: "молоко".to_string(),
            },
        );
        let out = generate(&note);
        assert_eq!(out.len(), 1);
        assert!(out[0].expects_typing);
        assert_eq!(out[0].card_type, CardType::BasicTyped);
    }

    #[test]
    fn test_cloze_replaces_first_match_case_insensitively() {
        let out = generate(&cloze("Paris is nice. I love paris.", "PARIS", None));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].instance_id, "c#C1");
        assert_eq!(out[0].question, "[...] is nice. I love paris.");
        assert_eq!(out[0].answer, "PARIS");
        assert!(out[0].expects_typing);
        assert_eq!(out[0].card_type, CardType::Cloze);
    }

    #[test]
    fn test_cloze_uses_hint_placeholder() {
        let out = generate(&cloze("Я пью Молоко утром", "молоко", Some("напиток")));
        assert_eq!(out[0].question, "Я пью [напиток] утром");
        assert_eq!(out[0].answer, "молоко");
    }

    #[test]
    fn test_cloze_question_reconstructs_sentence() {
        let text = "The Cat sat on the cat mat";
        let answer = "cat";
        let out = generate(&cloze(text, answer, None));
        let range = find_cloze_match(text, answer).unwrap();
        let rebuilt = out[0].question.replacen(CLOZE_BLANK, &text[range], 1);
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_cloze_answer_missing_keeps_sentence() {
        let out = generate(&cloze("The sun is hot", "moon", Some("sky")));
        assert_eq!(out[0].question, "The sun is hot");
        assert_eq!(out[0].answer, "moon");
        assert_eq!(out[0].card_type, CardType::Cloze);
    }

    #[test]
    fn test_cloze_blank_data_falls_back_to_basic() {
        let out = generate(&cloze("", "cat", None));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].card_type, CardType::Basic);
        assert!(!out[0].expects_typing);
        assert_eq!(out[0].instance_id, "c#F");
        assert_eq!(out[0].question, CLOZE_BLANK);
        assert_eq!(out[0].answer, "cat");

        let out = generate(&cloze("The cat sleeps", "  ", None));
        assert_eq!(out[0].question, "The cat sleeps");
        assert!(!out[0].question.is_empty());
    }

    #[test]
    fn test_typing_follows_card_type() {
        let notes = vec![
            basic("a", "sun", "солнце"),
            cloze("The sun is hot", "sun", None),
            from_asset_card(
                &AssetCard {
                    id: "x".to_string(),
                    front: "cat".to_string(),
                    back: "кошка".to_string(),
                },
                "animals",
            ),
        ];
        for card in generate_all(&notes) {
            assert_eq!(card.expects_typing, card.card_type.expects_typing());
        }
    }

    #[test]
    fn test_cloze_answer_with_regex_metacharacters() {
        assert_eq!(blank_out("2+2 = 4", "2+2", "[?]"), "[?] = 4");
        assert_eq!(blank_out("a.b", "(", "[x]"), "a.b");
    }

    #[test]
    fn test_generate_all_concatenates_in_note_order() {
        let notes = vec![
            basic("a", "sun", "солнце"),
            Note::new(
                "b",
                "deck",
                NoteContent::BasicReversed {
                    front: "moon".to_string(),
                    back: "луна".to_string(),
                },
            ),
            basic("c", "star", "звезда"),
        ];
        let ids: Vec<_> = generate_all(&notes)
            .into_iter()
            .map(|i| i.instance_id)
            .collect();
        assert_eq!(ids, vec!["a#F", "b#F", "b#R", "c#F"]);
    }

    #[test]
    fn test_asset_card_is_typed() {
        let card = AssetCard {
            id: "animals_1".to_string(),
            front: "cat".to_string(),
            back: "кошка".to_string(),
        };
        let note = from_asset_card(&card, "animals");
        assert_eq!(note.card_type(), CardType::BasicTyped);
        assert_eq!(note.deck_id, "animals");
    }
}

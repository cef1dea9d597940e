use anyhow::{bail, Context, Result};

use vocabecho_lib::flashcards::{instance, CardType, Note, NoteContent};

use crate::app::App;
use crate::render::terminal;
use crate::{CardFields, CardTypeArg, OutputFormat};

impl CardFields {
    /// Card content from the flags. Missing fields become empty strings and
    /// are rejected by authoring validation.
    fn to_content(&self) -> NoteContent {
        let card_type = match self.card_type {
            CardTypeArg::Basic => CardType::Basic,
            CardTypeArg::Reversed => CardType::BasicReversed,
            CardTypeArg::Typed => CardType::BasicTyped,
            CardTypeArg::Cloze => CardType::Cloze,
        };
        NoteContent::from_fields(
            card_type,
            self.front.as_deref().unwrap_or_default(),
            self.back.as_deref().unwrap_or_default(),
            self.text.as_deref(),
            self.answer.as_deref(),
            self.hint.as_deref(),
        )
    }
}

pub fn run_add(
    app: &App,
    deck_query: &str,
    fields: &CardFields,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_user_deck(deck_query)?;
    let note = app
        .storage
        .add_note(&deck.id, fields.to_content(), app.today())
        .context("Failed to add card")?
        .with_context(|| format!("Deck '{}' no longer exists", deck.title))?;

    print_note("Added", &note, format, use_color)
}

pub fn run_edit(
    app: &App,
    deck_query: &str,
    card_query: &str,
    fields: &CardFields,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_user_deck(deck_query)?;
    let note_id = app.find_note(&deck, card_query)?.id.clone();
    let updated = app
        .storage
        .update_note(&deck.id, &note_id, fields.to_content())
        .context("Failed to update card")?;
    if !updated {
        bail!("Card '{}' no longer exists", note_id);
    }

    let note = app
        .storage
        .get_note(&deck.id, &note_id)?
        .with_context(|| format!("Card '{}' no longer exists", note_id))?;
    print_note("Updated", &note, format, use_color)
}

pub fn run_delete(
    app: &App,
    deck_query: &str,
    card_query: &str,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let deck = app.find_user_deck(deck_query)?;
    let note_id = app.find_note(&deck, card_query)?.id.clone();
    let deleted = app
        .storage
        .delete_note(&deck.id, &note_id)
        .context("Failed to delete card")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": note_id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if deleted {
                println!("Deleted card {}", note_id);
            } else {
                println!("Card {} was already gone", note_id);
            }
        }
    }

    Ok(())
}

fn print_note(verb: &str, note: &Note, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": note.id,
                "deckId": note.deck_id,
                "content": note.content,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} {} card {}", verb, note.card_type().label(), note.id);
            for card in instance::generate(note) {
                println!("{}", terminal::render_instance_line(&card, use_color));
            }
        }
    }
    Ok(())
}

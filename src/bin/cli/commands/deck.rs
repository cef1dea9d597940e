use anyhow::{bail, Context, Result};

use vocabecho_lib::flashcards::authoring::NewDeck;
use vocabecho_lib::flashcards::{DeckSource, NoteContent};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_create(
    app: &App,
    title: &str,
    image_uri: Option<&str>,
    card_args: &[String],
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = card_args
        .iter()
        .map(|arg| parse_card_arg(arg))
        .collect::<Result<Vec<_>>>()?;
    let draft = NewDeck {
        title: title.to_string(),
        image_uri: image_uri.map(str::to_string),
        cards,
    };

    let deck_id = app
        .storage
        .create_deck_with_cards(&draft, app.today())
        .context("Failed to create deck")?;
    let deck = app
        .storage
        .load_deck(&deck_id)?
        .context("Deck disappeared after creation")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id,
                "title": deck.title,
                "imageUri": deck.image_uri,
                "cards": deck.notes.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Created deck \"{}\" with {} cards",
                terminal::bold(&deck.title, use_color),
                deck.notes.len()
            );
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, deck_query: &str, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let deck = app.find_user_deck(deck_query)?;
    let deleted = app
        .storage
        .delete_deck(&deck.id)
        .context("Failed to delete deck")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": deck.id, "deleted": deleted });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if deleted {
                println!("Deleted deck \"{}\"", deck.title);
            } else {
                println!("Deck \"{}\" was already gone", deck.title);
            }
        }
    }

    Ok(())
}

/// Parse `[type:]front=back`. Cloze cards use `cloze:sentence=word[=hint]`.
fn parse_card_arg(arg: &str) -> Result<NoteContent> {
    let (kind, rest) = match arg.split_once(':') {
        Some((kind, rest)) if is_card_kind(kind) => (kind.trim().to_lowercase(), rest),
        _ => ("basic".to_string(), arg),
    };

    let parts: Vec<&str> = rest.split('=').collect();
    let pair = |parts: &[&str]| -> Result<(String, String)> {
        match parts {
            [front, back] => Ok((front.to_string(), back.to_string())),
            _ => bail!("Card '{}' should look like front=back", arg),
        }
    };

    let content = match kind.as_str() {
        "basic" => {
            let (front, back) = pair(parts.as_slice())?;
            NoteContent::Basic { front, back }
        }
        "reversed" => {
            let (front, back) = pair(parts.as_slice())?;
            NoteContent::BasicReversed { front, back }
        }
        "typed" => {
            let (front, back) = pair(parts.as_slice())?;
            NoteContent::BasicTyped { front, back }
        }
        _ => match parts.as_slice() {
            [text, answer] => NoteContent::Cloze {
                text: text.to_string(),
                answer: answer.to_string(),
                hint: None,
            },
            [text, answer, hint] => NoteContent::Cloze {
                text: text.to_string(),
                answer: answer.to_string(),
                hint: Some(hint.to_string()),
            },
            _ => bail!("Cloze card '{}' should look like cloze:sentence=word[=hint]", arg),
        },
    };
    Ok(content)
}

fn is_card_kind(kind: &str) -> bool {
    matches!(
        kind.trim().to_lowercase().as_str(),
        "basic" | "reversed" | "typed" | "cloze"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card_arg_defaults_to_basic() {
        assert_eq!(
            parse_card_arg("cat=кошка").unwrap(),
            NoteContent::Basic {
                front: "cat".to_string(),
                back: "кошка".to_string()
            }
        );
        // a colon that is not a type prefix stays in the text
        assert_eq!(
            parse_card_arg("time: noon=полдень").unwrap(),
            NoteContent::Basic {
                front: "time: noon".to_string(),
                back: "полдень".to_string()
            }
        );
    }

    #[test]
    fn test_parse_card_arg_types() {
        assert!(matches!(
            parse_card_arg("reversed:sun=солнце").unwrap(),
            NoteContent::BasicReversed { .. }
        ));
        assert!(matches!(
            parse_card_arg("Typed:sun=солнце").unwrap(),
            NoteContent::BasicTyped { .. }
        ));
        assert_eq!(
            parse_card_arg("cloze:The dog barks=dog=animal").unwrap(),
            NoteContent::Cloze {
                text: "The dog barks".to_string(),
                answer: "dog".to_string(),
                hint: Some("animal".to_string())
            }
        );
    }

    #[test]
    fn test_parse_card_arg_rejects_malformed() {
        assert!(parse_card_arg("no separator").is_err());
        assert!(parse_card_arg("a=b=c").is_err());
        assert!(parse_card_arg("cloze:just text").is_err());
    }
}

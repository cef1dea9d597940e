use anyhow::Result;

use vocabecho_lib::flashcards::instance;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, deck_query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_query)?;

    match format {
        OutputFormat::Json => {
            let notes: Vec<_> = deck
                .notes
                .iter()
                .map(|note| {
                    serde_json::json!({
                        "id": note.id,
                        "content": note.content,
                        "instances": instance::generate(note),
                    })
                })
                .collect();
            let output = serde_json::json!({
                "id": deck.id,
                "title": deck.title,
                "builtIn": deck.built_in,
                "notes": notes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::bold(&deck.title, use_color));
            if deck.notes.is_empty() {
                println!("  (no cards)");
            }
            for note in &deck.notes {
                for card in instance::generate(note) {
                    println!("{}", terminal::render_instance_line(&card, use_color));
                }
            }
        }
    }

    Ok(())
}

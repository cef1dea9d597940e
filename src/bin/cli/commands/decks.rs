use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;
    let mut summaries = Vec::with_capacity(decks.len());
    for deck in &decks {
        summaries.push(app.summarize(deck)?);
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = decks
                .iter()
                .zip(&summaries)
                .map(|(deck, summary)| {
                    serde_json::json!({
                        "id": deck.id,
                        "title": deck.title,
                        "imageUri": deck.image_uri,
                        "builtIn": deck.built_in,
                        "cards": summary.total_notes,
                        "dueToday": summary.due_today,
                        "new": summary.new_cards,
                        "reviewedToday": summary.reviewed_today,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
                return Ok(());
            }
            for summary in &summaries {
                let kind = if summary.built_in { "built-in" } else { "user" };
                println!(
                    "{}  {}",
                    terminal::bold(&summary.title, use_color),
                    terminal::dim(&format!("({}, {})", summary.deck_id, kind), use_color)
                );
                println!(
                    "    {} cards, {} due, {} new, {} reviewed today",
                    summary.total_notes, summary.due_today, summary.new_cards, summary.reviewed_today
                );
            }
        }
    }

    Ok(())
}

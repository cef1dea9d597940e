use anyhow::Result;

use vocabecho_lib::flashcards::queue::queue_counts;
use vocabecho_lib::time::from_epoch_day;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, deck_query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let queue = app.study_queue(&deck)?;
    let progress = app.progress_for_deck(&deck)?;
    let counts = queue_counts(&deck.notes, &progress, app.today());

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deckId": deck.id,
                "today": app.today(),
                "date": from_epoch_day(app.today()).map(|d| d.to_string()),
                "dueToday": counts.due,
                "new": counts.new,
                "queue": queue,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{}  {}",
                terminal::bold(&deck.title, use_color),
                terminal::dim(
                    &format!("{} due, {} new", counts.due, counts.new),
                    use_color
                )
            );
            if queue.is_empty() {
                println!("  Nothing to study today.");
            }
            for card in &queue {
                let typing = if card.expects_typing { " ⌨" } else { "" };
                println!(
                    "  {}  {}{}",
                    terminal::dim(&card.instance_id, use_color),
                    card.question,
                    typing
                );
            }
        }
    }

    Ok(())
}

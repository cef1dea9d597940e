use anyhow::{Context, Result};

use vocabecho_lib::flashcards::algorithm::format_interval;
use vocabecho_lib::flashcards::answer::{is_correct, letter_diff};
use vocabecho_lib::flashcards::{instance, CardInstance, Deck, Grade, ProgressRecord};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::{GradeArg, OutputFormat};

impl From<GradeArg> for Grade {
    fn from(arg: GradeArg) -> Self {
        match arg {
            GradeArg::Again => Grade::Again,
            GradeArg::Hard => Grade::Hard,
            GradeArg::Easy => Grade::Easy,
        }
    }
}

pub fn run_grade(
    app: &App,
    deck_query: &str,
    card_query: &str,
    grade: GradeArg,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let note = app.find_note(&deck, card_query)?;
    let grade = Grade::from(grade);
    let record = app.grade(&deck.id, &note.id, grade)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "cardId": note.id,
                "grade": grade,
                "progress": record,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Graded {} as {}; {}",
                note.id,
                terminal::bold(grade.as_str(), use_color),
                due_text(app, &record)
            );
        }
    }

    Ok(())
}

pub fn run_answer(
    app: &App,
    deck_query: &str,
    card_query: &str,
    typed: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let card = find_instance(app, &deck, card_query)?;
    let correct = is_correct(typed, &card.answer);
    let outcome = app.record_answer(&deck.id, &card.note_id, correct)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "instanceId": card.instance_id,
                "correct": correct,
                "expected": card.answer,
                "grade": outcome.grade,
                "stats": outcome.stats,
                "progress": outcome.progress,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", card.question);
            println!("{}", terminal::render_letter_diff(&letter_diff(typed, &card.answer), use_color));
            if correct {
                println!("{}", terminal::paint("Correct!", Color::GREEN, use_color));
            } else {
                println!(
                    "{} The answer is: {}",
                    terminal::paint("Not quite.", Color::RED, use_color),
                    terminal::bold(&card.answer, use_color)
                );
            }
            println!(
                "Streak {} ({} right, {} wrong); graded {}; {}",
                outcome.stats.correct_streak,
                outcome.stats.correct_count,
                outcome.stats.wrong_count,
                outcome.grade.as_str(),
                due_text(app, &outcome.progress)
            );
        }
    }

    Ok(())
}

/// The exact instance when an instance id is given, otherwise the note's first
fn find_instance(app: &App, deck: &Deck, query: &str) -> Result<CardInstance> {
    let note = app.find_note(deck, query)?;
    let instances = instance::generate(note);
    if query.contains('#') {
        return instances
            .into_iter()
            .find(|i| i.instance_id == query)
            .with_context(|| format!("No card instance '{}'", query));
    }
    instances
        .into_iter()
        .next()
        .with_context(|| format!("Card '{}' has nothing to study", query))
}

fn due_text(app: &App, record: &ProgressRecord) -> String {
    let offset = record.due_epoch_day - app.today();
    let days = u32::try_from(offset).unwrap_or(0);
    if days == 0 {
        "due again today".to_string()
    } else {
        format!("next review in {}", format_interval(days))
    }
}

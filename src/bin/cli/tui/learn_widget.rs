use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use vocabecho_lib::flashcards::algorithm::format_interval;
use vocabecho_lib::flashcards::answer::LetterMark;
use vocabecho_lib::flashcards::session::{Feedback, LearnPhase};
use vocabecho_lib::flashcards::Grade;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let learn = &state.learn;
    let block = Block::default()
        .title(format!(
            " {}  {} due · {} new · {} left ",
            learn.deck_title,
            learn.due_today,
            learn.new_cards,
            learn.remaining()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match &learn.phase {
        LearnPhase::Loading => vec![Line::from("Loading...")],
        LearnPhase::NotFound => vec![dim_line("Deck not found.")],
        LearnPhase::Finished => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  All done for today!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
        ],
        LearnPhase::Question => question_lines(state),
        LearnPhase::Feedback(feedback) => {
            let mut lines = question_lines(state);
            lines.push(Line::from(""));
            lines.extend(feedback_lines(feedback, state.intervals));
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn question_lines(state: &TuiState) -> Vec<Line<'static>> {
    let Some(card) = state.learn.current() else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", card.question),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if matches!(state.learn.phase, LearnPhase::Question) {
        if card.expects_typing {
            lines.push(Line::from(format!("  > {}█", state.input_text)));
        } else {
            lines.push(dim_line("  Press Enter to show the answer"));
        }
    }
    lines
}

fn feedback_lines(feedback: &Feedback, intervals: [u32; 3]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(typed) = &feedback.user_answer {
        let spans: Vec<Span> = std::iter::once(Span::raw("  "))
            .chain(feedback.diff.iter().map(|(ch, mark)| {
                let color = match mark {
                    LetterMark::Match => Color::Green,
                    LetterMark::Mismatch => Color::Red,
                    LetterMark::Space => Color::Reset,
                };
                Span::styled(ch.to_string(), Style::default().fg(color))
            }))
            .collect();
        if typed.trim().is_empty() {
            lines.push(dim_line("  (no answer)"));
        } else {
            lines.push(Line::from(spans));
        }
    }

    let verdict = match feedback.correct {
        Some(true) => Span::styled("  Correct!", Style::default().fg(Color::Green)),
        Some(false) => Span::styled("  Not quite.", Style::default().fg(Color::Red)),
        None => Span::raw(""),
    };
    lines.push(Line::from(vec![
        verdict,
        Span::raw("  Answer: "),
        Span::styled(
            feedback.expected.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));

    lines.push(Line::from(""));
    let hints: Vec<String> = Grade::ALL
        .iter()
        .zip(intervals)
        .enumerate()
        .map(|(i, (grade, days))| format!("{}: {} ({})", i + 1, grade.as_str(), format_interval(days)))
        .collect();
    lines.push(dim_line(&format!("  {}", hints.join("   "))));
    lines
}

fn dim_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use vocabecho_lib::flashcards::session::SettingsMessage;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Review intervals (days) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let form = &state.settings_form.form;
    let fields = [
        ("Again", &form.again_days),
        ("Hard", &form.hard_days),
        ("Easy", &form.easy_days),
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, value)) in fields.iter().enumerate() {
        let focused = i == state.settings_field;
        let cursor = if focused { "█" } else { "" };
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<6} ", label)),
            Span::styled(format!("{}{}", value, cursor), style),
        ]));
    }

    lines.push(Line::from(""));
    match &state.settings_form.message {
        Some(SettingsMessage::Saved) => lines.push(Line::from(Span::styled(
            "  Saved",
            Style::default().fg(Color::Green),
        ))),
        Some(SettingsMessage::Invalid(msg)) => lines.push(Line::from(Span::styled(
            format!("  {}", msg),
            Style::default().fg(Color::Red),
        ))),
        None => {}
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

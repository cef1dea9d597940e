use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let browse = &state.browse;
    let (index, total) = browse.position();

    let block = Block::default()
        .title(format!(" {}  {}/{} ", browse.deck_title, (index + 1).min(total), total))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    if browse.not_found {
        lines.push(Line::from("  Deck not found."));
    } else if browse.finished {
        lines.push(Line::from(Span::styled(
            "  End of deck. r to start over.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    } else if let Some((front, back)) = browse.current() {
        lines.push(Line::from(Span::styled(
            format!("  {}", front),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        if state.browse_flipped {
            lines.push(Line::from(format!("  {}", back)));
        } else {
            lines.push(Line::from(Span::styled(
                "  ???",
                Style::default().fg(Color::DarkGray),
            )));
        }
    } else {
        lines.push(Line::from("  (no cards)"));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Red).fg(Color::White));
        f.render_widget(flash, area);
        return;
    }

    let hints = match state.mode {
        Mode::Decks => " j/k: navigate  Enter: learn  b: browse  s: settings  r: refresh  q: quit ",
        Mode::Learn if state.in_feedback() => {
            " 1/2/3: again/hard/easy  Enter: continue  Esc: decks "
        }
        Mode::Learn => " Type the answer  Enter: check  Esc: decks ",
        Mode::Browse => " Space: flip  k: know  d: don't know  r: restart  q: decks ",
        Mode::Settings => " Tab: next field  Enter: save  Esc: decks ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}

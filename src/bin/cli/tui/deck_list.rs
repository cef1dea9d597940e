use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use vocabecho_lib::time::from_epoch_day;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let today = state.app.today();
    let date = from_epoch_day(today).map_or_else(|| format!("day {}", today), |d| d.to_string());
    let block = Block::default()
        .title(format!(" Decks · {} ", date))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = state
        .decks
        .iter()
        .map(|deck| {
            let title_style = if deck.built_in {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            };
            let due_style = if deck.due_today + deck.new_cards > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            ListItem::new(Line::from(vec![
                Span::styled(deck.title.clone(), title_style),
                Span::raw("  "),
                Span::styled(
                    format!("{} due  {} new", deck.due_today, deck.new_cards),
                    due_style,
                ),
                Span::styled(
                    format!("  {} cards, {} reviewed today", deck.total_notes, deck.reviewed_today),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.deck_selected));

    f.render_stateful_widget(list, area, &mut list_state);
}

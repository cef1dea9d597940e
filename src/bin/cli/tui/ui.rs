use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;

use super::app_state::{Mode, TuiState};
use super::{browse_widget, deck_list, learn_widget, settings_widget, status_bar};

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();

    // Main layout: screen + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(size);

    match state.mode {
        Mode::Decks => deck_list::draw(f, outer[0], state),
        Mode::Learn => learn_widget::draw(f, outer[0], state),
        Mode::Browse => browse_widget::draw(f, outer[0], state),
        Mode::Settings => settings_widget::draw(f, outer[0], state),
    }
    status_bar::draw(f, outer[1], state);
}

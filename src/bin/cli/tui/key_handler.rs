use crossterm::event::{KeyCode, KeyEvent};

use vocabecho_lib::flashcards::session::{BrowseEvent, LearnPhase};
use vocabecho_lib::flashcards::Grade;

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::Decks => handle_decks_key(state, key),
        Mode::Learn => handle_learn_key(state, key),
        Mode::Browse => handle_browse_key(state, key),
        Mode::Settings => handle_settings_key(state, key),
    }
}

fn handle_decks_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.deck_move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.deck_move_up(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => state.open_learn(),
        KeyCode::Char('b') => state.open_browse(),
        KeyCode::Char('s') => state.open_settings(),
        KeyCode::Char('r') => {
            if let Err(e) = state.refresh_decks() {
                state.flash_message = Some(format!("Error: {}", e));
            }
        }
        _ => {}
    }
}

fn handle_learn_key(state: &mut TuiState, key: KeyEvent) {
    if key.code == KeyCode::Esc {
        state.back_to_decks();
        return;
    }

    if state.in_feedback() {
        match key.code {
            KeyCode::Char('1') => state.grade(Grade::Again),
            KeyCode::Char('2') => state.grade(Grade::Hard),
            KeyCode::Char('3') => state.grade(Grade::Easy),
            KeyCode::Enter | KeyCode::Char(' ') => state.continue_learning(),
            _ => {}
        }
        return;
    }

    match state.learn.phase {
        LearnPhase::Question => {
            let typing = state.learn.current().map_or(false, |c| c.expects_typing);
            match key.code {
                KeyCode::Enter => state.submit_answer(),
                KeyCode::Backspace if typing => {
                    state.input_text.pop();
                }
                KeyCode::Char(c) if typing => state.input_text.push(c),
                KeyCode::Char(' ') => state.submit_answer(),
                _ => {}
            }
        }
        _ => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char('q')) {
                state.back_to_decks();
            }
        }
    }
}

fn handle_browse_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => state.back_to_decks(),
        KeyCode::Char(' ') | KeyCode::Enter => state.browse_flipped = !state.browse_flipped,
        KeyCode::Char('k') => state.browse_key(BrowseEvent::Know),
        KeyCode::Char('d') => state.browse_key(BrowseEvent::DontKnow),
        KeyCode::Char('r') => state.browse_key(BrowseEvent::Restart),
        _ => {}
    }
}

fn handle_settings_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.back_to_decks(),
        KeyCode::Tab | KeyCode::Down => state.settings_next_field(),
        KeyCode::Up => {
            state.settings_field = (state.settings_field + 2) % 3;
        }
        KeyCode::Enter => state.save_settings(),
        KeyCode::Backspace => state.settings_edit(|v| {
            v.pop();
        }),
        KeyCode::Char(c) => state.settings_edit(|v| v.push(c)),
        _ => {}
    }
}

use anyhow::Result;
use tokio::sync::watch;

use vocabecho_lib::flashcards::algorithm::preview_intervals;
use vocabecho_lib::flashcards::session::{
    BrowseEvent, BrowseState, LearnEvent, LearnPhase, LearnState, SettingsEvent, SettingsFormState,
};
use vocabecho_lib::flashcards::{DeckSummary, Grade};
use vocabecho_lib::settings::ParentSettings;

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Decks,
    Learn,
    Browse,
    Settings,
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    // Deck list
    pub decks: Vec<DeckSummary>,
    pub deck_selected: usize,

    // Study screens
    pub learn: LearnState,
    pub browse: BrowseState,
    pub browse_flipped: bool,
    pub input_text: String,

    // Settings form
    pub settings_form: SettingsFormState,
    pub settings_field: usize,
    settings_rx: watch::Receiver<ParentSettings>,

    /// AGAIN / HARD / EASY offsets shown on the grade hints
    pub intervals: [u32; 3],
    pub flash_message: Option<String>,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Result<Self> {
        let settings_rx = app.settings.subscribe();
        let current = app.parent_settings();
        let mut state = Self {
            app,
            mode: Mode::Decks,
            decks: Vec::new(),
            deck_selected: 0,
            learn: LearnState::new(),
            browse: BrowseState::new(),
            browse_flipped: false,
            input_text: String::new(),
            settings_form: SettingsFormState::new(&current),
            settings_field: 0,
            settings_rx,
            intervals: preview_intervals(&current),
            flash_message: None,
            quit: false,
        };

        state.refresh_decks()?;
        Ok(state)
    }

    pub fn refresh_decks(&mut self) -> Result<()> {
        let mut summaries = Vec::new();
        for deck in self.app.list_decks()? {
            summaries.push(self.app.summarize(&deck)?);
        }
        self.decks = summaries;
        if self.deck_selected >= self.decks.len() {
            self.deck_selected = self.decks.len().saturating_sub(1);
        }
        Ok(())
    }

    pub fn deck_move_down(&mut self) {
        if self.deck_selected + 1 < self.decks.len() {
            self.deck_selected += 1;
        }
    }

    pub fn deck_move_up(&mut self) {
        self.deck_selected = self.deck_selected.saturating_sub(1);
    }

    fn selected_deck_id(&self) -> Option<String> {
        self.decks.get(self.deck_selected).map(|d| d.deck_id.clone())
    }

    /// Start a learn session on the selected deck
    pub fn open_learn(&mut self) {
        let Some(deck_id) = self.selected_deck_id() else {
            return;
        };
        self.learn = LearnState::new();
        self.input_text.clear();

        let event = match self.app.find_deck(&deck_id) {
            Ok(deck) => match self.app.progress_for_deck(&deck) {
                Ok(progress) => LearnEvent::Loaded {
                    deck,
                    progress,
                    today_epoch_day: self.app.today(),
                },
                Err(e) => {
                    self.flash_message = Some(format!("Error: {}", e));
                    return;
                }
            },
            Err(_) => LearnEvent::NotFound,
        };
        self.learn.apply(event);
        self.mode = Mode::Learn;
    }

    /// Flip through the selected deck
    pub fn open_browse(&mut self) {
        let Some(deck_id) = self.selected_deck_id() else {
            return;
        };
        self.browse = BrowseState::new();
        self.browse_flipped = false;

        let event = match self.app.find_deck(&deck_id) {
            Ok(deck) => BrowseEvent::Loaded(deck),
            Err(_) => BrowseEvent::NotFound,
        };
        self.browse.apply(event);
        self.mode = Mode::Browse;
    }

    pub fn back_to_decks(&mut self) {
        self.mode = Mode::Decks;
        self.input_text.clear();
        if let Err(e) = self.refresh_decks() {
            self.flash_message = Some(format!("Error: {}", e));
        }
    }

    /// Check the typed answer, or reveal the back of an untyped card
    pub fn submit_answer(&mut self) {
        let typing = match self.learn.current() {
            Some(card) => card.expects_typing,
            None => return,
        };
        if typing {
            let answer = std::mem::take(&mut self.input_text);
            self.learn.apply(LearnEvent::Submitted { answer });
        } else {
            self.learn.apply(LearnEvent::Revealed);
        }
    }

    pub fn grade(&mut self, grade: Grade) {
        self.send_learn(LearnEvent::Graded(grade));
    }

    pub fn continue_learning(&mut self) {
        self.send_learn(LearnEvent::Continue);
    }

    fn send_learn(&mut self, event: LearnEvent) {
        if let Some(effect) = self.learn.apply(event) {
            if let Err(e) = self.app.apply_effect(effect) {
                self.flash_message = Some(format!("Error: {}", e));
            }
        }
    }

    pub fn in_feedback(&self) -> bool {
        matches!(self.learn.phase, LearnPhase::Feedback(_))
    }

    pub fn browse_key(&mut self, event: BrowseEvent) {
        if matches!(event, BrowseEvent::Know | BrowseEvent::DontKnow) && !self.browse_flipped {
            self.browse_flipped = true;
            return;
        }
        self.browse.apply(event);
        self.browse_flipped = false;
    }

    /// Pick up settings saved since the last frame
    pub fn poll_settings(&mut self) {
        if !self.settings_rx.has_changed().unwrap_or(false) {
            return;
        }
        let settings = *self.settings_rx.borrow_and_update();
        self.intervals = preview_intervals(&settings);
        self.settings_form.apply(SettingsEvent::Loaded(settings));
    }

    pub fn open_settings(&mut self) {
        self.settings_form = SettingsFormState::new(&self.app.parent_settings());
        self.settings_field = 0;
        self.mode = Mode::Settings;
    }

    pub fn settings_next_field(&mut self) {
        self.settings_field = (self.settings_field + 1) % 3;
    }

    /// Replace the focused field with `edit` applied to its text
    pub fn settings_edit(&mut self, edit: impl FnOnce(&mut String)) {
        let form = &self.settings_form.form;
        let mut value = match self.settings_field {
            0 => form.again_days.clone(),
            1 => form.hard_days.clone(),
            _ => form.easy_days.clone(),
        };
        edit(&mut value);
        let event = match self.settings_field {
            0 => SettingsEvent::AgainChanged(value),
            1 => SettingsEvent::HardChanged(value),
            _ => SettingsEvent::EasyChanged(value),
        };
        self.settings_form.apply(event);
    }

    pub fn save_settings(&mut self) {
        let Some(settings) = self.settings_form.apply(SettingsEvent::Save) else {
            return;
        };
        match self.app.settings.update(settings) {
            Ok(()) => {
                self.settings_form.apply(SettingsEvent::Saved);
            }
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }
    }
}

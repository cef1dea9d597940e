use std::io::{self, BufRead, Write};

use anyhow::Result;

use vocabecho_lib::flashcards::session::{BrowseEvent, BrowseState};

use crate::app::App;
use crate::render::terminal;

/// Line-based flip-through of a deck. Progress is not recorded.
pub fn run(app: &App, deck_query: &str, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let title = deck.title.clone();
    let mut state = BrowseState::new();
    state.apply(BrowseEvent::Loaded(deck));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("{}", terminal::bold(&title, use_color));

    loop {
        let Some((front, back)) = state.current() else {
            if state.position().1 == 0 {
                println!("(no cards)");
                return Ok(());
            }
            print!("Done! [r]estart or [q]uit: ");
            io::stdout().flush()?;
            match lines.next().transpose()?.as_deref().map(str::trim) {
                Some("r") => {
                    state.apply(BrowseEvent::Restart);
                    continue;
                }
                _ => return Ok(()),
            }
        };
        let (index, total) = state.position();

        println!();
        println!("{} {}", terminal::dim(&format!("{}/{}", index + 1, total), use_color), front);
        print!("  (Enter to flip) ");
        io::stdout().flush()?;
        if lines.next().transpose()?.is_none() {
            return Ok(());
        }
        println!("  {}", terminal::bold(back, use_color));

        print!("  [k]now / [d]on't know / [q]uit: ");
        io::stdout().flush()?;
        let event = match lines.next().transpose()?.as_deref().map(str::trim) {
            None | Some("q") => return Ok(()),
            Some("k") => BrowseEvent::Know,
            Some(_) => BrowseEvent::DontKnow,
        };
        state.apply(event);
    }
}

mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vocabecho-cli", about = "VocabEcho flashcards CLI and TUI", version)]
struct Cli {
    /// Data directory (default: platform local data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Pretend today is this epoch day
    #[arg(long, global = true)]
    today: Option<i64>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum GradeArg {
    Again,
    Hard,
    Easy,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum CardTypeArg {
    #[default]
    Basic,
    Reversed,
    Typed,
    Cloze,
}

#[derive(Subcommand)]
enum Command {
    /// List built-in and user decks with today's counts
    Decks,

    /// List the cards of a deck
    Show {
        /// Deck id or title (case-insensitive prefix match)
        deck: String,
    },

    /// Print today's study queue for a deck
    Queue {
        /// Deck id or title
        deck: String,
    },

    /// Grade a card explicitly
    Grade {
        /// Deck id or title
        deck: String,
        /// Card id (an instance id such as `cat#F` also works)
        card: String,
        grade: GradeArg,
    },

    /// Check a typed answer and grade the card from the result
    Answer {
        /// Deck id or title
        deck: String,
        /// Card id
        card: String,
        /// The answer as typed
        text: String,
    },

    /// Flip through a deck without recording progress
    Browse {
        /// Deck id or title
        deck: String,
    },

    /// Create or delete user decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Add, edit or delete cards in a user deck
    #[command(subcommand)]
    Card(CardCommand),

    /// Review interval settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a deck with its first cards
    Create {
        title: String,
        /// Cover image URI
        #[arg(long)]
        image: Option<String>,
        /// Card as `[type:]front=back`; cloze cards take `cloze:sentence=word[=hint]`
        #[arg(long = "card", required = true)]
        cards: Vec<String>,
    },

    /// Delete a user deck with all its cards and progress
    Delete {
        /// Deck id or title
        deck: String,
    },
}

#[derive(clap::Args)]
pub struct CardFields {
    /// Card type
    #[arg(long = "type", value_enum, default_value_t = CardTypeArg::Basic)]
    pub card_type: CardTypeArg,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
    /// Cloze sentence
    #[arg(long)]
    pub text: Option<String>,
    /// Hidden word of a cloze card
    #[arg(long)]
    pub answer: Option<String>,
    /// Shown in place of the hidden word
    #[arg(long)]
    pub hint: Option<String>,
}

#[derive(Subcommand)]
enum CardCommand {
    /// Append a card to a user deck
    Add {
        deck: String,
        #[command(flatten)]
        fields: CardFields,
    },

    /// Replace a card's content
    Edit {
        deck: String,
        card: String,
        #[command(flatten)]
        fields: CardFields,
    },

    /// Delete a card and its progress
    Delete { deck: String, card: String },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the current day offsets
    Show,

    /// Set the AGAIN, HARD and EASY day offsets
    Set {
        again: String,
        hard: String,
        easy: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let open_app = || app::App::new(cli.data_dir.as_deref(), cli.today);

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(open_app()?)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Decks) => {
            commands::decks::run(&open_app()?, &cli.format, use_color)?;
        }
        Some(Command::Show { ref deck }) => {
            commands::show::run(&open_app()?, deck, &cli.format, use_color)?;
        }
        Some(Command::Queue { ref deck }) => {
            commands::queue::run(&open_app()?, deck, &cli.format, use_color)?;
        }
        Some(Command::Grade { ref deck, ref card, grade }) => {
            commands::review::run_grade(&open_app()?, deck, card, grade, &cli.format, use_color)?;
        }
        Some(Command::Answer { ref deck, ref card, ref text }) => {
            commands::review::run_answer(&open_app()?, deck, card, text, &cli.format, use_color)?;
        }
        Some(Command::Browse { ref deck }) => {
            commands::browse::run(&open_app()?, deck, use_color)?;
        }
        Some(Command::Deck(ref subcmd)) => {
            let app = open_app()?;
            match subcmd {
                DeckCommand::Create { title, image, cards } => {
                    commands::deck::run_create(
                        &app,
                        title,
                        image.as_deref(),
                        cards,
                        &cli.format,
                        use_color,
                    )?;
                }
                DeckCommand::Delete { deck } => {
                    commands::deck::run_delete(&app, deck, &cli.format, use_color)?;
                }
            }
        }
        Some(Command::Card(ref subcmd)) => {
            let app = open_app()?;
            match subcmd {
                CardCommand::Add { deck, fields } => {
                    commands::card::run_add(&app, deck, fields, &cli.format, use_color)?;
                }
                CardCommand::Edit { deck, card, fields } => {
                    commands::card::run_edit(&app, deck, card, fields, &cli.format, use_color)?;
                }
                CardCommand::Delete { deck, card } => {
                    commands::card::run_delete(&app, deck, card, &cli.format, use_color)?;
                }
            }
        }
        Some(Command::Settings(ref subcmd)) => {
            let app = open_app()?;
            match subcmd {
                SettingsCommand::Show => {
                    commands::settings::run_show(&app, &cli.format, use_color)?;
                }
                SettingsCommand::Set { again, hard, easy } => {
                    commands::settings::run_set(&app, again, hard, easy, &cli.format, use_color)?;
                }
            }
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(open_app()?)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}

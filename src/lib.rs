pub mod flashcards;
pub mod settings;
pub mod time;

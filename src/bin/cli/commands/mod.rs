pub mod browse;
pub mod card;
pub mod deck;
pub mod decks;
pub mod queue;
pub mod review;
pub mod settings;
pub mod show;

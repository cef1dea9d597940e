//! Where decks come from
//!
//! Built-in decks ship inside the binary as JSON; user decks live in SQLite.
//! [`CombinedDeckSource`] puts the two behind one lookup.

use serde::Deserialize;
use thiserror::Error;

use super::instance::from_asset_card;
use super::models::{AssetCard, Deck};
use super::storage::{FlashcardStorage, FlashcardStorageError};

#[derive(Error, Debug)]
pub enum DeckSourceError {
    #[error("Storage error: {0}")]
    Storage(#[from] FlashcardStorageError),

    #[error("Invalid deck file {file}: {source}")]
    InvalidAsset {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, DeckSourceError>;

pub trait DeckSource {
    /// `None` when no deck has this id
    fn load_deck(&self, deck_id: &str) -> Result<Option<Deck>>;

    fn load_all_decks(&self) -> Result<Vec<Deck>>;
}

// ==================== Built-in decks ====================

/// Bundled deck files, in listing order
const BUILT_IN_DECKS: &[(&str, &str, &str)] = &[
    (
        "animals",
        "animals.json",
        include_str!("../../assets/decks/animals.json"),
    ),
    ("food", "food.json", include_str!("../../assets/decks/food.json")),
    (
        "transport",
        "transport.json",
        include_str!("../../assets/decks/transport.json"),
    ),
    ("home", "home.json", include_str!("../../assets/decks/home.json")),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetDeck {
    id: String,
    title: String,
    #[serde(default)]
    image_uri: Option<String>,
    cards: Vec<AssetCard>,
}

/// Decks compiled into the binary. Every card asks for a typed answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetDeckSource;

impl AssetDeckSource {
    pub fn new() -> Self {
        Self
    }

    /// Reserved ids that always resolve to a bundled deck
    pub fn is_built_in(deck_id: &str) -> bool {
        BUILT_IN_DECKS.iter().any(|(id, _, _)| *id == deck_id)
    }

    fn parse(file: &'static str, json: &str) -> Result<Deck> {
        let raw: AssetDeck = serde_json::from_str(json)
            .map_err(|source| DeckSourceError::InvalidAsset { file, source })?;
        let notes = raw
            .cards
            .iter()
            .map(|card| from_asset_card(card, &raw.id))
            .collect();

        Ok(Deck {
            id: raw.id,
            title: raw.title,
            image_uri: raw.image_uri,
            built_in: true,
            notes,
        })
    }
}

impl DeckSource for AssetDeckSource {
    fn load_deck(&self, deck_id: &str) -> Result<Option<Deck>> {
        match BUILT_IN_DECKS.iter().find(|(id, _, _)| *id == deck_id) {
            Some((_, file, json)) => Ok(Some(Self::parse(file, json)?)),
            None => Ok(None),
        }
    }

    fn load_all_decks(&self) -> Result<Vec<Deck>> {
        BUILT_IN_DECKS
            .iter()
            .map(|(_, file, json)| Self::parse(file, json))
            .collect()
    }
}

// ==================== User decks ====================

impl DeckSource for FlashcardStorage {
    fn load_deck(&self, deck_id: &str) -> Result<Option<Deck>> {
        let Some(deck) = self.get_deck(deck_id)? else {
            return Ok(None);
        };
        let notes = self.list_notes(&deck.id)?;

        Ok(Some(Deck {
            id: deck.id,
            title: deck.title,
            image_uri: deck.image_uri,
            built_in: false,
            notes,
        }))
    }

    fn load_all_decks(&self) -> Result<Vec<Deck>> {
        let mut decks = Vec::new();
        for deck in self.list_decks()? {
            let notes = self.list_notes(&deck.id)?;
            decks.push(Deck {
                id: deck.id,
                title: deck.title,
                image_uri: deck.image_uri,
                built_in: false,
                notes,
            });
        }
        Ok(decks)
    }
}

// ==================== Combined ====================

/// Built-in decks first, then user decks
pub struct CombinedDeckSource<'a, A, U> {
    assets: &'a A,
    user: &'a U,
}

impl<'a, A: DeckSource, U: DeckSource> CombinedDeckSource<'a, A, U> {
    pub fn new(assets: &'a A, user: &'a U) -> Self {
        Self { assets, user }
    }
}

impl<A: DeckSource, U: DeckSource> DeckSource for CombinedDeckSource<'_, A, U> {
    fn load_deck(&self, deck_id: &str) -> Result<Option<Deck>> {
        if AssetDeckSource::is_built_in(deck_id) {
            return self.assets.load_deck(deck_id);
        }
        self.user.load_deck(deck_id)
    }

    fn load_all_decks(&self) -> Result<Vec<Deck>> {
        let mut decks = self.assets.load_all_decks()?;
        decks.extend(self.user.load_all_decks()?);
        Ok(decks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::authoring::NewDeck;
    use crate::flashcards::models::{CardType, NoteContent};

    fn create_test_storage() -> FlashcardStorage {
        FlashcardStorage::open_in_memory().unwrap()
    }

    fn user_deck(storage: &FlashcardStorage, title: &str, day: i64) -> String {
        let draft = NewDeck {
            title: title.to_string(),
            image_uri: None,
            cards: vec![NoteContent::Basic {
                front: "sun".to_string(),
                back: "солнце".to_string(),
            }],
        };
        storage.create_deck_with_cards(&draft, day).unwrap()
    }

    #[test]
    fn test_built_in_decks_parse() {
        let decks = AssetDeckSource.load_all_decks().unwrap();
        let ids: Vec<_> = decks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["animals", "food", "transport", "home"]);

        for deck in &decks {
            assert!(deck.built_in);
            assert!(!deck.notes.is_empty());
            assert!(deck
                .notes
                .iter()
                .all(|n| n.card_type() == CardType::BasicTyped && n.deck_id == deck.id));
        }
    }

    #[test]
    fn test_asset_lookup() {
        assert!(AssetDeckSource::is_built_in("food"));
        assert!(!AssetDeckSource::is_built_in("Food"));
        assert!(AssetDeckSource.load_deck("home").unwrap().is_some());
        assert!(AssetDeckSource.load_deck("space").unwrap().is_none());
    }

    #[test]
    fn test_user_deck_source() {
        let storage = create_test_storage();
        let id = user_deck(&storage, "Weather", 5);

        let deck = storage.load_deck(&id).unwrap().unwrap();
        assert_eq!(deck.title, "Weather");
        assert!(!deck.built_in);
        assert_eq!(deck.notes.len(), 1);
        assert!(storage.load_deck("missing").unwrap().is_none());
    }

    #[test]
    fn test_combined_lists_built_in_then_user() {
        let storage = create_test_storage();
        let older = user_deck(&storage, "Older", 1);
        let newer = user_deck(&storage, "Newer", 2);
        let assets = AssetDeckSource::new();
        let combined = CombinedDeckSource::new(&assets, &storage);

        let ids: Vec<_> = combined
            .load_all_decks()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "animals".to_string(),
                "food".to_string(),
                "transport".to_string(),
                "home".to_string(),
                newer.clone(),
                older
            ]
        );

        assert!(combined.load_deck("animals").unwrap().unwrap().built_in);
        assert_eq!(combined.load_deck(&newer).unwrap().unwrap().title, "Newer");
        assert!(combined.load_deck("nope").unwrap().is_none());
    }
}

//! Card definition registry.
//!
//! Definitions are registered once and *cloned* into zones when a card
//! enters a duel; the engine never hands out references into the registry.
//! Decks arrive from the persistence layer as ordered lists of card ids
//! and are resolved here into fresh instances.

pub mod definitions;

pub use definitions::starter_categories;

use std::collections::HashMap;

use crate::card::Card;
use crate::ids::CardId;

/// Flat registry of card definitions, keyed by definition id.
#[derive(Debug, Clone, Default)]
pub struct CardRegistry {
    cards: HashMap<CardId, Card>,
}

impl CardRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry populated with the starter set.
    pub fn with_starter_cards() -> Self {
        let mut registry = Self::new();
        registry.register(definitions::ember_drake().into());
        registry.register(definitions::tide_caller().into());
        registry.register(definitions::stone_warden().into());
        registry.register(definitions::gale_harpy().into());
        registry.register(definitions::lumen_paladin().into());
        registry.register(definitions::grave_shade().into());
        registry.register(definitions::dragons_roost().into());
        registry.register(definitions::ancient_banner().into());
        registry.register(definitions::creeping_mire().into());
        registry.register(definitions::scroll_of_renewal().into());
        registry.register(definitions::blessing_of_might().into());
        registry.register(definitions::sear_the_gates().into());
        registry.register(definitions::rite_of_return().into());
        registry.register(definitions::sudden_squall().into());
        registry
    }

    /// Register a definition. A later registration with the same id
    /// replaces the earlier one.
    pub fn register(&mut self, card: Card) {
        self.cards.insert(card.id(), card);
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Linear scan by display name, first match.
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.cards.values().find(|card| card.name() == name)
    }

    /// Clone a fresh instance of the definition for play.
    pub fn instantiate(&self, id: CardId) -> Option<Card> {
        self.cards.get(&id).cloned()
    }

    /// Resolve an ordered deck list into card instances. Unknown ids are
    /// logged and skipped rather than failing the whole deck.
    pub fn resolve_deck(&self, deck: &[CardId]) -> Vec<Card> {
        let mut cards = Vec::with_capacity(deck.len());
        for &id in deck {
            match self.instantiate(id) {
                Some(card) => cards.push(card),
                None => log::warn!("deck references unknown card id {:?}; skipped", id),
            }
        }
        cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

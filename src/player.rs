//! Per-player zone container and life total.
//!
//! Zones: hand (ordered, capped), deck (ordered, draw-from-top), graveyard
//! (ordered, append-only as far as the engine is concerned), character
//! field (at most 5 concurrent characters) and exactly 3 fixed field-card
//! slots. The container does not persist itself and does not talk to the
//! presentation layer; callers refresh the UI after any mutating call.

use crate::card::{Card, CharacterCard, FieldCard};
use crate::ids::PlayerId;

/// Maximum number of cards a hand may hold.
pub const MAX_HAND_SIZE: usize = 7;
/// Maximum number of characters concurrently on the field.
pub const MAX_FIELD_CHARACTERS: usize = 5;
/// Number of fixed field-card slots.
pub const FIELD_SLOT_COUNT: usize = 3;
/// Life total each player starts with.
pub const STARTING_LIFE: i32 = 8000;

/// Complete per-player duel state.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub life: i32,

    pub hand: Vec<Card>,
    /// Draw-from-top deck; the top is the end of the vector.
    pub deck: Vec<Card>,
    pub graveyard: Vec<Card>,
    /// Characters in play. Order carries no rules meaning.
    pub field: Vec<CharacterCard>,
    /// The 3 fixed field-card positions.
    pub field_slots: [Option<FieldCard>; FIELD_SLOT_COUNT],
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            life: STARTING_LIFE,
            hand: Vec::new(),
            deck: Vec::new(),
            graveyard: Vec::new(),
            field: Vec::new(),
            field_slots: [None, None, None],
        }
    }

    /// Draws up to `count` cards from the deck top into the hand. Stops at
    /// an empty deck or a full hand. Returns the number actually drawn.
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            if self.hand.len() >= MAX_HAND_SIZE {
                break;
            }
            match self.deck.pop() {
                Some(card) => {
                    self.hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Shuffles the deck in place.
    pub fn shuffle_deck(&mut self) {
        use rand::seq::SliceRandom;
        self.deck.shuffle(&mut rand::rng());
    }

    /// Discards up to `count` random cards from the hand to the graveyard.
    /// Returns the number discarded.
    pub fn discard_random(&mut self, count: usize) -> usize {
        use rand::Rng;
        let mut rng = rand::rng();
        let mut discarded = 0;
        for _ in 0..count {
            if self.hand.is_empty() {
                break;
            }
            let index = rng.random_range(0..self.hand.len());
            let mut card = self.hand.remove(index);
            card.leave_play();
            self.graveyard.push(card);
            discarded += 1;
        }
        discarded
    }

    /// True if another character fits on the field.
    pub fn can_field_character(&self) -> bool {
        self.field.len() < MAX_FIELD_CHARACTERS
    }

    pub fn hand_is_full(&self) -> bool {
        self.hand.len() >= MAX_HAND_SIZE
    }

    /// Subtracts life. Returns the new total (may go negative; defeat is
    /// checked by the duel state, not here).
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.life -= amount.max(0);
        self.life
    }

    pub fn gain_life(&mut self, amount: i32) {
        self.life += amount.max(0);
    }

    pub fn is_defeated(&self) -> bool {
        self.life <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CharacterCard;
    use crate::element::Element;
    use crate::ids::CardId;

    fn scout(id: u32) -> Card {
        CharacterCard::new(CardId::from_raw(id), "Scout", 1, Element::Wind, 300, 300).into()
    }

    #[test]
    fn test_draw_from_top() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        player.deck.push(scout(1));
        player.deck.push(scout(2));
        player.deck.push(scout(3));

        let drawn = player.draw(2);
        assert_eq!(drawn, 2);
        assert_eq!(player.hand.len(), 2);
        // The top of the deck is the end of the vector.
        assert_eq!(player.hand[0].id(), CardId::from_raw(3));
        assert_eq!(player.hand[1].id(), CardId::from_raw(2));
    }

    #[test]
    fn test_draw_stops_at_empty_deck() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        player.deck.push(scout(1));
        assert_eq!(player.draw(5), 1);
        assert!(player.deck.is_empty());
    }

    #[test]
    fn test_draw_stops_at_full_hand() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        for i in 0..10 {
            player.deck.push(scout(i));
        }
        assert_eq!(player.draw(10), MAX_HAND_SIZE);
        assert!(player.hand_is_full());
        assert_eq!(player.deck.len(), 10 - MAX_HAND_SIZE);
    }

    #[test]
    fn test_discard_random_moves_to_graveyard() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        player.hand.push(scout(1));
        player.hand.push(scout(2));

        assert_eq!(player.discard_random(3), 2);
        assert!(player.hand.is_empty());
        assert_eq!(player.graveyard.len(), 2);
    }

    #[test]
    fn test_life_and_defeat() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        assert_eq!(player.life, STARTING_LIFE);

        player.take_damage(500);
        assert_eq!(player.life, STARTING_LIFE - 500);
        player.gain_life(300);
        assert_eq!(player.life, STARTING_LIFE - 200);
        assert!(!player.is_defeated());

        player.take_damage(STARTING_LIFE);
        assert!(player.is_defeated());

        // Negative amounts are ignored rather than healing through damage.
        let life = player.life;
        player.take_damage(-100);
        assert_eq!(player.life, life);
    }

    #[test]
    fn test_field_capacity() {
        let mut player = Player::new(PlayerId::from_index(0), "Aria");
        for i in 0..MAX_FIELD_CHARACTERS {
            assert!(player.can_field_character());
            player.field.push(
                CharacterCard::new(CardId::from_raw(i as u32), "C", 1, Element::Fire, 100, 100),
            );
        }
        assert!(!player.can_field_character());
    }
}

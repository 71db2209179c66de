use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Global counter for auto-incrementing card definition IDs (starts at 1, 0 is reserved).
static CARD_ID_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Card definition identifier, references static card data.
///
/// Stable and globally unique per card *definition*, not per instance:
/// every instance cloned into a zone shares its definition's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID with auto-incrementing counter.
    pub fn new() -> Self {
        Self(CARD_ID_COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    /// Create a card ID from a specific value (for when you need explicit control).
    pub fn from_raw(id: u32) -> Self {
        Self(id)
    }
}

/// Player identifier, index-based for efficiency.
///
/// A duel has exactly two players, index 0 and index 1. Engine operations
/// take player handles rather than player references, so card instances
/// never hold pointers back into player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a player ID from a specific index.
    pub fn from_index(index: u8) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player in a two-player duel.
    pub fn opponent(self) -> Self {
        Self(self.0 ^ 1)
    }
}

/// Category identifier: a short id string, generated once and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CategoryId(pub String);

/// Length of generated category ids.
const CATEGORY_ID_LEN: usize = 8;

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random 8-character alphanumeric id.
    ///
    /// Not collision-proof beyond practical randomness; uniqueness is
    /// enforced by the registry at creation time only.
    pub fn generate() -> Self {
        use rand::Rng;
        use rand::distr::Alphanumeric;

        let id: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(CATEGORY_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_auto_increment() {
        let c1 = CardId::new();
        let c2 = CardId::new();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_card_id_from_raw() {
        let c = CardId::from_raw(42);
        assert_eq!(c.0, 42);
    }

    #[test]
    fn test_player_id_opponent() {
        let p0 = PlayerId::from_index(0);
        let p1 = PlayerId::from_index(1);
        assert_eq!(p0.opponent(), p1);
        assert_eq!(p1.opponent(), p0);
        assert_eq!(p0.index(), 0);
    }

    #[test]
    fn test_category_id_generation() {
        let id = CategoryId::generate();
        assert_eq!(id.as_str().len(), 8);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generated_ids_differ() {
        // 62^8 possibilities make a collision in two draws effectively impossible.
        let a = CategoryId::generate();
        let b = CategoryId::generate();
        assert_ne!(a, b);
    }
}

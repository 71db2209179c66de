#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Elemental affinity of a character card.
///
/// Field cards filter their targets by element; `Neutral` characters carry
/// no affinity but are still matched when a filter lists them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Light,
    Dark,
    Neutral,
}

impl Element {
    /// All seven elements, in display order.
    pub const ALL: [Element; 7] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Wind,
        Element::Light,
        Element::Dark,
        Element::Neutral,
    ];

    pub fn is_neutral(self) -> bool {
        matches!(self, Element::Neutral)
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Wind => "Wind",
            Element::Light => "Light",
            Element::Dark => "Dark",
            Element::Neutral => "Neutral",
        }
    }
}

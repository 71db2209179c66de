//! The card effect vocabulary.
//!
//! Effects are a closed, tagged variant set; the lifecycle protocol filters
//! them by `EffectKind` once, centrally, instead of re-testing concrete
//! types at every call site. Each effect applies against the duel state
//! given the owner and opponent handles; the boost and cost-reduction kinds
//! additionally support a symmetric removal.
//!
//! Applying an effect yields an `EffectResult`. Failure variants never
//! propagate as errors: the lifecycle protocol records them and moves on to
//! the next effect in the list.

use crate::card::Card;
use crate::ids::{CategoryId, PlayerId};
use crate::notify::NotificationKind;
use crate::state::DuelState;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Discriminant tag for the effect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum EffectKind {
    StatModifier,
    CategoryBoost,
    CategoryCostReduction,
    CategorySearch,
    CategoryGraveyard,
    Destruction,
    Removal,
}

/// What happened when a single effect ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectResult {
    /// The effect resolved.
    Resolved,
    /// The effect resolved and touched this many cards/characters.
    Count(i32),
    /// The effect was filtered out for this trigger and never ran.
    Skipped,
    /// The effect ran but nothing it needed was available (no matching
    /// card, full hand, ...).
    Impossible,
}

impl EffectResult {
    pub fn is_success(&self) -> bool {
        matches!(self, EffectResult::Resolved | EffectResult::Count(_))
    }
}

/// Per-effect record returned by every lifecycle hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectOutcome {
    pub kind: EffectKind,
    pub name: &'static str,
    pub result: EffectResult,
}

impl EffectOutcome {
    pub fn new(effect: &Effect, result: EffectResult) -> Self {
        Self {
            kind: effect.kind(),
            name: effect.name(),
            result,
        }
    }
}

/// A card effect.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Effect {
    /// Permanent stat bonus to every character on the owner's field.
    StatModifier { attack: i32, defense: i32 },
    /// Permanent stat bonus to the owner's characters holding a category.
    /// Reversible.
    CategoryBoost {
        category: CategoryId,
        attack: i32,
        defense: i32,
    },
    /// Cost reduction for matching character cards in the owner's hand.
    /// Reversible.
    CategoryCostReduction { category: CategoryId, amount: i32 },
    /// Move the first matching character card from the deck to the hand.
    CategorySearch { category: CategoryId },
    /// Recover the first matching character card from the graveyard.
    CategoryGraveyard { category: CategoryId },
    /// When the bearer is destroyed, the opposing player takes damage.
    Destruction { damage: i32 },
    /// When the bearing field card is removed, the owner draws cards.
    Removal { draw: u32 },
}

impl Effect {
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::StatModifier { .. } => EffectKind::StatModifier,
            Effect::CategoryBoost { .. } => EffectKind::CategoryBoost,
            Effect::CategoryCostReduction { .. } => EffectKind::CategoryCostReduction,
            Effect::CategorySearch { .. } => EffectKind::CategorySearch,
            Effect::CategoryGraveyard { .. } => EffectKind::CategoryGraveyard,
            Effect::Destruction { .. } => EffectKind::Destruction,
            Effect::Removal { .. } => EffectKind::Removal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Effect::StatModifier { .. } => "Stat Modifier",
            Effect::CategoryBoost { .. } => "Category Boost",
            Effect::CategoryCostReduction { .. } => "Category Cost Reduction",
            Effect::CategorySearch { .. } => "Category Search",
            Effect::CategoryGraveyard { .. } => "Category Recovery",
            Effect::Destruction { .. } => "Destruction",
            Effect::Removal { .. } => "Removal",
        }
    }

    /// Human-readable rules text for card display.
    pub fn description(&self) -> String {
        match self {
            Effect::StatModifier { attack, defense } => {
                format!("Your characters gain {:+} attack and {:+} defense.", attack, defense)
            }
            Effect::CategoryBoost { category, attack, defense } => format!(
                "Your {} characters gain {:+} attack and {:+} defense.",
                category, attack, defense
            ),
            Effect::CategoryCostReduction { category, amount } => {
                format!("{} characters in your hand cost {} less.", category, amount)
            }
            Effect::CategorySearch { category } => {
                format!("Search your deck for a {} character.", category)
            }
            Effect::CategoryGraveyard { category } => {
                format!("Recover a {} character from your graveyard.", category)
            }
            Effect::Destruction { damage } => {
                format!("When destroyed: the opposing player takes {} damage.", damage)
            }
            Effect::Removal { draw } => {
                format!("When removed: draw {} card(s).", draw)
            }
        }
    }

    /// True for the search/graveyard-recovery kinds, which are never
    /// permitted in a character's effect slots and are skipped by the
    /// character play trigger.
    pub fn is_search_kind(&self) -> bool {
        matches!(
            self.kind(),
            EffectKind::CategorySearch | EffectKind::CategoryGraveyard
        )
    }

    /// True for the kinds that support symmetric removal.
    pub fn is_reversible(&self) -> bool {
        matches!(
            self.kind(),
            EffectKind::CategoryBoost | EffectKind::CategoryCostReduction
        )
    }

    /// Runs the effect for the given owner against the given opponent.
    pub fn apply(&self, state: &mut DuelState, owner: PlayerId, opponent: PlayerId) -> EffectResult {
        match self {
            Effect::StatModifier { attack, defense } => {
                let field = &mut state.player_mut(owner).field;
                for character in field.iter_mut() {
                    character.apply_stat_bonus(*attack, *defense);
                }
                EffectResult::Count(state.player(owner).field.len() as i32)
            }
            Effect::CategoryBoost { category, attack, defense } => {
                boost_matching(state, owner, category, *attack, *defense)
            }
            Effect::CategoryCostReduction { category, amount } => {
                shift_hand_costs(state, owner, category, *amount)
            }
            Effect::CategorySearch { category } => {
                let player = state.player_mut(owner);
                if player.hand_is_full() {
                    return EffectResult::Impossible;
                }
                // Scan from the deck top down.
                let found = player
                    .deck
                    .iter()
                    .rposition(|card| card_matches_category(card, category));
                match found {
                    Some(index) => {
                        let card = player.deck.remove(index);
                        let name = card.name().to_string();
                        player.hand.push(card);
                        state.notify(
                            NotificationKind::Effect,
                            format!("{} was added to the hand", name),
                        );
                        EffectResult::Resolved
                    }
                    None => EffectResult::Impossible,
                }
            }
            Effect::CategoryGraveyard { category } => {
                let player = state.player_mut(owner);
                if player.hand_is_full() {
                    return EffectResult::Impossible;
                }
                let found = player
                    .graveyard
                    .iter()
                    .rposition(|card| card_matches_category(card, category));
                match found {
                    Some(index) => {
                        let card = player.graveyard.remove(index);
                        let name = card.name().to_string();
                        player.hand.push(card);
                        state.notify(
                            NotificationKind::Effect,
                            format!("{} returned from the graveyard", name),
                        );
                        EffectResult::Resolved
                    }
                    None => EffectResult::Impossible,
                }
            }
            Effect::Destruction { damage } => {
                state.player_mut(opponent).take_damage(*damage);
                state.notify(
                    NotificationKind::Effect,
                    format!("Destruction effect dealt {} damage", damage),
                );
                EffectResult::Resolved
            }
            Effect::Removal { draw } => {
                let drawn = state.player_mut(owner).draw(*draw as usize);
                EffectResult::Count(drawn as i32)
            }
        }
    }

    /// Symmetric removal for the reversible kinds. Non-reversible kinds
    /// report `Skipped` and change nothing.
    pub fn remove(&self, state: &mut DuelState, owner: PlayerId, _opponent: PlayerId) -> EffectResult {
        match self {
            Effect::CategoryBoost { category, attack, defense } => {
                boost_matching(state, owner, category, -attack, -defense)
            }
            Effect::CategoryCostReduction { category, amount } => {
                shift_hand_costs(state, owner, category, -amount)
            }
            _ => EffectResult::Skipped,
        }
    }
}

fn boost_matching(
    state: &mut DuelState,
    owner: PlayerId,
    category: &CategoryId,
    attack: i32,
    defense: i32,
) -> EffectResult {
    let mut touched = 0;
    for character in state.player_mut(owner).field.iter_mut() {
        if character.has_category(category) {
            character.apply_stat_bonus(attack, defense);
            touched += 1;
        }
    }
    EffectResult::Count(touched)
}

fn shift_hand_costs(
    state: &mut DuelState,
    owner: PlayerId,
    category: &CategoryId,
    amount: i32,
) -> EffectResult {
    let mut touched = 0;
    for card in state.player_mut(owner).hand.iter_mut() {
        if let Card::Character(character) = card {
            if character.has_category(category) {
                character.cost_reduction = (character.cost_reduction + amount).max(0);
                touched += 1;
            }
        }
    }
    EffectResult::Count(touched)
}

fn card_matches_category(card: &Card, category: &CategoryId) -> bool {
    card.as_character()
        .is_some_and(|character| character.has_category(category))
}

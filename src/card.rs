//! The card data model: the Card hierarchy and its runtime play state.
//!
//! A card value doubles as definition and instance: definitions live in the
//! registry and are cloned into a player's zone when the card enters the
//! duel. Runtime-only state (the in-play owner/opponent handles) is never
//! serialized and is cleared whenever the card leaves the field.

use crate::effect::Effect;
use crate::element::Element;
use crate::ids::{CardId, CategoryId, PlayerId};
use crate::turn::Phase;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A character may hold at most this many categories.
pub const MAX_CHARACTER_CATEGORIES: usize = 3;
/// A character may hold at most this many effects.
pub const MAX_CHARACTER_EFFECTS: usize = 2;
/// A field card may hold at most this many effects.
pub const MAX_FIELD_EFFECTS: usize = 3;

/// Card kind discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CardKind {
    Character,
    Spell,
    Field,
}

/// Runtime back-references to the players a card in play belongs to.
///
/// Stored as player handles, set exactly once when the card is played and
/// cleared when it leaves the field. The engine never infers zone
/// membership from these handles alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InPlayRefs {
    pub owner: PlayerId,
    pub opponent: PlayerId,
}

/// Fields common to every card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CardData {
    pub id: CardId,
    pub name: String,
    pub description: String,
    /// Opaque artwork key, resolved by the presentation layer.
    pub artwork: String,
    pub cost: i32,
}

impl CardData {
    pub fn new(id: CardId, name: impl Into<String>, cost: i32) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            artwork: String::new(),
            cost: cost.max(0),
        }
    }
}

/// A character card: the only card kind that fights.
///
/// Base attack/defense are the printed, immutable values; the current
/// attack/defense/hp triple is session-scoped and moves with permanent
/// bonuses. Field-card modifiers are never stored here; they are folded in
/// per query by the stat engine.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CharacterCard {
    pub data: CardData,
    pub element: Element,
    pub base_attack: i32,
    pub base_defense: i32,
    attack: i32,
    defense: i32,
    hp: i32,
    pub categories: Vec<CategoryId>,
    pub effects: Vec<Effect>,
    pub has_attacked_this_turn: bool,
    /// Temporary cost reduction accumulated from active field effects.
    pub cost_reduction: i32,
    #[cfg_attr(feature = "serialization", serde(skip))]
    in_play: Option<InPlayRefs>,
}

impl CharacterCard {
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        cost: i32,
        element: Element,
        attack: i32,
        defense: i32,
    ) -> Self {
        let attack = attack.max(0);
        let defense = defense.max(0);
        Self {
            data: CardData::new(id, name, cost),
            element,
            base_attack: attack,
            base_defense: defense,
            attack,
            defense,
            hp: defense,
            categories: Vec::new(),
            effects: Vec::new(),
            has_attacked_this_turn: false,
            cost_reduction: 0,
            in_play: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.data.description = text.into();
        self
    }

    pub fn with_artwork(mut self, key: impl Into<String>) -> Self {
        self.data.artwork = key.into();
        self
    }

    /// Attach categories at definition time. Truncated to the 3-slot cap.
    pub fn with_categories(mut self, categories: Vec<CategoryId>) -> Self {
        self.categories = categories;
        self.categories.truncate(MAX_CHARACTER_CATEGORIES);
        self
    }

    /// Attach effects at definition time. Search/graveyard-recovery kinds
    /// are rejected from the slots; the rest are truncated to the 2-slot cap.
    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        for effect in effects {
            if !self.add_effect(effect) {
                break;
            }
        }
        self
    }

    /// Current attack (permanent bonuses included, field modifiers excluded).
    pub fn attack(&self) -> i32 {
        self.attack
    }

    /// Current defense (permanent bonuses included, field modifiers excluded).
    pub fn defense(&self) -> i32 {
        self.defense
    }

    /// Current hit points.
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Permanently shifts the current stats.
    ///
    /// Hp moves with the defense delta only when that delta is positive.
    /// Every component clamps at zero after the add.
    pub fn apply_stat_bonus(&mut self, attack_delta: i32, defense_delta: i32) {
        self.attack = (self.attack + attack_delta).max(0);
        self.defense = (self.defense + defense_delta).max(0);
        if defense_delta > 0 {
            self.hp = (self.hp + defense_delta).max(0);
        }
    }

    /// Subtracts hp, clamped at zero. Returns the new value.
    pub fn subtract_hp(&mut self, amount: i32) -> i32 {
        self.hp = (self.hp - amount.max(0)).max(0);
        self.hp
    }

    /// Cost after the temporary reduction, never below zero.
    pub fn effective_cost(&self) -> i32 {
        (self.data.cost - self.cost_reduction).max(0)
    }

    pub fn has_category(&self, category: &CategoryId) -> bool {
        self.categories.contains(category)
    }

    /// True if another effect can be attached.
    ///
    /// Rejects at the 2-effect cap and categorically rejects
    /// search/graveyard-recovery kinds, which are never permitted in a
    /// character's effect slots.
    pub fn can_add_effect(&self, effect: &Effect) -> bool {
        self.effects.len() < MAX_CHARACTER_EFFECTS && !effect.is_search_kind()
    }

    /// Attach an effect. Returns false (and leaves the list unchanged) on
    /// capacity or kind rejection.
    pub fn add_effect(&mut self, effect: Effect) -> bool {
        if !self.can_add_effect(&effect) {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Attach a category. Returns false at the 3-category cap or when the
    /// category is already present.
    pub fn add_category(&mut self, category: CategoryId) -> bool {
        if self.categories.len() >= MAX_CHARACTER_CATEGORIES || self.has_category(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }

    /// Detach a category. No-op (returns false) when absent.
    pub fn remove_category(&mut self, category: &CategoryId) -> bool {
        match self.categories.iter().position(|c| c == category) {
            Some(index) => {
                self.categories.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sets the in-play handles. Set exactly once: a second call while the
    /// card is already in play is ignored.
    pub fn enter_play(&mut self, owner: PlayerId, opponent: PlayerId) {
        if self.in_play.is_none() {
            self.in_play = Some(InPlayRefs { owner, opponent });
        }
    }

    /// Clears the in-play handles.
    pub fn leave_play(&mut self) {
        self.in_play = None;
    }

    pub fn in_play(&self) -> Option<InPlayRefs> {
        self.in_play
    }

    pub fn reset_attack_flag(&mut self) {
        self.has_attacked_this_turn = false;
    }
}

/// A field card: occupies one of the 3 fixed slots and modifies the duel
/// while it sits there.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FieldCard {
    pub data: CardData,
    pub effects: Vec<Effect>,
    /// Categories a character must hold (any of) to be affected. Empty
    /// means no category filter.
    pub target_categories: Vec<CategoryId>,
    /// Elements a character must match (any of). Empty means no filter.
    pub target_elements: Vec<Element>,
    pub affects_own_field: bool,
    pub affects_opponent_field: bool,
    /// When set, `attack_modifier`/`defense_modifier` participate in the
    /// stat fold.
    pub modifies_stats: bool,
    pub attack_modifier: i32,
    pub defense_modifier: i32,
    /// Legacy flag kept for backward compatibility with persisted card
    /// sets. Read through `battle_protection()`, which is hard-wired false.
    pub legacy_battle_protection: bool,
    /// Legacy flag kept for backward compatibility with persisted card
    /// sets. Read through `spell_protection()`, which is hard-wired false.
    pub legacy_spell_protection: bool,
    #[cfg_attr(feature = "serialization", serde(skip))]
    in_play: Option<InPlayRefs>,
}

impl FieldCard {
    pub fn new(id: CardId, name: impl Into<String>, cost: i32) -> Self {
        Self {
            data: CardData::new(id, name, cost),
            effects: Vec::new(),
            target_categories: Vec::new(),
            target_elements: Vec::new(),
            affects_own_field: true,
            affects_opponent_field: false,
            modifies_stats: false,
            attack_modifier: 0,
            defense_modifier: 0,
            legacy_battle_protection: false,
            legacy_spell_protection: false,
            in_play: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.data.description = text.into();
        self
    }

    pub fn with_artwork(mut self, key: impl Into<String>) -> Self {
        self.data.artwork = key.into();
        self
    }

    /// Declare the stat modifiers this card folds into qualifying
    /// characters, and turn the `modifies_stats` flag on.
    pub fn with_stat_modifiers(mut self, attack: i32, defense: i32) -> Self {
        self.modifies_stats = true;
        self.attack_modifier = attack;
        self.defense_modifier = defense;
        self
    }

    pub fn with_target_categories(mut self, categories: Vec<CategoryId>) -> Self {
        self.target_categories = categories;
        self
    }

    pub fn with_target_elements(mut self, elements: Vec<Element>) -> Self {
        self.target_elements = elements;
        self
    }

    pub fn with_scope(mut self, own_field: bool, opponent_field: bool) -> Self {
        self.affects_own_field = own_field;
        self.affects_opponent_field = opponent_field;
        self
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        for effect in effects {
            if !self.add_effect(effect) {
                break;
            }
        }
        self
    }

    /// Attach an effect. Returns false at the 3-effect cap.
    pub fn add_effect(&mut self, effect: Effect) -> bool {
        if self.effects.len() >= MAX_FIELD_EFFECTS {
            return false;
        }
        self.effects.push(effect);
        true
    }

    /// Legacy battle-protection flag. Permanently disabled: reads false
    /// unconditionally regardless of the stored value.
    pub fn battle_protection(&self) -> bool {
        false
    }

    /// Legacy spell-protection flag. Permanently disabled: reads false
    /// unconditionally regardless of the stored value.
    pub fn spell_protection(&self) -> bool {
        false
    }

    /// Sets the in-play handles. Set exactly once while in play.
    pub fn enter_play(&mut self, owner: PlayerId, opponent: PlayerId) {
        if self.in_play.is_none() {
            self.in_play = Some(InPlayRefs { owner, opponent });
        }
    }

    pub fn leave_play(&mut self) {
        self.in_play = None;
    }

    pub fn in_play(&self) -> Option<InPlayRefs> {
        self.in_play
    }
}

/// Spell discriminant: the primary action the spell performs when played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SpellKind {
    Draw,
    Buff,
    Debuff,
    LifeDamage,
    LifeHeal,
    Resurrection,
    CardDestruction,
    HandDestruction,
}

/// A spell card. Always ends in the owner's graveyard immediately after its
/// effects run, even when the effect list is empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SpellCard {
    pub data: CardData,
    pub kind: SpellKind,
    /// Magnitude of the primary action (cards drawn, damage dealt, ...).
    pub value: i32,
    pub effects: Vec<Effect>,
    /// Phases during which this spell may be activated. Empty means the
    /// Action phase only.
    pub allowed_phases: Vec<Phase>,
    /// When set, the spell may also be activated during the opponent's turn.
    pub allowed_on_opponent_turn: bool,
    #[cfg_attr(feature = "serialization", serde(skip))]
    in_play: Option<InPlayRefs>,
}

impl SpellCard {
    pub fn new(id: CardId, name: impl Into<String>, cost: i32, kind: SpellKind, value: i32) -> Self {
        Self {
            data: CardData::new(id, name, cost),
            kind,
            value,
            effects: Vec::new(),
            allowed_phases: Vec::new(),
            allowed_on_opponent_turn: false,
            in_play: None,
        }
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.data.description = text.into();
        self
    }

    pub fn with_artwork(mut self, key: impl Into<String>) -> Self {
        self.data.artwork = key.into();
        self
    }

    pub fn with_effects(mut self, effects: Vec<Effect>) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_allowed_phases(mut self, phases: Vec<Phase>) -> Self {
        self.allowed_phases = phases;
        self
    }

    pub fn allowed_on_opponent_turn(mut self) -> Self {
        self.allowed_on_opponent_turn = true;
        self
    }

    /// True if this spell may be activated during the given phase.
    pub fn allows_phase(&self, phase: Phase) -> bool {
        if self.allowed_phases.is_empty() {
            return phase == Phase::Action;
        }
        self.allowed_phases.contains(&phase)
    }

    /// Sets the in-play handles. Set exactly once while resolving.
    pub fn enter_play(&mut self, owner: PlayerId, opponent: PlayerId) {
        if self.in_play.is_none() {
            self.in_play = Some(InPlayRefs { owner, opponent });
        }
    }

    pub fn leave_play(&mut self) {
        self.in_play = None;
    }

    pub fn in_play(&self) -> Option<InPlayRefs> {
        self.in_play
    }
}

/// A card of any kind, as stored in hands, decks and graveyards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Card {
    Character(CharacterCard),
    Spell(SpellCard),
    Field(FieldCard),
}

impl Card {
    pub fn data(&self) -> &CardData {
        match self {
            Card::Character(c) => &c.data,
            Card::Spell(s) => &s.data,
            Card::Field(f) => &f.data,
        }
    }

    pub fn id(&self) -> CardId {
        self.data().id
    }

    pub fn name(&self) -> &str {
        &self.data().name
    }

    pub fn cost(&self) -> i32 {
        self.data().cost
    }

    pub fn kind(&self) -> CardKind {
        match self {
            Card::Character(_) => CardKind::Character,
            Card::Spell(_) => CardKind::Spell,
            Card::Field(_) => CardKind::Field,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterCard> {
        match self {
            Card::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut CharacterCard> {
        match self {
            Card::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Clears any in-play handles, whichever kind this is.
    pub fn leave_play(&mut self) {
        match self {
            Card::Character(c) => c.leave_play(),
            Card::Spell(s) => s.leave_play(),
            Card::Field(f) => f.leave_play(),
        }
    }
}

impl From<CharacterCard> for Card {
    fn from(value: CharacterCard) -> Self {
        Card::Character(value)
    }
}

impl From<SpellCard> for Card {
    fn from(value: SpellCard) -> Self {
        Card::Spell(value)
    }
}

impl From<FieldCard> for Card {
    fn from(value: FieldCard) -> Self {
        Card::Field(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;

    fn ember_drake() -> CharacterCard {
        CharacterCard::new(CardId::from_raw(1), "Ember Drake", 3, Element::Fire, 1200, 900)
            .with_categories(vec![CategoryId::from("dragons")])
    }

    #[test]
    fn test_current_stats_start_at_base() {
        let drake = ember_drake();
        assert_eq!(drake.attack(), 1200);
        assert_eq!(drake.defense(), 900);
        assert_eq!(drake.hp(), 900);
    }

    #[test]
    fn test_negative_base_stats_clamp() {
        let odd = CharacterCard::new(CardId::from_raw(2), "Odd", 0, Element::Neutral, -5, -5);
        assert_eq!(odd.attack(), 0);
        assert_eq!(odd.defense(), 0);
        assert_eq!(odd.hp(), 0);
    }

    #[test]
    fn test_stat_bonus_moves_hp_only_upward() {
        let mut drake = ember_drake();
        drake.apply_stat_bonus(300, 200);
        assert_eq!(drake.attack(), 1500);
        assert_eq!(drake.defense(), 1100);
        assert_eq!(drake.hp(), 1100);

        drake.apply_stat_bonus(0, -400);
        assert_eq!(drake.defense(), 700);
        // Negative defense delta leaves hp alone.
        assert_eq!(drake.hp(), 1100);
    }

    #[test]
    fn test_stat_bonus_clamps_at_zero() {
        let mut card = CharacterCard::new(CardId::from_raw(3), "Frail", 1, Element::Wind, 500, 500);
        card.apply_stat_bonus(-9999, -9999);
        assert_eq!(card.attack(), 0);
        assert_eq!(card.defense(), 0);
        assert_eq!(card.hp(), 500);
    }

    #[test]
    fn test_effect_slot_cap() {
        let mut drake = ember_drake();
        assert!(drake.add_effect(Effect::StatModifier { attack: 100, defense: 0 }));
        assert!(drake.add_effect(Effect::Destruction { damage: 500 }));
        assert!(!drake.add_effect(Effect::StatModifier { attack: 50, defense: 50 }));
        assert_eq!(drake.effects.len(), 2);
    }

    #[test]
    fn test_search_effects_rejected_from_slots() {
        let mut drake = ember_drake();
        let search = Effect::CategorySearch { category: CategoryId::from("dragons") };
        let recover = Effect::CategoryGraveyard { category: CategoryId::from("dragons") };
        assert!(!drake.can_add_effect(&search));
        assert!(!drake.add_effect(search));
        assert!(!drake.add_effect(recover));
        assert!(drake.effects.is_empty());
    }

    #[test]
    fn test_category_cap_and_duplicates() {
        let mut drake = ember_drake();
        assert!(drake.add_category(CategoryId::from("spirits")));
        assert!(drake.add_category(CategoryId::from("guardians")));
        // Already holds 3.
        assert!(!drake.add_category(CategoryId::from("golems")));
        // Duplicate add is rejected even below the cap.
        let mut fresh = CharacterCard::new(CardId::from_raw(9), "F", 0, Element::Water, 1, 1);
        assert!(fresh.add_category(CategoryId::from("spirits")));
        assert!(!fresh.add_category(CategoryId::from("spirits")));
    }

    #[test]
    fn test_remove_category() {
        let mut drake = ember_drake();
        assert!(drake.remove_category(&CategoryId::from("dragons")));
        assert!(!drake.remove_category(&CategoryId::from("dragons")));
    }

    #[test]
    fn test_in_play_refs_set_once() {
        let mut drake = ember_drake();
        assert!(drake.in_play().is_none());

        drake.enter_play(PlayerId::from_index(0), PlayerId::from_index(1));
        let refs = drake.in_play().unwrap();
        assert_eq!(refs.owner, PlayerId::from_index(0));

        // A second enter_play while in play is ignored.
        drake.enter_play(PlayerId::from_index(1), PlayerId::from_index(0));
        assert_eq!(drake.in_play().unwrap().owner, PlayerId::from_index(0));

        drake.leave_play();
        assert!(drake.in_play().is_none());
    }

    #[test]
    fn test_effective_cost_clamps() {
        let mut drake = ember_drake();
        drake.cost_reduction = 2;
        assert_eq!(drake.effective_cost(), 1);
        drake.cost_reduction = 10;
        assert_eq!(drake.effective_cost(), 0);
    }

    #[test]
    fn test_field_card_protection_reads_false() {
        let mut wall = FieldCard::new(CardId::from_raw(4), "Old Wall", 2);
        wall.legacy_battle_protection = true;
        wall.legacy_spell_protection = true;
        assert!(!wall.battle_protection());
        assert!(!wall.spell_protection());
    }

    #[test]
    fn test_field_effect_cap() {
        let mut banner = FieldCard::new(CardId::from_raw(5), "Banner", 2);
        for _ in 0..3 {
            assert!(banner.add_effect(Effect::StatModifier { attack: 100, defense: 100 }));
        }
        assert!(!banner.add_effect(Effect::StatModifier { attack: 1, defense: 1 }));
        assert_eq!(banner.effects.len(), 3);
    }

    #[test]
    fn test_spell_phase_defaults_to_action() {
        let bolt = SpellCard::new(CardId::from_raw(6), "Bolt", 2, SpellKind::LifeDamage, 800);
        assert!(bolt.allows_phase(Phase::Action));
        assert!(!bolt.allows_phase(Phase::Draw));

        let trap = SpellCard::new(CardId::from_raw(7), "Trap", 1, SpellKind::Debuff, 300)
            .with_allowed_phases(vec![Phase::Action, Phase::End]);
        assert!(trap.allows_phase(Phase::End));
    }

    #[test]
    fn test_card_kind_dispatch() {
        let card: Card = ember_drake().into();
        assert_eq!(card.kind(), CardKind::Character);
        assert_eq!(card.name(), "Ember Drake");
        assert!(card.as_character().is_some());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_in_play_refs_never_serialized() {
        let mut drake = ember_drake();
        drake.enter_play(PlayerId::from_index(0), PlayerId::from_index(1));

        let json = serde_json::to_string(&drake).unwrap();
        assert!(!json.contains("in_play"));

        let back: CharacterCard = serde_json::from_str(&json).unwrap();
        assert!(back.in_play().is_none());
        assert_eq!(back.data.name, "Ember Drake");
    }
}

pub mod battle;
pub mod card;
pub mod cards;
pub mod category;
pub mod effect;
pub mod element;
pub mod ids;
pub mod lifecycle;
pub mod notify;
pub mod player;
pub mod spells;
pub mod state;
pub mod stats;
pub mod turn;

#[cfg(test)]
mod tests;

pub use battle::{
    AttackOutcome, BattleReport, BattleResolver, DamageSource, SimpleBattleResolver, attack,
    attack_player, take_damage,
};
pub use card::{
    Card, CardData, CardKind, CharacterCard, FieldCard, InPlayRefs, MAX_CHARACTER_CATEGORIES,
    MAX_CHARACTER_EFFECTS, MAX_FIELD_EFFECTS, SpellCard, SpellKind,
};
pub use cards::{CardRegistry, starter_categories};
pub use category::{Category, CategoryRegistry};
pub use effect::{Effect, EffectKind, EffectOutcome, EffectResult};
pub use element::Element;
pub use ids::{CardId, CategoryId, PlayerId};
pub use lifecycle::{
    PlayError, destroy_character, play_character, play_field_card, reapply_field_effects,
    remove_character_from_field, remove_field_card,
};
pub use notify::{DEFAULT_NOTIFICATION_SECS, Notification, NotificationKind};
pub use player::{
    FIELD_SLOT_COUNT, MAX_FIELD_CHARACTERS, MAX_HAND_SIZE, Player, STARTING_LIFE,
};
pub use spells::{SpellPlay, SpellTarget, play_spell};
pub use state::{CharacterHandle, DuelState};
pub use stats::{effective_attack, effective_defense, field_card_applies};
pub use turn::{
    Phase, TurnError, TurnState, advance_phase, can_attack, can_play_card, end_turn,
    execute_draw_phase,
};

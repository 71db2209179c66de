//! Spell activation: timing checks, the primary action, and resolution.
//!
//! A spell's primary action is named by its `SpellKind` and sized by its
//! effect value; it resolves first, then the attached effect list runs
//! through the lifecycle protocol, and the card is buried. Targets are
//! validated before anything mutates: once the play transition starts it
//! runs to completion and cannot be rolled back.

use crate::card::{Card, SpellCard, SpellKind};
use crate::effect::{EffectOutcome, EffectResult};
use crate::ids::PlayerId;
use crate::lifecycle::{self, PlayError};
use crate::notify::NotificationKind;
use crate::state::{CharacterHandle, DuelState};

/// Caller-chosen target for a spell's primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellTarget {
    /// The spell needs no target.
    None,
    /// A character on the owner's field, by field index.
    Ally(usize),
    /// A character on the opponent's field, by field index.
    Enemy(usize),
    /// A card in the owner's graveyard, by graveyard index.
    Graveyard(usize),
}

/// What a resolved spell did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellPlay {
    /// Result of the primary action.
    pub primary: EffectResult,
    /// Outcomes of the attached effect list (plus, for Resurrection, the
    /// revived character's own play-time effects).
    pub outcomes: Vec<EffectOutcome>,
}

/// Plays a spell from the owner's hand.
///
/// Timing: the current phase must be in the spell's allowed set (empty set
/// means Action only), and on the opponent's turn the spell must carry the
/// opponent-turn flag. Rejections leave the hand untouched.
pub fn play_spell(
    state: &mut DuelState,
    owner: PlayerId,
    hand_index: usize,
    target: SpellTarget,
) -> Result<SpellPlay, PlayError> {
    let spell = match state.player(owner).hand.get(hand_index) {
        None => return Err(PlayError::NoSuchHandCard { index: hand_index }),
        Some(Card::Spell(s)) => s,
        Some(_) => return Err(PlayError::WrongCardKind),
    };
    if !spell.allows_phase(state.turn.phase) {
        return Err(PlayError::TimingNotAllowed);
    }
    if state.turn.active_player != owner && !spell.allowed_on_opponent_turn {
        return Err(PlayError::TimingNotAllowed);
    }
    validate_target(state, owner, spell.kind, target)?;

    let card = state.player_mut(owner).hand.remove(hand_index);
    let spell = match card {
        Card::Spell(s) => s,
        other => {
            state.player_mut(owner).hand.insert(hand_index, other);
            return Err(PlayError::WrongCardKind);
        }
    };

    state.notify(
        NotificationKind::Effect,
        format!("{} was activated", spell.data.name),
    );
    let mut play = resolve_primary(state, owner, &spell, target);
    let mut outcomes = lifecycle::spell_on_play(state, owner, spell);
    play.outcomes.append(&mut outcomes);
    Ok(play)
}

fn validate_target(
    state: &DuelState,
    owner: PlayerId,
    kind: SpellKind,
    target: SpellTarget,
) -> Result<(), PlayError> {
    let opponent = owner.opponent();
    match kind {
        SpellKind::Buff => match target {
            SpellTarget::Ally(index) if index < state.player(owner).field.len() => Ok(()),
            _ => Err(PlayError::InvalidTarget),
        },
        SpellKind::Debuff | SpellKind::CardDestruction => match target {
            SpellTarget::Enemy(index) if index < state.player(opponent).field.len() => Ok(()),
            _ => Err(PlayError::InvalidTarget),
        },
        SpellKind::Resurrection => match target {
            SpellTarget::Graveyard(index) => {
                let is_character = state
                    .player(owner)
                    .graveyard
                    .get(index)
                    .is_some_and(|card| card.as_character().is_some());
                if !is_character {
                    return Err(PlayError::InvalidTarget);
                }
                if !state.player(owner).can_field_character() {
                    return Err(PlayError::FieldFull);
                }
                Ok(())
            }
            _ => Err(PlayError::InvalidTarget),
        },
        // Untargeted kinds ignore whatever the caller passed.
        SpellKind::Draw | SpellKind::LifeDamage | SpellKind::LifeHeal | SpellKind::HandDestruction => {
            Ok(())
        }
    }
}

/// Resolves the primary action. Targets were validated by the caller;
/// anything that still comes up short (an exhausted deck, an empty hand)
/// reports through the result rather than failing the play.
fn resolve_primary(
    state: &mut DuelState,
    owner: PlayerId,
    spell: &SpellCard,
    target: SpellTarget,
) -> SpellPlay {
    let opponent = owner.opponent();
    let value = spell.value.max(0);
    let mut outcomes = Vec::new();

    let primary = match spell.kind {
        SpellKind::Draw => {
            let drawn = state.player_mut(owner).draw(value as usize);
            EffectResult::Count(drawn as i32)
        }
        SpellKind::Buff => match target {
            SpellTarget::Ally(index) => {
                match state.character_mut(CharacterHandle::new(owner, index)) {
                    Some(character) => {
                        character.apply_stat_bonus(value, value);
                        EffectResult::Resolved
                    }
                    None => EffectResult::Impossible,
                }
            }
            _ => EffectResult::Impossible,
        },
        SpellKind::Debuff => match target {
            SpellTarget::Enemy(index) => {
                match state.character_mut(CharacterHandle::new(opponent, index)) {
                    Some(character) => {
                        character.apply_stat_bonus(-value, -value);
                        EffectResult::Resolved
                    }
                    None => EffectResult::Impossible,
                }
            }
            _ => EffectResult::Impossible,
        },
        SpellKind::LifeDamage => {
            state.player_mut(opponent).take_damage(value);
            state.notify(
                NotificationKind::Battle,
                format!("{} took {} damage", state.player(opponent).name, value),
            );
            EffectResult::Resolved
        }
        SpellKind::LifeHeal => {
            state.player_mut(owner).gain_life(value);
            EffectResult::Resolved
        }
        SpellKind::Resurrection => match target {
            SpellTarget::Graveyard(index) => revive(state, owner, index, &mut outcomes),
            _ => EffectResult::Impossible,
        },
        SpellKind::CardDestruction => match target {
            SpellTarget::Enemy(index) => {
                let destroyed =
                    lifecycle::destroy_character(state, CharacterHandle::new(opponent, index));
                outcomes.extend(destroyed);
                EffectResult::Resolved
            }
            _ => EffectResult::Impossible,
        },
        SpellKind::HandDestruction => {
            let discarded = state.player_mut(opponent).discard_random(value as usize);
            state.notify(
                NotificationKind::Effect,
                format!("{} discarded {} card(s)", state.player(opponent).name, discarded),
            );
            EffectResult::Count(discarded as i32)
        }
    };

    SpellPlay { primary, outcomes }
}

/// Returns a character from the graveyard to the field; it re-enters play
/// through the character play transition (minus the hand bookkeeping).
fn revive(
    state: &mut DuelState,
    owner: PlayerId,
    graveyard_index: usize,
    outcomes: &mut Vec<EffectOutcome>,
) -> EffectResult {
    if !state.player(owner).can_field_character() {
        return EffectResult::Impossible;
    }
    let player = state.player_mut(owner);
    if graveyard_index >= player.graveyard.len() {
        return EffectResult::Impossible;
    }
    let card = player.graveyard.remove(graveyard_index);
    let mut character = match card {
        Card::Character(c) => c,
        other => {
            state.player_mut(owner).graveyard.insert(graveyard_index, other);
            return EffectResult::Impossible;
        }
    };
    let opponent = owner.opponent();
    character.enter_play(owner, opponent);
    let effects = character.effects.clone();
    let name = character.data.name.clone();
    state.player_mut(owner).field.push(character);
    state.notify(NotificationKind::Effect, format!("{} was revived", name));

    outcomes.extend(lifecycle::character_play_effects(state, owner, opponent, &effects));
    EffectResult::Resolved
}

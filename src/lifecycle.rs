//! The effect application protocol: what runs when a card enters play, is
//! removed, or is destroyed.
//!
//! Every hook filters the card's effect list by kind once, centrally, and
//! applies the survivors in list order. Application is best-effort, not
//! transactional: a failing effect is logged, recorded in the returned
//! outcome list, and never stops its siblings. Hooks that fire on cards
//! whose in-play references are missing silently no-op; that state is "not
//! yet in a valid lifecycle stage", not a fault.

use std::fmt;

use crate::card::{Card, SpellCard};
use crate::effect::{Effect, EffectKind, EffectOutcome, EffectResult};
use crate::ids::PlayerId;
use crate::notify::NotificationKind;
use crate::player::FIELD_SLOT_COUNT;
use crate::state::{CharacterHandle, DuelState};
use crate::turn;

/// Rejection reasons for play-time operations.
///
/// Capacity and gate violations surface here, as plain values; nothing in
/// the protocol panics or aborts sibling effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    /// It is not the requesting player's turn.
    NotPlayersTurn,
    /// Cards cannot be played during the current phase.
    WrongPhase,
    /// The hand index does not exist.
    NoSuchHandCard { index: usize },
    /// The hand card is not of the kind this operation plays.
    WrongCardKind,
    /// The character field already holds its maximum.
    FieldFull,
    /// The field-card slot index is out of range.
    InvalidSlot { slot: usize },
    /// The spell's timing rules forbid activation right now.
    TimingNotAllowed,
    /// The spell's primary action needs a target this call did not supply.
    InvalidTarget,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotPlayersTurn => write!(f, "not this player's turn"),
            PlayError::WrongPhase => write!(f, "cards cannot be played in this phase"),
            PlayError::NoSuchHandCard { index } => write!(f, "no hand card at index {}", index),
            PlayError::WrongCardKind => write!(f, "hand card has the wrong kind"),
            PlayError::FieldFull => write!(f, "the character field is full"),
            PlayError::InvalidSlot { slot } => write!(f, "no field slot {}", slot),
            PlayError::TimingNotAllowed => write!(f, "spell timing does not allow activation now"),
            PlayError::InvalidTarget => write!(f, "missing or invalid target"),
        }
    }
}

/// Plays a character card from the owner's hand onto their field and runs
/// its play-time effects.
///
/// Search/graveyard-recovery effects are skipped (logged, recorded as
/// `Skipped`): they are never permitted on a card once in play. The
/// trigger-bound kinds wait for their trigger. Everything else applies in
/// list order, best-effort.
pub fn play_character(
    state: &mut DuelState,
    owner: PlayerId,
    hand_index: usize,
) -> Result<Vec<EffectOutcome>, PlayError> {
    check_play_gate(state, owner)?;
    match state.player(owner).hand.get(hand_index) {
        None => return Err(PlayError::NoSuchHandCard { index: hand_index }),
        Some(Card::Character(_)) => {}
        Some(_) => return Err(PlayError::WrongCardKind),
    }
    if !state.player(owner).can_field_character() {
        return Err(PlayError::FieldFull);
    }

    let opponent = owner.opponent();
    let card = state.player_mut(owner).hand.remove(hand_index);
    let mut character = match card {
        Card::Character(c) => c,
        other => {
            state.player_mut(owner).hand.insert(hand_index, other);
            return Err(PlayError::WrongCardKind);
        }
    };
    character.enter_play(owner, opponent);
    let effects = character.effects.clone();
    let name = character.data.name.clone();
    state.player_mut(owner).field.push(character);

    state.notify(NotificationKind::Info, format!("{} entered the field", name));
    Ok(character_play_effects(state, owner, opponent, &effects))
}

/// Play-time effect pass for a character already placed on the field.
///
/// Search/graveyard-recovery kinds are skipped (never permitted once in
/// play); the trigger-bound kinds stay inert until their trigger fires.
/// Everything else applies in order.
pub(crate) fn character_play_effects(
    state: &mut DuelState,
    owner: PlayerId,
    opponent: PlayerId,
    effects: &[Effect],
) -> Vec<EffectOutcome> {
    apply_effects(state, owner, opponent, effects, |effect| {
        if effect.is_search_kind() {
            return Admission::Skip("search effects never run from a card in play");
        }
        match effect.kind() {
            EffectKind::Destruction | EffectKind::Removal => {
                Admission::Skip("inert until its trigger fires")
            }
            _ => Admission::Apply,
        }
    })
}

/// Plays a field card from the owner's hand into the given slot.
///
/// An occupied slot is overwritten: the previous occupant is displaced to
/// the graveyard with its references cleared, and its removal effect does
/// NOT run; callers that want it must call `remove_field_card` first.
/// Only StatModifier and CategoryBoost effects run at play time; all other
/// kinds attached to a field card are inert here.
pub fn play_field_card(
    state: &mut DuelState,
    owner: PlayerId,
    hand_index: usize,
    slot: usize,
) -> Result<Vec<EffectOutcome>, PlayError> {
    check_play_gate(state, owner)?;
    if slot >= FIELD_SLOT_COUNT {
        return Err(PlayError::InvalidSlot { slot });
    }
    match state.player(owner).hand.get(hand_index) {
        None => return Err(PlayError::NoSuchHandCard { index: hand_index }),
        Some(Card::Field(_)) => {}
        Some(_) => return Err(PlayError::WrongCardKind),
    }

    let opponent = owner.opponent();
    let card = state.player_mut(owner).hand.remove(hand_index);
    let mut field_card = match card {
        Card::Field(f) => f,
        other => {
            state.player_mut(owner).hand.insert(hand_index, other);
            return Err(PlayError::WrongCardKind);
        }
    };

    if let Some(mut displaced) = state.player_mut(owner).field_slots[slot].take() {
        displaced.leave_play();
        let displaced_name = displaced.data.name.clone();
        state.player_mut(owner).graveyard.push(Card::Field(displaced));
        state.notify(
            NotificationKind::Info,
            format!("{} was displaced from the field", displaced_name),
        );
    }

    field_card.enter_play(owner, opponent);
    let effects = field_card.effects.clone();
    let name = field_card.data.name.clone();
    state.player_mut(owner).field_slots[slot] = Some(field_card);

    state.notify(NotificationKind::Info, format!("{} was set on the field", name));
    Ok(apply_effects(state, owner, opponent, &effects, field_play_admission))
}

/// Resolves a spell's attached effect list and buries the card.
///
/// Every effect applies in list order with no kind filtering, then the
/// spell unconditionally moves to the owner's graveyard, even with zero
/// effects. Gate and timing checks belong to `spells::play_spell`; this is
/// the raw protocol transition.
pub fn spell_on_play(
    state: &mut DuelState,
    owner: PlayerId,
    mut spell: SpellCard,
) -> Vec<EffectOutcome> {
    let opponent = owner.opponent();
    spell.enter_play(owner, opponent);
    let effects = spell.effects.clone();
    let outcomes = apply_effects(state, owner, opponent, &effects, |_| Admission::Apply);

    spell.leave_play();
    state.player_mut(owner).graveyard.push(Card::Spell(spell));
    outcomes
}

/// Destroys a character in play: runs its Destruction-kind effects, then
/// takes it off the field (reversing its boosts) into the graveyard.
///
/// A character without in-play references is not in a valid lifecycle
/// stage for destruction; the call is a silent no-op.
pub fn destroy_character(state: &mut DuelState, handle: CharacterHandle) -> Vec<EffectOutcome> {
    let Some(character) = state.character(handle) else {
        return Vec::new();
    };
    let Some(refs) = character.in_play() else {
        log::debug!(
            "destruction hook on '{}' without in-play refs; ignored",
            character.data.name
        );
        return Vec::new();
    };
    let effects = character.effects.clone();
    let name = character.data.name.clone();

    let mut outcomes = apply_effects(state, refs.owner, refs.opponent, &effects, |effect| {
        if effect.kind() == EffectKind::Destruction {
            Admission::Apply
        } else {
            Admission::Skip("only destruction effects fire on destruction")
        }
    });
    state.notify(NotificationKind::Battle, format!("{} was destroyed", name));
    outcomes.extend(remove_character_from_field(state, handle));
    outcomes
}

/// Takes a character off the field: reverses its CategoryBoost and
/// CategoryCostReduction effects, clears its references, and moves it to
/// the owner's graveyard. Other effect kinds are not reversed.
pub fn remove_character_from_field(
    state: &mut DuelState,
    handle: CharacterHandle,
) -> Vec<EffectOutcome> {
    let Some(character) = state.character(handle) else {
        return Vec::new();
    };
    let Some(refs) = character.in_play() else {
        return Vec::new();
    };
    let effects = character.effects.clone();

    let mut outcomes = Vec::with_capacity(effects.len());
    for effect in &effects {
        if !effect.is_reversible() {
            continue;
        }
        let result = effect.remove(state, refs.owner, refs.opponent);
        outcomes.push(EffectOutcome::new(effect, result));
    }

    let mut character = state.player_mut(handle.player).field.remove(handle.index);
    character.leave_play();
    state
        .player_mut(handle.player)
        .graveyard
        .push(Card::Character(character));
    outcomes
}

/// Removes the field card in the given slot: runs its Removal-kind
/// effects, clears its references, and buries it.
///
/// No-op (empty outcome list, slot untouched) when the slot is empty or
/// the card's references are missing.
pub fn remove_field_card(
    state: &mut DuelState,
    player: PlayerId,
    slot: usize,
) -> Vec<EffectOutcome> {
    if slot >= FIELD_SLOT_COUNT {
        return Vec::new();
    }
    let Some(field_card) = state.player(player).field_slots[slot].as_ref() else {
        return Vec::new();
    };
    let Some(refs) = field_card.in_play() else {
        log::debug!(
            "removal hook on '{}' without in-play refs; ignored",
            field_card.data.name
        );
        return Vec::new();
    };
    let effects = field_card.effects.clone();

    let outcomes = apply_effects(state, refs.owner, refs.opponent, &effects, |effect| {
        if effect.kind() == EffectKind::Removal {
            Admission::Apply
        } else {
            Admission::Skip("only removal effects fire on field-card removal")
        }
    });

    if let Some(mut removed) = state.player_mut(player).field_slots[slot].take() {
        removed.leave_play();
        let name = removed.data.name.clone();
        state.player_mut(player).graveyard.push(Card::Field(removed));
        state.notify(NotificationKind::Info, format!("{} left the field", name));
    }
    outcomes
}

/// Re-runs a resident field card's StatModifier/CategoryBoost effects
/// without re-entering the play transition. Used when field state changes
/// and stacking buffs must be refreshed. No-op without in-play references.
pub fn reapply_field_effects(
    state: &mut DuelState,
    player: PlayerId,
    slot: usize,
) -> Vec<EffectOutcome> {
    if slot >= FIELD_SLOT_COUNT {
        return Vec::new();
    }
    let Some(field_card) = state.player(player).field_slots[slot].as_ref() else {
        return Vec::new();
    };
    let Some(refs) = field_card.in_play() else {
        return Vec::new();
    };
    let effects = field_card.effects.clone();
    apply_effects(state, refs.owner, refs.opponent, &effects, field_play_admission)
}

enum Admission {
    Apply,
    Skip(&'static str),
}

fn field_play_admission(effect: &Effect) -> Admission {
    match effect.kind() {
        EffectKind::StatModifier | EffectKind::CategoryBoost => Admission::Apply,
        _ => Admission::Skip("inert on a field card at play time"),
    }
}

/// Runs an effect list through an admission filter, best-effort.
fn apply_effects(
    state: &mut DuelState,
    owner: PlayerId,
    opponent: PlayerId,
    effects: &[Effect],
    admit: impl Fn(&Effect) -> Admission,
) -> Vec<EffectOutcome> {
    let mut outcomes = Vec::with_capacity(effects.len());
    for effect in effects {
        match admit(effect) {
            Admission::Skip(reason) => {
                log::debug!("effect '{}' skipped: {}", effect.name(), reason);
                outcomes.push(EffectOutcome::new(effect, EffectResult::Skipped));
            }
            Admission::Apply => {
                let result = effect.apply(state, owner, opponent);
                if !result.is_success() {
                    // Isolated per effect: siblings still run, and this
                    // trigger will not retry it.
                    log::warn!("effect '{}' failed: {:?}", effect.name(), result);
                }
                outcomes.push(EffectOutcome::new(effect, result));
            }
        }
    }
    outcomes
}

fn check_play_gate(state: &DuelState, player: PlayerId) -> Result<(), PlayError> {
    if turn::can_play_card(state, player) {
        return Ok(());
    }
    if state.turn.active_player != player {
        Err(PlayError::NotPlayersTurn)
    } else {
        Err(PlayError::WrongPhase)
    }
}

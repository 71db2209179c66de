//! Turn structure and the phase gate.
//!
//! A turn walks Draw -> Action -> End, linearly, with no skipping. Cards
//! may only be played, and characters may only initiate attacks, during the
//! Action phase of their owner's turn. The gate also owns the per-turn
//! bookkeeping: the draw-phase card draw and the attack-flag reset.

use std::fmt;

use crate::ids::PlayerId;
use crate::state::DuelState;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// The three phases of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Phase {
    Draw,
    Action,
    End,
}

impl Phase {
    /// The next phase within the same turn, or None when the turn is over.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Draw => Some(Phase::Action),
            Phase::Action => Some(Phase::End),
            Phase::End => None,
        }
    }
}

/// Current turn state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    /// 1-based turn counter.
    pub number: u32,
    pub active_player: PlayerId,
    pub phase: Phase,
}

impl TurnState {
    pub fn new(starting_player: PlayerId) -> Self {
        Self {
            number: 1,
            active_player: starting_player,
            phase: Phase::Draw,
        }
    }
}

/// Errors from the turn gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// The requesting player is not the active player.
    NotActivePlayer,
    /// The operation is not valid in the current phase.
    WrongPhase { current: Phase },
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::NotActivePlayer => write!(f, "not the active player"),
            TurnError::WrongPhase { current } => {
                write!(f, "not valid during the {:?} phase", current)
            }
        }
    }
}

/// True if the given player may play a card right now.
pub fn can_play_card(state: &DuelState, player: PlayerId) -> bool {
    state.turn.active_player == player && state.turn.phase == Phase::Action
}

/// True if the given player's characters may initiate attacks right now.
pub fn can_attack(state: &DuelState, player: PlayerId) -> bool {
    state.turn.active_player == player && state.turn.phase == Phase::Action
}

/// Advances to the next phase; at the end of the turn, hands the duel to
/// the other player and starts their Draw phase.
pub fn advance_phase(state: &mut DuelState) -> Phase {
    match state.turn.phase.next() {
        Some(next) => {
            state.turn.phase = next;
        }
        None => {
            state.turn.number += 1;
            state.turn.active_player = state.turn.active_player.opponent();
            state.turn.phase = Phase::Draw;
            begin_turn(state);
        }
    }
    state.turn.phase
}

/// Executes the Draw phase for the active player: draws one card from the
/// deck top, then advances into the Action phase. Returns the number of
/// cards actually drawn (zero on an empty deck or a full hand).
pub fn execute_draw_phase(state: &mut DuelState) -> Result<usize, TurnError> {
    if state.turn.phase != Phase::Draw {
        return Err(TurnError::WrongPhase { current: state.turn.phase });
    }
    let active = state.turn.active_player;
    let drawn = state.player_mut(active).draw(1);
    advance_phase(state);
    Ok(drawn)
}

/// Ends the turn. Only valid from the Action phase for the active player;
/// any other request is rejected with no state change. On success the duel
/// is left at the start of the other player's Draw phase.
pub fn end_turn(state: &mut DuelState, player: PlayerId) -> Result<(), TurnError> {
    if state.turn.active_player != player {
        return Err(TurnError::NotActivePlayer);
    }
    if state.turn.phase != Phase::Action {
        return Err(TurnError::WrongPhase { current: state.turn.phase });
    }
    // Action -> End, then over into the next turn.
    advance_phase(state);
    advance_phase(state);
    Ok(())
}

/// Per-turn reset for the incoming active player: every character on their
/// field may attack again.
fn begin_turn(state: &mut DuelState) {
    let active = state.turn.active_player;
    for character in &mut state.player_mut(active).field {
        character.reset_attack_flag();
    }
}

//! The duel state: both players, the turn, and the notification queue.
//!
//! Engine operations take this context plus player/character handles
//! instead of holding references between cards and players, so all
//! relational state stays index-based and cycle-free.

use crate::card::CharacterCard;
use crate::ids::PlayerId;
use crate::notify::{Notification, NotificationKind};
use crate::player::Player;
use crate::turn::TurnState;

/// Non-owning handle to a character on a player's field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterHandle {
    pub player: PlayerId,
    pub index: usize,
}

impl CharacterHandle {
    pub fn new(player: PlayerId, index: usize) -> Self {
        Self { player, index }
    }
}

/// Complete state of a two-player duel.
#[derive(Debug, Clone)]
pub struct DuelState {
    players: [Player; 2],
    pub turn: TurnState,
    notifications: Vec<Notification>,
}

impl DuelState {
    /// Creates a fresh duel. The first-named player takes the first turn.
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        let p0 = PlayerId::from_index(0);
        let p1 = PlayerId::from_index(1);
        Self {
            players: [Player::new(p0, first), Player::new(p1, second)],
            turn: TurnState::new(p0),
            notifications: Vec::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Simultaneous mutable access to a player and their opponent.
    pub fn pair_mut(&mut self, id: PlayerId) -> (&mut Player, &mut Player) {
        let (left, right) = self.players.split_at_mut(1);
        if id.index() == 0 {
            (&mut left[0], &mut right[0])
        } else {
            (&mut right[0], &mut left[0])
        }
    }

    pub fn character(&self, handle: CharacterHandle) -> Option<&CharacterCard> {
        self.player(handle.player).field.get(handle.index)
    }

    pub fn character_mut(&mut self, handle: CharacterHandle) -> Option<&mut CharacterCard> {
        self.player_mut(handle.player).field.get_mut(handle.index)
    }

    /// Queues a transient message for the presentation layer.
    pub fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.notifications.push(Notification::new(kind, message));
    }

    /// Hands every queued notification to the caller.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// The defeated player, if either life total has reached zero.
    pub fn defeated_player(&self) -> Option<PlayerId> {
        self.players.iter().find(|p| p.is_defeated()).map(|p| p.id)
    }
}

//! Battle resolution: the attack guards, the damage contract, and a
//! default resolver.
//!
//! The engine owns the guards (per-turn attack flag, turn gate) and the
//! `take_damage` contract; the actual combat arithmetic is delegated to a
//! `BattleResolver` so hosts can swap it out. The attacker's per-turn flag
//! is set immediately after delegation regardless of what the resolver
//! did: the *attempt* is what is idempotent, not the damage.

use crate::ids::PlayerId;
use crate::lifecycle;
use crate::notify::NotificationKind;
use crate::state::{CharacterHandle, DuelState};
use crate::stats;
use crate::turn;

/// Where damage came from; selects the protection branch in `take_damage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Battle,
    Spell,
    /// Card effects and other non-battle, non-spell sources.
    Effect,
}

/// What a resolver did with one attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleReport {
    pub damage: i32,
    pub defender_destroyed: bool,
}

/// Resolves the two attack shapes. Implementations receive the duel state
/// after the guards have passed and may mutate it freely; the engine does
/// not inspect the report beyond handing it back to the caller.
pub trait BattleResolver {
    fn resolve_character_attack(
        &mut self,
        state: &mut DuelState,
        attacker: CharacterHandle,
        defender: CharacterHandle,
    ) -> BattleReport;

    fn resolve_direct_attack(
        &mut self,
        state: &mut DuelState,
        attacker: CharacterHandle,
        defending_player: PlayerId,
    ) -> BattleReport;
}

/// Outcome of an attack request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    Resolved(BattleReport),
    /// The attacker has already attacked this turn. No-op, not an error.
    AlreadyAttacked,
    /// The turn gate forbids attacking right now.
    NotAllowed,
    /// The attacker or target handle does not resolve.
    MissingCombatant,
}

/// Character-vs-character attack.
pub fn attack<R: BattleResolver>(
    state: &mut DuelState,
    resolver: &mut R,
    attacker: CharacterHandle,
    defender: CharacterHandle,
) -> AttackOutcome {
    let Some(attacking) = state.character(attacker) else {
        return AttackOutcome::MissingCombatant;
    };
    if state.character(defender).is_none() {
        return AttackOutcome::MissingCombatant;
    }
    if !turn::can_attack(state, attacker.player) {
        return AttackOutcome::NotAllowed;
    }
    if attacking.has_attacked_this_turn {
        return AttackOutcome::AlreadyAttacked;
    }

    let report = resolver.resolve_character_attack(state, attacker, defender);
    mark_attacked(state, attacker);
    AttackOutcome::Resolved(report)
}

/// Character-vs-player (direct) attack.
pub fn attack_player<R: BattleResolver>(
    state: &mut DuelState,
    resolver: &mut R,
    attacker: CharacterHandle,
    defending_player: PlayerId,
) -> AttackOutcome {
    let Some(attacking) = state.character(attacker) else {
        return AttackOutcome::MissingCombatant;
    };
    if !turn::can_attack(state, attacker.player) {
        return AttackOutcome::NotAllowed;
    }
    if attacking.has_attacked_this_turn {
        return AttackOutcome::AlreadyAttacked;
    }

    let report = resolver.resolve_direct_attack(state, attacker, defending_player);
    mark_attacked(state, attacker);
    AttackOutcome::Resolved(report)
}

/// Flag set after delegation, whatever the resolver reported.
fn mark_attacked(state: &mut DuelState, attacker: CharacterHandle) {
    if let Some(character) = state.character_mut(attacker) {
        character.has_attacked_this_turn = true;
    }
}

/// Applies damage to a character and reports whether it was destroyed.
///
/// Battle-sourced damage checks the owner-side field cards for the legacy
/// battle-protection flag: when set, the hp subtraction still happens but
/// destruction is suppressed. Spell-sourced damage checks the spell
/// protection flag; that branch skips the hp subtraction entirely. Both
/// flags currently read false unconditionally, so these branches are
/// unreachable with today's card data; the contract keeps them anyway.
/// Absent protection: subtract, destroyed iff the resulting hp is zero.
pub fn take_damage(
    state: &mut DuelState,
    handle: CharacterHandle,
    amount: i32,
    source: DamageSource,
) -> bool {
    let owner = handle.player;
    match source {
        DamageSource::Battle => {
            let protected = state
                .player(owner)
                .field_slots
                .iter()
                .flatten()
                .any(|field_card| field_card.battle_protection());
            if protected {
                log::info!("battle protection active: damage applied, destruction suppressed");
                if let Some(character) = state.character_mut(handle) {
                    character.subtract_hp(amount);
                }
                return false;
            }
        }
        DamageSource::Spell => {
            let protected = state
                .player(owner)
                .field_slots
                .iter()
                .flatten()
                .any(|field_card| field_card.spell_protection());
            if protected {
                log::info!("spell protection active: damage and destruction suppressed");
                return false;
            }
        }
        DamageSource::Effect => {}
    }

    match state.character_mut(handle) {
        Some(character) => character.subtract_hp(amount) <= 0,
        None => false,
    }
}

/// Default combat arithmetic: the defender takes the attacker's effective
/// attack minus its own effective defense (floored at zero) as battle
/// damage; a destroyed defender runs its destruction hook and is buried.
/// Direct attacks subtract the attacker's effective attack from the
/// defending player's life.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleBattleResolver;

impl BattleResolver for SimpleBattleResolver {
    fn resolve_character_attack(
        &mut self,
        state: &mut DuelState,
        attacker: CharacterHandle,
        defender: CharacterHandle,
    ) -> BattleReport {
        let attack = stats::effective_attack(state, attacker);
        let defense = stats::effective_defense(state, defender);
        let damage = (attack - defense).max(0);

        let destroyed = take_damage(state, defender, damage, DamageSource::Battle);
        state.notify(
            NotificationKind::Battle,
            format!("attack dealt {} battle damage", damage),
        );
        if destroyed {
            lifecycle::destroy_character(state, defender);
        }
        BattleReport { damage, defender_destroyed: destroyed }
    }

    fn resolve_direct_attack(
        &mut self,
        state: &mut DuelState,
        attacker: CharacterHandle,
        defending_player: PlayerId,
    ) -> BattleReport {
        let damage = stats::effective_attack(state, attacker);
        state.player_mut(defending_player).take_damage(damage);
        state.notify(
            NotificationKind::Battle,
            format!("{} took {} battle damage", state.player(defending_player).name, damage),
        );
        BattleReport { damage, defender_destroyed: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CharacterCard, FieldCard};
    use crate::effect::Effect;
    use crate::element::Element;
    use crate::ids::CardId;
    use crate::player::STARTING_LIFE;
    use crate::turn::advance_phase;

    fn fighter(id: u32, attack: i32, defense: i32) -> CharacterCard {
        CharacterCard::new(CardId::from_raw(id), "Fighter", 3, Element::Fire, attack, defense)
    }

    fn setup() -> (DuelState, PlayerId, PlayerId) {
        let mut state = DuelState::new("Aria", "Bram");
        advance_phase(&mut state); // into p0's Action phase
        (state, PlayerId::from_index(0), PlayerId::from_index(1))
    }

    /// Resolver that does nothing; used to observe the guard behavior.
    struct InertResolver {
        calls: usize,
    }

    impl BattleResolver for InertResolver {
        fn resolve_character_attack(
            &mut self,
            _state: &mut DuelState,
            _attacker: CharacterHandle,
            _defender: CharacterHandle,
        ) -> BattleReport {
            self.calls += 1;
            BattleReport { damage: 0, defender_destroyed: false }
        }

        fn resolve_direct_attack(
            &mut self,
            _state: &mut DuelState,
            _attacker: CharacterHandle,
            _defending_player: PlayerId,
        ) -> BattleReport {
            self.calls += 1;
            BattleReport { damage: 0, defender_destroyed: false }
        }
    }

    #[test]
    fn test_attack_flag_suppresses_second_attack() {
        let (mut state, p0, p1) = setup();
        state.player_mut(p0).field.push(fighter(1, 1000, 500));
        state.player_mut(p1).field.push(fighter(2, 500, 500));
        let mut resolver = InertResolver { calls: 0 };
        let attacker = CharacterHandle::new(p0, 0);
        let defender = CharacterHandle::new(p1, 0);

        assert!(matches!(
            attack(&mut state, &mut resolver, attacker, defender),
            AttackOutcome::Resolved(_)
        ));
        // The flag is set even though the inert resolver did nothing.
        assert!(state.character(attacker).unwrap().has_attacked_this_turn);

        assert_eq!(
            attack(&mut state, &mut resolver, attacker, defender),
            AttackOutcome::AlreadyAttacked
        );
        assert_eq!(
            attack_player(&mut state, &mut resolver, attacker, p1),
            AttackOutcome::AlreadyAttacked
        );
        assert_eq!(resolver.calls, 1);
    }

    #[test]
    fn test_attack_respects_turn_gate() {
        let mut state = DuelState::new("Aria", "Bram");
        let p0 = PlayerId::from_index(0);
        let p1 = PlayerId::from_index(1);
        state.player_mut(p0).field.push(fighter(1, 1000, 500));
        state.player_mut(p1).field.push(fighter(2, 500, 500));
        let mut resolver = InertResolver { calls: 0 };

        // Draw phase: not allowed, flag untouched.
        assert_eq!(
            attack(&mut state, &mut resolver, CharacterHandle::new(p0, 0), CharacterHandle::new(p1, 0)),
            AttackOutcome::NotAllowed
        );
        assert!(!state.player(p0).field[0].has_attacked_this_turn);

        advance_phase(&mut state);
        // Non-active player's character cannot attack either.
        assert_eq!(
            attack(&mut state, &mut resolver, CharacterHandle::new(p1, 0), CharacterHandle::new(p0, 0)),
            AttackOutcome::NotAllowed
        );
    }

    #[test]
    fn test_missing_combatants() {
        let (mut state, p0, p1) = setup();
        let mut resolver = InertResolver { calls: 0 };
        assert_eq!(
            attack(&mut state, &mut resolver, CharacterHandle::new(p0, 0), CharacterHandle::new(p1, 0)),
            AttackOutcome::MissingCombatant
        );
    }

    #[test]
    fn test_simple_resolver_character_combat() {
        let (mut state, p0, p1) = setup();
        state.player_mut(p0).field.push(fighter(1, 1500, 500));
        let mut defender = fighter(2, 400, 1000);
        defender.enter_play(p1, p0);
        state.player_mut(p1).field.push(defender);

        let mut resolver = SimpleBattleResolver;
        let outcome = attack(
            &mut state,
            &mut resolver,
            CharacterHandle::new(p0, 0),
            CharacterHandle::new(p1, 0),
        );

        // 1500 attack vs 1000 defense: 500 damage against 1000 hp.
        let AttackOutcome::Resolved(report) = outcome else {
            panic!("expected a resolved attack, got {:?}", outcome);
        };
        assert_eq!(report.damage, 500);
        assert!(!report.defender_destroyed);
        assert_eq!(state.player(p1).field[0].hp(), 500);
    }

    #[test]
    fn test_simple_resolver_destroys_and_triggers() {
        let (mut state, p0, p1) = setup();
        state.player_mut(p0).field.push(fighter(1, 2000, 500));
        let mut bomb = fighter(2, 400, 600);
        bomb.effects = vec![Effect::Destruction { damage: 700 }];
        bomb.enter_play(p1, p0);
        state.player_mut(p1).field.push(bomb);

        let mut resolver = SimpleBattleResolver;
        let outcome = attack(
            &mut state,
            &mut resolver,
            CharacterHandle::new(p0, 0),
            CharacterHandle::new(p1, 0),
        );

        let AttackOutcome::Resolved(report) = outcome else {
            panic!("expected a resolved attack, got {:?}", outcome);
        };
        assert!(report.defender_destroyed);
        assert!(state.player(p1).field.is_empty());
        assert_eq!(state.player(p1).graveyard.len(), 1);
        // The destroyed defender's Destruction effect hit its opponent (p0).
        assert_eq!(state.player(p0).life, STARTING_LIFE - 700);
    }

    #[test]
    fn test_simple_resolver_direct_attack() {
        let (mut state, p0, p1) = setup();
        state.player_mut(p0).field.push(fighter(1, 1200, 500));

        let mut resolver = SimpleBattleResolver;
        let outcome = attack_player(&mut state, &mut resolver, CharacterHandle::new(p0, 0), p1);

        let AttackOutcome::Resolved(report) = outcome else {
            panic!("expected a resolved attack, got {:?}", outcome);
        };
        assert_eq!(report.damage, 1200);
        assert_eq!(state.player(p1).life, STARTING_LIFE - 1200);
    }

    #[test]
    fn test_take_damage_without_protection() {
        let (mut state, p0, _) = setup();
        state.player_mut(p0).field.push(fighter(1, 500, 800));
        let handle = CharacterHandle::new(p0, 0);

        assert!(!take_damage(&mut state, handle, 300, DamageSource::Battle));
        assert_eq!(state.character(handle).unwrap().hp(), 500);

        assert!(take_damage(&mut state, handle, 500, DamageSource::Spell));
        assert_eq!(state.character(handle).unwrap().hp(), 0);
    }

    #[test]
    fn test_legacy_protection_flags_are_inert() {
        // A field card with the stored legacy flags set behaves exactly as
        // no protection: hp drops and destruction is reported normally.
        let (mut state, p0, _) = setup();
        let mut relic = FieldCard::new(CardId::from_raw(10), "Relic Wall", 1);
        relic.legacy_battle_protection = true;
        relic.legacy_spell_protection = true;
        state.player_mut(p0).field_slots[0] = Some(relic);
        state.player_mut(p0).field.push(fighter(1, 500, 400));
        let handle = CharacterHandle::new(p0, 0);

        assert!(!take_damage(&mut state, handle, 100, DamageSource::Battle));
        assert_eq!(state.character(handle).unwrap().hp(), 300);

        assert!(take_damage(&mut state, handle, 300, DamageSource::Spell));
    }

    #[test]
    fn test_effect_damage_has_no_protection_branch() {
        let (mut state, p0, _) = setup();
        state.player_mut(p0).field.push(fighter(1, 500, 100));
        assert!(take_damage(&mut state, CharacterHandle::new(p0, 0), 150, DamageSource::Effect));
    }
}

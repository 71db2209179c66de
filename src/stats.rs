//! The stat modifier engine.
//!
//! A character's effective attack/defense starts from its *current* value
//! (permanent bonuses already folded in) and adds the modifiers of every
//! qualifying active field card: first the slots on the character owner's
//! side, then the opponent-side slots that reach across the field. The
//! final result clamps at zero. Nothing here is cached; every query folds
//! fresh, so field-card churn needs no invalidation step.

use crate::card::{CharacterCard, FieldCard};
use crate::state::{CharacterHandle, DuelState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Attack,
    Defense,
}

/// Effective attack after folding active field-card modifiers. Never
/// negative. Returns 0 for a dangling handle.
pub fn effective_attack(state: &DuelState, handle: CharacterHandle) -> i32 {
    fold(state, handle, Stat::Attack)
}

/// Effective defense after folding active field-card modifiers. Never
/// negative. Returns 0 for a dangling handle.
pub fn effective_defense(state: &DuelState, handle: CharacterHandle) -> i32 {
    fold(state, handle, Stat::Defense)
}

/// True if the field card's filters admit the character.
///
/// `on_owner_side` says whether the character belongs to the field card's
/// owner; the matching scope flag must be set. A declared category filter
/// requires at least one shared category, a declared element filter
/// requires the character's element to be listed.
pub fn field_card_applies(
    field: &FieldCard,
    character: &CharacterCard,
    on_owner_side: bool,
) -> bool {
    let scope_ok = if on_owner_side {
        field.affects_own_field
    } else {
        field.affects_opponent_field
    };
    if !scope_ok {
        return false;
    }
    if !field.target_categories.is_empty()
        && !field
            .target_categories
            .iter()
            .any(|category| character.has_category(category))
    {
        return false;
    }
    if !field.target_elements.is_empty() && !field.target_elements.contains(&character.element) {
        return false;
    }
    true
}

fn fold(state: &DuelState, handle: CharacterHandle, stat: Stat) -> i32 {
    let Some(character) = state.character(handle) else {
        return 0;
    };
    let owner = handle.player;
    let opponent = owner.opponent();

    let mut total = match stat {
        Stat::Attack => character.attack(),
        Stat::Defense => character.defense(),
    };

    // Own-side slots first, in slot order. This evaluation order is
    // observable and load-bearing; keep it.
    for field_card in state.player(owner).field_slots.iter().flatten() {
        if field_card.modifies_stats && field_card_applies(field_card, character, true) {
            total += modifier(field_card, stat);
        }
    }
    // Then opponent-side slots that reach across the field.
    for field_card in state.player(opponent).field_slots.iter().flatten() {
        if field_card.modifies_stats
            && field_card.affects_opponent_field
            && field_card_applies(field_card, character, false)
        {
            total += modifier(field_card, stat);
        }
    }

    total.max(0)
}

fn modifier(field_card: &FieldCard, stat: Stat) -> i32 {
    match stat {
        Stat::Attack => field_card.attack_modifier,
        Stat::Defense => field_card.defense_modifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::ids::{CardId, CategoryId, PlayerId};

    fn knight() -> CharacterCard {
        CharacterCard::new(CardId::from_raw(1), "Knight", 3, Element::Light, 1000, 800)
            .with_categories(vec![CategoryId::from("guardians")])
    }

    fn setup() -> (DuelState, CharacterHandle, PlayerId, PlayerId) {
        let mut state = DuelState::new("Aria", "Bram");
        let p0 = PlayerId::from_index(0);
        let p1 = PlayerId::from_index(1);
        state.player_mut(p0).field.push(knight());
        (state, CharacterHandle::new(p0, 0), p0, p1)
    }

    #[test]
    fn test_no_field_cards_yields_current_stats() {
        let (state, handle, _, _) = setup();
        assert_eq!(effective_attack(&state, handle), 1000);
        assert_eq!(effective_defense(&state, handle), 800);
    }

    #[test]
    fn test_own_side_modifier_applies() {
        let (mut state, handle, p0, _) = setup();
        state.player_mut(p0).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(10), "Banner", 2).with_stat_modifiers(500, 200),
        );
        assert_eq!(effective_attack(&state, handle), 1500);
        assert_eq!(effective_defense(&state, handle), 1000);
    }

    #[test]
    fn test_clamp_to_zero_with_large_debuff() {
        // Base 1000 attack, own-side +500, opponent-side -2000 across the
        // field with no filters: clamps at 0, never negative.
        let (mut state, handle, p0, p1) = setup();
        state.player_mut(p0).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(10), "Banner", 2).with_stat_modifiers(500, 0),
        );
        state.player_mut(p1).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(11), "Dread Fog", 3)
                .with_stat_modifiers(-2000, 0)
                .with_scope(false, true),
        );
        assert_eq!(effective_attack(&state, handle), 0);
    }

    #[test]
    fn test_opponent_side_requires_cross_field_scope() {
        let (mut state, handle, _, p1) = setup();
        // Opponent field card that only affects its own side: invisible to us.
        state.player_mut(p1).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(11), "Home Banner", 2).with_stat_modifiers(-400, -400),
        );
        assert_eq!(effective_attack(&state, handle), 1000);
    }

    #[test]
    fn test_own_side_requires_own_scope() {
        let (mut state, handle, p0, _) = setup();
        // An own-side card declared for the opponent's field only.
        state.player_mut(p0).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(10), "Siege Engine", 2)
                .with_stat_modifiers(-300, 0)
                .with_scope(false, true),
        );
        assert_eq!(effective_attack(&state, handle), 1000);
    }

    #[test]
    fn test_category_filter() {
        let (mut state, handle, p0, _) = setup();
        state.player_mut(p0).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(10), "Guardian Oath", 2)
                .with_stat_modifiers(300, 300)
                .with_target_categories(vec![CategoryId::from("guardians")]),
        );
        state.player_mut(p0).field_slots[1] = Some(
            FieldCard::new(CardId::from_raw(11), "Dragon Roost", 2)
                .with_stat_modifiers(900, 0)
                .with_target_categories(vec![CategoryId::from("dragons")]),
        );
        // Only the guardians card matches.
        assert_eq!(effective_attack(&state, handle), 1300);
        assert_eq!(effective_defense(&state, handle), 1100);
    }

    #[test]
    fn test_element_filter() {
        let (mut state, handle, p0, _) = setup();
        state.player_mut(p0).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(10), "Sunwell", 2)
                .with_stat_modifiers(250, 0)
                .with_target_elements(vec![Element::Light, Element::Fire]),
        );
        state.player_mut(p0).field_slots[1] = Some(
            FieldCard::new(CardId::from_raw(11), "Tidal Shrine", 2)
                .with_stat_modifiers(400, 0)
                .with_target_elements(vec![Element::Water]),
        );
        assert_eq!(effective_attack(&state, handle), 1250);
    }

    #[test]
    fn test_modifiers_without_flag_are_ignored() {
        let (mut state, handle, p0, _) = setup();
        let mut inert = FieldCard::new(CardId::from_raw(10), "Inert", 1);
        inert.attack_modifier = 9999;
        // modifies_stats stays false.
        state.player_mut(p0).field_slots[0] = Some(inert);
        assert_eq!(effective_attack(&state, handle), 1000);
    }

    #[test]
    fn test_fold_is_reproducible() {
        let (mut state, handle, p0, p1) = setup();
        state.player_mut(p0).field_slots[2] = Some(
            FieldCard::new(CardId::from_raw(10), "Banner", 2).with_stat_modifiers(100, 100),
        );
        state.player_mut(p1).field_slots[0] = Some(
            FieldCard::new(CardId::from_raw(11), "Fog", 2)
                .with_stat_modifiers(-50, -50)
                .with_scope(false, true),
        );
        let first = effective_attack(&state, handle);
        for _ in 0..10 {
            assert_eq!(effective_attack(&state, handle), first);
        }
        assert_eq!(first, 1050);
    }

    #[test]
    fn test_dangling_handle_reads_zero() {
        let (state, _, p0, _) = setup();
        assert_eq!(effective_attack(&state, CharacterHandle::new(p0, 7)), 0);
    }
}

//! Starter card definitions.
//!
//! Each card is a small constructor function so decks and tests can pull
//! exactly what they need. Definition ids 1-99 are reserved for this set;
//! content loaded from external card sets starts at 100.

use crate::card::{CharacterCard, FieldCard, SpellCard, SpellKind};
use crate::category::{Category, CategoryRegistry};
use crate::effect::Effect;
use crate::element::Element;
use crate::ids::{CardId, CategoryId};
use crate::turn::Phase;

pub fn dragons() -> CategoryId {
    CategoryId::from("dragons")
}

pub fn spirits() -> CategoryId {
    CategoryId::from("spirits")
}

pub fn guardians() -> CategoryId {
    CategoryId::from("guardians")
}

/// The categories referenced by the starter set.
pub fn starter_categories() -> CategoryRegistry {
    let mut registry = CategoryRegistry::new();
    registry.register(
        Category::new("dragons", "Dragons")
            .with_color("#c03a2b")
            .with_icon("cat_dragons"),
    );
    registry.register(
        Category::new("spirits", "Spirits")
            .with_color("#7fb3d5")
            .with_icon("cat_spirits"),
    );
    registry.register(
        Category::new("guardians", "Guardians")
            .with_color("#b7950b")
            .with_icon("cat_guardians")
            .with_related(vec![CategoryId::from("spirits")]),
    );
    registry
}

// === Characters ===

pub fn ember_drake() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(1), "Ember Drake", 3, Element::Fire, 1200, 900)
        .with_description("A young drake that singes everything it circles.")
        .with_artwork("char_ember_drake")
        .with_categories(vec![dragons()])
}

pub fn tide_caller() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(2), "Tide Caller", 2, Element::Water, 700, 1100)
        .with_description("Calls the tide in; the tide listens.")
        .with_artwork("char_tide_caller")
        .with_categories(vec![spirits()])
        .with_effects(vec![Effect::CategoryBoost {
            category: spirits(),
            attack: 200,
            defense: 0,
        }])
}

pub fn stone_warden() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(3), "Stone Warden", 4, Element::Earth, 800, 1600)
        .with_description("It has guarded the pass longer than the pass has existed.")
        .with_artwork("char_stone_warden")
        .with_categories(vec![guardians()])
}

pub fn gale_harpy() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(4), "Gale Harpy", 2, Element::Wind, 900, 600)
        .with_artwork("char_gale_harpy")
        .with_categories(vec![spirits()])
}

pub fn lumen_paladin() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(5), "Lumen Paladin", 5, Element::Light, 1700, 1400)
        .with_description("Oathbound to fall only once.")
        .with_artwork("char_lumen_paladin")
        .with_categories(vec![guardians()])
        .with_effects(vec![Effect::Destruction { damage: 500 }])
}

pub fn grave_shade() -> CharacterCard {
    CharacterCard::new(CardId::from_raw(6), "Grave Shade", 1, Element::Dark, 500, 400)
        .with_artwork("char_grave_shade")
}

// === Field cards ===

pub fn dragons_roost() -> FieldCard {
    FieldCard::new(CardId::from_raw(20), "Dragons' Roost", 3)
        .with_description("Dragons fight harder above their own nests.")
        .with_artwork("field_dragons_roost")
        .with_stat_modifiers(500, 0)
        .with_target_categories(vec![dragons()])
}

pub fn ancient_banner() -> FieldCard {
    FieldCard::new(CardId::from_raw(21), "Ancient Banner", 2)
        .with_artwork("field_ancient_banner")
        .with_stat_modifiers(300, 300)
        .with_effects(vec![Effect::Removal { draw: 1 }])
}

pub fn creeping_mire() -> FieldCard {
    FieldCard::new(CardId::from_raw(22), "Creeping Mire", 3)
        .with_description("The mire drags at the enemy line.")
        .with_artwork("field_creeping_mire")
        .with_stat_modifiers(-400, -400)
        .with_scope(false, true)
}

// === Spells ===

pub fn scroll_of_renewal() -> SpellCard {
    SpellCard::new(CardId::from_raw(40), "Scroll of Renewal", 1, SpellKind::Draw, 2)
        .with_description("Draw 2 cards.")
        .with_artwork("spell_scroll_of_renewal")
}

pub fn blessing_of_might() -> SpellCard {
    SpellCard::new(CardId::from_raw(41), "Blessing of Might", 2, SpellKind::Buff, 500)
        .with_description("A character you control gains 500 attack and defense.")
        .with_artwork("spell_blessing_of_might")
}

pub fn sear_the_gates() -> SpellCard {
    SpellCard::new(CardId::from_raw(42), "Sear the Gates", 3, SpellKind::LifeDamage, 800)
        .with_description("The opposing player takes 800 damage.")
        .with_artwork("spell_sear_the_gates")
}

pub fn rite_of_return() -> SpellCard {
    SpellCard::new(CardId::from_raw(43), "Rite of Return", 4, SpellKind::Resurrection, 0)
        .with_description("Return a character from your graveyard to the field.")
        .with_artwork("spell_rite_of_return")
}

pub fn sudden_squall() -> SpellCard {
    SpellCard::new(CardId::from_raw(44), "Sudden Squall", 2, SpellKind::Debuff, 300)
        .with_description("An enemy character loses 300 attack and defense.")
        .with_artwork("spell_sudden_squall")
        .with_allowed_phases(vec![Phase::Action, Phase::End])
        .allowed_on_opponent_turn()
}

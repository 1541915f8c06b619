use crate::domain::model::CardEntity;
use std::sync::LazyLock;

pub const CARD_COUNT: usize = 78;

const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

const SUITS: [&str; 4] = ["Wands", "Cups", "Swords", "Pentacles"];

const NUMBERED_RANKS: [&str; 10] = [
    "Ace", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten",
];

const COURT_RANKS: [&str; 4] = ["Page", "Knight", "Queen", "King"];

static ALL_CARDS: LazyLock<Vec<CardEntity>> = LazyLock::new(build_catalog);

fn build_catalog() -> Vec<CardEntity> {
    let majors = MAJOR_ARCANA.iter().map(|name| CardEntity::new(*name));

    let minors = SUITS.iter().flat_map(|suit| {
        NUMBERED_RANKS
            .iter()
            .chain(COURT_RANKS.iter())
            .map(move |rank| CardEntity::new(format!("{} of {}", rank, suit)))
    });

    majors.chain(minors).collect()
}

/// The full deck: 22 major arcana followed by the minor arcana suit by suit.
pub fn all_cards() -> &'static [CardEntity] {
    &ALL_CARDS
}

pub fn find_card(name: &str) -> Option<&'static CardEntity> {
    all_cards().iter().find(|card| card.name == name)
}

use crate::core::catalog::all_cards;
use crate::domain::model::DrawnCard;
use rand::Rng;

/// Pick one card uniformly from the deck and flip a fair coin for orientation.
pub fn draw_card<R: Rng + ?Sized>(rng: &mut R) -> DrawnCard {
    let cards = all_cards();
    let index = rng.random_range(0..cards.len());
    let is_reversed = rng.random_bool(0.5);

    DrawnCard {
        card: cards[index].clone(),
        is_reversed,
    }
}

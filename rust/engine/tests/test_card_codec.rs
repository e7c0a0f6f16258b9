use std::collections::HashSet;

use clubhub_engine::cards::{full_deck, Card, Rank, Suit, DECK_SIZE};

#[test]
fn decode_encode_round_trip_for_every_card() {
    for i in 0..DECK_SIZE as u8 {
        let card = Card::from_index(i).expect("index in range");
        let code = card.encode();
        assert_eq!(Card::decode(&code), Ok(card), "code {code}");
    }
}

#[test]
fn encode_is_injective() {
    let codes: HashSet<String> = full_deck().iter().map(|c| c.encode()).collect();
    assert_eq!(codes.len(), DECK_SIZE);
    assert!(codes.iter().all(|c| c.len() == 2));
}

#[test]
fn rank_and_suit_are_derived_from_index() {
    let card = Card::decode("JD").unwrap();
    assert_eq!(card.suit(), Suit::Diamonds);
    assert_eq!(card.rank(), Rank::Jack);
    assert_eq!(card.index(), 26 + 9);
    assert_eq!(Card::new(Suit::Hearts, Rank::Two).to_string(), "2H");
}

#[test]
fn ordering_within_a_suit_is_by_rank() {
    let order = ["2C", "3C", "4C", "5C", "6C", "7C", "8C", "9C", "TC", "JC", "QC", "KC", "AC"];
    let cards: Vec<Card> = order.iter().map(|c| c.parse().unwrap()).collect();
    assert!(cards.windows(2).all(|w| w[0] < w[1]));
    assert!(cards.iter().all(|c| c.is_club()));
}

#[test]
fn lowercase_and_ten_as_digits_are_invalid() {
    for bad in ["2s", "th", "10H", "AHx", "A"] {
        assert!(bad.parse::<Card>().is_err(), "{bad}");
    }
}

use crate::cards::{Card, Suit};
use crate::errors::GameError;
use crate::game::{Allocation, Play};
use crate::player::Seat;

/// Validates a card a player wants to play against the allocation table.
///
/// The player must hold the card. When a lead suit is set and the player
/// still holds any card of that suit, the card must be of the lead suit.
/// Holdings are read from the authoritative allocation table, never from
/// anything the player claims.
///
/// # Errors
///
/// - [`GameError::CardNotHeld`] - the card is not allocated to `seat`
/// - [`GameError::MustFollowSuit`] - off-suit play while holding the lead suit
///
/// # Examples
///
/// ```
/// use clubhub_engine::cards::{Card, Suit};
/// use clubhub_engine::errors::GameError;
/// use clubhub_engine::game::Allocation;
/// use clubhub_engine::player::Seat;
/// use clubhub_engine::rules::check_play;
///
/// let c = |s: &str| Card::decode(s).unwrap();
/// let alloc = Allocation::from_hands(&[vec![c("4H"), c("9C")]]);
/// let a = Seat::FIRST;
///
/// assert!(check_play(&alloc, a, c("9C"), None).is_ok());
/// assert!(check_play(&alloc, a, c("4H"), Some(Suit::Hearts)).is_ok());
/// assert!(matches!(
///     check_play(&alloc, a, c("9C"), Some(Suit::Hearts)),
///     Err(GameError::MustFollowSuit { .. })
/// ));
/// assert!(matches!(
///     check_play(&alloc, a, c("2S"), None),
///     Err(GameError::CardNotHeld { .. })
/// ));
/// ```
pub fn check_play(
    alloc: &Allocation,
    seat: Seat,
    card: Card,
    lead: Option<Suit>,
) -> Result<(), GameError> {
    if !alloc.holds(seat, card) {
        return Err(GameError::CardNotHeld { seat, card });
    }
    if let Some(lead) = lead {
        if card.suit() != lead && alloc.holds_suit(seat, lead) {
            return Err(GameError::MustFollowSuit { seat, card, lead });
        }
    }
    Ok(())
}

/// The seat whose card ranks highest among plays of the lead suit (the
/// suit of the first play). `None` for an empty trick.
pub fn trick_winner(plays: &[Play]) -> Option<Seat> {
    let lead = plays.first()?.card.suit();
    plays
        .iter()
        .filter(|p| p.card.suit() == lead)
        .max_by_key(|p| p.card.rank())
        .map(|p| p.seat)
}

/// Points a trick is worth: one per Club in it, whoever played them.
pub fn trick_points(plays: &[Play]) -> u32 {
    plays.iter().filter(|p| p.card.is_club()).count() as u32
}

/// Decides whether the game is over and who won.
///
/// The game ends once any score is at or above `threshold`. Clubs are to be
/// avoided, so the winners are every seat tied for the lowest score, in
/// seat order.
///
/// # Examples
///
/// ```
/// use clubhub_engine::rules::winners;
///
/// let won = winners(&[10, 6, 6, 9], 10).unwrap();
/// let letters: String = won.iter().map(|s| s.letter()).collect();
/// assert_eq!(letters, "BC");
///
/// assert!(winners(&[9, 6, 6, 9], 10).is_none());
/// ```
pub fn winners(scores: &[u32], threshold: u32) -> Option<Vec<Seat>> {
    let max = scores.iter().copied().max()?;
    if max < threshold {
        return None;
    }
    let min = scores.iter().copied().min()?;
    Some(
        scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s == min)
            .map(|(i, _)| Seat::at(i))
            .collect(),
    )
}

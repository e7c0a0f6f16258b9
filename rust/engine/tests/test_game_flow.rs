use clubhub_engine::cards::{full_deck, join_codes, Card};
use clubhub_engine::deck::DeckSource;
use clubhub_engine::engine::{Engine, TableState, TurnKind};
use clubhub_engine::errors::GameError;
use clubhub_engine::player::PlayerCount;
use clubhub_engine::rules::{trick_points, trick_winner};

fn rotated_text(by: usize) -> String {
    let mut cards = full_deck();
    cards.rotate_left(by);
    join_codes(&cards)
}

fn decks() -> DeckSource {
    let text = [rotated_text(0), rotated_text(7), rotated_text(20)].join("\n.\n");
    DeckSource::parse(&text).unwrap()
}

/// Highest legal card: exercises trick winners more than lowest-card play.
fn pick(engine: &Engine, seat: clubhub_engine::player::Seat) -> Card {
    let hand = engine.allocation().hand(seat);
    engine
        .lead_suit()
        .and_then(|suit| hand.highest_in(suit))
        .or_else(|| hand.iter().last())
        .expect("seat has cards while it is its turn")
}

fn play_game(players: usize, threshold: u32) -> Engine {
    let players = PlayerCount::new(players).unwrap();
    let mut decks = decks();
    let mut engine = Engine::new(players, threshold);
    loop {
        engine.deal(&decks.next_round(players)).unwrap();
        let before: Vec<u32> = engine.scores().to_vec();
        let mut round_points = 0;
        let mut tricks = 0;
        while let Some(turn) = engine.turn() {
            let card = pick(&engine, turn.seat);
            engine.play(turn.seat, card).unwrap();
            if matches!(engine.state(), TableState::Resolving { .. }) {
                let result = engine.resolve().unwrap();
                assert_eq!(trick_winner(&result.plays), Some(result.winner));
                assert_eq!(trick_points(&result.plays), result.points);
                assert_eq!(result.plays.len(), players.get());
                round_points += result.points;
                tricks += 1;
            }
        }
        assert_eq!(tricks, players.hand_size());
        assert_eq!(round_points, 13);
        let after = engine.scores();
        assert!(before.iter().zip(after).all(|(b, a)| a >= b));
        assert_eq!(
            after.iter().sum::<u32>(),
            before.iter().sum::<u32>() + 13
        );
        for seat in players.seats() {
            assert!(engine.allocation().hand(seat).is_empty());
        }
        if engine.score_round().unwrap().is_some() {
            return engine;
        }
        assert!(engine.round() < 100, "game should finish");
    }
}

#[test]
fn full_games_finish_for_every_table_size() {
    for players in 2..=4 {
        let engine = play_game(players, 20);
        let TableState::Finished { winners } = engine.state() else {
            panic!("expected finished state");
        };
        let min = engine.scores().iter().min().copied().unwrap();
        assert!(engine.scores().iter().any(|&s| s >= 20));
        assert!(!winners.is_empty());
        assert!(winners.iter().all(|w| engine.scores()[w.index()] == min));
        assert!(winners.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn follow_suit_accepts_exactly_the_lead_suit_when_held() {
    let players = PlayerCount::new(4).unwrap();
    let mut decks = decks();
    decks.next_round(players);
    let mut engine = Engine::new(players, 100);
    engine.deal(&decks.next_round(players)).unwrap();

    let leader = engine.turn().unwrap().seat;
    let lead = engine.allocation().hand(leader).iter().next().unwrap();
    engine.play(leader, lead).unwrap();

    let turn = engine.turn().unwrap();
    assert_eq!(turn.kind, TurnKind::Follow { last: false });
    let hand = engine.allocation().hand(turn.seat);
    let holds_lead = hand.has_suit(lead.suit());
    for card in hand.iter() {
        let mut probe = engine.clone();
        let result = probe.play(turn.seat, card);
        if !holds_lead || card.suit() == lead.suit() {
            assert!(result.is_ok(), "{card} should be accepted");
        } else {
            assert!(
                matches!(result, Err(GameError::MustFollowSuit { .. })),
                "{card} should be rejected"
            );
        }
    }
}

#[test]
fn last_follower_is_flagged() {
    let players = PlayerCount::new(3).unwrap();
    let mut decks = decks();
    let mut engine = Engine::new(players, 100);
    engine.deal(&decks.next_round(players)).unwrap();
    let mut kinds = Vec::new();
    while let Some(turn) = engine.turn() {
        kinds.push(turn.kind);
        let card = pick(&engine, turn.seat);
        engine.play(turn.seat, card).unwrap();
        if matches!(engine.state(), TableState::Resolving { .. }) {
            break;
        }
    }
    assert_eq!(
        kinds,
        vec![
            TurnKind::Lead,
            TurnKind::Follow { last: false },
            TurnKind::Follow { last: true }
        ]
    );
}

mod helpers;

use helpers::{Behaviour, Recorder, Scripted, SharedLog, Wanderer};
use sevens_engine::cards::{Card, Rank, Suit};
use sevens_engine::deck::{CardSource, LayoutSource, OpeningLayout, StandardDeck, OPENING_CARD};
use sevens_engine::engine::{Engine, RoundOutcome};
use sevens_engine::errors::EngineError;
use sevens_engine::player::PlayerId;
use sevens_engine::strategy::into_handle;
use sevens_engine::table::Table;
use sevens_engine::tournament::Tournament;

fn engine_with(seed: u64, behaviours: Vec<Behaviour>) -> (Engine, Vec<SharedLog>) {
    let mut engine = Engine::new(Some(seed));
    let mut logs = Vec::new();
    for (i, b) in behaviours.into_iter().enumerate() {
        let (strategy, log) = Scripted::new(b);
        engine.register_strategy(PlayerId(i), into_handle(strategy));
        logs.push(log);
    }
    (engine, logs)
}

#[test]
fn opening_card_is_removed_from_exactly_one_hand() {
    let (mut engine, _) = engine_with(3, (0..4).map(|_| Behaviour::AlwaysPass).collect());
    let mut rec = Recorder::default();
    engine.play_round_with(&mut rec).expect("round runs");

    assert!(rec.dealt.iter().all(|h| !h.contains(&OPENING_CARD)));
    let sizes: Vec<usize> = rec.dealt.iter().map(Vec::len).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 51);
    assert_eq!(sizes.iter().filter(|&&s| s == 12).count(), 1);
    assert_eq!(sizes.iter().filter(|&&s| s == 13).count(), 3);
    assert!(rec.tables[0].is_played(Suit::Diamonds, Rank::Seven));
    assert_eq!(rec.tables[0].played_count(), 1);
}

#[test]
fn all_passing_round_ends_after_one_rotation() {
    let (mut engine, logs) = engine_with(11, (0..4).map(|_| Behaviour::AlwaysPass).collect());
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    assert_eq!(result.outcome, RoundOutcome::AllPassed);
    assert_eq!(result.turns, 4);
    assert_eq!(result.moves, 0);

    // Ranking mirrors the dealt hand sizes: the opening card holder leads.
    let holder = rec.dealt.iter().position(|h| h.len() == 12).unwrap();
    assert_eq!(result.ranking[0].player, PlayerId(holder));
    assert_eq!(result.ranking[0].remaining, 12);
    let rest: Vec<PlayerId> = result.ranking[1..].iter().map(|s| s.player).collect();
    let mut expected: Vec<PlayerId> = PlayerId::all(4).filter(|p| p.index() != holder).collect();
    expected.sort();
    assert_eq!(rest, expected);

    // The first turn belongs to the seat after the dealer.
    assert_eq!(rec.turns[0], result.dealer.next(4));

    for (seat, log) in logs.iter().enumerate() {
        let log = log.borrow();
        assert_eq!(log.initialized, 1);
        assert_eq!(log.passes, vec![PlayerId(seat)]);
        assert!(log.moves.is_empty());
    }
}

#[test]
fn turns_follow_fixed_round_robin_order() {
    let (mut engine, _) = engine_with(5, (0..3).map(|_| Behaviour::FirstLegal).collect());
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    let first = result.dealer.next(3);
    for (i, player) in rec.turns.iter().enumerate() {
        assert_eq!(player.index(), (first.index() + i) % 3);
    }
    assert_eq!(rec.turns.len(), result.turns);
}

#[test]
fn every_move_is_broadcast_to_all_including_mover() {
    let (mut engine, logs) = engine_with(21, (0..4).map(|_| Behaviour::FirstLegal).collect());
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    assert_eq!(rec.plays.len(), result.moves);
    for log in &logs {
        assert_eq!(log.borrow().moves, rec.plays);
    }
}

#[test]
fn passes_are_only_reported_to_the_passing_player() {
    let (mut engine, logs) = engine_with(8, (0..4).map(|_| Behaviour::FirstLegal).collect());
    let mut rec = Recorder::default();
    engine.play_round_with(&mut rec).expect("round runs");

    for (seat, log) in logs.iter().enumerate() {
        let log = log.borrow();
        assert!(log.passes.iter().all(|&p| p == PlayerId(seat)));
        let own = rec.passes.iter().filter(|&&p| p == PlayerId(seat)).count();
        assert_eq!(log.passes.len(), own);
    }
}

#[test]
fn emptied_hand_ends_round_immediately() {
    // Find a seed where someone empties their hand, then check the winner.
    for seed in 0..50 {
        let (mut engine, _) = engine_with(seed, (0..2).map(|_| Behaviour::FirstLegal).collect());
        let mut rec = Recorder::default();
        let result = engine.play_round_with(&mut rec).expect("round runs");
        if let RoundOutcome::HandEmptied(winner) = result.outcome {
            assert_eq!(result.ranking[0].player, winner);
            assert_eq!(result.ranking[0].remaining, 0);
            assert!(result.ranking[1].remaining > 0);
            assert_eq!(rec.plays.last().map(|(p, _)| *p), Some(winner));
            return;
        }
    }
    panic!("no seed produced an emptied hand");
}

#[test]
fn out_of_range_selection_is_a_pass() {
    let behaviours = vec![
        Behaviour::OutOfRange,
        Behaviour::FirstLegal,
        Behaviour::FirstLegal,
    ];
    let (mut engine, logs) = engine_with(13, behaviours);
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    let dealt = rec.dealt[0].len();
    assert_eq!(result.score_of(PlayerId(0)), Some(dealt));
    assert!(rec.plays.iter().all(|(p, _)| *p != PlayerId(0)));

    let log = logs[0].borrow();
    assert_eq!(log.selections, log.passes.len());
    let turns_of_zero = rec.turns.iter().filter(|&&p| p == PlayerId(0)).count();
    assert_eq!(log.selections, turns_of_zero);
}

#[test]
fn illegal_selection_is_a_pass() {
    let behaviours = vec![Behaviour::Illegal, Behaviour::FirstLegal];
    let (mut engine, logs) = engine_with(17, behaviours);
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    assert!(rec.plays.iter().all(|(p, _)| *p != PlayerId(0)));
    assert_eq!(result.score_of(PlayerId(0)), Some(rec.dealt[0].len()));
    assert_eq!(logs[0].borrow().passes.len(), logs[0].borrow().selections);
}

#[test]
fn panicking_observer_does_not_abort_the_round() {
    let behaviours = vec![
        Behaviour::PanicOnObserve,
        Behaviour::FirstLegal,
        Behaviour::FirstLegal,
    ];
    let (mut engine, logs) = engine_with(29, behaviours);
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    assert!(result.moves > 0);
    assert_eq!(logs[1].borrow().moves, rec.plays);
    assert_eq!(logs[0].borrow().moves.len(), rec.plays.len());
}

#[test]
fn panicking_selection_is_a_pass() {
    let behaviours = vec![Behaviour::PanicOnSelect, Behaviour::FirstLegal];
    let (mut engine, logs) = engine_with(31, behaviours);
    let mut rec = Recorder::default();
    let result = engine.play_round_with(&mut rec).expect("round runs");

    assert!(rec.plays.iter().all(|(p, _)| *p != PlayerId(0)));
    assert_eq!(result.score_of(PlayerId(0)), Some(rec.dealt[0].len()));
    assert_eq!(logs[0].borrow().passes.len(), logs[0].borrow().selections);
}

#[test]
fn initialize_runs_once_per_round() {
    let (mut engine, logs) = engine_with(2, (0..3).map(|_| Behaviour::FirstLegal).collect());
    for _ in 0..3 {
        engine.play_round().expect("round runs");
    }
    for (seat, log) in logs.iter().enumerate() {
        assert_eq!(log.borrow().initialized, 3);
        assert_eq!(log.borrow().me, Some(PlayerId(seat)));
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed| {
        let (mut engine, _) = engine_with(seed, (0..4).map(|_| Behaviour::FirstLegal).collect());
        engine.play_round().expect("round runs")
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn named_ranking_follows_seat_names() {
    let (mut engine, _) = engine_with(4, (0..2).map(|_| Behaviour::AlwaysPass).collect());
    let result = engine.play_round().expect("round runs");
    let names = vec!["north".to_string(), "south".to_string()];
    let named = result.named(&names);
    assert_eq!(named.len(), 2);
    for ((name, remaining), score) in named.iter().zip(&result.ranking) {
        assert_eq!(name, &names[score.player.index()]);
        assert_eq!(*remaining, score.remaining);
    }
}

#[test]
fn too_few_players_is_rejected() {
    let (mut engine, logs) = engine_with(1, vec![Behaviour::FirstLegal]);
    let err = engine.play_round().unwrap_err();
    assert_eq!(
        err,
        EngineError::NotEnoughPlayers {
            minimum: 2,
            actual: 1
        }
    );
    assert_eq!(logs[0].borrow().initialized, 0);
}

#[test]
fn gap_in_seats_is_rejected() {
    let mut engine = Engine::new(Some(1));
    for seat in [0, 2] {
        let (s, _) = Scripted::new(Behaviour::FirstLegal);
        engine.register_strategy(PlayerId(seat), into_handle(s));
    }
    assert_eq!(engine.play_round(), Err(EngineError::MissingStrategy(1)));
}

struct WithoutOpening;

impl CardSource for WithoutOpening {
    fn cards(&self) -> Vec<Card> {
        StandardDeck
            .cards()
            .into_iter()
            .filter(|&c| c != OPENING_CARD)
            .collect()
    }
}

struct Doubled;

impl CardSource for Doubled {
    fn cards(&self) -> Vec<Card> {
        let mut cards = StandardDeck.cards();
        cards.push(Card::new(Suit::Clubs, Rank::Ace));
        cards
    }
}

#[test]
fn opening_card_outside_universe_fails_before_play() {
    let (engine, logs) = engine_with(1, (0..3).map(|_| Behaviour::FirstLegal).collect());
    let mut engine = engine.with_sources(WithoutOpening, OpeningLayout::default());
    let err = engine.play_round().unwrap_err();
    assert_eq!(err, EngineError::OpeningCardMissing(OPENING_CARD));
    assert!(logs.iter().all(|l| l.borrow().initialized == 0));
}

#[test]
fn duplicate_card_in_universe_is_rejected() {
    let (engine, _) = engine_with(1, (0..3).map(|_| Behaviour::FirstLegal).collect());
    let mut engine = engine.with_sources(Doubled, OpeningLayout::default());
    let err = engine.play_round().unwrap_err();
    assert_eq!(err, EngineError::DuplicateCard(Card::new(Suit::Clubs, Rank::Ace)));
}

#[test]
fn custom_opening_card_is_honoured() {
    let opening = Card::new(Suit::Spades, Rank::Seven);
    let (engine, _) = engine_with(6, (0..4).map(|_| Behaviour::AlwaysPass).collect());
    let mut engine = engine.with_sources(StandardDeck, OpeningLayout { card: opening });
    let mut rec = Recorder::default();
    engine.play_round_with(&mut rec).expect("round runs");
    assert!(rec.tables[0].contains(opening));
    assert!(!rec.tables[0].contains(OPENING_CARD));
    assert!(rec.dealt.iter().all(|h| !h.contains(&opening)));
}

/// Starts with an extra card beside the opening card.
struct CrowdedLayout;

impl LayoutSource for CrowdedLayout {
    fn opening_card(&self) -> Card {
        OPENING_CARD
    }

    fn initial_table(&self) -> Table {
        Table::new()
            .with_card(OPENING_CARD)
            .with_card(Card::new(Suit::Diamonds, Rank::Eight))
    }
}

/// Names an opening card but leaves the table empty.
struct BareLayout;

impl LayoutSource for BareLayout {
    fn opening_card(&self) -> Card {
        OPENING_CARD
    }

    fn initial_table(&self) -> Table {
        Table::new()
    }
}

struct Only(Vec<Card>);

impl CardSource for Only {
    fn cards(&self) -> Vec<Card> {
        self.0.clone()
    }
}

fn wanderers(seed: u64, players: usize) -> Engine {
    let mut engine = Engine::new(Some(seed));
    for i in 0..players {
        engine.register_strategy(PlayerId(i), into_handle(Wanderer::new(seed + i as u64)));
    }
    engine
}

#[test]
fn extra_card_on_initial_table_fails_before_play() {
    let (engine, logs) = engine_with(1, (0..2).map(|_| Behaviour::FirstLegal).collect());
    let mut engine = engine.with_sources(StandardDeck, CrowdedLayout);
    let mut rec = Recorder::default();
    let err = engine.play_round_with(&mut rec).unwrap_err();
    assert_eq!(
        err,
        EngineError::LayoutMismatch {
            opening: OPENING_CARD,
            found: vec![OPENING_CARD, Card::new(Suit::Diamonds, Rank::Eight)],
        }
    );
    assert!(logs.iter().all(|l| l.borrow().initialized == 0));
    assert!(rec.dealt.is_empty());
}

#[test]
fn initial_table_without_opening_card_is_rejected() {
    let mut engine = wanderers(3, 2).with_sources(StandardDeck, BareLayout);
    let err = engine.play_round().unwrap_err();
    assert_eq!(
        err,
        EngineError::LayoutMismatch {
            opening: OPENING_CARD,
            found: Vec::new(),
        }
    );
}

#[test]
fn universe_of_only_the_opening_card_is_rejected() {
    let mut engine =
        wanderers(5, 2).with_sources(Only(vec![OPENING_CARD]), OpeningLayout::default());
    let err = engine.play_round().unwrap_err();
    assert_eq!(err, EngineError::UniverseTooSmall { cards: 1, players: 2 });
}

#[test]
fn universe_needs_a_card_per_seat() {
    let cards = vec![OPENING_CARD, Card::new(Suit::Diamonds, Rank::Eight)];
    let (engine, _) = engine_with(7, (0..3).map(|_| Behaviour::FirstLegal).collect());
    let mut engine = engine.with_sources(Only(cards), OpeningLayout::default());
    assert_eq!(
        engine.play_round(),
        Err(EngineError::UniverseTooSmall { cards: 2, players: 3 })
    );
}

#[test]
fn tiny_universe_rounds_conserve_cards() {
    let cards = vec![
        Card::new(Suit::Diamonds, Rank::Six),
        OPENING_CARD,
        Card::new(Suit::Diamonds, Rank::Eight),
    ];
    let (engine, _) = engine_with(9, (0..2).map(|_| Behaviour::FirstLegal).collect());
    let mut engine = engine.with_sources(Only(cards), OpeningLayout::default());
    for _ in 0..20 {
        let result = engine.play_round().expect("round runs");
        let left: usize = result.ranking.iter().map(|s| s.remaining).sum();
        assert_eq!(left + result.moves + 1, 3);
    }
}

#[test]
fn tournament_over_a_universe_that_can_empty_every_hand_stops() {
    let cards = vec![
        Card::new(Suit::Diamonds, Rank::Six),
        OPENING_CARD,
        Card::new(Suit::Diamonds, Rank::Eight),
    ];
    let (engine, _) = engine_with(9, (0..2).map(|_| Behaviour::FirstLegal).collect());
    let engine = engine.with_sources(Only(cards), OpeningLayout::default());
    let mut tournament = Tournament::new(engine, 1_000).expect("threshold is positive");
    let err = tournament.run().unwrap_err();
    assert!(matches!(err, EngineError::ScorelessRound { .. }));
}

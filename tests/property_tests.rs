//! Property tests: invariants that must hold for any deal and any input.

use std::collections::HashSet;

use proptest::prelude::*;

use memory_match::{
    CardPosition, CardStatus, Deck, DeckRng, EngineEvent, MatchEngine, SessionPhase, TokenSet,
};

#[derive(Clone, Debug)]
enum Input {
    Reveal(usize),
    Advance(u64),
    Restart,
}

fn input(cards: usize) -> impl Strategy<Value = Input> {
    prop_oneof![
        6 => (0..cards + 2).prop_map(Input::Reveal),
        3 => (0u64..2500).prop_map(Input::Advance),
        1 => Just(Input::Restart),
    ]
}

fn token_set(pairs: usize) -> TokenSet {
    TokenSet::new((0..pairs).map(|i| format!("face-{i}"))).unwrap()
}

proptest! {
    #[test]
    fn deal_keeps_two_of_each_token(pairs in 1usize..24, seed in any::<u64>()) {
        let set = token_set(pairs);
        let deck = Deck::deal(&set, &mut DeckRng::new(seed));

        prop_assert_eq!(deck.len(), pairs * 2);
        let counts = deck.pair_counts();
        prop_assert_eq!(counts.len(), pairs);
        prop_assert!(counts.values().all(|&n| n == 2));
        prop_assert!(deck.iter().all(|card| card.status == CardStatus::Hidden));
    }

    #[test]
    fn session_invariants_hold(
        pairs in 1usize..5,
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input(8), 0..120),
    ) {
        let set = token_set(pairs);
        let mut engine = MatchEngine::with_seed(seed);
        engine.start_game(&set);

        let mut expected_moves = 0u32;
        let mut matched: HashSet<CardPosition> = HashSet::new();
        let mut last_elapsed = 0u64;

        for step in inputs {
            match step {
                Input::Reveal(index) => {
                    let position = CardPosition::new(index);
                    let before = engine.revealed().len();
                    let accepted = engine.reveal_card(position).is_some();

                    if accepted && before == 1 {
                        expected_moves += 1;
                    }
                }
                Input::Advance(ms) => engine.advance_ms(ms),
                Input::Restart => {
                    engine.start_game(&set);
                    expected_moves = 0;
                    matched.clear();
                    last_elapsed = 0;
                }
            }

            // Never more than two face-up unmatched cards
            prop_assert!(engine.revealed().len() <= 2);
            prop_assert_eq!(
                engine.revealed().len(),
                engine.deck().count_status(CardStatus::Revealed)
            );

            // One move per completed comparison
            prop_assert_eq!(engine.moves(), expected_moves);

            // Matched is terminal
            for position in &matched {
                prop_assert_eq!(engine.status_of(*position), Some(CardStatus::Matched));
            }
            matched.extend(
                engine
                    .cards()
                    .filter(|card| card.status == CardStatus::Matched)
                    .map(|card| card.position),
            );
            prop_assert_eq!(engine.matched_pairs() * 2, matched.len());

            // Clock never runs backwards within a session
            prop_assert!(engine.elapsed_seconds() >= last_elapsed);
            last_elapsed = engine.elapsed_seconds();

            // Won exactly when everything is matched
            let all_matched = engine.deck().count_status(CardStatus::Matched) == engine.deck().len();
            prop_assert_eq!(engine.is_won(), all_matched);
            if engine.phase() == SessionPhase::Won {
                prop_assert!(engine.revealed().is_empty());
            }
        }
    }

    #[test]
    fn at_most_one_win_per_session(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input(4), 0..200),
    ) {
        let set = token_set(2);
        let mut engine = MatchEngine::with_seed(seed);
        engine.start_game(&set);

        for step in inputs {
            match step {
                Input::Reveal(index) => {
                    engine.reveal_card(CardPosition::new(index));
                }
                Input::Advance(ms) => engine.advance_ms(ms),
                Input::Restart => engine.start_game(&set),
            }
        }

        // Split the event log into sessions and count wins in each
        let mut wins_per_session = vec![0usize];
        for event in engine.drain_events() {
            match event {
                EngineEvent::GameStarted { .. } => wins_per_session.push(0),
                EngineEvent::Won(_) => {
                    if let Some(last) = wins_per_session.last_mut() {
                        *last += 1;
                    }
                }
                _ => {}
            }
        }
        prop_assert!(wins_per_session.iter().all(|&wins| wins <= 1));
    }

    #[test]
    fn mismatches_always_flip_back(seed in any::<u64>(), delay in 1u64..3000) {
        let set = token_set(3);
        let mut engine = MatchEngine::new(
            memory_match::EngineConfig::new()
                .with_seed(seed)
                .with_mismatch_delay(std::time::Duration::from_millis(delay)),
        )
        .unwrap();
        engine.start_game(&set);

        let first = engine.cards().next().map(|card| (card.position, card.token.clone()));
        let (first, token) = first.expect("deck is dealt");
        let other = engine
            .cards()
            .find(|card| card.token != token)
            .map(|card| card.position)
            .expect("three pairs");

        engine.reveal_card(first);
        engine.reveal_card(other);
        engine.advance_ms(delay - 1);
        prop_assert_eq!(engine.status_of(first), Some(CardStatus::Revealed));

        engine.advance_ms(1);
        prop_assert_eq!(engine.status_of(first), Some(CardStatus::Hidden));
        prop_assert_eq!(engine.status_of(other), Some(CardStatus::Hidden));
        prop_assert!(engine.revealed().is_empty());
    }

    #[test]
    fn restart_cancels_stale_flip_back(seed in any::<u64>(), wait in 0u64..999) {
        let layout = ["a", "b", "a", "b"];
        let mut engine = MatchEngine::with_seed(seed);
        engine.start_game_with_deck(Deck::from_layout(layout).unwrap()).unwrap();

        engine.reveal_card(CardPosition::new(0));
        engine.reveal_card(CardPosition::new(1));
        engine.advance_ms(wait);

        engine.start_game_with_deck(Deck::from_layout(layout).unwrap()).unwrap();
        engine.reveal_card(CardPosition::new(1));
        engine.advance_ms(2000);

        prop_assert_eq!(engine.status_of(CardPosition::new(1)), Some(CardStatus::Revealed));
        prop_assert_eq!(engine.revealed(), &[CardPosition::new(1)]);
    }
}

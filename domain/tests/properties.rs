//! Property-based tests for question selection and session play.

use proptest::prelude::*;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use twentyq_domain::{
    AskedSet, AttributeKind, AttributeStore, EndReason, Entity, EntityRecord, FallbackStrategy,
    GameSession, Guess, PredicateCatalog, QuestionSelector, RawRating, SessionOutcome,
    SessionState, SplitEvaluator,
};

const BOOLEAN_ATTRS: [&str; 3] = ["alive", "metal", "wild"];
const SCALAR_ATTRS: [&str; 2] = ["size", "speed"];

/// One generated entity row: optional flags then optional ratings.
type Row = (Vec<Option<bool>>, Vec<Option<u8>>);

/// Strategy: 1-12 entities, each attribute possibly missing.
fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    let row = (
        prop::collection::vec(prop::option::weighted(0.9, any::<bool>()), BOOLEAN_ATTRS.len()),
        prop::collection::vec(prop::option::weighted(0.9, 0..5u8), SCALAR_ATTRS.len()),
    );
    prop::collection::vec(row, 1..12)
}

/// Strategy: a full game's worth of answers.
fn answers_strategy() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 20)
}

fn build_store(rows: &[Row]) -> Arc<AttributeStore> {
    let mut kinds = BTreeMap::new();
    for name in BOOLEAN_ATTRS {
        kinds.insert(name.to_string(), AttributeKind::Boolean);
    }
    for name in SCALAR_ATTRS {
        kinds.insert(name.to_string(), AttributeKind::Scalar);
    }

    let records = rows.iter().enumerate().map(|(i, (flags, ratings))| {
        let mut record = EntityRecord::new(format!("e{:02}", i));
        for (name, flag) in BOOLEAN_ATTRS.iter().zip(flags) {
            if let Some(flag) = flag {
                record = record.with_rating(*name, RawRating::Flag(*flag));
            }
        }
        for (name, rating) in SCALAR_ATTRS.iter().zip(ratings) {
            if let Some(rating) = rating {
                record = record.with_rating(*name, RawRating::Number(f64::from(*rating)));
            }
        }
        record
    });
    Arc::new(AttributeStore::build(records, &kinds).unwrap())
}

/// Play to the end, recording the candidate count after every step.
fn play(store: Arc<AttributeStore>, answers: &[bool]) -> (SessionOutcome, Vec<usize>) {
    let universe = store.entity_set();
    let mut session = GameSession::new(store, universe, FallbackStrategy::default()).unwrap();
    let mut counts = vec![session.candidates().len()];
    let mut answers = answers.iter().copied().cycle();

    loop {
        match session.advance() {
            SessionState::AwaitingAnswer(_) => {
                session.submit_answer(answers.next().unwrap()).unwrap();
            }
            SessionState::Terminal(outcome) => return (outcome.clone(), counts),
            other => panic!("advance stopped in {:?}", other),
        }
        session.advance();
        counts.push(session.candidates().len());
    }
}

proptest! {
    // 1. A valid split never leaves a side empty
    #[test]
    fn valid_split_has_two_sides(rows in rows_strategy()) {
        let store = build_store(&rows);
        let candidates = store.entity_set();
        for attribute in store.all_attributes() {
            if let Some(split) =
                SplitEvaluator::evaluate(&store, &candidates, attribute).into_split()
            {
                prop_assert!(
                    split.yes_count > 0 && split.no_count > 0,
                    "{attribute:?}: {split:?}"
                );
                prop_assert!(split.yes_count + split.no_count <= candidates.len());
            }
        }
    }

    // 2. Scoring is deterministic
    #[test]
    fn split_scoring_idempotent(rows in rows_strategy()) {
        let store = build_store(&rows);
        let candidates = store.entity_set();
        for attribute in store.all_attributes() {
            let first = SplitEvaluator::evaluate(&store, &candidates, attribute);
            let second = SplitEvaluator::evaluate(&store, &candidates, attribute);
            prop_assert_eq!(first, second);
        }
    }

    // 3. The selector never repeats an asked attribute
    #[test]
    fn selector_skips_asked(
        rows in rows_strategy(),
        asked_mask in prop::collection::vec(any::<bool>(), 5),
    ) {
        let store = build_store(&rows);
        let asked: AskedSet = store
            .all_attributes()
            .iter()
            .zip(asked_mask)
            .filter(|(_, asked)| *asked)
            .map(|(attribute, _)| twentyq_domain::QuestionKey::Attribute(attribute.name.clone()))
            .collect();
        if let Some(question) = QuestionSelector::new(&store).select(&store.entity_set(), &asked) {
            prop_assert!(!asked.contains(&question.key()));
        }
    }

    // 4. Candidates never grow and keys are never asked twice
    #[test]
    fn session_narrows_monotonically(rows in rows_strategy(), answers in answers_strategy()) {
        let store = build_store(&rows);
        let (outcome, counts) = play(store.clone(), &answers);

        prop_assert!(counts.windows(2).all(|w| w[1] <= w[0]), "counts={counts:?}");
        let distinct: BTreeSet<_> = outcome.asked.iter().collect();
        prop_assert_eq!(distinct.len(), outcome.asked.len());
        prop_assert!(outcome.turns <= twentyq_domain::DEFAULT_MAX_TURNS);
        prop_assert!(outcome.remaining.iter().all(|e| store.contains(e)));
    }

    // 5. Same data and answers give the same game
    #[test]
    fn session_deterministic(rows in rows_strategy(), answers in answers_strategy()) {
        let (first, _) = play(build_store(&rows), &answers);
        let (second, _) = play(build_store(&rows), &answers);
        prop_assert_eq!(first, second);
    }

    // 6. The guess is the first remaining candidate
    #[test]
    fn guess_is_first_remaining(rows in rows_strategy(), answers in answers_strategy()) {
        let (outcome, _) = play(build_store(&rows), &answers);
        prop_assert_eq!(outcome.guess.entity(), outcome.remaining.first());
    }

    // 7. No sequence of answers empties the candidate set
    #[test]
    fn answers_never_empty_candidates(rows in rows_strategy(), answers in answers_strategy()) {
        let (outcome, counts) = play(build_store(&rows), &answers);
        prop_assert!(counts.iter().all(|c| *c >= 1), "counts={counts:?}");
        prop_assert_ne!(outcome.reason, EndReason::EmptyCandidateSet);
        prop_assert_ne!(outcome.guess, Guess::NoGuessPossible);
    }

    // 8. A single candidate is guessed without a question
    #[test]
    fn single_candidate_needs_no_question(
        rows in rows_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let store = build_store(&rows);
        let entity = store.entities().nth(pick.index(store.len())).cloned().unwrap();
        let mut session = GameSession::new(
            store,
            BTreeSet::from([entity.clone()]),
            FallbackStrategy::new(PredicateCatalog::empty()),
        )
        .unwrap();
        let state = session.advance().clone();
        match state {
            SessionState::Terminal(outcome) => {
                prop_assert_eq!(outcome.turns, 0);
                prop_assert_eq!(outcome.guess.entity(), Some(&entity));
            }
            other => prop_assert!(false, "expected terminal, got {:?}", other),
        }
    }
}

#[test]
fn uniform_values_exhaust_without_predicates() {
    let rows: Vec<Row> = (0..3)
        .map(|_| (vec![Some(true); 3], vec![Some(2); 2]))
        .collect();
    let store = build_store(&rows);
    let universe = store.entity_set();
    let mut session =
        GameSession::new(store, universe, FallbackStrategy::new(PredicateCatalog::empty()))
            .unwrap();
    match session.advance() {
        SessionState::Terminal(outcome) => {
            assert_eq!(outcome.turns, 0);
            assert_eq!(outcome.guess.entity(), Some(&Entity::new("e00")));
        }
        other => panic!("expected terminal, got {:?}", other),
    }
}

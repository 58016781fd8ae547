use std::sync::Arc;
use std::thread;

use rustc_hash::FxHashMap;
use wordle_engine::config::RegistryConfig;
use wordle_engine::core::{Feedback, Grammar, Token, Verdict};
use wordle_engine::error::{ConfigError, GameError, GuessError};
use wordle_engine::game::{
    BoardStatus, FixedTargets, GameMode, ModeConfig, Session, SessionId, SessionStatus,
    TargetSource,
};
use wordle_engine::lexicon::{ANSWERS, AcceptAll, Lexicon};
use wordle_engine::registry::{OwnerKey, SessionRegistry};

fn registry() -> SessionRegistry {
    SessionRegistry::new(RegistryConfig::default(), Arc::new(Lexicon::embedded()))
}

#[test]
fn duordle_boards_share_one_guess_stream() {
    let registry = registry();
    let owner = OwnerKey::from("duo");
    registry
        .create(
            &owner,
            ModeConfig::for_mode(GameMode::Duordle),
            &FixedTargets::new(["crane", "speed"]),
        )
        .unwrap();

    let guesses = ["slate", "least", "crane", "erase", "speed"];
    let mut last = None;
    for guess in guesses {
        last = Some(registry.submit_guess(&owner, GameMode::Duordle, guess).unwrap());
    }
    let last = last.unwrap();
    assert_eq!(last.attempt, 5);
    assert_eq!(last.status, SessionStatus::Solved);

    let handle = registry.get(&owner, GameMode::Duordle).unwrap();
    let session = handle.lock();
    let [first, second] = session.boards() else {
        panic!("duordle has two boards");
    };

    // Board A froze after solving on attempt 3; board B saw every guess
    assert_eq!(first.status(), BoardStatus::Solved);
    assert_eq!(first.history().len(), 3);
    assert_eq!(second.history().len(), 5);
    for (a, b) in first.history().iter().zip(second.history()) {
        assert_eq!(a.guess, b.guess);
    }
    assert_eq!(session.attempts(), 5);
}

#[test]
fn concurrent_guesses_never_exceed_the_limit() {
    let registry = SessionRegistry::new(RegistryConfig::default(), Arc::new(AcceptAll));
    let owner = OwnerKey::from("race");
    registry
        .create(
            &owner,
            ModeConfig::for_mode(GameMode::Wordle),
            &FixedTargets::single("crane"),
        )
        .unwrap();

    let accepted: usize = thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    (0..5)
                        .filter(|_| {
                            match registry.submit_guess(&owner, GameMode::Wordle, "slate") {
                                Ok(_) => true,
                                Err(GameError::BoardClosed { .. }) => false,
                                Err(other) => panic!("unexpected error: {other}"),
                            }
                        })
                        .count()
                })
            })
            .collect();
        workers.into_iter().map(|worker| worker.join().unwrap()).sum()
    });

    assert_eq!(accepted, 6);
    let handle = registry.get(&owner, GameMode::Wordle).unwrap();
    let session = handle.lock();
    assert_eq!(session.attempts(), 6);
    assert_eq!(session.status(), SessionStatus::Exhausted);
    assert_eq!(session.boards()[0].history().len(), 6);
}

#[test]
fn sessions_for_different_owners_run_in_parallel() {
    let registry = registry();
    let owners: Vec<OwnerKey> = (0..16).map(|i| OwnerKey::from(format!("player-{i}"))).collect();

    thread::scope(|scope| {
        for owner in &owners {
            let registry = &registry;
            scope.spawn(move || {
                registry
                    .create(
                        owner,
                        ModeConfig::for_mode(GameMode::Wordle),
                        &FixedTargets::single("crane"),
                    )
                    .unwrap();
                registry.submit_guess(owner, GameMode::Wordle, "slate").unwrap();
                let result = registry.submit_guess(owner, GameMode::Wordle, "crane").unwrap();
                assert_eq!(result.status, SessionStatus::Solved);
            });
        }
    });

    assert_eq!(registry.len(), 16);
    for owner in &owners {
        assert_eq!(registry.active_sessions(owner)[0].attempts, 2);
    }
}

#[test]
fn racing_creates_register_exactly_one_session() {
    let registry = registry();
    let owner = OwnerKey::from("racer");
    let source = FixedTargets::single("crane");

    let results: Vec<_> = thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    registry
                        .create(&owner, ModeConfig::for_mode(GameMode::Wordle), &source)
                        .map(drop)
                })
            })
            .collect();
        workers.into_iter().map(|worker| worker.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|result| matches!(result, Err(GameError::ActiveSessionExists { .. })))
            .count(),
        7
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn rejected_guesses_never_cost_an_attempt() {
    let registry = registry();
    let owner = OwnerKey::from("typo");
    registry
        .create(
            &owner,
            ModeConfig::for_mode(GameMode::Wordle),
            &FixedTargets::single("crane"),
        )
        .unwrap();

    let err = registry.submit_guess(&owner, GameMode::Wordle, "HE11O").unwrap_err();
    assert!(matches!(err, GameError::Guess(GuessError::InvalidToken { .. })));
    let err = registry.submit_guess(&owner, GameMode::Wordle, "cran").unwrap_err();
    assert!(matches!(err, GameError::Guess(GuessError::LengthMismatch { .. })));

    let result = registry.submit_guess(&owner, GameMode::Wordle, "slate").unwrap();
    assert_eq!(result.attempt, 1);
}

#[test]
fn mathle_game_end_to_end() {
    let registry = registry();
    let owner = OwnerKey::from("maths");

    let err = registry
        .create(
            &owner,
            ModeConfig::for_mode(GameMode::Mathle),
            &FixedTargets::single("2+2=5"),
        )
        .unwrap_err();
    assert!(matches!(err, GameError::Config(ConfigError::InvalidEquation { .. })));
    assert!(registry.is_empty());

    registry
        .create(
            &owner,
            ModeConfig::for_mode(GameMode::Mathle),
            &FixedTargets::single("12+7=19"),
        )
        .unwrap();
    let err = registry.submit_guess(&owner, GameMode::Mathle, "12+=19").unwrap_err();
    assert!(matches!(err, GameError::Guess(GuessError::MalformedEquation(_))));

    let result = registry.submit_guess(&owner, GameMode::Mathle, "19-7=12").unwrap();
    assert_eq!(result.boards[0].feedback.as_ref().unwrap().to_code(), "GY-GGGY");
    let result = registry.submit_guess(&owner, GameMode::Mathle, "12+7=19").unwrap();
    assert_eq!(result.status, SessionStatus::Solved);
}

#[test]
fn session_round_trips_through_json() {
    let config = ModeConfig::for_mode(GameMode::Duordle);
    let draw = FixedTargets::new(["crane", "speed"])
        .draw(GameMode::Duordle, 2)
        .unwrap();
    let mut session = Session::new(SessionId::new(7), config, draw).unwrap();
    session.submit_guess("crane", &AcceptAll).unwrap();
    session.submit_guess("erase", &AcceptAll).unwrap();

    let json = serde_json::to_string(&session).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, session);

    // A restored session keeps playing from where it left off
    let mut restored = restored;
    let result = restored.submit_guess("speed", &AcceptAll).unwrap();
    assert_eq!(result.attempt, 3);
    assert_eq!(result.status, SessionStatus::Solved);
}

#[test]
fn feedback_never_exceeds_target_multiplicity() {
    let words: Vec<Vec<Token>> = ANSWERS
        .iter()
        .map(|word| Grammar::Alphabetic.tokenize(word).unwrap())
        .collect();

    for target in &words {
        let mut multiplicity: FxHashMap<Token, usize> = FxHashMap::default();
        for &token in target {
            *multiplicity.entry(token).or_insert(0) += 1;
        }

        for guess in words.iter().step_by(7) {
            let feedback = Feedback::evaluate(target, guess);
            let mut credited: FxHashMap<Token, usize> = FxHashMap::default();
            for (&token, &verdict) in guess.iter().zip(feedback.verdicts()) {
                if verdict != Verdict::Absent {
                    *credited.entry(token).or_insert(0) += 1;
                }
            }
            for (token, count) in credited {
                assert!(count <= multiplicity.get(&token).copied().unwrap_or(0));
            }
            assert_eq!(feedback.is_solved(), guess == target);
        }
    }
}

//! Tests for team duels: per-letter scoring and round-robin turns.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex};
use word_hunt::{
    Attempt, Coord, FinishReason, GameMode, NarrationError, PuzzleConfig, PuzzleSession,
    Rejection, ScoreSummary, TeamConfig, TeamId, script,
};

fn teams(ids: &[&str]) -> Vec<TeamConfig> {
    ids.iter()
        .map(|id| TeamConfig::new((*id).into(), format!("Team {}", id.to_uppercase())))
        .collect()
}

fn duel(words: &[&str], ids: &[&str], seed: u64) -> PuzzleSession {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = PuzzleConfig::duel(words.iter().copied(), teams(ids));
    let mut session = PuzzleSession::new(&config, &mut rng).expect("valid duel");
    session.start();
    session
}

fn active(session: &PuzzleSession) -> TeamId {
    session.active_team().expect("duel in play").id().clone()
}

#[test]
fn test_duel_defaults() {
    let session = duel(&["flower", "tree"], &["a", "b"], 1);
    assert_eq!(session.mode(), GameMode::Duel);
    assert_eq!(session.grid().expect("grid").size(), 15);
    assert_eq!(session.time_remaining_secs(), Some(600));
    assert_eq!(active(&session), TeamId::from("a"));
}

#[test]
fn test_find_credits_letters_and_passes_turn() {
    let mut session = duel(&["flower", "tree"], &["a", "b"], 2);
    let path = session.words()[0].path().clone();

    match session.submit(&path) {
        Attempt::Matched(event) => {
            assert_eq!(event.word(), "FLOWER");
            assert_eq!(*event.points(), 60);
            assert_eq!(event.team(), &Some(TeamId::from("a")));
        }
        other => panic!("Expected a match, got {:?}", other),
    }

    assert_eq!(active(&session), TeamId::from("b"));
    let duel = session.scoring().expect("playing").duel().expect("duel");
    assert_eq!(*duel.teams()[0].score(), 60);
    assert_eq!(duel.teams()[0].found_words(), &vec!["FLOWER".to_string()]);
    assert_eq!(*duel.teams()[1].score(), 0);
}

#[test]
fn test_found_cells_carry_team_owner() {
    let mut session = duel(&["flower", "tree"], &["a", "b"], 3);
    let path = session.words()[0].path().clone();
    session.submit(&path);

    let grid = session.grid().expect("grid");
    for coord in &path {
        let cell = grid.cell(*coord).expect("on grid");
        assert!(*cell.highlighted());
        assert_eq!(cell.owner(), &Some(TeamId::from("a")));
    }
    assert_eq!(session.words()[0].found_by(), &Some(TeamId::from("a")));
}

#[test]
fn test_failed_attempts_keep_the_turn() {
    let mut session = duel(&["flower", "tree"], &["a", "b"], 4);
    let path = session.words()[0].path().clone();
    session.submit(&path);

    let bent = [Coord::new(0, 0), Coord::new(2, 1)];
    assert_eq!(session.submit(&bent), Attempt::Rejected(Rejection::NotStraight));
    assert_eq!(session.submit(&path), Attempt::Rejected(Rejection::NoMatch));
    assert_eq!(active(&session), TeamId::from("b"));
}

#[test]
fn test_turns_rotate_round_robin() {
    let words = ["lion", "bear", "wolf", "deer", "hawk"];
    let mut session = duel(&words, &["a", "b", "c"], 5);
    let ids = ["a", "b", "c"];
    let paths: Vec<Vec<Coord>> = session.words().iter().map(|w| w.path().clone()).collect();

    for (n, path) in paths.iter().take(4).enumerate() {
        assert!(session.submit(path).is_match());
        assert_eq!(active(&session), TeamId::from(ids[(n + 1) % 3]));
    }
}

#[test]
fn test_final_standings_and_winner() {
    let mut session = duel(&["ox", "zebra"], &["a", "b"], 6);
    let ox = session.words()[0].path().clone();
    let zebra = session.words()[1].path().clone();

    session.submit(&ox);
    session.submit(&zebra);
    let summary = session.release_hold().expect("held summary");

    assert_eq!(*summary.reason(), FinishReason::AllWordsFound);
    assert_eq!(summary.winner(), Some(&TeamId::from("b")));
    match summary.scores() {
        ScoreSummary::Duel { standings, .. } => {
            assert_eq!(standings[0].id(), &TeamId::from("b"));
            assert_eq!(*standings[0].score(), 50);
            assert_eq!(*standings[1].score(), 20);
        }
        ScoreSummary::Solo { .. } => panic!("Expected duel standings"),
    }
}

#[test]
fn test_tie_goes_to_first_team() {
    let mut session = duel(&["cat", "dog", "emu"], &["a", "b"], 7);
    let paths: Vec<Vec<Coord>> = session.words().iter().map(|w| w.path().clone()).collect();
    session.submit(&paths[0]);
    session.submit(&paths[1]);
    for _ in 0..600 {
        session.tick();
    }

    let summary = session.summary().expect("time expired");
    assert_eq!(*summary.reason(), FinishReason::TimeExpired);
    assert_eq!(summary.winner(), Some(&TeamId::from("a")));
    assert_eq!(*summary.words_found(), 2);
}

#[test]
fn test_click_click_selection() {
    let mut session = duel(&["garden", "tree"], &["a", "b"], 8);
    let path = session.words()[0].path().clone();

    assert_eq!(session.click(path[0]), Attempt::Ignored);
    assert!(session.click(path[path.len() - 1]).is_match());
}

#[test]
fn test_turn_is_narrated() {
    let heard = Arc::new(Mutex::new(Vec::new()));
    let sink = heard.clone();
    let mut rng = StdRng::seed_from_u64(9);
    let config = PuzzleConfig::duel(["flower", "tree"], teams(&["a", "b"]));
    let mut session = PuzzleSession::new(&config, &mut rng)
        .expect("valid duel")
        .with_narrator(move |text: &str| -> Result<(), NarrationError> {
            sink.lock().unwrap().push(text.to_string());
            Ok(())
        });
    session.start();
    let path = session.words()[0].path().clone();
    session.submit(&path);

    let heard = heard.lock().unwrap();
    assert_eq!(heard[2], script::turn("Team A"));
    assert_eq!(heard[3], script::found("FLOWER"));
    assert_eq!(heard[4], script::turn("Team B"));
}

#[test]
fn test_duel_without_teams_is_rejected() {
    let mut rng = StdRng::seed_from_u64(10);
    let config = PuzzleConfig::duel(["flower"], Vec::new());
    assert!(PuzzleSession::new(&config, &mut rng).is_err());
}

//! Tests for loading puzzle configuration from TOML files.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tempfile::NamedTempFile;
use word_hunt::{GameMode, Phase, PuzzleConfig, PuzzleSession};

fn write_config(content: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_solo_config_from_file() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        words = ["gato", "perro", "casa", "libro", "flor", "agua", "sol", "luna"]
        word_sample = 6
        alphabet = "ABCDEFGHIJKLMNÑOPQRSTUVWXYZ"
        finish_hold_ms = 2000
        "#,
    )?;

    let config = PuzzleConfig::from_file(file.path())?;
    assert_eq!(*config.mode(), GameMode::Solo);
    assert_eq!(config.grid_size(), 12);
    assert_eq!(config.time_limit_secs(), 300);
    assert_eq!(*config.word_sample(), Some(6));
    assert_eq!(*config.finish_hold_ms(), 2000);

    let mut rng = StdRng::seed_from_u64(1);
    let mut session = PuzzleSession::new(&config, &mut rng)?;
    session.start();
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.words().len() + session.dropped().len(), 6);
    Ok(())
}

#[test]
fn test_duel_config_from_file() -> anyhow::Result<()> {
    let file = write_config(
        r#"
        mode = "duel"
        words = ["flower", "garden", "tree"]
        grid_size = 10
        time_limit_secs = 120
        points_per_letter = 5

        [[teams]]
        id = "red"
        name = "Red"
        members = ["Ana", "Luis"]

        [[teams]]
        id = "blue"
        name = "Blue"
        color = "blue"
        "#,
    )?;

    let config = PuzzleConfig::from_file(file.path())?;
    assert_eq!(config.grid_size(), 10);
    assert_eq!(config.teams()[0].members.len(), 2);

    let mut rng = StdRng::seed_from_u64(2);
    let mut session = PuzzleSession::new(&config, &mut rng)?;
    session.start();
    assert_eq!(session.time_remaining_secs(), Some(120));

    let path = session.words()[0].path().clone();
    let word = session.words()[0].text().clone();
    match session.submit(&path) {
        word_hunt::Attempt::Matched(event) => {
            assert_eq!(*event.points() as usize, word.chars().count() * 5);
        }
        other => panic!("Expected a match, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_missing_file_reports_read_error() {
    let err = PuzzleConfig::from_file("/nonexistent/word_hunt.toml").expect_err("no such file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_config_is_rejected_on_load() -> anyhow::Result<()> {
    let file = write_config("words = [\"elephant\"]\ngrid_size = 3\n")?;
    let err = PuzzleConfig::from_file(file.path()).expect_err("grid too small");
    assert!(err.message.contains("Invalid puzzle config"));
    assert!(err.message.contains("ELEPHANT"));
    Ok(())
}

#[test]
fn test_oversized_grid_is_rejected_on_load() {
    let err = PuzzleConfig::from_toml_str("words = [\"cat\"]\ngrid_size = 9223372036854775807\n")
        .expect_err("grid too large");
    assert!(err.message.contains("Invalid puzzle config"));
    assert!(err.message.contains("exceeds the maximum"));
}

#[test]
fn test_non_letter_word_is_rejected_on_load() {
    let err = PuzzleConfig::from_toml_str("words = [\"cat\", \"r2-d2\"]\n")
        .expect_err("digits in word");
    assert!(err.message.contains("R2-D2"));
}

#[test]
fn test_config_round_trips_through_json() -> anyhow::Result<()> {
    let config = PuzzleConfig::solo(["sun", "moon"]).with_grid_size(8);
    let json = serde_json::to_string(&config)?;
    let back: PuzzleConfig = serde_json::from_str(&json)?;
    assert_eq!(back, config);
    Ok(())
}

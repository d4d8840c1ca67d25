//! Integration tests for saving and replaying session journals

use std::sync::Arc;

use lifesim::entity::RawPlayerConfig;
use lifesim::session::JournalEntry;
use lifesim::{Engine, GameSession, SessionJournal, SimError, SimulationConfig, StoryletCatalog};

fn play(engine: &mut Engine, days: usize) {
    for _ in 0..days {
        if let Some(event) = engine.current_storylet().unwrap() {
            let choice = event.choices.last().unwrap().id.to_string();
            engine
                .choose_option(event.storylet_id.as_str(), &choice, 3)
                .unwrap();
        }
        engine.step(21).unwrap();
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("lifesim_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_save_and_load_reproduces_session() {
    let mut engine = Engine::with_builtin_content().unwrap();
    engine
        .new_game(77, RawPlayerConfig::new("Robin", "DREAMER", "HARSH", true))
        .unwrap();
    play(&mut engine, 90);

    let path = temp_path("roundtrip");
    engine.save_journal(&path).unwrap();
    let original = engine.full_snapshot().unwrap();
    let original_simple = engine.snapshot().unwrap();

    let mut restored = Engine::with_builtin_content().unwrap();
    let loaded = restored.load_journal(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, original_simple);
    assert_eq!(restored.full_snapshot().unwrap(), original);

    // Both continue identically after the reload
    play(&mut engine, 30);
    play(&mut restored, 30);
    assert_eq!(engine.full_snapshot().unwrap(), restored.full_snapshot().unwrap());
}

#[test]
fn test_journal_records_only_successful_operations() {
    let mut engine = Engine::with_builtin_content().unwrap();
    engine
        .new_game(3, RawPlayerConfig::new("Robin", "ANALYST", "BALANCED", false))
        .unwrap();
    engine.step(5).unwrap();
    assert!(engine.step(-5).is_err());
    engine.tick().unwrap();
    assert!(engine.choose_option("nothing", "here", 0).is_err());

    let journal = engine.current_session().unwrap().journal().clone();
    assert_eq!(
        journal.entries,
        vec![
            JournalEntry::Step { ticks: 5 },
            JournalEntry::Step { ticks: 1 },
        ]
    );
    assert_eq!(journal.total_ticks(), 6);
}

#[test]
fn test_replay_with_wrong_content_fails_loudly() {
    let mut engine = Engine::with_builtin_content().unwrap();
    engine
        .new_game(11, RawPlayerConfig::new("Robin", "STORYTELLER", "BALANCED", true))
        .unwrap();
    play(&mut engine, 60);

    let journal = engine.current_session().unwrap().journal().clone();
    let has_choice = journal
        .entries
        .iter()
        .any(|e| matches!(e, JournalEntry::Choose { .. }));
    assert!(has_choice, "sixty days should produce at least one choice");

    let result = GameSession::replay(&journal, Arc::new(StoryletCatalog::empty()));
    assert!(matches!(result, Err(SimError::NoActiveEvent)));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let mut engine = Engine::new(Arc::new(StoryletCatalog::empty()), SimulationConfig::default());
    let result = engine.load_journal(&temp_path("does_not_exist"));
    assert!(matches!(result, Err(SimError::IoError(_))));
    assert!(!engine.has_session());
}

#[test]
fn test_journal_json_is_stable() {
    let mut engine = Engine::new(Arc::new(StoryletCatalog::empty()), SimulationConfig::default());
    engine
        .new_game(8, RawPlayerConfig::new("Robin", "CHALLENGER", "RELAXED", false))
        .unwrap();
    engine.step(48).unwrap();

    let journal = engine.current_session().unwrap().journal();
    let json = journal.to_json().unwrap();
    let parsed = SessionJournal::from_json(&json).unwrap();
    assert_eq!(&parsed, journal);
    assert!(json.contains("\"op\": \"step\""));
}

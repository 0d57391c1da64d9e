//! Session, replay and high score persistence through the facade

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

use nestris::engine::{run_replay, FrameInput, Replay};
use nestris::input::Key;
use nestris::types::{Action, Direction, GameEvent, HeldInputs, Status};
use nestris::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore, Session};

fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind,
        state: KeyEventState::NONE,
    }
}

fn play_until_game_over<S: HighScoreStore>(session: &mut Session<S>) {
    session.input_mut().press(Key::SoftDrop);
    for _ in 0..20_000 {
        if session.step().unwrap().contains(&GameEvent::GameOver) {
            return;
        }
    }
    panic!("game never ended");
}

#[test]
fn test_terminal_keys_drive_the_game() {
    let mut session = Session::new(MemoryHighScoreStore::default(), Some(10), 0);
    assert!(session.handle_key_event(key(KeyCode::Enter, KeyEventKind::Press)));
    session.advance(Duration::from_millis(17)).unwrap();
    assert_eq!(session.game().status(), Status::Playing);

    let x = session.game().active().unwrap().x;
    session.handle_key_event(key(KeyCode::Left, KeyEventKind::Press));
    session.step().unwrap();
    assert_eq!(session.game().active().unwrap().x, x - 1);

    session.handle_key_event(key(KeyCode::Left, KeyEventKind::Release));
    session.step().unwrap();
    assert_eq!(session.game().active().unwrap().x, x - 1);
}

#[test]
fn test_file_store_keeps_best_across_sessions() {
    let dir = std::env::temp_dir().join(format!("nestris-session-{}", std::process::id()));
    let path = dir.join("high.json");
    let _ = std::fs::remove_dir_all(&dir);

    let mut first = Session::new(FileHighScoreStore::new(&path), Some(9), 0);
    first.input_mut().press(Key::Start);
    play_until_game_over(&mut first);
    let best = first.game().high_score();
    assert!(best > 0);
    assert_eq!(FileHighScoreStore::new(&path).load().unwrap(), best);

    let second = Session::new(FileHighScoreStore::new(&path), Some(1), 0);
    assert_eq!(second.game().high_score(), best);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_lower_score_does_not_overwrite_record() {
    let mut session = Session::new(MemoryHighScoreStore::new(1_000_000), Some(9), 0);
    session.input_mut().press(Key::Start);
    play_until_game_over(&mut session);

    assert_eq!(session.game().high_score(), 1_000_000);
    assert_eq!(session.store().saves(), 0);
}

#[test]
fn test_replay_json_playback() {
    let json = r#"{
        "seed": 12345,
        "startLevel": 0,
        "frames": [
            { "actions": ["start"] },
            { "direction": "left" },
            { "direction": "left", "softDrop": true },
            { "actions": ["rotateCw"] }
        ]
    }"#;
    let replay = Replay::from_json(json).unwrap();
    let outcome = run_replay(&replay).unwrap();

    let state = outcome.state;
    assert_eq!(state.status(), Status::Playing);
    assert_eq!(state.frame(), 4);
    assert_eq!(state.score(), 1);
    assert_eq!(state.das().direction(), Direction::None);
}

#[test]
fn test_recorded_session_matches_replay() {
    let mut session = Session::new(MemoryHighScoreStore::default(), Some(2718), 7).with_recording();
    session.input_mut().press(Key::Start);
    session.advance(Duration::from_secs(1)).unwrap();
    session.input_mut().press(Key::Right);
    session.input_mut().press(Key::RotateCcw);
    session.advance(Duration::from_secs(2)).unwrap();

    let replay = session.take_recording().unwrap();
    assert_eq!(replay.frames.len(), 180);
    assert_eq!(replay.start_level, 7);
    assert_eq!(replay.frames[60], FrameInput::new(&[Action::RotateCcw], HeldInputs {
        direction: Direction::Right,
        soft_drop: false,
    }));

    let outcome = run_replay(&replay).unwrap();
    assert_eq!(&outcome.state, session.game());
}

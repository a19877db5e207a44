use std::path::PathBuf;

use super::*;
use crate::domain::models::MessageType;

fn props(dir: &tempfile::TempDir, staged: Vec<PathBuf>) -> AppStateProps {
    AppStateProps {
        model: MODELS[0].to_string(),
        personality: true,
        staged_files: staged,
        root: dir.path().to_path_buf(),
    }
}

fn fixture(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "content\n").unwrap();
    path
}

#[test]
fn test_starts_on_the_chat_tab() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(props(&dir, vec![])).unwrap();

    assert_eq!(state.tab, Tab::Chat);
    assert!(!state.waiting_for_backend);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].author, Author::Swole);
}

#[test]
fn test_cli_files_are_staged_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture(&dir, "main.py");
    let state = AppState::new(props(&dir, vec![file.clone()])).unwrap();

    assert!(state.staging.contains(&file));
}

#[test]
fn test_submission_tracks_prompt_and_waiting_flag() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = AppState::new(props(&dir, vec![])).unwrap();

    state.begin_submission("how do I deadlift?");
    assert!(state.waiting_for_backend);
    assert_eq!(state.last_prompt.as_deref(), Some("how do I deadlift?"));
    assert_eq!(state.messages.last().unwrap().author, Author::User);
}

#[test]
fn test_failed_completion_keeps_the_prompt_for_resend() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = AppState::new(props(&dir, vec![])).unwrap();

    state.begin_submission("how do I deadlift?");
    state.handle_completion_failed(Message::new_with_type(
        Author::Swole,
        MessageType::Error,
        "API error (429): slow down",
    ));

    assert!(!state.waiting_for_backend);
    assert_eq!(state.last_prompt.as_deref(), Some("how do I deadlift?"));
    assert_eq!(
        state.messages.last().unwrap().message_type,
        MessageType::Error
    );
}

#[test]
fn test_stage_and_unstage_selected() {
    let dir = tempfile::tempdir().unwrap();
    fixture(&dir, "main.py");
    let mut state = AppState::new(props(&dir, vec![])).unwrap();

    state.stage_selected();
    assert_eq!(state.staging.len(), 1);

    // Staging the same selection twice is a no-op.
    state.stage_selected();
    assert_eq!(state.staging.len(), 1);

    state.focus = Focus::Staged;
    state.unstage_selected();
    assert!(state.staging.is_empty());
    assert_eq!(state.staged_selected, 0);
}

#[test]
fn test_unstage_clamps_the_selection() {
    let dir = tempfile::tempdir().unwrap();
    let first = fixture(&dir, "a.py");
    let second = fixture(&dir, "b.py");
    let mut state = AppState::new(props(&dir, vec![first, second])).unwrap();

    state.focus = Focus::Staged;
    state.selection_down();
    assert_eq!(state.staged_selected, 1);

    state.unstage_selected();
    assert_eq!(state.staging.len(), 1);
    assert_eq!(state.staged_selected, 0);
}

#[test]
fn test_cycle_model_wraps_around() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = AppState::new(props(&dir, vec![])).unwrap();

    let mut seen = vec![state.model.clone()];
    for _ in 0..MODELS.len() {
        seen.push(state.cycle_model());
    }

    assert_eq!(seen.first(), seen.last());
    assert_eq!(seen.len(), MODELS.len() + 1);
}

#[test]
fn test_reset_chat_leaves_staging_alone() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture(&dir, "main.py");
    let mut state = AppState::new(props(&dir, vec![file])).unwrap();

    state.begin_submission("prompt");
    state.reset_chat();

    assert!(state.messages.is_empty());
    assert!(state.last_prompt.is_none());
    assert_eq!(state.staging.len(), 1);
}

#[test]
fn test_reset_all_clears_staging_too() {
    let dir = tempfile::tempdir().unwrap();
    let file = fixture(&dir, "main.py");
    let mut state = AppState::new(props(&dir, vec![file])).unwrap();

    state.reset_all();
    assert!(state.messages.is_empty());
    assert!(state.staging.is_empty());
}

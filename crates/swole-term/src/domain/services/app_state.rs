use std::path::PathBuf;

use anyhow::Result;

use swole_core::config::MODELS;
use swole_core::StagingArea;

use crate::domain::models::{Author, FileBrowser, Focus, Message, Tab};

#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

pub struct AppStateProps {
    pub model: String,
    pub personality: bool,
    pub staged_files: Vec<PathBuf>,
    pub root: PathBuf,
}

/// All state the render loop draws from. Mutated only by the main loop in
/// response to events; the completion worker never touches it directly.
pub struct AppState {
    pub tab: Tab,
    pub focus: Focus,
    pub messages: Vec<Message>,
    pub staging: StagingArea,
    pub browser: FileBrowser,
    pub staged_selected: usize,
    pub model: String,
    pub personality: bool,
    pub waiting_for_backend: bool,
    pub last_prompt: Option<String>,
    /// Lines scrolled up from the bottom of the transcript. Zero means the
    /// view follows new messages.
    pub scroll: usize,
}

impl AppState {
    pub fn new(props: AppStateProps) -> Result<AppState> {
        let mut staging = StagingArea::new();
        for path in props.staged_files {
            staging.stage(path);
        }

        let mut app_state = AppState {
            tab: Tab::default(),
            focus: Focus::default(),
            messages: vec![],
            staging,
            browser: FileBrowser::new(props.root)?,
            staged_selected: 0,
            model: props.model,
            personality: props.personality,
            waiting_for_backend: false,
            last_prompt: None,
            scroll: 0,
        };

        app_state.add_message(Message::new(
            Author::Swole,
            "Welcome to the gym. Ctrl+Z switches between the chat and context tabs, Enter sends a prompt, Ctrl+C exits.",
        ));

        Ok(app_state)
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll = 0;
    }

    pub fn begin_submission(&mut self, prompt: &str) {
        self.add_message(Message::new(Author::User, prompt));
        self.last_prompt = Some(prompt.to_string());
        self.waiting_for_backend = true;
    }

    pub fn handle_completion_done(&mut self, message: Message) {
        self.waiting_for_backend = false;
        self.add_message(message);
    }

    /// A failed call renders its error and leaves the last prompt in place
    /// for resubmission.
    pub fn handle_completion_failed(&mut self, message: Message) {
        self.waiting_for_backend = false;
        self.add_message(message);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll += lines;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn selection_up(&mut self) {
        match self.focus {
            Focus::Browser => self.browser.select_up(),
            Focus::Staged => self.staged_selected = self.staged_selected.saturating_sub(1),
        }
    }

    pub fn selection_down(&mut self) {
        match self.focus {
            Focus::Browser => self.browser.select_down(),
            Focus::Staged => {
                if self.staged_selected + 1 < self.staging.len() {
                    self.staged_selected += 1;
                }
            }
        }
    }

    /// Enter on the browser: descend into a directory or stage a file.
    pub fn activate_selected(&mut self) -> Result<()> {
        match self.focus {
            Focus::Browser => {
                if !self.browser.descend()? {
                    self.stage_selected();
                }
            }
            Focus::Staged => {}
        }
        Ok(())
    }

    pub fn stage_selected(&mut self) {
        let entry = match self.browser.selected() {
            Some(entry) if !entry.is_dir => entry.path.clone(),
            _ => return,
        };
        self.staging.stage(entry);
    }

    pub fn unstage_selected(&mut self) {
        let path = match self.staging.paths().get(self.staged_selected) {
            Some(path) => path.clone(),
            None => return,
        };
        self.staging.unstage(&path);
        if self.staged_selected >= self.staging.len() {
            self.staged_selected = self.staging.len().saturating_sub(1);
        }
    }

    pub fn reset_staging(&mut self) {
        self.staging.reset();
        self.staged_selected = 0;
    }

    pub fn cycle_model(&mut self) -> String {
        let current = MODELS
            .iter()
            .position(|model| *model == self.model)
            .unwrap_or(0);
        self.model = MODELS[(current + 1) % MODELS.len()].to_string();
        self.model.clone()
    }

    pub fn toggle_personality(&mut self) -> bool {
        self.personality = !self.personality;
        self.personality
    }

    /// Clears the transcript only. Staging and settings stay as they are.
    pub fn reset_chat(&mut self) {
        self.messages.clear();
        self.last_prompt = None;
        self.scroll = 0;
    }

    pub fn reset_all(&mut self) {
        self.reset_chat();
        self.reset_staging();
    }
}

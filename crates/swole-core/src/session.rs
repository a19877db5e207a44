//! The conversation session: linear turn history and payload construction.
//!
//! The session never talks to the network. [`Session::compose`] is a pure
//! function from (history, staged files, new prompt) to the outgoing payload,
//! and [`Session::commit`] appends turns only after a completed exchange.
//! A failed completion therefore leaves history exactly as it was before the
//! call; the prompt stays resubmittable.

use crate::core_types::Turn;
use crate::staging::StagedFile;

/// Optional system-level preamble giving the assistant its themed tone.
pub const PERSONALITY_PREAMBLE: &str = "You are an AI pair-programming assistant named Swole. \
    Think step-by-step. \
    Make sure to include the programming language name at the start of Markdown code blocks. \
    You love creatine and bodybuilding and go out of your way to insert creative bodybuilding \
    and /r/swoleacceptance references in your responses.";

/// Rough chars-per-token estimate used for history truncation.
const ESTIMATED_CHARS_PER_TOKEN: f32 = 4.68;

#[derive(Debug, Clone)]
pub struct Session {
    turns: Vec<Turn>,
    personality: bool,
    max_tokens: u32,
}

impl Session {
    pub fn new(personality: bool, max_tokens: u32) -> Session {
        Session {
            turns: vec![],
            personality,
            max_tokens,
        }
    }

    pub fn push_user(&mut self, text: &str) {
        self.turns.push(Turn::user(text));
    }

    pub fn push_assistant(&mut self, text: &str) {
        self.turns.push(Turn::assistant(text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Clears history only. Staging and configuration are untouched.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn personality(&self) -> bool {
        self.personality
    }

    pub fn set_personality(&mut self, enabled: bool) {
        self.personality = enabled;
    }

    /// Builds the outgoing payload without mutating the session:
    /// the personality preamble (if enabled), one user turn per staged file
    /// tagged with its path, the turn history, and the new prompt last.
    ///
    /// History is truncated oldest-first against the max-token budget using a
    /// character-count estimate. The preamble, staged files, and the new
    /// prompt are never dropped.
    pub fn compose(&self, prompt: &str, staged: &[StagedFile]) -> Vec<Turn> {
        let mut payload: Vec<Turn> = vec![];

        if self.personality {
            payload.push(Turn::system(PERSONALITY_PREAMBLE));
        }

        for file in staged {
            payload.push(Turn::user(format!(
                "`{}`\n```{}```",
                file.path.display(),
                file.content
            )));
        }

        let fixed_tokens: f32 = payload
            .iter()
            .map(|turn| estimate_tokens(&turn.text))
            .sum::<f32>()
            + estimate_tokens(prompt);

        payload.extend(self.truncated_history(fixed_tokens));
        payload.push(Turn::user(prompt));

        payload
    }

    /// Records a completed exchange: the user prompt and the assistant reply,
    /// in that order.
    pub fn commit(&mut self, prompt: &str, reply: &str) {
        self.push_user(prompt);
        self.push_assistant(reply);
    }

    fn truncated_history(&self, fixed_tokens: f32) -> Vec<Turn> {
        let budget = self.max_tokens as f32 - fixed_tokens;

        let mut kept: Vec<&Turn> = vec![];
        let mut used = 0.0;
        for turn in self.turns.iter().rev() {
            let cost = estimate_tokens(&turn.text);
            if used + cost > budget {
                log::debug!(
                    "Dropping {} older turns to fit the token budget",
                    self.turns.len() - kept.len()
                );
                break;
            }
            used += cost;
            kept.push(turn);
        }

        kept.into_iter().rev().cloned().collect()
    }
}

fn estimate_tokens(text: &str) -> f32 {
    text.len() as f32 / ESTIMATED_CHARS_PER_TOKEN
}

use tui_textarea::Input;

use super::Message;

#[derive(Debug)]
pub enum Event {
    CompletionDone(Message),
    CompletionFailed(Message),
    Notice(Message),
    Keyboard(Input),
    KeyboardPaste(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
}

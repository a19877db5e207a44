//! Pure keybinding dispatch.
//!
//! Maps one key event to at most one command, given the active tab and the
//! focused panel. The tab-switch key is the only input that can change the
//! UI state; every other binding acts within the current tab. Keys that map
//! to nothing fall through to the chat input box.

use tui_textarea::{Input, Key};

use crate::domain::models::{Focus, Tab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchTab,
    Quit,
    Submit,
    InsertNewline,
    ResubmitLast,
    ResetChat,
    ResetAll,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    SelectionUp,
    SelectionDown,
    FocusBrowser,
    FocusStaged,
    Activate,
    Ascend,
    StageSelected,
    UnstageSelected,
    ResetStaging,
    CycleModel,
    TogglePersonality,
}

pub fn dispatch(tab: Tab, focus: Focus, input: &Input) -> Option<Command> {
    // Bindings that behave the same on either tab.
    match input {
        Input {
            key: Key::Char('z'),
            ctrl: true,
            ..
        } => return Some(Command::SwitchTab),
        Input {
            key: Key::Char('c'),
            ctrl: true,
            ..
        } => return Some(Command::Quit),
        Input {
            key: Key::Char('x'),
            ctrl: true,
            ..
        } => return Some(Command::ResetChat),
        Input {
            key: Key::Char('g'),
            ctrl: true,
            ..
        } => return Some(Command::ResetAll),
        _ => {}
    }

    match tab {
        Tab::Chat => dispatch_chat(input),
        Tab::Context => dispatch_context(focus, input),
    }
}

fn dispatch_chat(input: &Input) -> Option<Command> {
    match input {
        Input {
            key: Key::Enter, ..
        } => Some(Command::Submit),
        Input {
            key: Key::Char('o'),
            ctrl: true,
            ..
        } => Some(Command::InsertNewline),
        Input {
            key: Key::Char('r'),
            ctrl: true,
            ..
        } => Some(Command::ResubmitLast),
        Input { key: Key::Up, .. } => Some(Command::ScrollUp),
        Input { key: Key::Down, .. } => Some(Command::ScrollDown),
        Input {
            key: Key::PageUp, ..
        } => Some(Command::ScrollPageUp),
        Input {
            key: Key::PageDown, ..
        } => Some(Command::ScrollPageDown),
        Input {
            key: Key::Char('u'),
            ctrl: true,
            ..
        } => Some(Command::ScrollPageUp),
        Input {
            key: Key::Char('d'),
            ctrl: true,
            ..
        } => Some(Command::ScrollPageDown),
        _ => None,
    }
}

fn dispatch_context(focus: Focus, input: &Input) -> Option<Command> {
    match input {
        Input { key: Key::Up, .. } => Some(Command::SelectionUp),
        Input { key: Key::Down, .. } => Some(Command::SelectionDown),
        Input { key: Key::Left, .. } => Some(Command::FocusBrowser),
        Input {
            key: Key::Right, ..
        } => Some(Command::FocusStaged),
        Input {
            key: Key::Enter, ..
        } => Some(Command::Activate),
        Input {
            key: Key::Backspace,
            ..
        } if focus == Focus::Browser => Some(Command::Ascend),
        Input {
            key: Key::Char('s'),
            ctrl: false,
            alt: false,
            ..
        } if focus == Focus::Browser => Some(Command::StageSelected),
        Input {
            key: Key::Char('u'),
            ctrl: false,
            alt: false,
            ..
        } if focus == Focus::Staged => Some(Command::UnstageSelected),
        Input {
            key: Key::Char('r'),
            ctrl: false,
            alt: false,
            ..
        } => Some(Command::ResetStaging),
        Input {
            key: Key::Char('m'),
            ctrl: false,
            alt: false,
            ..
        } => Some(Command::CycleModel),
        Input {
            key: Key::Char('p'),
            ctrl: false,
            alt: false,
            ..
        } => Some(Command::TogglePersonality),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Input {
        Input {
            key: Key::Char(c),
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    fn ctrl(c: char) -> Input {
        Input {
            key: Key::Char(c),
            ctrl: true,
            alt: false,
            shift: false,
        }
    }

    fn special(k: Key) -> Input {
        Input {
            key: k,
            ctrl: false,
            alt: false,
            shift: false,
        }
    }

    #[test]
    fn test_only_the_tab_switch_key_changes_tabs() {
        let inputs = [
            key('a'),
            key('s'),
            key('z'),
            ctrl('c'),
            ctrl('r'),
            ctrl('x'),
            special(Key::Enter),
            special(Key::Up),
            special(Key::Backspace),
        ];

        for tab in [Tab::Chat, Tab::Context] {
            for input in &inputs {
                assert_ne!(
                    dispatch(tab, Focus::Browser, input),
                    Some(Command::SwitchTab),
                    "{input:?} must not switch tabs"
                );
            }
            assert_eq!(
                dispatch(tab, Focus::Browser, &ctrl('z')),
                Some(Command::SwitchTab)
            );
        }
    }

    #[test]
    fn test_global_bindings_work_on_both_tabs() {
        for tab in [Tab::Chat, Tab::Context] {
            assert_eq!(dispatch(tab, Focus::Browser, &ctrl('c')), Some(Command::Quit));
            assert_eq!(
                dispatch(tab, Focus::Browser, &ctrl('x')),
                Some(Command::ResetChat)
            );
            assert_eq!(
                dispatch(tab, Focus::Browser, &ctrl('g')),
                Some(Command::ResetAll)
            );
        }
    }

    #[test]
    fn test_chat_tab_bindings() {
        let tab = Tab::Chat;
        assert_eq!(
            dispatch(tab, Focus::Browser, &special(Key::Enter)),
            Some(Command::Submit)
        );
        assert_eq!(
            dispatch(tab, Focus::Browser, &ctrl('r')),
            Some(Command::ResubmitLast)
        );
        assert_eq!(
            dispatch(tab, Focus::Browser, &special(Key::Up)),
            Some(Command::ScrollUp)
        );
        assert_eq!(
            dispatch(tab, Focus::Browser, &ctrl('d')),
            Some(Command::ScrollPageDown)
        );
        // Plain characters fall through to the input box.
        assert_eq!(dispatch(tab, Focus::Browser, &key('s')), None);
        assert_eq!(dispatch(tab, Focus::Browser, &key('m')), None);
    }

    #[test]
    fn test_context_tab_bindings_depend_on_focus() {
        let tab = Tab::Context;
        assert_eq!(
            dispatch(tab, Focus::Browser, &key('s')),
            Some(Command::StageSelected)
        );
        assert_eq!(dispatch(tab, Focus::Staged, &key('s')), None);
        assert_eq!(
            dispatch(tab, Focus::Staged, &key('u')),
            Some(Command::UnstageSelected)
        );
        assert_eq!(dispatch(tab, Focus::Browser, &key('u')), None);
        assert_eq!(
            dispatch(tab, Focus::Browser, &special(Key::Backspace)),
            Some(Command::Ascend)
        );
        assert_eq!(dispatch(tab, Focus::Staged, &special(Key::Backspace)), None);
        for focus in [Focus::Browser, Focus::Staged] {
            assert_eq!(dispatch(tab, focus, &key('m')), Some(Command::CycleModel));
            assert_eq!(
                dispatch(tab, focus, &key('p')),
                Some(Command::TogglePersonality)
            );
            assert_eq!(dispatch(tab, focus, &key('r')), Some(Command::ResetStaging));
        }
    }
}

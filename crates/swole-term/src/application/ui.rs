use std::io;
use std::io::Stdout;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::List;
use ratatui::widgets::ListItem;
use ratatui::widgets::ListState;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Tabs;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::TextArea;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Focus;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::Tab;
use crate::domain::services::keymap;
use crate::domain::services::keymap::Command;
use crate::domain::services::AppState;
use crate::domain::services::AppStateProps;
use crate::domain::services::EventsService;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const CHAT_HELP: &str =
    "Ctrl+Z tabs · Enter send · Ctrl+O newline · Ctrl+R resend · Ctrl+X clear chat · Ctrl+G reset all · Ctrl+C abort/quit";
const CONTEXT_HELP: &str =
    "Ctrl+Z tabs · arrows navigate · Enter open/stage · s stage · u unstage · r reset staging · m model · p personality";

pub struct StartProps {
    pub model: String,
    pub personality: bool,
    pub staged_files: Vec<PathBuf>,
    pub initial_prompt: Option<String>,
    pub root: PathBuf,
}

/// Restores the terminal from raw mode. Safe to call from a panic handler
/// where the normal teardown path is unreachable.
pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = execute!(io::stdout(), crossterm::cursor::Show);
}

pub async fn start_loop(
    props: StartProps,
    action_tx: mpsc::UnboundedSender<Action>,
    event_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut state = AppState::new(AppStateProps {
        model: props.model,
        personality: props.personality,
        staged_files: props.staged_files,
        root: props.root,
    })?;

    let mut events = EventsService::new(event_rx);
    let mut textarea = build_textarea();

    enable_raw_mode()?;
    execute!(
        io::stdout(),
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    if let Some(prompt) = props.initial_prompt {
        submit_prompt(&mut state, &action_tx, &prompt).await?;
    }

    let res = main_loop(
        &mut terminal,
        &mut state,
        &mut events,
        &mut textarea,
        &action_tx,
    )
    .await;

    disable_raw_mode()?;
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    res
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    events: &mut EventsService,
    textarea: &mut TextArea<'static>,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    let mut tick: usize = 0;

    loop {
        terminal.draw(|frame| render(frame, state, textarea, tick))?;

        match events.next().await? {
            Event::Keyboard(input) => match keymap::dispatch(state.tab, state.focus, &input) {
                // Quit aborts a call in flight instead of leaving.
                Some(Command::Quit) if state.waiting_for_backend => {
                    state.waiting_for_backend = false;
                    action_tx.send(Action::AbortCompletion)?;
                }
                Some(Command::Quit) => break,
                Some(command) => {
                    handle_command(command, state, textarea, action_tx).await?;
                }
                None => {
                    if state.tab == Tab::Chat {
                        textarea.input(input);
                    }
                }
            },
            Event::KeyboardPaste(text) => {
                if state.tab == Tab::Chat {
                    textarea.insert_str(&text.replace('\r', "\n"));
                }
            }
            Event::CompletionDone(message) => state.handle_completion_done(message),
            Event::CompletionFailed(message) => state.handle_completion_failed(message),
            Event::Notice(message) => state.add_message(message),
            Event::UITick => tick = tick.wrapping_add(1),
            Event::UIScrollUp => state.scroll_up(1),
            Event::UIScrollDown => state.scroll_down(1),
        }
    }

    Ok(())
}

async fn handle_command(
    command: Command,
    state: &mut AppState,
    textarea: &mut TextArea<'static>,
    action_tx: &mpsc::UnboundedSender<Action>,
) -> Result<()> {
    match command {
        Command::SwitchTab => state.tab = state.tab.toggle(),
        Command::Submit => {
            let prompt = textarea.lines().join("\n").trim().to_string();
            if submit_prompt(state, action_tx, &prompt).await? {
                *textarea = build_textarea();
            }
        }
        Command::InsertNewline => {
            textarea.insert_newline();
        }
        Command::ResubmitLast => {
            if let Some(prompt) = state.last_prompt.clone() {
                submit_prompt(state, action_tx, &prompt).await?;
            }
        }
        Command::ResetChat => {
            state.reset_chat();
            action_tx.send(Action::ResetSession)?;
        }
        Command::ResetAll => {
            state.reset_all();
            action_tx.send(Action::ResetSession)?;
        }
        Command::ScrollUp => state.scroll_up(1),
        Command::ScrollDown => state.scroll_down(1),
        Command::ScrollPageUp => state.scroll_up(10),
        Command::ScrollPageDown => state.scroll_down(10),
        Command::SelectionUp => state.selection_up(),
        Command::SelectionDown => state.selection_down(),
        Command::FocusBrowser => state.focus = Focus::Browser,
        Command::FocusStaged => state.focus = Focus::Staged,
        Command::Activate => state.activate_selected()?,
        Command::Ascend => {
            state.browser.ascend()?;
        }
        Command::StageSelected => state.stage_selected(),
        Command::UnstageSelected => state.unstage_selected(),
        Command::ResetStaging => state.reset_staging(),
        Command::CycleModel => {
            let model = state.cycle_model();
            action_tx.send(Action::SetModel(model))?;
        }
        Command::TogglePersonality => {
            let enabled = state.toggle_personality();
            action_tx.send(Action::SetPersonality(enabled))?;
        }
        Command::Quit => {}
    }

    Ok(())
}

/// Materializes the staging area and hands the prompt to the worker. Returns
/// whether a submission actually happened: a staging failure is rendered
/// inline and nothing is sent.
async fn submit_prompt(
    state: &mut AppState,
    action_tx: &mpsc::UnboundedSender<Action>,
    prompt: &str,
) -> Result<bool> {
    if prompt.is_empty() || state.waiting_for_backend {
        return Ok(false);
    }

    let files = match state.staging.materialize().await {
        Ok(files) => files,
        Err(err) => {
            state.add_message(Message::new_with_type(
                Author::Swole,
                MessageType::Error,
                &format!("{err}\n\nNothing was sent."),
            ));
            return Ok(false);
        }
    };

    state.begin_submission(prompt);
    action_tx.send(Action::SubmitPrompt {
        prompt: prompt.to_string(),
        files,
    })?;

    Ok(true)
}

fn build_textarea() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text("Type here");
    textarea.set_cursor_line_style(Style::default());
    textarea.set_block(Block::default().borders(Borders::ALL).title(" Prompt "));
    textarea
}

fn render(frame: &mut Frame, state: &mut AppState, textarea: &TextArea<'static>, tick: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tab_bar(frame, chunks[0], state);
    match state.tab {
        Tab::Chat => render_chat(frame, chunks[1], state, textarea),
        Tab::Context => render_context(frame, chunks[1], state),
    }
    render_footer(frame, chunks[2], state, tick);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let selected = match state.tab {
        Tab::Chat => 0,
        Tab::Context => 1,
    };

    let tabs = Tabs::new(vec![" Chat ", " Context "])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(tabs, area);
}

fn render_chat(frame: &mut Frame, area: Rect, state: &mut AppState, textarea: &TextArea<'static>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(area);

    let lines = transcript_lines(state);
    let height = chunks[0].height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(height);
    if state.scroll > max_scroll {
        state.scroll = max_scroll;
    }
    let offset = (max_scroll - state.scroll) as u16;

    let transcript = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Chat "))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));

    frame.render_widget(transcript, chunks[0]);
    frame.render_widget(textarea, chunks[1]);
}

fn transcript_lines(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = vec![];

    for message in &state.messages {
        let (label, label_style) = match message.author {
            Author::User => ("you".to_string(), Style::default().fg(Color::Cyan)),
            Author::Model => (state.model.clone(), Style::default().fg(Color::Green)),
            Author::Swole => ("swole".to_string(), Style::default().fg(Color::Yellow)),
        };

        let text_style = match message.message_type {
            MessageType::Normal => Style::default(),
            MessageType::Error => Style::default().fg(Color::Red),
        };

        lines.push(Line::from(Span::styled(
            format!("{label}:"),
            label_style.add_modifier(Modifier::BOLD),
        )));
        for text_line in message.text.split('\n') {
            lines.push(Line::from(Span::styled(text_line.to_string(), text_style)));
        }
        lines.push(Line::default());
    }

    lines
}

fn render_context(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_browser(frame, columns[0], state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(columns[1]);

    render_staged(frame, right[0], state);
    render_settings(frame, right[1], state);
}

fn panel_border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_browser(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .browser
        .entries()
        .iter()
        .map(|entry| {
            let marker = if !entry.is_dir && state.staging.contains(&entry.path) {
                "* "
            } else {
                "  "
            };
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", state.browser.cwd().display()))
                .border_style(panel_border(state.focus == Focus::Browser)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    if !state.browser.entries().is_empty() {
        list_state.select(Some(state.browser.selected_index()));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_staged(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<ListItem> = state
        .staging
        .paths()
        .iter()
        .map(|path| ListItem::new(path.display().to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Staged Files ")
                .border_style(panel_border(state.focus == Focus::Staged)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut list_state = ListState::default();
    if !state.staging.is_empty() {
        list_state.select(Some(state.staged_selected));
    }

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_settings(frame: &mut Frame, area: Rect, state: &AppState) {
    let personality = if state.personality { "on" } else { "off" };
    let settings = Paragraph::new(vec![
        Line::from(format!("Model: {}", state.model)),
        Line::from(format!("Personality: {personality}")),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Settings "));

    frame.render_widget(settings, area);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, tick: usize) {
    let help = match state.tab {
        Tab::Chat => CHAT_HELP,
        Tab::Context => CONTEXT_HELP,
    };

    let text = if state.waiting_for_backend {
        format!(" {} waiting for the model · {help}", SPINNER[tick % SPINNER.len()])
    } else {
        format!(" {help}")
    };

    let footer = Paragraph::new(Line::from(text)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

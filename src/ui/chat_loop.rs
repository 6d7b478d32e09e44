//! Main chat event loop
//!
//! Draws the frame, feeds terminal events to the input box, dispatches turns
//! through [`TurnService`] and applies their resolutions as they arrive.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};
use tui_textarea::Input as TAInput;

use crate::core::client::{CompletionClient, GeminiClient};
use crate::core::config::Settings;
use crate::core::constants::{API_KEY_ENV, SUGGESTED_PROMPTS};
use crate::core::controller::TurnController;
use crate::core::notification::{Notification, Notifier};
use crate::core::turn_service::{TurnResolution, TurnService};
use crate::ui::renderer::ui;
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use crate::ui::toasts::ToastQueue;

const PAGE_ROWS: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Submit,
    Newline,
    ClearChat,
    ToggleTheme,
    /// Copy the selected turn, or the last reply when nothing is selected.
    Copy,
    SelectPrevious,
    SelectNext,
    /// Drop the selection, or quit when there is none.
    Escape,
    Suggestion(usize),
    ScrollUp(u16),
    ScrollDown(u16),
    ScrollTop,
    ScrollBottom,
    /// Hand the key to the input box.
    Edit,
}

pub fn map_key(key: &KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => KeyAction::Quit,
        KeyCode::Esc => KeyAction::Escape,
        KeyCode::Char('l') if ctrl => KeyAction::ClearChat,
        KeyCode::Char('t') if ctrl => KeyAction::ToggleTheme,
        KeyCode::Char('y') if ctrl => KeyAction::Copy,
        KeyCode::Up if alt => KeyAction::SelectPrevious,
        KeyCode::Down if alt => KeyAction::SelectNext,
        KeyCode::Char(c @ '1'..='9') if alt => {
            let index = c as usize - '1' as usize;
            if index < SUGGESTED_PROMPTS.len() {
                KeyAction::Suggestion(index)
            } else {
                KeyAction::Edit
            }
        }
        KeyCode::Enter if alt || shift => KeyAction::Newline,
        KeyCode::Char('j') if ctrl => KeyAction::Newline,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::PageUp => KeyAction::ScrollUp(PAGE_ROWS),
        KeyCode::PageDown => KeyAction::ScrollDown(PAGE_ROWS),
        KeyCode::Up if ctrl => KeyAction::ScrollUp(1),
        KeyCode::Down if ctrl => KeyAction::ScrollDown(1),
        KeyCode::Home if ctrl => KeyAction::ScrollTop,
        KeyCode::End if ctrl => KeyAction::ScrollBottom,
        _ => KeyAction::Edit,
    }
}

/// Owns the controller and input state for one interactive session.
pub struct ChatSession {
    pub controller: TurnController<ToastQueue>,
    pub ui: UiState,
    service: TurnService,
}

impl ChatSession {
    pub fn new(controller: TurnController<ToastQueue>, ui: UiState, service: TurnService) -> Self {
        Self {
            controller,
            ui,
            service,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match map_key(&key) {
            KeyAction::Quit => self.ui.exit_requested = true,
            KeyAction::Submit => {
                let text = self.ui.input_text();
                if self.dispatch(&text) {
                    self.ui.clear_input();
                }
            }
            KeyAction::Newline => {
                self.ui.textarea_mut().insert_newline();
            }
            KeyAction::ClearChat => {
                self.controller.clear();
                self.ui.selected_turn = None;
                self.ui.follow_bottom();
            }
            KeyAction::ToggleTheme => self.ui.toggle_theme(),
            KeyAction::Copy => {
                let copied = match self.ui.selected_turn {
                    Some(index) => self.controller.copy_turn(index),
                    None => self.controller.copy_last_reply(),
                };
                if !copied {
                    debug!(selected = ?self.ui.selected_turn, "nothing to copy");
                }
            }
            KeyAction::SelectPrevious => self.ui.select_previous(self.controller.state().len()),
            KeyAction::SelectNext => self.ui.select_next(self.controller.state().len()),
            KeyAction::Escape => {
                if self.ui.selected_turn.take().is_none() {
                    self.ui.exit_requested = true;
                }
            }
            KeyAction::Suggestion(index) => {
                if !self.controller.state().is_empty() {
                    debug!(index, "suggestions are only offered on an empty chat");
                    return;
                }
                if let Some(pending) = self.controller.begin_suggestion(index) {
                    self.service.dispatch(self.controller.client(), pending);
                    self.ui.follow_bottom();
                }
            }
            KeyAction::ScrollUp(rows) => self.ui.scroll_up(rows),
            KeyAction::ScrollDown(rows) => self.ui.scroll_down(rows),
            KeyAction::ScrollTop => self.ui.scroll_to_top(),
            KeyAction::ScrollBottom => self.ui.follow_bottom(),
            KeyAction::Edit => {
                self.ui.textarea_mut().input(TAInput::from(key));
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        let textarea = self.ui.textarea_mut();
        for (index, line) in normalized.split('\n').enumerate() {
            if index > 0 {
                textarea.insert_newline();
            }
            textarea.insert_str(line);
        }
    }

    /// Start a turn for `text`. Returns false when the controller refused it
    /// (blank input or a request already in flight).
    fn dispatch(&mut self, text: &str) -> bool {
        match self.controller.begin(text) {
            Some(pending) => {
                self.service.dispatch(self.controller.client(), pending);
                self.ui.follow_bottom();
                true
            }
            None => false,
        }
    }
}

/// Build the session for `settings`. A missing API key is reported as a
/// toast, since logging is usually off while the UI owns the terminal.
pub fn start_session(settings: &Settings) -> (ChatSession, UnboundedReceiver<TurnResolution>) {
    let client: Arc<dyn CompletionClient> = Arc::new(GeminiClient::new(
        settings.base_url.clone(),
        settings.model.clone(),
        settings.api_key.clone(),
    ));
    let mut toasts = ToastQueue::new();
    if settings.api_key.is_empty() {
        toasts.notify(Notification::error(
            "API key missing",
            format!("Set {API_KEY_ENV} to send messages."),
        ));
    }
    let controller = TurnController::new(client, toasts);
    let (service, rx) = TurnService::new();
    let ui_state = UiState::new(Theme::from_name(&settings.theme));
    (ChatSession::new(controller, ui_state, service), rx)
}

pub async fn run_chat(settings: Settings) -> Result<(), Box<dyn Error>> {
    let (mut session, mut rx) = start_session(&settings);

    info!(model = %settings.model, base_url = %settings.base_url, "starting chat session");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result: Result<(), Box<dyn Error>> = loop {
        if session.ui.exit_requested {
            break Ok(());
        }

        session.controller.notifier_mut().prune(Instant::now());
        if let Err(err) = terminal.draw(|f| ui(f, &session.controller, &session.ui)) {
            break Err(err.into());
        }

        while let Ok(resolution) = rx.try_recv() {
            session.controller.apply(resolution);
        }

        match event::poll(Duration::from_millis(50)) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(err) => break Err(err.into()),
        }

        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => session.handle_key(key),
            Ok(Event::Paste(text)) => session.handle_paste(&text),
            Ok(_) => {}
            Err(err) => break Err(err.into()),
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

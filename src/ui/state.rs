use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::ui::theme::Theme;

/// Presentation-only state: input buffer, theme and scroll position.
pub struct UiState {
    pub theme: Theme,
    textarea: TextArea<'static>,
    /// Rows scrolled up from the bottom of the transcript; 0 follows new
    /// turns.
    pub scroll_from_bottom: u16,
    /// Turn targeted by copy, if the user picked one.
    pub selected_turn: Option<usize>,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        let mut state = Self {
            theme,
            textarea: TextArea::default(),
            scroll_from_bottom: 0,
            selected_turn: None,
            exit_requested: false,
        };
        state.restyle_input();
        state
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.restyle_input();
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.restyle_input();
    }

    /// Number of text rows the input box wants, between 1 and 6.
    pub fn input_height(&self) -> u16 {
        self.textarea.lines().len().clamp(1, 6) as u16
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(rows);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_from_bottom = u16::MAX;
    }

    pub fn follow_bottom(&mut self) {
        self.scroll_from_bottom = 0;
    }

    /// Move the selection one turn up; starts at the newest turn.
    pub fn select_previous(&mut self, turn_count: usize) {
        if turn_count == 0 {
            self.selected_turn = None;
            return;
        }
        self.selected_turn = Some(match self.selected_turn {
            Some(index) => index.min(turn_count - 1).saturating_sub(1),
            None => turn_count - 1,
        });
    }

    /// Move the selection one turn down; moving past the newest turn clears it.
    pub fn select_next(&mut self, turn_count: usize) {
        self.selected_turn = match self.selected_turn {
            Some(index) if index + 1 < turn_count => Some(index + 1),
            _ => None,
        };
    }

    fn restyle_input(&mut self) {
        let theme = &self.theme;
        self.textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style)
                .title("Message (Enter to send, Alt+Enter for new line)")
                .title_style(theme.input_title_style),
        );
        self.textarea.set_style(theme.input_text_style);
        self.textarea.set_cursor_style(theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(ratatui::style::Style::default());
        self.textarea
            .set_placeholder_text("Type your message here...");
        self.textarea.set_placeholder_style(theme.muted_text_style);
    }
}

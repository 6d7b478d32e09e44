use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::constants::SUGGESTED_PROMPTS;
use crate::core::controller::TurnController;
use crate::core::conversation::ConversationState;
use crate::core::message::TurnRole;
use crate::core::notification::NotificationKind;
use crate::ui::state::UiState;
use crate::ui::text_wrapping::wrap_lines;
use crate::ui::theme::Theme;
use crate::ui::toasts::ToastQueue;

/// Side panel is only shown when the terminal is at least this wide.
const SIDE_PANEL_MIN_WIDTH: u16 = 100;
const SIDE_PANEL_WIDTH: u16 = 34;
const TOAST_WIDTH: u16 = 44;

pub fn ui(f: &mut Frame, controller: &TurnController<ToastQueue>, ui_state: &UiState) {
    let theme = &ui_state.theme;
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        area,
    );

    let (main_area, side_area) = if area.width >= SIDE_PANEL_MIN_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .split(area);
        (columns[0], Some(columns[1]))
    } else {
        (area, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(ui_state.input_height() + 2), // +2 for borders
        ])
        .split(main_area);

    draw_transcript(f, rows[0], controller.state(), ui_state);
    f.render_widget(ui_state.textarea(), rows[1]);

    if let Some(side_area) = side_area {
        draw_side_panel(f, side_area, controller, theme);
    }

    draw_toasts(f, rows[0], controller.notifier(), theme);
}

fn draw_transcript(f: &mut Frame, area: Rect, state: &ConversationState, ui_state: &UiState) {
    let theme = &ui_state.theme;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style)
        .title(Span::styled(
            format!("Gemini Chat v{}", env!("CARGO_PKG_VERSION")),
            theme.title_style,
        ));
    let inner = block.inner(area);

    let lines = build_display_lines(state, theme, ui_state.selected_turn);
    let rows = wrap_lines(&lines, inner.width);
    let total = rows.len().min(u16::MAX as usize) as u16;
    let max_offset = total.saturating_sub(inner.height);
    let offset = max_offset.saturating_sub(ui_state.scroll_from_bottom.min(max_offset));

    let paragraph = Paragraph::new(rows).block(block).scroll((offset, 0));
    f.render_widget(paragraph, area);
}

/// Transcript lines, or the welcome panel when there are no turns. The
/// selected turn's label is marked.
pub fn build_display_lines(
    state: &ConversationState,
    theme: &Theme,
    selected: Option<usize>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.is_empty() && !state.is_busy() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Welcome to Gemini Chat",
            theme.title_style,
        )));
        lines.push(Line::from(Span::styled(
            "Start a conversation or try one of our suggested prompts",
            theme.muted_text_style,
        )));
        lines.push(Line::from(""));
        for (index, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  Alt+{}  ", index + 1), theme.accent_style),
                Span::styled(*prompt, theme.assistant_text_style),
            ]));
        }
        return lines;
    }

    for (index, turn) in state.turns().iter().enumerate() {
        let (prefix_style, text_style) = match turn.role() {
            TurnRole::User => (theme.user_prefix_style, theme.user_text_style),
            TurnRole::Assistant => (theme.assistant_prefix_style, theme.assistant_text_style),
        };
        let label = Span::styled(format!("{}:", turn.role().display_name()), prefix_style);
        if selected == Some(index) {
            lines.push(Line::from(vec![
                Span::styled("▶ ", theme.accent_style),
                label.patch_style(Style::default().add_modifier(Modifier::REVERSED)),
            ]));
        } else {
            lines.push(Line::from(label));
        }
        for text_line in turn.text().lines() {
            lines.push(Line::from(Span::styled(text_line.to_string(), text_style)));
        }
        lines.push(Line::from(""));
    }

    if state.is_busy() {
        lines.push(Line::from(Span::styled(
            "⟳ Generating response...",
            theme.busy_indicator_style,
        )));
    }

    lines
}

fn draw_side_panel(
    f: &mut Frame,
    area: Rect,
    controller: &TurnController<ToastQueue>,
    theme: &Theme,
) {
    let label = |text: &'static str| Span::styled(text, theme.muted_text_style);
    let value = |text: String| Span::styled(text, theme.accent_style);

    let mut lines = vec![
        Line::from(Span::styled("Chat Information", theme.title_style)),
        Line::from(vec![
            label("Messages  "),
            value(controller.state().len().to_string()),
        ]),
        Line::from(vec![label("Model     "), value(controller.model().to_string())]),
        Line::from(vec![label("Theme     "), value(theme.mode.name().to_string())]),
        Line::from(""),
        Line::from(Span::styled("Keyboard Shortcuts", theme.title_style)),
    ];

    for (keys, action) in [
        ("Enter", "Send message"),
        ("Alt+Enter", "New line"),
        ("Alt+1..4", "Suggested prompt"),
        ("Ctrl+L", "Clear chat"),
        ("Ctrl+T", "Toggle theme"),
        ("Alt+Up/Dn", "Select message"),
        ("Ctrl+Y", "Copy selected/last"),
        ("PgUp/PgDn", "Scroll"),
        ("Ctrl+C", "Quit"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{keys:<11}"), theme.accent_style),
            label(action),
        ]));
    }

    let panel = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::LEFT)
                .border_style(theme.border_style),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn draw_toasts(f: &mut Frame, area: Rect, toasts: &ToastQueue, theme: &Theme) {
    if toasts.is_empty() || area.width < 10 {
        return;
    }

    let width = TOAST_WIDTH.min(area.width);
    let mut y = area.y;
    for toast in toasts.visible() {
        let height = 4;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect {
            x: area.x + area.width - width,
            y,
            width,
            height,
        };
        let style = match toast.notification.kind {
            NotificationKind::Success => theme.toast_success_style,
            NotificationKind::Error => theme.toast_error_style,
        };
        let body = Paragraph::new(Line::from(Span::styled(
            toast.notification.description.clone(),
            theme.assistant_text_style,
        )))
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(theme.background_color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(Span::styled(toast.notification.title.clone(), style)),
        );
        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
        y += height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::{ApiError, CompletionClient};
    use async_trait::async_trait;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct FixedClient(String);

    fn fixed(reply: &str) -> Arc<FixedClient> {
        Arc::new(FixedClient(reply.to_string()))
    }

    #[async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(&self, _prompt: &str) -> Result<String, ApiError> {
            Ok(self.0.clone())
        }

        fn model(&self) -> &str {
            "gemini-test"
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn empty_transcript_shows_suggestions() {
        let state = ConversationState::new();
        let lines: Vec<String> = build_display_lines(&state, &Theme::dark(), None)
            .iter()
            .map(line_text)
            .collect();

        assert!(lines.contains(&"Welcome to Gemini Chat".to_string()));
        for prompt in SUGGESTED_PROMPTS {
            assert!(lines.iter().any(|line| line.ends_with(prompt)));
        }
    }

    #[tokio::test]
    async fn transcript_labels_turns_and_busy_indicator() {
        let mut controller = TurnController::new(fixed("Quantum computers use qubits."), ToastQueue::new());
        controller.submit("Hello\nthere").await;
        let pending = controller.begin("Again").unwrap();

        let lines: Vec<String> = build_display_lines(controller.state(), &Theme::light(), None)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(
            lines,
            vec![
                "You:",
                "Hello",
                "there",
                "",
                "Gemini:",
                "Quantum computers use qubits.",
                "",
                "You:",
                "Again",
                "",
                "⟳ Generating response...",
            ]
        );
        controller.resolve(pending.id(), Ok("done".into()));
    }

    #[tokio::test]
    async fn selected_turn_label_is_marked() {
        let mut controller = TurnController::new(fixed("Hi"), ToastQueue::new());
        controller.submit("Hello").await;

        let lines: Vec<String> = build_display_lines(controller.state(), &Theme::dark(), Some(1))
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(lines, vec!["You:", "Hello", "", "▶ Gemini:", "Hi", ""]);
    }

    #[tokio::test]
    async fn following_bottom_shows_end_of_long_reply() {
        let mut reply: String = (0..60).map(|n| format!("abcdefg hijklm{n} ")).collect();
        reply.push_str("\nLAST-LINE-MARKER");
        let mut controller = TurnController::new(fixed(&reply), ToastQueue::new());
        controller.submit("Hello").await;
        let ui_state = UiState::new(Theme::dark());

        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|f| ui(f, &controller, &ui_state))
            .expect("draw");

        let screen = buffer_text(&terminal);
        assert!(screen.contains("hijklm59"), "screen:\n{screen}");
        assert!(screen.contains("LAST-LINE-MARKER"), "screen:\n{screen}");
    }

    #[tokio::test]
    async fn full_frame_renders_side_panel_and_toast() {
        let mut controller = TurnController::new(fixed("Quantum computers use qubits."), ToastQueue::new());
        controller.submit("Hello").await;
        let ui_state = UiState::new(Theme::dark());

        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| ui(f, &controller, &ui_state))
            .expect("draw");

        let screen = buffer_text(&terminal);
        assert!(screen.contains("Chat Information"));
        assert!(screen.contains("gemini-test"));
        assert!(screen.contains("Response generated"));
        assert!(screen.contains("Quantum computers use qubits."));
    }
}

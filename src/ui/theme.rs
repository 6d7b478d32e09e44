use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,
    // Overall background color to paint the full frame
    pub background_color: Color,

    // Transcript
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,
    pub muted_text_style: Style,
    pub accent_style: Style,

    // Chrome
    pub title_style: Style,
    pub busy_indicator_style: Style,
    pub border_style: Style,

    // Input area
    pub input_title_style: Style,
    pub input_text_style: Style,
    pub input_cursor_style: Style,

    // Toasts
    pub toast_success_style: Style,
    pub toast_error_style: Style,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Unknown names fall back to the dark theme.
    pub fn from_name(name: &str) -> Self {
        match ThemeMode::from_name(name) {
            Some(mode) => Self::for_mode(mode),
            None => {
                tracing::warn!(theme = name, "unknown theme, using dark");
                Self::dark()
            }
        }
    }

    pub fn toggled(&self) -> Self {
        Self::for_mode(self.mode.toggled())
    }

    pub fn dark() -> Self {
        Theme {
            mode: ThemeMode::Dark,
            background_color: Color::Rgb(0x10, 0x12, 0x1a),
            user_prefix_style: Style::default()
                .fg(Color::Rgb(0x8a, 0xb4, 0xf8))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(0xc6, 0xda, 0xfc)),
            assistant_prefix_style: Style::default()
                .fg(Color::Rgb(0xc5, 0x8a, 0xf9))
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Rgb(0xe8, 0xea, 0xed)),
            muted_text_style: Style::default().fg(Color::Rgb(0x9a, 0xa0, 0xa6)),
            accent_style: Style::default()
                .fg(Color::Rgb(0x8a, 0xb4, 0xf8))
                .add_modifier(Modifier::BOLD),

            title_style: Style::default()
                .fg(Color::Rgb(0x8a, 0xb4, 0xf8))
                .add_modifier(Modifier::BOLD),
            busy_indicator_style: Style::default()
                .fg(Color::Rgb(0xfd, 0xd6, 0x63))
                .add_modifier(Modifier::ITALIC),
            border_style: Style::default().fg(Color::Rgb(0x5f, 0x63, 0x68)),

            input_title_style: Style::default().fg(Color::Rgb(0x9a, 0xa0, 0xa6)),
            input_text_style: Style::default().fg(Color::Rgb(0xe8, 0xea, 0xed)),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            toast_success_style: Style::default()
                .fg(Color::Rgb(0x81, 0xc9, 0x95))
                .add_modifier(Modifier::BOLD),
            toast_error_style: Style::default()
                .fg(Color::Rgb(0xf2, 0x8b, 0x82))
                .add_modifier(Modifier::BOLD),
        }
    }

    pub fn light() -> Self {
        Theme {
            mode: ThemeMode::Light,
            background_color: Color::Rgb(0xf8, 0xf9, 0xfa),
            user_prefix_style: Style::default()
                .fg(Color::Rgb(0x1a, 0x73, 0xe8))
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Rgb(0x17, 0x4e, 0xa6)),
            assistant_prefix_style: Style::default()
                .fg(Color::Rgb(0x81, 0x3e, 0xc9))
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Rgb(0x20, 0x21, 0x24)),
            muted_text_style: Style::default().fg(Color::Rgb(0x5f, 0x63, 0x68)),
            accent_style: Style::default()
                .fg(Color::Rgb(0x1a, 0x73, 0xe8))
                .add_modifier(Modifier::BOLD),

            title_style: Style::default()
                .fg(Color::Rgb(0x1a, 0x73, 0xe8))
                .add_modifier(Modifier::BOLD),
            busy_indicator_style: Style::default()
                .fg(Color::Rgb(0xb0, 0x60, 0x00))
                .add_modifier(Modifier::ITALIC),
            border_style: Style::default().fg(Color::Rgb(0xda, 0xdc, 0xe0)),

            input_title_style: Style::default().fg(Color::Rgb(0x5f, 0x63, 0x68)),
            input_text_style: Style::default().fg(Color::Rgb(0x20, 0x21, 0x24)),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),

            toast_success_style: Style::default()
                .fg(Color::Rgb(0x18, 0x80, 0x38))
                .add_modifier(Modifier::BOLD),
            toast_error_style: Style::default()
                .fg(Color::Rgb(0xc5, 0x22, 0x1f))
                .add_modifier(Modifier::BOLD),
        }
    }
}

//! Colour palette and style helpers for the TUI
//!
//! A warm cinema palette: amber marquee on a dark auditorium background.

use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #ffb000 (marquee amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xb0, 0x00);

    /// Secondary: #5fd7ff (projector blue)
    pub const SECONDARY: Color = Color::Rgb(0x5f, 0xd7, 0xff);

    /// Accent: #ff5f87 (ticket pink)
    pub const ACCENT: Color = Color::Rgb(0xff, 0x5f, 0x87);

    /// Text: #e4e4e4
    pub const TEXT: Color = Color::Rgb(0xe4, 0xe4, 0xe4);

    /// Dim: #6c6c78
    pub const DIM: Color = Color::Rgb(0x6c, 0x6c, 0x78);

    /// Success: #87d75f
    pub const SUCCESS: Color = Color::Rgb(0x87, 0xd7, 0x5f);

    /// Error: #ff4040
    pub const ERROR: Color = Color::Rgb(0xff, 0x40, 0x40);

    /// Panels and the status bar
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1c, 0x1c, 0x24);

    /// Unfocused borders
    pub const BORDER: Color = Color::Rgb(0x80, 0x60, 0x20);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Selected table row
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Link-like text (titles that open the detail screen)
    pub fn link() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    /// Poster URLs and ids
    pub fn meta() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// IMDb rating, coloured by score
    pub fn rating(rating: &str) -> Style {
        match rating.parse::<f32>() {
            Ok(r) if r >= 7.5 => Self::success(),
            Ok(r) if r >= 5.0 => Style::default().fg(Self::PRIMARY),
            Ok(_) => Self::error(),
            Err(_) => Self::dimmed(),
        }
    }
}

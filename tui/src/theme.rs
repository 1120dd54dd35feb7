//! Color theme and glyphs for the billet TUI.
//!
//! A rose-garden palette by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};

use billet_types::UiOptions;

/// Rose garden color palette constants.
mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(24, 16, 24); // ink plum
    pub const BG_PANEL: Color = Color::Rgb(36, 24, 34); // velvet
    pub const BG_HIGHLIGHT: Color = Color::Rgb(58, 36, 50); // pressed petal
    pub const BG_BORDER: Color = Color::Rgb(110, 72, 92); // dried rose

    // === Foregrounds ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(244, 232, 222); // candlelight
    pub const TEXT_SECONDARY: Color = Color::Rgb(214, 188, 182); // parchment
    pub const TEXT_MUTED: Color = Color::Rgb(142, 118, 126); // faded script

    // === Accents ===
    pub const ROSE: Color = Color::Rgb(232, 106, 146); // rose
    pub const ROSE_DIM: Color = Color::Rgb(176, 96, 124); // rose, pressed
    pub const BLUSH: Color = Color::Rgb(248, 168, 184); // blush pink
    pub const GOLD: Color = Color::Rgb(230, 195, 132); // ribbon gold
    pub const LEAF: Color = Color::Rgb(152, 187, 108); // stem green
    pub const SCARLET: Color = Color::Rgb(255, 93, 98); // sealing wax
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_dark: Color,
    pub bg_panel: Color,
    pub bg_highlight: Color,
    pub bg_border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub rose: Color,
    pub rose_dim: Color,
    pub blush: Color,
    pub gold: Color,
    pub leaf: Color,
    pub scarlet: Color,
    /// Tints the confetti cycles through.
    pub confetti: [Color; 5],
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_dark: colors::BG_DARK,
            bg_panel: colors::BG_PANEL,
            bg_highlight: colors::BG_HIGHLIGHT,
            bg_border: colors::BG_BORDER,
            text_primary: colors::TEXT_PRIMARY,
            text_secondary: colors::TEXT_SECONDARY,
            text_muted: colors::TEXT_MUTED,
            rose: colors::ROSE,
            rose_dim: colors::ROSE_DIM,
            blush: colors::BLUSH,
            gold: colors::GOLD,
            leaf: colors::LEAF,
            scarlet: colors::SCARLET,
            confetti: [
                colors::ROSE,
                colors::BLUSH,
                colors::GOLD,
                colors::LEAF,
                colors::SCARLET,
            ],
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_dark: Color::Black,
            bg_panel: Color::Black,
            bg_highlight: Color::DarkGray,
            bg_border: Color::Gray,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,
            rose: Color::LightMagenta,
            rose_dim: Color::Magenta,
            blush: Color::LightMagenta,
            gold: Color::Yellow,
            leaf: Color::Green,
            scarlet: Color::Red,
            confetti: [
                Color::LightMagenta,
                Color::Yellow,
                Color::Green,
                Color::Cyan,
                Color::Red,
            ],
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

/// ASCII/Unicode glyphs for icons and decorations.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub heart: &'static str,
    pub sparkle: &'static str,
    pub flower: &'static str,
    pub note: &'static str,
    pub envelope: &'static str,
    pub dot_active: &'static str,
    pub dot_flipped: &'static str,
    pub dot_upcoming: &'static str,
    pub arrow_left: &'static str,
    pub arrow_right: &'static str,
    pub confetti_frames: &'static [&'static str],
    pub drift_frames: &'static [&'static str],
    pub spinner_frames: &'static [&'static str],
}

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAMES_ASCII: &[&str] = &["|", "/", "-", "\\"];

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            heart: "<3",
            sparkle: "*",
            flower: "@",
            note: "~",
            envelope: "[=]",
            dot_active: "O",
            dot_flipped: "x",
            dot_upcoming: "o",
            arrow_left: "<-",
            arrow_right: "->",
            confetti_frames: &["*", "+", "o", "."],
            drift_frames: &["*", "."],
            spinner_frames: SPINNER_FRAMES_ASCII,
        }
    } else {
        Glyphs {
            heart: "♥",
            sparkle: "✦",
            flower: "❀",
            note: "♪",
            envelope: "✉",
            dot_active: "●",
            dot_flipped: "◆",
            dot_upcoming: "○",
            arrow_left: "←",
            arrow_right: "→",
            confetti_frames: &["❋", "✺", "●", "▪", "✶"],
            drift_frames: &["♥", "✦", "❀"],
            spinner_frames: SPINNER_FRAMES,
        }
    }
}

/// When `reduced_motion` is enabled, returns a static glyph instead of cycling.
#[must_use]
pub fn spinner_frame(tick: usize, options: UiOptions) -> &'static str {
    let frames = glyphs(options).spinner_frames;
    if options.reduced_motion {
        frames[0]
    } else {
        frames[tick % frames.len()]
    }
}

/// Reusable styles derived from the palette.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn title(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.rose)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn body(palette: &Palette) -> Style {
        Style::default().fg(palette.text_secondary)
    }

    #[must_use]
    pub fn hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn button(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    }

    #[must_use]
    pub fn button_affirmative(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.bg_dark)
            .bg(palette.rose)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn button_evasive(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.text_primary)
            .bg(palette.bg_highlight)
    }
}

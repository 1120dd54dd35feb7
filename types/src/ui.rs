//! UI options shared by the core (state ownership) and tui (rendering/input).

/// Presentation options resolved once at startup from config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Use ASCII-only glyphs for icons and decorations.
    pub ascii_only: bool,
    /// Use a high-contrast color palette.
    pub high_contrast: bool,
    /// Disable the drift layer and confetti motion.
    pub reduced_motion: bool,
}

//! Card state machine for billet.
//!
//! Owns every piece of navigable state (deck position, carousel slide,
//! evader placement, celebration particles, music deferral) and mutates it
//! synchronously from input handlers and the frame tick. No IO beyond
//! config loading; rendering lives in `billet-tui`.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

mod carousel;
mod celebrate;
mod config;
mod deck;
mod evasion;
mod music;

pub use carousel::{Carousel, CarouselStep};
pub use celebrate::{
    CELEBRATION_BUDGET, Celebration, EMISSION_PERIOD, Particle, burst_count,
};
pub use config::{AppConfig, BilletConfig, ConfigError, MusicConfig, config_path};
pub use deck::{Deck, PageSlot};
pub use evasion::{
    EVADER_STACKING, EVASION_PADDING, Evader, Extent, Position, placement_axis,
    sample_position, sample_taunt,
};
pub use music::{Music, Soundtrack};

// Re-export from types for the public API
pub use billet_types::{
    Classification, PageKind, Recipient, TurnDirection, UiOptions,
};

/// Startup reveal: the preloader overlay stays up this long after launch.
pub const REVEAL_DELAY: Duration = Duration::from_millis(500);

/// One-shot startup timer hiding the preloader.
#[derive(Debug)]
struct Reveal {
    elapsed: Duration,
}

impl Reveal {
    fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
        }
    }

    fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    fn is_done(&self) -> bool {
        self.elapsed >= REVEAL_DELAY
    }
}

/// Application state. One instance per session, passed by reference to the
/// input handlers and the renderer.
#[derive(Debug)]
pub struct App {
    deck: Deck,
    carousel: Carousel,
    evader: Evader,
    celebration: Option<Celebration>,
    music: Music,
    reveal: Reveal,
    options: UiOptions,
    recipient: Recipient,
    rng: StdRng,
    frame: u64,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(config: Option<&BilletConfig>) -> Self {
        Self::with_rng(config, StdRng::from_rng(&mut rand::rng()))
    }

    /// Deterministic construction for tests.
    #[must_use]
    pub fn with_rng(config: Option<&BilletConfig>, rng: StdRng) -> Self {
        let options = config.map(BilletConfig::ui_options).unwrap_or_default();
        let recipient = config.map(BilletConfig::recipient).unwrap_or_default();
        Self {
            deck: Deck::new(),
            carousel: Carousel::new(),
            evader: Evader::new(),
            celebration: None,
            music: Music::disabled(),
            reveal: Reveal::new(),
            options,
            recipient,
            rng,
            frame: 0,
            should_quit: false,
        }
    }

    // ------------------------------------------------------------------
    // Collaborators
    // ------------------------------------------------------------------

    /// Attach the playback collaborator and attempt startup playback.
    pub fn attach_soundtrack(&mut self, sink: Box<dyn Soundtrack>) {
        self.music = Music::new(sink);
        self.music.try_start();
    }

    /// First-interaction hook: retries a blocked soundtrack start, once.
    pub fn note_user_interaction(&mut self) {
        self.music.on_user_interaction();
    }

    // ------------------------------------------------------------------
    // Frame tick
    // ------------------------------------------------------------------

    /// Advance time-driven state by one frame.
    pub fn tick(&mut self, delta: Duration) {
        self.frame = self.frame.wrapping_add(1);
        self.reveal.advance(delta);
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.advance(delta, &mut self.rng);
            if celebration.is_finished() {
                self.celebration = None;
            }
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Turn one page; clamped at both ends. A successful transition resets
    /// the evader so no evasion state survives a page change.
    pub fn turn_page(&mut self, direction: TurnDirection) {
        if self.deck.turn(direction) {
            self.evader.reset();
        }
    }

    /// Arrow-key routing: the page hosting the carousel steers the
    /// carousel; every other page turns the deck directly.
    pub fn route_arrow(&mut self, direction: TurnDirection) {
        if self.deck.active_page().hosts_carousel() {
            match direction {
                TurnDirection::Next => self.next_reason(),
                TurnDirection::Prev => self.prev_reason(),
            }
        } else {
            self.turn_page(direction);
        }
    }

    pub fn next_reason(&mut self) {
        match self.carousel.next() {
            CarouselStep::Moved => {}
            CarouselStep::Delegate(direction) => self.turn_page(direction),
        }
    }

    pub fn prev_reason(&mut self) {
        match self.carousel.prev() {
            CarouselStep::Moved => {}
            CarouselStep::Delegate(direction) => self.turn_page(direction),
        }
    }

    // ------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------

    /// Affirmative click: start the celebration and advance immediately.
    /// The page turn is not gated on the animation.
    pub fn press_yes(&mut self) {
        self.celebration = Some(Celebration::new());
        self.turn_page(TurnDirection::Next);
    }

    /// Evasive click. `element` is the button's rendered size as measured
    /// this frame; a missing measurement (button not in the layout) is
    /// tolerated as a no-op.
    pub fn press_no(&mut self, viewport: Extent, element: Option<Extent>) {
        let Some(element) = element else {
            tracing::debug!("Evasive press with no rendered target, ignoring");
            return;
        };
        self.evader.dodge(viewport, element, &mut self.rng);
    }

    // ------------------------------------------------------------------
    // Accessors for rendering and input
    // ------------------------------------------------------------------

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    #[must_use]
    pub fn evader(&self) -> &Evader {
        &self.evader
    }

    /// Live confetti particles, empty when no celebration runs.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        self.celebration
            .as_ref()
            .map_or(&[], Celebration::particles)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.reveal.is_done()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    /// Monotone frame counter for decorative animation phases.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn music_playing(&self) -> bool {
        self.music.is_playing()
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

//! Optional background soundtrack.
//!
//! Playback is attempted once at startup. A refused start (platform policy,
//! missing player) is logged and retried exactly once, on the first user
//! interaction of any kind. No sink configured means the feature is off and
//! every call is a no-op.

use anyhow::Result;
use tracing::{debug, info, warn};

/// Playback collaborator. The binary supplies a real implementation; tests
/// supply fakes.
pub trait Soundtrack: Send {
    /// Begin playback at the configured volume.
    fn start(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MusicPhase {
    /// Not yet attempted.
    Idle,
    /// Startup attempt was refused; one retry is armed.
    Deferred,
    /// Playback started.
    Playing,
    /// The deferred retry also failed. No further attempts.
    GaveUp,
}

pub struct Music {
    sink: Option<Box<dyn Soundtrack>>,
    phase: MusicPhase,
}

impl std::fmt::Debug for Music {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Music")
            .field("sink", &self.sink.is_some())
            .field("phase", &self.phase)
            .finish()
    }
}

impl Music {
    /// A music controller with no player attached.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            sink: None,
            phase: MusicPhase::Idle,
        }
    }

    #[must_use]
    pub fn new(sink: Box<dyn Soundtrack>) -> Self {
        Self {
            sink: Some(sink),
            phase: MusicPhase::Idle,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == MusicPhase::Playing
    }

    /// Startup attempt.
    pub fn try_start(&mut self) {
        if self.phase != MusicPhase::Idle {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            debug!("No soundtrack configured");
            return;
        };
        match sink.start() {
            Ok(()) => {
                info!("Soundtrack started");
                self.phase = MusicPhase::Playing;
            }
            Err(err) => {
                warn!("Soundtrack blocked, waiting for interaction: {err:#}");
                self.phase = MusicPhase::Deferred;
            }
        }
    }

    /// Retry a blocked start. Only the first interaction after a refusal
    /// does anything; every later call is a no-op.
    pub fn on_user_interaction(&mut self) {
        if self.phase != MusicPhase::Deferred {
            return;
        }
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        match sink.start() {
            Ok(()) => {
                info!("Soundtrack started after interaction");
                self.phase = MusicPhase::Playing;
            }
            Err(err) => {
                warn!("Soundtrack retry failed, giving up: {err:#}");
                self.phase = MusicPhase::GaveUp;
            }
        }
    }
}

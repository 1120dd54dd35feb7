//! Background soundtrack via an external player process.
//!
//! The player invocation comes from config as a full argv. Spawning can
//! fail (player missing, no audio device); the core's music state machine
//! turns that refusal into a single deferred retry.

use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use tracing::{debug, info};

use billet_core::Soundtrack;

pub struct CommandSoundtrack {
    argv: Vec<String>,
    child: Option<Child>,
}

impl CommandSoundtrack {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv, child: None }
    }
}

impl Soundtrack for CommandSoundtrack {
    fn start(&mut self) -> Result<()> {
        if let Some(child) = self.child.as_mut() {
            // Already launched and still running: nothing to do.
            if child.try_wait().context("poll player process")?.is_none() {
                return Ok(());
            }
            self.child = None;
        }

        let (program, args) = self
            .argv
            .split_first()
            .context("player command is empty")?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to spawn player {program:?}"))?;

        info!(player = %program, "Soundtrack player started");
        self.child = Some(child);
        Ok(())
    }
}

impl Drop for CommandSoundtrack {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
            debug!("Soundtrack player stopped");
        }
    }
}

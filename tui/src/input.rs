//! Input handling for the billet TUI.
//!
//! A dedicated blocking thread reads crossterm events into a bounded
//! channel; the frame loop drains it without ever blocking rendering.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use billet_core::{App, TurnDirection};

use crate::{ClickTarget, HitMap};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

enum InputMsg {
    Event(Event),
    Error(String),
}

pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so the reader thread unblocks if it is
        // currently backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), join).await;
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain queued input and apply it to the app. Returns true when the
/// session should end. `hits` is the click map published by the most
/// recent draw.
pub fn handle_events(app: &mut App, input: &mut InputPump, hits: &HitMap) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let msg = match input.rx.try_recv() {
            Ok(msg) => msg,
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input thread disconnected"));
            }
        };
        let ev = match msg {
            InputMsg::Event(ev) => ev,
            InputMsg::Error(e) => return Err(anyhow!("input error: {e}")),
        };

        if apply_event(app, ev, hits) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(app.should_quit())
}

fn apply_event(app: &mut App, event: Event, hits: &HitMap) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if matches!(key.kind, KeyEventKind::Release) {
                return app.should_quit();
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return true;
            }

            // Any interaction arms the deferred soundtrack retry.
            app.note_user_interaction();

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => app.request_quit(),
                // Arrow routing: the carousel page steers the carousel,
                // every other page turns the deck.
                KeyCode::Right => app.route_arrow(TurnDirection::Next),
                KeyCode::Left => app.route_arrow(TurnDirection::Prev),
                _ => {}
            }
        }
        Event::Mouse(mouse) => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                app.note_user_interaction();
                dispatch_click(app, hits, mouse.column, mouse.row);
            }
        }
        _ => {}
    }
    app.should_quit()
}

fn dispatch_click(app: &mut App, hits: &HitMap, column: u16, row: u16) {
    let Some(target) = hits.resolve(column, row) else {
        debug!(column, row, "Click outside any control");
        return;
    };
    match target {
        ClickTarget::Yes => app.press_yes(),
        ClickTarget::No => app.press_no(hits.viewport(), hits.evader_extent()),
        ClickTarget::NextReason => app.next_reason(),
        ClickTarget::PrevReason => app.prev_reason(),
    }
}

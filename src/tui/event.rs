//! Terminal events
//!
//! A background thread polls crossterm and forwards key presses, resizes
//! and a steady tick into a tokio channel, so the main loop can select over
//! terminal input and task outcomes together.

use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// The clock the viewer and idle countdowns run on
pub const TICK_RATE: Duration = Duration::from_secs(1);

/// How long one poll waits before checking the tick clock again
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

pub struct EventHandler {
    receiver: UnboundedReceiver<TerminalEvent>,
    _handler: thread::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handler = thread::spawn(move || poll_loop(sender, tick_rate));
        Self {
            receiver,
            _handler: handler,
        }
    }

    /// Next terminal event; `None` once the polling thread has stopped
    pub async fn next(&mut self) -> Option<TerminalEvent> {
        self.receiver.recv().await
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(TICK_RATE)
    }
}

fn poll_loop(sender: UnboundedSender<TerminalEvent>, tick_rate: Duration) {
    let mut last_tick = Instant::now();
    loop {
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO)
            .min(POLL_INTERVAL);

        match event::poll(timeout) {
            Ok(true) => {
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Some(TerminalEvent::Key(key)),
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        Some(TerminalEvent::Resize(width, height))
                    }
                    Ok(_) => None,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read terminal event");
                        return;
                    }
                };
                if let Some(event) = forwarded {
                    if sender.send(event).is_err() {
                        return;
                    }
                }
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(error = %e, "Failed to poll terminal events");
                return;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if sender.send(TerminalEvent::Tick).is_err() {
                return;
            }
            last_tick = Instant::now();
        }
    }
}

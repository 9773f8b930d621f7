//! Terminal setup and teardown
//!
//! This module handles initializing and restoring the terminal state,
//! including setting up the panic hook to restore the terminal on crash,
//! and runs the main loop that joins terminal input with task outcomes.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::activity::ActivityLog;
use crate::app::{Event, Navigator, NavigatorConfig, Runtime};
use crate::biometrics::BiometricGate;
use crate::config::Settings;
use crate::repository::VaultRepository;
use crate::storage::CredentialStore;

use super::app::App;
use super::event::{EventHandler, TerminalEvent};
use super::handler::handle_key;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    // Restore the terminal before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal_impl();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    restore_terminal_impl()?;
    Ok(())
}

fn restore_terminal_impl() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the TUI until the user quits
pub async fn run_tui(
    settings: &Settings,
    repository: Arc<dyn VaultRepository>,
    gate: Arc<dyn BiometricGate>,
    credentials: CredentialStore,
    activity: ActivityLog,
) -> Result<()> {
    let (sender, outcomes) = mpsc::unbounded_channel();
    let mut runtime = Runtime::new(repository, gate, credentials, activity, sender);
    let mut app = App::new(Navigator::new(NavigatorConfig::from(settings)));

    let mut terminal = init_terminal()?;
    let terminal_events = EventHandler::default();
    runtime.bootstrap();
    tracing::info!("TUI started");

    let result = event_loop(&mut terminal, &mut app, &mut runtime, terminal_events, outcomes).await;

    restore_terminal()?;
    tracing::info!(pending = runtime.pending(), "TUI stopped");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    runtime: &mut Runtime,
    mut terminal_events: EventHandler,
    mut outcomes: UnboundedReceiver<Event>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| super::views::render(frame, app))?;

        let tasks = tokio::select! {
            Some(event) = terminal_events.next() => match event {
                TerminalEvent::Key(key) => handle_key(app, key),
                TerminalEvent::Tick => app.update(Event::Tick),
                // Redrawn on the next pass
                TerminalEvent::Resize(_, _) => Vec::new(),
            },
            Some(event) = outcomes.recv() => app.update(event),
            else => break,
        };

        runtime.run(app.navigator.epoch(), tasks);
        app.notifications.remove_expired();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

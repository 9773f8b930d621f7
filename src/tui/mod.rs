//! Terminal user interface
//!
//! A ratatui front end over the application core: the navigator decides,
//! these modules draw its state and turn key presses into intents.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

pub mod dialogs;
pub mod layout;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;

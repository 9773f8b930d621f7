//! Modal dialogs
//!
//! Drawn over the current screen. At most one is visible; the gate modal
//! wins over everything else.

pub mod confirm;
pub mod form;
pub mod gate;

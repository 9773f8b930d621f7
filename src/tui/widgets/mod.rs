//! Reusable widgets for the TUI

pub mod form;
pub mod input;
pub mod notification;

pub use form::{FormAction, FormState, FormWidget};
pub use input::TextInput;
pub use notification::{NotificationQueue, NotificationWidget};

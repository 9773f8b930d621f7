//! Application core
//!
//! Screens, the session, the gate protocol and the navigator that ties them
//! together, plus the runtime that carries out the navigator's side effects.
//! The terminal UI drives this; nothing in here draws anything.

pub mod cache;
pub mod event;
pub mod gate;
pub mod navigator;
pub mod runtime;
pub mod screen;
pub mod session;

pub use cache::FolderCache;
pub use event::{Destination, Event, Intent, Outcome, Task};
pub use gate::{GateKind, GatePhase, GateState, GateTarget};
pub use navigator::{Navigator, NavigatorConfig, Notice, NoticeLevel};
pub use runtime::Runtime;
pub use screen::Screen;
pub use session::{AuthStatus, Session};

//! Login activity tracking
//!
//! Every authentication attempt is appended to a JSONL log and can be
//! listed newest first with a success/suspicious filter.

pub mod entry;
pub mod logger;

pub use entry::{ActivityEntry, ActivityFilter, ActivityStatus, AuthMethod};
pub use logger::ActivityLog;

//! Modal gate protocol
//!
//! A gate guards one transition behind a biometric check. Opening it starts
//! a scan immediately. A successful scan shows a short "verified" state and
//! then grants; a failed scan leaves the gate open with an error until the
//! user retries or cancels. Every scan carries an attempt id so results
//! from an earlier opening or an earlier retry are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Folder, Item};

/// Which protected transition a gate belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// The auth screen's own check
    SignIn,
    /// Restricted access, before a folder opens
    Restricted,
    /// Identity verification, before a document is shown
    Identity,
}

impl GateKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SignIn => "sign in",
            Self::Restricted => "folder unlock",
            Self::Identity => "identity check",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What opens once the gate grants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateTarget {
    Dashboard,
    Folder(Folder),
    Item { folder: Folder, item: Item },
}

impl GateTarget {
    pub fn kind(&self) -> GateKind {
        match self {
            Self::Dashboard => GateKind::SignIn,
            Self::Folder(_) => GateKind::Restricted,
            Self::Item { .. } => GateKind::Identity,
        }
    }

    /// Name of the thing being unlocked, for the modal's heading
    pub fn subject(&self) -> &str {
        match self {
            Self::Dashboard => "BioVault",
            Self::Folder(folder) => &folder.name,
            Self::Item { item, .. } => &item.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatePhase {
    Scanning,
    /// Recognised; waiting out the display delay before granting
    Verified,
    Failed(String),
}

/// The single open gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateState {
    pub target: GateTarget,
    pub phase: GatePhase,
    attempt: u64,
}

impl GateState {
    /// Open a gate, starting in `Scanning`
    pub fn open(target: GateTarget, attempt: u64) -> Self {
        Self {
            target,
            phase: GatePhase::Scanning,
            attempt,
        }
    }

    pub fn kind(&self) -> GateKind {
        self.target.kind()
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Apply a scan result. Returns false when the result belongs to another
    /// attempt or arrives outside `Scanning`.
    pub fn resolve(&mut self, attempt: u64, recognised: bool) -> bool {
        if attempt != self.attempt || self.phase != GatePhase::Scanning {
            return false;
        }
        self.phase = if recognised {
            GatePhase::Verified
        } else {
            GatePhase::Failed("Not recognised. Try again.".to_string())
        };
        true
    }

    /// Start another scan after a failure
    pub fn retry(&mut self, attempt: u64) -> bool {
        if !matches!(self.phase, GatePhase::Failed(_)) {
            return false;
        }
        self.phase = GatePhase::Scanning;
        self.attempt = attempt;
        true
    }

    /// A verified gate is about to grant and can no longer be cancelled
    pub fn can_cancel(&self) -> bool {
        self.phase != GatePhase::Verified
    }

    /// True when the display delay for `attempt` may grant
    pub fn ready_to_grant(&self, attempt: u64) -> bool {
        attempt == self.attempt && self.phase == GatePhase::Verified
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            GatePhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FolderType;

    fn folder_gate(attempt: u64) -> GateState {
        GateState::open(
            GateTarget::Folder(Folder::new("Finance", FolderType::Documentos)),
            attempt,
        )
    }

    #[test]
    fn test_success_path() {
        let mut gate = folder_gate(1);
        assert_eq!(gate.kind(), GateKind::Restricted);
        assert!(gate.resolve(1, true));
        assert_eq!(gate.phase, GatePhase::Verified);
        assert!(gate.ready_to_grant(1));
        assert!(!gate.can_cancel());
    }

    #[test]
    fn test_failure_then_retry() {
        let mut gate = folder_gate(1);
        assert!(gate.resolve(1, false));
        assert!(gate.error().is_some());
        assert!(gate.can_cancel());

        assert!(gate.retry(2));
        assert_eq!(gate.phase, GatePhase::Scanning);
        assert!(gate.error().is_none());

        // A late result from the first scan is ignored
        assert!(!gate.resolve(1, true));
        assert_eq!(gate.phase, GatePhase::Scanning);
        assert!(gate.resolve(2, true));
    }

    #[test]
    fn test_retry_only_after_failure() {
        let mut gate = folder_gate(1);
        assert!(!gate.retry(2));
        assert_eq!(gate.attempt(), 1);
    }

    #[test]
    fn test_second_result_ignored() {
        let mut gate = folder_gate(1);
        assert!(gate.resolve(1, false));
        assert!(!gate.resolve(1, true));
        assert!(matches!(gate.phase, GatePhase::Failed(_)));
    }
}

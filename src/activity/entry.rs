//! Sign-in activity entries
//!
//! One entry per authentication attempt: the sign-in check, the restricted
//! folder gate, the identity check before the viewer, or a PIN entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::app::gate::GateKind;

/// How the user tried to prove who they are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    Biometric,
    Pin,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Biometric => write!(f, "Biometric"),
            Self::Pin => write!(f, "PIN"),
        }
    }
}

/// Badge shown next to an entry; failed attempts are suspicious
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityStatus {
    Success,
    Suspicious,
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Suspicious => write!(f, "suspicious"),
        }
    }
}

/// Filter tabs on the activity screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    Success,
    Suspicious,
}

impl ActivityFilter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Success,
            Self::Success => Self::Suspicious,
            Self::Suspicious => Self::All,
        }
    }

    pub fn matches(&self, entry: &ActivityEntry) -> bool {
        match self {
            Self::All => true,
            Self::Success => entry.status() == ActivityStatus::Success,
            Self::Suspicious => entry.status() == ActivityStatus::Suspicious,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "success" => Some(Self::Success),
            "suspicious" | "failed" => Some(Self::Suspicious),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Success => write!(f, "Success"),
            Self::Suspicious => write!(f, "Suspicious"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    pub gate: GateKind,
    pub method: AuthMethod,
    pub success: bool,
    /// Host the attempt was made from
    pub device: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ActivityEntry {
    pub fn new(gate: GateKind, method: AuthMethod, success: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            gate,
            method,
            success,
            device: local_device_name(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn status(&self) -> ActivityStatus {
        if self.success {
            ActivityStatus::Success
        } else {
            ActivityStatus::Suspicious
        }
    }

    /// One-line description, e.g. "Biometric sign in successful"
    pub fn action(&self) -> String {
        let outcome = if self.success { "successful" } else { "failed" };
        format!("{} {} {}", self.method, self.gate.label(), outcome)
    }
}

fn local_device_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "this terminal".to_string())
}

//! Platform biometric check
//!
//! The gate is a single challenge/response call answering "is this the
//! enrolled user?". It keeps no state and never retries; retry policy lives
//! in the gate protocol that calls it.

use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::BiometricBackend;
use crate::error::{VaultError, VaultResult};

#[async_trait]
pub trait BiometricGate: Send + Sync {
    /// Run one check. Any failure to run the check counts as a denial.
    async fn attempt(&self) -> bool;
}

/// Runs an external verifier; exit status 0 means recognised
pub struct CommandGate {
    program: String,
    args: Vec<String>,
}

impl CommandGate {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    async fn run(&self) -> VaultResult<bool> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| VaultError::Biometric(format!("Failed to run {}: {}", self.program, e)))?;

        Ok(status.success())
    }
}

#[async_trait]
impl BiometricGate for CommandGate {
    async fn attempt(&self) -> bool {
        match self.run().await {
            Ok(recognised) => {
                tracing::debug!(program = %self.program, recognised, "Biometric check finished");
                recognised
            }
            Err(e) => {
                tracing::warn!(error = %e, "Biometric check unavailable");
                false
            }
        }
    }
}

/// Build the gate configured in settings
pub fn open_gate(backend: &BiometricBackend) -> Arc<dyn BiometricGate> {
    match backend {
        BiometricBackend::Command { program, args } => {
            Arc::new(CommandGate::new(program.clone(), args.clone()))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_exit_status_decides() {
        assert!(CommandGate::new("true", vec![]).attempt().await);
        assert!(!CommandGate::new("false", vec![]).attempt().await);
    }

    #[tokio::test]
    async fn test_args_are_passed() {
        let gate = CommandGate::new("sh", vec!["-c".into(), "exit 0".into()]);
        assert!(gate.attempt().await);
    }

    #[tokio::test]
    async fn test_missing_program_is_denial() {
        let gate = CommandGate::new("/definitely/not/a/verifier", vec![]);
        assert!(!gate.attempt().await);
    }
}

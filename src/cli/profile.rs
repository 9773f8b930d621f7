//! Profile CLI commands
//!
//! Enrolment, preference flags and a sign-in check from the command line.

use clap::Subcommand;

use crate::activity::{ActivityEntry, ActivityLog, AuthMethod};
use crate::app::GateKind;
use crate::biometrics::BiometricGate;
use crate::crypto::validate_pin;
use crate::error::{VaultError, VaultResult};
use crate::models::profile::validate_pin_format;
use crate::models::{PreferenceFlag, UserProfile};
use crate::storage::CredentialStore;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Enrol the vault owner
    Setup {
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Four-digit PIN (prompted for when omitted)
        #[arg(long)]
        pin: Option<String>,
        /// Do not offer biometric sign-in
        #[arg(long)]
        no_biometrics: bool,
    },
    /// Show the enrolled profile and preferences
    Status,
    /// Turn a preference on or off
    Set {
        /// face-id, fingerprint-backup, auto-lock or stealth-mode
        flag: String,
        /// on or off
        value: String,
    },
    /// Run a sign-in check and record it in the activity log
    Verify {
        /// Check the PIN instead of running the biometric check
        #[arg(long)]
        pin: bool,
    },
    /// Forget the enrolled profile
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn handle_profile_command(
    store: &mut CredentialStore,
    activity: &ActivityLog,
    gate: &dyn BiometricGate,
    cmd: ProfileCommands,
) -> VaultResult<()> {
    match cmd {
        ProfileCommands::Setup {
            name,
            email,
            pin,
            no_biometrics,
        } => {
            if store.profile().is_some() {
                return Err(VaultError::Validation(
                    "A profile is already enrolled. Run 'biovault profile reset' first".into(),
                ));
            }
            let pin = match pin {
                Some(pin) => pin,
                None => prompt_new_pin()?,
            };

            let profile = UserProfile::register(&name, &email, &pin, !no_biometrics)?;
            let first_name = profile.first_name().to_string();
            store.save_profile(profile)?;
            tracing::info!("Profile enrolled from the command line");

            println!("Welcome, {}. Your vault is ready.", first_name);
        }

        ProfileCommands::Status => {
            let preferences = store.preferences();
            match store.profile() {
                Some(profile) => {
                    println!("Profile: {}", profile.full_name);
                    println!("  Email:      {}", profile.email);
                    println!(
                        "  Biometrics: {}",
                        if profile.has_biometrics { "Enrolled" } else { "Off" }
                    );
                }
                None => println!("No profile enrolled. Run 'biovault profile setup'."),
            }
            println!();
            println!("Preferences:");
            for flag in PreferenceFlag::ALL {
                println!(
                    "  {:<20} {}",
                    flag.label(),
                    if preferences.get(flag) { "on" } else { "off" }
                );
            }
        }

        ProfileCommands::Set { flag, value } => {
            let flag = PreferenceFlag::parse(&flag).ok_or_else(|| {
                VaultError::Validation(format!(
                    "Unknown preference: '{}'. Valid: face-id, fingerprint-backup, auto-lock, stealth-mode",
                    flag
                ))
            })?;
            let enabled = parse_switch(&value)?;

            let mut preferences = store.preferences();
            if preferences.get(flag) != enabled {
                preferences.toggle(flag);
                store.save_preferences(preferences)?;
            }
            println!("{}: {}", flag.label(), if enabled { "on" } else { "off" });
        }

        ProfileCommands::Verify { pin } => {
            let profile = store.profile().ok_or_else(|| {
                VaultError::Validation("No profile enrolled. Run 'biovault profile setup'".into())
            })?;

            let (method, accepted) = if pin {
                let input = prompt_secret("PIN: ")?;
                (AuthMethod::Pin, validate_pin(&input, &profile.pin))
            } else {
                if !profile.has_biometrics || !store.preferences().face_id_enabled {
                    return Err(VaultError::Validation(
                        "Biometric unlock is off. Use --pin".into(),
                    ));
                }
                println!("Scanning...");
                (AuthMethod::Biometric, gate.attempt().await)
            };

            let mut entry = ActivityEntry::new(GateKind::SignIn, method, accepted);
            if !accepted {
                entry = entry.with_detail(match method {
                    AuthMethod::Pin => "wrong PIN",
                    AuthMethod::Biometric => "not recognised",
                });
            }
            activity.log(&entry)?;

            if accepted {
                println!("Verified.");
            } else {
                return Err(VaultError::Validation("Verification failed".into()));
            }
        }

        ProfileCommands::Reset { force } => {
            if store.profile().is_none() {
                println!("No profile enrolled.");
                return Ok(());
            }
            if !force {
                println!("This forgets the enrolled profile. Folders are kept.");
                println!("Use --force to confirm");
                return Ok(());
            }
            store.forget_profile()?;
            println!("Profile forgotten.");
        }
    }

    Ok(())
}

fn parse_switch(value: &str) -> VaultResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(VaultError::Validation(format!(
            "Expected on or off, got '{}'",
            other
        ))),
    }
}

/// Prompt for a new PIN with confirmation
fn prompt_new_pin() -> VaultResult<String> {
    loop {
        let pin1 = prompt_secret("Choose a 4-digit PIN: ")?;
        if let Err(e) = validate_pin_format(&pin1) {
            println!("{} Please try again.", e);
            continue;
        }

        let pin2 = prompt_secret("Confirm PIN: ")?;
        if pin1 != pin2 {
            println!("PINs do not match. Please try again.");
            continue;
        }

        return Ok(pin1);
    }
}

/// Hidden terminal input
fn prompt_secret(prompt: &str) -> VaultResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| VaultError::Io(format!("Failed to read input: {}", e)))
}

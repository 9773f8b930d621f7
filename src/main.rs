use anyhow::Result;
use clap::{Parser, Subcommand};

use biovault::activity::ActivityLog;
use biovault::biometrics::open_gate;
use biovault::cli::{
    handle_activity_command, handle_folder_command, handle_item_command, handle_profile_command,
    ActivityArgs, FolderCommands, ItemCommands, ProfileCommands,
};
use biovault::config::{RepositoryBackend, Settings, VaultPaths};
use biovault::crypto::{passphrase_from_env, Security};
use biovault::repository::open_repository;
use biovault::storage::CredentialStore;

#[derive(Parser)]
#[command(
    name = "biovault",
    version,
    about = "Terminal secure vault with biometric-gated folders",
    long_about = "BioVault keeps folders of notes, photos, scans and voice memos \
                  behind a biometric check. Browse them in the TUI or script \
                  them from the command line."
)]
struct Cli {
    /// Use the folder API at this URL instead of the configured repository
    #[arg(long, global = true, env = "BIOVAULT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Folder management commands
    #[command(subcommand)]
    Folder(FolderCommands),

    /// Notes and files inside a folder
    #[command(subcommand)]
    Item(ItemCommands),

    /// Profile enrolment and preferences
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Show recent sign-in activity
    Activity(ActivityArgs),

    /// Show current configuration and paths
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = VaultPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // The TUI owns the terminal, so it logs to a file
    let _log_guard = match cli.command {
        Some(Commands::Tui) => Some(biovault::logging::init_file(&paths, &settings.log_level)?),
        _ => {
            biovault::logging::init_cli(&settings.log_level);
            None
        }
    };

    if settings.ensure_key_params() {
        settings.save(&paths)?;
    }
    let activity = ActivityLog::new(paths.activity_log());

    match cli.command {
        Some(Commands::Tui) => {
            let repository = open_repository(&settings, &paths, cli.api_url.as_deref())?;
            let gate = open_gate(&settings.biometrics);
            let credentials = open_credentials(&settings, &paths)?;
            biovault::tui::run_tui(&settings, repository, gate, credentials, activity).await?;
        }
        Some(Commands::Folder(cmd)) => {
            let repository = open_repository(&settings, &paths, cli.api_url.as_deref())?;
            handle_folder_command(repository.as_ref(), cmd).await?;
        }
        Some(Commands::Item(cmd)) => {
            let repository = open_repository(&settings, &paths, cli.api_url.as_deref())?;
            handle_item_command(repository.as_ref(), cmd).await?;
        }
        Some(Commands::Profile(cmd)) => {
            let mut credentials = open_credentials(&settings, &paths)?;
            let gate = open_gate(&settings.biometrics);
            handle_profile_command(&mut credentials, &activity, gate.as_ref(), cmd).await?;
        }
        Some(Commands::Activity(args)) => {
            handle_activity_command(&activity, args)?;
        }
        Some(Commands::Config) => {
            println!("BioVault Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Log directory:    {}", paths.log_dir().display());
            println!();
            println!("Settings:");
            match cli.api_url.as_deref() {
                Some(url) => println!("  Repository:        http ({})", url),
                None => match &settings.repository {
                    RepositoryBackend::Local => println!("  Repository:        local"),
                    RepositoryBackend::Http { base_url, .. } => {
                        println!("  Repository:        http ({})", base_url)
                    }
                },
            }
            println!("  Verified delay:    {} ms", settings.verified_delay_ms);
            println!("  Viewer auto-lock:  {} s", settings.viewer_lock_seconds);
            println!("  Idle auto-lock:    {} s", settings.idle_lock_seconds);
            println!("  Log level:         {}", settings.log_level);
        }
        None => {
            println!("BioVault - biometric-gated secure vault");
            println!();
            println!("Run 'biovault --help' for usage information.");
            println!("Run 'biovault tui' to launch the interactive interface.");
        }
    }

    Ok(())
}

fn open_credentials(settings: &Settings, paths: &VaultPaths) -> Result<CredentialStore> {
    let params = settings
        .key_params
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Key parameters are missing from the settings"))?;
    let security = Security::from_passphrase(&passphrase_from_env(), &params)?;
    Ok(CredentialStore::open(paths.credentials_file(), security))
}

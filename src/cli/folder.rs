//! Folder CLI commands
//!
//! Implements folder listing, creation and the status lifecycle
//! (hide, archive, delete, restore, purge).

use clap::Subcommand;

use crate::display::{format_folder_details, format_folder_list};
use crate::error::{VaultError, VaultResult};
use crate::models::{Folder, FolderStatus, FolderType, NewFolder, SecurityLevel};
use crate::repository::VaultRepository;

const ALL_STATUSES: [FolderStatus; 4] = [
    FolderStatus::Active,
    FolderStatus::Hidden,
    FolderStatus::Archived,
    FolderStatus::Deleted,
];

/// Folder subcommands
#[derive(Subcommand)]
pub enum FolderCommands {
    /// List folders
    List {
        /// Status to list (active, hidden, archived, deleted)
        #[arg(short, long, default_value = "active")]
        status: String,
    },
    /// Create a new folder
    Create {
        /// Folder name
        name: String,
        /// Folder type (documentos, hojas, media, notas, claves, diario, privado)
        #[arg(short = 't', long, default_value = "privado")]
        folder_type: String,
        /// Security level (standard, enhanced, maximum)
        #[arg(short, long)]
        security: Option<String>,
    },
    /// Show folder details
    Show {
        /// Folder name or ID
        folder: String,
    },
    /// Hide a folder from the dashboard
    Hide {
        /// Folder name or ID
        folder: String,
    },
    /// Archive a folder
    Archive {
        /// Folder name or ID
        folder: String,
    },
    /// Move a folder to the deleted tab
    Delete {
        /// Folder name or ID
        folder: String,
    },
    /// Bring a hidden, archived or deleted folder back
    Restore {
        /// Folder name or ID
        folder: String,
    },
    /// Permanently delete a folder and everything in it
    Purge {
        /// Folder name or ID
        folder: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a folder command
pub async fn handle_folder_command(
    repository: &dyn VaultRepository,
    cmd: FolderCommands,
) -> VaultResult<()> {
    match cmd {
        FolderCommands::List { status } => {
            let status = FolderStatus::parse(&status)?;
            let folders = repository.list_folders(status).await?;
            print!("{}", format_folder_list(&folders));
        }

        FolderCommands::Create {
            name,
            folder_type,
            security,
        } => {
            let folder_type = FolderType::parse(&folder_type).ok_or_else(|| {
                VaultError::Validation(format!(
                    "Invalid folder type: '{}'. Valid types: documentos, hojas, media, notas, claves, diario, privado",
                    folder_type
                ))
            })?;
            let security_level = security
                .map(|s| {
                    SecurityLevel::parse(&s).ok_or_else(|| {
                        VaultError::Validation(format!(
                            "Invalid security level: '{}'. Valid levels: standard, enhanced, maximum",
                            s
                        ))
                    })
                })
                .transpose()?;

            let folder = repository
                .create_folder(NewFolder {
                    name,
                    folder_type: Some(folder_type),
                    security_level,
                })
                .await?;

            println!("Created folder: {}", folder.name);
            println!("  Type: {}", folder.folder_type);
            println!("  Security: {}", folder.security_level);
            println!("  ID: {}", folder.id);
        }

        FolderCommands::Show { folder } => {
            let found = find_folder(repository, &folder).await?;
            print!("{}", format_folder_details(&found));
        }

        FolderCommands::Hide { folder } => {
            let updated = set_status(repository, &folder, FolderStatus::Hidden).await?;
            println!("Hid folder: {}", updated.name);
        }

        FolderCommands::Archive { folder } => {
            let updated = set_status(repository, &folder, FolderStatus::Archived).await?;
            println!("Archived folder: {}", updated.name);
        }

        FolderCommands::Delete { folder } => {
            let updated = set_status(repository, &folder, FolderStatus::Deleted).await?;
            println!("Moved folder to deleted: {}", updated.name);
            println!("Use 'biovault folder purge' to remove it for good.");
        }

        FolderCommands::Restore { folder } => {
            let updated = set_status(repository, &folder, FolderStatus::Active).await?;
            println!("Restored folder: {}", updated.name);
        }

        FolderCommands::Purge { folder, force } => {
            let found = find_folder(repository, &folder).await?;
            if !force {
                println!(
                    "This permanently deletes '{}' and its {} item(s).",
                    found.name, found.item_count
                );
                println!("Use --force to confirm deletion");
                return Ok(());
            }
            repository.delete_folder(&found.id).await?;
            println!("Permanently deleted folder: {}", found.name);
        }
    }

    Ok(())
}

async fn set_status(
    repository: &dyn VaultRepository,
    folder: &str,
    status: FolderStatus,
) -> VaultResult<Folder> {
    let found = find_folder(repository, folder).await?;
    if found.status == status {
        return Err(VaultError::Validation(format!(
            "Folder '{}' is already {}",
            found.name, status
        )));
    }
    repository.update_folder_status(&found.id, status).await
}

/// Find a folder by ID, or by case-insensitive name, in any status
pub async fn find_folder(repository: &dyn VaultRepository, key: &str) -> VaultResult<Folder> {
    let mut by_name = None;
    for status in ALL_STATUSES {
        for folder in repository.list_folders(status).await? {
            if folder.id.as_str() == key {
                return Ok(folder);
            }
            if by_name.is_none() && folder.name.eq_ignore_ascii_case(key) {
                by_name = Some(folder);
            }
        }
    }
    by_name.ok_or_else(|| VaultError::folder_not_found(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultPaths;
    use crate::repository::LocalRepository;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn repository(temp_dir: &TempDir) -> LocalRepository {
        let paths = VaultPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        LocalRepository::new(Storage::new(paths).unwrap())
    }

    #[tokio::test]
    async fn test_find_by_name_across_statuses() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        let created = repo
            .create_folder(NewFolder::new("Finance", FolderType::Documentos))
            .await
            .unwrap();
        repo.update_folder_status(&created.id, FolderStatus::Archived)
            .await
            .unwrap();

        let found = find_folder(&repo, "finance").await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.status, FolderStatus::Archived);

        let found = find_folder(&repo, created.id.as_str()).await.unwrap();
        assert_eq!(found.name, "Finance");
    }

    #[tokio::test]
    async fn test_unknown_folder() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        let err = find_folder(&repo, "nope").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        repo.create_folder(NewFolder::new("Keys", FolderType::Claves))
            .await
            .unwrap();

        handle_folder_command(
            &repo,
            FolderCommands::Hide {
                folder: "Keys".into(),
            },
        )
        .await
        .unwrap();
        assert!(repo
            .list_folders(FolderStatus::Active)
            .await
            .unwrap()
            .is_empty());

        handle_folder_command(
            &repo,
            FolderCommands::Restore {
                folder: "Keys".into(),
            },
        )
        .await
        .unwrap();
        assert_eq!(repo.list_folders(FolderStatus::Active).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_status_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repository(&temp_dir);
        repo.create_folder(NewFolder::new("Keys", FolderType::Claves))
            .await
            .unwrap();

        let err = set_status(&repo, "Keys", FolderStatus::Active)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}

//! Item CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use super::folder::find_folder;
use crate::display::{format_item_list, format_item_saved};
use crate::error::{VaultError, VaultResult};
use crate::models::{ItemId, ItemType, NewItem};
use crate::repository::VaultRepository;

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// List the items in a folder, newest first
    List {
        /// Folder name or ID
        folder: String,
    },
    /// Add a text note
    AddNote {
        /// Folder name or ID
        folder: String,
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Note body
        #[arg(short, long)]
        content: String,
    },
    /// Upload a photo, scan or voice recording
    Attach {
        /// Folder name or ID
        folder: String,
        /// File to upload
        path: PathBuf,
        /// Item kind (photo, scan, voice)
        #[arg(short, long, default_value = "photo")]
        kind: String,
        /// Item title
        #[arg(short, long, default_value = "")]
        title: String,
        /// Short description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Recording length, voice only (e.g. "1:05")
        #[arg(long)]
        duration: Option<String>,
    },
    /// Delete an item
    Remove {
        /// Folder name or ID
        folder: String,
        /// Item ID
        item: String,
    },
}

pub async fn handle_item_command(
    repository: &dyn VaultRepository,
    cmd: ItemCommands,
) -> VaultResult<()> {
    match cmd {
        ItemCommands::List { folder } => {
            let found = find_folder(repository, &folder).await?;
            let items = repository.list_items(&found.id).await?;
            println!("{} ({} items)", found.name, items.len());
            print!("{}", format_item_list(&items));
        }

        ItemCommands::AddNote {
            folder,
            title,
            description,
            content,
        } => {
            let found = find_folder(repository, &folder).await?;
            let item = repository
                .create_item(
                    &found.id,
                    NewItem::Note {
                        title,
                        description,
                        content,
                    },
                )
                .await?;
            print!("{}", format_item_saved(&item));
        }

        ItemCommands::Attach {
            folder,
            path,
            kind,
            title,
            description,
            duration,
        } => {
            let kind = ItemType::parse(&kind)
                .filter(ItemType::is_file)
                .ok_or_else(|| {
                    VaultError::Validation(format!(
                        "Invalid item kind: '{}'. Valid kinds: photo, scan, voice",
                        kind
                    ))
                })?;
            if !path.is_file() {
                return Err(VaultError::Validation(format!(
                    "No such file: {}",
                    path.display()
                )));
            }

            let found = find_folder(repository, &folder).await?;
            let item = repository
                .create_item(
                    &found.id,
                    NewItem::File {
                        kind,
                        title,
                        description,
                        path,
                        duration,
                    },
                )
                .await?;
            print!("{}", format_item_saved(&item));
        }

        ItemCommands::Remove { folder, item } => {
            let found = find_folder(repository, &folder).await?;
            repository
                .delete_item(&found.id, &ItemId::from(item.as_str()))
                .await?;
            println!("Deleted item {} from {}", item, found.name);
        }
    }

    Ok(())
}

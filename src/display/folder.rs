//! Folder display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Folder;

#[derive(Tabled)]
struct FolderRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    folder_type: String,
    #[tabled(rename = "Items")]
    items: u64,
    #[tabled(rename = "Security")]
    security: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Folder> for FolderRow {
    fn from(folder: &Folder) -> Self {
        Self {
            name: folder.name.clone(),
            folder_type: folder.folder_type.to_string(),
            items: folder.item_count,
            security: folder.security_level.to_string(),
            created: folder.created_at.format("%Y-%m-%d %H:%M").to_string(),
            id: folder.id.to_string(),
        }
    }
}

/// Format folders as a table, newest first as given
pub fn format_folder_list(folders: &[Folder]) -> String {
    if folders.is_empty() {
        return "No folders found.\n".to_string();
    }

    let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Format a single folder's details
pub fn format_folder_details(folder: &Folder) -> String {
    let mut output = String::new();

    output.push_str(&format!("Folder: {}\n", folder.name));
    output.push_str(&format!("  Type:      {}\n", folder.folder_type));
    output.push_str(&format!("  Security:  {}\n", folder.security_level));
    output.push_str(&format!("  Status:    {}\n", folder.status));
    output.push_str(&format!("  Items:     {}\n", folder.item_count));
    output.push_str(&format!(
        "  Created:   {}\n",
        folder.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("  ID:        {}\n", folder.id));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FolderType;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_folder_list(&[]), "No folders found.\n");
    }

    #[test]
    fn test_list_shows_names_and_counts() {
        let mut folder = Folder::new("Finance", FolderType::Documentos);
        folder.item_count = 3;

        let output = format_folder_list(&[folder]);
        assert!(output.contains("Name"));
        assert!(output.contains("Finance"));
        assert!(output.contains("Documents"));
        assert!(output.contains('3'));
    }

    #[test]
    fn test_details() {
        let folder = Folder::new("Keys", FolderType::Claves);
        let output = format_folder_details(&folder);
        assert!(output.starts_with("Folder: Keys\n"));
        assert!(output.contains("Status:    active"));
    }
}

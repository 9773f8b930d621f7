//! Item display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Item;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    item_type: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Length")]
    duration: String,
    #[tabled(rename = "Added")]
    created: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            item_type: item.item_type.to_string(),
            size: item.file_size.clone().unwrap_or_default(),
            duration: item.duration.clone().unwrap_or_default(),
            created: item.created_at.format("%Y-%m-%d %H:%M").to_string(),
            id: item.id.to_string(),
        }
    }
}

pub fn format_item_list(items: &[Item]) -> String {
    if items.is_empty() {
        return "This folder is empty.\n".to_string();
    }

    let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// One-line summary printed after an item is saved
pub fn format_item_saved(item: &Item) -> String {
    let mut output = format!("Saved {} '{}'", item.item_type, item.title);
    if let Some(size) = &item.file_size {
        output.push_str(&format!(" ({})", size));
    }
    output.push_str(&format!("\n  ID: {}\n", item.id));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FolderId, ItemId, ItemType};
    use chrono::Utc;

    fn voice() -> Item {
        Item {
            id: ItemId::from("i1"),
            item_type: ItemType::Voice,
            title: "Memo".into(),
            description: String::new(),
            content: None,
            file_url: Some("/uploads/memo.m4a".into()),
            file_size: Some("1.5 MB".into()),
            duration: Some("0:42".into()),
            folder_id: FolderId::from("f1"),
            encrypted: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_list_includes_duration() {
        let output = format_item_list(&[voice()]);
        assert!(output.contains("Memo"));
        assert!(output.contains("0:42"));
        assert!(output.contains("1.5 MB"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_item_list(&[]), "This folder is empty.\n");
    }

    #[test]
    fn test_saved_summary() {
        let output = format_item_saved(&voice());
        assert!(output.starts_with("Saved voice 'Memo' (1.5 MB)"));
    }
}

//! Login activity display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::activity::ActivityEntry;

#[derive(Tabled)]
struct ActivityRow {
    #[tabled(rename = "When")]
    when: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ActivityEntry> for ActivityRow {
    fn from(entry: &ActivityEntry) -> Self {
        let mut action = entry.action();
        if let Some(detail) = &entry.detail {
            action.push_str(&format!(" ({})", detail));
        }
        Self {
            when: entry
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            action,
            device: entry.device.clone(),
            status: entry.status().to_string(),
        }
    }
}

pub fn format_activity(entries: &[ActivityEntry]) -> String {
    if entries.is_empty() {
        return "No sign-in activity recorded.\n".to_string();
    }

    let rows: Vec<ActivityRow> = entries.iter().map(ActivityRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::AuthMethod;
    use crate::app::GateKind;

    #[test]
    fn test_failed_attempt_marked_suspicious() {
        let entry = ActivityEntry::new(GateKind::Restricted, AuthMethod::Biometric, false)
            .with_detail("not recognised");
        let output = format_activity(&[entry]);
        assert!(output.contains("Biometric folder unlock failed (not recognised)"));
        assert!(output.contains("suspicious"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_activity(&[]), "No sign-in activity recorded.\n");
    }
}

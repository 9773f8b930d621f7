//! Login activity CLI command

use clap::Args;

use crate::activity::{ActivityFilter, ActivityLog};
use crate::display::format_activity;
use crate::error::{VaultError, VaultResult};

#[derive(Args)]
pub struct ActivityArgs {
    /// Which entries to show (all, success, suspicious)
    #[arg(short, long, default_value = "all")]
    pub filter: String,
    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

pub fn handle_activity_command(log: &ActivityLog, args: ActivityArgs) -> VaultResult<()> {
    let filter = ActivityFilter::parse(&args.filter).ok_or_else(|| {
        VaultError::Validation(format!(
            "Invalid filter: '{}'. Valid filters: all, success, suspicious",
            args.filter
        ))
    })?;

    let entries = log.read_recent(filter, args.limit)?;
    print!("{}", format_activity(&entries));
    Ok(())
}

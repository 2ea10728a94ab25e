use std::path::{Path, PathBuf};

use crate::cli::resolve_month;
use crate::error::Result;
use crate::models::Sale;
use crate::reports;
use crate::settings::get_data_dir;
use crate::storage::{SalesStore, Storage};

fn default_path(month: &str) -> PathBuf {
    get_data_dir().join("exports").join(format!("sales-{month}.csv"))
}

pub fn run(month_arg: Option<String>, search: Option<String>, output: Option<String>) -> Result<()> {
    let month = resolve_month(month_arg.as_deref())?;
    let store = SalesStore::load(Storage::open_default());
    let summary = reports::summarize(store.all(), &month, search.as_deref().unwrap_or(""));

    let path = output.map(PathBuf::from).unwrap_or_else(|| default_path(&month));
    write_csv(&summary.entries, &path)?;

    println!("Wrote {} tours to {}", summary.entries.len(), path.display());
    Ok(())
}

pub fn write_csv(entries: &[Sale], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "Date",
        "Tour",
        "Client",
        "Outcome",
        "Amount",
        "Bonus Points",
        "Membership",
        "Ownership",
        "Existing Ownership",
        "Notes",
        "Follow-up",
    ])?;
    for sale in entries {
        writer.write_record([
            sale.date.as_str(),
            &sale.tour_number.to_string(),
            sale.client_name.as_str(),
            &sale.outcome.to_string(),
            &format!("{:.2}", sale.amount),
            &format!("{:.0}", sale.bonus_points),
            sale.membership_id.as_deref().unwrap_or_default(),
            &sale.ownership_type.to_string(),
            sale.existing_ownership.as_deref().unwrap_or_default(),
            sale.notes.as_str(),
            sale.follow_up.as_deref().unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

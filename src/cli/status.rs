use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::month;
use crate::reports;
use crate::settings::{get_data_dir, load_settings};
use crate::storage::{SalesStore, Storage, TargetStore, DARK_MODE_SLOT, SALES_SLOT, TARGETS_SLOT};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = get_data_dir();

    println!(
        "User:       {}",
        if settings.user_name.is_empty() { "(not set)" } else { &settings.user_name }
    );
    println!("Data dir:   {}", data_dir.display());

    let storage = Storage::new(data_dir.clone());
    if storage.read(SALES_SLOT).is_none() {
        println!();
        println!("No sale history found. Run `tourlog init` to set up.");
        return Ok(());
    }

    let store = SalesStore::load(storage.clone());
    let targets = TargetStore::load(storage);

    let mut months: Vec<&str> = store.all().iter().map(|s| s.date.get(..7).unwrap_or("")).collect();
    months.sort_unstable();
    months.dedup();

    println!();
    println!("Sales:      {}", store.all().len());
    println!("Months:     {}", months.len());

    println!();
    println!("Files:");
    for slot in [SALES_SLOT, TARGETS_SLOT, DARK_MODE_SLOT] {
        let file = format!("{slot}.json");
        if let Ok(meta) = std::fs::metadata(data_dir.join(&file)) {
            println!("  {file:<22}{}", format_bytes(meta.len()));
        }
    }

    let current = month::current();
    let summary = reports::summarize(store.all(), &current, "");
    let target = targets.get(&current);
    println!();
    println!("{}", month::label(&current));
    println!("  Tours:  {}", summary.total_tours);
    println!("  Sold:   {}", summary.sold_count);
    println!("  Sales:  {} of {} goal", money(summary.total_sales), money(target.goal));

    Ok(())
}

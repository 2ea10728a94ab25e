use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_exists, shellexpand_path};
use crate::storage::{Storage, SALES_SLOT, TARGETS_SLOT};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_file_exists() {
        // First run, no flag: ask where the history should live
        let chosen = prompt(&format!("Data directory [{}]: ", settings.data_dir));
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(&chosen);
        }
        settings.user_name = prompt("Your name (shown on the dashboard, optional): ");
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    // Seed empty slots so the data files exist from the start
    let storage = Storage::new(resolved.clone());
    if storage.read(SALES_SLOT).is_none() {
        storage.write(SALES_SLOT, "[]")?;
    }
    if storage.read(TARGETS_SLOT).is_none() {
        storage.write(TARGETS_SLOT, "{}")?;
    }

    println!("Initialized tourlog at {}", resolved.display());
    Ok(())
}

fn prompt(label: &str) -> String {
    print!("{label}");
    std::io::stdout().flush().unwrap();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

use crate::error::{Result, TourlogError};
use crate::storage::{SalesStore, Storage};

/// Delete a sale by id. Accepts a prefix as long as it matches exactly one
/// entry; a blank id is rejected, since the empty prefix matches everything.
/// The full history is persisted whether or not anything matched.
pub fn run(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(TourlogError::MissingField("id"));
    }

    let mut store = SalesStore::load(Storage::open_default());

    let matches: Vec<String> = store
        .all()
        .iter()
        .filter(|s| s.id.starts_with(id))
        .map(|s| s.id.clone())
        .collect();

    if matches.len() > 1 {
        return Err(TourlogError::Other(format!(
            "Id '{id}' is ambiguous ({} matches)",
            matches.len()
        )));
    }

    let full_id = matches.first().cloned().unwrap_or_else(|| id.to_string());
    if store.delete(&full_id)? {
        println!("Deleted sale {full_id}");
    } else {
        println!("No sale matching id {id}");
    }
    Ok(())
}

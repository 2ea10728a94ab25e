use chrono::{Local, NaiveDate};

use crate::cli::AddArgs;
use crate::error::{Result, TourlogError};
use crate::models::{optional_field, NewSale};
use crate::storage::{SalesStore, Storage};

pub fn run(args: AddArgs) -> Result<()> {
    if args.client.trim().is_empty() {
        return Err(TourlogError::MissingField("client"));
    }

    let date = match args.date {
        Some(d) => {
            NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|_| TourlogError::InvalidDate(d.clone()))?;
            d
        }
        None => Local::now().format("%Y-%m-%d").to_string(),
    };

    let new = NewSale {
        date: date.clone(),
        amount: args.amount,
        bonus_points: args.bonus_points,
        client_name: args.client.clone(),
        tour_number: args.tour,
        outcome: args.outcome,
        membership_id: args.membership_id.as_deref().and_then(optional_field),
        ownership_type: args.ownership,
        existing_ownership: args.existing_ownership.as_deref().and_then(optional_field),
        notes: args.notes,
        follow_up: args.follow_up.as_deref().and_then(optional_field),
    };

    let mut store = SalesStore::load(Storage::open_default());
    let id = store.add(new)?;

    println!("Recorded tour #{} for {} on {date}: {}", args.tour, args.client, args.outcome);
    println!("Id: {id}");
    Ok(())
}

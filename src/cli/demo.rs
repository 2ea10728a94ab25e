use chrono::{Datelike, Local, NaiveDate};

use crate::error::Result;
use crate::models::{NewSale, Outcome, OwnershipType};
use crate::storage::{SalesStore, Storage};

const CLIENTS: &[&str] = &[
    "John Smith",
    "Maria Garcia",
    "Kenji Tanaka",
    "Linda Johnson",
    "Robert Chen",
    "Patricia Miller",
    "Ahmed Hassan",
    "Susan Davis",
    "Carlos Rodriguez",
    "Emily Wilson",
    "Frank Nakamura",
    "Grace Kim",
    "David Brown",
    "Anna Kowalski",
    "Michael Taylor",
    "Rachel Green",
];

/// Outcome mix cycled across tours. Five SOLD out of fourteen keeps the
/// demo conversion rate in a realistic band.
const OUTCOME_PATTERN: &[Outcome] = &[
    Outcome::Sold,
    Outcome::NoSale,
    Outcome::NoSale,
    Outcome::Sold,
    Outcome::Courtesy,
    Outcome::NoSale,
    Outcome::Sold,
    Outcome::Resale,
    Outcome::NoSale,
    Outcome::NoSale,
    Outcome::Sold,
    Outcome::NoSale,
    Outcome::Courtesy,
    Outcome::Sold,
];

const SOLD_AMOUNTS: &[f64] = &[
    18900.0, 22500.0, 31200.0, 25000.0, 15900.0, 42800.0, 27300.0, 19900.0,
];

const SOLD_POINTS: &[f64] = &[
    3500.0, 5000.0, 7500.0, 4000.0, 6500.0, 10000.0, 5500.0, 4500.0,
];

const OWNERSHIPS: &[OwnershipType] = &[
    OwnershipType::Deed,
    OwnershipType::Trust,
    OwnershipType::Deed,
    OwnershipType::Both,
    OwnershipType::Deed,
    OwnershipType::Trust,
];

const EXISTING: &[&str] = &[
    "Grand Waikikian",
    "Lagoon Tower",
    "Kings' Land",
    "Ocean Tower",
];

const NOTES: &[&str] = &[
    "",
    "Upgraded from a trial package",
    "Second visit this year",
    "Came in on an owner referral",
    "Wants ocean view, budget tight",
    "",
    "Declined financing",
    "Asked about resale values",
    "",
    "Anniversary trip",
];

const FOLLOW_UPS: &[&str] = &[
    "Call after points post",
    "Send closing docs",
    "Invite to owner update",
];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let last_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt()
        .unwrap()
        .day();
    day.min(last_day)
}

fn make_date(year: i32, month: u32, day: u32) -> String {
    let d = clamp_day(year, month, day);
    format!("{year:04}-{month:02}-{d:02}")
}

/// Build six months of demo tours ending at the current month. Deterministic:
/// the same month index always produces the same tours.
fn generate_sales() -> Vec<NewSale> {
    let today = Local::now().date_naive();
    let mut sales = Vec::new();

    for i in 0..6u32 {
        // Count backwards: i=0 is 5 months ago, i=5 is current month
        let months_ago = 5 - i;
        let target = today - chrono::Months::new(months_ago);
        let year = target.year();
        let month = target.month();
        let idx = i as usize;

        let tours = 10 + idx % 4;
        for j in 0..tours {
            let day = 2 + (j as u32 * 26) / tours as u32 + (j as u32 % 2);
            let outcome = OUTCOME_PATTERN[(idx * 5 + j) % OUTCOME_PATTERN.len()];
            let pick = idx * 7 + j;

            let (amount, bonus_points, membership_id, ownership_type) = if outcome.is_sold() {
                (
                    SOLD_AMOUNTS[pick % SOLD_AMOUNTS.len()],
                    SOLD_POINTS[pick % SOLD_POINTS.len()],
                    Some(format!("#1-{:09}", 697_522_610u64 + (pick as u64) * 1315)),
                    OWNERSHIPS[pick % OWNERSHIPS.len()],
                )
            } else {
                (0.0, 0.0, None, OwnershipType::Deed)
            };

            // Resales and the occasional prospect already own somewhere
            let existing_ownership = if outcome == Outcome::Resale || pick % 9 == 0 {
                Some(EXISTING[pick % EXISTING.len()].to_string())
            } else {
                None
            };

            let follow_up = if outcome.is_sold() && pick % 3 == 0 {
                Some(FOLLOW_UPS[pick % FOLLOW_UPS.len()].to_string())
            } else {
                None
            };

            sales.push(NewSale {
                date: make_date(year, month, day),
                amount,
                bonus_points,
                client_name: CLIENTS[pick % CLIENTS.len()].to_string(),
                tour_number: (j % 3 + 1) as u32,
                outcome,
                membership_id,
                ownership_type,
                existing_ownership,
                notes: NOTES[pick % NOTES.len()].to_string(),
                follow_up,
            });
        }
    }

    sales
}

pub fn run() -> Result<()> {
    let mut store = SalesStore::load(Storage::open_default());

    // Idempotency guard
    if !store.is_empty() {
        println!("Demo data skipped: sale history is not empty ({} sales).", store.all().len());
        return Ok(());
    }

    let sales = generate_sales();
    let count = sales.len();
    for sale in sales {
        store.add(sale)?;
    }

    println!("Demo data loaded!");
    println!("  Sales:   {count}");
    println!("  Months:  6");
    println!();
    println!("Try these next:");
    println!("  tourlog list");
    println!("  tourlog stats");
    println!("  tourlog export");
    println!("  tourlog");

    Ok(())
}

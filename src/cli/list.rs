use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::resolve_month;
use crate::error::Result;
use crate::fmt::{money, points};
use crate::models::Outcome;
use crate::month;
use crate::reports::{self, MonthSummary};
use crate::storage::{SalesStore, Storage};

pub fn run(month_arg: Option<String>, search: Option<String>) -> Result<()> {
    let month = resolve_month(month_arg.as_deref())?;
    let store = SalesStore::load(Storage::open_default());
    let summary = reports::summarize(store.all(), &month, search.as_deref().unwrap_or(""));
    println!("{}", format_list(&summary));
    Ok(())
}

fn outcome_cell(outcome: Outcome) -> Cell {
    let label = outcome.to_string();
    let colored = match outcome {
        Outcome::Sold => label.green(),
        Outcome::NoSale => label.red(),
        Outcome::Courtesy => label.blue(),
        Outcome::Resale => label.magenta(),
    };
    Cell::new(colored)
}

pub fn format_list(summary: &MonthSummary) -> String {
    let heading = month::label(&summary.month);
    if summary.entries.is_empty() {
        return format!("{}\nNo tours recorded.", heading.bold());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Id", "Date", "Tour", "Client", "Outcome", "Amount", "Points", "Membership", "Notes",
    ]);
    for sale in &summary.entries {
        let short_id: String = sale.id.chars().take(8).collect();
        let (amount, pts) = if sale.outcome.is_sold() {
            (money(sale.amount), points(sale.bonus_points))
        } else {
            (String::new(), String::new())
        };
        table.add_row(vec![
            Cell::new(short_id),
            Cell::new(&sale.date),
            Cell::new(sale.tour_number),
            Cell::new(&sale.client_name),
            outcome_cell(sale.outcome),
            Cell::new(amount),
            Cell::new(pts),
            Cell::new(sale.membership_id.as_deref().unwrap_or_default()),
            Cell::new(&sale.notes),
        ]);
    }

    format!(
        "{}\n{table}\n{} tours, {} sold, {} total",
        heading.bold(),
        summary.total_tours,
        summary.sold_count,
        money(summary.total_sales),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSale, OwnershipType, Sale};

    fn sale(name: &str, outcome: Outcome, amount: f64) -> Sale {
        NewSale {
            date: "2024-03-01".to_string(),
            amount,
            bonus_points: 0.0,
            client_name: name.to_string(),
            tour_number: 1,
            outcome,
            membership_id: None,
            ownership_type: OwnershipType::Deed,
            existing_ownership: None,
            notes: String::new(),
            follow_up: None,
        }
        .into_sale(format!("id-{name}"))
    }

    #[test]
    fn test_format_list_shows_entries() {
        let sales = vec![
            sale("John Smith", Outcome::Sold, 25000.0),
            sale("Jane Doe", Outcome::NoSale, 0.0),
        ];
        let summary = reports::summarize(&sales, "2024-03", "");
        let out = format_list(&summary);
        assert!(out.contains("MARCH (2024)"), "got: {out}");
        assert!(out.contains("John Smith"), "got: {out}");
        assert!(out.contains("NO SALE"), "got: {out}");
        assert!(out.contains("$25,000"), "got: {out}");
        assert!(out.contains("2 tours, 1 sold"), "got: {out}");
    }

    #[test]
    fn test_format_list_empty_month() {
        let summary = reports::summarize(&[], "2024-05", "");
        let out = format_list(&summary);
        assert!(out.contains("No tours recorded"), "got: {out}");
        assert!(out.contains("MAY (2024)"), "got: {out}");
    }

    #[test]
    fn test_unsold_rows_hide_amounts() {
        let sales = vec![sale("Jane Doe", Outcome::NoSale, 9999.0)];
        let summary = reports::summarize(&sales, "2024-03", "");
        let out = format_list(&summary);
        assert!(!out.contains("$9,999"), "got: {out}");
    }
}

use colored::Colorize;

use crate::cli::resolve_month;
use crate::error::Result;
use crate::fmt::{money, percent, points};
use crate::models::MonthlyTarget;
use crate::month;
use crate::reports::{self, MonthSummary};
use crate::storage::{SalesStore, Storage, TargetStore};

pub fn run(month_arg: Option<String>, search: Option<String>) -> Result<()> {
    let month = resolve_month(month_arg.as_deref())?;
    let storage = Storage::open_default();
    let store = SalesStore::load(storage.clone());
    let targets = TargetStore::load(storage);
    let summary = reports::summarize(store.all(), &month, search.as_deref().unwrap_or(""));
    println!("{}", format_stats(&summary, &targets.get(&month)));
    Ok(())
}

pub fn format_stats(summary: &MonthSummary, target: &MonthlyTarget) -> String {
    let goal_pct = if target.goal > 0.0 {
        summary.total_sales / target.goal * 100.0
    } else {
        0.0
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n\n", month::label(&summary.month).bold()));
    out.push_str(&format!("Tours:         {}\n", summary.total_tours));
    out.push_str(&format!("Sold:          {}\n", summary.sold_count));
    out.push_str(&format!("Conversion:    {}\n", percent(summary.conversion_rate)));
    out.push_str(&format!("Total sales:   {}\n", money(summary.total_sales)));
    out.push_str(&format!("Bonus points:  {}\n", points(summary.total_bonus_points)));
    out.push_str(&format!(
        "Average sale:  {}  (target {})\n",
        money(summary.average_sale),
        money(target.asp),
    ));
    out.push_str(&format!(
        "Goal:          {} of {}  ({})",
        money(summary.total_sales),
        money(target.goal),
        percent(goal_pct),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewSale, Outcome, OwnershipType, Sale};

    fn sale(outcome: Outcome, amount: f64, pts: f64) -> Sale {
        NewSale {
            date: "2024-03-01".to_string(),
            amount,
            bonus_points: pts,
            client_name: "Client".to_string(),
            tour_number: 1,
            outcome,
            membership_id: None,
            ownership_type: OwnershipType::Deed,
            existing_ownership: None,
            notes: String::new(),
            follow_up: None,
        }
        .into_sale("id".to_string())
    }

    #[test]
    fn test_format_stats() {
        let sales = vec![
            sale(Outcome::Sold, 25000.0, 5000.0),
            sale(Outcome::NoSale, 0.0, 0.0),
        ];
        let summary = reports::summarize(&sales, "2024-03", "");
        let out = format_stats(&summary, &MonthlyTarget::default());
        assert!(out.contains("MARCH (2024)"), "got: {out}");
        assert!(out.contains("Tours:         2"), "got: {out}");
        assert!(out.contains("Conversion:    50.0%"), "got: {out}");
        assert!(out.contains("Bonus points:  5,000"), "got: {out}");
        assert!(out.contains("target $25,000"), "got: {out}");
        // 25000 / 400000 goal
        assert!(out.contains("(6.3%)"), "got: {out}");
    }

    #[test]
    fn test_format_stats_empty_month() {
        let summary = reports::summarize(&[], "2024-05", "");
        let out = format_stats(&summary, &MonthlyTarget::default());
        assert!(out.contains("Tours:         0"), "got: {out}");
        assert!(out.contains("Conversion:    0.0%"), "got: {out}");
        assert!(out.contains("(0.0%)"), "got: {out}");
        // The empty SOLD sum is -0.0; the sign must not reach the output
        assert!(!out.contains("-0"), "got: {out}");
    }

    #[test]
    fn test_goal_pct_guards_zero_goal() {
        let sales = vec![sale(Outcome::Sold, 1000.0, 0.0)];
        let summary = reports::summarize(&sales, "2024-03", "");
        let target = MonthlyTarget { asp: 0.0, goal: 0.0 };
        let out = format_stats(&summary, &target);
        assert!(out.contains("(0.0%)"), "got: {out}");
    }
}

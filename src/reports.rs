//! Month summaries over the sale history. All computation happens on the
//! in-memory history; nothing here touches storage.

use crate::models::Sale;

// ---------------------------------------------------------------------------
// Month summary
// ---------------------------------------------------------------------------

pub struct MonthSummary {
    pub month: String,
    /// Entries in the month matching the search, in insertion order.
    pub entries: Vec<Sale>,
    /// Sum of amounts across SOLD entries.
    pub total_sales: f64,
    /// Sum of bonus points across SOLD entries.
    pub total_bonus_points: f64,
    /// total_sales / sold_count, 0 when nothing sold.
    pub average_sale: f64,
    /// Every entry counts as a tour, whatever its outcome.
    pub total_tours: usize,
    pub sold_count: usize,
    /// sold_count / total_tours as a percentage, 0 when no tours.
    pub conversion_rate: f64,
}

/// Filter the history down to one month (and an optional search term) and
/// compute that month's stats.
///
/// The search is a case-insensitive substring match over client name, notes,
/// membership id, and existing ownership. Absent optional fields never match.
pub fn summarize(sales: &[Sale], month: &str, search: &str) -> MonthSummary {
    let term = search.trim().to_lowercase();
    let entries: Vec<Sale> = sales
        .iter()
        .filter(|s| s.date.starts_with(month))
        .filter(|s| term.is_empty() || matches_search(s, &term))
        .cloned()
        .collect();

    let total_tours = entries.len();
    let sold: Vec<&Sale> = entries.iter().filter(|s| s.outcome.is_sold()).collect();
    let sold_count = sold.len();
    let total_sales: f64 = sold.iter().map(|s| s.amount).sum();
    let total_bonus_points: f64 = sold.iter().map(|s| s.bonus_points).sum();

    let average_sale = if sold_count > 0 {
        total_sales / sold_count as f64
    } else {
        0.0
    };
    let conversion_rate = if total_tours > 0 {
        sold_count as f64 / total_tours as f64 * 100.0
    } else {
        0.0
    };

    MonthSummary {
        month: month.to_string(),
        entries,
        total_sales,
        total_bonus_points,
        average_sale,
        total_tours,
        sold_count,
        conversion_rate,
    }
}

fn matches_search(sale: &Sale, term: &str) -> bool {
    if sale.client_name.to_lowercase().contains(term) {
        return true;
    }
    if sale.notes.to_lowercase().contains(term) {
        return true;
    }
    if let Some(ref m) = sale.membership_id {
        if m.to_lowercase().contains(term) {
            return true;
        }
    }
    if let Some(ref o) = sale.existing_ownership {
        if o.to_lowercase().contains(term) {
            return true;
        }
    }
    false
}

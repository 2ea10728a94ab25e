use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Result of a tour. Serialized in the uppercase form the sales slot uses
/// ("NO SALE" contains a space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Outcome {
    #[serde(rename = "SOLD")]
    Sold,
    #[serde(rename = "NO SALE")]
    NoSale,
    #[serde(rename = "COURTESY")]
    Courtesy,
    #[serde(rename = "RESALE")]
    Resale,
}

impl Outcome {
    pub fn is_sold(self) -> bool {
        matches!(self, Outcome::Sold)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Sold => "SOLD",
            Outcome::NoSale => "NO SALE",
            Outcome::Courtesy => "COURTESY",
            Outcome::Resale => "RESALE",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OwnershipType {
    #[serde(rename = "DEED")]
    Deed,
    #[serde(rename = "TRUST")]
    Trust,
    #[serde(rename = "BOTH")]
    Both,
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OwnershipType::Deed => "DEED",
            OwnershipType::Trust => "TRUST",
            OwnershipType::Both => "BOTH",
        };
        f.write_str(s)
    }
}

/// One tour entry, SOLD or otherwise. Field names in the persisted JSON are
/// camelCase; optional fields are omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// ISO date, "YYYY-MM-DD". Immutable after creation.
    pub date: String,
    /// Sale amount in dollars. Meaningful only when outcome is SOLD.
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub bonus_points: f64,
    pub client_name: String,
    pub tour_number: u32,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    pub ownership_type: OwnershipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_ownership: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

/// A sale as entered by the user: everything but the id, which the store
/// assigns on insert.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub date: String,
    pub amount: f64,
    pub bonus_points: f64,
    pub client_name: String,
    pub tour_number: u32,
    pub outcome: Outcome,
    pub membership_id: Option<String>,
    pub ownership_type: OwnershipType,
    pub existing_ownership: Option<String>,
    pub notes: String,
    pub follow_up: Option<String>,
}

impl NewSale {
    pub fn into_sale(self, id: String) -> Sale {
        Sale {
            id,
            date: self.date,
            amount: self.amount,
            bonus_points: self.bonus_points,
            client_name: self.client_name,
            tour_number: self.tour_number,
            outcome: self.outcome,
            membership_id: self.membership_id,
            ownership_type: self.ownership_type,
            existing_ownership: self.existing_ownership,
            notes: self.notes,
            follow_up: self.follow_up,
        }
    }
}

/// Normalize free-text input for an optional field: blank means absent.
pub fn optional_field(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Per-month benchmarks, keyed by "YYYY-MM" in the targets slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTarget {
    /// Average-sale-price target in dollars.
    pub asp: f64,
    /// Monthly sales goal in dollars.
    pub goal: f64,
}

pub const DEFAULT_ASP_TARGET: f64 = 25_000.0;
pub const DEFAULT_MONTHLY_GOAL: f64 = 400_000.0;

/// Months without a saved target get these benchmarks.
impl Default for MonthlyTarget {
    fn default() -> Self {
        Self {
            asp: DEFAULT_ASP_TARGET,
            goal: DEFAULT_MONTHLY_GOAL,
        }
    }
}

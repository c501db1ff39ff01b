use crate::domain::allocation::DailyRecord;
use serde::{Deserialize, Serialize};

/// Column sums over the plan range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub days: usize,
    pub pumped_milk: f64,
    pub formula: f64,
    pub breastfed: f64,
    pub unknown: f64,
}

impl Totals {
    pub fn from_records(records: &[DailyRecord]) -> Self {
        records.iter().fold(
            Self {
                days: records.len(),
                ..Self::default()
            },
            |mut acc, r| {
                acc.pumped_milk += r.pumped_milk;
                acc.formula += r.formula;
                acc.breastfed += r.breastfed;
                acc.unknown += r.unknown;
                acc
            },
        )
    }
}

/// `numerator / divisor`, or 0 when the divisor is absent or zero.
pub fn safe_div(numerator: f64, divisor: Option<f64>) -> f64 {
    match divisor {
        Some(d) if d != 0.0 => numerator / d,
        _ => 0.0,
    }
}

/// Optional sizes and stock levels entered alongside the feeding plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StockInputs {
    /// Ounces of prepared formula per can.
    pub oz_per_can: Option<f64>,
    /// Ounces held by one milk storage bag.
    pub oz_per_bag: Option<f64>,
    /// Pumped milk already in the freezer, in ounces.
    pub oz_stored: Option<f64>,
    /// Expected ounces added to the stash per day of pumping.
    pub oz_stored_per_day: Option<f64>,
}

/// Stored vs. still-needed pumped milk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSplit {
    pub stored: f64,
    pub additional_needed: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StockPlan {
    pub formula_cans: f64,
    pub pumped_bags: f64,
    pub stored_bags: f64,
    pub additional_pumped: f64,
    pub additional_bags: f64,
    pub days_to_store_additional: f64,
    pub storage: StorageSplit,
}

impl StockPlan {
    pub fn new(totals: &Totals, stock: &StockInputs) -> Self {
        let stored = stock.oz_stored.unwrap_or(0.0);
        let additional_pumped = (totals.pumped_milk - stored).max(0.0);

        Self {
            formula_cans: safe_div(totals.formula, stock.oz_per_can),
            pumped_bags: safe_div(totals.pumped_milk, stock.oz_per_bag),
            stored_bags: safe_div(stored, stock.oz_per_bag),
            additional_pumped,
            additional_bags: safe_div(additional_pumped, stock.oz_per_bag),
            days_to_store_additional: safe_div(additional_pumped, stock.oz_stored_per_day),
            storage: StorageSplit {
                stored,
                additional_needed: additional_pumped,
            },
        }
    }
}

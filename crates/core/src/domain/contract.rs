use crate::domain::error::PlanInputError;
use crate::domain::source::AllocationParams;
use crate::domain::summary::StockInputs;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Formula,
    PumpedMilk,
    Breastfed,
}

/// Planning form as submitted. Inputs that belong to an unselected source are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    pub daily_total: f64,
    #[serde(default)]
    pub sources: BTreeSet<SourceKind>,
    pub formula_end: Option<NaiveDate>,
    pub milk_end: Option<NaiveDate>,
    pub weaning_start: Option<NaiveDate>,
    pub weaning_end: Option<NaiveDate>,
    pub breastmilk_pct: Option<f64>,
    pub pumped_milk_pct: Option<f64>,
    #[serde(default)]
    pub stock: StockInputs,
    /// Overrides the first plan day; front ends fill it from the clock when absent.
    pub today: Option<NaiveDate>,
}

impl PlanRequest {
    pub fn is_selected(&self, kind: SourceKind) -> bool {
        self.sources.contains(&kind)
    }

    /// Checks the request can be computed and maps it onto typed allocation
    /// parameters. Percentages and date ordering are deliberately left alone.
    pub fn validate_and_into_params(
        &self,
        today: NaiveDate,
        max_range_days: i64,
    ) -> anyhow::Result<AllocationParams> {
        if self.sources.is_empty() {
            return Err(PlanInputError::new(
                "sources",
                "select at least one feeding source (formula, pumped milk, or breastfed)",
            )
            .into());
        }

        if !self.daily_total.is_finite() {
            return Err(PlanInputError::new(
                "daily_total",
                format!("daily total must be a finite number (got {})", self.daily_total),
            )
            .into());
        }

        let formula = self.is_selected(SourceKind::Formula);
        let pumped = self.is_selected(SourceKind::PumpedMilk);
        let breastfed = self.is_selected(SourceKind::Breastfed);

        let params = AllocationParams::from_optional(
            self.daily_total,
            self.formula_end.filter(|_| formula),
            self.milk_end.filter(|_| pumped),
            self.weaning_start.filter(|_| breastfed),
            self.weaning_end.filter(|_| breastfed),
            self.breastmilk_pct.filter(|_| breastfed),
            self.pumped_milk_pct.filter(|_| pumped),
        );

        let (start, end) = params.plan_range(today);
        let span = (end - start).num_days() + 1;
        if span > max_range_days {
            return Err(PlanInputError::new(
                "end_dates",
                format!("plan covers {span} days from {start} to {end}; the limit is {max_range_days}"),
            )
            .into());
        }

        Ok(params)
    }

    /// Stock inputs restricted to the selected sources.
    pub fn selected_stock(&self) -> StockInputs {
        let formula = self.is_selected(SourceKind::Formula);
        let pumped = self.is_selected(SourceKind::PumpedMilk);
        StockInputs {
            oz_per_can: self.stock.oz_per_can.filter(|_| formula),
            oz_per_bag: self.stock.oz_per_bag.filter(|_| pumped),
            oz_stored: self.stock.oz_stored.filter(|_| pumped),
            oz_stored_per_day: self.stock.oz_stored_per_day.filter(|_| pumped),
        }
    }
}

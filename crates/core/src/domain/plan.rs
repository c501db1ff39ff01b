use crate::domain::allocation::{self, DailyRecord};
use crate::domain::contract::{PlanRequest, SourceKind};
use crate::domain::stash::{self, StashDay};
use crate::domain::summary::{StockPlan, Totals};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything the presentation surface needs for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_total: f64,
    pub sources: Vec<SourceKind>,
    pub days: Vec<DailyRecord>,
    pub totals: Totals,
    pub stock: StockPlan,
    /// Present only when pumped milk is selected.
    pub stash: Option<StashProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StashProjection {
    pub days: Vec<StashDay>,
    pub covered_through: Option<NaiveDate>,
}

impl Plan {
    pub fn build(request: &PlanRequest, today: NaiveDate, max_range_days: i64) -> anyhow::Result<Self> {
        let params = request.validate_and_into_params(today, max_range_days)?;
        let (start_date, end_date) = params.plan_range(today);

        let days = allocation::compute(&params, today);
        let totals = Totals::from_records(&days);
        let stock_inputs = request.selected_stock();
        let stock = StockPlan::new(&totals, &stock_inputs);

        let stash = request.is_selected(SourceKind::PumpedMilk).then(|| {
            let days = stash::drawdown(&days, stock_inputs.oz_stored.unwrap_or(0.0));
            let covered_through = stash::covered_through(&days);
            StashProjection {
                days,
                covered_through,
            }
        });

        tracing::debug!(
            %start_date,
            %end_date,
            days = totals.days,
            total_pumped = totals.pumped_milk,
            total_formula = totals.formula,
            total_unknown = totals.unknown,
            "computed feeding plan"
        );

        Ok(Self {
            start_date,
            end_date,
            daily_total: params.daily_total,
            sources: request.sources.iter().copied().collect(),
            days,
            totals,
            stock,
            stash,
        })
    }
}

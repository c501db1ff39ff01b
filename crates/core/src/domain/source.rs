use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A feeding source either contributes to the daily allocation or it doesn't.
/// Inactive sources contribute zero on every day and never extend the plan range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Feeding<T> {
    Active(T),
    Inactive,
}

impl<T> Feeding<T> {
    pub fn active(&self) -> Option<&T> {
        match self {
            Feeding::Active(v) => Some(v),
            Feeding::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Feeding::Active(_))
    }
}

impl<T> From<Option<T>> for Feeding<T> {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Feeding::Active(v),
            None => Feeding::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaSource {
    /// Last planned formula day. Used for the plan range and as the on/off switch
    /// for formula; the per-day formula amount does not compare against it.
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpedSource {
    pub pct: f64,
    /// Pumped milk applies on or before this date.
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreastfedSource {
    pub pct: f64,
    pub weaning_start: Option<NaiveDate>,
    pub weaning_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationParams {
    /// Ounces consumed per day.
    pub daily_total: f64,
    pub formula: Feeding<FormulaSource>,
    pub pumped: Feeding<PumpedSource>,
    pub breastfed: Feeding<BreastfedSource>,
}

impl AllocationParams {
    /// Builds the typed form from the raw nullable inputs of the planning form.
    ///
    /// Formula is active iff `formula_end` is set, pumped milk iff `milk_end` is set
    /// (a missing percentage counts as 0), and breastfeeding iff any of its three
    /// inputs is set.
    #[allow(clippy::too_many_arguments)]
    pub fn from_optional(
        daily_total: f64,
        formula_end: Option<NaiveDate>,
        milk_end: Option<NaiveDate>,
        weaning_start: Option<NaiveDate>,
        weaning_end: Option<NaiveDate>,
        breastmilk_pct: Option<f64>,
        pumped_milk_pct: Option<f64>,
    ) -> Self {
        let formula = formula_end.map(|end| FormulaSource { end }).into();

        let pumped = milk_end
            .map(|end| PumpedSource {
                pct: pumped_milk_pct.unwrap_or(0.0),
                end,
            })
            .into();

        let breastfed = if breastmilk_pct.is_some() || weaning_start.is_some() || weaning_end.is_some() {
            Feeding::Active(BreastfedSource {
                pct: breastmilk_pct.unwrap_or(0.0),
                weaning_start,
                weaning_end,
            })
        } else {
            Feeding::Inactive
        };

        Self {
            daily_total,
            formula,
            pumped,
            breastfed,
        }
    }

    pub fn milk_end(&self) -> Option<NaiveDate> {
        self.pumped.active().map(|p| p.end)
    }

    pub fn weaning_end(&self) -> Option<NaiveDate> {
        self.breastfed.active().and_then(|b| b.weaning_end)
    }

    /// End dates that bound the plan: formula end, milk end, weaning end.
    pub fn end_dates(&self) -> Vec<NaiveDate> {
        self.formula
            .active()
            .map(|f| f.end)
            .into_iter()
            .chain(self.milk_end())
            .chain(self.weaning_end())
            .collect()
    }

    /// Inclusive `[today, max(end dates, today)]`.
    pub fn plan_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self
            .end_dates()
            .into_iter()
            .fold(today, std::cmp::Ord::max);
        (today, end)
    }
}

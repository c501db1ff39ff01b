use crate::domain::source::{AllocationParams, BreastfedSource, Feeding, PumpedSource};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of the plan. The four amounts normally partition `daily_total`.
///
/// The exception is formula with a weaning start but no weaning end or milk
/// end: formula then covers the whole day while breastfeeding keeps its
/// pre-weaning share, so the row sums past `daily_total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub pumped_milk: f64,
    pub formula: f64,
    pub breastfed: f64,
    pub unknown: f64,
}

impl DailyRecord {
    pub fn total(&self) -> f64 {
        self.pumped_milk + self.formula + self.breastfed + self.unknown
    }
}

/// Computes one record per date in `[today, max(formula_end, milk_end, weaning_end, today)]`.
///
/// Inputs are not validated: out-of-range percentages or reversed weaning bounds
/// produce arithmetically consistent (if odd) rows rather than errors.
pub fn compute(params: &AllocationParams, today: NaiveDate) -> Vec<DailyRecord> {
    let (start, end) = params.plan_range(today);

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| allocate_day(params, date))
        .collect()
}

fn allocate_day(params: &AllocationParams, date: NaiveDate) -> DailyRecord {
    let total = params.daily_total;

    let breastfed_pct = match &params.breastfed {
        Feeding::Active(src) => breastfed_pct(src, date),
        Feeding::Inactive => 0.0,
    };
    let mut pumped_pct = match &params.pumped {
        Feeding::Active(src) => pumped_pct(src, date),
        Feeding::Inactive => 0.0,
    };

    // Overflow comes out of pumped milk only.
    let combined = breastfed_pct + pumped_pct;
    if combined > 100.0 {
        let excess = combined - 100.0;
        pumped_pct -= excess.min(pumped_pct);
    }

    let breastfed = total * breastfed_pct / 100.0;
    let pumped_milk = total * pumped_pct / 100.0;
    let formula = formula_amount(params, date, breastfed, pumped_milk);
    let unknown = (total - formula - pumped_milk - breastfed).max(0.0);

    DailyRecord {
        date,
        pumped_milk,
        formula,
        breastfed,
        unknown,
    }
}

fn breastfed_pct(src: &BreastfedSource, date: NaiveDate) -> f64 {
    match (src.weaning_start, src.weaning_end) {
        (Some(start), Some(end)) if start <= date && date <= end => {
            let window = (end - start).num_days().max(1) as f64;
            let remaining = (end - date).num_days() as f64;
            (src.pct * remaining / window).max(0.0)
        }
        (Some(start), _) if date < start => src.pct,
        _ => 0.0,
    }
}

fn pumped_pct(src: &PumpedSource, date: NaiveDate) -> f64 {
    if date <= src.end {
        src.pct
    } else {
        0.0
    }
}

fn formula_amount(params: &AllocationParams, date: NaiveDate, breastfed: f64, pumped_milk: f64) -> f64 {
    if !params.formula.is_active() {
        return 0.0;
    }

    let others_end = match (params.milk_end(), params.weaning_end()) {
        (Some(a), Some(b)) => a.max(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => return params.daily_total,
    };

    if date > others_end {
        params.daily_total
    } else {
        (params.daily_total - breastfed - pumped_milk).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const EPS: f64 = 1e-9;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    fn plus(days: i64) -> NaiveDate {
        today() + Duration::days(days)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn assert_partition(params: &AllocationParams, rows: &[DailyRecord]) {
        for r in rows {
            assert!(
                close(r.total(), params.daily_total),
                "partition broken on {}: {r:?}",
                r.date
            );
            assert!(r.pumped_milk >= 0.0 && r.formula >= 0.0 && r.breastfed >= 0.0 && r.unknown >= 0.0);
        }
    }

    #[test]
    fn pumped_only_leaves_remainder_unknown() {
        let params = AllocationParams::from_optional(30.0, None, Some(plus(10)), None, None, None, Some(60.0));
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 11);
        assert_eq!(rows.first().map(|r| r.date), Some(today()));
        assert_eq!(rows.last().map(|r| r.date), Some(plus(10)));
        for r in &rows {
            assert!(close(r.pumped_milk, 18.0));
            assert!(close(r.breastfed, 0.0));
            assert!(close(r.formula, 0.0));
            assert!(close(r.unknown, 12.0));
        }
        assert_partition(&params, &rows);
    }

    #[test]
    fn weaning_decays_linearly_to_zero() {
        let params = AllocationParams::from_optional(30.0, None, None, Some(today()), Some(plus(10)), Some(90.0), None);
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 11);
        assert!(close(rows[0].breastfed, 27.0));
        assert!(close(rows[5].breastfed, 13.5));
        assert_eq!(rows[10].breastfed, 0.0);
        for pair in rows.windows(2) {
            assert!(pair[1].breastfed <= pair[0].breastfed);
        }
        assert_partition(&params, &rows);
    }

    #[test]
    fn breastfed_plateau_before_weaning_start() {
        let params = AllocationParams::from_optional(30.0, None, None, Some(plus(3)), Some(plus(6)), Some(50.0), None);
        let rows = compute(&params, today());

        for r in &rows[..=3] {
            assert!(close(r.breastfed, 15.0));
        }
        assert!(close(rows[4].breastfed, 10.0));
        assert!(close(rows[5].breastfed, 5.0));
        assert_eq!(rows[6].breastfed, 0.0);
    }

    #[test]
    fn zero_length_weaning_window_is_fully_weaned() {
        let params = AllocationParams::from_optional(30.0, None, None, Some(today()), Some(today()), Some(80.0), None);
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].breastfed, 0.0);
        assert!(close(rows[0].unknown, 30.0));
    }

    #[test]
    fn breastfed_pct_without_weaning_dates_contributes_nothing() {
        let params = AllocationParams::from_optional(30.0, None, Some(plus(2)), None, None, Some(40.0), Some(10.0));
        let rows = compute(&params, today());

        for r in &rows {
            assert_eq!(r.breastfed, 0.0);
            assert!(close(r.pumped_milk, 3.0));
        }
    }

    #[test]
    fn weaning_start_only_keeps_plateau_then_drops() {
        let params = AllocationParams::from_optional(20.0, None, Some(plus(4)), Some(plus(2)), None, Some(50.0), None);
        let rows = compute(&params, today());

        assert!(close(rows[0].breastfed, 10.0));
        assert!(close(rows[1].breastfed, 10.0));
        assert_eq!(rows[2].breastfed, 0.0);
        assert_eq!(rows[4].breastfed, 0.0);
    }

    #[test]
    fn overflow_is_taken_from_pumped_milk() {
        let params = AllocationParams::from_optional(
            40.0,
            None,
            Some(plus(4)),
            Some(plus(2)),
            Some(plus(4)),
            Some(80.0),
            Some(50.0),
        );
        let rows = compute(&params, today());

        // 80 + 50 > 100: pumped clamped to 20%.
        assert!(close(rows[0].breastfed, 32.0));
        assert!(close(rows[0].pumped_milk, 8.0));
        assert!(close(rows[0].unknown, 0.0));

        // Mid-weaning 40 + 50 <= 100: no clamp.
        assert!(close(rows[3].breastfed, 16.0));
        assert!(close(rows[3].pumped_milk, 20.0));
        assert_partition(&params, &rows);
    }

    #[test]
    fn clamped_pumped_never_goes_negative() {
        let params = AllocationParams::from_optional(
            10.0,
            None,
            Some(plus(1)),
            Some(plus(1)),
            Some(plus(2)),
            Some(150.0),
            Some(30.0),
        );
        let rows = compute(&params, today());

        assert!(close(rows[0].breastfed, 15.0));
        assert_eq!(rows[0].pumped_milk, 0.0);
        assert_eq!(rows[0].unknown, 0.0);
    }

    #[test]
    fn formula_alone_covers_every_day() {
        let params = AllocationParams::from_optional(24.0, Some(plus(7)), None, None, None, None, None);
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 8);
        for r in &rows {
            assert_eq!(r.formula, 24.0);
            assert_eq!(r.unknown, 0.0);
        }
    }

    #[test]
    fn formula_fills_remainder_then_takes_over() {
        let params = AllocationParams::from_optional(
            30.0,
            Some(plus(8)),
            Some(plus(3)),
            Some(today()),
            Some(plus(5)),
            Some(50.0),
            Some(20.0),
        );
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 9);
        // Day 0: 50% breastfed, 20% pumped, formula fills the rest.
        assert!(close(rows[0].breastfed, 15.0));
        assert!(close(rows[0].pumped_milk, 6.0));
        assert!(close(rows[0].formula, 9.0));
        // Day 4: pumping stopped, weaning still running.
        assert!(close(rows[4].pumped_milk, 0.0));
        assert!(close(rows[4].breastfed, 3.0));
        assert!(close(rows[4].formula, 27.0));
        // After both ended, formula is the whole day.
        for r in &rows[6..] {
            assert_eq!(r.formula, 30.0);
        }
        assert_partition(&params, &rows);
    }

    #[test]
    fn formula_keeps_filling_remainder_after_its_own_end_date() {
        let params = AllocationParams::from_optional(30.0, Some(plus(2)), Some(plus(5)), None, None, None, Some(60.0));
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 6);
        for r in &rows {
            assert!(close(r.pumped_milk, 18.0));
            assert!(close(r.formula, 12.0));
        }
        assert_partition(&params, &rows);

        let later = AllocationParams::from_optional(30.0, Some(plus(6)), Some(plus(3)), None, None, None, Some(100.0));
        let rows = compute(&later, today());
        assert_eq!(rows[3].formula, 0.0);
        assert_eq!(rows[4].formula, 30.0);
        assert_eq!(rows[6].formula, 30.0);
    }

    #[test]
    fn formula_with_open_ended_weaning_overlaps_breastfed() {
        let params = AllocationParams::from_optional(30.0, Some(plus(3)), None, Some(plus(1)), None, Some(30.0), None);
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 4);
        // Before weaning starts both sources claim their share.
        assert_eq!(rows[0].formula, 30.0);
        assert!(close(rows[0].breastfed, 9.0));
        assert_eq!(rows[0].unknown, 0.0);
        assert!(close(rows[0].total(), 39.0));
        // From the weaning start on, formula alone partitions the day.
        for r in &rows[1..] {
            assert_eq!(r.breastfed, 0.0);
            assert_eq!(r.total(), 30.0);
        }
    }

    #[test]
    fn no_sources_yields_single_unknown_day() {
        let params = AllocationParams::from_optional(30.0, None, None, None, None, None, None);
        let rows = compute(&params, today());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, today());
        assert_eq!(rows[0].pumped_milk, 0.0);
        assert_eq!(rows[0].formula, 0.0);
        assert_eq!(rows[0].breastfed, 0.0);
        assert_eq!(rows[0].unknown, 30.0);
    }

    #[test]
    fn recomputation_is_deterministic() {
        let params = AllocationParams::from_optional(
            32.0,
            Some(plus(40)),
            Some(plus(20)),
            Some(plus(5)),
            Some(plus(30)),
            Some(70.0),
            Some(25.0),
        );
        let a = compute(&params, today());
        let b = compute(&params, today());
        assert_eq!(a, b);
        assert_partition(&params, &a);
    }

    #[test]
    fn reversed_weaning_bounds_do_not_panic() {
        let params = AllocationParams::from_optional(30.0, None, None, Some(plus(5)), Some(plus(1)), Some(60.0), Some(-10.0));
        let rows = compute(&params, today());
        assert_eq!(rows.len(), 2);
        assert!(close(rows[0].breastfed, 18.0));
    }
}

use milkplan_core::domain::contract::SourceKind;
use milkplan_core::domain::plan::Plan;
use std::fmt::{self, Write};

/// Plain-text summary: figures per selected source, then the daily table.
pub fn render(plan: &Plan) -> String {
    let mut out = String::new();
    write_report(&mut out, plan).expect("writing to a String cannot fail");
    out
}

fn write_report(out: &mut String, plan: &Plan) -> fmt::Result {
    let selected = |kind| plan.sources.contains(&kind);

    writeln!(
        out,
        "Plan {} .. {} ({} days, {:.1} oz/day)",
        plan.start_date, plan.end_date, plan.totals.days, plan.daily_total
    )?;

    if selected(SourceKind::Formula) {
        writeln!(out, "\nFormula")?;
        writeln!(out, "  ounces of formula        {:>8.0} oz", plan.totals.formula)?;
        writeln!(out, "  formula cans             {:>8.0} cans", plan.stock.formula_cans)?;
    }

    if selected(SourceKind::PumpedMilk) {
        writeln!(out, "\nPumped milk")?;
        writeln!(out, "  ounces of pumped milk    {:>8.0} oz", plan.totals.pumped_milk)?;
        writeln!(out, "  additional ounces needed {:>8.0} oz", plan.stock.additional_pumped)?;
        writeln!(out, "  current ounces stored    {:>8.0} oz", plan.stock.storage.stored)?;
        writeln!(out, "  bags of pumped milk      {:>8.0} bags", plan.stock.pumped_bags)?;
        writeln!(out, "  additional bags needed   {:>8.0} bags", plan.stock.additional_bags)?;
        writeln!(out, "  current bags stored      {:>8.0} bags", plan.stock.stored_bags)?;
        writeln!(
            out,
            "  days to store additional {:>8.0} days",
            plan.stock.days_to_store_additional
        )?;
        if let Some(stash) = &plan.stash {
            match stash.covered_through {
                Some(d) => writeln!(out, "  stash covers through     {d}")?,
                None => writeln!(out, "  stash covers through     -")?,
            }
        }
    }

    if selected(SourceKind::Breastfed) {
        writeln!(out, "\nBreastfed")?;
        writeln!(out, "  ounces breastfed         {:>8.0} oz", plan.totals.breastfed)?;
    }

    writeln!(out, "\nUnknown                    {:>8.0} oz", plan.totals.unknown)?;

    writeln!(
        out,
        "\n{:<10} {:>8} {:>8} {:>9} {:>8}",
        "date", "pumped", "formula", "breastfed", "unknown"
    )?;
    for d in &plan.days {
        writeln!(
            out,
            "{:<10} {:>8.2} {:>8.2} {:>9.2} {:>8.2}",
            d.date.to_string(),
            d.pumped_milk,
            d.formula,
            d.breastfed,
            d.unknown
        )?;
    }

    Ok(())
}

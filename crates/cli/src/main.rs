use clap::{Parser, ValueEnum};
use milkplan_core::domain::contract::{PlanRequest, SourceKind};
use milkplan_core::domain::error::PlanInputError;
use milkplan_core::domain::plan::Plan;
use milkplan_core::domain::summary::StockInputs;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Formula,
    PumpedMilk,
    Breastfed,
}

impl From<SourceArg> for SourceKind {
    fn from(v: SourceArg) -> Self {
        match v {
            SourceArg::Formula => SourceKind::Formula,
            SourceArg::PumpedMilk => SourceKind::PumpedMilk,
            SourceArg::Breastfed => SourceKind::Breastfed,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "milkplan", about = "Plan daily feeding composition and formula/milk stock")]
struct Args {
    /// Expected ounces consumed per day.
    #[arg(long, default_value_t = 30.0)]
    daily_total: f64,

    /// Feeding source to include. Repeat for more than one.
    #[arg(long = "source", value_enum, required = true)]
    sources: Vec<SourceArg>,

    /// Last day of formula (YYYY-MM-DD).
    #[arg(long)]
    formula_end: Option<chrono::NaiveDate>,

    /// Last day of pumped milk (YYYY-MM-DD).
    #[arg(long)]
    milk_end: Option<chrono::NaiveDate>,

    #[arg(long)]
    weaning_start: Option<chrono::NaiveDate>,

    #[arg(long)]
    weaning_end: Option<chrono::NaiveDate>,

    /// Share of the day breastfed before weaning (0-100).
    #[arg(long)]
    breastmilk_pct: Option<f64>,

    /// Share of the day fed pumped milk (0-100).
    #[arg(long)]
    pumped_milk_pct: Option<f64>,

    #[arg(long)]
    oz_per_can: Option<f64>,

    #[arg(long)]
    oz_per_bag: Option<f64>,

    /// Ounces of pumped milk already stored.
    #[arg(long)]
    oz_stored: Option<f64>,

    /// Ounces expected to be stored per day.
    #[arg(long)]
    oz_stored_per_day: Option<f64>,

    /// First plan day (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    today: Option<chrono::NaiveDate>,

    /// Print the full plan as JSON instead of a report.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn to_request(&self) -> PlanRequest {
        PlanRequest {
            daily_total: self.daily_total,
            sources: self.sources.iter().map(|s| SourceKind::from(*s)).collect(),
            formula_end: self.formula_end,
            milk_end: self.milk_end,
            weaning_start: self.weaning_start,
            weaning_end: self.weaning_end,
            breastmilk_pct: self.breastmilk_pct,
            pumped_milk_pct: self.pumped_milk_pct,
            stock: StockInputs {
                oz_per_can: self.oz_per_can,
                oz_per_bag: self.oz_per_bag,
                oz_stored: self.oz_stored,
                oz_stored_per_day: self.oz_stored_per_day,
            },
            today: self.today,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = milkplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let request = args.to_request();
    let today = match request.today {
        Some(d) => d,
        None => milkplan_core::time::today::resolve_today(
            None,
            chrono::Utc::now(),
            settings.utc_offset_minutes,
        )?,
    };
    let plan = match Plan::build(&request, today, settings.max_range_days) {
        Ok(plan) => plan,
        Err(err) => {
            if let Some(input) = err.downcast_ref::<PlanInputError>() {
                tracing::warn!(field = input.field, "plan input rejected");
            } else {
                sentry_anyhow::capture_anyhow(&err);
            }
            return Err(err);
        }
    };

    tracing::info!(
        %today,
        end_date = %plan.end_date,
        days = plan.days.len(),
        json = args.json,
        "plan computed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", report::render(&plan));
    }

    Ok(())
}

fn init_sentry(settings: &milkplan_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

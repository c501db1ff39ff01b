use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use milkplan_core::domain::contract::PlanRequest;
use milkplan_core::domain::error::PlanInputError;
use milkplan_core::domain::plan::Plan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = milkplan_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let state = AppState {
        utc_offset_minutes: settings.utc_offset_minutes,
        max_range_days: settings.max_range_days,
    };

    let app = router(state).layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/plan", post(create_plan))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone)]
struct AppState {
    utc_offset_minutes: Option<i32>,
    max_range_days: i64,
}

#[derive(Debug, Serialize)]
struct ApiError {
    field: Option<&'static str>,
    message: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

async fn create_plan(State(state): State<AppState>, Json(request): Json<PlanRequest>) -> ApiResult<Plan> {
    let today = match request.today {
        Some(d) => d,
        None => resolve_today(&state).map_err(internal_error)?,
    };

    match Plan::build(&request, today, state.max_range_days) {
        Ok(plan) => Ok(Json(plan)),
        Err(err) => match err.downcast_ref::<PlanInputError>() {
            Some(input) => {
                tracing::info!(field = input.field, detail = %input.detail, "plan request rejected");
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiError {
                        field: Some(input.field),
                        message: input.detail.clone(),
                    }),
                ))
            }
            None => Err(internal_error(err)),
        },
    }
}

fn resolve_today(state: &AppState) -> anyhow::Result<NaiveDate> {
    milkplan_core::time::today::resolve_today(None, chrono::Utc::now(), state.utc_offset_minutes)
}

fn internal_error(err: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    sentry_anyhow::capture_anyhow(&err);
    tracing::error!(error = %err, "plan computation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            field: None,
            message: "internal error".to_string(),
        }),
    )
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
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

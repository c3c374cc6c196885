// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use arrival_plan_api::{
    ApiError, GeneratedPlan, InMemoryVoucherRegistry, PlanFailure, PlanResponse,
    PlanTableResponse, generate_job_plan, plan_csv_string, plan_response, plan_table,
    plan_table_response,
};
use arrival_plan_domain::{DisplayLocale, PlanTable};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, Semaphore, SemaphorePermit};
use tracing::{error, info};

/// Arrival Plan Server - answers sanatorium arrival plan jobs over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Number of plans generated at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    max_concurrent_plans: u32,

    /// Default locale for table and CSV captions (en or ru)
    #[arg(long, default_value = "ru")]
    locale: DisplayLocale,
}

/// Application state shared across handlers.
///
/// The voucher registry is held for the whole of a reserving plan request
/// so that two plans for one sanatorium never draw the same numbers.
#[derive(Clone)]
struct AppState {
    /// Highest voucher number issued per sanatorium.
    registry: Arc<Mutex<InMemoryVoucherRegistry>>,
    /// Bounds the number of plans generated at once.
    permits: Arc<Semaphore>,
    /// Locale used when a request does not name one.
    locale: DisplayLocale,
}

impl AppState {
    fn new(max_concurrent_plans: usize, locale: DisplayLocale) -> Self {
        Self {
            registry: Arc::new(Mutex::new(InMemoryVoucherRegistry::new())),
            permits: Arc::new(Semaphore::new(max_concurrent_plans)),
            locale,
        }
    }
}

/// Query parameters accepted by the rendering endpoints.
#[derive(Debug, Deserialize)]
struct RenderQuery {
    /// Caption locale; the server default applies when absent.
    locale: Option<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok` while the server answers.
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<PlanFailure> for HttpError {
    fn from(failure: PlanFailure) -> Self {
        let status: StatusCode = match failure.error {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } | ApiError::EmptyPlan { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: failure.to_string(),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        error!(error = %err, "Rendering failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

fn resolve_locale(app_state: &AppState, query: &RenderQuery) -> Result<DisplayLocale, HttpError> {
    query
        .locale
        .as_deref()
        .map_or(Ok(app_state.locale), DisplayLocale::from_str)
        .map_err(|e| HttpError {
            status: StatusCode::BAD_REQUEST,
            message: e.to_string(),
        })
}

/// Runs one job on the blocking pool against a registry snapshot.
async fn run_job(
    body: Bytes,
    seeds: InMemoryVoucherRegistry,
) -> Result<Result<GeneratedPlan, PlanFailure>, HttpError> {
    tokio::task::spawn_blocking(move || generate_job_plan(&body, &seeds))
        .await
        .map_err(|e| {
            error!(error = %e, "Plan generation task failed");
            HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Plan generation task failed: {e}"),
            }
        })
}

/// Generates the plan for one job.
///
/// With `reserve` set, the registry stays locked from seeding to recording
/// and the plan's highest voucher number is recorded on success. Without
/// it the plan is a preview and the registry is left untouched.
async fn generate(
    app_state: &AppState,
    body: Bytes,
    reserve: bool,
) -> Result<Result<GeneratedPlan, PlanFailure>, HttpError> {
    let _permit: SemaphorePermit<'_> = app_state.permits.acquire().await.map_err(|e| HttpError {
        status: StatusCode::SERVICE_UNAVAILABLE,
        message: format!("Plan worker is not accepting jobs: {e}"),
    })?;

    if !reserve {
        let snapshot: InMemoryVoucherRegistry = app_state.registry.lock().await.clone();
        return run_job(body, snapshot).await;
    }

    let mut registry: MutexGuard<'_, InMemoryVoucherRegistry> = app_state.registry.lock().await;
    let result: Result<GeneratedPlan, PlanFailure> = run_job(body, registry.clone()).await?;
    let issued: Option<(i64, i64, u64)> = result.as_ref().ok().and_then(|plan| {
        plan.last_voucher_number()
            .map(|last| (plan.plan_id, plan.sanatorium_id, last))
    });
    if let Some((plan_id, sanatorium_id, last)) = issued {
        registry.record_issued(sanatorium_id, last);
        info!(
            plan_id = plan_id,
            sanatorium_id = sanatorium_id,
            last_voucher = last,
            "Recorded issued vouchers"
        );
    }
    drop(registry);

    Ok(result)
}

/// Handler for POST `/plans` endpoint.
///
/// Always answers 200 with the success or error payload of the job.
async fn handle_create_plan(
    AxumState(app_state): AxumState<AppState>,
    body: Bytes,
) -> Result<Json<PlanResponse>, HttpError> {
    info!(bytes = body.len(), "Handling plan request");
    let result: Result<GeneratedPlan, PlanFailure> = generate(&app_state, body, true).await?;
    Ok(Json(plan_response(&result)))
}

/// Handler for POST `/plans/table` endpoint.
///
/// Renders the plan of a job without reserving its voucher numbers.
async fn handle_plan_table(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RenderQuery>,
    body: Bytes,
) -> Result<Json<PlanTableResponse>, HttpError> {
    let locale: DisplayLocale = resolve_locale(&app_state, &query)?;
    info!(bytes = body.len(), locale = %locale, "Handling plan table request");

    let plan: GeneratedPlan = generate(&app_state, body, false).await??;
    Ok(Json(plan_table_response(&plan, locale)))
}

/// Handler for POST `/plans/csv` endpoint.
///
/// Exports the rendered plan of a job as CSV without reserving its voucher
/// numbers.
async fn handle_plan_csv(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RenderQuery>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let locale: DisplayLocale = resolve_locale(&app_state, &query)?;
    info!(bytes = body.len(), locale = %locale, "Handling plan CSV request");

    let plan: GeneratedPlan = generate(&app_state, body, false).await??;
    let table: PlanTable = plan_table(&plan, locale);
    let csv: String = plan_csv_string(&table)?;

    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    )
        .into_response())
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/plans", post(handle_create_plan))
        .route("/plans/table", post(handle_plan_table))
        .route("/plans/csv", post(handle_plan_csv))
        .route("/health", get(handle_health))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Arrival Plan Server");

    let max_concurrent_plans: usize = usize::try_from(args.max_concurrent_plans)?;
    let app_state: AppState = AppState::new(max_concurrent_plans, args.locale);
    info!(
        max_concurrent_plans = max_concurrent_plans,
        locale = %args.locale,
        "Plan worker configured"
    );

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

mod session;

pub use session::{Session, SessionStore};

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    DEFAULT_HORIZON_AGE, DashboardReport, ExpenseItem, Expenses, Profile, ProjectionOptions,
    Status, build_dashboard,
};

const MAX_AGE: u32 = 120;
const MAX_HORIZON_AGE: u32 = 150;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be > -100")]
    RateTooLow { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("expense category names must not be empty")]
    EmptyCategory,
    #[error("duplicate expense category {0:?}")]
    DuplicateCategory(String),
    #[error("expense {0:?} must be a finite amount >= 0")]
    InvalidExpense(String),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliStatus {
    Working,
    Retired,
}

impl From<CliStatus> for Status {
    fn from(value: CliStatus) -> Self {
        match value {
            CliStatus::Working => Status::Working,
            CliStatus::Retired => Status::Retired,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg report",
    about = "Retirement projection, savings-rate analysis and growth scenarios for one profile"
)]
struct Cli {
    #[arg(long, default_value_t = 25)]
    age: u32,
    #[arg(long, value_enum, default_value_t = CliStatus::Working)]
    status: CliStatus,
    #[arg(long, default_value_t = 100_000.0, help = "Annual pre-tax income")]
    income: f64,
    #[arg(
        long,
        default_value_t = 3_000.0,
        help = "Monthly Social Security (not used in projections)"
    )]
    social_security: f64,
    #[arg(long, default_value_t = 25_000.0)]
    cash: f64,
    #[arg(long, default_value_t = 1_000_000.0)]
    investments: f64,
    #[arg(long, default_value_t = 0.0)]
    monthly_contributions: f64,
    #[arg(long, default_value_t = 5.0, help = "Expected annual return in percent, e.g. 5")]
    annual_return: f64,
    #[arg(
        long,
        default_value_t = 22.0,
        help = "Tax rate in percent (not used in projections)"
    )]
    tax_rate: f64,
    #[arg(long, default_value_t = 60)]
    retirement_age: u32,
    #[arg(
        long,
        default_value_t = 3_500_000.0,
        help = "Retirement goal in today's money"
    )]
    retirement_goal: f64,
    #[arg(long, default_value_t = 2.5, help = "Annual inflation in percent")]
    inflation: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        help = "Annual salary growth in percent; escalates monthly contributions"
    )]
    salary_growth: f64,
    #[arg(long, default_value_t = DEFAULT_HORIZON_AGE, help = "Last age to project")]
    horizon_age: u32,
    #[arg(long, help = "Floor post-retirement balances at zero")]
    clamp_balance_at_zero: bool,
    #[arg(
        long,
        help = "Extend the horizon to the retirement age when it lies beyond it"
    )]
    extend_horizon: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    age: Option<u32>,
    status: Option<Status>,
    income: Option<f64>,
    social_security: Option<f64>,
    cash: Option<f64>,
    investments: Option<f64>,
    monthly_contributions: Option<f64>,
    annual_return_pct: Option<f64>,
    tax_rate_pct: Option<f64>,
    retirement_age: Option<u32>,
    retirement_goal: Option<f64>,
    inflation_pct: Option<f64>,
    salary_growth_pct: Option<f64>,

    horizon_age: Option<u32>,
    clamp_balance_at_zero: Option<bool>,
    extend_horizon: Option<bool>,

    expenses: Option<Vec<ExpenseItem>>,
}

#[derive(Debug)]
struct ApiRequest {
    profile: Profile,
    expenses: Expenses,
    options: ProjectionOptions,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Checks the ranges the edit forms enforce before a profile reaches the
/// engine.
pub fn validate_profile(profile: &Profile) -> Result<(), ValidationError> {
    if profile.age > MAX_AGE {
        return Err(ValidationError::OutOfRange {
            field: "--age",
            min: 0.0,
            max: f64::from(MAX_AGE),
        });
    }

    if profile.retirement_age > MAX_AGE {
        return Err(ValidationError::OutOfRange {
            field: "--retirement-age",
            min: 0.0,
            max: f64::from(MAX_AGE),
        });
    }

    for (field, amount) in [
        ("--income", Some(profile.income)),
        ("--cash", Some(profile.cash)),
        ("--investments", Some(profile.investments)),
        ("--monthly-contributions", Some(profile.monthly_contributions)),
        ("--retirement-goal", Some(profile.retirement_goal)),
        ("--social-security", profile.social_security),
    ] {
        let Some(amount) = amount else {
            continue;
        };
        if !amount.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if amount < 0.0 {
            return Err(ValidationError::Negative { field });
        }
    }

    for (field, rate) in [
        ("--annual-return", profile.annual_return_pct),
        ("--inflation", profile.inflation_pct),
        ("--salary-growth", profile.salary_growth_pct),
    ] {
        if !rate.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if rate <= -100.0 {
            return Err(ValidationError::RateTooLow { field });
        }
    }

    if let Some(tax_rate) = profile.tax_rate_pct {
        if !(0.0..=100.0).contains(&tax_rate) {
            return Err(ValidationError::OutOfRange {
                field: "--tax-rate",
                min: 0.0,
                max: 100.0,
            });
        }
    }

    Ok(())
}

pub fn validate_expenses(items: Vec<ExpenseItem>) -> Result<Expenses, ValidationError> {
    let mut seen = HashSet::new();
    for item in &items {
        let name = item.category.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if !seen.insert(name) {
            return Err(ValidationError::DuplicateCategory(name.to_string()));
        }
        if !item.monthly_amount.is_finite() || item.monthly_amount < 0.0 {
            return Err(ValidationError::InvalidExpense(name.to_string()));
        }
    }

    Ok(items
        .into_iter()
        .map(|item| (item.category.trim().to_string(), item.monthly_amount))
        .collect())
}

fn validate_options(options: &ProjectionOptions) -> Result<(), ValidationError> {
    if !(1..=MAX_HORIZON_AGE).contains(&options.horizon_age) {
        return Err(ValidationError::OutOfRange {
            field: "--horizon-age",
            min: 1.0,
            max: f64::from(MAX_HORIZON_AGE),
        });
    }
    Ok(())
}

fn build_profile(cli: &Cli) -> Result<(Profile, ProjectionOptions), ValidationError> {
    let profile = Profile {
        age: cli.age,
        status: cli.status.into(),
        income: cli.income,
        cash: cli.cash,
        investments: cli.investments,
        monthly_contributions: cli.monthly_contributions,
        annual_return_pct: cli.annual_return,
        retirement_age: cli.retirement_age,
        retirement_goal: cli.retirement_goal,
        social_security: Some(cli.social_security),
        tax_rate_pct: Some(cli.tax_rate),
        inflation_pct: cli.inflation,
        salary_growth_pct: cli.salary_growth,
    };
    let options = ProjectionOptions {
        horizon_age: cli.horizon_age,
        clamp_balance_at_zero: cli.clamp_balance_at_zero,
        extend_horizon_to_retirement: cli.extend_horizon,
    };

    validate_profile(&profile)?;
    validate_options(&options)?;
    Ok((profile, options))
}

/// Parses report flags (the first item is the program name), builds the
/// dashboard for the default expense list and returns it as pretty JSON.
/// Invalid flags and `--help` exit the process the way clap does.
pub fn run_report_cli<I, T>(args: I) -> Result<String, ReportError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let (profile, options) = build_profile(&cli)?;
    let report = build_dashboard(&profile, &Expenses::session_defaults(), &options);
    Ok(serde_json::to_string_pretty(&report)?)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = router(Arc::new(SessionStore::default()));

    let listener = TcpListener::bind(addr).await?;
    info!("nestegg HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/dashboard");

    axum::serve(listener, app).await
}

fn router(store: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/session", get(session_handler))
        .route("/api/profile", put(replace_profile_handler))
        .route("/api/expenses", put(replace_expenses_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(store)
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn session_handler(State(store): State<Arc<SessionStore>>) -> Response {
    json_response(StatusCode::OK, &*store.snapshot())
}

async fn replace_profile_handler(
    State(store): State<Arc<SessionStore>>,
    Json(profile): Json<Profile>,
) -> Response {
    if let Err(err) = validate_profile(&profile) {
        return error_response(StatusCode::BAD_REQUEST, &err.to_string());
    }
    let session = store.replace_profile(profile);
    json_response(StatusCode::OK, &session.profile)
}

async fn replace_expenses_handler(
    State(store): State<Arc<SessionStore>>,
    Json(items): Json<Vec<ExpenseItem>>,
) -> Response {
    let expenses = match validate_expenses(items) {
        Ok(expenses) => expenses,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };
    let session = store.replace_expenses(expenses);
    json_response(StatusCode::OK, &session.expenses)
}

async fn dashboard_handler(State(store): State<Arc<SessionStore>>) -> Response {
    let session = store.snapshot();
    let report = build_dashboard(
        &session.profile,
        &session.expenses,
        &ProjectionOptions::default(),
    );
    json_response(StatusCode::OK, report)
}

async fn simulate_get_handler(Query(payload): Query<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

async fn simulate_post_handler(Json(payload): Json<SimulatePayload>) -> Response {
    simulate_handler_impl(payload)
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let request = match api_request_from_payload(payload) {
        Ok(request) => request,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, &err.to_string()),
    };
    json_response(StatusCode::OK, simulate(&request))
}

fn simulate(request: &ApiRequest) -> DashboardReport {
    debug!(
        "simulate: age {} retiring at {} over {} expense categories",
        request.profile.age,
        request.profile.retirement_age,
        request.expenses.len()
    );
    build_dashboard(&request.profile, &request.expenses, &request.options)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, String> {
    let payload = serde_json::from_str::<SimulatePayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    api_request_from_payload(payload).map_err(|e| e.to_string())
}

fn api_request_from_payload(payload: SimulatePayload) -> Result<ApiRequest, ValidationError> {
    let mut profile = Profile::default();
    let mut options = ProjectionOptions::default();

    if let Some(v) = payload.age {
        profile.age = v;
    }
    if let Some(v) = payload.status {
        profile.status = v;
    }
    if let Some(v) = payload.income {
        profile.income = v;
    }
    if let Some(v) = payload.social_security {
        profile.social_security = Some(v);
    }
    if let Some(v) = payload.cash {
        profile.cash = v;
    }
    if let Some(v) = payload.investments {
        profile.investments = v;
    }
    if let Some(v) = payload.monthly_contributions {
        profile.monthly_contributions = v;
    }
    if let Some(v) = payload.annual_return_pct {
        profile.annual_return_pct = v;
    }
    if let Some(v) = payload.tax_rate_pct {
        profile.tax_rate_pct = Some(v);
    }
    if let Some(v) = payload.retirement_age {
        profile.retirement_age = v;
    }
    if let Some(v) = payload.retirement_goal {
        profile.retirement_goal = v;
    }
    if let Some(v) = payload.inflation_pct {
        profile.inflation_pct = v;
    }
    if let Some(v) = payload.salary_growth_pct {
        profile.salary_growth_pct = v;
    }

    if let Some(v) = payload.horizon_age {
        options.horizon_age = v;
    }
    if let Some(v) = payload.clamp_balance_at_zero {
        options.clamp_balance_at_zero = v;
    }
    if let Some(v) = payload.extend_horizon {
        options.extend_horizon_to_retirement = v;
    }

    validate_profile(&profile)?;
    validate_options(&options)?;
    let expenses = match payload.expenses {
        Some(items) => validate_expenses(items)?,
        None => Expenses::session_defaults(),
    };

    Ok(ApiRequest {
        profile,
        expenses,
        options,
    })
}

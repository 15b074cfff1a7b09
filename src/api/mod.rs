mod input;

use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::{
    ChartConfig, ChartSpec, ContributionTiming, ProjectionParameters, ProjectionSeries, Scenario,
    build_chart, project_hysa, project_investment,
};
use crate::error::AppError;

pub use input::{RawValue, parse_amount, parse_flag};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliContributionTiming {
    StartOfYear,
    EndOfYear,
}

impl From<CliContributionTiming> for ContributionTiming {
    fn from(value: CliContributionTiming) -> Self {
        match value {
            CliContributionTiming::StartOfYear => ContributionTiming::StartOfYear,
            CliContributionTiming::EndOfYear => ContributionTiming::EndOfYear,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ApiContributionTiming {
    StartOfYear,
    EndOfYear,
}

impl From<ApiContributionTiming> for CliContributionTiming {
    fn from(value: ApiContributionTiming) -> Self {
        match value {
            ApiContributionTiming::StartOfYear => CliContributionTiming::StartOfYear,
            ApiContributionTiming::EndOfYear => CliContributionTiming::EndOfYear,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "projections",
    about = "Savings (HYSA vs bank) and investment (vs inflation) 20-year projections"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the calculator page and JSON API
    Serve(ServeArgs),
    /// Print a HYSA vs bank projection as JSON
    Hysa(HysaArgs),
    /// Print an investment vs inflation projection as JSON
    Investment(InvestmentArgs),
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    #[arg(long, env = "PROJECTIONS_PORT", default_value_t = 8080)]
    port: u16,
}

#[derive(Args, Debug, Clone)]
struct HysaArgs {
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    start_amount: f64,
    #[arg(long, default_value_t = 1200.0, allow_negative_numbers = true)]
    annual_contribution: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        allow_negative_numbers = true,
        help = "Yearly increase of the contribution in percent"
    )]
    step_increase: f64,
    #[arg(
        long,
        default_value_t = 4.5,
        allow_negative_numbers = true,
        help = "HYSA annual rate in percent"
    )]
    rate: f64,
    #[arg(
        long,
        default_value_t = 0.5,
        allow_negative_numbers = true,
        help = "Ordinary bank annual rate in percent"
    )]
    bank_rate: f64,
    #[arg(long, help = "Emit one point per month instead of per year")]
    monthly: bool,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Clone)]
struct InvestmentArgs {
    #[arg(long, default_value_t = 1000.0, allow_negative_numbers = true)]
    start_amount: f64,
    #[arg(long, default_value_t = 6000.0, allow_negative_numbers = true)]
    annual_contribution: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Yearly increase of the contribution in percent"
    )]
    step_increase: f64,
    #[arg(
        long,
        default_value_t = 7.0,
        allow_negative_numbers = true,
        help = "Expected annual return in percent"
    )]
    rate: f64,
    #[arg(
        long,
        default_value_t = 3.0,
        allow_negative_numbers = true,
        help = "Annual inflation in percent"
    )]
    inflation_rate: f64,
    #[arg(long, value_enum, default_value_t = CliContributionTiming::StartOfYear)]
    contribution_timing: CliContributionTiming,
    #[arg(long)]
    pretty: bool,
}

impl HysaArgs {
    fn params(&self) -> ProjectionParameters {
        ProjectionParameters {
            start_amount: self.start_amount,
            annual_contribution: self.annual_contribution,
            contribution_growth_rate: self.step_increase / 100.0,
            primary_rate: self.rate / 100.0,
            secondary_rate: self.bank_rate / 100.0,
            monthly_resolution: self.monthly,
            contribution_timing: ContributionTiming::StartOfYear,
        }
    }
}

impl InvestmentArgs {
    fn params(&self) -> ProjectionParameters {
        ProjectionParameters {
            start_amount: self.start_amount,
            annual_contribution: self.annual_contribution,
            contribution_growth_rate: self.step_increase / 100.0,
            primary_rate: self.rate / 100.0,
            secondary_rate: self.inflation_rate / 100.0,
            monthly_resolution: false,
            contribution_timing: self.contribution_timing.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct HysaPayload {
    start_amount: Option<RawValue>,
    annual_contribution: Option<RawValue>,
    step_increase: Option<RawValue>,
    rate: Option<RawValue>,
    bank_rate: Option<RawValue>,
    monthly_view: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InvestmentPayload {
    start_amount: Option<RawValue>,
    annual_contribution: Option<RawValue>,
    step_increase: Option<RawValue>,
    rate: Option<RawValue>,
    inflation_rate: Option<RawValue>,
    contribution_timing: Option<ApiContributionTiming>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionResponse {
    series: ProjectionSeries,
    chart: ChartSpec,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Serve(args) => run_http_server(&args.host, args.port).await,
        Command::Hysa(args) => {
            let response = build_projection_response(Scenario::Hysa, &args.params());
            print_json(&response, args.pretty)
        }
        Command::Investment(args) => {
            let response = build_projection_response(Scenario::Investment, &args.params());
            print_json(&response, args.pretty)
        }
    }
}

fn print_json<T: Serialize>(body: &T, pretty: bool) -> Result<(), AppError> {
    let json = if pretty {
        serde_json::to_string_pretty(body)?
    } else {
        serde_json::to_string(body)?
    };
    println!("{json}");
    Ok(())
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/health", get(health_handler))
        .route("/api/hysa", get(hysa_get_handler).post(hysa_post_handler))
        .route(
            "/api/investment",
            get(investment_get_handler).post(investment_post_handler),
        )
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_http_server(host: &str, port: u16) -> Result<(), AppError> {
    let raw_addr = format!("{host}:{port}");
    let addr: SocketAddr = raw_addr.parse().map_err(|source| AppError::Address {
        addr: raw_addr.clone(),
        source,
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: raw_addr,
            source,
        })?;
    tracing::info!(%addr, "projection API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await.map_err(AppError::Serve)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn hysa_get_handler(Query(payload): Query<HysaPayload>) -> Response {
    hysa_handler_impl(payload)
}

async fn hysa_post_handler(Json(payload): Json<HysaPayload>) -> Response {
    hysa_handler_impl(payload)
}

async fn investment_get_handler(Query(payload): Query<InvestmentPayload>) -> Response {
    investment_handler_impl(payload)
}

async fn investment_post_handler(Json(payload): Json<InvestmentPayload>) -> Response {
    investment_handler_impl(payload)
}

fn hysa_handler_impl(payload: HysaPayload) -> Response {
    let params = hysa_params_from_payload(payload);
    tracing::debug!(?params, "hysa projection requested");
    json_response(
        StatusCode::OK,
        build_projection_response(Scenario::Hysa, &params),
    )
}

fn investment_handler_impl(payload: InvestmentPayload) -> Response {
    let params = investment_params_from_payload(payload);
    tracing::debug!(?params, "investment projection requested");
    json_response(
        StatusCode::OK,
        build_projection_response(Scenario::Investment, &params),
    )
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn hysa_params_from_payload(payload: HysaPayload) -> ProjectionParameters {
    let mut args = default_hysa_args();

    if let Some(v) = payload.start_amount {
        args.start_amount = v.amount();
    }
    if let Some(v) = payload.annual_contribution {
        args.annual_contribution = v.amount();
    }
    if let Some(v) = payload.step_increase {
        args.step_increase = v.amount();
    }
    if let Some(v) = payload.rate {
        args.rate = v.amount();
    }
    if let Some(v) = payload.bank_rate {
        args.bank_rate = v.amount();
    }
    if let Some(v) = payload.monthly_view {
        args.monthly = v.flag();
    }

    args.params()
}

fn investment_params_from_payload(payload: InvestmentPayload) -> ProjectionParameters {
    let mut args = default_investment_args();

    if let Some(v) = payload.start_amount {
        args.start_amount = v.amount();
    }
    if let Some(v) = payload.annual_contribution {
        args.annual_contribution = v.amount();
    }
    if let Some(v) = payload.step_increase {
        args.step_increase = v.amount();
    }
    if let Some(v) = payload.rate {
        args.rate = v.amount();
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v.amount();
    }
    if let Some(v) = payload.contribution_timing {
        args.contribution_timing = v.into();
    }

    args.params()
}

fn default_hysa_args() -> HysaArgs {
    HysaArgs {
        start_amount: 1_000.0,
        annual_contribution: 1_200.0,
        step_increase: 0.0,
        rate: 4.5,
        bank_rate: 0.5,
        monthly: false,
        pretty: false,
    }
}

fn default_investment_args() -> InvestmentArgs {
    InvestmentArgs {
        start_amount: 1_000.0,
        annual_contribution: 6_000.0,
        step_increase: 3.0,
        rate: 7.0,
        inflation_rate: 3.0,
        contribution_timing: CliContributionTiming::StartOfYear,
        pretty: false,
    }
}

fn build_projection_response(
    scenario: Scenario,
    params: &ProjectionParameters,
) -> ProjectionResponse {
    let series = match scenario {
        Scenario::Hysa => project_hysa(params),
        Scenario::Investment => project_investment(params),
    };
    let chart = build_chart(&ChartConfig::for_scenario(scenario), &series);
    ProjectionResponse { series, chart }
}

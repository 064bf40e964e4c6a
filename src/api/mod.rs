use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{CompoundingFrequency, Inputs, Projection, run_projection};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Annual,
    Quarterly,
    Monthly,
}

impl From<CliFrequency> for CompoundingFrequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Annual => CompoundingFrequency::Annual,
            CliFrequency::Quarterly => CompoundingFrequency::Quarterly,
            CliFrequency::Monthly => CompoundingFrequency::Monthly,
        }
    }
}

/// Wire payload for `/api/project`. Every field is optional; missing amounts
/// and rate fall back to 0, missing frequency to monthly capitalization.
/// The frequency travels as times-per-year (1, 4, or 12), matching the
/// web form's select values.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    #[serde(alias = "initialInvestment", alias = "initial_amount")]
    initial_amount: Option<f64>,
    #[serde(alias = "monthly_contribution")]
    monthly_contribution: Option<f64>,
    years: Option<u32>,
    #[serde(alias = "interestRate", alias = "annual_rate")]
    annual_rate: Option<f64>,
    frequency: Option<u32>,
}

#[derive(Parser, Debug)]
#[command(
    name = "compound",
    about = "Compound-growth projector: yearly invested/interest/total series with periodic capitalization"
)]
pub struct Cli {
    #[arg(long, default_value_t = 10_000_000.0, help = "Principal at time zero")]
    initial_amount: f64,
    #[arg(
        long,
        default_value_t = 1_000_000.0,
        help = "Amount added at the end of every month"
    )]
    monthly_contribution: f64,
    #[arg(long, default_value_t = 10, help = "Whole years to simulate")]
    years: u32,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Nominal annual interest rate in percent, e.g. 7"
    )]
    annual_rate: f64,
    #[arg(
        long,
        value_enum,
        default_value_t = CliFrequency::Monthly,
        help = "How often accrued interest is capitalized"
    )]
    frequency: CliFrequency,
    #[arg(long, help = "Print the projection as JSON instead of a table")]
    json: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn inputs_from_payload(payload: ProjectPayload) -> Result<Inputs, String> {
    let frequency = match payload.frequency {
        None => CompoundingFrequency::Monthly,
        Some(times) => CompoundingFrequency::from_times_per_year(times).map_err(|e| e.to_string())?,
    };

    Ok(Inputs {
        initial_amount: payload.initial_amount.unwrap_or(0.0),
        monthly_contribution: payload.monthly_contribution.unwrap_or(0.0),
        years: payload.years.unwrap_or(0),
        annual_rate_percent: payload.annual_rate.unwrap_or(0.0),
        frequency,
    })
}

fn inputs_from_cli(cli: &Cli) -> Inputs {
    Inputs {
        initial_amount: cli.initial_amount,
        monthly_contribution: cli.monthly_contribution,
        years: cli.years,
        annual_rate_percent: cli.annual_rate,
        frequency: cli.frequency.into(),
    }
}

pub fn run_cli_projection(cli: &Cli) -> Result<(), String> {
    let inputs = inputs_from_cli(cli);
    let projection = run_projection(&inputs).map_err(|e| e.to_string())?;

    if cli.json {
        let body = serde_json::to_string_pretty(&projection)
            .map_err(|e| format!("failed to serialize projection: {e}"))?;
        println!("{body}");
        return Ok(());
    }

    print_projection_table(&projection);
    Ok(())
}

fn print_projection_table(projection: &Projection) {
    println!(
        "{:>4}  {:>18}  {:>18}  {:>18}",
        "year", "invested", "interest", "total"
    );
    for point in &projection.series {
        println!(
            "{:>4}  {:>18.2}  {:>18.2}  {:>18.2}",
            point.year, point.invested, point.interest, point.total
        );
    }
    println!();
    println!("total invested:  {:.2}", projection.summary.total_invested);
    println!("total interest:  {:.2}", projection.summary.total_interest);
    println!("final value:     {:.2}", projection.summary.total_value);
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    log::info!("compound HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await
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

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_post_handler(Json(payload): Json<ProjectPayload>) -> Response {
    project_handler_impl(payload).await
}

async fn project_handler_impl(payload: ProjectPayload) -> Response {
    let inputs = match inputs_from_payload(payload) {
        Ok(inputs) => inputs,
        Err(msg) => {
            log::warn!("rejected projection request: {msg}");
            return error_response(StatusCode::BAD_REQUEST, &msg);
        }
    };

    match run_projection(&inputs) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(e) => {
            log::warn!("rejected projection request: {e}");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
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
fn inputs_from_json(json: &str) -> Result<Inputs, String> {
    let payload = serde_json::from_str::<ProjectPayload>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))?;
    inputs_from_payload(payload)
}

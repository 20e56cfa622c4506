use axum::{
    Json, Router,
    extract::Multipart,
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::benchmarks::{BENCHMARKS, BenchmarkRow};
use crate::calculator::{
    self, ChartPoint, FinancialInput, FinancialTable, ProfitabilityResult, Totals,
};
use crate::error::CalcError;
use crate::export;
use crate::graph::{self, GraphOptions};
use crate::loader;

/// Three totals posted by the manual-entry form.
#[derive(Deserialize)]
pub struct ManualEntry {
    revenue: f64,
    expenses: f64,
    billable_hours: f64,
}

/// Everything the page needs to render one result: the totals, the derived
/// metrics, the chart series, and the fixed benchmark table.
#[derive(Serialize)]
struct CalcResponse {
    status: &'static str,
    totals: Totals,
    result: ProfitabilityResult,
    chart: [ChartPoint; 3],
    benchmarks: &'static [BenchmarkRow],
    /// Echo of the parsed upload so the page can preview it. Absent for
    /// manual entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    preview: Option<FinancialTable>,
}

impl CalcResponse {
    fn new(totals: Totals, result: ProfitabilityResult, preview: Option<FinancialTable>) -> Self {
        Self {
            status: "ok",
            totals,
            result,
            chart: calculator::chart_series(&totals, &result),
            benchmarks: &BENCHMARKS,
            preview,
        }
    }
}

pub async fn run(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Build the application router. Handlers are stateless: every request
/// carries its own input and each response is computed fresh, so nothing is
/// shared or cached across users.
pub fn router() -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/upload", post(upload_csv))
        .route("/api/manual", post(manual_entry))
        .route("/api/chart", post(render_chart))
        .route("/api/benchmarks", get(list_benchmarks))
        .route("/api/export/xlsx", post(export_xlsx))
        .route("/api/export/csv", post(export_csv))
        .route("/api/export/report", post(export_report))
}

async fn serve_index() -> Html<&'static str> {
    Html(include_str!("static/index.html"))
}

/// Tabular path: multipart CSV upload, aggregated by column sum.
async fn upload_csv(mut multipart: Multipart) -> Result<Json<CalcResponse>, CalcError> {
    let mut data = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CalcError::Upload(e.to_string()))?
    {
        if field.name() == Some("file") {
            data = field
                .bytes()
                .await
                .map_err(|e| CalcError::Upload(e.to_string()))?
                .to_vec();
        }
    }

    if data.is_empty() {
        return Err(CalcError::EmptyUpload);
    }

    let table = loader::table_from_csv(&data)?;
    let input = FinancialInput::Tabular(table.clone());
    let (totals, result) = calculator::evaluate(&input)?;

    log::info!(
        "computed metrics from upload: {} rows, {} billable hours",
        table.records.len(),
        totals.billable_hours
    );

    Ok(Json(CalcResponse::new(totals, result, Some(table))))
}

/// Scalar path: three totals entered directly, no aggregation.
async fn manual_entry(Json(entry): Json<ManualEntry>) -> Result<Json<CalcResponse>, CalcError> {
    let input = FinancialInput::Scalar {
        revenue: entry.revenue,
        expenses: entry.expenses,
        billable_hours: entry.billable_hours,
    };
    let (totals, result) = calculator::evaluate(&input)?;

    log::info!(
        "computed metrics from manual entry: {} billable hours",
        totals.billable_hours
    );

    Ok(Json(CalcResponse::new(totals, result, None)))
}

/// Render the Revenue / Expenses / Net Profit bar chart for the posted
/// totals as a PNG.
async fn render_chart(Json(totals): Json<Totals>) -> Result<impl IntoResponse, CalcError> {
    let result = calculator::compute(totals)?;
    let series = calculator::chart_series(&totals, &result);
    let png = graph::render_bar_chart(&series, &GraphOptions::default())?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

async fn list_benchmarks() -> Json<&'static [BenchmarkRow]> {
    Json(&BENCHMARKS[..])
}

/// Export handlers receive the current totals back from the page and derive
/// the six report quantities server-side. Totals from an upload may be
/// negative, so they are taken as aggregates and only re-checked for the
/// divisor.
async fn export_xlsx(Json(totals): Json<Totals>) -> Result<impl IntoResponse, CalcError> {
    let result = calculator::compute(totals)?;
    let buffer = export::to_xlsx(&totals, &result)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"net_profit_report.xlsx\"",
            ),
        ],
        buffer,
    ))
}

async fn export_csv(Json(totals): Json<Totals>) -> Result<impl IntoResponse, CalcError> {
    let result = calculator::compute(totals)?;
    let csv = export::to_csv(&totals, &result);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"net_profit_report.csv\"",
            ),
        ],
        csv,
    ))
}

async fn export_report(Json(totals): Json<Totals>) -> Result<impl IntoResponse, CalcError> {
    let result = calculator::compute(totals)?;
    let report = export::to_html_report(&totals, &result);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"net_profit_report.html\"",
            ),
        ],
        report,
    ))
}

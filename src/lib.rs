/*!
# Net Profit per Billable Hour Calculator

A single-page web calculator that turns financial totals into profitability
metrics, built in Rust.

## Overview

The user either uploads a CSV with `Revenue`, `Expenses`, and
`Billable Hours` columns or types the three totals manually. The server
validates the input, aggregates the table by column sum, derives three
metrics, and returns them together with a bar chart and a fixed industry
benchmark table. Results can be downloaded as an Excel workbook, a CSV
report, or an HTML report document.

## Architecture

The application follows a request/response architecture with no server-side
state:

### Frontend Layer
- **Technologies**: HTML, CSS, JavaScript (single page, served inline)
- **Key Components**:
  - Upload form and manual-entry fields
  - Metric displays with currency formatting
  - Bar chart image and benchmark reference table
  - Export buttons

### Backend Layer
- **Technologies**: Rust, axum
- **Core Components**:
  - Input boundary - Resolves upload vs. manual entry into one tagged input
  - Calculator - Validates, aggregates, and computes the derived metrics
  - Chart Renderer - Draws the Revenue/Expenses/Net Profit bar chart
  - Exporters - XLSX, CSV, and HTML report generation
  - Error Handler - Maps user-correctable conditions to HTTP responses

### Derived metrics

- `net_profit = revenue - expenses`
- `net_profit_per_hour = net_profit / billable_hours`
- `effective_rate = revenue / billable_hours`

The division metrics are only defined for `billable_hours > 0`; anything
else is reported back to the user as a correctable condition rather than a
failure of the session.

## Modules

- **calculator**: Core types and the validate/aggregate/compute pipeline
- **loader**: CSV upload parsing
- **benchmarks**: Fixed industry reference table
- **graph**: Bar chart generation
- **export**: XLSX/CSV/HTML report generation
- **error**: Error taxonomy and HTTP mapping
- **app**: Routing and handlers

## REST API Endpoints

- `GET /` - The calculator page
- `POST /api/upload` - Multipart CSV upload, returns metrics + chart series
- `POST /api/manual` - Three totals as JSON, returns metrics + chart series
- `POST /api/chart` - Totals as JSON, returns the bar chart PNG
- `GET /api/benchmarks` - The fixed benchmark table
- `POST /api/export/{xlsx,csv,report}` - Downloadable reports
*/

pub mod app;
pub mod benchmarks;
pub mod calculator;
pub mod error;
pub mod export;
pub mod graph;
pub mod loader;

pub use benchmarks::{BENCHMARKS, BenchmarkRow};
pub use calculator::{
    ChartPoint, FinancialInput, FinancialTable, ProfitabilityResult, REQUIRED_COLUMNS, Totals,
    aggregate, chart_series, compute, evaluate, validate,
};
pub use error::CalcError;

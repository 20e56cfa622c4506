use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Error taxonomy for the calculator pipeline and its web boundary.
///
/// The first group are user-correctable input problems: none of them is fatal
/// to the server, each requires new input from the user. The second group
/// wraps failures in the export/chart collaborators.
#[derive(Error, Debug)]
pub enum CalcError {
    /// A required column is absent from the uploaded table. The message
    /// names the full required set, matching what the upload page tells
    /// the user up front.
    #[error(
        "CSV must include columns: Revenue, Expenses, Billable Hours (missing: {})",
        .0.join(", ")
    )]
    MissingColumns(Vec<String>),

    /// A cell in a required column did not parse as a number. Silently
    /// coercing it to zero would corrupt the column sum, so aggregation
    /// stops and names the offending cell instead.
    #[error("row {row}: column \"{column}\" has non-numeric value \"{value}\"")]
    MalformedValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Billable hours is a divisor, so zero is just as invalid as negative.
    #[error("Billable hours must be greater than 0 to calculate profit per hour.")]
    InsufficientHours { hours: f64 },

    /// Manual entry fields must each be non-negative.
    #[error("{field} must be a non-negative number (got {value})")]
    NegativeInput { field: &'static str, value: f64 },

    /// Neither an upload nor manual entry was supplied.
    #[error("Upload a CSV or enter your totals manually.")]
    NoInput,

    #[error("uploaded file contained no data")]
    EmptyUpload,

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel generation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

pub type Result<T> = std::result::Result<T, CalcError>;

impl IntoResponse for CalcError {
    fn into_response(self) -> Response {
        let status = match &self {
            CalcError::MissingColumns(_)
            | CalcError::MalformedValue { .. }
            | CalcError::InsufficientHours { .. }
            | CalcError::NegativeInput { .. }
            | CalcError::NoInput => StatusCode::UNPROCESSABLE_ENTITY,
            CalcError::EmptyUpload | CalcError::Upload(_) | CalcError::Csv(_) => {
                StatusCode::BAD_REQUEST
            }
            CalcError::Io(_) | CalcError::Xlsx(_) | CalcError::Chart(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            log::error!("{self}");
        } else {
            log::warn!("{self}");
        }

        let body = Json(serde_json::json!({
            "status": "error",
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

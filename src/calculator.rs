use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Column names a tabular upload must carry. Any additional columns are
/// ignored during aggregation.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Revenue", "Expenses", "Billable Hours"];

/// A parsed tabular upload: header row plus raw string records.
///
/// Cells stay as text until aggregation so that a non-numeric value in a
/// required column can be reported with its row and column instead of being
/// coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// The two ways the user can supply data, resolved once at the input
/// boundary. Exactly one form is active per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinancialInput {
    /// An uploaded table aggregated by column sum.
    Tabular(FinancialTable),
    /// Three totals entered directly.
    Scalar {
        revenue: f64,
        expenses: f64,
        billable_hours: f64,
    },
    /// Neither form was supplied.
    Absent,
}

/// The three column sums (or direct scalars) the metrics derive from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub revenue: f64,
    pub expenses: f64,
    pub billable_hours: f64,
}

/// Derived metrics. Recomputed fresh on every invocation, never cached.
/// Defined only when `billable_hours > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityResult {
    pub net_profit: f64,
    pub net_profit_per_hour: f64,
    pub effective_rate: f64,
}

/// One labeled bar of the chart series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartPoint {
    pub label: &'static str,
    pub value: f64,
}

/// Check an input before any computation runs.
///
/// Tabular inputs must carry every required column; scalar inputs must be
/// non-negative in every field. Validation errors short-circuit the
/// pipeline, so aggregation and computation never see a structurally
/// invalid input.
pub fn validate(input: &FinancialInput) -> Result<(), CalcError> {
    match input {
        FinancialInput::Tabular(table) => {
            let missing: Vec<String> = REQUIRED_COLUMNS
                .iter()
                .filter(|required| !table.headers.iter().any(|h| h.trim() == **required))
                .map(|required| required.to_string())
                .collect();

            if missing.is_empty() {
                Ok(())
            } else {
                Err(CalcError::MissingColumns(missing))
            }
        }
        FinancialInput::Scalar {
            revenue,
            expenses,
            billable_hours,
        } => {
            for (field, value) in [
                ("Total Revenue", *revenue),
                ("Total Expenses", *expenses),
                ("Total Billable Hours", *billable_hours),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(CalcError::NegativeInput { field, value });
                }
            }
            Ok(())
        }
        FinancialInput::Absent => Err(CalcError::NoInput),
    }
}

/// Reduce an input to its three totals.
///
/// Tabular inputs sum each required column independently; the sums are
/// order-independent and are not clamped, so negative source data yields
/// negative totals. A cell that does not parse as a finite number fails
/// with [`CalcError::MalformedValue`] rather than being dropped or zeroed.
/// Scalar inputs pass through unchanged.
pub fn aggregate(input: &FinancialInput) -> Result<Totals, CalcError> {
    match input {
        FinancialInput::Tabular(table) => {
            let mut sums = [0.0_f64; 3];

            for (slot, column) in REQUIRED_COLUMNS.iter().enumerate() {
                let index = table
                    .headers
                    .iter()
                    .position(|h| h.trim() == *column)
                    .ok_or_else(|| CalcError::MissingColumns(vec![column.to_string()]))?;

                for (row, record) in table.records.iter().enumerate() {
                    let cell = record.get(index).map(String::as_str).unwrap_or("");
                    let parsed = cell.trim().parse::<f64>().ok().filter(|v| v.is_finite());

                    match parsed {
                        Some(value) => sums[slot] += value,
                        None => {
                            return Err(CalcError::MalformedValue {
                                // 1-based, counting the header as row 1
                                row: row + 2,
                                column: column.to_string(),
                                value: cell.to_string(),
                            });
                        }
                    }
                }
            }

            Ok(Totals {
                revenue: sums[0],
                expenses: sums[1],
                billable_hours: sums[2],
            })
        }
        FinancialInput::Scalar {
            revenue,
            expenses,
            billable_hours,
        } => Ok(Totals {
            revenue: *revenue,
            expenses: *expenses,
            billable_hours: *billable_hours,
        }),
        FinancialInput::Absent => Err(CalcError::NoInput),
    }
}

/// Derive the three profitability metrics from the totals.
///
/// Billable hours is the divisor for two of the metrics, so anything not
/// strictly positive fails with [`CalcError::InsufficientHours`]. Past that
/// guard the computation is pure arithmetic and cannot fail.
pub fn compute(totals: Totals) -> Result<ProfitabilityResult, CalcError> {
    if !(totals.billable_hours > 0.0) {
        return Err(CalcError::InsufficientHours {
            hours: totals.billable_hours,
        });
    }

    let net_profit = totals.revenue - totals.expenses;

    Ok(ProfitabilityResult {
        net_profit,
        net_profit_per_hour: net_profit / totals.billable_hours,
        effective_rate: totals.revenue / totals.billable_hours,
    })
}

/// The fixed 3-element series the bar chart renders, always in the order
/// Revenue, Expenses, Net Profit.
pub fn chart_series(totals: &Totals, result: &ProfitabilityResult) -> [ChartPoint; 3] {
    [
        ChartPoint {
            label: "Revenue",
            value: totals.revenue,
        },
        ChartPoint {
            label: "Expenses",
            value: totals.expenses,
        },
        ChartPoint {
            label: "Net Profit",
            value: result.net_profit,
        },
    ]
}

/// Run the full pipeline: validate, aggregate, compute.
pub fn evaluate(input: &FinancialInput) -> Result<(Totals, ProfitabilityResult), CalcError> {
    validate(input)?;
    let totals = aggregate(input)?;
    let result = compute(totals)?;
    Ok((totals, result))
}

use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::calculator::{ProfitabilityResult, Totals};
use crate::error::CalcError;

/// The six named quantities every export format carries, in report order.
pub fn report_rows(totals: &Totals, result: &ProfitabilityResult) -> [(&'static str, f64); 6] {
    [
        ("Total Revenue", totals.revenue),
        ("Total Expenses", totals.expenses),
        ("Net Profit", result.net_profit),
        ("Billable Hours", totals.billable_hours),
        ("Net Profit per Billable Hour", result.net_profit_per_hour),
        ("Effective Hourly Rate (Revenue)", result.effective_rate),
    ]
}

/// Format a value as currency: `$` + thousands separators + 2 decimals.
/// Presentation only; computed metrics are never rounded at the source.
pub fn format_currency(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    if value < 0.0 {
        format!("-${int_grouped}.{frac_part}")
    } else {
        format!("${int_grouped}.{frac_part}")
    }
}

/// Build the Excel report as a two-column Metric/Value sheet.
///
/// The workbook is written to a named temporary file and read back; the
/// guard removes the file when it drops, including on the error paths, so
/// no artifact outlives the download.
pub fn to_xlsx(totals: &Totals, result: &ProfitabilityResult) -> Result<Vec<u8>, CalcError> {
    let mut workbook = Workbook::new();
    let mut worksheet = Worksheet::new();

    worksheet.write_string(0, 0, "Metric")?;
    worksheet.write_string(0, 1, "Value")?;

    for (i, (label, value)) in report_rows(totals, result).iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, *label)?;
        worksheet.write_number(row, 1, *value)?;
    }

    worksheet.set_column_width(0, 34.0)?;
    workbook.push_worksheet(worksheet);

    let tmp = tempfile::Builder::new()
        .prefix("net_profit_report-")
        .suffix(".xlsx")
        .tempfile()?;
    workbook.save(tmp.path())?;

    let buffer = std::fs::read(tmp.path())?;
    Ok(buffer)
}

/// Build the CSV report with the same Metric/Value rows as the Excel export.
/// Values are raw numbers, not currency strings, so the file round-trips
/// into other tools.
pub fn to_csv(totals: &Totals, result: &ProfitabilityResult) -> String {
    let mut out = String::from("Metric,Value\n");
    for (label, value) in report_rows(totals, result) {
        out.push_str(&format!("{label},{value}\n"));
    }
    out
}

/// Render the downloadable HTML report document.
pub fn to_html_report(totals: &Totals, result: &ProfitabilityResult) -> String {
    let generated = Local::now().format("%Y-%m-%d %H:%M");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Net Profit Report</title>
</head>
<body>
<h2>Net Profit Report</h2>
<p><strong>Total Revenue:</strong> {revenue}</p>
<p><strong>Total Expenses:</strong> {expenses}</p>
<p><strong>Net Profit:</strong> {net_profit}</p>
<p><strong>Billable Hours:</strong> {hours}</p>
<p><strong>Net Profit per Billable Hour:</strong> {per_hour}</p>
<p><strong>Effective Hourly Rate (Revenue):</strong> {rate}</p>
<p><em>Generated {generated}</em></p>
</body>
</html>
"#,
        revenue = format_currency(totals.revenue),
        expenses = format_currency(totals.expenses),
        net_profit = format_currency(result.net_profit),
        hours = totals.billable_hours,
        per_hour = format_currency(result.net_profit_per_hour),
        rate = format_currency(result.effective_rate),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;

    fn sample() -> (Totals, ProfitabilityResult) {
        let totals = Totals {
            revenue: 1500.0,
            expenses: 500.0,
            billable_hours: 15.0,
        };
        let result = compute(totals).unwrap();
        (totals, result)
    }

    #[test]
    fn report_rows_are_in_fixed_order() {
        let (totals, result) = sample();
        let labels: Vec<&str> = report_rows(&totals, &result)
            .iter()
            .map(|(label, _)| *label)
            .collect();

        assert_eq!(
            labels,
            [
                "Total Revenue",
                "Total Expenses",
                "Net Profit",
                "Billable Hours",
                "Net Profit per Billable Hour",
                "Effective Hourly Rate (Revenue)",
            ]
        );
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(100.0), "$100.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-2500.5), "-$2,500.50");
        assert_eq!(format_currency(66.666_666), "$66.67");
    }

    #[test]
    fn xlsx_buffer_is_a_zip_archive() {
        let (totals, result) = sample();
        let buffer = to_xlsx(&totals, &result).unwrap();
        // XLSX is a ZIP container
        assert_eq!(&buffer[..4], b"PK\x03\x04");
    }

    #[test]
    fn csv_report_has_header_and_six_rows() {
        let (totals, result) = sample();
        let csv = to_csv(&totals, &result);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Metric,Value");
        assert_eq!(lines[3], "Net Profit,1000");
    }

    #[test]
    fn html_report_formats_all_quantities() {
        let (totals, result) = sample();
        let html = to_html_report(&totals, &result);

        assert!(html.contains("Net Profit Report"));
        assert!(html.contains("Total Revenue:</strong> $1,500.00"));
        assert!(html.contains("Billable Hours:</strong> 15"));
        assert!(html.contains("Net Profit per Billable Hour:</strong> $66.67"));
        assert!(html.contains("Effective Hourly Rate (Revenue):</strong> $100.00"));
    }
}

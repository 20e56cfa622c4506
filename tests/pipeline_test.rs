//! End-to-end tests of the calculator pipeline: CSV bytes through
//! validation, aggregation, computation, and the export formats.

use profitcalc::{CalcError, FinancialInput, Totals, evaluate, export, loader};

const SAMPLE_CSV: &[u8] = b"Revenue,Expenses,Billable Hours\n1000,400,10\n500,100,5\n";

#[test]
fn csv_upload_to_metrics() {
    let table = loader::table_from_csv(SAMPLE_CSV).unwrap();
    let (totals, result) = evaluate(&FinancialInput::Tabular(table)).unwrap();

    assert_eq!(totals.revenue, 1500.0);
    assert_eq!(totals.expenses, 500.0);
    assert_eq!(totals.billable_hours, 15.0);
    assert_eq!(result.net_profit, 1000.0);
    assert!((result.net_profit_per_hour - 66.666_666_666_666_67).abs() < 1e-9);
    assert_eq!(result.effective_rate, 100.0);
}

#[test]
fn row_order_does_not_change_metrics() {
    let permuted: &[u8] = b"Revenue,Expenses,Billable Hours\n500,100,5\n1000,400,10\n";

    let a = evaluate(&FinancialInput::Tabular(
        loader::table_from_csv(SAMPLE_CSV).unwrap(),
    ))
    .unwrap();
    let b = evaluate(&FinancialInput::Tabular(
        loader::table_from_csv(permuted).unwrap(),
    ))
    .unwrap();

    assert_eq!(a, b);
}

#[test]
fn reordered_columns_are_matched_by_name() {
    let csv: &[u8] = b"Billable Hours,Revenue,Expenses\n10,1000,400\n5,500,100\n";
    let (totals, _) = evaluate(&FinancialInput::Tabular(
        loader::table_from_csv(csv).unwrap(),
    ))
    .unwrap();

    assert_eq!(totals.revenue, 1500.0);
    assert_eq!(totals.billable_hours, 15.0);
}

#[test]
fn upload_missing_a_column_is_rejected_with_the_required_set() {
    let csv: &[u8] = b"Revenue,Hours\n1000,10\n";
    let table = loader::table_from_csv(csv).unwrap();

    let err = evaluate(&FinancialInput::Tabular(table)).unwrap_err();
    assert!(matches!(err, CalcError::MissingColumns(_)));
    assert!(
        err.to_string()
            .contains("Revenue, Expenses, Billable Hours")
    );
}

#[test]
fn upload_with_text_cell_fails_instead_of_summing() {
    let csv: &[u8] = b"Revenue,Expenses,Billable Hours\n1000,400,10\nabc,100,5\n";
    let table = loader::table_from_csv(csv).unwrap();

    assert!(matches!(
        evaluate(&FinancialInput::Tabular(table)),
        Err(CalcError::MalformedValue { row: 3, .. })
    ));
}

#[test]
fn all_zero_manual_entry_reports_insufficient_hours() {
    let input = FinancialInput::Scalar {
        revenue: 0.0,
        expenses: 0.0,
        billable_hours: 0.0,
    };
    assert!(matches!(
        evaluate(&input),
        Err(CalcError::InsufficientHours { .. })
    ));
}

#[test]
fn exports_cover_all_six_quantities() {
    let table = loader::table_from_csv(SAMPLE_CSV).unwrap();
    let (totals, result) = evaluate(&FinancialInput::Tabular(table)).unwrap();

    let csv = export::to_csv(&totals, &result);
    let html = export::to_html_report(&totals, &result);
    for (label, _) in export::report_rows(&totals, &result) {
        assert!(csv.contains(label), "CSV report missing {label}");
        assert!(html.contains(label), "HTML report missing {label}");
    }

    let xlsx = export::to_xlsx(&totals, &result).unwrap();
    assert_eq!(&xlsx[..2], b"PK");
}

#[test]
fn export_totals_with_zero_hours_are_rejected() {
    let totals = Totals {
        revenue: 100.0,
        expenses: 50.0,
        billable_hours: 0.0,
    };
    assert!(matches!(
        profitcalc::compute(totals),
        Err(CalcError::InsufficientHours { .. })
    ));
}

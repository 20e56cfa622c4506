use csv::{ReaderBuilder, Trim};

use crate::calculator::FinancialTable;
use crate::error::CalcError;

/// Parse an uploaded CSV into a [`FinancialTable`].
///
/// The first record is taken as the header row; every following record is
/// kept verbatim as strings. Ragged rows are accepted here; a short row
/// only becomes an error later, when aggregation finds an empty cell in a
/// required column. Column presence is checked by `validate`, not here.
pub fn table_from_csv(bytes: &[u8]) -> Result<FinancialTable, CalcError> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(CalcError::EmptyUpload);
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(FinancialTable { headers, records })
}

use std::collections::HashMap;

use tracing::debug;

use crate::dataset::{Dataset, TransactionRecord};
use crate::{ClientError, ClientResult};

pub const REQUIRED_HEADERS: [&str; 7] = [
    "Transaction Id",
    "Plate #",
    "Long Description",
    "Fuel Qty",
    "ODO Diff",
    "Overconsumption %",
    "Overconsumption Liter",
];

pub const OPTIONAL_HEADERS: [&str; 1] = ["Txn FCU"];

const TRANSACTION_QUANTITY_HEADER: &str = "Txn FCU";
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

struct HeaderIndex {
    index_by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    fn position(&self, header: &str) -> Option<usize> {
        self.index_by_name.get(header).copied()
    }
}

/// Parses raw bytes so encoding problems surface per row as schema errors.
/// Rows may be short or long; a missing cell reads as empty.
pub fn parse_dataset(content: &[u8], delimiter: u8, source_label: &str) -> ClientResult<Dataset> {
    let body = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ClientError::malformed_source("Dataset source is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(body);

    let headers = reader
        .headers()
        .map_err(|_| ClientError::malformed_source("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::schema_mismatch(
            owned(&REQUIRED_HEADERS),
            owned(&OPTIONAL_HEADERS),
            headers,
        ));
    }

    let index = HeaderIndex {
        index_by_name: headers
            .iter()
            .enumerate()
            .map(|(position, name)| (name.to_string(), position))
            .collect::<HashMap<String, usize>>(),
    };
    let has_transaction_quantity = index.position(TRANSACTION_QUANTITY_HEADER).is_some();

    let mut records = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let row = row_index + 1;
        let record = result_row.map_err(|error| {
            ClientError::malformed_source(&format!(
                "CSV row {row} is malformed or not UTF-8: {error}"
            ))
        })?;
        records.push(parse_record(&record, &index, row)?);
    }

    debug!(
        source = source_label,
        rows = records.len(),
        has_transaction_quantity,
        "parsed dataset"
    );

    Ok(Dataset::new(records, source_label, has_transaction_quantity))
}

fn parse_record(
    record: &csv::StringRecord,
    index: &HeaderIndex,
    row: usize,
) -> ClientResult<TransactionRecord> {
    Ok(TransactionRecord {
        transaction_id: required_text(record, index, row, "Transaction Id")?,
        plate: required_text(record, index, row, "Plate #")?,
        category: required_text(record, index, row, "Long Description")?,
        fuel_quantity: required_number(record, index, row, "Fuel Qty")?,
        odometer_delta: required_number(record, index, row, "ODO Diff")?,
        overconsumption_percent: optional_number(record, index, row, "Overconsumption %")?,
        overconsumption_liters: optional_number(record, index, row, "Overconsumption Liter")?,
        transaction_quantity: optional_number(record, index, row, TRANSACTION_QUANTITY_HEADER)?,
    })
}

fn value_for<'r>(
    record: &'r csv::StringRecord,
    index: &HeaderIndex,
    header: &str,
) -> Option<&'r str> {
    let position = index.position(header)?;
    record.get(position).map(str::trim)
}

fn required_text(
    record: &csv::StringRecord,
    index: &HeaderIndex,
    row: usize,
    header: &str,
) -> ClientResult<String> {
    match value_for(record, index, header) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        Some(value) => Err(ClientError::malformed_value(
            row,
            header,
            value,
            "a non-empty value",
        )),
        None => Err(ClientError::malformed_value(
            row,
            header,
            "",
            "a non-empty value",
        )),
    }
}

fn required_number(
    record: &csv::StringRecord,
    index: &HeaderIndex,
    row: usize,
    header: &str,
) -> ClientResult<f64> {
    let value = value_for(record, index, header).unwrap_or("");
    parse_number(value)
        .ok_or_else(|| ClientError::malformed_value(row, header, value, "a finite number"))
}

fn optional_number(
    record: &csv::StringRecord,
    index: &HeaderIndex,
    row: usize,
    header: &str,
) -> ClientResult<Option<f64>> {
    let Some(value) = value_for(record, index, header) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    parse_number(value).map(Some).ok_or_else(|| {
        ClientError::malformed_value(row, header, value, "a finite number or an empty cell")
    })
}

fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim().trim_end_matches('%').trim_end();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    REQUIRED_HEADERS
        .iter()
        .all(|required| actual_headers.iter().any(|value| value == required))
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::parse_dataset;
    use crate::dataset::NumericField;
    use crate::error::SCHEMA_ERROR;

    const HEADER: &str = "Transaction Id,Plate #,Long Description,Fuel Qty,ODO Diff,Overconsumption %,Overconsumption Liter,Txn FCU";

    #[test]
    fn parses_rows_with_nullable_overconsumption() {
        let content = format!(
            "{HEADER}\nT1,P-100,Pickup,40.5,320,,,41\nT2,P-200,Bus,120,900,12.5%,15.25,118\n"
        );

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            assert_eq!(dataset.len(), 2);
            let first = &dataset.records()[0];
            assert_eq!(first.plate, "P-100");
            assert_eq!(first.overconsumption_percent, None);
            assert_eq!(first.transaction_quantity, Some(41.0));
            let second = &dataset.records()[1];
            assert_eq!(second.overconsumption_percent, Some(12.5));
            assert_eq!(second.overconsumption_liters, Some(15.25));
            assert!(dataset.has_column(NumericField::TransactionQuantity));
        }
    }

    #[test]
    fn ignores_extra_columns_and_accepts_missing_optional_column() {
        let content = "Site,Transaction Id,Plate #,Long Description,Fuel Qty,ODO Diff,Overconsumption %,Overconsumption Liter\nNorth,T1,P-1,Loader,10,0,,\n";

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            assert_eq!(dataset.len(), 1);
            assert!(!dataset.has_column(NumericField::TransactionQuantity));
            assert_eq!(dataset.records()[0].transaction_quantity, None);
        }
    }

    #[test]
    fn missing_required_header_is_a_schema_error() {
        let content = "Transaction Id,Plate #,Long Description,Fuel Qty\nT1,P-1,Loader,10\n";

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, SCHEMA_ERROR);
            assert!(error.message.contains("ODO Diff"));
        }
    }

    #[test]
    fn malformed_number_names_row_and_header() {
        let content = format!("{HEADER}\nT1,P-1,Loader,10,12,,,10\nT2,P-2,Loader,ten,12,,,10\n");

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, SCHEMA_ERROR);
            assert!(error.message.contains("Row 2"));
            assert!(error.message.contains("Fuel Qty"));
        }
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let content = format!("{HEADER}\nT1,P-1,Loader,NaN,12,,,10\n");
        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_err());
    }

    #[test]
    fn short_row_names_the_missing_cell() {
        let content = format!("{HEADER}\nT1,P-1,Loader,10,12,,,10\nT2,P-2,Loader\n");

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, SCHEMA_ERROR);
            assert!(error.message.contains("Row 2"));
            assert!(error.message.contains("Fuel Qty"));
        }
    }

    #[test]
    fn trailing_nullable_cells_may_be_omitted() {
        let content = format!("{HEADER}\nT1,P-1,Loader,10,12\n");

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            let record = &dataset.records()[0];
            assert_eq!(record.overconsumption_percent, None);
            assert_eq!(record.transaction_quantity, None);
        }
    }

    #[test]
    fn invalid_utf8_cell_is_a_schema_error_with_row() {
        let mut content = format!("{HEADER}\nT1,P-1,Pickup,10,12,,,10\nT2,P-2,Caf").into_bytes();
        content.extend_from_slice(b"\xe9,10,12,,,10\n");

        let parsed = parse_dataset(&content, b',', "inline");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, SCHEMA_ERROR);
            assert!(error.message.contains("row 2"));
        }
    }

    #[test]
    fn padded_cells_share_a_category() {
        let content = format!("{HEADER}\nT1,P-1,Pickup ,10,12,,,10\nT2,P-2,Pickup,11,13,,,11\n");

        let parsed = parse_dataset(content.as_bytes(), b',', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            assert_eq!(dataset.category_options(), vec!["All", "Pickup"]);
        }
    }

    #[test]
    fn header_only_source_loads_as_empty_dataset() {
        let parsed = parse_dataset(format!("{HEADER}\n").as_bytes(), b',', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            assert!(dataset.is_empty());
        }
    }

    #[test]
    fn blank_source_is_a_schema_error() {
        let parsed = parse_dataset(b"  \n", b',', "inline");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, SCHEMA_ERROR);
        }
    }

    #[test]
    fn honours_custom_delimiter_and_byte_order_mark() {
        let content = format!(
            "\u{feff}{}\nT1;P-1;Loader;10;12;;;10\n",
            HEADER.replace(',', ";")
        );

        let parsed = parse_dataset(content.as_bytes(), b';', "inline");
        assert!(parsed.is_ok());
        if let Ok(dataset) = parsed {
            assert_eq!(dataset.records()[0].transaction_id, "T1");
        }
    }
}

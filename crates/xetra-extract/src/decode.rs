//! CSV decoding of source objects into tick records.

use chrono::{NaiveDate, NaiveTime};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures::StreamExt;
use xetra_types::{DATE_FORMAT, TickRecord};

use crate::schema::{Column, NullCounts, SourceSchema};
use crate::ExtractError;

/// Decodes one comma-separated source object.
///
/// The header row is resolved against the required columns first. Empty
/// required cells are counted over the whole object and reported together.
/// Empty cells take precedence over unparsable values: the first invalid
/// value is only returned once the whole object holds no empty cell.
///
/// # Errors
///
/// Returns an error if a required column is missing, a required cell is
/// empty, or a value cannot be parsed.
pub async fn decode_records(key: &str, body: &[u8]) -> Result<Vec<TickRecord>, ExtractError> {
    let csv_error = |source| ExtractError::Csv {
        key: key.to_string(),
        source,
    };

    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_reader(body);

    let headers = reader.headers().await.map_err(csv_error)?.clone();
    let schema = SourceSchema::resolve(&headers, key)?;

    let mut records = Vec::new();
    let mut nulls = NullCounts::new();
    let mut first_null: Option<(u64, Column)> = None;
    let mut first_invalid: Option<ExtractError> = None;
    let mut rows = reader.records();

    while let Some(row) = rows.next().await {
        let row = row.map_err(csv_error)?;
        let line = row.position().map_or(0, |p| p.line());

        let mut complete = true;
        for column in Column::ALL {
            if schema.field(&row, column).is_empty() {
                nulls.record(column);
                if first_null.is_none() {
                    first_null = Some((line, column));
                }
                complete = false;
            }
        }

        if complete && first_invalid.is_none() {
            match decode_row(&schema, &row, key, line) {
                Ok(record) => records.push(record),
                Err(err) => first_invalid = Some(err),
            }
        }
    }

    if let Some((line, column)) = first_null {
        return Err(ExtractError::MissingValues {
            key: key.to_string(),
            line,
            column: column.header(),
            nulls,
        });
    }
    if let Some(err) = first_invalid {
        return Err(err);
    }

    Ok(records)
}

fn decode_row(
    schema: &SourceSchema,
    row: &StringRecord,
    key: &str,
    line: u64,
) -> Result<TickRecord, ExtractError> {
    let invalid = |column: Column| ExtractError::InvalidValue {
        key: key.to_string(),
        line,
        column: column.header(),
        value: schema.field(row, column).to_string(),
    };
    let price = |column: Column| {
        schema
            .field(row, column)
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| invalid(column))
    };

    let date = NaiveDate::parse_from_str(schema.field(row, Column::Date), DATE_FORMAT)
        .map_err(|_| invalid(Column::Date))?;
    let time = parse_time(schema.field(row, Column::Time)).ok_or_else(|| invalid(Column::Time))?;
    let traded_volume = parse_volume(schema.field(row, Column::TradedVolume))
        .ok_or_else(|| invalid(Column::TradedVolume))?;

    Ok(TickRecord::new(
        schema.field(row, Column::Isin),
        date,
        time,
        price(Column::StartPrice)?,
        price(Column::MaxPrice)?,
        price(Column::MinPrice)?,
        price(Column::EndPrice)?,
        traded_volume,
    ))
}

/// Parses `HH:MM` minute buckets, also accepting `HH:MM:SS`.
fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Parses a share count, accepting integral floats such as `100.0`.
fn parse_volume(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().or_else(|| {
        let value = s.parse::<f64>().ok()?;
        (value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64).then_some(value as u64)
    })
}

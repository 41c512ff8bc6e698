//! Apache Parquet output format.

use arrow::array::{
    Array, ArrayRef, AsArray, Date32Array, Float64Array, StringArray, UInt64Array,
};
use arrow::datatypes::{DataType, Date32Type, Field, Float64Type, Schema, UInt64Type};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::io::Write;
use std::sync::Arc;
use xetra_types::DailySummary;

use crate::{FormatError, Formatter};

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Serializes summaries into an in-memory Parquet file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn to_bytes(&self, rows: &[DailySummary]) -> Result<Bytes, FormatError> {
        let mut buffer = Vec::new();
        self.write_summaries(rows, &mut buffer)?;
        Ok(Bytes::from(buffer))
    }

    /// Converts summaries to an Arrow `RecordBatch`.
    fn to_batch(rows: &[DailySummary]) -> Result<RecordBatch, FormatError> {
        let isins: Vec<_> = rows.iter().map(|r| r.isin.as_str()).collect();
        let dates: Vec<_> = rows
            .iter()
            .map(|r| Date32Type::from_naive_date(r.date))
            .collect();
        let opens: Vec<_> = rows.iter().map(|r| r.opening_price_eur).collect();
        let closes: Vec<_> = rows.iter().map(|r| r.closing_price_eur).collect();
        let mins: Vec<_> = rows.iter().map(|r| r.minimum_price_eur).collect();
        let maxs: Vec<_> = rows.iter().map(|r| r.maximum_price_eur).collect();
        let volumes: Vec<_> = rows.iter().map(|r| r.daily_traded_volume).collect();
        let changes: Vec<_> = rows.iter().map(|r| r.change_prev_closing_pct).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(isins)),
            Arc::new(Date32Array::from(dates)),
            Arc::new(Float64Array::from(opens)),
            Arc::new(Float64Array::from(closes)),
            Arc::new(Float64Array::from(mins)),
            Arc::new(Float64Array::from(maxs)),
            Arc::new(UInt64Array::from(volumes)),
            Arc::new(Float64Array::from(changes)),
        ];

        RecordBatch::try_new(Arc::new(report_schema()), columns)
            .map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_summaries<W: Write + Send>(
        &self,
        rows: &[DailySummary],
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(report_schema());
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema, Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        // Write in batches
        for chunk in rows.chunks(self.row_group_size.max(1)) {
            let batch = Self::to_batch(chunk)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

/// Returns the Arrow schema of a stored daily report.
#[must_use]
pub fn report_schema() -> Schema {
    Schema::new(vec![
        Field::new("isin", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("opening_price_eur", DataType::Float64, false),
        Field::new("closing_price_eur", DataType::Float64, false),
        Field::new("minimum_price_eur", DataType::Float64, false),
        Field::new("maximum_price_eur", DataType::Float64, false),
        Field::new("daily_traded_volume", DataType::UInt64, false),
        Field::new("change_prev_closing_pct", DataType::Float64, true),
    ])
}

/// Decodes a Parquet daily report back into summaries.
///
/// # Errors
///
/// Returns an error if the bytes are not a Parquet file or the file does
/// not have the report schema.
pub fn read_summaries(data: Bytes) -> Result<Vec<DailySummary>, FormatError> {
    let reader = ParquetRecordBatchReaderBuilder::try_new(data)
        .map_err(|e| FormatError::Parquet(e.to_string()))?
        .build()
        .map_err(|e| FormatError::Parquet(e.to_string()))?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch.map_err(|e| FormatError::Parquet(e.to_string()))?;
        append_rows(&batch, &mut rows)?;
    }
    Ok(rows)
}

fn append_rows(batch: &RecordBatch, rows: &mut Vec<DailySummary>) -> Result<(), FormatError> {
    let isins = column(batch, "isin", |a| a.as_string_opt::<i32>())?;
    let dates = column(batch, "date", |a| a.as_primitive_opt::<Date32Type>())?;
    let opens = float_column(batch, "opening_price_eur")?;
    let closes = float_column(batch, "closing_price_eur")?;
    let mins = float_column(batch, "minimum_price_eur")?;
    let maxs = float_column(batch, "maximum_price_eur")?;
    let volumes = column(batch, "daily_traded_volume", |a| {
        a.as_primitive_opt::<UInt64Type>()
    })?;
    let changes = float_column(batch, "change_prev_closing_pct")?;

    rows.reserve(batch.num_rows());
    for i in 0..batch.num_rows() {
        rows.push(DailySummary {
            isin: isins.value(i).to_string(),
            date: Date32Type::to_naive_date(dates.value(i)),
            opening_price_eur: opens.value(i),
            closing_price_eur: closes.value(i),
            minimum_price_eur: mins.value(i),
            maximum_price_eur: maxs.value(i),
            daily_traded_volume: volumes.value(i),
            change_prev_closing_pct: changes.is_valid(i).then(|| changes.value(i)),
        });
    }
    Ok(())
}

fn column<'a, T: ?Sized>(
    batch: &'a RecordBatch,
    name: &str,
    cast: impl FnOnce(&'a dyn Array) -> Option<&'a T>,
) -> Result<&'a T, FormatError> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| FormatError::Schema(format!("missing column '{name}'")))?;
    cast(array.as_ref()).ok_or_else(|| {
        FormatError::Schema(format!(
            "column '{name}' has type {}",
            array.data_type()
        ))
    })
}

fn float_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, FormatError> {
    column(batch, name, |a| a.as_primitive_opt::<Float64Type>())
}

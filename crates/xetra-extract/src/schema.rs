//! Declared layout of the source CSV files.

use csv_async::StringRecord;

use crate::ExtractError;

/// A column the extractor requires from every source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Security identifier.
    Isin,
    /// Trading day.
    Date,
    /// Minute bucket.
    Time,
    /// First price in the bucket.
    StartPrice,
    /// Highest price in the bucket.
    MaxPrice,
    /// Lowest price in the bucket.
    MinPrice,
    /// Last price in the bucket.
    EndPrice,
    /// Shares traded in the bucket.
    TradedVolume,
}

impl Column {
    /// Every required column, in record field order.
    pub const ALL: [Self; 8] = [
        Self::Isin,
        Self::Date,
        Self::Time,
        Self::StartPrice,
        Self::MaxPrice,
        Self::MinPrice,
        Self::EndPrice,
        Self::TradedVolume,
    ];

    /// Returns the header name used by the source files.
    #[must_use]
    pub const fn header(&self) -> &'static str {
        match self {
            Self::Isin => "ISIN",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::StartPrice => "StartPrice",
            Self::MaxPrice => "MaxPrice",
            Self::MinPrice => "MinPrice",
            Self::EndPrice => "EndPrice",
            Self::TradedVolume => "TradedVolume",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}

/// Positions of the required columns within one source file.
///
/// Files may carry extra columns (Mnemonic, SecurityDesc, Currency, ...) in any
/// order; those are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSchema {
    positions: [usize; 8],
}

impl SourceSchema {
    /// Resolves the required columns against a header row.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingColumn`] if a required column is absent.
    pub fn resolve(headers: &StringRecord, key: &str) -> Result<Self, ExtractError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let mut positions = [0; 8];
        for column in Column::ALL {
            positions[column.index()] = names
                .iter()
                .position(|name| *name == column.header())
                .ok_or_else(|| ExtractError::MissingColumn {
                    key: key.to_string(),
                    column: column.header(),
                })?;
        }
        Ok(Self { positions })
    }

    /// Returns the value of a column in a record, or `""` if the row is short.
    #[must_use]
    pub fn field<'r>(&self, record: &'r StringRecord, column: Column) -> &'r str {
        record.get(self.positions[column.index()]).unwrap_or("")
    }
}

/// Number of empty cells per required column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullCounts {
    counts: [u64; 8],
}

impl NullCounts {
    /// Creates an all-zero count.
    #[must_use]
    pub const fn new() -> Self {
        Self { counts: [0; 8] }
    }

    /// Records one empty cell in `column`.
    pub const fn record(&mut self, column: Column) {
        self.counts[column.index()] += 1;
    }

    /// Returns the count for one column.
    #[must_use]
    pub const fn get(&self, column: Column) -> u64 {
        self.counts[column.index()]
    }

    /// Returns the total over all columns.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterates `(column, count)` pairs in record field order.
    pub fn iter(&self) -> impl Iterator<Item = (Column, u64)> + '_ {
        Column::ALL.into_iter().map(|c| (c, self.get(c)))
    }
}

impl std::fmt::Display for NullCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(column, count)| format!("{column}={count}"))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

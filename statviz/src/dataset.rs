// Copyright 2025 the Statviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-state dataset.

use std::fmt;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};
use statviz_core::{ColId, TableData};
use tracing::{info, warn};

use crate::error::{DataLoadError, LoadResult};

/// Column id of the `state` text column.
pub const STATE_COL: ColId = ColId(0);
/// Column id of the `abbr` text column.
pub const ABBR_COL: ColId = ColId(1);

/// A numeric dataset column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Share of the population in poverty (%).
    Poverty,
    /// Median age.
    Age,
    /// Median household income.
    Income,
    /// Share lacking healthcare (%).
    Healthcare,
    /// Share obese (%).
    Obesity,
    /// Share who smoke (%).
    Smokes,
}

impl Field {
    /// Every field, in column order.
    pub const ALL: [Self; 6] = [
        Self::Poverty,
        Self::Age,
        Self::Income,
        Self::Healthcare,
        Self::Obesity,
        Self::Smokes,
    ];

    /// Returns the CSV column name (also the label controls' `value` tag).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Poverty => "poverty",
            Self::Age => "age",
            Self::Income => "income",
            Self::Healthcare => "healthcare",
            Self::Obesity => "obesity",
            Self::Smokes => "smokes",
        }
    }

    /// Parses a column name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Returns the field's position in [`Field::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Poverty => 0,
            Self::Age => 1,
            Self::Income => 2,
            Self::Healthcare => 3,
            Self::Obesity => 4,
            Self::Smokes => 5,
        }
    }

    /// Returns the table column id.
    pub const fn col(self) -> ColId {
        #[allow(clippy::cast_possible_truncation, reason = "index is at most 5")]
        {
            ColId(2 + self.index() as u32)
        }
    }

    fn from_col(col: ColId) -> Option<Self> {
        let i = usize::try_from(col.0.checked_sub(2)?).ok()?;
        Self::ALL.get(i).copied()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with a numeric field that does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericPolicy {
    /// Keep the row with `NaN`; the value is skipped by domain computation and its marker is
    /// hidden.
    #[default]
    Nan,
    /// Drop the row.
    DropRow,
    /// Fail the load.
    Reject,
}

/// One geographic unit.
#[derive(Clone, Debug, PartialEq)]
pub struct DataRow {
    /// Full name (`state` column).
    pub state: String,
    /// Short display label (`abbr` column).
    pub abbr: String,
    values: [f64; 6],
}

impl DataRow {
    /// Creates a row; `values` are in [`Field::ALL`] order.
    pub fn new(state: impl Into<String>, abbr: impl Into<String>, values: [f64; 6]) -> Self {
        Self {
            state: state.into(),
            abbr: abbr.into(),
            values,
        }
    }

    /// Returns the value of `field`.
    pub fn value(&self, field: Field) -> f64 {
        self.values[field.index()]
    }
}

/// The ordered, immutable set of rows a chart plots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DataRow>,
}

impl Dataset {
    /// Creates a dataset from already-coerced rows.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Returns a row.
    pub fn row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parses comma-separated text with a header row.
    ///
    /// The header must name `state`, `abbr` and the six numeric fields; other columns are
    /// ignored and column order is free. Fields are trimmed and blank lines are skipped. A
    /// numeric field that a short record does not reach is unparseable and handled by `policy`
    /// like any other bad value.
    pub fn parse_csv(input: &str, policy: NumericPolicy) -> LoadResult<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(input.as_bytes());
        let header = reader.headers()?.clone();
        if header.iter().all(str::is_empty) {
            return Err(DataLoadError::Empty);
        }
        let columns = Columns::locate(&header)?;

        let mut rows = Vec::new();
        let mut invalid = 0_usize;
        let mut dropped = 0_usize;
        'records: for record in reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record.position().map_or(0, csv::Position::line);
            let mut values = [f64::NAN; 6];
            for field in Field::ALL {
                let raw = record.get(columns.values[field.index()]).unwrap_or_default();
                match parse_number(raw) {
                    Some(v) => values[field.index()] = v,
                    None => match policy {
                        NumericPolicy::Nan => invalid += 1,
                        NumericPolicy::DropRow => {
                            dropped += 1;
                            continue 'records;
                        }
                        NumericPolicy::Reject => {
                            return Err(DataLoadError::InvalidNumber {
                                line,
                                column: field.name(),
                                value: raw.to_owned(),
                            });
                        }
                    },
                }
            }
            rows.push(DataRow {
                state: record.get(columns.state).unwrap_or_default().to_owned(),
                abbr: record.get(columns.abbr).unwrap_or_default().to_owned(),
                values,
            });
        }

        if invalid > 0 {
            warn!(invalid, "unparseable numeric values kept as NaN");
        }
        if dropped > 0 {
            warn!(dropped, "dropped rows with unparseable numeric values");
        }
        Ok(Self { rows })
    }
}

/// Header positions of the columns the chart reads.
struct Columns {
    state: usize,
    abbr: usize,
    values: [usize; 6],
}

impl Columns {
    fn locate(header: &StringRecord) -> LoadResult<Self> {
        let position = |name: &'static str| {
            header
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
                .ok_or(DataLoadError::MissingColumn(name))
        };
        let mut values = [0_usize; 6];
        for field in Field::ALL {
            values[field.index()] = position(field.name())?;
        }
        Ok(Self {
            state: position("state")?,
            abbr: position("abbr")?,
            values,
        })
    }
}

/// Parses a numeric field. Surrounding whitespace is ignored; empty and non-finite values are
/// rejected.
fn parse_number(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

impl TableData for Dataset {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn f64(&self, row: usize, col: ColId) -> Option<f64> {
        let field = Field::from_col(col)?;
        Some(self.rows.get(row)?.value(field))
    }

    fn text(&self, row: usize, col: ColId) -> Option<&str> {
        let row = self.rows.get(row)?;
        match col {
            STATE_COL => Some(&row.state),
            ABBR_COL => Some(&row.abbr),
            _ => None,
        }
    }
}

/// Reads and parses the dataset at `path`.
///
/// Returns only once every row has been coerced; there is no partial result.
pub fn load_data(path: impl AsRef<Path>, policy: NumericPolicy) -> LoadResult<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let dataset = Dataset::parse_csv(&text, policy)?;
    info!(path = %path.display(), rows = dataset.len(), "loaded dataset");
    Ok(dataset)
}

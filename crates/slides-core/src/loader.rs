// File: crates/slides-core/src/loader.rs
// Summary: CSV loaders for the slide tables and the file-backed data source.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{SlideConfig, SlideLayout};
use crate::data::{Row, SlideData, TimeSample, TimeSeries, YearTable};
use crate::error::{ChartError, LoadError};

/// Column pair of a time-series table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeColumns {
    /// `creationDate` (timestamp) and `value`; blank values become gaps (NaN).
    CreationDate,
    /// `date` (`YYYY-MM-DD`) and `distance`; blank distances are 0.
    DailyDistance,
}

impl TimeColumns {
    pub fn names(&self) -> (&'static str, &'static str) {
        match self {
            TimeColumns::CreationDate => ("creationDate", "value"),
            TimeColumns::DailyDistance => ("date", "distance"),
        }
    }

    fn blank_value(&self) -> f64 {
        match self {
            TimeColumns::CreationDate => f64::NAN,
            TimeColumns::DailyDistance => 0.0,
        }
    }
}

fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

fn column(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn number(raw: &str, blank: f64, row: usize, column: &str) -> Result<f64, LoadError> {
    if raw.is_empty() {
        return Ok(blank);
    }
    raw.parse::<f64>().map_err(|_| LoadError::BadValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Load the category breakdown table (`workoutActivityType`, `count`).
pub fn load_category_rows<R: Read>(rdr: R) -> Result<Vec<Row>, LoadError> {
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_cat = column(&headers, "workoutActivityType")?;
    let i_count = column(&headers, "count")?;

    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let category = rec.get(i_cat).unwrap_or_default().to_string();
        let value = number(rec.get(i_count).unwrap_or_default(), 0.0, i + 1, "count")?;
        out.push(Row { category, value });
    }
    Ok(out)
}

/// Load the yearly summary table: `year` plus one count column per category.
pub fn load_year_table<R: Read>(rdr: R) -> Result<YearTable, LoadError> {
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_year = column(&headers, "year")?;
    let keys: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != i_year)
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut table = YearTable::new(keys.iter().map(|(_, k)| k.clone()).collect());
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let year = rec.get(i_year).unwrap_or_default().to_string();
        let mut pairs = Vec::with_capacity(keys.len());
        for (ix, key) in &keys {
            let v = number(rec.get(*ix).unwrap_or_default(), 0.0, i + 1, key)?;
            pairs.push((key.as_str(), v));
        }
        table.push(year, &pairs);
    }
    Ok(table)
}

/// Load a time-series table, stably sorted by timestamp.
pub fn load_time_samples<R: Read>(rdr: R, columns: TimeColumns) -> Result<Vec<TimeSample>, LoadError> {
    let (time_col, value_col) = columns.names();
    let mut rdr = reader(rdr);
    let headers = rdr.headers()?.clone();
    let i_time = column(&headers, time_col)?;
    let i_value = column(&headers, value_col)?;

    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let raw_time = rec.get(i_time).unwrap_or_default();
        let timestamp = parse_timestamp(raw_time).ok_or_else(|| LoadError::BadValue {
            row: i + 1,
            column: time_col.to_string(),
            value: raw_time.to_string(),
        })?;
        let raw_value = rec.get(i_value).unwrap_or_default();
        let value = match number(raw_value, columns.blank_value(), i + 1, value_col) {
            Ok(v) => v,
            // unreadable readings become gaps, like blanks
            Err(LoadError::BadValue { .. }) if columns == TimeColumns::CreationDate => {
                warn!(row = i + 1, column = value_col, value = raw_value, "unparsable reading treated as a gap");
                f64::NAN
            }
            Err(e) => return Err(e),
        };
        out.push(TimeSample { timestamp, value });
    }
    out.sort_by_key(|s| s.timestamp);
    Ok(out)
}

/// Parse the timestamp forms found in health exports.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS +ZZZZ`, `YYYY-MM-DD HH:MM:SS`
/// (read as UTC) and `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S %z") {
        return Some(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Supplier of the tables a slide needs. Fails on the first table that cannot be loaded.
pub trait DataSource {
    fn load(&self, config: &SlideConfig) -> Result<SlideData, ChartError>;
}

/// Reads slide tables from CSV files under a root directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path { &self.root }

    fn open(&self, name: &str) -> Result<(PathBuf, std::fs::File), ChartError> {
        let path = self.root.join(name);
        match std::fs::File::open(&path) {
            Ok(f) => Ok((path, f)),
            Err(e) => Err(LoadError::Csv(csv::Error::from(e)).at(path)),
        }
    }
}

impl DataSource for FileSource {
    fn load(&self, config: &SlideConfig) -> Result<SlideData, ChartError> {
        match &config.layout {
            SlideLayout::Breakdown { breakdown_file, yearly_file, .. } => {
                let (path, f) = self.open(breakdown_file)?;
                let rows = load_category_rows(f).map_err(|e| e.at(&path))?;
                debug!(path = %path.display(), rows = rows.len(), "loaded category rows");

                let (path, f) = self.open(yearly_file)?;
                let years = load_year_table(f).map_err(|e| e.at(&path))?;
                debug!(path = %path.display(), years = years.records.len(), keys = years.keys.len(), "loaded yearly table");

                Ok(SlideData::Breakdown { rows, years })
            }
            SlideLayout::Timeline { series, .. } => {
                let mut out = Vec::with_capacity(series.len());
                for spec in series {
                    let (path, f) = self.open(&spec.file)?;
                    let samples = load_time_samples(f, spec.columns).map_err(|e| e.at(&path))?;
                    let loaded = samples.len();
                    let mut s = TimeSeries::new(spec.label.clone(), samples);
                    if let Some(cutoff) = spec.since {
                        s = s.since(cutoff);
                    }
                    s = s.every(spec.every);
                    debug!(path = %path.display(), loaded, kept = s.samples.len(), "loaded time series");
                    out.push(s);
                }
                Ok(SlideData::Timeline { series: out })
            }
        }
    }
}

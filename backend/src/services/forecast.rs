//! Forecast series loader
//!
//! Reads pre-computed forecast and metrics CSV files named by the configured
//! catalog. A file that cannot be loaded degrades to a warning panel; it never
//! prevents the other series from loading.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use shared::{ChartSpec, ForecastPoint, ForecastSeries, MetricsTable, Phenomenon};
use thiserror::Error;

use crate::config::{ForecastConfig, MetricsSource, SeriesSource};

/// Column holding the observation date in every forecast file
pub const DATE_COLUMN: &str = "Date";

/// Errors loading a single forecast or metrics file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{0}'")]
    MissingColumn(String),

    #[error("invalid date '{value}' on row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("invalid number '{value}' in column '{column}' on row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("file contains no data")]
    Empty,
}

/// Display panel for one forecast series
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SeriesPanel {
    Loaded {
        name: String,
        title: String,
        phenomenon: Phenomenon,
        horizon_days: u32,
        point_count: usize,
        preview: Vec<ForecastPoint>,
        chart: ChartSpec,
    },
    Unavailable {
        name: String,
        title: String,
        phenomenon: Phenomenon,
        warning: String,
    },
}

impl SeriesPanel {
    pub fn name(&self) -> &str {
        match self {
            SeriesPanel::Loaded { name, .. } | SeriesPanel::Unavailable { name, .. } => name,
        }
    }

    pub fn phenomenon(&self) -> Phenomenon {
        match self {
            SeriesPanel::Loaded { phenomenon, .. } | SeriesPanel::Unavailable { phenomenon, .. } => {
                *phenomenon
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, SeriesPanel::Loaded { .. })
    }
}

/// Display panel for one metrics table
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricsPanel {
    Loaded {
        phenomenon: Phenomenon,
        table: MetricsTable,
    },
    Unavailable {
        name: String,
        phenomenon: Phenomenon,
        warning: String,
    },
}

impl MetricsPanel {
    pub fn phenomenon(&self) -> Phenomenon {
        match self {
            MetricsPanel::Loaded { phenomenon, .. } | MetricsPanel::Unavailable { phenomenon, .. } => {
                *phenomenon
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, MetricsPanel::Loaded { .. })
    }
}

/// Every panel of the forecast catalog, in catalog order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastReport {
    pub series: Vec<SeriesPanel>,
    pub metrics: Vec<MetricsPanel>,
}

/// Loader for the configured forecast catalog
#[derive(Clone)]
pub struct ForecastLoader {
    config: Arc<ForecastConfig>,
}

impl ForecastLoader {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Load and parse one forecast series
    pub fn load_series(&self, source: &SeriesSource) -> Result<ForecastSeries, LoadError> {
        let path = self.config.resolve(&source.file);
        let mut reader = open_csv(&path)?;
        let headers = reader.headers()?.clone();

        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let actual_idx = column_index(&headers, &source.actual_column)?;
        let predicted_idx = column_index(&headers, &source.predicted_column)?;

        let mut points = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let cell = |idx: usize| record.get(idx).unwrap_or("");

            let date = parse_date(cell(date_idx)).ok_or_else(|| LoadError::InvalidDate {
                row,
                value: cell(date_idx).to_string(),
            })?;
            let actual = parse_value(cell(actual_idx), row, &source.actual_column)?;
            let predicted = parse_value(cell(predicted_idx), row, &source.predicted_column)?;

            points.push(ForecastPoint {
                date,
                actual,
                predicted,
            });
        }

        if points.is_empty() {
            return Err(LoadError::Empty);
        }
        points.sort_by_key(|p| p.date);

        tracing::debug!(series = %source.name, points = points.len(), "Loaded forecast series");

        Ok(ForecastSeries {
            name: source.name.clone(),
            phenomenon: source.phenomenon,
            horizon_days: source.horizon_days,
            points,
        })
    }

    /// Load a metrics table as opaque text cells
    pub fn load_metrics(&self, source: &MetricsSource) -> Result<MetricsTable, LoadError> {
        let path = self.config.resolve(&source.file);
        let mut reader = open_csv(&path)?;

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(LoadError::Empty);
        }

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(MetricsTable {
            name: source.name.clone(),
            headers,
            rows,
        })
    }

    /// Load a series into a display panel, turning failures into a warning
    pub fn series_panel(&self, source: &SeriesSource) -> SeriesPanel {
        let title = source.file.display().to_string();

        match self.load_series(source) {
            Ok(series) => {
                let preview = series.tail(self.config.preview_rows).to_vec();
                let chart = ChartSpec::from_series(&series, title.clone(), source.actual_column.clone());
                SeriesPanel::Loaded {
                    name: series.name.clone(),
                    title,
                    phenomenon: series.phenomenon,
                    horizon_days: series.horizon_days,
                    point_count: series.len(),
                    preview,
                    chart,
                }
            }
            Err(e) => {
                tracing::warn!(series = %source.name, file = %title, error = %e, "Forecast series unavailable");
                SeriesPanel::Unavailable {
                    name: source.name.clone(),
                    warning: format!("Could not load {}: {}", title, e),
                    title,
                    phenomenon: source.phenomenon,
                }
            }
        }
    }

    /// Load a metrics table into a display panel, turning failures into a warning
    pub fn metrics_panel(&self, source: &MetricsSource) -> MetricsPanel {
        match self.load_metrics(source) {
            Ok(table) => MetricsPanel::Loaded {
                phenomenon: source.phenomenon,
                table,
            },
            Err(e) => {
                tracing::warn!(metrics = %source.name, file = %source.file.display(), error = %e, "Forecast metrics unavailable");
                MetricsPanel::Unavailable {
                    name: source.name.clone(),
                    phenomenon: source.phenomenon,
                    warning: format!("{} model metrics not found.", source.name),
                }
            }
        }
    }

    /// Load every configured series and metrics table; never fails as a whole
    pub fn load_all(&self) -> ForecastReport {
        let series: Vec<SeriesPanel> = self
            .config
            .series
            .iter()
            .map(|s| self.series_panel(s))
            .collect();
        let metrics: Vec<MetricsPanel> = self
            .config
            .metrics
            .iter()
            .map(|m| self.metrics_panel(m))
            .collect();

        let loaded = series.iter().filter(|p| p.is_loaded()).count();
        tracing::info!(loaded, total = series.len(), "Forecast catalog loaded");

        ForecastReport { series, metrics }
    }
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    let file = File::open(path)?;
    Ok(csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name.trim())
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

/// Cell spellings data tooling writes for a missing value
const MISSING_MARKERS: [&str; 4] = ["", "nan", "na", "null"];

fn parse_value(value: &str, row: usize, column: &str) -> Result<Option<f64>, LoadError> {
    if MISSING_MARKERS.iter().any(|m| value.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(LoadError::InvalidNumber {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parse the date formats written by common data tooling
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for format in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
}

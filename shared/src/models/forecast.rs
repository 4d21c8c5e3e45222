//! Forecast series models
//!
//! Shapes for pre-computed actual-vs-predicted series and their summary
//! metric tables. Values come from flat files produced outside this system.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Forecast target phenomenon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phenomenon {
    Ndvi,
    WindSpeed,
    WindDirection,
}

impl Phenomenon {
    /// Dashboard section the phenomenon is displayed under
    pub fn section_title(&self) -> &'static str {
        match self {
            Phenomenon::Ndvi => "NDVI Forecasts",
            Phenomenon::WindSpeed | Phenomenon::WindDirection => "Wind Forecasts",
        }
    }
}

impl std::fmt::Display for Phenomenon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phenomenon::Ndvi => write!(f, "NDVI"),
            Phenomenon::WindSpeed => write!(f, "Wind Speed"),
            Phenomenon::WindDirection => write!(f, "Wind Direction"),
        }
    }
}

/// One dated actual/predicted pair; a blank cell in the source file is `None`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDateTime,
    pub actual: Option<f64>,
    pub predicted: Option<f64>,
}

/// A named forecast series at a single horizon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSeries {
    pub name: String,
    pub phenomenon: Phenomenon,
    /// Days ahead the prediction targets (t+N)
    pub horizon_days: u32,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Last `n` points, oldest first
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Horizon label, e.g. `t+7`
    pub fn horizon_label(&self) -> String {
        format!("t+{}", self.horizon_days)
    }
}

/// Summary metrics table, kept as opaque text cells
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricsTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A single line of a chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartPoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

/// Actual-vs-predicted line chart description for a client to draw
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub actual: Vec<ChartPoint>,
    pub predicted: Vec<ChartPoint>,
}

impl ChartSpec {
    /// Chart lines for a series; missing values leave a gap in their line only
    pub fn from_series(series: &ForecastSeries, title: impl Into<String>, y_label: impl Into<String>) -> Self {
        let line = |value: fn(&ForecastPoint) -> Option<f64>| -> Vec<ChartPoint> {
            series
                .points
                .iter()
                .filter_map(|p| value(p).map(|y| ChartPoint { x: p.date, y }))
                .collect()
        };
        let actual = line(|p| p.actual);
        let predicted = line(|p| p.predicted);

        Self {
            title: title.into(),
            x_label: "Date".to_string(),
            y_label: y_label.into(),
            actual,
            predicted,
        }
    }
}

//! Dashboard views for both data modes
//!
//! Views are rendered from state the caller owns; nothing here keeps state.

use serde::Serialize;
use shared::{evaluate, AdvisoryMessage, Phenomenon, SensorRecord};

use crate::services::forecast::{ForecastReport, MetricsPanel, SeriesPanel};
use crate::services::simulation::{SensorLog, SimulationStatus};

/// Panels per forecast row
pub const PANELS_PER_ROW: usize = 2;

/// Latest sensor readings and the advice for the newest one
#[derive(Debug, Clone, Serialize)]
pub struct SimulationView {
    pub status: SimulationStatus,
    pub latest: Vec<SensorRecord>,
    pub advice: Vec<AdvisoryMessage>,
}

/// A titled group of forecast panels laid out in rows, followed by its metrics tables
#[derive(Debug, Clone, Serialize)]
pub struct ForecastSection {
    pub title: String,
    pub phenomena: Vec<Phenomenon>,
    pub rows: Vec<Vec<SeriesPanel>>,
    pub metrics: Vec<MetricsPanel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastView {
    pub sections: Vec<ForecastSection>,
}

/// Mode-switched dashboard payload
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DashboardView {
    Simulation(SimulationView),
    Forecasts(ForecastView),
}

pub fn render_simulation(
    status: SimulationStatus,
    log: &SensorLog,
    display_rows: usize,
) -> SimulationView {
    let advice = log
        .last()
        .map(|record| evaluate(&record.reading))
        .unwrap_or_default();

    SimulationView {
        status,
        latest: log.latest(display_rows),
        advice,
    }
}

/// Group panels into sections in catalog order, two panels per row.
/// Each metrics table closes the section of its phenomenon family.
pub fn render_forecasts(report: ForecastReport) -> ForecastView {
    let mut sections: Vec<(ForecastSection, Vec<SeriesPanel>)> = Vec::new();

    for panel in report.series {
        let phenomenon = panel.phenomenon();
        let (section, panels) = section_for(&mut sections, phenomenon);
        panels.push(panel);
        if !section.phenomena.contains(&phenomenon) {
            section.phenomena.push(phenomenon);
        }
    }
    for panel in report.metrics {
        let (section, _) = section_for(&mut sections, panel.phenomenon());
        section.metrics.push(panel);
    }

    let sections = sections
        .into_iter()
        .map(|(mut section, panels)| {
            section.rows = panels
                .chunks(PANELS_PER_ROW)
                .map(|row| row.to_vec())
                .collect();
            section
        })
        .collect();

    ForecastView { sections }
}

fn section_for(
    sections: &mut Vec<(ForecastSection, Vec<SeriesPanel>)>,
    phenomenon: Phenomenon,
) -> &mut (ForecastSection, Vec<SeriesPanel>) {
    let title = phenomenon.section_title();
    let idx = match sections.iter().position(|entry| entry.0.title == title) {
        Some(idx) => idx,
        None => {
            sections.push((
                ForecastSection {
                    title: title.to_string(),
                    phenomena: Vec::new(),
                    rows: Vec::new(),
                    metrics: Vec::new(),
                },
                Vec::new(),
            ));
            sections.len() - 1
        }
    };
    &mut sections[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(name: &str, phenomenon: Phenomenon) -> SeriesPanel {
        SeriesPanel::Unavailable {
            name: name.to_string(),
            title: format!("{}.csv", name),
            phenomenon,
            warning: "missing".to_string(),
        }
    }

    #[test]
    fn forecasts_grouped_two_per_row() {
        let report = ForecastReport {
            series: vec![
                unavailable("ndvi_t1", Phenomenon::Ndvi),
                unavailable("ndvi_t7", Phenomenon::Ndvi),
                unavailable("ndvi_t16", Phenomenon::Ndvi),
                unavailable("wind_speed_t1", Phenomenon::WindSpeed),
                unavailable("wind_dir_t1", Phenomenon::WindDirection),
            ],
            metrics: vec![],
        };

        let view = render_forecasts(report);
        assert_eq!(view.sections.len(), 2);

        let ndvi = &view.sections[0];
        assert_eq!(ndvi.title, "NDVI Forecasts");
        assert_eq!(ndvi.rows.len(), 2);
        assert_eq!(ndvi.rows[0].len(), 2);
        assert_eq!(ndvi.rows[1][0].name(), "ndvi_t16");

        let wind = &view.sections[1];
        assert_eq!(wind.title, "Wind Forecasts");
        assert_eq!(
            wind.phenomena,
            vec![Phenomenon::WindSpeed, Phenomenon::WindDirection]
        );
        assert_eq!(wind.rows.len(), 1);
        assert!(wind.metrics.is_empty());
    }

    #[test]
    fn metrics_follow_their_section() {
        let report = ForecastReport {
            series: vec![
                unavailable("ndvi_t1", Phenomenon::Ndvi),
                unavailable("wind_speed_t1", Phenomenon::WindSpeed),
            ],
            metrics: vec![
                MetricsPanel::Unavailable {
                    name: "NDVI".to_string(),
                    phenomenon: Phenomenon::Ndvi,
                    warning: "NDVI model metrics not found.".to_string(),
                },
                MetricsPanel::Unavailable {
                    name: "Wind".to_string(),
                    phenomenon: Phenomenon::WindSpeed,
                    warning: "Wind model metrics not found.".to_string(),
                },
            ],
        };

        let view = render_forecasts(report);
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[0].metrics.len(), 1);
        assert_eq!(view.sections[0].metrics[0].phenomenon(), Phenomenon::Ndvi);
        assert_eq!(view.sections[1].metrics[0].phenomenon(), Phenomenon::WindSpeed);
    }

    #[test]
    fn metrics_without_series_get_their_own_section() {
        let report = ForecastReport {
            series: vec![unavailable("ndvi_t1", Phenomenon::Ndvi)],
            metrics: vec![MetricsPanel::Unavailable {
                name: "Wind".to_string(),
                phenomenon: Phenomenon::WindDirection,
                warning: "Wind model metrics not found.".to_string(),
            }],
        };

        let view = render_forecasts(report);
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.sections[1].title, "Wind Forecasts");
        assert!(view.sections[1].rows.is_empty());
        assert!(view.sections[1].phenomena.is_empty());
        assert_eq!(view.sections[1].metrics.len(), 1);
    }

    #[test]
    fn empty_log_has_no_advice() {
        let log = SensorLog::new(5);
        let view = render_simulation(SimulationStatus::Idle, &log, 10);
        assert!(view.latest.is_empty());
        assert!(view.advice.is_empty());
    }
}

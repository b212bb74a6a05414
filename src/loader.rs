use crate::error::AppError;
use crate::types::{Building, BuildingMetrics, DateRangePreset, PeriodSummary, WellCompliance};
use crate::util::parse_timestamp_safe;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub rejected: usize,
    pub unparsed_timestamps: usize,
    pub dropped_periods: usize,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuilding {
    id: Option<RawId>,
    name: Option<String>,
    image: Option<String>,
    spaces: Option<i64>,
    well_compliance: Option<String>,
    air_quality: Option<f64>,
    thermal_comfort: Option<f64>,
    last_updated: Option<String>,
    metrics: Option<BuildingMetrics>,
    data_by_period: Option<HashMap<String, PeriodSummary>>,
    metrics_by_period: Option<HashMap<String, BuildingMetrics>>,
}

fn is_percentage(v: f64) -> bool {
    v.is_finite() && (0.0..=100.0).contains(&v)
}

fn metrics_in_range(m: &BuildingMetrics) -> bool {
    m.entries().all(|(_, e)| is_percentage(e.time_in_target))
}

/// Keep only entries keyed by a known period preset.
fn by_period<T>(raw: Option<HashMap<String, T>>, dropped: &mut usize) -> HashMap<DateRangePreset, T> {
    let mut out = HashMap::new();
    for (key, value) in raw.unwrap_or_default() {
        match DateRangePreset::parse(&key) {
            Some(p) if p != DateRangePreset::Custom => {
                out.insert(p, value);
            }
            _ => {
                warn!(period = %key, "dropping unknown period key");
                *dropped += 1;
            }
        }
    }
    out
}

fn clean(raw: RawBuilding, report: &mut LoadReport) -> Option<Building> {
    let id = match raw.id? {
        RawId::Text(s) => s.trim().to_string(),
        RawId::Number(n) => n.to_string(),
    };
    if id.is_empty() {
        return None;
    }
    let name = raw.name?.trim().to_string();
    let well_compliance = WellCompliance::parse(raw.well_compliance.as_deref()?)?;
    let spaces = u32::try_from(raw.spaces.unwrap_or(0)).ok()?;
    let air_quality = raw.air_quality.filter(|v| is_percentage(*v))?;
    let thermal_comfort = raw.thermal_comfort.filter(|v| is_percentage(*v))?;

    let metrics = raw.metrics.unwrap_or_default();
    if !metrics_in_range(&metrics) {
        return None;
    }
    let data_by_period = by_period(raw.data_by_period, &mut report.dropped_periods);
    if !data_by_period
        .values()
        .all(|s| is_percentage(s.air_quality) && is_percentage(s.thermal_comfort))
    {
        return None;
    }
    let metrics_by_period = by_period(raw.metrics_by_period, &mut report.dropped_periods);
    if !metrics_by_period.values().all(metrics_in_range) {
        return None;
    }

    let last_updated = parse_timestamp_safe(raw.last_updated.as_deref());
    if last_updated.is_none() && raw.last_updated.is_some() {
        // Kept without a timestamp; the date filter lets it through.
        warn!(building = %id, value = ?raw.last_updated, "unparseable lastUpdated");
        report.unparsed_timestamps += 1;
    }

    Some(Building {
        id,
        name,
        image: raw.image,
        spaces,
        well_compliance,
        air_quality,
        thermal_comfort,
        last_updated,
        metrics,
        data_by_period,
        metrics_by_period,
    })
}

/// Parse a JSON array of building records. Rows that fail to decode or
/// validate are skipped and counted, as are duplicate ids.
pub fn parse_dataset(text: &str, path: &str) -> Result<(Vec<Building>, LoadReport), AppError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(|source| AppError::Json {
        path: path.to_string(),
        source,
    })?;
    let serde_json::Value::Array(rows) = value else {
        return Err(AppError::NotAnArray { path: path.to_string() });
    };

    let mut report = LoadReport::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut buildings = Vec::new();

    for (idx, row) in rows.into_iter().enumerate() {
        report.total_rows += 1;
        let raw: RawBuilding = match serde_json::from_value(row) {
            Ok(r) => r,
            Err(e) => {
                debug!(row = idx, error = %e, "row failed to decode");
                report.rejected += 1;
                continue;
            }
        };
        let Some(building) = clean(raw, &mut report) else {
            debug!(row = idx, "row failed validation");
            report.rejected += 1;
            continue;
        };
        if !seen.insert(building.id.clone()) {
            warn!(building = %building.id, "duplicate id");
            report.rejected += 1;
            continue;
        }
        buildings.push(building);
    }

    report.loaded_rows = buildings.len();
    Ok((buildings, report))
}

pub fn load_dataset(path: &str) -> Result<(Vec<Building>, LoadReport), AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_string(),
        source,
    })?;
    parse_dataset(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;

    const DATASET: &str = r#"[
        {
            "id": "1",
            "name": "Calgary Demo Office",
            "spaces": 6,
            "wellCompliance": "needs-attention",
            "airQuality": 67.2,
            "thermalComfort": 42.6,
            "lastUpdated": "2024-05-27 09:00:00",
            "dataByPeriod": {
                "7days": { "airQuality": 65.0, "thermalComfort": 44.1 },
                "fortnight": { "airQuality": 1.0, "thermalComfort": 1.0 }
            },
            "metrics": {
                "airQuality": [{ "name": "CO₂", "target": "≤ 900 ppm", "timeInTarget": 44, "unit": "ppm" }],
                "thermalComfort": [{ "name": "Humidity", "target": "30 - 60 %", "timeInTarget": 16 }]
            },
            "metricsByPeriod": null
        },
        {
            "id": 2,
            "name": "Calgary Office",
            "spaces": 10,
            "wellCompliance": "passing",
            "airQuality": 55.3,
            "thermalComfort": 68.9,
            "lastUpdated": "not a date"
        },
        { "id": "3", "name": "Broken", "wellCompliance": "unknown", "airQuality": 1, "thermalComfort": 1 },
        { "id": "4", "name": "Too Hot", "wellCompliance": "passing", "airQuality": 150, "thermalComfort": 1 },
        { "id": "1", "name": "Duplicate", "wellCompliance": "passing", "airQuality": 1, "thermalComfort": 1 },
        { "id": "5", "name": "Negative", "spaces": -2, "wellCompliance": "no-report", "airQuality": 1, "thermalComfort": 1 },
        "not an object"
    ]"#;

    #[test]
    fn loads_valid_rows_and_counts_rejects() {
        let (buildings, report) = parse_dataset(DATASET, "inline").unwrap();
        assert_eq!(report.total_rows, 7);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.rejected, 5);
        assert_eq!(report.unparsed_timestamps, 1);
        assert_eq!(report.dropped_periods, 1);

        let first = &buildings[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.last_updated, Some(at(2024, 5, 27, 9, 0, 0)));
        assert_eq!(first.summary_for(DateRangePreset::Last7Days).air_quality, 65.0);
        assert_eq!(first.metrics.air_quality[0].time_in_target, 44.0);
        assert!(first.metrics_by_period.is_empty());

        let second = &buildings[1];
        assert_eq!(second.id, "2");
        assert_eq!(second.well_compliance, WellCompliance::Passing);
        assert_eq!(second.last_updated, None);
    }

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_dataset(r#"{"id": "1"}"#, "obj.json").unwrap_err();
        assert!(matches!(err, AppError::NotAnArray { .. }));
        let err = parse_dataset("[", "bad.json").unwrap_err();
        assert!(matches!(err, AppError::Json { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_dataset("/nonexistent/portfolio.json").unwrap_err();
        assert!(matches!(err, AppError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/portfolio.json"));
    }
}

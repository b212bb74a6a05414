// Built-in sample portfolio.
//
// The records are fixed fixtures. Timestamps are stored as "days before now"
// and materialized against the caller's clock; per-period variants come from
// a fixed jitter table so every run shows the same numbers.
use crate::types::{
    Building, BuildingMetrics, DateRangePreset, MetricEntry, PeriodSummary, WellCompliance,
};
use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use std::collections::HashMap;

const IMAGES: [&str; 7] = [
    "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1582407947304-fd86f028f716?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1565538810643-b5bdb714032a?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1554995207-c18c203602cb?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1568605114967-8130f3a36994?w=100&h=100&fit=crop",
];

// (name, target, unit)
const AIR_METRICS: [(&str, &str, &str); 3] = [
    ("CO₂", "≤ 900 ppm", "ppm"),
    ("PM₂.₅", "≤ 15 μg/m³", "μg/m³"),
    ("TVOC", "≤ 109 ppb", "ppb"),
];
const THERMAL_METRICS: [(&str, &str, &str); 2] = [
    ("Humidity", "30 - 60 %", "%"),
    ("Temperature", "20 - 26 °C", "°C"),
];

// Fractions in [-1, 1] standing in for random noise.
const JITTER: [f64; 11] = [
    0.62, -0.35, 0.18, -0.91, 0.47, -0.12, 0.83, -0.58, 0.29, -0.74, 0.05,
];

const PERIODS: [DateRangePreset; 4] = [
    DateRangePreset::Last7Days,
    DateRangePreset::Last30Days,
    DateRangePreset::Last3Months,
    DateRangePreset::Last6Months,
];

struct Seed {
    id: &'static str,
    name: &'static str,
    spaces: u32,
    compliance: WellCompliance,
    air_quality: f64,
    thermal_comfort: f64,
    days_ago: i64,
    metrics: BuildingMetrics,
}

fn metrics(air: [f64; 3], thermal: [f64; 2]) -> BuildingMetrics {
    let entry = |(name, target, unit): (&str, &str, &str), v: f64| MetricEntry {
        name: name.to_string(),
        target: target.to_string(),
        time_in_target: v,
        unit: Some(unit.to_string()),
    };
    BuildingMetrics {
        air_quality: AIR_METRICS.into_iter().zip(air).map(|(m, v)| entry(m, v)).collect(),
        thermal_comfort: THERMAL_METRICS
            .into_iter()
            .zip(thermal)
            .map(|(m, v)| entry(m, v))
            .collect(),
    }
}

static SEEDS: Lazy<Vec<Seed>> = Lazy::new(|| {
    use WellCompliance::{NeedsAttention, Passing};
    let seed = |id, name, spaces, compliance, aq, tc, days_ago, air, thermal| Seed {
        id,
        name,
        spaces,
        compliance,
        air_quality: aq,
        thermal_comfort: tc,
        days_ago,
        metrics: metrics(air, thermal),
    };
    vec![
        seed("1", "Calgary Demo Office", 6, NeedsAttention, 67.2, 42.6, 5, [44.0, 100.0, 58.0], [16.0, 70.0]),
        seed("2", "Calgary Office", 10, NeedsAttention, 55.3, 68.9, 12, [62.0, 89.0, 41.0], [72.0, 65.0]),
        seed("3", "Capitol Records Building Tower", 33, Passing, 85.4, 91.2, 20, [88.0, 95.0, 82.0], [93.0, 89.0]),
        seed("4", "Kaiterra Test", 1, NeedsAttention, 66.7, 50.0, 35, [72.0, 68.0, 60.0], [50.0, 50.0]),
        seed("5", "Royal Canadian Art Museum", 34, Passing, 78.5, 82.3, 45, [81.0, 84.0, 71.0], [85.0, 80.0]),
        seed("6", "SE-300 Demo Building", 2, NeedsAttention, 45.8, 38.2, 60, [42.0, 58.0, 37.0], [35.0, 41.0]),
        seed("7", "Test Building", 0, NeedsAttention, 32.1, 28.5, 75, [28.0, 45.0, 23.0], [31.0, 26.0]),
        seed("8", "The White House", 52, Passing, 92.3, 88.7, 90, [95.0, 98.0, 84.0], [90.0, 87.0]),
        seed("9", "United Nations Headquarters", 116, Passing, 87.9, 85.4, 120, [91.0, 92.0, 81.0], [88.0, 83.0]),
        seed("10", "WELL Office", 10, Passing, 94.2, 96.8, 180, [97.0, 99.0, 87.0], [98.0, 96.0]),
    ]
});

fn summary_variance(period: DateRangePreset) -> f64 {
    match period {
        DateRangePreset::Last7Days => 3.0,
        DateRangePreset::Last3Months => 5.0,
        DateRangePreset::Last6Months => 6.0,
        _ => 0.0,
    }
}

fn metric_variance(period: DateRangePreset) -> f64 {
    match period {
        DateRangePreset::Last7Days => 5.0,
        DateRangePreset::Last3Months => 8.0,
        DateRangePreset::Last6Months => 12.0,
        _ => 0.0,
    }
}

/// Deterministic offset of `base` by up to `variance`, kept in `[0, 100]`
/// and rounded to one decimal.
fn vary(base: f64, variance: f64, slot: usize) -> f64 {
    let v = base + JITTER[slot % JITTER.len()] * variance;
    (v.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

fn vary_metrics(base: &BuildingMetrics, variance: f64, slot: usize) -> BuildingMetrics {
    let shift = |list: &[MetricEntry], offset: usize| -> Vec<MetricEntry> {
        list.iter()
            .enumerate()
            .map(|(k, m)| MetricEntry {
                time_in_target: vary(m.time_in_target, variance, slot + offset + k),
                ..m.clone()
            })
            .collect()
    };
    BuildingMetrics {
        air_quality: shift(&base.air_quality, 0),
        thermal_comfort: shift(&base.thermal_comfort, base.air_quality.len()),
    }
}

/// The ten-building demo portfolio, timestamped relative to `now`.
pub fn sample_buildings(now: NaiveDateTime) -> Vec<Building> {
    SEEDS
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let mut data_by_period = HashMap::new();
            let mut metrics_by_period = HashMap::new();
            for (p, period) in PERIODS.into_iter().enumerate() {
                let slot = i * 7 + p * 3;
                let variance = summary_variance(period);
                data_by_period.insert(
                    period,
                    PeriodSummary {
                        air_quality: vary(s.air_quality, variance, slot),
                        thermal_comfort: vary(s.thermal_comfort, variance, slot + 1),
                    },
                );
                metrics_by_period.insert(period, vary_metrics(&s.metrics, metric_variance(period), slot));
            }
            Building {
                id: s.id.to_string(),
                name: s.name.to_string(),
                image: Some(IMAGES[i % IMAGES.len()].to_string()),
                spaces: s.spaces,
                well_compliance: s.compliance,
                air_quality: s.air_quality,
                thermal_comfort: s.thermal_comfort,
                last_updated: Some(now - Duration::days(s.days_ago)),
                metrics: s.metrics.clone(),
                data_by_period,
                metrics_by_period,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::at;
    use std::collections::HashSet;

    #[test]
    fn sample_is_ten_unique_buildings() {
        let data = sample_buildings(at(2024, 6, 1, 9, 0, 0));
        assert_eq!(data.len(), 10);
        let ids: HashSet<_> = data.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        let passing = data.iter().filter(|b| b.well_compliance == WellCompliance::Passing).count();
        assert_eq!(passing, 5);
    }

    #[test]
    fn sample_is_deterministic_and_in_range() {
        let now = at(2024, 6, 1, 9, 0, 0);
        let a = sample_buildings(now);
        let b = sample_buildings(now);
        assert_eq!(a, b);
        for building in &a {
            for summary in building.data_by_period.values() {
                assert!((0.0..=100.0).contains(&summary.air_quality));
                assert!((0.0..=100.0).contains(&summary.thermal_comfort));
            }
            for m in building.metrics_by_period.values() {
                assert!(m.entries().all(|(_, e)| (0.0..=100.0).contains(&e.time_in_target)));
            }
        }
    }

    #[test]
    fn thirty_day_variant_matches_base() {
        let data = sample_buildings(at(2024, 6, 1, 9, 0, 0));
        for b in &data {
            let s = b.summary_for(DateRangePreset::Last30Days);
            assert_eq!(s.air_quality, b.air_quality);
            assert_eq!(s.thermal_comfort, b.thermal_comfort);
            assert_eq!(b.metrics_for(DateRangePreset::Last30Days), &b.metrics);
        }
    }

    #[test]
    fn timestamps_are_relative_to_now() {
        let now = at(2024, 6, 1, 9, 0, 0);
        let data = sample_buildings(now);
        assert_eq!(data[0].last_updated, Some(now - Duration::days(5)));
        assert_eq!(data[9].last_updated, Some(now - Duration::days(180)));
    }
}

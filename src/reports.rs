use crate::indicator::classify;
use crate::types::{Building, DateRangePreset, IndicatorLevel, PortfolioSummary, TierCounts, WellCompliance};
use crate::util::average;

fn tiers(values: impl Iterator<Item = f64>) -> TierCounts {
    let mut counts = TierCounts::default();
    for v in values {
        match classify(v) {
            IndicatorLevel::Low => counts.low += 1,
            IndicatorLevel::Mid => counts.mid += 1,
            IndicatorLevel::High => counts.high += 1,
        }
    }
    counts
}

/// Roll up a (usually filtered and period-projected) set of buildings.
pub fn generate_summary(data: &[Building], preset: DateRangePreset) -> PortfolioSummary {
    let count = |c: WellCompliance| data.iter().filter(|b| b.well_compliance == c).count();
    let air: Vec<f64> = data.iter().map(|b| b.air_quality).collect();
    let thermal: Vec<f64> = data.iter().map(|b| b.thermal_comfort).collect();
    PortfolioSummary {
        preset,
        total_buildings: data.len(),
        total_spaces: data.iter().map(|b| u64::from(b.spaces)).sum(),
        passing: count(WellCompliance::Passing),
        needs_attention: count(WellCompliance::NeedsAttention),
        no_report: count(WellCompliance::NoReport),
        avg_air_quality: average(&air),
        avg_thermal_comfort: average(&thermal),
        air_quality_tiers: tiers(air.iter().copied()),
        thermal_comfort_tiers: tiers(thermal.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::building;

    #[test]
    fn summary_counts_and_averages() {
        let mut a = building("1", "A", WellCompliance::Passing);
        a.spaces = 10;
        a.air_quality = 80.0;
        a.thermal_comfort = 40.0;
        let mut b = building("2", "B", WellCompliance::NoReport);
        b.spaces = 5;
        b.air_quality = 50.0;
        b.thermal_comfort = 60.0;

        let s = generate_summary(&[a, b], DateRangePreset::Last7Days);
        assert_eq!(s.total_buildings, 2);
        assert_eq!(s.total_spaces, 15);
        assert_eq!((s.passing, s.needs_attention, s.no_report), (1, 0, 1));
        assert_eq!(s.avg_air_quality, 65.0);
        assert_eq!(s.avg_thermal_comfort, 50.0);
        assert_eq!(s.air_quality_tiers, TierCounts { low: 0, mid: 1, high: 1 });
        assert_eq!(s.thermal_comfort_tiers, TierCounts { low: 1, mid: 1, high: 0 });
    }

    #[test]
    fn empty_summary_is_zeroed() {
        let s = generate_summary(&[], DateRangePreset::Last30Days);
        assert_eq!(s.total_buildings, 0);
        assert_eq!(s.avg_air_quality, 0.0);
        assert_eq!(s.air_quality_tiers, TierCounts::default());
    }
}

// Filtering, period projection and sorting over building records.
//
// Every function returns a fresh `Vec` and keeps the input's relative order
// unless it is explicitly a sort.
use crate::date_range;
use crate::types::{Building, ComplianceFilter, DateRange, DateRangePreset, SortDirection, SortKey};
use std::cmp::Ordering;

/// Inputs of the combined filter predicate.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria<'a> {
    pub search_query: &'a str,
    pub compliance: ComplianceFilter,
    pub date_range: Option<DateRange>,
}

pub fn matches_search(building: &Building, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    building
        .name
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Records without a usable timestamp carry no temporal constraint and pass.
pub fn matches_date_range(building: &Building, range: Option<&DateRange>) -> bool {
    match (range, building.last_updated) {
        (Some(r), Some(ts)) if date_range::is_valid(r) => date_range::contains(r, ts),
        _ => true,
    }
}

pub fn matches(building: &Building, criteria: &FilterCriteria<'_>) -> bool {
    matches_search(building, criteria.search_query)
        && criteria.compliance.matches(building.well_compliance)
        && matches_date_range(building, criteria.date_range.as_ref())
}

pub fn filter_buildings(records: &[Building], criteria: &FilterCriteria<'_>) -> Vec<Building> {
    records
        .iter()
        .filter(|b| matches(b, criteria))
        .cloned()
        .collect()
}

/// Swap each record's headline values for the variant recorded for `preset`.
pub fn project_for_period(records: &[Building], preset: DateRangePreset) -> Vec<Building> {
    records
        .iter()
        .map(|b| {
            let summary = b.summary_for(preset);
            Building {
                air_quality: summary.air_quality,
                thermal_comfort: summary.thermal_comfort,
                ..b.clone()
            }
        })
        .collect()
}

fn compare(a: &Building, b: &Building, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Spaces => a.spaces.cmp(&b.spaces),
        SortKey::AirQuality => a
            .air_quality
            .partial_cmp(&b.air_quality)
            .unwrap_or(Ordering::Equal),
        SortKey::ThermalComfort => a
            .thermal_comfort
            .partial_cmp(&b.thermal_comfort)
            .unwrap_or(Ordering::Equal),
    }
}

/// Stable sort; ties keep their incoming order in both directions.
pub fn sort_buildings(records: &[Building], key: SortKey, direction: SortDirection) -> Vec<Building> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| match direction {
        SortDirection::Asc => compare(a, b, key),
        SortDirection::Desc => compare(b, a, key),
    });
    sorted
}

/// Compliance filter selection with memory of where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveFilters {
    pub compliance: ComplianceFilter,
    initial: ComplianceFilter,
}

impl ActiveFilters {
    pub fn new(initial: ComplianceFilter) -> Self {
        Self { compliance: initial, initial }
    }

    pub fn update(&mut self, compliance: ComplianceFilter) {
        self.compliance = compliance;
    }

    pub fn reset(&mut self) {
        self.compliance = self.initial;
    }

    pub fn has_active_filters(&self) -> bool {
        self.compliance != self.initial
    }
}

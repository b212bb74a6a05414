use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tabled::Tabled;

/// WELL certification status reported for a building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WellCompliance {
    Passing,
    NeedsAttention,
    NoReport,
}

impl WellCompliance {
    pub const ALL: [WellCompliance; 3] = [
        WellCompliance::Passing,
        WellCompliance::NeedsAttention,
        WellCompliance::NoReport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WellCompliance::Passing => "passing",
            WellCompliance::NeedsAttention => "needs-attention",
            WellCompliance::NoReport => "no-report",
        }
    }

    /// Human readable badge text.
    pub fn label(&self) -> &'static str {
        match self {
            WellCompliance::Passing => "Passing",
            WellCompliance::NeedsAttention => "Needs Attention",
            WellCompliance::NoReport => "No Report",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }
}

impl fmt::Display for WellCompliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorical filter over [`WellCompliance`]; `All` disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplianceFilter {
    #[default]
    All,
    Only(WellCompliance),
}

impl ComplianceFilter {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "all" => Some(ComplianceFilter::All),
            other => WellCompliance::parse(other).map(ComplianceFilter::Only),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceFilter::All => "all",
            ComplianceFilter::Only(c) => c.as_str(),
        }
    }

    pub fn matches(&self, compliance: WellCompliance) -> bool {
        match self {
            ComplianceFilter::All => true,
            ComplianceFilter::Only(wanted) => *wanted == compliance,
        }
    }
}

/// Named relative date windows offered by the date selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateRangePreset {
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "7days")]
    Last7Days,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "3months")]
    Last3Months,
    #[serde(rename = "6months")]
    Last6Months,
}

impl DateRangePreset {
    pub const ALL: [DateRangePreset; 5] = [
        DateRangePreset::Custom,
        DateRangePreset::Last7Days,
        DateRangePreset::Last30Days,
        DateRangePreset::Last3Months,
        DateRangePreset::Last6Months,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DateRangePreset::Custom => "custom",
            DateRangePreset::Last7Days => "7days",
            DateRangePreset::Last30Days => "30days",
            DateRangePreset::Last3Months => "3months",
            DateRangePreset::Last6Months => "6months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DateRangePreset::Custom => "Custom",
            DateRangePreset::Last7Days => "Last 7 Days",
            DateRangePreset::Last30Days => "Last 30 Days",
            DateRangePreset::Last3Months => "Last 3 Months",
            DateRangePreset::Last6Months => "Last 6 Months",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s.trim())
    }
}

impl fmt::Display for DateRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete inclusive window `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

/// A custom window as picked by the user; either bound may still be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl CustomRange {
    pub fn new(from: NaiveDateTime, to: NaiveDateTime) -> Self {
        Self { from: Some(from), to: Some(to) }
    }

    /// Only a complete and ordered pair constrains anything.
    pub fn to_range(&self) -> Option<DateRange> {
        match (self.from, self.to) {
            (Some(from), Some(to)) if from <= to => Some(DateRange { from, to }),
            _ => None,
        }
    }
}

/// Three-tier severity of a percentage indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorLevel {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEntry {
    pub name: String,
    pub target: String,
    pub time_in_target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingMetrics {
    #[serde(default)]
    pub air_quality: Vec<MetricEntry>,
    #[serde(default)]
    pub thermal_comfort: Vec<MetricEntry>,
}

impl BuildingMetrics {
    /// Every entry in display order, tagged with its category label.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &MetricEntry)> {
        self.air_quality
            .iter()
            .map(|m| ("Air Quality", m))
            .chain(self.thermal_comfort.iter().map(|m| ("Thermal Comfort", m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub air_quality: f64,
    pub thermal_comfort: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub spaces: u32,
    pub well_compliance: WellCompliance,
    pub air_quality: f64,
    pub thermal_comfort: f64,
    pub last_updated: Option<NaiveDateTime>,
    pub metrics: BuildingMetrics,
    pub data_by_period: HashMap<DateRangePreset, PeriodSummary>,
    pub metrics_by_period: HashMap<DateRangePreset, BuildingMetrics>,
}

impl Building {
    /// Headline values for `preset`, falling back to the base values.
    pub fn summary_for(&self, preset: DateRangePreset) -> PeriodSummary {
        self.data_by_period
            .get(&preset)
            .copied()
            .unwrap_or(PeriodSummary {
                air_quality: self.air_quality,
                thermal_comfort: self.thermal_comfort,
            })
    }

    /// Metric breakdown for `preset`, falling back to the base metrics.
    pub fn metrics_for(&self, preset: DateRangePreset) -> &BuildingMetrics {
        self.metrics_by_period.get(&preset).unwrap_or(&self.metrics)
    }

    /// Navigation target handed to the router.
    pub fn link(&self) -> String {
        format!("/building/{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Spaces,
    AirQuality,
    ThermalComfort,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "name" => Some(SortKey::Name),
            "spaces" => Some(SortKey::Spaces),
            "air" | "airQuality" | "air-quality" => Some(SortKey::AirQuality),
            "thermal" | "thermalComfort" | "thermal-comfort" => Some(SortKey::ThermalComfort),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct BuildingRow {
    #[serde(skip)]
    #[tabled(rename = "")]
    pub marker: String,
    #[serde(rename = "Id")]
    #[tabled(rename = "Id")]
    pub id: String,
    #[serde(rename = "Building")]
    #[tabled(rename = "Building")]
    pub name: String,
    #[serde(rename = "Spaces")]
    #[tabled(rename = "Spaces")]
    pub spaces: u32,
    #[serde(rename = "WellCompliance")]
    #[tabled(rename = "WELL v2 Compliance")]
    pub compliance: String,
    #[serde(rename = "AirQuality")]
    #[tabled(rename = "Air Quality")]
    pub air_quality: String,
    #[serde(rename = "ThermalComfort")]
    #[tabled(rename = "Thermal Comfort")]
    pub thermal_comfort: String,
    #[serde(rename = "Link")]
    #[tabled(skip)]
    pub link: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Target")]
    pub target: String,
    #[tabled(rename = "% Time In Targets")]
    pub time_in_target: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub low: usize,
    pub mid: usize,
    pub high: usize,
}

#[derive(Debug, Serialize)]
pub struct PortfolioSummary {
    pub preset: DateRangePreset,
    pub total_buildings: usize,
    pub total_spaces: u64,
    pub passing: usize,
    pub needs_attention: usize,
    pub no_report: usize,
    pub avg_air_quality: f64,
    pub avg_thermal_comfort: f64,
    pub air_quality_tiers: TierCounts,
    pub thermal_comfort_tiers: TierCounts,
}

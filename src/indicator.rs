// Indicator thresholds shared by the building rows and the expanded metric
// rows. Values are classified, never clamped.
use crate::types::IndicatorLevel;
use crate::util::format_number;

/// Below this value an indicator is `Low`.
pub const ERROR_THRESHOLD: f64 = 50.0;
/// Below this value (and at or above [`ERROR_THRESHOLD`]) an indicator is `Mid`.
pub const WARNING_THRESHOLD: f64 = 75.0;

pub fn classify(value: f64) -> IndicatorLevel {
    if value < ERROR_THRESHOLD {
        IndicatorLevel::Low
    } else if value < WARNING_THRESHOLD {
        IndicatorLevel::Mid
    } else {
        IndicatorLevel::High
    }
}

impl IndicatorLevel {
    pub fn color(&self) -> &'static str {
        match self {
            IndicatorLevel::Low => "red",
            IndicatorLevel::Mid => "yellow",
            IndicatorLevel::High => "green",
        }
    }
}

/// Text rendition of an indicator dot, e.g. `67.2% (yellow)`.
pub fn indicator_cell(value: f64) -> String {
    format!("{}% ({})", format_number(value, 1), classify(value).color())
}

// Buildings table pipeline for a building-portfolio dashboard: period
// projection, search / compliance / date filtering, sorting, pagination and
// row expansion, plus the terminal rendering and exports around it.
pub mod cli;
pub mod dataset;
pub mod date_range;
pub mod error;
pub mod expansion;
pub mod filters;
pub mod indicator;
pub mod loader;
pub mod output;
pub mod pagination;
pub mod reports;
pub mod table;
pub mod types;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::types::{Building, BuildingMetrics, WellCompliance};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::collections::HashMap;

    pub fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid test timestamp")
    }

    pub fn building(id: &str, name: &str, compliance: WellCompliance) -> Building {
        Building {
            id: id.to_string(),
            name: name.to_string(),
            image: None,
            spaces: 1,
            well_compliance: compliance,
            air_quality: 60.0,
            thermal_comfort: 60.0,
            last_updated: None,
            metrics: BuildingMetrics::default(),
            data_by_period: HashMap::new(),
            metrics_by_period: HashMap::new(),
        }
    }
}

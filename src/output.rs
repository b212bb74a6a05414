use crate::date_range::format_date_range;
use crate::error::AppError;
use crate::indicator::indicator_cell;
use crate::table::{BuildingsTable, TableView};
use crate::types::{Building, BuildingRow, DateRangePreset, MetricRow};
use crate::util::format_int;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

pub const NO_RESULTS: &str = "No buildings found.";

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), AppError> {
    let csv_err = |source| AppError::Csv { path: path.to_string(), source };
    let mut wtr = csv::Writer::from_path(path).map_err(csv_err)?;
    for r in rows {
        wtr.serialize(r).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| AppError::Write { path: path.to_string(), source })?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), AppError> {
    let s = serde_json::to_string_pretty(value).map_err(|source| AppError::Json {
        path: path.to_string(),
        source,
    })?;
    std::fs::write(path, s).map_err(|source| AppError::Write { path: path.to_string(), source })?;
    Ok(())
}

pub fn building_row(b: &Building, expanded: bool) -> BuildingRow {
    BuildingRow {
        marker: if expanded { "▾" } else { "▸" }.to_string(),
        id: b.id.clone(),
        name: b.name.clone(),
        spaces: b.spaces,
        compliance: b.well_compliance.label().to_string(),
        air_quality: indicator_cell(b.air_quality),
        thermal_comfort: indicator_cell(b.thermal_comfort),
        link: b.link(),
    }
}

pub fn metric_rows(b: &Building, preset: DateRangePreset) -> Vec<MetricRow> {
    b.metrics_for(preset)
        .entries()
        .map(|(category, m)| MetricRow {
            metric: m.name.clone(),
            category: category.to_string(),
            target: m.target.clone(),
            time_in_target: indicator_cell(m.time_in_target),
        })
        .collect()
}

pub fn table_string<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Render one frame of the buildings table, expanded rows included.
pub fn render(table: &BuildingsTable, view: &TableView) -> String {
    let mut out = String::new();
    let state = table.state();
    out.push_str(&format!("Date range: {}", view.preset.label()));
    let range = format_date_range(view.date_range.as_ref());
    if !range.is_empty() {
        out.push_str(&format!(" ({})", range));
    }
    out.push('\n');
    out.push_str(&format!(
        "Search: \"{}\" | WELL compliance: {}\n\n",
        state.search_query,
        state.filters.compliance.as_str()
    ));

    if view.is_empty() {
        out.push_str(NO_RESULTS);
        out.push_str("\n\n");
        return out;
    }

    let rows: Vec<BuildingRow> = view
        .page
        .items
        .iter()
        .map(|b| building_row(b, table.is_expanded(&b.id)))
        .collect();
    out.push_str(&table_string(rows));
    out.push_str("\n\n");

    for b in view.page.items.iter().filter(|b| table.is_expanded(&b.id)) {
        out.push_str(&format!("{} ({})\n", b.name, b.link()));
        out.push_str(&table_string(metric_rows(b, view.preset)));
        out.push_str("\n\n");
    }

    out.push_str(&format!("{} buildings", format_int(view.page.total_items)));
    if view.page.show_controls() {
        out.push_str(&format!(
            " | Page {} of {} | Rows per page: {}",
            view.page.current_page, view.page.total_pages, view.items_per_page
        ));
    }
    out.push_str("\n\n");
    out
}

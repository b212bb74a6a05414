// Entry point and interactive menu.
//
// Every menu option maps to exactly one table action; after it runs the
// current page of the table is rendered again.
use chrono::{Local, NaiveDateTime};
use clap::Parser;
use portfolio_table::cli::CliArgs;
use portfolio_table::output;
use portfolio_table::reports;
use portfolio_table::table::{BuildingsTable, TableAction};
use portfolio_table::types::{BuildingRow, ComplianceFilter, CustomRange, DateRangePreset, SortKey};
use portfolio_table::util::{self, parse_date_safe, parse_i64_safe, read_trimmed_line};
use portfolio_table::{dataset, loader};
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, Level};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Print `prompt` and read one trimmed line; `None` once stdin is closed.
fn read_input(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    read_trimmed_line(&mut io::stdin().lock())
}

fn print_menu() {
    println!("[1] Search          [2] WELL filter     [3] Date preset");
    println!("[4] Custom range    [5] Go to page      [6] Next page");
    println!("[7] Previous page   [8] Rows per page   [9] Toggle row");
    println!("[10] Sort           [11] Expand page    [12] Collapse all");
    println!("[13] Reset filter   [14] Reset dates    [15] Export");
    println!("[0] Exit\n");
}

/// Build the table from `--dataset` or the built-in sample.
fn build_table(args: &CliArgs) -> Option<BuildingsTable> {
    let now = now();
    let data = match &args.dataset {
        Some(path) => match loader::load_dataset(path) {
            Ok((data, report)) => {
                println!(
                    "Loaded {} buildings from {} ({} rows, {} rejected)",
                    util::format_int(report.loaded_rows),
                    path,
                    util::format_int(report.total_rows),
                    util::format_int(report.rejected)
                );
                if report.unparsed_timestamps > 0 {
                    println!(
                        "Note: {} buildings have no usable lastUpdated and ignore the date filter.",
                        util::format_int(report.unparsed_timestamps)
                    );
                }
                data
            }
            Err(e) => {
                eprintln!("Failed to load dataset: {}", e);
                return None;
            }
        },
        None => dataset::sample_buildings(now),
    };
    info!(buildings = data.len(), preset = %args.preset, "table ready");

    let mut table = BuildingsTable::with_preset(data, now, args.preset);
    table.dispatch(TableAction::SetItemsPerPage(args.page_size));
    table.dispatch(TableAction::SetComplianceFilter(args.compliance));
    if let Some(q) = &args.search {
        table.dispatch(TableAction::SetSearch(q.clone()));
    }
    Some(table)
}

fn prompt_compliance() -> Option<TableAction> {
    let raw = read_input("Filter (all, passing, needs-attention, no-report): ")?;
    match ComplianceFilter::parse(&raw) {
        Some(f) => Some(TableAction::SetComplianceFilter(f)),
        None => {
            println!("Invalid filter.\n");
            None
        }
    }
}

fn prompt_preset() -> Option<TableAction> {
    let raw = read_input("Preset (custom, 7days, 30days, 3months, 6months): ")?;
    match DateRangePreset::parse(&raw) {
        Some(p) => Some(TableAction::SetDatePreset(p)),
        None => {
            println!("Invalid preset.\n");
            None
        }
    }
}

/// Blank or malformed dates leave that bound open.
fn prompt_custom_range() -> Option<TableAction> {
    let from = parse_date_safe(Some(read_input("From (YYYY-MM-DD): ")?.as_str()))
        .and_then(|d| d.and_hms_milli_opt(0, 0, 0, 0));
    let to = parse_date_safe(Some(read_input("To (YYYY-MM-DD): ")?.as_str()))
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999));
    Some(TableAction::SetCustomRange(CustomRange { from, to }))
}

fn prompt_number(prompt: &str) -> Option<i64> {
    let n = parse_i64_safe(Some(read_input(prompt)?.as_str()));
    if n.is_none() {
        println!("Please enter a number.\n");
    }
    n
}

fn prompt_sort() -> Option<TableAction> {
    let raw = read_input("Sort by (name, spaces, air, thermal, none): ")?;
    if raw == "none" {
        return Some(TableAction::ClearSort);
    }
    match SortKey::parse(&raw) {
        Some(k) => Some(TableAction::SetSort(k)),
        None => {
            println!("Invalid sort key.\n");
            None
        }
    }
}

/// Write the whole filtered set as CSV plus a JSON summary.
fn handle_export(table: &BuildingsTable, export_dir: &str) {
    let filtered = table.filtered();
    let rows: Vec<BuildingRow> = filtered
        .iter()
        .map(|b| output::building_row(b, table.is_expanded(&b.id)))
        .collect();
    let csv_path = Path::new(export_dir).join("buildings_view.csv");
    let csv_path = csv_path.to_string_lossy();
    match output::write_csv(&csv_path, &rows) {
        Ok(()) => println!("Exported {} rows to {}", util::format_int(rows.len()), csv_path),
        Err(e) => eprintln!("Write error: {}", e),
    }

    let summary = reports::generate_summary(&filtered, table.state().date_preset);
    let json_path = Path::new(export_dir).join("portfolio_summary.json");
    let json_path = json_path.to_string_lossy();
    match output::write_json(&json_path, &summary) {
        Ok(()) => println!("Summary written to {}\n", json_path),
        Err(e) => eprintln!("Write error: {}\n", e),
    }
}

fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let Some(mut table) = build_table(&args) else {
        std::process::exit(1);
    };

    loop {
        table.set_now(now());
        print!("{}", output::render(&table, &table.view()));
        print_menu();
        let Some(choice) = read_input("Enter choice: ") else {
            println!("\nExiting the program.");
            break;
        };
        let action = match choice.as_str() {
            "1" => read_input("Search buildings: ").map(TableAction::SetSearch),
            "2" => prompt_compliance(),
            "3" => prompt_preset(),
            "4" => prompt_custom_range(),
            "5" => prompt_number("Page: ").map(TableAction::SetPage),
            "6" => Some(TableAction::NextPage),
            "7" => Some(TableAction::PreviousPage),
            "8" => prompt_number("Rows per page (10, 25, 50, 100): ")
                .map(|n| TableAction::SetItemsPerPage(usize::try_from(n).unwrap_or(0))),
            "9" => read_input("Building id: ").map(TableAction::ToggleRow),
            "10" => prompt_sort(),
            "11" => Some(TableAction::ExpandAllOnPage),
            "12" => Some(TableAction::CollapseAll),
            "13" => Some(TableAction::ResetFilters),
            "14" => Some(TableAction::ResetDateRange),
            "15" => {
                handle_export(&table, &args.export_dir);
                None
            }
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0-15.\n");
                None
            }
        };
        if let Some(action) = action {
            table.dispatch(action);
        }
    }
}

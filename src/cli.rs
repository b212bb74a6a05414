use crate::pagination::{is_page_size_option, DEFAULT_PAGE_SIZE};
use crate::types::{ComplianceFilter, DateRangePreset};
use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "portfolio_table",
    version,
    about = "Browse a building portfolio's WELL compliance and indoor environment metrics",
    long_about = "Interactive buildings table with search, WELL compliance filter, date range presets, pagination and expandable per-building metrics.\n\nExamples:\n  portfolio_table\n  portfolio_table --preset 7days --page-size 25\n  portfolio_table --dataset portfolio.json --compliance passing -v"
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        short = 'o',
        long = "export-dir",
        value_name = "DIR",
        default_value = ".",
        help_heading = "Output",
        help = "Directory for CSV and JSON exports."
    )]
    pub export_dir: String,

    #[arg(
        short = 'd',
        long = "dataset",
        value_name = "FILE",
        help_heading = "Input",
        help = "JSON dataset of buildings (defaults to the built-in sample portfolio)."
    )]
    pub dataset: Option<String>,

    #[arg(
        short = 'p',
        long = "preset",
        value_name = "PRESET",
        default_value = "30days",
        value_parser = parse_preset,
        help_heading = "Table",
        help = "Initial date range: custom, 7days, 30days, 3months or 6months."
    )]
    pub preset: DateRangePreset,

    #[arg(
        short = 'n',
        long = "page-size",
        value_name = "ROWS",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = parse_page_size,
        help_heading = "Table",
        help = "Rows per page: 10, 25, 50 or 100."
    )]
    pub page_size: usize,

    #[arg(
        short = 'c',
        long = "compliance",
        value_name = "STATUS",
        default_value = "all",
        value_parser = parse_compliance,
        help_heading = "Table",
        help = "WELL compliance filter: all, passing, needs-attention or no-report."
    )]
    pub compliance: ComplianceFilter,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "Table",
        help = "Initial building name search."
    )]
    pub search: Option<String>,
}

pub fn parse_preset(s: &str) -> Result<DateRangePreset, String> {
    DateRangePreset::parse(s).ok_or_else(|| format!("unknown date range preset: {s}"))
}

pub fn parse_page_size(s: &str) -> Result<usize, String> {
    let n: usize = s.trim().parse().map_err(|_| format!("not a number: {s}"))?;
    if is_page_size_option(n) {
        Ok(n)
    } else {
        Err(format!("page size must be one of 10, 25, 50, 100 (got {n})"))
    }
}

pub fn parse_compliance(s: &str) -> Result<ComplianceFilter, String> {
    ComplianceFilter::parse(s).ok_or_else(|| format!("unknown compliance status: {s}"))
}

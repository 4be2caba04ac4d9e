mod config_cmd;
mod export_cmd;
mod month;
mod task;
mod workout;

pub use config_cmd::ConfigCommand;
pub use export_cmd::ExportCommand;
pub use month::MonthCommand;
pub use task::TaskCommand;
pub use workout::WorkoutCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse a `--date` argument, defaulting to today in local time. Only the
/// calendar date keys records; any time-of-day is dropped here.
pub(crate) fn parse_date(arg: Option<&str>) -> Result<NaiveDate, String> {
    match arg {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d)),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_valid() {
        let date = parse_date(Some("2024-03-01")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date(Some("03/01/2024")).is_err());
        assert!(parse_date(Some("not-a-date")).is_err());
    }

    #[test]
    fn test_parse_date_defaults_to_today() {
        let date = parse_date(None).unwrap();
        assert_eq!(date, Local::now().date_naive());
    }
}

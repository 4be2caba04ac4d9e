use chrono::{Datelike, Local, NaiveDate};
use clap::Args;

use crate::tracker::Tracker;

#[derive(Args)]
pub struct MonthCommand {
    /// Month (YYYY-MM), defaults to the current month
    #[arg(long, short)]
    month: Option<String>,
}

impl MonthCommand {
    pub fn run(&self, tracker: &Tracker) -> Result<(), Box<dyn std::error::Error>> {
        let first = parse_month(self.month.as_deref())?;

        let mut any = false;
        let mut day = first;
        while day.year() == first.year() && day.month() == first.month() {
            let mut markers = Vec::new();
            if tracker.has_workout(day) {
                markers.push("workout");
            }
            if tracker.has_tasks(day) {
                markers.push("tasks");
            }
            if !markers.is_empty() {
                println!("{}  {}", day, markers.join(", "));
                any = true;
            }

            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        if !any {
            println!("No records in {}", first.format("%Y-%m"));
        }
        Ok(())
    }
}

/// Parse a `--month` argument into the first day of that month, defaulting
/// to the current month.
fn parse_month(arg: Option<&str>) -> Result<NaiveDate, String> {
    match arg {
        Some(m) => NaiveDate::parse_from_str(&format!("{}-01", m), "%Y-%m-%d")
            .map_err(|_| format!("Invalid month '{}'. Use YYYY-MM.", m)),
        None => {
            let today = Local::now().date_naive();
            Ok(today.with_day(1).unwrap_or(today))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_valid() {
        let first = parse_month(Some("2024-03")).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_month_invalid() {
        assert!(parse_month(Some("March 2024")).is_err());
        assert!(parse_month(Some("2024-13")).is_err());
    }

    #[test]
    fn test_parse_month_defaults_to_current() {
        let first = parse_month(None).unwrap();
        assert_eq!(first.day(), 1);
    }
}

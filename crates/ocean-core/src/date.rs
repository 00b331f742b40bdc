//! Report dates.

use chrono::{NaiveDate, Utc};

use crate::constants::REPORT_DATE_FORMAT;
use crate::error::ConfigError;

/// Today's date in UTC, formatted for report names.
pub fn today() -> String {
    Utc::now().format(REPORT_DATE_FORMAT).to_string()
}

/// Resolve the date stamped on a report: the explicit value when given
/// (validated as a calendar date), otherwise today in UTC.
pub fn report_date(explicit: Option<&str>) -> Result<String, ConfigError> {
    match explicit {
        Some(raw) => {
            let trimmed = raw.trim();
            NaiveDate::parse_from_str(trimmed, REPORT_DATE_FORMAT)
                .map(|d| d.format(REPORT_DATE_FORMAT).to_string())
                .map_err(|_| ConfigError::InvalidDate(raw.to_string()))
        }
        None => Ok(today()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_date_is_kept() {
        assert_eq!(report_date(Some("2026-03-01")).unwrap(), "2026-03-01");
    }

    #[test]
    fn explicit_date_is_trimmed() {
        assert_eq!(report_date(Some(" 2026-03-01 ")).unwrap(), "2026-03-01");
    }

    #[test]
    fn impossible_date_rejected() {
        assert_eq!(
            report_date(Some("2026-02-30")),
            Err(ConfigError::InvalidDate("2026-02-30".into()))
        );
    }

    #[test]
    fn default_is_parseable_today() {
        let d = report_date(None).unwrap();
        assert!(NaiveDate::parse_from_str(&d, REPORT_DATE_FORMAT).is_ok());
        assert_eq!(d.len(), 10);
    }
}

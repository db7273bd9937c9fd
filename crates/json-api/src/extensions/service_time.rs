//! Service date and time query parsing helpers.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

/// Resolve an optional civil date or date-time, defaulting to now in the restaurants' zone.
pub(crate) trait ServiceTimeExt {
    fn into_service_date(self, tz: &TimeZone) -> Result<Date, StatusError>;

    fn into_service_datetime(self, tz: &TimeZone) -> Result<DateTime, StatusError>;
}

impl ServiceTimeExt for Option<String> {
    fn into_service_date(self, tz: &TimeZone) -> Result<Date, StatusError> {
        self.map(|value| value.parse::<Date>())
            .transpose()
            .or_400("could not parse date, expected YYYY-MM-DD")
            .map(|date| date.unwrap_or_else(|| now(tz).date()))
    }

    fn into_service_datetime(self, tz: &TimeZone) -> Result<DateTime, StatusError> {
        self.map(|value| value.parse::<DateTime>())
            .transpose()
            .or_400("could not parse date-time, expected YYYY-MM-DDTHH:MM")
            .map(|at| at.unwrap_or_else(|| now(tz)))
    }
}

impl ServiceTimeExt for QueryParam<String, false> {
    fn into_service_date(self, tz: &TimeZone) -> Result<Date, StatusError> {
        self.into_inner().into_service_date(tz)
    }

    fn into_service_datetime(self, tz: &TimeZone) -> Result<DateTime, StatusError> {
        self.into_inner().into_service_datetime(tz)
    }
}

fn now(tz: &TimeZone) -> DateTime {
    tz.to_datetime(Timestamp::now())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_given_date() -> TestResult {
        let parsed = Some("2026-12-24".to_string()).into_service_date(&TimeZone::UTC)?;

        assert_eq!(parsed, date(2026, 12, 24));

        Ok(())
    }

    #[test]
    fn parses_given_datetime() -> TestResult {
        let parsed = Some("2026-02-17T12:30".to_string()).into_service_datetime(&TimeZone::UTC)?;

        assert_eq!(parsed, date(2026, 2, 17).at(12, 30, 0, 0));

        Ok(())
    }

    #[test]
    fn rejects_malformed_date() {
        let parsed = Some("24/12/2026".to_string()).into_service_date(&TimeZone::UTC);

        assert!(parsed.is_err());
    }
}

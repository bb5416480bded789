//! Date parts for history rows.

use chrono::{DateTime, Utc};

/// A timestamp split the way the history table lays it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NiceDate {
    /// `Aug 7, 2026`
    pub date: String,
    /// `14:03:11`
    pub time: String,
}

pub fn nice_date(at: &DateTime<Utc>) -> NiceDate {
    NiceDate {
        date: at.format("%b %-d, %Y").to_string(),
        time: at.format("%H:%M:%S").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_nice_date_parts() {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 14, 3, 11).unwrap();
        let nice = nice_date(&at);
        assert_eq!(nice.date, "Aug 7, 2026");
        assert_eq!(nice.time, "14:03:11");
    }
}

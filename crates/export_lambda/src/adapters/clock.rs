use chrono::{NaiveDate, Utc};

pub trait ExportClock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in UTC, the Lambda execution environment's local zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ExportClock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

//! Invoice month arithmetic.
//!
//! Invoices are keyed by a calendar month written as `YYYY-MM`. [`YearMonth`] validates that
//! representation once at the boundary and exposes the UTC bounds used to select the sessions
//! that belong to a month.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

use crate::server::error::{invoice::InvoiceError, Error};

/// A calendar month, the unit every invoice covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month from numeric parts.
    ///
    /// # Returns
    /// - `Ok(YearMonth)` - Valid month between 1 and 12 of a four digit year
    /// - `Err(Error::InvoiceError(InvoiceError::InvalidDate))` - Out of range values
    pub fn new(year: i32, month: u32) -> Result<Self, Error> {
        if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(InvoiceError::InvalidDate(format!("{}-{}", year, month)).into());
        }

        Ok(Self { year, month })
    }

    /// Parses the separate `year` and `month` query values of the invoice routes.
    pub fn from_parts(year: &str, month: &str) -> Result<Self, Error> {
        format!("{}-{:0>2}", year.trim(), month.trim()).parse()
    }

    /// The month a timestamp falls in.
    pub fn of(date: DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The twelve months of a year, January first.
    pub fn months_of(year: i32) -> Result<Vec<Self>, Error> {
        (1..=12).map(|month| Self::new(year, month)).collect()
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First instant of the month.
    pub fn start(&self) -> DateTime<Utc> {
        first_instant(self.year, self.month)
    }

    /// First instant of the following month, exclusive upper bound of [`Self::contains`].
    pub fn end(&self) -> DateTime<Utc> {
        if self.month == 12 {
            first_instant(self.year + 1, 1)
        } else {
            first_instant(self.year, self.month + 1)
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start() && date < self.end()
    }
}

fn first_instant(year: i32, month: u32) -> DateTime<Utc> {
    // Always valid: year and month are range checked on construction.
    let date = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default();
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::from(InvoiceError::InvalidDate(s.to_string()));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }
}

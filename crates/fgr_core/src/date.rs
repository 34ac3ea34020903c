//! Genealogical date parsing and formatting.
//!
//! # Responsibility
//! - Convert between free-text genealogy dates ("12 January 2025",
//!   "January 2025", "2025") and a comparable representation.
//! - Supply the sort keys used by the chronological event view.
//!
//! # Invariants
//! - Parsing accepts exactly the three genealogy granularities; anything
//!   else is a `DateFormatError`, never a silent default.
//! - `parse(format(d)) == d` for every granularity.
//! - The "unknown date" sentinel key orders strictly before any valid date
//!   in year 1900 or later.

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 2100;

/// Sort key for events whose date is missing or unparseable. A parsed year
/// 1900 maps to `(1900, 1, 1)`, so unknown dates sort strictly first.
pub const EARLIEST_SORT_KEY: (i32, u32, u32) = (1900, 0, 0);

static FULL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})\s+([A-Za-z]+)\s+(\d{4})$").expect("valid full date regex"));
static MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{4})$").expect("valid month-year regex"));
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{4})$").expect("valid year regex"));
static ISO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso regex"));

pub type DateResult<T> = Result<T, DateFormatError>;

/// Rejection reasons for a free-text genealogy date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    Empty,
    Unrecognized(String),
    UnknownMonth(String),
    DayOutOfRange(u32),
    YearOutOfRange(i32),
}

impl Display for DateFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date is empty"),
            Self::Unrecognized(value) => write!(
                f,
                "unrecognized date `{value}`; expected `12 January 2025`, `January 2025` or `2025`"
            ),
            Self::UnknownMonth(value) => write!(f, "unknown month name `{value}`"),
            Self::DayOutOfRange(day) => write!(f, "day {day} is out of range 1-31"),
            Self::YearOutOfRange(year) => {
                write!(f, "year {year} is outside the supported range {MIN_YEAR}-{MAX_YEAR}")
            }
        }
    }
}

impl Error for DateFormatError {}

/// A genealogy date at one of three granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenDate {
    Year(i32),
    MonthYear { year: i32, month: u32 },
    Full { year: i32, month: u32, day: u32 },
}

impl GenDate {
    /// Parses the free-text display form.
    pub fn parse(text: &str) -> DateResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DateFormatError::Empty);
        }

        if let Some(caps) = FULL_RE.captures(trimmed) {
            let day: u32 = caps[1].parse().map_err(|_| DateFormatError::DayOutOfRange(0))?;
            let month = month_from_name(&caps[2])?;
            let year = parse_year(&caps[3])?;
            if !(1..=31).contains(&day) {
                return Err(DateFormatError::DayOutOfRange(day));
            }
            return Ok(Self::Full { year, month, day });
        }

        if let Some(caps) = MONTH_YEAR_RE.captures(trimmed) {
            let month = month_from_name(&caps[1])?;
            let year = parse_year(&caps[2])?;
            return Ok(Self::MonthYear { year, month });
        }

        if let Some(caps) = YEAR_RE.captures(trimmed) {
            let year = parse_year(&caps[1])?;
            return Ok(Self::Year(year));
        }

        Err(DateFormatError::Unrecognized(trimmed.to_string()))
    }

    /// Parses the machine form `YYYY-MM-DD` into a full-granularity date.
    pub fn from_iso(text: &str) -> DateResult<Self> {
        let trimmed = text.trim();
        let caps = ISO_RE
            .captures(trimmed)
            .ok_or_else(|| DateFormatError::Unrecognized(trimmed.to_string()))?;
        let year = parse_year(&caps[1])?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| DateFormatError::Unrecognized(trimmed.to_string()))?;
        let day: u32 = caps[3]
            .parse()
            .map_err(|_| DateFormatError::Unrecognized(trimmed.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(DateFormatError::UnknownMonth(caps[2].to_string()));
        }
        if !(1..=31).contains(&day) {
            return Err(DateFormatError::DayOutOfRange(day));
        }
        Ok(Self::Full { year, month, day })
    }

    /// Returns `YYYY-MM-DD` for full-granularity dates, `None` otherwise.
    pub fn to_iso(&self) -> Option<String> {
        match *self {
            Self::Full { year, month, day } => Some(format!("{year:04}-{month:02}-{day:02}")),
            _ => None,
        }
    }

    /// Comparable `(year, month, day)` key; coarse granularities fill the
    /// missing parts with 1 so "1900" and "January 1900" order together.
    pub fn sort_key(&self) -> (i32, u32, u32) {
        match *self {
            Self::Year(year) => (year, 1, 1),
            Self::MonthYear { year, month } => (year, month, 1),
            Self::Full { year, month, day } => (year, month, day),
        }
    }
}

impl Display for GenDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Year(year) => write!(f, "{year}"),
            Self::MonthYear { year, month } => write!(f, "{} {year}", month_name(month)),
            Self::Full { year, month, day } => write!(f, "{day} {} {year}", month_name(month)),
        }
    }
}

/// Sort key for an event date; unknown or malformed dates get the earliest
/// sentinel instead of an error. Display-only fallback, not a parse success.
pub fn sort_key_or_earliest(text: &str) -> (i32, u32, u32) {
    match GenDate::parse(text) {
        Ok(date) => date.sort_key(),
        Err(_) => EARLIEST_SORT_KEY,
    }
}

/// Formats a calendar date in the genealogy display form, e.g. for the
/// default record date of a fresh form.
pub fn display_date(date: chrono::NaiveDate) -> String {
    GenDate::Full {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
    .to_string()
}

fn month_from_name(name: &str) -> DateResult<u32> {
    MONTH_NAMES
        .iter()
        .position(|month| month.eq_ignore_ascii_case(name))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| DateFormatError::UnknownMonth(name.to_string()))
}

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) as usize) - 1]
}

fn parse_year(text: &str) -> DateResult<i32> {
    let year: i32 = text
        .parse()
        .map_err(|_| DateFormatError::Unrecognized(text.to_string()))?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DateFormatError::YearOutOfRange(year));
    }
    Ok(year)
}

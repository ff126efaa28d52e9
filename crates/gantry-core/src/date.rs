//! Calendar-day helpers shared by the timeline engine, validation and the exchange format.
//!
//! All arithmetic saturates at chrono's representable range; nothing here panics on extreme
//! input.

use crate::i18n::Language;
use crate::{Error, Result};
use chrono::{Datelike, Days, Months, NaiveDate};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let s = value.trim();
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(Error::InvalidDate {
            value: value.to_string(),
        });
    }
    NaiveDate::parse_from_str(s, ISO_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Like [`parse_date`], but an empty (or whitespace-only) string means "no date".
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.succ_opt()
}

/// The Sunday on or before `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday();
    add_days(date, -i64::from(back))
}

/// The Saturday on or after `date`.
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    let forward = 6 - date.weekday().num_days_from_sunday();
    add_days(date, i64::from(forward))
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Short day label, e.g. `01/05`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Week range label, e.g. `12.29-01.04`.
pub fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{}-{}", start.format("%m.%d"), end.format("%m.%d"))
}

pub fn month_label(date: NaiveDate, language: Language) -> String {
    match language {
        Language::En => date.format("%Y-%m").to_string(),
        Language::Zh => format!("{}年{}月", date.year(), date.month()),
    }
}

/// Serde adapter for `Option<NaiveDate>` fields stored as `YYYY-MM-DD`, with the empty string
/// (or `null`) standing for "no date".
pub mod serde_opt {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_optional_date(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDate>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => super::parse_optional_date(&s).map_err(serde::de::Error::custom),
        }
    }
}

use cwa_temperature_core::ForecastRecord;
use log::trace;
use serde::Serialize;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, OffsetDateTime, PrimitiveDateTime, Time,
};
use utoipa::ToSchema;

const DATE_ONLY: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const DATE_TIME_SPACED: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_HOUR_MINUTE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unrecognized date {0:?}")]
    Date(String),
    #[error("temperature {0:?} is not a number")]
    Temperature(String),
}

/// Parse a stored date into a calendar date-time.
///
/// Offsets in RFC 3339 input are dropped, keeping the local wall-clock time.
pub fn parse_reading_date(raw: &str) -> Result<PrimitiveDateTime, FieldError> {
    let raw = raw.trim();
    if let Ok(date) = Date::parse(raw, DATE_ONLY) {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    }
    for format in [DATE_TIME, DATE_TIME_SPACED, DATE_HOUR_MINUTE] {
        if let Ok(date_time) = PrimitiveDateTime::parse(raw, format) {
            return Ok(date_time);
        }
    }
    if let Ok(zoned) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(PrimitiveDateTime::new(zoned.date(), zoned.time()));
    }
    Err(FieldError::Date(raw.to_string()))
}

/// `None` in, `None` out; text must parse to a finite number.
pub fn parse_temperature(raw: Option<&str>) -> Result<Option<f64>, FieldError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FieldError::Temperature(raw.to_string())),
    }
}

/// A stored record with its fields coerced for comparison and display.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Reading {
    pub area: String,
    /// `YYYY-MM-DDTHH:MM:SS` when the stored date parsed, otherwise the stored text
    pub date: String,
    #[serde(rename = "maxT")]
    pub max_t: Option<f64>,
    #[serde(rename = "minT")]
    pub min_t: Option<f64>,
}

impl Reading {
    /// Field failures never reject the row: dates keep their raw text and
    /// temperatures become missing.
    pub fn normalize(record: &ForecastRecord) -> Self {
        let date = match parse_reading_date(&record.date) {
            Ok(parsed) => parsed
                .format(DATE_TIME)
                .unwrap_or_else(|_| record.date.clone()),
            Err(e) => {
                trace!("{} ({}), keeping raw value", e, record.area);
                record.date.clone()
            }
        };

        Self {
            area: record.area.clone(),
            date,
            max_t: coerce(record.max_t.as_deref(), &record.area),
            min_t: coerce(record.min_t.as_deref(), &record.area),
        }
    }
}

fn coerce(raw: Option<&str>, area: &str) -> Option<f64> {
    parse_temperature(raw).unwrap_or_else(|e| {
        trace!("{} ({}), treating as missing", e, area);
        None
    })
}

pub fn normalize_all(records: &[ForecastRecord]) -> Vec<Reading> {
    records.iter().map(Reading::normalize).collect()
}

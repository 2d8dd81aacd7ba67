//! Timestamp card: `... <month>-<day> <hour>:<minute>`.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use crate::error::{ParseError, ParseResult};
use crate::parser::ParseOptions;

/// Builds the battle time from the timestamp card's lines.
///
/// The report carries no year, so it comes from `options`.
pub fn parse_timestamp(lines: &[String], options: &ParseOptions) -> ParseResult<DateTime<Utc>> {
    let [line] = lines else {
        return Err(ParseError::shape(format!(
            "timestamp card must have exactly one line, found {}",
            lines.len()
        )));
    };
    parse_timestamp_line(line, options).map_err(|err| err.at_line(0, line))
}

fn parse_timestamp_line(line: &str, options: &ParseOptions) -> ParseResult<DateTime<Utc>> {
    let mut tokens = line.rsplit(' ');
    let hour_token = tokens.next().unwrap_or_default();
    let date_token = tokens.next().unwrap_or_default();

    let hour_field = hour_token.split(':').next().unwrap_or_default();
    let mut date_fields = date_token.split('-');
    let month_field = date_fields.next().unwrap_or_default();
    let day_field = date_fields
        .next()
        .ok_or_else(|| ParseError::lexical(format!("date {date_token:?} has no day field")))?;

    let hour = parse_field::<u32>(hour_field, "hour")?;
    let month = parse_field::<u32>(month_field, "month")?;
    let day = parse_field::<u32>(day_field, "day")?;

    let offset = FixedOffset::east_opt(options.utc_offset_hours * 3600).ok_or_else(|| {
        ParseError::numeric(format!("utc offset of {} hours is out of range", options.utc_offset_hours))
    })?;
    let date = NaiveDate::from_ymd_opt(options.year, month, day).ok_or_else(|| {
        ParseError::numeric(format!("{}-{month:02}-{day:02} is not a calendar date", options.year))
    })?;
    let local = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| ParseError::numeric(format!("hour {hour} is out of range")))?;

    offset
        .from_local_datetime(&local)
        .single()
        .map(|time| time.with_timezone(&Utc))
        .ok_or_else(|| ParseError::numeric("local time is ambiguous"))
}

fn parse_field<T: std::str::FromStr>(token: &str, field: &str) -> ParseResult<T>
where
    T::Err: std::fmt::Display,
{
    token
        .parse::<T>()
        .map_err(|err| ParseError::numeric(format!("invalid {field} {token:?}: {err}")))
}

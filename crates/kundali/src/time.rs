//! Civil time to continuous time.
//!
//! A chart instant is a local calendar date and time plus a fixed UTC offset
//! in hours. It is resolved once to a UTC instant and to a Julian Day (UT),
//! which is what every provider query takes.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ChartError;

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;
pub const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

lazy_static! {
    static ref OFFSET_HH_MM: Regex = Regex::new(r"^([+-])?(\d{1,2}):([0-5]\d)$").unwrap();
}

/// A validated local instant with its fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilInstant {
    pub local: NaiveDateTime,
    pub utc_offset_hours: f64,
}

impl CivilInstant {
    /// Parse `YYYY-MM-DD` and `HH:MM` (or `HH:MM:SS`).
    pub fn parse(date: &str, time: &str, utc_offset_hours: f64) -> Result<Self, ChartError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| ChartError::invalid("date", format!("'{}' is not YYYY-MM-DD ({})", date, e)))?;
        let time = parse_time_of_day(time)?;
        if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(ChartError::invalid(
                "utc_offset",
                format!(
                    "{} hours is outside [-{max}, {max}]",
                    utc_offset_hours,
                    max = MAX_UTC_OFFSET_HOURS
                ),
            ));
        }
        Ok(Self {
            local: date.and_time(time),
            utc_offset_hours,
        })
    }

    /// Local civil time minus the offset.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, ChartError> {
        let offset_ms = (self.utc_offset_hours * 3_600_000.0).round() as i64;
        let naive_ut = self
            .local
            .checked_sub_signed(Duration::milliseconds(offset_ms))
            .ok_or_else(|| ChartError::invalid("date", "instant out of representable range"))?;
        Ok(Utc.from_utc_datetime(&naive_ut))
    }

    pub fn julian_day_ut(&self) -> Result<f64, ChartError> {
        Ok(datetime_to_julian_day(self.to_utc()?))
    }
}

fn parse_time_of_day(time: &str) -> Result<NaiveTime, ChartError> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| ChartError::invalid("time", format!("'{}' is not HH:MM ({})", time, e)))
}

/// Convert UTC datetime to Julian Day (UT)
pub fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Convert Julian Day (UT) back to a UTC datetime, millisecond resolution.
pub fn julian_day_to_datetime(jd_ut: f64) -> Option<DateTime<Utc>> {
    if !jd_ut.is_finite() {
        return None;
    }
    let millis = ((jd_ut - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64;
    Utc.timestamp_millis_opt(millis).single()
}

/// ISO-8601 rendering used in snapshots: `YYYY-MM-DDTHH:MM:SSZ`.
pub fn utc_iso_string(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Accepts decimal hours (`5.5`, `-3`) or `±HH:MM` (`+05:30`).
pub fn parse_utc_offset(text: &str) -> Result<f64, ChartError> {
    let trimmed = text.trim();
    let hours = if let Some(caps) = OFFSET_HH_MM.captures(trimmed) {
        let sign = if caps.get(1).map(|m| m.as_str()) == Some("-") {
            -1.0
        } else {
            1.0
        };
        let h: f64 = caps[2]
            .parse()
            .map_err(|_| ChartError::invalid("utc_offset", format!("bad hours in '{}'", text)))?;
        let m: f64 = caps[3]
            .parse()
            .map_err(|_| ChartError::invalid("utc_offset", format!("bad minutes in '{}'", text)))?;
        sign * (h + m / 60.0)
    } else {
        trimmed
            .parse::<f64>()
            .map_err(|_| ChartError::invalid("utc_offset", format!("'{}' is not hours or ±HH:MM", text)))?
    };
    if !hours.is_finite() || hours.abs() > MAX_UTC_OFFSET_HOURS {
        return Err(ChartError::invalid(
            "utc_offset",
            format!("{} hours is out of range", hours),
        ));
    }
    Ok(hours)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_j2000_julian_day() {
        let instant = CivilInstant::parse("2000-01-01", "12:00", 0.0).unwrap();
        assert!((instant.julian_day_ut().unwrap() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_is_subtracted() {
        let instant = CivilInstant::parse("1990-01-01", "06:00", 5.5).unwrap();
        let utc = instant.to_utc().unwrap();
        assert_eq!(utc_iso_string(&utc), "1990-01-01T00:30:00Z");

        let west = CivilInstant::parse("1990-01-01", "20:00", -5.0).unwrap();
        assert_eq!(utc_iso_string(&west.to_utc().unwrap()), "1990-01-02T01:00:00Z");
    }

    #[test]
    fn test_julian_day_round_trip() {
        let instant = CivilInstant::parse("1987-04-10", "19:21:00", 0.0).unwrap();
        let jd = instant.julian_day_ut().unwrap();
        let back = julian_day_to_datetime(jd).unwrap();
        assert_eq!(back, instant.to_utc().unwrap());
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(
            CivilInstant::parse("1990-13-01", "06:00", 0.0),
            Err(ChartError::InvalidInput { field: "date", .. })
        ));
        assert!(matches!(
            CivilInstant::parse("1990-01-01", "25:00", 0.0),
            Err(ChartError::InvalidInput { field: "time", .. })
        ));
        assert!(matches!(
            CivilInstant::parse("1990-01-01", "06:00", 20.0),
            Err(ChartError::InvalidInput { field: "utc_offset", .. })
        ));
        assert!(CivilInstant::parse("1990-01-01", "06:00", f64::NAN).is_err());
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("5.5").unwrap(), 5.5);
        assert_eq!(parse_utc_offset("+05:30").unwrap(), 5.5);
        assert_eq!(parse_utc_offset("-03:30").unwrap(), -3.5);
        assert_eq!(parse_utc_offset("09:45").unwrap(), 9.75);
        assert!(parse_utc_offset("+15:00").is_err());
        assert!(parse_utc_offset("IST").is_err());
    }
}

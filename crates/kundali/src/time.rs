//! Calendar moments, Julian Days and sidereal time.
//!
//! Julian Days follow Meeus, "Astronomical Algorithms", Chapter 7, and are
//! only defined here for dates on the Gregorian calendar (1582-10-15 onward).
//! Sidereal time uses the IAU 1982 GMST polynomial in degrees.

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::math::{normalize_degrees, DAYS_PER_CENTURY, J2000_JD};

/// First day of the Gregorian calendar.
const GREGORIAN_START: (i32, u32, u32) = (1582, 10, 15);

/// Largest UTC offset in use anywhere (UTC+14:00), in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// A civil date and time plus its offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Moment {
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Seconds including any fraction, [0, 60)
    pub second: f64,
    /// Local time minus UTC, in minutes (e.g. +330 for IST)
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Moment {
    /// A moment given directly in UTC.
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_minutes: 0,
        }
    }

    /// The same calendar fields, read as local time at the given offset.
    pub fn with_utc_offset(self, utc_offset_minutes: i32) -> Self {
        Self {
            utc_offset_minutes,
            ..self
        }
    }

    /// Capture the local calendar fields and offset of a chrono datetime.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let local = dt.naive_local();
        let offset_seconds = dt.offset().fix().local_minus_utc();
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second() as f64 + local.nanosecond() as f64 / 1e9,
            utc_offset_minutes: offset_seconds / 60,
        }
    }

    /// Check every calendar field, returning the first one out of range.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !(1..=12).contains(&self.month) {
            return Err(ChartError::invalid_moment("month", self.month, "out of range 1..=12"));
        }
        let month_len = days_in_month(self.year, self.month);
        if self.day < 1 || self.day > month_len {
            return Err(ChartError::invalid_moment(
                "day",
                self.day,
                format!("out of range 1..={} for {}-{:02}", month_len, self.year, self.month),
            ));
        }
        if (self.year, self.month, self.day) < GREGORIAN_START {
            return Err(ChartError::invalid_moment(
                "date",
                format!("{}-{:02}-{:02}", self.year, self.month, self.day),
                "precedes the Gregorian calendar (1582-10-15)",
            ));
        }
        if self.hour > 23 {
            return Err(ChartError::invalid_moment("hour", self.hour, "out of range 0..=23"));
        }
        if self.minute > 59 {
            return Err(ChartError::invalid_moment("minute", self.minute, "out of range 0..=59"));
        }
        if !self.second.is_finite() || self.second < 0.0 || self.second >= 60.0 {
            return Err(ChartError::invalid_moment("second", self.second, "out of range [0, 60)"));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ChartError::invalid_moment(
                "utc_offset_minutes",
                self.utc_offset_minutes,
                "beyond ±14:00",
            ));
        }
        Ok(())
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert a moment to a Julian Day (UT).
///
/// January and February count as months 13 and 14 of the previous year; the
/// Gregorian century correction `B = 2 - A + A/4` is always applied.
pub fn to_julian_day(moment: &Moment) -> Result<f64, ChartError> {
    moment.validate()?;

    let (mut y, mut m) = (moment.year as f64, moment.month as f64);
    if moment.month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let day_number = (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor()
        + moment.day as f64
        + b
        - 1524.5;
    let day_fraction = moment.hour as f64 / 24.0
        + moment.minute as f64 / 1440.0
        + moment.second / 86_400.0
        - moment.utc_offset_minutes as f64 / 1440.0;

    Ok(day_number + day_fraction)
}

/// Convert a Julian Day back to a UTC moment.
pub fn julian_day_to_moment(jd: f64) -> Moment {
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let seconds_of_day = f * 86_400.0;
    let hour = ((seconds_of_day / 3600.0).floor() as u32).min(23);
    let minute = (((seconds_of_day - hour as f64 * 3600.0) / 60.0).floor() as u32).min(59);
    let second = (seconds_of_day - hour as f64 * 3600.0 - minute as f64 * 60.0).clamp(0.0, 59.999_999);

    Moment::utc(year, month, day, hour, minute, second)
}

/// Julian centuries elapsed since J2000.0.
#[inline]
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich Mean Sidereal Time in degrees [0, 360).
///
/// GMST = 280.46061837 + 360.98564736629·d + 0.000387933·T² − T³/38710000
pub fn julian_day_to_gmst(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let gmst = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}

/// Local sidereal time from GMST and east longitude, both in degrees.
///
/// 15° of longitude is one hour of sidereal time, so the longitude adds directly.
pub fn local_sidereal_time(gmst_deg: f64, longitude_deg: f64) -> f64 {
    normalize_degrees(gmst_deg + longitude_deg)
}

//! A lightweight uom-ish library, covering what the propagation pipeline needs.

use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

use serde::Serialize;
use trash_types::time::UtcTimestamp;

/// Julian date of the Unix epoch, 1970-01-01T00:00:00Z
pub const UNIX_EPOCH_JULIAN_DATE: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Length {
    meters: f64,
}

impl std::fmt::Debug for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.meters)
    }
}

impl Length {
    pub fn from_meters(meters: f64) -> Length {
        Length { meters }
    }

    pub fn from_kilometers(km: f64) -> Length {
        Length {
            meters: km * 1000.0,
        }
    }

    pub fn as_meters(&self) -> f64 {
        self.meters
    }

}

#[derive(Copy, Clone, PartialEq, PartialOrd, Serialize)]
pub struct Ratio {
    ratio: f64,
}

impl std::fmt::Debug for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ratio)
    }
}

impl Ratio {
    pub fn from_f64(ratio: f64) -> Ratio {
        Ratio { ratio }
    }

    pub fn as_f64(&self) -> f64 {
        self.ratio
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Timestamp {
    utc: UtcTimestamp,
}

impl std::fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utc)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    /// RFC 3339, e.g. `2008-09-20T12:25:40Z`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = chrono::DateTime::parse_from_rfc3339(s.trim())?;
        Ok(Timestamp::from_utc(t.with_timezone(&chrono::Utc)))
    }
}

impl Timestamp {
    pub fn now() -> Timestamp {
        Timestamp::from_utc(chrono::Utc::now())
    }

    pub fn from_utc(utc: UtcTimestamp) -> Timestamp {
        Timestamp { utc }
    }

    pub fn as_utc(&self) -> &UtcTimestamp {
        &self.utc
    }

    pub fn as_millis(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// Julian date, treating UTC as UT1
    pub fn julian_date(&self) -> f64 {
        (self.as_millis() as f64 / 1000.0) / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DATE
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Time;

    fn sub(self, rhs: Timestamp) -> Self::Output {
        Time::from_chrono_duration(*self.as_utc() - *rhs.as_utc())
    }
}

impl Add<Time> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Time) -> Self::Output {
        let mut ts = self;
        ts += rhs;
        ts
    }
}

impl AddAssign<Time> for Timestamp {
    fn add_assign(&mut self, rhs: Time) {
        self.utc += chrono::Duration::nanoseconds(rhs.as_nanos());
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Time {
    seconds: f64,
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} s", self.seconds)
    }
}

impl Time {
    pub fn from_chrono_duration(duration: chrono::Duration) -> Time {
        match duration.num_nanoseconds() {
            Some(nanos) => Time::from_secs(nanos as f64 / 1_000_000_000.0),
            // Beyond ~292 years, millisecond resolution is plenty
            None => Time::from_millis(duration.num_milliseconds() as f64),
        }
    }

    pub fn from_std(duration: std::time::Duration) -> Time {
        Time::from_secs(duration.as_secs_f64())
    }

    pub fn from_minutes(minutes: f64) -> Time {
        Self::from_secs(minutes * 60.0)
    }

    pub fn from_secs(seconds: f64) -> Time {
        Time { seconds }
    }

    pub fn from_millis(millis: f64) -> Time {
        Time {
            seconds: millis / 1000.0,
        }
    }

    pub fn as_secs(&self) -> f64 {
        self.seconds
    }

    pub fn as_minutes(&self) -> f64 {
        self.seconds / 60.0
    }

    pub fn as_nanos(&self) -> i64 {
        (self.seconds * 1_000_000_000.0) as i64
    }
}

impl Add<Time> for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Self::Output {
        Time::from_secs(self.as_secs() + rhs.as_secs())
    }
}

impl AddAssign<Time> for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.seconds += rhs.as_secs()
    }
}

impl Mul<usize> for Time {
    type Output = Time;

    fn mul(self, rhs: usize) -> Self::Output {
        Time::from_secs(self.as_secs() * (rhs as f64))
    }
}

impl Mul<Ratio> for Time {
    type Output = Time;

    fn mul(self, rhs: Ratio) -> Self::Output {
        Time::from_secs(self.as_secs() * rhs.as_f64())
    }
}

impl Div<Time> for Time {
    type Output = Ratio;

    fn div(self, rhs: Time) -> Self::Output {
        Ratio::from_f64(self.as_secs() / rhs.as_secs())
    }
}

#[derive(Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

impl std::fmt::Debug for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

impl Angle {
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees }
    }

    pub fn from_radians(radians: f64) -> Angle {
        Angle {
            degrees: radians.to_degrees(),
        }
    }

    pub fn as_degrees(&self) -> f64 {
        self.degrees
    }

    pub fn as_radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

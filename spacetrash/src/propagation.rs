//! SGP4 propagation of catalog records to geodetic positions.
//!
//! The element sets are propagated with the `sgp4` crate into TEME, rotated
//! into the Earth-fixed frame with Greenwich mean sidereal time and then
//! converted to latitude, longitude and height on the WGS-84 ellipsoid.

use na::{Rotation3, Vector3};
use sgp4::{Constants, Elements, MinutesSinceEpoch};
use std::f64::consts::TAU;
use trash_types::prelude::{EciState, GeodeticPosition, OrbitalRecord};

use crate::units::{Angle, Length, Time, Timestamp};

pub const WGS84_EQUATORIAL_RADIUS_KM: f64 = 6378.137;
pub const WGS84_POLAR_RADIUS_KM: f64 = 6356.752_314_2;

pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

const GEODETIC_ITERATIONS: usize = 20;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PropagationError {
    #[error("Invalid element set: {0}")]
    Elements(String),
    #[error("Unusable orbital elements: {0}")]
    Constants(String),
    #[error("Time is not representable relative to the element epoch: {0}")]
    Epoch(String),
    #[error("SGP4 propagation failed: {0}")]
    Propagate(String),
    #[error("Propagation produced a degenerate position")]
    Degenerate,
}

/// Geodetic coordinates in the propagator's native units
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct GeodeticKm {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub height_km: f64,
}

impl From<GeodeticKm> for GeodeticPosition {
    /// The only place propagated heights get converted to meters
    fn from(value: GeodeticKm) -> Self {
        GeodeticPosition {
            latitude: Angle::from_radians(value.latitude_rad).as_degrees(),
            longitude: Angle::from_radians(value.longitude_rad).as_degrees(),
            height: Length::from_kilometers(value.height_km).as_meters(),
        }
    }
}

/// Parsed orbital state of one element set, ready to be propagated
#[derive(Clone)]
pub struct Satrec {
    elements: Elements,
    constants: Constants,
}

impl Satrec {
    pub fn from_lines(name: Option<&str>, line1: &str, line2: &str) -> Result<Self, PropagationError> {
        let elements = Elements::from_tle(
            name.map(|n| n.trim().to_string()),
            line1.trim().as_bytes(),
            line2.trim().as_bytes(),
        )
        .map_err(|e| PropagationError::Elements(e.to_string()))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| PropagationError::Constants(e.to_string()))?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn from_record(record: &OrbitalRecord) -> Result<Self, PropagationError> {
        Self::from_lines(Some(&record.name), &record.line1, &record.line2)
    }

    pub fn epoch(&self) -> Timestamp {
        Timestamp::from_utc(self.elements.datetime.and_utc())
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    /// TEME position [km] and velocity [km/s] at `at`
    pub fn propagate(&self, at: Timestamp) -> Result<EciState, PropagationError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.as_utc().naive_utc())
            .map_err(|e| PropagationError::Epoch(e.to_string()))?;
        self.propagate_minutes(minutes)
    }

    fn propagate_minutes(&self, minutes: MinutesSinceEpoch) -> Result<EciState, PropagationError> {
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| PropagationError::Propagate(e.to_string()))?;
        Ok(EciState::from_arrays(
            prediction.position,
            prediction.velocity,
        ))
    }

    /// Steps 2 to 5 of a refresh, for an already parsed element set
    pub fn geodetic(&self, at: Timestamp) -> Result<GeodeticPosition, PropagationError> {
        let state = self.propagate(at)?;
        let position = &state.position;
        if !position.iter().all(|c| c.is_finite()) || position.norm() == 0.0 {
            return Err(PropagationError::Degenerate);
        }

        let gmst = greenwich_mean_sidereal_time(at);
        let geodetic = GeodeticPosition::from(eci_to_geodetic(position, gmst));
        if !geodetic.is_finite() {
            return Err(PropagationError::Degenerate);
        }
        Ok(geodetic)
    }
}

/// Geodetic position of `record` at `at`.
///
/// Pure: the element lines are parsed on every call and nothing is cached,
/// so equal inputs always give equal outputs.
pub fn refresh(record: &OrbitalRecord, at: Timestamp) -> Result<GeodeticPosition, PropagationError> {
    Satrec::from_record(record)?.geodetic(at)
}

/// Samples `samples` positions of `record`, `step` apart, starting at `start`.
///
/// Fails only if the element set can't be parsed; individual samples carry
/// their own propagation result.
pub fn ground_track(
    record: &OrbitalRecord,
    start: Timestamp,
    step: Time,
    samples: usize,
) -> Result<Vec<(Timestamp, Result<GeodeticPosition, PropagationError>)>, PropagationError> {
    let satrec = Satrec::from_record(record)?;
    Ok((0..samples)
        .map(|i| {
            let t = start + step * i;
            (t, satrec.geodetic(t))
        })
        .collect())
}

/// IAU-82 Greenwich mean sidereal time, UTC standing in for UT1
pub fn greenwich_mean_sidereal_time(at: Timestamp) -> Angle {
    let tut1 = (at.julian_date() - J2000_JULIAN_DATE) / DAYS_PER_JULIAN_CENTURY;
    let seconds = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093104 * tut1 * tut1
        + (876_600.0 * 3600.0 + 8_640_184.812_866) * tut1
        + 67_310.548_41;
    // 240 sidereal seconds per degree
    let radians = (seconds.to_radians() / 240.0).rem_euclid(TAU);
    Angle::from_radians(radians)
}

/// Rotates an inertial position into the Earth-fixed frame
pub fn eci_to_ecef(position: &Vector3<f64>, gmst: Angle) -> Vector3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), -gmst.as_radians()) * position
}

/// Converts an inertial position [km] to WGS-84 geodetic coordinates.
///
/// Latitude is solved iteratively; longitude lies in (-π, π].
pub fn eci_to_geodetic(position: &Vector3<f64>, gmst: Angle) -> GeodeticKm {
    let a = WGS84_EQUATORIAL_RADIUS_KM;
    let b = WGS84_POLAR_RADIUS_KM;
    let f = (a - b) / a;
    let e2 = 2.0 * f - f * f;

    let ecef = eci_to_ecef(position, gmst);
    let r = ecef.x.hypot(ecef.y);
    let longitude = ecef.y.atan2(ecef.x);

    let mut latitude = ecef.z.atan2(r);
    let mut c = 1.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (ecef.z + a * c * e2 * sin_lat).atan2(r);
    }
    let height = r / latitude.cos() - a * c;

    GeodeticKm {
        latitude_rad: latitude,
        longitude_rad: longitude,
        height_km: height,
    }
}

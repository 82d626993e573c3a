use derive_more::Display;
use serde::Serialize;

/// Geodetic position relative to the WGS-84 ellipsoid
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display, Serialize)]
#[display(
    fmt = "{{lat: {:.4}°, lon: {:.4}°, height: {:.0} m}}",
    "latitude",
    "longitude",
    "height"
)]
pub struct GeodeticPosition {
    /// [deg], positive north
    pub latitude: f64,
    /// [deg], positive east, in (-180, 180]
    pub longitude: f64,
    /// Height above the ellipsoid [m]
    pub height: f64,
}

impl GeodeticPosition {
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite() && self.height.is_finite()
    }
}

use derive_more::Display;

/// Inertial state as produced by SGP4, expressed in TEME
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default, Display)]
#[display(fmt = "{{position: {}, velocity: {}}}", "position", "velocity")]
pub struct EciState {
    /// Position [km]
    pub position: na::Vector3<f64>,

    /// Velocity [km/s]
    pub velocity: na::Vector3<f64>,
}

impl EciState {
    pub fn from_arrays(position: [f64; 3], velocity: [f64; 3]) -> Self {
        Self {
            position: position.into(),
            velocity: velocity.into(),
        }
    }
}

pub use crate::eci::EciState;
pub use crate::geodetic::GeodeticPosition;
pub use crate::record::{OrbitalRecord, RecordId};
pub use crate::time::UtcTimestamp;

extern crate nalgebra as na;

pub mod eci;
pub mod geodetic;
pub mod prelude;
pub mod record;
pub mod time;

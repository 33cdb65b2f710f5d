//! Coordinate frame rotation and spherical geodesy

mod geodesy;
mod transforms;

pub use geodesy::{along, bearing_deg, destination, distance_m, midpoint};
pub use transforms::PivotRotation;

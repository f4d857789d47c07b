//! Wind triangle navigation math.
//!
//! [`solver::solve`] turns a wind (direction it blows from, speed), a desired
//! true course and a true airspeed into the heading to fly and the resulting
//! ground speed. [`wind_group`] reads the surface wind out of a METAR so the
//! solver can be fed straight from a weather report.

pub mod angle;
pub mod error;
pub mod solver;
pub mod wind_group;

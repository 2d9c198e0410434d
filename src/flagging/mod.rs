//! Flag classification and time-bin aggregation.
//!
//! This module turns raw NOAA flask rows (value + 3-character status code)
//! into quality-classified rows, and collapses all rows sharing one sample
//! timestamp into a single EBAS sample with mean, standard deviation,
//! sample count and propagated flag codes.

pub mod aggregate;
pub mod classify;
pub mod types;
pub mod utility;

//! Ride-share trip dispatcher.
//!
//! Loads passengers, drivers and trips from CSV, links them into an
//! in-memory graph, and assigns new trip requests to the driver who has
//! been waiting longest.

pub mod config;
pub mod dispatch;
pub mod domain;
pub mod records;

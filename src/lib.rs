// src/lib.rs

//! seatwatch: course seat-availability monitor.
//!
//! Polls the timetable catalog for one or more course sections and raises an
//! alert when seats open up, with a cool-down against duplicate alerts.

pub mod error;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod services;
pub mod utils;

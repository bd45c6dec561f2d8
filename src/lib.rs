// src/lib.rs

//! Outage schedule feed library
//!
//! Discovers hourly outage schedule announcements on the utility homepage,
//! extracts their schedules, filters them to one queue and renders an Atom
//! feed.

pub mod error;
pub mod models;
pub mod pipeline;
#[cfg(feature = "server")]
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

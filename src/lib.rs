//! Logbook - date-partitioned file logging
//!
//! One physical log file per calendar day, all writes funneled through a
//! single serialized writer task, and age-based purging of old files.

pub mod clock;
pub mod config;
pub mod entry;
pub mod error;
pub mod logfile;
pub mod logger;

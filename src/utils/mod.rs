//! Utility functions and helpers
//!
//! This module contains timestamp utilities and logger setup.

pub mod logging;
pub mod time;

pub use logging::{init_logging, open_log_file, DEFAULT_LOG_FILTER};
pub use time::utc_now_string;

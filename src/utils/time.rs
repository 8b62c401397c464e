//! Time and timestamp utilities

use chrono::Utc;

/// Current UTC time as written in heartbeat responses,
/// e.g. `2026-10-19 08:15:42.123456789 UTC`
pub fn utc_now_string() -> String {
    Utc::now().to_string()
}

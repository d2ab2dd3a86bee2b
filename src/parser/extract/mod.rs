pub mod calendar;
pub mod cofinancing;
pub mod expenses;
pub mod files;
pub mod media;
pub mod results;
pub mod team;

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use super::span::{extract_between, find_marker};

/// Run one group parser; a fault inside it yields the section default.
pub fn guarded<T, F>(section: &str, parse: F) -> T
where
    T: Default,
    F: FnOnce() -> T,
{
    match panic::catch_unwind(AssertUnwindSafe(parse)) {
        Ok(value) => {
            debug!(section, "section parsed");
            value
        }
        Err(cause) => {
            let reason = cause
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| cause.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown fault".to_string());
            warn!(section, %reason, "section parser failed, keeping defaults");
            T::default()
        }
    }
}

/// Text of a tab joined with newlines, for whole-span pattern matching.
/// Without the tab header the whole document is searched.
pub(crate) fn tab_text(lines: &[String], header: &str, end: Option<&str>) -> String {
    let span = if find_marker(lines, header).is_some() {
        extract_between(lines, &[header], end)
    } else {
        lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    };
    span.join("\n")
}

//! # Journal Line Formatter
//!
//! Renders one event into one journal line:
//!
//! ```text
//! [2026-08-30T14:02:11Z] ERROR [Main Street/lane 4] scanner offline
//!  └── RFC 3339 UTC ──┘  └kind┘ └─ lane identity ─┘ └── message ──┘
//! ```
//!
//! The lane identity portion comes from the event's own properties; a
//! diagnostic raised before any identity was stamped renders as `[-]`.
//! Pure function, no clock: the caller supplies the timestamp, which keeps
//! the formatter deterministic under test.

use chrono::{DateTime, SecondsFormat, Utc};

use mercury_core::property::keys;
use mercury_core::Event;

/// Placeholder for events that carry no lane identity.
const NO_LANE: &str = "-";

/// Placeholder for LOG/ERROR events missing their message property.
const NO_MESSAGE: &str = "(no message)";

/// Renders `event` as a journal line stamped with `at`.
pub fn format_entry(at: DateTime<Utc>, event: &Event) -> String {
    let timestamp = at.to_rfc3339_opts(SecondsFormat::Secs, true);

    let lane = match (
        event.text(keys::STORE_NAME),
        event.int(keys::LANE_NUMBER),
    ) {
        (Ok(store), Ok(number)) => format!("{store}/lane {number}"),
        _ => NO_LANE.to_string(),
    };

    let message = event.text(keys::MESSAGE).unwrap_or(NO_MESSAGE);

    format!("[{timestamp}] {} [{lane}] {message}", event.kind().name())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mercury_core::{EventKind, LaneIdentity};
    use uuid::Uuid;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_error_line_with_identity() {
        let identity = LaneIdentity::new("Main Street", 4, Uuid::nil()).unwrap();
        let event = Event::error("scanner offline").with_identity(&identity);

        assert_eq!(
            format_entry(noon(), &event),
            "[2026-08-30T12:00:00Z] ERROR [Main Street/lane 4] scanner offline"
        );
    }

    #[test]
    fn test_log_line_without_identity() {
        let event = Event::log("till opened");
        assert_eq!(
            format_entry(noon(), &event),
            "[2026-08-30T12:00:00Z] LOG [-] till opened"
        );
    }

    #[test]
    fn test_missing_message_is_placeholder() {
        let event = Event::new(EventKind::Log);
        assert_eq!(
            format_entry(noon(), &event),
            "[2026-08-30T12:00:00Z] LOG [-] (no message)"
        );
    }
}

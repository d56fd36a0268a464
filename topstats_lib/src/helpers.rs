//! Helpers for identifier validation, token resolution, and timestamp display.

use crate::error::Error;
use chrono::{DateTime, Local, Utc};

/// Discord snowflakes handled by the service are 17 to 19 digits.
const SNOWFLAKE_MIN_LEN: usize = 17;
const SNOWFLAKE_MAX_LEN: usize = 19;

/// True when `id` is 17 to 19 ASCII decimal digits and nothing else.
pub fn is_valid_snowflake(id: &str) -> bool {
    (SNOWFLAKE_MIN_LEN..=SNOWFLAKE_MAX_LEN).contains(&id.len())
        && id.bytes().all(|b| b.is_ascii_digit())
}

/// Reject a malformed bot or user id before it reaches the network.
pub fn validate_snowflake(id: &str, what: &str) -> Result<(), Error> {
    if is_valid_snowflake(id) {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "Invalid Discord {} ID format: '{}'",
            what, id
        )))
    }
}

/// Where the API token came from (for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Passed on the command line or through `TOPSTATS_TOKEN`.
    Explicit,
    OnePassword,
    Bitwarden,
}

/// Resolve the API token: an explicit value wins, then the secret backends
/// (see [`crate::secret`]).
pub fn get_token(explicit: Option<&str>) -> Result<(String, TokenSource), Error> {
    if let Some(t) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok((t.to_string(), TokenSource::Explicit));
    }
    if let Some(t) = crate::secret::one_password() {
        return Ok((t, TokenSource::OnePassword));
    }
    if let Some(t) = crate::secret::bitwarden() {
        return Ok((t, TokenSource::Bitwarden));
    }
    Err(Error::Configuration(
        "API token not found. Pass --token, set TOPSTATS_TOKEN, or configure a secret backend: \
         TOPSTATS_OP_ENTRY_PATH (1Password) or TOPSTATS_BW_ITEM_ID (Bitwarden)."
            .to_string(),
    ))
}

/// Parse an ISO 8601 / RFC 3339 timestamp.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

/// Format an ISO 8601 timestamp for display, in UTC or the local timezone.
/// Unparseable input is returned unchanged.
pub fn format_timestamp_display(ts: &str, use_utc: bool) -> String {
    let dt = match parse_time(ts) {
        Ok(d) => d,
        Err(_) => return ts.to_string(),
    };
    if use_utc {
        dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    } else {
        dt.with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S %:z")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snowflake_lengths() {
        assert!(is_valid_snowflake("12345678901234567"));
        assert!(is_valid_snowflake("583807014896140293"));
        assert!(is_valid_snowflake("1234567890123456789"));
        assert!(!is_valid_snowflake("1234567890123456"));
        assert!(!is_valid_snowflake("12345678901234567890"));
    }

    #[test]
    fn snowflake_rejects_non_digits() {
        assert!(!is_valid_snowflake(""));
        assert!(!is_valid_snowflake("invalid-id"));
        assert!(!is_valid_snowflake("58380701489614029a"));
        assert!(!is_valid_snowflake(" 583807014896140293"));
        assert!(!is_valid_snowflake("583807014896140293\n"));
        assert!(!is_valid_snowflake("５８３８０７０１４８９６１４０２９３"));
    }

    #[test]
    fn validate_reports_kind() {
        let err = validate_snowflake("nope", "bot").unwrap_err();
        assert!(matches!(err, Error::Validation(ref m) if m.contains("bot")));
    }

    #[test]
    fn explicit_token_wins() {
        let (t, src) = get_token(Some("  abc ")).unwrap();
        assert_eq!(t, "abc");
        assert_eq!(src, TokenSource::Explicit);
    }

    #[test]
    fn timestamp_display_utc() {
        assert_eq!(
            format_timestamp_display("2025-03-04T05:06:07.000Z", true),
            "2025-03-04 05:06:07 UTC"
        );
        assert_eq!(format_timestamp_display("not a time", true), "not a time");
    }
}

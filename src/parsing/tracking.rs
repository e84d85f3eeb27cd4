use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::Carrier;

lazy_static! {
    /// USPS: 22-28 digits starting with 9
    static ref USPS_PATTERN: Regex = Regex::new(r"\b9\d{21,27}\b").expect("valid USPS pattern");
    /// UPS: 1Z followed by 16 alphanumerics
    static ref UPS_PATTERN: Regex = Regex::new(r"\b1Z[A-Z0-9]{16}\b").expect("valid UPS pattern");
    /// FedEx: 12-15 digits
    static ref FEDEX_PATTERN: Regex = Regex::new(r"\b\d{12,15}\b").expect("valid FedEx pattern");
}

/// Tracking number format for a carrier, `None` for [`Carrier::Unknown`]
pub fn tracking_pattern(carrier: Carrier) -> Option<&'static Regex> {
    match carrier {
        Carrier::Usps => Some(&USPS_PATTERN),
        Carrier::Ups => Some(&UPS_PATTERN),
        Carrier::Fedex => Some(&FEDEX_PATTERN),
        Carrier::Unknown => None,
    }
}

fn strip_whitespace(line: &str) -> String {
    line.chars().filter(|c| !c.is_whitespace()).collect()
}

/// First tracking number found scanning lines in order, with whitespace
/// removed from each line before matching
pub fn extract_tracking(carrier: Carrier, lines: &[String]) -> Option<String> {
    let pattern = tracking_pattern(carrier)?;

    let found = lines.iter().find_map(|line| {
        pattern
            .find(&strip_whitespace(line))
            .map(|m| m.as_str().to_string())
    });

    debug!(carrier = %carrier, found = found.is_some(), "tracking extraction finished");
    found
}

/// Whether `line` carries the tracking id once whitespace is removed
pub fn contains_tracking(line: &str, tracking_id: &str) -> bool {
    !tracking_id.is_empty() && strip_whitespace(line).contains(tracking_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_spaced_usps_digits_are_joined() {
        let input = lines(&["9 4 0 0 1 1 0 2 0 0 5 2 3 0 8 0 0 1 0 0 1 2 3 4"]);
        assert_eq!(
            extract_tracking(Carrier::Usps, &input).as_deref(),
            Some("940011020052308001001234")
        );
    }

    #[test]
    fn test_usps_requires_leading_nine() {
        let input = lines(&["8400110200523080010012"]);
        assert_eq!(extract_tracking(Carrier::Usps, &input), None);
    }

    #[test]
    fn test_first_matching_line_wins() {
        let input = lines(&[
            "SHIP TO",
            "TRACKING # 1Z 999 AA1 01 2345 6784",
            "1Z999AA10000000000",
        ]);
        // Stripped first candidate has '#' before 1Z, which is a word boundary
        assert_eq!(
            extract_tracking(Carrier::Ups, &input).as_deref(),
            Some("1Z999AA10123456784")
        );
    }

    #[test]
    fn test_fedex_length_bounds() {
        assert_eq!(
            extract_tracking(Carrier::Fedex, &lines(&["7489 1234 5678"])).as_deref(),
            Some("748912345678")
        );
        assert_eq!(extract_tracking(Carrier::Fedex, &lines(&["12345678901"])), None);
        assert_eq!(extract_tracking(Carrier::Fedex, &lines(&["1234567890123456"])), None);
    }

    #[test]
    fn test_unknown_carrier_has_no_tracking() {
        let input = lines(&["9400110200523080010012345678"]);
        assert_eq!(extract_tracking(Carrier::Unknown, &input), None);
    }

    #[test]
    fn test_contains_tracking() {
        assert!(contains_tracking("94001 10200 52308 00100 12345 678", "9400110200523080010012345678"));
        assert!(!contains_tracking("123 MAIN ST", "9400110200523080010012345678"));
        assert!(!contains_tracking("123 MAIN ST", ""));
    }
}

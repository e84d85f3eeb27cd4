use crate::models::Carrier;

/// Identify the carrier from normalized lines.
///
/// USPS branding is checked before the UPS markers because `1Z` is a
/// frequent OCR artifact and `UPS` is a substring of `USPS`.
pub fn detect_carrier(lines: &[String]) -> Carrier {
    let joined = lines.join(" ");
    if joined.contains("USPS") {
        Carrier::Usps
    } else if joined.contains("1Z") || joined.contains("UPS") {
        Carrier::Ups
    } else if joined.contains("FEDEX") {
        Carrier::Fedex
    } else {
        Carrier::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_usps_wins_over_ups_in_any_order() {
        assert_eq!(detect_carrier(&lines(&["UPS GROUND", "USPS TRACKING"])), Carrier::Usps);
        assert_eq!(detect_carrier(&lines(&["USPS TRACKING", "UPS GROUND"])), Carrier::Usps);
        assert_eq!(detect_carrier(&lines(&["USPS 1Z"])), Carrier::Usps);
    }

    #[test]
    fn test_ups_by_prefix_or_name() {
        assert_eq!(detect_carrier(&lines(&["1Z999AA10123456784"])), Carrier::Ups);
        assert_eq!(detect_carrier(&lines(&["UPS NEXT DAY AIR"])), Carrier::Ups);
    }

    #[test]
    fn test_fedex_and_unknown() {
        assert_eq!(detect_carrier(&lines(&["FEDEX EXPRESS"])), Carrier::Fedex);
        assert_eq!(detect_carrier(&lines(&["DHL", "123 MAIN ST"])), Carrier::Unknown);
        assert_eq!(detect_carrier(&[]), Carrier::Unknown);
    }

    #[test]
    fn test_match_spans_line_join() {
        // Lines are joined with a space, so a marker never straddles lines
        assert_eq!(detect_carrier(&lines(&["FED", "EX"])), Carrier::Unknown);
    }
}

//! Small formatting helpers used by the dashboard cells
//!
//! Clock digits, day names, sunrise/sunset strings and wind directions all
//! pass through here before they reach the screen.

/// Pads a clock component to two digits ("7" -> "07").
///
/// Values of 10 and above are returned as their plain decimal string.
pub fn zero_pad(n: u32) -> String {
    if n < 10 {
        format!("0{}", n)
    } else {
        n.to_string()
    }
}

/// Upper-cases the first character of `s`, leaving the rest untouched.
///
/// Localized day names come back lower-case for some languages ("lundi"),
/// so the header capitalizes them.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a provider clock string such as "6:05 PM" into "18:05".
///
/// The input is split on ':' and ' ' into hour, minute and period.
/// 12 AM becomes 00, 12 PM stays 12 and every other PM hour gains 12.
/// Returns `None` when the period is missing or the hour is not a number
/// that fits; nothing else is validated.
pub fn to_24_hour(time: &str) -> Option<String> {
    let mut parts = time.split(|c: char| c == ':' || c == ' ');
    let hour_str = parts.next()?;
    let minute_str = parts.next()?;
    let period = parts.next()?;

    let mut hour: u32 = hour_str.trim().parse().ok()?;

    if period.eq_ignore_ascii_case("pm") && hour != 12 {
        hour = hour.checked_add(12)?;
    } else if period.eq_ignore_ascii_case("am") && hour == 12 {
        hour = 0;
    }

    Some(format!("{:0>2}:{:0>2}", hour, minute_str))
}

/// French names for the 16-point compass rose
const COMPASS_FR: [(&str, &str); 16] = [
    ("N", "Nord"),
    ("NNE", "Nord Nord-Est"),
    ("NE", "Nord-Est"),
    ("ENE", "Est Nord-Est"),
    ("E", "Est"),
    ("ESE", "Est Sud-Est"),
    ("SE", "Sud-Est"),
    ("SSE", "Sud Sud-Est"),
    ("S", "Sud"),
    ("SSW", "Sud Sud-Ouest"),
    ("SW", "Sud-Ouest"),
    ("WSW", "Ouest Sud-Ouest"),
    ("W", "Ouest"),
    ("WNW", "Ouest Nord-Ouest"),
    ("NW", "Nord-Ouest"),
    ("NNW", "Nord Nord-Ouest"),
];

/// Maps a compass abbreviation ("NE", "wsw", ...) to its French name.
///
/// Matching ignores case. Unrecognized input is returned unchanged.
pub fn compass_to_french(direction: &str) -> String {
    let upper = direction.to_uppercase();
    COMPASS_FR
        .iter()
        .find(|(abbr, _)| *abbr == upper)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| direction.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pad_single_digits() {
        for n in 0..10 {
            let padded = zero_pad(n);
            assert_eq!(padded.len(), 2);
            assert!(padded.starts_with('0'));
        }
        assert_eq!(zero_pad(7), "07");
    }

    #[test]
    fn test_zero_pad_two_digits_and_more() {
        for n in [10, 42, 59, 100, 2024] {
            assert_eq!(zero_pad(n), n.to_string());
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("monday"), "Monday");
        assert_eq!(capitalize("Monday"), "Monday");
        assert_eq!(capitalize("mardi"), "Mardi");
        assert_eq!(capitalize("été"), "Été");
    }

    #[test]
    fn test_to_24_hour_morning() {
        assert_eq!(to_24_hour("6:05 AM").as_deref(), Some("06:05"));
        assert_eq!(to_24_hour("06:05 AM").as_deref(), Some("06:05"));
        assert_eq!(to_24_hour("11:59 AM").as_deref(), Some("11:59"));
    }

    #[test]
    fn test_to_24_hour_midnight_and_noon() {
        assert_eq!(to_24_hour("12:00 AM").as_deref(), Some("00:00"));
        assert_eq!(to_24_hour("12:30 PM").as_deref(), Some("12:30"));
    }

    #[test]
    fn test_to_24_hour_evening() {
        assert_eq!(to_24_hour("11:45 PM").as_deref(), Some("23:45"));
        assert_eq!(to_24_hour("08:41 PM").as_deref(), Some("20:41"));
    }

    #[test]
    fn test_to_24_hour_lowercase_period() {
        assert_eq!(to_24_hour("7:15 pm").as_deref(), Some("19:15"));
    }

    #[test]
    fn test_to_24_hour_malformed() {
        // Missing period
        assert!(to_24_hour("6:05").is_none());
        // Non-numeric hour
        assert!(to_24_hour("six:05 AM").is_none());
        assert!(to_24_hour("").is_none());
    }

    #[test]
    fn test_to_24_hour_huge_pm_hour_does_not_overflow() {
        assert!(to_24_hour("4294967295:00 PM").is_none());
        assert_eq!(to_24_hour("4294967295:00 AM").as_deref(), Some("4294967295:00"));
    }

    #[test]
    fn test_compass_to_french() {
        assert_eq!(compass_to_french("NE"), "Nord-Est");
        assert_eq!(compass_to_french("ne"), "Nord-Est");
        assert_eq!(compass_to_french("WSW"), "Ouest Sud-Ouest");
        assert_eq!(compass_to_french("n"), "Nord");
    }

    #[test]
    fn test_compass_to_french_unknown_passes_through() {
        assert_eq!(compass_to_french("XX"), "XX");
        assert_eq!(compass_to_french("nOpE"), "nOpE");
        assert_eq!(compass_to_french(""), "");
    }

    #[test]
    fn test_compass_table_covers_sixteen_points() {
        assert_eq!(COMPASS_FR.len(), 16);
        for (abbr, _) in COMPASS_FR {
            assert_ne!(compass_to_french(abbr), abbr);
        }
    }
}

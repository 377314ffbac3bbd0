//! Brazilian phone number masking.
//!
//! Input is reduced to at most 11 digits and shaped progressively into
//! `(DD) DDDD-DDDD` (landline) or `(DD) DDDDD-DDDD` (mobile).

/// Maximum digits kept: 2 area code + 9 subscriber.
pub const MAX_PHONE_DIGITS: usize = 11;

/// Keeps only ASCII digits.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Applies the phone mask to raw keystrokes.
///
/// Partial input yields a partial mask: `"119"` becomes `"(11) 9"`.
#[must_use]
pub fn format_phone(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(MAX_PHONE_DIGITS).collect();
    let len = digits.len();

    match len {
        0 => String::new(),
        1..=2 => format!("({digits}"),
        3..=6 => format!("({}) {}", &digits[..2], &digits[2..]),
        7..=10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_mobile_number() {
        assert_eq!(format_phone("11987654321"), "(11) 98765-4321");
    }

    #[test]
    fn test_landline_number() {
        assert_eq!(format_phone("1133334444"), "(11) 3333-4444");
    }

    #[test]
    fn test_partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("1"), "(1");
        assert_eq!(format_phone("11"), "(11");
        assert_eq!(format_phone("119"), "(11) 9");
        assert_eq!(format_phone("1198765"), "(11) 9876-5");
    }

    #[test]
    fn test_strips_and_truncates() {
        assert_eq!(format_phone("+55 (11) 98765-4321"), "(55) 11987-6543");
        assert_eq!(format_phone("11a98765b4321999"), "(11) 98765-4321");
    }

    #[test]
    fn test_remasking_is_stable() {
        let once = format_phone("11987654321");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn test_mask_characters_only_at_fixed_positions() {
        let source = "98765432101";
        for len in 0..=source.len() {
            let masked = format_phone(&source[..len]);
            for (i, c) in masked.chars().enumerate() {
                match c {
                    '(' => assert_eq!(i, 0),
                    ')' => assert_eq!(i, 3),
                    ' ' => assert_eq!(i, 4),
                    '-' => assert!(i == 9 || i == 10, "dash at {i} in {masked}"),
                    d => assert!(d.is_ascii_digit()),
                }
            }
            assert_eq!(digits_only(&masked), &source[..len]);
        }
    }
}
